// ==========================================
// 排班生成系统 - 引擎编排器（运行边界）
// ==========================================
// 用途: 协调 需求槽构建 → 柔软度 → 公休配额 → 分配 → 结果汇总
// 红线: 不向调用方抛出错误
// - 成员或期间为空 → 空结果
// - 期间越界 → 空结果（记录日志）
// - 分配中途出错 → 返回已写入的部分结果，并记录 fault
// ==========================================

use crate::config::RosterPolicy;
use crate::domain::roster::{RosterInput, RosterResult, RosterTable};
use crate::engine::aggregator::ResultAggregator;
use crate::engine::error::EngineError;
use crate::engine::shuffle::{rng_from_entropy, rng_from_seed};
use crate::engine::strategy::RosterAlgorithm;
use rand::Rng;
use std::borrow::Cow;
use std::collections::HashSet;
use tracing::{error, info, warn};
use uuid::Uuid;

pub struct RosterOrchestrator {
    aggregator: ResultAggregator,
}

impl RosterOrchestrator {
    pub fn new() -> Self {
        Self {
            aggregator: ResultAggregator::new(),
        }
    }

    /// 按策略参数执行排班（算法与随机源均由 policy 决定）
    ///
    /// policy.seed 为空时随机生成种子，实际种子写入结果
    pub fn generate_with_policy(&self, input: &RosterInput, policy: &RosterPolicy) -> RosterResult {
        let (mut rng, seed) = match policy.seed {
            Some(seed) => (rng_from_seed(seed), seed),
            None => rng_from_entropy(),
        };
        let algorithm = policy.strategy.algorithm();
        self.generate(input, policy, &algorithm, Some(seed), &mut rng)
    }

    /// 执行排班
    ///
    /// # 参数
    /// - `input`: 输入快照
    /// - `policy`: 策略参数
    /// - `algorithm`: 分配算法
    /// - `seed`: 随机源种子（仅记录用）
    /// - `rng`: 随机源
    pub fn generate<R>(
        &self,
        input: &RosterInput,
        policy: &RosterPolicy,
        algorithm: &RosterAlgorithm,
        seed: Option<u64>,
        rng: &mut R,
    ) -> RosterResult
    where
        R: Rng + ?Sized,
    {
        let run_id = Uuid::new_v4();
        let strategy = algorithm.strategy();

        info!(
            run_id = %run_id,
            strategy = strategy.as_str(),
            members = input.members.len(),
            start_date = %input.start_date,
            horizon_days = input.horizon_days,
            "开始生成排班"
        );

        if input.is_trivially_empty() {
            info!(run_id = %run_id, "成员或期间为空，返回空结果");
            return RosterResult::empty(run_id, strategy.as_str(), seed);
        }

        let Some(dates) = input.horizon_dates() else {
            let err = EngineError::HorizonOutOfRange {
                start_date: input.start_date,
                horizon_days: input.horizon_days,
            };
            error!(run_id = %run_id, error = %err, "排班期间无效，返回空结果");
            let mut result = RosterResult::empty(run_id, strategy.as_str(), seed);
            result.fault = Some(err.to_string());
            return result;
        };

        let input = dedup_members(input);
        let mut table = RosterTable::seeded(&input.members, &dates);

        let (holiday_plan, fault) = match algorithm.allocate(&input, policy, &dates, &mut table, rng) {
            Ok(report) => (report.holiday_plan, None),
            Err(err) => {
                error!(run_id = %run_id, error = %err, "排班中断，返回部分结果");
                (None, Some(err.to_string()))
            }
        };

        let mut result = self.aggregator.aggregate(
            run_id,
            strategy.as_str(),
            seed,
            &input,
            table,
            holiday_plan.as_ref(),
        );
        result.fault = fault;

        info!(
            run_id = %run_id,
            total_shortage = result.total_shortage(),
            short_slots = result.short_slots().count(),
            complete = result.assignments.is_complete(),
            "排班生成完成"
        );
        result
    }
}

impl Default for RosterOrchestrator {
    fn default() -> Self {
        Self::new()
    }
}

/// 成员ID重复时保留首个
fn dedup_members(input: &RosterInput) -> Cow<'_, RosterInput> {
    let mut seen = HashSet::with_capacity(input.members.len());
    if input.members.iter().all(|m| seen.insert(m.id.as_str())) {
        return Cow::Borrowed(input);
    }

    let mut seen = HashSet::with_capacity(input.members.len());
    let mut owned = input.clone();
    owned.members.retain(|m| {
        let first = seen.insert(m.id.clone());
        if !first {
            warn!(member_id = %m.id, "成员ID重复，忽略后出现的成员");
        }
        first
    });
    Cow::Owned(owned)
}
