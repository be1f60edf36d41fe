// ==========================================
// 排班生成系统 - 排班算法定义
// ==========================================
// 用途：
// - RosterStrategy 作为配置/请求中的算法选择；
// - RosterAlgorithm 为统一的分配契约（同一输入、同一输出），调用方可互换。

use crate::config::RosterPolicy;
use crate::domain::roster::{RosterInput, RosterTable};
use crate::engine::assignment::GreedyAssignmentEngine;
use crate::engine::error::EngineResult;
use crate::engine::holiday_quota::HolidayPlan;
use crate::engine::random_allocator::RandomizedAllocator;
use chrono::NaiveDate;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// 排班算法类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RosterStrategy {
    Greedy,
    Randomized,
}

impl RosterStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            RosterStrategy::Greedy => "greedy",
            RosterStrategy::Randomized => "randomized",
        }
    }

    pub fn title_cn(&self) -> &'static str {
        match self {
            RosterStrategy::Greedy => "多阶段贪心",
            RosterStrategy::Randomized => "随机基础分配",
        }
    }

    /// 构建对应的分配算法
    pub fn algorithm(&self) -> RosterAlgorithm {
        match self {
            RosterStrategy::Greedy => RosterAlgorithm::Greedy(GreedyAssignmentEngine::new()),
            RosterStrategy::Randomized => RosterAlgorithm::Randomized(RandomizedAllocator::new()),
        }
    }
}

impl Default for RosterStrategy {
    fn default() -> Self {
        RosterStrategy::Greedy
    }
}

impl std::str::FromStr for RosterStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "greedy" => Ok(RosterStrategy::Greedy),
            "randomized" | "random" => Ok(RosterStrategy::Randomized),
            other => Err(format!("未知排班算法: {}", other)),
        }
    }
}

/// 分配结果附带信息
#[derive(Debug, Clone, Default)]
pub struct AllocationReport {
    /// 公休配额规划结果（仅贪心算法）
    pub holiday_plan: Option<HolidayPlan>,
    /// 运行结束时每日剩余可休人数（仅贪心算法）
    pub remaining_capacity: Vec<u32>,
}

/// 排班算法（统一契约）
pub enum RosterAlgorithm {
    Greedy(GreedyAssignmentEngine),
    Randomized(RandomizedAllocator),
}

impl RosterAlgorithm {
    pub fn strategy(&self) -> RosterStrategy {
        match self {
            RosterAlgorithm::Greedy(_) => RosterStrategy::Greedy,
            RosterAlgorithm::Randomized(_) => RosterStrategy::Randomized,
        }
    }

    /// 执行分配，结果写入 table
    ///
    /// # 参数
    /// - `input`: 输入快照
    /// - `policy`: 策略参数
    /// - `dates`: 期间日期
    /// - `table`: 预置 Unset 的排班表（出错时保留已写入部分）
    /// - `rng`: 随机源
    pub fn allocate<R>(
        &self,
        input: &RosterInput,
        policy: &RosterPolicy,
        dates: &[NaiveDate],
        table: &mut RosterTable,
        rng: &mut R,
    ) -> EngineResult<AllocationReport>
    where
        R: Rng + ?Sized,
    {
        match self {
            RosterAlgorithm::Greedy(engine) => engine.allocate(input, policy, dates, table, rng),
            RosterAlgorithm::Randomized(allocator) => {
                allocator.allocate(input, dates, table, rng)?;
                Ok(AllocationReport::default())
            }
        }
    }
}
