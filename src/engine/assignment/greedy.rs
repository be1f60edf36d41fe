use super::day::{DayAllocation, DayOutcome};
use crate::config::RosterPolicy;
use crate::domain::roster::{RosterInput, RosterTable};
use crate::engine::error::{EngineError, EngineResult};
use crate::engine::flexibility::FlexibilityScorer;
use crate::engine::holiday_quota::HolidayQuotaPlanner;
use crate::engine::run_state::{HolidayCapacity, RequestIndex, RunArena};
use crate::engine::strategy::AllocationReport;
use chrono::NaiveDate;
use rand::Rng;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, info, instrument};

// ==========================================
// GreedyAssignmentEngine - 多阶段贪心分配引擎
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct GreedyAssignmentEngine {
    /// 协作式取消标志（每日循环开始时检查）
    cancel_flag: Option<Arc<AtomicBool>>,
}

impl GreedyAssignmentEngine {
    pub fn new() -> Self {
        Self { cancel_flag: None }
    }

    pub fn with_cancel_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancel_flag = Some(flag);
        self
    }

    fn is_cancelled(&self) -> bool {
        self.cancel_flag
            .as_ref()
            .map(|f| f.load(Ordering::Relaxed))
            .unwrap_or(false)
    }

    // ==========================================
    // 核心方法
    // ==========================================

    /// 执行整个期间的分配
    ///
    /// 流程:
    /// 1) 柔软度评分（基于未修改的输入，只算一次）
    /// 2) 每日可休人数 = 成员数 - 当日班次需求合计
    /// 3) 公休配额规划（全体成员完成后才进入分配）
    /// 4) 按日执行 A→B→C→D→收尾
    ///
    /// # 参数
    /// - `input`: 输入快照
    /// - `policy`: 策略参数
    /// - `dates`: 期间日期（下标即 day_index）
    /// - `table`: 预置 Unset 的排班表
    /// - `rng`: 随机源
    #[instrument(skip_all, fields(
        members = input.members.len(),
        days = dates.len(),
        min_holiday_count = policy.min_holiday_count
    ))]
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
        let members = &input.members;

        let flexibility = FlexibilityScorer::new().score_members(members, dates);
        let requests = RequestIndex::build(&input.requests);

        let daily_demand: Vec<u32> = dates
            .iter()
            .map(|d| input.total_shift_demand_on(*d))
            .collect();
        let mut capacity = HolidayCapacity::new(members.len(), &daily_demand);

        let holiday_plan = HolidayQuotaPlanner::new(policy.min_holiday_count).plan(
            members,
            dates,
            &requests,
            &mut capacity,
            rng,
        );

        let mut arena = RunArena::for_members(members);
        let mut totals = DayOutcome::default();

        for (day_index, date) in dates.iter().enumerate() {
            if self.is_cancelled() {
                return Err(EngineError::Cancelled { date: *date });
            }

            let mut day = DayAllocation {
                date: *date,
                day_index,
                members,
                flexibility: &flexibility,
                requests: &requests,
                holiday_plan: &holiday_plan,
                default_max_consecutive_days: policy.default_max_consecutive_days,
                remaining_shift: input
                    .shift_requirements
                    .get(date)
                    .cloned()
                    .unwrap_or_default(),
                remaining_skill: input
                    .skill_requirements
                    .get(date)
                    .cloned()
                    .unwrap_or_default(),
                candidates: Vec::new(),
                assigned: Default::default(),
            };

            day.resolve_forced(&mut arena, &mut capacity, table)?;
            day.fill_skill_groups(&input.shift_catalog, &mut arena, rng)?;
            day.fill_shift_types(&input.shift_catalog, &mut arena, rng)?;
            day.resolve_reserved();
            let outcome = day.finalize(&mut arena, table)?;

            debug!(
                date = %date,
                assigned = outcome.assigned,
                day_off = outcome.day_off,
                requested_off = outcome.requested_off,
                unmet_demand = outcome.unmet_demand,
                "单日分配完成"
            );
            totals.absorb(&outcome);
        }

        info!(
            assigned = totals.assigned,
            day_off = totals.day_off,
            requested_off = totals.requested_off,
            unmet_demand = totals.unmet_demand,
            unmet_holidays = holiday_plan.total_unmet(),
            "贪心分配完成"
        );

        Ok(AllocationReport {
            remaining_capacity: capacity.as_slice().to_vec(),
            holiday_plan: Some(holiday_plan),
        })
    }
}
