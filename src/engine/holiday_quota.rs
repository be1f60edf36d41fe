// ==========================================
// 排班生成系统 - 公休配额规划
// ==========================================
// 职责: 为每个成员补足"最少休息天数"，随机预留休息日
// 输入: 成员列表 + 期间日期 + 申请索引 + 每日可休人数
// 输出: member_id → 预留日下标集合（并扣减每日可休人数）
// 红线: 必须对全体成员执行完毕后才能开始分配（可休人数跨成员共享）
// 红线: 无法满足时保持不足，不报错
// ==========================================

use crate::domain::member::Member;
use crate::domain::roster::saturating_sum;
use crate::domain::types::RequestKind;
use crate::engine::run_state::{HolidayCapacity, RequestIndex};
use chrono::NaiveDate;
use rand::Rng;
use serde::Serialize;
use std::collections::{BTreeSet, HashMap};
use tracing::{debug, instrument, warn};

// ==========================================
// HolidayPlanEntry - 单个成员的规划结果
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HolidayPlanEntry {
    pub member_id: String,
    /// 期间内已有的希望休天数
    pub existing: u32,
    /// 本次预留的天数
    pub reserved: u32,
    /// 未能满足的天数
    pub unmet: u32,
}

// ==========================================
// HolidayPlan - 规划结果
// ==========================================
#[derive(Debug, Clone)]
pub struct HolidayPlan {
    pub reservations: HashMap<String, BTreeSet<usize>>,
    pub entries: Vec<HolidayPlanEntry>,
}

impl HolidayPlan {
    pub fn is_reserved(&self, member_id: &str, day_index: usize) -> bool {
        self.reservations
            .get(member_id)
            .map(|days| days.contains(&day_index))
            .unwrap_or(false)
    }

    pub fn reserved_count(&self, member_id: &str) -> u32 {
        self.reservations
            .get(member_id)
            .map(|days| days.len() as u32)
            .unwrap_or(0)
    }

    pub fn total_unmet(&self) -> u32 {
        saturating_sum(self.entries.iter().map(|e| e.unmet))
    }
}

// ==========================================
// HolidayQuotaPlanner - 公休配额规划器
// ==========================================
pub struct HolidayQuotaPlanner {
    min_holiday_count: u32,
}

impl HolidayQuotaPlanner {
    pub fn new(min_holiday_count: u32) -> Self {
        Self { min_holiday_count }
    }

    /// 按成员顺序依次规划
    ///
    /// # 参数
    /// - `members`: 成员列表
    /// - `dates`: 期间日期（下标即 day_index）
    /// - `requests`: 申请索引
    /// - `capacity`: 每日可休人数（会被扣减）
    /// - `rng`: 随机源
    #[instrument(skip_all, fields(
        members = members.len(),
        days = dates.len(),
        min_holiday_count = self.min_holiday_count
    ))]
    pub fn plan<R>(
        &self,
        members: &[Member],
        dates: &[NaiveDate],
        requests: &RequestIndex,
        capacity: &mut HolidayCapacity,
        rng: &mut R,
    ) -> HolidayPlan
    where
        R: Rng + ?Sized,
    {
        let mut reservations = HashMap::with_capacity(members.len());
        let mut entries = Vec::with_capacity(members.len());

        for member in members {
            let (reserved, entry) = self.plan_member(member, dates, requests, capacity, rng);
            if entry.unmet > 0 {
                debug!(
                    member_id = %member.id,
                    existing = entry.existing,
                    reserved = entry.reserved,
                    unmet = entry.unmet,
                    "休息日可休人数不足，配额未满足"
                );
            }
            reservations.insert(member.id.clone(), reserved);
            entries.push(entry);
        }

        let plan = HolidayPlan {
            reservations,
            entries,
        };
        if plan.total_unmet() > 0 {
            warn!(total_unmet = plan.total_unmet(), "部分成员公休配额未满足");
        }
        plan
    }

    fn plan_member<R>(
        &self,
        member: &Member,
        dates: &[NaiveDate],
        requests: &RequestIndex,
        capacity: &mut HolidayCapacity,
        rng: &mut R,
    ) -> (BTreeSet<usize>, HolidayPlanEntry)
    where
        R: Rng + ?Sized,
    {
        let existing = dates
            .iter()
            .filter(|d| requests.is(&member.id, **d, RequestKind::HolidayPreferred))
            .count() as u32;
        let mut need = self.min_holiday_count.saturating_sub(existing);

        // 候选: 无任何申请 且 当日仍可休
        let mut pool: Vec<usize> = dates
            .iter()
            .enumerate()
            .filter(|(i, d)| !requests.has_request(&member.id, **d) && capacity.has_room(*i))
            .map(|(i, _)| i)
            .collect();

        let mut reserved = BTreeSet::new();
        while need > 0 && !pool.is_empty() {
            let pick = rng.gen_range(0..pool.len());
            let day_index = pool.remove(pick);
            reserved.insert(day_index);
            capacity.consume(day_index);
            need -= 1;
            pool.retain(|d| capacity.has_room(*d));
        }

        let entry = HolidayPlanEntry {
            member_id: member.id.clone(),
            existing,
            reserved: reserved.len() as u32,
            unmet: need,
        };
        (reserved, entry)
    }
}
