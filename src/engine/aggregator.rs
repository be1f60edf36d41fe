// ==========================================
// 排班生成系统 - 结果汇总
// ==========================================
// 职责: 将排班表组装为 RosterResult，并计算
//       需求槽充足度（缺员/超员）、技能组配额充足度、成员汇总
// 红线: 只读排班表，不修改
// ==========================================

use crate::domain::member::Member;
use crate::domain::roster::{
    MemberSummary, RosterInput, RosterResult, RosterTable, SkillCoverage, SlotCoverage,
};
use crate::domain::shift::{DemandSlot, SkillQuota};
use crate::domain::types::ShiftLabel;
use crate::engine::holiday_quota::HolidayPlan;
use crate::engine::slot_builder::SlotBuilder;
use std::collections::HashMap;
use uuid::Uuid;

pub struct ResultAggregator {
    slot_builder: SlotBuilder,
}

impl ResultAggregator {
    pub fn new() -> Self {
        Self {
            slot_builder: SlotBuilder::new(),
        }
    }

    /// 组装排班结果
    ///
    /// # 参数
    /// - `run_id`: 运行ID
    /// - `strategy`: 算法名
    /// - `seed`: 随机种子
    /// - `input`: 输入快照
    /// - `table`: 排班表（可能是中断时的部分结果）
    /// - `holiday_plan`: 公休配额规划（仅贪心算法）
    pub fn aggregate(
        &self,
        run_id: Uuid,
        strategy: &str,
        seed: Option<u64>,
        input: &RosterInput,
        table: RosterTable,
        holiday_plan: Option<&HolidayPlan>,
    ) -> RosterResult {
        let slots = self
            .slot_builder
            .build_demand_slots(&input.shift_requirements, &input.shift_catalog);
        let quotas = self.slot_builder.build_skill_quotas(&input.skill_requirements);

        let coverage = self.slot_coverage(&slots, &table);
        let skill_coverage = self.skill_coverage(&quotas, &input.members, &table);
        let member_summaries = input
            .members
            .iter()
            .filter_map(|m| {
                let reserved = holiday_plan.map(|p| p.reserved_count(&m.id)).unwrap_or(0);
                self.member_summary(&m.id, &table, reserved)
            })
            .collect();

        RosterResult {
            run_id,
            strategy: strategy.to_string(),
            seed,
            assignments: table,
            coverage,
            skill_coverage,
            member_summaries,
            fault: None,
        }
    }

    /// 需求槽充足度
    pub fn slot_coverage(&self, slots: &[DemandSlot], table: &RosterTable) -> Vec<SlotCoverage> {
        slots
            .iter()
            .map(|slot| {
                let assigned = table.assigned_count(slot.date, &slot.shift_name);
                SlotCoverage::new(slot.date, slot.shift_name.clone(), slot.required, assigned)
            })
            .collect()
    }

    /// 技能组配额充足度（当日出勤的该组成员人数）
    pub fn skill_coverage(
        &self,
        quotas: &[SkillQuota],
        members: &[Member],
        table: &RosterTable,
    ) -> Vec<SkillCoverage> {
        let group_of: HashMap<&str, &str> = members
            .iter()
            .filter_map(|m| m.skill_group.as_deref().map(|g| (m.id.as_str(), g)))
            .collect();

        quotas
            .iter()
            .map(|quota| {
                let assigned = table
                    .rows()
                    .filter(|(id, _)| group_of.get(id.as_str()) == Some(&quota.skill_group.as_str()))
                    .filter(|(_, row)| row.get(&quota.date).map(|l| l.is_work()).unwrap_or(false))
                    .count() as u32;
                SkillCoverage {
                    date: quota.date,
                    skill_group: quota.skill_group.clone(),
                    required: quota.required,
                    assigned,
                    shortage: quota.required.saturating_sub(assigned),
                }
            })
            .collect()
    }

    /// 成员汇总
    pub fn member_summary(
        &self,
        member_id: &str,
        table: &RosterTable,
        reserved_holidays: u32,
    ) -> Option<MemberSummary> {
        let row = table.row(member_id)?;
        let mut summary = MemberSummary {
            member_id: member_id.to_string(),
            reserved_holidays,
            ..Default::default()
        };

        let mut streak = 0u32;
        for label in row.values() {
            match label {
                ShiftLabel::Shift(_) | ShiftLabel::PreferredShift(_) => {
                    summary.work_days += 1;
                    if matches!(label, ShiftLabel::PreferredShift(_)) {
                        summary.preferred_fulfilled += 1;
                    }
                    streak += 1;
                    summary.longest_streak = summary.longest_streak.max(streak);
                }
                ShiftLabel::DayOff => {
                    summary.day_off_count += 1;
                    streak = 0;
                }
                ShiftLabel::RequestedDayOff => {
                    summary.requested_off_count += 1;
                    streak = 0;
                }
                ShiftLabel::Unset => streak = 0,
            }
        }
        Some(summary)
    }
}

impl Default for ResultAggregator {
    fn default() -> Self {
        Self::new()
    }
}
