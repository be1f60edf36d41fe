// ==========================================
// 排班生成系统 - 排班输入/结果领域模型
// ==========================================
// 职责: 一次排班运行的输入快照、排班表、覆盖率与汇总
// 红线: 结果每次新建，不修改输入
// ==========================================

use crate::domain::member::Member;
use crate::domain::shift::{ShiftRequest, ShiftTimeDefinition, SkillGroup};
use crate::domain::types::ShiftLabel;
use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

/// 日期 → (名称 → 人数)
pub type DailyRequirements = BTreeMap<NaiveDate, BTreeMap<String, u32>>;

/// 人数合计（上限 u32::MAX）
pub fn saturating_sum<I>(counts: I) -> u32
where
    I: IntoIterator<Item = u32>,
{
    counts.into_iter().fold(0u32, u32::saturating_add)
}

// ==========================================
// RosterInput - 排班输入快照
// ==========================================
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RosterInput {
    pub members: Vec<Member>,
    pub start_date: NaiveDate,
    pub horizon_days: u32,
    /// 日期 → 技能组名 → 人数
    #[serde(default)]
    pub skill_requirements: DailyRequirements,
    /// 日期 → 班次名 → 人数
    #[serde(default)]
    pub shift_requirements: DailyRequirements,
    #[serde(default)]
    pub shift_catalog: Vec<ShiftTimeDefinition>,
    #[serde(default)]
    pub skill_groups: Vec<SkillGroup>,
    #[serde(default)]
    pub requests: Vec<ShiftRequest>,
}

impl RosterInput {
    pub fn new(members: Vec<Member>, start_date: NaiveDate, horizon_days: u32) -> Self {
        Self {
            members,
            start_date,
            horizon_days,
            ..Default::default()
        }
    }

    /// 设置某日某班次的需求人数
    pub fn require_shift(&mut self, date: NaiveDate, shift_name: &str, headcount: u32) {
        self.shift_requirements
            .entry(date)
            .or_default()
            .insert(shift_name.to_string(), headcount);
    }

    /// 设置某日某技能组的需求人数
    pub fn require_skill(&mut self, date: NaiveDate, skill_group: &str, headcount: u32) {
        self.skill_requirements
            .entry(date)
            .or_default()
            .insert(skill_group.to_string(), headcount);
    }

    /// 排班期间内的全部日期
    ///
    /// # 返回
    /// - Some(dates): 从 start_date 起连续 horizon_days 天
    /// - None: 日期运算越界
    pub fn horizon_dates(&self) -> Option<Vec<NaiveDate>> {
        (0..self.horizon_days)
            .map(|offset| self.start_date.checked_add_days(Days::new(u64::from(offset))))
            .collect()
    }

    /// 成员或期间为空时无需排班
    pub fn is_trivially_empty(&self) -> bool {
        self.members.is_empty() || self.horizon_days == 0
    }

    /// 某日全部班次需求合计
    pub fn total_shift_demand_on(&self, date: NaiveDate) -> u32 {
        self.shift_requirements
            .get(&date)
            .map(|by_shift| saturating_sum(by_shift.values().copied()))
            .unwrap_or(0)
    }
}

// ==========================================
// RosterTable - 排班表 (成员 → 日期 → 标签)
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RosterTable {
    entries: BTreeMap<String, BTreeMap<NaiveDate, ShiftLabel>>,
}

impl RosterTable {
    /// 为每个成员、每个日期预置 Unset
    pub fn seeded(members: &[Member], dates: &[NaiveDate]) -> Self {
        let entries = members
            .iter()
            .map(|m| {
                let row = dates.iter().map(|d| (*d, ShiftLabel::Unset)).collect();
                (m.id.clone(), row)
            })
            .collect();
        Self { entries }
    }

    /// 写入标签（仅允许写入已预置的单元格）
    pub fn set(&mut self, member_id: &str, date: NaiveDate, label: ShiftLabel) -> bool {
        match self
            .entries
            .get_mut(member_id)
            .and_then(|row| row.get_mut(&date))
        {
            Some(cell) => {
                *cell = label;
                true
            }
            None => false,
        }
    }

    pub fn label(&self, member_id: &str, date: NaiveDate) -> Option<&ShiftLabel> {
        self.entries.get(member_id).and_then(|row| row.get(&date))
    }

    pub fn row(&self, member_id: &str) -> Option<&BTreeMap<NaiveDate, ShiftLabel>> {
        self.entries.get(member_id)
    }

    pub fn rows(&self) -> impl Iterator<Item = (&String, &BTreeMap<NaiveDate, ShiftLabel>)> {
        self.entries.iter()
    }

    pub fn member_count(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 某日担当某班次的人数
    pub fn assigned_count(&self, date: NaiveDate, shift_name: &str) -> u32 {
        self.entries
            .values()
            .filter_map(|row| row.get(&date))
            .filter(|label| label.shift_name() == Some(shift_name))
            .count() as u32
    }

    /// 是否所有单元格都已确定
    pub fn is_complete(&self) -> bool {
        self.entries
            .values()
            .all(|row| row.values().all(|label| !label.is_unset()))
    }

    /// 字符串形式（供导出等外部协作方只读使用）
    pub fn to_label_map(&self) -> BTreeMap<String, BTreeMap<NaiveDate, String>> {
        self.entries
            .iter()
            .map(|(id, row)| {
                let labels = row.iter().map(|(d, l)| (*d, l.as_label())).collect();
                (id.clone(), labels)
            })
            .collect()
    }
}

// ==========================================
// SlotCoverage - 需求槽充足度
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotCoverage {
    pub date: NaiveDate,
    pub shift_name: String,
    pub required: u32,
    pub assigned: u32,
    pub shortage: u32,
    pub excess: u32,
}

impl SlotCoverage {
    pub fn new(date: NaiveDate, shift_name: String, required: u32, assigned: u32) -> Self {
        Self {
            date,
            shift_name,
            required,
            assigned,
            shortage: required.saturating_sub(assigned),
            excess: assigned.saturating_sub(required),
        }
    }

    pub fn is_short(&self) -> bool {
        self.shortage > 0
    }
}

// ==========================================
// SkillCoverage - 技能组配额充足度
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillCoverage {
    pub date: NaiveDate,
    pub skill_group: String,
    pub required: u32,
    pub assigned: u32,
    pub shortage: u32,
}

// ==========================================
// MemberSummary - 成员汇总
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberSummary {
    pub member_id: String,
    pub work_days: u32,
    pub day_off_count: u32,
    pub requested_off_count: u32,
    pub preferred_fulfilled: u32,
    pub reserved_holidays: u32,
    pub longest_streak: u32,
}

// ==========================================
// RosterResult - 排班结果
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RosterResult {
    pub run_id: Uuid,
    pub strategy: String,
    pub seed: Option<u64>,
    pub assignments: RosterTable,
    pub coverage: Vec<SlotCoverage>,
    pub skill_coverage: Vec<SkillCoverage>,
    pub member_summaries: Vec<MemberSummary>,
    /// 运行中断时的原因（正常完成为 None）
    pub fault: Option<String>,
}

impl RosterResult {
    /// 空结果
    pub fn empty(run_id: Uuid, strategy: &str, seed: Option<u64>) -> Self {
        Self {
            run_id,
            strategy: strategy.to_string(),
            seed,
            assignments: RosterTable::default(),
            coverage: Vec::new(),
            skill_coverage: Vec::new(),
            member_summaries: Vec::new(),
            fault: None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }

    /// 全部需求槽的缺员合计
    pub fn total_shortage(&self) -> u32 {
        saturating_sum(self.coverage.iter().map(|c| c.shortage))
    }

    pub fn short_slots(&self) -> impl Iterator<Item = &SlotCoverage> {
        self.coverage.iter().filter(|c| c.is_short())
    }

    pub fn label(&self, member_id: &str, date: NaiveDate) -> Option<&ShiftLabel> {
        self.assignments.label(member_id, date)
    }

    pub fn summary_of(&self, member_id: &str) -> Option<&MemberSummary> {
        self.member_summaries.iter().find(|s| s.member_id == member_id)
    }
}
