// ==========================================
// 排班生成系统 - 运行期状态
// ==========================================
// 职责: 单次运行内的成员状态、申请索引、每日可休人数
// 红线: 运行结束即丢弃，不回写 Member
// ==========================================

use crate::domain::member::Member;
use crate::domain::shift::ShiftRequest;
use crate::domain::types::RequestKind;
use chrono::NaiveDate;
use std::collections::HashMap;

// ==========================================
// MemberRunState - 成员运行状态
// ==========================================
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MemberRunState {
    /// 当前连续出勤天数（Off 状态为 0）
    pub streak: u32,
    /// 本次运行累计出勤次数
    pub assigned_total: u32,
    pub longest_streak: u32,
}

impl MemberRunState {
    /// 记录一次出勤
    pub fn record_work(&mut self) {
        self.assigned_total += 1;
        self.streak += 1;
        self.longest_streak = self.longest_streak.max(self.streak);
    }

    /// 记录一次休息
    pub fn record_off(&mut self) {
        self.streak = 0;
    }

    pub fn is_working(&self) -> bool {
        self.streak > 0
    }
}

/// 运行期成员状态表（member_id → 状态）
#[derive(Debug, Clone, Default)]
pub struct RunArena {
    states: HashMap<String, MemberRunState>,
}

impl RunArena {
    pub fn for_members(members: &[Member]) -> Self {
        Self {
            states: members
                .iter()
                .map(|m| (m.id.clone(), MemberRunState::default()))
                .collect(),
        }
    }

    pub fn get(&self, member_id: &str) -> Option<&MemberRunState> {
        self.states.get(member_id)
    }

    pub fn get_mut(&mut self, member_id: &str) -> Option<&mut MemberRunState> {
        self.states.get_mut(member_id)
    }

    pub fn assigned_total(&self, member_id: &str) -> u32 {
        self.get(member_id).map(|s| s.assigned_total).unwrap_or(0)
    }
}

// ==========================================
// RequestIndex - 申请索引
// ==========================================
// 同一 (成员, 日期) 仅第一条申请有效
#[derive(Debug, Clone, Default)]
pub struct RequestIndex {
    /// member_id → (日期 → 申请类型)
    by_member: HashMap<String, HashMap<NaiveDate, RequestKind>>,
}

impl RequestIndex {
    pub fn build(requests: &[ShiftRequest]) -> Self {
        let mut by_member: HashMap<String, HashMap<NaiveDate, RequestKind>> = HashMap::new();
        for request in requests {
            by_member
                .entry(request.member_id.clone())
                .or_default()
                .entry(request.date)
                .or_insert(request.kind);
        }
        Self { by_member }
    }

    pub fn kind(&self, member_id: &str, date: NaiveDate) -> Option<RequestKind> {
        self.by_member.get(member_id)?.get(&date).copied()
    }

    pub fn has_request(&self, member_id: &str, date: NaiveDate) -> bool {
        self.kind(member_id, date).is_some()
    }

    pub fn is(&self, member_id: &str, date: NaiveDate, kind: RequestKind) -> bool {
        self.kind(member_id, date) == Some(kind)
    }
}

// ==========================================
// HolidayCapacity - 每日可休人数
// ==========================================
// cap[d] = max(0, 成员总数 - 当日班次需求合计)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HolidayCapacity {
    per_day: Vec<u32>,
}

impl HolidayCapacity {
    pub fn new(member_count: usize, daily_demand: &[u32]) -> Self {
        let members = u32::try_from(member_count).unwrap_or(u32::MAX);
        Self {
            per_day: daily_demand
                .iter()
                .map(|demand| members.saturating_sub(*demand))
                .collect(),
        }
    }

    pub fn get(&self, day_index: usize) -> u32 {
        self.per_day.get(day_index).copied().unwrap_or(0)
    }

    /// 扣减一人（下限为 0）
    pub fn consume(&mut self, day_index: usize) {
        if let Some(cap) = self.per_day.get_mut(day_index) {
            *cap = cap.saturating_sub(1);
        }
    }

    pub fn has_room(&self, day_index: usize) -> bool {
        self.get(day_index) > 0
    }

    pub fn as_slice(&self) -> &[u32] {
        &self.per_day
    }
}
