use crate::domain::member::Member;
use crate::domain::roster::{saturating_sum, RosterTable};
use crate::domain::shift::ShiftTimeDefinition;
use crate::domain::types::{RequestKind, ShiftLabel};
use crate::engine::error::{EngineError, EngineResult};
use crate::engine::holiday_quota::HolidayPlan;
use crate::engine::run_state::{HolidayCapacity, MemberRunState, RequestIndex, RunArena};
use crate::engine::shuffle::pick_min_with_random_tie;
use chrono::NaiveDate;
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::{BTreeMap, HashMap, HashSet};

/// 单日分配统计
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DayOutcome {
    pub assigned: u32,
    pub day_off: u32,
    pub requested_off: u32,
    /// 收尾时仍未满足的班次需求人数
    pub unmet_demand: u32,
}

impl DayOutcome {
    pub fn absorb(&mut self, other: &DayOutcome) {
        self.assigned = self.assigned.saturating_add(other.assigned);
        self.day_off = self.day_off.saturating_add(other.day_off);
        self.requested_off = self.requested_off.saturating_add(other.requested_off);
        self.unmet_demand = self.unmet_demand.saturating_add(other.unmet_demand);
    }
}

// ==========================================
// DayAllocation - 单日分配上下文
// ==========================================
pub(super) struct DayAllocation<'a> {
    pub date: NaiveDate,
    pub day_index: usize,
    pub members: &'a [Member],
    pub flexibility: &'a HashMap<String, u32>,
    pub requests: &'a RequestIndex,
    pub holiday_plan: &'a HolidayPlan,
    pub default_max_consecutive_days: u32,
    /// 班次名 → 剩余需求人数
    pub remaining_shift: BTreeMap<String, u32>,
    /// 技能组名 → 剩余需求人数
    pub remaining_skill: BTreeMap<String, u32>,
    /// 候选成员（members 下标）
    pub candidates: Vec<usize>,
    /// 当日已分配: members 下标 → 班次名
    pub assigned: HashMap<usize, String>,
}

impl<'a> DayAllocation<'a> {
    // ==========================================
    // 阶段 A: 强制确定
    // ==========================================

    /// 希望休 → 希休（扣减可休人数）
    /// 预留休 → 休
    /// 不可出勤 / 达到连续出勤上限 → 休（扣减可休人数）
    /// 其余 → 候选
    pub fn resolve_forced(
        &mut self,
        arena: &mut RunArena,
        capacity: &mut HolidayCapacity,
        table: &mut RosterTable,
    ) -> EngineResult<()> {
        for (idx, member) in self.members.iter().enumerate() {
            let state = state_mut(arena, &member.id)?;

            if self
                .requests
                .is(&member.id, self.date, RequestKind::HolidayPreferred)
            {
                set_label(table, &member.id, self.date, ShiftLabel::RequestedDayOff)?;
                state.record_off();
                capacity.consume(self.day_index);
                continue;
            }

            if self.holiday_plan.is_reserved(&member.id, self.day_index) {
                set_label(table, &member.id, self.date, ShiftLabel::DayOff)?;
                state.record_off();
                continue;
            }

            let max_streak = member.max_consecutive_days_or(self.default_max_consecutive_days);
            if !member.can_work_on(self.date) || state.streak >= max_streak {
                // 自动休息同样计入可休人数扣减
                set_label(table, &member.id, self.date, ShiftLabel::DayOff)?;
                state.record_off();
                capacity.consume(self.day_index);
                continue;
            }

            self.candidates.push(idx);
        }
        Ok(())
    }

    // ==========================================
    // 阶段 B: 技能组配额
    // ==========================================

    /// 只分配班次目录中已启用的班次（与阶段 C 一致）
    pub fn fill_skill_groups<R>(
        &mut self,
        catalog: &[ShiftTimeDefinition],
        arena: &mut RunArena,
        rng: &mut R,
    ) -> EngineResult<()>
    where
        R: Rng + ?Sized,
    {
        let enabled: HashSet<&str> = catalog
            .iter()
            .filter(|d| d.enabled)
            .map(|d| d.name.as_str())
            .collect();
        let groups: Vec<String> = self.remaining_skill.keys().cloned().collect();

        for group in groups {
            while self.remaining_skill.get(&group).copied().unwrap_or(0) > 0 {
                let pool: Vec<usize> = self
                    .open_candidates()
                    .filter(|idx| self.members[*idx].belongs_to(&group))
                    .collect();

                let Some(idx) = self.pick_most_constrained(&pool, arena, rng) else {
                    break;
                };

                let member = &self.members[idx];
                let feasible: Vec<&String> = member
                    .capabilities
                    .iter()
                    .filter(|s| enabled.contains(s.as_str()))
                    .filter(|s| self.remaining_shift.get(s.as_str()).copied().unwrap_or(0) > 0)
                    .collect();
                // 无可分配班次时不消耗该成员，交给阶段 C
                let Some(shift_name) = feasible.choose(rng).map(|s| (*s).clone()) else {
                    break;
                };
                self.assign(idx, shift_name, arena)?;
                if let Some(left) = self.remaining_skill.get_mut(&group) {
                    *left -= 1;
                }
            }
        }
        Ok(())
    }

    // ==========================================
    // 阶段 C: 剩余班次需求
    // ==========================================

    pub fn fill_shift_types<R>(
        &mut self,
        catalog: &[ShiftTimeDefinition],
        arena: &mut RunArena,
        rng: &mut R,
    ) -> EngineResult<()>
    where
        R: Rng + ?Sized,
    {
        for definition in catalog.iter().filter(|d| d.enabled) {
            while self
                .remaining_shift
                .get(&definition.name)
                .copied()
                .unwrap_or(0)
                > 0
            {
                let pool: Vec<usize> = self
                    .open_candidates()
                    .filter(|idx| self.members[*idx].can_work_shift(&definition.name))
                    .collect();

                let Some(idx) = self.pick_most_constrained(&pool, arena, rng) else {
                    break;
                };
                self.assign(idx, definition.name.clone(), arena)?;
            }
        }
        Ok(())
    }

    // ==========================================
    // 阶段 D: 预留扩展点
    // ==========================================

    /// 无行为。阶段 C 之后仍不足的需求保持不足。
    pub fn resolve_reserved(&mut self) {}

    // ==========================================
    // 收尾
    // ==========================================

    pub fn finalize(self, arena: &mut RunArena, table: &mut RosterTable) -> EngineResult<DayOutcome> {
        let mut outcome = DayOutcome {
            unmet_demand: saturating_sum(self.remaining_shift.values().copied()),
            ..Default::default()
        };

        for idx in &self.candidates {
            let member = &self.members[*idx];
            match self.assigned.get(idx) {
                Some(shift_name) => {
                    let label = if self
                        .requests
                        .is(&member.id, self.date, RequestKind::WorkPreferred)
                    {
                        ShiftLabel::PreferredShift(shift_name.clone())
                    } else {
                        ShiftLabel::Shift(shift_name.clone())
                    };
                    set_label(table, &member.id, self.date, label)?;
                    outcome.assigned += 1;
                }
                None => {
                    set_label(table, &member.id, self.date, ShiftLabel::DayOff)?;
                    state_mut(arena, &member.id)?.record_off();
                }
            }
        }

        for member in self.members {
            match table.label(&member.id, self.date) {
                Some(ShiftLabel::DayOff) => outcome.day_off += 1,
                Some(ShiftLabel::RequestedDayOff) => outcome.requested_off += 1,
                _ => {}
            }
        }
        Ok(outcome)
    }

    // ==========================================
    // 辅助方法
    // ==========================================

    fn open_candidates(&self) -> impl Iterator<Item = usize> + '_ {
        self.candidates
            .iter()
            .copied()
            .filter(|idx| !self.assigned.contains_key(idx))
    }

    /// 选择最受限的成员
    ///
    /// 排序键: 柔软度升序 → 累计出勤升序 → 随机
    fn pick_most_constrained<R>(&self, pool: &[usize], arena: &RunArena, rng: &mut R) -> Option<usize>
    where
        R: Rng + ?Sized,
    {
        let pick = pick_min_with_random_tie(
            pool,
            |idx| {
                let id = &self.members[*idx].id;
                (
                    self.flexibility.get(id).copied().unwrap_or(0),
                    arena.assigned_total(id),
                )
            },
            rng,
        )?;
        Some(pool[pick])
    }

    fn assign(&mut self, idx: usize, shift_name: String, arena: &mut RunArena) -> EngineResult<()> {
        if let Some(left) = self.remaining_shift.get_mut(&shift_name) {
            *left = left.saturating_sub(1);
        }
        state_mut(arena, &self.members[idx].id)?.record_work();
        self.assigned.insert(idx, shift_name);
        Ok(())
    }
}

fn state_mut<'s>(arena: &'s mut RunArena, member_id: &str) -> EngineResult<&'s mut MemberRunState> {
    arena
        .get_mut(member_id)
        .ok_or_else(|| EngineError::MissingRunState {
            member_id: member_id.to_string(),
        })
}

fn set_label(
    table: &mut RosterTable,
    member_id: &str,
    date: NaiveDate,
    label: ShiftLabel,
) -> EngineResult<()> {
    if table.set(member_id, date, label) {
        Ok(())
    } else {
        Err(EngineError::Internal(format!(
            "排班表缺少单元格: member_id={}, date={}",
            member_id, date
        )))
    }
}
