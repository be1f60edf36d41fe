// ==========================================
// 排班生成系统 - 随机基础分配器
// ==========================================
// 职责: 按日期×需求槽，随机抽取可出勤成员填充人数
// 规则:
// 1) 候选 = 当日可出勤 且 无非出勤申请 且 当日未被分配
// 2) 希望出勤者按列表顺序优先（不超过需求人数）
// 3) 其余候选洗牌后依次填充，直至满足或候选耗尽
// 4) 候选为空时退回全体成员（当日未被分配者）
// 红线: 不足时保持不足，不报错
// ==========================================

use crate::domain::roster::{RosterInput, RosterTable};
use crate::domain::types::{RequestKind, ShiftLabel};
use crate::engine::error::{EngineError, EngineResult};
use crate::engine::run_state::RequestIndex;
use crate::engine::shuffle::shuffle;
use chrono::NaiveDate;
use rand::Rng;
use std::collections::HashMap;
use tracing::{debug, info, instrument};

#[derive(Debug, Clone, Default)]
pub struct RandomizedAllocator {
    // 无状态
}

impl RandomizedAllocator {
    pub fn new() -> Self {
        Self {}
    }

    /// 执行整个期间的分配（按日写入 table，出错时保留已写入部分）
    #[instrument(skip_all, fields(members = input.members.len(), days = dates.len()))]
    pub fn allocate<R>(
        &self,
        input: &RosterInput,
        dates: &[NaiveDate],
        table: &mut RosterTable,
        rng: &mut R,
    ) -> EngineResult<()>
    where
        R: Rng + ?Sized,
    {
        let requests = RequestIndex::build(&input.requests);
        let mut total_assigned = 0u32;
        let mut total_shortage = 0u32;

        for date in dates {
            let (placed, shortage) = self.allocate_day(input, &requests, *date, rng);
            total_assigned += placed.len() as u32;
            total_shortage = total_shortage.saturating_add(shortage);

            for (idx, member) in input.members.iter().enumerate() {
                let label = match placed.get(&idx) {
                    Some(shift_name) => {
                        if requests.is(&member.id, *date, RequestKind::WorkPreferred) {
                            ShiftLabel::PreferredShift(shift_name.clone())
                        } else {
                            ShiftLabel::Shift(shift_name.clone())
                        }
                    }
                    None if requests.is(&member.id, *date, RequestKind::HolidayPreferred) => {
                        ShiftLabel::RequestedDayOff
                    }
                    None => ShiftLabel::DayOff,
                };
                if !table.set(&member.id, *date, label) {
                    return Err(EngineError::Internal(format!(
                        "排班表缺少单元格: member_id={}, date={}",
                        member.id, date
                    )));
                }
            }
        }

        info!(
            assigned = total_assigned,
            shortage = total_shortage,
            "随机基础分配完成"
        );
        Ok(())
    }

    /// 单日分配
    ///
    /// # 返回
    /// (members 下标 → 班次名, 当日不足人数)
    fn allocate_day<R>(
        &self,
        input: &RosterInput,
        requests: &RequestIndex,
        date: NaiveDate,
        rng: &mut R,
    ) -> (HashMap<usize, String>, u32)
    where
        R: Rng + ?Sized,
    {
        let members = &input.members;
        let mut placed: HashMap<usize, String> = HashMap::new();
        let mut shortage = 0u32;

        let Some(by_shift) = input.shift_requirements.get(&date) else {
            return (placed, shortage);
        };

        for (shift_name, required) in by_shift.iter().filter(|(_, n)| **n > 0) {
            let mut eligible: Vec<usize> = members
                .iter()
                .enumerate()
                .filter(|(idx, m)| {
                    !placed.contains_key(idx)
                        && m.can_work_on(date)
                        && !requests
                            .kind(&m.id, date)
                            .map(|k| k.is_non_work())
                            .unwrap_or(false)
                })
                .map(|(idx, _)| idx)
                .collect();

            if eligible.is_empty() {
                debug!(date = %date, shift = %shift_name, "无可出勤成员，退回全体成员");
                eligible = (0..members.len())
                    .filter(|idx| !placed.contains_key(idx))
                    .collect();
            }

            let mut filled = 0u32;

            // 希望出勤者优先（列表顺序）
            let preferred: Vec<usize> = eligible
                .iter()
                .copied()
                .filter(|idx| requests.is(&members[*idx].id, date, RequestKind::WorkPreferred))
                .collect();
            for idx in preferred {
                if filled >= *required {
                    break;
                }
                placed.insert(idx, shift_name.clone());
                filled += 1;
            }

            // 其余洗牌后填充
            let mut rest: Vec<usize> = eligible
                .into_iter()
                .filter(|idx| !placed.contains_key(idx))
                .collect();
            shuffle(&mut rest, rng);
            for idx in rest {
                if filled >= *required {
                    break;
                }
                placed.insert(idx, shift_name.clone());
                filled += 1;
            }

            shortage = shortage.saturating_add(required.saturating_sub(filled));
        }

        (placed, shortage)
    }
}
