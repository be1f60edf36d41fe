// ==========================================
// 排班生成系统 - 需求槽构建
// ==========================================
// 输入: 日期别 班次需求 / 技能组需求 + 班次时间定义
// 输出: 扁平化的 DemandSlot / SkillQuota 列表（人数为 0 的跳过）
// 红线: 无副作用
// ==========================================

use crate::domain::roster::DailyRequirements;
use crate::domain::shift::{DemandSlot, ShiftTimeDefinition, SkillQuota};
use chrono::NaiveTime;
use std::collections::HashMap;

pub struct SlotBuilder {
    // 无状态
}

impl SlotBuilder {
    pub fn new() -> Self {
        Self {}
    }

    /// 构建班次需求槽
    ///
    /// 班次名不在定义表中时时间取 00:00-00:00（时长为 0）
    pub fn build_demand_slots(
        &self,
        shift_requirements: &DailyRequirements,
        catalog: &[ShiftTimeDefinition],
    ) -> Vec<DemandSlot> {
        let bounds: HashMap<&str, (NaiveTime, NaiveTime)> = catalog
            .iter()
            .map(|def| (def.name.as_str(), (def.start, def.end)))
            .collect();

        shift_requirements
            .iter()
            .flat_map(|(date, by_shift)| {
                by_shift
                    .iter()
                    .filter(|(_, required)| **required > 0)
                    .map(|(shift_name, required)| {
                        let (start, end) = bounds
                            .get(shift_name.as_str())
                            .copied()
                            .unwrap_or((NaiveTime::MIN, NaiveTime::MIN));
                        DemandSlot {
                            date: *date,
                            shift_name: shift_name.clone(),
                            required: *required,
                            skill_group: None,
                            start,
                            end,
                        }
                    })
            })
            .collect()
    }

    /// 构建技能组配额
    pub fn build_skill_quotas(&self, skill_requirements: &DailyRequirements) -> Vec<SkillQuota> {
        skill_requirements
            .iter()
            .flat_map(|(date, by_group)| {
                by_group
                    .iter()
                    .filter(|(_, required)| **required > 0)
                    .map(|(group, required)| SkillQuota {
                        date: *date,
                        skill_group: group.clone(),
                        required: *required,
                    })
            })
            .collect()
    }
}

impl Default for SlotBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate};
    use std::collections::BTreeMap;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, d).unwrap()
    }

    fn t(h: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, 0, 0).unwrap()
    }

    fn requirements(entries: &[(u32, &str, u32)]) -> DailyRequirements {
        let mut map: DailyRequirements = BTreeMap::new();
        for (d, name, n) in entries {
            map.entry(date(*d)).or_default().insert(name.to_string(), *n);
        }
        map
    }

    #[test]
    fn test_build_demand_slots_skips_zero_and_resolves_times() {
        let catalog = vec![ShiftTimeDefinition::new("早番", t(7), t(15))];
        let reqs = requirements(&[(19, "早番", 2), (19, "遅番", 1), (20, "早番", 0)]);

        let slots = SlotBuilder::new().build_demand_slots(&reqs, &catalog);
        assert_eq!(slots.len(), 2);

        let early = slots.iter().find(|s| s.shift_name == "早番").unwrap();
        assert_eq!(early.required, 2);
        assert_eq!(early.start, t(7));
        assert_eq!(early.duration(), Duration::hours(8));

        let late = slots.iter().find(|s| s.shift_name == "遅番").unwrap();
        assert_eq!(late.duration(), Duration::zero());
    }

    #[test]
    fn test_build_skill_quotas() {
        let reqs = requirements(&[(19, "リーダー", 1), (20, "リーダー", 0)]);
        let quotas = SlotBuilder::new().build_skill_quotas(&reqs);
        assert_eq!(quotas.len(), 1);
        assert_eq!(quotas[0].skill_group, "リーダー");
        assert_eq!(quotas[0].date, date(19));
    }

    #[test]
    fn test_empty_requirements() {
        let slots = SlotBuilder::new().build_demand_slots(&BTreeMap::new(), &[]);
        assert!(slots.is_empty());
    }
}
