// ==========================================
// 排班生成系统 - 柔软度评分
// ==========================================
// 职责: 统计成员在期间内可填入的 (可出勤日 × 可担当班次) 组合数
// 用途: 分配时的第一排序键（升序，越小越受限、越优先）
// 红线: 每次运行只在分配前计算一次，不随分配更新
// ==========================================

use crate::domain::member::Member;
use crate::domain::roster::saturating_sum;
use chrono::NaiveDate;
use std::collections::HashMap;
use tracing::debug;

pub struct FlexibilityScorer {
    // 无状态
}

impl FlexibilityScorer {
    pub fn new() -> Self {
        Self {}
    }

    /// 单个成员的柔软度
    pub fn score(&self, member: &Member, dates: &[NaiveDate]) -> u32 {
        let per_day = member.capabilities.len() as u32;
        saturating_sum(
            dates
                .iter()
                .filter(|d| member.can_work_on(**d))
                .map(|_| per_day),
        )
    }

    /// 全体成员的柔软度
    ///
    /// # 返回
    /// member_id → 柔软度
    pub fn score_members(&self, members: &[Member], dates: &[NaiveDate]) -> HashMap<String, u32> {
        let scores: HashMap<String, u32> = members
            .iter()
            .map(|m| (m.id.clone(), self.score(m, dates)))
            .collect();
        debug!(members = members.len(), days = dates.len(), "柔软度计算完成");
        scores
    }
}

impl Default for FlexibilityScorer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::member::Availability;
    use chrono::{Days, Weekday};

    fn week() -> Vec<NaiveDate> {
        // 2026-10-19 (周一) 起 7 天
        let start = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
        (0..7).map(|i| start + Days::new(i)).collect()
    }

    #[test]
    fn test_score_counts_days_times_capabilities() {
        let member = Member::new("M1", "佐藤")
            .with_availability(Availability::weekdays_only())
            .with_capabilities(["早番", "遅番"]);
        assert_eq!(FlexibilityScorer::new().score(&member, &week()), 10);
    }

    #[test]
    fn test_weekend_only_member() {
        let member = Member::new("M2", "鈴木")
            .with_availability(Availability::from_weekdays([Weekday::Sat, Weekday::Sun]))
            .with_capabilities(["日勤"]);
        assert_eq!(FlexibilityScorer::new().score(&member, &week()), 2);
    }

    #[test]
    fn test_no_capability_scores_zero() {
        let member = Member::new("M3", "高橋").with_availability(Availability::every_day());
        let scores = FlexibilityScorer::new().score_members(&[member], &week());
        assert_eq!(scores["M3"], 0);
    }
}
