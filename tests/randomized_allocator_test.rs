// ==========================================
// 随机基础分配器 集成测试
// ==========================================
// 测试目标: 候选过滤、希望出勤优先、洗牌公平性、不足时不报错
// ==========================================


use chrono::Weekday;
use shift_roster::domain::{
    Availability, Member, RequestKind, RosterInput, RosterTable, ShiftLabel, ShiftRequest,
};
use shift_roster::engine::{rng_from_seed, shuffle, RandomizedAllocator, RosterStrategy};
use shift_roster::{RosterOrchestrator, RosterPolicy};
use std::collections::HashMap;
use test_helpers::{day, full_time, monday, uniform_input};

fn run(input: &RosterInput, seed: u64) -> RosterTable {
    let dates = input.horizon_dates().unwrap();
    let mut table = RosterTable::seeded(&input.members, &dates);
    RandomizedAllocator::new()
        .allocate(input, &dates, &mut table, &mut rng_from_seed(seed))
        .unwrap();
    table
}

#[test]
fn test_non_work_requests_excluded() {
    let members: Vec<Member> = ["A", "B", "C", "D"].iter().map(|id| full_time(id, &["日勤"])).collect();
    let mut input = uniform_input(members, 1, &[("日勤", 2)]);
    input.requests = vec![
        ShiftRequest::new("A", day(0), RequestKind::HolidayPreferred),
        ShiftRequest::new("B", day(0), RequestKind::PaidLeave),
    ];

    for seed in 0..20 {
        let table = run(&input, seed);
        assert_eq!(table.label("A", day(0)), Some(&ShiftLabel::RequestedDayOff));
        assert_eq!(table.label("B", day(0)), Some(&ShiftLabel::DayOff));
        assert_eq!(table.assigned_count(day(0), "日勤"), 2);
    }
}

#[test]
fn test_each_member_placed_at_most_once_per_day() {
    let members: Vec<Member> = ["A", "B", "C"].iter().map(|id| full_time(id, &["日勤", "夜勤"])).collect();
    let input = uniform_input(members, 3, &[("日勤", 2), ("夜勤", 2)]);

    for seed in 0..20 {
        let table = run(&input, seed);
        for i in 0..3 {
            let total = table.assigned_count(day(i), "日勤") + table.assigned_count(day(i), "夜勤");
            // 需求 4 人，成员 3 人
            assert_eq!(total, 3, "seed={}", seed);
        }
    }
}

#[test]
fn test_shortage_is_left_unfilled() {
    let members = vec![full_time("A", &["日勤"])];
    let input = uniform_input(members, 2, &[("日勤", 3)]);

    let policy = RosterPolicy::default().with_strategy(RosterStrategy::Randomized).with_seed(7);
    let result = RosterOrchestrator::new().generate_with_policy(&input, &policy);

    assert!(result.fault.is_none());
    assert_eq!(result.total_shortage(), 4);
    assert!(result.assignments.is_complete());
}

#[test]
fn test_falls_back_to_all_members_when_nobody_available() {
    // 周六无人可出勤
    let members: Vec<Member> = ["A", "B"]
        .iter()
        .map(|id| {
            Member::new(*id, *id)
                .with_availability(Availability::from_weekdays([Weekday::Mon]))
                .with_capabilities(["日勤"])
        })
        .collect();
    let mut input = RosterInput::new(members, day(5), 1);
    input.require_shift(day(5), "日勤", 1);

    for seed in 0..10 {
        let table = run(&input, seed);
        assert_eq!(table.assigned_count(day(5), "日勤"), 1);
    }
}

#[test]
fn test_no_demand_means_everyone_off() {
    let members = vec![full_time("A", &["日勤"]), full_time("B", &["日勤"])];
    let input = RosterInput::new(members, monday(), 3);
    let table = run(&input, 1);
    for (_, row) in table.rows() {
        assert!(row.values().all(|l| *l == ShiftLabel::DayOff));
    }
}

#[test]
fn test_placement_is_roughly_uniform() {
    let members: Vec<Member> = ["A", "B", "C", "D"].iter().map(|id| full_time(id, &["日勤"])).collect();
    let input = uniform_input(members, 1, &[("日勤", 1)]);

    let mut counts: HashMap<String, u32> = HashMap::new();
    for seed in 0..400 {
        let table = run(&input, seed);
        for id in ["A", "B", "C", "D"] {
            if table.label(id, day(0)).map(|l| l.is_work()).unwrap_or(false) {
                *counts.entry(id.to_string()).or_default() += 1;
            }
        }
    }
    for id in ["A", "B", "C", "D"] {
        let n = counts.get(id).copied().unwrap_or(0);
        assert!((50..=150).contains(&n), "member={} count={}", id, n);
    }
}

#[test]
fn test_shuffle_is_permutation() {
    for seed in 0..100 {
        let original: Vec<u32> = vec![1, 1, 2, 3, 5, 8, 13, 21];
        let mut shuffled = original.clone();
        shuffle(&mut shuffled, &mut rng_from_seed(seed));
        let mut sorted = shuffled.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, original);
    }
}
