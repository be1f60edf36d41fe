// ==========================================
// 公休配额规划 集成测试
// ==========================================
// 测试目标: 预留休息数量、每日可休人数共享、与贪心分配的衔接
// ==========================================


use rand::Rng;
use shift_roster::domain::{Member, RequestKind, RosterTable, ShiftLabel, ShiftRequest};
use shift_roster::engine::{
    rng_from_seed, GreedyAssignmentEngine, HolidayCapacity, HolidayQuotaPlanner, RequestIndex,
};
use shift_roster::RosterPolicy;
use test_helpers::{day, full_time, uniform_input};

const KINDS: [RequestKind; 4] = [
    RequestKind::WorkPreferred,
    RequestKind::HolidayPreferred,
    RequestKind::PaidLeave,
    RequestKind::MedicalCheckup,
];

#[test]
fn test_final_holidays_match_min_or_reservable() {
    for seed in 0..50 {
        let mut rng = rng_from_seed(seed);
        let days = 14u64;
        let dates: Vec<_> = (0..days).map(day).collect();
        let member = full_time("A", &["日勤"]);

        let mut requests = Vec::new();
        for i in 0..days {
            if rng.gen_bool(0.2) {
                let kind = KINDS[rng.gen_range(0..KINDS.len())];
                requests.push(ShiftRequest::new("A", day(i), kind));
            }
        }
        let index = RequestIndex::build(&requests);
        let demand: Vec<u32> = (0..days).map(|_| rng.gen_range(0..=1)).collect();
        let mut capacity = HolidayCapacity::new(1, &demand);

        let existing = requests
            .iter()
            .filter(|r| r.kind == RequestKind::HolidayPreferred)
            .count() as u32;
        let reservable = dates
            .iter()
            .enumerate()
            .filter(|(i, d)| !index.has_request("A", **d) && capacity.has_room(*i))
            .count() as u32;
        let min_holidays = rng.gen_range(0..=10);

        let plan = HolidayQuotaPlanner::new(min_holidays).plan(
            &[member],
            &dates,
            &index,
            &mut capacity,
            &mut rng,
        );

        let reserved = plan.reserved_count("A");
        if existing <= min_holidays {
            assert_eq!(
                existing + reserved,
                min_holidays.min(existing + reservable),
                "seed={}",
                seed
            );
            assert_eq!(plan.entries[0].unmet, min_holidays - existing - reserved);
        } else {
            assert_eq!(reserved, 0);
        }
    }
}

#[test]
fn test_reservations_never_exceed_daily_capacity() {
    for seed in 0..30 {
        let mut rng = rng_from_seed(seed);
        let members: Vec<Member> = (0..5).map(|i| full_time(&format!("M{}", i), &["日勤"])).collect();
        let dates: Vec<_> = (0..10).map(day).collect();
        let demand: Vec<u32> = (0..10).map(|_| rng.gen_range(2..=5)).collect();
        let initial = HolidayCapacity::new(members.len(), &demand);
        let mut capacity = initial.clone();

        let plan = HolidayQuotaPlanner::new(4).plan(
            &members,
            &dates,
            &RequestIndex::default(),
            &mut capacity,
            &mut rng,
        );

        for day_index in 0..dates.len() {
            let reserved_that_day = members
                .iter()
                .filter(|m| plan.is_reserved(&m.id, day_index))
                .count() as u32;
            assert!(reserved_that_day <= initial.get(day_index), "seed={}", seed);
            assert_eq!(capacity.get(day_index), initial.get(day_index) - reserved_that_day);
        }
    }
}

#[test]
fn test_consume_on_empty_day_stays_zero() {
    let mut capacity = HolidayCapacity::new(2, &[2, 5]);
    capacity.consume(0);
    capacity.consume(1);
    capacity.consume(7);
    assert_eq!(capacity.as_slice(), &[0, 0]);
}

#[test]
fn test_reserved_days_become_day_off_in_table() {
    let members = vec![full_time("A", &["日勤"]), full_time("B", &["日勤"]), full_time("C", &["日勤"])];
    let input = uniform_input(members, 14, &[("日勤", 2)]);
    let policy = RosterPolicy::default().with_min_holiday_count(4);
    let dates = input.horizon_dates().unwrap();

    for seed in 0..10 {
        let mut table = RosterTable::seeded(&input.members, &dates);
        let report = GreedyAssignmentEngine::new()
            .allocate(&input, &policy, &dates, &mut table, &mut rng_from_seed(seed))
            .unwrap();
        let plan = report.holiday_plan.unwrap();

        // 每日可休 1 人，14 天 → 三人各 4 天可全部满足
        assert_eq!(plan.total_unmet(), 0);
        for member in &input.members {
            assert_eq!(plan.reserved_count(&member.id), 4);
            for (i, date) in dates.iter().enumerate() {
                if plan.is_reserved(&member.id, i) {
                    assert_eq!(table.label(&member.id, *date), Some(&ShiftLabel::DayOff));
                }
            }
        }
    }
}
