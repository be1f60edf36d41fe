// ==========================================
// 排班生成系统 - 引擎层
// ==========================================
// 职责: 排班生成规则引擎（单线程、同步、无 I/O）
// 顺序: 需求槽构建 → 柔软度评分 → 公休配额规划 → 分配 → 结果汇总
// ==========================================

pub mod aggregator;
pub mod assignment;
pub mod error;
pub mod flexibility;
pub mod holiday_quota;
pub mod orchestrator;
pub mod random_allocator;
pub mod run_state;
pub mod shuffle;
pub mod slot_builder;
pub mod strategy;

// 重导出核心引擎
pub use aggregator::ResultAggregator;
pub use assignment::{DayOutcome, GreedyAssignmentEngine};
pub use error::{EngineError, EngineResult};
pub use flexibility::FlexibilityScorer;
pub use holiday_quota::{HolidayPlan, HolidayPlanEntry, HolidayQuotaPlanner};
pub use orchestrator::RosterOrchestrator;
pub use random_allocator::RandomizedAllocator;
pub use run_state::{HolidayCapacity, MemberRunState, RequestIndex, RunArena};
pub use shuffle::{rng_from_entropy, rng_from_seed, shuffle, RosterRng};
pub use slot_builder::SlotBuilder;
pub use strategy::{AllocationReport, RosterAlgorithm, RosterStrategy};
