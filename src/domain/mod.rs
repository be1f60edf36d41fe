// ==========================================
// 排班生成系统 - 领域模型层
// ==========================================
// 职责: 定义领域实体、类型
// 红线: 不含数据访问逻辑,不含引擎逻辑
// ==========================================

pub mod member;
pub mod roster;
pub mod shift;
pub mod types;

// 重导出核心类型
pub use member::{Availability, Member, MemberConstraints};
pub use roster::{
    DailyRequirements, MemberSummary, RosterInput, RosterResult, RosterTable, SkillCoverage,
    SlotCoverage,
};
pub use shift::{DemandSlot, ShiftRequest, ShiftTimeDefinition, SkillGroup, SkillQuota};
pub use types::{RequestKind, ShiftLabel};
