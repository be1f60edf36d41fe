// ==========================================
// 排班生成系统 - 核心库
// ==========================================
// 职责: 按成员可出勤日、技能、连续出勤上限、休息配额与需求人数
//       生成 成员 × 日期 的班次标签表
// 技术栈: Rust + SQLite（配置）
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 引擎层 - 排班规则
pub mod engine;

// 配置层 - 策略参数
pub mod config;

// 数据库基础设施（连接初始化/PRAGMA 统一）
pub mod db;

// 日志系统
pub mod logging;

// API 层 - 业务接口
pub mod api;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::{
    Availability, Member, RequestKind, RosterInput, RosterResult, RosterTable, ShiftLabel,
    ShiftRequest, ShiftTimeDefinition, SkillGroup,
};

// 引擎
pub use engine::{
    EngineError, GreedyAssignmentEngine, RandomizedAllocator, RosterAlgorithm,
    RosterOrchestrator, RosterStrategy,
};

// 配置
pub use config::{ConfigManager, RosterConfigReader, RosterPolicy};

// API
pub use api::{ApiError, ApiResult, RosterApi, RosterRequest};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "排班生成系统";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
