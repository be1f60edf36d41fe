// ==========================================
// 排班生成系统 - 配置层
// ==========================================
// 职责: 排班策略参数读取（库默认值 → config_kv → 单次请求覆写）
// 存储: config_kv 表
// ==========================================

pub mod config_manager;
pub mod roster_config_trait;
pub mod roster_policy;

// 重导出核心配置管理器
pub use config_manager::{config_keys, init_schema, ConfigManager};
pub use roster_config_trait::{ConfigResult, RosterConfigReader};
pub use roster_policy::{RosterPolicy, DEFAULT_MAX_CONSECUTIVE_DAYS, DEFAULT_MIN_HOLIDAY_COUNT};
