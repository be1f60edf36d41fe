// ==========================================
// 排班生成系统 - API 层
// ==========================================
// 职责: 对外提供排班生成接口（配置读取 + 引擎调用）
// ==========================================

pub mod error;
pub mod roster_api;

// 重导出核心类型
pub use error::{ApiError, ApiResult};
pub use roster_api::{RosterApi, RosterRequest};
