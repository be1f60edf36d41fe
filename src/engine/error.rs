// ==========================================
// 排班生成系统 - 引擎层错误类型
// ==========================================
// 工具: thiserror 派生宏
// 说明: 仅在运行边界（编排器）处理，不向调用方抛出
// ==========================================

use chrono::NaiveDate;
use thiserror::Error;

/// 引擎运行错误
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("排班期间越界: start_date={start_date}, horizon_days={horizon_days}")]
    HorizonOutOfRange {
        start_date: NaiveDate,
        horizon_days: u32,
    },

    #[error("排班已取消: date={date}")]
    Cancelled { date: NaiveDate },

    #[error("运行状态缺失: member_id={member_id}")]
    MissingRunState { member_id: String },

    #[error("内部错误: {0}")]
    Internal(String),
}

/// Result 类型别名
pub type EngineResult<T> = Result<T, EngineError>;
