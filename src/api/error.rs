// ==========================================
// 排班生成系统 - API层错误类型
// ==========================================
// 职责: 定义API层错误类型，将配置/引擎错误转换为调用方可读的错误消息
// ==========================================

use crate::engine::error::EngineError;
use thiserror::Error;

/// API层错误类型
#[derive(Error, Debug)]
pub enum ApiError {
    // ==========================================
    // 输入错误
    // ==========================================
    #[error("无效输入: {0}")]
    InvalidInput(String),

    // ==========================================
    // 配置错误
    // ==========================================
    #[error("配置读取失败: {0}")]
    ConfigError(String),

    // ==========================================
    // 引擎错误
    // ==========================================
    #[error("排班运行异常: {0}")]
    EngineFault(String),

    // ==========================================
    // 其他（main 等调用方透传 anyhow 错误）
    // ==========================================
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<EngineError> for ApiError {
    fn from(err: EngineError) -> Self {
        ApiError::EngineFault(err.to_string())
    }
}

/// API层Result类型别名
pub type ApiResult<T> = Result<T, ApiError>;
