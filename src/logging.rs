// ==========================================
// 排班生成系统 - 日志
// ==========================================
// 输出: 终端文本 / JSON 行（SHIFT_ROSTER_LOG_JSON 由 main 判断）
// 过滤: RUST_LOG，未设置时为 info
// ==========================================

use tracing_subscriber::{fmt, EnvFilter};

const DEFAULT_DIRECTIVE: &str = "info";

fn env_filter_or(default_directive: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive))
}

/// 终端文本日志
///
/// 例: `RUST_LOG=shift_roster::engine=debug shift-roster`
pub fn init() {
    fmt()
        .with_env_filter(env_filter_or(DEFAULT_DIRECTIVE))
        .with_target(true)
        .with_line_number(true)
        .init();
}

/// JSON 行日志（run_id 等结构化字段原样输出）
pub fn init_json() {
    fmt()
        .json()
        .with_env_filter(env_filter_or(DEFAULT_DIRECTIVE))
        .with_current_span(false)
        .init();
}

// 测试用: 重复调用时 try_init 返回 Err，直接忽略
pub fn init_test() {
    let _ = fmt()
        .with_env_filter(env_filter_or("debug"))
        .with_test_writer()
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_test_can_be_called_repeatedly() {
        init_test();
        init_test();
        tracing::debug!(member_id = "A", "日志已初始化");
    }
}
