// ==========================================
// 测试辅助模块
// ==========================================

pub mod mock_config;
