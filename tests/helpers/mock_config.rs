// ==========================================
// Mock 配置实现 - 用于集成测试
// ==========================================

use async_trait::async_trait;
use shift_roster::config::{ConfigResult, RosterConfigReader};
use shift_roster::engine::RosterStrategy;

/// Mock 配置结构
#[derive(Debug, Clone)]
pub struct MockConfig {
    pub min_holiday_count: u32,
    pub default_max_consecutive_days: u32,
    pub strategy: RosterStrategy,
    pub rng_seed: Option<u64>,
    /// 为 true 时所有读取返回错误
    pub fail: bool,
}

impl Default for MockConfig {
    fn default() -> Self {
        Self {
            min_holiday_count: 8,
            default_max_consecutive_days: 5,
            strategy: RosterStrategy::Greedy,
            rng_seed: Some(42),
            fail: false,
        }
    }
}

impl MockConfig {
    pub fn with_min_holiday_count(count: u32) -> Self {
        Self {
            min_holiday_count: count,
            ..Self::default()
        }
    }

    pub fn randomized() -> Self {
        Self {
            strategy: RosterStrategy::Randomized,
            ..Self::default()
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    fn check(&self) -> ConfigResult<()> {
        if self.fail {
            return Err("mock 配置读取失败".into());
        }
        Ok(())
    }
}

#[async_trait]
impl RosterConfigReader for MockConfig {
    async fn get_min_holiday_count(&self) -> ConfigResult<u32> {
        self.check()?;
        Ok(self.min_holiday_count)
    }

    async fn get_default_max_consecutive_days(&self) -> ConfigResult<u32> {
        self.check()?;
        Ok(self.default_max_consecutive_days)
    }

    async fn get_default_strategy(&self) -> ConfigResult<RosterStrategy> {
        self.check()?;
        Ok(self.strategy)
    }

    async fn get_rng_seed(&self) -> ConfigResult<Option<u64>> {
        self.check()?;
        Ok(self.rng_seed)
    }
}
