// ==========================================
// 排班生成系统 - 排班配置读取 Trait
// ==========================================
// 职责: 定义排班所需的配置读取接口（不包含实现）
// 实现者: ConfigManager（从 config_kv 表读取）
// 红线: 不包含配置写入、不包含业务逻辑
// ==========================================

use crate::config::roster_policy::RosterPolicy;
use crate::engine::strategy::RosterStrategy;
use async_trait::async_trait;
use std::error::Error;

/// 配置读取结果
pub type ConfigResult<T> = Result<T, Box<dyn Error + Send + Sync>>;

// ==========================================
// RosterConfigReader Trait
// ==========================================
#[async_trait]
pub trait RosterConfigReader: Send + Sync {
    // ===== 休息配置 =====

    /// 获取期间内每人最少休息天数
    ///
    /// # 默认值
    /// - 8
    async fn get_min_holiday_count(&self) -> ConfigResult<u32>;

    // ===== 连续出勤配置 =====

    /// 获取默认最大连续出勤天数（成员未设置时使用）
    ///
    /// # 默认值
    /// - 5
    async fn get_default_max_consecutive_days(&self) -> ConfigResult<u32>;

    // ===== 算法配置 =====

    /// 获取默认排班算法
    ///
    /// # 默认值
    /// - greedy
    async fn get_default_strategy(&self) -> ConfigResult<RosterStrategy>;

    /// 获取固定随机种子
    ///
    /// # 返回
    /// - Some(seed): 固定种子（结果可复现）
    /// - None: 每次运行随机
    async fn get_rng_seed(&self) -> ConfigResult<Option<u64>>;

    /// 读取全部配置并组装为策略快照
    async fn load_policy(&self) -> ConfigResult<RosterPolicy> {
        Ok(RosterPolicy {
            min_holiday_count: self.get_min_holiday_count().await?,
            default_max_consecutive_days: self.get_default_max_consecutive_days().await?,
            strategy: self.get_default_strategy().await?,
            seed: self.get_rng_seed().await?,
        })
    }
}
