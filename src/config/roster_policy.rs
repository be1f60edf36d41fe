// ==========================================
// 排班生成系统 - 排班策略参数
// ==========================================
// 职责: 单次运行使用的策略参数及其默认值
// 来源: config_kv 读取后由请求覆写
// ==========================================

use crate::engine::strategy::RosterStrategy;
use serde::{Deserialize, Serialize};

/// 最少休息天数（默认值）
pub const DEFAULT_MIN_HOLIDAY_COUNT: u32 = 8;

/// 最大连续出勤天数（成员未设置时的默认值）
pub const DEFAULT_MAX_CONSECUTIVE_DAYS: u32 = 5;

/// 排班策略参数（一次运行的只读快照）
///
/// 来源: config_kv（scope_id='global'），可被单次请求覆写
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterPolicy {
    /// 期间内每人最少休息天数
    #[serde(default = "default_min_holiday_count")]
    pub min_holiday_count: u32,

    /// 成员未设置上限时的最大连续出勤天数
    #[serde(default = "default_max_consecutive_days")]
    pub default_max_consecutive_days: u32,

    /// 排班算法
    #[serde(default)]
    pub strategy: RosterStrategy,

    /// 随机种子（None 时每次运行随机生成）
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_min_holiday_count() -> u32 {
    DEFAULT_MIN_HOLIDAY_COUNT
}

fn default_max_consecutive_days() -> u32 {
    DEFAULT_MAX_CONSECUTIVE_DAYS
}

impl Default for RosterPolicy {
    fn default() -> Self {
        Self {
            min_holiday_count: DEFAULT_MIN_HOLIDAY_COUNT,
            default_max_consecutive_days: DEFAULT_MAX_CONSECUTIVE_DAYS,
            strategy: RosterStrategy::default(),
            seed: None,
        }
    }
}

impl RosterPolicy {
    pub fn with_min_holiday_count(mut self, count: u32) -> Self {
        self.min_holiday_count = count;
        self
    }

    pub fn with_default_max_consecutive_days(mut self, days: u32) -> Self {
        self.default_max_consecutive_days = days;
        self
    }

    pub fn with_strategy(mut self, strategy: RosterStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}
