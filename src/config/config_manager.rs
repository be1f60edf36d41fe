// ==========================================
// 排班生成系统 - 配置管理器
// ==========================================
// 职责: 配置加载、查询、覆写管理
// 存储: config_kv 表 (key-value + scope)
// ==========================================

use crate::config::roster_config_trait::{ConfigResult, RosterConfigReader};
use crate::config::roster_policy::{DEFAULT_MAX_CONSECUTIVE_DAYS, DEFAULT_MIN_HOLIDAY_COUNT};
use crate::db::{configure_sqlite_connection, open_sqlite_connection};
use crate::engine::strategy::RosterStrategy;
use async_trait::async_trait;
use rusqlite::{params, Connection, OptionalExtension};
use serde_json::json;
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};

// ==========================================
// ConfigManager - 配置管理器
// ==========================================
pub struct ConfigManager {
    conn: Arc<Mutex<Connection>>,
}

impl ConfigManager {
    /// 创建新的 ConfigManager 实例（config_kv 不存在时自动建表）
    ///
    /// # 参数
    /// - db_path: 数据库文件路径
    pub fn new(db_path: &str) -> ConfigResult<Self> {
        let conn = open_sqlite_connection(db_path)?;
        init_schema(&conn)?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// 从已有连接创建 ConfigManager
    ///
    /// 说明：会对传入连接再次应用统一 PRAGMA（幂等）。
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> ConfigResult<Self> {
        {
            let guard = conn.lock().map_err(|e| format!("锁获取失败: {}", e))?;
            configure_sqlite_connection(&guard)?;
            init_schema(&guard)?;
        }

        Ok(Self { conn })
    }

    fn lock(&self) -> ConfigResult<MutexGuard<'_, Connection>> {
        Ok(self.conn.lock().map_err(|e| format!("锁获取失败: {}", e))?)
    }

    /// 从 config_kv 表读取配置值（scope_id='global'）
    ///
    /// # 返回
    /// - Some(String): 配置值
    /// - None: 配置不存在
    fn get_config_value(&self, key: &str) -> ConfigResult<Option<String>> {
        let conn = self.lock()?;

        let value = conn
            .query_row(
                "SELECT value FROM config_kv WHERE scope_id = 'global' AND key = ?1",
                params![key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    /// 读取 global scope 的配置值（公开方法，供其他模块复用）
    pub fn get_global_config_value(&self, key: &str) -> ConfigResult<Option<String>> {
        self.get_config_value(key)
    }

    /// 从 config_kv 表读取配置值，带默认值
    fn get_config_or_default(&self, key: &str, default: &str) -> ConfigResult<String> {
        Ok(self
            .get_config_value(key)?
            .unwrap_or_else(|| default.to_string()))
    }

    /// 写入 global scope 配置（存在则覆盖）
    pub fn set_config_value(&self, key: &str, value: &str) -> ConfigResult<()> {
        let conn = self.lock()?;
        conn.execute(
            "INSERT INTO config_kv (scope_id, key, value) VALUES ('global', ?1, ?2)
             ON CONFLICT(scope_id, key) DO UPDATE SET value = ?2",
            params![key, value],
        )?;
        Ok(())
    }

    /// 获取所有配置的快照（JSON格式）
    ///
    /// # 用途
    /// - 随排班结果一起保存，便于复现当次运行
    pub fn get_config_snapshot(&self) -> ConfigResult<String> {
        let conn = self.lock()?;

        let mut stmt =
            conn.prepare("SELECT key, value FROM config_kv WHERE scope_id = 'global' ORDER BY key")?;

        let rows = stmt.query_map([], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
        })?;

        let mut config_map: BTreeMap<String, String> = BTreeMap::new();
        for row in rows {
            let (key, value) = row?;
            config_map.insert(key, value);
        }

        Ok(serde_json::to_string(&json!(config_map))?)
    }

    /// 从配置快照恢复配置
    ///
    /// # 返回
    /// - Ok(usize): 恢复的配置项数量
    ///
    /// # 注意
    /// - 此方法会覆盖现有的 global 配置
    pub fn restore_config_from_snapshot(&self, snapshot_json: &str) -> ConfigResult<usize> {
        let config_map: BTreeMap<String, String> = serde_json::from_str(snapshot_json)?;

        let mut conn = self.lock()?;
        let tx = conn.transaction()?;

        let mut count = 0;
        for (key, value) in config_map.iter() {
            count += tx.execute(
                "INSERT INTO config_kv (scope_id, key, value) VALUES ('global', ?1, ?2)
                 ON CONFLICT(scope_id, key) DO UPDATE SET value = ?2",
                params![key, value],
            )?;
        }

        tx.commit()?;
        Ok(count)
    }
}

/// 创建 config_kv 表（幂等）
pub fn init_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS config_kv (
            scope_id TEXT NOT NULL,
            key TEXT NOT NULL,
            value TEXT NOT NULL,
            updated_at TEXT NOT NULL DEFAULT (datetime('now')),
            PRIMARY KEY (scope_id, key)
        );
        "#,
    )
}

// ==========================================
// RosterConfigReader Trait 实现
// ==========================================
#[async_trait]
impl RosterConfigReader for ConfigManager {
    async fn get_min_holiday_count(&self) -> ConfigResult<u32> {
        let value = self.get_config_or_default(
            config_keys::MIN_HOLIDAY_COUNT,
            &DEFAULT_MIN_HOLIDAY_COUNT.to_string(),
        )?;
        Ok(parse_u32_or_default(
            config_keys::MIN_HOLIDAY_COUNT,
            &value,
            DEFAULT_MIN_HOLIDAY_COUNT,
        ))
    }

    async fn get_default_max_consecutive_days(&self) -> ConfigResult<u32> {
        let value = self.get_config_or_default(
            config_keys::DEFAULT_MAX_CONSECUTIVE_DAYS,
            &DEFAULT_MAX_CONSECUTIVE_DAYS.to_string(),
        )?;
        Ok(parse_u32_or_default(
            config_keys::DEFAULT_MAX_CONSECUTIVE_DAYS,
            &value,
            DEFAULT_MAX_CONSECUTIVE_DAYS,
        ))
    }

    async fn get_default_strategy(&self) -> ConfigResult<RosterStrategy> {
        let value = self.get_config_or_default(config_keys::ROSTER_STRATEGY, "greedy")?;
        Ok(value.parse::<RosterStrategy>().unwrap_or_else(|_| {
            tracing::warn!(
                config_key = config_keys::ROSTER_STRATEGY,
                raw_value = %value,
                "排班算法配置无效，使用默认 greedy"
            );
            RosterStrategy::Greedy
        }))
    }

    async fn get_rng_seed(&self) -> ConfigResult<Option<u64>> {
        let Some(value) = self.get_config_value(config_keys::RNG_SEED)? else {
            return Ok(None);
        };
        match value.trim().parse::<u64>() {
            Ok(seed) => Ok(Some(seed)),
            Err(_) => {
                tracing::warn!(
                    config_key = config_keys::RNG_SEED,
                    raw_value = %value,
                    "随机种子配置无效，忽略"
                );
                Ok(None)
            }
        }
    }
}

/// 解析数值配置，无效时使用默认值
fn parse_u32_or_default(key: &str, raw: &str, default: u32) -> u32 {
    raw.trim().parse::<u32>().unwrap_or_else(|_| {
        tracing::warn!(config_key = key, raw_value = raw, default, "数值配置无效，使用默认值");
        default
    })
}

// ==========================================
// 配置键常量
// ==========================================
pub mod config_keys {
    // 休息
    pub const MIN_HOLIDAY_COUNT: &str = "min_holiday_count";

    // 连续出勤
    pub const DEFAULT_MAX_CONSECUTIVE_DAYS: &str = "default_max_consecutive_days";

    // 算法
    pub const ROSTER_STRATEGY: &str = "roster_strategy";
    pub const RNG_SEED: &str = "rng_seed";
}
