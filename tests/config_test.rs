// ==========================================
// ConfigManager 集成测试
// ==========================================
// 测试目标: 验证配置读取、写入、快照功能的正确性
// ==========================================


use shift_roster::config::{config_keys, ConfigManager, RosterConfigReader};
use shift_roster::engine::RosterStrategy;
use test_helpers::{create_test_db, insert_test_config, open_test_connection};

#[tokio::test]
async fn test_config_manager_creation() {
    let (_temp_file, db_path) = create_test_db().expect("Failed to create test db");

    let config_manager = ConfigManager::new(&db_path);
    assert!(
        config_manager.is_ok(),
        "ConfigManager should be created successfully"
    );
}

#[tokio::test]
async fn test_config_manager_creates_schema_on_empty_file() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let db_path = dir.path().join("fresh.db");
    let config_manager =
        ConfigManager::new(db_path.to_str().unwrap()).expect("Failed to create ConfigManager");

    assert_eq!(config_manager.get_min_holiday_count().await.unwrap(), 8);
}

#[tokio::test]
async fn test_load_policy_from_stored_config() {
    let (_temp_file, db_path) = create_test_db().expect("Failed to create test db");
    let conn = open_test_connection(&db_path).expect("Failed to open db");
    insert_test_config(&conn).expect("Failed to insert test config");

    let config_manager = ConfigManager::new(&db_path).expect("Failed to create ConfigManager");
    let policy = config_manager.load_policy().await.expect("Failed to load policy");

    assert_eq!(policy.min_holiday_count, 4);
    assert_eq!(policy.default_max_consecutive_days, 3);
    assert_eq!(policy.strategy, RosterStrategy::Randomized);
    assert_eq!(policy.seed, Some(20261019));
}

#[tokio::test]
async fn test_defaults_without_stored_config() {
    let (_temp_file, db_path) = create_test_db().expect("Failed to create test db");
    let config_manager = ConfigManager::new(&db_path).expect("Failed to create ConfigManager");

    assert_eq!(config_manager.get_min_holiday_count().await.unwrap(), 8);
    assert_eq!(config_manager.get_default_max_consecutive_days().await.unwrap(), 5);
    assert_eq!(
        config_manager.get_default_strategy().await.unwrap(),
        RosterStrategy::Greedy
    );
    assert_eq!(config_manager.get_rng_seed().await.unwrap(), None);
}

#[tokio::test]
async fn test_set_config_value_is_visible_to_reader() {
    let (_temp_file, db_path) = create_test_db().expect("Failed to create test db");
    let config_manager = ConfigManager::new(&db_path).expect("Failed to create ConfigManager");

    config_manager
        .set_config_value(config_keys::MIN_HOLIDAY_COUNT, "10")
        .unwrap();
    config_manager
        .set_config_value(config_keys::ROSTER_STRATEGY, "random")
        .unwrap();

    assert_eq!(config_manager.get_min_holiday_count().await.unwrap(), 10);
    assert_eq!(
        config_manager.get_default_strategy().await.unwrap(),
        RosterStrategy::Randomized
    );
}

#[tokio::test]
async fn test_snapshot_and_restore() {
    let (_temp_file, db_path) = create_test_db().expect("Failed to create test db");
    let conn = open_test_connection(&db_path).expect("Failed to open db");
    insert_test_config(&conn).expect("Failed to insert test config");
    let config_manager = ConfigManager::new(&db_path).expect("Failed to create ConfigManager");

    let snapshot = config_manager.get_config_snapshot().expect("Failed to get snapshot");
    let parsed: serde_json::Value = serde_json::from_str(&snapshot).unwrap();
    assert_eq!(parsed[config_keys::MIN_HOLIDAY_COUNT], "4");

    config_manager
        .set_config_value(config_keys::MIN_HOLIDAY_COUNT, "12")
        .unwrap();
    assert_eq!(config_manager.get_min_holiday_count().await.unwrap(), 12);

    let restored = config_manager
        .restore_config_from_snapshot(&snapshot)
        .expect("Failed to restore snapshot");
    assert_eq!(restored, 4);
    assert_eq!(config_manager.get_min_holiday_count().await.unwrap(), 4);
}

#[tokio::test]
async fn test_restore_rejects_invalid_json() {
    let (_temp_file, db_path) = create_test_db().expect("Failed to create test db");
    let config_manager = ConfigManager::new(&db_path).expect("Failed to create ConfigManager");
    assert!(config_manager.restore_config_from_snapshot("not json").is_err());
}
