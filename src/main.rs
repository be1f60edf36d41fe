// ==========================================
// 排班生成系统 - 命令行入口
// ==========================================
// 用途: 打开配置库，按配置生成一份示例排班，输出 JSON 汇总
// 环境变量: SHIFT_ROSTER_DB_PATH / RUST_LOG / SHIFT_ROSTER_LOG_JSON
// ==========================================

use anyhow::{Context, Result};
use chrono::{Datelike, Duration, NaiveDate, NaiveTime, Weekday};
use serde_json::json;
use shift_roster::db::get_default_db_path;
use shift_roster::{
    logging, Availability, ConfigManager, Member, RequestKind, RosterApi, RosterInput,
    RosterRequest, ShiftRequest, ShiftTimeDefinition,
};
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<()> {
    if std::env::var_os("SHIFT_ROSTER_LOG_JSON").is_some() {
        logging::init_json();
    } else {
        logging::init();
    }

    tracing::info!("==================================================");
    tracing::info!("{} v{}", shift_roster::APP_NAME, shift_roster::VERSION);
    tracing::info!("==================================================");

    let db_path = get_default_db_path();
    tracing::info!("使用配置库: {}", db_path);

    let config = ConfigManager::new(&db_path)
        .map_err(|e| anyhow::anyhow!("{}", e))
        .with_context(|| format!("无法打开配置库: {}", db_path))?;
    let api = RosterApi::new(Arc::new(config));

    let input = sample_input().context("无法构造示例输入")?;
    let result = api.generate_roster(RosterRequest::new(input)).await?;

    let summary = json!({
        "run_id": result.run_id,
        "strategy": result.strategy,
        "seed": result.seed,
        "total_shortage": result.total_shortage(),
        "fault": result.fault,
        "members": result.member_summaries,
        "roster": result.assignments.to_label_map(),
    });
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}

/// 示例输入：下周一起 14 天，日勤/夜勤两个班次
fn sample_input() -> Option<RosterInput> {
    let today = chrono::Local::now().date_naive();
    let days_to_monday = (7 - today.weekday().num_days_from_monday()) % 7;
    let start: NaiveDate = today + Duration::days(i64::from(days_to_monday));

    let day = ShiftTimeDefinition::new(
        "日勤",
        NaiveTime::from_hms_opt(9, 0, 0)?,
        NaiveTime::from_hms_opt(18, 0, 0)?,
    );
    let night = ShiftTimeDefinition::new(
        "夜勤",
        NaiveTime::from_hms_opt(22, 0, 0)?,
        NaiveTime::from_hms_opt(7, 0, 0)?,
    );

    let members = vec![
        Member::new("M01", "佐藤")
            .with_capabilities(["日勤", "夜勤"])
            .with_skill_group("リーダー"),
        Member::new("M02", "鈴木").with_capabilities(["日勤"]),
        Member::new("M03", "高橋")
            .with_capabilities(["日勤", "夜勤"])
            .with_availability(Availability::every_day()),
        Member::new("M04", "田中")
            .with_capabilities(["夜勤"])
            .with_availability(Availability::every_day())
            .with_max_consecutive_days(3),
        Member::new("M05", "伊藤")
            .with_capabilities(["日勤"])
            .with_availability(Availability::from_weekdays([
                Weekday::Mon,
                Weekday::Wed,
                Weekday::Fri,
            ]))
            .with_skill_group("リーダー"),
    ];

    let mut input = RosterInput::new(members, start, 14);
    input.shift_catalog = vec![day, night];
    for date in input.horizon_dates()? {
        input.require_shift(date, "日勤", 2);
        input.require_shift(date, "夜勤", 1);
        input.require_skill(date, "リーダー", 1);
    }
    input.requests = vec![
        ShiftRequest::new("M02", start + Duration::days(2), RequestKind::HolidayPreferred),
        ShiftRequest::new("M03", start, RequestKind::WorkPreferred),
    ];
    Some(input)
}
