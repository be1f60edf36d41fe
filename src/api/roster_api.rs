// ==========================================
// 排班生成系统 - 排班生成 API
// ==========================================
// 职责: 读取配置 → 合并单次请求覆写 → 调用编排器
// 说明: 配置读取为异步，排班计算本身同步执行
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::config::{RosterConfigReader, RosterPolicy};
use crate::domain::roster::{RosterInput, RosterResult};
use crate::engine::orchestrator::RosterOrchestrator;
use crate::engine::strategy::RosterStrategy;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{info, instrument, warn};

// ==========================================
// RosterRequest - 排班请求
// ==========================================
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RosterRequest {
    pub input: RosterInput,

    /// 覆写最少休息天数
    #[serde(default)]
    pub min_holiday_count: Option<u32>,

    /// 覆写排班算法
    #[serde(default)]
    pub strategy: Option<RosterStrategy>,

    /// 覆写随机种子
    #[serde(default)]
    pub seed: Option<u64>,

    /// 运行中断（部分结果）时返回错误而不是部分结果
    #[serde(default)]
    pub fail_on_fault: bool,
}

impl RosterRequest {
    pub fn new(input: RosterInput) -> Self {
        Self {
            input,
            ..Default::default()
        }
    }

    pub fn with_min_holiday_count(mut self, count: u32) -> Self {
        self.min_holiday_count = Some(count);
        self
    }

    pub fn with_strategy(mut self, strategy: RosterStrategy) -> Self {
        self.strategy = Some(strategy);
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn fail_on_fault(mut self) -> Self {
        self.fail_on_fault = true;
        self
    }
}

// ==========================================
// RosterApi - 排班生成 API
// ==========================================
pub struct RosterApi<C: RosterConfigReader + ?Sized> {
    config: Arc<C>,
    orchestrator: RosterOrchestrator,
}

impl<C: RosterConfigReader + ?Sized> RosterApi<C> {
    pub fn new(config: Arc<C>) -> Self {
        Self {
            config,
            orchestrator: RosterOrchestrator::new(),
        }
    }

    /// 读取配置并合并请求覆写
    pub async fn resolve_policy(&self, request: &RosterRequest) -> ApiResult<RosterPolicy> {
        let mut policy = self
            .config
            .load_policy()
            .await
            .map_err(|e| ApiError::ConfigError(e.to_string()))?;

        if let Some(count) = request.min_holiday_count {
            policy.min_holiday_count = count;
        }
        if let Some(strategy) = request.strategy {
            policy.strategy = strategy;
        }
        if let Some(seed) = request.seed {
            policy.seed = Some(seed);
        }
        Ok(policy)
    }

    /// 生成排班
    ///
    /// # 返回
    /// - Ok(RosterResult): 排班结果（运行中断时为部分结果，fault 字段记录原因）
    /// - Err(ApiError): 配置读取失败 / 输入无效 / fail_on_fault 时的运行中断
    #[instrument(skip(self, request), fields(members = request.input.members.len()))]
    pub async fn generate_roster(&self, request: RosterRequest) -> ApiResult<RosterResult> {
        validate_input(&request.input)?;
        let policy = self.resolve_policy(&request).await?;

        info!(
            strategy = policy.strategy.as_str(),
            min_holiday_count = policy.min_holiday_count,
            seed = ?policy.seed,
            "排班请求已解析"
        );

        let result = self.generate_with_policy(&request.input, &policy);
        match (&result.fault, request.fail_on_fault) {
            (Some(fault), true) => Err(ApiError::EngineFault(fault.clone())),
            (Some(fault), false) => {
                warn!(fault = %fault, "返回部分排班结果");
                Ok(result)
            }
            (None, _) => Ok(result),
        }
    }

    /// 按已有策略同步生成排班
    pub fn generate_with_policy(&self, input: &RosterInput, policy: &RosterPolicy) -> RosterResult {
        self.orchestrator.generate_with_policy(input, policy)
    }
}

/// 输入校验（仅拒绝无法定位成员的输入；其余由引擎降级处理）
fn validate_input(input: &RosterInput) -> ApiResult<()> {
    if let Some(m) = input.members.iter().find(|m| m.id.trim().is_empty()) {
        return Err(ApiError::InvalidInput(format!("成员ID为空: name={}", m.name)));
    }

    let member_ids: HashSet<&str> = input.members.iter().map(|m| m.id.as_str()).collect();
    for request in &input.requests {
        if !member_ids.contains(request.member_id.as_str()) {
            warn!(member_id = %request.member_id, date = %request.date, "申请对应的成员不存在，忽略");
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::member::Member;
    use chrono::NaiveDate;

    #[test]
    fn test_validate_rejects_blank_member_id() {
        let input = RosterInput::new(
            vec![Member::new(" ", "佐藤")],
            NaiveDate::from_ymd_opt(2026, 10, 19).unwrap(),
            7,
        );
        assert!(matches!(validate_input(&input), Err(ApiError::InvalidInput(_))));
    }

    #[test]
    fn test_request_deserialize_defaults() {
        let json = r#"{"input":{"members":[],"start_date":"2026-10-19","horizon_days":7}}"#;
        let request: RosterRequest = serde_json::from_str(json).unwrap();
        assert!(request.strategy.is_none());
        assert!(!request.fail_on_fault);
        assert_eq!(request.input.horizon_days, 7);
    }
}
