use std::collections::BTreeMap;

use axum::extract::State;
use axum::Extension;
use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use mindcare_core::analytics::{utc_date, DailyAssessmentCounter, DailyRiskCounter, RiskSummary};
use mindcare_core::models::identity::Identity;
use mindcare_storage::counters;

use crate::error::ApiError;
use crate::extract::{Json, Query};
use crate::state::AppState;

const DEFAULT_RANGE_DAYS: u32 = 30;

#[derive(Debug, Deserialize)]
pub struct AnalyticsQuery {
    pub days: Option<u32>,
}

#[derive(Serialize)]
pub struct AnalyticsResponse {
    pub range_days: u32,
    pub risk_series: Vec<DailyRiskCounter>,
    pub assessment_series: Vec<DailyAssessmentCounter>,
    pub assessment_totals: BTreeMap<String, u64>,
    #[serde(flatten)]
    pub summary: RiskSummary,
}

/// Admin dashboard aggregates over the last `days` days (UTC).
pub async fn get_analytics(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Query(query): Query<AnalyticsQuery>,
) -> Result<Json<AnalyticsResponse>, ApiError> {
    let access = identity.admin_access()?;

    let range_days = query
        .days
        .unwrap_or(DEFAULT_RANGE_DAYS)
        .clamp(1, state.analytics_max_days.max(1));
    let today = utc_date(Timestamp::now());

    let risk_series =
        counters::aggregate_risk_series(&state.store, &access, today, range_days).await?;
    let assessment_series =
        counters::aggregate_assessment_series(&state.store, &access, today, range_days).await?;

    let mut assessment_totals: BTreeMap<String, u64> = BTreeMap::new();
    for day in &assessment_series {
        for (instrument, count) in &day.counts {
            *assessment_totals.entry(instrument.clone()).or_insert(0) += count;
        }
    }

    Ok(Json(AnalyticsResponse {
        range_days,
        summary: RiskSummary::from_series(&risk_series),
        risk_series,
        assessment_series,
        assessment_totals,
    }))
}
