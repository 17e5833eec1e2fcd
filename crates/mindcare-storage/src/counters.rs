//! Daily analytics aggregator.
//!
//! Write path: one atomic increment per chat message (by tier) or
//! assessment (by instrument), keyed by the event's UTC date. Read path:
//! the admin dashboard's series over the last N days.

use jiff::civil::Date;
use tracing::debug;

use mindcare_core::analytics::{window_start, DailyAssessmentCounter, DailyRiskCounter};
use mindcare_core::keys;
use mindcare_core::models::assessment::InstrumentKind;
use mindcare_core::models::identity::AdminAccess;
use mindcare_core::models::risk::RiskTier;

use crate::error::StorageError;
use crate::store::Store;

/// Count one chat message of `tier` on `date`.
pub async fn increment_risk(
    store: &Store,
    date: Date,
    tier: RiskTier,
) -> Result<DailyRiskCounter, StorageError> {
    let counter = store
        .update_json(
            &keys::risk_counter(date),
            || DailyRiskCounter::new(date),
            |counter: &mut DailyRiskCounter| counter.increment(tier),
        )
        .await?;
    debug!(date = %date, tier = %tier, count = counter.counts.get(tier), "risk counter incremented");
    Ok(counter)
}

/// Count one `instrument` submission on `date`.
pub async fn increment_assessment(
    store: &Store,
    date: Date,
    instrument: InstrumentKind,
) -> Result<DailyAssessmentCounter, StorageError> {
    let counter = store
        .update_json(
            &keys::assessment_counter(date),
            || DailyAssessmentCounter::new(date),
            |counter: &mut DailyAssessmentCounter| counter.increment(instrument),
        )
        .await?;
    debug!(date = %date, instrument = %instrument, "assessment counter incremented");
    Ok(counter)
}

/// Risk counters for the `range_days` days ending on `today`, oldest first.
/// Days without any chat activity are absent from the series.
pub async fn aggregate_risk_series(
    store: &Store,
    _access: &AdminAccess,
    today: Date,
    range_days: u32,
) -> Result<Vec<DailyRiskCounter>, StorageError> {
    let start = window_start(today, range_days)?;
    let mut series = Vec::new();
    for key in keys_in_window(store, keys::RISK_COUNTERS_PREFIX, start, today).await? {
        if let Some(counter) = store.get_json::<DailyRiskCounter>(&key).await? {
            series.push(counter);
        }
    }
    series.sort_by_key(|c| c.date);
    Ok(series)
}

/// Assessment counters for the `range_days` days ending on `today`, oldest first.
pub async fn aggregate_assessment_series(
    store: &Store,
    _access: &AdminAccess,
    today: Date,
    range_days: u32,
) -> Result<Vec<DailyAssessmentCounter>, StorageError> {
    let start = window_start(today, range_days)?;
    let mut series = Vec::new();
    for key in keys_in_window(store, keys::ASSESSMENT_COUNTERS_PREFIX, start, today).await? {
        if let Some(counter) = store.get_json::<DailyAssessmentCounter>(&key).await? {
            series.push(counter);
        }
    }
    series.sort_by_key(|c| c.date);
    Ok(series)
}

/// Counter keys under `prefix` whose date suffix falls in `[start, end]`.
async fn keys_in_window(
    store: &Store,
    prefix: &str,
    start: Date,
    end: Date,
) -> Result<Vec<String>, StorageError> {
    let keys = store.list_keys(prefix).await?;
    Ok(keys
        .into_iter()
        .filter(|key| {
            key.strip_prefix(prefix)
                .and_then(|suffix| suffix.parse::<Date>().ok())
                .is_some_and(|date| date >= start && date <= end)
        })
        .collect())
}
