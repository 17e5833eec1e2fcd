//! Per-day analytics counters and the reducers the admin dashboard reads.
//!
//! Counters are keyed by the UTC calendar date of the event, fixed when the
//! event is ingested. They only ever grow.

use std::collections::BTreeMap;

use jiff::civil::Date;
use jiff::tz::TimeZone;
use jiff::{Timestamp, ToSpan};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::CoreError;
use crate::models::assessment::InstrumentKind;
use crate::models::risk::RiskTier;

/// One count per risk tier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct RiskCounts {
    #[serde(default)]
    pub low: u64,
    #[serde(default)]
    pub moderate: u64,
    #[serde(default)]
    pub high: u64,
    #[serde(default)]
    pub crisis: u64,
}

impl RiskCounts {
    pub fn get(&self, tier: RiskTier) -> u64 {
        match tier {
            RiskTier::Low => self.low,
            RiskTier::Moderate => self.moderate,
            RiskTier::High => self.high,
            RiskTier::Crisis => self.crisis,
        }
    }

    pub fn increment(&mut self, tier: RiskTier) {
        self.add(tier, 1);
    }

    fn add(&mut self, tier: RiskTier, amount: u64) {
        let slot = match tier {
            RiskTier::Low => &mut self.low,
            RiskTier::Moderate => &mut self.moderate,
            RiskTier::High => &mut self.high,
            RiskTier::Crisis => &mut self.crisis,
        };
        *slot = slot.saturating_add(amount);
    }

    pub fn total(&self) -> u64 {
        RiskTier::ALL.iter().map(|t| self.get(*t)).sum()
    }

    /// Share of crisis-tier events, `0.0` when nothing was counted.
    pub fn crisis_rate(&self) -> f64 {
        let total = self.total();
        if total == 0 {
            return 0.0;
        }
        self.crisis as f64 / total as f64
    }
}

/// Chat risk counts for one day, stored at `analytics:risk:<date>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DailyRiskCounter {
    pub date: Date,
    pub counts: RiskCounts,
}

impl DailyRiskCounter {
    pub fn new(date: Date) -> Self {
        Self {
            date,
            counts: RiskCounts::default(),
        }
    }

    pub fn increment(&mut self, tier: RiskTier) {
        self.counts.increment(tier);
    }
}

/// Assessment submissions per instrument for one day, stored at
/// `analytics:assessment:<date>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DailyAssessmentCounter {
    pub date: Date,
    pub counts: BTreeMap<String, u64>,
}

impl DailyAssessmentCounter {
    pub fn new(date: Date) -> Self {
        Self {
            date,
            counts: BTreeMap::new(),
        }
    }

    pub fn increment(&mut self, instrument: InstrumentKind) {
        let count = self
            .counts
            .entry(instrument.as_str().to_string())
            .or_insert(0);
        *count = count.saturating_add(1);
    }

    pub fn get(&self, instrument: InstrumentKind) -> u64 {
        self.counts.get(instrument.as_str()).copied().unwrap_or(0)
    }
}

/// Sum each tier across a series of days.
pub fn tier_totals(series: &[DailyRiskCounter]) -> RiskCounts {
    let mut totals = RiskCounts::default();
    for day in series {
        for tier in RiskTier::ALL {
            totals.add(tier, day.counts.get(tier));
        }
    }
    totals
}

/// Summary of a risk series as shown on the admin dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct RiskSummary {
    pub totals: RiskCounts,
    pub grand_total: u64,
    pub crisis_rate: f64,
}

impl RiskSummary {
    pub fn from_series(series: &[DailyRiskCounter]) -> Self {
        let totals = tier_totals(series);
        Self {
            totals,
            grand_total: totals.total(),
            crisis_rate: totals.crisis_rate(),
        }
    }
}

/// First date of a window of `range_days` days ending on `today` (inclusive).
/// A range of zero is treated as one day.
pub fn window_start(today: Date, range_days: u32) -> Result<Date, CoreError> {
    let back = i64::from(range_days.max(1) - 1);
    Ok(today.checked_sub(back.days())?)
}

/// The UTC calendar date an event is counted under.
pub fn utc_date(at: Timestamp) -> Date {
    at.to_zoned(TimeZone::UTC).date()
}
