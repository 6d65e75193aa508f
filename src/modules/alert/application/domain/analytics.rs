use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use utoipa::{IntoParams, ToSchema};

use super::entities::{Alert, AlertLevel, AlertStatus};
use super::query::{filter_alerts, AlertFilter, AlertQueryParams, QueryError};

/// Inclusive calendar-day range on `created_at` (UTC).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateRange {
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
}

impl DateRange {
    pub fn new(from: Option<NaiveDate>, to: Option<NaiveDate>) -> Result<Self, QueryError> {
        if let (Some(from), Some(to)) = (from, to) {
            if from > to {
                return Err(QueryError::InvalidArgument {
                    param: "from",
                    reason: format!("{} is after {}", from, to),
                });
            }
        }
        Ok(Self { from, to })
    }

    pub fn contains(&self, at: &DateTime<Utc>) -> bool {
        let day = at.date_naive();
        self.from.map_or(true, |from| day >= from) && self.to.map_or(true, |to| day <= to)
    }
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct AlertStatsParams {
    pub status: Option<String>,
    pub level: Option<String>,
    pub search: Option<String>,
    /// First day included, `YYYY-MM-DD`.
    pub from: Option<String>,
    /// Last day included, `YYYY-MM-DD`.
    pub to: Option<String>,
}

fn parse_day(param: &'static str, value: &Option<String>) -> Result<Option<NaiveDate>, QueryError> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(|raw| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| QueryError::InvalidArgument {
                param,
                reason: format!("expected YYYY-MM-DD (got '{}')", raw),
            })
        })
        .transpose()
}

impl AlertStatsParams {
    pub fn into_parts(self) -> Result<(AlertFilter, DateRange), QueryError> {
        let filter = AlertFilter::from_params(&AlertQueryParams {
            status: self.status,
            level: self.level,
            search: self.search,
            ..AlertQueryParams::default()
        })?;
        let range = DateRange::new(parse_day("from", &self.from)?, parse_day("to", &self.to)?)?;
        Ok((filter, range))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct StatusCounts {
    pub pending: usize,
    pub verified: usize,
    pub dismissed: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct LevelCounts {
    pub high: usize,
    pub medium: usize,
    pub low: usize,
}

impl LevelCounts {
    fn bump(&mut self, level: AlertLevel) {
        match level {
            AlertLevel::High => self.high += 1,
            AlertLevel::Medium => self.medium += 1,
            AlertLevel::Low => self.low += 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct DailyBucket {
    pub date: NaiveDate,
    pub total: usize,
    pub high: usize,
    pub medium: usize,
    pub low: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AlertStats {
    pub total: usize,
    pub by_status: StatusCounts,
    pub by_level: LevelCounts,
    /// One bucket per day that has at least one alert, oldest first.
    pub timeline: Vec<DailyBucket>,
}

pub fn compute_stats(alerts: &[Alert], filter: &AlertFilter, range: DateRange) -> AlertStats {
    let mut stats = AlertStats::default();
    let mut days: BTreeMap<NaiveDate, LevelCounts> = BTreeMap::new();

    for alert in filter_alerts(alerts, filter)
        .into_iter()
        .filter(|a| range.contains(&a.created_at))
    {
        stats.total += 1;

        match alert.status {
            AlertStatus::Pending => stats.by_status.pending += 1,
            AlertStatus::Verified => stats.by_status.verified += 1,
            AlertStatus::Dismissed => stats.by_status.dismissed += 1,
        }
        stats.by_level.bump(alert.level);

        days.entry(alert.created_at.date_naive())
            .or_default()
            .bump(alert.level);
    }

    stats.timeline = days
        .into_iter()
        .map(|(date, counts)| DailyBucket {
            date,
            total: counts.high + counts.medium + counts.low,
            high: counts.high,
            medium: counts.medium,
            low: counts.low,
        })
        .collect();

    stats
}
