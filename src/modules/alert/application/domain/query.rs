//! Filter / sort / paginate over an alert snapshot.
//!
//! Everything here is a pure function of `(collection, query)`. The list,
//! map and analytics views all go through [`filter_alerts`] so they can
//! never disagree about which alerts match.

use serde::{Deserialize, Deserializer, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use utoipa::{IntoParams, ToSchema};

use super::entities::{Alert, AlertLevel, AlertStatus};

pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_PAGE_SIZE: u32 = 10;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QueryError {
    #[error("invalid value for '{param}': {reason}")]
    InvalidArgument { param: &'static str, reason: String },
}

impl QueryError {
    fn invalid(param: &'static str, reason: impl Into<String>) -> Self {
        QueryError::InvalidArgument {
            param,
            reason: reason.into(),
        }
    }
}

// ============================================================================
// Filters
// ============================================================================

/// `"all"` or one member of a closed enumeration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selector<T> {
    All,
    Only(T),
}

impl<T> Default for Selector<T> {
    fn default() -> Self {
        Selector::All
    }
}

impl<T: PartialEq> Selector<T> {
    pub fn matches(&self, value: &T) -> bool {
        match self {
            Selector::All => true,
            Selector::Only(wanted) => wanted == value,
        }
    }
}

impl<T: FromStr> FromStr for Selector<T> {
    type Err = T::Err;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("all") {
            return Ok(Selector::All);
        }
        s.to_lowercase().parse().map(Selector::Only)
    }
}

impl<'de, T> Deserialize<'de> for Selector<T>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AlertFilter {
    pub status: Selector<AlertStatus>,
    pub level: Selector<AlertLevel>,
    /// Case-insensitive substring over title, description and location.
    pub search: String,
}

impl AlertFilter {
    pub fn matches(&self, alert: &Alert) -> bool {
        self.status.matches(&alert.status)
            && self.level.matches(&alert.level)
            && self.matches_search(alert)
    }

    fn matches_search(&self, alert: &Alert) -> bool {
        let needle = self.search.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }

        [&alert.title, &alert.description, &alert.location]
            .iter()
            .any(|field| field.to_lowercase().contains(&needle))
    }
}

// ============================================================================
// Sorting
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum SortField {
    #[default]
    CreatedAt,
    Level,
    Status,
}

impl FromStr for SortField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "created_at" => Ok(SortField::CreatedAt),
            "level" => Ok(SortField::Level),
            "status" => Ok(SortField::Status),
            other => Err(format!(
                "expected created_at, level or status (got '{}')",
                other
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(SortOrder::Asc),
            "desc" => Ok(SortOrder::Desc),
            other => Err(format!("expected asc or desc (got '{}')", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AlertSort {
    pub field: SortField,
    pub order: SortOrder,
}

fn compare(a: &Alert, b: &Alert, field: SortField) -> Ordering {
    match field {
        SortField::CreatedAt => a.created_at.cmp(&b.created_at),
        SortField::Level => a.level.rank().cmp(&b.level.rank()),
        SortField::Status => a.status.as_str().cmp(b.status.as_str()),
    }
}

// ============================================================================
// Pagination
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    page: u32,
    page_size: u32,
}

impl Pagination {
    pub fn new(page: i64, page_size: i64) -> Result<Self, QueryError> {
        let page = u32::try_from(page)
            .ok()
            .filter(|p| *p >= 1)
            .ok_or_else(|| QueryError::invalid("page", "must be a positive integer"))?;
        let page_size = u32::try_from(page_size)
            .ok()
            .filter(|p| *p >= 1)
            .ok_or_else(|| QueryError::invalid("page_size", "must be a positive integer"))?;

        Ok(Self { page, page_size })
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    fn offset(&self) -> usize {
        (self.page as usize - 1).saturating_mul(self.page_size as usize)
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

// ============================================================================
// Query
// ============================================================================

/// Raw query-string parameters. Everything is text so that malformed values
/// become `InvalidArgument` instead of an extractor rejection.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct AlertQueryParams {
    /// `all` (default) | `pending` | `verified` | `dismissed`
    pub status: Option<String>,
    /// `all` (default) | `low` | `medium` | `high`
    pub level: Option<String>,
    pub search: Option<String>,
    /// `created_at` (default) | `level` | `status`
    pub sort: Option<String>,
    /// `asc` | `desc` (default)
    pub order: Option<String>,
    pub page: Option<String>,
    pub page_size: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AlertQuery {
    pub filter: AlertFilter,
    pub sort: AlertSort,
    pub pagination: Pagination,
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

fn parse_param<T>(param: &'static str, value: &Option<String>) -> Result<Option<T>, QueryError>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    present(value)
        .map(|raw| raw.parse::<T>().map_err(|e| QueryError::invalid(param, e.to_string())))
        .transpose()
}

impl AlertFilter {
    pub fn from_params(params: &AlertQueryParams) -> Result<Self, QueryError> {
        Ok(Self {
            status: parse_param("status", &params.status)?.unwrap_or_default(),
            level: parse_param("level", &params.level)?.unwrap_or_default(),
            search: params.search.clone().unwrap_or_default(),
        })
    }
}

impl AlertQuery {
    pub fn from_params(params: &AlertQueryParams) -> Result<Self, QueryError> {
        let filter = AlertFilter::from_params(params)?;

        let sort = AlertSort {
            field: parse_param("sort", &params.sort)?.unwrap_or_default(),
            order: parse_param("order", &params.order)?.unwrap_or_default(),
        };

        let page: i64 = parse_param("page", &params.page)?.unwrap_or(DEFAULT_PAGE as i64);
        let page_size: i64 =
            parse_param("page_size", &params.page_size)?.unwrap_or(DEFAULT_PAGE_SIZE as i64);

        Ok(Self {
            filter,
            sort,
            pagination: Pagination::new(page, page_size)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct AlertPage {
    pub items: Vec<Alert>,
    /// Matching alerts before slicing.
    pub total_items: usize,
    pub page: u32,
    pub page_size: u32,
    pub total_pages: usize,
}

pub fn filter_alerts<'a>(alerts: &'a [Alert], filter: &AlertFilter) -> Vec<&'a Alert> {
    alerts.iter().filter(|a| filter.matches(a)).collect()
}

/// Stable: equal keys keep their collection order in both directions.
pub fn sort_alerts(alerts: &mut [&Alert], sort: AlertSort) {
    alerts.sort_by(|a, b| {
        let ordering = compare(a, b, sort.field);
        match sort.order {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    });
}

pub fn run_query(alerts: &[Alert], query: &AlertQuery) -> AlertPage {
    let mut matched = filter_alerts(alerts, &query.filter);
    sort_alerts(&mut matched, query.sort);

    let total_items = matched.len();
    let page_size = query.pagination.page_size() as usize;
    let items = matched
        .into_iter()
        .skip(query.pagination.offset())
        .take(page_size)
        .cloned()
        .collect();

    AlertPage {
        items,
        total_items,
        page: query.pagination.page(),
        page_size: query.pagination.page_size(),
        total_pages: total_items.div_ceil(page_size),
    }
}
