//! Common types used across the platform

use chrono::{DateTime, Days, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

/// Default page size for product listings.
pub const DEFAULT_PAGE_SIZE: u32 = 30;

/// Hard cap on the page size a caller may request.
pub const MAX_PAGE_SIZE: u32 = 200;

/// Pagination parameters as they arrive on the query string.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct PageParams {
    pub page: Option<u32>,
    pub page_size: Option<u32>,
}

impl PageParams {
    /// Clamps to a 1-based page and a capped page size.
    pub fn resolve(&self) -> (u32, u32) {
        let page = self.page.unwrap_or(1).max(1);
        let page_size = self
            .page_size
            .unwrap_or(DEFAULT_PAGE_SIZE)
            .clamp(1, MAX_PAGE_SIZE);
        (page, page_size)
    }

    /// Row offset of the resolved page.
    pub fn offset(&self) -> i64 {
        let (page, page_size) = self.resolve();
        i64::from(page - 1) * i64::from(page_size)
    }
}

/// One page of results plus the unpaged total.
#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    pub results: Vec<T>,
    pub total: i64,
    pub page: u32,
    pub page_size: u32,
}

/// Inclusive date range filter for note listings and exports.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct DateRange {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl DateRange {
    /// Half-open UTC bounds `[start, end)` covering the inclusive dates.
    pub fn bounds(&self) -> (Option<DateTime<Utc>>, Option<DateTime<Utc>>) {
        let start = self
            .start_date
            .map(|d| d.and_time(NaiveTime::MIN).and_utc());
        let end = self
            .end_date
            .and_then(|d| d.checked_add_days(Days::new(1)))
            .map(|d| d.and_time(NaiveTime::MIN).and_utc());
        (start, end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_params_clamp_and_default() {
        assert_eq!(PageParams::default().resolve(), (1, DEFAULT_PAGE_SIZE));

        let oversized = PageParams {
            page: Some(0),
            page_size: Some(10_000),
        };
        assert_eq!(oversized.resolve(), (1, MAX_PAGE_SIZE));
    }

    #[test]
    fn offset_is_zero_based() {
        let params = PageParams {
            page: Some(3),
            page_size: Some(30),
        };
        assert_eq!(params.offset(), 60);
    }

    #[test]
    fn date_range_end_is_exclusive_next_day() {
        let range = DateRange {
            start_date: NaiveDate::from_ymd_opt(2026, 1, 10),
            end_date: NaiveDate::from_ymd_opt(2026, 1, 10),
        };
        let (start, end) = range.bounds();
        assert_eq!(start.unwrap().to_rfc3339(), "2026-01-10T00:00:00+00:00");
        assert_eq!(end.unwrap().to_rfc3339(), "2026-01-11T00:00:00+00:00");
    }
}
