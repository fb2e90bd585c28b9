//! Composite request parameters

use std::fmt;

use chrono::{Duration, Local, NaiveDate};

use crate::coordinate::AreaOfInterest;
use crate::raster::errors::{RiskError, RiskResult};

use super::satellite::Satellite;

/// Default upper bound on scene cloud cover, in percent
pub const DEFAULT_MAX_CLOUD_PERCENT: f64 = 20.0;

/// Default cap on pixels materialized locally
pub const DEFAULT_MAX_PIXELS: u64 = 100_000_000;

/// Date format accepted on the command line and in configuration
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Acquisition window, start inclusive and end exclusive
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    /// Create a date range
    ///
    /// # Returns
    /// The range, or an error unless `start` is before `end`
    pub fn new(start: NaiveDate, end: NaiveDate) -> RiskResult<Self> {
        if start >= end {
            return Err(RiskError::InvalidArgument(format!(
                "Start date {} must be before end date {}", start, end
            )));
        }
        Ok(DateRange { start, end })
    }

    /// Parse a range from two `YYYY-MM-DD` strings
    pub fn parse(start: &str, end: &str) -> RiskResult<Self> {
        DateRange::new(parse_date(start)?, parse_date(end)?)
    }

    /// The `days` days ending at `end`
    pub fn ending_at(end: NaiveDate, days: i64) -> RiskResult<Self> {
        DateRange::new(end - Duration::days(days), end)
    }

    /// The `days` days ending today
    pub fn last_days(days: i64) -> RiskResult<Self> {
        DateRange::ending_at(Local::now().date_naive(), days)
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Check whether a date falls inside the window
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date < self.end
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} to {}", self.start.format(DATE_FORMAT), self.end.format(DATE_FORMAT))
    }
}

/// Parse a `YYYY-MM-DD` date
pub fn parse_date(s: &str) -> RiskResult<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), DATE_FORMAT).map_err(|e| {
        RiskError::InvalidArgument(format!("Invalid date '{}': {}. Expected format: YYYY-MM-DD", s, e))
    })
}

/// Everything an imagery provider needs to build a composite
#[derive(Debug, Clone)]
pub struct CompositeRequest {
    /// Region to cover
    pub aoi: AreaOfInterest,
    /// Acquisition window
    pub dates: DateRange,
    /// Mission to draw scenes from
    pub satellite: Satellite,
    /// Scenes at or above this cloud percentage are skipped
    pub max_cloud_percent: f64,
    /// Largest composite that may be materialized locally
    pub max_pixels: u64,
}

impl CompositeRequest {
    /// Create a request with default cloud and size limits
    pub fn new(aoi: AreaOfInterest, dates: DateRange, satellite: Satellite) -> Self {
        CompositeRequest {
            aoi,
            dates,
            satellite,
            max_cloud_percent: DEFAULT_MAX_CLOUD_PERCENT,
            max_pixels: DEFAULT_MAX_PIXELS,
        }
    }

    /// Override the cloud cover limit
    pub fn with_max_cloud_percent(mut self, percent: f64) -> Self {
        self.max_cloud_percent = percent;
        self
    }

    /// Override the pixel limit
    pub fn with_max_pixels(mut self, pixels: u64) -> Self {
        self.max_pixels = pixels;
        self
    }
}
