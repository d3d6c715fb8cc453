#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Demographic aggregation for care map geographies.
//!
//! Turns raw per-age-band, per-sex population counts (ACS-style named
//! numeric columns) into the derived [`Geography`] metrics the scoring
//! pipeline consumes: band totals, percentages, population density, and
//! a growth-rate estimate.
//!
//! Missing columns default to 0 and malformed numerics coerce to 0 — a
//! geography with no usable raw source still yields a complete,
//! all-zero record rather than a missing row.
//!
//! [`Geography`]: care_map_geography_models::Geography

pub mod acs;
pub mod aggregate;

use thiserror::Error;

/// Errors from demographic source operations.
#[derive(Debug, Error)]
pub enum DemographicsError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Response parsing failed.
    #[error("Parse error: {message}")]
    Parse {
        /// Description of the parsing failure.
        message: String,
    },
}
