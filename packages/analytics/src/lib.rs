#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Attractiveness scoring and market concentration analysis.
//!
//! Pure computation over in-memory batches — no I/O, no hidden state,
//! no error types. [`score::score_batch`] needs the whole batch
//! materialized because its normalization is percentile-based;
//! [`market::analyze`] is idempotent over any set of interaction
//! records.

pub mod market;
pub mod normalize;
pub mod score;
