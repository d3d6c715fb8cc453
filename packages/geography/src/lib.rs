#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Static geographic reference data for the care map toolchain.
//!
//! Three kinds of data live here, all treated as versioned data assets
//! rather than code logic:
//!
//! 1. **MSA fallback tables** ([`tables`]) — ZIP → MSA and
//!    (city, state) → MSA mappings for the known service area, embedded
//!    as TOML at compile time.
//! 2. **Regional estimate proxies** ([`regional`]) — coarse area and
//!    population-growth estimates keyed by ZIP-prefix range. These are
//!    acknowledged approximations, pluggable behind the
//!    [`regional::RegionalEstimates`] trait.
//! 3. **MSA name cleanup** ([`msa_name`]) — strips statistical-area
//!    suffixes from display names.

pub mod msa_name;
pub mod regional;
pub mod tables;
