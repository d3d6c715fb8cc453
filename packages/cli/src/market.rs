//! `market` command: competitor market share analysis.
//!
//! Reads (zip, competitor) interaction rows, collapses competitor-name
//! variants, and writes per-competitor shares plus per-ZIP HHI
//! concentration metrics.

use care_map_analytics::market::analyze;
use care_map_analytics::normalize::{DEFAULT_SYNONYMS, collapse_competitor_names};
use care_map_geography_models::market::Interaction;
use care_map_geography_models::normalize_zip;

use crate::CliError;
use crate::csv_util::{cell, require_column};

pub fn run(input: &str, shares_out: &str, concentration_out: &str) -> Result<(), CliError> {
    let mut reader = csv::Reader::from_path(input)?;
    let headers = reader.headers()?.clone();
    let zip_idx = require_column(&headers, "zip")?;
    let competitor_idx = require_column(&headers, "competitor")?;

    let mut interactions: Vec<Interaction> = Vec::new();
    let mut skipped = 0_u64;
    for record in reader.records() {
        let record = record?;
        let competitor = cell(&record, Some(competitor_idx));
        let Some(zip) = normalize_zip(cell(&record, Some(zip_idx))) else {
            skipped += 1;
            continue;
        };
        if competitor.is_empty() {
            skipped += 1;
            continue;
        }
        interactions.push(Interaction {
            geography_id: zip,
            competitor: competitor.to_string(),
        });
    }
    if skipped > 0 {
        log::warn!("skipped {skipped} rows with missing ZIP or competitor");
    }

    // Name collapsing must happen before analysis or shares fragment
    // across spelling variants of the same system.
    collapse_competitor_names(&mut interactions, DEFAULT_SYNONYMS);
    let analysis = analyze(&interactions);

    log::info!(
        "market share computed for {} ZIPs, {} competitor records",
        analysis.concentration.len(),
        analysis.shares.len()
    );

    let mut writer = csv::Writer::from_path(shares_out)?;
    writer.write_record(["zip", "competitor", "interaction_count", "share"])?;
    for record in &analysis.shares {
        writer.write_record(&[
            record.geography_id.clone(),
            record.competitor.clone(),
            record.interaction_count.to_string(),
            format!("{:.4}", record.share),
        ])?;
    }
    writer.flush()?;

    let mut writer = csv::Writer::from_path(concentration_out)?;
    writer.write_record(["zip", "dominant_competitor", "hhi", "interpretation"])?;
    for record in &analysis.concentration {
        writer.write_record(&[
            record.geography_id.clone(),
            record.dominant_competitor.clone(),
            format!("{:.0}", record.hhi),
            record.interpretation.to_string(),
        ])?;
    }
    writer.flush()?;

    Ok(())
}
