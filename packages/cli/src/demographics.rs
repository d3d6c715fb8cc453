//! `fetch-demographics` and `score` commands.
//!
//! `fetch-demographics` pulls raw ACS columns for every unique ZIP in
//! the input and writes one row per ZIP. ZIPs the Census has no data
//! for still get a row (all zeros), so the downstream batch is always
//! complete. `score` aggregates those rows into geographies and runs
//! the attractiveness scorer over the whole batch.

use std::collections::BTreeSet;
use std::time::Duration;

use care_map_analytics::score::score_batch;
use care_map_demographics::acs::{self, RawColumns};
use care_map_demographics::aggregate;
use care_map_geography::regional::PrefixTables;
use care_map_geography_models::{Geography, normalize_zip};

use crate::CliError;
use crate::csv_util::{cell, numeric_cell, require_column};

/// Pause between Census API calls, to be polite on keyless quota.
const FETCH_DELAY: Duration = Duration::from_millis(200);

pub async fn fetch(
    input: &str,
    output: &str,
    year: u16,
    api_key: Option<&str>,
) -> Result<(), CliError> {
    let mut reader = csv::Reader::from_path(input)?;
    let zip_idx = require_column(reader.headers()?, "zip")?;

    let mut zips: BTreeSet<String> = BTreeSet::new();
    for record in reader.records() {
        let record = record?;
        if let Some(zip) = normalize_zip(cell(&record, Some(zip_idx))) {
            zips.insert(zip);
        }
    }
    log::info!("fetching ACS demographics for {} unique ZIPs", zips.len());

    let client = reqwest::Client::new();
    let variables = acs::all_variables();

    let mut writer = csv::Writer::from_path(output)?;
    let mut headers = vec!["zip"];
    headers.extend_from_slice(&variables);
    writer.write_record(&headers)?;

    let mut found = 0_usize;
    for zip in &zips {
        let columns = match acs::fetch_zcta(&client, acs::DEFAULT_BASE_URL, year, zip, api_key)
            .await
        {
            Ok(columns) => columns,
            Err(e) => {
                log::warn!("ACS fetch failed for ZIP {zip}: {e}");
                None
            }
        };

        // No raw source at all still yields a complete all-zero row.
        let columns = columns.unwrap_or_default();
        if !columns.is_empty() {
            found += 1;
        }

        let mut row = vec![zip.clone()];
        for &variable in &variables {
            row.push(aggregate::column(&columns, variable).to_string());
        }
        writer.write_record(&row)?;

        tokio::time::sleep(FETCH_DELAY).await;
    }

    writer.flush()?;
    log::info!("ACS data found for {found}/{} ZIPs", zips.len());
    Ok(())
}

pub fn score(input: &str, output: &str) -> Result<(), CliError> {
    let mut reader = csv::Reader::from_path(input)?;
    let headers = reader.headers()?.clone();
    let zip_idx = require_column(&headers, "zip")?;

    let mut geographies: Vec<Geography> = Vec::new();
    for record in reader.records() {
        let record = record?;
        let Some(zip) = normalize_zip(cell(&record, Some(zip_idx))) else {
            continue;
        };

        let mut columns = RawColumns::new();
        for (i, header) in headers.iter().enumerate() {
            if i == zip_idx {
                continue;
            }
            columns.insert(header.trim().to_string(), numeric_cell(&record, Some(i)));
        }

        geographies.push(aggregate::aggregate(&zip, &columns, &PrefixTables));
    }

    let scores = score_batch(&geographies);
    log::info!("scored {} geographies", scores.len());

    let mut writer = csv::Writer::from_path(output)?;
    writer.write_record([
        "zip",
        "attractiveness_score",
        "attractiveness_category",
        "attractiveness_color",
        "density_score",
        "growth_score",
        "senior_score",
        "income_score",
        "young_family_score",
        "senior_population_pct",
        "young_family_pct",
    ])?;

    for (geography, score) in geographies.iter().zip(scores.iter()) {
        let c = &score.component_scores;
        writer.write_record(&[
            score.geography_id.clone(),
            format!("{:.1}", score.composite_score),
            score.category.to_string(),
            score.category.color().to_string(),
            format!("{:.1}", c.density),
            format!("{:.1}", c.growth),
            format!("{:.1}", c.senior),
            format!("{:.1}", c.income),
            format!("{:.1}", c.young_family),
            format!("{:.1}", geography.age_percentages.senior()),
            format!("{:.1}", geography.age_percentages.young_family()),
        ])?;
    }

    writer.flush()?;
    Ok(())
}
