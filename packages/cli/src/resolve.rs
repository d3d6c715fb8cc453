//! `resolve` command: MSA enrichment for a facility CSV.
//!
//! Each row is resolved from whatever location columns it carries —
//! `zip` preferred, then `city`+`state`, then `address` — and three
//! columns are appended: `msa_name`, `msa_code`, `msa_source`.
//! Unresolvable rows get the Unknown sentinel values, never a blank;
//! the run logs a match-rate summary at the end.

use csv::StringRecord;

use care_map_resolver::{MsaResolver, ResolutionCache, ResolveRequest};

use crate::CliError;
use crate::csv_util::{cell, find_column};

pub async fn run(input: &str, output: &str) -> Result<(), CliError> {
    let mut reader = csv::Reader::from_path(input)?;
    let mut writer = csv::Writer::from_path(output)?;

    let headers = reader.headers()?.clone();
    let zip_idx = find_column(&headers, "zip");
    let city_idx = find_column(&headers, "city");
    let state_idx = find_column(&headers, "state");
    let address_idx = find_column(&headers, "address");

    let mut out_headers = headers.clone();
    out_headers.push_field("msa_name");
    out_headers.push_field("msa_code");
    out_headers.push_field("msa_source");
    writer.write_record(&out_headers)?;

    let resolver = MsaResolver::new(ResolutionCache::new());

    let mut total = 0_u64;
    let mut matched = 0_u64;

    for record in reader.records() {
        let record = record?;
        total += 1;

        let resolution = resolver
            .resolve(&request_for(&record, zip_idx, city_idx, state_idx, address_idx))
            .await;
        if !resolution.is_unknown() {
            matched += 1;
        }

        let mut out = record.clone();
        out.push_field(&resolution.msa_name);
        out.push_field(&resolution.msa_code);
        out.push_field(resolution.source.as_ref());
        writer.write_record(&out)?;
    }

    writer.flush()?;

    #[allow(clippy::cast_precision_loss)]
    let rate = if total == 0 {
        0.0
    } else {
        matched as f64 / total as f64 * 100.0
    };
    log::info!("MSA data added: {matched}/{total} facilities matched ({rate:.1}%)");

    Ok(())
}

/// Picks the resolution request for a row: ZIP first, then city/state,
/// then address. Rows with none of the three resolve as an empty ZIP,
/// which yields the Unknown sentinel.
fn request_for(
    record: &StringRecord,
    zip_idx: Option<usize>,
    city_idx: Option<usize>,
    state_idx: Option<usize>,
    address_idx: Option<usize>,
) -> ResolveRequest {
    let zip = cell(record, zip_idx);
    if !zip.is_empty() {
        return ResolveRequest::Zip(zip.to_string());
    }

    let city = cell(record, city_idx);
    let state = cell(record, state_idx);
    if !city.is_empty() && !state.is_empty() {
        return ResolveRequest::CityState {
            city: city.to_string(),
            state: state.to_string(),
        };
    }

    let address = cell(record, address_idx);
    if !address.is_empty() {
        return ResolveRequest::Address(address.to_string());
    }

    ResolveRequest::Zip(String::new())
}
