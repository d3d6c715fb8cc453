//! American Community Survey (ACS) 5-year estimate client.
//!
//! Fetches population-by-age-and-sex, income, and home-value columns
//! for a ZIP Code Tabulation Area from the Census Bureau API:
//!
//! `GET /data/{year}/acs/acs5?get={vars}&for=zip code tabulation area:{zip}`
//!
//! No API key is required for low request volumes. The response is a
//! JSON array of rows, the first row being column headers.
//!
//! See <https://www.census.gov/data/developers/data-sets/acs-5year.html>

use std::collections::BTreeMap;
use std::time::Duration;

use crate::DemographicsError;

/// Default Census API base URL.
pub const DEFAULT_BASE_URL: &str = "https://api.census.gov/data";

/// Default ACS vintage year.
pub const DEFAULT_YEAR: u16 = 2020;

/// Per-request timeout.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Total population (`B01003_001E`).
pub const TOTAL_POPULATION: &str = "B01003_001E";

/// Median household income (`B19013_001E`).
pub const MEDIAN_HOUSEHOLD_INCOME: &str = "B19013_001E";

/// Median home value (`B25077_001E`).
pub const MEDIAN_HOME_VALUE: &str = "B25077_001E";

/// Male and female ACS variable codes for one age band.
#[derive(Debug, Clone, Copy)]
pub struct BandCodes {
    /// Male table cells (`B01001_003E`..`B01001_025E`).
    pub male: &'static [&'static str],
    /// Female table cells (`B01001_027E`..`B01001_049E`).
    pub female: &'static [&'static str],
}

/// ACS variable codes for the ten fixed age bands, in band order
/// (under 5 through 85+). The ACS tabulates finer cells than the bands
/// need (e.g. 20, 21, and 22–24 separately), so each band sums several
/// cells per sex.
pub const BAND_CODES: [BandCodes; 10] = [
    // Under 5
    BandCodes {
        male: &["B01001_003E"],
        female: &["B01001_027E"],
    },
    // 5-17
    BandCodes {
        male: &["B01001_004E", "B01001_005E", "B01001_006E"],
        female: &["B01001_028E", "B01001_029E", "B01001_030E"],
    },
    // 18-24
    BandCodes {
        male: &["B01001_007E", "B01001_008E", "B01001_009E", "B01001_010E"],
        female: &["B01001_031E", "B01001_032E", "B01001_033E", "B01001_034E"],
    },
    // 25-34
    BandCodes {
        male: &["B01001_011E", "B01001_012E"],
        female: &["B01001_035E", "B01001_036E"],
    },
    // 35-44
    BandCodes {
        male: &["B01001_013E", "B01001_014E"],
        female: &["B01001_037E", "B01001_038E"],
    },
    // 45-54
    BandCodes {
        male: &["B01001_015E", "B01001_016E"],
        female: &["B01001_039E", "B01001_040E"],
    },
    // 55-64
    BandCodes {
        male: &["B01001_017E", "B01001_018E", "B01001_019E"],
        female: &["B01001_041E", "B01001_042E", "B01001_043E"],
    },
    // 65-74
    BandCodes {
        male: &["B01001_020E", "B01001_021E", "B01001_022E"],
        female: &["B01001_044E", "B01001_045E", "B01001_046E"],
    },
    // 75-84
    BandCodes {
        male: &["B01001_023E", "B01001_024E"],
        female: &["B01001_047E", "B01001_048E"],
    },
    // 85+
    BandCodes {
        male: &["B01001_025E"],
        female: &["B01001_049E"],
    },
];

/// Raw demographic columns: ACS variable code → numeric value.
///
/// Missing columns read as 0 through [`crate::aggregate::column`].
pub type RawColumns = BTreeMap<String, f64>;

/// All variable codes requested per ZCTA, in request order.
#[must_use]
pub fn all_variables() -> Vec<&'static str> {
    let mut vars = vec![TOTAL_POPULATION];
    for band in &BAND_CODES {
        vars.extend_from_slice(band.male);
    }
    for band in &BAND_CODES {
        vars.extend_from_slice(band.female);
    }
    vars.push(MEDIAN_HOUSEHOLD_INCOME);
    vars.push(MEDIAN_HOME_VALUE);
    vars
}

/// Fetches raw demographic columns for a ZCTA.
///
/// Returns `Ok(None)` when the Census API has no data for the ZIP
/// (it answers 400 for unknown ZCTAs).
///
/// # Errors
///
/// Returns [`DemographicsError`] if the HTTP request or response
/// parsing fails.
pub async fn fetch_zcta(
    client: &reqwest::Client,
    base_url: &str,
    year: u16,
    zip: &str,
    api_key: Option<&str>,
) -> Result<Option<RawColumns>, DemographicsError> {
    let url = format!("{base_url}/{year}/acs/acs5");
    let variables = all_variables().join(",");

    let mut query: Vec<(&str, String)> = vec![
        ("get", variables),
        ("for", format!("zip code tabulation area:{zip}")),
    ];
    if let Some(key) = api_key {
        query.push(("key", key.to_string()));
    }

    let resp = client
        .get(&url)
        .query(&query)
        .timeout(REQUEST_TIMEOUT)
        .send()
        .await?;

    // The Census API answers 400 for ZCTAs it has no data for.
    if resp.status() == reqwest::StatusCode::BAD_REQUEST {
        log::debug!("no Census data for ZCTA {zip}");
        return Ok(None);
    }

    let status = resp.status();
    if !status.is_success() {
        return Err(DemographicsError::Parse {
            message: format!("Census API returned HTTP {status}"),
        });
    }

    let body: serde_json::Value = resp.json().await?;
    parse_zcta_response(&body)
}

/// Parses the ACS row-oriented response into named columns.
///
/// The payload is `[[header, ...], [value, ...]]`; a payload with no
/// data row yields `Ok(None)`. Null, non-numeric, and the Census
/// Bureau's large negative suppression sentinels all coerce to 0.
///
/// # Errors
///
/// Returns [`DemographicsError::Parse`] when the payload is not an
/// array of rows.
pub fn parse_zcta_response(
    body: &serde_json::Value,
) -> Result<Option<RawColumns>, DemographicsError> {
    let rows = body.as_array().ok_or_else(|| DemographicsError::Parse {
        message: "ACS response is not an array".to_string(),
    })?;

    if rows.len() < 2 {
        return Ok(None);
    }

    let headers = rows[0].as_array().ok_or_else(|| DemographicsError::Parse {
        message: "ACS header row is not an array".to_string(),
    })?;
    let values = rows[1].as_array().ok_or_else(|| DemographicsError::Parse {
        message: "ACS value row is not an array".to_string(),
    })?;

    let mut columns = RawColumns::new();
    for (header, value) in headers.iter().zip(values.iter()) {
        let Some(name) = header.as_str() else {
            continue;
        };
        columns.insert(name.to_string(), coerce_numeric(value));
    }

    Ok(Some(columns))
}

/// Coerces an ACS cell to a non-negative number; anything unusable is 0.
fn coerce_numeric(value: &serde_json::Value) -> f64 {
    let n = value
        .as_f64()
        .or_else(|| value.as_str().and_then(|s| s.trim().parse().ok()))
        .unwrap_or(0.0);
    // Suppressed estimates arrive as large negative sentinels.
    if n < 0.0 { 0.0 } else { n }
}
