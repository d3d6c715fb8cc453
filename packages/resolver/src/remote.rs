//! Remote ZIP-to-MSA lookup clients.
//!
//! Two provider families are supported, configured via the
//! [`service_registry`](crate::service_registry):
//!
//! - **Public ZIP-to-MSA API** — `GET {base_url}/api?zip={zip}`, no key.
//!   Depending on the deployment the payload is either
//!   `{zip, cbsa, msaName, population2014, population2015}` or
//!   `{zip, cbsa10, cbsa_name, ...}`; both shapes are accepted and
//!   standardized here at the parse boundary.
//! - **HUD USPS crosswalk** — returns a bare CBSA code, which is
//!   resolved to a display name through the static CBSA table.
//!
//! Each call is a single attempt with a bounded timeout. Failures are
//! returned as typed errors for the orchestrating resolver to log and
//! fall through on — retry loops belong to no tier of this pipeline.

use std::time::Duration;

use care_map_geography::{msa_name, tables};
use care_map_geography_models::resolution::PopulationEstimates;

use crate::ResolveError;
use crate::service_registry::{LookupService, ProviderConfig};

/// A successful remote lookup, standardized across provider shapes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteMsa {
    /// MSA display name.
    pub msa_name: String,
    /// CBSA code.
    pub msa_code: String,
    /// Population estimates, when the provider reports them.
    pub population_estimates: Option<PopulationEstimates>,
}

/// Looks up a ZIP against one configured service.
///
/// Returns `Ok(None)` when the service answered but has no MSA for the
/// ZIP (not an error — rural ZIPs sit outside any CBSA).
///
/// # Errors
///
/// Returns [`ResolveError`] if the HTTP request, the response status,
/// or the response parsing fails.
pub async fn lookup_zip(
    client: &reqwest::Client,
    service: &LookupService,
    zip: &str,
) -> Result<Option<RemoteMsa>, ResolveError> {
    match &service.provider {
        ProviderConfig::ZipToMsa {
            base_urls,
            timeout_secs,
        } => {
            // Alternate endpoints of the same service: one attempt each,
            // first reachable answer wins.
            let mut last_err = None;
            for base_url in base_urls {
                match zip_to_msa_request(client, base_url, *timeout_secs, zip).await {
                    Ok(found) => return Ok(found),
                    Err(e) => {
                        log::debug!("endpoint {base_url} failed for ZIP {zip}: {e}");
                        last_err = Some(e);
                    }
                }
            }
            Err(last_err.unwrap_or_else(|| ResolveError::Parse {
                message: "service has no endpoints".to_string(),
            }))
        }
        ProviderConfig::HudCrosswalk {
            base_url,
            timeout_secs,
        } => hud_request(client, base_url, *timeout_secs, zip).await,
    }
}

async fn zip_to_msa_request(
    client: &reqwest::Client,
    base_url: &str,
    timeout_secs: u64,
    zip: &str,
) -> Result<Option<RemoteMsa>, ResolveError> {
    let url = format!("{base_url}/api");
    let resp = client
        .get(&url)
        .query(&[("zip", zip)])
        .timeout(Duration::from_secs(timeout_secs))
        .send()
        .await?;

    let status = resp.status();
    if !status.is_success() {
        return Err(ResolveError::Status {
            code: status.as_u16(),
        });
    }

    let body: serde_json::Value = resp.json().await?;
    parse_zip_to_msa_response(&body)
}

async fn hud_request(
    client: &reqwest::Client,
    base_url: &str,
    timeout_secs: u64,
    zip: &str,
) -> Result<Option<RemoteMsa>, ResolveError> {
    let mut request = client
        .get(base_url)
        .query(&[("type", "2"), ("query", zip)])
        .timeout(Duration::from_secs(timeout_secs));

    if let Ok(key) = std::env::var("HUD_API_KEY") {
        request = request.bearer_auth(key);
    }

    let resp = request.send().await?;
    let status = resp.status();
    if !status.is_success() {
        return Err(ResolveError::Status {
            code: status.as_u16(),
        });
    }

    let body: serde_json::Value = resp.json().await?;
    Ok(parse_hud_response(&body))
}

/// Parses the public ZIP-to-MSA API payload, tolerating both documented
/// field shapes.
///
/// # Errors
///
/// Returns [`ResolveError::Parse`] when the payload is not a JSON
/// object.
pub fn parse_zip_to_msa_response(
    body: &serde_json::Value,
) -> Result<Option<RemoteMsa>, ResolveError> {
    if !body.is_object() {
        return Err(ResolveError::Parse {
            message: "ZIP-to-MSA response is not an object".to_string(),
        });
    }

    let msa_code = body["cbsa"]
        .as_str()
        .or_else(|| body["cbsa10"].as_str())
        .map(String::from)
        .or_else(|| body["cbsa"].as_u64().map(|n| n.to_string()));

    let display_name = body["msaName"]
        .as_str()
        .or_else(|| body["cbsa_name"].as_str())
        .map(String::from)
        .or_else(|| {
            // Bare-code payloads: resolve the name locally.
            msa_code
                .as_deref()
                .and_then(tables::cbsa_name)
                .map(String::from)
        });

    let Some(name) = display_name else {
        return Ok(None);
    };

    let estimates = PopulationEstimates {
        population_2014: numeric_field(body, "population2014"),
        population_2015: numeric_field(body, "population2015"),
    };

    Ok(Some(RemoteMsa {
        // Crosswalk sources append statistical-area suffixes.
        msa_name: msa_name::clean_msa_name(&name),
        msa_code: msa_code.unwrap_or_else(|| "00000".to_string()),
        population_estimates: if estimates.is_empty() {
            None
        } else {
            Some(estimates)
        },
    }))
}

/// Parses the HUD crosswalk payload: a bare CBSA code under
/// `data.results[0].geoid` (or top-level `cbsa` on older responses),
/// resolved to a name through the static CBSA table.
#[must_use]
pub fn parse_hud_response(body: &serde_json::Value) -> Option<RemoteMsa> {
    let code = body["data"]["results"][0]["geoid"]
        .as_str()
        .or_else(|| body["cbsa"].as_str())?;

    let name = tables::cbsa_name(code)?;

    Some(RemoteMsa {
        msa_name: name.to_string(),
        msa_code: code.to_string(),
        population_estimates: None,
    })
}

/// Reads a numeric field that some deployments send as a number and
/// others as a string.
fn numeric_field(body: &serde_json::Value, key: &str) -> Option<u64> {
    body[key]
        .as_u64()
        .or_else(|| body[key].as_str().and_then(|s| s.parse().ok()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_msa_name_shape() {
        let body = serde_json::json!({
            "zip": "60601",
            "cbsa": "16980",
            "msaName": "Chicago-Naperville-Elgin, IL-IN-WI",
            "population2014": 9_550_194_u64,
            "population2015": "9551031",
        });
        let result = parse_zip_to_msa_response(&body).unwrap().unwrap();
        assert_eq!(result.msa_name, "Chicago-Naperville-Elgin, IL-IN-WI");
        assert_eq!(result.msa_code, "16980");
        let estimates = result.population_estimates.unwrap();
        assert_eq!(estimates.population_2014, Some(9_550_194));
        assert_eq!(estimates.population_2015, Some(9_551_031));
    }

    #[test]
    fn parses_cbsa_name_shape() {
        let body = serde_json::json!({
            "zip": "61101",
            "cbsa10": "40340",
            "cbsa_name": "Rockford, IL",
        });
        let result = parse_zip_to_msa_response(&body).unwrap().unwrap();
        assert_eq!(result.msa_name, "Rockford, IL");
        assert_eq!(result.msa_code, "40340");
        assert!(result.population_estimates.is_none());
    }

    #[test]
    fn strips_statistical_area_suffix_from_remote_names() {
        let body = serde_json::json!({
            "zip": "62701",
            "cbsa": "44100",
            "msaName": "Springfield, IL Metropolitan Statistical Area",
        });
        let result = parse_zip_to_msa_response(&body).unwrap().unwrap();
        assert_eq!(result.msa_name, "Springfield, IL");
    }

    #[test]
    fn resolves_bare_code_through_static_table() {
        let body = serde_json::json!({ "zip": "61602", "cbsa": "37900" });
        let result = parse_zip_to_msa_response(&body).unwrap().unwrap();
        assert_eq!(result.msa_name, "Peoria, IL");
    }

    #[test]
    fn no_match_is_not_an_error() {
        let body = serde_json::json!({ "zip": "99999" });
        assert!(parse_zip_to_msa_response(&body).unwrap().is_none());
    }

    #[test]
    fn non_object_payload_is_a_parse_error() {
        let body = serde_json::json!([1, 2, 3]);
        assert!(parse_zip_to_msa_response(&body).is_err());
    }

    #[test]
    fn parses_hud_crosswalk_shape() {
        let body = serde_json::json!({
            "data": { "results": [{ "geoid": "44100" }] }
        });
        let result = parse_hud_response(&body).unwrap();
        assert_eq!(result.msa_name, "Springfield, IL");
        assert_eq!(result.msa_code, "44100");
    }

    #[test]
    fn hud_unknown_code_yields_none() {
        let body = serde_json::json!({
            "data": { "results": [{ "geoid": "99997" }] }
        });
        assert!(parse_hud_response(&body).is_none());
    }
}
