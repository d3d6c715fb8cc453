//! Competitor-label normalization.
//!
//! Market share sources spell the same health system many ways
//! (`"SSM Health"`, `"SSM Health Dean Medical Group"`, `"SSM HEALTH
//! ST. MARY'S"`). Left alone, each variant fragments the system's
//! share. This collapsing step runs *before* [`crate::market::analyze`]
//! — the analyzer itself is label-agnostic.

use care_map_geography_models::market::Interaction;

/// Case-insensitive prefix → canonical system label.
pub type SynonymTable<'a> = &'a [(&'a str, &'a str)];

/// Default synonym table for the hospital systems in the covered
/// regions. Longest-prefix-wins is not needed; entries are checked in
/// order, so keep more specific prefixes first.
pub const DEFAULT_SYNONYMS: &[(&str, &str)] = &[
    ("SSM", "SSM Health"),
    ("ADVOCATE", "Advocate Health"),
    ("AURORA", "Advocate Health"),
    ("ASCENSION", "Ascension"),
    ("MERCY", "Mercy"),
    ("BJC", "BJC HealthCare"),
    ("FROEDTERT", "Froedtert Health"),
    ("OSF", "OSF HealthCare"),
    ("SAINT LUKE", "Saint Luke's Health System"),
    ("ST. LUKE", "Saint Luke's Health System"),
];

/// Returns the canonical label for a competitor name.
///
/// Whitespace is trimmed and internal runs collapsed; the first
/// case-insensitive prefix match in the table wins. Names matching no
/// entry pass through cleaned but otherwise unchanged.
#[must_use]
pub fn canonical_competitor(name: &str, synonyms: SynonymTable<'_>) -> String {
    let cleaned = name.split_whitespace().collect::<Vec<_>>().join(" ");
    let upper = cleaned.to_uppercase();
    for (prefix, canonical) in synonyms {
        if upper.starts_with(prefix) {
            return (*canonical).to_string();
        }
    }
    cleaned
}

/// Collapses competitor-name variants across a batch of interactions.
pub fn collapse_competitor_names(interactions: &mut [Interaction], synonyms: SynonymTable<'_>) {
    for interaction in interactions {
        interaction.competitor = canonical_competitor(&interaction.competitor, synonyms);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collapses_system_variants() {
        assert_eq!(
            canonical_competitor("SSM Health Dean Medical Group", DEFAULT_SYNONYMS),
            "SSM Health"
        );
        assert_eq!(
            canonical_competitor("ssm health st. mary's", DEFAULT_SYNONYMS),
            "SSM Health"
        );
        assert_eq!(
            canonical_competitor("Advocate Aurora Health", DEFAULT_SYNONYMS),
            "Advocate Health"
        );
    }

    #[test]
    fn unknown_names_pass_through_cleaned() {
        assert_eq!(
            canonical_competitor("  Community   Hospital ", DEFAULT_SYNONYMS),
            "Community Hospital"
        );
    }

    #[test]
    fn collapsing_unifies_shares() {
        let mut interactions = vec![
            Interaction {
                geography_id: "63101".to_string(),
                competitor: "SSM Health".to_string(),
            },
            Interaction {
                geography_id: "63101".to_string(),
                competitor: "SSM HEALTH ST. MARY'S".to_string(),
            },
        ];
        collapse_competitor_names(&mut interactions, DEFAULT_SYNONYMS);

        let analysis = crate::market::analyze(&interactions);
        assert_eq!(analysis.shares.len(), 1);
        assert!((analysis.shares[0].share - 1.0).abs() < 1e-9);
    }
}
