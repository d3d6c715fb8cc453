//! MSA display-name cleanup.

/// Statistical-area suffixes stripped from MSA names, checked in order;
/// only the first match is removed.
const SUFFIXES: &[&str] = &[
    " Metropolitan Statistical Area",
    " Micropolitan Statistical Area",
    " MSA",
    " MicroSA",
];

/// Strips the statistical-area suffix from an MSA name, if present.
///
/// `"St. Louis, MO-IL Metropolitan Statistical Area"` → `"St. Louis, MO-IL"`.
#[must_use]
pub fn clean_msa_name(name: &str) -> String {
    for suffix in SUFFIXES {
        if let Some(stripped) = name.strip_suffix(suffix) {
            return stripped.to_string();
        }
    }
    name.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_metropolitan_suffix() {
        assert_eq!(
            clean_msa_name("St. Louis, MO-IL Metropolitan Statistical Area"),
            "St. Louis, MO-IL"
        );
    }

    #[test]
    fn strips_micropolitan_suffix() {
        assert_eq!(
            clean_msa_name("Dixon, IL Micropolitan Statistical Area"),
            "Dixon, IL"
        );
    }

    #[test]
    fn strips_short_msa_suffix() {
        assert_eq!(clean_msa_name("Peoria, IL MSA"), "Peoria, IL");
    }

    #[test]
    fn leaves_clean_names_alone() {
        assert_eq!(
            clean_msa_name("Chicago-Naperville-Elgin, IL-IN-WI"),
            "Chicago-Naperville-Elgin, IL-IN-WI"
        );
    }
}
