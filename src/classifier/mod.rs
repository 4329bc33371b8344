//! Email classification — category model, keyword heuristics, and the
//! rate-limited, cache-wrapped oracle service.

pub mod keywords;
pub mod service;

pub use keywords::{fallback_category, fallback_reply};
pub use service::{ClassificationSource, EmailClassifier, TriageResult};

use serde::{Deserialize, Serialize};

/// Email category. A closed two-value enumeration, never extended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "Produtivo")]
    Productive,
    #[serde(rename = "Improdutivo")]
    Unproductive,
}

impl Category {
    /// Wire label, exactly as shown to callers and expected from the oracle.
    pub fn label(&self) -> &'static str {
        match self {
            Category::Productive => "Produtivo",
            Category::Unproductive => "Improdutivo",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Parse the oracle's classification answer by literal substring match.
///
/// Checked in label order. This is safe only because the match is
/// case-sensitive: "Produtivo" (capital P) is not a substring of
/// "Improdutivo", whose embedded "produtivo" is lowercase.
pub fn parse_oracle_category(raw: &str) -> Option<Category> {
    if raw.contains(Category::Productive.label()) {
        Some(Category::Productive)
    } else if raw.contains(Category::Unproductive.label()) {
        Some(Category::Unproductive)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_do_not_overlap_case_sensitively() {
        // The ordering in parse_oracle_category depends on this.
        assert!(!Category::Unproductive.label().contains(Category::Productive.label()));
    }

    #[test]
    fn parse_exact_labels() {
        assert_eq!(parse_oracle_category("Produtivo"), Some(Category::Productive));
        assert_eq!(parse_oracle_category("Improdutivo"), Some(Category::Unproductive));
    }

    #[test]
    fn parse_label_embedded_in_chatter() {
        assert_eq!(
            parse_oracle_category("A categoria é: Produtivo."),
            Some(Category::Productive)
        );
        assert_eq!(
            parse_oracle_category("Classifico este e-mail como Improdutivo, pois..."),
            Some(Category::Unproductive)
        );
    }

    #[test]
    fn parse_unrecognized_answer_is_none() {
        assert_eq!(parse_oracle_category("não sei dizer"), None);
        assert_eq!(parse_oracle_category(""), None);
        // Lowercase labels are not accepted.
        assert_eq!(parse_oracle_category("produtivo"), None);
    }

    #[test]
    fn serde_uses_portuguese_labels() {
        assert_eq!(
            serde_json::to_string(&Category::Productive).unwrap(),
            "\"Produtivo\""
        );
        assert_eq!(
            serde_json::to_string(&Category::Unproductive).unwrap(),
            "\"Improdutivo\""
        );
    }
}
