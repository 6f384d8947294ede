//! Recognise deserialization entry points in symbol names.
//!
//! A Go method symbol splits on '.' into
//! `<family root> . <package path...> . <receiver> . <method>`, e.g.
//! `k8s.io/api/core/v1.(*Pod).Unmarshal` →
//! `["k8s", "io/api/core/v1", "(*Pod)", "Unmarshal"]`.

use crate::utils::config::{
    DEFAULT_ENTRY_POINT, DEFAULT_FAMILY_PATH, DEFAULT_FAMILY_ROOT, SYMBOL_SEPARATOR,
};
use serde::{Deserialize, Serialize};

/// How the package family of a symbol is recognised
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum MatchMode {
    /// First component must equal the family root
    #[default]
    Strict,
    /// Family path may appear anywhere in the name
    Permissive,
}

/// Symbol matching configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchConfig {
    /// Method name of the deserialization entry point
    pub entry_point: String,

    /// Identifier the first component must equal (strict mode)
    pub family_root: String,

    /// Substring the name must contain (permissive mode)
    pub family_path: String,

    pub mode: MatchMode,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            entry_point: DEFAULT_ENTRY_POINT.to_string(),
            family_root: DEFAULT_FAMILY_ROOT.to_string(),
            family_path: DEFAULT_FAMILY_PATH.to_string(),
            mode: MatchMode::Strict,
        }
    }
}

impl MatchConfig {
    /// Create a config with default names and the given mode
    pub fn with_mode(mode: MatchMode) -> Self {
        Self {
            mode,
            ..Default::default()
        }
    }
}

/// A symbol that passed the family and entry-point filter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SymbolMatch<'a> {
    /// Receiver type, None when the receiver is not parenthesised
    pub receiver: Option<&'a str>,
}

/// Decides which frames are deserialization calls and for which type
#[derive(Debug, Clone)]
pub struct SymbolMatcher {
    config: MatchConfig,
}

impl SymbolMatcher {
    pub fn new(config: MatchConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    /// Classify a symbol with a single split
    ///
    /// **Public** - the symbol filter and type-name extraction in one pass
    ///
    /// # Returns
    /// None when the symbol is not a candidate, otherwise a [`SymbolMatch`]
    /// carrying the receiver component verbatim (parentheses kept) if it is
    /// parenthesised
    pub fn match_symbol<'a>(&self, name: &'a str) -> Option<SymbolMatch<'a>> {
        let components: Vec<&'a str> = name.split(SYMBOL_SEPARATOR).collect();
        if !self.matches_components(name, &components) {
            return None;
        }

        let receiver = components[components.len() - 2];
        Some(SymbolMatch {
            receiver: is_pointer_receiver(receiver).then_some(receiver),
        })
    }

    /// Check whether a symbol is a deserialization entry point of the family
    pub fn is_candidate(&self, name: &str) -> bool {
        self.match_symbol(name).is_some()
    }

    /// Extract the receiver type of a candidate symbol
    pub fn receiver<'a>(&self, name: &'a str) -> Option<&'a str> {
        self.match_symbol(name).and_then(|m| m.receiver)
    }

    fn matches_components(&self, name: &str, components: &[&str]) -> bool {
        if components.len() < 3 {
            return false;
        }
        if components[components.len() - 1] != self.config.entry_point {
            return false;
        }

        match self.config.mode {
            MatchMode::Strict => components[0] == self.config.family_root,
            MatchMode::Permissive => {
                name.contains(&self.config.family_path) && name.contains(&self.config.entry_point)
            }
        }
    }
}

impl Default for SymbolMatcher {
    fn default() -> Self {
        Self::new(MatchConfig::default())
    }
}

/// `(*Pod)` style receiver: wrapped in parentheses
fn is_pointer_receiver(component: &str) -> bool {
    component.len() >= 2 && component.starts_with('(') && component.ends_with(')')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_go_symbol_receiver() {
        let matcher = SymbolMatcher::default();
        assert_eq!(
            matcher.receiver("k8s.io/api/core/v1.(*Pod).Unmarshal"),
            Some("(*Pod)")
        );
    }

    #[test]
    fn test_dotted_symbol_receiver() {
        let matcher = SymbolMatcher::default();
        assert_eq!(
            matcher.receiver("k8s.io.api.core.v1.(*Pod).Unmarshal"),
            Some("(*Pod)")
        );
    }

    #[test]
    fn test_too_few_components() {
        let matcher = SymbolMatcher::default();
        assert!(!matcher.is_candidate("k8s.Unmarshal"));
        assert!(!matcher.is_candidate("Unmarshal"));
        assert!(!matcher.is_candidate(""));
    }

    #[test]
    fn test_wrong_entry_point() {
        let matcher = SymbolMatcher::default();
        assert!(!matcher.is_candidate("k8s.io/api/core/v1.(*Pod).Marshal"));
        assert!(!matcher.is_candidate("k8s.io/api/core/v1.(*Pod).UnmarshalJSON"));
    }

    #[test]
    fn test_strict_rejects_non_leading_family() {
        let matcher = SymbolMatcher::default();
        assert!(!matcher.is_candidate("encoding.json.Unmarshal"));
        assert!(!matcher.is_candidate("vendor/k8s.io/api/core/v1.(*Pod).Unmarshal"));
    }

    #[test]
    fn test_permissive_accepts_non_leading_family() {
        let matcher = SymbolMatcher::new(MatchConfig::with_mode(MatchMode::Permissive));
        assert_eq!(
            matcher.receiver("vendor/k8s.io/api/core/v1.(*Pod).Unmarshal"),
            Some("(*Pod)")
        );
        assert!(!matcher.is_candidate("encoding.json.Unmarshal"));
    }

    #[test]
    fn test_receiver_requires_parentheses() {
        let matcher = SymbolMatcher::default();
        assert!(matcher.is_candidate("k8s.io/api/core/v1.Pod.Unmarshal"));
        assert_eq!(matcher.receiver("k8s.io/api/core/v1.Pod.Unmarshal"), None);
        assert_eq!(matcher.receiver("k8s.io/api/core/v1.(*Pod.Unmarshal"), None);
        assert_eq!(matcher.receiver("k8s.io/api/core/v1.*Pod).Unmarshal"), None);
        assert_eq!(matcher.receiver("k8s.io/api/core/v1..Unmarshal"), None);
        assert_eq!(matcher.receiver("k8s.io/api/core/v1.(.Unmarshal"), None);
    }

    #[test]
    fn test_custom_names() {
        let matcher = SymbolMatcher::new(MatchConfig {
            entry_point: "Decode".to_string(),
            family_root: "acme".to_string(),
            family_path: "acme.dev".to_string(),
            mode: MatchMode::Strict,
        });
        assert_eq!(matcher.receiver("acme.dev/model.(*Widget).Decode"), Some("(*Widget)"));
        assert_eq!(matcher.receiver("k8s.io/api/core/v1.(*Pod).Unmarshal"), None);
    }

    #[test]
    fn test_match_symbol_single_pass() {
        let matcher = SymbolMatcher::default();

        assert_eq!(
            matcher.match_symbol("k8s.io/api/core/v1.(*Pod).Unmarshal"),
            Some(SymbolMatch {
                receiver: Some("(*Pod)")
            })
        );
        assert_eq!(
            matcher.match_symbol("k8s.io/apimachinery/pkg/runtime.Unknown.Unmarshal"),
            Some(SymbolMatch { receiver: None })
        );
        assert_eq!(matcher.match_symbol("main.(*Pod).Unmarshal"), None);
    }
}
