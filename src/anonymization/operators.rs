//! Operator resolution
//!
//! Maps a caller-selected [`Strategy`] plus its parameters onto a concrete
//! rewrite operator. Resolution happens once per request, before any span is
//! touched, so the apply path dispatches on a closed enum instead of
//! re-inspecting strings.

use crate::domain::errors::VeilError;
use crate::domain::request::{AnonymizationConfig, Strategy};
use crate::domain::result::Result;

/// Default replacement token for the replace strategy
pub const DEFAULT_REPLACEMENT: &str = "<ANONYMIZED>";

/// Hash algorithm for the hash operator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HashAlgorithm {
    Sha256,
    Sha512,
    Md5,
}

impl HashAlgorithm {
    /// Parse an algorithm name as supplied in `config.hash_type`
    pub fn parse(name: &str) -> Result<Self> {
        match name.to_lowercase().as_str() {
            "sha256" => Ok(Self::Sha256),
            "sha512" => Ok(Self::Sha512),
            "md5" => Ok(Self::Md5),
            other => Err(VeilError::Validation(format!(
                "Unsupported hash_type '{other}'. Must be one of: sha256, sha512, md5"
            ))),
        }
    }
}

/// A concrete rewrite operator
///
/// One case per supported strategy. Encrypt never reaches this enum; it is
/// rejected during resolution.
#[derive(Debug, Clone, PartialEq)]
pub enum Operator {
    /// Replace the span with a fixed string
    Replace { value: String },
    /// Drop the span, no replacement text
    Redact,
    /// Replace every character of the span with `mask_char`
    Mask { mask_char: char },
    /// Replace the span with a hex digest of its bytes. Deterministic:
    /// identical input bytes and algorithm produce the identical digest on
    /// every call.
    Hash { algorithm: HashAlgorithm },
}

/// Operator mapping for one request
///
/// The design applies a single policy per request: one "default" operator
/// covers every surviving entity. Per-entity-type operators are deliberately
/// not supported.
#[derive(Debug, Clone, PartialEq)]
pub struct OperatorMap {
    default: Operator,
}

impl OperatorMap {
    /// Create a map with the given default operator
    pub fn new(default: Operator) -> Self {
        Self { default }
    }

    /// Operator for an entity type; always the default in this model
    pub fn operator_for(&self, _entity_type: &str) -> &Operator {
        &self.default
    }
}

/// Resolve an operator map from a request configuration
///
/// # Errors
///
/// Returns [`VeilError::Validation`] for the reserved encrypt strategy and
/// for unknown hash algorithm names.
pub fn resolve_operators(config: &AnonymizationConfig) -> Result<OperatorMap> {
    let operator = match config.strategy {
        Strategy::Replace => Operator::Replace {
            value: config
                .replacement_text
                .clone()
                .unwrap_or_else(|| DEFAULT_REPLACEMENT.to_string()),
        },
        Strategy::Redact => Operator::Redact,
        Strategy::Mask => Operator::Mask {
            mask_char: config.mask_char,
        },
        Strategy::Hash => Operator::Hash {
            algorithm: HashAlgorithm::parse(&config.hash_type)?,
        },
        Strategy::Encrypt => {
            return Err(VeilError::Validation(
                "The encrypt strategy is reserved and not yet supported".to_string(),
            ))
        }
    };

    Ok(OperatorMap::new(operator))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_replace_uses_caller_text() {
        let config = AnonymizationConfig {
            strategy: Strategy::Replace,
            replacement_text: Some("[GONE]".to_string()),
            ..Default::default()
        };
        let map = resolve_operators(&config).unwrap();
        assert_eq!(
            map.operator_for("PERSON"),
            &Operator::Replace {
                value: "[GONE]".to_string()
            }
        );
    }

    #[test]
    fn test_replace_defaults_to_anonymized_token() {
        let config = AnonymizationConfig::default();
        let map = resolve_operators(&config).unwrap();
        assert_eq!(
            map.operator_for("EMAIL_ADDRESS"),
            &Operator::Replace {
                value: DEFAULT_REPLACEMENT.to_string()
            }
        );
    }

    #[test]
    fn test_redact_has_no_replacement() {
        let config = AnonymizationConfig {
            strategy: Strategy::Redact,
            ..Default::default()
        };
        let map = resolve_operators(&config).unwrap();
        assert_eq!(map.operator_for("PERSON"), &Operator::Redact);
    }

    #[test]
    fn test_mask_carries_mask_char() {
        let config = AnonymizationConfig {
            strategy: Strategy::Mask,
            mask_char: '#',
            ..Default::default()
        };
        let map = resolve_operators(&config).unwrap();
        assert_eq!(
            map.operator_for("US_SSN"),
            &Operator::Mask { mask_char: '#' }
        );
    }

    #[test]
    fn test_hash_parses_algorithm() {
        for (name, algorithm) in [
            ("sha256", HashAlgorithm::Sha256),
            ("sha512", HashAlgorithm::Sha512),
            ("md5", HashAlgorithm::Md5),
            ("SHA256", HashAlgorithm::Sha256),
        ] {
            let config = AnonymizationConfig {
                strategy: Strategy::Hash,
                hash_type: name.to_string(),
                ..Default::default()
            };
            let map = resolve_operators(&config).unwrap();
            assert_eq!(map.operator_for("PERSON"), &Operator::Hash { algorithm });
        }
    }

    #[test]
    fn test_unknown_hash_type_rejected() {
        let config = AnonymizationConfig {
            strategy: Strategy::Hash,
            hash_type: "crc32".to_string(),
            ..Default::default()
        };
        let err = resolve_operators(&config).unwrap_err();
        assert!(matches!(err, VeilError::Validation(_)));
        assert!(err.to_string().contains("crc32"));
    }

    #[test]
    fn test_encrypt_rejected_as_validation() {
        let config = AnonymizationConfig {
            strategy: Strategy::Encrypt,
            ..Default::default()
        };
        let err = resolve_operators(&config).unwrap_err();
        assert!(matches!(err, VeilError::Validation(_)));
    }

    #[test]
    fn test_same_operator_for_every_entity_type() {
        let map = resolve_operators(&AnonymizationConfig::default()).unwrap();
        assert_eq!(map.operator_for("PERSON"), map.operator_for("URL"));
    }
}
