//! Typed errors for command encoding
//!
//! Two failure classes exist: the caller handed over data that violates a
//! field contract (`ValidationError`, raised while building a single
//! command), or the provider configuration is unusable
//! (`ConfigurationError`, raised once at factory construction). There are
//! no transient failure modes; nothing here is worth retrying without
//! fixing the input.

use std::fmt;

use derive_more::{Display, Error, From};

/// Caller-supplied data violates a field contract. Always attributable to
/// one offending field; the message names the field or constraint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A required top-level field is absent from the command data.
    MissingField { field: String },
    /// A nameserver object entry carries no host name.
    NameserverHost,
    /// The transfer `op` value is outside the protocol enumeration.
    TransferOp { op: String },
    /// The secDNS update `rem.all` flag has an unusable type.
    SecDnsAll,
    /// A contact reference map does not hold exactly one type key.
    ContactRefShape,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::MissingField { field } => write!(f, "{} is required!", field),
            ValidationError::NameserverHost => {
                write!(f, "Host required in nameserver object!")
            }
            ValidationError::TransferOp { .. } => write!(
                f,
                "Transfer domain op must be one of the following: \
                 [approve, cancel, query, reject, request]."
            ),
            ValidationError::SecDnsAll => {
                write!(f, "'all' must be a boolean or truthy number.")
            }
            ValidationError::ContactRefShape => {
                write!(f, "Contact object must have exactly one type key!")
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// The provider configuration cannot support the requested encoder
/// instance. Raised at factory construction, never per command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    /// A namespace prefix required by the object types or an enabled
    /// extension is not declared in the namespace table.
    MissingNamespace { provider: String, prefix: String },
    /// An enabled extension id has no registered builder.
    UnknownExtension { provider: String, id: String },
}

impl fmt::Display for ConfigurationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigurationError::MissingNamespace { provider, prefix } => write!(
                f,
                "Provider '{}' is missing the '{}' namespace declaration",
                provider, prefix
            ),
            ConfigurationError::UnknownExtension { provider, id } => write!(
                f,
                "Provider '{}' enables unknown extension '{}'",
                provider, id
            ),
        }
    }
}

impl std::error::Error for ConfigurationError {}

#[derive(Debug, Display, From, Error)]
pub enum EppError {
    Validation(ValidationError),
    Configuration(ConfigurationError),
}

pub type Result<T> = std::result::Result<T, EppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_message_strings() {
        assert_eq!(
            ValidationError::NameserverHost.to_string(),
            "Host required in nameserver object!"
        );
        assert_eq!(
            ValidationError::MissingField {
                field: "pw".to_string()
            }
            .to_string(),
            "pw is required!"
        );
        assert_eq!(
            ValidationError::SecDnsAll.to_string(),
            "'all' must be a boolean or truthy number."
        );
        assert_eq!(
            ValidationError::TransferOp {
                op: "yipee".to_string()
            }
            .to_string(),
            "Transfer domain op must be one of the following: \
             [approve, cancel, query, reject, request]."
        );
    }

    #[test]
    fn test_epp_error_wraps_both_kinds() {
        let validation: EppError = ValidationError::SecDnsAll.into();
        assert!(matches!(validation, EppError::Validation(_)));

        let configuration: EppError = ConfigurationError::MissingNamespace {
            provider: "hexonet-test1".to_string(),
            prefix: "secDNS".to_string(),
        }
        .into();
        assert!(configuration.to_string().contains("secDNS"));
    }
}
