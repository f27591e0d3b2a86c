//! Per-provider namespace and extension configuration
//!
//! Each registry endpoint declares its own XML namespace table and the set
//! of protocol extensions it accepts. The table is loaded once, handed to
//! the encoder factory, and never mutated afterwards, so a single
//! configuration value can back any number of encoder instances.

use indexmap::IndexMap;
use serde_derive::{Deserialize, Serialize};

/// One namespace declaration: the `xmlns` URI plus an optional
/// `xsi:schemaLocation` hint emitted alongside it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Namespace {
    pub xmlns: String,
    #[serde(
        default,
        rename = "schemaLocation",
        skip_serializing_if = "Option::is_none"
    )]
    pub schema_location: Option<String>,
}

/// Static configuration for a single provider: namespace prefix table and
/// the list of enabled extension ids.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProviderConfig {
    pub namespaces: IndexMap<String, Namespace>,
    #[serde(default)]
    pub extensions: Vec<String>,
}

impl ProviderConfig {
    /// Parse a configuration from its JSON representation, the same shape
    /// the provider config files use.
    pub fn from_json(raw: &str) -> serde_json::Result<ProviderConfig> {
        serde_json::from_str(raw)
    }

    pub fn namespace(&self, prefix: &str) -> Option<&Namespace> {
        self.namespaces.get(prefix)
    }

    pub fn has_extension(&self, id: &str) -> bool {
        self.extensions.iter().any(|e| e == id)
    }
}

/// A namespace binding resolved at factory time for one object family or
/// extension. Command builders receive these instead of the raw table, so
/// a missing declaration surfaces exactly once, at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NsBinding {
    pub prefix: String,
    pub xmlns: String,
    pub schema_location: Option<String>,
}

impl NsBinding {
    pub fn new(prefix: &str, ns: &Namespace) -> NsBinding {
        NsBinding {
            prefix: prefix.to_string(),
            xmlns: ns.xmlns.clone(),
            schema_location: ns.schema_location.clone(),
        }
    }

    /// Qualified tag name under this binding's prefix.
    pub fn tag(&self, local: &str) -> String {
        crate::epp::tree::qname(&self.prefix, local)
    }
}
