//! Protocol extension builders
//!
//! Extensions are independent modules composed additively: the factory
//! constructs a handler for each extension id a provider enables, and an
//! encoder instance without a handler simply has nothing to call. Adding a
//! new extension means adding a module here and registering its id; the
//! command builders never change.

use std::collections::HashMap;

use lazy_static::lazy_static;

/// Registry key/value extension (flat key/value pairs on domain create).
pub mod keyvalue;

/// DNSSEC delegation data extension (DS/DNSKEY material on domains).
pub mod secdns;

lazy_static! {
    /// Known extension ids mapped to the namespace prefix each renders
    /// under. The factory resolves the prefix against the provider's
    /// namespace table at construction.
    static ref EXTENSION_PREFIXES: HashMap<&'static str, &'static str> = {
        let mut prefixes = HashMap::new();
        prefixes.insert(secdns::EXTENSION_ID, secdns::PREFIX);
        prefixes.insert(keyvalue::EXTENSION_ID, keyvalue::PREFIX);
        prefixes
    };
}

/// Namespace prefix for a known extension id, `None` for ids no builder
/// exists for.
pub fn prefix_for(id: &str) -> Option<&'static str> {
    EXTENSION_PREFIXES.get(id).copied()
}
