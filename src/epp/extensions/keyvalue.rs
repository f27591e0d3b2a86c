//! Registry key/value extension
//!
//! Some registries accept proprietary parameters as a flat list of
//! key/value pairs attached to domain commands. Entries render in the
//! mapping's iteration order, one leaf per pair, values carried entirely
//! in attributes.

use indexmap::IndexMap;

use crate::epp::config::NsBinding;
use crate::epp::envelope;
use crate::epp::tree::Element;

pub const EXTENSION_ID: &str = "keyvalue";
pub const PREFIX: &str = "keyvalue";

/// Builder for key/value extension payloads.
#[derive(Debug, Clone)]
pub struct KeyValue {
    ns: NsBinding,
}

impl KeyValue {
    pub fn new(ns: NsBinding) -> KeyValue {
        KeyValue { ns }
    }

    /// `<keyvalue:extension>` payload with one `<keyvalue:kv>` per entry.
    pub fn create(&self, data: &IndexMap<String, String>) -> Element {
        envelope::object(&self.ns, "extension").append(data.iter().map(|(key, value)| {
            Element::new(self.ns.tag("kv"))
                .attr("key", key)
                .attr("value", value)
        }))
    }
}
