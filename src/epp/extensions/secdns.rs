//! DNSSEC delegation data extension (secDNS)
//!
//! Carries DS and DNSKEY material for a domain alongside create and update
//! commands. `dsData` and `keyData` may each arrive as a single object or
//! a sequence; an update's `rem.all` flag supersedes itemized removal.

use serde_derive::{Deserialize, Serialize};

use crate::epp::config::NsBinding;
use crate::epp::envelope;
use crate::epp::errors::{Result, ValidationError};
use crate::epp::fields::OneOrMany;
use crate::epp::tree::Element;

pub const EXTENSION_ID: &str = "secDNS";
pub const PREFIX: &str = "secDNS";

/// DS record data, optionally carrying the key material it was derived
/// from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DsData {
    #[serde(rename = "keyTag")]
    pub key_tag: u16,
    pub alg: u8,
    #[serde(rename = "digestType")]
    pub digest_type: u8,
    pub digest: String,
    #[serde(
        default,
        rename = "keyData",
        skip_serializing_if = "Option::is_none"
    )]
    pub key_data: Option<KeyData>,
}

/// DNSKEY record data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyData {
    pub flags: u16,
    pub protocol: u8,
    pub alg: u8,
    #[serde(rename = "pubKey")]
    pub pub_key: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SecDnsCreate {
    #[serde(
        default,
        rename = "maxSigLife",
        skip_serializing_if = "Option::is_none"
    )]
    pub max_sig_life: Option<u64>,
    #[serde(
        default,
        rename = "dsData",
        skip_serializing_if = "Option::is_none"
    )]
    pub ds_data: Option<OneOrMany<DsData>>,
    #[serde(
        default,
        rename = "keyData",
        skip_serializing_if = "Option::is_none"
    )]
    pub key_data: Option<OneOrMany<KeyData>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SecDnsUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub add: Option<SecDnsAdd>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rem: Option<SecDnsRem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chg: Option<SecDnsChg>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SecDnsAdd {
    #[serde(
        default,
        rename = "dsData",
        skip_serializing_if = "Option::is_none"
    )]
    pub ds_data: Option<OneOrMany<DsData>>,
    #[serde(
        default,
        rename = "keyData",
        skip_serializing_if = "Option::is_none"
    )]
    pub key_data: Option<OneOrMany<KeyData>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SecDnsRem {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub all: Option<Toggle>,
    #[serde(
        default,
        rename = "dsData",
        skip_serializing_if = "Option::is_none"
    )]
    pub ds_data: Option<OneOrMany<DsData>>,
    #[serde(
        default,
        rename = "keyData",
        skip_serializing_if = "Option::is_none"
    )]
    pub key_data: Option<OneOrMany<KeyData>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SecDnsChg {
    #[serde(
        default,
        rename = "maxSigLife",
        skip_serializing_if = "Option::is_none"
    )]
    pub max_sig_life: Option<u64>,
}

/// The `rem.all` flag. Callers send booleans or numbers; anything else is
/// preserved so validation can reject it with the exact contract message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Toggle {
    Bool(bool),
    Number(f64),
    Other(serde_json::Value),
}

impl Toggle {
    pub fn as_flag(&self) -> std::result::Result<bool, ValidationError> {
        match self {
            Toggle::Bool(flag) => Ok(*flag),
            Toggle::Number(n) => Ok(*n != 0.0),
            Toggle::Other(_) => Err(ValidationError::SecDnsAll),
        }
    }
}

/// Builder for secDNS extension payloads, bound to the provider's
/// namespace declaration at factory time.
#[derive(Debug, Clone)]
pub struct SecDns {
    ns: NsBinding,
}

impl SecDns {
    pub fn new(ns: NsBinding) -> SecDns {
        SecDns { ns }
    }

    /// `<secDNS:create>` payload: maxSigLife, then DS data, then bare key
    /// data, omitting absent groups.
    pub fn create(&self, data: &SecDnsCreate) -> Element {
        let mut el = envelope::object(&self.ns, "create").maybe_child(
            data.max_sig_life
                .map(|life| Element::new(self.ns.tag("maxSigLife")).text(life)),
        );
        if let Some(ds) = &data.ds_data {
            el = el.append(ds.as_slice().iter().map(|ds| self.ds_data(ds)));
        }
        if let Some(keys) = &data.key_data {
            el = el.append(keys.as_slice().iter().map(|key| self.key_data(key)));
        }
        el
    }

    /// `<secDNS:update>` payload with independent rem/add/chg groups.
    pub fn update(&self, data: &SecDnsUpdate) -> Result<Element> {
        let mut el = envelope::object(&self.ns, "update");
        if let Some(rem) = &data.rem {
            el = el.child(self.removal(rem)?);
        }
        if let Some(add) = &data.add {
            let mut group = Element::new(self.ns.tag("add"));
            if let Some(ds) = &add.ds_data {
                group = group.append(ds.as_slice().iter().map(|ds| self.ds_data(ds)));
            }
            if let Some(keys) = &add.key_data {
                group = group.append(keys.as_slice().iter().map(|key| self.key_data(key)));
            }
            el = el.child(group);
        }
        if let Some(chg) = &data.chg {
            el = el.child(
                Element::new(self.ns.tag("chg")).maybe_child(
                    chg.max_sig_life
                        .map(|life| Element::new(self.ns.tag("maxSigLife")).text(life)),
                ),
            );
        }
        Ok(el)
    }

    // "all" supersedes itemized removal; a falsy flag drops out and the
    // itemized fields render as usual.
    fn removal(&self, rem: &SecDnsRem) -> Result<Element> {
        let mut el = Element::new(self.ns.tag("rem"));
        if let Some(all) = &rem.all {
            if all.as_flag()? {
                return Ok(el.child(Element::new(self.ns.tag("all")).text("true")));
            }
        }
        if let Some(ds) = &rem.ds_data {
            el = el.append(ds.as_slice().iter().map(|ds| self.ds_data(ds)));
        }
        if let Some(keys) = &rem.key_data {
            el = el.append(keys.as_slice().iter().map(|key| self.key_data(key)));
        }
        Ok(el)
    }

    fn ds_data(&self, ds: &DsData) -> Element {
        Element::new(self.ns.tag("dsData"))
            .child(Element::new(self.ns.tag("keyTag")).text(ds.key_tag))
            .child(Element::new(self.ns.tag("alg")).text(ds.alg))
            .child(Element::new(self.ns.tag("digestType")).text(ds.digest_type))
            .child(Element::new(self.ns.tag("digest")).text(&ds.digest))
            .maybe_child(ds.key_data.as_ref().map(|key| self.key_data(key)))
    }

    fn key_data(&self, key: &KeyData) -> Element {
        Element::new(self.ns.tag("keyData"))
            .child(Element::new(self.ns.tag("flags")).text(key.flags))
            .child(Element::new(self.ns.tag("protocol")).text(key.protocol))
            .child(Element::new(self.ns.tag("alg")).text(key.alg))
            .child(Element::new(self.ns.tag("pubKey")).text(&key.pub_key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::epp::config::Namespace;

    fn handler() -> SecDns {
        SecDns::new(NsBinding::new(
            "secDNS",
            &Namespace {
                xmlns: "urn:ietf:params:xml:ns:secDNS-1.1".to_string(),
                schema_location: None,
            },
        ))
    }

    #[test]
    fn test_create_with_ds_data() {
        let data: SecDnsCreate = serde_json::from_str(
            r#"{
                "maxSigLife": 604800,
                "dsData": {
                    "keyTag": 12345,
                    "alg": 3,
                    "digestType": 1,
                    "digest": "49FD46E6C4B45C55D4AC"
                }
            }"#,
        )
        .unwrap();
        let el = handler().create(&data);

        assert_eq!(el.tag(), "secDNS:create");
        assert_eq!(
            el.attribute("xmlns:secDNS"),
            Some("urn:ietf:params:xml:ns:secDNS-1.1")
        );
        assert_eq!(
            el.first("secDNS:maxSigLife").and_then(|e| e.value()),
            Some("604800")
        );
        assert_eq!(
            el.locate("secDNS:dsData.secDNS:digest").and_then(|e| e.value()),
            Some("49FD46E6C4B45C55D4AC")
        );
    }

    #[test]
    fn test_create_ds_data_with_nested_key_data() {
        let data: SecDnsCreate = serde_json::from_str(
            r#"{
                "dsData": {
                    "keyTag": 12345, "alg": 3, "digestType": 1,
                    "digest": "49FD46E6C4B45C55D4AC",
                    "keyData": {"flags": 257, "protocol": 3, "alg": 1,
                                "pubKey": "AQPJ////4Q=="}
                }
            }"#,
        )
        .unwrap();
        let el = handler().create(&data);
        assert_eq!(
            el.locate("secDNS:dsData.secDNS:keyData.secDNS:pubKey")
                .and_then(|e| e.value()),
            Some("AQPJ////4Q==")
        );
    }

    #[test]
    fn test_create_bare_key_data() {
        let data: SecDnsCreate = serde_json::from_str(
            r#"{"keyData": {"flags": 257, "protocol": 3, "alg": 1,
                            "pubKey": "AQPJ////4Q=="}}"#,
        )
        .unwrap();
        let el = handler().create(&data);
        assert_eq!(
            el.locate("secDNS:keyData.secDNS:pubKey").and_then(|e| e.value()),
            Some("AQPJ////4Q==")
        );
        assert!(el.first("secDNS:maxSigLife").is_none());
    }

    #[test]
    fn test_update_groups() {
        let data: SecDnsUpdate = serde_json::from_str(
            r#"{
                "add": {"dsData": {"keyTag": 12345, "alg": 3, "digestType": 1,
                                   "digest": "49FD46E6C4B45C55D4AC"}},
                "rem": {"keyData": {"flags": 257, "protocol": 3, "alg": 1,
                                    "pubKey": "AQPJ////4Q=="}},
                "chg": {"maxSigLife": 604800}
            }"#,
        )
        .unwrap();
        let el = handler().update(&data).unwrap();

        let tags: Vec<&str> = el.elements().iter().map(|e| e.tag()).collect();
        assert_eq!(tags, vec!["secDNS:rem", "secDNS:add", "secDNS:chg"]);
        assert_eq!(
            el.locate("secDNS:rem.secDNS:keyData.secDNS:pubKey")
                .and_then(|e| e.value()),
            Some("AQPJ////4Q==")
        );
        assert_eq!(
            el.locate("secDNS:chg.secDNS:maxSigLife").and_then(|e| e.value()),
            Some("604800")
        );
    }

    #[test]
    fn test_rem_all_supersedes_itemized_removal() {
        let data: SecDnsUpdate = serde_json::from_str(
            r#"{
                "add": {"dsData": {"keyTag": 12345, "alg": 3, "digestType": 1,
                                   "digest": "49FD46E6C4B45C55D4AC"}},
                "rem": {"all": true,
                        "keyData": {"flags": 257, "protocol": 3, "alg": 1,
                                    "pubKey": "AQPJ////4Q=="}},
                "chg": {"maxSigLife": 604800}
            }"#,
        )
        .unwrap();
        let el = handler().update(&data).unwrap();

        let rem = el.first("secDNS:rem").unwrap();
        assert_eq!(rem.first("secDNS:all").and_then(|e| e.value()), Some("true"));
        assert!(rem.first("secDNS:keyData").is_none());
    }

    #[test]
    fn test_rem_all_accepts_truthy_numbers() {
        let data: SecDnsUpdate = serde_json::from_str(r#"{"rem": {"all": 1}}"#).unwrap();
        let el = handler().update(&data).unwrap();
        assert_eq!(
            el.locate("secDNS:rem.secDNS:all").and_then(|e| e.value()),
            Some("true")
        );
    }

    #[test]
    fn test_rem_all_falsy_keeps_itemized_removal() {
        let data: SecDnsUpdate = serde_json::from_str(
            r#"{"rem": {"all": false,
                        "keyData": {"flags": 257, "protocol": 3, "alg": 1,
                                    "pubKey": "AQPJ////4Q=="}}}"#,
        )
        .unwrap();
        let el = handler().update(&data).unwrap();
        let rem = el.first("secDNS:rem").unwrap();
        assert!(rem.first("secDNS:all").is_none());
        assert!(rem.first("secDNS:keyData").is_some());
    }

    #[test]
    fn test_rem_all_rejects_other_types() {
        let data: SecDnsUpdate =
            serde_json::from_str(r#"{"rem": {"all": "goodtimes"}}"#).unwrap();
        let err = handler().update(&data).unwrap_err();
        assert_eq!(err.to_string(), "'all' must be a boolean or truthy number.");
    }
}
