//! Host object command builders
//!
//! Hosts are the simplest object family: a name plus glue addresses.
//! Update follows the `name, add, rem, chg` order, with `addr` and
//! `status` groups inside add/rem and only a replacement name in chg.

use serde_derive::{Deserialize, Serialize};

use crate::epp::config::NsBinding;
use crate::epp::envelope;
use crate::epp::errors::Result;
use crate::epp::fields::{self, required, HostAddr, OneOrMany, StatusEntry};
use crate::epp::tree::Element;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HostCheck {
    #[serde(alias = "host")]
    pub name: OneOrMany<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HostCreate {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub addr: Option<OneOrMany<HostAddr>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HostDelete {
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HostUpdate {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub add: Option<HostAddRem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rem: Option<HostAddRem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chg: Option<HostChg>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HostAddRem {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub addr: Option<OneOrMany<HostAddr>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<Vec<StatusEntry>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HostChg {
    #[serde(default)]
    pub name: Option<String>,
}

pub fn check(ns: &NsBinding, data: &HostCheck) -> Result<Element> {
    let obj = envelope::object(ns, "check").append(
        data.name
            .as_slice()
            .iter()
            .map(|name| Element::new(ns.tag("name")).text(name)),
    );
    Ok(Element::new("check").child(obj))
}

pub fn create(ns: &NsBinding, data: &HostCreate) -> Result<Element> {
    let name = required(&data.name, "name")?;

    let mut obj = envelope::object(ns, "create").child(Element::new(ns.tag("name")).text(name));
    if let Some(addr) = &data.addr {
        obj = obj.append(fields::ip_addresses(addr.as_slice(), &ns.tag("addr")));
    }

    Ok(Element::new("create").child(obj))
}

pub fn delete(ns: &NsBinding, data: &HostDelete) -> Result<Element> {
    let name = required(&data.name, "name")?;
    let obj = envelope::object(ns, "delete").child(Element::new(ns.tag("name")).text(name));
    Ok(Element::new("delete").child(obj))
}

pub fn update(ns: &NsBinding, data: &HostUpdate) -> Result<Element> {
    let name = required(&data.name, "name")?;

    let mut obj = envelope::object(ns, "update").child(Element::new(ns.tag("name")).text(name));
    if let Some(add) = &data.add {
        obj = obj.child(add_rem(ns, "add", add));
    }
    if let Some(rem) = &data.rem {
        obj = obj.child(add_rem(ns, "rem", rem));
    }
    if let Some(chg) = &data.chg {
        let mut el = Element::new(ns.tag("chg"));
        if let Some(new_name) = &chg.name {
            el = el.child(Element::new(ns.tag("name")).text(new_name));
        }
        obj = obj.child(el);
    }

    Ok(Element::new("update").child(obj))
}

fn add_rem(ns: &NsBinding, verb: &str, group: &HostAddRem) -> Element {
    let mut el = Element::new(ns.tag(verb));
    if let Some(addr) = &group.addr {
        el = el.append(fields::ip_addresses(addr.as_slice(), &ns.tag("addr")));
    }
    if let Some(status) = &group.status {
        el = el.append(fields::statuses(status, &ns.prefix));
    }
    el
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::epp::config::Namespace;

    fn binding() -> NsBinding {
        NsBinding::new(
            "host",
            &Namespace {
                xmlns: "urn:ietf:params:xml:ns:host-1.0".to_string(),
                schema_location: None,
            },
        )
    }

    #[test]
    fn test_create_with_mixed_addresses() {
        let data: HostCreate = serde_json::from_str(
            r#"{
                "name": "ns1.host.com",
                "addr": ["23.84.43.123", {"ip": "22.4.22.5"},
                         {"ip": "::F3:34::BA:", "type": "v6"}]
            }"#,
        )
        .unwrap();
        let body = create(&binding(), &data).unwrap();

        let obj = body.first("host:create").unwrap();
        assert_eq!(
            obj.first("host:name").and_then(|e| e.value()),
            Some("ns1.host.com")
        );
        let versions: Vec<&str> = obj
            .all("host:addr")
            .filter_map(|e| e.attribute("ip"))
            .collect();
        assert_eq!(versions, vec!["v4", "v4", "v6"]);
    }

    #[test]
    fn test_update_composition() {
        let data: HostUpdate = serde_json::from_str(
            r#"{
                "name": "ns1.host.com",
                "chg": {"name": "ns2.host.com"},
                "add": {
                    "addr": {"ip": "::F3:34::BA:", "type": "v6"},
                    "status": ["clientUpdateProhibited"]
                },
                "rem": {
                    "addr": ["23.84.43.123", {"ip": "22.4.22.5"}],
                    "status": ["clientTransferProhibited", "sneezeAchoo"]
                }
            }"#,
        )
        .unwrap();
        let body = update(&binding(), &data).unwrap();
        let obj = body.first("host:update").unwrap();

        let tags: Vec<&str> = obj.elements().iter().map(|e| e.tag()).collect();
        assert_eq!(tags, vec!["host:name", "host:add", "host:rem", "host:chg"]);

        let add = obj.first("host:add").unwrap();
        assert_eq!(
            add.first("host:addr").and_then(|e| e.attribute("ip")),
            Some("v6")
        );

        let rem_statuses: Vec<&str> = obj
            .first("host:rem")
            .unwrap()
            .all("host:status")
            .filter_map(|e| e.attribute("s"))
            .collect();
        assert_eq!(rem_statuses, vec!["clientTransferProhibited", "sneezeAchoo"]);

        assert_eq!(
            obj.locate("host:chg.host:name").and_then(|e| e.value()),
            Some("ns2.host.com")
        );
    }

    #[test]
    fn test_delete_requires_name() {
        let err = delete(&binding(), &HostDelete::default()).unwrap_err();
        assert_eq!(err.to_string(), "name is required!");
    }
}
