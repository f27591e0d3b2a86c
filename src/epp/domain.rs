//! Domain object command builders
//!
//! One builder per verb. Each validates the required top-level fields,
//! normalizes the field groups and assembles the payload in the order the
//! domain mapping schema mandates: reordering children is a protocol
//! violation, so insertion order below is load-bearing.

use serde_derive::{Deserialize, Serialize};

use crate::epp::config::NsBinding;
use crate::epp::envelope;
use crate::epp::errors::{Result, ValidationError};
use crate::epp::fields::{
    self, required, AuthInfo, ContactRef, Nameserver, OneOrMany, Period, StatusEntry,
};
use crate::epp::tree::Element;

/// Valid values for the transfer `op` attribute.
pub const TRANSFER_OPS: [&str; 5] = ["approve", "cancel", "query", "reject", "request"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DomainCheck {
    /// One or more domain names to query, in order.
    #[serde(alias = "domain")]
    pub name: OneOrMany<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DomainCreate {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub period: Option<Period>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ns: Option<Vec<Nameserver>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registrant: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact: Option<Vec<ContactRef>>,
    #[serde(
        default,
        rename = "authInfo",
        skip_serializing_if = "Option::is_none"
    )]
    pub auth_info: Option<AuthInfo>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DomainDelete {
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DomainUpdate {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub add: Option<DomainAddRem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rem: Option<DomainAddRem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chg: Option<DomainChg>,
}

/// Field groups legal inside `<domain:add>` / `<domain:rem>`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DomainAddRem {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ns: Option<Vec<Nameserver>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact: Option<Vec<ContactRef>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<Vec<StatusEntry>>,
}

/// Scalar replacements legal inside `<domain:chg>`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DomainChg {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registrant: Option<String>,
    #[serde(
        default,
        rename = "authInfo",
        skip_serializing_if = "Option::is_none"
    )]
    pub auth_info: Option<AuthInfo>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DomainTransfer {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub op: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub period: Option<Period>,
    #[serde(
        default,
        rename = "authInfo",
        skip_serializing_if = "Option::is_none"
    )]
    pub auth_info: Option<AuthInfo>,
}

pub fn check(ns: &NsBinding, data: &DomainCheck) -> Result<Element> {
    let obj = envelope::object(ns, "check").append(
        data.name
            .as_slice()
            .iter()
            .map(|name| Element::new(ns.tag("name")).text(name)),
    );
    Ok(Element::new("check").child(obj))
}

pub fn create(ns: &NsBinding, data: &DomainCreate) -> Result<Element> {
    let name = required(&data.name, "name")?;

    let mut obj =
        envelope::object(ns, "create").child(Element::new(ns.tag("name")).text(name));
    if let Some(period) = &data.period {
        obj = obj.child(fields::period(period, &ns.prefix));
    }
    if let Some(servers) = &data.ns {
        obj = obj.child(fields::nameservers(servers, &ns.prefix)?);
    }
    if let Some(registrant) = &data.registrant {
        obj = obj.child(Element::new(ns.tag("registrant")).text(registrant));
    }
    if let Some(contacts) = &data.contact {
        obj = obj.append(fields::contact_refs(contacts, &ns.prefix)?);
    }
    if let Some(auth) = &data.auth_info {
        obj = obj.child(fields::auth_info_wrapped(auth, &ns.prefix)?);
    }

    Ok(Element::new("create").child(obj))
}

pub fn delete(ns: &NsBinding, data: &DomainDelete) -> Result<Element> {
    let name = required(&data.name, "name")?;
    let obj = envelope::object(ns, "delete").child(Element::new(ns.tag("name")).text(name));
    Ok(Element::new("delete").child(obj))
}

pub fn update(ns: &NsBinding, data: &DomainUpdate) -> Result<Element> {
    let name = required(&data.name, "name")?;

    let mut obj =
        envelope::object(ns, "update").child(Element::new(ns.tag("name")).text(name));
    if let Some(add) = &data.add {
        obj = obj.child(add_rem(ns, "add", add)?);
    }
    if let Some(rem) = &data.rem {
        obj = obj.child(add_rem(ns, "rem", rem)?);
    }
    if let Some(chg) = &data.chg {
        obj = obj.child(change(ns, chg)?);
    }

    Ok(Element::new("update").child(obj))
}

fn add_rem(ns: &NsBinding, verb: &str, group: &DomainAddRem) -> Result<Element> {
    let mut el = Element::new(ns.tag(verb));
    if let Some(servers) = &group.ns {
        el = el.child(fields::nameservers(servers, &ns.prefix)?);
    }
    if let Some(contacts) = &group.contact {
        el = el.append(fields::contact_refs(contacts, &ns.prefix)?);
    }
    if let Some(status) = &group.status {
        el = el.append(fields::statuses(status, &ns.prefix));
    }
    Ok(el)
}

fn change(ns: &NsBinding, chg: &DomainChg) -> Result<Element> {
    let mut el = Element::new(ns.tag("chg"));
    if let Some(registrant) = &chg.registrant {
        el = el.child(Element::new(ns.tag("registrant")).text(registrant));
    }
    if let Some(auth) = &chg.auth_info {
        el = el.child(fields::auth_info_wrapped(auth, &ns.prefix)?);
    }
    Ok(el)
}

/// Build the transfer body. The `op` renders as an attribute on the outer
/// `<transfer>` element; the registration period is only legal on
/// `request`.
pub fn transfer(ns: &NsBinding, data: &DomainTransfer) -> Result<Element> {
    let name = required(&data.name, "name")?;
    let op = required(&data.op, "op")?;
    if !TRANSFER_OPS.contains(&op) {
        return Err(ValidationError::TransferOp { op: op.to_string() }.into());
    }
    let auth = match &data.auth_info {
        Some(auth) => auth,
        None => {
            return Err(ValidationError::MissingField {
                field: "pw".to_string(),
            }
            .into())
        }
    };

    let mut obj =
        envelope::object(ns, "transfer").child(Element::new(ns.tag("name")).text(name));
    if op == "request" {
        if let Some(period) = &data.period {
            obj = obj.child(fields::period(period, &ns.prefix));
        }
    }
    obj = obj.child(fields::auth_info_wrapped(auth, &ns.prefix)?);

    Ok(Element::new("transfer").attr("op", op).child(obj))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::epp::config::Namespace;

    fn binding() -> NsBinding {
        NsBinding::new(
            "domain",
            &Namespace {
                xmlns: "urn:ietf:params:xml:ns:domain-1.0".to_string(),
                schema_location: Some(
                    "urn:ietf:params:xml:ns:domain-1.0 domain-1.0.xsd".to_string(),
                ),
            },
        )
    }

    #[test]
    fn test_check_preserves_input_order() {
        let data: DomainCheck = serde_json::from_str(
            r#"{"name": ["test-domain.com", "other-domain.net"]}"#,
        )
        .unwrap();
        let body = check(&binding(), &data).unwrap();

        let obj = body.first("domain:check").unwrap();
        assert_eq!(
            obj.attribute("xmlns:domain"),
            Some("urn:ietf:params:xml:ns:domain-1.0")
        );
        let names: Vec<&str> = obj.all("domain:name").filter_map(|e| e.value()).collect();
        assert_eq!(names, vec!["test-domain.com", "other-domain.net"]);
    }

    #[test]
    fn test_check_accepts_domain_alias() {
        let data: DomainCheck = serde_json::from_str(r#"{"domain": "test-domain.com"}"#).unwrap();
        let body = check(&binding(), &data).unwrap();
        let obj = body.first("domain:check").unwrap();
        assert_eq!(
            obj.first("domain:name").and_then(|e| e.value()),
            Some("test-domain.com")
        );
    }

    #[test]
    fn test_create_schema_order() {
        let data: DomainCreate = serde_json::from_str(
            r#"{
                "name": "test-domain.com",
                "period": {"unit": "y", "value": 2},
                "ns": ["ns1.example.net", "ns2.example.net"],
                "registrant": "P-12345",
                "contact": [{"admin": "P-12345"}, {"tech": "P-12346"}],
                "authInfo": {"pw": "Axri3kjp"}
            }"#,
        )
        .unwrap();
        let body = create(&binding(), &data).unwrap();

        let obj = body.first("domain:create").unwrap();
        let tags: Vec<&str> = obj.elements().iter().map(|e| e.tag()).collect();
        assert_eq!(
            tags,
            vec![
                "domain:name",
                "domain:period",
                "domain:ns",
                "domain:registrant",
                "domain:contact",
                "domain:contact",
                "domain:authInfo"
            ]
        );
        assert_eq!(
            obj.first("domain:registrant").and_then(|e| e.value()),
            Some("P-12345")
        );
    }

    #[test]
    fn test_create_omits_absent_groups() {
        let data: DomainCreate =
            serde_json::from_str(r#"{"name": "test-domain.com"}"#).unwrap();
        let body = create(&binding(), &data).unwrap();
        let obj = body.first("domain:create").unwrap();
        assert_eq!(obj.elements().len(), 1);
    }

    #[test]
    fn test_create_requires_name() {
        let err = create(&binding(), &DomainCreate::default()).unwrap_err();
        assert_eq!(err.to_string(), "name is required!");
    }

    #[test]
    fn test_delete() {
        let data: DomainDelete =
            serde_json::from_str(r#"{"name": "my-delete-domain.com"}"#).unwrap();
        let body = delete(&binding(), &data).unwrap();
        assert_eq!(
            body.locate("domain:delete.domain:name").and_then(|e| e.value()),
            Some("my-delete-domain.com")
        );
    }

    #[test]
    fn test_update_composition() {
        let data: DomainUpdate = serde_json::from_str(
            r#"{
                "name": "test-domain.com",
                "add": {
                    "ns": ["ns3.test.com", "ns4.whatever.com"],
                    "contact": [{"admin": "P-9876"}, {"billing": "PX143"}],
                    "status": ["clientUpdateProhibited",
                        {"s": "clientHold", "lang": "en", "value": "Payment Overdue"}]
                },
                "rem": {
                    "ns": [{"host": "ns1.test-domain.com",
                            "addr": {"type": "v4", "ip": "192.68.2.132"}}],
                    "contact": [{"billing": "PX147"}],
                    "status": ["clientTransferProhibited"]
                },
                "chg": {
                    "registrant": "P-49023",
                    "authInfo": {"pw": "TestPass2"}
                }
            }"#,
        )
        .unwrap();
        let body = update(&binding(), &data).unwrap();

        let obj = body.first("domain:update").unwrap();
        let tags: Vec<&str> = obj.elements().iter().map(|e| e.tag()).collect();
        assert_eq!(
            tags,
            vec!["domain:name", "domain:add", "domain:rem", "domain:chg"]
        );

        let add = obj.first("domain:add").unwrap();
        let add_hosts: Vec<&str> = add
            .first("domain:ns")
            .unwrap()
            .all("domain:hostObj")
            .filter_map(|e| e.value())
            .collect();
        assert_eq!(add_hosts, vec!["ns3.test.com", "ns4.whatever.com"]);

        let rem = obj.first("domain:rem").unwrap();
        let rem_host = rem
            .locate("domain:ns.domain:hostAttr.domain:hostName")
            .and_then(|e| e.value());
        assert_eq!(rem_host, Some("ns1.test-domain.com"));

        let chg = obj.first("domain:chg").unwrap();
        assert_eq!(
            chg.first("domain:registrant").and_then(|e| e.value()),
            Some("P-49023")
        );
        assert_eq!(
            chg.locate("domain:authInfo.domain:pw").and_then(|e| e.value()),
            Some("TestPass2")
        );
    }

    #[test]
    fn test_transfer_request_with_period() {
        let data: DomainTransfer = serde_json::from_str(
            r#"{
                "name": "test-domain.com",
                "op": "request",
                "period": 1,
                "authInfo": {"roid": "P-12345", "pw": "2fooBAR"}
            }"#,
        )
        .unwrap();
        let body = transfer(&binding(), &data).unwrap();

        assert_eq!(body.tag(), "transfer");
        assert_eq!(body.attribute("op"), Some("request"));
        let obj = body.first("domain:transfer").unwrap();
        let tags: Vec<&str> = obj.elements().iter().map(|e| e.tag()).collect();
        assert_eq!(tags, vec!["domain:name", "domain:period", "domain:authInfo"]);
        assert_eq!(
            obj.locate("domain:authInfo.domain:pw")
                .and_then(|e| e.attribute("roid")),
            Some("P-12345")
        );
    }

    #[test]
    fn test_transfer_non_request_omits_period() {
        let data: DomainTransfer = serde_json::from_str(
            r#"{
                "name": "test-domain.com",
                "op": "reject",
                "period": 1,
                "authInfo": {"pw": "2fooBAR"}
            }"#,
        )
        .unwrap();
        let body = transfer(&binding(), &data).unwrap();
        assert_eq!(body.attribute("op"), Some("reject"));
        assert!(body
            .locate("domain:transfer.domain:period")
            .is_none());
    }

    #[test]
    fn test_transfer_rejects_invalid_op() {
        let data: DomainTransfer = serde_json::from_str(
            r#"{"name": "test-domain.com", "op": "yipee", "authInfo": {"pw": "2fooBAR"}}"#,
        )
        .unwrap();
        let err = transfer(&binding(), &data).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Transfer domain op must be one of the following: \
             [approve, cancel, query, reject, request]."
        );
    }

    #[test]
    fn test_transfer_requires_pw() {
        let data: DomainTransfer = serde_json::from_str(
            r#"{"name": "test-domain.com", "op": "request", "authInfo": {"roid": "P-12345"}}"#,
        )
        .unwrap();
        let err = transfer(&binding(), &data).unwrap_err();
        assert_eq!(err.to_string(), "pw is required!");

        let missing: DomainTransfer =
            serde_json::from_str(r#"{"name": "test-domain.com", "op": "request"}"#).unwrap();
        let err = transfer(&binding(), &missing).unwrap_err();
        assert_eq!(err.to_string(), "pw is required!");
    }

    #[test]
    fn test_all_valid_transfer_ops_succeed() {
        for op in &TRANSFER_OPS {
            let data = DomainTransfer {
                name: Some("test-domain.com".to_string()),
                op: Some(op.to_string()),
                period: None,
                auth_info: Some(AuthInfo::Pw("2fooBAR".to_string())),
            };
            assert!(transfer(&binding(), &data).is_ok(), "op {} should build", op);
        }
    }
}
