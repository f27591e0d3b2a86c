//! Contact object command builders
//!
//! Payload order follows the contact mapping schema:
//! `id, postalInfo, voice, fax, email, authInfo, disclose` for create, and
//! `id, add, rem, chg` for update, where add/rem carry status lists only.

use serde_derive::{Deserialize, Serialize};

use crate::epp::config::NsBinding;
use crate::epp::envelope;
use crate::epp::errors::Result;
use crate::epp::fields::{
    self, required, AuthInfo, Disclose, OneOrMany, PostalInfo, StatusEntry,
};
use crate::epp::tree::Element;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactCheck {
    #[serde(alias = "contact")]
    pub id: OneOrMany<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContactCreate {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(
        default,
        rename = "postalInfo",
        skip_serializing_if = "Option::is_none"
    )]
    pub postal_info: Option<OneOrMany<PostalInfo>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub voice: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fax: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(
        default,
        rename = "authInfo",
        skip_serializing_if = "Option::is_none"
    )]
    pub auth_info: Option<AuthInfo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disclose: Option<Disclose>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContactDelete {
    #[serde(default)]
    pub id: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContactUpdate {
    #[serde(default)]
    pub id: Option<String>,
    /// Status codes to add; the contact mapping allows nothing else here.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub add: Option<Vec<StatusEntry>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rem: Option<Vec<StatusEntry>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chg: Option<ContactChg>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContactChg {
    #[serde(
        default,
        rename = "postalInfo",
        skip_serializing_if = "Option::is_none"
    )]
    pub postal_info: Option<OneOrMany<PostalInfo>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub voice: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fax: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(
        default,
        rename = "authInfo",
        skip_serializing_if = "Option::is_none"
    )]
    pub auth_info: Option<AuthInfo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disclose: Option<Disclose>,
}

pub fn check(ns: &NsBinding, data: &ContactCheck) -> Result<Element> {
    let obj = envelope::object(ns, "check").append(
        data.id
            .as_slice()
            .iter()
            .map(|id| Element::new(ns.tag("id")).text(id)),
    );
    Ok(Element::new("check").child(obj))
}

pub fn create(ns: &NsBinding, data: &ContactCreate) -> Result<Element> {
    let id = required(&data.id, "id")?;

    let mut obj = envelope::object(ns, "create").child(Element::new(ns.tag("id")).text(id));
    if let Some(postal) = &data.postal_info {
        obj = obj.append(fields::postal_info(postal.as_slice(), &ns.prefix));
    }
    obj = details(obj, ns, &data.voice, &data.fax, &data.email);
    if let Some(auth) = &data.auth_info {
        obj = obj.child(fields::auth_info_wrapped(auth, &ns.prefix)?);
    }
    if let Some(disclose) = &data.disclose {
        obj = obj.child(fields::disclose(disclose, &ns.prefix));
    }

    Ok(Element::new("create").child(obj))
}

pub fn delete(ns: &NsBinding, data: &ContactDelete) -> Result<Element> {
    let id = required(&data.id, "id")?;
    let obj = envelope::object(ns, "delete").child(Element::new(ns.tag("id")).text(id));
    Ok(Element::new("delete").child(obj))
}

pub fn update(ns: &NsBinding, data: &ContactUpdate) -> Result<Element> {
    let id = required(&data.id, "id")?;

    let mut obj = envelope::object(ns, "update").child(Element::new(ns.tag("id")).text(id));
    if let Some(add) = &data.add {
        obj = obj.child(Element::new(ns.tag("add")).append(fields::statuses(add, &ns.prefix)));
    }
    if let Some(rem) = &data.rem {
        obj = obj.child(Element::new(ns.tag("rem")).append(fields::statuses(rem, &ns.prefix)));
    }
    if let Some(chg) = &data.chg {
        obj = obj.child(change(ns, chg)?);
    }

    Ok(Element::new("update").child(obj))
}

fn change(ns: &NsBinding, chg: &ContactChg) -> Result<Element> {
    let mut el = Element::new(ns.tag("chg"));
    if let Some(postal) = &chg.postal_info {
        el = el.append(fields::postal_info(postal.as_slice(), &ns.prefix));
    }
    el = details(el, ns, &chg.voice, &chg.fax, &chg.email);
    if let Some(auth) = &chg.auth_info {
        el = el.child(fields::auth_info_wrapped(auth, &ns.prefix)?);
    }
    if let Some(disclose) = &chg.disclose {
        el = el.child(fields::disclose(disclose, &ns.prefix));
    }
    Ok(el)
}

fn details(
    el: Element,
    ns: &NsBinding,
    voice: &Option<String>,
    fax: &Option<String>,
    email: &Option<String>,
) -> Element {
    el.maybe_child(
        voice
            .as_deref()
            .map(|voice| Element::new(ns.tag("voice")).text(voice)),
    )
    .maybe_child(fax.as_deref().map(|fax| Element::new(ns.tag("fax")).text(fax)))
    .maybe_child(
        email
            .as_deref()
            .map(|email| Element::new(ns.tag("email")).text(email)),
    )
}
