//! Session command builders: hello, login, logout
//!
//! Session commands live directly in the protocol namespace, so unlike the
//! object commands they carry no prefixed payload element.

use serde_derive::{Deserialize, Serialize};

use crate::epp::config::ProviderConfig;
use crate::epp::errors::Result;
use crate::epp::extensions;
use crate::epp::fields::required;
use crate::epp::tree::Element;

/// Login credentials and session options. Only `login` and `password` are
/// required; the service lists default to the provider's declared object
/// and extension namespaces.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Login {
    #[serde(default)]
    pub login: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(
        default,
        rename = "newPassword",
        skip_serializing_if = "Option::is_none"
    )]
    pub new_password: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lang: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub services: Option<Vec<String>>,
    #[serde(
        default,
        rename = "serviceExtensions",
        skip_serializing_if = "Option::is_none"
    )]
    pub service_extensions: Option<Vec<String>>,
}

/// Build the `<login>` body: credentials, protocol options and the service
/// menu the client intends to use.
pub fn login(config: &ProviderConfig, data: &Login) -> Result<Element> {
    let cl_id = required(&data.login, "login")?;
    let pw = required(&data.password, "password")?;

    let body = Element::new("login")
        .child(Element::new("clID").text(cl_id))
        .child(Element::new("pw").text(pw))
        .maybe_child(
            data.new_password
                .as_deref()
                .map(|new_pw| Element::new("newPW").text(new_pw)),
        )
        .child(
            Element::new("options")
                .child(Element::new("version").text(data.version.as_deref().unwrap_or("1.0")))
                .child(Element::new("lang").text(data.lang.as_deref().unwrap_or("en"))),
        );

    let object_uris: Vec<String> = match &data.services {
        Some(list) => list.clone(),
        None => ["domain", "contact", "host"]
            .iter()
            .filter_map(|prefix| config.namespace(prefix).map(|ns| ns.xmlns.clone()))
            .collect(),
    };
    let ext_uris: Vec<String> = match &data.service_extensions {
        Some(list) => list.clone(),
        None => config
            .extensions
            .iter()
            .filter_map(|id| extensions::prefix_for(id))
            .filter_map(|prefix| config.namespace(prefix).map(|ns| ns.xmlns.clone()))
            .collect(),
    };

    let mut svcs = Element::new("svcs").append(
        object_uris
            .iter()
            .map(|uri| Element::new("objURI").text(uri)),
    );
    if !ext_uris.is_empty() {
        svcs = svcs.child(
            Element::new("svcExtension")
                .append(ext_uris.iter().map(|uri| Element::new("extURI").text(uri))),
        );
    }

    Ok(body.child(svcs))
}

/// The `<logout/>` body.
pub fn logout() -> Element {
    Element::new("logout")
}
