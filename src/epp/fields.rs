//! Field normalizers for the recurring EPP field groups
//!
//! Callers hand over loosely shaped data: a bare password or a `{pw, roid}`
//! object, a bare year count or a `{value, unit}` object, one address or a
//! list mixing strings and typed objects. Each shape is modeled as an
//! untagged union so any legal form deserializes, and each normalizer
//! converts its union into the one canonical tree fragment the command
//! schemas expect. Absent optional sub-fields are omitted from the output,
//! never emitted as empty elements.

use indexmap::IndexMap;
use serde_derive::{Deserialize, Serialize};

use crate::epp::errors::{Result, ValidationError};
use crate::epp::tree::{qname, Element};

/// A value that may legally arrive as a scalar or as an ordered sequence.
/// Normalizers canonicalize through `as_slice`, so the scalar case behaves
/// exactly like a one-element sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany<T> {
    One(T),
    Many(Vec<T>),
}

impl<T> OneOrMany<T> {
    pub fn as_slice(&self) -> &[T] {
        match self {
            OneOrMany::One(value) => std::slice::from_ref(value),
            OneOrMany::Many(values) => values.as_slice(),
        }
    }
}

impl<T> From<T> for OneOrMany<T> {
    fn from(value: T) -> OneOrMany<T> {
        OneOrMany::One(value)
    }
}

impl<T> From<Vec<T>> for OneOrMany<T> {
    fn from(values: Vec<T>) -> OneOrMany<T> {
        OneOrMany::Many(values)
    }
}

/// Authorization info: a plain password string, or an object carrying the
/// password and an optional repository object id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AuthInfo {
    Pw(String),
    Full {
        #[serde(default)]
        pw: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        roid: Option<String>,
    },
}

impl AuthInfo {
    pub fn pw(&self) -> Option<&str> {
        match self {
            AuthInfo::Pw(pw) => Some(pw),
            AuthInfo::Full { pw, .. } => pw.as_deref(),
        }
    }

    pub fn roid(&self) -> Option<&str> {
        match self {
            AuthInfo::Pw(_) => None,
            AuthInfo::Full { roid, .. } => roid.as_deref(),
        }
    }
}

/// Registration period unit. Registries accept years or months; years is
/// the default when the caller gives a bare number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PeriodUnit {
    #[serde(rename = "y")]
    Years,
    #[serde(rename = "m")]
    Months,
}

impl PeriodUnit {
    pub fn label(self) -> &'static str {
        match self {
            PeriodUnit::Years => "y",
            PeriodUnit::Months => "m",
        }
    }
}

/// Registration period: a bare count of years, or `{value, unit}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Period {
    Years(u32),
    Full {
        value: u32,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        unit: Option<PeriodUnit>,
    },
}

impl Period {
    pub fn value(&self) -> u32 {
        match self {
            Period::Years(value) => *value,
            Period::Full { value, .. } => *value,
        }
    }

    pub fn unit(&self) -> PeriodUnit {
        match self {
            Period::Years(_) => PeriodUnit::Years,
            Period::Full { unit, .. } => unit.unwrap_or(PeriodUnit::Years),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IpVersion {
    #[serde(rename = "v4")]
    V4,
    #[serde(rename = "v6")]
    V6,
}

impl IpVersion {
    pub fn label(self) -> &'static str {
        match self {
            IpVersion::V4 => "v4",
            IpVersion::V6 => "v6",
        }
    }
}

/// A glue address: a bare string classified by the colon heuristic, or an
/// `{ip, type}` object whose explicit type always wins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum HostAddr {
    Ip(String),
    Full {
        ip: String,
        #[serde(
            default,
            rename = "type",
            skip_serializing_if = "Option::is_none"
        )]
        version: Option<IpVersion>,
    },
}

impl HostAddr {
    pub fn ip(&self) -> &str {
        match self {
            HostAddr::Ip(ip) => ip,
            HostAddr::Full { ip, .. } => ip,
        }
    }

    pub fn version(&self) -> IpVersion {
        match self {
            HostAddr::Ip(ip) => classify(ip),
            HostAddr::Full { ip, version } => version.unwrap_or_else(|| classify(ip)),
        }
    }
}

// An address containing a colon can only be IPv6.
fn classify(ip: &str) -> IpVersion {
    if ip.contains(':') {
        IpVersion::V6
    } else {
        IpVersion::V4
    }
}

/// A delegated nameserver: a bare hostname, or `{host, addr}` carrying
/// glue addresses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Nameserver {
    Host(String),
    Attr {
        #[serde(default)]
        host: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        addr: Option<OneOrMany<HostAddr>>,
    },
}

/// A status code: bare code string, or `{s, lang, value}` with a reason
/// text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StatusEntry {
    Code(String),
    Full {
        s: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        lang: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        value: Option<String>,
    },
}

/// A domain contact reference: `{type, id}` in full form, or the one-key
/// map shorthand `{"admin": "P-12345"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ContactRef {
    Typed {
        #[serde(rename = "type")]
        kind: String,
        id: String,
    },
    Map(IndexMap<String, String>),
}

impl ContactRef {
    pub fn parts(&self) -> std::result::Result<(&str, &str), ValidationError> {
        match self {
            ContactRef::Typed { kind, id } => Ok((kind, id)),
            ContactRef::Map(map) => match (map.len(), map.iter().next()) {
                (1, Some((kind, id))) => Ok((kind.as_str(), id.as_str())),
                _ => Err(ValidationError::ContactRefShape),
            },
        }
    }
}

/// Contact postal info block. `type` distinguishes the internationalized
/// and localized forms.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostalInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub org: Option<String>,
    #[serde(
        default,
        rename = "type",
        skip_serializing_if = "Option::is_none"
    )]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub addr: Option<OneOrMany<Address>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub street: Option<OneOrMany<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sp: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pc: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cc: Option<String>,
}

/// Contact disclosure preferences: the flag attribute plus the list of
/// element names it applies to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Disclose {
    pub flag: u8,
    #[serde(default)]
    pub disclosing: Vec<DiscloseItem>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DiscloseItem {
    Name(String),
    Full {
        name: String,
        #[serde(
            default,
            rename = "type",
            skip_serializing_if = "Option::is_none"
        )]
        kind: Option<String>,
    },
}

impl DiscloseItem {
    fn name(&self) -> &str {
        match self {
            DiscloseItem::Name(name) => name,
            DiscloseItem::Full { name, .. } => name,
        }
    }

    fn kind(&self) -> Option<&str> {
        match self {
            DiscloseItem::Name(_) => None,
            DiscloseItem::Full { kind, .. } => kind.as_deref(),
        }
    }
}

/// Normalize authorization info into the password leaf. The `roid`
/// becomes an attribute when present; callers wrap the leaf in the
/// object-qualified `authInfo` element.
pub fn auth_info(auth: &AuthInfo, prefix: &str) -> Result<Element> {
    let pw = auth.pw().ok_or_else(|| ValidationError::MissingField {
        field: "pw".to_string(),
    })?;
    Ok(Element::new(qname(prefix, "pw"))
        .maybe_attr("roid", auth.roid())
        .text(pw))
}

/// Normalize authorization info together with its wrapper element.
pub fn auth_info_wrapped(auth: &AuthInfo, prefix: &str) -> Result<Element> {
    Ok(Element::new(qname(prefix, "authInfo")).child(auth_info(auth, prefix)?))
}

/// Normalize a registration period into `<{prefix}:period unit="..">n</..>`.
pub fn period(period: &Period, prefix: &str) -> Element {
    Element::new(qname(prefix, "period"))
        .attr("unit", period.unit().label())
        .text(period.value())
}

/// Normalize a list of glue addresses into leaves carrying the ip-version
/// attribute, preserving input order. `tag` is the qualified element name,
/// `domain:hostAddr` or `host:addr` depending on the enclosing object.
pub fn ip_addresses(addrs: &[HostAddr], tag: &str) -> Vec<Element> {
    addrs
        .iter()
        .map(|addr| {
            Element::new(tag)
                .attr("ip", addr.version().label())
                .text(addr.ip())
        })
        .collect()
}

/// Normalize a nameserver list into the `<{prefix}:ns>` group.
///
/// When every entry is a bare hostname the lightweight host-by-reference
/// form (`hostObj`) is used. As soon as any entry is an object, the whole
/// list switches to host-by-attributes (`hostAttr`) so the representation
/// stays uniform.
pub fn nameservers(list: &[Nameserver], prefix: &str) -> Result<Element> {
    let ns = Element::new(qname(prefix, "ns"));

    if list.iter().all(|e| matches!(e, Nameserver::Host(_))) {
        return Ok(ns.append(list.iter().filter_map(|entry| match entry {
            Nameserver::Host(host) => Some(Element::new(qname(prefix, "hostObj")).text(host)),
            Nameserver::Attr { .. } => None,
        })));
    }

    let mut hosts = Vec::with_capacity(list.len());
    for entry in list {
        let (host, addr) = match entry {
            Nameserver::Host(host) => (host.as_str(), None),
            Nameserver::Attr { host, addr } => (
                host.as_deref()
                    .ok_or(ValidationError::NameserverHost)?,
                addr.as_ref(),
            ),
        };

        let mut attr =
            Element::new(qname(prefix, "hostAttr")).child(Element::new(qname(prefix, "hostName")).text(host));
        if let Some(addr) = addr {
            attr = attr.append(ip_addresses(addr.as_slice(), &qname(prefix, "hostAddr")));
        }
        hosts.push(attr);
    }
    Ok(ns.append(hosts))
}

/// Normalize postal info blocks, keeping the schema order
/// `name, org, addr(street*, city, sp, pc, cc)`.
pub fn postal_info(infos: &[PostalInfo], prefix: &str) -> Vec<Element> {
    infos
        .iter()
        .map(|info| {
            let mut block = Element::new(qname(prefix, "postalInfo"))
                .maybe_attr("type", info.kind.as_deref())
                .maybe_child(
                    info.name
                        .as_deref()
                        .map(|name| Element::new(qname(prefix, "name")).text(name)),
                )
                .maybe_child(
                    info.org
                        .as_deref()
                        .map(|org| Element::new(qname(prefix, "org")).text(org)),
                );

            if let Some(addrs) = &info.addr {
                block = block.append(addrs.as_slice().iter().map(|addr| address(addr, prefix)));
            }
            block
        })
        .collect()
}

fn address(addr: &Address, prefix: &str) -> Element {
    let mut el = Element::new(qname(prefix, "addr"));
    if let Some(streets) = &addr.street {
        el = el.append(
            streets
                .as_slice()
                .iter()
                .map(|street| Element::new(qname(prefix, "street")).text(street)),
        );
    }
    el.maybe_child(
        addr.city
            .as_deref()
            .map(|city| Element::new(qname(prefix, "city")).text(city)),
    )
    .maybe_child(
        addr.sp
            .as_deref()
            .map(|sp| Element::new(qname(prefix, "sp")).text(sp)),
    )
    .maybe_child(
        addr.pc
            .as_deref()
            .map(|pc| Element::new(qname(prefix, "pc")).text(pc)),
    )
    .maybe_child(
        addr.cc
            .as_deref()
            .map(|cc| Element::new(qname(prefix, "cc")).text(cc)),
    )
}

/// Normalize disclosure preferences: the flag attribute plus one empty
/// element per disclosed item, in input order.
pub fn disclose(disclose: &Disclose, prefix: &str) -> Element {
    Element::new(qname(prefix, "disclose"))
        .attr("flag", disclose.flag)
        .append(disclose.disclosing.iter().map(|item| {
            Element::new(qname(prefix, item.name())).maybe_attr("type", item.kind())
        }))
}

/// Normalize status entries into `<{prefix}:status s=".."/>` leaves.
pub fn statuses(entries: &[StatusEntry], prefix: &str) -> Vec<Element> {
    entries
        .iter()
        .map(|entry| match entry {
            StatusEntry::Code(code) => Element::new(qname(prefix, "status")).attr("s", code),
            StatusEntry::Full { s, lang, value } => {
                let mut el = Element::new(qname(prefix, "status"))
                    .attr("s", s)
                    .maybe_attr("lang", lang.as_deref());
                if let Some(value) = value {
                    el = el.text(value);
                }
                el
            }
        })
        .collect()
}

/// Normalize contact references into `<{prefix}:contact type="..">id</..>`
/// leaves.
pub fn contact_refs(refs: &[ContactRef], prefix: &str) -> Result<Vec<Element>> {
    refs.iter()
        .map(|reference| {
            let (kind, id) = reference.parts()?;
            Ok(Element::new(qname(prefix, "contact"))
                .attr("type", kind)
                .text(id))
        })
        .collect()
}

/// Extract a required top-level field or fail naming it.
pub(crate) fn required<'a>(value: &'a Option<String>, field: &str) -> Result<&'a str> {
    match value.as_deref() {
        Some(value) => Ok(value),
        None => Err(ValidationError::MissingField {
            field: field.to_string(),
        }
        .into()),
    }
}
