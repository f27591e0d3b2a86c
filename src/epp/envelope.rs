//! Outer protocol envelope shared by every command builder
//!
//! Wraps a command body (and any extension payloads) in the
//! `<epp><command>..</command></epp>` structure, placing the extension
//! section and the caller-supplied transaction id where the schema wants
//! them.

use crate::epp::config::NsBinding;
use crate::epp::tree::Element;

const XSI_XMLNS: &str = "http://www.w3.org/2001/XMLSchema-instance";

fn epp_root(epp: &NsBinding) -> Element {
    Element::new("epp")
        .attr("xmlns", &epp.xmlns)
        .attr("xmlns:xsi", XSI_XMLNS)
        .maybe_attr("xsi:schemaLocation", epp.schema_location.as_deref())
}

/// Wrap a command body in the full envelope. The `<extension>` section is
/// emitted only when extension payloads are present, and `<clTRID>` only
/// when the transaction id is non-empty. The transaction id is copied
/// verbatim; nothing here generates ids.
pub fn command(
    epp: &NsBinding,
    body: Element,
    extensions: Vec<Element>,
    cl_trid: &str,
) -> Element {
    let mut command = Element::new("command").child(body);
    if !extensions.is_empty() {
        command = command.child(Element::new("extension").append(extensions));
    }
    if !cl_trid.is_empty() {
        command = command.child(Element::new("clTRID").text(cl_trid));
    }
    epp_root(epp).child(command)
}

/// The `<hello/>` envelope. Hello carries no command wrapper and no
/// transaction id.
pub fn hello(epp: &NsBinding) -> Element {
    epp_root(epp).child(Element::new("hello"))
}

/// Object-qualified payload element for one command verb, e.g.
/// `<domain:create xmlns:domain=".." xsi:schemaLocation="..">`.
pub fn object(ns: &NsBinding, verb: &str) -> Element {
    Element::new(ns.tag(verb))
        .attr(format!("xmlns:{}", ns.prefix), &ns.xmlns)
        .maybe_attr("xsi:schemaLocation", ns.schema_location.as_deref())
}
