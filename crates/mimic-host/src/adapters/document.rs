//! [§ 4.5 Interface Document](https://dom.spec.whatwg.org/#interface-document)

use mimic_dom::{DocumentKind, NodeId, NodeKind};

use super::string_arg;
use crate::descriptor::{HostObjectDescriptor, MemberDescriptor};
use crate::error::HostError;
use crate::page::Page;
use crate::value::HostValue;

pub(super) fn descriptor() -> HostObjectDescriptor {
    HostObjectDescriptor::new("Document", NodeKind::Document)
        .extends("Node")
        .everywhere()
        .member(MemberDescriptor::getter("documentElement", document_element))
        .member(MemberDescriptor::method("createTextNode", create_text_node))
        .member(MemberDescriptor::method("createComment", create_comment))
        .member(MemberDescriptor::method("createCDATASection", create_cdata_section))
}

fn document_element(page: &mut Page, _this: NodeId) -> Result<HostValue, HostError> {
    let element = page.tree().document_element();
    page.wrap_optional(element)
}

/// [§ 4.5 createTextNode](https://dom.spec.whatwg.org/#dom-document-createtextnode)
///
/// "The createTextNode(data) method steps are to return a new Text node
/// whose data is data and node document is this."
fn create_text_node(page: &mut Page, _this: NodeId, args: &[HostValue]) -> Result<HostValue, HostError> {
    let data = string_arg(args, 0, "createTextNode")?;
    let node = page.tree_mut().create_text(&data);
    page.wrap(node).map(HostValue::Object)
}

fn create_comment(page: &mut Page, _this: NodeId, args: &[HostValue]) -> Result<HostValue, HostError> {
    let data = string_arg(args, 0, "createComment")?;
    let node = page.tree_mut().create_comment(&data);
    page.wrap(node).map(HostValue::Object)
}

/// [§ 4.5 createCDATASection](https://dom.spec.whatwg.org/#dom-document-createcdatasection)
///
/// STEP 1: "If this is an HTML document, then throw a "NotSupportedError"
/// DOMException."
fn create_cdata_section(page: &mut Page, _this: NodeId, args: &[HostValue]) -> Result<HostValue, HostError> {
    if page.document_kind() == DocumentKind::Html {
        return Err(HostError::NotSupported("createCDATASection is not supported on HTML documents"));
    }
    let data = string_arg(args, 0, "createCDATASection")?;
    // STEP 2: "If data contains the string "]]>", then throw an
    // "InvalidCharacterError" DOMException."
    if data.contains("]]>") {
        return Err(HostError::InvalidCharacter("CDATA section data must not contain \"]]>\""));
    }
    let node = page.tree_mut().create_cdata_section(&data);
    page.wrap(node).map(HostValue::Object)
}
