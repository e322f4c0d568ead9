//! [§ 4.4 Interface Node](https://dom.spec.whatwg.org/#interface-node)
//!
//! The root of the class chain. Members here work on every node kind.

use mimic_dom::{DomError, NodeId, NodeKind};

use super::{node_arg, nullable_string, optional_node_arg};
use crate::browser::BrowserVendor::{Chrome, Edge, Firefox, InternetExplorer};
use crate::descriptor::{HostObjectDescriptor, MemberDescriptor};
use crate::error::HostError;
use crate::page::Page;
use crate::rules::RuleClause;
use crate::value::HostValue;

pub(super) fn descriptor() -> HostObjectDescriptor {
    HostObjectDescriptor::abstract_class("Node")
        .everywhere()
        .member(MemberDescriptor::constant("ELEMENT_NODE", 1.0))
        .member(MemberDescriptor::constant("TEXT_NODE", 3.0))
        .member(MemberDescriptor::constant("CDATA_SECTION_NODE", 4.0))
        .member(MemberDescriptor::constant("COMMENT_NODE", 8.0))
        .member(MemberDescriptor::constant("DOCUMENT_NODE", 9.0))
        .member(MemberDescriptor::getter("nodeType", node_type))
        .member(MemberDescriptor::getter("nodeName", node_name))
        .member(MemberDescriptor::getter("nodeValue", node_value))
        .member(MemberDescriptor::setter("nodeValue", set_node_value))
        .member(MemberDescriptor::getter("parentNode", parent_node))
        .member(MemberDescriptor::getter("firstChild", first_child))
        .member(MemberDescriptor::getter("lastChild", last_child))
        .member(MemberDescriptor::getter("previousSibling", previous_sibling))
        .member(MemberDescriptor::getter("nextSibling", next_sibling))
        .member(MemberDescriptor::getter("ownerDocument", owner_document))
        .member(MemberDescriptor::getter("textContent", text_content).visible_in(text_content_browsers()))
        .member(MemberDescriptor::setter("textContent", set_text_content).visible_in(text_content_browsers()))
        .member(MemberDescriptor::method("hasChildNodes", has_child_nodes))
        .member(MemberDescriptor::method("appendChild", append_child))
        .member(MemberDescriptor::method("insertBefore", insert_before))
        .member(MemberDescriptor::method("removeChild", remove_child))
}

/// `textContent` arrived in IE 9.
fn text_content_browsers() -> [RuleClause; 4] {
    [
        RuleClause::since(InternetExplorer, 9),
        RuleClause::any(Edge),
        RuleClause::any(Firefox),
        RuleClause::any(Chrome),
    ]
}

fn kind_of(page: &Page, this: NodeId) -> Result<NodeKind, HostError> {
    page.tree()
        .kind(this)
        .ok_or_else(|| DomError::NotFound(this).into())
}

fn node_type(page: &mut Page, this: NodeId) -> Result<HostValue, HostError> {
    Ok(HostValue::Number(f64::from(kind_of(page, this)?.node_type_code())))
}

fn node_name(page: &mut Page, this: NodeId) -> Result<HostValue, HostError> {
    Ok(page.tree().node_name(this).map_or(HostValue::Null, HostValue::String))
}

/// [§ 4.4 nodeValue](https://dom.spec.whatwg.org/#dom-node-nodevalue)
///
/// "CharacterData: This's data. Otherwise: Null."
fn node_value(page: &mut Page, this: NodeId) -> Result<HostValue, HostError> {
    Ok(page
        .tree()
        .character_data(this)
        .map_or(HostValue::Null, HostValue::from))
}

fn set_node_value(page: &mut Page, this: NodeId, value: HostValue) -> Result<(), HostError> {
    if kind_of(page, this)?.is_character_data() {
        page.tree_mut().set_character_data(this, &nullable_string(&value))?;
    }
    Ok(())
}

fn parent_node(page: &mut Page, this: NodeId) -> Result<HostValue, HostError> {
    let parent = page.tree().parent(this);
    page.wrap_optional(parent)
}

fn first_child(page: &mut Page, this: NodeId) -> Result<HostValue, HostError> {
    let child = page.tree().first_child(this);
    page.wrap_optional(child)
}

fn last_child(page: &mut Page, this: NodeId) -> Result<HostValue, HostError> {
    let child = page.tree().last_child(this);
    page.wrap_optional(child)
}

fn previous_sibling(page: &mut Page, this: NodeId) -> Result<HostValue, HostError> {
    let sibling = page.tree().prev_sibling(this);
    page.wrap_optional(sibling)
}

fn next_sibling(page: &mut Page, this: NodeId) -> Result<HostValue, HostError> {
    let sibling = page.tree().next_sibling(this);
    page.wrap_optional(sibling)
}

/// [§ 4.4 ownerDocument](https://dom.spec.whatwg.org/#dom-node-ownerdocument)
///
/// "return null, if this is a document; otherwise this's node document."
fn owner_document(page: &mut Page, this: NodeId) -> Result<HostValue, HostError> {
    if kind_of(page, this)? == NodeKind::Document {
        return Ok(HostValue::Null);
    }
    page.wrap_optional(Some(page.tree().root()))
}

fn text_content(page: &mut Page, this: NodeId) -> Result<HostValue, HostError> {
    Ok(page
        .tree()
        .text_content(this)
        .map_or(HostValue::Null, HostValue::String))
}

fn set_text_content(page: &mut Page, this: NodeId, value: HostValue) -> Result<(), HostError> {
    page.tree_mut().set_text_content(this, &nullable_string(&value))?;
    Ok(())
}

fn has_child_nodes(page: &mut Page, this: NodeId, _args: &[HostValue]) -> Result<HostValue, HostError> {
    Ok(HostValue::Bool(!page.tree().children(this).is_empty()))
}

/// [§ 4.4 appendChild](https://dom.spec.whatwg.org/#dom-node-appendchild)
fn append_child(page: &mut Page, this: NodeId, args: &[HostValue]) -> Result<HostValue, HostError> {
    let node = node_arg(args, 0, "appendChild")?;
    page.tree_mut().insert_before(this, node, None)?;
    page.wrap(node).map(HostValue::Object)
}

/// [§ 4.4 insertBefore](https://dom.spec.whatwg.org/#dom-node-insertbefore)
fn insert_before(page: &mut Page, this: NodeId, args: &[HostValue]) -> Result<HostValue, HostError> {
    let node = node_arg(args, 0, "insertBefore")?;
    let child = optional_node_arg(args, 1, "insertBefore")?;
    page.tree_mut().insert_before(this, node, child)?;
    page.wrap(node).map(HostValue::Object)
}

/// [§ 4.4 removeChild](https://dom.spec.whatwg.org/#dom-node-removechild)
fn remove_child(page: &mut Page, this: NodeId, args: &[HostValue]) -> Result<HostValue, HostError> {
    let child = node_arg(args, 0, "removeChild")?;
    page.tree_mut().remove_child(this, child)?;
    page.wrap(child).map(HostValue::Object)
}
