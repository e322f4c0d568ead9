//! [§ 4.9 Interface Element](https://dom.spec.whatwg.org/#interface-element)
//!
//! Only what text scripts need: elements are containers here.

use mimic_dom::{NodeId, NodeKind};

use crate::descriptor::{HostObjectDescriptor, MemberDescriptor};
use crate::error::HostError;
use crate::page::Page;
use crate::value::HostValue;

pub(super) fn descriptor() -> HostObjectDescriptor {
    HostObjectDescriptor::new("Element", NodeKind::Element)
        .extends("Node")
        .everywhere()
        .member(MemberDescriptor::getter("tagName", tag_name))
}

/// [§ 4.9 tagName](https://dom.spec.whatwg.org/#dom-element-tagname)
fn tag_name(page: &mut Page, this: NodeId) -> Result<HostValue, HostError> {
    page.tree()
        .as_element(this)
        .map(|element| HostValue::from(element.tag_name.as_str()))
        .ok_or_else(|| HostError::Type("receiver is not an Element".to_string()))
}
