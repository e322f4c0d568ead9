//! [§ 4.14 Interface Comment](https://dom.spec.whatwg.org/#interface-comment)

use mimic_dom::NodeKind;

use super::optional_string_arg;
use crate::browser::BrowserVendor::{Chrome, Edge, Firefox};
use crate::descriptor::{HostObjectDescriptor, MemberDescriptor};
use crate::error::HostError;
use crate::page::Page;
use crate::rules::RuleClause;
use crate::value::HostValue;

pub(super) fn descriptor() -> HostObjectDescriptor {
    HostObjectDescriptor::new("Comment", NodeKind::Comment)
        .extends("CharacterData")
        .everywhere()
        .member(MemberDescriptor::constructor(construct).visible_in([
            RuleClause::any(Edge),
            RuleClause::since(Firefox, 24),
            RuleClause::since(Chrome, 29),
        ]))
}

/// [§ 4.14 new Comment(data)](https://dom.spec.whatwg.org/#dom-comment-comment)
fn construct(page: &mut Page, args: &[HostValue]) -> Result<HostValue, HostError> {
    let data = optional_string_arg(args, 0);
    let node = page.tree_mut().create_comment(&data);
    page.wrap(node).map(HostValue::Object)
}
