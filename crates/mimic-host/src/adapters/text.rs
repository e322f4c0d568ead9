//! [§ 4.11 Interface Text](https://dom.spec.whatwg.org/#interface-text)
//!
//! One descriptor covers every browser generation. Older engines differ in
//! which members exist, and that is expressed through member rules:
//!
//! - `wholeText` arrived with IE 9.
//! - `replaceWholeText` is DOM Level 3 and only IE 9 through 11 kept it.
//! - `text` is an IE 11 leftover of the MSXML node interface. It reads as
//!   `wholeText` in XML documents and as `undefined` everywhere else.

use mimic_dom::{DocumentKind, NodeId, NodeKind};

use super::{offset_arg, optional_string_arg, string_arg};
use crate::browser::BrowserVendor::{Chrome, Edge, Firefox, InternetExplorer};
use crate::descriptor::{HostObjectDescriptor, MemberDescriptor};
use crate::error::HostError;
use crate::page::Page;
use crate::rules::RuleClause;
use crate::value::HostValue;

pub(super) fn descriptor() -> HostObjectDescriptor {
    HostObjectDescriptor::new("Text", NodeKind::Text)
        .extends("CharacterData")
        .everywhere()
        .member(MemberDescriptor::constructor(construct).visible_in([
            RuleClause::any(Edge),
            RuleClause::since(Firefox, 24),
            RuleClause::since(Chrome, 28),
        ]))
        .member(MemberDescriptor::method("splitText", split_text))
        .member(MemberDescriptor::getter("wholeText", whole_text).visible_in([
            RuleClause::since(InternetExplorer, 9),
            RuleClause::any(Edge),
            RuleClause::any(Firefox),
            RuleClause::any(Chrome),
        ]))
        .member(MemberDescriptor::getter("text", legacy_text).visible_in([RuleClause::only(InternetExplorer, 11)]))
        .member(
            MemberDescriptor::method("replaceWholeText", replace_whole_text)
                .visible_in([RuleClause::between(InternetExplorer, 9, 11)]),
        )
}

/// [§ 4.11 new Text(data)](https://dom.spec.whatwg.org/#dom-text-text)
///
/// "The new Text(data) constructor steps are to set this's data to data and
/// this's node document to current global object's associated Document."
fn construct(page: &mut Page, args: &[HostValue]) -> Result<HostValue, HostError> {
    let data = optional_string_arg(args, 0);
    let node = page.tree_mut().create_text(&data);
    page.wrap(node).map(HostValue::Object)
}

/// [§ 4.11 splitText](https://dom.spec.whatwg.org/#dom-text-splittext)
///
/// "The splitText(offset) method steps are to return the result of
/// splitting this with offset offset."
fn split_text(page: &mut Page, this: NodeId, args: &[HostValue]) -> Result<HostValue, HostError> {
    let offset = offset_arg(page, this, args, 0, "splitText")?;
    let fragment = page.tree_mut().split_text(this, offset)?;
    page.wrap(fragment).map(HostValue::Object)
}

/// [§ 4.11 wholeText](https://dom.spec.whatwg.org/#dom-text-wholetext)
fn whole_text(page: &mut Page, this: NodeId) -> Result<HostValue, HostError> {
    Ok(HostValue::String(page.tree().whole_text(this)?))
}

fn legacy_text(page: &mut Page, this: NodeId) -> Result<HostValue, HostError> {
    match page.document_kind() {
        DocumentKind::Xml => whole_text(page, this),
        DocumentKind::Html => Ok(HostValue::Undefined),
    }
}

/// [DOM Level 3 replaceWholeText](https://www.w3.org/TR/DOM-Level-3-Core/core.html#Text3-replaceWholeText)
///
/// "Replaces the text of the current node and all logically-adjacent text
/// nodes with the specified text. All logically-adjacent text nodes are
/// removed including the current node unless it was the recipient of the
/// replacement text."
fn replace_whole_text(page: &mut Page, this: NodeId, args: &[HostValue]) -> Result<HostValue, HostError> {
    let text = string_arg(args, 0, "replaceWholeText")?;
    let kept = page.tree_mut().replace_whole_text(this, &text)?;
    page.wrap_optional(kept)
}
