//! Host object adapters.
//!
//! Each module declares one class: its descriptor (members, rules) and the
//! functions implementing those members. The functions delegate to the
//! node tree; node-layer errors pass through untouched.

mod cdata_section;
mod character_data;
mod comment;
mod document;
mod element;
mod node;
mod text;

use mimic_dom::{DomError, NodeId};

use crate::catalog::{Catalog, CatalogBuilder};
use crate::error::{CatalogError, HostError};
use crate::page::Page;
use crate::value::HostValue;

/// Register every built-in class, parents first.
pub(crate) fn standard_catalog() -> Result<Catalog, CatalogError> {
    let mut builder = CatalogBuilder::new();
    builder.register(node::descriptor())?;
    builder.register(element::descriptor())?;
    builder.register(document::descriptor())?;
    builder.register(character_data::descriptor())?;
    builder.register(text::descriptor())?;
    builder.register(cdata_section::descriptor())?;
    builder.register(comment::descriptor())?;
    Ok(builder.finish())
}

/// Argument `index`, or a `TypeError` naming the method when it is missing.
fn required<'a>(args: &'a [HostValue], index: usize, method: &str) -> Result<&'a HostValue, HostError> {
    args.get(index).ok_or_else(|| {
        HostError::Type(format!(
            "{method}: {} argument required, but only {} present",
            index + 1,
            args.len()
        ))
    })
}

/// WebIDL `DOMString` argument.
fn string_arg(args: &[HostValue], index: usize, method: &str) -> Result<String, HostError> {
    required(args, index, method).map(HostValue::to_js_string)
}

/// Optional `DOMString` argument defaulting to the empty string.
fn optional_string_arg(args: &[HostValue], index: usize) -> String {
    args.get(index)
        .filter(|value| !value.is_undefined())
        .map(HostValue::to_js_string)
        .unwrap_or_default()
}

/// `[LegacyNullToEmptyString]`-style conversion used by `nodeValue`,
/// `textContent` and `data` setters.
fn nullable_string(value: &HostValue) -> String {
    if matches!(value, HostValue::Null) {
        String::new()
    } else {
        value.to_js_string()
    }
}

/// An `unsigned long` offset into the character data of `this`.
///
/// Negative values are reported as the node layer's `IndexSizeError`, the
/// same failure an out-of-range offset produces. Other values wrap modulo
/// 2^32 like a WebIDL `unsigned long`.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn offset_arg(page: &Page, this: NodeId, args: &[HostValue], index: usize, method: &str) -> Result<usize, HostError> {
    let n = required(args, index, method)?.to_number();
    let n = if n.is_finite() { n.trunc() } else { 0.0 };
    if n < 0.0 {
        return Err(DomError::IndexSize {
            offset: n as i64,
            length: page.tree().length(this),
        }
        .into());
    }
    Ok(n.rem_euclid(4_294_967_296.0) as usize)
}

/// An `unsigned long` count, wrapped modulo 2^32 like WebIDL does. A
/// negative count therefore reaches the end of the data.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn count_arg(args: &[HostValue], index: usize, method: &str) -> Result<usize, HostError> {
    let n = required(args, index, method)?.to_number();
    if !n.is_finite() {
        return Ok(0);
    }
    Ok(n.trunc().rem_euclid(4_294_967_296.0) as usize)
}

/// The node behind a `Node` argument.
fn node_arg(args: &[HostValue], index: usize, method: &str) -> Result<NodeId, HostError> {
    match required(args, index, method)? {
        HostValue::Object(object) => Ok(object.node()),
        _ => Err(HostError::Type(format!(
            "{method}: parameter {} is not of type 'Node'",
            index + 1
        ))),
    }
}

/// A `Node?` argument: `null`/`undefined` map to `None`.
fn optional_node_arg(args: &[HostValue], index: usize, method: &str) -> Result<Option<NodeId>, HostError> {
    match args.get(index) {
        None => Ok(None),
        Some(value) if value.is_nullish() => Ok(None),
        Some(_) => node_arg(args, index, method).map(Some),
    }
}
