//! [§ 4.10 Interface CharacterData](https://dom.spec.whatwg.org/#interface-characterdata)

use mimic_dom::{NodeId, utf16_len};

use super::{count_arg, nullable_string, offset_arg, string_arg};
use crate::descriptor::{HostObjectDescriptor, MemberDescriptor};
use crate::error::HostError;
use crate::page::Page;
use crate::value::HostValue;

pub(super) fn descriptor() -> HostObjectDescriptor {
    HostObjectDescriptor::abstract_class("CharacterData")
        .extends("Node")
        .everywhere()
        .member(MemberDescriptor::getter("data", data))
        .member(MemberDescriptor::setter("data", set_data))
        .member(MemberDescriptor::getter("length", length))
        .member(MemberDescriptor::method("substringData", substring_data))
        .member(MemberDescriptor::method("appendData", append_data))
        .member(MemberDescriptor::method("insertData", insert_data))
        .member(MemberDescriptor::method("deleteData", delete_data))
        .member(MemberDescriptor::method("replaceData", replace_data))
}

fn data_of(page: &Page, this: NodeId) -> Result<&str, HostError> {
    page.tree()
        .character_data(this)
        .ok_or_else(|| HostError::Type("receiver is not a CharacterData node".to_string()))
}

fn data(page: &mut Page, this: NodeId) -> Result<HostValue, HostError> {
    data_of(page, this).map(HostValue::from)
}

fn set_data(page: &mut Page, this: NodeId, value: HostValue) -> Result<(), HostError> {
    page.tree_mut().set_character_data(this, &nullable_string(&value))?;
    Ok(())
}

/// "The length getter steps are to return this's length."
#[allow(clippy::cast_precision_loss)]
fn length(page: &mut Page, this: NodeId) -> Result<HostValue, HostError> {
    Ok(HostValue::Number(utf16_len(data_of(page, this)?) as f64))
}

/// [§ 4.10 substringData](https://dom.spec.whatwg.org/#dom-characterdata-substringdata)
fn substring_data(page: &mut Page, this: NodeId, args: &[HostValue]) -> Result<HostValue, HostError> {
    let offset = offset_arg(page, this, args, 0, "substringData")?;
    let count = count_arg(args, 1, "substringData")?;
    Ok(HostValue::String(page.tree().substring_data(this, offset, count)?))
}

fn append_data(page: &mut Page, this: NodeId, args: &[HostValue]) -> Result<HostValue, HostError> {
    let data = string_arg(args, 0, "appendData")?;
    page.tree_mut().append_data(this, &data)?;
    Ok(HostValue::Undefined)
}

fn insert_data(page: &mut Page, this: NodeId, args: &[HostValue]) -> Result<HostValue, HostError> {
    let offset = offset_arg(page, this, args, 0, "insertData")?;
    let data = string_arg(args, 1, "insertData")?;
    page.tree_mut().insert_data(this, offset, &data)?;
    Ok(HostValue::Undefined)
}

fn delete_data(page: &mut Page, this: NodeId, args: &[HostValue]) -> Result<HostValue, HostError> {
    let offset = offset_arg(page, this, args, 0, "deleteData")?;
    let count = count_arg(args, 1, "deleteData")?;
    page.tree_mut().delete_data(this, offset, count)?;
    Ok(HostValue::Undefined)
}

/// [§ 4.10 replaceData](https://dom.spec.whatwg.org/#dom-characterdata-replacedata)
fn replace_data(page: &mut Page, this: NodeId, args: &[HostValue]) -> Result<HostValue, HostError> {
    let offset = offset_arg(page, this, args, 0, "replaceData")?;
    let count = count_arg(args, 1, "replaceData")?;
    let data = string_arg(args, 2, "replaceData")?;
    page.tree_mut().replace_data(this, offset, count, &data)?;
    Ok(HostValue::Undefined)
}
