//! Traffic between Boa values and the page's host values.
//!
//! The bridge owns the page. Native functions reach it through a weak
//! reference, borrow the page for the duration of one host call and convert
//! the result after the borrow ends. Adapters never call back into script,
//! so the page is never borrowed twice.

use std::cell::{Ref, RefCell, RefMut};
use std::collections::HashMap;
use std::rc::Rc;

use boa_engine::{Context, JsError, JsNativeError, JsObject, JsResult, JsString, JsValue};
use mimic_dom::{DomError, NodeId};
use mimic_host::{HostError, HostObject, HostValue, Page};

use crate::handle::{HostHandle, MemberCapture};

/// Shared state behind every native function of one runtime.
#[derive(Debug)]
pub(crate) struct Bridge {
    page: RefCell<Page>,
    prototypes: RefCell<HashMap<&'static str, JsObject>>,
    wrappers: RefCell<HashMap<NodeId, JsObject>>,
}

impl Bridge {
    pub(crate) fn new(page: Page) -> Rc<Self> {
        Rc::new(Self {
            page: RefCell::new(page),
            prototypes: RefCell::new(HashMap::new()),
            wrappers: RefCell::new(HashMap::new()),
        })
    }

    pub(crate) fn page(&self) -> Ref<'_, Page> {
        self.page.borrow()
    }

    pub(crate) fn page_mut(&self) -> RefMut<'_, Page> {
        self.page.borrow_mut()
    }

    pub(crate) fn add_prototype(&self, class: &'static str, prototype: JsObject) {
        let _ = self.prototypes.borrow_mut().insert(class, prototype);
    }

    pub(crate) fn prototype(&self, class: &str) -> JsResult<JsObject> {
        self.prototypes.borrow().get(class).cloned().ok_or_else(|| {
            JsNativeError::typ()
                .with_message(format!("{class} is not exposed"))
                .into()
        })
    }

    /// The JS wrapper for `object`, one per node.
    pub(crate) fn wrap(&self, object: Rc<HostObject>) -> JsResult<JsObject> {
        let node = object.node();
        let existing = self.wrappers.borrow().get(&node).cloned();
        if let Some(wrapper) = existing {
            return Ok(wrapper);
        }
        let prototype = self.prototype(object.class())?;
        let wrapper = JsObject::from_proto_and_data(prototype, HostHandle { object });
        tracing::trace!(%node, "created script wrapper");
        let _ = self.wrappers.borrow_mut().insert(node, wrapper.clone());
        Ok(wrapper)
    }

    pub(crate) fn to_js(&self, value: HostValue, context: &mut Context) -> JsResult<JsValue> {
        Ok(match value {
            HostValue::Undefined => JsValue::undefined(),
            HostValue::Null => JsValue::null(),
            HostValue::Bool(b) => JsValue::from(b),
            HostValue::Number(n) => JsValue::from(n),
            HostValue::String(s) => JsValue::from(JsString::from(s.as_str())),
            HostValue::Object(object) => self.wrap(object)?.into(),
            HostValue::Function(function) => self
                .prototype(function.class)?
                .get(JsString::from(function.name), context)?,
        })
    }
}

/// The host object behind `this`, if it is a wrapper.
pub(crate) fn host_object(value: &JsValue) -> Option<Rc<HostObject>> {
    value
        .as_object()
        .and_then(|object| object.downcast_ref::<HostHandle>().map(|handle| Rc::clone(&handle.object)))
}

/// Convert a script value for the host side. Wrappers turn back into their
/// host objects; any other object is stringified.
pub(crate) fn from_js(value: &JsValue, context: &mut Context) -> JsResult<HostValue> {
    if value.is_undefined() {
        return Ok(HostValue::Undefined);
    }
    if value.is_null() {
        return Ok(HostValue::Null);
    }
    if let Some(b) = value.as_boolean() {
        return Ok(HostValue::Bool(b));
    }
    if let Some(n) = value.as_number() {
        return Ok(HostValue::Number(n));
    }
    if let Some(object) = host_object(value) {
        return Ok(HostValue::Object(object));
    }
    Ok(HostValue::String(value.to_string(context)?.to_std_string_escaped()))
}

pub(crate) fn args_from_js(args: &[JsValue], context: &mut Context) -> JsResult<Vec<HostValue>> {
    args.iter().map(|arg| from_js(arg, context)).collect()
}

/// Map a host failure onto the matching script exception.
pub(crate) fn host_error(error: &HostError) -> JsError {
    let native = match error {
        HostError::Dom(DomError::IndexSize { .. }) => JsNativeError::range(),
        HostError::Type(_) => JsNativeError::typ(),
        _ => JsNativeError::error(),
    };
    native.with_message(error.to_string()).into()
}

impl MemberCapture {
    /// The live bridge and the wrapped receiver.
    pub(crate) fn resolve(&self, this: &JsValue) -> JsResult<(Rc<Bridge>, Rc<HostObject>)> {
        let bridge = self.bridge()?;
        let object = host_object(this).ok_or_else(|| {
            JsNativeError::typ().with_message(format!(
                "{}.{} called on an object that is not a {}",
                self.class, self.name, self.class
            ))
        })?;
        Ok((bridge, object))
    }

    pub(crate) fn bridge(&self) -> JsResult<Rc<Bridge>> {
        self.bridge
            .upgrade()
            .ok_or_else(|| JsNativeError::error().with_message("the page has been closed").into())
    }
}
