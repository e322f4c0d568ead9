//! Interface objects and prototypes for the classes of the page's model.
//!
//! [§ 3.7 Interface object](https://webidl.spec.whatwg.org/#interface-object)
//!
//! Each visible class gets a prototype object carrying its visible members
//! and a global interface object. The prototype chain follows the model's
//! resolved parents, so a hidden class is simply skipped. Members the model
//! leaves out are never defined, which makes them read as `undefined`
//! through Boa's ordinary lookup.
//!
//! Interface objects are always functions, so `instanceof` works for every
//! visible class. Their own prototype chain mirrors the class chain, which
//! makes inherited constants such as `Text.TEXT_NODE` reachable.

use std::collections::HashMap;
use std::rc::Rc;
use std::sync::Arc;

use boa_engine::object::{FunctionObjectBuilder, ObjectInitializer};
use boa_engine::property::{Attribute, PropertyDescriptor};
use boa_engine::{Context, JsArgs, JsNativeError, JsObject, JsResult, JsString, JsValue, NativeFunction, js_string};
use mimic_host::{Behavior, Lookup, MemberDescriptor, MemberKind, ResolvedClass, ResolvedMember};

use crate::bridge::{Bridge, args_from_js, from_js, host_error};
use crate::handle::MemberCapture;

type Native = fn(&JsValue, &[JsValue], &MemberCapture, &mut Context) -> JsResult<JsValue>;

/// Define the prototype and interface object of every class in the model.
///
/// Classes arrive parents first, so each parent prototype exists before its
/// children need it.
pub(super) fn register_interfaces(context: &mut Context, bridge: &Rc<Bridge>) -> JsResult<()> {
    let model = Arc::clone(bridge.page().model());
    let mut interfaces: HashMap<&'static str, JsObject> = HashMap::new();
    for class in &model.classes {
        let prototype = ObjectInitializer::new(context).build();
        let interface = interface_object(context, bridge, class);
        if let Some(parent) = class.parent {
            let _ = prototype.set_prototype(Some(bridge.prototype(parent)?));
            // [§ 3.7.1 Interface object](https://webidl.spec.whatwg.org/#interface-object)
            // "its [[Prototype]] internal slot is the interface object of
            // the inherited interface."
            if let Some(parent_interface) = interfaces.get(parent) {
                let _ = interface.set_prototype(Some(parent_interface.clone()));
            }
        }

        for member in &class.members {
            define_member(context, bridge, class, member, &prototype, &interface)?;
        }

        // [§ 3.7.3 Interface prototype object](https://webidl.spec.whatwg.org/#interface-prototype-object)
        let _ = interface.define_property_or_throw(
            js_string!("prototype"),
            PropertyDescriptor::builder()
                .value(prototype.clone())
                .writable(false)
                .enumerable(false)
                .configurable(false)
                .build(),
            context,
        )?;
        let _ = prototype.define_property_or_throw(
            js_string!("constructor"),
            PropertyDescriptor::builder()
                .value(interface.clone())
                .writable(true)
                .enumerable(false)
                .configurable(true)
                .build(),
            context,
        )?;

        context.register_global_property(
            JsString::from(class.name),
            interface.clone(),
            Attribute::WRITABLE | Attribute::CONFIGURABLE,
        )?;
        let _ = interfaces.insert(class.name, interface);
        bridge.add_prototype(class.name, prototype);
        tracing::trace!(class = class.name, "registered interface");
    }
    Ok(())
}

/// The interface object of `class`: a function in either case. Without a
/// visible constructor, calling it or using `new` on it throws
/// `TypeError: Illegal constructor`.
fn interface_object(context: &mut Context, bridge: &Rc<Bridge>, class: &ResolvedClass) -> JsObject {
    let capture = capture(bridge, class, MemberDescriptor::CONSTRUCTOR);
    let has_constructor = class
        .own_member(MemberDescriptor::CONSTRUCTOR, MemberKind::Constructor)
        .is_some();
    let function: Native = if has_constructor { construct } else { illegal_constructor };
    native_function(context, capture, function, JsString::from(class.name), true)
}

fn define_member(
    context: &mut Context,
    bridge: &Rc<Bridge>,
    class: &ResolvedClass,
    member: &ResolvedMember,
    prototype: &JsObject,
    interface: &JsObject,
) -> JsResult<()> {
    let name = member.name;
    let descriptor = match member.kind {
        MemberKind::Getter | MemberKind::Setter => {
            // Getter and setter share one accessor, defined once at the
            // getter when there is one.
            let getter = class.own_member(name, MemberKind::Getter);
            let setter = class.own_member(name, MemberKind::Setter);
            let first = getter.or(setter).map(|m| m.kind);
            if first != Some(member.kind) {
                return Ok(());
            }
            let mut accessor = PropertyDescriptor::builder().enumerable(true).configurable(true);
            if getter.is_some() {
                let label = JsString::from(format!("get {name}").as_str());
                accessor = accessor.get(native_function(context, capture(bridge, class, name), get, label, false));
            }
            if setter.is_some() {
                let label = JsString::from(format!("set {name}").as_str());
                accessor = accessor.set(native_function(context, capture(bridge, class, name), set, label, false));
            }
            accessor.build()
        }
        MemberKind::Method => {
            let function = native_function(context, capture(bridge, class, name), call, JsString::from(name), false);
            PropertyDescriptor::builder()
                .value(function)
                .writable(true)
                .enumerable(true)
                .configurable(true)
                .build()
        }
        MemberKind::Constant => {
            let Behavior::Constant(number) = member.behavior else {
                return Ok(());
            };
            // [§ 3.7.6 Constants](https://webidl.spec.whatwg.org/#es-constants)
            // "a corresponding property exists on the interface object and
            // the interface prototype object."
            let _ = interface.define_property_or_throw(JsString::from(name), constant(number), context)?;
            constant(number)
        }
        MemberKind::Constructor | MemberKind::Class => return Ok(()),
    };
    let _ = prototype.define_property_or_throw(JsString::from(name), descriptor, context)?;
    Ok(())
}

fn constant(number: f64) -> PropertyDescriptor {
    PropertyDescriptor::builder()
        .value(number)
        .writable(false)
        .enumerable(true)
        .configurable(false)
        .build()
}

fn capture(bridge: &Rc<Bridge>, class: &ResolvedClass, name: &'static str) -> MemberCapture {
    MemberCapture {
        bridge: Rc::downgrade(bridge),
        class: class.name,
        name,
    }
}

fn native_function(
    context: &mut Context,
    capture: MemberCapture,
    function: Native,
    name: JsString,
    constructor: bool,
) -> JsObject {
    let native = NativeFunction::from_copy_closure_with_captures(function, capture);
    FunctionObjectBuilder::new(context.realm(), native)
        .name(name)
        .length(0)
        .constructor(constructor)
        .build()
        .into()
}

fn get(this: &JsValue, _args: &[JsValue], capture: &MemberCapture, context: &mut Context) -> JsResult<JsValue> {
    let (bridge, object) = capture.resolve(this)?;
    let value = bridge
        .page_mut()
        .get_member(&object, capture.name)
        .map_err(|e| host_error(&e))?;
    match value {
        Lookup::Found(value) => bridge.to_js(value, context),
        Lookup::NotFound => Ok(JsValue::undefined()),
    }
}

fn set(this: &JsValue, args: &[JsValue], capture: &MemberCapture, context: &mut Context) -> JsResult<JsValue> {
    let (bridge, object) = capture.resolve(this)?;
    let value = from_js(args.get_or_undefined(0), context)?;
    let _ = bridge
        .page_mut()
        .set_member(&object, capture.name, value)
        .map_err(|e| host_error(&e))?;
    Ok(JsValue::undefined())
}

fn call(this: &JsValue, args: &[JsValue], capture: &MemberCapture, context: &mut Context) -> JsResult<JsValue> {
    let (bridge, object) = capture.resolve(this)?;
    let args = args_from_js(args, context)?;
    let result = bridge
        .page_mut()
        .call_method(&object, capture.name, &args)
        .map_err(|e| host_error(&e))?;
    match result {
        Lookup::Found(value) => bridge.to_js(value, context),
        Lookup::NotFound => Err(JsNativeError::typ()
            .with_message(format!("{}.{} is not a function", capture.class, capture.name))
            .into()),
    }
}

fn construct(_this: &JsValue, args: &[JsValue], capture: &MemberCapture, context: &mut Context) -> JsResult<JsValue> {
    let bridge = capture.bridge()?;
    let args = args_from_js(args, context)?;
    let result = bridge
        .page_mut()
        .construct(capture.class, &args)
        .map_err(|e| host_error(&e))?;
    match result {
        Lookup::Found(value) => bridge.to_js(value, context),
        Lookup::NotFound => Err(JsNativeError::typ()
            .with_message(format!("{} is not a constructor", capture.class))
            .into()),
    }
}

fn illegal_constructor(
    _this: &JsValue,
    _args: &[JsValue],
    _capture: &MemberCapture,
    _context: &mut Context,
) -> JsResult<JsValue> {
    Err(JsNativeError::typ().with_message("Illegal constructor").into())
}
