//! JavaScript global objects.
//!
//! - `console`: [Console Standard](https://console.spec.whatwg.org/)
//! - one interface object per class of the page's model, e.g. `Node`, `Text`
//! - `document`: the page's document node

pub mod console;
mod document;
mod interfaces;

use std::rc::Rc;

use boa_engine::{Context, JsResult};

use crate::bridge::Bridge;

/// Register all global objects on the context.
///
/// [§ 8.1.6.1 Realms and their counterparts](https://html.spec.whatwg.org/multipage/webappapis.html#realms-settings-objects-global-objects)
///
/// "A global object is a JavaScript object that is the global object for
/// a JavaScript realm."
pub(crate) fn register_globals(context: &mut Context, bridge: &Rc<Bridge>) -> JsResult<()> {
    // STEP 1: console
    console::register_console(context)?;

    // STEP 2: interface objects, parents first
    interfaces::register_interfaces(context, bridge)?;

    // STEP 3: document, wrapped with the Document prototype
    document::register_document(context, bridge)
}
