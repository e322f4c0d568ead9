//! The `document` global.
//!
//! [§ 7.2 The Window object](https://html.spec.whatwg.org/multipage/nav-history-apis.html#dom-document-2)
//!
//! "The document getter steps are to return this's associated Document."

use std::rc::Rc;

use boa_engine::{Context, JsResult, js_string, property::Attribute};

use crate::bridge::{Bridge, host_error};

/// Expose the page's document node. Must run after the interfaces exist,
/// since the wrapper takes the `Document` prototype.
pub(super) fn register_document(context: &mut Context, bridge: &Rc<Bridge>) -> JsResult<()> {
    let document = bridge.page_mut().document().map_err(|e| host_error(&e))?;
    let document = bridge.wrap(document)?;
    context.register_global_property(js_string!("document"), document, Attribute::ENUMERABLE)
}
