//! JavaScript bindings for Mimic pages.
//!
//! Uses [Boa](https://boajs.dev/) as the JavaScript engine. A [`JsRuntime`]
//! owns one [`Page`] and exposes it to scripts: a `document` global, an
//! interface object for every class visible to the page's browser, and
//! `console`.
//!
//! # Example
//!
//! ```
//! use mimic_host::{BrowserIdentity, Page, PageConfig};
//! use mimic_js::JsRuntime;
//!
//! let page = Page::new(PageConfig::default().browser(BrowserIdentity::IE_11));
//! let mut runtime = JsRuntime::new(page).unwrap();
//! let value = runtime
//!     .execute("var t = document.createTextNode('Hello World'); t.splitText(5).data")
//!     .unwrap();
//! assert_eq!(value.as_string().unwrap().to_std_string_escaped(), " World");
//! ```
//!
//! Members the simulated browser lacks are simply not defined, so
//! `typeof t.wholeText` is `"undefined"` under IE 8.

mod bridge;
mod globals;
mod handle;

use std::cell::{Ref, RefMut};
use std::rc::Rc;

use boa_engine::{Context, JsError, JsValue, Source};
use mimic_host::Page;

use crate::bridge::Bridge;

pub use crate::globals::console::TARGET as CONSOLE_TARGET;

/// JavaScript runtime for one page.
///
/// [§ 8.1.6 JavaScript execution context](https://html.spec.whatwg.org/multipage/webappapis.html)
///
/// Each page has its own JavaScript runtime with its own global object.
pub struct JsRuntime {
    /// The Boa JavaScript context.
    context: Context,
    bridge: Rc<Bridge>,
}

impl JsRuntime {
    /// Create a runtime for `page` with its globals registered.
    ///
    /// # Errors
    ///
    /// Returns `JsError` if a global cannot be defined.
    pub fn new(page: Page) -> Result<Self, JsError> {
        let mut context = Context::default();
        let bridge = Bridge::new(page);
        globals::register_globals(&mut context, &bridge)?;
        tracing::debug!(browser = %bridge.page().browser(), "script runtime ready");
        Ok(Self { context, bridge })
    }

    /// Execute JavaScript source code.
    ///
    /// [§ 4.12.1.1 Processing model](https://html.spec.whatwg.org/multipage/scripting.html#script-processing-model)
    ///
    /// # Errors
    ///
    /// Returns `JsError` if the JavaScript code contains syntax errors or
    /// throws an uncaught exception.
    pub fn execute(&mut self, source: &str) -> Result<JsValue, JsError> {
        self.context.eval(Source::from_bytes(source))
    }

    /// The page scripts run against.
    ///
    /// # Panics
    ///
    /// Panics if called from inside a host call, which cannot happen from
    /// outside the runtime.
    #[must_use]
    pub fn page(&self) -> Ref<'_, Page> {
        self.bridge.page()
    }

    /// Mutable access to the page, e.g. to build a tree before running
    /// scripts.
    ///
    /// # Panics
    ///
    /// Same as [`JsRuntime::page`].
    #[must_use]
    pub fn page_mut(&self) -> RefMut<'_, Page> {
        self.bridge.page_mut()
    }

    /// The Boa context, for converting returned values.
    pub const fn context(&mut self) -> &mut Context {
        &mut self.context
    }
}
