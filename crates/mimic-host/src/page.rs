//! One scripted document.
//!
//! A [`Page`] ties a node tree to a browser identity: it owns the tree, the
//! object model for that identity and the binding registry. Scripting
//! engines talk to the page; the page routes each request through the
//! model to the adapter implementing the member.
//!
//! Script execution within one page is single-threaded, so the page uses
//! `Rc` and needs no locking. Separate pages may live on separate threads
//! and share models through the [`ModelBuilder`].

use std::env;
use std::rc::Rc;
use std::sync::Arc;

use mimic_dom::{DocumentKind, DomTree, NodeId};

use crate::binding::{BindingRegistry, HostObject};
use crate::browser::BrowserIdentity;
use crate::catalog::Catalog;
use crate::descriptor::{Behavior, MemberDescriptor};
use crate::error::{ConfigError, HostError};
use crate::model::{ModelBuilder, ObjectModel};
use crate::rules::MemberKind;
use crate::value::{FunctionRef, HostValue, Lookup};

/// How to set up a page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PageConfig {
    /// Simulated browser.
    pub browser: BrowserIdentity,
    /// Kind of the document.
    pub document_kind: DocumentKind,
}

impl PageConfig {
    /// Environment variable naming the browser, e.g. `ie-11`.
    pub const BROWSER_VAR: &'static str = "MIMIC_BROWSER";
    /// Environment variable naming the document kind, `html` or `xml`.
    pub const DOCUMENT_KIND_VAR: &'static str = "MIMIC_DOCUMENT_KIND";

    /// Use `browser`.
    #[must_use]
    pub const fn browser(mut self, browser: BrowserIdentity) -> Self {
        self.browser = browser;
        self
    }

    /// Use `kind`.
    #[must_use]
    pub const fn document_kind(mut self, kind: DocumentKind) -> Self {
        self.document_kind = kind;
        self
    }

    /// Defaults overridden by `MIMIC_BROWSER` and `MIMIC_DOCUMENT_KIND`.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] when a variable is set to an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(
            env::var(Self::BROWSER_VAR).ok().as_deref(),
            env::var(Self::DOCUMENT_KIND_VAR).ok().as_deref(),
        )
    }

    /// Defaults overridden by the given raw values.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] for an unparsable browser or document kind.
    pub fn from_vars(browser: Option<&str>, document_kind: Option<&str>) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        if let Some(browser) = browser {
            config.browser = browser.parse()?;
        }
        if let Some(kind) = document_kind {
            config.document_kind = match kind.trim().to_ascii_lowercase().as_str() {
                "html" => DocumentKind::Html,
                "xml" => DocumentKind::Xml,
                _ => return Err(ConfigError::DocumentKind(kind.to_string())),
            };
        }
        Ok(config)
    }
}

/// A document context seen through one browser identity.
#[derive(Debug)]
pub struct Page {
    tree: DomTree,
    catalog: Arc<Catalog>,
    model: Arc<ObjectModel>,
    bindings: BindingRegistry,
}

impl Page {
    /// An empty document configured by `config`, using the global model
    /// builder.
    #[must_use]
    pub fn new(config: PageConfig) -> Self {
        Self::with_tree(DomTree::with_kind(config.document_kind), config.browser)
    }

    /// A page over an existing tree, using the global model builder.
    #[must_use]
    pub fn with_tree(tree: DomTree, browser: BrowserIdentity) -> Self {
        Self::with_builder(tree, browser, ModelBuilder::global())
    }

    /// A page over `tree` whose model comes from `builder`.
    #[must_use]
    pub fn with_builder(tree: DomTree, browser: BrowserIdentity, builder: &ModelBuilder) -> Self {
        Self {
            tree,
            catalog: Arc::clone(builder.catalog()),
            model: builder.build(browser),
            bindings: BindingRegistry::new(),
        }
    }

    /// The node tree.
    #[must_use]
    pub const fn tree(&self) -> &DomTree {
        &self.tree
    }

    /// Mutable access to the node tree.
    pub const fn tree_mut(&mut self) -> &mut DomTree {
        &mut self.tree
    }

    /// The simulated browser.
    #[must_use]
    pub fn browser(&self) -> BrowserIdentity {
        self.model.browser
    }

    /// The object model of the simulated browser.
    #[must_use]
    pub const fn model(&self) -> &Arc<ObjectModel> {
        &self.model
    }

    /// Kind of the document.
    #[must_use]
    pub const fn document_kind(&self) -> DocumentKind {
        self.tree.document_kind()
    }

    /// The node–host bindings created so far.
    #[must_use]
    pub const fn bindings(&self) -> &BindingRegistry {
        &self.bindings
    }

    /// The host object for `node`.
    ///
    /// # Errors
    ///
    /// See [`BindingRegistry::adapt`].
    pub fn wrap(&mut self, node: NodeId) -> Result<Rc<HostObject>, HostError> {
        self.bindings
            .adapt(&self.tree, &self.catalog, &self.model, node)
    }

    /// `null` for `None`, the wrapped node otherwise.
    ///
    /// # Errors
    ///
    /// See [`BindingRegistry::adapt`].
    pub fn wrap_optional(&mut self, node: Option<NodeId>) -> Result<HostValue, HostError> {
        node.map_or(Ok(HostValue::Null), |node| self.wrap(node).map(HostValue::Object))
    }

    /// The host object for the document node.
    ///
    /// # Errors
    ///
    /// See [`BindingRegistry::adapt`].
    pub fn document(&mut self) -> Result<Rc<HostObject>, HostError> {
        self.wrap(NodeId::ROOT)
    }

    /// Read member `name` of `object`.
    ///
    /// Follows the class chain like a prototype lookup. Methods read as
    /// [`HostValue::Function`], setter-only properties as `undefined`.
    ///
    /// # Errors
    ///
    /// Errors raised by the member's getter.
    pub fn get_member(&mut self, object: &HostObject, name: &str) -> Result<Lookup<HostValue>, HostError> {
        let model = Arc::clone(&self.model);
        let Some(class) = model.find(object.class(), name) else {
            return Ok(Lookup::NotFound);
        };
        let getter = class.own_member(name, MemberKind::Getter).map(|m| m.behavior);
        let callable = class
            .own_member(name, MemberKind::Method)
            .or_else(|| class.own_member(name, MemberKind::Constructor));
        let constant = class.own_member(name, MemberKind::Constant).map(|m| m.behavior);
        let value = if let Some(Behavior::Getter(getter)) = getter {
            getter(self, object.node())?
        } else if let Some(callable) = callable {
            HostValue::Function(FunctionRef {
                class: class.name,
                name: callable.name,
            })
        } else if let Some(Behavior::Constant(value)) = constant {
            HostValue::Number(value)
        } else {
            HostValue::Undefined
        };
        Ok(Lookup::Found(value))
    }

    /// Assign `value` to member `name` of `object`.
    ///
    /// A property without a visible setter ignores the assignment but is
    /// still `Found`, matching sloppy-mode scripts.
    ///
    /// # Errors
    ///
    /// Errors raised by the member's setter.
    pub fn set_member(&mut self, object: &HostObject, name: &str, value: HostValue) -> Result<Lookup<()>, HostError> {
        let model = Arc::clone(&self.model);
        let Some(class) = model.find(object.class(), name) else {
            return Ok(Lookup::NotFound);
        };
        if let Some(Behavior::Setter(setter)) = class.own_member(name, MemberKind::Setter).map(|m| m.behavior) {
            setter(self, object.node(), value)?;
        }
        Ok(Lookup::Found(()))
    }

    /// Call method `name` of `object`.
    ///
    /// # Errors
    ///
    /// [`HostError::Type`] when `name` exists but is not a method, otherwise
    /// errors raised by the method.
    pub fn call_method(
        &mut self,
        object: &HostObject,
        name: &str,
        args: &[HostValue],
    ) -> Result<Lookup<HostValue>, HostError> {
        let model = Arc::clone(&self.model);
        let Some(class) = model.find(object.class(), name) else {
            return Ok(Lookup::NotFound);
        };
        match class.own_member(name, MemberKind::Method).map(|m| m.behavior) {
            Some(Behavior::Method(method)) => method(self, object.node(), args).map(Lookup::Found),
            _ => Err(HostError::Type(format!("{}.{name} is not a function", class.name))),
        }
    }

    /// `new class(...args)`.
    ///
    /// `NotFound` when the class is hidden or has no visible constructor.
    ///
    /// # Errors
    ///
    /// Errors raised by the constructor.
    pub fn construct(&mut self, class: &str, args: &[HostValue]) -> Result<Lookup<HostValue>, HostError> {
        let model = Arc::clone(&self.model);
        let constructor = model
            .class(class)
            .and_then(|c| c.own_member(MemberDescriptor::CONSTRUCTOR, MemberKind::Constructor))
            .map(|m| m.behavior);
        match constructor {
            Some(Behavior::Constructor(constructor)) => constructor(self, args).map(Lookup::Found),
            _ => Ok(Lookup::NotFound),
        }
    }

    /// Whether `object` has a member called `name` for this browser.
    #[must_use]
    pub fn has_member(&self, object: &HostObject, name: &str) -> bool {
        self.model.find(object.class(), name).is_some()
    }

    /// Member names of `object` in enumeration order.
    #[must_use]
    pub fn member_names(&self, object: &HostObject) -> Vec<&'static str> {
        self.model.member_names(object.class())
    }
}
