//! Node–host bindings.
//!
//! Each page keeps one [`BindingRegistry`]. It hands out at most one
//! [`HostObject`] per node, creating it on first request. The host object
//! only names its node; the tree owns the node and the registry owns the
//! only strong reference to the host object.

use std::collections::HashMap;
use std::rc::Rc;

use mimic_common::warning::WarningLog;
use mimic_dom::{DomError, DomTree, NodeId};

use crate::catalog::Catalog;
use crate::error::HostError;
use crate::model::ObjectModel;

/// Script-facing facade for one node.
#[derive(Debug, PartialEq, Eq)]
pub struct HostObject {
    node: NodeId,
    class: &'static str,
}

impl HostObject {
    /// The wrapped node.
    #[must_use]
    pub const fn node(&self) -> NodeId {
        self.node
    }

    /// The model class this object is an instance of.
    #[must_use]
    pub const fn class(&self) -> &'static str {
        self.class
    }
}

/// Per-page map from node to its host object.
#[derive(Debug, Default)]
pub struct BindingRegistry {
    bindings: HashMap<NodeId, Rc<HostObject>>,
    warnings: WarningLog,
}

impl BindingRegistry {
    /// An empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The host object for `node`, created on first request.
    ///
    /// The class is the one declared for the node's kind. When the model
    /// hides that class, the nearest visible ancestor class is used and the
    /// fallback is reported once per registry.
    ///
    /// # Errors
    ///
    /// - [`HostError::Dom`] with [`DomError::NotFound`] for unknown nodes.
    /// - [`HostError::Unexposed`] if no visible class covers the node kind.
    pub fn adapt(
        &mut self,
        tree: &DomTree,
        catalog: &Catalog,
        model: &ObjectModel,
        node: NodeId,
    ) -> Result<Rc<HostObject>, HostError> {
        if let Some(existing) = self.bindings.get(&node) {
            return Ok(Rc::clone(existing));
        }

        let kind = tree.kind(node).ok_or(DomError::NotFound(node))?;
        let descriptor = catalog
            .descriptor_for_node(kind)
            .ok_or(HostError::Unexposed(kind))?;
        let class = catalog
            .lineage(descriptor)
            .map(|d| d.name)
            .find(|name| model.has_class(name))
            .ok_or(HostError::Unexposed(kind))?;
        if class != descriptor.name {
            let _ = self.warnings.warn_once(
                "Host",
                &format!(
                    "{} is hidden for {}; exposing {kind} nodes as {class}",
                    descriptor.name, model.browser
                ),
            );
        }

        let object = Rc::new(HostObject { node, class });
        tracing::debug!(%node, class, "bound host object");
        let _ = self.bindings.insert(node, Rc::clone(&object));
        Ok(object)
    }

    /// The existing host object for `node`, if any.
    #[must_use]
    pub fn get(&self, node: NodeId) -> Option<&Rc<HostObject>> {
        self.bindings.get(&node)
    }

    /// Fallback warnings reported by this registry.
    #[must_use]
    pub const fn warnings(&self) -> &WarningLog {
        &self.warnings
    }

    /// Number of live bindings.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Whether no node has been wrapped yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}
