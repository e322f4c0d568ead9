//! Registration and validation of host-object descriptors.
//!
//! Descriptors are registered once, at start-up, through a
//! [`CatalogBuilder`]. Every registration is validated immediately so an
//! inconsistent rule set never reaches the model builder.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, OnceLock};

use mimic_dom::NodeKind;

use crate::adapters;
use crate::descriptor::HostObjectDescriptor;
use crate::error::CatalogError;
use crate::rules::{CompatibilityRule, MemberKind};

/// A validated, frozen set of descriptors.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    descriptors: Vec<HostObjectDescriptor>,
    by_name: HashMap<&'static str, usize>,
    by_node_kind: HashMap<NodeKind, usize>,
}

impl Catalog {
    /// The built-in declarations for every exposed class.
    ///
    /// Built on first use and shared for the rest of the process.
    ///
    /// # Panics
    ///
    /// Panics if the built-in declarations are inconsistent.
    #[must_use]
    pub fn standard() -> Arc<Self> {
        static STANDARD: OnceLock<Arc<Catalog>> = OnceLock::new();
        Arc::clone(STANDARD.get_or_init(|| {
            let catalog = adapters::standard_catalog()
                .expect("built-in host object declarations should be consistent");
            Arc::new(catalog)
        }))
    }

    /// Descriptors in registration order (parents before children).
    #[must_use]
    pub fn descriptors(&self) -> &[HostObjectDescriptor] {
        &self.descriptors
    }

    /// Descriptor of the class named `name`.
    #[must_use]
    pub fn descriptor(&self, name: &str) -> Option<&HostObjectDescriptor> {
        self.by_name.get(name).map(|&i| &self.descriptors[i])
    }

    /// Descriptor wrapping nodes of `kind`.
    #[must_use]
    pub fn descriptor_for_node(&self, kind: NodeKind) -> Option<&HostObjectDescriptor> {
        self.by_node_kind.get(&kind).map(|&i| &self.descriptors[i])
    }

    /// `descriptor` followed by its ancestors, nearest first.
    pub fn lineage<'a>(
        &'a self,
        descriptor: &'a HostObjectDescriptor,
    ) -> impl Iterator<Item = &'a HostObjectDescriptor> + 'a {
        std::iter::successors(Some(descriptor), move |d| {
            d.parent.and_then(|parent| self.descriptor(parent))
        })
    }
}

/// Accumulates descriptors, rejecting inconsistent ones as they arrive.
#[derive(Debug, Default)]
pub struct CatalogBuilder {
    catalog: Catalog,
}

impl CatalogBuilder {
    /// An empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate and add `descriptor`. Parents must be registered first.
    ///
    /// # Errors
    ///
    /// Returns a [`CatalogError`] for duplicate classes, node kinds or
    /// members, unknown parents, and malformed rules.
    pub fn register(&mut self, descriptor: HostObjectDescriptor) -> Result<(), CatalogError> {
        let class = descriptor.name;
        if self.catalog.by_name.contains_key(class) {
            return Err(CatalogError::DuplicateClass(class));
        }
        if let Some(parent) = descriptor
            .parent
            .filter(|parent| !self.catalog.by_name.contains_key(parent))
        {
            return Err(CatalogError::UnknownParent { class, parent });
        }
        let claimed = descriptor
            .node_kind
            .and_then(|kind| self.catalog.by_node_kind.get(&kind).map(|&i| (kind, i)));
        if let Some((kind, existing)) = claimed {
            return Err(CatalogError::DuplicateNodeKind {
                kind,
                existing: self.catalog.descriptors[existing].name,
            });
        }
        if let Some(rule) = &descriptor.class_rule {
            check_rule(class, class, MemberKind::Class, rule)?;
        }

        let mut seen = HashSet::new();
        for member in &descriptor.members {
            if !seen.insert((member.name, member.kind())) {
                return Err(CatalogError::DuplicateMember {
                    class,
                    member: member.name,
                    kind: member.kind(),
                });
            }
            if let Some(rule) = &member.rule {
                check_rule(class, member.name, member.kind(), rule)?;
            }
        }

        let index = self.catalog.descriptors.len();
        let _ = self.catalog.by_name.insert(class, index);
        if let Some(kind) = descriptor.node_kind {
            let _ = self.catalog.by_node_kind.insert(kind, index);
        }
        self.catalog.descriptors.push(descriptor);
        Ok(())
    }

    /// Freeze the registered descriptors.
    #[must_use]
    pub fn finish(self) -> Catalog {
        self.catalog
    }
}

/// Reject rules that are attached to the wrong kind, repeat a vendor, or
/// contain an empty range.
fn check_rule(
    class: &'static str,
    member: &'static str,
    kind: MemberKind,
    rule: &CompatibilityRule,
) -> Result<(), CatalogError> {
    if rule.kind != kind {
        return Err(CatalogError::RuleKindMismatch {
            class,
            member,
            expected: kind,
            found: rule.kind,
        });
    }
    for (i, clause) in rule.clauses.iter().enumerate() {
        if clause.versions.is_empty() {
            return Err(CatalogError::EmptyRange {
                class,
                member,
                vendor: clause.vendor,
            });
        }
        if rule.clauses[..i].iter().any(|c| c.vendor == clause.vendor) {
            return Err(CatalogError::DuplicateVendor {
                class,
                member,
                vendor: clause.vendor,
            });
        }
    }
    Ok(())
}
