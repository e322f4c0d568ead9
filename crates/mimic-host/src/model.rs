//! Browser-specific object models.
//!
//! An [`ObjectModel`] is what one simulated browser exposes: the visible
//! classes, each with its visible members in declaration order. Models are
//! pure functions of the catalog and the browser identity, built once per
//! identity by a [`ModelBuilder`] and shared afterwards.

use std::collections::HashMap;
use std::sync::{Arc, OnceLock, PoisonError, RwLock};

use mimic_dom::NodeKind;
use serde::Serialize;

use crate::browser::BrowserIdentity;
use crate::catalog::Catalog;
use crate::descriptor::Behavior;
use crate::rules::{self, MemberKind};

/// A member that survived filtering.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ResolvedMember {
    /// Script-visible name.
    pub name: &'static str,
    /// Member kind.
    pub kind: MemberKind,
    /// Implementation.
    #[serde(skip)]
    pub behavior: Behavior,
}

impl PartialEq for ResolvedMember {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.kind == other.kind
    }
}

/// A class visible in one browser.
#[derive(Debug, Serialize)]
pub struct ResolvedClass {
    /// Class name.
    pub name: &'static str,
    /// Node kind wrapped by instances; `None` for abstract classes.
    pub node_kind: Option<NodeKind>,
    /// Nearest visible ancestor class.
    pub parent: Option<&'static str>,
    /// Visible members in declaration order.
    pub members: Vec<ResolvedMember>,
    #[serde(skip)]
    index: OnceLock<HashMap<&'static str, Vec<usize>>>,
}

impl ResolvedClass {
    /// Members declared under `name` on this class itself (getter and setter
    /// share a name), in declaration order.
    pub fn own_members<'a>(&'a self, name: &str) -> impl Iterator<Item = &'a ResolvedMember> + 'a {
        let index = self.index.get_or_init(|| {
            let mut index: HashMap<&'static str, Vec<usize>> = HashMap::new();
            for (i, member) in self.members.iter().enumerate() {
                index.entry(member.name).or_default().push(i);
            }
            index
        });
        index
            .get(name)
            .map_or(&[][..], Vec::as_slice)
            .iter()
            .map(move |&i| &self.members[i])
    }

    /// Whether this class itself declares a visible member called `name`.
    #[must_use]
    pub fn declares(&self, name: &str) -> bool {
        self.own_members(name).next().is_some()
    }

    /// The visible member of `kind` called `name` on this class itself.
    #[must_use]
    pub fn own_member(&self, name: &str, kind: MemberKind) -> Option<&ResolvedMember> {
        self.own_members(name).find(|m| m.kind == kind)
    }
}

impl PartialEq for ResolvedClass {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.node_kind == other.node_kind
            && self.parent == other.parent
            && self.members == other.members
    }
}

/// Everything one browser identity exposes.
#[derive(Debug, Serialize)]
pub struct ObjectModel {
    /// Identity this model was built for.
    pub browser: BrowserIdentity,
    /// Visible classes in registration order.
    pub classes: Vec<ResolvedClass>,
    #[serde(skip)]
    by_name: HashMap<&'static str, usize>,
}

impl PartialEq for ObjectModel {
    fn eq(&self, other: &Self) -> bool {
        self.browser == other.browser && self.classes == other.classes
    }
}

impl ObjectModel {
    /// Resolve `catalog` for `browser`.
    ///
    /// Classes whose class rule excludes the browser are left out entirely.
    /// A visible class's parent is its nearest visible ancestor.
    #[must_use]
    pub fn resolve(catalog: &Catalog, browser: BrowserIdentity) -> Self {
        let mut classes = Vec::new();
        for descriptor in catalog.descriptors() {
            if !rules::is_class_visible(descriptor, browser) {
                continue;
            }
            let parent = catalog
                .lineage(descriptor)
                .skip(1)
                .find(|ancestor| rules::is_class_visible(ancestor, browser))
                .map(|ancestor| ancestor.name);
            let members = descriptor
                .members
                .iter()
                .filter(|member| rules::is_member_visible(descriptor, member, browser))
                .map(|member| ResolvedMember {
                    name: member.name,
                    kind: member.kind(),
                    behavior: member.behavior,
                })
                .collect();
            classes.push(ResolvedClass {
                name: descriptor.name,
                node_kind: descriptor.node_kind,
                parent,
                members,
                index: OnceLock::new(),
            });
        }
        let by_name = classes
            .iter()
            .enumerate()
            .map(|(i, class)| (class.name, i))
            .collect();
        Self {
            browser,
            classes,
            by_name,
        }
    }

    /// The visible class called `name`.
    #[must_use]
    pub fn class(&self, name: &str) -> Option<&ResolvedClass> {
        self.by_name.get(name).map(|&i| &self.classes[i])
    }

    /// Whether a class called `name` is visible.
    #[must_use]
    pub fn has_class(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    /// `class` and its visible ancestors, nearest first.
    pub fn chain<'a>(&'a self, class: &str) -> impl Iterator<Item = &'a ResolvedClass> + 'a {
        std::iter::successors(self.class(class), move |c| {
            c.parent.and_then(|p| self.class(p))
        })
    }

    /// The class in `class`'s chain that first declares `name`: the one a
    /// prototype lookup stops at.
    #[must_use]
    pub fn find(&self, class: &str, name: &str) -> Option<&ResolvedClass> {
        self.chain(class).find(|c| c.declares(name))
    }

    /// Member names reachable from `class`, own members first, each name
    /// once, in declaration order.
    #[must_use]
    pub fn member_names(&self, class: &str) -> Vec<&'static str> {
        let mut names: Vec<&'static str> = Vec::new();
        for resolved in self.chain(class) {
            for member in &resolved.members {
                if member.kind != MemberKind::Constructor && !names.contains(&member.name) {
                    names.push(member.name);
                }
            }
        }
        names
    }
}

/// Builds and caches one [`ObjectModel`] per browser identity.
///
/// Models are built completely before they are published to the cache, so
/// a concurrent reader never sees a partial model. When two threads build
/// the same identity at once, the first published model wins and both get
/// it.
#[derive(Debug)]
pub struct ModelBuilder {
    catalog: Arc<Catalog>,
    cache: RwLock<HashMap<BrowserIdentity, Arc<ObjectModel>>>,
}

impl ModelBuilder {
    /// A builder over `catalog` with an empty cache.
    #[must_use]
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self {
            catalog,
            cache: RwLock::new(HashMap::new()),
        }
    }

    /// The process-wide builder over [`Catalog::standard`].
    #[must_use]
    pub fn global() -> &'static Self {
        static GLOBAL: OnceLock<ModelBuilder> = OnceLock::new();
        GLOBAL.get_or_init(|| Self::new(Catalog::standard()))
    }

    /// The catalog models are built from.
    #[must_use]
    pub fn catalog(&self) -> &Arc<Catalog> {
        &self.catalog
    }

    /// The model for `browser`, built on first request.
    #[must_use]
    pub fn build(&self, browser: BrowserIdentity) -> Arc<ObjectModel> {
        if let Some(model) = self
            .cache
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&browser)
        {
            tracing::trace!(%browser, "object model cache hit");
            return Arc::clone(model);
        }

        let model = Arc::new(ObjectModel::resolve(&self.catalog, browser));
        tracing::debug!(
            %browser,
            classes = model.classes.len(),
            "built object model"
        );

        let mut cache = self.cache.write().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(cache.entry(browser).or_insert(model))
    }

    /// Number of identities built so far.
    #[must_use]
    pub fn cached(&self) -> usize {
        self.cache
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}
