//! Browser-accurate host objects.
//!
//! Scripts see DOM nodes through host objects, and which members those
//! objects carry depends on the browser being simulated. This crate holds
//! the declarations for every exposed class ([`catalog`]), resolves them
//! into a per-browser [`ObjectModel`] ([`model`]), binds nodes to host
//! objects ([`binding`]) and dispatches member access through a [`Page`].
//!
//! ```
//! use mimic_host::{BrowserIdentity, Lookup, Page, PageConfig};
//!
//! let mut page = Page::new(PageConfig::default().browser(BrowserIdentity::IE_11));
//! let text = page.tree_mut().create_text("Hello World");
//! let object = page.wrap(text).unwrap();
//! assert!(page.get_member(&object, "text").unwrap().is_found());
//! assert_eq!(page.get_member(&object, "nope").unwrap(), Lookup::NotFound);
//! ```

mod adapters;
pub mod binding;
pub mod browser;
pub mod catalog;
pub mod descriptor;
pub mod error;
pub mod model;
pub mod page;
pub mod rules;
pub mod value;

pub use binding::{BindingRegistry, HostObject};
pub use browser::{BrowserIdentity, BrowserVendor, BrowserVersion};
pub use catalog::{Catalog, CatalogBuilder};
pub use descriptor::{Behavior, HostObjectDescriptor, MemberDescriptor};
pub use error::{BrowserParseError, CatalogError, ConfigError, HostError};
pub use model::{ModelBuilder, ObjectModel, ResolvedClass, ResolvedMember};
pub use page::{Page, PageConfig};
pub use rules::{CompatibilityRule, MemberKind, RuleClause, VersionRange, is_visible};
pub use value::{FunctionRef, HostValue, Lookup};

pub use mimic_dom::{DocumentKind, DomError, DomTree, NodeId, NodeKind};
