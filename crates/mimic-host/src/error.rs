//! Error types for the host-object layer.

use mimic_dom::{DomError, NodeKind};

use crate::browser::BrowserVendor;
use crate::rules::MemberKind;

/// A browser identity string that could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BrowserParseError {
    /// Not of the form `<vendor>-<version>`.
    #[error("expected <vendor>-<version>, got '{0}'")]
    Format(String),
    /// Unknown vendor name.
    #[error("unknown browser vendor '{0}'")]
    Vendor(String),
    /// Version is not `major[.minor]`.
    #[error("invalid browser version '{0}'")]
    Version(String),
}

/// An inconsistent host-object declaration, detected at registration time.
///
/// These are fatal: a catalog that fails to register must not be used.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    /// Two descriptors share a class name.
    #[error("class {0} is declared twice")]
    DuplicateClass(&'static str),

    /// Two descriptors wrap the same node kind.
    #[error("{kind} nodes are already exposed as {existing}")]
    DuplicateNodeKind {
        /// The node kind.
        kind: NodeKind,
        /// Class already registered for it.
        existing: &'static str,
    },

    /// The parent class has not been registered (yet).
    #[error("class {class} extends unknown class {parent}")]
    UnknownParent {
        /// The class being registered.
        class: &'static str,
        /// Its declared parent.
        parent: &'static str,
    },

    /// The same member name and kind is declared twice in one class.
    #[error("{class}.{member} ({kind}) is declared twice")]
    DuplicateMember {
        /// Owning class.
        class: &'static str,
        /// Member name.
        member: &'static str,
        /// Member kind.
        kind: MemberKind,
    },

    /// One rule lists the same vendor twice.
    #[error("rule for {class}.{member} lists {vendor} twice")]
    DuplicateVendor {
        /// Owning class.
        class: &'static str,
        /// Member name, or the class name for class rules.
        member: &'static str,
        /// The repeated vendor.
        vendor: BrowserVendor,
    },

    /// A clause whose lower bound exceeds its upper bound.
    #[error("rule for {class}.{member} has an empty {vendor} version range")]
    EmptyRange {
        /// Owning class.
        class: &'static str,
        /// Member name, or the class name for class rules.
        member: &'static str,
        /// Vendor of the clause.
        vendor: BrowserVendor,
    },

    /// A rule declared for a different kind of member than it is attached to.
    #[error("rule for {class}.{member} targets a {found}, but the member is a {expected}")]
    RuleKindMismatch {
        /// Owning class.
        class: &'static str,
        /// Member name, or the class name for class rules.
        member: &'static str,
        /// Kind of the member.
        expected: MemberKind,
        /// Kind the rule declares.
        found: MemberKind,
    },
}

/// Failure of a host-object operation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum HostError {
    /// Node-layer precondition failures, propagated unchanged.
    #[error(transparent)]
    Dom(#[from] DomError),

    /// Wrong receiver or argument types.
    #[error("TypeError: {0}")]
    Type(String),

    /// The operation is not available in this document.
    #[error("NotSupportedError: {0}")]
    NotSupported(&'static str),

    /// A string argument contains characters the operation forbids.
    #[error("InvalidCharacterError: {0}")]
    InvalidCharacter(&'static str),

    /// No class in the catalog wraps this kind of node.
    #[error("no host class is declared for {0} nodes")]
    Unexposed(NodeKind),
}

/// Invalid page configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// `MIMIC_BROWSER` does not name a browser.
    #[error("MIMIC_BROWSER: {0}")]
    Browser(#[from] BrowserParseError),

    /// `MIMIC_DOCUMENT_KIND` is neither `html` nor `xml`.
    #[error("MIMIC_DOCUMENT_KIND: expected 'html' or 'xml', got '{0}'")]
    DocumentKind(String),
}
