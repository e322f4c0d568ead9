//! Compatibility rules and the visibility decision.
//!
//! A [`CompatibilityRule`] lists the browsers that see a class or member as
//! `(vendor, version range)` clauses. Resolution is closed-world: anything
//! not matched by a clause is hidden.
//!
//! Only the browser axis is decided here. Conditions such as the document
//! kind belong to the adapter implementing the member.

use std::fmt;

use serde::Serialize;
use strum_macros::Display;

use crate::browser::{BrowserIdentity, BrowserVendor, BrowserVersion};
use crate::descriptor::{HostObjectDescriptor, MemberDescriptor};

/// What a rule or member describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum MemberKind {
    /// The class (interface object) itself.
    Class,
    /// `new Class(...)`.
    Constructor,
    /// Property read.
    Getter,
    /// Property write.
    Setter,
    /// Callable member.
    Method,
    /// Constant value, e.g. `Node.TEXT_NODE`.
    Constant,
}

/// Inclusive version range; a missing bound is unbounded on that side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct VersionRange {
    /// Lowest matching version.
    pub min: Option<BrowserVersion>,
    /// Highest matching version.
    pub max: Option<BrowserVersion>,
}

impl VersionRange {
    /// Every version.
    pub const ANY: Self = Self {
        min: None,
        max: None,
    };

    /// Whether `version` lies within the range.
    #[must_use]
    pub fn contains(&self, version: BrowserVersion) -> bool {
        self.min.is_none_or(|min| version >= min) && self.max.is_none_or(|max| version <= max)
    }

    /// A range whose lower bound exceeds its upper bound matches nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        matches!((self.min, self.max), (Some(min), Some(max)) if min > max)
    }
}

impl fmt::Display for VersionRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.min, self.max) {
            (None, None) => f.write_str("*"),
            (Some(min), None) => write!(f, ">={min}"),
            (None, Some(max)) => write!(f, "<={max}"),
            (Some(min), Some(max)) => write!(f, "{min}..={max}"),
        }
    }
}

/// One `(vendor, version range)` entry of a rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleClause {
    /// Matching vendor.
    pub vendor: BrowserVendor,
    /// Matching versions of that vendor.
    pub versions: VersionRange,
}

impl RuleClause {
    /// Every version of `vendor`.
    #[must_use]
    pub const fn any(vendor: BrowserVendor) -> Self {
        Self {
            vendor,
            versions: VersionRange::ANY,
        }
    }

    /// `vendor` from major version `min` on.
    #[must_use]
    pub const fn since(vendor: BrowserVendor, min: u32) -> Self {
        Self {
            vendor,
            versions: VersionRange {
                min: Some(BrowserVersion::first_of(min)),
                max: None,
            },
        }
    }

    /// `vendor` up to and including major version `max`.
    #[must_use]
    pub const fn until(vendor: BrowserVendor, max: u32) -> Self {
        Self {
            vendor,
            versions: VersionRange {
                min: None,
                max: Some(BrowserVersion::last_of(max)),
            },
        }
    }

    /// `vendor` major versions `min` through `max`, inclusive.
    #[must_use]
    pub const fn between(vendor: BrowserVendor, min: u32, max: u32) -> Self {
        Self {
            vendor,
            versions: VersionRange {
                min: Some(BrowserVersion::first_of(min)),
                max: Some(BrowserVersion::last_of(max)),
            },
        }
    }

    /// Exactly major version `major` of `vendor`.
    #[must_use]
    pub const fn only(vendor: BrowserVendor, major: u32) -> Self {
        Self::between(vendor, major, major)
    }

    /// Whether this clause selects `browser`.
    #[must_use]
    pub fn matches(&self, browser: BrowserIdentity) -> bool {
        self.vendor == browser.vendor && self.versions.contains(browser.version)
    }
}

impl fmt::Display for RuleClause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.vendor, self.versions)
    }
}

/// Which browsers see a class or member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompatibilityRule {
    /// Kind of the declaration this rule is attached to.
    pub kind: MemberKind,
    /// Selecting clauses; no clause means no browser.
    pub clauses: Vec<RuleClause>,
}

impl CompatibilityRule {
    /// A rule for `kind` selecting the given clauses.
    #[must_use]
    pub fn new(kind: MemberKind, clauses: impl IntoIterator<Item = RuleClause>) -> Self {
        Self {
            kind,
            clauses: clauses.into_iter().collect(),
        }
    }

    /// A rule selecting every version of every vendor.
    #[must_use]
    pub fn everywhere(kind: MemberKind) -> Self {
        use strum::IntoEnumIterator;
        Self::new(kind, BrowserVendor::iter().map(RuleClause::any))
    }

    /// Whether any clause selects `browser`.
    #[must_use]
    pub fn matches(&self, browser: BrowserIdentity) -> bool {
        self.clauses.iter().any(|clause| clause.matches(browser))
    }
}

/// The rule deciding `member`'s visibility: its own, else the class rule.
#[must_use]
pub fn effective_rule<'a>(
    descriptor: &'a HostObjectDescriptor,
    member: &'a MemberDescriptor,
) -> Option<&'a CompatibilityRule> {
    member.rule.as_ref().or(descriptor.class_rule.as_ref())
}

/// Whether the class described by `descriptor` exists for `browser`.
#[must_use]
pub fn is_class_visible(descriptor: &HostObjectDescriptor, browser: BrowserIdentity) -> bool {
    descriptor
        .class_rule
        .as_ref()
        .is_some_and(|rule| rule.matches(browser))
}

/// Whether one declared member is visible for `browser`.
///
/// A member rule overrides the class rule; without either the member is
/// hidden.
#[must_use]
pub fn is_member_visible(
    descriptor: &HostObjectDescriptor,
    member: &MemberDescriptor,
    browser: BrowserIdentity,
) -> bool {
    effective_rule(descriptor, member).is_some_and(|rule| rule.matches(browser))
}

/// Whether `member_name` is visible on `descriptor` for `browser`.
///
/// A name declared with several kinds (getter and setter) is visible when
/// any of its declarations is. Unknown names are hidden.
#[must_use]
pub fn is_visible(
    descriptor: &HostObjectDescriptor,
    member_name: &str,
    browser: BrowserIdentity,
) -> bool {
    descriptor
        .members
        .iter()
        .filter(|member| member.name == member_name)
        .any(|member| is_member_visible(descriptor, member, browser))
}
