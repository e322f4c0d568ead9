//! Declarative host-object descriptors.
//!
//! Each exposed class is one [`HostObjectDescriptor`]: the node kind it
//! wraps, its parent class, its class rule and its members in declaration
//! order. Members point at the adapter function implementing them.

use mimic_dom::{NodeId, NodeKind};

use crate::error::HostError;
use crate::page::Page;
use crate::rules::{CompatibilityRule, MemberKind, RuleClause};
use crate::value::HostValue;

/// Reads a property of the node `this`.
pub type Getter = fn(&mut Page, NodeId) -> Result<HostValue, HostError>;

/// Writes a property of the node `this`.
pub type Setter = fn(&mut Page, NodeId, HostValue) -> Result<(), HostError>;

/// Calls a method on the node `this`.
pub type Method = fn(&mut Page, NodeId, &[HostValue]) -> Result<HostValue, HostError>;

/// Creates a new node for `new Class(...)`.
pub type Constructor = fn(&mut Page, &[HostValue]) -> Result<HostValue, HostError>;

/// The implementation behind a member.
#[derive(Debug, Clone, Copy)]
pub enum Behavior {
    /// See [`Constructor`].
    Constructor(Constructor),
    /// See [`Getter`].
    Getter(Getter),
    /// See [`Setter`].
    Setter(Setter),
    /// See [`Method`].
    Method(Method),
    /// A numeric constant.
    Constant(f64),
}

impl Behavior {
    /// The member kind this behavior implements.
    #[must_use]
    pub const fn kind(&self) -> MemberKind {
        match self {
            Self::Constructor(_) => MemberKind::Constructor,
            Self::Getter(_) => MemberKind::Getter,
            Self::Setter(_) => MemberKind::Setter,
            Self::Method(_) => MemberKind::Method,
            Self::Constant(_) => MemberKind::Constant,
        }
    }
}

/// One declared member of a class.
#[derive(Debug, Clone)]
pub struct MemberDescriptor {
    /// Script-visible name.
    pub name: &'static str,
    /// Member rule; `None` defers to the class rule.
    pub rule: Option<CompatibilityRule>,
    /// Implementation.
    pub behavior: Behavior,
}

impl MemberDescriptor {
    /// Name under which constructors are declared.
    pub const CONSTRUCTOR: &'static str = "constructor";

    const fn new(name: &'static str, behavior: Behavior) -> Self {
        Self {
            name,
            rule: None,
            behavior,
        }
    }

    /// A property getter.
    #[must_use]
    pub const fn getter(name: &'static str, getter: Getter) -> Self {
        Self::new(name, Behavior::Getter(getter))
    }

    /// A property setter.
    #[must_use]
    pub const fn setter(name: &'static str, setter: Setter) -> Self {
        Self::new(name, Behavior::Setter(setter))
    }

    /// A method.
    #[must_use]
    pub const fn method(name: &'static str, method: Method) -> Self {
        Self::new(name, Behavior::Method(method))
    }

    /// A numeric constant.
    #[must_use]
    pub const fn constant(name: &'static str, value: f64) -> Self {
        Self::new(name, Behavior::Constant(value))
    }

    /// The class constructor.
    #[must_use]
    pub const fn constructor(constructor: Constructor) -> Self {
        Self::new(Self::CONSTRUCTOR, Behavior::Constructor(constructor))
    }

    /// Kind of this member.
    #[must_use]
    pub const fn kind(&self) -> MemberKind {
        self.behavior.kind()
    }

    /// Restrict the member to the browsers selected by `clauses`.
    #[must_use]
    pub fn visible_in(self, clauses: impl IntoIterator<Item = RuleClause>) -> Self {
        let kind = self.kind();
        self.with_rule(CompatibilityRule::new(kind, clauses))
    }

    /// Attach an explicit rule.
    #[must_use]
    pub fn with_rule(mut self, rule: CompatibilityRule) -> Self {
        self.rule = Some(rule);
        self
    }
}

/// Declaration of one exposed class.
#[derive(Debug, Clone)]
pub struct HostObjectDescriptor {
    /// Class name, e.g. `Text`.
    pub name: &'static str,
    /// Node kind wrapped by instances of this class; `None` for abstract
    /// classes such as `Node`.
    pub node_kind: Option<NodeKind>,
    /// Parent class in the single inheritance chain.
    pub parent: Option<&'static str>,
    /// Class rule; `None` hides the class everywhere.
    pub class_rule: Option<CompatibilityRule>,
    /// Members in declaration order.
    pub members: Vec<MemberDescriptor>,
}

impl HostObjectDescriptor {
    /// A class wrapping `node_kind`, hidden until given a class rule.
    #[must_use]
    pub const fn new(name: &'static str, node_kind: NodeKind) -> Self {
        Self {
            name,
            node_kind: Some(node_kind),
            parent: None,
            class_rule: None,
            members: Vec::new(),
        }
    }

    /// A class no node is created as, hidden until given a class rule.
    #[must_use]
    pub const fn abstract_class(name: &'static str) -> Self {
        Self {
            name,
            node_kind: None,
            parent: None,
            class_rule: None,
            members: Vec::new(),
        }
    }

    /// Set the parent class.
    #[must_use]
    pub fn extends(mut self, parent: &'static str) -> Self {
        self.parent = Some(parent);
        self
    }

    /// Expose the class in every browser.
    #[must_use]
    pub fn everywhere(self) -> Self {
        self.with_class_rule(CompatibilityRule::everywhere(MemberKind::Class))
    }

    /// Expose the class in the browsers selected by `clauses`.
    #[must_use]
    pub fn visible_in(self, clauses: impl IntoIterator<Item = RuleClause>) -> Self {
        self.with_class_rule(CompatibilityRule::new(MemberKind::Class, clauses))
    }

    /// Attach an explicit class rule.
    #[must_use]
    pub fn with_class_rule(mut self, rule: CompatibilityRule) -> Self {
        self.class_rule = Some(rule);
        self
    }

    /// Append a member.
    #[must_use]
    pub fn member(mut self, member: MemberDescriptor) -> Self {
        self.members.push(member);
        self
    }
}
