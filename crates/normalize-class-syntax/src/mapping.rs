//! Type and visibility mapping.
//!
//! The type system is deliberately coarse: every source type falls into one
//! of three buckets (void, numeric, string), and exception types pass through
//! unchanged. Visibility collapses to public/private.
//!
//! # Default rules (first match wins)
//!
//! | Source type            | Output          |
//! |------------------------|-----------------|
//! | `void`                 | `void`          |
//! | `*Exception`           | unchanged       |
//! | `int*`                 | numeric name    |
//! | anything else          | string name     |
//!
//! Extending the mapping means adding rules with [`TypeMapper::with_rule`],
//! not changing how lookup works.

use crate::ir::{Modifier, TypeRef};
use std::fmt;
use std::sync::OnceLock;

pub const DEFAULT_NUMBER_TYPE: &str = "number";
pub const DEFAULT_STRING_TYPE: &str = "string";

/// How a rule recognizes a source type name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypePattern {
    Exact(String),
    Prefix(String),
    Suffix(String),
}

impl TypePattern {
    pub fn matches(&self, ty: &str) -> bool {
        match self {
            TypePattern::Exact(s) => ty == s,
            TypePattern::Prefix(s) => ty.starts_with(s.as_str()),
            TypePattern::Suffix(s) => ty.ends_with(s.as_str()),
        }
    }
}

/// What a matching rule produces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeTarget {
    /// Keep the source name (types that exist identically in the output).
    Unchanged,
    Named(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeRule {
    pub pattern: TypePattern,
    pub target: TypeTarget,
}

impl TypeRule {
    pub fn new(pattern: TypePattern, target: TypeTarget) -> Self {
        Self { pattern, target }
    }

    fn apply(&self, ty: &str) -> Option<String> {
        if !self.pattern.matches(ty) {
            return None;
        }
        Some(match &self.target {
            TypeTarget::Unchanged => ty.to_string(),
            TypeTarget::Named(name) => name.clone(),
        })
    }
}

/// Ordered rule table mapping source type names to output type names.
///
/// Total: any name no rule matches maps to the fallback (string) type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeMapper {
    rules: Vec<TypeRule>,
    fallback: String,
}

impl TypeMapper {
    /// Default rule table with the given names for the numeric and string buckets.
    pub fn new(number_type: impl Into<String>, string_type: impl Into<String>) -> Self {
        Self {
            rules: vec![
                TypeRule::new(
                    TypePattern::Exact("void".into()),
                    TypeTarget::Named("void".into()),
                ),
                TypeRule::new(TypePattern::Suffix("Exception".into()), TypeTarget::Unchanged),
                TypeRule::new(
                    TypePattern::Prefix("int".into()),
                    TypeTarget::Named(number_type.into()),
                ),
            ],
            fallback: string_type.into(),
        }
    }

    /// Append a rule. It is tried after the existing rules and before the fallback.
    pub fn with_rule(mut self, rule: TypeRule) -> Self {
        self.rules.push(rule);
        self
    }

    pub fn rules(&self) -> &[TypeRule] {
        &self.rules
    }

    pub fn map(&self, ty: &TypeRef) -> String {
        self.map_name(ty.as_str())
    }

    pub fn map_name(&self, ty: &str) -> String {
        self.rules
            .iter()
            .find_map(|rule| rule.apply(ty))
            .unwrap_or_else(|| self.fallback.clone())
    }
}

impl Default for TypeMapper {
    fn default() -> Self {
        Self::new(DEFAULT_NUMBER_TYPE, DEFAULT_STRING_TYPE)
    }
}

static DEFAULT_MAPPER: OnceLock<TypeMapper> = OnceLock::new();

/// Map a source type name with the default rules.
pub fn map_type(ty: &str) -> String {
    DEFAULT_MAPPER.get_or_init(TypeMapper::default).map_name(ty)
}

/// Output visibility keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Visibility {
    Public,
    Private,
}

impl Visibility {
    pub fn as_str(self) -> &'static str {
        match self {
            Visibility::Public => "public",
            Visibility::Private => "private",
        }
    }
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Public iff the list carries `public`. Protected, internal and the rest are private.
pub fn map_visibility(modifiers: &[Modifier]) -> Visibility {
    if modifiers.contains(&Modifier::Public) {
        Visibility::Public
    } else {
        Visibility::Private
    }
}
