//! Declared attributes of a context kind.
//!
//! Each context kind owns a process-wide [`AttributeRegistry`]. Declarations
//! accumulate as a set: declaring a name twice keeps one entry, and declaring
//! nothing returns the current set untouched. The registry only shapes the
//! read-side [`Context::attributes`](crate::Context::attributes) view; fields
//! that were never declared are still stored and readable.
//!
//! # Examples
//!
//! ```
//! use interactor_rail::{context_kind, declare, Context};
//!
//! context_kind! {
//!     /// Context passed through the signup chain.
//!     pub struct Signup;
//! }
//!
//! declare!(Signup: email, plan);
//! declare!(Signup: email);
//! assert_eq!(declare!(Signup).len(), 2);
//!
//! let mut ctx = Context::<Signup>::new();
//! ctx.set("email", "ada@example.com");
//! ctx.set("referrer", "newsletter");
//!
//! let attributes = ctx.attributes();
//! assert_eq!(attributes.len(), 2);
//! assert!(!attributes.contains_key("referrer"));
//! ```

use crate::types::{Fields, Value};
use std::collections::btree_set;
use std::collections::BTreeSet;
use std::sync::{PoisonError, RwLock};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// De-duplicated set of declared attribute names.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct AttributeSet {
    names: BTreeSet<String>,
}

impl AttributeSet {
    #[inline]
    pub const fn new() -> Self {
        Self {
            names: BTreeSet::new(),
        }
    }

    /// Adds `name`, returning false if it was already present.
    #[inline]
    pub fn insert<S: Into<String>>(&mut self, name: S) -> bool {
        self.names.insert(name.into())
    }

    #[inline]
    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Iterates the names in their natural (sorted) order.
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    #[inline]
    pub fn clear(&mut self) {
        self.names.clear();
    }

    /// Projects `fields` onto this set.
    ///
    /// Every declared name appears in the result; names without a stored
    /// field map to [`Value::Null`]. An empty set yields an empty map.
    pub fn project(&self, fields: &Fields) -> Fields {
        self.names
            .iter()
            .map(|name| {
                let value = fields.get(name).cloned().unwrap_or(Value::Null);
                (name.clone(), value)
            })
            .collect()
    }
}

impl<S: Into<String>> FromIterator<S> for AttributeSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            names: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl<S: Into<String>> Extend<S> for AttributeSet {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        self.names.extend(iter.into_iter().map(Into::into));
    }
}

impl IntoIterator for AttributeSet {
    type Item = String;
    type IntoIter = btree_set::IntoIter<String>;

    fn into_iter(self) -> Self::IntoIter {
        self.names.into_iter()
    }
}

/// Process-wide attribute declarations for one context kind.
///
/// Const-constructible so it can live in a `static`; see [`context_kind!`].
/// Reads and writes go through an `RwLock`, and a poisoned lock is recovered
/// rather than propagated since the guarded set is always left consistent.
///
/// [`context_kind!`]: crate::context_kind
#[derive(Debug, Default)]
pub struct AttributeRegistry {
    declared: RwLock<AttributeSet>,
}

impl AttributeRegistry {
    #[inline]
    pub const fn new() -> Self {
        Self {
            declared: RwLock::new(AttributeSet::new()),
        }
    }

    /// Merges `names` into the declared set and returns the updated set.
    ///
    /// With an empty iterator this is equivalent to [`declared`](Self::declared).
    pub fn declare<I, S>(&self, names: I) -> AttributeSet
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut names = names.into_iter().peekable();
        if names.peek().is_none() {
            return self.declared();
        }

        let mut declared = self
            .declared
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        declared.extend(names);

        #[cfg(feature = "tracing")]
        tracing::trace!(declared = declared.len(), "attributes declared");

        (*declared).clone()
    }

    /// Returns a snapshot of the declared set.
    pub fn declared(&self) -> AttributeSet {
        let declared = self
            .declared
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        (*declared).clone()
    }

    /// Returns true if `name` has been declared.
    pub fn is_declared(&self, name: &str) -> bool {
        self.declared
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(name)
    }

    /// Restricts `fields` to the declared names. See [`AttributeSet::project`].
    pub fn extract(&self, fields: &Fields) -> Fields {
        self.declared
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .project(fields)
    }

    /// Forgets every declaration.
    pub fn reset(&self) {
        self.declared
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

/// Marker type identifying a family of contexts that share declared attributes.
///
/// Implement it with [`context_kind!`](crate::context_kind), which provides
/// the backing `static` registry.
pub trait ContextKind: 'static {
    /// The registry owned by this kind.
    fn registry() -> &'static AttributeRegistry;

    /// Declares attribute names for this kind. See [`AttributeRegistry::declare`].
    fn declare<I, S>(names: I) -> AttributeSet
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::registry().declare(names)
    }

    /// Currently declared attribute names.
    fn declared() -> AttributeSet {
        Self::registry().declared()
    }
}

crate::context_kind! {
    /// Default kind for contexts that do not need their own declarations.
    pub struct Untyped;
}
