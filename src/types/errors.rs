//! Per-field error messages accumulated on a context.
//!
//! [`Errors`] maps an [`ErrorKey`] (a field name or the context itself) to
//! the list of messages recorded for it. Messages are data, not control flow:
//! adding or merging never fails the owning context by itself, that is what
//! [`Context::fail`](crate::Context::fail) is for.

use crate::types::Accumulator;
use core::fmt;
use core::ops::Index;
use std::borrow::Cow;
use std::collections::BTreeMap;

/// Key under which error messages are grouped.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ErrorKey {
    /// Messages that concern the context as a whole.
    Context,
    /// Messages attached to a named field.
    Field(String),
}

impl ErrorKey {
    /// Name of the synthetic key used for context-wide messages.
    pub const CONTEXT_NAME: &'static str = "context";

    /// Creates a field key.
    #[inline]
    pub fn field<S: Into<String>>(name: S) -> Self {
        Self::Field(name.into())
    }

    /// Returns the key as text.
    #[inline]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Context => Self::CONTEXT_NAME,
            Self::Field(name) => name.as_str(),
        }
    }

    #[inline]
    pub fn is_context(&self) -> bool {
        matches!(self, Self::Context)
    }
}

impl fmt::Display for ErrorKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for ErrorKey {
    fn from(name: &str) -> Self {
        Self::Field(name.to_owned())
    }
}

impl From<String> for ErrorKey {
    fn from(name: String) -> Self {
        Self::Field(name)
    }
}

impl From<Cow<'_, str>> for ErrorKey {
    fn from(name: Cow<'_, str>) -> Self {
        Self::Field(name.into_owned())
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for ErrorKey {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for ErrorKey {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = <String as serde::Deserialize>::deserialize(deserializer)?;
        if name == Self::CONTEXT_NAME {
            Ok(Self::Context)
        } else {
            Ok(Self::Field(name))
        }
    }
}

/// Error messages grouped by [`ErrorKey`].
///
/// Reading a key that has no messages yields an empty slice, so
/// `errors["email"]` never panics.
///
/// # Examples
///
/// ```
/// use interactor_rail::types::{ErrorKey, Errors};
///
/// let mut own = Errors::new();
/// own.add("name", "is too short");
///
/// let mut upstream = Errors::new();
/// upstream.add("email", "is taken");
///
/// own.merge(&upstream);
/// assert_eq!(own["name"], ["is too short"]);
/// assert_eq!(own["email"], ["is taken"]);
/// assert!(own[ErrorKey::Context].is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Errors {
    entries: BTreeMap<ErrorKey, Accumulator<String>>,
}

impl Errors {
    /// Creates an empty collection.
    #[inline]
    pub fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Records `message` under `key`.
    pub fn add<K, M>(&mut self, key: K, message: M)
    where
        K: Into<ErrorKey>,
        M: Into<String>,
    {
        self.entries
            .entry(key.into())
            .or_default()
            .push(message.into());
    }

    /// Messages recorded under `key`, in the order they were added.
    pub fn get<K: Into<ErrorKey>>(&self, key: K) -> &[String] {
        self.slice_for(&key.into())
    }

    /// Returns true if at least one message is recorded under `key`.
    pub fn contains_key<K: Into<ErrorKey>>(&self, key: K) -> bool {
        self.entries.contains_key(&key.into())
    }

    /// Appends every message of `other` to this collection, key by key.
    ///
    /// Existing messages are kept; nothing is deduplicated. Keys of `other`
    /// without messages are not carried over.
    pub fn merge(&mut self, other: &Errors) {
        for (key, messages) in &other.entries {
            if messages.is_empty() {
                continue;
            }
            self.entries
                .entry(key.clone())
                .or_default()
                .extend(messages.iter().cloned());
        }
    }

    /// Returns true if no messages are recorded.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total number of messages across all keys.
    pub fn len(&self) -> usize {
        self.entries.values().map(Accumulator::len).sum()
    }

    /// Keys that have at least one message.
    pub fn keys(&self) -> impl Iterator<Item = &ErrorKey> {
        self.entries.keys()
    }

    /// Iterates `(key, messages)` pairs ordered by key, context first.
    pub fn iter(&self) -> impl Iterator<Item = (&ErrorKey, &[String])> {
        self.entries
            .iter()
            .map(|(key, messages)| (key, messages.as_slice()))
    }

    /// Messages prefixed with their field name; context messages are bare.
    ///
    /// ```
    /// use interactor_rail::types::{ErrorKey, Errors};
    ///
    /// let mut errors = Errors::new();
    /// errors.add(ErrorKey::Context, "payment declined");
    /// errors.add("card", "is expired");
    ///
    /// assert_eq!(errors.full_messages(), ["payment declined", "card is expired"]);
    /// ```
    pub fn full_messages(&self) -> Vec<String> {
        self.entries
            .iter()
            .flat_map(|(key, messages)| {
                messages.iter().map(move |message| match key {
                    ErrorKey::Context => message.clone(),
                    ErrorKey::Field(name) => format!("{} {}", name, message),
                })
            })
            .collect()
    }

    fn slice_for(&self, key: &ErrorKey) -> &[String] {
        self.entries
            .get(key)
            .map(Accumulator::as_slice)
            .unwrap_or(&[])
    }
}

// Keys with no messages are dropped so `is_empty` and `keys` stay truthful.
#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Errors {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let mut entries: BTreeMap<ErrorKey, Accumulator<String>> =
            serde::Deserialize::deserialize(deserializer)?;
        entries.retain(|_, messages| !messages.is_empty());
        Ok(Self { entries })
    }
}

impl Index<&str> for Errors {
    type Output = [String];

    fn index(&self, key: &str) -> &Self::Output {
        self.slice_for(&ErrorKey::from(key))
    }
}

impl Index<ErrorKey> for Errors {
    type Output = [String];

    fn index(&self, key: ErrorKey) -> &Self::Output {
        self.slice_for(&key)
    }
}

impl Index<&ErrorKey> for Errors {
    type Output = [String];

    fn index(&self, key: &ErrorKey) -> &Self::Output {
        self.slice_for(key)
    }
}

// `key: msg, msg; other: msg`
impl fmt::Display for Errors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (key, messages)) in self.entries.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{}: ", key)?;
            for (j, message) in messages.iter().enumerate() {
                if j > 0 {
                    f.write_str(", ")?;
                }
                f.write_str(message)?;
            }
        }
        Ok(())
    }
}

impl<K, M> FromIterator<(K, M)> for Errors
where
    K: Into<ErrorKey>,
    M: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, M)>>(iter: I) -> Self {
        let mut errors = Errors::new();
        for (key, message) in iter {
            errors.add(key, message);
        }
        errors
    }
}
