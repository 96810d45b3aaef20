//! The context shared by every interactor of a chain.
//!
//! A [`Context`] carries:
//! - open, dynamically typed [`Fields`],
//! - the call stack of interactors that completed against it,
//! - a monotone [`ContextState`] (fresh, running, failed, rolled back),
//! - accumulated [`Errors`].
//!
//! Failing a context moves it into a [`ContextFailure`]; rolling it back
//! compensates the recorded interactors, most recent first, exactly once.
//!
//! # Examples
//!
//! ```
//! use interactor_rail::traits::{CompensationError, Rollback};
//! use interactor_rail::{fail, Context, ContextResult};
//! use std::sync::{Arc, Mutex};
//!
//! struct Step(&'static str, Arc<Mutex<Vec<&'static str>>>);
//!
//! impl Rollback for Step {
//!     fn rollback(&self) -> Result<(), CompensationError> {
//!         self.1.lock().unwrap().push(self.0);
//!         Ok(())
//!     }
//! }
//!
//! let undone = Arc::new(Mutex::new(Vec::new()));
//! let mut ctx: Context = Context::from_fields([("user", "ada")]);
//! ctx.called(Arc::new(Step("create_user", undone.clone())));
//! ctx.called(Arc::new(Step("send_email", undone.clone())));
//!
//! let result: ContextResult<()> = fail!(ctx, "smtp unavailable");
//! let mut failure = result.unwrap_err();
//! failure.context_mut().rollback().unwrap();
//! failure.context_mut().rollback().unwrap();
//!
//! assert_eq!(*undone.lock().unwrap(), ["send_email", "create_user"]);
//! assert!(failure.context().is_failure());
//! ```

mod failure;

pub use failure::{ContextFailure, ContextResult, FailureDetail};

use crate::attributes::{ContextKind, Untyped};
use crate::traits::{CompensationError, InteractorRef};
use crate::types::{ContextState, ErrorKey, Errors, Fields, Value};
use core::fmt;
use core::marker::PhantomData;
use core::ops::Index;

static NULL: Value = Value::Null;

/// Shared, mutable transfer object for a chain of interactors.
///
/// `K` names the [`ContextKind`] whose declared attributes shape
/// [`attributes`](Self::attributes). Not internally synchronized; a context
/// belongs to one chain at a time.
pub struct Context<K = Untyped> {
    fields: Fields,
    called: Vec<InteractorRef>,
    state: ContextState,
    errors: Errors,
    kind: PhantomData<fn() -> K>,
}

impl<K: ContextKind> Context<K> {
    /// Creates an empty, fresh context.
    #[inline]
    pub fn new() -> Self {
        Self::with_fields(Fields::new())
    }

    /// Creates a fresh context holding `fields` verbatim.
    pub fn from_fields<I, S, V>(fields: I) -> Self
    where
        I: IntoIterator<Item = (S, V)>,
        S: Into<String>,
        V: Into<Value>,
    {
        Self::with_fields(
            fields
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }

    /// Creates a fresh context from every raw field of `source`.
    ///
    /// The source keeps its call stack, state and errors; none of them carry
    /// over.
    pub fn from_context<J>(source: &Context<J>) -> Self {
        Self::with_fields(source.fields.clone())
    }

    /// Creates a fresh context from the declared attributes of `source`.
    ///
    /// Only fields of `source` whose names are declared on `J` are copied.
    /// When `J` declares nothing, all raw fields are copied, as in
    /// [`from_context`](Self::from_context).
    pub fn from_attributes<J: ContextKind>(source: &Context<J>) -> Self {
        let declared = J::declared();
        if declared.is_empty() {
            return Self::from_context(source);
        }

        Self::with_fields(
            source
                .fields
                .iter()
                .filter(|(key, _)| declared.contains(key))
                .map(|(key, value)| (key.clone(), value.clone()))
                .collect(),
        )
    }

    fn with_fields(fields: Fields) -> Self {
        Self {
            fields,
            called: Vec::new(),
            state: ContextState::Fresh,
            errors: Errors::new(),
            kind: PhantomData,
        }
    }

    /// Declared attributes of `K` with their current values.
    ///
    /// Empty when `K` declares nothing, whatever the context holds. Declared
    /// names without a stored field read as [`Value::Null`].
    pub fn attributes(&self) -> Fields {
        K::registry().extract(&self.fields)
    }

    /// Records `interactor` as having run successfully against this context.
    ///
    /// Duplicates are kept; each entry is compensated on rollback.
    pub fn called(&mut self, interactor: InteractorRef) {
        #[cfg(feature = "tracing")]
        tracing::debug!(
            interactor = interactor.name(),
            depth = self.called.len() + 1,
            "interactor called"
        );

        self.called.push(interactor);
        self.state = self.state.called();
    }

    /// Fails the context and returns the failure that aborts the chain.
    ///
    /// Always returns `Err`. The detail is recorded first:
    /// - [`FailureDetail::None`] records nothing,
    /// - [`FailureDetail::Message`] adds a non-empty message under
    ///   [`ErrorKey::Context`],
    /// - [`FailureDetail::Errors`] merges every key into this context's errors.
    ///
    /// Once failed, a context never reports success again.
    ///
    /// # Examples
    ///
    /// ```
    /// use interactor_rail::{Context, ContextResult, ErrorKey};
    ///
    /// let ctx: Context = Context::new();
    /// let result: ContextResult<()> = ctx.fail("boom");
    ///
    /// let failure = result.unwrap_err();
    /// assert_eq!(failure.errors()[ErrorKey::Context], ["boom"]);
    /// assert!(failure.context().is_failure());
    /// ```
    pub fn fail<T, D>(mut self, detail: D) -> ContextResult<T, K>
    where
        D: Into<FailureDetail>,
    {
        match detail.into() {
            FailureDetail::None => {}
            FailureDetail::Message(message) => {
                if !message.is_empty() {
                    self.errors.add(ErrorKey::Context, message);
                }
            }
            FailureDetail::Errors(errors) => self.errors.merge(&errors),
        }
        self.state = self.state.failed();

        #[cfg(feature = "tracing")]
        tracing::debug!(errors = self.errors.len(), "context failed");

        Err(Box::new(ContextFailure::new(self)))
    }

    /// Compensates every recorded interactor in reverse call order.
    ///
    /// Runs at most once per context: the context is marked rolled back before
    /// the first compensation, so later (or re-entrant) calls return `Ok(())`
    /// without doing anything. The first compensation error stops the walk
    /// and is returned unchanged; remaining entries are not compensated.
    pub fn rollback(&mut self) -> Result<(), CompensationError> {
        let Some(next) = self.state.rolled_back() else {
            #[cfg(feature = "tracing")]
            tracing::debug!("rollback already performed, skipping");
            return Ok(());
        };
        self.state = next;

        for interactor in self.called.iter().rev() {
            #[cfg(feature = "tracing")]
            tracing::debug!(interactor = interactor.name(), "compensating");

            interactor.rollback()?;
        }
        Ok(())
    }
}

impl<K> Context<K> {
    /// Returns true once the context has been failed. Rollback does not
    /// clear it.
    #[inline]
    pub fn is_failure(&self) -> bool {
        self.state.is_failure()
    }

    /// Negation of [`is_failure`](Self::is_failure).
    #[inline]
    pub fn is_success(&self) -> bool {
        !self.state.is_failure()
    }

    /// Returns true once [`rollback`](Self::rollback) has begun.
    #[inline]
    pub fn is_rolled_back(&self) -> bool {
        self.state.is_rolled_back()
    }

    /// Current lifecycle state.
    #[inline]
    pub fn state(&self) -> ContextState {
        self.state
    }

    /// Interactors recorded by [`called`](Self::called), oldest first.
    #[inline]
    pub fn call_stack(&self) -> &[InteractorRef] {
        &self.called
    }

    /// Names of the recorded interactors, oldest first.
    pub fn called_names(&self) -> Vec<&str> {
        self.called.iter().map(|interactor| interactor.name()).collect()
    }

    /// Errors recorded so far, including those merged in by `fail`.
    #[inline]
    pub fn errors(&self) -> &Errors {
        &self.errors
    }

    /// Mutable access to the errors, for recording field errors before failing.
    #[inline]
    pub fn errors_mut(&mut self) -> &mut Errors {
        &mut self.errors
    }

    /// Every stored field, declared or not.
    #[inline]
    pub fn fields(&self) -> &Fields {
        &self.fields
    }

    /// Mutable access to the raw field map.
    #[inline]
    pub fn fields_mut(&mut self) -> &mut Fields {
        &mut self.fields
    }

    /// Returns the field stored under `key`, if any.
    ///
    /// Indexing with `ctx["key"]` reads an absent field as [`Value::Null`]
    /// instead.
    #[inline]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// Stores `value` under `key`, returning the previous value.
    pub fn set<S, V>(&mut self, key: S, value: V) -> Option<Value>
    where
        S: Into<String>,
        V: Into<Value>,
    {
        self.fields.insert(key.into(), value.into())
    }

    /// Builder-style [`set`](Self::set).
    #[must_use]
    pub fn with<S, V>(mut self, key: S, value: V) -> Self
    where
        S: Into<String>,
        V: Into<Value>,
    {
        self.set(key, value);
        self
    }

    /// Removes a field, returning its value.
    #[inline]
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.fields.remove(key)
    }

    /// Returns true if a field is stored under `key`, even a null one.
    #[inline]
    pub fn contains_key(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }
}

impl<K: ContextKind> Default for Context<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: ContextKind, J> From<&Context<J>> for Context<K> {
    fn from(source: &Context<J>) -> Self {
        Self::from_context(source)
    }
}

impl<K: ContextKind> From<Fields> for Context<K> {
    fn from(fields: Fields) -> Self {
        Self::with_fields(fields)
    }
}

impl<K, S, V> FromIterator<(S, V)> for Context<K>
where
    K: ContextKind,
    S: Into<String>,
    V: Into<Value>,
{
    fn from_iter<I: IntoIterator<Item = (S, V)>>(iter: I) -> Self {
        Self::from_fields(iter)
    }
}

/// Absent fields read as [`Value::Null`].
impl<K> Index<&str> for Context<K> {
    type Output = Value;

    fn index(&self, key: &str) -> &Self::Output {
        self.fields.get(key).unwrap_or(&NULL)
    }
}

impl<K> fmt::Debug for Context<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Context")
            .field("fields", &self.fields)
            .field("called", &self.called_names())
            .field("state", &self.state)
            .field("errors", &self.errors)
            .finish()
    }
}
