use crate::attributes::Untyped;
use crate::context::Context;
use crate::types::Errors;
use core::fmt;

/// Result of an operation that may fail a context.
///
/// The failure is boxed so the `Err` side stays pointer-sized no matter how
/// much the context carries.
pub type ContextResult<T, K = Untyped> = Result<T, Box<ContextFailure<K>>>;

/// What to record when failing a context.
///
/// Usually built through `From`: a string becomes a context-wide
/// [`Message`](Self::Message), an [`Errors`] value is merged key by key, and
/// `None` records nothing.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FailureDetail {
    /// Fail without recording anything.
    #[default]
    None,
    /// A message stored under [`ErrorKey::Context`](crate::ErrorKey::Context).
    /// Empty messages are dropped.
    Message(String),
    /// Errors merged into the context's own collection.
    Errors(Errors),
}

impl From<&str> for FailureDetail {
    fn from(message: &str) -> Self {
        Self::Message(message.to_owned())
    }
}

impl From<String> for FailureDetail {
    fn from(message: String) -> Self {
        Self::Message(message)
    }
}

impl From<Errors> for FailureDetail {
    fn from(errors: Errors) -> Self {
        Self::Errors(errors)
    }
}

impl From<&Errors> for FailureDetail {
    fn from(errors: &Errors) -> Self {
        Self::Errors(errors.clone())
    }
}

impl<D: Into<FailureDetail>> From<Option<D>> for FailureDetail {
    fn from(detail: Option<D>) -> Self {
        detail.map_or(Self::None, Into::into)
    }
}

/// Signal that a context failed and the rest of the chain must not run.
///
/// Owns the failed context so the receiver can inspect its fields and errors,
/// and roll it back.
pub struct ContextFailure<K = Untyped> {
    context: Context<K>,
}

impl<K> ContextFailure<K> {
    pub(crate) fn new(context: Context<K>) -> Self {
        Self { context }
    }

    #[inline]
    pub fn context(&self) -> &Context<K> {
        &self.context
    }

    /// Mutable access, e.g. to call [`Context::rollback`].
    #[inline]
    pub fn context_mut(&mut self) -> &mut Context<K> {
        &mut self.context
    }

    #[inline]
    pub fn into_context(self) -> Context<K> {
        self.context
    }

    /// Errors accumulated on the failed context.
    #[inline]
    pub fn errors(&self) -> &Errors {
        self.context.errors()
    }
}

impl<K> fmt::Debug for ContextFailure<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContextFailure")
            .field("context", &self.context)
            .finish()
    }
}

impl<K> fmt::Display for ContextFailure<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let errors = self.context.errors();
        if errors.is_empty() {
            f.write_str("context failed")
        } else {
            write!(f, "context failed: {}", errors)
        }
    }
}

impl<K> std::error::Error for ContextFailure<K> {}
