//! Runs interactors in order against one context.
//!
//! [`Organizer`] is the thin loop around the context's bookkeeping: each
//! successful interactor is recorded with [`Context::called`], the first
//! failure stops the chain and rolls the failed context back, and the
//! outcome is reported as a [`ChainError`].
//!
//! # Examples
//!
//! ```
//! use interactor_rail::organizer::{ChainError, Organizer};
//! use interactor_rail::traits::{Interactor, Rollback};
//! use interactor_rail::{fail, Context, ContextResult};
//!
//! struct Normalize;
//! impl Rollback for Normalize {}
//! impl Interactor for Normalize {
//!     fn call(&self, mut ctx: Context) -> ContextResult<Context> {
//!         let email = ctx["email"].as_str().unwrap_or_default().to_lowercase();
//!         ctx.set("email", email);
//!         Ok(ctx)
//!     }
//! }
//!
//! struct RequireDomain;
//! impl Rollback for RequireDomain {}
//! impl Interactor for RequireDomain {
//!     fn call(&self, ctx: Context) -> ContextResult<Context> {
//!         if ctx["email"].as_str().is_some_and(|e| e.ends_with("@example.com")) {
//!             Ok(ctx)
//!         } else {
//!             fail!(ctx, "unsupported domain")
//!         }
//!     }
//! }
//!
//! let organizer: Organizer = Organizer::new().then(Normalize).then(RequireDomain);
//!
//! let ctx = organizer.run(Context::from_fields([("email", "ADA@EXAMPLE.COM")])).unwrap();
//! assert_eq!(ctx["email"].as_str(), Some("ada@example.com"));
//! assert_eq!(ctx.call_stack().len(), 2);
//!
//! match organizer.run(Context::from_fields([("email", "ada@elsewhere.org")])) {
//!     Err(ChainError::Failed(failure)) => assert!(failure.context().is_rolled_back()),
//!     other => panic!("unexpected outcome: {:?}", other),
//! }
//! ```

use crate::attributes::{ContextKind, Untyped};
use crate::context::{Context, ContextFailure};
use crate::traits::{CompensationError, Interactor, InteractorRef};
use core::fmt;
use std::sync::Arc;

/// Why a chain did not complete.
pub enum ChainError<K = Untyped> {
    /// An interactor failed; the context has been rolled back.
    Failed(Box<ContextFailure<K>>),
    /// An interactor failed and one of the compensations failed too.
    ///
    /// `source` is the compensation error exactly as the interactor returned it.
    Compensation {
        failure: Box<ContextFailure<K>>,
        source: CompensationError,
    },
}

impl<K> ChainError<K> {
    /// The failure that stopped the chain.
    pub fn failure(&self) -> &ContextFailure<K> {
        match self {
            Self::Failed(failure) | Self::Compensation { failure, .. } => failure,
        }
    }

    /// Consumes the error, returning the failed context.
    pub fn into_context(self) -> Context<K> {
        match self {
            Self::Failed(failure) | Self::Compensation { failure, .. } => failure.into_context(),
        }
    }
}

impl<K> fmt::Debug for ChainError<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Failed(failure) => f.debug_tuple("Failed").field(failure).finish(),
            Self::Compensation { failure, source } => f
                .debug_struct("Compensation")
                .field("failure", failure)
                .field("source", source)
                .finish(),
        }
    }
}

impl<K> fmt::Display for ChainError<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Failed(failure) => write!(f, "{}", failure),
            Self::Compensation { failure, source } => {
                write!(f, "{} (rollback failed: {})", failure, source)
            }
        }
    }
}

impl<K> std::error::Error for ChainError<K> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Failed(_) => None,
            Self::Compensation { source, .. } => Some(source.as_ref()),
        }
    }
}

struct Entry<K> {
    interactor: Arc<dyn Interactor<K>>,
    record: InteractorRef,
}

/// Ordered list of interactors sharing a context kind.
pub struct Organizer<K = Untyped> {
    entries: Vec<Entry<K>>,
}

impl<K: ContextKind> Organizer<K> {
    #[inline]
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Appends an interactor to the chain.
    #[must_use]
    pub fn then<I>(mut self, interactor: I) -> Self
    where
        I: Interactor<K> + 'static,
    {
        self.push(interactor);
        self
    }

    /// Appends an interactor to the chain in place.
    pub fn push<I>(&mut self, interactor: I)
    where
        I: Interactor<K> + 'static,
    {
        let shared = Arc::new(interactor);
        self.entries.push(Entry {
            interactor: shared.clone(),
            record: shared,
        });
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Runs every interactor in order.
    ///
    /// Each successful interactor is recorded on the context it returned. An
    /// interactor may return a context derived from the one it received; the
    /// organizer keeps the chain's own record of completed steps and restores
    /// any that the returned context is missing. On the first failure the
    /// failed context is rolled back (the failing interactor itself was never
    /// recorded, so it is not compensated) and the remaining interactors are
    /// skipped.
    pub fn run(&self, context: Context<K>) -> Result<Context<K>, ChainError<K>> {
        #[cfg(feature = "tracing")]
        let _span = tracing::debug_span!("organizer", interactors = self.entries.len()).entered();

        let mut context = context;
        let mut completed: Vec<InteractorRef> = Vec::with_capacity(self.entries.len());
        for entry in &self.entries {
            match entry.interactor.call(context) {
                Ok(next) => {
                    context = next;
                    carry_call_stack(&mut context, &completed);
                    context.called(entry.record.clone());
                    completed.push(entry.record.clone());
                }
                Err(mut failure) => {
                    #[cfg(feature = "tracing")]
                    tracing::debug!(
                        interactor = entry.record.name(),
                        "interactor failed, rolling back"
                    );

                    carry_call_stack(failure.context_mut(), &completed);
                    return match failure.context_mut().rollback() {
                        Ok(()) => Err(ChainError::Failed(failure)),
                        Err(source) => Err(ChainError::Compensation { failure, source }),
                    };
                }
            }
        }
        Ok(context)
    }
}

/// Re-records steps that completed earlier in the chain on a context that
/// lost them, which happens when an interactor hands on a derived context.
fn carry_call_stack<K: ContextKind>(context: &mut Context<K>, completed: &[InteractorRef]) {
    let recorded = context.call_stack().len();
    if recorded >= completed.len() {
        return;
    }

    #[cfg(feature = "tracing")]
    tracing::debug!(
        missing = completed.len() - recorded,
        "restoring call stack on derived context"
    );

    for interactor in &completed[recorded..] {
        context.called(interactor.clone());
    }
}

impl<K: ContextKind> Default for Organizer<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K> fmt::Debug for Organizer<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.entries.iter().map(|entry| entry.record.name()))
            .finish()
    }
}
