//! Traits implemented by units of business logic.
//!
//! - [`Rollback`]: the compensation capability recorded on a context's call
//!   stack. It takes no arguments; whatever an interactor needs to undo its
//!   work it must capture itself.
//! - [`Interactor`]: a step that takes a context and either hands it on or
//!   fails it.
//!
//! # Examples
//!
//! ```
//! use interactor_rail::traits::{CompensationError, Interactor, Rollback};
//! use interactor_rail::{Context, ContextResult};
//! use std::sync::atomic::{AtomicBool, Ordering};
//!
//! #[derive(Default)]
//! struct ReserveStock {
//!     reserved: AtomicBool,
//! }
//!
//! impl Rollback for ReserveStock {
//!     fn rollback(&self) -> Result<(), CompensationError> {
//!         self.reserved.store(false, Ordering::SeqCst);
//!         Ok(())
//!     }
//! }
//!
//! impl Interactor for ReserveStock {
//!     fn call(&self, mut ctx: Context) -> ContextResult<Context> {
//!         self.reserved.store(true, Ordering::SeqCst);
//!         ctx.set("reserved", true);
//!         Ok(ctx)
//!     }
//! }
//!
//! let step = ReserveStock::default();
//! let ctx = step.call(Context::new()).unwrap();
//! assert_eq!(ctx["reserved"].as_bool(), Some(true));
//! ```

use crate::attributes::Untyped;
use crate::context::{Context, ContextResult};
use std::sync::Arc;

/// Error returned by a failed compensation, passed through unchanged.
pub type CompensationError = Box<dyn std::error::Error + Send + Sync>;

/// Shared handle to a compensation capability, as stored on the call stack.
pub type InteractorRef = Arc<dyn Rollback>;

/// Compensation for work an interactor has already done.
pub trait Rollback: Send + Sync {
    /// Human readable name used in logs and debug output.
    fn name(&self) -> &str {
        core::any::type_name::<Self>()
    }

    /// Undoes the effects of a successful call.
    ///
    /// The default does nothing, which suits read-only interactors.
    fn rollback(&self) -> Result<(), CompensationError> {
        Ok(())
    }
}

/// A single unit of business logic run against a context.
///
/// Returning `Ok` passes the (possibly modified) context to the next step.
/// Returning `Err` (usually via [`Context::fail`] or [`fail!`](crate::fail))
/// stops the chain.
pub trait Interactor<K = Untyped>: Rollback {
    fn call(&self, context: Context<K>) -> ContextResult<Context<K>, K>;
}

impl<R: Rollback + ?Sized> Rollback for Arc<R> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn rollback(&self) -> Result<(), CompensationError> {
        (**self).rollback()
    }
}

impl<K, I: Interactor<K> + ?Sized> Interactor<K> for Arc<I> {
    fn call(&self, context: Context<K>) -> ContextResult<Context<K>, K> {
        (**self).call(context)
    }
}
