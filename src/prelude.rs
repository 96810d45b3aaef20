//! Convenience re-exports for common usage patterns.
//!
//! ```
//! use interactor_rail::prelude::*;
//!
//! struct Greet;
//! impl Rollback for Greet {}
//! impl Interactor for Greet {
//!     fn call(&self, ctx: Context) -> ContextResult<Context> {
//!         match ctx["name"].as_str().map(str::to_owned) {
//!             Some(name) => Ok(ctx.with("greeting", format!("hello {}", name))),
//!             None => fail!(ctx, "name is required"),
//!         }
//!     }
//! }
//!
//! let ctx = Organizer::new()
//!     .then(Greet)
//!     .run(Context::from_fields([("name", "ada")]))
//!     .unwrap();
//! assert_eq!(ctx["greeting"].as_str(), Some("hello ada"));
//! ```
//!
//! # What's Included
//!
//! - **Macros**: [`context_kind!`], [`declare!`], [`fail!`]
//! - **Types**: [`Context`], [`ContextFailure`], [`ContextResult`], [`Errors`],
//!   [`ErrorKey`], [`Value`], [`Organizer`], [`ChainError`]
//! - **Traits**: [`ContextKind`], [`Interactor`], [`Rollback`]

// Macros
pub use crate::{context_kind, declare, fail};

// Core types
pub use crate::context::{Context, ContextFailure, ContextResult, FailureDetail};
pub use crate::organizer::{ChainError, Organizer};
pub use crate::types::{ErrorKey, Errors, Value};

// Traits
pub use crate::attributes::ContextKind;
pub use crate::traits::{CompensationError, Interactor, Rollback};
