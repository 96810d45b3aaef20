//! Shared context, failure propagation and reverse-order rollback for chains
//! of interactors.
//!
//! An interactor is one unit of business logic. A chain of them passes a
//! single [`Context`] along: each step reads and writes its fields, and either
//! hands it on or fails it. A failed context is rolled back by compensating
//! every interactor that already completed, most recent first, exactly once.
//!
//! # Examples
//!
//! ## Declaring a context kind
//!
//! ```
//! use interactor_rail::{context_kind, Context};
//!
//! context_kind! {
//!     pub struct Order { sku, quantity }
//! }
//!
//! let ctx = Context::<Order>::from_fields([("sku", "A-1"), ("coupon", "SPRING")]);
//! let attributes = ctx.attributes();
//! assert_eq!(attributes["sku"].as_str(), Some("A-1"));
//! assert!(attributes["quantity"].is_null());
//! assert!(!attributes.contains_key("coupon"));
//! ```
//!
//! ## Failing and rolling back
//!
//! ```
//! use interactor_rail::traits::Rollback;
//! use interactor_rail::{fail, Context, ContextResult, ErrorKey};
//! use std::sync::Arc;
//!
//! struct Charge;
//! impl Rollback for Charge {}
//!
//! let mut ctx: Context = Context::new();
//! ctx.called(Arc::new(Charge));
//!
//! let result: ContextResult<()> = fail!(ctx, "card declined");
//! let mut failure = result.unwrap_err();
//!
//! assert_eq!(failure.errors()[ErrorKey::Context], ["card declined"]);
//! failure.context_mut().rollback().unwrap();
//! assert!(failure.context().is_rolled_back());
//! ```
//!
//! ## Running a chain
//!
//! See [`organizer::Organizer`].

/// Declared attributes and per-kind registries
pub mod attributes;
/// The context object, its failure signal and rollback
pub mod context;
/// Macros for defining kinds, declaring attributes and failing contexts
pub mod macros;
/// Sequential runner for interactors
pub mod organizer;
/// Convenience re-exports for quick starts
pub mod prelude;
/// Interactor and compensation traits
pub mod traits;
/// Field values, error collections and lifecycle state
pub mod types;

pub use attributes::{AttributeRegistry, AttributeSet, ContextKind, Untyped};
pub use context::{Context, ContextFailure, ContextResult, FailureDetail};
pub use organizer::{ChainError, Organizer};
pub use traits::{CompensationError, Interactor, InteractorRef, Rollback};
pub use types::{ContextState, ErrorKey, Errors, Fields, Value};
