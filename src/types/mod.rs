//! Data types carried by a [`Context`](crate::Context).
//!
//! - [`Value`] / [`Fields`]: the open, dynamically typed field storage.
//! - [`Errors`] / [`ErrorKey`]: messages accumulated per field or for the
//!   context as a whole.
//! - [`ContextState`]: the monotone lifecycle of a context.
//!
//! # Examples
//!
//! ```
//! use interactor_rail::types::{ErrorKey, Errors, Value};
//!
//! let mut errors = Errors::new();
//! errors.add("email", "is blank");
//! errors.add(ErrorKey::Context, "signup rejected");
//!
//! assert_eq!(errors["email"], ["is blank"]);
//! assert_eq!(Value::from(3), Value::Int(3));
//! ```
use smallvec::SmallVec;
use std::collections::BTreeMap;

pub mod accumulator;
pub mod errors;
pub mod state;
pub mod value;

pub use accumulator::*;
pub use errors::*;
pub use state::*;
pub use value::*;

/// SmallVec-backed collection used for the messages of a single error key.
///
/// Uses inline storage for one element since most keys collect exactly one
/// message.
pub type MessageVec<T> = SmallVec<[T; 1]>;

/// Named field storage of a context, ordered by key.
pub type Fields = BTreeMap<String, Value>;
