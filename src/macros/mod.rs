//! Shorthand macros for declaring context kinds and failing contexts.
//!
//! - [`macro@crate::context_kind`] - Defines a marker type implementing
//!   [`ContextKind`](crate::attributes::ContextKind) with its own static
//!   attribute registry.
//! - [`macro@crate::declare`] - Declares attributes on a kind, or reads the
//!   declared set when no names are given.
//! - [`macro@crate::fail`] - Fails a context with no detail, a formatted
//!   message, or any value convertible into
//!   [`FailureDetail`](crate::FailureDetail).
//!
//! # Examples
//!
//! ```
//! use interactor_rail::{context_kind, declare, fail, Context, ContextResult};
//!
//! context_kind! {
//!     pub struct Checkout { cart, total }
//! }
//!
//! fn charge(ctx: Context<Checkout>) -> ContextResult<Context<Checkout>, Checkout> {
//!     match ctx["total"].as_i64() {
//!         Some(total) if total > 0 => Ok(ctx),
//!         Some(total) => fail!(ctx, "cannot charge {} cents", total),
//!         None => fail!(ctx),
//!     }
//! }
//!
//! assert!(declare!(Checkout).contains("cart"));
//!
//! let failure = charge(Context::from_fields([("total", 0)])).unwrap_err();
//! assert_eq!(failure.errors().get(interactor_rail::ErrorKey::Context), ["cannot charge 0 cents"]);
//! ```

/// Defines a context kind: a zero-sized marker type with its own attribute
/// registry.
///
/// The marker derives `Debug`, `Clone`, `Copy`, `Default`, `PartialEq`, `Eq`
/// and `Hash`; do not repeat those in the attributes passed in.
///
/// With a brace list, the listed attributes are declared once, the first time
/// the kind's registry is used. [`AttributeRegistry::reset`] clears them like
/// any other declaration and they are not re-applied.
///
/// [`AttributeRegistry::reset`]: crate::attributes::AttributeRegistry::reset
///
/// # Examples
///
/// ```
/// use interactor_rail::attributes::ContextKind;
/// use interactor_rail::context_kind;
///
/// context_kind! {
///     /// Context for the password reset flow.
///     pub struct PasswordReset { email, token }
/// }
///
/// assert!(PasswordReset::declared().contains("token"));
/// ```
#[macro_export]
macro_rules! context_kind {
    ($(#[$meta:meta])* $vis:vis struct $name:ident;) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
        $vis struct $name;

        impl $crate::attributes::ContextKind for $name {
            fn registry() -> &'static $crate::attributes::AttributeRegistry {
                static REGISTRY: $crate::attributes::AttributeRegistry =
                    $crate::attributes::AttributeRegistry::new();
                &REGISTRY
            }
        }
    };
    ($(#[$meta:meta])* $vis:vis struct $name:ident { $($attr:ident),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
        $vis struct $name;

        impl $crate::attributes::ContextKind for $name {
            fn registry() -> &'static $crate::attributes::AttributeRegistry {
                static REGISTRY: $crate::attributes::AttributeRegistry =
                    $crate::attributes::AttributeRegistry::new();
                static INITIAL: ::std::sync::Once = ::std::sync::Once::new();
                INITIAL.call_once(|| {
                    REGISTRY.declare([$(stringify!($attr)),+]);
                });
                &REGISTRY
            }
        }
    };
}

/// Declares attributes on a context kind, or reads its declared set.
///
/// - `declare!(Kind)` returns the declared set without changing it.
/// - `declare!(Kind: a, b)` merges `a` and `b` and returns the updated set.
///
/// # Examples
///
/// ```
/// use interactor_rail::{context_kind, declare};
///
/// context_kind! { struct Invite; }
///
/// assert!(declare!(Invite).is_empty());
/// declare!(Invite: email, email, inviter);
/// assert_eq!(declare!(Invite).len(), 2);
/// ```
#[macro_export]
macro_rules! declare {
    ($kind:ty : $($name:ident),+ $(,)?) => {
        <$kind as $crate::attributes::ContextKind>::declare([$(stringify!($name)),+])
    };
    ($kind:ty $(,)?) => {
        <$kind as $crate::attributes::ContextKind>::declared()
    };
}

/// Fails a context, producing the `Err` that aborts the chain.
///
/// - `fail!(ctx)` fails without detail.
/// - `fail!(ctx, "format {}", args)` records a formatted message under the
///   context key.
/// - `fail!(ctx, detail)` accepts anything convertible into
///   [`FailureDetail`](crate::FailureDetail), such as another context's
///   [`Errors`](crate::types::Errors).
///
/// The context is moved into the returned failure.
///
/// # Examples
///
/// ```
/// use interactor_rail::{fail, Context, ContextResult};
///
/// let ctx: Context = Context::new();
/// let result: ContextResult<(), _> = fail!(ctx, "quota of {} exceeded", 3);
///
/// let failure = result.unwrap_err();
/// assert!(failure.context().is_failure());
/// ```
#[macro_export]
macro_rules! fail {
    ($ctx:expr $(,)?) => {
        $ctx.fail($crate::FailureDetail::None)
    };
    ($ctx:expr, $fmt:literal $(, $arg:expr)* $(,)?) => {
        $ctx.fail(::std::format!($fmt $(, $arg)*))
    };
    ($ctx:expr, $detail:expr $(,)?) => {
        $ctx.fail($detail)
    };
}
