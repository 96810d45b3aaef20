use crate::common::{Journal, Recorder};
use interactor_rail::attributes::{AttributeRegistry, AttributeSet, ContextKind};
use interactor_rail::types::ContextState;
use interactor_rail::{context_kind, declare, Context, Value};

context_kind! { struct Repeated; }
context_kind! { struct NoArgs; }
context_kind! { struct Bare; }
context_kind! { struct Triple; }
context_kind! { struct Sparse; }
context_kind! { struct Resettable; }
context_kind! { struct Source; }
context_kind! { struct Target; }
context_kind! { struct Undeclared; }
context_kind! { struct Copied; }
context_kind! {
    /// Kind with attributes declared at definition.
    struct Predeclared { email, name }
}

#[test]
fn declaring_the_same_name_twice_keeps_one_entry() {
    declare!(Repeated: email, email);
    let declared = declare!(Repeated: email, name);

    assert_eq!(declared.len(), 2);
    assert!(declared.contains("email"));
    assert!(declared.contains("name"));
}

#[test]
fn declare_without_names_returns_current_set_unchanged() {
    assert!(declare!(NoArgs).is_empty());

    declare!(NoArgs: a, b);
    let before = declare!(NoArgs);
    let after = NoArgs::declare(Vec::<String>::new());

    assert_eq!(before, after);
    assert_eq!(after, ["a", "b"].into_iter().collect::<AttributeSet>());
}

#[test]
fn attributes_are_empty_when_nothing_is_declared() {
    let ctx = Context::<Bare>::from_fields([("foo", "bar"), ("baz", "qux")]);

    assert!(ctx.attributes().is_empty());
    assert_eq!(ctx["foo"], Value::from("bar"));
    assert_eq!(ctx.fields().len(), 2);
}

#[test]
fn attributes_reflect_declared_fields() {
    declare!(Triple: a, b, c);
    let ctx = Context::<Triple>::from_fields([("a", "x"), ("b", "y"), ("c", "z")]);

    let attributes = ctx.attributes();
    assert_eq!(attributes.len(), 3);
    assert_eq!(attributes["a"], Value::from("x"));
    assert_eq!(attributes["b"], Value::from("y"));
    assert_eq!(attributes["c"], Value::from("z"));
}

#[test]
fn attributes_exclude_undeclared_and_null_missing_ones() {
    declare!(Sparse: a, missing);
    let ctx = Context::<Sparse>::from_fields([("a", 1), ("extra", 2)]);

    let attributes = ctx.attributes();
    assert_eq!(attributes.len(), 2);
    assert_eq!(attributes["a"], Value::Int(1));
    assert!(attributes["missing"].is_null());
    assert!(!attributes.contains_key("extra"));
}

#[test]
fn reset_clears_declarations() {
    declare!(Resettable: token);
    assert!(Resettable::registry().is_declared("token"));

    Resettable::registry().reset();

    assert!(declare!(Resettable).is_empty());
    assert!(Context::<Resettable>::from_fields([("token", "t")])
        .attributes()
        .is_empty());
}

#[test]
fn brace_form_declares_on_first_use() {
    let declared = declare!(Predeclared);

    assert_eq!(declared.len(), 2);
    assert!(declared.contains("email"));
    assert!(declared.contains("name"));
}

#[test]
fn from_attributes_copies_only_declared_fields_of_the_source_kind() {
    declare!(Source: email);
    let source = Context::<Source>::from_fields([("email", "ada@example.com"), ("password", "x")]);

    let copy = Context::<Target>::from_attributes(&source);

    assert_eq!(copy["email"].as_str(), Some("ada@example.com"));
    assert!(!copy.contains_key("password"));
}

#[test]
fn from_attributes_copies_raw_fields_when_the_source_declares_nothing() {
    let source = Context::<Undeclared>::from_fields([("foo", "bar"), ("baz", "qux")]);

    let copy = Context::<Undeclared>::from_attributes(&source);

    assert_eq!(copy.fields().len(), 2);
    assert_eq!(copy["foo"].as_str(), Some("bar"));
    assert_eq!(copy["baz"].as_str(), Some("qux"));
    assert!(copy.attributes().is_empty());
}

#[test]
fn from_attributes_starts_a_fresh_context() {
    declare!(Copied: email);
    let journal = Journal::default();
    let mut source = Context::<Copied>::from_fields([("email", "ada@example.com")]);
    source.called(Recorder::shared("a", &journal));
    let failed = source
        .fail::<(), _>("rejected")
        .unwrap_err()
        .into_context();

    let copy = Context::<Copied>::from_attributes(&failed);

    assert!(copy.call_stack().is_empty());
    assert_eq!(copy.state(), ContextState::Fresh);
    assert!(copy.is_success());
    assert!(copy.errors().is_empty());
    assert_eq!(copy["email"].as_str(), Some("ada@example.com"));
}

#[test]
fn standalone_registry_declares_and_extracts() {
    let registry = AttributeRegistry::new();
    registry.declare(["id"]);

    let fields = Context::<Bare>::from_fields([("id", 7), ("other", 8)]).fields().clone();
    let extracted = registry.extract(&fields);

    assert_eq!(extracted.len(), 1);
    assert_eq!(extracted["id"], Value::Int(7));
}

#[test]
fn attribute_set_iterates_in_sorted_order() {
    let set: AttributeSet = ["zeta", "alpha", "alpha", "mid"].into_iter().collect();

    assert_eq!(set.iter().collect::<Vec<_>>(), ["alpha", "mid", "zeta"]);
}
