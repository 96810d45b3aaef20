use interactor_rail::types::Accumulator;
use interactor_rail::{ErrorKey, Errors};

#[test]
fn missing_keys_read_as_empty() {
    let errors = Errors::new();

    assert!(errors["email"].is_empty());
    assert!(errors[ErrorKey::Context].is_empty());
    assert!(errors.get("email").is_empty());
    assert!(!errors.contains_key("email"));
}

#[test]
fn messages_accumulate_per_key_in_order() {
    let mut errors = Errors::new();
    errors.add("email", "is blank");
    errors.add("email", "is invalid");
    errors.add(ErrorKey::Context, "rejected");

    assert_eq!(errors["email"], ["is blank", "is invalid"]);
    assert_eq!(errors.len(), 3);
    assert_eq!(errors.keys().count(), 2);
}

#[test]
fn context_key_is_distinct_from_a_field_named_context() {
    let mut errors = Errors::new();
    errors.add("context", "field message");
    errors.add(ErrorKey::Context, "context message");

    assert_eq!(errors["context"], ["field message"]);
    assert_eq!(errors[ErrorKey::Context], ["context message"]);
}

#[test]
fn merge_is_additive() {
    let mut own = Errors::new();
    own.add("name", "is short");
    own.add("email", "is blank");

    let other: Errors = [("email", "is taken"), ("age", "is negative")]
        .into_iter()
        .collect();
    own.merge(&other);

    assert_eq!(own["name"], ["is short"]);
    assert_eq!(own["email"], ["is blank", "is taken"]);
    assert_eq!(own["age"], ["is negative"]);
    assert_eq!(other.len(), 2);
}

#[test]
fn iteration_puts_context_first() {
    let mut errors = Errors::new();
    errors.add("b", "two");
    errors.add(ErrorKey::Context, "zero");
    errors.add("a", "one");

    let keys: Vec<&str> = errors.iter().map(|(key, _)| key.as_str()).collect();
    assert_eq!(keys, ["context", "a", "b"]);
}

#[test]
fn display_and_full_messages() {
    let mut errors = Errors::new();
    errors.add(ErrorKey::Context, "declined");
    errors.add("card", "is expired");
    errors.add("card", "is blocked");

    assert_eq!(
        errors.to_string(),
        "context: declined; card: is expired, is blocked"
    );
    assert_eq!(
        errors.full_messages(),
        ["declined", "card is expired", "card is blocked"]
    );
}

#[test]
fn error_key_conversions() {
    assert_eq!(ErrorKey::from("email"), ErrorKey::field("email"));
    assert_eq!(ErrorKey::from(String::from("email")).as_str(), "email");
    assert!(ErrorKey::Context.is_context());
    assert_eq!(ErrorKey::Context.to_string(), ErrorKey::CONTEXT_NAME);
}

#[test]
fn accumulator_keeps_insertion_order() {
    let mut acc = Accumulator::new();
    acc.push("a");
    acc.extend(["b", "c"]);

    assert_eq!(acc.len(), 3);
    assert!(acc.contains(&"b"));
    assert_eq!(acc.as_slice(), ["a", "b", "c"]);
    assert_eq!(acc.into_iter().collect::<Vec<_>>(), ["a", "b", "c"]);
}

#[test]
fn empty_accumulator() {
    let acc: Accumulator<String> = Accumulator::new();

    assert!(acc.is_empty());
    assert_eq!(acc.iter().count(), 0);
}
