use crate::common::{Journal, Recorder};
use interactor_rail::traits::{CompensationError, Rollback};
use interactor_rail::types::ContextState;
use interactor_rail::{Context, InteractorRef};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

fn failed_context_with(steps: &[InteractorRef]) -> Context {
    let mut ctx: Context = Context::new();
    for step in steps {
        ctx.called(step.clone());
    }
    ctx.fail::<(), _>("later step failed")
        .unwrap_err()
        .into_context()
}

#[test]
fn rollback_runs_in_reverse_call_order() {
    let journal = Journal::default();
    let mut ctx = failed_context_with(&[
        Recorder::shared("x", &journal),
        Recorder::shared("y", &journal),
    ]);

    ctx.rollback().unwrap();

    assert_eq!(journal.with_prefix("rollback:"), ["y", "x"]);
    assert!(ctx.is_rolled_back());
    assert_eq!(ctx.state(), ContextState::RolledBack { failed: true });
}

#[test]
fn second_rollback_does_nothing() {
    let journal = Journal::default();
    let mut ctx = failed_context_with(&[
        Recorder::shared("x", &journal),
        Recorder::shared("y", &journal),
    ]);

    ctx.rollback().unwrap();
    ctx.rollback().unwrap();

    assert_eq!(journal.with_prefix("rollback:"), ["y", "x"]);
}

#[test]
fn duplicate_entries_are_each_compensated() {
    let journal = Journal::default();
    let x = Recorder::shared("x", &journal);
    let mut ctx = failed_context_with(&[x.clone(), x]);

    ctx.rollback().unwrap();

    assert_eq!(journal.with_prefix("rollback:"), ["x", "x"]);
}

#[test]
fn rollback_of_empty_call_stack_only_marks_state() {
    let mut ctx = failed_context_with(&[]);

    ctx.rollback().unwrap();

    assert!(ctx.is_rolled_back());
    assert!(ctx.is_failure());
}

#[test]
fn rollback_guard_applies_to_successful_contexts_too() {
    let journal = Journal::default();
    let mut ctx: Context = Context::new();
    ctx.called(Recorder::shared("x", &journal));

    ctx.rollback().unwrap();
    ctx.rollback().unwrap();

    assert_eq!(journal.with_prefix("rollback:"), ["x"]);
    assert!(ctx.is_success());
    assert_eq!(ctx.state(), ContextState::RolledBack { failed: false });
}

#[test]
fn failing_after_rollback_keeps_rolled_back_mark() {
    let mut ctx: Context = Context::new();
    ctx.rollback().unwrap();

    let ctx = ctx.fail::<(), _>("too late").unwrap_err().into_context();

    assert!(ctx.is_failure());
    assert!(ctx.is_rolled_back());
}

#[test]
fn compensation_error_propagates_and_stops_the_walk() {
    let journal = Journal::default();
    let first: InteractorRef = Recorder::shared("first", &journal);
    let broken: InteractorRef = Arc::new(Recorder::broken_rollback("broken", &journal));
    let last: InteractorRef = Recorder::shared("last", &journal);
    let mut ctx = failed_context_with(&[first, broken, last]);

    let err = ctx.rollback().unwrap_err();

    assert_eq!(err.to_string(), "broken could not be undone");
    assert_eq!(journal.with_prefix("rollback:"), ["last", "broken"]);
    assert!(ctx.is_rolled_back());

    ctx.rollback().unwrap();
    assert_eq!(journal.with_prefix("rollback:"), ["last", "broken"]);
}

#[test]
fn call_stack_survives_rollback() {
    let journal = Journal::default();
    let mut ctx = failed_context_with(&[Recorder::shared("x", &journal)]);

    ctx.rollback().unwrap();

    assert_eq!(ctx.called_names(), ["x"]);
}

struct Counting(AtomicUsize);

impl Rollback for Counting {
    fn rollback(&self) -> Result<(), CompensationError> {
        self.0.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

#[test]
fn default_name_is_the_type_name() {
    let counting = Arc::new(Counting(AtomicUsize::new(0)));
    let mut ctx: Context = Context::new();
    ctx.called(counting.clone());

    assert!(ctx.called_names()[0].ends_with("Counting"));

    ctx.rollback().unwrap();
    ctx.rollback().unwrap();
    assert_eq!(counting.0.load(Ordering::SeqCst), 1);
}
