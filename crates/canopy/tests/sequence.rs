mod support;

use canopy::builder::{sequence, sequence_all};
use canopy::{NullStatusSink, Status};
use support::{always, ctx, scripted, Journal};

use Status::{Failure, Running, Success};

#[test]
fn sequence_resumes_at_the_running_child() {
    let mut seq = sequence(vec![
        always("a", Success),
        scripted("b", &[Running, Success]),
        scripted("c", &[Running, Success]),
    ]);
    let mut journal = Journal::default();

    assert_eq!(seq.tick(&ctx(), &mut journal, &mut NullStatusSink), Running);
    assert_eq!(journal.take_ticks(), vec!["a", "b"]);

    // `a` is not re-checked; `b` finishes and the sequence moves straight on to `c`.
    assert_eq!(seq.tick(&ctx(), &mut journal, &mut NullStatusSink), Running);
    assert_eq!(journal.take_ticks(), vec!["b", "c"]);

    assert_eq!(seq.tick(&ctx(), &mut journal, &mut NullStatusSink), Success);
    assert_eq!(journal.take_ticks(), vec!["c"]);

    assert_eq!(journal.count("reset:b"), 1);
    assert_eq!(journal.count("success:b"), 1);
}

#[test]
fn sequence_fails_fast_and_restarts_from_the_first_child() {
    let mut seq = sequence(vec![
        always("a", Success),
        always("b", Failure),
        always("c", Success),
    ]);
    let mut journal = Journal::default();

    assert_eq!(seq.tick(&ctx(), &mut journal, &mut NullStatusSink), Failure);
    assert_eq!(journal.take_ticks(), vec!["a", "b"]);
    assert!(!seq.is_active());

    assert_eq!(seq.tick(&ctx(), &mut journal, &mut NullStatusSink), Failure);
    assert_eq!(journal.take_ticks(), vec!["a", "b"]);
    assert_eq!(journal.count("reset:c"), 0);
}

#[test]
fn always_check_all_nodes_re_evaluates_satisfied_children_every_tick() {
    let mut seq = sequence_all(vec![
        always("a", Success),
        always("b", Success),
        always("c", Running),
    ]);
    let mut journal = Journal::default();

    for _ in 0..3 {
        assert_eq!(seq.tick(&ctx(), &mut journal, &mut NullStatusSink), Running);
        assert_eq!(journal.take_ticks(), vec!["a", "b", "c"]);
    }
    assert_eq!(journal.count("reset:c"), 1);
}

#[test]
fn without_the_flag_satisfied_children_are_skipped() {
    let mut seq = sequence(vec![
        always("a", Success),
        always("b", Success),
        always("c", Running),
    ]);
    let mut journal = Journal::default();

    seq.tick(&ctx(), &mut journal, &mut NullStatusSink);
    assert_eq!(journal.take_ticks(), vec!["a", "b", "c"]);
    seq.tick(&ctx(), &mut journal, &mut NullStatusSink);
    assert_eq!(journal.take_ticks(), vec!["c"]);
}

#[test]
fn always_check_all_nodes_cascades_to_success_in_one_tick() {
    let mut seq = sequence_all(vec![
        always("a", Success),
        always("b", Success),
        scripted("c", &[Running, Success]),
    ]);
    let mut journal = Journal::default();

    assert_eq!(seq.tick(&ctx(), &mut journal, &mut NullStatusSink), Running);
    assert_eq!(seq.tick(&ctx(), &mut journal, &mut NullStatusSink), Success);
    assert_eq!(journal.take_ticks(), vec!["a", "b", "c", "a", "b", "c"]);
}

#[test]
fn abandoned_running_child_is_cancelled() {
    let mut seq = sequence_all(vec![
        scripted("a", &[Success, Running]),
        always("b", Running),
    ]);
    let mut journal = Journal::default();

    seq.tick(&ctx(), &mut journal, &mut NullStatusSink);
    assert_eq!(journal.take_ticks(), vec!["a", "b"]);

    // `a` now runs, so `b` is no longer reached and gets cancelled.
    assert_eq!(seq.tick(&ctx(), &mut journal, &mut NullStatusSink), Running);
    assert_eq!(journal.take_ticks(), vec!["a"]);
    assert_eq!(journal.count("cancel:b"), 1);
    assert!(!seq.children()[1].is_active());
}

#[test]
fn empty_sequence_succeeds() {
    let mut seq = sequence::<Journal>(Vec::new());
    assert_eq!(seq.tick(&ctx(), &mut Journal::default(), &mut NullStatusSink), Success);
}
