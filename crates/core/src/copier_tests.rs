use super::*;
use crate::{
    capability::System,
    error::Op,
    memory::{CollectingStorer, Journal, ScriptedPuller},
};

fn lines(n: usize) -> Vec<String> {
    (1..=n).map(|i| format!("R{i}")).collect()
}

fn journaled(
    puller: ScriptedPuller,
    storer: CollectingStorer,
) -> (System<ScriptedPuller, CollectingStorer>, Journal) {
    let journal = Journal::default();
    let system = System::new(
        puller.with_journal(journal.clone()),
        storer.with_journal(journal.clone()),
    );
    (system, journal)
}

#[test]
fn flushes_preserve_order_and_respect_batch_size() {
    let input = lines(7);

    for batch in 1..=9 {
        let (mut system, journal) =
            journaled(ScriptedPuller::new(input.clone()), CollectingStorer::new());

        let report = copy(&mut system, batch).expect("copy ends at end of stream");
        let flushes = journal.flushes();

        assert!(
            flushes.iter().all(|f| !f.is_empty() && f.len() <= batch),
            "batch {batch}: flush sizes out of range: {flushes:?}"
        );
        assert_eq!(flushes.concat(), input, "batch {batch}: records reordered or lost");
        assert_eq!(report.records, 7, "batch {batch}");
        assert_eq!(report.batches, 7u64.div_ceil(batch as u64), "batch {batch}");
    }
}

#[test]
fn immediate_end_of_stream_copies_nothing() {
    let mut system = System::new(
        ScriptedPuller::new(Vec::<String>::new()),
        CollectingStorer::new(),
    );

    let report = copy(&mut system, 3).expect("end of stream is not an error");

    assert_eq!(report, CopyReport::default());
    assert!(system.storer().stored().is_empty());
    assert_eq!(system.puller().calls(), 1);
}

#[test]
fn five_records_in_batches_of_three() {
    let (mut system, journal) = journaled(ScriptedPuller::new(lines(5)), CollectingStorer::new());

    let report = copy(&mut system, 3).expect("copy ends at end of stream");

    assert_eq!(journal.flushes(), vec![vec!["R1", "R2", "R3"], vec!["R4", "R5"]]);
    assert_eq!(
        report,
        CopyReport {
            records: 5,
            batches: 2
        }
    );
    // Three pulls per full batch, then two records and the end of stream.
    assert_eq!(system.puller().calls(), 6);
}

#[test]
fn pull_failure_flushes_partial_batch_first() {
    let (mut system, journal) = journaled(
        ScriptedPuller::new(lines(5)).failing_at(2),
        CollectingStorer::new(),
    );

    let err = copy(&mut system, 3).expect_err("pull failure must surface");

    assert_eq!(journal.flushes(), vec![vec!["R1"]]);
    match &err {
        CopyError::Pull { error, report } => {
            assert_eq!(error.op, Op::Pull);
            assert_eq!(
                *report,
                CopyReport {
                    records: 1,
                    batches: 1
                }
            );
        }
        other => panic!("expected pull failure, got {other:?}"),
    }
}

#[test]
fn pull_failure_at_start_of_batch_flushes_nothing_more() {
    let (mut system, journal) = journaled(
        ScriptedPuller::new(lines(6)).failing_at(4),
        CollectingStorer::new(),
    );

    let err = copy(&mut system, 3).expect_err("pull failure must surface");

    assert_eq!(journal.flushes(), vec![vec!["R1", "R2", "R3"]]);
    assert!(matches!(err, CopyError::Pull { .. }), "got {err:?}");
    assert_eq!(err.report().map(|r| r.records), Some(3));
}

#[test]
fn store_failure_stops_before_source_is_exhausted() {
    let mut system = System::new(
        ScriptedPuller::new(lines(9)),
        CollectingStorer::new().failing_at(2),
    );

    let err = copy(&mut system, 3).expect_err("store failure must surface");

    match &err {
        CopyError::Store { error, report } => {
            assert_eq!(error.op, Op::Store);
            assert_eq!(
                *report,
                CopyReport {
                    records: 1,
                    batches: 0
                }
            );
        }
        other => panic!("expected store failure, got {other:?}"),
    }
    assert_eq!(system.storer().stored(), ["R1"]);
    assert_eq!(system.puller().calls(), 3, "no pulls after the failed flush");
}

#[test]
fn store_failure_wins_over_pull_failure_in_same_pass() {
    let mut system = System::new(
        ScriptedPuller::new(lines(5)).failing_at(3),
        CollectingStorer::new().failing_at(1),
    );

    let err = copy(&mut system, 3).expect_err("copy must fail");

    assert!(matches!(err, CopyError::Store { .. }), "got {err:?}");
}

#[test]
fn zero_batch_is_rejected_before_pulling() {
    let mut system = System::new(ScriptedPuller::new(lines(3)), CollectingStorer::new());

    let err = copy(&mut system, 0).expect_err("zero batch must be rejected");

    assert!(matches!(err, CopyError::InvalidBatch));
    assert!(err.report().is_none());
    assert_eq!(system.puller().calls(), 0);
}

#[test]
fn pull_reports_filled_prefix_and_stop() {
    let cases: &[(usize, usize, usize, bool)] = &[
        // (available lines, buffer len, expected filled, expect stop)
        (5, 3, 3, false),
        (2, 3, 2, true),
        (0, 3, 0, true),
        (3, 3, 3, false),
    ];

    for &(available, len, filled, stopped) in cases {
        let mut puller = ScriptedPuller::new(lines(available));
        let mut buf = vec![Record::default(); len];

        let fill = pull(&mut puller, &mut buf);

        assert_eq!(fill.filled, filled, "available {available}, len {len}");
        assert_eq!(
            fill.stop.is_some(),
            stopped,
            "available {available}, len {len}"
        );
        if stopped {
            assert_eq!(fill.stop, Some(Stop::EndOfStream));
        }
        let got: Vec<&str> = buf[..fill.filled].iter().map(|r| r.line.as_str()).collect();
        assert_eq!(got, lines(filled));
    }
}

#[test]
fn store_reports_progress_before_failure() {
    let buf: Vec<Record> = lines(4).into_iter().map(Record::new).collect();

    let mut ok = CollectingStorer::new();
    assert_eq!(store(&mut ok, &buf), Ok(4));

    let mut failing = CollectingStorer::new().failing_at(3);
    let failure = store(&mut failing, &buf).expect_err("third store fails");
    assert_eq!(failure.stored, 2);
    assert_eq!(failure.error.op, Op::Store);
    assert_eq!(failing.stored(), ["R1", "R2"]);
}

#[test]
fn copy_error_displays_the_operation_error() {
    let mut system = System::new(
        ScriptedPuller::new(lines(1)).failing_at(1),
        CollectingStorer::new(),
    );

    let err = copy(&mut system, 2).expect_err("pull failure must surface");

    assert_eq!(
        err.to_string(),
        "error reading data from scripted puller: scripted failure on call 1"
    );
    assert_eq!(err.operation().map(|e| e.op), Some(Op::Pull));
}

#[test]
fn report_serializes_as_json() {
    let report = CopyReport {
        records: 5,
        batches: 2,
    };

    let json = serde_json::to_string(&report).expect("serialize report");

    assert_eq!(json, r#"{"records":5,"batches":2}"#);
}
