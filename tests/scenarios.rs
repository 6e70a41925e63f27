//! End-to-end highlighting scenarios against the headless host

use std::time::{Duration, Instant};

use highlight_selections::highlight::{Position, Region, SearchPattern, Scan, StyleKey, TriggerCause};
use highlight_selections::{Controller, HeadlessHost, HighlightEvent, TriggerOutcome};

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

fn region(line: usize, start: usize, end: usize) -> Region {
    Region::new(Position::new(line, start), Position::new(line, end))
}

#[test]
fn repeated_word_is_highlighted_everywhere() {
    let pattern = SearchPattern::literal("cat").unwrap();
    let starts: Vec<usize> = Scan::new(&pattern, "cat cat dog cat")
        .iter()
        .map(|o| o.start)
        .collect();
    assert_eq!(starts, vec![0, 4, 12]);

    let mut host = HeadlessHost::new();
    host.open("cat cat dog cat");
    host.select(0..3);
    let mut controller = Controller::default();

    let TriggerOutcome::Applied { style, regions, .. } = controller.activate(&mut host) else {
        panic!("expected regions to be applied");
    };
    assert_eq!(regions, 3);
    assert_eq!(
        host.regions(style),
        &[region(0, 0, 3), region(0, 4, 7), region(0, 12, 15)]
    );
}

#[test]
fn empty_selection_applies_nothing_and_clears_previous() {
    let mut host = HeadlessHost::new();
    host.open("hello hello");
    host.select(0..5);
    let mut controller = Controller::default();
    controller.activate(&mut host);
    assert_eq!(host.region_count(), 2);

    host.select(3..3);
    let outcome = controller.trigger(&mut host, TriggerCause::SelectionChanged);
    assert!(matches!(outcome, TriggerOutcome::Cleared));
    assert_eq!(host.region_count(), 0);
}

#[test]
fn special_characters_match_literally() {
    let mut host = HeadlessHost::new();
    host.open("a.b axb a.b");
    host.select(0..3);
    let mut controller = Controller::default();

    let TriggerOutcome::Applied { style, .. } = controller.activate(&mut host) else {
        panic!("expected regions to be applied");
    };
    assert_eq!(host.regions(style), &[region(0, 0, 3), region(0, 8, 11)]);
}

#[test]
fn burst_of_selection_changes_fires_once_with_latest_selection() {
    let mut host = HeadlessHost::new();
    host.open("cat dog cat bird dog cat");
    let mut controller = Controller::default();
    let sender = controller.sender();
    let t0 = Instant::now();

    let mut fired = Vec::new();
    for (i, word) in ["cat", "dog", "bird"].iter().enumerate() {
        let at = t0 + ms(3 * i as u64);
        host.select_text(word);
        sender.send_at(HighlightEvent::SelectionChanged, at).unwrap();
        if let Some(outcome) = controller.pump(&mut host, at) {
            fired.push(outcome);
        }
    }
    // Quiet period not over yet
    assert!(controller.pump(&mut host, t0 + ms(15)).is_none());

    if let Some(outcome) = controller.pump(&mut host, t0 + ms(16)) {
        fired.push(outcome);
    }
    assert_eq!(fired.len(), 1);
    assert!(matches!(fired[0], TriggerOutcome::Applied { regions: 1, .. }));
    assert_eq!(controller.cached_styles(), 1);
}

#[test]
fn retriggering_is_idempotent() {
    let mut host = HeadlessHost::new();
    host.open("one two one\ntwo one");
    host.select_text("one");
    let mut controller = Controller::default();

    let TriggerOutcome::Applied { style: first, .. } = controller.activate(&mut host) else {
        panic!("expected regions to be applied");
    };
    let before = host.regions(first).to_vec();

    let TriggerOutcome::Applied { style: second, .. } =
        controller.trigger(&mut host, TriggerCause::SelectionChanged)
    else {
        panic!("expected regions to be applied");
    };

    assert_eq!(first, second);
    assert_eq!(host.regions(second), before.as_slice());
    assert_eq!(controller.cached_styles(), 1);
    assert_eq!(host.live_styles(), 1);
}

#[test]
fn equal_length_selections_get_their_own_styles() {
    assert_ne!(StyleKey::new("cat"), StyleKey::new("dog"));

    let mut host = HeadlessHost::new();
    host.open("cat dog");
    let mut controller = Controller::default();

    host.select_text("cat");
    let TriggerOutcome::Applied { style: cat, .. } = controller.activate(&mut host) else {
        panic!("expected regions to be applied");
    };
    host.select_text("dog");
    let TriggerOutcome::Applied { style: dog, .. } =
        controller.trigger(&mut host, TriggerCause::SelectionChanged)
    else {
        panic!("expected regions to be applied");
    };

    assert_ne!(cat, dog);
    assert_eq!(controller.cached_styles(), 2);
}

#[test]
fn document_edit_rescans_with_current_selection() {
    let mut host = HeadlessHost::new();
    let id = host.open("cat dog");
    host.select(0..3);
    let mut controller = Controller::default();
    let sender = controller.sender();
    controller.activate(&mut host);

    let t0 = Instant::now();
    host.document_mut().unwrap().insert(7, " cat").unwrap();
    sender
        .send_at(HighlightEvent::DocumentChanged { document: id }, t0)
        .unwrap();

    let outcome = controller.pump(&mut host, t0 + ms(10));
    let Some(TriggerOutcome::Applied { style, .. }) = outcome else {
        panic!("expected regions to be applied");
    };
    assert_eq!(host.regions(style), &[region(0, 0, 3), region(0, 8, 11)]);
}

#[test]
fn selection_is_reread_after_edits() {
    let mut host = HeadlessHost::new();
    host.open("cat\ndog");
    host.select(4..7);
    host.document_mut().unwrap().replace_all("cat\nd");

    let mut controller = Controller::default();
    // Selection now reads "d", which still occurs once
    let TriggerOutcome::Applied { regions, .. } = controller.activate(&mut host) else {
        panic!("expected regions to be applied");
    };
    assert_eq!(regions, 1);

    host.document_mut().unwrap().replace_all("cat\n");
    let outcome = controller.trigger(&mut host, TriggerCause::DocumentChanged);
    assert!(matches!(outcome, TriggerOutcome::Cleared));
}

#[test]
fn multiline_selection_spans_lines() {
    let mut host = HeadlessHost::new();
    host.open("ab\ncd ab\ncd");
    host.select(0..5);
    let mut controller = Controller::default();

    let TriggerOutcome::Applied { style, .. } = controller.activate(&mut host) else {
        panic!("expected regions to be applied");
    };
    assert_eq!(
        host.regions(style),
        &[
            Region::new(Position::new(0, 0), Position::new(1, 2)),
            Region::new(Position::new(1, 3), Position::new(2, 2)),
        ]
    );
}

#[test]
fn every_line_of_a_long_document_is_mapped() {
    let lines = 40_000;
    let mut host = HeadlessHost::new();
    host.open(&vec!["a"; lines].join("\n"));
    host.select(0..1);
    let mut controller = Controller::default();

    let TriggerOutcome::Applied { style, regions, dropped } = controller.activate(&mut host) else {
        panic!("expected regions to be applied");
    };
    assert_eq!(regions, lines);
    assert_eq!(dropped, 0);
    let mapped = host.regions(style);
    assert_eq!(mapped[0], region(0, 0, 1));
    assert_eq!(mapped[lines - 1], region(lines - 1, 0, 1));
}
