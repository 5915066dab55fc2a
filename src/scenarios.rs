//! End-to-end runs of the title animation in virtual time.
//!
//! Each test starts an [`Animation`](crate::animation::Animation) against an
//! in-memory header and drives the clock by hand, checking the event log and
//! the document afterwards.

use crate::animator::Step;
use crate::document::Selector;
use crate::test_helpers::*;

// ===========================================================================
// Scenario A: "abcdef", minimum 5, tick 10, dwell 100
// ===========================================================================

#[test]
fn scenario_a_render_sequence() {
    let mut animation = start(header("abcdef"), timings(5, 10, 100, 10_000));
    let events = animation.advance(ms(380));

    assert_eq!(
        titles(&events),
        [
            (10, "a"),
            (20, "ab"),
            (30, "abc"),
            (40, "abcd"),
            (50, "abcde"),
            (150, "abcdef"),
            (260, "abcdef"),
            (270, "abcde"),
            (370, "abcdef"),
        ]
    );
    assert_eq!(
        dwell_starts(&events),
        [(50, 5), (160, 7), (270, 5), (380, 7)]
    );
}

#[test]
fn scenario_a_dwell_ends_reverse_direction() {
    let mut animation = start(header("abcdef"), timings(5, 10, 100, 10_000));
    let events = animation.advance(ms(300));
    assert_eq!(
        dwell_ends(&events),
        [(150, Step::Forward, 6), (260, Step::Backward, 6)]
    );
}

// ===========================================================================
// Scenario B: cursor every 50
// ===========================================================================

#[test]
fn scenario_b_cursor_alternates() {
    let mut animation = start(header("abcdef"), timings(5, 10, 100, 50));
    assert!(animation.cursor_visible());
    let events = animation.advance(ms(150));
    assert_eq!(cursor_log(&events), [(50, false), (100, true), (150, false)]);
    let cursor = animation
        .document()
        .find(&Selector::id("console"))
        .unwrap();
    assert_eq!(cursor.class_name, "console-underscore hidden");
}

#[test]
fn cursor_ignores_typing_activity() {
    let mut slow = start(header("abcdefghij"), timings(3, 7, 500, 50));
    let mut fast = start(header("abc de"), timings(2, 1, 3, 50));
    let slow_log = cursor_log(&slow.advance(ms(2_000)));
    let fast_log = cursor_log(&fast.advance(ms(2_000)));
    assert_eq!(slow_log.len(), 40);
    assert_eq!(slow_log, fast_log);
    assert!(slow_log.windows(2).all(|w| w[0].1 != w[1].1));
}

// ===========================================================================
// Properties
// ===========================================================================

#[test]
fn upper_dwell_freezes_for_one_interval() {
    let mut animation = start(header("abcdef"), timings(5, 10, 100, 10_000));
    animation.advance(ms(160));
    let frozen = animation.state();
    assert!(frozen.waiting);
    assert_eq!(frozen.letter_count, 7);

    let events = animation.advance(ms(99));
    assert!(titles(&events).is_empty());
    assert_eq!(animation.state(), frozen);

    animation.advance(ms(1));
    assert!(!animation.state().waiting);
    assert_eq!(animation.state().step, Step::Backward);
}

#[test]
fn renders_are_always_prefixes() {
    let text = "$>swift build blog_";
    let mut animation = start(header(text), timings(5, 240, 3000, 400));
    let events = animation.advance(ms(120_000));
    let rendered = titles(&events);
    assert!(!rendered.is_empty());
    for &(_, shown) in &rendered {
        assert!(text.starts_with(shown));
        assert!(!shown.is_empty());
        assert!(shown.chars().count() <= text.chars().count());
    }
}

#[test]
fn phases_change_length_by_one() {
    let mut animation = start(header("$>swift build blog_"), timings(5, 240, 3000, 400));
    let events = animation.advance(ms(60_000));
    let lengths: Vec<usize> = titles(&events)
        .iter()
        .map(|(_, s)| s.chars().count())
        .collect();
    // Consecutive renders differ by one, except across a dwell where the
    // same prefix can be shown twice.
    for pair in lengths.windows(2) {
        let diff = pair[0].abs_diff(pair[1]);
        assert!(diff <= 1, "jump between {pair:?}");
    }
}

#[test]
fn oscillates_without_clearing_the_title() {
    let mut animation = start(header("hello world"), timings(5, 10, 30, 10_000));
    let mut reached_minimum = false;
    let mut peaks = 0;
    for _ in 0..2_000 {
        animation.advance(ms(5));
        let count = animation.state().letter_count;
        if count == 5 {
            reached_minimum = true;
        }
        if reached_minimum {
            assert!((5..=12).contains(&count), "letter_count {count} out of range");
        }
        if count == 12 && animation.state().waiting {
            peaks += 1;
        }
    }
    assert!(reached_minimum);
    assert!(peaks > 0);
}

#[test]
fn stop_prevents_pending_dwell_from_firing() {
    let mut animation = start(header("abcdef"), timings(5, 10, 100, 50));
    animation.advance(ms(55));
    assert!(animation.has_pending_dwell());
    animation.stop();
    let before = animation.state();
    assert!(animation.advance(ms(1_000)).is_empty());
    assert_eq!(animation.state(), before);
    assert!(animation.state().waiting);
}

#[test]
fn independent_animations_do_not_share_state() {
    let mut a = start(header("abcdef"), fast_config(5));
    let mut b = start(header("abcdef"), fast_config(5));
    a.advance(ms(30));
    b.advance(ms(10));
    assert_eq!(a.state().letter_count, 4);
    assert_eq!(b.state().letter_count, 2);
}

#[test]
fn trace_serializes_as_tagged_json() {
    let mut animation = start(header("abcdef"), timings(5, 10, 100, 50));
    let events = animation.advance(ms(50));
    let json = serde_json::to_value(&events).unwrap();
    assert_eq!(json[0]["at_ms"], 10);
    assert_eq!(json[0]["event"], "title");
    assert_eq!(json[0]["text"], "a");
    let cursor = json
        .as_array()
        .unwrap()
        .iter()
        .find(|e| e["event"] == "cursor")
        .unwrap();
    assert_eq!(cursor["at_ms"], 50);
    assert_eq!(cursor["visible"], false);
}
