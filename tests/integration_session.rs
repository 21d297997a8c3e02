use assert_matches::assert_matches;

use typetarot::archetype::{analyze_typing_pattern, classify, ArchetypeKind, Thresholds};
use typetarot::capture::{SubPhase, DEFAULT_SENTENCE};
use typetarot::keystroke::{Key, Keystroke};
use typetarot::metrics::MetricsSnapshot;
use typetarot::quality::{detect_spam_pattern, detect_typos};
use typetarot::session::{Phase, Session, SessionConfig, SessionEvent, SessionView};

fn session(message: &str) -> Session {
    Session::new(SessionConfig {
        message: message.to_string(),
        ..SessionConfig::default()
    })
}

fn type_text(mut s: Session, text: &str, start: u64, interval: u64) -> Session {
    for (i, c) in text.chars().enumerate() {
        s = s.apply(SessionEvent::Key(Key::Char(c)), start + i as u64 * interval);
    }
    s
}

fn snapshot(wpm: f64, accuracy: f64, typo_rate: f64, variance: f64, spam: bool) -> MetricsSnapshot {
    MetricsSnapshot {
        wpm,
        accuracy,
        typo_rate,
        rhythm_variance: variance,
        is_spam: spam,
        ..MetricsSnapshot::zeroed()
    }
}

#[test]
fn reveal_completes_in_any_order_and_backspace_undoes() {
    let s = type_text(session("cab"), "BaC", 0, 100);
    assert_matches!(s.view(), SessionView::Reveal { complete: true, .. });

    let s = type_text(session("cab"), "cab", 0, 100).apply(SessionEvent::Key(Key::Backspace), 400);
    assert_matches!(s.view(), SessionView::Reveal { complete: false, .. });
    assert_eq!(s.phase(), Phase::Reveal);
}

#[test]
fn skip_moves_to_typing_without_recording_trigger() {
    let s = type_text(session("cab"), "skip", 0, 100);

    assert_eq!(s.phase(), Phase::Typing);
    assert_eq!(s.reveal().keystrokes.len(), 3);
    assert!(s.capture().scripted_keystrokes.is_empty());
}

#[test]
fn scripted_gate_needs_exact_sentence() {
    let s = type_text(session("cab"), "skip", 0, 100);
    let s = type_text(s, DEFAULT_SENTENCE, 1_000, 150);
    assert_matches!(s.view(), SessionView::Typing { can_advance: true, .. });

    let trailing = type_text(s.clone(), " ", 20_000, 150);
    assert_matches!(trailing.view(), SessionView::Typing { can_advance: false, .. });
    let trailing = trailing.apply(SessionEvent::Advance, 21_000);
    assert_matches!(
        trailing.view(),
        SessionView::Typing {
            sub_phase: SubPhase::Scripted,
            ..
        }
    );

    let s = s.apply(SessionEvent::Advance, 21_000);
    assert_matches!(
        s.view(),
        SessionView::Typing {
            sub_phase: SubPhase::Free,
            ..
        }
    );
}

#[test]
fn full_run_classifies_once() {
    let s = type_text(session("cab"), "cab", 0, 200).apply(SessionEvent::Advance, 700);
    let s = type_text(s, DEFAULT_SENTENCE, 1_000, 150).apply(SessionEvent::Advance, 8_000);
    let s = type_text(s, "the river went past my house", 8_200, 150);
    let s = s.apply(SessionEvent::Submit, 13_000);

    assert_eq!(s.phase(), Phase::Reading);
    assert_matches!(s.view(), SessionView::Reading(reading) => {
        assert!(reading.misspelled_words.is_empty());
    });

    let reset = s.apply(SessionEvent::Reset, 14_000);
    assert_eq!(reset.phase(), Phase::Reveal);
}

#[test]
fn metrics_are_idempotent() {
    let s = type_text(session("cab"), "skip", 0, 100);
    let s = type_text(s, "The quick", 1_000, 173);
    assert_eq!(s.metrics(9_999), s.metrics(9_999));
}

#[test]
fn typo_rate_stays_in_range() {
    for text in ["", "the cat", "zzq xxv", "the zzq", "a b c"] {
        let report = detect_typos(text);
        assert!((0.0..=100.0).contains(&report.typo_rate), "{text}");
        assert_eq!(report.typo_rate == 0.0, report.typo_count == 0, "{text}");
    }
}

#[test]
fn fast_repeats_are_spam() {
    let mut keys: Vec<Keystroke> = Vec::new();
    for i in 0..4u64 {
        let prev = keys.last().map(|k| k.timestamp);
        keys.push(Keystroke::new(Key::Char('a'), 1_000 + i * 30, prev, false));
    }
    assert!(detect_spam_pattern(&keys));
}

#[test]
fn archetype_boundaries() {
    let t = Thresholds::default();
    assert_eq!(
        classify(&snapshot(60.0, 96.0, 5.0, 100.0, false), &t),
        ArchetypeKind::PrecisionArrow
    );
    assert_eq!(
        classify(&snapshot(60.0, 70.0, 5.0, 100.0, false), &t),
        ArchetypeKind::RushingWind
    );
    assert_eq!(
        classify(&snapshot(70.0, 96.0, 0.0, 100.0, true), &t),
        ArchetypeKind::RushingWind
    );
}

#[test]
fn classifier_needs_keystrokes() {
    let m = snapshot(45.0, 99.0, 0.0, 100.0, false);
    assert!(analyze_typing_pattern(Some(&m), &[], &[], &Thresholds::default()).is_none());
}
