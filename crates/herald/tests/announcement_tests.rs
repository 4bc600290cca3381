//! Tests for the live-region announcement lifecycle.

use std::sync::Arc;
use std::time::Duration;

use herald::live_region::{Announcer, LiveRegionProvider, Politeness};
use herald_core::ManualClock;
use parking_lot::Mutex;

fn setup() -> (Arc<ManualClock>, LiveRegionProvider) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("herald=trace")
        .with_test_writer()
        .try_init();
    let clock = Arc::new(ManualClock::new());
    let provider = LiveRegionProvider::with_clock(clock.clone());
    (clock, provider)
}

fn advance(clock: &ManualClock, provider: &LiveRegionProvider, ms: u64) {
    clock.advance(Duration::from_millis(ms));
    provider.process_pending();
}

/// Record every text a region takes.
fn record(provider: &LiveRegionProvider, priority: Politeness) -> Arc<Mutex<Vec<String>>> {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = seen.clone();
    provider
        .region(priority)
        .content_changed()
        .connect(move |text: &String| sink.lock().push(text.clone()));
    seen
}

#[test]
fn test_message_visible_then_cleared() {
    let (clock, provider) = setup();
    let announcer = provider.announcer();

    for priority in Politeness::ALL {
        announcer.announce("Results updated", priority);
        advance(&clock, &provider, 100);
        assert_eq!(provider.region(priority).content(), "Results updated");
        advance(&clock, &provider, 2900);
        assert!(provider.region(priority).is_empty());
    }
}

#[test]
fn test_repeated_identical_message_is_reannounced() {
    let (clock, provider) = setup();
    let announcer = provider.announcer();
    let seen = record(&provider, Politeness::Assertive);

    announcer.announce("Error: X", Politeness::Assertive);
    advance(&clock, &provider, 100);
    announcer.announce("Error: X", Politeness::Assertive);
    advance(&clock, &provider, 100);

    assert_eq!(*seen.lock(), vec!["Error: X", "", "Error: X"]);
}

#[test]
fn test_back_to_back_calls_show_intermediate_clear() {
    let (clock, provider) = setup();
    let announcer = provider.announcer();

    announcer.announce_assertive("Error: X");
    advance(&clock, &provider, 100);
    assert_eq!(provider.assertive_message(), "Error: X");

    announcer.announce_assertive("Error: X");
    assert_eq!(provider.assertive_message(), "");
    advance(&clock, &provider, 100);
    assert_eq!(provider.assertive_message(), "Error: X");
}

#[test]
fn test_channels_are_independent() {
    let (clock, provider) = setup();
    let announcer = provider.announcer();
    let assertive = record(&provider, Politeness::Assertive);

    announcer.announce_assertive("Error: Name is required");
    advance(&clock, &provider, 100);

    let before = assertive.lock().len();
    announcer.announce_polite("Searching for pricing");
    advance(&clock, &provider, 100);
    advance(&clock, &provider, 2000);

    assert_eq!(assertive.lock().len(), before);
    assert_eq!(provider.assertive_message(), "Error: Name is required");
    assert_eq!(provider.polite_message(), "Searching for pricing");
}

#[test]
fn test_stale_clear_never_blanks_newer_message() {
    let (clock, provider) = setup();
    let announcer = provider.announcer();

    announcer.announce_polite("first");
    advance(&clock, &provider, 2950);
    announcer.announce_polite("second");
    advance(&clock, &provider, 100);
    assert_eq!(provider.polite_message(), "second");

    // Past the first call's clear deadline.
    advance(&clock, &provider, 100);
    assert_eq!(provider.polite_message(), "second");

    advance(&clock, &provider, 2800);
    assert_eq!(provider.polite_message(), "");
}

#[test]
fn test_superseded_set_never_resurrects() {
    let (clock, provider) = setup();
    let announcer = provider.announcer();
    let seen = record(&provider, Politeness::Polite);

    announcer.announce_polite("typing s");
    advance(&clock, &provider, 50);
    announcer.announce_polite("typing se");
    advance(&clock, &provider, 100);
    advance(&clock, &provider, 5000);

    assert_eq!(*seen.lock(), vec!["typing se", ""]);
}

#[test]
fn test_missing_provider_is_noop() {
    let _ = setup();
    let announcer = Announcer::from_context(None);
    announcer.announce("nobody is listening", Politeness::Assertive);
    announcer.announce_polite("still fine");
    assert!(!announcer.is_connected());
}

#[test]
fn test_slot_may_announce_from_change_signal() {
    let (clock, provider) = setup();
    let announcer = provider.announcer();
    let chained = announcer.clone();
    provider
        .region(Politeness::Assertive)
        .content_changed()
        .connect(move |text: &String| {
            if text == "Error: upload failed" {
                chained.announce_polite("Upload cancelled");
            }
        });

    announcer.announce_assertive("Error: upload failed");
    advance(&clock, &provider, 100);
    advance(&clock, &provider, 100);
    assert_eq!(provider.polite_message(), "Upload cancelled");
}

#[test]
fn test_rendering_contract() {
    let (_clock, provider) = setup();
    let polite = provider.region(Politeness::Polite).attributes();
    let assertive = provider.region(Politeness::Assertive).attributes();

    assert_eq!((polite.role, polite.aria_live), ("status", "polite"));
    assert_eq!((assertive.role, assertive.aria_live), ("alert", "assertive"));
    assert!(polite.aria_atomic && assertive.aria_atomic);
    assert_eq!(polite.class, "sr-only");
}
