//! Tests for the quota tracker

use super::*;
use crate::error::FinsentError;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

fn tracker(tokens: u64, requests: u64, wait_secs: u64) -> (QuotaTracker, Arc<FixedWindowClock>) {
    let clock = Arc::new(FixedWindowClock::new(Duration::from_secs(wait_secs)));
    let tracker = QuotaTracker::with_clock(QuotaConfig::new(tokens, requests), clock.clone());
    (tracker, clock)
}

#[tokio::test(start_paused = true)]
async fn test_reserve_within_budget_does_not_wait() {
    let (mut tracker, _) = tracker(100, 10, 30);
    let cancel = CancellationToken::new();

    let start = Instant::now();
    for _ in 0..5 {
        let reservation = tracker.reserve(20, &cancel).await.unwrap();
        assert!(!reservation.did_wait());
    }

    assert_eq!(start.elapsed(), Duration::ZERO);
    let snapshot = tracker.snapshot();
    assert_eq!(snapshot.tokens_used, 100);
    assert_eq!(snapshot.requests_used, 5);
    assert_eq!(snapshot.total_waits(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_token_overflow_waits_and_resets_both_counters() {
    let (mut tracker, _) = tracker(100, 10, 30);
    let cancel = CancellationToken::new();

    tracker.reserve(60, &cancel).await.unwrap();
    tracker.reserve(30, &cancel).await.unwrap();

    let start = Instant::now();
    let reservation = tracker.reserve(20, &cancel).await.unwrap();

    assert!(start.elapsed() >= Duration::from_secs(30));
    assert_eq!(reservation.waited, Some(Duration::from_secs(30)));
    let snapshot = tracker.snapshot();
    assert_eq!(snapshot.tokens_used, 20);
    assert_eq!(snapshot.requests_used, 1);
    assert_eq!(snapshot.token_waits, 1);
    assert_eq!(snapshot.request_waits, 0);
}

#[tokio::test(start_paused = true)]
async fn test_oversized_item_waits_once_then_is_admitted() {
    let (mut tracker, _) = tracker(10, 500, 45);
    let cancel = CancellationToken::new();

    let reservation = tracker.reserve(15, &cancel).await.unwrap();
    assert!(reservation.did_wait());
    assert_eq!(tracker.snapshot().token_waits, 1);
    assert_eq!(tracker.snapshot().tokens_used, 15);

    // The window is over budget now, so the next item forces another reset
    let reservation = tracker.reserve(1, &cancel).await.unwrap();
    assert!(reservation.did_wait());
    assert_eq!(tracker.snapshot().token_waits, 2);
    assert_eq!(tracker.snapshot().tokens_used, 1);
}

#[tokio::test(start_paused = true)]
async fn test_request_budget_blocks_next_call() {
    let (mut tracker, _) = tracker(1_000, 3, 12);
    let cancel = CancellationToken::new();

    for _ in 0..3 {
        assert!(!tracker.reserve(10, &cancel).await.unwrap().did_wait());
    }

    let start = Instant::now();
    let reservation = tracker.reserve(10, &cancel).await.unwrap();
    assert!(reservation.did_wait());
    assert!(start.elapsed() >= Duration::from_secs(12));

    let snapshot = tracker.snapshot();
    assert_eq!(snapshot.request_waits, 1);
    assert_eq!(snapshot.token_waits, 0);
    assert_eq!(snapshot.requests_used, 1);
    // A request wait leaves the token counter alone
    assert_eq!(snapshot.tokens_used, 40);
}

#[tokio::test(start_paused = true)]
async fn test_tokens_never_exceed_budget_for_fitting_items() {
    let (mut tracker, _) = tracker(50, 1_000, 60);
    let cancel = CancellationToken::new();

    for estimate in [7_u64, 13, 29, 1, 50, 3, 22, 22, 22, 49, 2] {
        tracker.reserve(estimate, &cancel).await.unwrap();
        assert!(tracker.snapshot().tokens_used <= 50);
    }
}

#[tokio::test(start_paused = true)]
async fn test_disabled_quota_never_waits() {
    let mut tracker = QuotaTracker::with_clock(
        QuotaConfig {
            tokens_per_minute: 1,
            requests_per_minute: 1,
            enabled: false,
        },
        Arc::new(FixedWindowClock::new(Duration::from_secs(60))),
    );
    let cancel = CancellationToken::new();

    let start = Instant::now();
    for _ in 0..10 {
        assert!(!tracker.reserve(100, &cancel).await.unwrap().did_wait());
    }
    assert_eq!(start.elapsed(), Duration::ZERO);
    assert_eq!(tracker.snapshot().requests_used, 10);
}

#[tokio::test(start_paused = true)]
async fn test_cancelled_wait_charges_nothing() {
    let (mut tracker, _) = tracker(10, 10, 60);
    let cancel = CancellationToken::new();
    tracker.reserve(8, &cancel).await.unwrap();

    cancel.cancel();
    let result = tracker.reserve(5, &cancel).await;

    assert!(matches!(result, Err(FinsentError::Cancelled)));
    let snapshot = tracker.snapshot();
    assert_eq!(snapshot.tokens_used, 8);
    assert_eq!(snapshot.requests_used, 1);
    assert_eq!(snapshot.token_waits, 0);
}

#[tokio::test(start_paused = true)]
async fn test_cancel_during_wait_returns_promptly() {
    let (mut tracker, _) = tracker(10, 10, 60);
    let cancel = CancellationToken::new();
    tracker.reserve(10, &cancel).await.unwrap();

    let canceller = cancel.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_secs(5)).await;
        canceller.cancel();
    });

    let start = Instant::now();
    let result = tracker.reserve(1, &cancel).await;
    assert!(matches!(result, Err(FinsentError::Cancelled)));
    assert!(start.elapsed() < Duration::from_secs(60));
}

#[tokio::test(start_paused = true)]
async fn test_new_window_resets_counters_without_waiting() {
    let (mut tracker, clock) = tracker(10, 2, 60);
    let cancel = CancellationToken::new();

    tracker.reserve(9, &cancel).await.unwrap();
    tracker.reserve(1, &cancel).await.unwrap();

    clock.advance();

    let start = Instant::now();
    let reservation = tracker.reserve(10, &cancel).await.unwrap();
    assert!(!reservation.did_wait());
    assert_eq!(start.elapsed(), Duration::ZERO);
    assert_eq!(tracker.snapshot().tokens_used, 10);
    assert_eq!(tracker.snapshot().requests_used, 1);
}

#[test]
fn test_system_clock_wait_is_at_most_one_minute() {
    let wait = SystemClock.until_next_window();
    assert!(wait <= Duration::from_secs(60));
    assert!(SystemClock.current_window() > 0);
}

#[test]
fn test_estimate_tokens_counts_characters() {
    assert_eq!(estimate_tokens(""), 0);
    assert_eq!(estimate_tokens("UBS"), 3);
    assert_eq!(estimate_tokens("Zürich"), 6);
}

#[test]
fn test_quota_config_defaults() {
    let config = QuotaConfig::default();
    assert_eq!(config.tokens_per_minute, 400_000);
    assert_eq!(config.requests_per_minute, 500);
    assert!(config.enabled);
    assert!(!QuotaConfig::disabled().enabled);
}

#[test]
fn test_reserve_charges_fitting_item_immediately() {
    let (mut tracker, _) = tracker(50, 5, 30);
    let cancel = CancellationToken::new();

    let reservation = tokio_test::block_on(tracker.reserve(20, &cancel)).unwrap();
    assert_eq!(reservation.estimated_tokens, 20);
    assert!(!reservation.did_wait());
    assert_eq!(tracker.snapshot().tokens_used, 20);
    assert_eq!(tracker.snapshot().requests_used, 1);
}
