//! Integration tests for the caller-side retry policy.

use std::cell::Cell;
use std::time::Duration;

use oda_cli::retry::{Backoff, retry_with_backoff};
use oda_schemas::SchemaError;

fn network_error() -> SchemaError {
    SchemaError::Network {
        url: "https://stats.oecd.org/FileView2.aspx".to_string(),
        message: "connection reset".to_string(),
    }
}

fn no_delay(max_retries: u32) -> Backoff {
    Backoff::new(max_retries, Duration::ZERO)
}

#[test]
fn transient_failures_are_retried_until_success() {
    let calls = Cell::new(0);

    let result = retry_with_backoff(&no_delay(3), || {
        calls.set(calls.get() + 1);
        if calls.get() < 3 {
            Err(network_error())
        } else {
            Ok(calls.get())
        }
    });

    assert_eq!(result.unwrap(), 3);
    assert_eq!(calls.get(), 3);
}

#[test]
fn retries_stop_after_the_limit() {
    let calls = Cell::new(0);

    let result: Result<(), _> = retry_with_backoff(&no_delay(2), || {
        calls.set(calls.get() + 1);
        Err(network_error())
    });

    assert!(matches!(result, Err(SchemaError::Network { .. })));
    assert_eq!(calls.get(), 3);
}

#[test]
fn permanent_failures_are_not_retried() {
    let calls = Cell::new(0);

    let result: Result<(), _> = retry_with_backoff(&no_delay(5), || {
        calls.set(calls.get() + 1);
        Err(SchemaError::UpdateFailed {
            name: "dac2_codes_area".to_string(),
        })
    });

    assert!(matches!(result, Err(SchemaError::UpdateFailed { .. })));
    assert_eq!(calls.get(), 1);
}

#[test]
fn backoff_doubles_each_retry() {
    let backoff = Backoff::new(4, Duration::from_millis(100));
    assert_eq!(backoff.delay(1), Duration::from_millis(100));
    assert_eq!(backoff.delay(2), Duration::from_millis(200));
    assert_eq!(backoff.delay(4), Duration::from_millis(800));
}
