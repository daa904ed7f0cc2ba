//! Heavy engine resource handling: every session is closed and every slot
//! released, whatever way the attempt ends.

use std::sync::Arc;
use std::time::Duration;

use extraction::testing::MockBrowserDriver;
use extraction::{
    EngineOutcome, ExtractionEngine, ExtractionRequest, HeavyEngineClient, SelectorSet,
};

const PRODUCT_URL: &str = "https://shop.com/p/1";

fn request() -> ExtractionRequest {
    ExtractionRequest::new(
        PRODUCT_URL,
        SelectorSet::from([
            ("title".to_string(), "h1.title".to_string()),
            ("price".to_string(), ".price".to_string()),
        ]),
    )
}

/// Let spawned cleanup tasks run.
async fn settle() {
    tokio::time::sleep(Duration::from_millis(50)).await;
}

#[tokio::test]
async fn test_missing_elements_are_null_not_failure() {
    let driver =
        Arc::new(MockBrowserDriver::new().with_element(PRODUCT_URL, "h1.title", "Product A"));
    let engine = HeavyEngineClient::new(driver.clone(), Duration::from_secs(1), 2);

    match engine.fetch(&request()).await {
        EngineOutcome::Succeeded { fields } => {
            assert_eq!(fields.get("title"), Some(&Some("Product A".to_string())));
            assert_eq!(fields.get("price"), Some(&None));
        }
        other => panic!("expected success, got {:?}", other),
    }
    assert_eq!(driver.navigations(), vec![PRODUCT_URL.to_string()]);
}

#[tokio::test]
async fn test_navigation_failure_closes_session_and_returns_no_fields() {
    let driver = Arc::new(
        MockBrowserDriver::new()
            .with_element(PRODUCT_URL, "h1.title", "Product A")
            .failing_navigation("net::ERR_NAME_NOT_RESOLVED"),
    );
    let engine = HeavyEngineClient::new(driver.clone(), Duration::from_secs(1), 2);

    let outcome = engine.fetch(&request()).await;

    match outcome {
        EngineOutcome::Failed { reason } => {
            assert!(reason.contains("net::ERR_NAME_NOT_RESOLVED"));
        }
        other => panic!("expected failure, got {:?}", other),
    }
    assert_eq!(driver.opened_sessions(), 1);
    assert_eq!(driver.closed_sessions(), 1);
    assert_eq!(engine.available_sessions(), 2);
}

#[tokio::test]
async fn test_open_failure_releases_slot() {
    let driver = Arc::new(MockBrowserDriver::new().failing_open("browser crashed"));
    let engine = HeavyEngineClient::new(driver.clone(), Duration::from_secs(1), 1);

    let outcome = engine.fetch(&request()).await;

    assert!(!outcome.is_ok());
    assert_eq!(driver.opened_sessions(), 0);
    assert_eq!(engine.available_sessions(), 1);
}

#[tokio::test]
async fn test_timeout_closes_session() {
    let driver = Arc::new(MockBrowserDriver::new().hanging_on_idle());
    let engine = HeavyEngineClient::new(driver.clone(), Duration::from_millis(100), 1);

    match engine.fetch(&request()).await {
        EngineOutcome::Failed { reason } => assert_eq!(reason, "timed out after 100ms"),
        other => panic!("expected timeout, got {:?}", other),
    }

    settle().await;
    assert_eq!(driver.opened_sessions(), 1);
    assert_eq!(driver.closed_sessions(), 1);
    assert_eq!(engine.available_sessions(), 1);
}

#[tokio::test]
async fn test_sessions_are_bounded() {
    let driver = Arc::new(MockBrowserDriver::new().hanging_on_idle());
    let engine = Arc::new(HeavyEngineClient::new(driver.clone(), Duration::from_secs(30), 1));

    let first = tokio::spawn({
        let engine = engine.clone();
        async move { engine.fetch(&request()).await }
    });
    let second = tokio::spawn({
        let engine = engine.clone();
        async move { engine.fetch(&request()).await }
    });

    settle().await;
    // Only one session may be open; the other attempt waits for the slot.
    assert_eq!(driver.opened_sessions(), 1);
    assert_eq!(engine.available_sessions(), 0);

    first.abort();
    second.abort();
    let _ = first.await;
    let _ = second.await;
    settle().await;

    assert_eq!(driver.closed_sessions(), driver.opened_sessions());
    assert_eq!(engine.available_sessions(), 1);
}

#[tokio::test]
async fn test_dropped_attempt_closes_session() {
    let driver = Arc::new(MockBrowserDriver::new().hanging_on_idle());
    let engine = Arc::new(HeavyEngineClient::new(driver.clone(), Duration::from_secs(30), 2));

    let handle = tokio::spawn({
        let engine = engine.clone();
        async move { engine.fetch(&request()).await }
    });

    settle().await;
    assert_eq!(engine.available_sessions(), 1);

    handle.abort();
    let _ = handle.await;
    settle().await;

    assert_eq!(driver.opened_sessions(), 1);
    assert_eq!(driver.closed_sessions(), 1);
    assert_eq!(engine.available_sessions(), 2);
}

#[tokio::test]
async fn test_text_and_attribute_values_are_trimmed() {
    let driver = Arc::new(
        MockBrowserDriver::new()
            .with_element(PRODUCT_URL, "h1.title", "\n  Product A  ")
            .with_attribute(PRODUCT_URL, "img.hero", "src", "  /img/a.png\n"),
    );
    let engine = HeavyEngineClient::new(driver, Duration::from_secs(1), 2);
    let request = ExtractionRequest::new(
        PRODUCT_URL,
        SelectorSet::from([
            ("title".to_string(), "h1.title".to_string()),
            ("image".to_string(), "img.hero::attr(src)".to_string()),
        ]),
    );

    match engine.fetch(&request).await {
        EngineOutcome::Succeeded { fields } => {
            assert_eq!(fields["title"].as_deref(), Some("Product A"));
            assert_eq!(fields["image"].as_deref(), Some("/img/a.png"));
        }
        other => panic!("expected success, got {:?}", other),
    }
}
