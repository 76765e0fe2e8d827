// Runtime tests: sessions driven by Tokio timers under paused time

use fitpair::core::Phase;
use fitpair::models::{Deck, Destination, SessionInput, SwipeConfig};
use fitpair::services::{feed, parse_script, RecordingNavigator, SessionDriver};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::Instant;

#[tokio::test(start_paused = true)]
async fn test_driver_replays_match_flow() {
    let script = parse_script(
        r#"
{"at_ms": 0, "type": "pointer_down", "x": 0}
{"at_ms": 30, "type": "pointer_move", "x": 90}
{"at_ms": 60, "type": "pointer_move", "x": 180}
{"at_ms": 90, "type": "pointer_up"}
{"at_ms": 1500, "type": "continue_browsing"}
{"at_ms": 1800, "type": "reject"}
"#,
    )
    .unwrap();

    let driver = SessionDriver::new(Deck::mock(), SwipeConfig::default(), RecordingNavigator::new());
    let (tx, rx) = mpsc::channel(16);
    tokio::spawn(feed(script, tx));

    let start = Instant::now();
    let session = driver.run(rx).await;

    // Driver waits for the reject's settle and reveal before returning
    assert!(start.elapsed() >= Duration::from_millis(1800 + 375 + 200));
    assert_eq!(session.matches().len(), 1);
    assert_eq!(session.matches()[0].candidate.name, "Ana Silva");
    assert_eq!(session.cursor(), 0);
    assert_eq!(session.stats().wraps, 1);
    assert!(session.is_visible());
    assert_eq!(session.phase(), Phase::Idle);
    assert_eq!(session.scheduler().pending(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_driver_stops_on_leave_and_cancels_timers() {
    let driver = SessionDriver::new(Deck::mock(), SwipeConfig::default(), RecordingNavigator::new());
    let (tx, rx) = mpsc::channel(16);

    let handle = tokio::spawn(driver.run(rx));
    tx.send(SessionInput::Like).await.unwrap();
    tx.send(SessionInput::Leave { destination: Destination::Gyms }).await.unwrap();

    let session = handle.await.unwrap();
    assert!(session.is_torn_down());
    assert_eq!(session.scheduler().pending(), 0);
    assert!(session.matches().is_empty());
    assert_eq!(session.navigator().visited(), &[Destination::Gyms]);

    // Channel stays usable by the sender but nobody is listening
    assert!(tx.send(SessionInput::Reject).await.is_err());
}

#[tokio::test(start_paused = true)]
async fn test_driver_start_conversation() {
    let driver = SessionDriver::new(Deck::mock(), SwipeConfig::default(), RecordingNavigator::new());
    let (tx, rx) = mpsc::channel(16);
    let handle = tokio::spawn(driver.run(rx));

    tx.send(SessionInput::Like).await.unwrap();
    tokio::time::sleep(Duration::from_millis(1250)).await;
    tx.send(SessionInput::StartConversation).await.unwrap();
    drop(tx);

    let session = handle.await.unwrap();
    assert_eq!(
        session.navigator().visited(),
        &[Destination::Chat { candidate_id: 1 }]
    );
    assert_eq!(session.cursor(), 1);
    assert!(session.is_torn_down());
    assert_eq!(session.scheduler().pending(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_driver_with_empty_deck() {
    let driver = SessionDriver::new(Deck::default(), SwipeConfig::default(), RecordingNavigator::new());
    let (tx, rx) = mpsc::channel(16);

    tx.send(SessionInput::PointerDown { x: 0.0 }).await.unwrap();
    tx.send(SessionInput::PointerMove { x: 300.0 }).await.unwrap();
    tx.send(SessionInput::PointerUp).await.unwrap();
    drop(tx);

    let session = driver.run(rx).await;
    assert!(session.current().is_none());
    assert_eq!(session.stats().likes, 0);
    tokio_test::assert_ok!(serde_json::to_string(&session.summary()));
}
