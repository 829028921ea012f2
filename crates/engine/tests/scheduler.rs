mod common;

use std::sync::Arc;
use std::time::Duration;

use common::{Answer, FakeSource, bullish_series, quiet_series, scanner};
use engine::{IntervalTicker, ManualTicker, ScanScheduler, ScanState};
use notifier::InMemorySink;
use tokio::time::Instant;

#[tokio::test]
async fn each_manual_tick_runs_one_full_cycle() {
    let source = Arc::new(
        FakeSource::new()
            .with("A", Answer::Closes(quiet_series()))
            .with("B", Answer::Fail),
    );
    let sink = Arc::new(InMemorySink::new());
    let scanner = Arc::new(scanner(&["A", "B"], source.clone(), sink));
    let (ticker, trigger) = ManualTicker::new();

    let handle = ScanScheduler::new(scanner, ticker).start();
    let mut cycles = handle.completed_cycles();

    trigger.tick();
    cycles.wait_for(|n| *n >= 1).await.unwrap();
    assert_eq!(source.calls(), ["A", "B"]);

    trigger.tick();
    trigger.tick();
    cycles.wait_for(|n| *n >= 3).await.unwrap();
    assert_eq!(source.calls().len(), 6);

    let report = handle.last_report().unwrap();
    assert_eq!(report.scanned, 2);
    assert_eq!(report.failures.len(), 1);
    assert_eq!(handle.state(), ScanState::Idle);

    handle.stop().await;
}

#[tokio::test]
async fn failures_never_stop_the_scheduler() {
    let source = Arc::new(FakeSource::new()); // every fetch fails
    let sink = Arc::new(InMemorySink::new());
    let scanner = Arc::new(scanner(&["A", "B", "C"], source.clone(), sink.clone()));
    let (ticker, trigger) = ManualTicker::new();

    let handle = ScanScheduler::new(scanner, ticker).start();
    let mut cycles = handle.completed_cycles();

    for _ in 0..5 {
        trigger.tick();
    }
    cycles.wait_for(|n| *n >= 5).await.unwrap();

    assert!(!handle.is_finished());
    assert_eq!(source.calls().len(), 15);
    assert!(sink.notifications().await.is_empty());

    handle.stop().await;
}

#[tokio::test]
async fn stop_prevents_further_cycles() {
    let source = Arc::new(FakeSource::new().with("A", Answer::Closes(quiet_series())));
    let sink = Arc::new(InMemorySink::new());
    let scanner = Arc::new(scanner(&["A"], source.clone(), sink));
    let (ticker, trigger) = ManualTicker::new();

    let handle = ScanScheduler::new(scanner, ticker).start();
    let mut cycles = handle.completed_cycles();
    trigger.tick();
    cycles.wait_for(|n| *n >= 1).await.unwrap();

    handle.stop().await;
    trigger.tick();
    tokio::time::sleep(Duration::from_millis(50)).await;

    assert_eq!(source.calls().len(), 1);
}

#[tokio::test]
async fn closing_the_ticker_ends_the_loop() {
    let source = Arc::new(FakeSource::new());
    let sink = Arc::new(InMemorySink::new());
    let scanner = Arc::new(scanner(&["A"], source, sink));
    let (ticker, trigger) = ManualTicker::new();

    let handle = ScanScheduler::new(scanner, ticker).start();
    drop(trigger);

    tokio::time::timeout(Duration::from_secs(5), async {
        while !handle.is_finished() {
            tokio::task::yield_now().await;
        }
    })
    .await
    .unwrap();
    assert_eq!(*handle.completed_cycles().borrow(), 0);
}

#[tokio::test(start_paused = true)]
async fn first_cycle_runs_at_start_then_every_interval() {
    let source = Arc::new(FakeSource::new().with("BTCUSDT", Answer::Closes(bullish_series())));
    let sink = Arc::new(InMemorySink::new());
    let scanner = Arc::new(scanner(&["BTCUSDT"], source, sink.clone()));
    let start = Instant::now();

    let handle =
        ScanScheduler::new(scanner, IntervalTicker::new(Duration::from_secs(600))).start();
    let mut cycles = handle.completed_cycles();

    cycles.wait_for(|n| *n >= 1).await.unwrap();
    assert!(start.elapsed() < Duration::from_secs(1));
    assert_eq!(sink.notifications().await.len(), 1);

    cycles.wait_for(|n| *n >= 2).await.unwrap();
    assert!(start.elapsed() >= Duration::from_secs(600));
    assert!(start.elapsed() < Duration::from_secs(601));

    handle.stop().await;
}
