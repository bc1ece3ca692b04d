mod common;

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use tokio::time::{sleep, timeout};
use tokio_util::sync::CancellationToken;

use common::{BOUND, Recorder, init_tracing, sorted};
use procvisor::{App, Control, ProcessError, RuntimeError, Sink, Trigger, Worker};

fn app_with(trigger: &CancellationToken, rec: &Arc<Recorder>) -> App {
    App::builder()
        .with_trigger(trigger.clone())
        .with_sink(rec.clone())
        .build()
}

async fn until_cancelled(ctx: CancellationToken) -> Result<(), ProcessError> {
    ctx.cancelled().await;
    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn three_workers_stop_on_trigger() {
    init_tracing();
    let rec = Arc::new(Recorder::default());
    let trigger = CancellationToken::new();
    let mut app = app_with(&trigger, &rec);

    let names = ["process 1", "process 2", "process 3"];
    for name in names {
        app.add_process(name, until_cancelled);
    }

    let run = tokio::spawn(app.run());
    sleep(Duration::from_millis(100)).await;
    assert!(!run.is_finished());
    trigger.cancel();

    timeout(BOUND, run)
        .await
        .expect("run did not return in time")
        .unwrap()
        .unwrap();

    let expected: Vec<String> = names.iter().map(|s| s.to_string()).collect();
    assert_eq!(sorted(rec.started()), expected);
    assert_eq!(sorted(rec.stopped()), expected);
    assert!(rec.errors().is_empty());
    assert_eq!(rec.infos(), vec!["shutdown requested"]);
}

#[tokio::test]
async fn failing_worker_is_reported_and_run_still_returns() {
    let rec = Arc::new(Recorder::default());
    let trigger = CancellationToken::new();
    let mut app = app_with(&trigger, &rec);

    app.add_process("faulty", |_ctx| async {
        Err(ProcessError::fail("cannot bind port"))
    });

    let run = tokio::spawn(app.run());
    sleep(Duration::from_millis(50)).await;

    assert_eq!(
        rec.errors(),
        vec![(
            "faulty".to_string(),
            ProcessError::fail("cannot bind port")
        )]
    );
    assert_eq!(rec.started(), vec!["faulty"]);
    assert_eq!(rec.stopped(), vec!["faulty"]);

    trigger.cancel();
    timeout(BOUND, run).await.unwrap().unwrap().unwrap();
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn panicking_worker_does_not_affect_siblings() {
    let rec = Arc::new(Recorder::default());
    let trigger = CancellationToken::new();
    let mut app = app_with(&trigger, &rec);
    let finished = Arc::new(AtomicUsize::new(0));

    for name in ["left", "right"] {
        let finished = finished.clone();
        app.add_process(name, move |ctx| async move {
            ctx.cancelled().await;
            finished.fetch_add(1, Ordering::SeqCst);
            Ok(())
        });
    }
    app.add_process("crasher", |_ctx| async {
        tokio::task::yield_now().await;
        if true {
            panic!("index out of range");
        }
        Ok(())
    });

    let run = tokio::spawn(app.run());
    sleep(Duration::from_millis(50)).await;
    trigger.cancel();
    timeout(BOUND, run).await.unwrap().unwrap().unwrap();

    assert_eq!(finished.load(Ordering::SeqCst), 2);
    assert_eq!(
        rec.errors(),
        vec![(
            "crasher".to_string(),
            ProcessError::Panicked {
                reason: "index out of range".into()
            }
        )]
    );
    assert_eq!(rec.started().len(), 3);
    assert_eq!(rec.stopped().len(), 3);
}

#[tokio::test]
async fn opaque_panic_is_wrapped_as_internal_failure() {
    let rec = Arc::new(Recorder::default());
    let trigger = CancellationToken::new();
    let mut app = app_with(&trigger, &rec);

    app.add_process("opaque", |_ctx| async {
        if true {
            std::panic::panic_any(17_i64);
        }
        Ok(())
    });

    trigger.cancel();
    timeout(BOUND, app.run()).await.unwrap().unwrap();

    let errors = rec.errors();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].1.as_label(), "process_panicked");
    assert_eq!(errors[0].1.to_string(), "internal failure: panic occurred");
}

#[tokio::test]
async fn zero_workers_return_right_after_trigger() {
    let rec = Arc::new(Recorder::default());
    let trigger = CancellationToken::new();
    let app = app_with(&trigger, &rec);

    let run = tokio::spawn(app.run());
    sleep(Duration::from_millis(20)).await;
    trigger.cancel();
    timeout(BOUND, run).await.unwrap().unwrap().unwrap();

    assert!(rec.started().is_empty());
    assert_eq!(rec.infos().len(), 1);
}

#[tokio::test]
async fn repeated_triggers_are_harmless() {
    let rec = Arc::new(Recorder::default());
    let trigger = CancellationToken::new();
    let mut app = app_with(&trigger, &rec);
    let token = app.shutdown_token();

    app.add_process("only", until_cancelled);

    let run = tokio::spawn(app.run());
    sleep(Duration::from_millis(20)).await;
    trigger.cancel();
    trigger.cancel();
    token.cancel();
    timeout(BOUND, run).await.unwrap().unwrap().unwrap();
    token.cancel();

    assert_eq!(rec.infos().len(), 1);
    assert_eq!(rec.started(), vec!["only"]);
    assert_eq!(rec.stopped(), vec!["only"]);
}

#[tokio::test]
async fn shutdown_token_starts_shutdown_without_trigger() {
    let rec = Arc::new(Recorder::default());
    let never = CancellationToken::new();
    let mut app = app_with(&never, &rec);
    let token = app.shutdown_token();

    app.add_process("a", until_cancelled);

    let run = tokio::spawn(app.run());
    sleep(Duration::from_millis(20)).await;
    token.cancel();
    timeout(BOUND, run).await.unwrap().unwrap().unwrap();

    assert_eq!(rec.infos(), vec!["cancellation context cancelled"]);
    assert!(!never.is_cancelled());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn run_waits_for_slow_workers() {
    let rec = Arc::new(Recorder::default());
    let trigger = CancellationToken::new();
    let mut app = app_with(&trigger, &rec);
    let done = Arc::new(AtomicUsize::new(0));

    let slow_done = done.clone();
    app.add_process("slow", move |ctx| async move {
        ctx.cancelled().await;
        sleep(Duration::from_millis(150)).await;
        slow_done.fetch_add(1, Ordering::SeqCst);
        Ok(())
    });
    app.add_process("fast", until_cancelled);

    trigger.cancel();
    timeout(BOUND, app.run()).await.unwrap().unwrap();

    assert_eq!(done.load(Ordering::SeqCst), 1);
    assert_eq!(rec.stopped().len(), 2);
}

#[tokio::test]
async fn worker_that_finishes_early_is_not_restarted() {
    let rec = Arc::new(Recorder::default());
    let trigger = CancellationToken::new();
    let mut app = app_with(&trigger, &rec);
    let calls = Arc::new(AtomicUsize::new(0));

    let counter = calls.clone();
    app.add_process("oneshot", move |_ctx| async move {
        counter.fetch_add(1, Ordering::SeqCst);
        Ok(())
    });

    let run = tokio::spawn(app.run());
    sleep(Duration::from_millis(50)).await;
    assert_eq!(rec.stopped(), vec!["oneshot"]);
    trigger.cancel();
    timeout(BOUND, run).await.unwrap().unwrap().unwrap();

    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(rec.started().len(), 1);
}

struct Counter {
    ticks: AtomicUsize,
}

#[async_trait]
impl Worker for Counter {
    async fn run(&self, ctx: CancellationToken) -> Result<(), ProcessError> {
        loop {
            tokio::select! {
                _ = ctx.cancelled() => return Err(ProcessError::Canceled),
                _ = sleep(Duration::from_millis(5)) => {
                    self.ticks.fetch_add(1, Ordering::SeqCst);
                }
            }
        }
    }
}

#[tokio::test]
async fn struct_worker_runs_and_cancel_is_not_an_error() {
    let rec = Arc::new(Recorder::default());
    let trigger = CancellationToken::new();
    let mut app = app_with(&trigger, &rec);
    let counter = Arc::new(Counter {
        ticks: AtomicUsize::new(0),
    });

    app.add_worker("counter", counter.clone());

    let run = tokio::spawn(app.run());
    sleep(Duration::from_millis(60)).await;
    trigger.cancel();
    timeout(BOUND, run).await.unwrap().unwrap().unwrap();

    assert!(counter.ticks.load(Ordering::SeqCst) > 0);
    assert!(rec.errors().is_empty());
    assert_eq!(rec.stopped(), vec!["counter"]);
}

struct Panicky;

impl Sink for Panicky {
    fn on_error(&self, _: &str, _: &ProcessError) {
        panic!("sink error");
    }
    fn on_control(&self, _: &str, _: Control) {
        panic!("sink control");
    }
    fn on_info(&self, _: &str) {
        panic!("sink info");
    }
}

#[tokio::test]
async fn panicking_sink_does_not_block_shutdown() {
    let rec = Arc::new(Recorder::default());
    let trigger = CancellationToken::new();
    let mut app = App::builder()
        .with_trigger(trigger.clone())
        .with_sink(Arc::new(Panicky))
        .with_sink(rec.clone())
        .build();

    app.add_process("a", until_cancelled);
    app.add_process("b", |_ctx| async { Err(ProcessError::fail("nope")) });

    trigger.cancel();
    timeout(BOUND, app.run()).await.unwrap().unwrap();

    assert_eq!(sorted(rec.stopped()), vec!["a", "b"]);
    assert_eq!(rec.errors().len(), 1);
    assert_eq!(rec.infos().len(), 1);
}

#[tokio::test]
async fn no_sink_is_silent() {
    let trigger = CancellationToken::new();
    let mut app = App::builder().with_trigger(trigger.clone()).build();
    app.add_process("quiet", |_ctx| async { Err(ProcessError::fail("ignored")) });

    trigger.cancel();
    timeout(BOUND, app.run()).await.unwrap().unwrap();
}

struct Broken;

#[async_trait]
impl Trigger for Broken {
    async fn wait(&self) -> Result<String, RuntimeError> {
        Err(RuntimeError::Trigger {
            source: std::io::Error::other("signal driver unavailable"),
        })
    }
}

#[tokio::test]
async fn failed_trigger_still_stops_workers_then_errors() {
    let rec = Arc::new(Recorder::default());
    let mut app = App::builder()
        .with_trigger(Broken)
        .with_sink(rec.clone())
        .build();
    app.add_process("w", until_cancelled);

    let err = timeout(BOUND, app.run()).await.unwrap().unwrap_err();

    assert_eq!(err.as_label(), "runtime_trigger_failed");
    assert_eq!(rec.stopped(), vec!["w"]);
    assert!(rec.infos()[0].starts_with("shutdown trigger failed"));
}

#[test]
fn run_blocking_from_plain_thread() {
    let trigger = CancellationToken::new();
    let rec = Arc::new(Recorder::default());
    let mut app = app_with(&trigger, &rec);
    app.add_process("blocking", until_cancelled);

    let firing = trigger.clone();
    let killer = std::thread::spawn(move || {
        std::thread::sleep(Duration::from_millis(50));
        firing.cancel();
    });

    app.run_blocking().unwrap();
    killer.join().unwrap();

    assert_eq!(rec.stopped(), vec!["blocking"]);
}
