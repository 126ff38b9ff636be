use std::time::Duration;

use axum::{Router, extract::Path, http::StatusCode, routing::get};
use latbench::{
    bench,
    config::BenchConfig,
    fetch::HttpTransport,
    report::Summary,
};
use tokio::{net::TcpListener, sync::oneshot, time::sleep};

async fn ok() -> &'static str {
    "ok"
}

async fn err() -> (StatusCode, &'static str) {
    (StatusCode::INTERNAL_SERVER_ERROR, "fail")
}

// /sleep/150
async fn sleep_ms(Path(ms): Path<u64>) -> &'static str {
    sleep(Duration::from_millis(ms)).await;
    "slept"
}

/// Local server on a random port. Dropping the sender shuts it down.
async fn spawn_server() -> (String, oneshot::Sender<()>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base_url = format!("http://{}", listener.local_addr().unwrap());

    let app = Router::new()
        .route("/ok", get(ok))
        .route("/err", get(err))
        .route("/sleep/{ms}", get(sleep_ms));

    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
    tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async {
                let _ = shutdown_rx.await;
            })
            .await
            .unwrap();
    });

    (base_url, shutdown_tx)
}

async fn measure(urls: Vec<String>, repetitions: usize, timeout: Duration) -> Vec<Summary> {
    let config = BenchConfig::builder()
        .targets(urls)
        .repetitions(repetitions)
        .timeout(timeout)
        .progress(false)
        .build();
    let targets = config.targets().unwrap();
    let transport = HttpTransport::new(config.timeout).unwrap();
    bench::measure(&config, targets, transport).await
}

#[tokio::test]
async fn every_attempt_against_a_healthy_server_is_sampled() {
    let (base, _shutdown) = spawn_server().await;

    let summaries = measure(vec![format!("{base}/ok")], 5, Duration::from_secs(5)).await;

    assert_eq!(summaries.len(), 1);
    let summary = &summaries[0];
    assert_eq!(summary.samples, 5);
    assert_eq!(summary.failures, 0);
    assert!(summary.mean > 0.0);
    assert!(summary.std >= 0.0);
}

#[tokio::test]
async fn latency_includes_server_time() {
    let (base, _shutdown) = spawn_server().await;

    let summaries = measure(vec![format!("{base}/sleep/30")], 3, Duration::from_secs(5)).await;

    assert_eq!(summaries[0].samples, 3);
    assert!(summaries[0].mean >= 0.03, "mean {}", summaries[0].mean);
}

#[tokio::test]
async fn error_status_is_still_a_sample() {
    let (base, _shutdown) = spawn_server().await;

    let summaries = measure(vec![format!("{base}/err")], 2, Duration::from_secs(5)).await;

    assert_eq!(summaries[0].samples, 2);
    assert_eq!(summaries[0].failures, 0);
}

#[tokio::test]
async fn unreachable_target_reports_sentinel() {
    // Grab a free port, then close it again so nothing is listening.
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let summaries = measure(vec![format!("http://{addr}/")], 3, Duration::from_secs(5)).await;

    let summary = &summaries[0];
    assert_eq!(summary.samples, 0);
    assert_eq!(summary.attempts, 3);
    assert_eq!(summary.failures, 3);
    assert!(summary.mean.is_nan());
    assert!(summary.to_string().contains("mean NaN std NaN samples 0"));
}

#[tokio::test]
async fn timeouts_are_ordinary_failures() {
    let (base, _shutdown) = spawn_server().await;

    let summaries = measure(
        vec![format!("{base}/sleep/2000"), format!("{base}/ok")],
        2,
        Duration::from_millis(50),
    )
    .await;

    assert_eq!(summaries[0].samples, 0);
    assert_eq!(summaries[0].failures, 2);
    assert_eq!(summaries[1].samples, 2);
}
