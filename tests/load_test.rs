//! Load testing for the reflector.

use std::time::{Duration, Instant};

use http_reflector::config::ReflectorConfig;

mod common;

#[tokio::test]
async fn test_load_performance() {
    let server = common::start_reflector(ReflectorConfig::default()).await;
    let url = server.url("/get?load=1");

    let concurrency = 20;
    let requests_per_task = 50;
    let total_requests = concurrency * requests_per_task;

    let client = common::client();
    let start = Instant::now();

    let mut handles = Vec::new();
    for _ in 0..concurrency {
        let client = client.clone();
        let url = url.clone();
        handles.push(tokio::spawn(async move {
            let mut ok = 0;
            for _ in 0..requests_per_task {
                if let Ok(res) = client.get(&url).send().await {
                    if res.status().is_success() && res.bytes().await.is_ok() {
                        ok += 1;
                    }
                }
            }
            ok
        }));
    }

    let mut succeeded = 0;
    for handle in handles {
        succeeded += handle.await.unwrap();
    }
    let elapsed = start.elapsed();

    println!(
        "{} requests in {:?} ({:.0} req/s)",
        total_requests,
        elapsed,
        total_requests as f64 / elapsed.as_secs_f64()
    );
    assert_eq!(succeeded, total_requests);
}

#[tokio::test]
async fn test_delays_do_not_serialize() {
    let mut config = ReflectorConfig::default();
    config.simulation.max_delay_secs = 1;
    let server = common::start_reflector(config).await;

    let client = common::client();
    let start = Instant::now();

    let mut handles = Vec::new();
    for _ in 0..10 {
        let client = client.clone();
        let url = server.url("/delay/1");
        handles.push(tokio::spawn(async move {
            client.get(&url).send().await.unwrap().status()
        }));
    }
    for handle in handles {
        assert!(handle.await.unwrap().is_success());
    }

    // Ten one-second delays in parallel finish well before ten seconds.
    assert!(start.elapsed() < Duration::from_secs(3));
}
