//! Application reachability preflight
//!
//! The application under test is an external process; nothing is spawned
//! here. Before the first scenario touches a browser, the suite polls the
//! application root so an unreachable deployment aborts with a distinct
//! infrastructure error instead of nine identical timeout failures.

use std::time::Duration;

use tokio::time::sleep;
use tracing::{info, warn};

use crate::error::{E2eError, E2eResult};

/// Poll `base_url` until the application answers or `timeout` elapses.
///
/// Any HTTP response counts as reachable; only transport failures keep the
/// poll going.
pub async fn wait_for_app(base_url: &str, timeout: Duration) -> E2eResult<()> {
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(2))
        .build()?;

    let start = std::time::Instant::now();
    let mut attempts = 0;

    while start.elapsed() < timeout {
        attempts += 1;

        match client.get(base_url).send().await {
            Ok(resp) => {
                info!(status = %resp.status(), "application is reachable at {base_url}");
                return Ok(());
            }
            Err(e) => {
                if attempts == 1 {
                    info!("waiting for application at {base_url}...");
                }
                // Connection refused is expected while a deployment comes up
                if !e.is_connect() {
                    warn!("reachability probe error: {e}");
                }
            }
        }

        sleep(Duration::from_millis(100)).await;
    }

    Err(E2eError::AppUnreachable {
        url: base_url.to_string(),
        attempts,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn unreachable_app_reports_attempt_count() {
        // Reserved TEST-NET-1 address: nothing answers there.
        let err = wait_for_app("http://192.0.2.1:9", Duration::from_millis(300))
            .await
            .unwrap_err();
        match err {
            E2eError::AppUnreachable { url, attempts } => {
                assert_eq!(url, "http://192.0.2.1:9");
                assert!(attempts >= 1);
            }
            other => panic!("expected AppUnreachable, got {other}"),
        }
    }
}
