//! Randomized delays between requests, to go easy on the site.

use std::time::Duration;

use tracing::debug;

/// `base + U(0,1) * base / 2` seconds.
pub fn jittered_delay(base_secs: f64) -> Duration {
    jitter(base_secs, rand::random::<f64>())
}

fn jitter(base_secs: f64, unit: f64) -> Duration {
    let base = base_secs.max(0.0);
    Duration::from_secs_f64(base + unit * 0.5 * base)
}

/// Sleep for a jittered delay around `base_secs`.
pub async fn wait_a_bit(base_secs: f64) {
    let delay = jittered_delay(base_secs);
    debug!("Waiting {:.2} secs", delay.as_secs_f64());
    tokio::time::sleep(delay).await;
}
