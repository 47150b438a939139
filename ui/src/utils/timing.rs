//! Timers that work on both the browser and native targets.
//!
//! `tokio::time` has no driver on `wasm32-unknown-unknown`, so browser builds
//! go through `gloo_timers` while native builds (and tests with a paused
//! clock) use tokio.

use std::time::Duration;

#[cfg(target_arch = "wasm32")]
pub async fn sleep(duration: Duration) {
    let millis = duration.as_millis().min(u32::MAX as u128) as u32;
    gloo_timers::future::TimeoutFuture::new(millis).await;
}

#[cfg(not(target_arch = "wasm32"))]
pub async fn sleep(duration: Duration) {
    tokio::time::sleep(duration).await;
}

/// Today's date in the local calendar, used to build age rules.
pub fn today() -> chrono::NaiveDate {
    chrono::Local::now().date_naive()
}
