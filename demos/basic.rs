//! # Example: basic
//!
//! Runs three processes until Ctrl-C (or SIGTERM), logging their lifecycle
//! through [`LogWriter`].
//!
//! ## Flow
//! ```text
//! App::run()
//!   ├─► spawn "ticker", "flaky", "idle"
//!   ├─► "flaky" fails after a moment → on_error, Stopped (others keep running)
//!   ├─► Ctrl-C → on_info("received os signal SIGINT") → cancel
//!   └─► wait for "ticker", "flaky", "idle"
//! ```
//!
//! ## Run
//! ```bash
//! RUST_LOG=debug cargo run --example basic
//! ```

use std::sync::Arc;
use std::time::Duration;

use procvisor::{App, LogWriter, ProcessError};
use tokio_util::sync::CancellationToken;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let mut app = App::new(CancellationToken::new(), Some(Arc::new(LogWriter::new())));

    app.add_process("ticker", |ctx: CancellationToken| async move {
        let mut n = 0u64;
        loop {
            tokio::select! {
                _ = ctx.cancelled() => break,
                _ = tokio::time::sleep(Duration::from_secs(1)) => {
                    n += 1;
                    tracing::info!(tick = n, "tick");
                }
            }
        }
        Ok::<(), ProcessError>(())
    });

    app.add_process("flaky", |_ctx: CancellationToken| async move {
        tokio::time::sleep(Duration::from_millis(1500)).await;
        Err(ProcessError::fail("upstream went away"))
    });

    app.add_process("idle", |ctx: CancellationToken| async move {
        ctx.cancelled().await;
        tokio::time::sleep(Duration::from_millis(200)).await;
        Ok(())
    });

    println!("running {:?}; press Ctrl-C to stop", app.names());
    app.run().await?;
    println!("all processes stopped");
    Ok(())
}
