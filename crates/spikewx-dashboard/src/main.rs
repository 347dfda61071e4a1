//! spikewx - terminal weather dashboard
//!
//! This binary coordinates:
//! - Snapshot polling against the weather backend (or offline fallback)
//! - The decorative matrix animation
//! - Redrawing the dashboard on every state change or matrix tick

use std::io::Write;
use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::time::{interval, MissedTickBehavior};
use tracing::{info, warn};

use spikewx_config::AppConfig;
use spikewx_core::{animate, MatrixFrame, SnapshotSource};
use spikewx_dashboard::{render, RefreshSettings, ViewState};
use spikewx_ingest::{HttpSource, OfflineSource};

#[tokio::main]
async fn main() -> Result<()> {
    spikewx_obs::init("spikewx");

    let config = AppConfig::load().context("Failed to load configuration")?;
    config.validate().context("Invalid configuration")?;

    let source: Arc<dyn SnapshotSource> = match config.backend_url()? {
        Some(base) => {
            let src = HttpSource::new(&base, &config.location_slug(), config.fetch_timeout())
                .context("Failed to create HTTP source")?;
            info!(endpoint = %src.endpoint(), "Polling weather backend");
            Arc::new(src)
        }
        None => {
            warn!("BACKEND_URL not set, running on fallback data");
            Arc::new(OfflineSource::new("no backend URL configured"))
        }
    };

    let handle = spikewx_dashboard::spawn(
        source,
        RefreshSettings {
            interval: config.refresh_interval(),
            fetch_timeout: config.fetch_timeout(),
        },
    );
    let mut states = handle.subscribe();

    let mut matrix_tick = interval(config.matrix_tick());
    matrix_tick.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let mut rng = rand::rng();
    let mut frame = MatrixFrame::dark();

    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            _ = &mut shutdown => {
                info!("Shutdown signal received");
                break;
            }
            _ = matrix_tick.tick() => {
                frame = animate(&mut rng);
            }
            changed = states.changed() => {
                if changed.is_err() {
                    warn!("Refresh loop ended unexpectedly");
                    break;
                }
            }
        }
        let state = states.borrow_and_update().clone();
        draw(&state, &frame).context("Failed to draw dashboard")?;
    }

    let stats = handle.shutdown().await;
    info!(?stats, "Dashboard stopped");
    Ok(())
}

/// Clear the terminal and draw one frame
fn draw(state: &ViewState, frame: &MatrixFrame) -> std::io::Result<()> {
    let mut out = std::io::stdout().lock();
    write!(out, "\x1b[2J\x1b[H{}", render(state, frame))?;
    out.flush()
}
