/*!
 * Playback Queue - Demo Entry Point
 *
 * Simulates one playback session:
 * - Producers queue tracks, one with a positional override
 * - A playback loop takes tracks, plays them, and marks them done
 * - The host waits for the queue to drain, then prints statistics
 */

use anyhow::Context;
use futures::future::try_join_all;
use playback_queue::{init_tracing, session_span, PlaybackQueue, QueueConfig, QueueEvent};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, Instrument};

#[derive(Debug, Clone)]
struct Track {
    title: String,
    length: Duration,
}

impl Track {
    fn new(title: impl Into<String>, length_ms: u64) -> Self {
        Self {
            title: title.into(),
            length: Duration::from_millis(length_ms),
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = QueueConfig::from_env().context("loading queue configuration")?;
    info!(?config, "Playback demo starting");
    let queue = Arc::new(PlaybackQueue::<Track>::with_config(config)?);

    run_session(queue.clone())
        .instrument(session_span("demo"))
        .await?;

    let stats = serde_json::to_string_pretty(&queue.stats())?;
    println!("{}", stats);
    Ok(())
}

async fn run_session(queue: Arc<PlaybackQueue<Track>>) -> anyhow::Result<()> {
    let mut events = queue.subscribe();
    let event_log = tokio::spawn(
        async move {
            while let Ok(event) = events.recv().await {
                debug!(?event, "queue event");
                if event == QueueEvent::Drained {
                    info!("queue drained");
                }
            }
        }
        .in_current_span(),
    );

    // Nothing queued yet: a timed-out get is cancelled without side effects
    if tokio::time::timeout(Duration::from_millis(20), queue.get())
        .await
        .is_err()
    {
        info!("no track queued within 20ms");
    }

    let player = {
        let queue = queue.clone();
        tokio::spawn(
            async move {
                loop {
                    let track = queue.get().await;
                    info!(title = %track.title, remaining = queue.len(), "now playing");
                    tokio::time::sleep(track.length).await;
                    if let Err(e) = queue.task_done() {
                        tracing::error!(error = %e, "playback accounting out of sync");
                        break;
                    }
                }
            }
            .in_current_span(),
        )
    };

    let producers = (0..2).map(|producer| {
        let queue = queue.clone();
        tokio::spawn(
            async move {
                for n in 0..3 {
                    queue
                        .put(Track::new(format!("producer {} track {}", producer, n), 10))
                        .await;
                }
            }
            .in_current_span(),
        )
    });
    try_join_all(producers).await.context("producer task failed")?;

    queue
        .put_pos(Track::new("station announcement", 5), 0)
        .await
        .context("queueing announcement")?;

    queue.join().await;
    info!("all tracks played");

    player.abort();
    event_log.abort();
    Ok(())
}
