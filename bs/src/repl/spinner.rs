//! Progress indicator shown while a completion is in flight

use std::future::Future;
use std::io::{self, Write};
use std::time::Duration;

use colored::Colorize;
use tokio::sync::oneshot;

const FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Await `fut` while animating `label` on the current line
///
/// The line is cleared before returning, so whatever prints next starts clean.
pub async fn with_spinner<F: Future>(label: &str, fut: F) -> F::Output {
    let (stop_tx, mut stop_rx) = oneshot::channel::<()>();
    let label = label.to_string();

    let animation = tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_millis(100));
        let mut frame = 0usize;
        loop {
            tokio::select! {
                _ = &mut stop_rx => break,
                _ = interval.tick() => {
                    print!("\r{} {}", FRAMES[frame % FRAMES.len()].bright_cyan(), label.dimmed());
                    let _ = io::stdout().flush();
                    frame += 1;
                }
            }
        }
        print!("\r\x1b[2K");
        let _ = io::stdout().flush();
    });

    let output = fut.await;
    let _ = stop_tx.send(());
    let _ = animation.await;
    output
}
