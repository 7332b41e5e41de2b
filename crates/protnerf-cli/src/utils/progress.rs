use indicatif::{ProgressBar, ProgressState, ProgressStyle};
use protnerf::engine::progress::{Progress, ProgressCallback};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tracing::warn;

/// Drives a single stderr progress bar from batch reconstruction events.
#[derive(Clone)]
pub struct CliProgressHandler {
    pb: Arc<Mutex<ProgressBar>>,
    failures: Arc<AtomicUsize>,
}

impl CliProgressHandler {
    pub fn new() -> Self {
        let pb = ProgressBar::new(0)
            .with_style(Self::bar_style())
            .with_message("Waiting...");
        pb.set_draw_target(indicatif::ProgressDrawTarget::stderr());
        pb.finish_and_clear();

        Self {
            pb: Arc::new(Mutex::new(pb)),
            failures: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Number of `ChainFailed` events seen so far.
    pub fn failures(&self) -> usize {
        self.failures.load(Ordering::Relaxed)
    }

    pub fn get_callback(&self) -> ProgressCallback<'static> {
        let pb_clone = self.pb.clone();
        let failures = self.failures.clone();

        Box::new(move |progress: Progress| {
            let Ok(pb_guard) = pb_clone.lock() else {
                warn!("Progress bar mutex was poisoned. Cannot update progress.");
                return;
            };

            match progress {
                Progress::BatchStart { total_chains } => {
                    pb_guard.reset();
                    pb_guard.set_length(total_chains);
                    pb_guard.set_position(0);
                    pb_guard.set_message("Reconstructing");
                }
                Progress::ChainFinished { id, atoms } => {
                    pb_guard.set_message(format!("{} ({} atoms)", id, atoms));
                    pb_guard.inc(1);
                }
                Progress::ChainFailed { id, reason } => {
                    failures.fetch_add(1, Ordering::Relaxed);
                    pb_guard.println(format!("  ✗ {}: {}", id, reason));
                    pb_guard.inc(1);
                }
                Progress::BatchFinish => {
                    let total = pb_guard.length().unwrap_or(0);
                    pb_guard.set_position(total);
                    pb_guard.finish_with_message("✓ Done");
                }
                Progress::Message(msg) => {
                    if !pb_guard.is_finished() {
                        pb_guard.println(format!("  {}", msg));
                    } else {
                        pb_guard.set_message(msg);
                    }
                }
            }
        })
    }

    fn bar_style() -> ProgressStyle {
        ProgressStyle::with_template("{msg:<24} [{bar:40.cyan/blue}] {pos}/{len} ({eta})")
            .expect("Failed to create bar style template")
            .with_key(
                "eta",
                |state: &ProgressState, w: &mut dyn std::fmt::Write| {
                    let _ = write!(w, "{:.1}s", state.eta().as_secs_f64());
                },
            )
            .progress_chars("##-")
    }
}

impl Default for CliProgressHandler {
    fn default() -> Self {
        Self::new()
    }
}
