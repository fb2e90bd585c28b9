//! Terminal progress bar for scene loading

use indicatif::{ProgressBar, ProgressStyle};

/// Progress over a known number of scenes
pub struct ProgressTracker {
    bar: ProgressBar,
}

impl ProgressTracker {
    /// Start a bar for `total` steps
    pub fn new(total: u64, description: &str) -> Self {
        let bar = ProgressBar::new(total);
        let style = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} scenes {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-");
        bar.set_style(style);
        bar.set_message(description.to_string());

        ProgressTracker { bar }
    }

    /// Show which scene is being read
    pub fn set_message(&self, scene_id: &str) {
        self.bar.set_message(format!("reading {}", scene_id));
    }

    pub fn increment(&self, amount: u64) {
        self.bar.inc(amount);
    }

    pub fn finish(&self) {
        self.bar.finish_with_message("composite ready");
    }
}
