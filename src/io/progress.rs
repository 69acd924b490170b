//! Progress display for long generation runs
//!
//! The core exposes progress only through its step loop; this driver turns
//! that loop into a terminal progress bar for hosts that want one.

use crate::algorithm::Generator;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::LazyLock;

static STEP_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template("[{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} steps")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

/// Drive a generator under a progress bar
///
/// Advances `generator` until it reports done or the step budget runs out,
/// rendering one tick per step. Returns whether the generator finished
/// within the budget.
pub fn run_with_progress<G: Generator>(generator: &mut G, max_steps: usize) -> bool {
    let bar = ProgressBar::new(max_steps as u64);
    bar.set_style(STEP_STYLE.clone());
    for _ in 0..max_steps {
        if generator.step() {
            bar.finish_and_clear();
            return true;
        }
        bar.inc(1);
    }
    bar.finish_and_clear();
    false
}
