//! Spinner helpers using indicatif.

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

const PRIME_SPINNER: &[&str] = &["2 ", "3 ", "5 ", "7 ", "11", "13"];

/// Creates a spinner with a message. indicatif draws to stderr and stays
/// silent when it is not a terminal.
pub fn create_spinner(msg: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner()
        .tick_strings(PRIME_SPINNER)
        .template("{spinner:.cyan} {msg}")
    {
        pb.set_style(style);
    }

    pb.set_message(msg.to_string());
    pb.enable_steady_tick(Duration::from_millis(120));

    pb
}

/// Runs `f` behind a spinner (a hidden one when `enabled` is false).
///
/// The spinner is cleared before returning whatever `f` returns, so an
/// `Err` propagated with `?` afterwards never leaves it on screen.
pub fn with_spinner<T>(enabled: bool, msg: &str, f: impl FnOnce() -> T) -> T {
    let pb = if enabled {
        create_spinner(msg)
    } else {
        ProgressBar::hidden()
    };
    run_clearing(&pb, f)
}

fn run_clearing<T>(pb: &ProgressBar, f: impl FnOnce() -> T) -> T {
    let out = f();
    pb.finish_and_clear();
    out
}
