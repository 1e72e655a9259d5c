//! CLI command implementations.

use serde_json::json;
use sfi::{SfiError, SfiWarning};
use sfi_config::ConfigError;
use sfi_store::StoreError;

use crate::style::{print_error, print_hint, print_warn};

pub mod config;
pub mod decode;
pub mod encode;
pub mod filter;
pub mod generate;
pub mod primes;
pub mod version;

/// Stable kind string for the `kind` field of a failure envelope.
fn error_kind(err: &anyhow::Error) -> &'static str {
    for cause in err.chain() {
        if let Some(sfi) = cause.downcast_ref::<SfiError>() {
            return sfi.kind().as_str();
        }
        if let Some(store) = cause.downcast_ref::<StoreError>() {
            return match store {
                StoreError::NotFound { .. } => "not_found",
                _ => "persistence",
            };
        }
        if cause.downcast_ref::<ConfigError>().is_some() {
            return "config";
        }
    }
    "internal"
}

/// Reports a failed command on stdout as JSON or on stderr as a styled line.
pub fn report_error(err: &anyhow::Error, json: bool) {
    let kind = error_kind(err);

    if json {
        let envelope = json!({
            "success": false,
            "error": format!("{err:#}"),
            "kind": kind,
        });
        println!("{envelope:#}");
        return;
    }

    print_error(&format!("{err:#}"));
    if kind == "not_found" {
        print_hint("Run 'sfi generate' to create a dataset first.");
    }
}

/// Prints warnings in human mode. JSON mode carries them in the envelope.
fn print_warnings(warnings: &[SfiWarning]) {
    for warning in warnings {
        print_warn(&warning.to_string());
    }
}
