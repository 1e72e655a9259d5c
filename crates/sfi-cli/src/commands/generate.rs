//! Generate command - build a random dataset and persist it.

use anyhow::Result;
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde_json::json;
use sfi::{SfiError, validate_count};
use sfi_store::DatasetStore;

use crate::context::AppContext;
use crate::style::{print_labeled, print_success, print_warn, with_spinner};

pub fn run(ctx: &AppContext, count: Option<i64>, seed: Option<u64>) -> Result<()> {
    let count = validate_count(count.unwrap_or(i64::from(ctx.config.generator.default_count)))?;

    let mut rng = match seed.or(ctx.config.generator.seed) {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let store = ctx.store();

    let report = with_spinner(
        !ctx.json,
        &format!("Generating {count} shipments..."),
        || -> Result<_> {
            let report = ctx.engine.generate(count, &mut rng)?;
            store.save(&report.records).map_err(SfiError::from)?;
            Ok(report)
        },
    )?;

    tracing::info!(
        written = report.records_written(),
        path = %store.path().display(),
        "dataset saved"
    );

    if ctx.json {
        let mut envelope = json!({
            "success": true,
            "count": report.records_written(),
            "file": store.path().display().to_string(),
            "duration_seconds": report.duration_seconds(),
        });
        if report.failed > 0 {
            envelope["failed"] = json!(report.failed);
        }
        println!("{envelope:#}");
        return Ok(());
    }

    print_success(&format!(
        "Generated {} shipments",
        report.records_written()
    ));
    print_labeled("File", &store.path().display().to_string());
    print_labeled("Duration", &format!("{:.4}s", report.duration_seconds()));
    if report.failed > 0 {
        print_warn(&format!("{} records could not be encoded and were skipped", report.failed));
    }
    Ok(())
}
