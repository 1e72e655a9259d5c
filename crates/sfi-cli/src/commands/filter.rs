//! Filter command - scan the stored dataset with one divisibility test per record.

use anyhow::Result;
use serde_json::json;
use sfi::SfiError;
use sfi_store::DatasetStore;

use crate::commands::print_warnings;
use crate::context::AppContext;
use crate::input::parse_attribute_object;
use crate::style::{print_json, print_labeled, print_records_table, with_spinner};

pub fn run(ctx: &AppContext, criteria: &str) -> Result<()> {
    let criteria = parse_attribute_object(criteria, "criteria")?;

    let outcome = with_spinner(!ctx.json, "Filtering shipments...", || -> Result<_> {
        let entries = ctx.store().load().map_err(SfiError::from)?;
        Ok(ctx.engine.filter_records(&criteria, &entries)?)
    })?;

    if ctx.json {
        return print_json(&json!({
            "success": true,
            "criteria_used": outcome.criteria_used,
            "filter_vector": outcome.filter_vector,
            "total_checked": outcome.total_checked,
            "matches_found": outcome.matches_found(),
            "results": outcome.matches,
            "duration_seconds": outcome.duration_seconds(),
            "warnings": outcome.warnings,
        }));
    }

    print_warnings(&outcome.warnings);

    let used = outcome
        .criteria_used
        .iter()
        .map(|(group, value)| format!("{group}={value}"))
        .collect::<Vec<_>>()
        .join(", ");
    print_labeled("Criteria", &used);
    print_labeled("Filter vector", &outcome.filter_vector.to_string());
    print_labeled(
        "Checked",
        &format!(
            "{} records in {:.4}s",
            outcome.total_checked,
            outcome.duration_seconds()
        ),
    );
    println!();
    print_records_table(&outcome.matches);
    Ok(())
}
