//! Encode command - multiply attribute primes into a vector.

use anyhow::Result;
use serde_json::json;

use crate::commands::print_warnings;
use crate::context::AppContext;
use crate::input::parse_attribute_object;
use crate::style::{print_json, print_labeled};

pub fn run(ctx: &AppContext, attributes: &str) -> Result<()> {
    let attributes = parse_attribute_object(attributes, "attributes")?;
    let encoded = ctx.engine.encode(&attributes)?;

    if ctx.json {
        return print_json(&json!({
            "success": true,
            "vector": encoded.vector,
            "warnings": encoded.warnings,
        }));
    }

    print_warnings(&encoded.warnings);
    print_labeled("Vector", &encoded.vector.to_string());
    Ok(())
}
