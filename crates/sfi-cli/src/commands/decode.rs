//! Decode command - recover attributes from a vector.

use anyhow::Result;
use serde_json::json;

use crate::context::AppContext;
use crate::style::{attributes_table, print_json, print_labeled, print_warn};

pub fn run(ctx: &AppContext, vector: &str) -> Result<()> {
    let decoded = ctx.engine.decode_str(vector)?;

    if ctx.json {
        let mut envelope = json!({
            "success": true,
            "vector": decoded.vector,
            "decoded": decoded.decoded,
        });
        if let Some(warning) = &decoded.warning {
            envelope["warning"] = json!(warning.to_string());
        }
        return print_json(&envelope);
    }

    if let Some(warning) = &decoded.warning {
        print_warn(&warning.to_string());
    }
    print_labeled("Vector", &decoded.vector.to_string());
    println!("{}", attributes_table(&decoded.decoded));
    Ok(())
}
