//! Primes command - show the attribute-to-prime assignment.

use anyhow::Result;
use serde_json::json;

use crate::context::AppContext;
use crate::style::{print_hint, print_json, prime_table};

pub fn run(ctx: &AppContext) -> Result<()> {
    let map = ctx.engine.prime_map();

    if ctx.json {
        return print_json(&json!({ "success": true, "data": map }));
    }

    println!("{}", prime_table(&map));
    print_hint(&format!(
        "{} values across {} groups",
        ctx.engine.assignment().len(),
        map.groups.len()
    ));
    Ok(())
}
