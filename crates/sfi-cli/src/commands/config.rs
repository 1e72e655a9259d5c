//! Configuration management commands.

use anyhow::Result;

use crate::ConfigFormat;
use crate::context::AppContext;
use crate::style::colors::SemanticStyle;
use crate::style::{print_json, print_labeled};

/// Show the merged configuration.
pub fn show(ctx: &AppContext, format: ConfigFormat) -> Result<()> {
    let config = &ctx.config;

    // --json wins over --format so scripts get one output shape.
    let format = if ctx.json { ConfigFormat::Json } else { format };

    match format {
        ConfigFormat::Json => print_json(config)?,
        ConfigFormat::Toml => println!("{}", toml::to_string_pretty(config)?),
        ConfigFormat::Text => {
            println!("{}", "SFI Configuration".header());
            println!();

            println!("{}", "Dataset:".header());
            print_labeled("Path", &config.dataset.path.display().to_string());
            println!();

            println!("{}", "Generator:".header());
            print_labeled("Default count", &config.generator.default_count.to_string());
            print_labeled(
                "Seed",
                &config
                    .generator
                    .seed
                    .map_or("entropy".to_string(), |s| s.to_string()),
            );
            println!();

            println!("{}", "Matching:".header());
            print_labeled("Configured mode", &format!("{:?}", config.matching.mode));
            print_labeled("Effective mode", &format!("{:?}", ctx.engine.mode()));
            println!();

            println!("{}", "Logging:".header());
            print_labeled("Filter", &config.logging.filter);
            println!();

            println!("{}", "Catalog:".header());
            let catalog = ctx.engine.assignment().catalog();
            let source = if config.catalog.groups.is_empty() {
                "built-in"
            } else {
                "custom"
            };
            print_labeled("Source", source);
            for group in catalog.groups() {
                print_labeled(&group.name, &group.values.join(", "));
            }
        }
    }

    Ok(())
}
