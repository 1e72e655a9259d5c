//! Version banner.

use super::colors::SemanticStyle;

/// Prints the version banner.
pub fn print_version_banner(version: &str) {
    println!();
    println!(
        "  {} {} {}",
        "∣".info(),
        "SFI".header(),
        format!("v{version}").muted()
    );
    println!("  {}", "Shipment feature indexing by prime factorization".muted());
    println!();
}
