//! Version command implementation.

use serde_json::json;

use crate::style::banner::print_version_banner;
use crate::style::print_labeled;

const VERSION: &str = env!("CARGO_PKG_VERSION");
const NAME: &str = env!("CARGO_PKG_NAME");

pub fn run(json: bool) {
    if json {
        let info = json!({
            "name": NAME,
            "version": VERSION,
            "arch": std::env::consts::ARCH,
            "os": std::env::consts::OS,
        });
        println!("{info:#}");
        return;
    }

    print_version_banner(VERSION);
    print_labeled("Package", NAME);
    print_labeled("Target", std::env::consts::ARCH);
    print_labeled("OS", std::env::consts::OS);
}
