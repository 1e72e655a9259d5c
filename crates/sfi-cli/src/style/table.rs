//! Table formatting using comfy-table.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use sfi::{Attributes, PrimeMap, ShipmentRecord};

use super::colors::SemanticStyle;

fn styled_table(columns: &[&str]) -> Table {
    let mut table = Table::new();

    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);

    let header_cells: Vec<Cell> = columns
        .iter()
        .map(|col| {
            if super::no_color() {
                Cell::new(col)
            } else {
                Cell::new(col)
                    .add_attribute(Attribute::Bold)
                    .fg(Color::Cyan)
            }
        })
        .collect();
    table.set_header(header_cells);

    table
}

/// Group / value / prime rows in catalog order.
pub fn prime_table(map: &PrimeMap) -> Table {
    let mut table = styled_table(&["Group", "Value", "Prime"]);

    for group in &map.groups {
        for (value, prime) in &group.values {
            table.add_row(vec![
                Cell::new(&group.group),
                Cell::new(value),
                Cell::new(prime).set_alignment(CellAlignment::Right),
            ]);
        }
    }

    table
}

/// Decoded or encoded attributes, one group per row.
pub fn attributes_table(attributes: &Attributes) -> Table {
    let mut table = styled_table(&["Group", "Value"]);
    for (group, value) in attributes {
        table.add_row(vec![group, value]);
    }
    table
}

/// Matching records followed by a count footer.
pub fn print_records_table(records: &[ShipmentRecord]) {
    if records.is_empty() {
        println!("{}", "No matching shipments.".muted());
        return;
    }

    let mut table = styled_table(&["ID", "SFI Vector"]);
    for record in records {
        table.add_row(vec![
            Cell::new(&record.id),
            Cell::new(&record.sfi_vector).set_alignment(CellAlignment::Right),
        ]);
    }
    println!("{table}");

    let count = records.len();
    let row_word = if count == 1 { "match" } else { "matches" };
    println!("{}", format!("({count} {row_word})").muted());
}
