use std::path::Path;

use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use oda_model::CodeMapping;
use oda_transform::ColumnReport;

/// Outcome of updating one mapping family.
pub struct FamilyUpdate {
    pub family: &'static str,
    pub mappings: Vec<&'static str>,
    pub written: usize,
}

pub fn print_update_summary(schemas_dir: &Path, updates: &[FamilyUpdate]) {
    println!("Schemas: {}", schemas_dir.display());
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Family"),
        header_cell("Mappings"),
        header_cell("Written"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    for update in updates {
        let expected = update.mappings.len();
        let written = if update.written == expected {
            Cell::new(format!("{}/{expected}", update.written)).fg(Color::Green)
        } else {
            Cell::new(format!("{}/{expected}", update.written))
                .fg(Color::Yellow)
                .add_attribute(Attribute::Bold)
        };
        table.add_row(vec![
            Cell::new(update.family).add_attribute(Attribute::Bold),
            Cell::new(update.mappings.join("\n")),
            written,
        ]);
    }
    println!("{table}");
}

pub fn print_mapping(name: &str, mapping: &CodeMapping, inverted: bool) {
    let (source, target) = if inverted {
        ("Target", "Source")
    } else {
        ("Source", "Target")
    };
    let mut table = Table::new();
    table.set_header(vec![header_cell(source), header_cell(target)]);
    apply_table_style(&mut table);
    for (key, value) in mapping {
        table.add_row(vec![Cell::new(key), Cell::new(value)]);
    }
    println!("{table}");
    println!("{name}: {} entries", mapping.len());
}

pub fn print_translation_summary(input: &Path, output: &Path, reports: &[ColumnReport]) {
    println!("Input: {}", input.display());
    println!("Output: {}", output.display());
    if reports.is_empty() {
        println!("Codes kept as downloaded.");
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Column"),
        header_cell("Rows"),
        header_cell("Mapped"),
        header_cell("Unmapped codes"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Right);
    for report in reports {
        table.add_row(vec![
            Cell::new(&report.target).add_attribute(Attribute::Bold),
            Cell::new(report.rows),
            Cell::new(report.mapped),
            unmapped_cell(report),
        ]);
    }
    println!("{table}");
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

/// At most this many unmapped codes are listed per column.
const MAX_LISTED_CODES: usize = 8;

fn unmapped_cell(report: &ColumnReport) -> Cell {
    if report.unmapped.is_empty() {
        return dim_cell("-");
    }
    let mut listed: Vec<String> = report
        .unmapped
        .iter()
        .take(MAX_LISTED_CODES)
        .map(ToString::to_string)
        .collect();
    if report.unmapped.len() > MAX_LISTED_CODES {
        listed.push(format!("(+{} more)", report.unmapped.len() - MAX_LISTED_CODES));
    }
    Cell::new(listed.join(", ")).fg(Color::Yellow)
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
