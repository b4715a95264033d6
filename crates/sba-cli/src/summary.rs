use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use sba_core::{DirectoryFix, FileCheck, FileFix};
use sba_map::MappingRegistry;
use sba_model::{IssueCategory, Severity, ValidationReport};

use crate::commands::{ConvertRun, FixRun};

pub fn print_convert_summary(run: &ConvertRun) {
    println!("Kind: {}", run.kind);
    println!("Input: {}", run.input.display());
    println!("Output: {}", run.output.display());
    if let Some(path) = &run.issues_csv {
        println!("Issues: {}", path.display());
    }
    println!("Summary: {}", run.summary_json.display());

    let report = &run.result.report;
    let mut table = Table::new();
    table.set_header(vec![header_cell("Run"), header_cell("Count")]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    table.add_row(vec![Cell::new("Rows processed"), Cell::new(report.rows_processed())]);
    table.add_row(vec![
        Cell::new("Records written"),
        Cell::new(run.result.record_count()),
    ]);
    table.add_row(vec![
        Cell::new("Rows with issues"),
        count_cell(report.rows_with_issues(), Color::Yellow),
    ]);
    table.add_row(vec![
        Cell::new("Unreadable rows"),
        count_cell(report.input_defects().len(), Color::Red),
    ]);
    println!("{table}");
    print_issue_counts(report);
}

/// Issue counts by category and severity.
fn print_issue_counts(report: &ValidationReport) {
    if report.issues().is_empty() {
        println!("No validation issues.");
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Category"),
        header_cell("Errors"),
        header_cell("Warnings"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Right);
    for category in IssueCategory::ALL {
        let errors = report.count(category, Severity::Error);
        let warnings = report.count(category, Severity::Warning);
        if errors + warnings == 0 {
            continue;
        }
        table.add_row(vec![
            Cell::new(category.as_str()),
            count_cell(errors, Color::Red),
            count_cell(warnings, Color::Yellow),
        ]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        count_cell(report.error_count(), Color::Red).add_attribute(Attribute::Bold),
        count_cell(report.warning_count(), Color::Yellow).add_attribute(Attribute::Bold),
    ]);
    println!("{table}");
}

pub fn print_fix_summary(run: &FixRun) {
    match run {
        FixRun::File(fix) => {
            let mut table = fix_table();
            add_fix_row(&mut table, fix);
            println!("{table}");
            if let Some(backup) = &fix.backup {
                println!("Backup: {}", backup.display());
            }
        }
        FixRun::Directory(result) => print_directory_summary(result),
    }
}

fn print_directory_summary(result: &DirectoryFix) {
    let mut table = fix_table();
    for fix in &result.fixed {
        add_fix_row(&mut table, fix);
    }
    println!("{table}");
    println!(
        "Fixed {} of {} files ({} failed).",
        result.changed(),
        result.files(),
        result.failed.len()
    );
    if !result.failed.is_empty() {
        eprintln!("Failures:");
        for failure in &result.failed {
            eprintln!("- {}: {}", failure.path.display(), failure.error);
        }
    }
}

fn fix_table() -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("File"),
        header_cell("Kind"),
        header_cell("Records"),
        header_cell("Reordered"),
        header_cell("Unknown"),
        header_cell("Written"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Right);
    align_column(&mut table, 4, CellAlignment::Right);
    align_column(&mut table, 5, CellAlignment::Center);
    table
}

fn add_fix_row(table: &mut Table, fix: &FileFix) {
    table.add_row(vec![
        Cell::new(fix.output.display()),
        Cell::new(fix.kind),
        Cell::new(fix.stats.records),
        count_cell(fix.stats.records_reordered, Color::Green),
        count_cell(fix.stats.unknown_children, Color::Yellow),
        if fix.written {
            Cell::new("✓")
                .fg(Color::Green)
                .add_attribute(Attribute::Bold)
        } else {
            dim_cell("-")
        },
    ]);
}

pub fn print_check(check: &FileCheck) {
    println!("{} ({}, {} records)", check.path.display(), check.kind, check.records);
    if check.is_ordered() {
        println!("All groups are in schema order.");
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Element"),
        header_cell("Found"),
        header_cell("Expected"),
    ]);
    apply_table_style(&mut table);
    for violation in &check.violations {
        table.add_row(vec![
            Cell::new(&violation.path).fg(Color::Blue),
            Cell::new(violation.found.join("\n")).fg(Color::Red),
            Cell::new(violation.expected.join("\n")).fg(Color::Green),
        ]);
    }
    println!("{table}");
    println!("{} groups out of order.", check.violations.len());
}

pub fn print_contract(registry: &MappingRegistry) {
    println!("Document root: {}", registry.document_root());
    let mut table = Table::new();
    table.set_header(vec![header_cell("Group"), header_cell("Children in order")]);
    apply_table_style(&mut table);
    for (group, order) in registry.contract().groups() {
        let children = order
            .children()
            .iter()
            .map(|child| format!("{} {child}", order.order_of(child).unwrap_or_default()))
            .collect::<Vec<_>>()
            .join("\n");
        table.add_row(vec![
            Cell::new(group).fg(Color::Blue).add_attribute(Attribute::Bold),
            Cell::new(children),
        ]);
    }
    println!("{table}");
}

fn apply_table_style(table: &mut Table) {
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
        .set_width(140);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
