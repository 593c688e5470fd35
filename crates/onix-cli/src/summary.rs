use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use onix_core::PublisherCounts;

use crate::types::ExtractResult;

pub fn print_summary(result: &ExtractResult) {
    let report = &result.report;
    if result.dry_run {
        println!("Dry run: nothing written");
    } else {
        println!("Output: {}", result.output.display());
        println!("State: {}", result.state.display());
    }

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Publisher"),
        header_cell("Documents"),
        header_cell("Failed"),
        header_cell("Products"),
        header_cell("Extracted"),
        header_cell("Invalid"),
        header_cell("Unsupported"),
    ]);
    apply_summary_table_style(&mut table);
    for index in 1..=6 {
        align_column(&mut table, index, CellAlignment::Right);
    }

    let mut total = PublisherCounts::default();
    for (publisher, counts) in &report.publishers {
        total.documents += counts.documents;
        total.failed_documents += counts.failed_documents;
        total.products += counts.products;
        total.extracted += counts.extracted;
        total.invalid += counts.invalid;
        total.unsupported += counts.unsupported;
        table.add_row(vec![
            Cell::new(publisher)
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            Cell::new(counts.documents),
            count_cell(counts.failed_documents, Color::Red),
            Cell::new(counts.products),
            Cell::new(counts.extracted),
            count_cell(counts.invalid, Color::Yellow),
            count_cell(counts.unsupported, Color::DarkGrey),
        ]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(total.documents).add_attribute(Attribute::Bold),
        count_cell(total.failed_documents, Color::Red).add_attribute(Attribute::Bold),
        Cell::new(total.products).add_attribute(Attribute::Bold),
        Cell::new(total.extracted).add_attribute(Attribute::Bold),
        count_cell(total.invalid, Color::Yellow).add_attribute(Attribute::Bold),
        count_cell(total.unsupported, Color::DarkGrey).add_attribute(Attribute::Bold),
    ]);
    println!("{table}");
    println!(
        "Books: {}  Tracked ISBNs: {}  Selected: {}",
        report.books.len(),
        report.state.len(),
        report.state.selected_isbns().count()
    );

    print_record_failures(result);
    if !report.document_failures.is_empty() {
        eprintln!("Skipped documents:");
        for failure in &report.document_failures {
            eprintln!("- {}: {}", failure.path.display(), failure.message);
        }
    }
}

fn print_record_failures(result: &ExtractResult) {
    let failures = &result.report.record_failures;
    if failures.is_empty() {
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("File"),
        header_cell("ISBN"),
        header_cell("Missing fields"),
    ]);
    apply_summary_table_style(&mut table);
    for failure in failures {
        let fields: Vec<&str> = failure
            .issues
            .iter()
            .map(|issue| issue.field.as_str())
            .collect();
        table.add_row(vec![
            Cell::new(&failure.origin_file_path),
            match &failure.isbn {
                Some(isbn) => Cell::new(isbn),
                None => dim_cell("-"),
            },
            Cell::new(fields.join(", ")).fg(Color::Yellow),
        ]);
    }
    println!();
    println!("Invalid records:");
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
