use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use tm2_model::MappingSuggestion;
use tm2_terminology::MappingTable;

pub fn print_suggestions(suggestions: &[MappingSuggestion]) {
    if suggestions.is_empty() {
        println!("No suggestions.");
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("NAMASTE"),
        header_cell("Term"),
        header_cell("System"),
        header_cell("ICD-11"),
        header_cell("Target term"),
        header_cell("Keywords"),
        header_cell("Lex"),
        header_cell("Sem"),
        header_cell("Score"),
    ]);
    apply_table_style(&mut table);
    for index in [6, 7, 8] {
        align_column(&mut table, index, CellAlignment::Right);
    }
    for suggestion in suggestions {
        table.add_row(vec![
            Cell::new(&suggestion.source_code)
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            Cell::new(&suggestion.source_term_english),
            Cell::new(suggestion.source_system.as_str()),
            Cell::new(&suggestion.target_code).fg(Color::Green),
            Cell::new(&suggestion.target_term),
            Cell::new(keywords_label(&suggestion.matched_keywords)),
            score_cell(suggestion.lexical_score),
            score_cell(suggestion.semantic_score),
            Cell::new(suggestion.combined_score).add_attribute(Attribute::Bold),
        ]);
    }
    println!("{table}");
}

pub fn print_table_overview(mapping_table: &MappingTable) {
    let stats = mapping_table.stats();
    println!("Entries: {}", stats.entries);
    println!("Keywords: {}", stats.keywords);
    for (system, count) in &stats.by_system {
        println!("  {system}: {count}");
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Category"),
        header_cell("NAMASTE"),
        header_cell("System"),
        header_cell("ICD-11"),
        header_cell("Target term"),
        header_cell("Prior"),
        header_cell("Keywords"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 5, CellAlignment::Right);
    for entry in mapping_table.entries() {
        table.add_row(vec![
            Cell::new(&entry.category),
            Cell::new(&entry.source_code)
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            Cell::new(entry.source_system.as_str()),
            Cell::new(&entry.target_code).fg(Color::Green),
            Cell::new(&entry.target_term),
            Cell::new(entry.base_confidence),
            Cell::new(entry.keywords.join(", ")),
        ]);
    }
    println!("{table}");
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(140);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn score_cell(score: Option<u8>) -> Cell {
    match score {
        Some(value) => Cell::new(value),
        None => dim_cell("-"),
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}

fn keywords_label(keywords: &[String]) -> String {
    if keywords.is_empty() {
        "-".to_string()
    } else {
        keywords.join(", ")
    }
}
