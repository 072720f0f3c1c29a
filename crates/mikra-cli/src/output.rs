//! Terminal rendering of a report view.
//!
//! The view model is already fully projected; this module only decides how
//! the pieces look in a terminal. Hebrew text is printed as-is and left to
//! the terminal's bidi handling.

use console::style;
use mikra_core::ReportView;
use mikra_core::report::{NamedList, Section, SectionBody};

/// Print the full report to stdout.
pub fn print_report(view: &ReportView) {
    if !view.badges.is_empty() {
        let strip = view
            .badges
            .iter()
            .map(|b| format!("[{b}]"))
            .collect::<Vec<_>>()
            .join(" ");
        println!("{}", style(strip).bold());
        println!();
    }

    for section in &view.sections {
        print_section(section);
    }
}

/// Print a non-JSON completion verbatim, clearly marked as degraded.
pub fn print_raw(text: &str) {
    println!("{}", style("המודל החזיר תשובה לא-JSON").yellow().bold());
    println!();
    println!("{text}");
}

fn print_section(section: &Section) {
    println!("{}", style(&section.title).cyan().bold());

    match &section.body {
        SectionBody::KeyValues(pairs) => {
            for (key, value) in pairs {
                println!("  {}: {value}", style(key).bold());
            }
        }
        SectionBody::Table { headers, rows } => print_table(headers, rows),
        SectionBody::Lists(lists) => {
            for list in lists {
                print_named_list(list);
            }
        }
        SectionBody::Empty(message) => {
            println!("  {}", style(message).dim());
        }
    }

    if let Some(footnote) = &section.footnote {
        println!("  {}", style(footnote).dim());
    }
    println!();
}

fn print_named_list(list: &NamedList) {
    println!("  {}", style(&list.name).bold());
    if list.items.is_empty() {
        println!("    {}", style("—").dim());
        return;
    }
    for item in &list.items {
        println!("    • {item}");
    }
}

fn print_table(headers: &[String], rows: &[Vec<String>]) {
    let widths = column_widths(headers, rows);

    print!("  ");
    for (header, width) in headers.iter().zip(&widths) {
        print!("{}  ", style(pad(header, *width)).underlined());
    }
    println!();

    for row in rows {
        print!("  ");
        for (cell, width) in row.iter().zip(&widths) {
            print!("{}  ", pad(cell, *width));
        }
        println!();
    }
}

fn column_widths(headers: &[String], rows: &[Vec<String>]) -> Vec<usize> {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            if i < widths.len() {
                widths[i] = widths[i].max(cell.chars().count());
            }
        }
    }
    widths
}

// Width by char count; good enough for alignment, if imperfect for bidi runs.
fn pad(text: &str, width: usize) -> String {
    let len = text.chars().count();
    let mut padded = text.to_string();
    padded.extend(std::iter::repeat_n(' ', width.saturating_sub(len)));
    padded
}
