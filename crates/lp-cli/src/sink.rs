//! Terminal rendering of published reports.

use colored::{ColoredString, Colorize};
use comfy_table::{Attribute, Cell, Color, ContentArrangement, Table};

use lp_mechanics::report::{Audience, Tone};
use lp_mechanics::{Degree, Report, ReportSink};

/// Prints reports to stdout, as coloured text or as JSON.
pub struct TerminalSink {
    json: bool,
}

impl TerminalSink {
    pub fn new(json: bool) -> Self {
        Self { json }
    }
}

impl ReportSink for TerminalSink {
    fn publish(&mut self, report: &Report) {
        if self.json {
            match serde_json::to_string_pretty(report) {
                Ok(out) => println!("{out}"),
                Err(e) => eprintln!("error: failed to encode report: {e}"),
            }
            return;
        }
        print_report(report);
    }
}

fn print_report(report: &Report) {
    let tag = match report.audience {
        Audience::Public => String::new(),
        Audience::Whisper => format!(" {}", "[whisper]".dimmed()),
        Audience::GameMasters => format!(" {}", "[GM only]".magenta()),
    };
    println!("{}{tag}", report.title.bold().cyan());

    for fact in &report.facts {
        println!("  {}: {}", fact.label.dimmed(), fact.value);
    }

    if !report.rows.is_empty() {
        println!();
        println!("{}", transcript(report));
    }

    println!();
    println!("  {}", tinted(&report.verdict.text, report.verdict.tone).bold());
    if let Some(footnote) = &report.footnote {
        println!("  {}", footnote.italic());
    }
    println!();
}

fn transcript(report: &Report) -> Table {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);

    if report.has_progress_columns() {
        table.set_header(vec!["#", "d20", "Total", "Result", "Progress", "Note"]);
        for row in &report.rows {
            let mut cells = plain_cells([
                row.number.to_string(),
                row.die_face.to_string(),
                row.total.to_string(),
            ]);
            cells.extend([
                degree_cell(row.degree),
                Cell::new(row.progress.map_or_else(String::new, |p| format!("+{p}"))),
                Cell::new(row.note.as_deref().unwrap_or_default()),
            ]);
            table.add_row(cells);
        }
    } else {
        table.set_header(vec!["#", "d20", "Total", "Result"]);
        for row in &report.rows {
            let mut cells = plain_cells([
                row.number.to_string(),
                row.die_face.to_string(),
                row.total.to_string(),
            ]);
            cells.push(degree_cell(row.degree));
            table.add_row(cells);
        }
    }
    table
}

fn plain_cells(values: [String; 3]) -> Vec<Cell> {
    values.into_iter().map(Cell::new).collect()
}

/// Result cell tinted by degree, unless colours are switched off.
fn degree_cell(degree: Degree) -> Cell {
    let cell = Cell::new(degree.short_label());
    if !colored::control::SHOULD_COLORIZE.should_colorize() {
        return cell;
    }
    let cell = match Tone::for_degree(degree) {
        Tone::Positive => cell.fg(Color::Green),
        Tone::Warning => cell.fg(Color::Yellow),
        Tone::Danger => cell.fg(Color::Red),
        Tone::Neutral => cell.fg(Color::DarkGrey),
    };
    if degree == Degree::CriticalSuccess {
        cell.add_attribute(Attribute::Bold)
    } else {
        cell
    }
}

fn tinted(text: &str, tone: Tone) -> ColoredString {
    match tone {
        Tone::Positive => text.green(),
        Tone::Warning => text.yellow(),
        Tone::Danger => text.red(),
        Tone::Neutral => text.normal(),
    }
}
