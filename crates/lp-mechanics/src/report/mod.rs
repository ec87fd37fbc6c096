//! Structured reports for publishing check results.
//!
//! A [`Report`] is what a host posts to its shared message log: a title, a
//! few key facts, the roll transcript, and a verdict. Hosts render it however
//! they like; the `Display` impl gives a plain-text version.

pub mod render;

pub use render::{
    RequestContext, SimulationContext, format_signed, render_request, render_simulation,
    tool_breakage_notice,
};

use serde::Serialize;

use crate::degree::Degree;

/// Who gets to see a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Audience {
    /// Everyone at the table.
    Public,
    /// Only the player who rolled.
    Whisper,
    /// Only the game masters.
    GameMasters,
}

/// How a verdict should be coloured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Tone {
    /// A good result.
    Positive,
    /// A stop that is not a disaster.
    Warning,
    /// A bad result.
    Danger,
    /// Neither.
    Neutral,
}

impl Tone {
    /// Tone matching a degree of success.
    pub fn for_degree(degree: Degree) -> Self {
        match degree {
            Degree::CriticalSuccess | Degree::Success => Self::Positive,
            Degree::Failure => Self::Neutral,
            Degree::CriticalFailure => Self::Danger,
        }
    }
}

/// A labelled value in a report header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Fact {
    /// Label, e.g. "DC".
    pub label: String,
    /// Value, e.g. "40".
    pub value: String,
}

/// One row of the roll transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportRow {
    /// Attempt or roll number.
    pub number: u32,
    /// Natural d20 face.
    pub die_face: u32,
    /// Check total.
    pub total: i32,
    /// Degree of success.
    pub degree: Degree,
    /// Progress gained, for lock attempts.
    pub progress: Option<u32>,
    /// Free-text note, for lock attempts.
    pub note: Option<String>,
}

/// The final word of a report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Verdict {
    /// Colouring hint.
    pub tone: Tone,
    /// Text, e.g. "Lock opened".
    pub text: String,
}

/// A human-readable report of one run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    /// Heading.
    pub title: String,
    /// Who may see it.
    pub audience: Audience,
    /// Header facts, in display order.
    pub facts: Vec<Fact>,
    /// Transcript rows, in roll order.
    pub rows: Vec<ReportRow>,
    /// Outcome.
    pub verdict: Verdict,
    /// Extra line under the verdict.
    pub footnote: Option<String>,
}

impl Report {
    /// Value of the first fact with this label.
    pub fn fact(&self, label: &str) -> Option<&str> {
        self.facts
            .iter()
            .find(|f| f.label == label)
            .map(|f| f.value.as_str())
    }

    /// Whether the transcript carries progress and note columns.
    pub fn has_progress_columns(&self) -> bool {
        self.rows.iter().any(|r| r.progress.is_some())
    }
}

impl std::fmt::Display for Report {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "== {} ==", self.title)?;
        for fact in &self.facts {
            writeln!(f, "{}: {}", fact.label, fact.value)?;
        }
        if self.rows.is_empty() {
            writeln!(f, "(no attempts)")?;
        }
        for row in &self.rows {
            write!(
                f,
                "#{} d20={} total={} {}",
                row.number,
                row.die_face,
                row.total,
                row.degree.short_label()
            )?;
            if let Some(progress) = row.progress {
                write!(f, " +{progress}")?;
            }
            if let Some(note) = &row.note {
                write!(f, " ({note})")?;
            }
            writeln!(f)?;
        }
        write!(f, "=> {}", self.verdict.text)?;
        if let Some(footnote) = &self.footnote {
            write!(f, "\n{footnote}")?;
        }
        Ok(())
    }
}

/// Where finished reports are published.
pub trait ReportSink {
    /// Publish one report.
    fn publish(&mut self, report: &Report);
}

/// A sink that keeps every report in memory.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    /// Published reports, oldest first.
    pub reports: Vec<Report>,
}

impl ReportSink for MemorySink {
    fn publish(&mut self, report: &Report) {
        self.reports.push(report.clone());
    }
}
