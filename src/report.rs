//! Headless output for the command-line front end
//!
//! Each report is `Serialize` for `--json` and `Display` for plain text.

use gcodeview_gcodeeditor::{Analysis, EditorSession};
use gcodeview_visualizer::{Bounds, CheckReport, ProjectionAbort, ScreenPoint, TableRow};
use serde::Serialize;
use std::fmt;

/// Counts for a parsed program
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub lines: usize,
    pub nodes: usize,
    pub clusters: usize,
    /// Clusters with more than one member
    pub overlaps: usize,
    pub segments: usize,
    pub bounds: Option<Bounds>,
    pub aborted: Option<ProjectionAbort>,
}

impl Summary {
    pub fn of(analysis: &Analysis, lines: usize) -> Self {
        let projection = &analysis.projection;
        Self {
            lines,
            nodes: analysis.interpretation.len(),
            clusters: projection.clusters.len(),
            overlaps: projection.clusters.iter().filter(|c| c.is_overlap()).count(),
            segments: projection.segments.len(),
            bounds: projection.bounds,
            aborted: projection.aborted.clone(),
        }
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Lines:    {}", self.lines)?;
        writeln!(f, "Nodes:    {}", self.nodes)?;
        writeln!(
            f,
            "Clusters: {} ({} overlapping)",
            self.clusters, self.overlaps
        )?;
        write!(f, "Segments: {}", self.segments)?;
        if let Some(b) = &self.bounds {
            write!(
                f,
                "\nBounds:   X {:.2}..{:.2}  Y {:.2}..{:.2}  Z {:.2}..{:.2}",
                b.min_x, b.max_x, b.min_y, b.max_y, b.min_z, b.max_z
            )?;
        }
        if let Some(abort) = &self.aborted {
            write!(f, "\n{} (line {})", abort.notice, abort.line + 1)?;
        }
        Ok(())
    }
}

/// Integrity check output
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CheckOutput {
    pub clean: bool,
    pub report: CheckReport,
    pub messages: Vec<String>,
}

impl From<CheckReport> for CheckOutput {
    fn from(report: CheckReport) -> Self {
        Self {
            clean: report.is_clean(),
            messages: report.messages(),
            report,
        }
    }
}

impl fmt::Display for CheckOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.messages.join("\n"))
    }
}

fn cell(value: Option<f64>, decimals: usize) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{:.*}", decimals, v))
}

/// Rows as an aligned text table; the line column is 1-based
pub fn format_table(rows: &[TableRow]) -> String {
    let mut out = format!(
        "{:>4} {:>5} {:<3} {:>10} {:>10} {:>10} {:>7}",
        "#", "Line", "Cmd", "X", "Y", "Z", "F"
    );
    for row in rows {
        let line = row
            .line
            .map_or_else(|| "-".to_string(), |l| (l + 1).to_string());
        out.push_str(&format!(
            "\n{:>4} {:>5} {:<3} {:>10} {:>10} {:>10} {:>7}",
            row.index,
            line,
            row.command.mnemonic(),
            cell(row.x, 2),
            cell(row.y, 2),
            cell(row.z, 2),
            cell(row.feed, 0),
        ));
    }
    out
}

/// What a click at a screen point resolved to
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Pick {
    Selected {
        node_index: Option<usize>,
        /// 0-based source line
        line: usize,
        text: String,
    },
    Expanded {
        label: usize,
        members: Vec<usize>,
    },
    Nothing,
}

/// Click once at `point`
pub fn pick(session: &mut EditorSession, point: ScreenPoint) -> Pick {
    if let Some(selection) = session.click(point) {
        return Pick::Selected {
            node_index: selection.node_index,
            line: selection.line,
            text: session.buffer().line(selection.line).unwrap_or_default(),
        };
    }
    match session.resolver().expanded() {
        Some(expanded) => {
            let members: Vec<usize> = expanded.sub_nodes.iter().map(|s| s.node_index).collect();
            Pick::Expanded {
                label: members.first().copied().unwrap_or_default(),
                members,
            }
        }
        None => Pick::Nothing,
    }
}

impl fmt::Display for Pick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Pick::Selected { line, text, .. } => write!(f, "Line {}: {}", line + 1, text),
            Pick::Expanded { label, members } => {
                let list: Vec<String> = members.iter().map(usize::to_string).collect();
                write!(
                    f,
                    "Cluster {} expanded (+{}): nodes {}",
                    label,
                    members.len().saturating_sub(1),
                    list.join(", ")
                )
            }
            Pick::Nothing => write!(f, "Nothing at this point"),
        }
    }
}
