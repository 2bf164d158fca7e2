//! Diagram descriptor pass-through.
//!
//! Diagrams are written in a small declarative graph/flow/pie/timeline
//! language and rendered later by an external renderer once the markup is
//! attached to a live view. This module never parses or validates a
//! descriptor: it only wraps the text in the container the renderer looks
//! for. A malformed descriptor is the renderer's failure to report.
//!
//! The builders below assemble descriptors from document data. They sanitize
//! user-supplied labels so a value cannot break out of its statement, then
//! hand back an opaque [`Diagram`].

use serde::{Deserialize, Serialize};
use std::fmt;

/// Class of the container recognised by the diagram renderer.
pub const DIAGRAM_CLASS: &str = "mermaid";

/// An opaque diagram descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Diagram(String);

impl Diagram {
    /// Wrap descriptor text.
    pub fn new(descriptor: impl Into<String>) -> Self {
        Self(descriptor.into())
    }

    /// The descriptor text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Diagram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Diagram {
    fn from(s: &str) -> Self {
        Diagram::new(s)
    }
}

impl From<String> for Diagram {
    fn from(s: String) -> Self {
        Diagram(s)
    }
}

/// Embed a descriptor verbatim in a tagged container.
pub fn embed_diagram(diagram: &Diagram) -> String {
    format!(
        "<div class=\"{}\">\n{}\n</div>\n",
        DIAGRAM_CLASS,
        diagram.as_str().trim_end()
    )
}

/// Make a user-supplied label safe to place inside a descriptor statement.
///
/// Characters that the diagram language or the surrounding markup treat as
/// syntax are replaced; whitespace runs collapse to one space.
pub fn sanitize_label(label: &str) -> String {
    let replaced: String = label
        .chars()
        .map(|c| match c {
            '"' | '`' => '\'',
            '<' | '>' | '{' | '}' | '[' | ']' | '(' | ')' | ';' | '#' | '&' => ' ',
            ':' => '-',
            c if c.is_control() => ' ',
            c => c,
        })
        .collect();
    replaced.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// A task row of a gantt chart.
#[derive(Debug, Clone, PartialEq)]
pub struct GanttTask {
    /// Task label
    pub name: String,
    /// Start date (`YYYY-MM-DD`), or `None` to follow the previous task
    pub start: Option<String>,
    /// Length in days
    pub days: u32,
}

/// Build a gantt chart.
pub fn gantt(title: &str, section: &str, tasks: &[GanttTask]) -> Diagram {
    let mut out = String::from("gantt\n");
    out.push_str(&format!("    title {}\n", sanitize_label(title)));
    out.push_str("    dateFormat YYYY-MM-DD\n");
    out.push_str(&format!("    section {}\n", sanitize_label(section)));
    for (i, task) in tasks.iter().enumerate() {
        let id = format!("t{}", i + 1);
        let start = match (&task.start, i) {
            (Some(date), _) => date.clone(),
            (None, 0) => "2000-01-01".to_string(),
            (None, _) => format!("after t{}", i),
        };
        out.push_str(&format!(
            "    {} :{}, {}, {}d\n",
            sanitize_label(&task.name),
            id,
            start,
            task.days.max(1)
        ));
    }
    Diagram::new(out)
}

/// Build a pie chart from labelled values.
pub fn pie(title: &str, slices: &[(String, f64)]) -> Diagram {
    let mut out = format!("pie title {}\n", sanitize_label(title));
    for (label, value) in slices {
        out.push_str(&format!("    \"{}\" : {}\n", sanitize_label(label), value));
    }
    Diagram::new(out)
}

/// Build a left-to-right flowchart where each node feeds the next.
pub fn flowchart(nodes: &[String]) -> Diagram {
    let mut out = String::from("flowchart LR\n");
    for (i, node) in nodes.iter().enumerate() {
        out.push_str(&format!("    n{}[\"{}\"]\n", i, sanitize_label(node)));
    }
    for i in 1..nodes.len() {
        out.push_str(&format!("    n{} --> n{}\n", i - 1, i));
    }
    Diagram::new(out)
}

/// Build a timeline of `(period, event)` pairs.
pub fn timeline(title: &str, events: &[(String, String)]) -> Diagram {
    let mut out = String::from("timeline\n");
    out.push_str(&format!("    title {}\n", sanitize_label(title)));
    for (period, event) in events {
        out.push_str(&format!(
            "    {} : {}\n",
            sanitize_label(period),
            sanitize_label(event)
        ));
    }
    Diagram::new(out)
}

/// Build a quadrant chart placing risks by probability and impact (0.0-1.0).
pub fn risk_quadrant(points: &[(String, f64, f64)]) -> Diagram {
    let mut out = String::from("quadrantChart\n");
    out.push_str("    title Risk Matrix\n");
    out.push_str("    x-axis Low Probability --> High Probability\n");
    out.push_str("    y-axis Low Impact --> High Impact\n");
    out.push_str("    quadrant-1 Mitigate\n");
    out.push_str("    quadrant-2 Monitor closely\n");
    out.push_str("    quadrant-3 Accept\n");
    out.push_str("    quadrant-4 Contingency\n");
    for (label, x, y) in points {
        out.push_str(&format!(
            "    {}: [{:.2}, {:.2}]\n",
            sanitize_label(label),
            x.clamp(0.0, 1.0),
            y.clamp(0.0, 1.0)
        ));
    }
    Diagram::new(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embed_is_verbatim() {
        let diagram = Diagram::new("graph TD\n  A-->B\n  this is not valid }}}");
        let html = embed_diagram(&diagram);
        assert_eq!(
            html,
            "<div class=\"mermaid\">\ngraph TD\n  A-->B\n  this is not valid }}}\n</div>\n"
        );
    }

    #[test]
    fn test_sanitize_label() {
        assert_eq!(sanitize_label("Phase: \"Build\" <fast>"), "Phase- 'Build' fast");
        assert_eq!(sanitize_label("a\n\tb"), "a b");
    }

    #[test]
    fn test_gantt_chains_tasks() {
        let tasks = vec![
            GanttTask {
                name: "Discovery".to_string(),
                start: Some("2026-01-05".to_string()),
                days: 14,
            },
            GanttTask {
                name: "Build".to_string(),
                start: None,
                days: 0,
            },
        ];
        let chart = gantt("Plan", "Phases", &tasks);
        assert!(chart.as_str().starts_with("gantt\n"));
        assert!(chart.as_str().contains("Discovery :t1, 2026-01-05, 14d"));
        assert!(chart.as_str().contains("Build :t2, after t1, 1d"));
    }

    #[test]
    fn test_pie_and_flowchart() {
        let chart = pie("Budget", &[("Design".to_string(), 5000.0)]);
        assert!(chart.as_str().contains("\"Design\" : 5000"));

        let flow = flowchart(&["Client".to_string(), "API".to_string(), "DB".to_string()]);
        assert!(flow.as_str().contains("n0 --> n1"));
        assert!(flow.as_str().contains("n1 --> n2"));
    }

    #[test]
    fn test_empty_builders_still_produce_headers() {
        assert_eq!(timeline("T", &[]).as_str(), "timeline\n    title T\n");
        assert_eq!(flowchart(&[]).as_str(), "flowchart LR\n");
    }
}
