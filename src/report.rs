//! Display model for an [`AnalysisResult`].
//!
//! The display rules live here once and are shared by the HTML page and the
//! terminal output: every summary point becomes a list item, every mapping
//! entry a labeled block, and an empty section collapses to a single notice
//! instead of an empty list.

use crate::output::AnalysisResult;

pub const NO_SUMMARY: &str = "No summary points provided.";
pub const NO_WATCHPOINTS: &str = "No critical watchpoints provided.";
pub const NO_ACTIONS: &str = "No recommended action provided.";

/// How a section's blocks should be styled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    /// Plain bullet points.
    Summary,
    /// Warning blocks (critical watchpoints).
    Warning,
    /// Advisory blocks (recommended action).
    Advisory,
}

/// One rendered block of a section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entry {
    /// An unlabeled list item.
    Item(String),
    /// A `label: text` block.
    Labeled { label: String, text: String },
    /// The "none provided" notice shown for an empty section.
    Notice(&'static str),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub title: &'static str,
    pub tone: Tone,
    pub entries: Vec<Entry>,
}

impl Section {
    /// True when the section only carries its "none provided" notice.
    pub fn is_placeholder(&self) -> bool {
        matches!(self.entries.as_slice(), [Entry::Notice(_)])
    }
}

/// The three sections in display order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub summary: Section,
    pub watchpoints: Section,
    pub actions: Section,
}

impl Report {
    pub fn from_result(result: &AnalysisResult) -> Self {
        let summary = if result.terms_summary.is_empty() {
            vec![Entry::Notice(NO_SUMMARY)]
        } else {
            result
                .terms_summary
                .iter()
                .map(|s| Entry::Item(s.clone()))
                .collect()
        };

        Self {
            summary: Section {
                title: "Summary",
                tone: Tone::Summary,
                entries: summary,
            },
            watchpoints: Section {
                title: "Critical Watchpoints",
                tone: Tone::Warning,
                entries: labeled(result.critical_watchpoints.iter(), NO_WATCHPOINTS),
            },
            actions: Section {
                title: "Recommended Action",
                tone: Tone::Advisory,
                entries: labeled(result.recommended_action.iter(), NO_ACTIONS),
            },
        }
    }

    pub fn sections(&self) -> [&Section; 3] {
        [&self.summary, &self.watchpoints, &self.actions]
    }
}

fn labeled<'a>(
    entries: impl ExactSizeIterator<Item = (&'a String, &'a String)>,
    notice: &'static str,
) -> Vec<Entry> {
    if entries.len() == 0 {
        return vec![Entry::Notice(notice)];
    }
    entries
        .map(|(label, text)| Entry::Labeled {
            label: label.clone(),
            text: text.clone(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_sections_collapse_to_notices() {
        let result: AnalysisResult = serde_json::from_str(
            r#"{"terms_summary": [], "critical_watchpoints": {}, "recommended_action": {"Action": "Review clause 5"}}"#,
        )
        .unwrap();
        let report = Report::from_result(&result);

        assert!(report.summary.is_placeholder());
        assert_eq!(report.summary.entries, vec![Entry::Notice(NO_SUMMARY)]);
        assert_eq!(report.watchpoints.entries, vec![Entry::Notice(NO_WATCHPOINTS)]);
        assert_eq!(
            report.actions.entries,
            vec![Entry::Labeled {
                label: "Action".into(),
                text: "Review clause 5".into()
            }]
        );
    }

    #[test]
    fn summary_items_keep_order() {
        let result = AnalysisResult {
            terms_summary: vec!["first".into(), "second".into()],
            ..Default::default()
        };
        let report = Report::from_result(&result);
        assert_eq!(
            report.summary.entries,
            vec![Entry::Item("first".into()), Entry::Item("second".into())]
        );
        assert_eq!(report.sections()[1].tone, Tone::Warning);
    }
}
