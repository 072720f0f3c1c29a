//! Report decoding and presentation.
//!
//! The flow is: completion text → [`parse_completion`] → either a decoded
//! [`AnalysisReport`] or the raw-text fallback → [`project`] into a
//! [`ReportView`] → rendered by the CLI (terminal) or [`html`] (export).

pub mod html;
mod parse;
pub mod schema;
mod view;

pub use parse::{ParsedCompletion, parse_completion};
pub use schema::AnalysisReport;
pub use view::{DASH, NamedList, ReportView, Section, SectionBody, project};

#[cfg(test)]
mod tests {
    use super::*;

    // End-to-end over the decode + projection stages: a fenced completion
    // with wpm 20 and accuracy 90 ends up on the badge strip, rounded.
    #[test]
    fn fenced_completion_reaches_the_badge_strip() {
        let completion = "```json\n{\"metrics\":{\"wpm\":20,\"accuracy_percent\":90}}\n```";
        let report = match parse_completion(completion) {
            ParsedCompletion::Report(report) => report,
            ParsedCompletion::Raw(raw) => panic!("expected a report, got raw text: {raw}"),
        };

        let view = project(&report);
        assert!(view.badges.contains(&"דיוק: 90%".to_string()));
        assert!(view.badges.contains(&"WPM: 20".to_string()));
    }
}
