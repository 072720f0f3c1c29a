//! The diagnostic report shape requested from the model.
//!
//! This mirrors the schema embedded in the prompt. It is a best-effort
//! contract: every field is optional or defaulted so a sparse-but-valid
//! completion still decodes, while the closed vocabularies (severity,
//! alignment status, likelihood, component) are real enums — a completion
//! that invents values for them fails the decode and falls back to the
//! raw-text path.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalysisReport {
    #[serde(default)]
    pub meta: Meta,
    #[serde(default)]
    pub input_summary: InputSummary,
    #[serde(default)]
    pub transcription: Transcription,
    #[serde(default)]
    pub metrics: Metrics,
    #[serde(default)]
    pub reading_profile: ReadingProfile,
    #[serde(default)]
    pub error_analysis: ErrorAnalysis,
    #[serde(default)]
    pub alignment: Vec<AlignmentItem>,
    #[serde(default)]
    pub strengths: Vec<String>,
    #[serde(default)]
    pub difficulties: Vec<String>,
    #[serde(default)]
    pub hypotheses_components: Vec<ComponentHypothesis>,
    #[serde(default)]
    pub goals: Vec<Goal>,
    #[serde(default)]
    pub intervention_plan: InterventionPlan,
    #[serde(default)]
    pub referral_flags: ReferralFlags,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Meta {
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub confidence_overall: Option<f64>,
    #[serde(default)]
    pub limitations: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InputSummary {
    #[serde(default)]
    pub grade: Option<String>,
    #[serde(default)]
    pub age: Option<String>,
    #[serde(default)]
    pub text_mode: Option<String>,
    #[serde(default)]
    pub dialect: Option<String>,
    #[serde(default)]
    pub word_count: Option<f64>,
    #[serde(default)]
    pub audio_seconds: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Transcription {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Metrics {
    #[serde(default)]
    pub wpm: Option<f64>,
    #[serde(default)]
    pub accuracy_percent: Option<f64>,
    #[serde(default)]
    pub error_events_estimated: Option<f64>,
    #[serde(default)]
    pub hesitation_events_estimated: Option<f64>,
    #[serde(default)]
    pub self_corrections_estimated: Option<f64>,
    #[serde(default)]
    pub interpretation: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReadingProfile {
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub secondary_label: Option<String>,
    #[serde(default)]
    pub rationale: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ErrorAnalysis {
    #[serde(default)]
    pub totals_by_category: CategoryTotals,
    #[serde(default)]
    pub high_impact_examples: Vec<ErrorExample>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CategoryTotals {
    #[serde(default)]
    pub grapho_phonemic: Option<f64>,
    #[serde(default)]
    pub morphological: Option<f64>,
    #[serde(default)]
    pub orthographic_ambiguity: Option<f64>,
    #[serde(default)]
    pub semantic_syntactic_prosody: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ErrorExample {
    #[serde(default)]
    pub expected: Option<String>,
    #[serde(default)]
    pub spoken: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub subtype: Option<String>,
    #[serde(default)]
    pub severity: Option<Severity>,
    #[serde(default)]
    pub note: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AlignmentItem {
    #[serde(default)]
    pub index: Option<f64>,
    #[serde(default)]
    pub expected: Option<String>,
    #[serde(default)]
    pub spoken: Option<String>,
    #[serde(default)]
    pub status: Option<AlignmentStatus>,
    #[serde(default)]
    pub error_types: Vec<String>,
    #[serde(default)]
    pub severity: Option<Severity>,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ComponentHypothesis {
    #[serde(default)]
    pub component: Option<Component>,
    #[serde(default)]
    pub likelihood: Option<Likelihood>,
    #[serde(default)]
    pub evidence: Vec<String>,
    #[serde(default)]
    pub what_to_check_next: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Goal {
    #[serde(default)]
    pub domain: Option<String>,
    #[serde(default)]
    pub target: Option<String>,
    #[serde(default)]
    pub success_criteria: Option<String>,
    #[serde(default)]
    pub timeframe_weeks: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InterventionPlan {
    #[serde(default)]
    pub next_session: Vec<String>,
    #[serde(default)]
    pub next_2_weeks: Vec<String>,
    #[serde(default)]
    pub home_practice: Vec<String>,
    #[serde(default)]
    pub teacher_data_to_collect: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReferralFlags {
    #[serde(default)]
    pub vision_hearing: Option<String>,
    #[serde(default)]
    pub attention_fatigue_emotion: Option<String>,
    #[serde(default)]
    pub other: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Minor,
    Major,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Minor => write!(f, "minor"),
            Severity::Major => write!(f, "major"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AlignmentStatus {
    Ok,
    Error,
    Omitted,
    Inserted,
    Unclear,
}

impl fmt::Display for AlignmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            AlignmentStatus::Ok => "OK",
            AlignmentStatus::Error => "ERROR",
            AlignmentStatus::Omitted => "OMITTED",
            AlignmentStatus::Inserted => "INSERTED",
            AlignmentStatus::Unclear => "UNCLEAR",
        };
        write!(f, "{s}")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Likelihood {
    Low,
    Medium,
    High,
}

impl fmt::Display for Likelihood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Likelihood::Low => "low",
            Likelihood::Medium => "medium",
            Likelihood::High => "high",
        };
        write!(f, "{s}")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Component {
    #[serde(rename = "phonology")]
    Phonology,
    #[serde(rename = "morphology")]
    Morphology,
    #[serde(rename = "orthographic_lexical")]
    OrthographicLexical,
    #[serde(rename = "RAN_automation")]
    RanAutomation,
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Component::Phonology => "phonology",
            Component::Morphology => "morphology",
            Component::OrthographicLexical => "orthographic_lexical",
            Component::RanAutomation => "RAN_automation",
        };
        write!(f, "{s}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_decodes_to_defaults() {
        let report: AnalysisReport = serde_json::from_str("{}").unwrap();
        assert!(report.metrics.wpm.is_none());
        assert!(report.alignment.is_empty());
        assert!(report.meta.limitations.is_empty());
    }

    #[test]
    fn closed_vocabularies_reject_invented_values() {
        let bad = r#"{"alignment":[{"status":"MAYBE"}]}"#;
        assert!(serde_json::from_str::<AnalysisReport>(bad).is_err());

        let good = r#"{"alignment":[{"status":"OMITTED","severity":"major"}]}"#;
        let report: AnalysisReport = serde_json::from_str(good).unwrap();
        assert_eq!(report.alignment[0].status, Some(AlignmentStatus::Omitted));
        assert_eq!(report.alignment[0].severity, Some(Severity::Major));
    }

    #[test]
    fn integers_and_floats_both_decode_as_numbers() {
        let report: AnalysisReport =
            serde_json::from_str(r#"{"metrics":{"wpm":20,"accuracy_percent":90.5}}"#).unwrap();
        assert_eq!(report.metrics.wpm, Some(20.0));
        assert_eq!(report.metrics.accuracy_percent, Some(90.5));
    }

    #[test]
    fn component_names_round_trip() {
        let json = r#"{"hypotheses_components":[
            {"component":"RAN_automation","likelihood":"high"},
            {"component":"orthographic_lexical","likelihood":"low"}
        ]}"#;
        let report: AnalysisReport = serde_json::from_str(json).unwrap();
        assert_eq!(
            report.hypotheses_components[0].component,
            Some(Component::RanAutomation)
        );
        assert_eq!(
            report.hypotheses_components[1].likelihood,
            Some(Likelihood::Low)
        );
    }
}
