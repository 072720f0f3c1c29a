//! Pure projection of an [`AnalysisReport`] into a displayable view model.
//!
//! The view model is plain data — titles, key/value pairs, tables, lists —
//! so both the terminal output and the HTML export render the same
//! structure, and the projection can be tested without any rendered
//! surface. Every source field is optional: absence becomes a "—"
//! placeholder or an empty-state message, never a panic.

use super::schema::AnalysisReport;

/// Placeholder for absent values.
pub const DASH: &str = "—";

/// At most this many high-impact example rows are shown.
const MAX_EXAMPLE_ROWS: usize = 12;
/// At most this many component-hypothesis rows are shown.
const MAX_HYPOTHESIS_ROWS: usize = 8;

#[derive(Debug, Clone)]
pub struct ReportView {
    /// Badge strip: profile label, rounded accuracy percent, rounded WPM.
    pub badges: Vec<String>,
    pub sections: Vec<Section>,
}

#[derive(Debug, Clone)]
pub struct Section {
    pub title: String,
    pub body: SectionBody,
    /// Small trailing note, e.g. the model's stated limitations.
    pub footnote: Option<String>,
}

#[derive(Debug, Clone)]
pub enum SectionBody {
    KeyValues(Vec<(String, String)>),
    Table {
        headers: Vec<String>,
        rows: Vec<Vec<String>>,
    },
    Lists(Vec<NamedList>),
    /// Empty-state message when the model sent nothing for this section.
    Empty(String),
}

#[derive(Debug, Clone)]
pub struct NamedList {
    pub name: String,
    pub items: Vec<String>,
}

/// Project a report into the fixed section sequence.
pub fn project(report: &AnalysisReport) -> ReportView {
    ReportView {
        badges: badges(report),
        sections: vec![
            summary_section(report),
            metrics_section(report),
            category_totals_section(report),
            examples_section(report),
            strengths_section(report),
            hypotheses_section(report),
            plan_section(report),
            referral_section(report),
        ],
    }
}

fn badges(report: &AnalysisReport) -> Vec<String> {
    let mut badges = Vec::new();
    if let Some(label) = non_empty(report.reading_profile.label.as_deref()) {
        badges.push(format!("פרופיל: {label}"));
    }
    if let Some(acc) = report.metrics.accuracy_percent {
        badges.push(format!("דיוק: {}%", acc.round() as i64));
    }
    if let Some(wpm) = report.metrics.wpm {
        badges.push(format!("WPM: {}", wpm.round() as i64));
    }
    badges
}

fn summary_section(report: &AnalysisReport) -> Section {
    let mut pairs = vec![(
        "תמלול".to_string(),
        non_empty(report.transcription.text.as_deref())
            .unwrap_or("לא סופק")
            .to_string(),
    )];
    if let Some(notes) = non_empty(report.transcription.notes.as_deref()) {
        pairs.push(("הערות".to_string(), notes.to_string()));
    }
    Section {
        title: "תקציר ותמלול".into(),
        body: SectionBody::KeyValues(pairs),
        footnote: None,
    }
}

fn metrics_section(report: &AnalysisReport) -> Section {
    let metrics = &report.metrics;
    let mut pairs = Vec::new();

    // Echoed inputs appear only when the model sent them back.
    if let Some(count) = report.input_summary.word_count {
        pairs.push(("מילים בטקסט".to_string(), format_count(count)));
    }
    if let Some(secs) = report.input_summary.audio_seconds {
        pairs.push(("אורך הקלטה (ש׳)".to_string(), format_count(secs)));
    }

    pairs.push((
        "WPM".to_string(),
        metrics
            .wpm
            .map(|v| (v.round() as i64).to_string())
            .unwrap_or_else(|| DASH.to_string()),
    ));
    pairs.push((
        "דיוק".to_string(),
        metrics
            .accuracy_percent
            .map(|v| format!("{}%", v.round() as i64))
            .unwrap_or_else(|| DASH.to_string()),
    ));
    pairs.push((
        "שגיאות (אירועים)".to_string(),
        metrics
            .error_events_estimated
            .map(format_count)
            .unwrap_or_else(|| DASH.to_string()),
    ));
    pairs.push((
        "היסוסים".to_string(),
        metrics
            .hesitation_events_estimated
            .map(format_count)
            .unwrap_or_else(|| DASH.to_string()),
    ));
    pairs.push((
        "תיקון עצמי".to_string(),
        metrics
            .self_corrections_estimated
            .map(format_count)
            .unwrap_or_else(|| DASH.to_string()),
    ));
    if let Some(interpretation) = non_empty(metrics.interpretation.as_deref()) {
        pairs.push(("הערת פרשנות".to_string(), interpretation.to_string()));
    }

    Section {
        title: "מדדים כמותיים".into(),
        body: SectionBody::KeyValues(pairs),
        footnote: None,
    }
}

fn category_totals_section(report: &AnalysisReport) -> Section {
    let totals = &report.error_analysis.totals_by_category;
    let rows = vec![
        category_row("גרפו-פונמי", totals.grapho_phonemic),
        category_row("מורפולוגי", totals.morphological),
        category_row("עמימות אורתוגרפית", totals.orthographic_ambiguity),
        category_row("סמנטי/תחבירי/פרוזודיה", totals.semantic_syntactic_prosody),
    ];
    Section {
        title: "ניתוח שגיאות לפי קטגוריות".into(),
        body: SectionBody::Table {
            headers: vec!["קטגוריה".into(), "כמות (משוערת)".into()],
            rows,
        },
        footnote: None,
    }
}

fn category_row(name: &str, total: Option<f64>) -> Vec<String> {
    vec![name.to_string(), format_count(total.unwrap_or(0.0))]
}

fn examples_section(report: &AnalysisReport) -> Section {
    let examples = &report.error_analysis.high_impact_examples;
    let body = if examples.is_empty() {
        SectionBody::Empty("לא נשלחו דוגמאות.".into())
    } else {
        SectionBody::Table {
            headers: vec![
                "צפוי".into(),
                "נאמר".into(),
                "קטגוריה".into(),
                "תת-סוג".into(),
                "חומרה".into(),
                "הערה".into(),
            ],
            rows: examples
                .iter()
                .take(MAX_EXAMPLE_ROWS)
                .map(|e| {
                    vec![
                        text_or_empty(e.expected.as_deref()),
                        text_or_empty(e.spoken.as_deref()),
                        text_or_empty(e.category.as_deref()),
                        text_or_empty(e.subtype.as_deref()),
                        e.severity.map(|s| s.to_string()).unwrap_or_default(),
                        text_or_empty(e.note.as_deref()),
                    ]
                })
                .collect(),
        }
    };
    Section {
        title: "דוגמאות משמעותיות".into(),
        body,
        footnote: None,
    }
}

fn strengths_section(report: &AnalysisReport) -> Section {
    Section {
        title: "חוזקות ואתגרים".into(),
        body: SectionBody::Lists(vec![
            NamedList {
                name: "חוזקות".into(),
                items: report.strengths.clone(),
            },
            NamedList {
                name: "אתגרים".into(),
                items: report.difficulties.clone(),
            },
        ]),
        footnote: None,
    }
}

fn hypotheses_section(report: &AnalysisReport) -> Section {
    let hypotheses = &report.hypotheses_components;
    let body = if hypotheses.is_empty() {
        SectionBody::Empty("לא נשלחו השערות.".into())
    } else {
        SectionBody::Table {
            headers: vec![
                "רכיב".into(),
                "סבירות".into(),
                "ראיות".into(),
                "מה לבדוק בהמשך".into(),
            ],
            rows: hypotheses
                .iter()
                .take(MAX_HYPOTHESIS_ROWS)
                .map(|h| {
                    vec![
                        h.component.map(|c| c.to_string()).unwrap_or_default(),
                        h.likelihood.map(|l| l.to_string()).unwrap_or_default(),
                        h.evidence.join(" • "),
                        h.what_to_check_next.join(" • "),
                    ]
                })
                .collect(),
        }
    };

    let footnote = if report.meta.limitations.is_empty() {
        None
    } else {
        Some(format!("מגבלות: {}", report.meta.limitations.join(" | ")))
    };

    Section {
        title: "השערות רכיבי-בסיס (לא אבחנה רפואית)".into(),
        body,
        footnote,
    }
}

fn plan_section(report: &AnalysisReport) -> Section {
    let plan = &report.intervention_plan;
    Section {
        title: "תוכנית עבודה".into(),
        body: SectionBody::Lists(vec![
            NamedList {
                name: "מה עושים בשיעור הבא".into(),
                items: plan.next_session.clone(),
            },
            NamedList {
                name: "שבועיים קרובים".into(),
                items: plan.next_2_weeks.clone(),
            },
            NamedList {
                name: "תרגול בית".into(),
                items: plan.home_practice.clone(),
            },
            NamedList {
                name: "נתונים לאיסוף ע\"י מורה".into(),
                items: plan.teacher_data_to_collect.clone(),
            },
        ]),
        footnote: None,
    }
}

fn referral_section(report: &AnalysisReport) -> Section {
    let flags = &report.referral_flags;
    Section {
        title: "דגלים והמלצות זהירות לבירור".into(),
        body: SectionBody::KeyValues(vec![
            (
                "ראייה/שמיעה".to_string(),
                text_or_dash(flags.vision_hearing.as_deref()),
            ),
            (
                "קשב/עייפות/רגש".to_string(),
                text_or_dash(flags.attention_fatigue_emotion.as_deref()),
            ),
            ("אחר".to_string(), text_or_dash(flags.other.as_deref())),
        ]),
        footnote: None,
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn text_or_empty(value: Option<&str>) -> String {
    value.unwrap_or_default().to_string()
}

fn text_or_dash(value: Option<&str>) -> String {
    non_empty(value).unwrap_or(DASH).to_string()
}

/// Counts arrive as JSON numbers; show whole values without a decimal point.
fn format_count(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        format!("{value:.1}")
    }
}
