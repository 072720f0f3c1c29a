//! Prompt construction for the reading-diagnostic request.
//!
//! `build_prompt` is a pure function over the request fields: the same
//! inputs always produce byte-identical output. The instruction blocks are
//! constants; only the input section is interpolated, and every optional
//! field renders an explicit placeholder when absent so the model never sees
//! an empty interpolation.

use crate::request::{AnalysisRequest, TextMode};

/// Placeholder for absent grade/age/dialect fields.
const NOT_SPECIFIED: &str = "לא צוין";
/// Placeholder for absent teacher notes.
const NO_NOTES: &str = "אין";
/// Placeholder for an unknown audio duration or MIME type.
const UNKNOWN: &str = "לא ידוע";

/// Role definition and ground rules for the model.
const PREAMBLE: &str = "\
אתה מומחה להוראה מתקנת ולאבחון קשיי קריאה בעברית, עם התמחות בקריאה קולית, ניקוד, מורפולוגיה ושטף קריאה.
המטרה: לסייע למורה/מאבחנת לבנות תמונת מצב + תוכנית עבודה. אינך רופא ואינך נותן אבחנה רפואית; אם יש צורך בהפניה (ראייה/שמיעה/קשב וכו') תציין זאת כהמלצה כללית בלבד.
אל תמציא עובדות. אם משהו לא ניתן להסקה מהאודיו ומהטקסט – כתוב במפורש \"לא ניתן לקבוע\".";

/// The analytic task: transcription, alignment, error taxonomy, metrics,
/// reading profile, component hypotheses, intervention plan, referral flags.
const TASK_BLOCK: &str = "\
====================
משימה (מה לעשות בפועל)
====================
1) תמלול מדויק:
   - האזן לאודיו ותמלל את הקריאה בפועל בעברית.
   - שמור סימנים של היסוס/תיקון עצמי/חזרה (למשל: \"…\" או \"[היסוס]\", \"[תיקון עצמי]\").
   - אם יש מילה לא ברורה: סמן \"[לא ברור]\".

2) יישור (Alignment) מול טקסט היעד:
   - חלק את טקסט היעד לרצף מילים (שמור סדר).
   - עבור כל מילה, נסה לזהות מה נאמר בפועל (או שדלגו/הוסיפו).
   - הפק מערך alignment שבו לכל פריט יש:
     index, expected, spoken, status(OK/ERROR/OMITTED/INSERTED/UNCLEAR), error_types[], severity, notes.

3) סיווג שגיאות איכותני לפי קטגוריות:
   א. שגיאות גרפו-פונמיות (אות/תנועה):
      - שיכול (היפוך סדר)
      - החלפה (אות/ניקוד)
      - הוספה
      - השמטה
   ב. שגיאות מורפולוגיות:
      - בניינים/זמנים/גוף, תחיליות/סופיות
      - שורש (בלבול שורשים)
      - שייכות
      - מש\"ה וכל\"ב (אותיות שימוש/תחיליות)
      - סמיכות
   ג. עמימות אורתוגרפית / הומוגרפים (בפרט בלא מנוקד)
   ד. שגיאות סמנטיות/תחביריות:
      - פרוזודיה (עצירות לא לפי פיסוק)
      - הטעמה (דגשים/מלעיל-מלרע וכו' אם נשמע)
      - מילות פונקציה (מילות תפקוד)
      - הפקת משמעות (אם ניתן להסיק מהאודיו/הערות)

   לכל קטגוריה תן:
   - ספירה משוערת (כמה אירועים)
   - דוגמאות קונקרטיות (expected→spoken)
   - הערכת \"חומרה\":
     * חמורה: משנה משמעות/פוגעת בהבנה
     * קלה: לא משנה משמעות באופן מובהק

4) מדדים כמותיים:
   - WPM = מספר מילים ÷ (זמן בשניות / 60) — אם זמן ידוע.
   - Accuracy% = 1 − (שגיאות ÷ מילים) × 100 (שגיאה = כל הגה/רכיב שונה, ייתכנו כמה שגיאות במילה).
   - כלל פרקטי: אם הדיוק נמוך מ-85% — אל תציג \"שטף\" כמסקנה מרכזית; ציין שהשטף לא יציב כי הדיוק עדיין לא מבוסס.
   - תאר גם: היסוסים, תיקון עצמי, קריאה מצרפת/מתרשמת, זמן שהייה בין הברות/מילים (אם ניתן לשמוע).

5) פרופיל קריאה (סיווג):
   קבע פרופיל אחד או שניים (אם יש ערבוב) מתוך:
   - איטי ומדויק
   - מצרף ומדויק
   - מתרשם ומהיר
   - מתרשם ומצרף
   - מתרשם ואיטי
   נמק בקצרה על בסיס מדדים + מאפייני הקריאה.

6) השערות רכיבי-בסיס (פרופיל קוגניטיבי-לשוני) — בלי \"אבחון חד משמעי\":
   תן השערה (גבוה/בינוני/נמוך) ל:
   - פונולוגיה (כולל מוקדי מבוכה: שוואים, פתח גנובה, יו\"ד מונעת, דגוש/רפה, קמץ קטן וכו')
   - מורפולוגיה (תבנית/שורש/סמיכות/שייכות/אותיות שימוש)
   - ידע אורתוגרפי לקסיקלי / עמימות
   - שיום מהיר (RAN) / אוטומציה
   לכל רכיב: ראיות מהאודיו + מה עוד כדאי לבדוק (מטלות/תצפיות שהמורה יכולה לאסוף).

7) תוכנית עבודה פרקטית:
   בנה תוכנית ל-2–4 שבועות הקרובים:
   - 3–5 מטרות מדידות (למשל: דיוק 95–98%, שיפור WPM ליעד, ירידה בשגיאות מסוג X)
   - תרגול בכיתה + תרגול בית (קצר, יומי)
   - הצעות פרקטיקות: קריאה חוזרת, קריאה תיאטרלית לשיפור הנגנה, חקירת משפט (פיסוק/מבנה), חקירת מילים (ניקוד/מורפו-אורתוגרפי/עמימות), עבודה על אוצר מילים ואיות — תתאים למה שראית.
   - \"מה עושים מחר בבוקר\": 3 צעדים ראשונים מאוד קונקרטיים.

8) המלצות כלליות להפניה/בירור (רק אם יש אינדיקציה):
   - בדיקת ראייה/שמיעה
   - שיחה על קשב/עייפות/מאמץ (אם יש מאמץ גבוה/הימנעות/חרדה)
   תנסח בזהירות ובכבוד.";

/// Output-format contract: JSON only, exact schema.
const OUTPUT_BLOCK: &str = r#"====================
פורמט פלט (חובה!)
====================
תחזיר *רק* JSON תקין. בלי Markdown. בלי טקסט מסביב. בלי הסברים על הפורמט.

הסכמה (Schema) שאתה חייב לעמוד בה:
{
  "meta": {
    "language": "he",
    "version": "2.0",
    "confidence_overall": 0.0,
    "limitations": []
  },
  "input_summary": {
    "grade": "",
    "age": "",
    "text_mode": "pointed|unpointed",
    "dialect": "",
    "word_count": 0,
    "audio_seconds": 0
  },
  "transcription": {
    "text": "",
    "notes": ""
  },
  "metrics": {
    "wpm": null,
    "accuracy_percent": null,
    "error_events_estimated": null,
    "hesitation_events_estimated": null,
    "self_corrections_estimated": null,
    "interpretation": ""
  },
  "reading_profile": {
    "label": "",
    "secondary_label": "",
    "rationale": ""
  },
  "error_analysis": {
    "totals_by_category": {
      "grapho_phonemic": 0,
      "morphological": 0,
      "orthographic_ambiguity": 0,
      "semantic_syntactic_prosody": 0
    },
    "high_impact_examples": [
      {
        "expected": "",
        "spoken": "",
        "category": "",
        "subtype": "",
        "severity": "minor|major",
        "note": ""
      }
    ]
  },
  "alignment": [
    {
      "index": 0,
      "expected": "",
      "spoken": "",
      "status": "OK|ERROR|OMITTED|INSERTED|UNCLEAR",
      "error_types": [],
      "severity": "minor|major",
      "notes": ""
    }
  ],
  "strengths": [],
  "difficulties": [],
  "hypotheses_components": [
    {
      "component": "phonology|morphology|orthographic_lexical|RAN_automation",
      "likelihood": "low|medium|high",
      "evidence": [],
      "what_to_check_next": []
    }
  ],
  "goals": [
    {
      "domain": "",
      "target": "",
      "success_criteria": "",
      "timeframe_weeks": 0
    }
  ],
  "intervention_plan": {
    "next_session": [],
    "next_2_weeks": [],
    "home_practice": [],
    "teacher_data_to_collect": []
  },
  "referral_flags": {
    "vision_hearing": "",
    "attention_fatigue_emotion": "",
    "other": ""
  }
}

שים לב:
- אם אין audio_seconds — wpm יהיה null ותציין זאת.
- אם אין ביטחון בתמלול/יישור — תעלה את limitations ותוריד confidence_overall."#;

/// Render the full instruction document for one request.
pub fn build_prompt(request: &AnalysisRequest) -> String {
    let mode_word = match request.text_mode {
        TextMode::Pointed => "מנוקדת",
        TextMode::Unpointed => "לא מנוקדת",
    };

    let grade = placeholder_or(request.grade.as_deref(), NOT_SPECIFIED);
    let age = placeholder_or(request.age.as_deref(), NOT_SPECIFIED);
    let dialect = placeholder_or(request.dialect.as_deref(), NOT_SPECIFIED);
    let notes = placeholder_or(request.teacher_notes.as_deref(), NO_NOTES);
    let audio_seconds = request
        .audio
        .duration_secs
        .map(|s| format!("{s:.1}"))
        .unwrap_or_else(|| UNKNOWN.to_string());
    let mime = if request.audio.mime_type.is_empty() {
        UNKNOWN
    } else {
        request.audio.mime_type.as_str()
    };

    let input_block = format!(
        "====================\n\
         קלט (Input)\n\
         ====================\n\
         - טקסט יעד שהילד היה אמור לקרוא (עברית {mode_word}):\n\
         \"\"\"\n\
         {target}\n\
         \"\"\"\n\
         - פרטים (אם קיימים):\n  \
         - כיתה: {grade}\n  \
         - גיל: {age}\n  \
         - הברה/מבטא: {dialect}\n  \
         - הערות מורה: {notes}\n\
         - נתונים טכניים (לחישוב מדדים):\n  \
         - מספר מילים בטקסט (ספירה מערכתית): {word_count}\n  \
         - אורך האודיו (שניות): {audio_seconds}\n  \
         - סוג קובץ אודיו: {mime}",
        target = request.target_text,
        word_count = request.word_count,
    );

    format!("{PREAMBLE}\n\n{input_block}\n\n{TASK_BLOCK}\n\n{OUTPUT_BLOCK}")
}

fn placeholder_or<'a>(value: Option<&'a str>, placeholder: &'a str) -> &'a str {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => v,
        _ => placeholder,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::AudioAsset;
    use crate::request::Routing;

    fn request_with(duration: Option<f64>) -> AnalysisRequest {
        let audio = match duration {
            Some(secs) => AudioAsset::with_duration(vec![0u8; 16], "audio/webm", secs),
            None => AudioAsset {
                data: vec![0u8; 16],
                mime_type: "audio/webm".into(),
                duration_secs: None,
            },
        };
        AnalysisRequest {
            target_text: "שלום עולם".into(),
            text_mode: TextMode::Pointed,
            grade: None,
            age: None,
            dialect: None,
            teacher_notes: None,
            word_count: 2,
            audio,
            model: "gemini-3-flash-preview".into(),
            temperature: 0.2,
            routing: Routing::Direct("AIza-test".into()),
        }
    }

    #[test]
    fn prompt_is_deterministic() {
        let request = request_with(Some(6.0));
        assert_eq!(build_prompt(&request), build_prompt(&request));
    }

    #[test]
    fn target_text_appears_verbatim() {
        let prompt = build_prompt(&request_with(Some(6.0)));
        assert!(prompt.contains("שלום עולם"));
        assert!(prompt.contains("מספר מילים בטקסט (ספירה מערכתית): 2"));
        assert!(prompt.contains("אורך האודיו (שניות): 6.0"));
    }

    #[test]
    fn absent_fields_render_placeholders() {
        let prompt = build_prompt(&request_with(None));
        assert!(prompt.contains("כיתה: לא צוין"));
        assert!(prompt.contains("גיל: לא צוין"));
        assert!(prompt.contains("הברה/מבטא: לא צוין"));
        assert!(prompt.contains("הערות מורה: אין"));
        assert!(prompt.contains("אורך האודיו (שניות): לא ידוע"));
    }

    #[test]
    fn present_fields_replace_placeholders() {
        let mut request = request_with(Some(6.0));
        request.grade = Some("ג".into());
        request.teacher_notes = Some("קורא לאט".into());

        let prompt = build_prompt(&request);
        assert!(prompt.contains("כיתה: ג"));
        assert!(prompt.contains("הערות מורה: קורא לאט"));
        assert!(!prompt.contains("הערות מורה: אין"));
    }

    #[test]
    fn unpointed_mode_changes_the_wording() {
        let mut request = request_with(Some(6.0));
        request.text_mode = TextMode::Unpointed;
        assert!(build_prompt(&request).contains("עברית לא מנוקדת"));
    }

    #[test]
    fn schema_contract_is_embedded() {
        let prompt = build_prompt(&request_with(Some(6.0)));
        for field in [
            "\"transcription\"",
            "\"metrics\"",
            "\"reading_profile\"",
            "\"high_impact_examples\"",
            "\"hypotheses_components\"",
            "\"intervention_plan\"",
            "\"referral_flags\"",
            "OK|ERROR|OMITTED|INSERTED|UNCLEAR",
            "minor|major",
            "low|medium|high",
        ] {
            assert!(prompt.contains(field), "missing {field}");
        }
    }
}
