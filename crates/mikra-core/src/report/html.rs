//! Standalone HTML export of a report view.
//!
//! All user- and model-supplied text is escaped before insertion into
//! markup; the structure itself comes from the trusted view model.

use super::view::{NamedList, ReportView, Section, SectionBody};

/// Escape text for safe insertion into HTML.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#039;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Render a full report document.
pub fn render_report(view: &ReportView) -> String {
    let mut body = String::new();

    if !view.badges.is_empty() {
        body.push_str("<div class=\"badges\">");
        for badge in &view.badges {
            body.push_str(&format!("<span class=\"pill\">{}</span>", escape_html(badge)));
        }
        body.push_str("</div>\n");
    }

    for section in &view.sections {
        render_section(&mut body, section);
    }

    document(&body)
}

/// Render the raw-text fallback panel for a non-JSON completion.
pub fn render_raw(text: &str) -> String {
    let body = format!(
        "<div class=\"section\">\n<h3>המודל החזיר תשובה לא-JSON</h3>\n\
         <pre>{}</pre>\n</div>\n",
        escape_html(text)
    );
    document(&body)
}

fn render_section(out: &mut String, section: &Section) {
    out.push_str("<div class=\"section\">\n");
    out.push_str(&format!("<h3>{}</h3>\n", escape_html(&section.title)));

    match &section.body {
        SectionBody::KeyValues(pairs) => {
            out.push_str("<dl class=\"kv\">\n");
            for (key, value) in pairs {
                out.push_str(&format!(
                    "<dt>{}</dt><dd>{}</dd>\n",
                    escape_html(key),
                    escape_html(value)
                ));
            }
            out.push_str("</dl>\n");
        }
        SectionBody::Table { headers, rows } => {
            out.push_str("<table class=\"table\">\n<thead><tr>");
            for header in headers {
                out.push_str(&format!("<th>{}</th>", escape_html(header)));
            }
            out.push_str("</tr></thead>\n<tbody>\n");
            for row in rows {
                out.push_str("<tr>");
                for cell in row {
                    out.push_str(&format!("<td>{}</td>", escape_html(cell)));
                }
                out.push_str("</tr>\n");
            }
            out.push_str("</tbody>\n</table>\n");
        }
        SectionBody::Lists(lists) => {
            for NamedList { name, items } in lists {
                out.push_str(&format!("<div class=\"note\"><b>{}</b></div>\n", escape_html(name)));
                if items.is_empty() {
                    out.push_str("<div class=\"note\">—</div>\n");
                } else {
                    out.push_str("<ul class=\"list\">\n");
                    for item in items {
                        out.push_str(&format!("<li>{}</li>\n", escape_html(item)));
                    }
                    out.push_str("</ul>\n");
                }
            }
        }
        SectionBody::Empty(message) => {
            out.push_str(&format!("<div class=\"note\">{}</div>\n", escape_html(message)));
        }
    }

    if let Some(footnote) = &section.footnote {
        out.push_str(&format!("<div class=\"note\">{}</div>\n", escape_html(footnote)));
    }

    out.push_str("</div>\n");
}

fn document(body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html dir=\"rtl\" lang=\"he\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>דו\"ח אבחון קריאה</title>\n<style>{STYLE}</style>\n</head>\n\
         <body>\n{body}</body>\n</html>\n"
    )
}

const STYLE: &str = "\
body{font-family:sans-serif;max-width:60rem;margin:2rem auto;padding:0 1rem;color:#111827}\
.section{margin:1.5rem 0;padding:1rem;border:1px solid #e5e7eb;border-radius:8px}\
.pill{display:inline-block;margin-inline-end:.5rem;padding:.2rem .7rem;\
border-radius:999px;background:#eef2ff;font-size:.9rem}\
.table{width:100%;border-collapse:collapse}\
.table th,.table td{border:1px solid #e5e7eb;padding:.4rem;text-align:right}\
.kv dt{font-weight:bold}.kv dd{margin:0 0 .5rem 0}\
.note{font-size:.95rem;color:#374151;margin:.3rem 0}\
pre{white-space:pre-wrap;font-size:13px}";

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::schema::{AnalysisReport, Transcription};
    use crate::report::view::project;

    #[test]
    fn model_text_is_escaped() {
        let report = AnalysisReport {
            transcription: Transcription {
                text: Some("<script>alert('x')</script>".into()),
                notes: None,
            },
            ..Default::default()
        };
        let html = render_report(&project(&report));
        assert!(!html.contains("<script>alert"));
        assert!(html.contains("&lt;script&gt;alert(&#039;x&#039;)&lt;/script&gt;"));
    }

    #[test]
    fn raw_fallback_is_escaped_verbatim() {
        let html = render_raw("a < b & \"c\"");
        assert!(html.contains("a &lt; b &amp; &quot;c&quot;"));
        assert!(html.contains("תשובה לא-JSON"));
    }

    #[test]
    fn empty_report_renders_every_section() {
        let html = render_report(&project(&AnalysisReport::default()));
        for title in [
            "תקציר ותמלול",
            "מדדים כמותיים",
            "ניתוח שגיאות לפי קטגוריות",
            "דוגמאות משמעותיות",
            "חוזקות ואתגרים",
            "תוכנית עבודה",
            "דגלים והמלצות זהירות לבירור",
        ] {
            assert!(html.contains(title), "missing section {title}");
        }
    }

    #[test]
    fn escape_handles_all_special_characters() {
        assert_eq!(escape_html("&<>\"'"), "&amp;&lt;&gt;&quot;&#039;");
        assert_eq!(escape_html("שלום"), "שלום");
    }
}
