//! # Receipt Rendering
//!
//! Markup for the confirmation view's section list and the standalone print
//! document. Every value injected into markup passes through
//! [`escape_html`].

use std::fmt::Write as _;

use pledge_core::{canonical_title, SubmissionRecord};

use crate::display::{DisplaySurface, DisplayTarget};

/// Escape the five HTML-significant characters.
pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

/// Render the acknowledged sections as a `<ul>`.
///
/// Titles come from the canonical table when the section number is known;
/// the recorded title is used only for numbers outside it.
pub fn render_sections_list(record: &SubmissionRecord) -> String {
    let mut out = String::from("<ul class=\"ack-sections\">");
    for (key, section) in &record.policy_sections {
        let title = canonical_title(*key).unwrap_or(section.title.as_str());
        let _ = write!(
            out,
            "<li data-section=\"{key}\"><span class=\"ack-check\">&#10003;</span> {}. {}</li>",
            key.number(),
            escape_html(title),
        );
    }
    out.push_str("</ul>");
    out
}

/// Values shown on a receipt, in display order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReceiptView {
    /// `(caption, value)` pairs.
    pub fields: Vec<(&'static str, String)>,
    /// Inner markup of the sections list.
    pub sections_markup: String,
}

impl ReceiptView {
    /// Read the confirmation view's current values.
    pub fn from_display<D: DisplaySurface + ?Sized>(display: &D) -> Self {
        let fields = DisplayTarget::RECEIPT_FIELDS
            .iter()
            .filter_map(|target| display.text(*target).map(|v| (target.caption(), v)))
            .collect();
        Self {
            fields,
            sections_markup: display.markup(DisplayTarget::Sections).unwrap_or_default(),
        }
    }

    /// The value shown under `caption`, if any.
    pub fn value(&self, caption: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(c, _)| *c == caption)
            .map(|(_, v)| v.as_str())
    }
}

const PRINT_STYLE: &str = "body{font-family:Georgia,serif;margin:40px;color:#222}\
h1{font-size:22px;border-bottom:2px solid #1a3c6e;padding-bottom:8px;color:#1a3c6e}\
table{border-collapse:collapse;width:100%;margin:16px 0}\
th{text-align:left;width:35%;padding:6px;background:#f3f5f9}\
td{padding:6px;border-bottom:1px solid #e1e4ea}\
ul.ack-sections{list-style:none;padding:0}\
ul.ack-sections li{padding:4px 0}\
.ack-check{color:#2e7d32;font-weight:bold}\
footer{margin-top:32px;font-size:12px;color:#666}";

/// A self-contained HTML page reproducing the confirmation view.
///
/// Field values are escaped here. The sections markup is trusted as-is since
/// it was produced by [`render_sections_list`].
pub fn render_print_document(view: &ReceiptView) -> String {
    let mut rows = String::new();
    for (caption, value) in &view.fields {
        let _ = write!(
            rows,
            "<tr><th>{}</th><td>{}</td></tr>",
            escape_html(caption),
            escape_html(value)
        );
    }
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
<title>Policy Acknowledgement Receipt</title>\n<style>{PRINT_STYLE}</style>\n</head>\n<body>\n\
<h1>Policy Acknowledgement Receipt</h1>\n<table>{rows}</table>\n\
<h2>{}</h2>\n{}\n\
<footer>Keep this receipt for your records.</footer>\n</body>\n</html>\n",
        DisplayTarget::Sections.caption(),
        view.sections_markup,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use pledge_core::{PolicySection, SectionKey, Timestamp};

    fn record_with(sections: &[(u8, &str)]) -> SubmissionRecord {
        let mut record = SubmissionRecord::empty(Timestamp::now());
        for (n, title) in sections {
            record.policy_sections.insert(
                SectionKey::new(*n).unwrap(),
                PolicySection {
                    title: title.to_string(),
                    content: "...".into(),
                },
            );
        }
        record
    }

    #[test]
    fn escapes_markup_characters() {
        assert_eq!(
            escape_html(r#"<b>"Tom" & 'Jerry'</b>"#),
            "&lt;b&gt;&quot;Tom&quot; &amp; &#39;Jerry&#39;&lt;/b&gt;"
        );
        assert_eq!(escape_html("plain"), "plain");
    }

    #[test]
    fn canonical_titles_override_recorded_ones() {
        let html = render_sections_list(&record_with(&[(1, "whatever the page said")]));
        assert!(html.contains("Academic Integrity"));
        assert!(!html.contains("whatever the page said"));
        assert!(html.contains("data-section=\"section_1\""));
    }

    #[test]
    fn unknown_section_numbers_keep_recorded_title() {
        let html = render_sections_list(&record_with(&[(12, "<Annex>")]));
        assert!(html.contains("12. &lt;Annex&gt;"));
    }

    #[test]
    fn sections_render_in_numeric_order() {
        let html = render_sections_list(&record_with(&[(9, ""), (2, ""), (10, "Extra")]));
        let two = html.find("section_2").unwrap();
        let nine = html.find("section_9").unwrap();
        let ten = html.find("section_10").unwrap();
        assert!(two < nine && nine < ten);
    }

    #[test]
    fn print_document_escapes_field_values() {
        let view = ReceiptView {
            fields: vec![("Student Name", "<script>alert(1)</script>".into())],
            sections_markup: "<ul></ul>".into(),
        };
        let doc = render_print_document(&view);
        assert!(doc.starts_with("<!DOCTYPE html>"));
        assert!(doc.contains("&lt;script&gt;"));
        assert!(!doc.contains("<script>"));
        assert!(doc.contains("<ul></ul>"));
    }
}
