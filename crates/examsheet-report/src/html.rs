//! HTML exam sheet and results pages.
//!
//! Produces self-contained HTML files with all CSS/JS inlined.

use anyhow::Result;
use std::fmt::Display;
use std::path::Path;

use examsheet_core::config::Messages;
use examsheet_core::model::ExamDefinition;
use examsheet_core::report::GradeReport;
use examsheet_core::results::Feedback;

/// Escape a string for safe HTML insertion.
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

fn open_page(html: &mut String, title: &str) {
    html.push_str("<!DOCTYPE html>\n<html lang=\"es\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    html.push_str(&format!("<title>{}</title>\n", html_escape(title)));
    html.push_str("<style>\n");
    html.push_str(CSS);
    html.push_str("</style>\n");
    html.push_str("</head>\n<body>\n");
    html.push_str("<div id=\"questionsContainer\">\n");
}

fn close_page(html: &mut String) {
    html.push_str("</div>\n");
    html.push_str("<script>\n");
    html.push_str(JS);
    html.push_str("</script>\n");
    html.push_str("</body>\n</html>");
}

/// Questions grouped under section headings.
///
/// A heading is written before the question its section starts at. When
/// graded, headings carry `X/Y` and each question carries its feedback mark.
fn push_questions(html: &mut String, exam: &ExamDefinition, graded: Option<&GradeReport>) {
    let disabled = if graded.is_some() { " disabled" } else { "" };
    let mut section_index = 0;

    html.push_str("<div class=\"questions\">\n");
    for number in 1..=exam.question_count() {
        let section = exam.sections.get(section_index);
        if let Some(section) = section.filter(|s| s.start == number) {
            let score = graded
                .and_then(|g| g.result.sections_breakdown.get(section_index))
                .map(|s| format!(" {s}"))
                .unwrap_or_default();
            html.push_str(&format!(
                "<h3>{}{}</h3>\n",
                html_escape(&section.title),
                score
            ));
        }

        let selected = graded.and_then(|g| g.answers.get(number - 1));
        html.push_str(&format!("<ol start=\"{number}\">\n<li>\n<div>\n"));
        for letter in exam.option_letters() {
            let checked = if selected == Some(*letter) { " checked" } else { "" };
            html.push_str(&format!(
                "<label for=\"question{number}Option{letter}\">{letter}</label>\n\
                 <input type=\"radio\" id=\"question{number}Option{letter}\" name=\"question{number}\" value=\"{letter}\"{checked}{disabled} />\n"
            ));
        }
        if let Some(feedback) = graded.and_then(|g| g.feedback(number - 1)) {
            let class = match feedback {
                Feedback::Correct => "correct",
                Feedback::Incorrect { .. } => "incorrect",
            };
            html.push_str(&format!(
                "<span class=\"feedback {class}\">{}</span>\n",
                html_escape(&feedback.to_string())
            ));
        }
        html.push_str("</div>\n</li>\n</ol>\n");

        if section.is_some_and(|s| s.end == number) {
            section_index += 1;
        }
    }
    html.push_str("</div>\n");
}

/// Render a blank answer sheet for an exam.
pub fn render_exam_sheet(exam: &ExamDefinition, messages: &Messages) -> String {
    let mut html = String::new();
    open_page(&mut html, &exam.title);

    html.push_str(&format!("<h2>{}</h2>\n", html_escape(&exam.title)));
    html.push_str(&format!(
        "<div><input type=\"text\" id=\"studentName\" name=\"studentName\" placeholder=\"{}\" /></div>\n",
        html_escape(&messages.name_placeholder)
    ));

    push_questions(&mut html, exam, None);

    html.push_str(&format!(
        "<div><button type=\"button\" id=\"actionButton\">{}</button></div>\n",
        html_escape(&messages.grade_label)
    ));

    close_page(&mut html);
    html
}

/// Render a graded answer sheet: the disabled form with feedback marks, the
/// total score and the per-section summary.
pub fn render_results(report: &GradeReport, exam: &ExamDefinition, messages: &Messages) -> String {
    let mut html = String::new();
    open_page(&mut html, &exam.title);

    html.push_str(&format!("<h2>{}</h2>\n", html_escape(&exam.title)));
    html.push_str(&format!(
        "<div><input type=\"text\" id=\"studentName\" name=\"studentName\" value=\"{}\" disabled /></div>\n",
        html_escape(&report.student_name)
    ));
    html.push_str(&format!(
        "<div class=\"total-correct\"><strong>{}</strong></div>\n",
        html_escape(&report.total_line(messages))
    ));

    html.push_str(&format!(
        "<div class=\"sections-summary\"><strong>{}</strong><br>\n",
        html_escape(&messages.score_by_subject)
    ));
    if !report.result.sections_breakdown.is_empty() {
        html.push_str("<ul>\n");
        for section in &report.result.sections_breakdown {
            html.push_str(&format!(
                "<li>{}: {}</li>\n",
                html_escape(&section.title),
                section
            ));
        }
        html.push_str("</ul>\n");
    }
    html.push_str("</div>\n");

    push_questions(&mut html, exam, Some(report));

    html.push_str(&format!(
        "<div><button type=\"button\" id=\"actionButton\" onclick=\"window.location.reload()\">{}</button></div>\n",
        html_escape(&messages.return_label)
    ));

    html.push_str(&format!(
        "<p class=\"meta\">{} | {}</p>\n",
        report.graded_at.format("%Y-%m-%d %H:%M:%S UTC"),
        report.session_id
    ));

    // Raw JSON
    html.push_str("<details>\n<summary>JSON</summary>\n");
    html.push_str("<pre><code>");
    html.push_str(&html_escape(
        &serde_json::to_string_pretty(report).unwrap_or_default(),
    ));
    html.push_str("</code></pre>\n");
    html.push_str("</details>\n");

    close_page(&mut html);
    html
}

/// Render the page shown when exam data could not be loaded.
pub fn render_load_error(error: &dyn Display, messages: &Messages) -> String {
    let mut html = String::new();
    open_page(&mut html, &messages.load_error_title);

    html.push_str("<div class=\"load-error\">\n");
    html.push_str(&format!(
        "<h3>{}</h3>\n",
        html_escape(&messages.load_error_title)
    ));
    html.push_str(&format!("<p>{}</p>\n", html_escape(&messages.load_error_body)));
    html.push_str(&format!(
        "<p><strong>{}</strong> {}</p>\n",
        html_escape(&messages.load_error_details),
        html_escape(&error.to_string())
    ));
    html.push_str(&format!(
        "<button type=\"button\" onclick=\"window.location.reload()\">{}</button>\n",
        html_escape(&messages.retry)
    ));
    html.push_str("</div>\n");

    close_page(&mut html);
    html
}

/// Write a rendered page to a file, creating parent directories.
pub fn write_html(html: &str, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, html)?;
    Ok(())
}

const CSS: &str = r#"
:root { --bg: #ffffff; --fg: #1a1a2e; --border: #e5e7eb; --ok: #15803d; --bad: #b91c1c; }
@media (prefers-color-scheme: dark) {
  :root { --bg: #1a1a2e; --fg: #e5e7eb; --border: #374151; --ok: #4ade80; --bad: #f87171; }
}
body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', sans-serif; margin: 0; padding: 2rem; background: var(--bg); color: var(--fg); }
h2, h3 { margin-top: 1.5rem; }
ol { margin: 0.25rem 0; }
label { margin-left: 0.75rem; }
.feedback { margin-left: 1em; }
.correct { color: var(--ok); }
.incorrect { color: var(--bad); }
.total-correct, .sections-summary { margin-top: 1em; }
.sections-summary ul { margin: 0.5em 0; padding-left: 1.5em; }
.load-error { border: 1px solid var(--bad); border-radius: 8px; padding: 1rem; }
.meta { color: #6b7280; font-size: 0.85rem; }
pre { overflow-x: auto; padding: 1rem; background: var(--border); border-radius: 8px; }
button { margin-top: 1rem; padding: 0.5rem 1.5rem; }
"#;

const JS: &str = r#"
document.querySelectorAll('label[for]').forEach(label => {
  label.addEventListener('click', () => {
    const input = document.getElementById(label.htmlFor);
    if (input && !input.disabled) input.checked = true;
  });
});
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use examsheet_core::model::{Section, SubmittedAnswers};
    use examsheet_core::session::GradingSession;

    fn make_exam() -> ExamDefinition {
        ExamDefinition {
            title: "Examen <Final>".into(),
            number_of_options: 4,
            correct_answers: vec!["A".into(), "B".into(), "C".into(), "D".into()],
            sections: vec![Section::new("Math", 1, 2), Section::new("Science", 3, 4)],
        }
    }

    fn make_report(exam: &ExamDefinition) -> GradeReport {
        let mut session = GradingSession::new(exam.clone()).unwrap();
        session
            .submit("Ana", SubmittedAnswers::from_letters(["A", "B", "C", "A"]))
            .unwrap()
    }

    #[test]
    fn exam_sheet_contains_questions_and_sections() {
        let html = render_exam_sheet(&make_exam(), &Messages::default());

        assert!(html.contains("<html"));
        assert!(html.contains("</html>"));
        assert!(html.contains("<h2>Examen &lt;Final&gt;</h2>"));
        assert!(html.contains("<h3>Math</h3>"));
        assert!(html.contains("<h3>Science</h3>"));
        assert!(html.contains("<ol start=\"4\">"));
        assert!(html.contains("name=\"question4\" value=\"D\""));
        assert!(!html.contains("value=\"E\""));
        assert!(html.contains("placeholder=\"Ingresa tu nombre\""));
        assert!(html.contains(">Calificar</button>"));
        assert!(!html.contains(" disabled />"));
    }

    #[test]
    fn heading_only_at_section_start() {
        let mut exam = make_exam();
        exam.sections = vec![Section::new("Tail", 3, 4)];
        let html = render_exam_sheet(&exam, &Messages::default());

        assert_eq!(html.matches("<h3>").count(), 1);
        let heading = html.find("<h3>Tail</h3>").unwrap();
        assert!(heading > html.find("<ol start=\"2\">").unwrap());
        assert!(heading < html.find("<ol start=\"3\">").unwrap());
    }

    #[test]
    fn results_page_shows_feedback_and_scores() {
        let exam = make_exam();
        let report = make_report(&exam);
        let html = render_results(&report, &exam, &Messages::default());

        assert!(html.contains("<strong>Puntaje total: 3 de 4</strong>"));
        assert!(html.contains("<li>Math: 2/2</li>"));
        assert!(html.contains("<li>Science: 1/2</li>"));
        assert!(html.contains("<h3>Math 2/2</h3>"));
        assert!(html.contains("<h3>Science 1/2</h3>"));
        assert!(html.contains("✘(D)"));
        assert_eq!(html.matches("✔").count(), 3);
        assert!(html.contains("value=\"A\" checked disabled"));
        assert!(html.contains(">Regresar</button>"));
        assert!(html.contains(&report.session_id.to_string()));
    }

    #[test]
    fn results_without_sections() {
        let mut exam = make_exam();
        exam.sections.clear();
        let report = make_report(&exam);
        let html = render_results(&report, &exam, &Messages::default());

        assert!(html.contains("Puntaje por materia:"));
        assert!(!html.contains("<ul>"));
        assert!(!html.contains("<h3>"));
    }

    #[test]
    fn load_error_page() {
        let html = render_load_error(
            &"failed to load exam data: HTTP 404 Not Found",
            &Messages::default(),
        );
        assert!(html.contains("Error al cargar el examen"));
        assert!(html.contains("HTTP 404 Not Found"));
        assert!(html.contains(">Reintentar</button>"));
    }

    #[test]
    fn write_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out").join("exam.html");
        let html = render_exam_sheet(&make_exam(), &Messages::default());

        write_html(&html, &path).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("<html"));
    }

    #[test]
    fn escapes_html() {
        assert_eq!(html_escape("<b>\"x\" & 'y'</b>"), "&lt;b&gt;&quot;x&quot; &amp; &#x27;y&#x27;&lt;/b&gt;");
    }
}
