//! The `examsheet grade` command.

use std::path::PathBuf;

use anyhow::{Context, Result};
use comfy_table::{Cell, Table};

use examsheet_core::config::{load_config_from, Messages};
use examsheet_core::model::SubmittedAnswers;
use examsheet_core::report::GradeReport;
use examsheet_core::session::GradingSession;
use examsheet_loader::load_exam;
use examsheet_report::{render_load_error, render_results, write_html};

pub async fn execute(
    exam_location: String,
    name: String,
    answers: String,
    format: String,
    html: Option<PathBuf>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let messages = &config.messages;

    let exam = match load_exam(&exam_location, &config).await {
        Ok(exam) => exam,
        Err(e) => {
            if let Some(path) = &html {
                write_html(&render_load_error(&e, messages), path)?;
                eprintln!("Error page: {}", path.display());
            }
            return Err(e).with_context(|| format!("failed to load {exam_location}"));
        }
    };

    let mut session = GradingSession::new(exam)
        .with_context(|| format!("invalid section layout in {exam_location}"))?;

    let report = match session.submit(&name, SubmittedAnswers::parse_list(&answers)) {
        Ok(report) => report,
        Err(e) => {
            if let Some(notice) = e.user_message(messages) {
                eprintln!("{notice}");
            }
            return Err(e.into());
        }
    };

    match format.as_str() {
        "json" => println!("{}", serde_json::to_string_pretty(&report)?),
        "markdown" => println!("{}", report.to_markdown(messages)),
        "text" => print_report(&report, &session, messages),
        other => anyhow::bail!("unknown format: {other} (expected text, json or markdown)"),
    }

    if let Some(path) = &html {
        write_html(&render_results(&report, session.exam(), messages), path)?;
        eprintln!("HTML results: {}", path.display());
    }

    Ok(())
}

fn print_report(report: &GradeReport, session: &GradingSession, messages: &Messages) {
    let exam = session.exam();
    let engine = session.engine();

    println!("{} | {}", report.exam_title, report.student_name);

    let mut table = Table::new();
    table.set_header(vec!["#", "Answer", "Result"]);
    for (i, given) in report.answers.iter().enumerate() {
        table.add_row(vec![
            Cell::new(i + 1),
            Cell::new(given.unwrap_or("-")),
            Cell::new(report.feedback(i).map(|f| f.to_string()).unwrap_or_default()),
        ]);
    }
    println!("{table}");

    println!("{}", report.total_line(messages));

    if !exam.sections.is_empty() {
        let mut sections = Table::new();
        sections.set_header(vec![messages.score_by_subject.as_str(), "Score"]);
        for (i, score) in report.result.sections_breakdown.iter().enumerate() {
            sections.add_row(vec![
                Cell::new(&score.title),
                Cell::new(format!(
                    "{}/{}",
                    score.correct_count,
                    engine.section_total_questions(i)
                )),
            ]);
        }
        println!("{sections}");
    }
}
