//! examsheet-report — HTML rendering of exam sheets and graded results.

pub mod html;

pub use html::{render_exam_sheet, render_load_error, render_results, write_html};
