//! dualscore-report — Self-contained HTML rendering of evaluation reports.

pub mod html;

pub use html::{generate_html, write_html_report};
