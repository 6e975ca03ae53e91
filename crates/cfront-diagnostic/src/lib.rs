//! Diagnostic and error reporting for cfront.
//! cfront 的诊断和错误报告。
//!
//! This crate renders diagnostics with ariadne.
//! 本 crate 使用 ariadne 库渲染诊断信息。

mod codes;
mod diagnostic;

pub use codes::ErrorCode;
pub use diagnostic::{Diagnostic, DiagnosticKind, Label, Severity};

use ariadne::{
    ColorGenerator, Config, IndexType, Label as AriadneLabel, Report, ReportKind, Source,
};

/// Render a diagnostic to stderr.
/// 将诊断信息渲染到标准错误输出。
pub fn emit(source: &str, filename: &str, diagnostic: &Diagnostic) -> std::io::Result<()> {
    build_report(filename, diagnostic, true).eprint((filename, Source::from(source)))
}

/// Render a diagnostic to a string without colors.
/// 将诊断信息渲染为不带颜色的字符串。
pub fn render(source: &str, filename: &str, diagnostic: &Diagnostic) -> String {
    let mut buffer = Vec::new();
    let written = build_report(filename, diagnostic, false)
        .write((filename, Source::from(source)), &mut buffer);

    match written {
        Ok(()) => String::from_utf8_lossy(&buffer).into_owned(),
        // Fall back to the one-line form rather than losing the message.
        Err(_) => format!("error: {diagnostic}\n"),
    }
}

fn build_report<'a>(
    filename: &'a str,
    diagnostic: &Diagnostic,
    color: bool,
) -> Report<'a, (&'a str, std::ops::Range<usize>)> {
    let kind = match diagnostic.severity {
        Severity::Error => ReportKind::Error,
        Severity::Warning => ReportKind::Warning,
    };

    let mut colors = ColorGenerator::new();
    let mut report = Report::build(kind, filename, diagnostic.span.start.0 as usize)
        .with_config(
            Config::default()
                .with_color(color)
                .with_index_type(IndexType::Byte),
        )
        .with_message(&diagnostic.message);

    if let Some(code) = &diagnostic.code {
        report = report.with_code(code.as_str());
    }

    for label in &diagnostic.labels {
        let ariadne_label = AriadneLabel::new((filename, label.span.range()))
            .with_message(&label.message);
        let ariadne_label = if color {
            ariadne_label.with_color(colors.next())
        } else {
            ariadne_label
        };
        report = report.with_label(ariadne_label);
    }

    for note in &diagnostic.notes {
        report = report.with_note(note);
    }

    if let Some(help) = &diagnostic.help {
        report = report.with_help(help);
    }

    report.finish()
}
