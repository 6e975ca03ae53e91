//! The `cfront check` command.
//! `cfront check` 命令。

use super::{display_name, read_source};
use crate::output;
use cfront_diagnostic::emit;
use cfront_parser::{ParseLimits, analyze_with};
use tracing::warn;

/// Check a file for syntax errors.
/// 检查文件中的语法错误。
pub fn run(file: &str, limits: ParseLimits, plain: bool) -> Result<(), String> {
    let source = read_source(file)?;
    let name = display_name(file);
    let analysis = analyze_with(&source, limits);

    if analysis.is_blank() {
        output::warning("no code to analyze");
        return Ok(());
    }

    for diag in &analysis.errors {
        if plain {
            println!("{diag}");
        } else if let Err(e) = emit(&source, name, diag) {
            // Fall back to the one-line form when the report cannot be written.
            warn!("failed to render diagnostic: {e}");
            eprintln!("{diag}");
        }
    }

    if !analysis.ok {
        return Err("analysis failed".to_string());
    }

    if !analysis.errors.is_empty() {
        return Err(format!("{} syntax error(s) found", analysis.errors.len()));
    }

    output::success("OK - No errors found");
    Ok(())
}
