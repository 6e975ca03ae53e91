//! The `cfront tokens` command.
//! `cfront tokens` 命令。

use super::read_source;
use cfront_parser::analyze;

/// Print the token report, or one highlight line per token.
/// 打印词法报告，或每个词法单元一行高亮信息。
pub fn run(file: &str, categories: bool) -> Result<(), String> {
    let source = read_source(file)?;
    let analysis = analyze(&source);

    if !categories {
        print!("{}", analysis.token_report());
        return Ok(());
    }

    for highlight in analysis.highlights() {
        println!(
            "{}:{}\t{:?}\t{}\t{:?}",
            highlight.line, highlight.column, highlight.category, highlight.kind, highlight.text
        );
    }
    Ok(())
}
