//! The `cfront parse` command.

use super::read_source;
use cfront_parser::{ParseLimits, analyze_with};

pub fn run(file: &str, limits: ParseLimits) -> Result<(), String> {
    let source = read_source(file)?;
    let analysis = analyze_with(&source, limits);

    print!("{}", analysis.parse_report());

    if !analysis.ok {
        return Err("analysis failed".to_string());
    }
    Ok(())
}
