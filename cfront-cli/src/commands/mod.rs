//! CLI command implementations.

pub mod check;
pub mod parse;
pub mod tokens;

use std::io::Read;
use std::{fs, io};

/// Name shown in diagnostics for source read from stdin.
pub const STDIN_NAME: &str = "<stdin>";

/// Read a source file, or stdin when `file` is `-`.
pub fn read_source(file: &str) -> Result<String, String> {
    if file == "-" {
        let mut source = String::new();
        io::stdin()
            .read_to_string(&mut source)
            .map_err(|e| format!("cannot read stdin: {e}"))?;
        return Ok(source);
    }

    fs::read_to_string(file).map_err(|e| format!("cannot read file '{file}': {e}"))
}

/// The name to show for `file` in reports.
pub fn display_name(file: &str) -> &str {
    if file == "-" { STDIN_NAME } else { file }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_read_source_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "int main() {{ return 0; }}").unwrap();

        let path = file.path().to_str().unwrap();
        let source = read_source(path).unwrap();
        assert_eq!(source, "int main() { return 0; }");
    }

    #[test]
    fn test_read_source_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.c");

        let err = read_source(path.to_str().unwrap()).unwrap_err();
        assert!(err.starts_with("cannot read file"));
    }

    #[test]
    fn test_display_name() {
        assert_eq!(display_name("-"), STDIN_NAME);
        assert_eq!(display_name("main.c"), "main.c");
    }
}
