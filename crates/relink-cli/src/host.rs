//! Output emission towards the surrounding automation host.
//!
//! When running under GitHub Actions (`GITHUB_OUTPUT` set), results are
//! appended to the step-output file using the multiline `name<<delimiter`
//! format; otherwise they are printed to stdout, one path per line.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::Context;

const OUTPUT_NAME: &str = "updated-files";
const DELIMITER: &str = "RELINK_EOF";

/// Report the list of modified files to the host.
pub fn emit_updated_files(updated: &[PathBuf]) -> anyhow::Result<()> {
    let value = updated
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join("\n");

    match std::env::var_os("GITHUB_OUTPUT") {
        Some(path) => append_output(Path::new(&path), OUTPUT_NAME, &value),
        None => {
            if !value.is_empty() {
                println!("{value}");
            }
            Ok(())
        }
    }
}

/// Append one `name<<delimiter` block to the Actions output file.
fn append_output(path: &Path, name: &str, value: &str) -> anyhow::Result<()> {
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("failed to open output file {}", path.display()))?;

    writeln!(file, "{name}<<{DELIMITER}")?;
    if !value.is_empty() {
        writeln!(file, "{value}")?;
    }
    writeln!(file, "{DELIMITER}")?;
    Ok(())
}
