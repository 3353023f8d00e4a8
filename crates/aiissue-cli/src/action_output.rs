use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};

/// Appends `name=value` lines to the workflow output file, or prints legacy
/// `::set-output` commands when no file is configured.
pub(crate) fn write_action_outputs<W: Write>(
    output_file: Option<&Path>,
    outputs: &[(&str, String)],
    stdout: &mut W,
) -> Result<()> {
    match output_file {
        Some(path) => {
            let mut file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("failed to open output file {}", path.display()))?;
            for (name, value) in outputs {
                writeln!(file, "{name}={value}")
                    .with_context(|| format!("failed to write output {name}"))?;
            }
        }
        None => {
            for (name, value) in outputs {
                writeln!(stdout, "::set-output name={name}::{value}")
                    .with_context(|| format!("failed to print output {name}"))?;
            }
        }
    }
    Ok(())
}
