//! Resolving and validating the source and destination paths.

use anyhow::{bail, Context, Result};
use std::fs;
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

/// Fill in missing paths, asking on `output` and reading answers from `input`
/// when `interactive` is set.
///
/// An empty source answer (or a missing source when not interactive) means
/// `cwd`. Relative paths are resolved against `cwd`.
pub fn resolve_paths(
    source: Option<&Path>,
    destination: Option<&Path>,
    interactive: bool,
    cwd: &Path,
    input: &mut impl BufRead,
    output: &mut impl Write,
) -> Result<(PathBuf, PathBuf)> {
    let source = match source {
        Some(path) => path.to_path_buf(),
        None if interactive => {
            let answer = ask(
                &format!("Source directory [{}]: ", cwd.display()),
                input,
                output,
            )?;
            if answer.is_empty() {
                cwd.to_path_buf()
            } else {
                PathBuf::from(answer)
            }
        }
        None => cwd.to_path_buf(),
    };

    let destination = match destination {
        Some(path) => path.to_path_buf(),
        None if interactive => {
            let answer = ask("Destination directory: ", input, output)?;
            if answer.is_empty() {
                bail!("no destination directory given");
            }
            PathBuf::from(answer)
        }
        None => bail!("no destination directory given (pass DESTINATION or run in a terminal)"),
    };

    Ok((cwd.join(source), cwd.join(destination)))
}

fn ask(question: &str, input: &mut impl BufRead, output: &mut impl Write) -> Result<String> {
    write!(output, "{}", question).context("failed to write prompt")?;
    output.flush().context("failed to write prompt")?;

    let mut line = String::new();
    input.read_line(&mut line).context("failed to read answer")?;
    Ok(line.trim().to_string())
}

/// Source must be an existing directory; destination must not be a non-directory.
pub fn validate_paths(source: &Path, destination: &Path) -> Result<()> {
    let metadata = fs::metadata(source)
        .with_context(|| format!("source directory does not exist: {}", source.display()))?;
    if !metadata.is_dir() {
        bail!("source is not a directory: {}", source.display());
    }

    if let Ok(metadata) = fs::metadata(destination) {
        if !metadata.is_dir() {
            bail!(
                "destination exists and is not a directory: {}",
                destination.display()
            );
        }
    }
    Ok(())
}
