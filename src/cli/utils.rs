//! Convenience helpers shared across command handlers.

use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use punchtape::{Code, Codepage, ShiftMode, TapeFile, TapeHeader, load_raw, parse_patterns};

use crate::cli::common::ModeArg;

/// Where a command reads its frames from. Exactly one source is required.
#[derive(Args, Debug)]
#[group(required = true, multiple = false)]
pub struct CodeSourceArgs {
    /// Frames as patterns, e.g. "111x11 000x11".
    #[arg(long)]
    pub codes: Option<String>,
    /// Read patterns from a text file (`-` for stdin).
    #[arg(long = "from")]
    pub from: Option<PathBuf>,
    /// Read a tape file written by `tape encode --output`.
    #[arg(long)]
    pub tape: Option<PathBuf>,
    /// Read bare frames, one byte per code.
    #[arg(long)]
    pub raw: Option<PathBuf>,
}

/// Frames plus the header they came with, if read from a tape file.
pub struct LoadedCodes {
    pub codes: Vec<Code>,
    pub header: Option<TapeHeader>,
}

impl LoadedCodes {
    /// Explicit flags win over the tape header, which wins over the defaults.
    pub fn settings(
        &self,
        codepage: Option<Codepage>,
        mode: Option<ModeArg>,
    ) -> (Codepage, ShiftMode) {
        let header = self.header.as_ref();
        let codepage = codepage
            .or(header.map(|h| h.codepage))
            .unwrap_or_default();
        let mode = mode
            .map(ShiftMode::from)
            .or(header.map(|h| h.initial_mode))
            .unwrap_or_default();
        (codepage, mode)
    }
}

/// Resolve frames from whichever source flag was given.
pub fn load_codes(source: &CodeSourceArgs) -> Result<LoadedCodes> {
    if let Some(path) = &source.tape {
        let tape = load_tape(path)?;
        return Ok(LoadedCodes {
            codes: tape.codes,
            header: Some(tape.header),
        });
    }
    if let Some(path) = &source.raw {
        return Ok(LoadedCodes {
            codes: load_raw(path)?,
            header: None,
        });
    }
    let patterns = read_text_arg(source.codes.clone(), source.from.clone())?;
    let codes = parse_patterns(&patterns).context("failed to parse frame patterns")?;
    Ok(LoadedCodes {
        codes,
        header: None,
    })
}

/// Load a tape file with context on failure.
pub fn load_tape(path: &Path) -> Result<TapeFile> {
    TapeFile::load(path).with_context(|| format!("unable to load tape {}", path.display()))
}

/// Resolve plain-text input for commands that accept either inline strings or files.
pub fn read_text_arg(text: Option<String>, from: Option<PathBuf>) -> Result<String> {
    if let Some(t) = text {
        return Ok(t);
    }
    if let Some(path) = from {
        if path.as_os_str() == "-" {
            return read_stdin();
        }
        return fs::read_to_string(&path)
            .with_context(|| format!("failed to read {}", path.display()));
    }
    read_stdin()
}

/// Read the entire stdin stream into memory.
pub fn read_stdin() -> Result<String> {
    let mut buffer = String::new();
    io::stdin()
        .read_to_string(&mut buffer)
        .context("failed to read from stdin")?;
    Ok(buffer)
}

/// Persist a string either to a file or stdout when `-` is provided.
pub fn write_output(path: &Path, content: &str) -> Result<()> {
    if path.as_os_str() == "-" {
        io::stdout().write_all(content.as_bytes())?;
        return Ok(());
    }
    fs::write(path, content).with_context(|| format!("failed to write {}", path.display()))
}

/// Patterns in tape notation, `per_line` frames to a line.
pub fn format_patterns(codes: &[Code], per_line: usize) -> String {
    codes
        .chunks(per_line.max(1))
        .map(|chunk| {
            chunk
                .iter()
                .map(Code::to_string)
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect::<Vec<_>>()
        .join("\n")
}
