//! Reading tape back into text (`tape decode`).

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use punchtape::{Codepage, Decoder};

use crate::cli::common::ModeArg;
use crate::cli::utils::{CodeSourceArgs, load_codes, write_output};

/// Arguments for `tape decode`.
#[derive(Args, Debug)]
pub struct DecodeArgs {
    #[command(flatten)]
    pub source: CodeSourceArgs,
    /// Codepage (defaults to the tape header, then `standard`).
    #[arg(long)]
    pub codepage: Option<Codepage>,
    /// Initial shift mode (defaults to the tape header, then `letters`).
    #[arg(long, value_enum)]
    pub mode: Option<ModeArg>,
    /// Output file (`-` for stdout).
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,
}

/// Execute `tape decode`.
pub fn handle(args: DecodeArgs) -> Result<()> {
    let loaded = load_codes(&args.source)?;
    let (codepage, mode) = loaded.settings(args.codepage, args.mode);
    let text = Decoder::new(codepage)
        .with_initial_mode(mode)
        .decode(&loaded.codes);
    match args.output {
        Some(path) => write_output(&path, &text)?,
        None => println!("{}", text),
    }
    Ok(())
}
