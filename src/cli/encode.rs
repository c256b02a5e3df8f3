//! Punching text (`tape encode`).

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use punchtape::{Codepage, Encoder, PunchTape, ShiftMode, TapeFile, UnsupportedPolicy, save_raw};

use crate::cli::common::{ModeArg, TapeStyleArg};
use crate::cli::utils::{format_patterns, read_text_arg};

/// Arguments for `tape encode`.
#[derive(Args, Debug)]
pub struct EncodeArgs {
    /// Input text (falls back to stdin if omitted).
    #[arg(long)]
    pub text: Option<String>,
    /// Read input from file (`-` for stdin).
    #[arg(long = "from")]
    pub from: Option<PathBuf>,
    /// Codepage: `standard` (ITA2) or `us-tty`.
    #[arg(long, default_value = "standard")]
    pub codepage: Codepage,
    /// Shift mode the priming frame selects.
    #[arg(long, default_value_t = ModeArg::Letters, value_enum)]
    pub mode: ModeArg,
    /// Drop characters the codepage cannot represent instead of failing.
    #[arg(long)]
    pub lenient: bool,
    /// Draw the punched tape instead of listing patterns.
    #[arg(long)]
    pub render: bool,
    #[arg(long, default_value_t = TapeStyleArg::Unicode, value_enum)]
    pub style: TapeStyleArg,
    /// Save a tape file.
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,
    /// Save bare frames, one byte per code.
    #[arg(long)]
    pub raw: Option<PathBuf>,
    /// Label recorded in the tape file header.
    #[arg(long)]
    pub label: Option<String>,
}

/// Execute `tape encode`.
pub fn handle(args: EncodeArgs) -> Result<()> {
    let text = read_text_arg(args.text.clone(), args.from.clone())?;
    let codepage = args.codepage;
    let mode = ShiftMode::from(args.mode);
    let policy = if args.lenient {
        UnsupportedPolicy::Skip
    } else {
        UnsupportedPolicy::Reject
    };

    let codes = Encoder::new(codepage)
        .with_initial_mode(mode)
        .with_policy(policy)
        .encode(&text)
        .with_context(|| format!("cannot punch input with the {codepage} codepage"))?;

    if let Some(path) = &args.raw {
        save_raw(path, &codes)?;
        println!("Punched {} frames to {}", codes.len(), path.display());
    }

    if args.render {
        print!("{}", PunchTape::new(&codes).render(args.style.into()));
    } else if args.output.is_none() && args.raw.is_none() {
        println!("{}", format_patterns(&codes, 16));
    }

    if let Some(path) = args.output {
        let mut tape = TapeFile::new(codes, codepage, mode).with_label(args.label);
        tape.save(&path)?;
        println!(
            "Punched {} frames to {} (sha256 {})",
            tape.header.frames,
            path.display(),
            tape.header.digest
        );
    }
    Ok(())
}
