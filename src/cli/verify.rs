//! Integrity check (`tape verify`).

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use crate::cli::utils::load_tape;

/// Arguments for `tape verify`.
#[derive(Args, Debug)]
pub struct VerifyArgs {
    /// Tape file to check.
    pub tape: PathBuf,
}

/// Execute `tape verify`.
pub fn handle(args: VerifyArgs) -> Result<()> {
    let tape = load_tape(&args.tape)?;
    tape.verify()
        .with_context(|| format!("verification failed for {}", args.tape.display()))?;
    let header = &tape.header;
    println!(
        "{}: {} frames, {} codepage, primed {}, sha256 {}",
        args.tape.display(),
        header.frames,
        header.codepage,
        header.initial_mode,
        header.digest
    );
    if let Some(label) = &header.label {
        println!("Label: {}", label);
    }
    println!("Punched at {}", header.created_at);
    Ok(())
}
