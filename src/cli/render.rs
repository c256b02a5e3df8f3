//! Drawing tape (`tape render`).

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use punchtape::{PunchTape, TapeImageOptions, render_tape_image};

use crate::cli::common::{TapeImageStyleArg, TapeStyleArg};
use crate::cli::utils::{CodeSourceArgs, load_codes};

/// Arguments for `tape render`.
#[derive(Args, Debug)]
pub struct RenderArgs {
    #[command(flatten)]
    pub source: CodeSourceArgs,
    /// Glyph set for the text drawing.
    #[arg(long, default_value_t = TapeStyleArg::Unicode, value_enum)]
    pub style: TapeStyleArg,
    /// Leave out the leading priming shift frame.
    #[arg(long)]
    pub skip_priming: bool,
    /// Write a PNG image instead of drawing text.
    #[arg(long)]
    pub image: Option<PathBuf>,
    /// Tape stock colours for PNG output.
    #[arg(long, default_value_t = TapeImageStyleArg::Paper, value_enum)]
    pub palette: TapeImageStyleArg,
    /// Dots per inch used when rasterising.
    #[arg(long, default_value_t = 300)]
    pub dpi: u32,
}

/// Execute `tape render`.
pub fn handle(args: RenderArgs) -> Result<()> {
    let loaded = load_codes(&args.source)?;
    let mut tape = PunchTape::new(&loaded.codes);
    if args.skip_priming {
        tape = tape.skip_priming();
    }

    let Some(output_path) = args.image else {
        print!("{}", tape.render(args.style.into()));
        return Ok(());
    };

    let dpi = args.dpi.clamp(72, 1200);
    let options = TapeImageOptions {
        style: args.palette.into(),
        dpi,
    };
    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).with_context(|| {
                format!("failed to create output directory {}", parent.display())
            })?;
        }
    }
    let image = render_tape_image(tape.frames(), &options)?;
    image
        .save(&output_path)
        .with_context(|| format!("failed to write {}", output_path.display()))?;
    println!(
        "Rendered {} frames to {} at {} DPI",
        tape.frames().len(),
        output_path.display(),
        dpi
    );
    Ok(())
}
