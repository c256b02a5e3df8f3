//! Command-line interface wiring for the `tape` binary.
//!
//! This module owns the clap definitions and delegates execution to
//! one submodule per command.

use anyhow::Result;
use clap::{Parser, Subcommand};

pub mod common;
pub mod decode;
pub mod demo;
pub mod encode;
pub mod render;
pub mod utils;
pub mod verify;

/// Parsed CLI entrypoint for the `tape` binary.
#[derive(Parser, Debug)]
#[command(name = "tape", version, about = "ITA2 teleprinter code and paper tape toolkit")]
pub struct Cli {
    /// Command to execute.
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Encode text into ITA2 frames.
    Encode(encode::EncodeArgs),
    /// Decode ITA2 frames into text.
    Decode(decode::DecodeArgs),
    /// Draw frames as punched tape.
    Render(render::RenderArgs),
    /// Check a tape file against its recorded digest.
    Verify(verify::VerifyArgs),
    /// Punch and read back the built-in messages.
    Demo(demo::DemoArgs),
}

/// Execute the requested command.
pub fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Encode(args) => encode::handle(args),
        Command::Decode(args) => decode::handle(args),
        Command::Render(args) => render::handle(args),
        Command::Verify(args) => verify::handle(args),
        Command::Demo(args) => demo::handle(args),
    }
}
