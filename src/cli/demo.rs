//! Round-trip demonstration (`tape demo`).

use anyhow::{Result, anyhow};
use clap::Args;
use punchtape::run_demo;

use crate::cli::common::TapeStyleArg;

/// Arguments for `tape demo`.
#[derive(Args, Debug)]
pub struct DemoArgs {
    #[arg(long, default_value_t = TapeStyleArg::Unicode, value_enum)]
    pub style: TapeStyleArg,
}

/// Execute `tape demo`.
pub fn handle(args: DemoArgs) -> Result<()> {
    let outcomes = run_demo(args.style.into())?;
    let mut failed = 0;
    for outcome in &outcomes {
        println!();
        println!(" {}", outcome.message.title);
        print!("{}", outcome.drawing);
        if !outcome.round_trip_ok() {
            failed += 1;
            println!(" round trip FAILED: got {:?}", outcome.decoded);
        }
    }
    if failed > 0 {
        return Err(anyhow!("{} of {} messages did not round-trip", failed, outcomes.len()));
    }
    Ok(())
}
