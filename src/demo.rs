//! Round-trip demonstration with two short teleprinter messages.

use crate::code::Code;
use crate::codec::{Decoder, Encoder};
use crate::codepage::{Codepage, ShiftMode};
use crate::error::TapeError;
use crate::tape::{PunchTape, TapeStyle};
use log::info;

/// A message punched by the demonstration.
#[derive(Debug, Clone, Copy)]
pub struct DemoMessage {
    pub title: &'static str,
    pub text: &'static str,
}

/// Messages framed by carriage-return/line-feed runs, as a teleprinter would space them.
pub const MESSAGES: [DemoMessage; 2] = [
    DemoMessage {
        title: "I THINK, THEREFORE I AM",
        text: "\n\r\n\r\n\r\n\rI THINK, THEREFORE I AM\r\n\r\n\r\n\r\n",
    },
    DemoMessage {
        title: "COGITO ERGO SUM",
        text: "\n\r\n\r\n\r\n\r\n\r\n\r\nCOGITO ERGO SUM\r\n\r\n\r\n\r\n\r\n\r\n\r",
    },
];

#[derive(Debug, Clone)]
pub struct DemoOutcome {
    pub message: DemoMessage,
    pub frames: Vec<Code>,
    pub decoded: String,
    /// Tape drawing without the priming frame.
    pub drawing: String,
}

impl DemoOutcome {
    pub fn round_trip_ok(&self) -> bool {
        self.decoded == self.message.text
    }
}

/// Punch each message primed in FIGURES and read it back starting in LETTERS.
/// The priming frame makes the reader agree with the punch anyway.
pub fn run_demo(style: TapeStyle) -> Result<Vec<DemoOutcome>, TapeError> {
    let encoder = Encoder::new(Codepage::Standard).with_initial_mode(ShiftMode::Figures);
    let decoder = Decoder::new(Codepage::Standard).with_initial_mode(ShiftMode::Letters);

    MESSAGES
        .iter()
        .map(|message| -> Result<DemoOutcome, TapeError> {
            let frames = encoder.encode(message.text)?;
            let decoded = decoder.decode(&frames);
            let drawing = PunchTape::new(&frames).skip_priming().render(style);
            info!("demo '{}': {} frames", message.title, frames.len());
            Ok(DemoOutcome {
                message: *message,
                frames,
                decoded,
                drawing,
            })
        })
        .collect()
}
