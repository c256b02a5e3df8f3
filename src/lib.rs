//! ITA2 (Baudot-Murray) teleprinter code and punched paper tape.
//!
//! Text is encoded into five-level frames with LETTERS/FIGURES shifts
//! inserted where needed, decoded back by following those shifts, and drawn
//! as a strip of tape either as text or as a PNG image.

mod code;
mod codec;
mod codepage;
mod demo;
mod error;
mod graphics;
mod store;
mod tape;

pub use code::{CODE_BITS, CODE_COUNT, Code, codes_from_bytes, codes_to_bytes, parse_patterns};
pub use codec::{Decoder, Encoder, UnsupportedPolicy};
pub use codepage::{Codepage, FIGURES_SHIFT, LETTERS_SHIFT, ShiftMode, Symbol};
pub use demo::{DemoMessage, DemoOutcome, MESSAGES, run_demo};
pub use error::TapeError;
pub use graphics::{TapeImageOptions, TapeImageStyle, render_tape_image};
pub use store::{FRAMES_PER_LINE, TapeFile, TapeHeader, digest_codes, load_raw, save_raw};
pub use tape::{PunchTape, TapeStyle};

/// Encode text, rejecting characters neither table can represent.
pub fn encode(
    text: &str,
    codepage: Codepage,
    initial_mode: ShiftMode,
) -> Result<Vec<Code>, TapeError> {
    Encoder::new(codepage)
        .with_initial_mode(initial_mode)
        .encode(text)
}

pub fn decode(codes: &[Code], codepage: Codepage, initial_mode: ShiftMode) -> String {
    Decoder::new(codepage)
        .with_initial_mode(initial_mode)
        .decode(codes)
}

/// Draw frames as Unicode punched tape.
pub fn render(codes: &[Code]) -> String {
    PunchTape::new(codes).render(TapeStyle::Unicode)
}
