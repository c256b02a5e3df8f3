//! Shared clap helper types for CLI commands.

use clap::ValueEnum;
use punchtape::{ShiftMode, TapeImageStyle, TapeStyle};

/// Shift mode the punch or reader starts in.
#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum ModeArg {
    Letters,
    Figures,
}

impl From<ModeArg> for ShiftMode {
    fn from(value: ModeArg) -> ShiftMode {
        match value {
            ModeArg::Letters => ShiftMode::Letters,
            ModeArg::Figures => ShiftMode::Figures,
        }
    }
}

/// Glyph sets for text tape drawings.
#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum TapeStyleArg {
    Unicode,
    Ascii,
    #[value(name = "ascii-01")]
    Ascii01,
}

impl From<TapeStyleArg> for TapeStyle {
    fn from(value: TapeStyleArg) -> Self {
        match value {
            TapeStyleArg::Unicode => TapeStyle::Unicode,
            TapeStyleArg::Ascii => TapeStyle::Ascii,
            TapeStyleArg::Ascii01 => TapeStyle::Ascii01,
        }
    }
}

/// Tape stock used for PNG rendering.
#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum TapeImageStyleArg {
    Paper,
    Oiled,
}

impl From<TapeImageStyleArg> for TapeImageStyle {
    fn from(value: TapeImageStyleArg) -> TapeImageStyle {
        match value {
            TapeImageStyleArg::Paper => TapeImageStyle::Paper,
            TapeImageStyleArg::Oiled => TapeImageStyle::Oiled,
        }
    }
}
