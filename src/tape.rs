use crate::code::{CODE_BITS, Code};
use std::fmt::{self, Write};

/// One horizontal row of the tape drawing.
#[derive(Debug, Clone, Copy)]
pub(crate) enum Track {
    /// Data track, by bit significance.
    Data(usize),
    Sprocket,
}

/// Rows top to bottom: the tape notation read from its last digit back,
/// so the least significant bit runs along the top edge.
pub(crate) const TRACKS: [Track; CODE_BITS + 1] = [
    Track::Data(0),
    Track::Data(1),
    Track::Sprocket,
    Track::Data(2),
    Track::Data(3),
    Track::Data(4),
];

/// Glyph sets for the text drawing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TapeStyle {
    /// `⬤` holes, `●` feed holes, heavy rule borders
    #[default]
    Unicode,
    /// `O` holes, `.` feed holes, `=` borders
    Ascii,
    /// `1`/`0` data bits, `x` feed holes, `-` borders
    Ascii01,
}

struct Glyphs {
    hole: char,
    blank: char,
    sprocket: char,
    border: char,
}

impl TapeStyle {
    fn glyphs(self) -> Glyphs {
        match self {
            TapeStyle::Unicode => Glyphs {
                hole: '⬤',
                blank: ' ',
                sprocket: '●',
                border: '━',
            },
            TapeStyle::Ascii => Glyphs {
                hole: 'O',
                blank: ' ',
                sprocket: '.',
                border: '=',
            },
            TapeStyle::Ascii01 => Glyphs {
                hole: '1',
                blank: '0',
                sprocket: 'x',
                border: '-',
            },
        }
    }
}

impl fmt::Display for TapeStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TapeStyle::Unicode => write!(f, "unicode"),
            TapeStyle::Ascii => write!(f, "ascii"),
            TapeStyle::Ascii01 => write!(f, "ascii-01"),
        }
    }
}

/// A stretch of punched tape, drawn one column per frame.
#[derive(Debug, Clone, Copy)]
pub struct PunchTape<'a> {
    frames: &'a [Code],
}

impl<'a> PunchTape<'a> {
    pub fn new(frames: &'a [Code]) -> Self {
        Self { frames }
    }

    /// Leave out the leading priming shift frame, if there is one.
    pub fn skip_priming(self) -> Self {
        Self {
            frames: self.frames.get(1..).unwrap_or_default(),
        }
    }

    pub fn frames(&self) -> &'a [Code] {
        self.frames
    }

    /// Every line, borders included, is `2 * frames + 2` glyphs wide.
    pub fn render(&self, style: TapeStyle) -> String {
        let glyphs = style.glyphs();
        let width = self.frames.len() * 2 + 2;
        let border: String = std::iter::repeat_n(glyphs.border, width).collect();

        let mut out = String::with_capacity((width + 1) * (TRACKS.len() + 2) * 3);
        writeln!(&mut out, "{border}").ok();
        for track in TRACKS {
            out.push(' ');
            for frame in self.frames {
                let glyph = match track {
                    Track::Sprocket => glyphs.sprocket,
                    Track::Data(bit) if frame.bit(bit) => glyphs.hole,
                    Track::Data(_) => glyphs.blank,
                };
                out.push(glyph);
                out.push(' ');
            }
            writeln!(&mut out, " ").ok();
        }
        writeln!(&mut out, "{border}").ok();
        out
    }
}
