//! Five-level frames as they appear on paper tape.
//!
//! A [`Code`] keeps its five data bits in declaration order: the first digit
//! of a pattern is the most significant bit, so `"00011"` has value 3 and
//! sits at index 3 of every code table. On tape the sprocket feed hole runs
//! between the third and fourth data track, which the textual notation marks
//! with an `x` (`"000x11"`).

use crate::error::TapeError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Number of data tracks on five-level tape.
pub const CODE_BITS: usize = 5;

/// Number of distinct frames (`2^5`).
pub const CODE_COUNT: usize = 1 << CODE_BITS;

/// Column of the sprocket marker in tape notation.
const SPROCKET_COLUMN: usize = 3;

/// One frame of five data bits, most significant first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Code([bool; CODE_BITS]);

impl Code {
    pub const fn new(bits: [bool; CODE_BITS]) -> Self {
        Self(bits)
    }

    /// Build the frame for a table index. Bits above the fifth are ignored.
    pub(crate) const fn from_index(index: u8) -> Self {
        let mut bits = [false; CODE_BITS];
        let mut i = 0;
        while i < CODE_BITS {
            bits[i] = (index >> (CODE_BITS - 1 - i)) & 1 == 1;
            i += 1;
        }
        Self(bits)
    }

    /// Numeric value, `0..=31`, equal to the frame's position in a code table.
    pub fn value(self) -> u8 {
        self.0
            .iter()
            .fold(0u8, |acc, &bit| (acc << 1) | u8::from(bit))
    }

    pub const fn bits(self) -> [bool; CODE_BITS] {
        self.0
    }

    /// Bit by significance: `0` is the last digit of the pattern.
    pub const fn bit(self, significance: usize) -> bool {
        self.0[CODE_BITS - 1 - significance]
    }
}

impl TryFrom<u8> for Code {
    type Error = TapeError;

    fn try_from(byte: u8) -> Result<Self, Self::Error> {
        if usize::from(byte) >= CODE_COUNT {
            return Err(TapeError::MalformedCode(format!(
                "byte 0x{byte:02X} does not fit in {CODE_BITS} bits"
            )));
        }
        Ok(Self::from_index(byte))
    }
}

impl FromStr for Code {
    type Err = TapeError;

    /// Accepts `"11011"` or the tape notation `"110x11"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let chars: Vec<char> = s.chars().collect();
        let digits: Vec<char> = match chars.len() {
            CODE_BITS => chars,
            n if n == CODE_BITS + 1 && matches!(chars[SPROCKET_COLUMN], 'x' | 'X') => chars
                .iter()
                .enumerate()
                .filter(|(idx, _)| *idx != SPROCKET_COLUMN)
                .map(|(_, ch)| *ch)
                .collect(),
            n => {
                return Err(TapeError::MalformedCode(format!(
                    "'{s}' has {n} symbols, expected {CODE_BITS} bits"
                )));
            }
        };

        let mut bits = [false; CODE_BITS];
        for (slot, ch) in bits.iter_mut().zip(digits) {
            *slot = match ch {
                '0' => false,
                '1' => true,
                other => {
                    return Err(TapeError::MalformedCode(format!(
                        "'{s}' contains non-binary symbol '{other}'"
                    )));
                }
            };
        }
        Ok(Self(bits))
    }
}

impl TryFrom<String> for Code {
    type Error = TapeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Code> for String {
    fn from(code: Code) -> String {
        code.to_string()
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, bit) in self.0.iter().enumerate() {
            if idx == SPROCKET_COLUMN {
                f.write_str("x")?;
            }
            f.write_str(if *bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}

/// Serialize frames one byte per code.
pub fn codes_to_bytes(codes: &[Code]) -> Vec<u8> {
    codes.iter().map(|code| code.value()).collect()
}

/// Parse the one-byte-per-code wire form, rejecting any byte above 31.
pub fn codes_from_bytes(bytes: &[u8]) -> Result<Vec<Code>, TapeError> {
    bytes
        .iter()
        .enumerate()
        .map(|(offset, &byte)| {
            Code::try_from(byte).map_err(|_| {
                TapeError::MalformedCode(format!(
                    "byte 0x{byte:02X} at offset {offset} does not fit in {CODE_BITS} bits"
                ))
            })
        })
        .collect()
}

/// Parse whitespace- or comma-separated patterns such as `"111x11 000x11"`.
pub fn parse_patterns(input: &str) -> Result<Vec<Code>, TapeError> {
    input
        .split(|ch: char| ch.is_whitespace() || ch == ',')
        .filter(|token| !token.is_empty())
        .map(str::parse)
        .collect()
}
