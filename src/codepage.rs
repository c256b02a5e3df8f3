//! ITA2 code tables.
//!
//! Provides the letters and figures tables for the two supported codepages:
//!
//! - Standard: International Telegraph Alphabet No. 2
//! - US TTY: the North American teleprinter variant, which only differs in
//!   the punctuation of the figures table
//!
//! Tables are declared in ascending code order, so a frame's value is its
//! index. Reverse lookups go through an index built once per table.

use crate::code::{CODE_COUNT, Code};
use crate::error::TapeError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

/// Supported ITA2 codepages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Codepage {
    /// International ITA2.
    #[default]
    Standard,
    /// US teleprinter variant.
    UsTty,
}

/// Which of the two tables is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShiftMode {
    #[default]
    Letters,
    Figures,
}

/// Content of one table position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Symbol {
    Char(char),
    /// Switches the receiver to the given mode; prints nothing.
    Shift(ShiftMode),
}

impl Symbol {
    /// Character this position prints, if any.
    pub const fn as_char(self) -> Option<char> {
        match self {
            Symbol::Char(ch) => Some(ch),
            Symbol::Shift(_) => None,
        }
    }
}

/// LETTERS-shift frame, `11111` in both codepages.
pub const LETTERS_SHIFT: Code = Code::from_index(0b11111);
/// FIGURES-shift frame, `11011` in both codepages.
pub const FIGURES_SHIFT: Code = Code::from_index(0b11011);

impl ShiftMode {
    pub const fn toggled(self) -> Self {
        match self {
            ShiftMode::Letters => ShiftMode::Figures,
            ShiftMode::Figures => ShiftMode::Letters,
        }
    }

    /// The frame that switches a receiver into this mode.
    pub const fn shift_code(self) -> Code {
        match self {
            ShiftMode::Letters => LETTERS_SHIFT,
            ShiftMode::Figures => FIGURES_SHIFT,
        }
    }

    const fn slot(self) -> usize {
        match self {
            ShiftMode::Letters => 0,
            ShiftMode::Figures => 1,
        }
    }
}

impl fmt::Display for ShiftMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShiftMode::Letters => write!(f, "letters"),
            ShiftMode::Figures => write!(f, "figures"),
        }
    }
}

use Symbol::Char as C;

const LTR: Symbol = Symbol::Shift(ShiftMode::Letters);
const FIG: Symbol = Symbol::Shift(ShiftMode::Figures);

/// Letters table, shared by both codepages.
#[rustfmt::skip]
static LETTERS: [Symbol; CODE_COUNT] = [
    // 000x00 - 001x11
    C('\0'), C('E'), C('\n'), C('A'), C(' '), C('S'), C('I'), C('U'),
    // 010x00 - 011x11
    C('\r'), C('D'), C('R'), C('J'), C('N'), C('F'), C('C'), C('K'),
    // 100x00 - 101x11
    C('T'), C('Z'), C('L'), C('W'), C('H'), C('Y'), C('P'), C('Q'),
    // 110x00 - 111x11
    C('O'), C('B'), C('G'), FIG, C('M'), C('X'), C('V'), LTR,
];

/// Figures table of international ITA2. The answer-back position `010x01`
/// holds a lowercase `e`, which uppercased input can never select.
#[rustfmt::skip]
static FIGURES_STANDARD: [Symbol; CODE_COUNT] = [
    // 000x00 - 001x11
    C('\0'), C('3'), C('\n'), C('-'), C(' '), C('\''), C('8'), C('7'),
    // 010x00 - 011x11
    C('\r'), C('e'), C('4'), C('\u{7}'), C(','), C('!'), C(':'), C('('),
    // 100x00 - 101x11
    C('5'), C('+'), C(')'), C('2'), C('£'), C('6'), C('0'), C('1'),
    // 110x00 - 111x11
    C('9'), C('?'), C('&'), FIG, C('.'), C('/'), C('='), LTR,
];

/// Figures table of the US teleprinter variant.
#[rustfmt::skip]
static FIGURES_US_TTY: [Symbol; CODE_COUNT] = [
    // 000x00 - 001x11
    C('\0'), C('3'), C('\n'), C('-'), C(' '), C('\u{7}'), C('8'), C('7'),
    // 010x00 - 011x11
    C('\r'), C('$'), C('4'), C('\''), C(','), C('!'), C(':'), C('('),
    // 100x00 - 101x11
    C('5'), C('"'), C(')'), C('2'), C('#'), C('6'), C('0'), C('1'),
    // 110x00 - 111x11
    C('9'), C('?'), C('&'), FIG, C('.'), C('/'), C(';'), LTR,
];

type ReverseIndex = HashMap<char, Code>;

/// Character to frame, per codepage and mode. The first declared position wins
/// when a character appears more than once.
static REVERSE: LazyLock<[[ReverseIndex; 2]; 2]> = LazyLock::new(|| {
    Codepage::ALL.map(|codepage| {
        [ShiftMode::Letters, ShiftMode::Figures].map(|mode| build_reverse(codepage.table(mode)))
    })
});

fn build_reverse(table: &[Symbol; CODE_COUNT]) -> ReverseIndex {
    let mut reverse = HashMap::with_capacity(CODE_COUNT);
    for (index, symbol) in table.iter().enumerate() {
        if let Some(ch) = symbol.as_char() {
            reverse.entry(ch).or_insert(Code::from_index(index as u8));
        }
    }
    reverse
}

impl Codepage {
    pub const ALL: [Codepage; 2] = [Codepage::Standard, Codepage::UsTty];

    pub const fn name(self) -> &'static str {
        match self {
            Codepage::Standard => "standard",
            Codepage::UsTty => "us-tty",
        }
    }

    /// The full 32-entry table for a mode.
    pub fn table(self, mode: ShiftMode) -> &'static [Symbol; CODE_COUNT] {
        match (self, mode) {
            (_, ShiftMode::Letters) => &LETTERS,
            (Codepage::Standard, ShiftMode::Figures) => &FIGURES_STANDARD,
            (Codepage::UsTty, ShiftMode::Figures) => &FIGURES_US_TTY,
        }
    }

    /// Forward lookup. Total over all frames.
    pub fn symbol(self, mode: ShiftMode, code: Code) -> Symbol {
        self.table(mode)[usize::from(code.value())]
    }

    /// Reverse lookup. `None` means the character is not in this mode's table.
    pub fn lookup(self, mode: ShiftMode, ch: char) -> Option<Code> {
        REVERSE[self.slot()][mode.slot()].get(&ch).copied()
    }

    pub fn contains(self, mode: ShiftMode, ch: char) -> bool {
        self.lookup(mode, ch).is_some()
    }

    const fn slot(self) -> usize {
        match self {
            Codepage::Standard => 0,
            Codepage::UsTty => 1,
        }
    }
}

impl FromStr for Codepage {
    type Err = TapeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "standard" | "ita2" | "ita2std" => Ok(Codepage::Standard),
            "us-tty" | "us_tty" | "ustty" | "ita2us" => Ok(Codepage::UsTty),
            _ => Err(TapeError::UnknownCodepage(s.to_string())),
        }
    }
}

impl fmt::Display for Codepage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn code(pattern: &str) -> Code {
        pattern.parse().unwrap()
    }

    #[test]
    fn test_shift_positions_agree_in_every_table() {
        for codepage in Codepage::ALL {
            for mode in [ShiftMode::Letters, ShiftMode::Figures] {
                assert_eq!(
                    codepage.symbol(mode, LETTERS_SHIFT),
                    Symbol::Shift(ShiftMode::Letters)
                );
                assert_eq!(
                    codepage.symbol(mode, FIGURES_SHIFT),
                    Symbol::Shift(ShiftMode::Figures)
                );
            }
        }
    }

    #[test]
    fn test_letters_table_spot_checks() {
        let cp = Codepage::Standard;
        assert_eq!(cp.symbol(ShiftMode::Letters, code("000x01")), C('E'));
        assert_eq!(cp.symbol(ShiftMode::Letters, code("000x11")), C('A'));
        assert_eq!(cp.symbol(ShiftMode::Letters, code("100x01")), C('Z'));
        assert_eq!(cp.symbol(ShiftMode::Letters, code("111x10")), C('V'));
        assert_eq!(cp.symbol(ShiftMode::Letters, code("010x00")), C('\r'));
    }

    #[test]
    fn test_letters_table_covers_the_alphabet() {
        for codepage in Codepage::ALL {
            for ch in 'A'..='Z' {
                assert!(
                    codepage.contains(ShiftMode::Letters, ch),
                    "{codepage} is missing '{ch}'"
                );
            }
        }
    }

    #[test]
    fn test_figures_table_covers_the_digits() {
        for codepage in Codepage::ALL {
            for ch in '0'..='9' {
                assert!(codepage.contains(ShiftMode::Figures, ch));
                assert!(!codepage.contains(ShiftMode::Letters, ch));
            }
        }
    }

    #[test]
    fn test_us_tty_figures_differences() {
        let pairs = [
            ("001x01", C('\''), C('\u{7}')),
            ("010x01", C('e'), C('$')),
            ("010x11", C('\u{7}'), C('\'')),
            ("100x01", C('+'), C('"')),
            ("101x00", C('£'), C('#')),
            ("111x10", C('='), C(';')),
        ];
        for (pattern, standard, us) in pairs {
            let frame = code(pattern);
            assert_eq!(Codepage::Standard.symbol(ShiftMode::Figures, frame), standard);
            assert_eq!(Codepage::UsTty.symbol(ShiftMode::Figures, frame), us);
        }
    }

    #[test]
    fn test_reverse_lookup_matches_forward_table() {
        for codepage in Codepage::ALL {
            for mode in [ShiftMode::Letters, ShiftMode::Figures] {
                for (index, symbol) in codepage.table(mode).iter().enumerate() {
                    if let Some(ch) = symbol.as_char() {
                        assert_eq!(
                            codepage.lookup(mode, ch),
                            Some(Code::from_index(index as u8))
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn test_reverse_index_first_entry_wins() {
        let table = [C('Q'); CODE_COUNT];
        let reverse = build_reverse(&table);
        assert_eq!(reverse.get(&'Q'), Some(&Code::from_index(0)));
    }

    #[test]
    fn test_lookup_unsupported_is_none() {
        assert_eq!(Codepage::Standard.lookup(ShiftMode::Letters, 'a'), None);
        assert_eq!(Codepage::Standard.lookup(ShiftMode::Figures, '$'), None);
        assert_eq!(Codepage::UsTty.lookup(ShiftMode::Figures, '£'), None);
    }

    #[test]
    fn test_answer_back_position_holds_lowercase_e() {
        let frame = code("010x01");
        assert_eq!(Codepage::Standard.symbol(ShiftMode::Figures, frame), C('e'));
        assert_eq!(
            Codepage::Standard.lookup(ShiftMode::Figures, 'e'),
            Some(frame)
        );
        assert_eq!(Codepage::UsTty.lookup(ShiftMode::Figures, 'e'), None);
        assert_eq!(Codepage::Standard.lookup(ShiftMode::Figures, '\u{5}'), None);
    }

    #[test]
    fn test_codepage_from_str() {
        assert_eq!("standard".parse::<Codepage>().unwrap(), Codepage::Standard);
        assert_eq!("ITA2STD".parse::<Codepage>().unwrap(), Codepage::Standard);
        assert_eq!("us-tty".parse::<Codepage>().unwrap(), Codepage::UsTty);
        assert_eq!("ita2us".parse::<Codepage>().unwrap(), Codepage::UsTty);
        assert_eq!(
            "murray".parse::<Codepage>(),
            Err(TapeError::UnknownCodepage("murray".to_string()))
        );
    }

    #[test]
    fn test_shift_mode_toggle() {
        assert_eq!(ShiftMode::Letters.toggled(), ShiftMode::Figures);
        assert_eq!(ShiftMode::Figures.toggled(), ShiftMode::Letters);
        assert_eq!(ShiftMode::Letters.shift_code(), code("111x11"));
        assert_eq!(ShiftMode::Figures.shift_code(), code("110x11"));
    }
}
