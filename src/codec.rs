use crate::code::{Code, codes_from_bytes, parse_patterns};
use crate::codepage::{Codepage, ShiftMode, Symbol};
use crate::error::TapeError;
use log::{debug, trace, warn};

/// What the encoder does with a character neither table can represent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnsupportedPolicy {
    /// Fail the call with [`TapeError::UnsupportedCharacter`].
    #[default]
    Reject,
    /// Drop the character and carry on in the current mode.
    Skip,
}

/// Turns text into a primed sequence of ITA2 frames.
///
/// Input is uppercased first. The output always starts with the shift frame
/// of the initial mode; after that a shift frame is only inserted when the
/// next character is missing from the active table.
#[derive(Debug, Clone, Copy, Default)]
pub struct Encoder {
    codepage: Codepage,
    initial_mode: ShiftMode,
    policy: UnsupportedPolicy,
}

impl Encoder {
    pub fn new(codepage: Codepage) -> Self {
        Self {
            codepage,
            ..Self::default()
        }
    }

    pub fn with_initial_mode(mut self, mode: ShiftMode) -> Self {
        self.initial_mode = mode;
        self
    }

    pub fn with_policy(mut self, policy: UnsupportedPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn codepage(&self) -> Codepage {
        self.codepage
    }

    pub fn initial_mode(&self) -> ShiftMode {
        self.initial_mode
    }

    pub fn encode(&self, text: &str) -> Result<Vec<Code>, TapeError> {
        let mut mode = self.initial_mode;
        let mut codes = Vec::with_capacity(text.len() + 1);
        codes.push(mode.shift_code());

        for (position, original) in text.chars().enumerate() {
            for ch in original.to_uppercase() {
                if let Some(code) = self.codepage.lookup(mode, ch) {
                    codes.push(code);
                    continue;
                }
                let other = mode.toggled();
                match self.codepage.lookup(other, ch) {
                    Some(code) => {
                        trace!("shift {mode} -> {other} before {ch:?} at {position}");
                        mode = other;
                        codes.push(mode.shift_code());
                        codes.push(code);
                    }
                    None => match self.policy {
                        UnsupportedPolicy::Reject => {
                            return Err(TapeError::UnsupportedCharacter {
                                character: original,
                                position,
                            });
                        }
                        UnsupportedPolicy::Skip => {
                            warn!(
                                "dropping {original:?} at position {position}: not in {} tables",
                                self.codepage
                            );
                        }
                    },
                }
            }
        }

        debug!(
            "encoded {} chars into {} frames ({}, primed {})",
            text.chars().count(),
            codes.len(),
            self.codepage,
            self.initial_mode
        );
        Ok(codes)
    }
}

/// Turns a frame sequence back into text, following shift frames.
#[derive(Debug, Clone, Copy, Default)]
pub struct Decoder {
    codepage: Codepage,
    initial_mode: ShiftMode,
}

impl Decoder {
    pub fn new(codepage: Codepage) -> Self {
        Self {
            codepage,
            ..Self::default()
        }
    }

    pub fn with_initial_mode(mut self, mode: ShiftMode) -> Self {
        self.initial_mode = mode;
        self
    }

    pub fn decode(&self, codes: &[Code]) -> String {
        let mut mode = self.initial_mode;
        let mut text = String::with_capacity(codes.len());
        for &code in codes {
            match self.codepage.symbol(mode, code) {
                Symbol::Shift(next) => mode = next,
                Symbol::Char(ch) => text.push(ch),
            }
        }
        debug!(
            "decoded {} frames into {} chars ({})",
            codes.len(),
            text.chars().count(),
            self.codepage
        );
        text
    }

    /// Decode untrusted textual patterns. Nothing is decoded unless every
    /// pattern is a valid five-bit frame.
    pub fn decode_patterns(&self, input: &str) -> Result<String, TapeError> {
        let codes = parse_patterns(input)?;
        Ok(self.decode(&codes))
    }

    /// Decode the one-byte-per-code wire form.
    pub fn decode_bytes(&self, bytes: &[u8]) -> Result<String, TapeError> {
        let codes = codes_from_bytes(bytes)?;
        Ok(self.decode(&codes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codepage::{FIGURES_SHIFT, LETTERS_SHIFT};
    use pretty_assertions::assert_eq;

    fn code(pattern: &str) -> Code {
        pattern.parse().unwrap()
    }

    fn letters(codepage: Codepage) -> Encoder {
        Encoder::new(codepage)
    }

    #[test]
    fn test_priming_code_matches_initial_mode() {
        for codepage in Codepage::ALL {
            for text in ["", "A", "1", "HELLO 42"] {
                let primed_letters = letters(codepage).encode(text).unwrap();
                assert_eq!(primed_letters[0], LETTERS_SHIFT);
                let primed_figures = letters(codepage)
                    .with_initial_mode(ShiftMode::Figures)
                    .encode(text)
                    .unwrap();
                assert_eq!(primed_figures[0], FIGURES_SHIFT);
            }
        }
    }

    #[test]
    fn test_empty_input_is_priming_only() {
        let codes = Encoder::new(Codepage::Standard).encode("").unwrap();
        assert_eq!(codes, vec![LETTERS_SHIFT]);
        assert_eq!(Decoder::new(Codepage::Standard).decode(&codes), "");
    }

    #[test]
    fn test_single_mode_text_needs_no_extra_shifts() {
        let text = "THE QUICK BROWN FOX";
        let codes = Encoder::new(Codepage::Standard).encode(text).unwrap();
        assert_eq!(codes.len(), text.len() + 1);

        let digits = "3.14159";
        let codes = Encoder::new(Codepage::Standard)
            .with_initial_mode(ShiftMode::Figures)
            .encode(digits)
            .unwrap();
        assert_eq!(codes.len(), digits.len() + 1);
    }

    #[test]
    fn test_shift_inserted_on_both_sides_of_a_digit() {
        let codes = Encoder::new(Codepage::Standard).encode("A1B").unwrap();
        assert_eq!(
            codes,
            vec![
                LETTERS_SHIFT,
                code("000x11"),
                FIGURES_SHIFT,
                code("101x11"),
                LETTERS_SHIFT,
                code("110x01"),
            ]
        );
    }

    #[test]
    fn test_shared_characters_do_not_shift() {
        // space, CR and LF exist in both tables
        let codes = Encoder::new(Codepage::Standard).encode("1 \r\n2").unwrap();
        assert_eq!(codes.len(), 7);
        assert_eq!(codes.iter().filter(|c| **c == FIGURES_SHIFT).count(), 1);
    }

    #[test]
    fn test_worst_case_length_bound() {
        let text = "A1B2C3";
        let codes = Encoder::new(Codepage::Standard)
            .with_initial_mode(ShiftMode::Figures)
            .encode(text)
            .unwrap();
        assert_eq!(codes.len(), 2 * text.len() + 1);
    }

    #[test]
    fn test_lowercase_is_uppercased() {
        let encoder = Encoder::new(Codepage::UsTty);
        assert_eq!(
            encoder.encode("hello, world").unwrap(),
            encoder.encode("HELLO, WORLD").unwrap()
        );
    }

    #[test]
    fn test_round_trip_both_codepages() {
        let samples = [
            (Codepage::Standard, "PRICE: £5 (+2) = 7/8?"),
            (Codepage::UsTty, "PAY $5; TAKE #3 \"NOW\"!"),
        ];
        for (codepage, text) in samples {
            for mode in [ShiftMode::Letters, ShiftMode::Figures] {
                let codes = Encoder::new(codepage)
                    .with_initial_mode(mode)
                    .encode(text)
                    .unwrap();
                let decoded = Decoder::new(codepage).with_initial_mode(mode).decode(&codes);
                assert_eq!(decoded, text);
            }
        }
    }

    #[test]
    fn test_round_trip_uppercases() {
        let codes = Encoder::new(Codepage::Standard).encode("ryry 73").unwrap();
        assert_eq!(Decoder::new(Codepage::Standard).decode(&codes), "RYRY 73");
    }

    #[test]
    fn test_unsupported_character_is_rejected() {
        let err = Encoder::new(Codepage::Standard)
            .encode("AB@C")
            .unwrap_err();
        assert_eq!(
            err,
            TapeError::UnsupportedCharacter {
                character: '@',
                position: 2
            }
        );
    }

    #[test]
    fn test_codepage_specific_character_is_rejected() {
        assert!(Encoder::new(Codepage::Standard).encode("$1").is_err());
        assert!(Encoder::new(Codepage::UsTty).encode("£1").is_err());
    }

    #[test]
    fn test_skip_policy_drops_without_shifting() {
        let encoder = Encoder::new(Codepage::Standard).with_policy(UnsupportedPolicy::Skip);
        let codes = encoder.encode("A@B").unwrap();
        assert_eq!(codes, encoder.encode("AB").unwrap());
        assert_eq!(Decoder::new(Codepage::Standard).decode(&codes), "AB");
    }

    #[test]
    fn test_decode_follows_shifts_regardless_of_initial_mode() {
        let codes = Encoder::new(Codepage::Standard)
            .with_initial_mode(ShiftMode::Figures)
            .encode("\r\n42 IS IT\r\n")
            .unwrap();
        let decoded = Decoder::new(Codepage::Standard)
            .with_initial_mode(ShiftMode::Letters)
            .decode(&codes);
        assert_eq!(decoded, "\r\n42 IS IT\r\n");
    }

    #[test]
    fn test_decode_without_priming_uses_initial_mode() {
        let frames = [code("000x01"), code("100x11")];
        assert_eq!(Decoder::new(Codepage::Standard).decode(&frames), "EW");
        assert_eq!(
            Decoder::new(Codepage::Standard)
                .with_initial_mode(ShiftMode::Figures)
                .decode(&frames),
            "32"
        );
    }

    #[test]
    fn test_decode_patterns_rejects_malformed_frames() {
        let decoder = Decoder::new(Codepage::Standard);
        assert_eq!(decoder.decode_patterns("111x11 000x11 000x01").unwrap(), "AE");
        assert!(matches!(
            decoder.decode_patterns("111x11 0001 000x01"),
            Err(TapeError::MalformedCode(_))
        ));
        assert!(matches!(
            decoder.decode_patterns("111x11 000011"),
            Err(TapeError::MalformedCode(_))
        ));
    }

    #[test]
    fn test_decode_bytes_rejects_wide_values() {
        let decoder = Decoder::new(Codepage::UsTty);
        assert_eq!(decoder.decode_bytes(&[27, 9]).unwrap(), "$");
        assert!(matches!(
            decoder.decode_bytes(&[27, 64]),
            Err(TapeError::MalformedCode(_))
        ));
    }

    #[test]
    fn test_answer_back_frame_decodes_to_lowercase_e() {
        let decoder = Decoder::new(Codepage::Standard);
        assert_eq!(decoder.decode_patterns("110x11 010x01").unwrap(), "e");
        assert_eq!(
            Decoder::new(Codepage::UsTty)
                .decode_patterns("110x11 010x01")
                .unwrap(),
            "$"
        );
    }

    #[test]
    fn test_lowercase_e_encodes_as_letter() {
        let codes = Encoder::new(Codepage::Standard)
            .with_initial_mode(ShiftMode::Figures)
            .encode("e")
            .unwrap();
        assert_eq!(codes, vec![FIGURES_SHIFT, LETTERS_SHIFT, code("000x01")]);
        assert!(matches!(
            Encoder::new(Codepage::Standard).encode("\u{5}"),
            Err(TapeError::UnsupportedCharacter { position: 0, .. })
        ));
    }
}
