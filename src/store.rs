//! Tape files on disk.
//!
//! A tape file is JSON lines: a header record followed by frame records of
//! at most [`FRAMES_PER_LINE`] codes each. The header pins the codepage and
//! initial mode the tape was punched with and a SHA-256 digest of the frames
//! in their one-byte-per-code wire form.

use crate::code::{Code, codes_to_bytes};
use crate::codepage::{Codepage, ShiftMode};
use chrono::{DateTime, Utc};
use log::debug;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fs::{self, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};

const TAPE_VERSION: u8 = 1;
pub const FRAMES_PER_LINE: usize = 64;

/// Per-tape metadata stored as the first record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TapeHeader {
    pub version: u8,
    pub created_at: DateTime<Utc>,
    pub codepage: Codepage,
    pub initial_mode: ShiftMode,
    pub frames: usize,
    pub digest: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct FrameRecord {
    codes: Vec<Code>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
enum TapeLine {
    Header(TapeHeader),
    Frames(FrameRecord),
}

/// In-memory representation of a tape file.
#[derive(Debug, Clone)]
pub struct TapeFile {
    pub header: TapeHeader,
    pub codes: Vec<Code>,
    pub path: Option<PathBuf>,
}

impl TapeFile {
    pub fn new(codes: Vec<Code>, codepage: Codepage, initial_mode: ShiftMode) -> Self {
        let header = TapeHeader {
            version: TAPE_VERSION,
            created_at: Utc::now(),
            codepage,
            initial_mode,
            frames: codes.len(),
            digest: digest_codes(&codes),
            label: None,
        };
        Self {
            header,
            codes,
            path: None,
        }
    }

    pub fn with_label<S: Into<String>>(mut self, label: Option<S>) -> Self {
        self.header.label = label.map(Into::into);
        self
    }

    pub fn load(path: &Path) -> Result<Self> {
        let file = OpenOptions::new()
            .read(true)
            .open(path)
            .with_context(|| format!("failed to open tape file {}", path.display()))?;
        let reader = BufReader::new(file);
        let mut lines = reader.lines();
        let header_line = lines
            .next()
            .ok_or_else(|| anyhow!("tape file {} is empty", path.display()))??;
        let header = match serde_json::from_str::<TapeLine>(&header_line)
            .with_context(|| format!("failed to parse tape header in {}", path.display()))?
        {
            TapeLine::Header(header) => header,
            TapeLine::Frames(_) => return Err(anyhow!("expected tape header as first line")),
        };
        if header.version != TAPE_VERSION {
            return Err(anyhow!(
                "unsupported tape version {} in {}",
                header.version,
                path.display()
            ));
        }

        let mut codes = Vec::new();
        for (idx, raw) in lines.enumerate() {
            let raw = raw?;
            if raw.trim().is_empty() {
                continue;
            }
            let line: TapeLine = serde_json::from_str(&raw).with_context(|| {
                format!(
                    "failed to parse frame record at line {} in {}",
                    idx + 2,
                    path.display()
                )
            })?;
            match line {
                TapeLine::Header(_) => {
                    return Err(anyhow!(
                        "multiple tape headers found in {} at line {}",
                        path.display(),
                        idx + 2
                    ));
                }
                TapeLine::Frames(record) => codes.extend(record.codes),
            }
        }

        if codes.len() != header.frames {
            return Err(anyhow!(
                "tape {} declares {} frames but holds {}",
                path.display(),
                header.frames,
                codes.len()
            ));
        }
        debug!("loaded {} frames from {}", codes.len(), path.display());

        Ok(Self {
            header,
            codes,
            path: Some(path.to_path_buf()),
        })
    }

    pub fn save(&mut self, path: &Path) -> Result<()> {
        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(path)
            .with_context(|| format!("failed to write tape file {}", path.display()))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer(&mut writer, &TapeLine::Header(self.header.clone()))
            .context("failed to serialize tape header")?;
        writer.write_all(b"\n")?;
        for chunk in self.codes.chunks(FRAMES_PER_LINE) {
            let record = FrameRecord {
                codes: chunk.to_vec(),
            };
            serde_json::to_writer(&mut writer, &TapeLine::Frames(record))
                .context("failed to serialize frame record")?;
            writer.write_all(b"\n")?;
        }
        writer.flush()?;
        debug!("saved {} frames to {}", self.codes.len(), path.display());
        self.path = Some(path.to_path_buf());
        Ok(())
    }

    /// Recompute the digest and compare with the header.
    pub fn verify(&self) -> Result<()> {
        let actual = digest_codes(&self.codes);
        if actual != self.header.digest {
            return Err(anyhow!(
                "digest mismatch: header records {}, frames hash to {}",
                self.header.digest,
                actual
            ));
        }
        Ok(())
    }
}

/// SHA-256 over the one-byte-per-code wire form, lowercase hex.
pub fn digest_codes(codes: &[Code]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(codes_to_bytes(codes));
    format!("{:x}", hasher.finalize())
}

/// Write frames as bare bytes, one per code.
pub fn save_raw(path: &Path, codes: &[Code]) -> Result<()> {
    fs::write(path, codes_to_bytes(codes))
        .with_context(|| format!("failed to write {}", path.display()))
}

/// Read bare one-byte-per-code frames.
pub fn load_raw(path: &Path) -> Result<Vec<Code>> {
    let bytes = fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    crate::code::codes_from_bytes(&bytes)
        .with_context(|| format!("invalid raw tape {}", path.display()))
}
