//! Append-only `.jsonl` journal files.
//!
//! The first line holds the run metadata. Every following line is one accepted
//! input chained to its predecessor by SHA-256, so a crash leaves a readable
//! prefix and any edit to an earlier line is caught on load.

use std::fs::{self, File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::mem;
use std::path::Path;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::journal::{InputJournal, InputPayload, InputRecord, JOURNAL_FORMAT_VERSION};

/// Link value carried by the first record of every journal.
const INITIAL_HASH: &str = "0000000000000000000000000000000000000000000000000000000000000000";

#[derive(Serialize, Deserialize)]
struct JournalHeader {
    format_version: u16,
    build_id: String,
    content_hash: u64,
    seed: u64,
}

impl JournalHeader {
    fn into_journal(self) -> InputJournal {
        InputJournal {
            format_version: self.format_version,
            build_id: self.build_id,
            content_hash: self.content_hash,
            seed: self.seed,
            inputs: Vec::new(),
        }
    }
}

#[derive(Serialize, Deserialize)]
struct ChainedLine {
    #[serde(flatten)]
    record: InputRecord,
    prev_sha256_hex: String,
    sha256_hex: String,
}

/// Digest of a record's canonical JSON followed by the previous link.
fn link_hash(record: &InputRecord, prev_sha256_hex: &str) -> serde_json::Result<String> {
    let canonical = serde_json::to_string(record)?;
    let digest = Sha256::new()
        .chain_update(canonical.as_bytes())
        .chain_update(prev_sha256_hex.as_bytes())
        .finalize();
    Ok(format!("{digest:064x}"))
}

/// Position at the end of a chain: the last link and the next sequence number.
#[derive(Debug, Clone, PartialEq, Eq)]
struct ChainTip {
    sha256_hex: String,
    next_seq: u64,
}

impl ChainTip {
    fn genesis() -> Self {
        Self { sha256_hex: INITIAL_HASH.to_string(), next_seq: 0 }
    }

    /// Wraps `record` into the next line and moves the tip past it.
    fn extend(&mut self, record: InputRecord) -> serde_json::Result<ChainedLine> {
        let sha256_hex = link_hash(&record, &self.sha256_hex)?;
        let prev_sha256_hex = mem::replace(&mut self.sha256_hex, sha256_hex.clone());
        self.next_seq += 1;
        Ok(ChainedLine { record, prev_sha256_hex, sha256_hex })
    }

    /// Checks that `line` follows the tip, then moves the tip past it.
    fn accept(
        &mut self,
        line: ChainedLine,
        line_number: usize,
    ) -> Result<InputRecord, JournalLoadError> {
        if line.record.seq != self.next_seq {
            return Err(JournalLoadError::InvalidRecord {
                line: line_number,
                message: format!("expected seq {}, found {}", self.next_seq, line.record.seq),
            });
        }
        let expected = link_hash(&line.record, &self.sha256_hex).map_err(|err| {
            JournalLoadError::InvalidRecord { line: line_number, message: err.to_string() }
        })?;
        if line.prev_sha256_hex != self.sha256_hex || line.sha256_hex != expected {
            return Err(JournalLoadError::HashChainBroken { line: line_number });
        }
        self.sha256_hex = expected;
        self.next_seq += 1;
        Ok(line.record)
    }
}

/// Records accepted inputs to disk, one flushed line per input.
pub struct JournalWriter {
    out: BufWriter<File>,
    tip: ChainTip,
}

impl JournalWriter {
    /// Starts a fresh journal at `path`, replacing any file already there.
    pub fn create(path: &Path, seed: u64, build_id: &str, content_hash: u64) -> io::Result<Self> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let out = BufWriter::new(File::create(path)?);
        let mut writer = Self { out, tip: ChainTip::genesis() };
        let header = JournalHeader {
            format_version: JOURNAL_FORMAT_VERSION,
            build_id: build_id.to_owned(),
            content_hash,
            seed,
        };
        writer.write_line(&header)?;
        Ok(writer)
    }

    /// Reopens a journal for appending. The chain position comes from
    /// [`load_journal_from_file`].
    pub fn resume(path: &Path, last_sha256_hex: String, next_seq: u64) -> io::Result<Self> {
        let file = OpenOptions::new().append(true).open(path)?;
        Ok(Self {
            out: BufWriter::new(file),
            tip: ChainTip { sha256_hex: last_sha256_hex, next_seq },
        })
    }

    /// Writes one input accepted at frame `tick_boundary`.
    pub fn append(&mut self, tick_boundary: u64, payload: &InputPayload) -> io::Result<()> {
        let record =
            InputRecord { seq: self.tip.next_seq, tick_boundary, payload: payload.clone() };
        let mut tip = self.tip.clone();
        let line = tip.extend(record).map_err(io::Error::other)?;
        self.write_line(&line)?;
        self.tip = tip;
        Ok(())
    }

    fn write_line<T: Serialize>(&mut self, value: &T) -> io::Result<()> {
        serde_json::to_writer(&mut self.out, value).map_err(io::Error::other)?;
        self.out.write_all(b"\n")?;
        self.out.flush()
    }
}

/// A verified journal plus the chain position needed to keep appending to it.
#[derive(Debug)]
pub struct LoadedJournal {
    pub journal: InputJournal,
    pub last_sha256_hex: String,
    pub next_seq: u64,
}

#[derive(Debug, thiserror::Error)]
pub enum JournalLoadError {
    #[error("journal I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("journal file is empty")]
    EmptyFile,
    #[error("invalid journal header at line {line}: {message}")]
    InvalidHeader { line: usize, message: String },
    #[error("unsupported journal format version {found}")]
    UnsupportedVersion { found: u16 },
    #[error("invalid journal record at line {line}: {message}")]
    InvalidRecord { line: usize, message: String },
    /// The last line has no terminating newline.
    #[error("incomplete journal line at line {line}")]
    IncompleteLine { line: usize },
    #[error("SHA-256 hash chain broken at line {line}")]
    HashChainBroken { line: usize },
}

fn parse_header(line: &str) -> Result<InputJournal, JournalLoadError> {
    let header: JournalHeader = serde_json::from_str(line)
        .map_err(|err| JournalLoadError::InvalidHeader { line: 1, message: err.to_string() })?;
    if header.format_version != JOURNAL_FORMAT_VERSION {
        return Err(JournalLoadError::UnsupportedVersion { found: header.format_version });
    }
    Ok(header.into_journal())
}

fn parse_record_line(line: &str, line_number: usize) -> Result<ChainedLine, JournalLoadError> {
    if line.is_empty() {
        return Err(JournalLoadError::InvalidRecord {
            line: line_number,
            message: "empty line".to_owned(),
        });
    }
    serde_json::from_str(line).map_err(|err| JournalLoadError::InvalidRecord {
        line: line_number,
        message: err.to_string(),
    })
}

/// Reads and verifies a journal file, rejecting it at the first bad line.
pub fn load_journal_from_file(path: &Path) -> Result<LoadedJournal, JournalLoadError> {
    let text = fs::read_to_string(path)?;
    let mut lines = text.lines().enumerate().map(|(index, line)| (index + 1, line));
    let Some((_, header_line)) = lines.next() else {
        return Err(JournalLoadError::EmptyFile);
    };
    if !text.ends_with('\n') {
        return Err(JournalLoadError::IncompleteLine { line: text.lines().count() });
    }

    let mut journal = parse_header(header_line)?;
    let mut tip = ChainTip::genesis();
    for (line_number, line) in lines {
        let chained = parse_record_line(line, line_number)?;
        journal.inputs.push(tip.accept(chained, line_number)?);
    }

    Ok(LoadedJournal { journal, last_sha256_hex: tip.sha256_hex, next_seq: tip.next_seq })
}
