use serde::{Deserialize, Serialize};

use crate::engine::{RoundSummary, SeatResult};

/// Round history record, one JSON object per line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundRecord {
    /// Unique identifier for this round (format: YYYYMMDD-NNNNNN)
    pub round_id: String,
    /// Round number within the session
    pub round: u32,
    pub dealer_score: u32,
    pub dealer_bust: bool,
    pub dealer_blackjack: bool,
    /// One entry per seat, in seat order
    pub results: Vec<SeatResult>,
    /// Timestamp when the round resolved (RFC3339 format)
    #[serde(default)]
    pub ts: Option<String>,
}

impl RoundRecord {
    pub fn from_summary(round_id: String, summary: &RoundSummary) -> Self {
        Self {
            round_id,
            round: summary.round,
            dealer_score: summary.dealer_score,
            dealer_bust: summary.dealer_bust,
            dealer_blackjack: summary.dealer_blackjack,
            results: summary.results.clone(),
            ts: None,
        }
    }
}

pub fn format_round_id(yyyymmdd: &str, seq: u32) -> String {
    format!("{}-{:06}", yyyymmdd, seq)
}

/// Highest sequence number among `content`'s records dated `yyyymmdd`.
fn last_seq(content: &str, yyyymmdd: &str) -> u32 {
    content
        .lines()
        .filter_map(|line| serde_json::from_str::<RoundRecord>(line).ok())
        .filter_map(|rec| {
            let (date, seq) = rec.round_id.split_once('-')?;
            if date == yyyymmdd {
                seq.parse().ok()
            } else {
                None
            }
        })
        .max()
        .unwrap_or(0)
}

use chrono::{SecondsFormat, Utc};
use std::fs::{create_dir_all, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;

pub struct RoundLogger {
    writer: Option<BufWriter<std::fs::File>>,
    date: String,
    seq: u32,
}

impl RoundLogger {
    /// Appends to `path`, creating it and its parent directories if needed.
    ///
    /// Numbering continues after the highest id already in the file for
    /// today, so appended runs never repeat a `round_id`.
    pub fn create<P: AsRef<Path>>(path: P) -> std::io::Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                create_dir_all(parent)?;
            }
        }
        let date = Utc::now().format("%Y%m%d").to_string();
        let seq = match std::fs::read_to_string(path) {
            Ok(content) => last_seq(&content, &date),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => 0,
            Err(e) => return Err(e),
        };
        let f = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            writer: Some(BufWriter::new(f)),
            date,
            seq,
        })
    }

    pub fn with_seq_for_test(date: &str) -> Self {
        Self {
            writer: None,
            date: date.to_string(),
            seq: 0,
        }
    }

    pub fn next_id(&mut self) -> String {
        self.seq += 1;
        format_round_id(&self.date, self.seq)
    }

    pub fn write(&mut self, record: &RoundRecord) -> std::io::Result<()> {
        // inject timestamp if missing
        let mut rec = record.clone();
        if rec.ts.is_none() {
            rec.ts = Some(Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true));
        }
        let line = serde_json::to_string(&rec).map_err(std::io::Error::other)?;
        if let Some(w) = &mut self.writer {
            w.write_all(line.as_bytes())?;
            w.write_all(b"\n")?;
            w.flush()?;
        }
        Ok(())
    }

    /// Writes one record per summary, numbering them in order.
    pub fn log_rounds(&mut self, summaries: &[RoundSummary]) -> std::io::Result<()> {
        for summary in summaries {
            let id = self.next_id();
            self.write(&RoundRecord::from_summary(id, summary))?;
        }
        Ok(())
    }
}
