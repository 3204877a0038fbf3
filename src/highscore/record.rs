//! Highscore Records
//!
//! One completed round, persisted as a pipe-delimited line:
//! `<attempts>|<secret>|<dd.mm.yyyy>|<hh:mm:ss>`.

use chrono::Local;
use serde::{Deserialize, Serialize};

use crate::game::guess::WinReport;

/// Field separator in the persisted line format.
pub const FIELD_SEPARATOR: char = '|';

/// One persisted highscore entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighscoreRecord {
    /// Guesses taken to find the secret, including the winning one.
    pub attempts: u32,
    /// The secret that was found.
    pub secret: u32,
    /// Completion date, `dd.mm.yyyy`.
    pub date: String,
    /// Completion time, `hh:mm:ss`.
    pub time: String,
}

impl HighscoreRecord {
    /// Build a record stamped with the current local date and time.
    pub fn now(attempts: u32, secret: u32) -> Self {
        let now = Local::now();
        Self {
            attempts,
            secret,
            date: now.format("%d.%m.%Y").to_string(),
            time: now.format("%H:%M:%S").to_string(),
        }
    }

    /// Build a record for a won round, stamped now.
    pub fn from_win(report: &WinReport) -> Self {
        Self::now(report.attempts, report.secret)
    }

    /// Parse one persisted line. Returns `None` for malformed lines.
    pub fn parse_line(line: &str) -> Option<Self> {
        let mut fields = line.trim_end().split(FIELD_SEPARATOR);

        let attempts = fields.next()?.parse().ok()?;
        let secret = fields.next()?.parse().ok()?;
        let date = fields.next()?.to_string();
        let time = fields.next()?.to_string();

        // Trailing garbage makes the line malformed
        if fields.next().is_some() {
            return None;
        }

        Some(Self { attempts, secret, date, time })
    }

    /// Format as a persisted line, without the trailing newline.
    pub fn to_line(&self) -> String {
        format!(
            "{attempts}{sep}{secret}{sep}{date}{sep}{time}",
            attempts = self.attempts,
            secret = self.secret,
            date = self.date,
            time = self.time,
            sep = FIELD_SEPARATOR,
        )
    }
}
