//! Access-log line parsing.

use anyhow::Result;
use regex::{Regex, RegexBuilder};

/// Timestamp, quoted `"METHOD ... HTTP/1.x"` request line, then a numeric status.
/// Compiled in CRLF mode so `.` never matches `\r`.
const ACCESS_LINE: &str =
    r#"([0-9]{4}-[0-9]{2}-[0-9]{2} [0-9]{2}:[0-9]{2} \+[0-9]{2}:[0-9]{2}).+"([A-Za-z0-9_]+) .+ HTTP/1.[0-9]" ([0-9]+) .+"#;

/// One request extracted from a matching log line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogRecord {
    pub timestamp: String,
    /// Request method token (`GET`, `POST`, ...), not the URL path. Kept under
    /// this name until it is settled whether the path was intended.
    pub endpoint: String,
    pub status_code: u16,
}

/// Compiled access-log pattern. Cheap to share behind an `Arc`.
#[derive(Debug, Clone)]
pub struct AccessLogParser {
    re: Regex,
}

impl AccessLogParser {
    pub fn new() -> Result<Self> {
        let re = RegexBuilder::new(ACCESS_LINE).crlf(true).build()?;
        Ok(Self { re })
    }

    /// Parse a single line. `None` for anything that does not have the expected shape.
    pub fn parse_line(&self, line: &str) -> Option<LogRecord> {
        let caps = self.re.captures(line)?;
        // A status that does not fit u16 cannot be an HTTP status; treat as noise.
        let status_code = caps[3].parse::<u16>().ok()?;
        Some(LogRecord {
            timestamp: caps[1].to_string(),
            endpoint: caps[2].to_string(),
            status_code,
        })
    }

    /// Lazily parse every line of `text`, skipping the ones that do not match.
    pub fn parse<'a>(&'a self, text: &'a str) -> impl Iterator<Item = LogRecord> + 'a {
        text.split('\n').filter_map(|line| self.parse_line(line))
    }
}
