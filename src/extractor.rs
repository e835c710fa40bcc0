use std::io::BufRead;

use regex::Regex;

use crate::error::Result;

// Dotted quads are matched textually, out-of-range octets included. The
// upstream service is the authority on whether an address is real.
const IPV4_PATTERN: &str = r"\b(?:[0-9]{1,3}\.){3}[0-9]{1,3}\b";
const DOMAIN_PATTERN: &str = r"[A-Za-z0-9.-]+\.[A-Za-z]{2,}";
const PORT_PATTERN: &str = r"#([0-9]+)";

/// A single parsed input line: an address (IP literal or domain name), the
/// port that travels with it, and the 1-based source line number.
///
/// Entries are immutable and keep input order. The same address may appear in
/// several entries; each keeps the port found on its own line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AddressEntry {
    pub address: String,
    pub port: String,
    pub line: usize,
}

/// A searcher for address entries in line-oriented text.
///
/// Lines starting with `//` are comments and produce nothing. On every other
/// line the first dotted-quad token wins; only when no dotted quad is present
/// is a domain name considered. A `#<digits>` fragment anywhere on the line
/// sets the entry's port, otherwise the configured default applies.
#[derive(Clone, Debug)]
pub struct Extractor {
    ipv4: Regex,
    domain: Regex,
    port: Regex,
    default_port: String,
}

impl Extractor {
    /// Compile the address and port patterns, with `default_port` assigned to
    /// lines that carry no port annotation of their own.
    pub fn new(default_port: impl Into<String>) -> Result<Self> {
        Ok(Self {
            ipv4: Regex::new(IPV4_PATTERN)?,
            domain: Regex::new(DOMAIN_PATTERN)?,
            port: Regex::new(PORT_PATTERN)?,
            default_port: default_port.into(),
        })
    }

    /// Parse a single line into an entry.
    ///
    /// Returns `None` for comment lines and for lines without a recognizable
    /// address. `lineno` is recorded on the produced entry.
    pub fn extract_line(&self, lineno: usize, line: &str) -> Option<AddressEntry> {
        if line.starts_with("//") {
            return None;
        }

        let address = match self.ipv4.find(line) {
            Some(m) => m.as_str(),
            None => self.domain.find(line)?.as_str(),
        };

        let port = match self.port.captures(line) {
            Some(caps) => caps[1].to_string(),
            None => self.default_port.clone(),
        };

        Some(AddressEntry {
            address: address.to_string(),
            port,
            line: lineno,
        })
    }

    /// Parse every line of `reader` into an ordered entry list.
    ///
    /// Duplicate addresses are preserved, one entry per line they appear on.
    pub fn extract<R: BufRead>(&self, reader: R) -> Result<Vec<AddressEntry>> {
        let mut entries = Vec::new();
        for (idx, line) in reader.lines().enumerate() {
            let line = line?;
            if let Some(entry) = self.extract_line(idx + 1, &line) {
                entries.push(entry);
            }
        }
        Ok(entries)
    }
}
