//! Detection and resolution of version-control merge conflict markers.
//!
//! A conflict region looks like:
//!
//! ```text
//! <<<<<<< HEAD
//! ours
//! ||||||| merged common ancestors
//! base (diff3 style only)
//! =======
//! theirs
//! >>>>>>> origin/latest
//! ```

use std::fmt;
use std::ops::Range;
use std::str::FromStr;

use regex::Regex;
use tracing::debug;

use crate::domain::error::DomainError;

/// Which side of a conflict to keep.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    /// The `<<<<<<<` half (usually HEAD)
    Ours,
    /// The `>>>>>>>` half (the merged-in branch)
    Theirs,
}

impl FromStr for Side {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "ours" | "head" => Ok(Side::Ours),
            "theirs" => Ok(Side::Theirs),
            other => Err(DomainError::MalformedManifest {
                message: format!("unknown conflict side '{other}', expected ours or theirs"),
            }),
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Ours => write!(f, "ours"),
            Side::Theirs => write!(f, "theirs"),
        }
    }
}

/// One `<<<<<<<` .. `>>>>>>>` region. Line numbers are 1-based.
///
/// Content lines are stored without their line terminators.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConflictRegion {
    pub start_line: usize,
    /// The `|||||||` line of a diff3-style region
    pub base_line: Option<usize>,
    pub separator_line: usize,
    pub end_line: usize,
    pub ours_label: String,
    pub base_label: String,
    pub theirs_label: String,
    pub ours: Vec<String>,
    pub base: Vec<String>,
    pub theirs: Vec<String>,
}

impl ConflictRegion {
    pub fn marker_lines(&self) -> Vec<usize> {
        std::iter::once(self.start_line)
            .chain(self.base_line)
            .chain([self.separator_line, self.end_line])
            .collect()
    }

    pub fn side(&self, side: Side) -> &[String] {
        match side {
            Side::Ours => &self.ours,
            Side::Theirs => &self.theirs,
        }
    }

    /// 0-based line indices holding the content of `side`.
    fn span(&self, side: Side) -> Range<usize> {
        match side {
            Side::Ours => self.start_line..self.base_line.unwrap_or(self.separator_line) - 1,
            Side::Theirs => self.separator_line..self.end_line - 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Marker {
    Start,
    Base,
    Separator,
    End,
}

enum State {
    Outside,
    Ours(ConflictRegion),
    Base(ConflictRegion),
    Theirs(ConflictRegion),
}

/// Line content without its `\n` or `\r\n` terminator.
fn content(line: &str) -> &str {
    line.trim_end_matches(|c| c == '\n' || c == '\r')
}

/// Finds conflict regions in raw manifest text.
pub struct ConflictScanner {
    marker_regex: Regex,
}

impl Default for ConflictScanner {
    fn default() -> Self {
        Self::new()
    }
}

impl ConflictScanner {
    pub fn new() -> Self {
        Self {
            marker_regex: Regex::new(r"^(<{7}|\|{7}|={7}|>{7})(?:\s+(.*?))?\s*$").unwrap(),
        }
    }

    fn marker<'t>(&self, line: &'t str) -> Option<(Marker, &'t str)> {
        let caps = self.marker_regex.captures(line)?;
        let kind = match caps.get(1)?.as_str().as_bytes()[0] {
            b'<' => Marker::Start,
            b'|' => Marker::Base,
            b'=' => Marker::Separator,
            _ => Marker::End,
        };
        let label = caps.get(2).map(|m| m.as_str()).unwrap_or("");
        Some((kind, label))
    }

    /// All conflict regions, in file order.
    ///
    /// Markers out of sequence (a separator outside a region, a nested start,
    /// an unterminated region) make the text malformed.
    pub fn scan(&self, text: &str) -> Result<Vec<ConflictRegion>, DomainError> {
        let mut regions = Vec::new();
        let mut state = State::Outside;

        for (i, raw) in text.split_inclusive('\n').enumerate() {
            let line_no = i + 1;
            let line = content(raw);
            state = match (state, self.marker(line)) {
                (State::Outside, None) => State::Outside,
                (State::Outside, Some((Marker::Start, label))) => State::Ours(ConflictRegion {
                    start_line: line_no,
                    ours_label: label.to_string(),
                    ..ConflictRegion::default()
                }),
                (State::Ours(mut region), None) => {
                    region.ours.push(line.to_string());
                    State::Ours(region)
                }
                (State::Ours(mut region), Some((Marker::Base, label))) => {
                    region.base_line = Some(line_no);
                    region.base_label = label.to_string();
                    State::Base(region)
                }
                (State::Base(mut region), None) => {
                    region.base.push(line.to_string());
                    State::Base(region)
                }
                (
                    State::Ours(mut region) | State::Base(mut region),
                    Some((Marker::Separator, _)),
                ) => {
                    region.separator_line = line_no;
                    State::Theirs(region)
                }
                (State::Theirs(mut region), None) => {
                    region.theirs.push(line.to_string());
                    State::Theirs(region)
                }
                (State::Theirs(mut region), Some((Marker::End, label))) => {
                    region.end_line = line_no;
                    region.theirs_label = label.to_string();
                    debug!(
                        "conflict region at lines {}-{}",
                        region.start_line, region.end_line
                    );
                    regions.push(region);
                    State::Outside
                }
                (_, Some((m, _))) => {
                    return Err(out_of_sequence(m, line_no));
                }
            };
        }

        match state {
            State::Outside => Ok(regions),
            State::Ours(region) | State::Base(region) | State::Theirs(region) => {
                Err(DomainError::MalformedManifest {
                    message: format!(
                        "conflict region starting at line {} is not terminated",
                        region.start_line
                    ),
                })
            }
        }
    }

    /// Fail with [`DomainError::ConflictMarkers`] if the text has any conflict region.
    pub fn ensure_clean(&self, text: &str) -> Result<(), DomainError> {
        let regions = self.scan(text)?;
        if regions.is_empty() {
            return Ok(());
        }
        Err(DomainError::ConflictMarkers {
            lines: regions.iter().flat_map(|r| r.marker_lines()).collect(),
        })
    }

    /// Keep one side of every region and drop the markers and any diff3 base.
    ///
    /// Lines outside regions, and the kept lines, retain their original terminators.
    pub fn resolve(&self, text: &str, side: Side) -> Result<String, DomainError> {
        let regions = self.scan(text)?;
        let lines: Vec<&str> = text.split_inclusive('\n').collect();
        let mut resolved = String::with_capacity(text.len());
        let mut next = 0;

        for region in &regions {
            resolved.extend(lines[next..region.start_line - 1].iter().copied());
            resolved.extend(lines[region.span(side)].iter().copied());
            next = region.end_line;
        }
        resolved.extend(lines[next..].iter().copied());

        Ok(resolved)
    }
}

fn out_of_sequence(marker: Marker, line_no: usize) -> DomainError {
    let name = match marker {
        Marker::Start => "<<<<<<<",
        Marker::Base => "|||||||",
        Marker::Separator => "=======",
        Marker::End => ">>>>>>>",
    };
    DomainError::MalformedManifest {
        message: format!("unexpected conflict marker '{name}' at line {line_no}"),
    }
}
