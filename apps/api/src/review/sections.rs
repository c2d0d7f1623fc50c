//! Section Segmenter — splits resume text into named sections by header lines.

use std::fmt;

use serde::{Serialize, Serializer};

/// Closed header vocabulary plus the catch-all for text before any header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SectionName {
    Other,
    Summary,
    Experience,
    Skills,
    Projects,
    Education,
}

impl SectionName {
    /// Every recognised header, in the order suggestions are reported.
    pub const HEADERS: [SectionName; 5] = [
        SectionName::Summary,
        SectionName::Experience,
        SectionName::Skills,
        SectionName::Projects,
        SectionName::Education,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SectionName::Other => "OTHER",
            SectionName::Summary => "SUMMARY",
            SectionName::Experience => "EXPERIENCE",
            SectionName::Skills => "SKILLS",
            SectionName::Projects => "PROJECTS",
            SectionName::Education => "EDUCATION",
        }
    }

    /// Matches a line against the header vocabulary: trimmed, case-insensitive,
    /// exact. "Other" is never a header.
    pub fn from_header(line: &str) -> Option<Self> {
        let header = line.trim().to_uppercase();
        Self::HEADERS
            .iter()
            .copied()
            .find(|name| name.as_str() == header)
    }
}

impl fmt::Display for SectionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for SectionName {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Ordered section name → accumulated text, in first-encounter order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SectionMap {
    entries: Vec<(SectionName, String)>,
}

impl SectionMap {
    pub fn get(&self, name: SectionName) -> Option<&str> {
        self.entries
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, text)| text.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (SectionName, &str)> {
        self.entries.iter().map(|(n, text)| (*n, text.as_str()))
    }

    pub fn names(&self) -> Vec<SectionName> {
        self.entries.iter().map(|(n, _)| *n).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Index of the accumulator for `name`, creating an empty one on first sight.
    fn slot(&mut self, name: SectionName) -> usize {
        match self.entries.iter().position(|(n, _)| *n == name) {
            Some(idx) => idx,
            None => {
                self.entries.push((name, String::new()));
                self.entries.len() - 1
            }
        }
    }
}

/// Splits resume text into sections.
///
/// Header lines switch the cursor and are not stored; every other line lands in
/// exactly one section with a trailing newline. Lines before the first header
/// go to `Other`.
///
/// A header seen twice keeps appending to the section it opened first; earlier
/// lines under that header are not reset, so no input line is dropped.
pub fn split_sections(text: &str) -> SectionMap {
    let mut map = SectionMap::default();
    let mut current = SectionName::Other;
    let mut current_slot: Option<usize> = None;

    for line in text.lines() {
        if let Some(header) = SectionName::from_header(line) {
            current = header;
            current_slot = Some(map.slot(header));
            continue;
        }

        let idx = match current_slot {
            Some(idx) => idx,
            None => {
                let idx = map.slot(current);
                current_slot = Some(idx);
                idx
            }
        };
        let accumulator = &mut map.entries[idx].1;
        accumulator.push_str(line);
        accumulator.push('\n');
    }

    map
}
