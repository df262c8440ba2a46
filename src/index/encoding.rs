//! Line codec for the compacted index.
//!
//! Each package is one line `name |description |keywords`. Encoding escapes
//! every `|` as `\|` and strips CR/LF, so the two-byte delimiter `" |"` can
//! only appear between fields. Decoding splits on that delimiter and does not
//! unescape: an escaped pipe is shown as `\|`.

use crate::index::types::{FIELD_DELIMITER, KEYWORD_SEPARATOR, PackageRecord};
use memchr::memmem;

/// Escape one field value for the index
pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '|' => out.push_str("\\|"),
            '\n' | '\r' => {}
            c => out.push(c),
        }
    }
    out
}

/// Encode a record as one index line, without the trailing newline
pub fn encode_record(record: &PackageRecord) -> String {
    let mut line = escape(&record.name);
    line.push_str(FIELD_DELIMITER);
    line.push_str(&escape(&record.description));
    line.push_str(FIELD_DELIMITER);
    line.push_str(&escape(&record.keyword_field()));
    line
}

/// A decoded index line, borrowing from the line buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexLine<'a> {
    pub name: &'a str,
    pub description: &'a str,
    /// Raw comma-joined keyword field
    pub keywords: &'a str,
}

impl<'a> IndexLine<'a> {
    /// Keywords in stored order. An empty field yields one empty keyword.
    pub fn keywords(self) -> impl Iterator<Item = &'a str> {
        self.keywords.split(KEYWORD_SEPARATOR)
    }

    pub fn to_record(&self) -> PackageRecord {
        PackageRecord {
            name: self.name.to_string(),
            description: self.description.to_string(),
            keywords: if self.keywords.is_empty() {
                Vec::new()
            } else {
                self.keywords().map(str::to_string).collect()
            },
        }
    }
}

/// Split a line into its three fields.
///
/// Missing trailing fields decode as empty; anything after a third delimiter
/// is ignored.
pub fn decode_line(line: &str) -> IndexLine<'_> {
    let delim = FIELD_DELIMITER.as_bytes();
    let mut fields = [""; 3];
    let mut start = 0;

    for field in fields.iter_mut() {
        if start > line.len() {
            break;
        }
        match memmem::find(&line.as_bytes()[start..], delim) {
            Some(pos) => {
                *field = &line[start..start + pos];
                start += pos + delim.len();
            }
            None => {
                *field = &line[start..];
                start = line.len() + 1;
            }
        }
    }

    IndexLine {
        name: fields[0],
        description: fields[1],
        keywords: fields[2],
    }
}
