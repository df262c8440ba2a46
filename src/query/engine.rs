use crate::error::{Error, Result};
use crate::index::encoding::decode_line;
use crate::query::filter::{Filters, Match};
use crate::query::trends::trends_link;
use crate::utils::AppConfig;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Lines};
use std::path::{Path, PathBuf};

/// Totals of a finished query
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Summary {
    pub total: usize,
    /// Names of every match, in index order
    pub names: Vec<String>,
}

impl Summary {
    pub fn trends_link(&self, config: &AppConfig) -> Option<String> {
        trends_link(&self.names, config)
    }
}

/// One pass over an index, yielding matches in file order.
///
/// The run is single-use: once the iterator is exhausted, [`QueryRun::finish`]
/// returns the summary.
pub struct QueryRun<'f, R> {
    lines: Lines<R>,
    filters: &'f Filters,
    source: PathBuf,
    summary: Summary,
}

impl<'f> QueryRun<'f, BufReader<File>> {
    /// Open the index at `path`; a missing file is [`Error::IndexNotFound`]
    pub fn open(path: &Path, filters: &'f Filters) -> Result<Self> {
        let file = File::open(path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => Error::IndexNotFound(path.to_path_buf()),
            _ => Error::io(path, e),
        })?;

        Ok(Self::from_reader(BufReader::new(file), path, filters))
    }
}

impl<'f, R: BufRead> QueryRun<'f, R> {
    pub fn from_reader(reader: R, source: &Path, filters: &'f Filters) -> Self {
        Self {
            lines: reader.lines(),
            filters,
            source: source.to_path_buf(),
            summary: Summary::default(),
        }
    }

    /// Matches so far
    pub fn total(&self) -> usize {
        self.summary.total
    }

    /// Consume any remaining lines and return the summary
    pub fn finish(mut self) -> Result<Summary> {
        for m in self.by_ref() {
            m?;
        }
        Ok(self.summary)
    }
}

impl<R: BufRead> Iterator for QueryRun<'_, R> {
    type Item = Result<Match>;

    fn next(&mut self) -> Option<Self::Item> {
        for line in self.lines.by_ref() {
            let line = match line {
                Ok(line) => line,
                Err(e) => return Some(Err(Error::io(&self.source, e))),
            };

            if let Some(m) = self.filters.evaluate(decode_line(&line)) {
                self.summary.total += 1;
                self.summary.names.push(m.name.text.clone());
                return Some(Ok(m));
            }
        }
        None
    }
}

/// Open the index at `path` and stream matches for `filters`
pub fn query_index<'f>(path: &Path, filters: &'f Filters) -> Result<QueryRun<'f, BufReader<File>>> {
    QueryRun::open(path, filters)
}
