//! Line predicates and their highlighting.
//!
//! Active predicates are ANDed. They are evaluated in a fixed order (exact
//! name, keywords, description, name substring) and a line is dropped at the
//! first one that fails.

use crate::index::encoding::IndexLine;
use std::ops::Range;

/// Filters parsed from the command line. Empty values are inactive.
#[derive(Debug, Clone, Default)]
pub struct Filters {
    /// Name must equal this exactly
    pub exact: Option<String>,
    /// Every keyword must be present in the line's keyword list
    pub keywords: Vec<String>,
    /// Description must contain this substring
    pub description: Option<String>,
    /// Name must contain this substring
    pub name: Option<String>,
    /// Show descriptions and keyword lists for every match
    pub verbose: bool,
}

fn active(value: Option<&str>) -> Option<String> {
    value.filter(|v| !v.is_empty()).map(str::to_string)
}

impl Filters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn exact(mut self, value: Option<&str>) -> Self {
        self.exact = active(value);
        self
    }

    /// Comma separated list of required keywords
    pub fn keywords(mut self, csv: Option<&str>) -> Self {
        self.keywords = match active(csv) {
            Some(csv) => csv.split(',').map(str::to_string).collect(),
            None => Vec::new(),
        };
        self
    }

    pub fn description(mut self, value: Option<&str>) -> Self {
        self.description = active(value);
        self
    }

    pub fn name(mut self, value: Option<&str>) -> Self {
        self.name = active(value);
        self
    }

    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Apply every active predicate to a decoded line
    pub fn evaluate(&self, line: IndexLine<'_>) -> Option<Match> {
        if let Some(exact) = &self.exact {
            if line.name != exact {
                return None;
            }
        }

        let mut keywords = None;
        if !self.keywords.is_empty() {
            let mut listed: Vec<KeywordDisplay> = line
                .keywords()
                .map(|k| KeywordDisplay {
                    keyword: k.to_string(),
                    matched: false,
                })
                .collect();

            for required in &self.keywords {
                let mut found = false;
                for entry in listed.iter_mut().filter(|e| &e.keyword == required) {
                    entry.matched = true;
                    found = true;
                }
                if !found {
                    return None;
                }
            }
            keywords = Some(listed);
        } else if self.verbose && !line.keywords.is_empty() {
            keywords = Some(
                line.keywords()
                    .map(|k| KeywordDisplay {
                        keyword: k.to_string(),
                        matched: false,
                    })
                    .collect(),
            );
        }

        let mut description_span = None;
        if let Some(needle) = &self.description {
            let start = line.description.find(needle.as_str())?;
            description_span = Some(start..start + needle.len());
        }

        let mut name_span = None;
        if let Some(needle) = &self.name {
            let start = line.name.find(needle.as_str())?;
            name_span = Some(start..start + needle.len());
        }

        let description = (self.verbose && !line.description.is_empty()).then(|| Highlighted {
            text: line.description.to_string(),
            span: description_span,
        });

        Some(Match {
            name: Highlighted {
                text: line.name.to_string(),
                span: name_span,
            },
            description,
            keywords,
        })
    }
}

/// Text with an optional highlighted byte range
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Highlighted {
    pub text: String,
    pub span: Option<Range<usize>>,
}

impl Highlighted {
    /// Split into (before, highlighted, after)
    pub fn parts(&self) -> (&str, &str, &str) {
        match &self.span {
            Some(span) => (
                &self.text[..span.start],
                &self.text[span.clone()],
                &self.text[span.end..],
            ),
            None => (&self.text, "", ""),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordDisplay {
    pub keyword: String,
    pub matched: bool,
}

/// A line that passed every active predicate, ready to print
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Match {
    pub name: Highlighted,
    /// Present in verbose mode
    pub description: Option<Highlighted>,
    /// Present in verbose mode or when the keyword filter is active
    pub keywords: Option<Vec<KeywordDisplay>>,
}
