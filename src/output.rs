//! Output formatting for query results

use crate::query::{Highlighted, KeywordDisplay, Match, Summary};
use std::io::{self, Write};
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

/// Writes matches and the closing summary to a color-capable stream
pub struct Printer<W> {
    out: W,
}

impl Printer<StandardStream> {
    pub fn stdout(color: bool) -> Self {
        let choice = if color {
            ColorChoice::Auto
        } else {
            ColorChoice::Never
        };
        Self::new(StandardStream::stdout(choice))
    }
}

impl<W: WriteColor> Printer<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// Print one match:
    ///
    /// ```text
    /// ✓ left-pad
    ///    String left pad
    ///    $ pad, string
    /// ```
    pub fn print_match(&mut self, m: &Match) -> io::Result<()> {
        self.out.set_color(ColorSpec::new().set_fg(Some(Color::White)).set_dimmed(true))?;
        write!(self.out, "\u{2713}")?;
        self.out.reset()?;
        write!(self.out, " ")?;
        self.print_highlighted(&m.name, Some(Color::Blue))?;
        writeln!(self.out)?;

        if let Some(description) = &m.description {
            write!(self.out, "   ")?;
            self.print_highlighted(description, None)?;
            writeln!(self.out)?;
        }

        if let Some(keywords) = &m.keywords {
            write!(self.out, "   ")?;
            self.out.set_color(ColorSpec::new().set_fg(Some(Color::White)).set_dimmed(true))?;
            write!(self.out, "$")?;
            self.out.reset()?;
            write!(self.out, " ")?;
            self.print_keywords(keywords)?;
            writeln!(self.out)?;
        }

        Ok(())
    }

    /// Print the match count and, when given, the comparison link
    pub fn print_summary(&mut self, summary: &Summary, link: Option<&str>) -> io::Result<()> {
        writeln!(self.out)?;
        self.out.set_color(ColorSpec::new().set_bold(true))?;
        write!(self.out, "{}", summary.total)?;
        self.out.reset()?;
        writeln!(
            self.out,
            " {} found",
            if summary.total == 1 { "package" } else { "packages" }
        )?;

        if let Some(link) = link {
            self.out.set_color(ColorSpec::new().set_fg(Some(Color::Cyan)).set_underline(true))?;
            write!(self.out, "{}", link)?;
            self.out.reset()?;
            writeln!(self.out)?;
        }

        self.out.flush()
    }

    /// Text in `base` color with the highlighted span in green
    fn print_highlighted(&mut self, text: &Highlighted, base: Option<Color>) -> io::Result<()> {
        let (before, hit, after) = text.parts();
        let mut base_spec = ColorSpec::new();
        base_spec.set_fg(base);

        self.out.set_color(&base_spec)?;
        write!(self.out, "{}", before)?;
        if !hit.is_empty() {
            self.out.set_color(ColorSpec::new().set_fg(Some(Color::Green)))?;
            write!(self.out, "{}", hit)?;
            self.out.set_color(&base_spec)?;
        }
        write!(self.out, "{}", after)?;
        self.out.reset()
    }

    fn print_keywords(&mut self, keywords: &[KeywordDisplay]) -> io::Result<()> {
        for (i, k) in keywords.iter().enumerate() {
            if i > 0 {
                write!(self.out, ", ")?;
            }
            if k.matched {
                self.out.set_color(ColorSpec::new().set_fg(Some(Color::Green)))?;
                write!(self.out, "{}", k.keyword)?;
                self.out.reset()?;
            } else {
                write!(self.out, "{}", k.keyword)?;
            }
        }
        Ok(())
    }
}
