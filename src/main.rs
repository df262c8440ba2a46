use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use npm_locate::fetch::{HttpRegistry, NoProgress, ProgressSink, TerminalProgress, fetch};
use npm_locate::index::{build_from_cache, build_index};
use npm_locate::output::Printer;
use npm_locate::query::{Filters, query_index};
use npm_locate::utils::{AppConfig, CacheDir};
use npm_locate::{Error, ErrorKind};
use std::io::{self, IsTerminal, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};
use tracing::error;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "npm-locate")]
#[command(about = "Locate npm package.")]
struct Cli {
    /// name filter
    #[arg(short = 'n', long)]
    name: Option<String>,

    /// name filter(match)
    #[arg(short = 'N', long = "match")]
    exact: Option<String>,

    /// description filter
    #[arg(short = 'd', long)]
    description: Option<String>,

    /// keywords filter (comma separated, all required)
    #[arg(short = 'k', long)]
    keywords: Option<String>,

    /// Update database (download and rebuild)
    #[arg(long)]
    update: bool,

    /// Build database from the last download
    #[arg(long)]
    build: bool,

    /// Show descriptions and keywords
    #[arg(short, long)]
    verbose: bool,

    /// Print an npmtrends comparison link for small result sets
    #[arg(long)]
    trends: bool,

    /// Cache directory (defaults to the platform cache dir)
    #[arg(long, value_name = "DIR")]
    cache_dir: Option<PathBuf>,

    /// When to use colors
    #[arg(long, value_enum, default_value_t = ColorMode::Auto)]
    color: ColorMode,
}

#[derive(Clone, Copy, ValueEnum)]
enum ColorMode {
    Auto,
    Always,
    Never,
}

impl ColorMode {
    fn enabled(self) -> bool {
        match self {
            ColorMode::Auto => io::stdout().is_terminal(),
            ColorMode::Always => true,
            ColorMode::Never => false,
        }
    }
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing();

    let cache = CacheDir::resolve(cli.cache_dir.clone())?;
    cache.ensure()?;
    let config = AppConfig::load(&cache)?;

    if cli.update || cli.build {
        let outcome = if cli.update {
            update(&cache, &config)
        } else {
            build(&cache)
        };

        return Ok(match outcome {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                error!("{:?}", e);
                ExitCode::FAILURE
            }
        });
    }

    match run_query(&cli, &cache, &config) {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(e) if is_missing_index(&e) => {
            error!("{:#}", e);
            print_missing_index_hint(cli.color.enabled())?;
            Ok(ExitCode::FAILURE)
        }
        Err(e) => Err(e),
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("npm_locate=info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .without_time()
        .try_init();
}

/// Download the bulk document, then rebuild the index from it
fn update(cache: &CacheDir, config: &AppConfig) -> Result<()> {
    let registry = HttpRegistry::new(&config.registry_url);
    let mut progress: Box<dyn ProgressSink> = if io::stderr().is_terminal() {
        Box::new(TerminalProgress::new())
    } else {
        Box::new(NoProgress)
    };

    let source = fetch(&registry, cache, progress.as_mut())
        .with_context(|| format!("Failed to download {}", config.registry_url))?;
    build_index(&source, &cache.index_path()).context("Failed to build the index")?;
    Ok(())
}

fn build(cache: &CacheDir) -> Result<()> {
    build_from_cache(cache).context("Failed to build the index")?;
    Ok(())
}

fn run_query(cli: &Cli, cache: &CacheDir, config: &AppConfig) -> Result<()> {
    let filters = Filters::new()
        .exact(cli.exact.as_deref())
        .keywords(cli.keywords.as_deref())
        .description(cli.description.as_deref())
        .name(cli.name.as_deref())
        .verbose(cli.verbose);

    let mut run = query_index(&cache.index_path(), &filters)?;
    let mut printer = Printer::stdout(cli.color.enabled());

    for m in run.by_ref() {
        printer.print_match(&m?)?;
    }

    let summary = run.finish()?;
    let link = if cli.trends {
        summary.trends_link(config)
    } else {
        None
    };
    printer.print_summary(&summary, link.as_deref())?;

    Ok(())
}

fn is_missing_index(err: &anyhow::Error) -> bool {
    err.downcast_ref::<Error>()
        .is_some_and(|e| e.kind() == ErrorKind::NotFound)
}

fn print_missing_index_hint(color: bool) -> io::Result<()> {
    let choice = if color {
        ColorChoice::Auto
    } else {
        ColorChoice::Never
    };
    let mut stderr = StandardStream::stderr(choice);

    stderr.set_color(ColorSpec::new().set_fg(Some(Color::Yellow)))?;
    writeln!(stderr, "index.db not found.")?;
    writeln!(stderr, " Please run `npm-locate --update`")?;
    stderr.reset()
}
