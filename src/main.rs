//! ranobe - convert chapter files into a FictionBook e-book

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use log::{debug, info};

use ranobe::export::{Fb2Config, Fb2Exporter, MarkNesting};
use ranobe::import::{ChapterContent, ParseOptions, parse_html_file};
use ranobe::{Book, Error, Format, Metadata, Node};

#[derive(Parser)]
#[command(name = "ranobe")]
#[command(version, about = "Convert HTML/JSON chapters to FictionBook", long_about = None)]
#[command(after_help = "EXAMPLES:
    ranobe -o book.fb2 ch1.html ch2.html         One chapter per file
    ranobe --title Novel -o novel.fb2 *.json     Structured chapter payloads")]
struct Cli {
    /// Chapter files in reading order (.json payloads, anything else is HTML)
    #[arg(value_name = "INPUT", required = true)]
    inputs: Vec<PathBuf>,

    /// Output file (.fb2)
    #[arg(short, long, value_name = "OUTPUT")]
    output: PathBuf,

    /// Book title (defaults to the output file name)
    #[arg(long)]
    title: Option<String>,

    /// Author name
    #[arg(long)]
    author: Option<String>,

    /// Language code, e.g. "ru"
    #[arg(long)]
    lang: Option<String>,

    /// FB2 genre code, e.g. "sf_fantasy"
    #[arg(long)]
    genre: Option<String>,

    /// Publication date (YYYY-MM-DD)
    #[arg(long)]
    date: Option<String>,

    /// Nest stacked marks with the first mark innermost
    #[arg(long)]
    reversed_marks: bool,

    /// Suppress output messages
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Show debug output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = if cli.quiet {
        "error"
    } else if cli.verbose {
        "debug"
    } else {
        "info"
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    match convert(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn convert(cli: &Cli) -> Result<(), String> {
    match Format::from_path(&cli.output) {
        Some(Format::Fb2) => {}
        None => {
            return Err(format!(
                "unsupported output format: {} (expected .{})",
                cli.output.display(),
                Format::Fb2.extension()
            ));
        }
    }

    let title = cli.title.clone().unwrap_or_else(|| {
        cli.output
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default()
    });
    let mut metadata = Metadata::new(title);
    if let Some(author) = &cli.author {
        metadata = metadata.with_author(author.as_str());
    }
    if let Some(lang) = &cli.lang {
        metadata = metadata.with_language(lang.as_str());
    }
    if let Some(date) = &cli.date {
        metadata = metadata.with_date(date.as_str());
    }

    let mut book = Book::new().with_metadata(metadata);
    for input in &cli.inputs {
        let document = load_chapter(input).map_err(|e| format!("{}: {e}", input.display()))?;
        let chapter_title = input
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        book.add_chapter(chapter_title, document);
    }

    let config = Fb2Config {
        nesting: if cli.reversed_marks {
            MarkNesting::Reversed
        } else {
            MarkNesting::Source
        },
        genre: cli.genre.clone(),
        language: None,
    };
    Fb2Exporter::new()
        .with_config(config)
        .export(&book, &cli.output)
        .map_err(|e| e.to_string())?;

    info!("{} chapters -> {}", book.chapters.len(), cli.output.display());
    Ok(())
}

fn load_chapter(path: &Path) -> ranobe::Result<Node> {
    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    let mut document = if is_json {
        ChapterContent::from_json_file(path)?.into_document()?
    } else {
        parse_html_file(path, ParseOptions::default().with_unwrap_container(true))?
    };

    let base = path.parent().unwrap_or(Path::new("."));
    let count = document.localize_images(&mut |_: usize, locator: &str| resolve_local(base, locator))?;
    debug!("{}: {count} images", path.display());
    Ok(document)
}

/// Resolve an image source relative to the chapter file's directory.
fn resolve_local(base: &Path, locator: &str) -> ranobe::Result<String> {
    if locator.starts_with("http://") || locator.starts_with("https://") {
        return Err(Error::ImageResolution {
            locator: locator.to_string(),
            reason: "remote images must be downloaded first".to_string(),
        });
    }
    let path = base.join(locator.strip_prefix("file://").unwrap_or(locator));
    if !path.is_file() {
        return Err(Error::ImageResolution {
            locator: locator.to_string(),
            reason: format!("{} not found", path.display()),
        });
    }
    Ok(path.to_string_lossy().into_owned())
}
