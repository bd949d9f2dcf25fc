//! CLI tool for turning a deep research report into a themed deck.

use anyhow::{Context, Result};
use clap::Parser;
use deck_core::{build_deck, parse_callouts, theme_path, Callout, DeckOptions, Error};
use deck_pptx::{PptxReader, PptxWriter};
use std::collections::HashMap;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Build a 13-slide PowerPoint deck from a deep research markdown report.
#[derive(Parser, Debug)]
#[command(name = "research-deck")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Theme id, resolved under the user profile's theme-factory directory
    #[arg(long, default_value = "golden-hour")]
    theme: String,

    /// Theme markdown file (overrides --theme lookup)
    #[arg(long)]
    theme_file: Option<PathBuf>,

    /// Research report markdown
    #[arg(short, long, default_value = "Deep-Research.md")]
    input: PathBuf,

    /// Output .pptx (default: input with .pptx extension)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// JSON file of analysis callouts keyed by analysis id
    #[arg(long)]
    callouts: Option<PathBuf>,

    /// Footer label
    #[arg(long, default_value = "Deep Research")]
    footer: String,

    /// Tagline shown under the title
    #[arg(long)]
    tagline: Option<String>,

    /// Language tag for all text runs
    #[arg(long, default_value = "en-US")]
    lang: String,

    /// Number of analysis slides
    #[arg(long, default_value = "5")]
    analysis_slots: usize,

    /// Print the deck description as JSON instead of writing a file
    #[arg(long)]
    json: bool,

    /// Read the written file back and check its slides
    #[arg(long)]
    verify: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let filter = if args.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(filter)).init();

    if !args.input.exists() {
        return Err(Error::MissingDocument(args.input.display().to_string()).into());
    }
    let document = fs::read_to_string(&args.input)
        .with_context(|| format!("Failed to read {}", args.input.display()))?;

    let theme_file = match &args.theme_file {
        Some(path) => path.clone(),
        None => {
            let profile = profile_dir(|key| std::env::var_os(key))
                .ok_or_else(|| Error::MissingTheme("neither USERPROFILE nor HOME is set".into()))?;
            theme_path(&profile, &args.theme)
        }
    };
    log::debug!("Theme file: {}", theme_file.display());
    if !theme_file.exists() {
        return Err(Error::MissingTheme(theme_file.display().to_string()).into());
    }
    let theme = fs::read_to_string(&theme_file)
        .with_context(|| format!("Failed to read {}", theme_file.display()))?;

    let options = deck_options(&args)?;
    let deck = build_deck(&document, &theme, &args.theme, &options);

    if args.json {
        let stdout = std::io::stdout();
        let mut out = stdout.lock();
        serde_json::to_writer_pretty(&mut out, &deck).context("Failed to serialize deck")?;
        writeln!(out)?;
        return Ok(());
    }

    let output_path = output_path(&args.input, args.output.as_deref());
    let file = File::create(&output_path)
        .with_context(|| format!("Failed to create {}", output_path.display()))?;
    let mut sink = PptxWriter::new()
        .write(&deck, BufWriter::new(file))
        .with_context(|| format!("Failed to write {}", output_path.display()))?;
    sink.flush()
        .with_context(|| format!("Failed to write {}", output_path.display()))?;
    drop(sink);

    if args.verify {
        verify(&output_path, deck.slides.len())?;
    }

    println!("Generated: {}", output_path.display());
    Ok(())
}

/// Turn CLI flags into build options.
fn deck_options(args: &Args) -> Result<DeckOptions> {
    let mut options = DeckOptions::new()
        .with_footer_label(&args.footer)
        .with_language(&args.lang)
        .with_analysis_slots(args.analysis_slots);
    if let Some(tagline) = &args.tagline {
        options = options.with_tagline(tagline);
    }
    if let Some(path) = &args.callouts {
        options = options.with_callouts(load_callouts(path)?);
    }
    Ok(options)
}

fn load_callouts(path: &Path) -> Result<HashMap<String, Callout>> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let callouts = parse_callouts(&json).with_context(|| format!("In {}", path.display()))?;
    log::debug!("Loaded {} callouts", callouts.len());
    Ok(callouts)
}

/// Re-open the written package and check that every slide made it.
fn verify(path: &Path, expected: usize) -> Result<()> {
    let file = File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
    let slides = PptxReader::new()
        .read(BufReader::new(file))
        .with_context(|| format!("Failed to read back {}", path.display()))?;

    if slides.len() != expected {
        anyhow::bail!(
            "{} has {} slides, expected {}",
            path.display(),
            slides.len(),
            expected
        );
    }
    for slide in &slides {
        log::info!(
            "Slide {}: {}",
            slide.number,
            slide.lines.first().map(String::as_str).unwrap_or("")
        );
    }
    eprintln!("Verified {} slides", slides.len());
    Ok(())
}

/// User profile directory: `USERPROFILE`, then `HOME`.
fn profile_dir<F>(var: F) -> Option<PathBuf>
where
    F: Fn(&str) -> Option<std::ffi::OsString>,
{
    ["USERPROFILE", "HOME"]
        .into_iter()
        .filter_map(|key| var(key))
        .find(|value| !value.is_empty())
        .map(PathBuf::from)
}

fn output_path(input: &Path, output: Option<&Path>) -> PathBuf {
    match output {
        Some(path) => path.to_path_buf(),
        None => input.with_extension("pptx"),
    }
}
