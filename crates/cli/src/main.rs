//! CLI tool for extracting speaker notes from PowerPoint files into Word documents.

use anyhow::{Context, Result};
use clap::Parser;
use notes_core::{output_filename, SpeakerNotes};
use notes_docx::{DocumentBuilder, DocumentOptions, DEFAULT_TITLE};
use notes_pptx::NotesPipeline;
use std::fs::File;
use std::io::{BufReader, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

/// Extract speaker notes from PowerPoint (.pptx) files into Word documents.
#[derive(Parser, Debug)]
#[command(name = "pptx-notes")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Input PowerPoint file(s) (.pptx)
    #[arg(required = true)]
    input: Vec<PathBuf>,

    /// Output directory (default: same as input file)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Print notes as plain text to stdout instead of writing a document
    #[arg(short, long, conflicts_with = "json")]
    print: bool,

    /// Print notes as JSON to stdout instead of writing a document
    #[arg(long)]
    json: bool,

    /// Title paragraph at the top of the document
    #[arg(long, default_value = DEFAULT_TITLE)]
    title: String,

    /// Leave out the title paragraph
    #[arg(long)]
    no_title: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();

    // Initialize logging
    if args.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    }

    let pipeline = NotesPipeline::new();
    let title = (!args.no_title).then(|| args.title.clone());
    let builder = DocumentBuilder::with_options(DocumentOptions::default().with_title(title));

    let mut failures = 0usize;
    for input_path in &args.input {
        if args.verbose {
            eprintln!("Processing: {}", input_path.display());
        }

        if let Err(e) = process_file(input_path, &args, &pipeline, &builder) {
            eprintln!("Error processing {}: {:#}", input_path.display(), e);
            failures += 1;
        }
    }

    if failures > 0 {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

/// Process a single PowerPoint file.
fn process_file(
    input_path: &Path,
    args: &Args,
    pipeline: &NotesPipeline,
    builder: &DocumentBuilder,
) -> Result<()> {
    let file = File::open(input_path)
        .with_context(|| format!("Failed to open {}", input_path.display()))?;
    let reader = BufReader::new(file);

    let filename = input_path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("unknown");

    let notes = pipeline.parse(reader, filename)?;

    if args.verbose {
        eprintln!(
            "  Found {} slides, {} with notes",
            notes.slide_count(),
            notes.annotated_count()
        );
    }

    if args.print {
        print!("{}", format_plain(&notes));
        return Ok(());
    }
    if args.json {
        let json = serde_json::to_string_pretty(&notes).context("Failed to encode notes")?;
        println!("{}", json);
        return Ok(());
    }

    let bytes = builder.build(&notes.slides)?;
    let output_path = get_output_path(input_path, args.output.as_ref())?;
    write_output(&output_path, &bytes)?;

    if args.verbose {
        eprintln!("Written to: {}", output_path.display());
    }

    Ok(())
}

/// Plain-text rendering: a `Slide N` line, the notes, then a blank line.
fn format_plain(notes: &SpeakerNotes) -> String {
    let mut out = String::new();
    for slide in &notes.slides {
        out.push_str(&format!("Slide {}\n", slide.ordinal));
        if slide.has_notes() {
            out.push_str(&slide.text);
            out.push('\n');
        }
        out.push('\n');
    }
    out
}

/// Determine the output path for a processed file.
fn get_output_path(input_path: &Path, output_dir: Option<&PathBuf>) -> Result<PathBuf> {
    let name = input_path
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or("output");

    let file_name = output_filename(name);

    let output_path = match output_dir {
        Some(dir) => {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create output directory: {}", dir.display()))?;
            dir.join(file_name)
        }
        None => {
            if let Some(parent) = input_path.parent() {
                parent.join(file_name)
            } else {
                PathBuf::from(file_name)
            }
        }
    };

    Ok(output_path)
}

/// Write output to a file.
fn write_output(path: &Path, content: &[u8]) -> Result<()> {
    let mut file =
        File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;

    file.write_all(content)
        .with_context(|| format!("Failed to write to {}", path.display()))?;

    log::debug!("Wrote {} bytes to {}", content.len(), path.display());
    Ok(())
}
