use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use tokio::io::AsyncReadExt;
use tracing::{info, Level};

use philoseg::{render, SegmentOptions, Segmenter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    /// `id<TAB>sentence` per line
    Text,
    /// JSON array of sentence strings
    Json,
    /// One `<s>` element per sentence
    Xml,
}

#[derive(Parser, Debug)]
#[command(name = "philoseg")]
#[command(about = "Sentence segmenter for Latin and Greek philological texts")]
#[command(version)]
struct Args {
    /// Text file to segment; reads stdin when omitted
    input: Option<PathBuf>,

    /// Do not number sentences
    #[arg(long)]
    no_indexing: bool,

    /// Consecutive newlines that end a sentence on their own
    #[arg(long, default_value_t = 2)]
    newline_boundary: usize,

    /// Treat the input as XML markup
    #[arg(long)]
    xml: bool,

    /// Output format
    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Log debug events to stderr
    #[arg(long)]
    verbose: bool,
}

impl Args {
    fn options(&self) -> SegmentOptions {
        SegmentOptions::default()
            .with_indexing(!self.no_indexing)
            .with_newline_boundary(self.newline_boundary)
            .with_xml(self.xml)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // WHY: structured JSON logs go to stderr so stdout carries only sentences
    tracing_subscriber::fmt()
        .with_target(false)
        .with_max_level(if args.verbose { Level::DEBUG } else { Level::WARN })
        .with_writer(std::io::stderr)
        .json()
        .init();

    info!(?args, "Parsed CLI arguments");

    if args.newline_boundary == 0 {
        anyhow::bail!("--newline-boundary must be at least 1");
    }

    let text = read_input(args.input.as_ref()).await?;
    let segmenter = Segmenter::new()?;
    let sentences = segmenter.segment(&text, &args.options())?;

    info!(sentences = sentences.len(), "Segmentation finished");

    let output = match args.format {
        Format::Text => render::to_tsv(&sentences),
        Format::Json => render::to_json(&sentences)? + "\n",
        Format::Xml => render::to_xml(&sentences) + "\n",
    };
    print!("{output}");

    Ok(())
}

async fn read_input(path: Option<&PathBuf>) -> Result<String> {
    match path {
        Some(path) => tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read {}", path.display())),
        None => {
            let mut text = String::new();
            tokio::io::stdin()
                .read_to_string(&mut text)
                .await
                .context("Failed to read stdin")?;
            Ok(text)
        }
    }
}
