//! Batch commands: fan many files out against the API and aggregate
//! outcomes into JSONL or a one-line summary.

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Args, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};

use aiornot_core::types::enums::{ImageAnalysisType, VideoAnalysisType};
use aiornot_core::{
    discovery, BatchOptions, BatchSummary, ImageOptions, MediaInput, ProgressCallback,
    TextOptions, VideoOptions,
};

use super::output::{self, BatchFormat};

/// Arguments for `aiornot batch`.
#[derive(Args, Debug)]
pub struct BatchArgs {
    #[command(subcommand)]
    pub command: BatchCommand,
}

/// Batch subcommands, one per content kind.
#[derive(Subcommand, Debug)]
pub enum BatchCommand {
    /// Batch process images
    Image(BatchImageArgs),

    /// Batch process videos
    Video(BatchVideoArgs),

    /// Batch process voice/speech audio files
    Voice(BatchMediaArgs),

    /// Batch process music audio files
    Music(BatchMediaArgs),

    /// Batch process text files
    Text(BatchTextArgs),
}

/// Input selection shared by the media batch commands. Exactly one of
/// positional files, `--csv`, or `--dir` must be used.
#[derive(Args, Debug, Clone)]
pub struct BatchInputArgs {
    /// Files to process
    pub files: Vec<PathBuf>,

    /// Read file paths from a CSV column
    #[arg(long)]
    pub csv: Option<PathBuf>,

    /// CSV column name holding file paths
    #[arg(long, default_value = "file_path")]
    pub key: String,

    /// Base directory prepended to CSV paths
    #[arg(long)]
    pub base_dir: Option<PathBuf>,

    /// Process all matching files in a directory
    #[arg(long)]
    pub dir: Option<PathBuf>,

    /// Include subdirectories (with --dir)
    #[arg(short, long)]
    pub recursive: bool,
}

/// Output and scheduling flags shared by all batch commands.
#[derive(Args, Debug, Clone)]
pub struct BatchOutputArgs {
    /// Output format
    #[arg(long, value_enum, default_value_t = BatchFormat::Jsonl)]
    pub format: BatchFormat,

    /// Write output to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Show a progress bar (default: when stderr is a terminal)
    #[arg(long, overrides_with = "no_progress")]
    pub progress: bool,

    /// Never show a progress bar
    #[arg(long)]
    pub no_progress: bool,

    /// Max concurrent requests
    #[arg(short, long)]
    pub concurrency: Option<usize>,

    /// Stop on the first error instead of recording it
    #[arg(long)]
    pub fail_fast: bool,
}

/// Arguments for `aiornot batch image`.
#[derive(Args, Debug)]
pub struct BatchImageArgs {
    #[command(flatten)]
    pub input: BatchInputArgs,

    #[command(flatten)]
    pub out: BatchOutputArgs,

    /// Only run these analysis types (repeatable)
    #[arg(long = "only", value_parser = |s: &str| s.parse::<ImageAnalysisType>())]
    pub only: Vec<ImageAnalysisType>,

    /// Exclude these analysis types (repeatable)
    #[arg(long = "excluding", value_parser = |s: &str| s.parse::<ImageAnalysisType>())]
    pub excluding: Vec<ImageAnalysisType>,
}

/// Arguments for `aiornot batch video`.
#[derive(Args, Debug)]
pub struct BatchVideoArgs {
    #[command(flatten)]
    pub input: BatchInputArgs,

    #[command(flatten)]
    pub out: BatchOutputArgs,

    /// Only run these analysis types (repeatable)
    #[arg(long = "only", value_parser = |s: &str| s.parse::<VideoAnalysisType>())]
    pub only: Vec<VideoAnalysisType>,

    /// Exclude these analysis types (repeatable)
    #[arg(long = "excluding", value_parser = |s: &str| s.parse::<VideoAnalysisType>())]
    pub excluding: Vec<VideoAnalysisType>,
}

/// Arguments for `aiornot batch voice|music`.
#[derive(Args, Debug)]
pub struct BatchMediaArgs {
    #[command(flatten)]
    pub input: BatchInputArgs,

    #[command(flatten)]
    pub out: BatchOutputArgs,
}

/// Arguments for `aiornot batch text`. Reads the content of each file
/// and submits it; `--dir` is intentionally absent.
#[derive(Args, Debug)]
pub struct BatchTextArgs {
    /// Text files to process
    pub files: Vec<PathBuf>,

    /// Read file paths from a CSV column
    #[arg(long)]
    pub csv: Option<PathBuf>,

    /// CSV column name holding file paths
    #[arg(long, default_value = "file_path")]
    pub key: String,

    /// Base directory prepended to CSV paths
    #[arg(long)]
    pub base_dir: Option<PathBuf>,

    /// Include block-level annotations
    #[arg(short, long)]
    pub annotations: bool,

    #[command(flatten)]
    pub out: BatchOutputArgs,
}

pub async fn execute(args: BatchArgs) -> anyhow::Result<()> {
    match args.command {
        BatchCommand::Image(args) => image(args).await,
        BatchCommand::Video(args) => video(args).await,
        BatchCommand::Voice(args) => voice(args).await,
        BatchCommand::Music(args) => music(args).await,
        BatchCommand::Text(args) => text(args).await,
    }
}

async fn image(args: BatchImageArgs) -> anyhow::Result<()> {
    let files = collect_inputs(&args.input, discovery::IMAGE_EXTENSIONS)?;
    let client = super::client()?;
    let options = ImageOptions {
        only: args.only,
        excluding: args.excluding,
        external_id: None,
    };

    let (on_progress, bar) = progress_bar(&args.out, files.len());
    let result = client
        .image_report_batch(to_media(files), &options, &batch_options(&args.out, on_progress))
        .await;
    if let Some(bar) = bar {
        bar.finish_and_clear();
    }

    finish(&result?, &args.out)
}

async fn video(args: BatchVideoArgs) -> anyhow::Result<()> {
    let files = collect_inputs(&args.input, discovery::VIDEO_EXTENSIONS)?;
    let client = super::client()?;
    let options = VideoOptions {
        only: args.only,
        excluding: args.excluding,
        external_id: None,
    };

    let (on_progress, bar) = progress_bar(&args.out, files.len());
    let result = client
        .video_report_batch(to_media(files), &options, &batch_options(&args.out, on_progress))
        .await;
    if let Some(bar) = bar {
        bar.finish_and_clear();
    }

    finish(&result?, &args.out)
}

async fn voice(args: BatchMediaArgs) -> anyhow::Result<()> {
    let files = collect_inputs(&args.input, discovery::AUDIO_EXTENSIONS)?;
    let client = super::client()?;

    let (on_progress, bar) = progress_bar(&args.out, files.len());
    let result = client
        .voice_report_batch(to_media(files), &batch_options(&args.out, on_progress))
        .await;
    if let Some(bar) = bar {
        bar.finish_and_clear();
    }

    finish(&result?, &args.out)
}

async fn music(args: BatchMediaArgs) -> anyhow::Result<()> {
    let files = collect_inputs(&args.input, discovery::AUDIO_EXTENSIONS)?;
    let client = super::client()?;

    let (on_progress, bar) = progress_bar(&args.out, files.len());
    let result = client
        .music_report_batch(to_media(files), &batch_options(&args.out, on_progress))
        .await;
    if let Some(bar) = bar {
        bar.finish_and_clear();
    }

    finish(&result?, &args.out)
}

async fn text(args: BatchTextArgs) -> anyhow::Result<()> {
    let file_list = collect_text_inputs(&args)?;

    // Read content up front; unreadable files are skipped with a warning
    // and the surviving texts keep their originating paths for relabeling.
    let mut texts = Vec::new();
    let mut origins = Vec::new();
    for path in file_list {
        match std::fs::read_to_string(&path) {
            Ok(content) => {
                texts.push(content);
                origins.push(path);
            }
            Err(e) => {
                tracing::warn!("Could not read {}: {e}", path.display());
            }
        }
    }
    if texts.is_empty() {
        anyhow::bail!("No text content could be read from files");
    }

    let client = super::client()?;
    let options = TextOptions {
        include_annotations: args.annotations,
        external_id: None,
    };

    let (on_progress, bar) = progress_bar(&args.out, texts.len());
    let result = client
        .text_report_batch(texts, &options, &batch_options(&args.out, on_progress))
        .await;
    if let Some(bar) = bar {
        bar.finish_and_clear();
    }
    let mut summary = result?;

    // Show the source path rather than the raw text in each record
    for (result, origin) in summary.results_mut().iter_mut().zip(&origins) {
        result.input = origin.display().to_string();
    }

    finish(&summary, &args.out)
}

/// Resolve the input source for media batches. Exactly one of files,
/// `--csv`, or `--dir` must be given, and it must yield something.
fn collect_inputs(input: &BatchInputArgs, extensions: &[&str]) -> anyhow::Result<Vec<PathBuf>> {
    let sources = [
        !input.files.is_empty(),
        input.csv.is_some(),
        input.dir.is_some(),
    ]
    .iter()
    .filter(|used| **used)
    .count();
    if sources == 0 {
        anyhow::bail!("No input specified. Provide files, --csv, or --dir");
    }
    if sources > 1 {
        anyhow::bail!("Multiple input sources specified. Use only one of: files, --csv, --dir");
    }

    let files = if let Some(csv) = &input.csv {
        discovery::collect_csv_paths(csv, &input.key, input.base_dir.as_deref())?
    } else if let Some(dir) = &input.dir {
        discovery::collect_dir_files(dir, extensions, input.recursive)?
    } else {
        input.files.clone()
    };

    if files.is_empty() {
        anyhow::bail!("No files found to process");
    }
    Ok(files)
}

fn collect_text_inputs(args: &BatchTextArgs) -> anyhow::Result<Vec<PathBuf>> {
    let sources = [!args.files.is_empty(), args.csv.is_some()]
        .iter()
        .filter(|used| **used)
        .count();
    if sources == 0 {
        anyhow::bail!("No input specified. Provide files or --csv");
    }
    if sources > 1 {
        anyhow::bail!("Multiple input sources specified. Use only one of: files, --csv");
    }

    let files = if let Some(csv) = &args.csv {
        discovery::collect_csv_paths(csv, &args.key, args.base_dir.as_deref())?
    } else {
        args.files.clone()
    };

    if files.is_empty() {
        anyhow::bail!("No files found to process");
    }
    Ok(files)
}

fn to_media(files: Vec<PathBuf>) -> Vec<MediaInput> {
    files.into_iter().map(MediaInput::Path).collect()
}

fn batch_options(out: &BatchOutputArgs, on_progress: Option<ProgressCallback>) -> BatchOptions {
    BatchOptions {
        max_concurrency: out.concurrency,
        fail_fast: out.fail_fast,
        external_id_prefix: None,
        on_progress,
    }
}

/// Build a stderr progress bar driven by the batch engine's callback.
fn progress_bar(
    out: &BatchOutputArgs,
    total: usize,
) -> (Option<ProgressCallback>, Option<ProgressBar>) {
    let show = if out.progress {
        true
    } else if out.no_progress {
        false
    } else {
        console::Term::stderr().is_term()
    };
    if !show {
        return (None, None);
    }

    let bar = ProgressBar::new(total as u64);
    bar.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%)")
            .unwrap()
            .progress_chars("##-"),
    );

    let callback_bar = bar.clone();
    let callback: ProgressCallback = Arc::new(move |done, _total| {
        callback_bar.set_position(done as u64);
    });
    (Some(callback), Some(bar))
}

/// Emit batch output and translate failures into the exit code.
fn finish<T: serde::Serialize>(
    summary: &BatchSummary<T>,
    out: &BatchOutputArgs,
) -> anyhow::Result<()> {
    match out.format {
        BatchFormat::Jsonl => {
            if let Some(path) = &out.output {
                summary.write_jsonl(path)?;
                tracing::info!("Output written to {}", path.display());
            } else {
                for line in summary.jsonl_lines()? {
                    println!("{line}");
                }
            }
        }
        BatchFormat::Summary => output::print_batch_summary(summary),
        BatchFormat::Quiet => {}
    }

    if summary.failed() > 0 {
        std::process::exit(1);
    }
    Ok(())
}
