//! Single-item analysis commands.

use std::path::PathBuf;

use clap::Args;

use aiornot_core::types::enums::{ImageAnalysisType, VideoAnalysisType};
use aiornot_core::{ImageOptions, TextOptions, Verdict, VideoOptions};

use super::output::{self, FormatArgs, ReportFormat};

fn parse_image_type(s: &str) -> Result<ImageAnalysisType, String> {
    s.parse()
}

fn parse_video_type(s: &str) -> Result<VideoAnalysisType, String> {
    s.parse()
}

/// Arguments for `aiornot image`.
#[derive(Args, Debug)]
pub struct ImageArgs {
    /// Image file to analyze
    pub file: PathBuf,

    /// Only run these analysis types (repeatable)
    #[arg(long = "only", value_parser = parse_image_type)]
    pub only: Vec<ImageAnalysisType>,

    /// Exclude these analysis types (repeatable)
    #[arg(long = "excluding", value_parser = parse_image_type)]
    pub excluding: Vec<ImageAnalysisType>,

    /// External tracking ID echoed back by the service
    #[arg(long)]
    pub external_id: Option<String>,

    #[command(flatten)]
    pub format: FormatArgs,
}

pub async fn image(args: ImageArgs) -> anyhow::Result<()> {
    args.format.apply_color_choice();
    let client = super::client()?;
    let options = ImageOptions {
        only: args.only,
        excluding: args.excluding,
        external_id: args.external_id,
    };

    let resp = client.image_report_from_file(&args.file, &options).await?;

    let verdict = resp.verdict().unwrap_or(Verdict::Unknown);
    if args.format.quiet {
        output::print_quiet(verdict.as_str());
    } else {
        match args.format.format {
            ReportFormat::Json => output::print_json(&resp)?,
            ReportFormat::Minimal => output::print_minimal(verdict.as_str(), resp.confidence()),
            ReportFormat::Table => output::print_image_table(&resp),
        }
    }
    Ok(())
}

/// Arguments for `aiornot video`.
#[derive(Args, Debug)]
pub struct VideoArgs {
    /// Video file to analyze
    pub file: PathBuf,

    /// Only run these analysis types (repeatable)
    #[arg(long = "only", value_parser = parse_video_type)]
    pub only: Vec<VideoAnalysisType>,

    /// Exclude these analysis types (repeatable)
    #[arg(long = "excluding", value_parser = parse_video_type)]
    pub excluding: Vec<VideoAnalysisType>,

    /// External tracking ID echoed back by the service
    #[arg(long)]
    pub external_id: Option<String>,

    #[command(flatten)]
    pub format: FormatArgs,
}

pub async fn video(args: VideoArgs) -> anyhow::Result<()> {
    args.format.apply_color_choice();
    let client = super::client()?;
    let options = VideoOptions {
        only: args.only,
        excluding: args.excluding,
        external_id: args.external_id,
    };

    let resp = client.video_report_from_file(&args.file, &options).await?;

    let verdict = if resp.ai_video_detected() {
        Verdict::Ai
    } else {
        Verdict::Human
    };
    if args.format.quiet {
        output::print_quiet(verdict.as_str());
    } else {
        match args.format.format {
            ReportFormat::Json => output::print_json(&resp)?,
            ReportFormat::Minimal => {
                output::print_minimal(verdict.as_str(), Some(resp.ai_video_confidence()))
            }
            ReportFormat::Table => output::print_video_table(&resp),
        }
    }
    Ok(())
}

/// Arguments for `aiornot voice` and `aiornot music`.
#[derive(Args, Debug)]
pub struct AudioArgs {
    /// Audio file to analyze
    pub file: PathBuf,

    #[command(flatten)]
    pub format: FormatArgs,
}

pub async fn voice(args: AudioArgs) -> anyhow::Result<()> {
    args.format.apply_color_choice();
    let client = super::client()?;
    let resp = client.voice_report_from_file(&args.file).await?;
    render_audio(&args.format, &resp.id, &resp.report, "Voice", &resp)
}

pub async fn music(args: AudioArgs) -> anyhow::Result<()> {
    args.format.apply_color_choice();
    let client = super::client()?;
    let resp = client.music_report_from_file(&args.file).await?;
    render_audio(&args.format, &resp.id, &resp.report, "Music", &resp)
}

fn render_audio<T: serde::Serialize>(
    format: &FormatArgs,
    id: &str,
    report: &aiornot_core::types::AudioReport,
    label: &str,
    full: &T,
) -> anyhow::Result<()> {
    if format.quiet {
        output::print_quiet(report.verdict.as_str());
    } else {
        match format.format {
            ReportFormat::Json => output::print_json(full)?,
            ReportFormat::Minimal => {
                output::print_minimal(report.verdict.as_str(), Some(report.confidence))
            }
            ReportFormat::Table => output::print_audio_table(id, report, label),
        }
    }
    Ok(())
}

/// Arguments for `aiornot text`.
#[derive(Args, Debug)]
pub struct TextArgs {
    /// The text itself, or a file path with --file
    pub source: String,

    /// Read text from a file instead of the argument
    #[arg(short, long)]
    pub file: bool,

    /// Include block-level annotations
    #[arg(short, long)]
    pub annotations: bool,

    /// External tracking ID echoed back by the service
    #[arg(long)]
    pub external_id: Option<String>,

    #[command(flatten)]
    pub format: FormatArgs,
}

pub async fn text(args: TextArgs) -> anyhow::Result<()> {
    args.format.apply_color_choice();
    let client = super::client()?;

    let content = if args.file {
        let path = PathBuf::from(&args.source);
        if !path.exists() {
            anyhow::bail!("File not found: {}", path.display());
        }
        std::fs::read_to_string(&path)?
    } else {
        args.source.clone()
    };

    let options = TextOptions {
        include_annotations: args.annotations,
        external_id: args.external_id,
    };
    let resp = client.text_report(&content, &options).await?;

    let verdict = if resp.is_detected() {
        Verdict::Ai
    } else {
        Verdict::Human
    };
    if args.format.quiet {
        output::print_quiet(verdict.as_str());
    } else {
        match args.format.format {
            ReportFormat::Json => output::print_json(&resp)?,
            ReportFormat::Minimal => output::print_minimal(verdict.as_str(), Some(resp.confidence())),
            ReportFormat::Table => output::print_text_table(&resp),
        }
    }
    Ok(())
}
