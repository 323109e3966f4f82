//! Output rendering: JSON, human tables, minimal, and quiet modes.

use clap::{Args, ValueEnum};
use console::style;
use serde::Serialize;

use aiornot_core::types::AudioReport;
use aiornot_core::{
    BatchSummary, ImageReportResponse, TextReportResponse, Verdict, VideoReportResponse,
};

const RULE: &str = "============================================================";
const THIN_RULE: &str = "------------------------------------------------------------";

/// Output formats for single-item commands.
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum ReportFormat {
    /// Pretty-printed JSON of the full report
    Json,
    /// Human-readable table
    Table,
    /// `verdict confidence` on one line
    Minimal,
}

/// Output formats for batch commands.
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum BatchFormat {
    /// One JSON object per item plus a trailing summary line
    Jsonl,
    /// Single human-readable summary line
    Summary,
    /// No output; only the exit code
    Quiet,
}

/// Shared format flags for single-item commands.
#[derive(Args, Debug, Clone)]
pub struct FormatArgs {
    /// Output format
    #[arg(long, value_enum, default_value_t = ReportFormat::Json)]
    pub format: ReportFormat,

    /// Only output the verdict
    #[arg(short, long)]
    pub quiet: bool,

    /// Force colored output
    #[arg(long, overrides_with = "no_color")]
    pub color: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,
}

impl FormatArgs {
    /// Resolve the color flags against stdout tty detection and apply
    /// the result process-wide.
    pub fn apply_color_choice(&self) {
        let use_color = if self.color {
            true
        } else if self.no_color {
            false
        } else {
            console::Term::stdout().features().colors_supported()
        };
        console::set_colors_enabled(use_color);
    }
}

pub fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub fn print_minimal(verdict: &str, confidence: Option<f64>) {
    match confidence {
        Some(confidence) => println!("{verdict} {confidence:.4}"),
        None => println!("{verdict}"),
    }
}

pub fn print_quiet(verdict: &str) {
    println!("{verdict}");
}

fn format_confidence(confidence: f64) -> String {
    format!("{:.1}%", confidence * 100.0)
}

fn styled_verdict(verdict: Verdict) -> String {
    let text = verdict.as_str().to_uppercase();
    match verdict {
        Verdict::Ai => style(text).red().to_string(),
        Verdict::Human => style(text).green().to_string(),
        Verdict::Unknown => style(text).yellow().to_string(),
    }
}

fn detected(flag: bool) -> String {
    if flag {
        style("DETECTED").red().to_string()
    } else {
        style("Not detected").green().to_string()
    }
}

pub fn print_image_table(resp: &ImageReportResponse) {
    let report = &resp.report;
    let verdict = resp.verdict().unwrap_or(Verdict::Unknown);
    let confidence = resp.confidence().unwrap_or(0.0);

    println!("{RULE}");
    println!("  Image Analysis: {}", resp.id);
    println!("{RULE}");
    println!("  Verdict:      {}", styled_verdict(verdict));
    println!("  Confidence:   {}", format_confidence(confidence));

    if let Some(generator) = report.ai_generated.as_ref().and_then(|r| r.generator.as_ref()) {
        let (name, prediction) = generator.top_generator();
        if prediction.is_detected {
            println!(
                "  Generator:    {name} ({})",
                format_confidence(prediction.confidence)
            );
        }
    }

    println!("{THIN_RULE}");

    if let Some(deepfake) = &report.deepfake {
        println!("  Deepfake:     {}", detected(deepfake.is_detected));
    }
    if let Some(nsfw) = &report.nsfw {
        println!("  NSFW:         {}", detected(nsfw.is_detected));
    }
    if let Some(quality) = &report.quality {
        let status = if quality.is_detected {
            style("High").green().to_string()
        } else {
            style("Low").yellow().to_string()
        };
        println!("  Quality:      {status}");
    }

    println!("{RULE}");
}

pub fn print_video_table(resp: &VideoReportResponse) {
    let report = &resp.report;

    println!("{RULE}");
    println!("  Video Analysis: {}", resp.id);
    println!("{RULE}");

    let track = |label: &str, is_ai: bool, confidence: f64| {
        let verdict = if is_ai {
            style("AI").red().to_string()
        } else {
            style("Human").green().to_string()
        };
        println!(
            "  {label:<12}{verdict} ({})",
            format_confidence(confidence)
        );
    };

    track("Video:", report.ai_video.is_detected, report.ai_video.confidence);
    if let Some(voice) = &report.ai_voice {
        track("Voice:", voice.is_detected, voice.confidence);
    }
    if let Some(music) = &report.ai_music {
        track("Music:", music.is_detected, music.confidence);
    }
    if let Some(deepfake) = &report.deepfake_video {
        println!(
            "  Deepfake:   {} ({})",
            detected(deepfake.is_detected),
            format_confidence(deepfake.confidence)
        );
    }

    println!("{THIN_RULE}");
    println!("  Duration:     {}s", report.meta.duration);
    println!("{RULE}");
}

pub fn print_audio_table(id: &str, report: &AudioReport, label: &str) {
    println!("{RULE}");
    println!("  {label} Analysis: {id}");
    println!("{RULE}");
    println!("  Verdict:      {}", styled_verdict(report.verdict));
    println!("  Confidence:   {}", format_confidence(report.confidence));
    println!("{THIN_RULE}");
    println!("  Duration:     {}s", report.duration);
    println!("{RULE}");
}

pub fn print_text_table(resp: &TextReportResponse) {
    let report = &resp.report.ai_text;
    let verdict = if report.is_detected {
        Verdict::Ai
    } else {
        Verdict::Human
    };

    println!("{RULE}");
    println!("  Text Analysis: {}", resp.id);
    println!("{RULE}");
    println!("  Verdict:      {}", styled_verdict(verdict));
    println!("  Confidence:   {}", format_confidence(report.confidence));
    println!("{THIN_RULE}");
    println!("  Words:        {}", resp.metadata.word_count);
    println!("  Characters:   {}", resp.metadata.character_count);

    if let Some(annotations) = resp.annotations() {
        println!("{THIN_RULE}");
        println!("  Annotations:");
        for (block, confidence) in annotations.iter().take(5) {
            let shown: String = if block.chars().count() > 50 {
                format!("{}...", block.chars().take(50).collect::<String>())
            } else {
                block.clone()
            };
            println!("    [{}] {shown}", format_confidence(*confidence));
        }
        if annotations.len() > 5 {
            println!("    ... and {} more", annotations.len() - 5);
        }
    }

    println!("{RULE}");
}

/// One-line human summary of a finished batch.
pub fn print_batch_summary<T>(summary: &BatchSummary<T>) {
    let succeeded = style(summary.succeeded().to_string()).green().to_string();
    let failed = if summary.failed() > 0 {
        style(summary.failed().to_string()).red().to_string()
    } else {
        summary.failed().to_string()
    };
    println!(
        "Processed {} files: {succeeded} succeeded, {failed} failed ({:.1}% success rate)",
        summary.total(),
        summary.success_rate() * 100.0
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_confidence_is_percent() {
        assert_eq!(format_confidence(0.987), "98.7%");
        assert_eq!(format_confidence(0.0), "0.0%");
        assert_eq!(format_confidence(1.0), "100.0%");
    }

    #[test]
    fn test_verdict_text_without_color() {
        console::set_colors_enabled(false);
        assert_eq!(styled_verdict(Verdict::Ai), "AI");
        assert_eq!(styled_verdict(Verdict::Human), "HUMAN");
        assert_eq!(styled_verdict(Verdict::Unknown), "UNKNOWN");
    }
}
