//! Batch command - scan multiple screenshots.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Args;
use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::warn;

use formscout_core::matching::{AssistedMatcher, MatchResolver};
use formscout_core::scan::FieldScanner;
use formscout_core::source::FrameSource;
use formscout_core::ResolvedField;

use super::scan::{format_resolved, load_config, OutputFormat};
use crate::ocr::TesseractOcr;
use crate::source::FileSource;

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Input files or glob pattern
    #[arg(required = true)]
    input: String,

    /// Output directory
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Output format for each file
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Also generate a summary CSV
    #[arg(long)]
    summary: bool,

    /// Continue on error
    #[arg(long)]
    continue_on_error: bool,

    /// Disable the AI-assisted matcher
    #[arg(long)]
    no_assist: bool,

    /// Tesseract binary to invoke
    #[arg(long, default_value = "tesseract")]
    tesseract: String,
}

/// Result of scanning a single file.
struct BatchResult {
    path: PathBuf,
    fields: usize,
    matched: usize,
    error: Option<String>,
    processing_time_ms: u64,
}

pub async fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;

    // Expand glob pattern
    let files: Vec<PathBuf> = glob(&args.input)?
        .filter_map(|r| r.ok())
        .filter(|p| {
            let ext = p.extension().and_then(|e| e.to_str()).unwrap_or("");
            matches!(
                ext.to_lowercase().as_str(),
                "png" | "jpg" | "jpeg" | "tiff" | "bmp"
            )
        })
        .collect();

    if files.is_empty() {
        anyhow::bail!("No matching files found for pattern: {}", args.input);
    }

    println!("{} Found {} files to scan", style("ℹ").blue(), files.len());

    if let Some(ref output_dir) = args.output_dir {
        fs::create_dir_all(output_dir)?;
    }

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")
            .unwrap()
            .progress_chars("=>-"),
    );

    let scanner = FieldScanner::with_config(
        TesseractOcr::with_binary(&args.tesseract),
        config.clone(),
    );
    let assist = if args.no_assist {
        None
    } else {
        AssistedMatcher::new(config.assist.clone())
    };
    let resolver = MatchResolver::new()
        .with_assist(assist)
        .with_config(config.matching.clone());

    let mut results = Vec::with_capacity(files.len());
    for path in files {
        let file_start = Instant::now();
        match scan_file(&path, &scanner, &resolver, &args).await {
            Ok(resolved) => {
                results.push(BatchResult {
                    path: path.clone(),
                    fields: resolved.len(),
                    matched: resolved.iter().filter(|f| f.matched.is_some()).count(),
                    error: None,
                    processing_time_ms: file_start.elapsed().as_millis() as u64,
                });
            }
            Err(e) => {
                let message = e.to_string();
                if args.continue_on_error {
                    warn!("failed to scan {}: {}", path.display(), message);
                    results.push(BatchResult {
                        path: path.clone(),
                        fields: 0,
                        matched: 0,
                        error: Some(message),
                        processing_time_ms: file_start.elapsed().as_millis() as u64,
                    });
                } else {
                    pb.abandon();
                    anyhow::bail!("Scanning failed for {}: {}", path.display(), message);
                }
            }
        }
        pb.inc(1);
    }
    pb.finish_with_message("Done");

    if args.summary {
        let summary = format_summary(&results)?;
        match &args.output_dir {
            Some(dir) => {
                let path = dir.join("summary.csv");
                fs::write(&path, summary)?;
                println!(
                    "{} Summary written to {}",
                    style("✓").green(),
                    path.display()
                );
            }
            None => println!("{summary}"),
        }
    }

    let failed = results.iter().filter(|r| r.error.is_some()).count();
    println!(
        "{} Scanned {} files ({} failed)",
        style("✓").green(),
        results.len(),
        failed
    );

    Ok(())
}

async fn scan_file(
    path: &Path,
    scanner: &FieldScanner<TesseractOcr>,
    resolver: &MatchResolver,
    args: &BatchArgs,
) -> anyhow::Result<Vec<ResolvedField>> {
    let frame = FileSource::new(path).capture(None)?;
    let result = scanner.scan(&frame)?;
    let resolved = resolver.resolve_all(&result.regions).await;

    if let Some(dir) = &args.output_dir {
        let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or("scan");
        let ext = match args.format {
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
            OutputFormat::Text => "txt",
        };
        let out_path = dir.join(format!("{stem}.{ext}"));
        fs::write(&out_path, format_resolved(&resolved, resolver, args.format)?)?;
    }

    Ok(resolved)
}

fn format_summary(results: &[BatchResult]) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    wtr.write_record(["file", "fields", "matched", "error", "time_ms", "scanned_at"])?;

    let stamp = chrono::Local::now().to_rfc3339();
    for result in results {
        wtr.write_record([
            result.path.display().to_string(),
            result.fields.to_string(),
            result.matched.to_string(),
            result.error.clone().unwrap_or_default(),
            result.processing_time_ms.to_string(),
            stamp.clone(),
        ])?;
    }

    Ok(String::from_utf8(wtr.into_inner()?)?)
}
