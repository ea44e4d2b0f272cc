//! Scan command - detect and match fields in a single screenshot.

use std::fs;
use std::path::PathBuf;

use clap::Args;
use console::style;
use image::{DynamicImage, Rgba, RgbaImage};
use tracing::{debug, info};

use formscout_core::matching::{AssistedMatcher, MatchResolver};
use formscout_core::models::config::ScoutConfig;
use formscout_core::scan::FieldScanner;
use formscout_core::source::FrameSource;
use formscout_core::{FieldKind, Rect, ResolvedField};

use crate::ocr::TesseractOcr;
use crate::source::FileSource;

/// Arguments for the scan command.
#[derive(Args)]
pub struct ScanArgs {
    /// Input screenshot (PNG, JPEG, BMP, TIFF)
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Write a copy of the frame with detected regions outlined
    #[arg(long)]
    annotate: Option<PathBuf>,

    /// Disable the AI-assisted matcher even when a credential is present
    #[arg(long)]
    no_assist: bool,

    /// Drop matches below this confidence
    #[arg(long, default_value = "0.0")]
    min_confidence: f32,

    /// Tesseract binary to invoke
    #[arg(long, default_value = "tesseract")]
    tesseract: String,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output
    Csv,
    /// Plain text summary
    Text,
}

pub async fn run(args: ScanArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    info!("scanning {}", args.input.display());
    let frame = FileSource::new(&args.input).capture(None)?;

    let ocr = TesseractOcr::with_binary(&args.tesseract);
    let scanner = FieldScanner::with_config(ocr, config.clone());
    let result = scanner.scan(&frame)?;

    let assist = if args.no_assist {
        None
    } else {
        AssistedMatcher::new(config.assist.clone())
    };
    if assist.is_none() && !args.no_assist {
        debug!("no service credential, using pattern matching only");
    }
    let resolver = MatchResolver::new()
        .with_assist(assist)
        .with_config(config.matching.clone());

    let mut resolved = resolver.resolve_all(&result.regions).await;
    if args.min_confidence > 0.0 {
        for field in &mut resolved {
            if field
                .matched
                .as_ref()
                .is_some_and(|m| m.confidence < args.min_confidence)
            {
                field.matched = None;
            }
        }
    }

    if let Some(annotate_path) = &args.annotate {
        annotate(&frame, &resolved).save(annotate_path)?;
        println!(
            "{} Annotated frame written to {}",
            style("✓").green(),
            annotate_path.display()
        );
    }

    let output = format_resolved(&resolved, &resolver, args.format)?;

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{output}");
    }

    Ok(())
}

pub(crate) fn load_config(config_path: Option<&str>) -> anyhow::Result<ScoutConfig> {
    Ok(match config_path {
        Some(path) => ScoutConfig::from_file(std::path::Path::new(path))?,
        None => ScoutConfig::default(),
    })
}

pub(crate) fn format_resolved(
    resolved: &[ResolvedField],
    resolver: &MatchResolver,
    format: OutputFormat,
) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(resolved)?),
        OutputFormat::Csv => format_csv(resolved),
        OutputFormat::Text => Ok(format_text(resolved, resolver)),
    }
}

fn format_csv(resolved: &[ResolvedField]) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record([
        "x",
        "y",
        "width",
        "height",
        "kind",
        "label",
        "key",
        "confidence",
        "rationale",
    ])?;

    for field in resolved {
        let b = &field.region.bounds;
        wtr.write_record([
            b.x.to_string(),
            b.y.to_string(),
            b.width.to_string(),
            b.height.to_string(),
            field.region.kind.to_string(),
            field.region.label.clone().unwrap_or_default(),
            field
                .matched
                .as_ref()
                .map(|m| m.key.to_string())
                .unwrap_or_default(),
            field
                .matched
                .as_ref()
                .map(|m| format!("{:.2}", m.confidence))
                .unwrap_or_default(),
            field
                .matched
                .as_ref()
                .map(|m| m.rationale.clone())
                .unwrap_or_default(),
        ])?;
    }

    Ok(String::from_utf8(wtr.into_inner()?)?)
}

fn format_text(resolved: &[ResolvedField], resolver: &MatchResolver) -> String {
    let mut out = String::new();
    out.push_str(&format!("Detected {} fields\n\n", resolved.len()));

    for (i, field) in resolved.iter().enumerate() {
        let b = &field.region.bounds;
        out.push_str(&format!(
            "{}. [{}] {}x{} at ({}, {})\n",
            i + 1,
            field.region.kind,
            b.width,
            b.height,
            b.x,
            b.y
        ));
        if let Some(label) = &field.region.label {
            out.push_str(&format!("   label: {label}\n"));
        }
        match &field.matched {
            Some(m) => out.push_str(&format!(
                "   key: {} ({:.0}%, {})\n",
                m.key,
                m.confidence * 100.0,
                m.rationale
            )),
            None => out.push_str("   key: no match\n"),
        }
    }

    let mappings = resolver.suggested_mappings(resolved);
    if !mappings.is_empty() {
        out.push_str("\nSuggested mappings:\n");
        let mut entries: Vec<_> = mappings.iter().collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));
        for (label, key) in entries {
            out.push_str(&format!("  {label} -> {key}\n"));
        }
    }

    out
}

/// Outline detected regions on a copy of the frame, colored by kind.
fn annotate(frame: &DynamicImage, resolved: &[ResolvedField]) -> DynamicImage {
    let mut canvas = frame.to_rgba8();
    for field in resolved {
        draw_rect(&mut canvas, &field.region.bounds, kind_color(field.region.kind));
    }
    DynamicImage::ImageRgba8(canvas)
}

fn kind_color(kind: FieldKind) -> Rgba<u8> {
    match kind {
        FieldKind::SingleLine => Rgba([220, 40, 40, 255]),
        FieldKind::MultiLine => Rgba([40, 40, 220, 255]),
        FieldKind::Selector => Rgba([40, 180, 40, 255]),
        FieldKind::FileUpload => Rgba([230, 140, 20, 255]),
    }
}

fn draw_rect(canvas: &mut RgbaImage, bounds: &Rect, color: Rgba<u8>) {
    let (width, height) = canvas.dimensions();
    if width == 0 || height == 0 {
        return;
    }

    let x1 = bounds.x.min(width - 1);
    let y1 = bounds.y.min(height - 1);
    let x2 = (bounds.x + bounds.width).min(width - 1);
    let y2 = (bounds.y + bounds.height).min(height - 1);

    for x in x1..=x2 {
        canvas.put_pixel(x, y1, color);
        canvas.put_pixel(x, y2, color);
    }
    for y in y1..=y2 {
        canvas.put_pixel(x1, y, color);
        canvas.put_pixel(x2, y, color);
    }
}
