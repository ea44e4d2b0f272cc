//! Tesseract adapter for the OCR boundary.
//!
//! The engine never runs OCR itself; this adapter stages crops as
//! temporary PNGs and shells out to the external `tesseract` binary,
//! parsing its plain-text and TSV outputs.

use std::process::Command;

use image::DynamicImage;

use formscout_core::models::field::Rect;
use formscout_core::ocr::{OcrEngine, OcrToken};
use formscout_core::OcrError;

/// OCR engine backed by the system `tesseract` binary.
pub struct TesseractOcr {
    binary: String,
}

impl TesseractOcr {
    pub fn new() -> Self {
        Self {
            binary: "tesseract".to_string(),
        }
    }

    /// Use a non-default binary path.
    pub fn with_binary(binary: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    fn write_temp(&self, image: &DynamicImage) -> Result<tempfile::TempPath, OcrError> {
        let file = tempfile::Builder::new()
            .prefix("formscout-")
            .suffix(".png")
            .tempfile()
            .map_err(|e| OcrError::Engine(e.to_string()))?;
        let path = file.into_temp_path();
        image
            .save(&path)
            .map_err(|e| OcrError::Engine(e.to_string()))?;
        Ok(path)
    }

    fn run(&self, args: &[&str]) -> Result<String, OcrError> {
        let output = Command::new(&self.binary)
            .args(args)
            .output()
            .map_err(|e| OcrError::Engine(format!("{}: {e}", self.binary)))?;

        if !output.status.success() {
            return Err(OcrError::Engine(
                String::from_utf8_lossy(&output.stderr).into_owned(),
            ));
        }

        String::from_utf8(output.stdout).map_err(|e| OcrError::Output(e.to_string()))
    }
}

impl Default for TesseractOcr {
    fn default() -> Self {
        Self::new()
    }
}

impl OcrEngine for TesseractOcr {
    fn recognize(&self, image: &DynamicImage) -> Result<String, OcrError> {
        let path = self.write_temp(image)?;
        let path_str = path
            .to_str()
            .ok_or_else(|| OcrError::Engine("non-UTF-8 temp path".into()))?;
        // --psm 8: treat the crop as a single word or short line
        self.run(&[path_str, "stdout", "--psm", "8"])
    }

    fn recognize_tokens(&self, image: &DynamicImage) -> Result<Vec<OcrToken>, OcrError> {
        let path = self.write_temp(image)?;
        let path_str = path
            .to_str()
            .ok_or_else(|| OcrError::Engine("non-UTF-8 temp path".into()))?;
        let tsv = self.run(&[path_str, "stdout", "tsv"])?;
        parse_tsv(&tsv)
    }
}

/// Parse tesseract's TSV output into positioned tokens.
///
/// Columns: level, page_num, block_num, par_num, line_num, word_num, left,
/// top, width, height, conf, text. Confidence is 0-100, with -1 on
/// structural (non-word) rows.
fn parse_tsv(tsv: &str) -> Result<Vec<OcrToken>, OcrError> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(true)
        .flexible(true)
        .from_reader(tsv.as_bytes());

    let mut tokens = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| OcrError::Output(e.to_string()))?;
        if record.len() < 12 {
            continue;
        }

        let confidence: f32 = record[10].parse().unwrap_or(-1.0);
        let text = record[11].trim();
        if confidence < 0.0 || text.is_empty() {
            continue;
        }

        let number = |i: usize| -> u32 { record[i].parse().unwrap_or(0) };
        tokens.push(OcrToken {
            text: text.to_string(),
            confidence: confidence / 100.0,
            bounds: Rect::new(number(6), number(7), number(8), number(9)),
        });
    }

    Ok(tokens)
}
