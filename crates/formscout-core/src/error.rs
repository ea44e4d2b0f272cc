//! Error types for the formscout-core library.

use thiserror::Error;

/// Main error type for the formscout library.
#[derive(Error, Debug)]
pub enum ScoutError {
    /// Field detection error.
    #[error("scan error: {0}")]
    Scan(#[from] ScanError),

    /// OCR boundary error.
    #[error("OCR error: {0}")]
    Ocr(#[from] OcrError),

    /// Matching error.
    #[error("match error: {0}")]
    Match(#[from] MatchError),

    /// Image processing error.
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors related to field detection.
///
/// These are the only conditions that propagate out of a scan; everything
/// downstream of a usable frame degrades to fewer or weaker results.
#[derive(Error, Debug)]
pub enum ScanError {
    /// The frame is missing or has zero area.
    #[error("no usable frame")]
    EmptyFrame,

    /// The frame source could not produce a frame.
    #[error("frame capture failed: {0}")]
    Capture(String),
}

/// Errors reported by an external OCR engine.
///
/// Recoverable inside the pipeline: a failed crop read leaves the label
/// absent, a failed token pass skips keyword detection.
#[derive(Error, Debug)]
pub enum OcrError {
    /// The engine process or service failed to run.
    #[error("OCR engine failed: {0}")]
    Engine(String),

    /// The engine produced output that could not be parsed.
    #[error("unreadable OCR output: {0}")]
    Output(String),
}

/// Errors from the AI-assisted matcher.
///
/// Callers of the resolver never see these; they are logged and the
/// deterministic pattern matcher takes over.
#[derive(Error, Debug)]
pub enum MatchError {
    /// No credential is configured for the text-understanding service.
    #[error("service not configured")]
    Unavailable,

    /// Transport failure talking to the service.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The service answered with a non-success status.
    #[error("service error {status}: {body}")]
    Api { status: u16, body: String },

    /// The reply did not follow the expected format.
    #[error("malformed reply: {0}")]
    Malformed(String),
}

/// Result type for the formscout library.
pub type Result<T> = std::result::Result<T, ScoutError>;
