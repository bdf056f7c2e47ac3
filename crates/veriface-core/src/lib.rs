//! veriface-core — document face verification engine.
//!
//! Detects faces with SCRFD and extracts ArcFace embeddings via ONNX Runtime,
//! then decides whether two document pages show the same person: multi-angle
//! face search, crop quality scoring, quality-adaptive thresholds, and a
//! match verdict with a manual-review band for borderline similarity.

pub mod alignment;
pub mod analyzer;
pub mod detector;
pub mod pipeline;
pub mod quality;
pub mod recognizer;
pub mod rotation;
pub mod types;

pub use analyzer::OnnxFaceAnalyzer;
pub use pipeline::{verify, ConfidenceMode, PipelineConfig};
pub use types::{
    AnalyzerError, BoundingBox, ConfidenceLevel, DetectedFace, Embedding, FaceAnalyzer,
    FaceCandidate, VerificationOutcome, VerificationReport,
};

/// Default directory for the ONNX model files.
pub fn default_model_dir() -> std::path::PathBuf {
    std::path::PathBuf::from("/usr/share/veriface/models")
}
