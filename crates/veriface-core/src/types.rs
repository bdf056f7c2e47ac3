use image::RgbImage;
use serde::Serialize;
use thiserror::Error;

/// Bounding box for a detected face, with the facial landmarks needed for
/// embedding alignment.
#[derive(Debug, Clone)]
pub struct BoundingBox {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub confidence: f32,
    /// Five-point facial landmarks: [left_eye, right_eye, nose, left_mouth, right_mouth].
    pub landmarks: Option<[(f32, f32); 5]>,
}

impl BoundingBox {
    /// Integer pixel corners `[x1, y1, x2, y2]`.
    pub fn corners(&self) -> [i32; 4] {
        [
            self.x.round() as i32,
            self.y.round() as i32,
            (self.x + self.width).round() as i32,
            (self.y + self.height).round() as i32,
        ]
    }
}

/// A face as reported by the detection capability: pixel corners plus the
/// raw (un-normalized) recognition embedding.
///
/// Nothing else the underlying models produce crosses this boundary.
#[derive(Debug, Clone)]
pub struct DetectedFace {
    pub bbox: [i32; 4],
    pub embedding: Vec<f32>,
}

#[derive(Error, Debug)]
pub enum EmbeddingError {
    #[error("embedding has zero norm")]
    ZeroNorm,
}

/// Unit-norm face embedding.
///
/// Can only be built through [`Embedding::from_raw`], which L2-normalizes,
/// so every stored embedding has Euclidean norm 1.
#[derive(Debug, Clone, PartialEq)]
pub struct Embedding {
    values: Vec<f32>,
}

impl Embedding {
    /// Normalize a raw embedding to unit length.
    ///
    /// A zero vector (a detector-bug condition) is a typed error so the
    /// caller can treat the face as unusable instead of failing the request.
    pub fn from_raw(raw: &[f32]) -> Result<Self, EmbeddingError> {
        let norm: f32 = raw.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm <= 0.0 {
            return Err(EmbeddingError::ZeroNorm);
        }
        Ok(Self {
            values: raw.iter().map(|x| x / norm).collect(),
        })
    }

    /// Cosine similarity with another embedding, in [-1, 1].
    ///
    /// Both sides are unit vectors, so this is a plain dot product.
    pub fn similarity(&self, other: &Embedding) -> f32 {
        self.values
            .iter()
            .zip(other.values.iter())
            .map(|(a, b)| a * b)
            .sum()
    }

    pub fn values(&self) -> &[f32] {
        &self.values
    }
}

/// Best face found for one page image.
#[derive(Debug, Clone)]
pub struct FaceCandidate {
    pub embedding: Embedding,
    /// Quality score in [0, 100].
    pub quality: u8,
    /// Rotation angle (degrees) at which the face was found.
    pub angle: i32,
}

/// Categorical confidence bucket for a match decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConfidenceLevel {
    High,
    Medium,
    Low,
    NoMatch,
}

/// Fields reported on a successful verification.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VerificationReport {
    pub quality_1: u8,
    pub quality_2: u8,
    /// Cosine similarity, rounded to 3 decimals.
    pub similarity: f32,
    pub threshold_used: f32,
    #[serde(rename = "match")]
    pub matched: bool,
    /// Confidence percentage in [0, 100].
    pub confidence: f32,
    pub confidence_level: ConfidenceLevel,
    pub requires_manual_review: bool,
}

/// Outcome of one verification request.
///
/// Expected failures (too few pages, no usable face, quality below the
/// floor, internal processing errors) are reported here, never raised.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status")]
pub enum VerificationOutcome {
    #[serde(rename = "SUCCESS")]
    Success(VerificationReport),
    #[serde(rename = "FAILED")]
    Failed { reason: String },
}

#[derive(Error, Debug)]
pub enum AnalyzerError {
    #[error("detector: {0}")]
    Detector(#[from] crate::detector::DetectorError),
    #[error("recognizer: {0}")]
    Recognizer(#[from] crate::recognizer::RecognizerError),
}

/// Face detection + embedding extraction capability.
///
/// The pipeline takes this as an explicit handle so it can run against the
/// ONNX models in production and a scripted stand-in in tests.
pub trait FaceAnalyzer {
    fn detect_faces(&mut self, image: &RgbImage) -> Result<Vec<DetectedFace>, AnalyzerError>;
}
