//! ONNX-backed implementation of the face analysis capability.

use crate::detector::FaceDetector;
use crate::recognizer::FaceRecognizer;
use crate::types::{AnalyzerError, DetectedFace, FaceAnalyzer};
use image::RgbImage;

/// Face analyzer combining SCRFD detection and ArcFace embedding extraction.
///
/// Owns both ONNX sessions. This is the one long-lived, process-wide handle;
/// it is loaded once at startup and passed explicitly into the pipeline.
pub struct OnnxFaceAnalyzer {
    detector: FaceDetector,
    recognizer: FaceRecognizer,
}

impl OnnxFaceAnalyzer {
    /// Load both models, failing fast if either file is missing or invalid.
    pub fn load(scrfd_path: &str, arcface_path: &str) -> Result<Self, AnalyzerError> {
        let detector = FaceDetector::load(scrfd_path)?;
        let recognizer = FaceRecognizer::load(arcface_path)?;
        Ok(Self {
            detector,
            recognizer,
        })
    }
}

impl FaceAnalyzer for OnnxFaceAnalyzer {
    fn detect_faces(&mut self, image: &RgbImage) -> Result<Vec<DetectedFace>, AnalyzerError> {
        let boxes = self.detector.detect(image)?;

        let mut faces = Vec::with_capacity(boxes.len());
        for bbox in &boxes {
            if bbox.landmarks.is_none() {
                tracing::warn!(confidence = bbox.confidence, "detection without landmarks; skipping");
                continue;
            }
            let embedding = self.recognizer.extract(image, bbox)?;
            faces.push(DetectedFace {
                bbox: bbox.corners(),
                embedding,
            });
        }

        Ok(faces)
    }
}
