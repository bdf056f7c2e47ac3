//! Verification pipeline: multi-angle face search, similarity scoring,
//! quality-adaptive thresholding, and match classification.
//!
//! The pipeline is a pure, synchronous computation over in-memory page
//! images. Expected failure modes are recovered into a typed
//! [`VerificationOutcome::Failed`]; nothing here panics on bad input.

use image::RgbImage;
use rand::Rng;
use thiserror::Error;

use crate::quality;
use crate::rotation;
use crate::types::{
    AnalyzerError, ConfidenceLevel, Embedding, FaceAnalyzer, FaceCandidate, VerificationOutcome,
    VerificationReport,
};

/// How the user-facing confidence number is produced.
#[derive(Debug, Clone)]
pub enum ConfidenceMode {
    /// `round(similarity * 100, 2)` — the deterministic production path.
    Measured,
    /// Uniform sample from a range conditioned on the match verdict.
    ///
    /// A staging affordance for validating downstream consumers; never use
    /// it when genuine accuracy is required.
    Simulated {
        match_range: (f32, f32),
        no_match_range: (f32, f32),
    },
}

/// Tunables for one verification run.
///
/// `high_confidence` and `tolerance_band` have no sensible defaults and must
/// be supplied explicitly; everything else starts from field-tested values.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Rotation angles (degrees) tried per page, in order. Must include 0.
    pub rotation_angles: Vec<i32>,
    /// Minimum acceptable quality for the worse face of the pair.
    pub min_quality: u8,
    /// Quality at or above which a face counts as high quality.
    pub high_quality: u8,
    /// Quality below which a face counts as low quality.
    pub low_quality: u8,
    /// Similarity threshold applied when the pair's quality is balanced.
    pub default_threshold: f32,
    /// Relaxed threshold for the asymmetric-quality regime (one face sharp,
    /// the other poor), where embedding noise depresses raw similarity.
    pub lenient_threshold: f32,
    /// Similarity at or above which a match is high confidence.
    pub high_confidence: f32,
    /// Width of the manual-review band just below the accept threshold.
    pub tolerance_band: f32,
    pub confidence_mode: ConfidenceMode,
}

impl PipelineConfig {
    pub fn new(high_confidence: f32, tolerance_band: f32) -> Self {
        Self {
            rotation_angles: vec![0, -10, 10, -20, 20, -30, 30],
            min_quality: 25,
            high_quality: 60,
            low_quality: 70,
            default_threshold: 0.45,
            lenient_threshold: 0.33,
            high_confidence,
            tolerance_band,
            confidence_mode: ConfidenceMode::Measured,
        }
    }

    /// Reject configurations that would make the decision bands degenerate.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rotation_angles.is_empty() {
            return Err(ConfigError::EmptyRotationAngles);
        }
        if !self.rotation_angles.contains(&0) {
            return Err(ConfigError::MissingUprightAngle);
        }
        if self.lenient_threshold >= self.default_threshold {
            return Err(ConfigError::ThresholdOrder {
                lenient: self.lenient_threshold,
                default: self.default_threshold,
            });
        }
        if self.tolerance_band <= 0.0 {
            return Err(ConfigError::NonPositiveToleranceBand(self.tolerance_band));
        }
        let gap = self.high_confidence - self.default_threshold;
        if self.tolerance_band >= gap {
            return Err(ConfigError::ToleranceBandTooWide {
                band: self.tolerance_band,
                gap,
            });
        }
        if let ConfidenceMode::Simulated {
            match_range,
            no_match_range,
        } = &self.confidence_mode
        {
            if match_range.0 > match_range.1
                || no_match_range.0 > no_match_range.1
                || no_match_range.1 >= match_range.0
            {
                return Err(ConfigError::SimulatedRanges);
            }
        }
        Ok(())
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("rotation angle list must not be empty")]
    EmptyRotationAngles,
    #[error("rotation angle list must include the upright angle 0")]
    MissingUprightAngle,
    #[error("lenient threshold {lenient} must be below the default threshold {default}")]
    ThresholdOrder { lenient: f32, default: f32 },
    #[error("tolerance band must be strictly positive, got {0}")]
    NonPositiveToleranceBand(f32),
    #[error(
        "tolerance band {band} must be smaller than the gap {gap} between the \
         high-confidence cutoff and the default threshold"
    )]
    ToleranceBandTooWide { band: f32, gap: f32 },
    #[error("simulated confidence ranges must be ordered and disjoint")]
    SimulatedRanges,
}

/// Search the configured rotation angles and keep the best-quality face.
///
/// The best candidate only ever advances on strictly greater quality, so
/// ties break toward the earlier angle and the earlier detection. Faces with
/// a zero-norm embedding are skipped as unusable. Returns `None` when no
/// face of quality > 0 was found at any angle.
pub fn locate_best_face(
    analyzer: &mut dyn FaceAnalyzer,
    image: &RgbImage,
    angles: &[i32],
) -> Result<Option<FaceCandidate>, AnalyzerError> {
    let mut best: Option<FaceCandidate> = None;

    for &angle in angles {
        let rotated;
        let frame = if angle != 0 {
            rotated = rotation::rotate_about_center(image, angle as f32);
            &rotated
        } else {
            image
        };

        let faces = analyzer.detect_faces(frame)?;
        for face in &faces {
            let q = quality::estimate_quality(face.bbox, frame);
            let best_q = best.as_ref().map(|c| c.quality).unwrap_or(0);
            if q > best_q {
                match Embedding::from_raw(&face.embedding) {
                    Ok(embedding) => {
                        best = Some(FaceCandidate {
                            embedding,
                            quality: q,
                            angle,
                        });
                    }
                    Err(_) => {
                        tracing::warn!(angle, "zero-norm embedding from detector; skipping face");
                    }
                }
            }
        }
    }

    Ok(best)
}

/// Pick the similarity threshold for a pair based on its quality profile.
///
/// Symmetric in its arguments: only min/max of the two qualities matter.
pub fn select_threshold(quality_a: u8, quality_b: u8, config: &PipelineConfig) -> f32 {
    let low_q = quality_a.min(quality_b);
    let high_q = quality_a.max(quality_b);

    if high_q >= config.high_quality && low_q < config.low_quality {
        config.lenient_threshold
    } else {
        config.default_threshold
    }
}

/// Match verdict for a similarity value against a threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Verdict {
    pub matched: bool,
    pub level: ConfidenceLevel,
    pub requires_review: bool,
}

/// Classify a similarity value into a decision band, checked high to low.
///
/// The band just below the threshold accepts the match but routes it to
/// manual review instead of auto-approving.
pub fn classify(similarity: f32, threshold: f32, config: &PipelineConfig) -> Verdict {
    if similarity >= config.high_confidence {
        Verdict {
            matched: true,
            level: ConfidenceLevel::High,
            requires_review: false,
        }
    } else if similarity >= threshold {
        Verdict {
            matched: true,
            level: ConfidenceLevel::Medium,
            requires_review: false,
        }
    } else if similarity >= threshold - config.tolerance_band {
        Verdict {
            matched: true,
            level: ConfidenceLevel::Low,
            requires_review: true,
        }
    } else {
        Verdict {
            matched: false,
            level: ConfidenceLevel::NoMatch,
            requires_review: false,
        }
    }
}

/// Produce the user-facing confidence percentage, rounded to 2 decimals.
pub fn confidence_score(matched: bool, similarity: f32, mode: &ConfidenceMode) -> f32 {
    match mode {
        ConfidenceMode::Measured => round2(similarity * 100.0),
        ConfidenceMode::Simulated {
            match_range,
            no_match_range,
        } => {
            let (min, max) = if matched { *match_range } else { *no_match_range };
            round2(rand::thread_rng().gen_range(min..=max))
        }
    }
}

#[derive(Error, Debug)]
enum VerifyFailure {
    #[error("document must contain at least 2 pages. Found {0} page(s)")]
    InsufficientPages(usize),
    #[error("could not detect faces in both images; ensure the document contains clear face photos")]
    NoUsableFaces,
    #[error("face quality too low (minimum quality: {0}); provide clearer images")]
    QualityBelowFloor(u8),
    #[error("internal processing error")]
    Processing(#[source] AnalyzerError),
}

/// Decide whether two face images from a document belong to the same person.
///
/// Takes rasterized page images in page order; the first two pages that
/// yield a usable face form the comparison pair. Every expected failure is
/// returned as [`VerificationOutcome::Failed`]; the cause of a processing
/// error is logged here, not leaked in the reason string.
pub fn verify(
    analyzer: &mut dyn FaceAnalyzer,
    pages: &[RgbImage],
    config: &PipelineConfig,
) -> VerificationOutcome {
    match verify_inner(analyzer, pages, config) {
        Ok(report) => VerificationOutcome::Success(report),
        Err(failure) => {
            if let VerifyFailure::Processing(cause) = &failure {
                tracing::error!(error = %cause, "verification processing error");
            }
            VerificationOutcome::Failed {
                reason: failure.to_string(),
            }
        }
    }
}

fn verify_inner(
    analyzer: &mut dyn FaceAnalyzer,
    pages: &[RgbImage],
    config: &PipelineConfig,
) -> Result<VerificationReport, VerifyFailure> {
    if pages.len() < 2 {
        return Err(VerifyFailure::InsufficientPages(pages.len()));
    }

    // First-two-successful-pages policy: keep scanning until two pages have
    // produced a usable face, then stop.
    let mut candidates: Vec<FaceCandidate> = Vec::with_capacity(2);
    for page in pages {
        let found = locate_best_face(analyzer, page, &config.rotation_angles)
            .map_err(VerifyFailure::Processing)?;
        if let Some(candidate) = found {
            tracing::debug!(
                quality = candidate.quality,
                angle = candidate.angle,
                "face candidate collected"
            );
            candidates.push(candidate);
        }
        if candidates.len() >= 2 {
            break;
        }
    }

    if candidates.len() < 2 {
        return Err(VerifyFailure::NoUsableFaces);
    }

    let first = &candidates[0];
    let second = &candidates[1];

    let low_q = first.quality.min(second.quality);
    if low_q < config.min_quality {
        return Err(VerifyFailure::QualityBelowFloor(low_q));
    }

    let similarity = first.embedding.similarity(&second.embedding);
    let threshold = select_threshold(first.quality, second.quality, config);
    let verdict = classify(similarity, threshold, config);
    let confidence = confidence_score(verdict.matched, similarity, &config.confidence_mode);

    tracing::info!(
        similarity,
        threshold,
        matched = verdict.matched,
        level = ?verdict.level,
        "verification decided"
    );

    Ok(VerificationReport {
        quality_1: first.quality,
        quality_2: second.quality,
        similarity: round3(similarity),
        threshold_used: threshold,
        matched: verdict.matched,
        confidence,
        confidence_level: verdict.level,
        requires_manual_review: verdict.requires_review,
    })
}

fn round2(x: f32) -> f32 {
    (x * 100.0).round() / 100.0
}

fn round3(x: f32) -> f32 {
    (x * 1000.0).round() / 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::DetectedFace;
    use image::{Rgb, RgbImage};
    use std::collections::VecDeque;

    /// Analyzer returning a pre-programmed response per call, in order.
    struct ScriptedAnalyzer {
        responses: VecDeque<Vec<DetectedFace>>,
    }

    impl ScriptedAnalyzer {
        fn new(responses: Vec<Vec<DetectedFace>>) -> Self {
            Self {
                responses: responses.into(),
            }
        }
    }

    impl FaceAnalyzer for ScriptedAnalyzer {
        fn detect_faces(&mut self, _image: &RgbImage) -> Result<Vec<DetectedFace>, AnalyzerError> {
            Ok(self.responses.pop_front().unwrap_or_default())
        }
    }

    fn test_config() -> PipelineConfig {
        let mut config = PipelineConfig::new(0.50, 0.03);
        config.rotation_angles = vec![0];
        config
    }

    /// High-frequency page: a 150x150 crop saturates both quality terms.
    fn sharp_page() -> RgbImage {
        RgbImage::from_fn(200, 200, |x, y| {
            if (x + y) % 2 == 0 {
                Rgb([255, 255, 255])
            } else {
                Rgb([0, 0, 0])
            }
        })
    }

    /// Uniform page: quality comes from the size term only (max 60).
    fn flat_page() -> RgbImage {
        RgbImage::from_pixel(200, 200, Rgb([128, 128, 128]))
    }

    fn face(bbox: [i32; 4], embedding: &[f32]) -> DetectedFace {
        DetectedFace {
            bbox,
            embedding: embedding.to_vec(),
        }
    }

    /// Unit vector whose dot product with [1, 0, 0] is exactly `sim`.
    fn emb_with_similarity(sim: f32) -> Vec<f32> {
        vec![sim, (1.0 - sim * sim).sqrt(), 0.0]
    }

    // --- select_threshold ---

    #[test]
    fn test_threshold_symmetric() {
        let config = test_config();
        for (a, b) in [(65u8, 68u8), (100, 10), (30, 90), (70, 70)] {
            assert_eq!(
                select_threshold(a, b, &config),
                select_threshold(b, a, &config)
            );
        }
    }

    #[test]
    fn test_asymmetric_quality_selects_lenient_threshold() {
        let config = test_config();
        // One face at 65 (>= high cutoff 60), the other at 68 (< low cutoff 70).
        assert_eq!(select_threshold(65, 68, &config), 0.33);
    }

    #[test]
    fn test_balanced_quality_selects_default_threshold() {
        let config = test_config();
        assert_eq!(select_threshold(100, 100, &config), 0.45);
        assert_eq!(select_threshold(75, 80, &config), 0.45);
        // Neither face reaches the high cutoff.
        assert_eq!(select_threshold(59, 55, &config), 0.45);
    }

    // --- classify ---

    #[test]
    fn test_classify_bands() {
        let config = test_config();
        let t = config.default_threshold;

        let v = classify(0.50, t, &config);
        assert_eq!(
            v,
            Verdict {
                matched: true,
                level: ConfidenceLevel::High,
                requires_review: false
            }
        );

        let v = classify(0.45, t, &config);
        assert_eq!(v.level, ConfidenceLevel::Medium);
        assert!(v.matched && !v.requires_review);

        // Exactly at the bottom of the tolerance band.
        let v = classify(0.42, t, &config);
        assert_eq!(v.level, ConfidenceLevel::Low);
        assert!(v.matched && v.requires_review);

        let v = classify(0.419, t, &config);
        assert_eq!(v.level, ConfidenceLevel::NoMatch);
        assert!(!v.matched && !v.requires_review);
    }

    #[test]
    fn test_classify_monotonic_in_similarity() {
        let config = test_config();
        let rank = |level: ConfidenceLevel| match level {
            ConfidenceLevel::NoMatch => 0,
            ConfidenceLevel::Low => 1,
            ConfidenceLevel::Medium => 2,
            ConfidenceLevel::High => 3,
        };

        let mut prev = 0;
        let mut sim = -1.0f32;
        while sim <= 1.0 {
            let r = rank(classify(sim, config.default_threshold, &config).level);
            assert!(r >= prev, "band regressed at similarity {sim}");
            prev = r;
            sim += 0.01;
        }
    }

    // --- confidence_score ---

    #[test]
    fn test_measured_confidence_rounds() {
        let c = confidence_score(true, 0.456789, &ConfidenceMode::Measured);
        assert!((c - 45.68).abs() < 1e-4);
        // Negative similarity passes through as an extreme no-match signal.
        let c = confidence_score(false, -0.5, &ConfidenceMode::Measured);
        assert!((c + 50.0).abs() < 1e-4);
    }

    #[test]
    fn test_simulated_confidence_stays_in_range() {
        let mode = ConfidenceMode::Simulated {
            match_range: (70.0, 85.0),
            no_match_range: (30.0, 45.0),
        };
        for _ in 0..100 {
            let c = confidence_score(true, 0.9, &mode);
            assert!((70.0..=85.0).contains(&c), "match confidence {c}");
            let c = confidence_score(false, 0.1, &mode);
            assert!((30.0..=45.0).contains(&c), "no-match confidence {c}");
        }
    }

    // --- locate_best_face ---

    #[test]
    fn test_locator_returns_none_without_faces() {
        let mut analyzer = ScriptedAnalyzer::new(vec![vec![]]);
        let found = locate_best_face(&mut analyzer, &flat_page(), &[0]).unwrap();
        assert!(found.is_none());
    }

    #[test]
    fn test_locator_records_rotation_angle() {
        // Nothing upright, then a face once the page is rotated.
        let mut analyzer = ScriptedAnalyzer::new(vec![
            vec![],
            vec![face([0, 0, 150, 150], &[1.0, 0.0, 0.0])],
        ]);
        let found = locate_best_face(&mut analyzer, &flat_page(), &[0, 10])
            .unwrap()
            .unwrap();
        assert_eq!(found.angle, 10);
        assert_eq!(found.quality, 60);
    }

    #[test]
    fn test_locator_picks_best_quality_face() {
        let mut analyzer = ScriptedAnalyzer::new(vec![vec![
            face([0, 0, 50, 50], &[0.0, 1.0, 0.0]),
            face([0, 0, 150, 150], &[1.0, 0.0, 0.0]),
        ]]);
        let found = locate_best_face(&mut analyzer, &flat_page(), &[0])
            .unwrap()
            .unwrap();
        assert_eq!(found.quality, 60);
        assert!((found.embedding.values()[0] - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_locator_tie_keeps_first_face() {
        // Equal quality: strictly-greater comparison keeps the first found.
        let mut analyzer = ScriptedAnalyzer::new(vec![vec![
            face([0, 0, 150, 150], &[1.0, 0.0, 0.0]),
            face([0, 0, 150, 150], &[0.0, 1.0, 0.0]),
        ]]);
        let found = locate_best_face(&mut analyzer, &flat_page(), &[0])
            .unwrap()
            .unwrap();
        assert!((found.embedding.values()[0] - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_locator_skips_zero_norm_embedding() {
        let mut analyzer =
            ScriptedAnalyzer::new(vec![vec![face([0, 0, 150, 150], &[0.0, 0.0, 0.0])]]);
        let found = locate_best_face(&mut analyzer, &flat_page(), &[0]).unwrap();
        assert!(found.is_none());
    }

    // --- verify scenarios ---

    #[test]
    fn test_single_page_fails() {
        let mut analyzer = ScriptedAnalyzer::new(vec![]);
        let outcome = verify(&mut analyzer, &[flat_page()], &test_config());
        match outcome {
            VerificationOutcome::Failed { reason } => {
                assert!(reason.contains("page"), "reason: {reason}");
                assert!(reason.contains("1"), "reason: {reason}");
            }
            other => panic!("expected failure, got {other:?}"),
        }
    }

    #[test]
    fn test_no_detectable_faces_fails() {
        let mut analyzer = ScriptedAnalyzer::new(vec![vec![], vec![]]);
        let outcome = verify(&mut analyzer, &[flat_page(), flat_page()], &test_config());
        match outcome {
            VerificationOutcome::Failed { reason } => {
                assert!(reason.contains("detect faces"), "reason: {reason}");
            }
            other => panic!("expected failure, got {other:?}"),
        }
    }

    #[test]
    fn test_high_similarity_is_high_confidence_match() {
        let mut analyzer = ScriptedAnalyzer::new(vec![
            vec![face([0, 0, 150, 150], &[1.0, 0.0, 0.0])],
            vec![face([0, 0, 150, 150], &emb_with_similarity(0.92))],
        ]);
        let pages = [sharp_page(), sharp_page()];
        let outcome = verify(&mut analyzer, &pages, &test_config());
        match outcome {
            VerificationOutcome::Success(report) => {
                assert_eq!(report.quality_1, 100);
                assert_eq!(report.quality_2, 100);
                assert!((report.similarity - 0.92).abs() < 1e-3);
                assert_eq!(report.threshold_used, 0.45);
                assert!(report.matched);
                assert_eq!(report.confidence_level, ConfidenceLevel::High);
                assert!(!report.requires_manual_review);
                assert!((report.confidence - 92.0).abs() < 0.01);
            }
            other => panic!("expected success, got {other:?}"),
        }
    }

    #[test]
    fn test_borderline_similarity_flags_manual_review() {
        // Similarity exactly at threshold - band/2 = 0.435.
        let mut analyzer = ScriptedAnalyzer::new(vec![
            vec![face([0, 0, 150, 150], &[1.0, 0.0, 0.0])],
            vec![face([0, 0, 150, 150], &emb_with_similarity(0.435))],
        ]);
        let pages = [sharp_page(), sharp_page()];
        let outcome = verify(&mut analyzer, &pages, &test_config());
        match outcome {
            VerificationOutcome::Success(report) => {
                assert!(report.matched);
                assert_eq!(report.confidence_level, ConfidenceLevel::Low);
                assert!(report.requires_manual_review);
            }
            other => panic!("expected success, got {other:?}"),
        }
    }

    #[test]
    fn test_quality_below_floor_fails_regardless_of_similarity() {
        // Identical embeddings (similarity 1.0), but the first face crop is
        // a small uniform region scoring far below the floor of 25.
        let mut analyzer = ScriptedAnalyzer::new(vec![
            vec![face([0, 0, 61, 61], &[1.0, 0.0, 0.0])],
            vec![face([0, 0, 150, 150], &[1.0, 0.0, 0.0])],
        ]);
        let pages = [flat_page(), sharp_page()];
        let outcome = verify(&mut analyzer, &pages, &test_config());
        match outcome {
            VerificationOutcome::Failed { reason } => {
                assert!(reason.contains("quality too low"), "reason: {reason}");
                assert!(reason.contains("9"), "reason: {reason}");
            }
            other => panic!("expected failure, got {other:?}"),
        }
    }

    #[test]
    fn test_pair_is_first_two_successful_pages() {
        // Page 2 yields nothing; the pair is pages 1 and 3.
        let mut analyzer = ScriptedAnalyzer::new(vec![
            vec![face([0, 0, 150, 150], &[1.0, 0.0, 0.0])],
            vec![],
            vec![face([0, 0, 150, 150], &emb_with_similarity(0.92))],
        ]);
        let pages = [sharp_page(), sharp_page(), sharp_page()];
        let outcome = verify(&mut analyzer, &pages, &test_config());
        assert!(matches!(outcome, VerificationOutcome::Success(_)));
    }

    #[test]
    fn test_deterministic_path_is_idempotent() {
        let script = || {
            ScriptedAnalyzer::new(vec![
                vec![face([0, 0, 150, 150], &[1.0, 0.0, 0.0])],
                vec![face([0, 0, 150, 150], &emb_with_similarity(0.7))],
            ])
        };
        let pages = [sharp_page(), sharp_page()];
        let config = test_config();
        let a = verify(&mut script(), &pages, &config);
        let b = verify(&mut script(), &pages, &config);
        assert_eq!(a, b);
    }

    #[test]
    fn test_simulated_mode_only_varies_confidence() {
        let script = || {
            ScriptedAnalyzer::new(vec![
                vec![face([0, 0, 150, 150], &[1.0, 0.0, 0.0])],
                vec![face([0, 0, 150, 150], &emb_with_similarity(0.92))],
            ])
        };
        let pages = [sharp_page(), sharp_page()];
        let mut config = test_config();
        config.confidence_mode = ConfidenceMode::Simulated {
            match_range: (70.0, 85.0),
            no_match_range: (30.0, 45.0),
        };

        let (a, b) = (
            verify(&mut script(), &pages, &config),
            verify(&mut script(), &pages, &config),
        );
        let (VerificationOutcome::Success(a), VerificationOutcome::Success(b)) = (a, b) else {
            panic!("expected success in both runs");
        };

        assert!((70.0..=85.0).contains(&a.confidence));
        assert!((70.0..=85.0).contains(&b.confidence));
        assert_eq!(a.similarity, b.similarity);
        assert_eq!(a.threshold_used, b.threshold_used);
        assert_eq!(a.matched, b.matched);
        assert_eq!(a.confidence_level, b.confidence_level);
        assert_eq!(a.requires_manual_review, b.requires_manual_review);
    }

    // --- config validation ---

    #[test]
    fn test_validate_accepts_sane_config() {
        assert!(test_config().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_tolerance_band() {
        let mut config = test_config();
        config.tolerance_band = 0.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NonPositiveToleranceBand(_))
        ));

        // Band wider than the gap between high confidence and the threshold.
        config.tolerance_band = 0.06;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ToleranceBandTooWide { .. })
        ));
    }

    #[test]
    fn test_validate_rejects_missing_upright_angle() {
        let mut config = test_config();
        config.rotation_angles = vec![-10, 10];
        assert!(matches!(
            config.validate(),
            Err(ConfigError::MissingUprightAngle)
        ));
        config.rotation_angles = vec![];
        assert!(matches!(
            config.validate(),
            Err(ConfigError::EmptyRotationAngles)
        ));
    }

    #[test]
    fn test_validate_rejects_threshold_inversion() {
        let mut config = test_config();
        config.lenient_threshold = 0.45;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ThresholdOrder { .. })
        ));
    }

    #[test]
    fn test_validate_rejects_overlapping_simulated_ranges() {
        let mut config = test_config();
        config.confidence_mode = ConfidenceMode::Simulated {
            match_range: (40.0, 85.0),
            no_match_range: (30.0, 45.0),
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::SimulatedRanges)
        ));
    }
}
