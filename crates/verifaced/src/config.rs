use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use veriface_core::{ConfidenceMode, PipelineConfig};

/// Daemon configuration, loaded from environment variables.
pub struct Config {
    /// Directory containing ONNX model files.
    pub model_dir: PathBuf,
    /// Rotation angles (degrees) tried per page, in order.
    pub rotation_angles: Vec<i32>,
    /// Minimum acceptable quality for the worse face of a pair.
    pub min_quality: u8,
    /// Quality cutoff at or above which a face counts as high quality.
    pub high_quality: u8,
    /// Quality cutoff below which a face counts as low quality.
    pub low_quality: u8,
    /// Similarity threshold for a balanced-quality pair.
    pub default_threshold: f32,
    /// Relaxed threshold for the asymmetric-quality regime.
    pub lenient_threshold: f32,
    /// Similarity at or above which a match is high confidence. Required.
    pub high_confidence: f32,
    /// Width of the manual-review band below the threshold. Required.
    pub tolerance_band: f32,
    /// Whether to sample confidence instead of deriving it (staging only).
    pub simulate_confidence: bool,
    pub sim_match_range: (f32, f32),
    pub sim_no_match_range: (f32, f32),
    /// Serve on the session bus instead of the system bus (development).
    pub session_bus: bool,
}

impl Config {
    /// Load configuration from `VERIFACE_*` environment variables.
    ///
    /// `VERIFACE_HIGH_CONFIDENCE` and `VERIFACE_TOLERANCE_BAND` have no
    /// defaults and must be set; everything else falls back to field-tested
    /// values.
    pub fn from_env() -> Result<Self> {
        let model_dir = std::env::var("VERIFACE_MODEL_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| veriface_core::default_model_dir());

        let rotation_angles = match std::env::var("VERIFACE_ROTATION_ANGLES") {
            Ok(raw) => parse_angles(&raw)?,
            Err(_) => vec![0, -10, 10, -20, 20, -30, 30],
        };

        Ok(Self {
            model_dir,
            rotation_angles,
            min_quality: env_u8("VERIFACE_MIN_QUALITY", 25),
            high_quality: env_u8("VERIFACE_HIGH_QUALITY", 60),
            low_quality: env_u8("VERIFACE_LOW_QUALITY", 70),
            default_threshold: env_f32("VERIFACE_DEFAULT_THRESHOLD", 0.45),
            lenient_threshold: env_f32("VERIFACE_LENIENT_THRESHOLD", 0.33),
            high_confidence: required_f32("VERIFACE_HIGH_CONFIDENCE")?,
            tolerance_band: required_f32("VERIFACE_TOLERANCE_BAND")?,
            simulate_confidence: env_bool("VERIFACE_SIMULATE_CONFIDENCE", false),
            sim_match_range: (
                env_f32("VERIFACE_SIM_MATCH_MIN", 70.0),
                env_f32("VERIFACE_SIM_MATCH_MAX", 85.0),
            ),
            sim_no_match_range: (
                env_f32("VERIFACE_SIM_NO_MATCH_MIN", 30.0),
                env_f32("VERIFACE_SIM_NO_MATCH_MAX", 45.0),
            ),
            session_bus: env_bool("VERIFACE_SESSION_BUS", false),
        })
    }

    /// Path to the SCRFD detection model.
    pub fn scrfd_model_path(&self) -> String {
        self.model_dir
            .join("det_10g.onnx")
            .to_string_lossy()
            .into_owned()
    }

    /// Path to the ArcFace recognition model.
    pub fn arcface_model_path(&self) -> String {
        self.model_dir
            .join("w600k_r50.onnx")
            .to_string_lossy()
            .into_owned()
    }

    /// Assemble the pipeline tunables from this configuration.
    pub fn pipeline_config(&self) -> PipelineConfig {
        PipelineConfig {
            rotation_angles: self.rotation_angles.clone(),
            min_quality: self.min_quality,
            high_quality: self.high_quality,
            low_quality: self.low_quality,
            default_threshold: self.default_threshold,
            lenient_threshold: self.lenient_threshold,
            high_confidence: self.high_confidence,
            tolerance_band: self.tolerance_band,
            confidence_mode: if self.simulate_confidence {
                ConfidenceMode::Simulated {
                    match_range: self.sim_match_range,
                    no_match_range: self.sim_no_match_range,
                }
            } else {
                ConfidenceMode::Measured
            },
        }
    }
}

/// Parse a comma-separated angle list, e.g. "0,-10,10,-20,20".
fn parse_angles(raw: &str) -> Result<Vec<i32>> {
    raw.split(',')
        .map(|part| {
            part.trim()
                .parse::<i32>()
                .with_context(|| format!("invalid rotation angle {part:?}"))
        })
        .collect()
}

fn required_f32(key: &str) -> Result<f32> {
    let raw = std::env::var(key)
        .map_err(|_| anyhow!("{key} is required and not set; refusing to guess a default"))?;
    raw.parse()
        .with_context(|| format!("{key} must be a float, got {raw:?}"))
}

fn env_f32(key: &str, default: f32) -> f32 {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

fn env_u8(key: &str, default: u8) -> u8 {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

fn env_bool(key: &str, default: bool) -> bool {
    std::env::var(key).map(|v| v != "0").unwrap_or(default)
}
