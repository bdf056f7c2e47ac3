use std::path::PathBuf;
use std::time::Instant;

use zbus::interface;

use crate::engine::EngineHandle;
use veriface_core::VerificationOutcome;

/// D-Bus interface for the Veriface document verification daemon.
///
/// Bus name: org.freedesktop.Veriface1
/// Object path: /org/freedesktop/Veriface1
pub struct VerifaceService {
    pub engine: EngineHandle,
}

#[interface(name = "org.freedesktop.Veriface1")]
impl VerifaceService {
    /// Verify that the faces on a document's pages belong to the same person.
    ///
    /// `pages` are filesystem paths to pre-rasterized page images, in page
    /// order. Returns a JSON object with a `status` of SUCCESS or FAILED;
    /// expected failures are reported in-band, never as a D-Bus error.
    async fn verify_pages(&self, pages: Vec<String>) -> zbus::fdo::Result<String> {
        tracing::info!(pages = pages.len(), "verify_pages requested");
        let started = Instant::now();

        let paths: Vec<PathBuf> = pages.into_iter().map(PathBuf::from).collect();

        let outcome = match self.engine.verify(paths).await {
            Ok(outcome) => outcome,
            Err(err) => {
                tracing::error!(error = %err, "engine unavailable");
                VerificationOutcome::Failed {
                    reason: "model not initialized".into(),
                }
            }
        };

        let elapsed = started.elapsed().as_secs_f64();
        match &outcome {
            VerificationOutcome::Success(report) => {
                tracing::info!(
                    matched = report.matched,
                    similarity = report.similarity,
                    confidence_level = ?report.confidence_level,
                    elapsed_seconds = elapsed,
                    "verification completed"
                );
            }
            VerificationOutcome::Failed { reason } => {
                tracing::info!(reason = %reason, elapsed_seconds = elapsed, "verification failed");
            }
        }

        let mut value = serde_json::to_value(&outcome)
            .map_err(|e| zbus::fdo::Error::Failed(e.to_string()))?;
        if let Some(obj) = value.as_object_mut() {
            obj.insert(
                "processing_time_seconds".into(),
                serde_json::json!((elapsed * 1000.0).round() / 1000.0),
            );
        }

        Ok(value.to_string())
    }

    /// Return daemon status information.
    async fn status(&self) -> zbus::fdo::Result<String> {
        Ok(serde_json::json!({
            "version": env!("CARGO_PKG_VERSION"),
            "models_loaded": true,
        })
        .to_string())
    }
}
