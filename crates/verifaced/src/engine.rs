use std::path::PathBuf;

use thiserror::Error;
use tokio::sync::{mpsc, oneshot};
use veriface_core::{
    FaceAnalyzer, OnnxFaceAnalyzer, PipelineConfig, VerificationOutcome,
};

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("analyzer error: {0}")]
    Analyzer(#[from] veriface_core::AnalyzerError),
    #[error("engine thread exited")]
    ChannelClosed,
}

/// Messages sent from D-Bus handlers to the engine thread.
enum EngineRequest {
    Verify {
        pages: Vec<PathBuf>,
        reply: oneshot::Sender<VerificationOutcome>,
    },
}

/// Clone-safe handle to the engine thread.
#[derive(Clone)]
pub struct EngineHandle {
    tx: mpsc::Sender<EngineRequest>,
}

impl EngineHandle {
    /// Request verification of a document's page images.
    ///
    /// Expected failures (bad pages, no faces, low quality) come back as a
    /// FAILED outcome; an `Err` here means the engine itself is gone.
    pub async fn verify(&self, pages: Vec<PathBuf>) -> Result<VerificationOutcome, EngineError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.tx
            .send(EngineRequest::Verify {
                pages,
                reply: reply_tx,
            })
            .await
            .map_err(|_| EngineError::ChannelClosed)?;
        reply_rx.await.map_err(|_| EngineError::ChannelClosed)
    }
}

/// Spawn the engine on a dedicated OS thread.
///
/// Loads both ONNX models synchronously, failing fast if either is missing,
/// then enters a request loop. The channel capacity of 1 bounds the daemon
/// to a single in-flight verification; further callers queue on send.
pub fn spawn_engine(
    scrfd_path: &str,
    arcface_path: &str,
    config: PipelineConfig,
) -> Result<EngineHandle, EngineError> {
    let mut analyzer = OnnxFaceAnalyzer::load(scrfd_path, arcface_path)?;
    tracing::info!(scrfd = scrfd_path, arcface = arcface_path, "models loaded");

    let (tx, mut rx) = mpsc::channel::<EngineRequest>(1);

    std::thread::Builder::new()
        .name("veriface-engine".into())
        .spawn(move || {
            tracing::info!("engine thread started");
            while let Some(req) = rx.blocking_recv() {
                match req {
                    EngineRequest::Verify { pages, reply } => {
                        let outcome = run_verify(&mut analyzer, &pages, &config);
                        let _ = reply.send(outcome);
                    }
                }
            }
            tracing::info!("engine thread exiting");
        })
        .expect("failed to spawn engine thread");

    Ok(EngineHandle { tx })
}

/// Decode the page images and run the verification pipeline.
fn run_verify(
    analyzer: &mut dyn FaceAnalyzer,
    pages: &[PathBuf],
    config: &PipelineConfig,
) -> VerificationOutcome {
    let mut images = Vec::with_capacity(pages.len());
    for path in pages {
        match image::open(path) {
            Ok(img) => images.push(img.to_rgb8()),
            Err(err) => {
                tracing::error!(path = %path.display(), error = %err, "failed to read page image");
                return VerificationOutcome::Failed {
                    reason: format!("could not read page image: {}", path.display()),
                };
            }
        }
    }

    veriface_core::verify(analyzer, &images, config)
}
