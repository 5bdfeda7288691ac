// src/publisher.rs

//! Publishes a scannable QR image pointing at a quiz.

use std::path::{Path, PathBuf};

use image::Luma;
use qrcode::QrCode;
use thiserror::Error;
use url::Url;

use crate::config::Config;

/// Public URL prefix under which `Config::qr_dir` is served.
pub const QR_PUBLIC_PREFIX: &str = "/static/qrcodes";

#[derive(Debug, Error)]
pub enum PublishError {
    #[error("invalid access url: {0}")]
    Url(#[from] url::ParseError),

    #[error("failed to encode QR code: {0}")]
    Encode(#[from] qrcode::types::QrError),

    #[error("failed to write QR image: {0}")]
    Image(#[from] image::ImageError),

    #[error("failed to prepare QR directory: {0}")]
    Io(#[from] std::io::Error),

    #[error("QR task panicked: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// Access URL a student scans: `{base}/quiz/{quiz_id}`.
pub fn quiz_url(base: &str, quiz_id: &str) -> Result<Url, PublishError> {
    let mut url = Url::parse(base)?;
    url.path_segments_mut()
        .map_err(|_| PublishError::Url(url::ParseError::RelativeUrlWithCannotBeABaseBase))?
        .pop_if_empty()
        .extend(["quiz", quiz_id]);
    Ok(url)
}

/// Path (relative to the site root) at which a quiz's QR image is served.
pub fn qr_public_path(quiz_id: &str) -> String {
    format!("{}/{}.png", QR_PUBLIC_PREFIX, quiz_id)
}

/// Renders `data` as a QR PNG at `path`, overwriting any existing file.
fn write_qr_png(data: &str, path: &Path) -> Result<(), PublishError> {
    let code = QrCode::new(data.as_bytes())?;
    let image = code.render::<Luma<u8>>().min_dimensions(256, 256).build();
    image.save(path)?;
    Ok(())
}

/// Writes `{qr_dir}/{quiz_id}.png` and returns its public path.
///
/// The directory is created when missing; an existing image for the same id
/// is replaced.
pub async fn publish_qr(config: &Config, quiz_id: &str) -> Result<String, PublishError> {
    let url = quiz_url(&config.public_base_url, quiz_id)?;

    let dir = config.qr_dir();
    tokio::fs::create_dir_all(&dir).await?;

    let file: PathBuf = dir.join(format!("{}.png", quiz_id));
    let target = file.clone();
    tokio::task::spawn_blocking(move || write_qr_png(url.as_str(), &target)).await??;

    tracing::info!("Wrote QR code for quiz {} to {}", quiz_id, file.display());

    Ok(qr_public_path(quiz_id))
}
