use axum::{
    extract::{Path, State},
    http::{HeaderMap, HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use tracing::{debug, info};

use crate::errors::{AppError, AppResult};
use crate::state::AppState;

const CONTENT_TYPE: &str = "audio/mpeg";

/// Generated filenames never start with a dot or contain separators
fn is_valid_filename(filename: &str) -> bool {
    !filename.is_empty()
        && !filename.starts_with('.')
        && !filename.contains("..")
        && !filename.contains('/')
        && !filename.contains('\\')
}

/// Download a generated MP3 as an attachment
pub async fn download_audio(
    State(state): State<Arc<AppState>>,
    Path(filename): Path<String>,
) -> AppResult<Response> {
    if !is_valid_filename(&filename) {
        return Err(AppError::InvalidFilename);
    }

    let path = state.config.audio_dir().join(&filename);
    debug!(path = %path.display(), "Audio download requested");

    // Directories and other non-files are treated as missing
    if !tokio::fs::metadata(&path)
        .await
        .is_ok_and(|metadata| metadata.is_file())
    {
        return Err(AppError::NotFound("Audio file not found".to_string()));
    }

    let body = match tokio::fs::read(&path).await {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(AppError::NotFound("Audio file not found".to_string()));
        }
        Err(e) => {
            return Err(AppError::Internal(format!(
                "Failed to read {}: {e}",
                path.display()
            )));
        }
    };

    info!(filename = %filename, size = body.len(), "Audio download");

    let mut headers = HeaderMap::new();
    headers.insert(header::CONTENT_TYPE, HeaderValue::from_static(CONTENT_TYPE));
    if let Ok(len) = HeaderValue::from_str(&body.len().to_string()) {
        headers.insert(header::CONTENT_LENGTH, len);
    }
    if let Ok(disposition) =
        HeaderValue::from_str(&format!("attachment; filename=\"{filename}\""))
    {
        headers.insert(header::CONTENT_DISPOSITION, disposition);
    }

    Ok((StatusCode::OK, headers, body).into_response())
}
