//! HTTP request handlers for API endpoints

use axum::{
    body::Bytes,
    extract::{Multipart, State},
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use notes_core::{has_extension, output_filename, SpeakerNotes};
use notes_docx::DOCX_CONTENT_TYPE;
use std::io::BufReader;
use uuid::Uuid;

use crate::{error::ApiError, staging::StagedUpload, types::HealthResponse, AppState, NotesResponse};

/// Multipart field carrying the presentation.
const FILE_FIELD: &str = "file";

/// One uploaded presentation.
#[derive(Debug, Clone)]
pub struct Upload {
    pub filename: String,
    pub bytes: Bytes,
}

/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Convert an uploaded presentation into a notes document download.
pub async fn process_document(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Response, ApiError> {
    let upload = read_upload(&mut multipart, state.config.max_upload_bytes).await?;
    let request_id = Uuid::new_v4();
    log::info!(
        "[{}] Document request: {} ({} bytes)",
        request_id,
        upload.filename,
        upload.bytes.len()
    );

    let download_name = output_filename(&upload.filename);
    let document = run_blocking(&state, request_id, move |state| {
        let notes = extract_upload(state, &upload, request_id)?;
        state.builder.build(&notes.slides)
    })
    .await?;

    log::info!(
        "[{}] Sending {} ({} bytes)",
        request_id,
        download_name,
        document.len()
    );

    Ok((
        [
            (header::CONTENT_TYPE, DOCX_CONTENT_TYPE.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", download_name),
            ),
        ],
        document,
    )
        .into_response())
}

/// Extract the notes of an uploaded presentation as JSON.
pub async fn extract_notes(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<NotesResponse>, ApiError> {
    let upload = read_upload(&mut multipart, state.config.max_upload_bytes).await?;
    let request_id = Uuid::new_v4();
    log::info!(
        "[{}] Notes request: {} ({} bytes)",
        request_id,
        upload.filename,
        upload.bytes.len()
    );

    let notes = run_blocking(&state, request_id, move |state| {
        extract_upload(state, &upload, request_id)
    })
    .await?;

    Ok(Json(NotesResponse::new(notes)))
}

/// Pull exactly one non-empty `.pptx` file of at most `max_bytes` out of the form.
pub async fn read_upload(multipart: &mut Multipart, max_bytes: usize) -> Result<Upload, ApiError> {
    let mut upload: Option<Upload> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(ApiError::from_multipart)?
    {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }
        if upload.is_some() {
            return Err(ApiError::invalid_upload("Only one file may be uploaded at a time"));
        }

        let filename = field.file_name().unwrap_or_default().to_string();
        let bytes = field.bytes().await.map_err(ApiError::from_multipart)?;
        upload = Some(Upload { filename, bytes });
    }

    let upload = upload.ok_or_else(|| ApiError::invalid_upload("No file provided"))?;

    if upload.filename.is_empty() {
        return Err(ApiError::invalid_upload("No selected file"));
    }
    if !has_extension(&upload.filename, "pptx") {
        return Err(ApiError::invalid_upload(
            "File must be a PowerPoint (.pptx) file",
        ));
    }
    if upload.bytes.is_empty() {
        return Err(ApiError::invalid_upload("The uploaded file is empty"));
    }
    if upload.bytes.len() > max_bytes {
        return Err(ApiError::too_large(max_bytes));
    }

    Ok(upload)
}

/// Run the extraction, staging the upload to disk first when configured.
fn extract_upload(
    state: &AppState,
    upload: &Upload,
    request_id: Uuid,
) -> notes_core::Result<SpeakerNotes> {
    let notes = match &state.config.staging_dir {
        Some(dir) => {
            let staged = StagedUpload::create(dir, &request_id, &upload.bytes)?;
            let reader = BufReader::new(staged.reopen()?);
            state.pipeline.parse(reader, &upload.filename)
            // `staged` is dropped here, removing the file on every path.
        }
        None => state.pipeline.parse_bytes(&upload.bytes, &upload.filename),
    }?;

    log::info!(
        "[{}] Extracted {} slides ({} with notes)",
        request_id,
        notes.slide_count(),
        notes.annotated_count()
    );

    Ok(notes)
}

/// Run synchronous pipeline work off the async executor, under the
/// configured timeout.
async fn run_blocking<T, F>(state: &AppState, request_id: Uuid, work: F) -> Result<T, ApiError>
where
    T: Send + 'static,
    F: FnOnce(&AppState) -> notes_core::Result<T> + Send + 'static,
{
    let task_state = state.clone();
    let task = tokio::task::spawn_blocking(move || work(&task_state));

    let joined = tokio::time::timeout(state.config.request_timeout(), task)
        .await
        .map_err(|_| {
            log::error!("[{}] Timed out", request_id);
            ApiError::timeout()
        })?;

    let result = joined.map_err(|e| {
        log::error!("[{}] Processing task failed: {}", request_id, e);
        ApiError::internal("Failed to process file.")
    })?;

    result.map_err(|e| {
        log::error!("[{}] {}", request_id, e);
        ApiError::from(e)
    })
}
