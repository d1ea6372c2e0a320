use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;
use crate::utils::upload::extract_multipart_file;
use axum::{
    extract::{multipart::MultipartRejection, Multipart, State},
    Json,
};
use std::sync::Arc;
use vidmeta_core::MetadataRecord;

#[utoipa::path(
    post,
    path = "/api/videos/upload",
    tag = "videos",
    request_body(content = inline(Object), content_type = "multipart/form-data", description = "Video file in a field named 'file'"),
    responses(
        (status = 200, description = "Metadata extracted and saved", body = MetadataRecord),
        (status = 400, description = "Invalid upload or unparseable probe output", body = ErrorResponse),
        (status = 404, description = "Staged file vanished before probing", body = ErrorResponse),
        (status = 413, description = "File too large", body = ErrorResponse),
        (status = 500, description = "Prober or persistence failure", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, multipart), fields(request_id = %uuid::Uuid::new_v4()))]
pub async fn upload_video(
    State(state): State<Arc<AppState>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<MetadataRecord>, HttpAppError> {
    let staged = extract_multipart_file(multipart?).await?;

    tracing::info!(
        file_name = %staged.original_name,
        size_bytes = staged.size_bytes,
        staged_path = %staged.path().display(),
        "Video upload staged"
    );

    let record = state
        .extractor
        .extract(staged.path(), &staged.original_name)
        .await?;

    let saved_to = state.store.save(&record).await?;

    tracing::info!(
        file_name = %record.file_name,
        saved_to = %saved_to.display(),
        "Video metadata stored"
    );

    Ok(Json(record))
}
