//! OpenAPI documentation.

use utoipa::OpenApi;

use crate::error;
use crate::handlers;
use crate::setup::routes::HealthCheckResponse;
use vidmeta_core::MetadataRecord;

pub fn get_openapi_spec() -> utoipa::openapi::OpenApi {
    ApiDoc::openapi()
}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Vidmeta API",
        version = "0.1.0",
        description = "Video metadata extraction API. Upload a video file and receive a flat metadata record read by ffprobe; every record is also saved as a JSON document."
    ),
    paths(
        handlers::video_upload::upload_video,
        crate::setup::routes::health_check,
    ),
    components(schemas(MetadataRecord, error::ErrorResponse, HealthCheckResponse)),
    tags(
        (name = "videos", description = "Video metadata extraction"),
        (name = "health", description = "Service health")
    )
)]
pub struct ApiDoc;
