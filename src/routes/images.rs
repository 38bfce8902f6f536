use axum::{
    extract::{Path, Request, State},
    response::{IntoResponse, Response},
};
use tower::ServiceExt;
use tower_http::services::ServeFile;

use crate::{error::AppResult, state::AppState};

/// `GET /image/{file}`
///
/// Unknown names are answered with the placeholder image instead of 404.
pub async fn get_image(
    State(state): State<AppState>,
    Path(file): Path<String>,
    req: Request,
) -> AppResult<Response> {
    let resolved = state.images.resolve(&file).await?;
    if resolved.is_placeholder() {
        state.metrics.inc_image_fallbacks();
    }

    let res = match ServeFile::new(resolved.path()).oneshot(req).await {
        Ok(res) => res,
        Err(never) => match never {},
    };
    Ok(res.into_response())
}
