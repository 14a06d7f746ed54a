use axum::http::StatusCode;
use axum::Extension;

use super::ApiError;
use super::ApiSuccess;
use super::IdentityData;
use crate::inbound::http::middleware::CurrentIdentity;

pub async fn current_identity(
    Extension(current): Extension<CurrentIdentity>,
) -> Result<ApiSuccess<IdentityData>, ApiError> {
    // The guard already resolved the identity; just echo the view back.
    Ok(ApiSuccess::new(StatusCode::OK, IdentityData::from(&current.0)))
}
