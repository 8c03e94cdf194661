//! Analytics Errors

use tracing::error;

use beyond_app::domain::analytics::AnalyticsServiceError;

use crate::errors::ApiError;

pub(crate) fn into_api_error(error: AnalyticsServiceError) -> ApiError {
    match error {
        AnalyticsServiceError::NotFound => ApiError::not_found(error.to_string()),
        AnalyticsServiceError::Sql(ref source) => {
            error!("failed to read campaign analytics: {source}");

            ApiError::internal(error.to_string())
        }
    }
}
