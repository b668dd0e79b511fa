//! CLI output: error mapping from domain errors to stable CLI surface.

use crate::error::ApiError;

/// Map fatal errors to the line printed on stderr.
pub fn map_error(e: &ApiError) -> String {
    format!("Error: {}", e)
}
