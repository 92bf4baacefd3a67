//! Shared response envelope types.
//!
//! `/api/v1` resources answer with `{ "data": ... }`; the `/functions`
//! endpoints answer with `{ "success": true, ... }`.

use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}

/// `{ "success": true, ...fields of T }` envelope for `/functions` endpoints.
///
/// `T` must serialize to a JSON object.
#[derive(Debug, Serialize)]
pub struct SuccessResponse<T: Serialize> {
    pub success: bool,
    #[serde(flatten)]
    pub body: T,
}

impl<T: Serialize> SuccessResponse<T> {
    pub fn new(body: T) -> Self {
        Self {
            success: true,
            body,
        }
    }
}
