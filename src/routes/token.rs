use axum::Json;
use serde::{Deserialize, Serialize};

pub const MOCK_ACCESS_TOKEN: &str = "mock_pcc_access_token_12345";
pub const MOCK_TOKEN_TYPE: &str = "Bearer";
pub const MOCK_EXPIRES_IN: u64 = 3600;

/// OAuth token response as returned by the PointClickCare auth service.
///
/// Field order is the wire order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: u64,
}

impl TokenResponse {
    /// The canned token handed out to every caller.
    pub fn mock() -> Self {
        Self {
            access_token: MOCK_ACCESS_TOKEN.to_string(),
            token_type: MOCK_TOKEN_TYPE.to_string(),
            expires_in: MOCK_EXPIRES_IN,
        }
    }
}

/// POST /api/v1/auth/token — client credentials grant (mocked)
///
/// The request is never read, so any body or content type is accepted.
pub async fn token() -> Json<TokenResponse> {
    tracing::debug!("Issuing mock PCC access token");
    Json(TokenResponse::mock())
}
