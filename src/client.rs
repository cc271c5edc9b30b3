//! Client side of the PCC client-credentials flow.
//!
//! Used to smoke-test a running mock (or the real auth and consumer services)
//! from the CLI: obtain a token, then read a patient summary with it.

use crate::app::TOKEN_PATH;
use crate::routes::token::TokenResponse;

/// Host left in sample environment files; never a real deployment.
const PLACEHOLDER_HOST: &str = "api.example.com";

/// Check a service base URL and return it without a trailing slash.
fn base_url<'a>(label: &str, url: &'a str) -> Result<&'a str, String> {
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(format!("{label} URL '{url}' must be a valid HTTP(S) URL"));
    }
    if url.contains(PLACEHOLDER_HOST) {
        return Err(format!(
            "{label} URL '{url}' is still the {PLACEHOLDER_HOST} placeholder; provide the real service URL"
        ));
    }
    Ok(url.trim_end_matches('/'))
}

/// Turn a non-2xx response into an error carrying the response body.
async fn check_status(response: reqwest::Response, what: &str) -> Result<reqwest::Response, String> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(format!("{what} returned {status}: {body}"))
}

/// Request an access token with the client credentials grant.
pub async fn fetch_token(
    auth_url: &str,
    client_id: &str,
    client_secret: &str,
) -> Result<TokenResponse, String> {
    let url = format!("{}{}", base_url("auth", auth_url)?, TOKEN_PATH);

    tracing::info!(%url, "Authenticating");

    let params = [
        ("grant_type", "client_credentials"),
        ("client_id", client_id),
        ("client_secret", client_secret),
    ];

    let response = reqwest::Client::new()
        .post(&url)
        .form(&params)
        .send()
        .await
        .map_err(|e| format!("token request to {url} failed: {e}"))?;
    let response = check_status(response, "token endpoint").await?;

    response
        .json::<TokenResponse>()
        .await
        .map_err(|e| format!("failed to decode token response: {e}"))
}

/// Fetch the summary for one patient from the consumer service.
pub async fn fetch_patient_summary(
    consumer_url: &str,
    token: &str,
    simpl_id: &str,
) -> Result<serde_json::Value, String> {
    if simpl_id.is_empty() || simpl_id.contains('/') {
        return Err(format!("simpl_id '{simpl_id}' must be a single non-empty path segment"));
    }
    let url = format!(
        "{}/api/v1/pcc/{simpl_id}/summary",
        base_url("consumer", consumer_url)?
    );

    tracing::info!(%url, simpl_id, "Fetching patient summary");

    let response = reqwest::Client::new()
        .get(&url)
        .bearer_auth(token)
        .header(reqwest::header::ACCEPT, "application/json")
        .send()
        .await
        .map_err(|e| format!("summary request to {url} failed: {e}"))?;
    let response = check_status(response, "summary endpoint").await?;

    response
        .json::<serde_json::Value>()
        .await
        .map_err(|e| format!("failed to decode patient summary: {e}"))
}
