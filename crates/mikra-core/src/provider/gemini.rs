//! Direct calls to the provider's generation endpoint.

use crate::error::AnalysisError;

use super::wire::{GenerateContentRequest, GenerateContentResponse};

const API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// POST the envelope directly to the provider. The model name is part of the
/// URL and the key travels as a query parameter, so the body must not carry
/// `model`.
pub async fn generate(
    client: &reqwest::Client,
    model: &str,
    api_key: &str,
    request: &GenerateContentRequest,
) -> Result<GenerateContentResponse, AnalysisError> {
    debug_assert!(request.model.is_none(), "direct calls carry the model in the URL");

    let url = format!("{API_BASE}/{model}:generateContent");

    let response = client
        .post(&url)
        .query(&[("key", api_key)])
        .json(request)
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(AnalysisError::Provider {
            status: status.as_u16(),
            body,
        });
    }

    Ok(response.json().await?)
}
