//! Calls routed through a caller-supplied proxy endpoint.
//!
//! The proxy holds the provider credential; we send it the same envelope as
//! a direct call, plus the model name, and treat its response as the
//! provider's. A proxy failure reports only the status — the proxy's body is
//! its own business.

use crate::error::AnalysisError;

use super::wire::{GenerateContentRequest, GenerateContentResponse};

pub async fn generate(
    client: &reqwest::Client,
    proxy_url: &str,
    request: &GenerateContentRequest,
) -> Result<GenerateContentResponse, AnalysisError> {
    debug_assert!(request.model.is_some(), "proxy envelopes carry the model");

    let response = client.post(proxy_url.trim()).json(request).send().await?;

    let status = response.status();
    if !status.is_success() {
        return Err(AnalysisError::Proxy {
            status: status.as_u16(),
        });
    }

    Ok(response.json().await?)
}
