//! Shared HTTP plumbing for the pure text-in/text-out processor stand-ins
//! (orders 1-4). Each upstream service is expected to accept `{"input":
//! <payload>}` and reply with `{"result": <text>}`.

use serde::Deserialize;
use serde_json::json;

use crate::error::{ProcessorError, ProcessorResult};

#[derive(Debug, Deserialize)]
struct TextResult {
    result: String,
}

pub async fn call_text_service(
    client: &reqwest::Client,
    url: &str,
    input: &str,
) -> ProcessorResult<String> {
    let response = client.post(url).json(&json!({ "input": input })).send().await?;
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(ProcessorError::Upstream {
            status: status.as_u16(),
            body,
        });
    }
    let parsed: TextResult = response.json().await?;
    Ok(parsed.result)
}
