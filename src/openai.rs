use color_eyre::{
    eyre::{bail, OptionExt, WrapErr},
    Result,
};
use serde::{Deserialize, Serialize};

use crate::{
    models::HistoryEntry,
    names,
    services::chat::{Completion, CompletionProvider, CompletionRequest, ToolCall},
    tools::ToolSpec,
};

#[derive(Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: &'a [HistoryEntry],
    #[serde(skip_serializing_if = "Vec::is_empty")]
    tools: Vec<FunctionTool<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tool_choice: Option<&'static str>,
}

#[derive(Serialize)]
struct FunctionTool<'a> {
    r#type: &'static str,
    function: FunctionDeclaration<'a>,
}

#[derive(Serialize)]
struct FunctionDeclaration<'a> {
    name: &'a str,
    description: &'a str,
    parameters: &'a serde_json::Value,
}

impl<'a> From<&'a ToolSpec> for FunctionTool<'a> {
    fn from(spec: &'a ToolSpec) -> Self {
        Self {
            r#type: "function",
            function: FunctionDeclaration {
                name: &spec.name,
                description: &spec.description,
                parameters: &spec.parameters,
            },
        }
    }
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: AssistantMessage,
}

#[derive(Deserialize)]
struct AssistantMessage {
    #[serde(default)]
    content: Option<String>,
    #[serde(default)]
    tool_calls: Option<Vec<WireToolCall>>,
}

#[derive(Deserialize)]
struct WireToolCall {
    #[serde(default)]
    id: String,
    function: WireFunctionCall,
}

#[derive(Deserialize)]
struct WireFunctionCall {
    name: String,
    arguments: String,
}

/// Client for an OpenAI-compatible Chat Completions API.
#[derive(Clone)]
pub struct OpenAiClient {
    http: reqwest::Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl OpenAiClient {
    pub fn new(api_key: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key,
            model: names::DEFAULT_MODEL.to_string(),
            base_url: names::DEFAULT_PROVIDER_URL.to_string(),
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn body<'a>(&'a self, request: &'a CompletionRequest) -> ChatCompletionRequest<'a> {
        let tools: Vec<FunctionTool> = request.tools.iter().map(FunctionTool::from).collect();
        let tool_choice = (!tools.is_empty()).then_some("auto");

        ChatCompletionRequest {
            model: &self.model,
            messages: &request.messages,
            tools,
            tool_choice,
        }
    }
}

impl CompletionProvider for OpenAiClient {
    async fn complete(&self, request: CompletionRequest) -> Result<Completion> {
        let resp = self
            .http
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&self.body(&request))
            .send()
            .await
            .wrap_err("could not reach the model provider")?;

        if !resp.status().is_success() {
            let status = resp.status();
            let text = resp.text().await.unwrap_or_default();
            tracing::error!("provider API error: {status} - {text}");
            bail!("provider API returned {status}");
        }

        let completion: ChatCompletionResponse = resp
            .json()
            .await
            .wrap_err("could not decode provider response")?;

        let message = completion
            .choices
            .into_iter()
            .next()
            .ok_or_eyre("provider returned no choices")?
            .message;

        Ok(Completion {
            content: message.content,
            tool_calls: message
                .tool_calls
                .unwrap_or_default()
                .into_iter()
                .map(|call| ToolCall {
                    id: call.id,
                    name: call.function.name,
                    arguments: call.function.arguments,
                })
                .collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{models::Role, tools::Tool};

    fn request(tools: Vec<ToolSpec>) -> CompletionRequest {
        CompletionRequest {
            messages: vec![HistoryEntry {
                role: Role::User,
                content: "hi".to_string(),
            }],
            tools,
        }
    }

    #[test]
    fn tools_are_declared_as_functions_with_auto_choice() {
        let client = OpenAiClient::new("sk-test".to_string());
        let request = request(vec![Tool::GenerateQuiz.spec()]);

        let json = serde_json::to_value(client.body(&request)).unwrap();

        assert_eq!(json["model"], names::DEFAULT_MODEL);
        assert_eq!(json["messages"][0]["role"], "user");
        assert_eq!(json["tools"][0]["type"], "function");
        assert_eq!(json["tools"][0]["function"]["name"], "generate_quiz");
        assert_eq!(json["tool_choice"], "auto");
    }

    #[test]
    fn no_tools_omits_tool_fields() {
        let client = OpenAiClient::new("sk-test".to_string()).with_model("gpt-4o");
        let json = serde_json::to_value(client.body(&request(vec![]))).unwrap();

        assert_eq!(json["model"], "gpt-4o");
        assert!(json.get("tools").is_none());
        assert!(json.get("tool_choice").is_none());
    }

    #[test]
    fn decodes_tool_call_response() {
        let body = r#"{
            "id": "chatcmpl-1",
            "choices": [{
                "index": 0,
                "finish_reason": "tool_calls",
                "message": {
                    "role": "assistant",
                    "content": null,
                    "tool_calls": [{
                        "id": "call_1",
                        "type": "function",
                        "function": {"name": "generate_quiz", "arguments": "{\"title\":\"x\"}"}
                    }]
                }
            }]
        }"#;

        let response: ChatCompletionResponse = serde_json::from_str(body).unwrap();
        let message = &response.choices[0].message;
        let calls = message.tool_calls.as_ref().unwrap();

        assert!(message.content.is_none());
        assert_eq!(calls[0].id, "call_1");
        assert_eq!(calls[0].function.name, "generate_quiz");
        assert_eq!(calls[0].function.arguments, "{\"title\":\"x\"}");
    }

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let client = OpenAiClient::new("k".to_string()).with_base_url("http://localhost:9000/v1/");
        assert_eq!(client.base_url, "http://localhost:9000/v1");
    }
}
