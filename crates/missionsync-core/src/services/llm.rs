/// Transcript structuring through Amazon Bedrock
use crate::constants::{JSON_CONTENT_TYPE, LLM_MAX_NEW_TOKENS, LLM_TEMPERATURE, LLM_TOP_P};
use crate::error::SyncError;
use async_trait::async_trait;
use aws_sdk_bedrockruntime::primitives::Blob;
use regex::{Captures, Regex};
use serde_json::{Value, json};
use std::sync::LazyLock;
use tracing::{error, info};

static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{(index|video_title|text)\}").unwrap());

/// Prompt sent to the model; `{index}`, `{video_title}` and `{text}` are
/// substituted before the call.
pub const STRUCTURING_PROMPT: &str = r#"You are an expert in technical content processing and information synthesis. Analyze the provided document text and generate a structured summary in the exact JSON format specified below.

**Important:** All outputs (description, summary, keywords, topics, and conclusion) must be written in Spanish.

**Required JSON Template:**
{
    "$entidad": "{index}",
    "$documents": [
        {
            "title": "{video_title}",
            "type": "mp4",
            "key": "{index}/video/{video_title}.mp4"
        }
    ],
    "{index}_title": "[BRIEF_TITLE]",
    "{index}_description": "[BRIEF_DESCRIPTION]",
    "{index}_keywords": "[KEYWORDS_SEPARATED_BY_COMMAS]",
    "{index}_summary": "[GENERAL_SUMMARY]",
    "{index}_topics": [
        {
            "key_1": ["CONTENT 1"]
        },
        {
            "key_2": ["CONTENT 2"]
        }
    ],
    "{index}_conclusion": "[GENERAL_CONCLUSION]"
}

**Your Tasks:**

1. **General Analysis:** Read the entire text thoroughly and understand the main topic, subtopics, key concepts, and identify any examples provided.

2. **Complete Metadata:**
   - Create a concise title for the session (5-7 words, in Spanish)
   - Generate a concise description (1-2 sentences) explaining what the document is about (in Spanish)
   - Create a comprehensive summary (3-5 sentences) synthesizing the main points (in Spanish)
   - Extract 5-10 relevant keywords (comma-separated, in Spanish)

3. **Identify Topics:**
   - Identify all main topics and subtopics discussed in the document
   - Ensure the entire document content is reflected in the summary
   - For each topic, create an entry in the topics array using this format:
   ```
   {
       "Topic_Name_With_Underscores": ["2-3 comprehensive paragraphs summarizing the topic including key points and important concepts (in Spanish)", "Example mentioned (if any, in Spanish)"]
   }
   ```
   - Topic names should be concise and descriptive
   - If explicit examples exist for a topic, include them as the second array element (in Spanish)
   - Each topic should be a separate object in the array

4. **Conclusion:**
   - Generate a conclusion (3-5 sentences) synthesizing the main findings and the importance of the content (in Spanish)

**Critical Rules:**
- Return ONLY valid JSON that can be parsed
- Maintain the exact format specified in the template
- Use clear and professional language (in Spanish)
- Ensure all fields are complete and properly filled
- Replace bracketed placeholders with extracted/generated information (in Spanish)
- Convert topic titles by replacing spaces with underscores (_)
- The summary must be comprehensive and reflect ALL document content
- Do not include any text outside the JSON response
- Ensure proper JSON escaping for quotes and special characters

**Document Text to Analyze:**
{text}

Respond with only the completed JSON structure:"#;

#[async_trait]
pub trait TranscriptStructurer: Send + Sync {
    /// Turns transcript text into the structured summary document.
    ///
    /// A model reply that is not JSON is not an error: it comes back as an
    /// `{"error", "raw_response"}` document.
    async fn structure(&self, text: &str, video_title: &str) -> Result<Value, SyncError>;
}

/// Renders the prompt in a single pass, so placeholders appearing in the
/// title or the transcript are left alone.
pub fn build_prompt(index: &str, video_title: &str, text: &str) -> String {
    PLACEHOLDER
        .replace_all(STRUCTURING_PROMPT, |caps: &Captures| match &caps[1] {
            "index" => index.to_string(),
            "video_title" => video_title.to_string(),
            _ => text.to_string(),
        })
        .into_owned()
}

/// Nova messages-API request body
pub fn build_request_body(prompt: &str) -> Value {
    json!({
        "messages": [
            {
                "role": "user",
                "content": [{ "text": prompt }],
            }
        ],
        "inferenceConfig": {
            "max_new_tokens": LLM_MAX_NEW_TOKENS,
            "temperature": LLM_TEMPERATURE,
            "top_p": LLM_TOP_P,
        },
    })
}

/// Pulls `output.message.content[0].text` out of a model response and parses
/// it as JSON.
pub fn parse_model_output(body: &[u8]) -> Result<Value, SyncError> {
    let response: Value = serde_json::from_slice(body)
        .map_err(|e| SyncError::Llm(format!("Invalid model response body: {}", e)))?;

    let generated = response
        .pointer("/output/message/content/0/text")
        .and_then(Value::as_str)
        .unwrap_or_default();

    match serde_json::from_str::<Value>(generated) {
        Ok(document) => Ok(document),
        Err(e) => {
            error!(error = %e, "Generated content is not valid JSON");
            Ok(json!({
                "error": "Failed to parse LLM response as JSON",
                "raw_response": generated,
            }))
        }
    }
}

/// Bedrock runtime structurer
pub struct BedrockStructurer {
    client: aws_sdk_bedrockruntime::Client,
    model_id: String,
    index: String,
}

impl BedrockStructurer {
    pub fn new(client: aws_sdk_bedrockruntime::Client, model_id: &str, index: &str) -> Self {
        Self {
            client,
            model_id: model_id.to_string(),
            index: index.to_string(),
        }
    }
}

#[async_trait]
impl TranscriptStructurer for BedrockStructurer {
    async fn structure(&self, text: &str, video_title: &str) -> Result<Value, SyncError> {
        let body = build_request_body(&build_prompt(&self.index, video_title, text));
        let payload = serde_json::to_vec(&body)?;

        info!(model_id = %self.model_id, title = video_title, "Invoking model");

        let response = self
            .client
            .invoke_model()
            .model_id(&self.model_id)
            .content_type(JSON_CONTENT_TYPE)
            .body(Blob::new(payload))
            .send()
            .await
            .map_err(|e| SyncError::Llm(format!("Bedrock invocation failed: {}", e)))?;

        parse_model_output(response.body().as_ref())
    }
}
