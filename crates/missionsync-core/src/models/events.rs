/// AWS Lambda event types
use serde::{Deserialize, Serialize};

/// Worker event wrapper - storage notification or direct invocation
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum WorkerEvent {
    S3(S3Event),
    Direct(DirectInvocation),
}

/// Direct (SDK/console) invocation of the worker
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum DirectInvocation {
    Reconcile,
    CollectFolderMetadata,
}

/// S3 object notification
#[derive(Debug, Clone, Deserialize)]
pub struct S3Event {
    #[serde(rename = "Records")]
    pub records: Vec<S3EventRecord>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct S3EventRecord {
    #[serde(rename = "eventSource", default)]
    pub event_source: String,
    #[serde(rename = "eventName", default)]
    pub event_name: String,
    pub s3: S3Info,
}

#[derive(Debug, Clone, Deserialize)]
pub struct S3Info {
    pub bucket: S3Bucket,
    pub object: S3Object,
}

#[derive(Debug, Clone, Deserialize)]
pub struct S3Bucket {
    pub name: String,
    #[serde(default)]
    pub arn: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct S3Object {
    /// URL-encoded as delivered by S3; see [`S3Object::decoded_key`]
    pub key: String,
    pub size: Option<i64>,
    #[serde(rename = "eTag")]
    pub etag: Option<String>,
}

impl S3Object {
    /// Decodes the form-urlencoded key (`+` is a space)
    pub fn decoded_key(&self) -> String {
        decode_object_key(&self.key)
    }
}

/// Decodes an S3 notification key
pub fn decode_object_key(key: &str) -> String {
    // S3 escapes `&` and `=`, so the whole key decodes as a single name
    url::form_urlencoded::parse(key.as_bytes())
        .map(|(name, _)| name.into_owned())
        .next()
        .unwrap_or_default()
}

/// Gateway-shaped response returned by every handler
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LambdaResponse {
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    pub body: String,
}

impl LambdaResponse {
    pub fn new(status_code: u16, body: &serde_json::Value) -> Self {
        Self {
            status_code,
            body: body.to_string(),
        }
    }

    pub fn ok(body: &serde_json::Value) -> Self {
        Self::new(200, body)
    }

    pub fn error(status_code: u16, message: &str) -> Self {
        Self::new(status_code, &serde_json::json!({ "error": message }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_s3_event_deserialization() {
        let json = r#"{
            "Records": [{
                "eventVersion": "2.1",
                "eventSource": "aws:s3",
                "awsRegion": "us-east-1",
                "eventTime": "2025-10-31T12:00:00.000Z",
                "eventName": "ObjectCreated:Put",
                "s3": {
                    "bucket": {
                        "name": "test-bucket",
                        "arn": "arn:aws:s3:::test-bucket"
                    },
                    "object": {
                        "key": "transcript/Sprint+Demo+%C3%A9.docx",
                        "size": 1024
                    }
                }
            }]
        }"#;

        let event: WorkerEvent = serde_json::from_str(json).unwrap();
        let WorkerEvent::S3(event) = event else {
            panic!("expected S3 event");
        };
        assert_eq!(event.records.len(), 1);
        assert_eq!(event.records[0].s3.bucket.name, "test-bucket");
        assert_eq!(
            event.records[0].s3.object.decoded_key(),
            "transcript/Sprint Demo é.docx"
        );
    }

    #[test]
    fn test_direct_invocation_deserialization() {
        let event: WorkerEvent = serde_json::from_str(r#"{"action": "reconcile"}"#).unwrap();
        assert!(matches!(event, WorkerEvent::Direct(DirectInvocation::Reconcile)));

        let event: WorkerEvent =
            serde_json::from_str(r#"{"action": "collectFolderMetadata"}"#).unwrap();
        assert!(matches!(
            event,
            WorkerEvent::Direct(DirectInvocation::CollectFolderMetadata)
        ));

        assert!(serde_json::from_str::<WorkerEvent>(r#"{"action": "unknown"}"#).is_err());
    }

    #[test]
    fn test_decode_object_key() {
        assert_eq!(decode_object_key("json/a%2Bb.json"), "json/a+b.json");
        assert_eq!(decode_object_key("plain/key.json"), "plain/key.json");
        assert_eq!(decode_object_key(""), "");
    }

    #[test]
    fn test_lambda_response_error() {
        let response = LambdaResponse::error(400, "bad");
        assert_eq!(response.status_code, 400);
        assert_eq!(response.body, r#"{"error":"bad"}"#);
    }
}
