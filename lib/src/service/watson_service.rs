use std::env;
use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use reqwest::{header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE}, Client, Response, StatusCode};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{info, warn};

use crate::env_keys::{DEFAULT_EMOTION_API_URL, DEFAULT_EMOTION_MODEL_ID, EMOTION_API_URL, EMOTION_MODEL_ID};
use super::common_structs::{ClassificationResult, EmotionScores};
use super::errors::ClassificationError;
use super::EmotionClassifier;

const MODEL_ID_HEADER: &str = "grpc-metadata-mm-model-id";


#[derive(Debug, Clone)]
pub struct WatsonService {
    client: Client,
    endpoint: String,
    headers: HeaderMap,
}

#[derive(Debug, Deserialize)]
struct EmotionPredictResponse {
    #[serde(rename = "emotionPredictions")]
    emotion_predictions: Vec<EmotionPrediction>,
}

#[derive(Debug, Deserialize)]
struct EmotionPrediction {
    emotion: EmotionScores,
}


impl WatsonService {
    pub fn new() -> Result<Self> {
        let endpoint = env::var(EMOTION_API_URL).unwrap_or(DEFAULT_EMOTION_API_URL.to_owned());
        let model_id = env::var(EMOTION_MODEL_ID).unwrap_or(DEFAULT_EMOTION_MODEL_ID.to_owned());
        Self::with_endpoint(&endpoint, &model_id)
    }

    pub fn with_endpoint(endpoint: &str, model_id: &str) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(HeaderName::from_static(MODEL_ID_HEADER), HeaderValue::from_str(model_id).context("Invalid model id")?);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .build()
            .context("Error building http client")?;

        Ok(Self {
            client,
            endpoint: endpoint.to_owned(),
            headers
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn send(&self, text: &str) -> Result<(StatusCode, String)> {
        let body = json!({
            "raw_document": {
                "text": text
            }
        });

        let response: Response = self.client
            .post(&self.endpoint)
            .headers(self.headers.clone())
            .body(serde_json::to_string(&body)?)
            .send()
            .await?;

        let status = response.status();
        let body_string = response.text().await?;
        Ok((status, body_string))
    }

    fn process_emotion_predict_output(&self, body_string: &str) -> ClassificationResult {
        let raw_response = match serde_json::from_str::<Value>(body_string) {
            Ok(value) => value,
            Err(error) => {
                warn!("response body is not json: {}", error);
                return ClassificationResult::Error(ClassificationError::UnexpectedFormat {
                    details: error.to_string(),
                    raw_response: Value::String(body_string.to_owned()),
                });
            },
        };

        match extract_scores(&raw_response) {
            Ok(scores) => ClassificationResult::scored(scores),
            Err(error) => {
                warn!("unexpected emotion predict response: {:#}", error);
                ClassificationResult::Error(ClassificationError::UnexpectedFormat {
                    details: format!("{:#}", error),
                    raw_response,
                })
            },
        }
    }
}

fn extract_scores(raw_response: &Value) -> Result<EmotionScores> {
    let response = serde_json::from_value::<EmotionPredictResponse>(raw_response.clone())?;
    let prediction = response.emotion_predictions
        .into_iter()
        .next()
        .ok_or_else(|| anyhow!("emotionPredictions is empty"))?;
    Ok(prediction.emotion)
}


#[async_trait]
impl EmotionClassifier for WatsonService {
    async fn classify(&self, text: &str) -> ClassificationResult {
        if text.trim().is_empty() {
            return ClassificationResult::Blank;
        }

        let (status, body_string) = match self.send(text).await {
            Ok(response) => response,
            Err(error) => {
                warn!("error sending emotion predict request: {:#}", error);
                return ClassificationResult::Error(ClassificationError::Transport {
                    details: format!("{:#}", error),
                });
            },
        };

        info!("emotion predict status: {}", status);

        match status {
            StatusCode::OK => self.process_emotion_predict_output(&body_string),
            StatusCode::BAD_REQUEST => ClassificationResult::Blank,
            _ => ClassificationResult::Error(ClassificationError::UnexpectedStatus {
                status: status.as_u16(),
                details: body_string,
            }),
        }
    }
}
