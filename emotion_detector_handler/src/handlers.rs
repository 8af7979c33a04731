use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderMap, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::response::Json;
use axum::routing::post;
use axum::Router;
use lib::service::common_structs::ClassificationResult;
use lib::service::CommonService;
use lib::utilities::format_emotion_message;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::{error, info, warn};

pub const EMOTION_DETECTOR_PATH: &str = "/emotionDetector";
pub const INVALID_TEXT_MESSAGE: &str = "Invalid text! Please try again!";


#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct EmotionDetectorRequest {
    #[serde(default)]
    pub text: Option<String>,
}


pub fn build_router(service: CommonService) -> Router {
    Router::new()
        .route(EMOTION_DETECTOR_PATH, post(emotion_detector))
        .with_state(service)
}

fn build_response(status: StatusCode, body: &Value) -> Response {
    let mut json_header = HeaderMap::new();
    json_header.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

    let mut response = Response::new(body.to_string());
    *response.status_mut() = status;
    (json_header, response).into_response()
}

fn build_invalid_text_response() -> Response {
    build_response(StatusCode::BAD_REQUEST, &json!({
        "error": INVALID_TEXT_MESSAGE
    }))
}


pub async fn emotion_detector(
    State(service): State<CommonService>,
    payload: Result<Json<Value>, JsonRejection>
) -> Response {

    let params = match payload {
        Ok(Json(params)) => params,
        Err(rejection) => {
            warn!("rejected request body: {}", rejection);
            return build_invalid_text_response();
        },
    };

    let text = match serde_json::from_value::<EmotionDetectorRequest>(params) {
        Ok(EmotionDetectorRequest { text: Some(text) }) if !text.trim().is_empty() => text,
        Ok(_) => return build_invalid_text_response(),
        Err(error) => {
            warn!("error converting to emotion detector request: {}", error);
            return build_invalid_text_response();
        },
    };

    info!("classifying text of {} bytes", text.len());

    match service.classifier.classify(&text).await {
        ClassificationResult::Scored { scores, dominant_emotion } => {
            let message = format_emotion_message(&scores, dominant_emotion);
            build_response(StatusCode::OK, &json!({
                "message": message
            }))
        },
        ClassificationResult::Blank => build_invalid_text_response(),
        ClassificationResult::Error(classification_error) => {
            error!("error classifying text: {} ({})", classification_error, classification_error.details());
            build_response(StatusCode::INTERNAL_SERVER_ERROR, &classification_error.to_json())
        },
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::Request;
    use lib::service::common_structs::EmotionScores;
    use lib::service::errors::ClassificationError;
    use lib::service::EmotionClassifier;
    use tower::ServiceExt;

    #[derive(Debug)]
    struct StubClassifier {
        result: ClassificationResult,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl EmotionClassifier for StubClassifier {
        async fn classify(&self, _text: &str) -> ClassificationResult {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.result.clone()
        }
    }

    fn stub(result: ClassificationResult) -> Arc<StubClassifier> {
        Arc::new(StubClassifier { result, calls: AtomicUsize::new(0) })
    }

    async fn send(classifier: Arc<StubClassifier>, body: &str) -> (StatusCode, Value) {
        let app = build_router(CommonService::with_classifier(classifier));
        let request = Request::builder()
            .method("POST")
            .uri(EMOTION_DETECTOR_PATH)
            .header("content-type", "application/json")
            .body(Body::from(body.to_owned()))
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        assert_eq!(response.headers().get(CONTENT_TYPE).unwrap(), "application/json");
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    fn joyful() -> ClassificationResult {
        ClassificationResult::scored(EmotionScores { anger: 0.1, disgust: 0.05, fear: 0.05, joy: 0.8, sadness: 0.02 })
    }

    #[tokio::test]
    async fn scored_text_gets_formatted_message() {
        let classifier = stub(joyful());

        let (status, body) = send(classifier.clone(), r#"{"text": "I love this new technology."}"#).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({
            "message": "For the given statement, the system response is 'anger': 0.1, 'disgust': 0.05, 'fear': 0.05, 'joy': 0.8 and 'sadness': 0.02. The dominant emotion is joy."
        }));
        assert_eq!(classifier.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn tie_reports_first_emotion() {
        let classifier = stub(ClassificationResult::scored(EmotionScores { anger: 0.5, disgust: 0.5, ..Default::default() }));

        let (status, body) = send(classifier, r#"{"text": "meh"}"#).await;

        assert_eq!(status, StatusCode::OK);
        let message = body["message"].as_str().unwrap();
        assert!(message.ends_with("The dominant emotion is anger."), "message: {}", message);
    }

    #[tokio::test]
    async fn blank_or_missing_text_is_rejected_without_classifying() {
        for body in [r#"{"text": ""}"#, r#"{"text": "   \n"}"#, r#"{}"#, r#"{"text": null}"#, r#"{"text": 42}"#, "not json", ""] {
            let classifier = stub(joyful());

            let (status, response) = send(classifier.clone(), body).await;

            assert_eq!(status, StatusCode::BAD_REQUEST, "body: {}", body);
            assert_eq!(response, json!({"error": INVALID_TEXT_MESSAGE}));
            assert_eq!(classifier.calls.load(Ordering::SeqCst), 0, "body: {}", body);
        }
    }

    #[tokio::test]
    async fn no_detectable_emotion_is_rejected() {
        let classifier = stub(ClassificationResult::Blank);

        let (status, body) = send(classifier.clone(), r#"{"text": "asdfgh"}"#).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({"error": INVALID_TEXT_MESSAGE}));
        assert_eq!(classifier.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn format_error_is_forwarded_with_raw_payload() {
        let classifier = stub(ClassificationResult::Error(ClassificationError::UnexpectedFormat {
            details: "missing field `emotionPredictions`".to_owned(),
            raw_response: json!({"producerId": {}}),
        }));

        let (status, body) = send(classifier, r#"{"text": "hello"}"#).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({
            "error": "Unexpected response format from the Watson NLP API",
            "details": "missing field `emotionPredictions`",
            "raw_response": {"producerId": {}}
        }));
    }

    #[tokio::test]
    async fn transport_error_is_forwarded() {
        let classifier = stub(ClassificationResult::Error(ClassificationError::Transport {
            details: "tcp connect error: Connection refused (os error 111)".to_owned(),
        }));

        let (status, body) = send(classifier, r#"{"text": "hello"}"#).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["details"], "tcp connect error: Connection refused (os error 111)");
    }

    #[tokio::test]
    async fn status_error_is_forwarded() {
        let classifier = stub(ClassificationResult::Error(ClassificationError::UnexpectedStatus {
            status: 502,
            details: "bad gateway".to_owned(),
        }));

        let (status, body) = send(classifier, r#"{"text": "hello"}"#).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "Unexpected status code 502");
        assert_eq!(body["status_code"], 502);
        assert_eq!(body["details"], "bad gateway");
    }
}
