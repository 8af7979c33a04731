pub mod watson_service;
pub mod common_structs;
pub mod errors;

use std::fmt::Debug;
use std::sync::Arc;
use anyhow::Result;
use async_trait::async_trait;

use common_structs::ClassificationResult;


/// Anything able to turn raw text into a classification.
/// Failures are reported through `ClassificationResult::Error`, never by panicking.
#[async_trait]
pub trait EmotionClassifier: Debug + Send + Sync {
    async fn classify(&self, text: &str) -> ClassificationResult;
}


#[derive(Debug, Clone)]
pub struct CommonService {
    pub classifier: Arc<dyn EmotionClassifier>,
}

impl CommonService {
    pub fn new() -> Result<Self> {
        let watson = watson_service::WatsonService::new()?;
        Ok(Self::with_classifier(Arc::new(watson)))
    }

    pub fn with_classifier(classifier: Arc<dyn EmotionClassifier>) -> Self {
        Self {
            classifier
        }
    }
}
