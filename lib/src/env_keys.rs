pub static EMOTION_API_URL: &str = "EMOTION_API_URL";
pub static EMOTION_MODEL_ID: &str = "EMOTION_MODEL_ID";

pub static BIND_ADDRESS: &str = "BIND_ADDRESS";
pub static LAMBDA_RUNTIME_API: &str = "AWS_LAMBDA_RUNTIME_API";

pub static DEFAULT_EMOTION_API_URL: &str = "https://sn-watson-emotion.labs.skills.network/v1/watson.runtime.nlp.v1/NlpService/EmotionPredict";
pub static DEFAULT_EMOTION_MODEL_ID: &str = "emotion_aggregated-workflow_lang_en_stock";
pub static DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:5001";
