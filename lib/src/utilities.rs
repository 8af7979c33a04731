use crate::service::common_structs::{Emotion, EmotionScores};


// 0.8 -> "0.8", 0.0 -> "0.0"
pub fn format_score(score: f64) -> String {
    format!("{:?}", score)
}

pub fn format_emotion_message(scores: &EmotionScores, dominant_emotion: Emotion) -> String {
    format!(
        "For the given statement, the system response is 'anger': {}, 'disgust': {}, 'fear': {}, 'joy': {} and 'sadness': {}. The dominant emotion is {}.",
        format_score(scores.anger),
        format_score(scores.disgust),
        format_score(scores.fear),
        format_score(scores.joy),
        format_score(scores.sadness),
        dominant_emotion
    )
}
