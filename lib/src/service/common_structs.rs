use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use super::errors::ClassificationError;

pub const NO_DOMINANT_EMOTION: &str = "none";


#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Emotion {
    Anger,
    Disgust,
    Fear,
    Joy,
    Sadness,
}

impl Emotion {
    // tie-break order for the dominant emotion
    pub const ALL: [Emotion; 5] = [
        Emotion::Anger,
        Emotion::Disgust,
        Emotion::Fear,
        Emotion::Joy,
        Emotion::Sadness,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Emotion::Anger => "anger",
            Emotion::Disgust => "disgust",
            Emotion::Fear => "fear",
            Emotion::Joy => "joy",
            Emotion::Sadness => "sadness",
        }
    }
}

impl std::fmt::Display for Emotion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}


/// Scores as reported under `emotionPredictions[0].emotion`.
/// Keys the remote service leaves out count as 0.0.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct EmotionScores {
    #[serde(default)]
    pub anger: f64,
    #[serde(default)]
    pub disgust: f64,
    #[serde(default)]
    pub fear: f64,
    #[serde(default)]
    pub joy: f64,
    #[serde(default)]
    pub sadness: f64,
}

impl EmotionScores {
    pub fn score(&self, emotion: Emotion) -> f64 {
        match emotion {
            Emotion::Anger => self.anger,
            Emotion::Disgust => self.disgust,
            Emotion::Fear => self.fear,
            Emotion::Joy => self.joy,
            Emotion::Sadness => self.sadness,
        }
    }

    /// First emotion in `Emotion::ALL` holding the maximum score.
    pub fn dominant_emotion(&self) -> Emotion {
        let mut dominant = Emotion::ALL[0];
        for emotion in Emotion::ALL.into_iter().skip(1) {
            if self.score(emotion) > self.score(dominant) {
                dominant = emotion;
            }
        }
        dominant
    }
}


#[derive(Debug, Clone, PartialEq)]
pub enum ClassificationResult {
    Scored {
        scores: EmotionScores,
        dominant_emotion: Emotion,
    },
    Blank,
    Error(ClassificationError),
}

impl ClassificationResult {
    pub fn scored(scores: EmotionScores) -> Self {
        let dominant_emotion = scores.dominant_emotion();
        Self::Scored { scores, dominant_emotion }
    }

    pub fn dominant_emotion_key(&self) -> Option<&'static str> {
        match self {
            Self::Scored { dominant_emotion, .. } => Some(dominant_emotion.as_str()),
            Self::Blank => Some(NO_DOMINANT_EMOTION),
            Self::Error(_) => None,
        }
    }

    pub fn to_json(&self) -> Value {
        match self {
            Self::Scored { scores, dominant_emotion } => {
                let mut map = Map::new();
                for emotion in Emotion::ALL {
                    map.insert(emotion.as_str().to_owned(), json!(scores.score(emotion)));
                }
                map.insert("dominant_emotion".to_owned(), json!(dominant_emotion.as_str()));
                Value::Object(map)
            },
            Self::Blank => {
                let mut map = Map::new();
                for emotion in Emotion::ALL {
                    map.insert(emotion.as_str().to_owned(), Value::Null);
                }
                map.insert("dominant_emotion".to_owned(), json!(NO_DOMINANT_EMOTION));
                Value::Object(map)
            },
            Self::Error(error) => error.to_json(),
        }
    }
}
