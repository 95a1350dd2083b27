//! Typed decoding of the model's classification JSON.
//!
//! The four categorical fields are required. Strings pass through untouched
//! (the vocabulary is not checked locally); numbers and booleans are
//! stringified; `null`, arrays and objects are rejected.

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::EnrichmentError;

/// Result of classifying one customer message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    #[serde(deserialize_with = "scalar_as_string")]
    pub sentiment: String,
    #[serde(deserialize_with = "scalar_as_string")]
    pub category: String,
    #[serde(deserialize_with = "scalar_as_string")]
    pub priority: String,
    #[serde(deserialize_with = "scalar_as_string")]
    pub urgency_level: String,
    /// 0 = very negative, 1 = very positive.
    #[serde(alias = "score", deserialize_with = "number_or_numeric_string")]
    pub sentiment_score: f64,
}

impl Classification {
    /// Decode the text of a model candidate.
    pub fn from_model_text(text: &str) -> Result<Self, EnrichmentError> {
        serde_json::from_str(text.trim()).map_err(|e| EnrichmentError::Decode(e.to_string()))
    }
}

fn scalar_as_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        Value::Null => Err(de::Error::custom("expected a string, found null")),
        Value::Array(_) => Err(de::Error::custom("expected a string, found an array")),
        Value::Object(_) => Err(de::Error::custom("expected a string, found an object")),
    }
}

fn number_or_numeric_string<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Number(n) => n
            .as_f64()
            .ok_or_else(|| de::Error::custom("score is not representable as f64")),
        Value::String(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| de::Error::custom(format!("score is not numeric: {s:?}"))),
        other => Err(de::Error::custom(format!("expected a number, found {other}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_well_formed_payload() {
        let c = Classification::from_model_text(
            r#"{"sentiment":"Angry","category":"Billing","priority":"High",
                "urgency_level":"High","sentiment_score":0.1}"#,
        )
        .expect("decode");
        assert_eq!(c.sentiment, "Angry");
        assert_eq!(c.category, "Billing");
        assert_eq!(c.priority, "High");
        assert_eq!(c.urgency_level, "High");
        assert!((c.sentiment_score - 0.1).abs() < f64::EPSILON);
    }

    #[test]
    fn non_string_scalars_are_stringified() {
        let c = Classification::from_model_text(
            r#"{"sentiment":3,"category":true,"priority":"High","urgency_level":1.5,"sentiment_score":"0.25"}"#,
        )
        .expect("decode");
        assert_eq!(c.sentiment, "3");
        assert_eq!(c.category, "true");
        assert_eq!(c.urgency_level, "1.5");
        assert!((c.sentiment_score - 0.25).abs() < f64::EPSILON);
    }

    #[test]
    fn out_of_vocabulary_values_pass_through() {
        let c = Classification::from_model_text(
            r#"{"sentiment":"Tinggi","category":"Other","priority":"Urgent","urgency_level":"x","sentiment_score":2}"#,
        )
        .expect("decode");
        assert_eq!(c.sentiment, "Tinggi");
        assert_eq!(c.priority, "Urgent");
    }

    #[test]
    fn legacy_score_key_is_accepted() {
        let c = Classification::from_model_text(
            r#"{"sentiment":"Happy","category":"General Question","priority":"Low","urgency_level":"Low","score":0.9}"#,
        )
        .expect("decode");
        assert!((c.sentiment_score - 0.9).abs() < f64::EPSILON);
    }

    #[test]
    fn missing_field_is_a_decode_error() {
        let err = Classification::from_model_text(
            r#"{"sentiment":"Happy","category":"Billing","priority":"Low","sentiment_score":0.5}"#,
        )
        .unwrap_err();
        match err {
            EnrichmentError::Decode(msg) => assert!(msg.contains("urgency_level"), "{msg}"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn null_field_is_a_decode_error() {
        let err = Classification::from_model_text(
            r#"{"sentiment":null,"category":"Billing","priority":"Low","urgency_level":"Low","sentiment_score":0.5}"#,
        )
        .unwrap_err();
        assert!(matches!(err, EnrichmentError::Decode(_)));
    }

    #[test]
    fn non_json_text_is_a_decode_error() {
        let err = Classification::from_model_text("```json\nnot json\n```").unwrap_err();
        assert!(matches!(err, EnrichmentError::Decode(_)));
    }
}
