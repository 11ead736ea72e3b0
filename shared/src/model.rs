use derive_more::Display;
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, EnumIter, EnumString};

/// Vastu compliance score, always within `0..=100`.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[display(fmt = "{}", _0)]
#[serde(try_from = "i64", into = "u8")]
pub struct Score(u8);

impl Score {
    pub const MAX: u8 = 100;

    pub fn new(value: u8) -> Option<Self> {
        (value <= Self::MAX).then_some(Self(value))
    }

    pub fn value(self) -> u8 {
        self.0
    }

    pub fn remainder(self) -> u8 {
        Self::MAX - self.0
    }
}

impl TryFrom<i64> for Score {
    type Error = String;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        u8::try_from(value)
            .ok()
            .and_then(Score::new)
            .ok_or_else(|| format!("score {} is outside 0..=100", value))
    }
}

impl From<Score> for u8 {
    fn from(score: Score) -> Self {
        score.0
    }
}

#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize,
    EnumString, EnumIter, AsRefStr, strum_macros::Display,
)]
#[serde(from = "String", rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SuggestionKind {
    Good,
    Defect,
    #[default]
    Warning,
}

impl SuggestionKind {
    pub fn icon(self) -> &'static str {
        match self {
            SuggestionKind::Good => "✅",
            SuggestionKind::Defect => "❌",
            SuggestionKind::Warning => "⚠️",
        }
    }
}

// The analysis engine also emits "neutral"; anything that is not good or
// defect is shown as a warning.
impl From<String> for SuggestionKind {
    fn from(raw: String) -> Self {
        raw.trim().to_ascii_lowercase().parse().unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuggestionItem {
    #[serde(rename = "suggestion_type", default)]
    pub kind: SuggestionKind,
    #[serde(rename = "card_title")]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub impact: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remedy: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub score: Score,
    pub explanation: String,
    #[serde(default)]
    pub suggestions: Vec<SuggestionItem>,
}

impl AnalysisResult {
    pub fn count_of(&self, kind: SuggestionKind) -> usize {
        self.suggestions.iter().filter(|s| s.kind == kind).count()
    }
}

/// Success body of `POST /analyze`.
#[derive(Debug, Clone, Deserialize)]
pub struct AnalysisEnvelope {
    pub analysis: AnalysisResult,
    #[serde(default)]
    pub raw_data: Option<serde_json::Value>,
}

/// Error body of `POST /analyze`; every field is optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ServerErrorBody {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub details: Option<String>,
}

/// Body of `GET /health`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    #[serde(default)]
    pub api_key_set: bool,
    #[serde(default)]
    pub model: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Readiness {
    Ready { model: Option<String> },
    MissingApiKey,
    Degraded(String),
}

impl HealthStatus {
    pub fn readiness(&self) -> Readiness {
        if !self.status.eq_ignore_ascii_case("healthy") {
            Readiness::Degraded(self.status.clone())
        } else if !self.api_key_set {
            Readiness::MissingApiKey
        } else {
            Readiness::Ready {
                model: self.model.clone(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_structured_suggestions() {
        let body = indoc! {r#"
            {
              "raw_data": {"entrance": "north-east", "kitchen": "south-east"},
              "analysis": {
                "score": 92,
                "explanation": "Good flow",
                "suggestions": [
                  {"suggestion_type": "good", "card_title": "Entrance"},
                  {"suggestion_type": "defect", "card_title": "Toilet in north-east",
                   "impact": "Drains positive energy", "remedy": "Use sea salt bowls"},
                  {"suggestion_type": "neutral", "card_title": "Pooja room", "detail": "Position is unusual"}
                ]
              }
            }
        "#};

        let envelope: AnalysisEnvelope = serde_json::from_str(body).unwrap();
        let result = envelope.analysis;

        assert_eq!(result.score.value(), 92);
        assert_eq!(result.explanation, "Good flow");
        assert_eq!(
            result.suggestions.iter().map(|s| s.kind).collect::<Vec<_>>(),
            vec![SuggestionKind::Good, SuggestionKind::Defect, SuggestionKind::Warning]
        );
        assert_eq!(result.suggestions[1].remedy.as_deref(), Some("Use sea salt bowls"));
        assert_eq!(result.suggestions[0].impact, None);
        assert!(envelope.raw_data.is_some());
    }

    #[test]
    fn unknown_or_missing_kind_is_a_warning() {
        let item: SuggestionItem =
            serde_json::from_str(r#"{"suggestion_type": " DEFECT ", "card_title": "A"}"#).unwrap();
        assert_eq!(item.kind, SuggestionKind::Defect);

        let item: SuggestionItem = serde_json::from_str(r#"{"card_title": "B"}"#).unwrap();
        assert_eq!(item.kind, SuggestionKind::Warning);

        let item: SuggestionItem =
            serde_json::from_str(r#"{"suggestion_type": "mystery", "card_title": "C"}"#).unwrap();
        assert_eq!(item.kind, SuggestionKind::Warning);
    }

    #[test]
    fn rejects_scores_outside_range() {
        for body in [
            r#"{"score": 101, "explanation": ""}"#,
            r#"{"score": -3, "explanation": ""}"#,
        ] {
            assert!(serde_json::from_str::<AnalysisResult>(body).is_err(), "{}", body);
        }
        let edge: AnalysisResult = serde_json::from_str(r#"{"score": 100, "explanation": ""}"#).unwrap();
        assert_eq!(edge.score.remainder(), 0);
        assert!(edge.suggestions.is_empty());
    }

    #[test]
    fn serializes_with_wire_names() {
        let result = AnalysisResult {
            score: Score::new(40).unwrap(),
            explanation: "Needs work".into(),
            suggestions: vec![SuggestionItem {
                kind: SuggestionKind::Defect,
                title: "Kitchen".into(),
                impact: None,
                remedy: Some("Move the stove".into()),
                detail: None,
            }],
        };

        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "score": 40,
                "explanation": "Needs work",
                "suggestions": [
                    {"suggestion_type": "defect", "card_title": "Kitchen", "remedy": "Move the stove"}
                ]
            })
        );
    }

    #[test]
    fn icons_follow_kind() {
        assert_eq!(SuggestionKind::Good.icon(), "✅");
        assert_eq!(SuggestionKind::Defect.icon(), "❌");
        assert_eq!(SuggestionKind::Warning.icon(), "⚠️");
    }

    #[test]
    fn health_readiness() {
        let ready: HealthStatus = serde_json::from_str(
            r#"{"status": "healthy", "api_key_set": true, "model": "gemini-flash-latest"}"#,
        )
        .unwrap();
        assert_eq!(
            ready.readiness(),
            Readiness::Ready { model: Some("gemini-flash-latest".into()) }
        );

        let no_key: HealthStatus =
            serde_json::from_str(r#"{"status": "healthy", "api_key_set": false}"#).unwrap();
        assert_eq!(no_key.readiness(), Readiness::MissingApiKey);

        let degraded: HealthStatus = serde_json::from_str(r#"{"status": "starting"}"#).unwrap();
        assert_eq!(degraded.readiness(), Readiness::Degraded("starting".into()));
    }
}
