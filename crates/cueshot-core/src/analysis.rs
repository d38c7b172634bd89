//! Shot analysis domain model.
//!
//! `ShotAnalysis` is the value object returned by the inference service. Field
//! names serialize in camelCase so the same type doubles as the wire shape of
//! the structured response.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// A point on the table image in percentage units.
///
/// `x` runs from the left edge (0) to the right edge (100), `y` from the top
/// edge (0) to the bottom edge (100).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub x: f64,
    pub y: f64,
}

impl Coordinates {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Deserialize)]
struct PartialCoordinates {
    x: Option<f64>,
    y: Option<f64>,
}

/// A position object missing either axis is treated as absent.
fn deserialize_position<'de, D>(deserializer: D) -> Result<Option<Coordinates>, D::Error>
where
    D: Deserializer<'de>,
{
    let partial = Option::<PartialCoordinates>::deserialize(deserializer)?;
    Ok(partial.and_then(|p| match (p.x, p.y) {
        (Some(x), Some(y)) => Some(Coordinates::new(x, y)),
        _ => None,
    }))
}

/// How hard the recommended shot is to execute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
    Expert,
}

/// Visual tone used when presenting a difficulty badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DifficultyTone {
    Positive,
    Caution,
    Warning,
    Danger,
}

impl Difficulty {
    /// All levels in ascending order, as declared in the response schema.
    pub const ALL: [Difficulty; 4] = [
        Difficulty::Easy,
        Difficulty::Medium,
        Difficulty::Hard,
        Difficulty::Expert,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
            Difficulty::Expert => "Expert",
        }
    }

    pub fn tone(&self) -> DifficultyTone {
        match self {
            Difficulty::Easy => DifficultyTone::Positive,
            Difficulty::Medium => DifficultyTone::Caution,
            Difficulty::Hard => DifficultyTone::Warning,
            Difficulty::Expert => DifficultyTone::Danger,
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The ball group the active player is allowed to pocket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetGroup {
    Solids,
    Stripes,
}

impl TargetGroup {
    pub fn as_str(&self) -> &'static str {
        match self {
            TargetGroup::Solids => "solids",
            TargetGroup::Stripes => "stripes",
        }
    }

    /// Capitalized label shown to the user.
    pub fn label(&self) -> &'static str {
        match self {
            TargetGroup::Solids => "Solids",
            TargetGroup::Stripes => "Stripes",
        }
    }

    /// Description of the group used in the model instructions.
    pub fn description(&self) -> &'static str {
        match self {
            TargetGroup::Solids => "Solids (Balls 1-7, colored balls)",
            TargetGroup::Stripes => "Stripes (Balls 9-15, white balls with colored stripe)",
        }
    }

    /// The group belonging to the opponent.
    pub fn opponent(&self) -> TargetGroup {
        match self {
            TargetGroup::Solids => TargetGroup::Stripes,
            TargetGroup::Stripes => TargetGroup::Solids,
        }
    }
}

impl fmt::Display for TargetGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TargetGroup {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "solids" | "solid" => Ok(TargetGroup::Solids),
            "stripes" | "stripe" => Ok(TargetGroup::Stripes),
            other => Err(format!(
                "Unknown target group '{other}' (expected 'solids' or 'stripes')"
            )),
        }
    }
}

/// A shot recommendation produced by the inference service.
///
/// `confidence_score` is expected in `[0, 1]` but the range is not enforced
/// locally. Coordinates are optional because the model may be unable to
/// locate a ball.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShotAnalysis {
    /// Short, punchy title for the shot.
    pub recommended_shot: String,
    /// Why this is the best shot, including spin advice where relevant.
    pub reasoning: String,
    pub difficulty: Difficulty,
    #[serde(
        default,
        deserialize_with = "deserialize_position",
        skip_serializing_if = "Option::is_none"
    )]
    pub cue_ball_position: Option<Coordinates>,
    #[serde(
        default,
        deserialize_with = "deserialize_position",
        skip_serializing_if = "Option::is_none"
    )]
    pub target_ball_position: Option<Coordinates>,
    #[serde(
        default,
        deserialize_with = "deserialize_position",
        skip_serializing_if = "Option::is_none"
    )]
    pub target_pocket_position: Option<Coordinates>,
    pub confidence_score: f64,
}

impl ShotAnalysis {
    /// Confidence as a whole percentage for display (`0.834` -> `83`).
    pub fn confidence_percent(&self) -> i64 {
        (self.confidence_score * 100.0).round() as i64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_full_response() {
        let json = r#"{
            "recommendedShot": "Cut the 3-ball",
            "reasoning": "Clean angle into the corner.",
            "difficulty": "Medium",
            "confidenceScore": 0.8,
            "cueBallPosition": {"x": 30, "y": 40},
            "targetBallPosition": {"x": 60, "y": 50},
            "targetPocketPosition": {"x": 90, "y": 10}
        }"#;

        let analysis: ShotAnalysis = serde_json::from_str(json).unwrap();
        assert_eq!(analysis.recommended_shot, "Cut the 3-ball");
        assert_eq!(analysis.difficulty, Difficulty::Medium);
        assert_eq!(analysis.cue_ball_position, Some(Coordinates::new(30.0, 40.0)));
        assert_eq!(
            analysis.target_pocket_position,
            Some(Coordinates::new(90.0, 10.0))
        );
    }

    #[test]
    fn test_deserialize_without_coordinates() {
        let json = r#"{
            "recommendedShot": "Safety",
            "reasoning": "No open shots.",
            "difficulty": "Expert",
            "confidenceScore": 0.35
        }"#;

        let analysis: ShotAnalysis = serde_json::from_str(json).unwrap();
        assert!(analysis.cue_ball_position.is_none());
        assert!(analysis.target_ball_position.is_none());
        assert!(analysis.target_pocket_position.is_none());
    }

    #[test]
    fn test_partial_coordinates_are_absent() {
        let json = r#"{
            "recommendedShot": "Cut the 3-ball",
            "reasoning": "-",
            "difficulty": "Hard",
            "confidenceScore": 0.5,
            "cueBallPosition": {},
            "targetBallPosition": {"x": 60, "y": 50},
            "targetPocketPosition": {"x": 90}
        }"#;

        let analysis: ShotAnalysis = serde_json::from_str(json).unwrap();
        assert!(analysis.cue_ball_position.is_none());
        assert_eq!(
            analysis.target_ball_position,
            Some(Coordinates::new(60.0, 50.0))
        );
        assert!(analysis.target_pocket_position.is_none());
    }

    #[test]
    fn test_null_position_is_absent() {
        let json = r#"{
            "recommendedShot": "Safety",
            "reasoning": "-",
            "difficulty": "Easy",
            "confidenceScore": 0.9,
            "cueBallPosition": null
        }"#;

        let analysis: ShotAnalysis = serde_json::from_str(json).unwrap();
        assert!(analysis.cue_ball_position.is_none());
    }

    #[test]
    fn test_unknown_difficulty_is_rejected() {
        let json = r#"{
            "recommendedShot": "Bank it",
            "reasoning": "-",
            "difficulty": "Impossible",
            "confidenceScore": 0.1
        }"#;

        assert!(serde_json::from_str::<ShotAnalysis>(json).is_err());
    }

    #[test]
    fn test_confidence_percent_rounds() {
        let analysis = ShotAnalysis {
            recommended_shot: String::new(),
            reasoning: String::new(),
            difficulty: Difficulty::Easy,
            cue_ball_position: None,
            target_ball_position: None,
            target_pocket_position: None,
            confidence_score: 0.836,
        };
        assert_eq!(analysis.confidence_percent(), 84);
    }

    #[test]
    fn test_target_group_parsing_and_opponent() {
        assert_eq!("Solids".parse::<TargetGroup>(), Ok(TargetGroup::Solids));
        assert_eq!(" stripes ".parse::<TargetGroup>(), Ok(TargetGroup::Stripes));
        assert!("eight".parse::<TargetGroup>().is_err());
        assert_eq!(TargetGroup::Solids.opponent(), TargetGroup::Stripes);
    }

    #[test]
    fn test_difficulty_tones() {
        assert_eq!(Difficulty::Easy.tone(), DifficultyTone::Positive);
        assert_eq!(Difficulty::Expert.tone(), DifficultyTone::Danger);
    }
}
