//! Response schema declared to the inference service.
//!
//! Uses the OpenAPI subset Gemini accepts for `responseSchema` (upper-case
//! type names).

use cueshot_core::Difficulty;
use serde_json::{Value, json};

/// Fields the service must always return.
pub const REQUIRED_FIELDS: [&str; 4] = [
    "recommendedShot",
    "reasoning",
    "difficulty",
    "confidenceScore",
];

fn coordinate_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "x": { "type": "NUMBER", "description": "X percentage (0-100) from left" },
            "y": { "type": "NUMBER", "description": "Y percentage (0-100) from top" }
        },
        "required": ["x", "y"]
    })
}

/// Schema matching [`cueshot_core::ShotAnalysis`].
pub fn response_schema() -> Value {
    let difficulties: Vec<&str> = Difficulty::ALL.iter().map(|d| d.as_str()).collect();

    json!({
        "type": "OBJECT",
        "properties": {
            "recommendedShot": {
                "type": "STRING",
                "description": "A short, punchy title for the shot (e.g., 'Cut the 5-ball into Corner Pocket')"
            },
            "reasoning": {
                "type": "STRING",
                "description": "Detailed explanation of why this is the best shot, including english/spin advice if applicable."
            },
            "difficulty": {
                "type": "STRING",
                "enum": difficulties
            },
            "cueBallPosition": coordinate_schema(),
            "targetBallPosition": coordinate_schema(),
            "targetPocketPosition": coordinate_schema(),
            "confidenceScore": {
                "type": "NUMBER",
                "description": "Confidence in the analysis from 0 to 1"
            }
        },
        "required": REQUIRED_FIELDS
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_fields() {
        let schema = response_schema();
        assert_eq!(
            schema["required"],
            json!(["recommendedShot", "reasoning", "difficulty", "confidenceScore"])
        );
    }

    #[test]
    fn test_difficulty_enum_lists_four_levels() {
        let schema = response_schema();
        assert_eq!(
            schema["properties"]["difficulty"]["enum"],
            json!(["Easy", "Medium", "Hard", "Expert"])
        );
    }

    #[test]
    fn test_coordinates_are_optional_objects() {
        let schema = response_schema();
        for field in ["cueBallPosition", "targetBallPosition", "targetPocketPosition"] {
            assert_eq!(schema["properties"][field]["type"], "OBJECT");
            assert_eq!(schema["properties"][field]["properties"]["y"]["type"], "NUMBER");
            assert_eq!(schema["properties"][field]["required"], json!(["x", "y"]));
            assert!(
                !schema["required"]
                    .as_array()
                    .unwrap()
                    .contains(&json!(field))
            );
        }
    }
}
