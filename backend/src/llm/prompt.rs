use serde_json::{json, Value};

/// Default persona for the profile review. Overridable through
/// `SYSTEM_PROMPT`; the 0-100 score range and tone live here, not in code.
pub const DEFAULT_SYSTEM_PROMPT: &str = "Analyze and judge the instagram profile shown in the \
following screenshots. Include at the end of your response a score between 0 and 100 where 0 is \
not good and 100 is perfect. Be brutally honest in your response. Also, categorize the profile \
into a niche micro-genre as well. Phrase it like you are talking to the instagram profile owner. \
This whole thing should be more like an informal light-hearted roast, not a formal review or \
critique. Be crude, be funny, and don't be afraid to tease. Include some nice things, don't be \
overly mean. Do not mention captions. Give about 3 paragraphs in the full roast. If they don't \
include the follower and following count, don't mention it in the full review or make fun of \
them for not including it. Make the grade higher than it should be to be nice, and make the \
micro-genre creative.";

/// JSON schema for the structured verdict, mirroring `shared::Analysis`.
pub fn analysis_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "letterGrade": { "type": "string" },
            "overallScoreOutOf100": { "type": "number" },
            "followerToFollowingLetterGrade": { "type": "string" },
            "microGenre": { "type": "string" },
            "genreEmoji": { "type": "string" },
            "fullAnalysisText": { "type": "string" }
        },
        "required": [
            "letterGrade",
            "overallScoreOutOf100",
            "followerToFollowingLetterGrade",
            "microGenre",
            "genreEmoji",
            "fullAnalysisText"
        ],
        "additionalProperties": false
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_requires_all_six_fields() {
        let schema = analysis_schema();
        let required = schema["required"].as_array().unwrap();
        assert_eq!(required.len(), 6);
        for field in required {
            assert!(schema["properties"][field.as_str().unwrap()].is_object());
        }
        assert_eq!(schema["additionalProperties"], false);
        assert_eq!(schema["properties"]["overallScoreOutOf100"]["type"], "number");
    }
}
