use serde::{Deserialize, Serialize};

pub mod data_url;

pub use data_url::DataUrlError;

/// One user-selected file in transport form: the original filename plus a
/// `data:<mime>;base64,...` encoding of its bytes.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct UploadedFile {
    pub name: String,
    #[serde(rename = "dataUrl")]
    pub data_url: String,
}

/// One submission: the ordered file list plus optional sampling temperature.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct AnalysisRequest {
    pub files: Vec<UploadedFile>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum ValidationError {
    #[error("at least one file is required")]
    NoFiles,
    #[error("file {0} has an empty name")]
    EmptyName(usize),
    #[error("file '{0}' has no content")]
    EmptyContent(String),
    #[error("temperature {0} is outside [0, 1]")]
    TemperatureOutOfRange(f32),
}

impl AnalysisRequest {
    pub fn new(files: Vec<UploadedFile>, temperature: Option<f32>) -> Self {
        Self { files, temperature }
    }

    /// Schema-level checks shared by the client gate and the endpoint.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.files.is_empty() {
            return Err(ValidationError::NoFiles);
        }
        for (i, file) in self.files.iter().enumerate() {
            if file.name.is_empty() {
                return Err(ValidationError::EmptyName(i));
            }
            if file.data_url.is_empty() {
                return Err(ValidationError::EmptyContent(file.name.clone()));
            }
        }
        if let Some(t) = self.temperature {
            if !(0.0..=1.0).contains(&t) {
                return Err(ValidationError::TemperatureOutOfRange(t));
            }
        }
        Ok(())
    }
}

/// Structured verdict returned by the model in schema mode. Field names match
/// the wire format expected by the frontend. The score is not range-checked;
/// 0-100 is a prompt-level convention.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Analysis {
    pub letter_grade: String,
    pub overall_score_out_of_100: f64,
    pub follower_to_following_letter_grade: String,
    pub micro_genre: String,
    pub genre_emoji: String,
    pub full_analysis_text: String,
}

/// What the endpoint hands back: the six-field object in schema mode, or the
/// model's raw text otherwise. Untagged so the two wire shapes stay exactly
/// a bare object and a bare string.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(untagged)]
pub enum AnalysisOutcome {
    Structured(Analysis),
    Text(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(name: &str) -> UploadedFile {
        UploadedFile {
            name: name.into(),
            data_url: "data:image/png;base64,aGk=".into(),
        }
    }

    #[test]
    fn validate_rejects_empty_file_list() {
        let req = AnalysisRequest::new(vec![], None);
        assert_eq!(req.validate(), Err(ValidationError::NoFiles));
    }

    #[test]
    fn validate_rejects_blank_name_and_content() {
        let req = AnalysisRequest::new(vec![file("")], None);
        assert_eq!(req.validate(), Err(ValidationError::EmptyName(0)));

        let empty = UploadedFile {
            name: "a.png".into(),
            data_url: String::new(),
        };
        let req = AnalysisRequest::new(vec![file("ok.png"), empty], None);
        assert_eq!(
            req.validate(),
            Err(ValidationError::EmptyContent("a.png".into()))
        );
    }

    #[test]
    fn validate_bounds_temperature() {
        let req = AnalysisRequest::new(vec![file("a.png")], Some(1.5));
        assert_eq!(
            req.validate(),
            Err(ValidationError::TemperatureOutOfRange(1.5))
        );
        assert!(AnalysisRequest::new(vec![file("a.png")], Some(0.0))
            .validate()
            .is_ok());
        assert!(AnalysisRequest::new(vec![file("a.png")], Some(1.0))
            .validate()
            .is_ok());
        assert!(AnalysisRequest::new(vec![file("a.png")], None)
            .validate()
            .is_ok());
    }

    #[test]
    fn request_serializes_with_wire_field_names() {
        let req = AnalysisRequest::new(vec![file("a.png")], None);
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["files"][0]["name"], "a.png");
        assert!(json["files"][0]["dataUrl"].is_string());
        // absent temperature is omitted, not null
        assert!(json.get("temperature").is_none());
    }

    #[test]
    fn outcome_wire_shapes_are_bare() {
        let structured = AnalysisOutcome::Structured(Analysis {
            letter_grade: "B+".into(),
            overall_score_out_of_100: 82.0,
            follower_to_following_letter_grade: "A".into(),
            micro_genre: "latte-art archivist".into(),
            genre_emoji: "☕".into(),
            full_analysis_text: "Nice grid.".into(),
        });
        let json = serde_json::to_value(&structured).unwrap();
        assert!(json.is_object());
        assert_eq!(json["letterGrade"], "B+");
        assert_eq!(json["overallScoreOutOf100"], 82.0);
        assert_eq!(json["followerToFollowingLetterGrade"], "A");
        assert_eq!(json["microGenre"], "latte-art archivist");
        assert_eq!(json["genreEmoji"], "☕");
        assert_eq!(json["fullAnalysisText"], "Nice grid.");

        let text = AnalysisOutcome::Text("just vibes".into());
        assert_eq!(serde_json::to_value(&text).unwrap(), "just vibes");
    }

    #[test]
    fn outcome_deserializes_both_variants() {
        let structured: AnalysisOutcome = serde_json::from_str(
            r#"{"letterGrade":"A","overallScoreOutOf100":95,
                "followerToFollowingLetterGrade":"B","microGenre":"gym mirror poet",
                "genreEmoji":"🏋️","fullAnalysisText":"ok"}"#,
        )
        .unwrap();
        assert!(matches!(structured, AnalysisOutcome::Structured(_)));

        let text: AnalysisOutcome = serde_json::from_str("\"plain roast\"").unwrap();
        assert_eq!(text, AnalysisOutcome::Text("plain roast".into()));
    }
}
