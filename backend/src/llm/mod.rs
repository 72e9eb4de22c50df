pub mod model;
pub mod openai_service;
pub mod prompt;

pub use openai_service::{OpenAiError, OpenAiService};

/// Output mode for the provider call: either constrained to the six-field
/// analysis schema, or free-form text returned verbatim.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AnalysisMode {
    Structured,
    Text,
}

impl std::str::FromStr for AnalysisMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "structured" => Ok(AnalysisMode::Structured),
            "text" => Ok(AnalysisMode::Text),
            other => Err(format!("expected 'structured' or 'text', got '{}'", other)),
        }
    }
}
