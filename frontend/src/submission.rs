use shared::{AnalysisOutcome, AnalysisRequest, UploadedFile};

pub const ENCODING_ERROR: &str = "Something went wrong while encoding the files.";
pub const UPLOAD_ERROR: &str = "Something went wrong while uploading the files.";

/// Builds the single outbound request, or nothing when the encoded list is
/// empty. Order is taken as-is: encoding preserves selection order.
pub fn prepare_request(
    files: Vec<UploadedFile>,
    temperature: Option<f32>,
) -> Option<AnalysisRequest> {
    if files.is_empty() {
        return None;
    }
    Some(AnalysisRequest::new(files, temperature))
}

/// How one submission attempt ended, as seen by the staged file list and
/// the error banner.
pub enum SubmissionEnd {
    Analyzed(AnalysisOutcome),
    EncodingFailed,
    UploadFailed,
}

/// Applies the end of a submission to the staged selection: success hands
/// the outcome back and clears the files; either failure keeps every file
/// so the user can retry without re-selecting.
pub fn settle_submission<F>(
    files: &mut Vec<F>,
    end: SubmissionEnd,
) -> (Option<AnalysisOutcome>, Option<String>) {
    match end {
        SubmissionEnd::Analyzed(outcome) => {
            files.clear();
            (Some(outcome), None)
        }
        SubmissionEnd::EncodingFailed => (None, Some(ENCODING_ERROR.into())),
        SubmissionEnd::UploadFailed => (None, Some(UPLOAD_ERROR.into())),
    }
}
