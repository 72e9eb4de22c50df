use super::utils::{extract_image_files, generate_id};
use crate::submission::{prepare_request, settle_submission, SubmissionEnd};
use crate::{FileData, Model, Msg};
use futures::future;
use gloo_console::error;
use gloo_file::futures::read_as_data_url;
use gloo_file::{File as GlooFile, ObjectUrl};
use gloo_net::http::Request;
use shared::{AnalysisOutcome, AnalysisRequest, UploadedFile};
use wasm_bindgen_futures::spawn_local;
use web_sys::{ClipboardEvent, DragEvent, FileList};
use yew::prelude::*;

pub const MAX_FILES: usize = 15;

pub fn handle_files_added(model: &mut Model, ctx: &Context<Model>, files: Vec<GlooFile>) -> bool {
    let available_slots = MAX_FILES.saturating_sub(model.files.len());

    if files.len() > available_slots {
        model.error = Some(format!(
            "Upload limit exceeded. You can only add {} more images.",
            available_slots
        ));
        return true;
    }

    model.error = None;

    for file in files.into_iter() {
        let id = generate_id();
        model.files.push(FileData {
            id,
            file: file.clone(),
            preview_url: None,
        });

        let preview_url = ObjectUrl::from(file);
        ctx.link().send_message(Msg::AddPreview(id, preview_url));
    }

    true
}

pub fn handle_add_preview(model: &mut Model, id: u64, url: ObjectUrl) -> bool {
    if let Some(file_data) = model.files.iter_mut().find(|fd| fd.id == id) {
        file_data.preview_url = Some(url);
        true
    } else {
        false
    }
}

pub fn handle_remove_file(model: &mut Model, id: u64) -> bool {
    let before = model.files.len();
    model.files.retain(|fd| fd.id != id);

    if model.files.is_empty() {
        model.error = None;
    }

    model.files.len() != before
}

pub fn handle_clear_all_files(model: &mut Model) -> bool {
    for file_data in model.files.iter_mut() {
        let _ = file_data.preview_url.take();
    }
    model.files.clear();
    model.error = None;
    true
}

/// Kicks off one submission: no-op on an empty list, otherwise encode every
/// file in parallel and hand the joined result back as a message. Any single
/// read failure aborts the whole attempt before a network call is made.
pub fn handle_submit(model: &mut Model, ctx: &Context<Model>) -> bool {
    if model.files.is_empty() {
        return false;
    }

    model.encoding = true;
    model.error = None;

    let files: Vec<(String, GlooFile)> = model
        .files
        .iter()
        .map(|fd| (fd.file.name(), fd.file.clone()))
        .collect();
    let link = ctx.link().clone();

    spawn_local(async move {
        let reads = files.into_iter().map(|(name, file)| async move {
            read_as_data_url(&file)
                .await
                .map(|data_url| UploadedFile { name, data_url })
        });

        match future::try_join_all(reads).await {
            Ok(encoded) => link.send_message(Msg::FilesEncoded(encoded)),
            Err(e) => {
                error!(format!("File encoding failed: {:?}", e));
                link.send_message(Msg::EncodingFailed);
            }
        }
    });

    true
}

pub fn handle_files_encoded(
    model: &mut Model,
    ctx: &Context<Model>,
    encoded: Vec<UploadedFile>,
) -> bool {
    model.encoding = false;

    match prepare_request(encoded, model.temperature) {
        Some(request) => {
            model.uploading = true;
            send_analysis_request(ctx, request);
        }
        None => {
            model.uploading = false;
        }
    }

    true
}

pub fn handle_encoding_failed(model: &mut Model) -> bool {
    settle(model, SubmissionEnd::EncodingFailed)
}

pub fn handle_analysis_done(model: &mut Model, outcome: AnalysisOutcome) -> bool {
    settle(model, SubmissionEnd::Analyzed(outcome))
}

pub fn handle_analysis_failed(model: &mut Model) -> bool {
    settle(model, SubmissionEnd::UploadFailed)
}

/// Success clears the selection; failure keeps it so the user can retry
/// without re-selecting anything. Object URLs are released before the list
/// is cleared.
fn settle(model: &mut Model, end: SubmissionEnd) -> bool {
    model.encoding = false;
    model.uploading = false;

    if matches!(end, SubmissionEnd::Analyzed(_)) {
        for file_data in model.files.iter_mut() {
            let _ = file_data.preview_url.take();
        }
    }

    let (outcome, error) = settle_submission(&mut model.files, end);
    if outcome.is_some() {
        model.outcome = outcome;
    }
    model.error = error;
    true
}

pub fn send_analysis_request(ctx: &Context<Model>, request: AnalysisRequest) {
    let link = ctx.link().clone();

    spawn_local(async move {
        let built = match Request::post("/api/analyze").json(&request) {
            Ok(req) => req,
            Err(e) => {
                error!(format!("Failed to build request: {:?}", e));
                link.send_message(Msg::AnalysisFailed);
                return;
            }
        };

        match built.send().await {
            Ok(response) if response.ok() => match response.json::<AnalysisOutcome>().await {
                Ok(outcome) => link.send_message(Msg::AnalysisDone(outcome)),
                Err(e) => {
                    error!(format!("Failed to parse response: {}", e));
                    link.send_message(Msg::AnalysisFailed);
                }
            },
            Ok(response) => {
                let status = response.status();
                let body = response.text().await.unwrap_or_default();
                error!(format!("Server error: {} - {}", status, body));
                link.send_message(Msg::AnalysisFailed);
            }
            Err(e) => {
                error!(format!("Network error: {}", e));
                link.send_message(Msg::AnalysisFailed);
            }
        }
    });
}

pub fn handle_toggle_theme(model: &mut Model) -> bool {
    let body = web_sys::window()
        .unwrap()
        .document()
        .unwrap()
        .body()
        .unwrap();

    if model.theme == "light" {
        model.theme = "dark".to_string();
        body.class_list().add_1("dark-mode").unwrap();
    } else {
        model.theme = "light".to_string();
        body.class_list().remove_1("dark-mode").unwrap();
    }

    true
}

pub fn handle_drop(model: &mut Model, ctx: &Context<Model>, event: DragEvent) -> bool {
    event.prevent_default();
    model.is_dragging = false;

    if let Some(data_transfer) = event.data_transfer() {
        if let Some(file_list) = data_transfer.files() {
            process_file_list(ctx, file_list);
        }
    }

    true
}

pub fn handle_paste(_model: &mut Model, ctx: &Context<Model>, event: ClipboardEvent) -> bool {
    if let Some(data_transfer) = event.clipboard_data() {
        if let Some(file_list) = data_transfer.files() {
            event.prevent_default();
            process_file_list(ctx, file_list);
            return true;
        }
    }
    false
}

pub fn process_file_list(ctx: &Context<Model>, file_list: FileList) {
    let files_to_process = extract_image_files(&file_list);

    if files_to_process.len() < file_list.length() as usize {
        ctx.link()
            .send_message(Msg::SetError(Some("Skipped non-image files.".into())));
    }

    if !files_to_process.is_empty() {
        ctx.link().send_message(Msg::FilesAdded(files_to_process));
    }
}
