mod components;
mod submission;

use components::file_list::render_file_list;
use components::handlers;
use components::header::render_header;
use components::results::render_results;
use components::theme_toggle::render_theme_toggle;
use components::upload_section::render_upload_section;
use components::utils::render_error_message;
use gloo_events::EventListener;
use gloo_file::{File as GlooFile, ObjectUrl};
use shared::{AnalysisOutcome, UploadedFile};
use wasm_bindgen::JsCast;
use web_sys::{ClipboardEvent, DragEvent};
use yew::prelude::*;

/// One selected file: stable id for list keys and removal, the file handle
/// itself, and an object URL for the thumbnail once created.
#[derive(Clone)]
pub struct FileData {
    pub id: u64,
    pub file: GlooFile,
    pub preview_url: Option<ObjectUrl>,
}

pub enum Msg {
    // File operations
    FilesAdded(Vec<GlooFile>),
    AddPreview(u64, ObjectUrl),
    RemoveFile(u64),
    ClearAllFiles,

    // Submission pipeline
    Submit,
    FilesEncoded(Vec<UploadedFile>),
    EncodingFailed,
    AnalysisDone(AnalysisOutcome),
    AnalysisFailed,

    // UI states
    SetTemperature(Option<f32>),
    SetError(Option<String>),
    SetDragging(bool),
    ToggleTheme,

    // Input events
    HandleDrop(DragEvent),
    HandlePaste(ClipboardEvent),
}

/// Root component. Files are kept in insertion order; that order is the
/// submission order.
pub struct Model {
    pub files: Vec<FileData>,
    pub outcome: Option<AnalysisOutcome>,
    pub encoding: bool,
    pub uploading: bool,
    pub temperature: Option<f32>,
    pub error: Option<String>,
    pub is_dragging: bool,
    pub theme: String,
    paste_listener: Option<EventListener>,
}

impl Model {
    pub fn busy(&self) -> bool {
        self.encoding || self.uploading
    }
}

impl Component for Model {
    type Message = Msg;
    type Properties = ();

    fn create(ctx: &Context<Self>) -> Self {
        let mut model = Self {
            files: Vec::new(),
            outcome: None,
            encoding: false,
            uploading: false,
            temperature: None,
            error: None,
            is_dragging: false,
            theme: "light".to_string(),
            paste_listener: None,
        };

        let link = ctx.link().clone();
        let window = web_sys::window().expect("no global `window` exists");
        let listener = EventListener::new(&window, "paste", move |event| {
            if let Some(clipboard_event) = event.dyn_ref::<ClipboardEvent>() {
                link.send_message(Msg::HandlePaste(clipboard_event.clone()));
            }
        });
        model.paste_listener = Some(listener);

        model
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            // File operations
            Msg::FilesAdded(files) => handlers::handle_files_added(self, ctx, files),
            Msg::AddPreview(id, url) => handlers::handle_add_preview(self, id, url),
            Msg::RemoveFile(id) => handlers::handle_remove_file(self, id),
            Msg::ClearAllFiles => handlers::handle_clear_all_files(self),

            // Submission pipeline
            Msg::Submit => handlers::handle_submit(self, ctx),
            Msg::FilesEncoded(encoded) => handlers::handle_files_encoded(self, ctx, encoded),
            Msg::EncodingFailed => handlers::handle_encoding_failed(self),
            Msg::AnalysisDone(outcome) => handlers::handle_analysis_done(self, outcome),
            Msg::AnalysisFailed => handlers::handle_analysis_failed(self),

            // UI states
            Msg::SetTemperature(temperature) => {
                self.temperature = temperature;
                true
            }
            Msg::SetError(error) => {
                self.error = error;
                self.encoding = false;
                self.uploading = false;
                true
            }
            Msg::SetDragging(is_dragging) => {
                self.is_dragging = is_dragging;
                true
            }
            Msg::ToggleTheme => handlers::handle_toggle_theme(self),

            // Input events
            Msg::HandleDrop(event) => handlers::handle_drop(self, ctx, event),
            Msg::HandlePaste(event) => handlers::handle_paste(self, ctx, event),
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        html! {
            <div class="container">
                { render_header() }
                { render_theme_toggle(&self.theme, ctx.link()) }

                <main class="main-content">
                    { render_upload_section(self, ctx) }
                    { render_file_list(self, ctx) }
                    { render_error_message(self) }
                    { render_results(self) }
                </main>

                <footer class="app-footer">
                    <p>{"Profile Vibe Check | Fullstack Rust WASM"}</p>
                </footer>
            </div>
        }
    }
}

fn main() {
    wasm_logger::init(wasm_logger::Config::default());
    log::info!("App starting...");
    yew::Renderer::<Model>::new().render();
}
