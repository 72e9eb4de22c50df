use super::utils::debounce;
use crate::{FileData, Model, Msg};
use web_sys::HtmlInputElement;
use yew::prelude::*;

/// The staged selection: thumbnails in submission order, per-file removal,
/// the temperature slider, and the submit controls.
pub fn render_file_list(model: &Model, ctx: &Context<Model>) -> Html {
    if model.files.is_empty() {
        return html! {};
    }

    let link = ctx.link().clone();

    html! {
        <div id="file-list-container">
            <h2>{ format!("Screenshots: {} / 15", model.files.len()) }</h2>
            <div id="file-list">
                { for model.files.iter().map(|file_data| render_file_item(ctx, file_data)) }
            </div>
            { render_temperature_slider(model, ctx) }
            <div class="button-container">
                <button
                    id="clear-all-btn"
                    class="analyze-btn"
                    style="background-color: var(--clear-color);"
                    disabled={model.busy()}
                    onclick={debounce(300, {
                        let link = link.clone();
                        move || link.send_message(Msg::ClearAllFiles)
                    })}
                >
                    <i class="fa-solid fa-trash"></i>{" Clear All"}
                </button>
                <button
                    id="submit-btn"
                    class="analyze-btn"
                    style="background-color: var(--primary-color);"
                    disabled={model.files.is_empty() || model.busy()}
                    onclick={debounce(300, {
                        let link = link.clone();
                        move || link.send_message(Msg::Submit)
                    })}
                >
                    { render_submit_button_content(model) }
                </button>
            </div>
        </div>
    }
}

fn render_submit_button_content(model: &Model) -> Html {
    if model.busy() {
        let label = if model.encoding { " Encoding..." } else { " Uploading..." };
        html! { <><i class="fa-solid fa-spinner fa-spin"></i>{ label }</> }
    } else {
        html! { <><i class="fa-solid fa-magnifying-glass"></i>{" Analyze my vibe"}</> }
    }
}

fn render_temperature_slider(model: &Model, ctx: &Context<Model>) -> Html {
    let oninput = ctx.link().callback(|e: InputEvent| {
        let input: HtmlInputElement = e.target_unchecked_into();
        Msg::SetTemperature(input.value().parse::<f32>().ok())
    });

    let display = model
        .temperature
        .map_or_else(|| "model default".to_string(), |t| format!("{:.2}", t));

    html! {
        <div class="temperature-control">
            <label for="temperature-slider">{"Temperature: "}<span>{ display }</span></label>
            <input
                type="range"
                id="temperature-slider"
                min="0"
                max="1"
                step="0.05"
                value={model.temperature.map(|t| t.to_string()).unwrap_or_else(|| "0.5".into())}
                {oninput}
            />
        </div>
    }
}

fn render_file_item(ctx: &Context<Model>, file_data: &FileData) -> Html {
    let file_id = file_data.id;
    let link = ctx.link();
    let size_mb = file_data.file.size() as f64 / 1_000_000.0;

    html! {
        <div class="file-item" key={file_id.to_string()}>
            {
                if let Some(url) = &file_data.preview_url {
                    html! { <img class="file-thumb" src={url.to_string()} alt={file_data.file.name()} /> }
                } else {
                    html! { <div class="file-thumb placeholder">{"..."}</div> }
                }
            }
            <span class="file-name" title={file_data.file.name()}>{ file_data.file.name() }</span>
            <span class="file-meta">
                <span class="file-size">{ format!("{:.1} MB", size_mb) }</span>
                <button
                    class="remove-btn"
                    title="Remove this screenshot"
                    onclick={link.callback(move |e: MouseEvent| {
                        e.stop_propagation();
                        Msg::RemoveFile(file_id)
                    })}
                >
                    <i class="fa-solid fa-times"></i>
                </button>
            </span>
        </div>
    }
}
