use yew::prelude::*;

/// Renders the application header
pub fn render_header() -> Html {
    html! {
        <header class="app-header">
            <h1><i class="fa-solid fa-camera-retro"></i> {" Profile Vibe Check"}</h1>
            <p class="subtitle">{"Upload screenshots of a profile and get it rated, roasted, and genre-tagged"}</p>
        </header>
    }
}
