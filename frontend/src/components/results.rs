use crate::Model;
use shared::{Analysis, AnalysisOutcome};
use yew::prelude::*;

pub fn render_results(model: &Model) -> Html {
    match &model.outcome {
        Some(AnalysisOutcome::Structured(analysis)) => render_structured(analysis),
        Some(AnalysisOutcome::Text(text)) => render_free_text(text),
        None => html! {},
    }
}

fn render_structured(analysis: &Analysis) -> Html {
    // Display clamp only; the wire value is passed through unchecked.
    let score = analysis.overall_score_out_of_100.clamp(0.0, 100.0);

    html! {
        <div class="results-container">
            <div class="result-header">
                <h2>
                    <span class="letter-grade">{ &analysis.letter_grade }</span>
                    <span class="micro-genre">
                        { format!("{} {}", analysis.genre_emoji, analysis.micro_genre) }
                    </span>
                </h2>
                <div class="score-meter">
                    <div class="meter-label">{"Overall score:"}</div>
                    <div class="meter">
                        <div class="meter-fill" style={format!("width: {}%", score)}></div>
                    </div>
                    <div class="meter-value">{ format!("{:.0} / 100", analysis.overall_score_out_of_100) }</div>
                </div>
                <p class="ratio-grade">
                    {"Follower-to-following ratio: "}
                    <strong>{ &analysis.follower_to_following_letter_grade }</strong>
                </p>
            </div>
            <div class="detailed-results">
                <h3>{"The Full Roast"}</h3>
                { render_paragraphs(&analysis.full_analysis_text) }
            </div>
        </div>
    }
}

fn render_free_text(text: &str) -> Html {
    html! {
        <div class="results-container">
            <div class="detailed-results">
                <h3>{"The Verdict"}</h3>
                { render_paragraphs(text) }
            </div>
        </div>
    }
}

fn render_paragraphs(text: &str) -> Html {
    html! {
        { for text
            .split("\n\n")
            .filter(|p| !p.trim().is_empty())
            .map(|p| html! { <p class="analysis-paragraph">{ p }</p> }) }
    }
}
