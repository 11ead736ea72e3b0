use super::super::Model;
use super::super::Msg;
use shared::{AnalysisResult, ScoreBand, SuggestionItem, SuggestionKind, UiStrings};
use yew::prelude::*;

pub fn render_results(model: &Model, ctx: &Context<Model>) -> Html {
    html! {
        <section id="report" class="results-section" ref={model.results_ref.clone()}>
            {
                match model.session.result() {
                    Some(result) => render_report(model, ctx, result),
                    None => render_awaiting(model),
                }
            }
        </section>
    }
}

fn render_awaiting(model: &Model) -> Html {
    let strings = model.strings();
    html! {
        <div class="card awaiting-card">
            <i class="fa-solid fa-compass-drafting fa-2x"></i>
            <h3>{ &strings.awaiting }</h3>
            <p>{ &strings.awaiting_description }</p>
        </div>
    }
}

fn render_report(model: &Model, ctx: &Context<Model>, result: &AnalysisResult) -> Html {
    let strings = model.strings();
    let band = ScoreBand::for_score(result.score);
    let link = ctx.link();

    html! {
        <>
            <div class="report-grid">
                <div class="card score-card">
                    <h3>{ &strings.score_title }</h3>
                    <div class="gauge-wrapper">
                        <canvas ref={model.gauge_ref.clone()} class="score-gauge"></canvas>
                        <div class={classes!("score-value", band.css_class())}>
                            <span class="score-number">{ result.score.to_string() }</span>
                            <span class="score-max">{ "/100" }</span>
                        </div>
                    </div>
                    <div class="score-tally">
                        { render_tally(result, SuggestionKind::Good) }
                        { render_tally(result, SuggestionKind::Warning) }
                        { render_tally(result, SuggestionKind::Defect) }
                    </div>
                </div>
                <div class="card explanation-card">
                    <p>{ &result.explanation }</p>
                </div>
            </div>

            <div class="action-header">
                <h3>{ &strings.action_title }</h3>
                <div class="export-actions no-print" data-html2canvas-ignore="true">
                    <button class="export-btn" onclick={link.callback(|_| Msg::ExportPdf)}>
                        <i class="fa-solid fa-file-pdf"></i>{ format!(" {}", strings.download_pdf) }
                    </button>
                    <button class="export-btn" onclick={link.callback(|_| Msg::ExportJson)}>
                        <i class="fa-solid fa-file-code"></i>{ format!(" {}", strings.download_json) }
                    </button>
                </div>
            </div>

            <div class="suggestions">
                { for result.suggestions.iter().map(|item| render_suggestion(strings, item)) }
            </div>

            <footer class="report-credit">{ &strings.report_credit }</footer>
        </>
    }
}

fn render_tally(result: &AnalysisResult, kind: SuggestionKind) -> Html {
    html! {
        <span class={classes!("tally", kind.as_ref().to_string())}>
            { format!("{} {}", kind.icon(), result.count_of(kind)) }
        </span>
    }
}

fn render_suggestion(strings: &UiStrings, item: &SuggestionItem) -> Html {
    let kind_class = format!("suggestion--{}", item.kind.as_ref());

    html! {
        <article class={classes!("card", "suggestion-card", kind_class)}>
            <h4>
                <span class="suggestion-icon">{ item.kind.icon() }</span>
                { format!(" {}", item.title) }
            </h4>
            { render_detail_row(&strings.impact, item.impact.as_deref()) }
            { render_detail_row(&strings.remedy, item.remedy.as_deref()) }
            { render_detail_row(&strings.detail, item.detail.as_deref()) }
        </article>
    }
}

fn render_detail_row(label: &str, text: Option<&str>) -> Html {
    match text.map(str::trim).filter(|t| !t.is_empty()) {
        Some(text) => html! {
            <p class="suggestion-row">
                <strong>{ format!("{}: ", label) }</strong>
                { text.to_string() }
            </p>
        },
        None => html! {},
    }
}
