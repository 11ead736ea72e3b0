use super::super::{HealthBadge, Model};
use super::language_toggle::render_language_toggle;
use shared::Readiness;
use yew::prelude::*;

/// Renders the navigation bar and the hero header
pub fn render_header(model: &Model, ctx: &Context<Model>) -> Html {
    let strings = model.strings();

    html! {
        <>
            <nav class="top-bar">
                <div class="brand">
                    <i class="fa-solid fa-compass"></i>
                    <span>{ &strings.brand }</span>
                </div>
                <div class="top-right">
                    { render_health_badge(model) }
                    { render_language_toggle(model.locale, ctx.link()) }
                </div>
            </nav>
            <header class="app-header">
                <h1 class="gradient-text">{ &strings.title }</h1>
                <p class="subtitle">{ &strings.subtitle }</p>
            </header>
        </>
    }
}

fn render_health_badge(model: &Model) -> Html {
    let strings = model.strings();
    let (class, label, title) = match &model.health {
        HealthBadge::Checking => return html! {},
        HealthBadge::Known(Readiness::Ready { model: model_name }) => (
            "health-badge ready",
            strings.backend_ready.clone(),
            model_name.clone().unwrap_or_default(),
        ),
        HealthBadge::Known(Readiness::MissingApiKey) => (
            "health-badge warning",
            strings.backend_missing_key.clone(),
            String::new(),
        ),
        HealthBadge::Known(Readiness::Degraded(status)) => (
            "health-badge warning",
            strings.backend_offline.clone(),
            status.clone(),
        ),
        HealthBadge::Offline => (
            "health-badge offline",
            strings.backend_offline.clone(),
            String::new(),
        ),
    };

    html! {
        <span class={class} title={title}>
            <i class="fa-solid fa-circle"></i>{ format!(" {}", label) }
        </span>
    }
}
