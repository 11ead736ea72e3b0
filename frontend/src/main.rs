mod api;
mod components;

use api::{FloorPlan, HttpTransport};
use components::gauge::CanvasGauge;
use components::{handlers, header, results, upload_section};
use gloo_events::EventListener;
use gloo_file::{File as GlooFile, ObjectUrl};
use gloo_timers::callback::Timeout;
use shared::{
    AnalysisError, AnalysisResult, AppConfig, ConfigOverrides, HealthStatus, Locale, LocaleTable,
    Readiness, Session, UiStrings, Uuid,
};
use std::rc::Rc;
use web_sys::DragEvent;
use yew::prelude::*;

// Yew msg components
pub enum Msg {
    // File operations
    FileChosen(GlooFile),
    SetNotice(Option<String>),

    // Analysis operations
    Analyze,
    Reset,
    AnalysisSettled(Uuid, Result<AnalysisResult, AnalysisError>),
    HealthChecked(Result<HealthStatus, AnalysisError>),

    // Exports
    ExportPdf,
    ExportJson,
    PrintFinished(String),

    // UI states
    SetLocale(Locale),
    SetDragging(bool),

    // Input events
    HandleDrop(DragEvent),
}

#[derive(Debug, Clone, PartialEq)]
pub enum HealthBadge {
    Checking,
    Known(Readiness),
    Offline,
}

#[derive(Properties, PartialEq)]
pub struct AppProps {
    pub config: Rc<AppConfig>,
    pub locales: Rc<LocaleTable>,
}

// Main component
pub struct Model {
    locales: Rc<LocaleTable>,
    locale: Locale,
    session: Session<FloorPlan, ObjectUrl, CanvasGauge>,
    transport: Rc<HttpTransport>,
    gauge_ref: NodeRef,
    results_ref: NodeRef,
    is_dragging: bool,
    notice: Option<String>,
    health: HealthBadge,
    scroll_timeout: Option<Timeout>,
    print_listener: Option<EventListener>,
}

impl Model {
    fn strings(&self) -> &UiStrings {
        self.locales.strings(self.locale)
    }
}

impl Component for Model {
    type Message = Msg;
    type Properties = AppProps;

    fn create(ctx: &Context<Self>) -> Self {
        let props = ctx.props();
        let gauge_ref = NodeRef::default();
        let transport = Rc::new(HttpTransport::new(props.config.clone()));

        handlers::probe_health(ctx, transport.clone());

        Self {
            locales: props.locales.clone(),
            locale: props.config.default_locale,
            session: Session::new(
                CanvasGauge::new(gauge_ref.clone()),
                props.config.max_upload_bytes,
            ),
            transport,
            gauge_ref,
            results_ref: NodeRef::default(),
            is_dragging: false,
            notice: None,
            health: HealthBadge::Checking,
            scroll_timeout: None,
            print_listener: None,
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            // File operations
            Msg::FileChosen(file) => handlers::handle_file_chosen(self, file),
            Msg::SetNotice(notice) => {
                self.notice = notice;
                true
            }

            // Analysis operations
            Msg::Analyze => handlers::handle_analyze(self, ctx),
            Msg::Reset => handlers::handle_reset(self),
            Msg::AnalysisSettled(request_id, outcome) => {
                handlers::handle_analysis_settled(self, request_id, outcome)
            }
            Msg::HealthChecked(outcome) => handlers::handle_health_checked(self, outcome),

            // Exports
            Msg::ExportPdf => handlers::handle_export_pdf(self, ctx),
            Msg::ExportJson => handlers::handle_export_json(self),
            Msg::PrintFinished(previous_title) => {
                handlers::handle_print_finished(self, previous_title)
            }

            // UI states
            Msg::SetLocale(locale) => handlers::handle_set_locale(self, locale),
            Msg::SetDragging(is_dragging) => {
                self.is_dragging = is_dragging;
                true
            }

            // Input events
            Msg::HandleDrop(event) => handlers::handle_drop(self, ctx, event),
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        html! {
            <div class="container">
                { header::render_header(self, ctx) }

                <main class="main-content">
                { upload_section::render_upload_section(self, ctx) }
                { results::render_results(self, ctx) }
                </main>

                <footer class="app-footer">
                    <p>{ format!("© 2026 {} | Fullstack Rust WASM", self.strings().brand) }</p>
                </footer>
            </div>
        }
    }

    fn rendered(&mut self, _ctx: &Context<Self>, _first_render: bool) {
        handlers::handle_rendered(self);
    }
}

fn query_overrides() -> ConfigOverrides {
    let params = web_sys::window()
        .and_then(|window| window.location().search().ok())
        .and_then(|search| web_sys::UrlSearchParams::new_with_str(&search).ok());

    match params {
        Some(params) => ConfigOverrides {
            api_base_url: params.get("api"),
            locale: params.get("lang"),
            timeout_secs: params.get("timeout"),
        },
        None => ConfigOverrides::default(),
    }
}

fn load_config() -> AppConfig {
    let mut config = match AppConfig::from_build_env(option_env!("VASTU_API_BASE_URL")) {
        Ok(config) => config,
        Err(e) => {
            log::error!("Ignoring build-time API base URL: {}", e);
            AppConfig::default()
        }
    };

    for rejected in config.apply(query_overrides()) {
        log::warn!("Ignoring query string override: {}", rejected);
    }
    config
}

fn main() {
    wasm_logger::init(wasm_logger::Config::default());
    log::info!("App starting...");

    let locales = match LocaleTable::embedded() {
        Ok(locales) => locales,
        Err(e) => {
            log::error!("Failed to load UI strings: {}", e);
            return;
        }
    };
    let config = load_config();
    log::info!(
        "Analysis endpoint: {} (timeout {}s)",
        config.endpoint(shared::transport::ANALYZE_PATH),
        config.request_timeout_secs
    );

    yew::Renderer::<Model>::with_props(AppProps {
        config: Rc::new(config),
        locales: Rc::new(locales),
    })
    .render();
}
