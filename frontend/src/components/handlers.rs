use super::super::{HealthBadge, Model, Msg};
use super::export;
use super::utils::{first_image_file, today_utc};
use crate::api::{FloorPlan, HttpTransport};
use gloo_file::{File as GlooFile, ObjectUrl};
use gloo_timers::callback::Timeout;
use shared::{AnalysisError, AnalysisRequest, AnalysisResult, HealthStatus, Locale, Uuid};
use std::rc::Rc;
use wasm_bindgen_futures::spawn_local;
use web_sys::DragEvent;
use yew::prelude::*;

const SCROLL_DELAY_MS: u32 = 100;

pub fn handle_file_chosen(model: &mut Model, file: GlooFile) -> bool {
    let preview_url = ObjectUrl::from(file.clone());
    model.notice = None;
    model.session.select_image(FloorPlan::new(file), preview_url);
    true
}

pub fn handle_drop(model: &mut Model, ctx: &Context<Model>, event: DragEvent) -> bool {
    event.prevent_default();
    model.is_dragging = false;

    if model.session.is_analyzing() {
        return true;
    }

    if let Some(file_list) = event.data_transfer().and_then(|dt| dt.files()) {
        let (chosen, skipped) = first_image_file(&file_list);
        for name in &skipped {
            log::warn!("Skipping dropped file: {}", name);
        }
        match chosen {
            Some(file) => ctx.link().send_message(Msg::FileChosen(file)),
            None => ctx.link().send_message(Msg::SetNotice(Some(
                "Only image files can be analyzed.".into(),
            ))),
        }
    }

    true
}

pub fn handle_analyze(model: &mut Model, ctx: &Context<Model>) -> bool {
    model.notice = None;
    match model.session.begin_submit(model.locale) {
        Some(request) => {
            send_analysis_request(ctx, model.transport.clone(), request);
            true
        }
        // Either nothing to send or the upload was rejected locally.
        None => true,
    }
}

pub fn handle_reset(model: &mut Model) -> bool {
    log::info!("Starting a new analysis");
    model.session.reset();
    model.notice = None;
    model.scroll_timeout = None;
    true
}

pub fn send_analysis_request(
    ctx: &Context<Model>,
    transport: Rc<HttpTransport>,
    request: AnalysisRequest<FloorPlan>,
) {
    spawn_local({
        let link = ctx.link().clone();

        async move {
            let outcome = shared::submit(&*transport, &request).await;
            link.send_message(Msg::AnalysisSettled(request.id, outcome));
        }
    });
}

pub fn handle_analysis_settled(
    model: &mut Model,
    request_id: Uuid,
    outcome: Result<AnalysisResult, AnalysisError>,
) -> bool {
    // A stale answer still frees the submit button.
    model.session.settle(request_id, outcome);
    true
}

/// Runs after every render: the gauge canvas only exists once the results
/// card is in the DOM.
pub fn handle_rendered(model: &mut Model) {
    if !model.session.needs_chart() {
        return;
    }

    match model.session.render_chart() {
        Ok(true) => {
            let results_ref = model.results_ref.clone();
            model.scroll_timeout = Some(Timeout::new(SCROLL_DELAY_MS, move || {
                if let Some(results) = results_ref.cast::<web_sys::Element>() {
                    results.scroll_into_view();
                }
            }));
        }
        Ok(false) => {}
        Err(e) => log::error!("Failed to draw score gauge: {}", e),
    }
}

pub fn probe_health(ctx: &Context<Model>, transport: Rc<HttpTransport>) {
    spawn_local({
        let link = ctx.link().clone();

        async move {
            let outcome = transport.probe_health().await;
            link.send_message(Msg::HealthChecked(outcome));
        }
    });
}

pub fn handle_health_checked(
    model: &mut Model,
    outcome: Result<HealthStatus, AnalysisError>,
) -> bool {
    model.health = match outcome {
        Ok(status) => {
            log::info!("Backend health: {:?}", status);
            HealthBadge::Known(status.readiness())
        }
        Err(e) => {
            log::warn!("Backend health check failed: {}", e);
            HealthBadge::Offline
        }
    };
    true
}

pub fn handle_set_locale(model: &mut Model, locale: Locale) -> bool {
    if model.locale == locale {
        return false;
    }
    log::info!("Switching language to {}", locale);
    model.locale = locale;
    true
}

pub fn handle_export_pdf(model: &mut Model, ctx: &Context<Model>) -> bool {
    let Some(report) = today_utc().and_then(|today| model.session.export(today)) else {
        return false;
    };

    if !export::pdf_exporter_available() {
        log::warn!("PDF exporter not loaded, falling back to the print dialog");
        return print_report_fallback(model, ctx, &report.stem);
    }
    let Some(element) = model.results_ref.cast::<web_sys::Element>() else {
        log::error!("Report region is not mounted");
        return false;
    };

    let file_name = report.pdf_file_name();
    let options = report.pdf_options().to_string();
    log::info!("Exporting {}", file_name);

    spawn_local({
        let link = ctx.link().clone();

        async move {
            match export::save_pdf(&element, &options).await {
                Ok(()) => log::info!("Saved {}", file_name),
                Err(e) => {
                    log::error!("PDF export failed: {}", e);
                    link.send_message(Msg::SetNotice(Some(format!(
                        "Could not export the report: {}",
                        e
                    ))));
                }
            }
        }
    });
    false
}

fn print_report_fallback(model: &mut Model, ctx: &Context<Model>, stem: &str) -> bool {
    match export::print_report(stem, ctx.link().callback(Msg::PrintFinished)) {
        Ok(listener) => {
            model.print_listener = Some(listener);
            false
        }
        Err(e) => {
            log::error!("PDF export failed: {}", e);
            model.notice = Some(e);
            true
        }
    }
}

pub fn handle_print_finished(model: &mut Model, previous_title: String) -> bool {
    export::restore_title(&previous_title);
    model.print_listener = None;
    false
}

pub fn handle_export_json(model: &mut Model) -> bool {
    let Some(today) = today_utc() else {
        return false;
    };
    let (Some(report), Some(result)) = (model.session.export(today), model.session.result())
    else {
        return false;
    };

    let exported = report
        .json_body(result)
        .map_err(|e| e.to_string())
        .and_then(|body| export::download_text(&report.json_file_name(), "application/json", &body));

    match exported {
        Ok(()) => false,
        Err(e) => {
            log::error!("JSON export failed: {}", e);
            model.notice = Some(format!("Could not export the report: {}", e));
            true
        }
    }
}
