use super::super::Model;
use super::super::Msg;
use super::preview_area::render_preview_area;
use super::utils::{debounce, first_image_file, render_error_message, render_notice};
use web_sys::{DragEvent, HtmlInputElement};
use yew::prelude::*;

pub fn render_upload_section(model: &Model, ctx: &Context<Model>) -> Html {
    let strings = model.strings();

    html! {
        <section class="card upload-section no-print">
            <h2><i class="fa-solid fa-map"></i>{ format!(" {}", strings.input_title) }</h2>
            { render_drop_zone(model, ctx) }
            { render_analyze_button(model, ctx) }
            { render_error_message(model) }
            { render_notice(model) }
        </section>
    }
}

fn render_drop_zone(model: &Model, ctx: &Context<Model>) -> Html {
    let link = ctx.link();
    let analyzing = model.session.is_analyzing();

    let handle_change = link.callback(|e: Event| {
        let input: HtmlInputElement = e.target_unchecked_into();
        let (chosen, skipped) = input
            .files()
            .as_ref()
            .map(first_image_file)
            .unwrap_or_default();

        input.set_value("");

        for name in &skipped {
            log::warn!("Skipping selected file: {}", name);
        }
        match chosen {
            Some(file) => Msg::FileChosen(file),
            None => Msg::SetNotice(Some("Only image files can be analyzed.".into())),
        }
    });

    let handle_drag_over = link.callback(|e: DragEvent| {
        e.prevent_default();
        Msg::SetDragging(true)
    });

    let handle_drag_leave = link.callback(|e: DragEvent| {
        e.prevent_default();
        Msg::SetDragging(false)
    });

    let handle_drop = link.callback(Msg::HandleDrop);

    html! {
        <label
            id="drop-zone"
            class={classes!(
                "upload-area",
                model.is_dragging.then_some("drag-over"),
                analyzing.then_some("locked"),
            )}
            ondragover={handle_drag_over}
            ondragleave={handle_drag_leave}
            ondrop={handle_drop}
        >
            <input
                type="file"
                id="file-input"
                accept="image/*"
                style="display: none;"
                disabled={analyzing}
                onchange={handle_change}
            />
            { render_preview_area(model) }
            if analyzing {
                <div class="scanner-overlay">
                    <div class="scan-line"></div>
                    <p><i class="fa-solid fa-spinner fa-spin"></i>{ format!(" {}", model.strings().analyzing) }</p>
                </div>
            }
        </label>
    }
}

fn render_analyze_button(model: &Model, ctx: &Context<Model>) -> Html {
    let strings = model.strings();
    let link = ctx.link().clone();

    html! {
        <div class="button-container">
            <button
                id="analyze-button"
                class="analyze-btn"
                disabled={!model.session.can_submit()}
                onclick={debounce(300, {
                    let link = link.clone();
                    move || link.send_message(Msg::Analyze)
                })}
            >
                if model.session.is_analyzing() {
                    <i class="fa-solid fa-spinner fa-spin"></i>{ format!(" {}", strings.processing) }
                } else {
                    <i class="fa-solid fa-wand-magic-sparkles"></i>{ format!(" {}", strings.start_button) }
                }
            </button>
            if model.session.selection().is_some() && !model.session.is_analyzing() {
                <button
                    id="reset-button"
                    class="analyze-btn secondary"
                    onclick={debounce(300, move || link.send_message(Msg::Reset))}
                >
                    <i class="fa-solid fa-rotate-left"></i>{ format!(" {}", strings.new_analysis) }
                </button>
            }
        </div>
    }
}
