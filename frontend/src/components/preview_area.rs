use super::super::Model;
use shared::ImageSource;
use yew::prelude::*;

/// Shows the selected floor plan, or the drop prompt when nothing is chosen.
pub fn render_preview_area(model: &Model) -> Html {
    let strings = model.strings();

    match (model.session.selection(), model.session.preview()) {
        (Some(selection), Some(url)) => html! {
            <div class="preview-container">
                <img
                    id="floor-plan-preview"
                    src={url.to_string()}
                    alt={selection.image.file_name()}
                />
                <p class="preview-caption">{ selection.image.file_name() }</p>
            </div>
        },
        _ => html! {
            <div class="upload-placeholder">
                <i class="fa-solid fa-cloud-arrow-up"></i>
                <p>{ &strings.drop_text }</p>
                <p class="file-types">{ &strings.upload_hint }</p>
            </div>
        },
    }
}
