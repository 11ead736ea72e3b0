use gloo_events::EventListener;
use gloo_file::{Blob, ObjectUrl};
use gloo_timers::callback::Timeout;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Element, HtmlAnchorElement};
use yew::Callback;

// Browsers may still be reading the blob after the click returns.
const URL_RELEASE_DELAY_MS: u32 = 60_000;

#[wasm_bindgen]
extern "C" {
    /// The html2pdf.js worker chain loaded by index.html.
    type Html2PdfWorker;

    #[wasm_bindgen(js_name = html2pdf, catch)]
    fn html2pdf() -> Result<Html2PdfWorker, JsValue>;

    #[wasm_bindgen(method, catch)]
    fn set(this: &Html2PdfWorker, options: &JsValue) -> Result<Html2PdfWorker, JsValue>;

    #[wasm_bindgen(method, js_name = from, catch)]
    fn from_element(this: &Html2PdfWorker, element: &Element) -> Result<Html2PdfWorker, JsValue>;

    #[wasm_bindgen(method, catch)]
    fn save(this: &Html2PdfWorker) -> Result<JsValue, JsValue>;
}

pub fn pdf_exporter_available() -> bool {
    web_sys::window()
        .and_then(|window| js_sys::Reflect::get(&window, &JsValue::from_str("html2pdf")).ok())
        .is_some_and(|exporter| exporter.is_function())
}

/// Renders `element` to a paginated PDF and downloads it. `options_json`
/// carries the html2pdf settings, including the file name.
pub async fn save_pdf(element: &Element, options_json: &str) -> Result<(), String> {
    let options = js_sys::JSON::parse(options_json).map_err(describe)?;
    let pending = html2pdf()
        .and_then(|worker| worker.set(&options))
        .and_then(|worker| worker.from_element(element))
        .and_then(|worker| worker.save())
        .map_err(describe)?;

    JsFuture::from(js_sys::Promise::resolve(&pending))
        .await
        .map(|_| ())
        .map_err(describe)
}

/// Prints the page through the browser print engine, with the document
/// titled after the report so "Save as PDF" picks that name. Used when the
/// PDF exporter script did not load. The returned listener reports the
/// previous title once printing is over.
pub fn print_report(stem: &str, on_finished: Callback<String>) -> Result<EventListener, String> {
    let window = web_sys::window().ok_or("Window unavailable")?;
    let document = window.document().ok_or("Document unavailable")?;

    let previous_title = document.title();
    document.set_title(stem);

    let restore_title = previous_title.clone();
    let listener = EventListener::once(&window, "afterprint", move |_| {
        on_finished.emit(restore_title);
    });

    if window.print().is_err() {
        document.set_title(&previous_title);
        return Err("Printing is not available in this browser".to_string());
    }

    Ok(listener)
}

pub fn restore_title(title: &str) {
    if let Some(document) = web_sys::window().and_then(|w| w.document()) {
        document.set_title(title);
    }
}

pub fn download_text(file_name: &str, mime: &str, content: &str) -> Result<(), String> {
    let url = ObjectUrl::from(Blob::new_with_options(content, Some(mime)));

    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or("Document unavailable")?;
    let anchor: HtmlAnchorElement = document
        .create_element("a")
        .map_err(|_| "Unable to create anchor")?
        .dyn_into()
        .map_err(|_| "Anchor cast failed")?;
    anchor.set_href(&url.to_string());
    anchor.set_download(file_name);
    anchor.style().set_property("display", "none").ok();

    document
        .body()
        .ok_or("Missing body")?
        .append_child(&anchor)
        .map_err(|_| "Unable to attach download link")?;
    anchor.click();
    anchor.remove();

    let _ = Timeout::new(URL_RELEASE_DELAY_MS, move || drop(url)).forget();

    Ok(())
}

fn describe(err: JsValue) -> String {
    err.as_string()
        .or_else(|| {
            err.dyn_ref::<js_sys::Error>()
                .map(|e| String::from(e.message()))
        })
        .unwrap_or_else(|| format!("{:?}", err))
}
