use super::super::Model;
use chrono::NaiveDate;
use gloo_file::File as GlooFile;
use gloo_timers::callback::Timeout;
use js_sys::Date;
use std::cell::RefCell;
use std::rc::Rc;
use web_sys::FileList;
use yew::prelude::*;

// Debounce function to limit button events
pub fn debounce<F>(duration: u32, callback: F) -> Callback<MouseEvent>
where
    F: Fn() + Clone + 'static,
{
    let timeout = Rc::new(RefCell::new(None::<Timeout>));

    Callback::from(move |_| {
        let mut timeout_ref = timeout.borrow_mut();

        if let Some(old_timeout) = timeout_ref.take() {
            old_timeout.cancel();
        }

        let inner_callback = callback.clone();
        *timeout_ref = Some(Timeout::new(duration, move || {
            inner_callback();
        }));
    })
}

/// First image in the list, plus the names of the files that were skipped.
pub fn first_image_file(file_list: &FileList) -> (Option<GlooFile>, Vec<String>) {
    let mut chosen = None;
    let mut skipped = Vec::new();

    for file in (0..file_list.length()).filter_map(|i| file_list.item(i)) {
        if chosen.is_none() && file.type_().starts_with("image/") {
            chosen = Some(GlooFile::from(file));
        } else {
            skipped.push(file.name());
        }
    }

    (chosen, skipped)
}

pub fn today_utc() -> Option<NaiveDate> {
    let now = Date::new_0();
    NaiveDate::from_ymd_opt(
        now.get_utc_full_year() as i32,
        now.get_utc_month() + 1,
        now.get_utc_date(),
    )
}

pub fn render_error_message(model: &Model) -> Html {
    if let Some(error) = model.session.error() {
        html! {
            <div class="error-message">
                <i class="fa-solid fa-triangle-exclamation"></i>
                <p>{ error.to_string() }</p>
            </div>
        }
    } else {
        html! {}
    }
}

pub fn render_notice(model: &Model) -> Html {
    match &model.notice {
        Some(notice) => html! {
            <div class="notice-message">
                <i class="fa-solid fa-circle-info"></i>
                <p>{ notice }</p>
            </div>
        },
        None => html! {},
    }
}
