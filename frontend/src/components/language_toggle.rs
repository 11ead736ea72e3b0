use super::super::Model;
use super::super::Msg;
use shared::Locale;
use strum::IntoEnumIterator;
use yew::html::Scope;
use yew::prelude::*;

pub fn render_language_toggle(current: Locale, link: &Scope<Model>) -> Html {
    html! {
        <div class="lang-switch" role="group" aria-label="Language">
            { for Locale::iter().map(|locale| html! {
                <button
                    class={classes!("lang-btn", (locale == current).then_some("active"))}
                    onclick={link.callback(move |_| Msg::SetLocale(locale))}
                    title={locale.code()}
                >
                    { locale.label() }
                </button>
            })}
        </div>
    }
}
