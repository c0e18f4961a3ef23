use crate::audio::SharedAudio;
use crate::constants::*;
use crate::core::constants::{CONTACT_ADDRESS, REVEAL_THRESHOLD, TYPING_INTERVAL_MS};
use crate::core::page::{compose_mailto, fragment_selector, scroll_target, Typewriter};
use crate::dom;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys as web;

/// Page glue around the effects: navigation, scrolling, reveal, footer,
/// contact form and the typing heading.
pub fn wire_page(document: &web::Document, audio: &SharedAudio) {
    wire_nav(document);
    wire_smooth_scroll(document, audio);
    wire_reveal(document);
    set_footer_year(document);
    wire_contact_form(document, audio);
    wire_typing(document);
}

fn set_nav_open(menu: &web::Element, burger: &web::Element, open: bool) {
    _ = menu.class_list().toggle_with_force(NAV_OPEN_CLASS, open);
    _ = burger.class_list().toggle_with_force(BURGER_ACTIVE_CLASS, open);
    _ = burger.set_attribute("aria-expanded", if open { "true" } else { "false" });
}

fn wire_nav(document: &web::Document) {
    let burger = document.query_selector(BURGER_SELECTOR).ok().flatten();
    let menu = document.get_element_by_id(NAV_MENU_ID);
    let (Some(burger), Some(menu)) = (burger, menu) else {
        return;
    };

    {
        let (burger_c, menu_c) = (burger.clone(), menu.clone());
        dom::listen(&burger, "click", move |_: web::Event| {
            let open = !menu_c.class_list().contains(NAV_OPEN_CLASS);
            set_nav_open(&menu_c, &burger_c, open);
        });
    }

    let menu_c = menu.clone();
    dom::listen(&menu, "click", move |ev: web::Event| {
        let is_link = ev
            .target()
            .and_then(|t| t.dyn_into::<web::Element>().ok())
            .map(|el| el.tag_name().eq_ignore_ascii_case("a"))
            .unwrap_or(false);
        if is_link && menu_c.class_list().contains(NAV_OPEN_CLASS) {
            set_nav_open(&menu_c, &burger, false);
        }
    });
}

fn wire_smooth_scroll(document: &web::Document, audio: &SharedAudio) {
    for anchor in dom::query_all(document, IN_PAGE_ANCHOR_SELECTOR) {
        let doc = document.clone();
        let audio = audio.clone();
        let link = anchor.clone();
        dom::listen(&anchor, "click", move |ev: web::Event| {
            let Some(href) = link.get_attribute("href") else {
                return;
            };
            let Some(selector) = fragment_selector(&href) else {
                return;
            };
            let Ok(Some(target)) = doc.query_selector(selector) else {
                return;
            };
            let Some(window) = web::window() else {
                return;
            };
            ev.prevent_default();
            let top = scroll_target(
                target.get_bounding_client_rect().top(),
                window.scroll_y().unwrap_or(0.0),
            );
            let opts = web::ScrollToOptions::new();
            opts.set_top(top);
            opts.set_behavior(web::ScrollBehavior::Smooth);
            window.scroll_to_with_scroll_to_options(&opts);
            audio.borrow_mut().click();
        });
    }
}

fn wire_reveal(document: &web::Document) {
    let targets = dom::query_all(document, REVEAL_SELECTOR);
    if targets.is_empty() {
        return;
    }
    let callback = Closure::wrap(Box::new(
        move |entries: js_sys::Array, observer: web::IntersectionObserver| {
            for entry in entries.iter() {
                let Ok(entry) = entry.dyn_into::<web::IntersectionObserverEntry>() else {
                    continue;
                };
                if entry.is_intersecting() {
                    let el = entry.target();
                    _ = el.class_list().add_1(REVEAL_VISIBLE_CLASS);
                    observer.unobserve(&el);
                }
            }
        },
    ) as Box<dyn FnMut(js_sys::Array, web::IntersectionObserver)>);

    let init = web::IntersectionObserverInit::new();
    init.set_threshold(&JsValue::from_f64(REVEAL_THRESHOLD));
    match web::IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init) {
        Ok(observer) => {
            for el in &targets {
                observer.observe(el);
            }
        }
        Err(e) => {
            log::warn!("[page] IntersectionObserver unavailable: {:?}", e);
            for el in &targets {
                _ = el.class_list().add_1(REVEAL_VISIBLE_CLASS);
            }
        }
    }
    callback.forget();
}

fn set_footer_year(document: &web::Document) {
    if let Some(el) = document.get_element_by_id(YEAR_ID) {
        let year = js_sys::Date::new_0().get_full_year();
        el.set_text_content(Some(&year.to_string()));
    }
}

fn input_value(document: &web::Document, id: &str) -> String {
    let Some(el) = document.get_element_by_id(id) else {
        return String::new();
    };
    if let Some(input) = el.dyn_ref::<web::HtmlInputElement>() {
        return input.value();
    }
    el.dyn_ref::<web::HtmlTextAreaElement>()
        .map(|t| t.value())
        .unwrap_or_default()
}

fn wire_contact_form(document: &web::Document, audio: &SharedAudio) {
    let Some(form) = document.get_element_by_id(CONTACT_FORM_ID) else {
        return;
    };
    let doc = document.clone();
    let audio = audio.clone();
    dom::listen(&form, "submit", move |ev: web::Event| {
        ev.prevent_default();
        let href = compose_mailto(
            CONTACT_ADDRESS,
            &input_value(&doc, CONTACT_NAME_ID),
            &input_value(&doc, CONTACT_EMAIL_ID),
            &input_value(&doc, CONTACT_MESSAGE_ID),
            |s| String::from(js_sys::encode_uri_component(s)),
        );
        if let Some(window) = web::window() {
            _ = window.location().set_href(&href);
        }
        audio.borrow_mut().click();
    });
}

fn wire_typing(document: &web::Document) {
    let Some(el) = document.get_element_by_id(TYPING_ID) else {
        return;
    };
    let Some(window) = web::window() else {
        return;
    };
    let mut typer = Typewriter::new(el.get_attribute(TYPING_TEXT_ATTR).unwrap_or_default());
    el.set_text_content(Some(&typer.next_frame()));
    let closure = Closure::wrap(Box::new(move || {
        el.set_text_content(Some(&typer.next_frame()));
    }) as Box<dyn FnMut()>);
    _ = window.set_interval_with_callback_and_timeout_and_arguments_0(
        closure.as_ref().unchecked_ref(),
        TYPING_INTERVAL_MS,
    );
    closure.forget();
}
