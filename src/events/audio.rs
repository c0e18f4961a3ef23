use crate::audio::{self, SharedAudio};
use crate::constants::{AUDIO_TOGGLE_ID, CLICK_SOUND_SELECTOR};
use crate::core::AmbientChange;
use crate::dom;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

async fn toggle_ambient(engine: &SharedAudio, button: &web::Element) -> anyhow::Result<()> {
    audio::resume_if_suspended(engine).await?;
    let change = engine.borrow_mut().toggle()?;
    if let AmbientChange::Stopping(teardown) = change {
        audio::schedule_teardown(engine, teardown);
    }
    dom::set_pressed(button, engine.borrow().is_running());
    engine.borrow_mut().click();
    Ok(())
}

/// `#audio-toggle`: flip the ambient pad, keeping `aria-pressed` in step
/// with the engine.
pub fn wire_audio_toggle(document: &web::Document, engine: &SharedAudio) {
    let Some(button) = document.get_element_by_id(AUDIO_TOGGLE_ID) else {
        return;
    };
    let engine = engine.clone();
    dom::add_click_listener(document, AUDIO_TOGGLE_ID, move || {
        let engine = engine.clone();
        let button = button.clone();
        spawn_local(async move {
            if let Err(e) = toggle_ambient(&engine, &button).await {
                log::warn!("[audio] ambient toggle failed: {:?}", e);
                dom::set_pressed(&button, engine.borrow().is_running());
            }
        });
    });
}

/// Click blip for any click landing on a button-like element.
pub fn wire_click_sounds(document: &web::Document, engine: &SharedAudio) {
    let engine = engine.clone();
    dom::listen(document, "click", move |ev: web::Event| {
        let hit = ev
            .target()
            .and_then(|t| t.dyn_into::<web::Element>().ok())
            .and_then(|el| el.closest(CLICK_SOUND_SELECTOR).ok().flatten());
        if hit.is_some() {
            engine.borrow_mut().click();
        }
    });
}
