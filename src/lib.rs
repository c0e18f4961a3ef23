#![cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

mod audio;
mod constants;
pub mod core;
mod dom;
mod events;
mod frame;
mod music;
mod surface;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("portfolio-fx starting");

    if let Err(e) = init() {
        log::error!("init error: {:?}", e);
    }
    Ok(())
}

fn init() -> anyhow::Result<()> {
    let document = dom::window_document().ok_or_else(|| anyhow::anyhow!("no document"))?;

    // One engine for the whole page; its context is only created on the
    // first gesture that needs sound.
    let ambient = audio::new_shared();

    events::wire_page(&document, &ambient);
    events::wire_audio_toggle(&document, &ambient);
    events::wire_click_sounds(&document, &ambient);
    music::wire_background_music(&document, &ambient);

    match frame::init_backdrop(&document) {
        Ok(true) => log::info!("backdrop running"),
        Ok(false) => log::info!("backdrop skipped"),
        Err(e) => log::warn!("backdrop init failed: {:?}", e),
    }
    Ok(())
}
