use crate::audio::SharedAudio;
use crate::constants::{BG_MUSIC_ID, BG_MUSIC_TOGGLE_ID};
use crate::core::constants::{BG_MUSIC_LOOP_START_SEC, BG_MUSIC_UNMUTE_DELAY_MS, BG_MUSIC_VOLUME};
use crate::core::page::{music_toggle_action, pressed_after_play, MusicAction};
use crate::dom;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys as web;

/// Start playback; `Err` when the browser blocks autoplay.
async fn play(music: &web::HtmlMediaElement) -> anyhow::Result<()> {
    let promise = music.play().map_err(|e| anyhow::anyhow!("{:?}", e))?;
    JsFuture::from(promise)
        .await
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    Ok(())
}

fn unmute(music: &web::HtmlMediaElement, toggle: Option<&web::Element>) {
    music.set_muted(false);
    music.set_volume(BG_MUSIC_VOLUME);
    if let Some(t) = toggle {
        dom::set_pressed(t, true);
    }
}

/// Wire the background track: muted autoplay attempt, toggle button,
/// seamless loop from the intro offset, and start on first click.
pub fn wire_background_music(document: &web::Document, audio: &SharedAudio) {
    let Some(music) = document
        .get_element_by_id(BG_MUSIC_ID)
        .and_then(|el| el.dyn_into::<web::HtmlMediaElement>().ok())
    else {
        return;
    };
    let toggle = document.get_element_by_id(BG_MUSIC_TOGGLE_ID);

    music.set_volume(BG_MUSIC_VOLUME);
    music.set_current_time(BG_MUSIC_LOOP_START_SEC);
    music.set_muted(true);

    {
        let music = music.clone();
        let toggle = toggle.clone();
        spawn_local(async move {
            match play(&music).await {
                Ok(()) => {
                    log::info!("[music] background music started (muted)");
                    dom::set_timeout(BG_MUSIC_UNMUTE_DELAY_MS, move || {
                        unmute(&music, toggle.as_ref());
                    });
                }
                Err(e) => log::warn!("[music] autoplay blocked, waiting for interaction: {}", e),
            }
        });
    }

    if let Some(toggle_el) = toggle.clone() {
        let music = music.clone();
        let audio = audio.clone();
        dom::add_click_listener(document, BG_MUSIC_TOGGLE_ID, move || {
            match music_toggle_action(music.paused()) {
                MusicAction::Play => {
                    dom::set_pressed(&toggle_el, true);
                    let music = music.clone();
                    let toggle_el = toggle_el.clone();
                    spawn_local(async move {
                        let outcome = play(&music).await;
                        if let Err(e) = &outcome {
                            log::warn!("[music] play failed: {}", e);
                        }
                        dom::set_pressed(&toggle_el, pressed_after_play(&outcome));
                    });
                }
                MusicAction::Pause => {
                    _ = music.pause();
                    dom::set_pressed(&toggle_el, false);
                }
            }
            audio.borrow_mut().click();
        });
    }

    {
        let looped = music.clone();
        dom::listen(&music, "ended", move |_: web::Event| {
            looped.set_current_time(BG_MUSIC_LOOP_START_SEC);
            let looped = looped.clone();
            spawn_local(async move {
                _ = play(&looped).await;
            });
        });
    }

    wire_first_click_start(document, music, toggle);
}

fn wire_first_click_start(
    document: &web::Document,
    music: web::HtmlMediaElement,
    toggle: Option<web::Element>,
) {
    let closure = Closure::once_into_js(move |_: web::Event| {
        if !music.paused() {
            return;
        }
        spawn_local(async move {
            match play(&music).await {
                Ok(()) => unmute(&music, toggle.as_ref()),
                Err(e) => log::warn!("[music] play failed: {}", e),
            }
        });
    });
    let opts = web::AddEventListenerOptions::new();
    opts.set_once(true);
    _ = document.add_event_listener_with_callback_and_add_event_listener_options(
        "click",
        closure.unchecked_ref(),
        &opts,
    );
}
