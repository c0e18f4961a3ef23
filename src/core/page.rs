use super::constants::*;

/// The selector an in-page anchor points at, if it is worth scrolling to.
/// `"#"` and empty hrefs are ignored.
pub fn fragment_selector(href: &str) -> Option<&str> {
    (href.starts_with('#') && href.len() >= 2).then_some(href)
}

/// Document-relative scroll position that puts an element just below the
/// sticky header.
#[inline]
pub fn scroll_target(element_top: f64, scroll_y: f64) -> f64 {
    element_top + scroll_y - SCROLL_HEADER_OFFSET_PX
}

/// Compose the contact `mailto:` URL. `encode` is the URI component
/// encoder of the host.
pub fn compose_mailto(
    address: &str,
    name: &str,
    email: &str,
    message: &str,
    encode: impl Fn(&str) -> String,
) -> String {
    let (name, email, message) = (name.trim(), email.trim(), message.trim());
    let subject = encode(&format!("Portfolio Contact from {}", name));
    let body = encode(&format!("Name: {}\nEmail: {}\n\n{}", name, email, message));
    format!("mailto:{}?subject={}&body={}", address, subject, body)
}

/// What a press of the background-music button should do.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MusicAction {
    Play,
    Pause,
}

#[inline]
pub fn music_toggle_action(paused: bool) -> MusicAction {
    if paused {
        MusicAction::Play
    } else {
        MusicAction::Pause
    }
}

/// Button state once a `play()` request settles: only a track that
/// actually started shows as pressed.
#[inline]
pub fn pressed_after_play<E>(outcome: &Result<(), E>) -> bool {
    outcome.is_ok()
}

/// Typewriter effect: shows a growing prefix of `text` with a blinking
/// underscore, then holds the full text for a few blink cycles and restarts.
#[derive(Clone, Debug)]
pub struct Typewriter {
    text: String,
    index: usize,
}

impl Typewriter {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            index: 0,
        }
    }

    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Text for the current frame, then advance.
    pub fn next_frame(&mut self) -> String {
        let mut out: String = self.text.chars().take(self.index).collect();
        if self.index % 2 == 0 {
            out.push('_');
        }
        let cycle = self.text.chars().count() + TYPING_TAIL_FRAMES;
        self.index = (self.index + 1) % cycle;
        out
    }
}
