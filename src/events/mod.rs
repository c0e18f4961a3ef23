pub mod audio;
pub mod page;

pub use audio::{wire_audio_toggle, wire_click_sounds};
pub use page::wire_page;
