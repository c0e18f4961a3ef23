// Element ids and selectors the page wiring looks up.

// Backdrop
pub const HERO_CANVAS_ID: &str = "hero-canvas";

// Audio controls
pub const AUDIO_TOGGLE_ID: &str = "audio-toggle";
pub const BG_MUSIC_ID: &str = "bg-music";
pub const BG_MUSIC_TOGGLE_ID: &str = "bg-music-toggle";
pub const CLICK_SOUND_SELECTOR: &str = ".btn, .btn-primary, .nav a, .logo";

// Navigation
pub const BURGER_SELECTOR: &str = ".burger";
pub const NAV_MENU_ID: &str = "nav-menu";
pub const NAV_OPEN_CLASS: &str = "open";
pub const BURGER_ACTIVE_CLASS: &str = "active";
pub const IN_PAGE_ANCHOR_SELECTOR: &str = "a[href^=\"#\"]";

// Reveal on scroll
pub const REVEAL_SELECTOR: &str = ".reveal";
pub const REVEAL_VISIBLE_CLASS: &str = "visible";

// Footer / contact
pub const YEAR_ID: &str = "year";
pub const CONTACT_FORM_ID: &str = "contact-form";
pub const CONTACT_NAME_ID: &str = "name";
pub const CONTACT_EMAIL_ID: &str = "email";
pub const CONTACT_MESSAGE_ID: &str = "message";
pub const TYPING_ID: &str = "contact-typing";
pub const TYPING_TEXT_ATTR: &str = "data-text";
