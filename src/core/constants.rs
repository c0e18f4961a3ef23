// Shared visual/audio tuning constants for the portfolio effects layer.

/// Per-mode tuning for the particle backdrop.
///
/// Fields:
/// - `count_divisor`, `count_min`, `count_max`: particle count is
///   `clamp(width / count_divisor, count_min, count_max)` rounded down
/// - `link_divisor`, `link_min`, `link_max`: link distance band, same shape
/// - `max_speed`: velocity per axis is drawn from `[-max_speed/2, max_speed/2)`
/// - `radius_min`, `radius_span`: radius is `radius_min + rand * radius_span`
/// - `trail_alpha`: opacity of the translucent rectangle painted each frame
/// - `glow_blur`: shadow blur radius for each particle
/// - `frame_stride`: render one tick out of `frame_stride`
/// - `draw_links`: whether the O(n²) link pass runs at all
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ModeProfile {
    pub count_divisor: f32,
    pub count_min: f32,
    pub count_max: f32,
    pub link_divisor: f32,
    pub link_min: f32,
    pub link_max: f32,
    pub max_speed: f32,
    pub radius_min: f32,
    pub radius_span: f32,
    pub trail_alpha: f32,
    pub glow_blur: f32,
    pub frame_stride: u64,
    pub draw_links: bool,
}

pub const MOBILE_PROFILE: ModeProfile = ModeProfile {
    count_divisor: 20.0,
    count_min: 20.0,
    count_max: 40.0,
    link_divisor: 12.0,
    link_min: 60.0,
    link_max: 100.0,
    max_speed: 0.25,
    radius_min: 0.4,
    radius_span: 1.2,
    trail_alpha: 0.25,
    glow_blur: 6.0,
    frame_stride: 2, // half-rate throttle for battery
    draw_links: false,
};

pub const DESKTOP_PROFILE: ModeProfile = ModeProfile {
    count_divisor: 12.0,
    count_min: 60.0,
    count_max: 120.0,
    link_divisor: 8.0,
    link_min: 90.0,
    link_max: 160.0,
    max_speed: 0.35,
    radius_min: 0.6,
    radius_span: 1.8,
    trail_alpha: 0.35,
    glow_blur: 12.0,
    frame_stride: 1,
    draw_links: true,
};

// Viewport classification: widths at or below this are treated as mobile
pub const MOBILE_MAX_VIEWPORT_PX: f64 = 768.0;

// Backing store never goes above 2x CSS pixels
pub const MAX_DEVICE_PIXEL_RATIO: f64 = 2.0;

// Particles wrap once they are this far past an edge
pub const WRAP_MARGIN_PX: f32 = 20.0;

// Neon palette (#ff2bd1, #34a1ff, #29ffc6, #b039ff)
pub const PARTICLE_PALETTE: [[u8; 3]; 4] = [
    [255, 43, 209],  // magenta
    [52, 161, 255],  // blue
    [41, 255, 198],  // mint
    [176, 57, 255],  // violet
];

pub const TRAIL_RGB: [u8; 3] = [10, 11, 16];
pub const LINK_RGB: [u8; 3] = [255, 255, 255];
pub const LINK_PEAK_ALPHA: f32 = 0.25;
pub const LINK_LINE_WIDTH: f32 = 1.0;

// Ambient pad: additive partials into a quiet master gain
pub const AMBIENT_MASTER_GAIN: f32 = 0.02;
pub const AMBIENT_PARTIALS_HZ: [f32; 3] = [120.0, 238.0, 480.0];
pub const AMBIENT_PARTIAL_GAIN: f32 = 0.3; // divided by (index + 1)
pub const AMBIENT_FADE_SEC: f64 = 0.2;
pub const AMBIENT_TEARDOWN_DELAY_MS: i32 = 220;

// Exponential ramps cannot reach zero; this is "silent"
pub const SILENT_GAIN: f32 = 0.0001;

// UI click blip
pub const CLICK_FREQ_HZ: f32 = 700.0;
pub const CLICK_PEAK_GAIN: f32 = 0.2;
pub const CLICK_ATTACK_SEC: f64 = 0.005;
pub const CLICK_DECAY_SEC: f64 = 0.08;
pub const CLICK_STOP_SEC: f64 = 0.09;

// Background music element
pub const BG_MUSIC_VOLUME: f64 = 0.3;
pub const BG_MUSIC_LOOP_START_SEC: f64 = 13.0;
pub const BG_MUSIC_UNMUTE_DELAY_MS: i32 = 2000;

// Page glue
pub const SCROLL_HEADER_OFFSET_PX: f64 = 64.0;
pub const REVEAL_THRESHOLD: f64 = 0.15;
pub const TYPING_INTERVAL_MS: i32 = 120;
pub const TYPING_TAIL_FRAMES: usize = 8; // blink cycles after the full text
pub const CONTACT_ADDRESS: &str = "shinjanverma@gmail.com";
