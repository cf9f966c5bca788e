pub const WINDOW_WIDTH: i32 = 1280;           // Default window width
pub const WINDOW_HEIGHT: i32 = 800;           // Default window height
pub const FPS: u32 = 60;                      // Frames per second

pub const NAVBAR_HEIGHT: f32 = 64.0;          // Pinned navbar height (pixels)
pub const PROGRESS_BAR_HEIGHT: f32 = 3.0;     // Scroll progress bar height (pixels)
pub const SCROLLED_THRESHOLD: f32 = 50.0;     // Offset past which the navbar swaps variant

pub const WHEEL_STEP: f32 = 90.0;             // Pixels of page per wheel notch
pub const SMOOTH_SCROLL_DURATION: f32 = 0.6;  // Anchor jump animation (seconds)

pub const REVEAL_DURATION: f32 = 0.6;         // Section fade-in (seconds)
pub const REVEAL_RISE: f32 = 30.0;            // Fade-in starting vertical offset (pixels)
pub const REVEAL_MARGIN: f32 = 50.0;          // Bottom margin subtracted from the viewport
pub const REVEAL_THRESHOLD: f32 = 0.1;        // Fraction of a section that must be visible

pub const TRACK_TRANSITION: f32 = 0.6;        // Carousel track slide (seconds)
pub const AUTO_ADVANCE_INTERVAL: f32 = 8.0;   // Optional carousel auto-advance (seconds)

pub const CARD_HOVER_RISE: f32 = 10.0;        // Hovered card lift (pixels)
pub const CARD_HOVER_SCALE: f32 = 1.02;       // Hovered card scale factor

pub const VIDEO_WIDTH: i32 = 640;             // Decoded frame width (ffmpeg scales)
pub const VIDEO_HEIGHT: i32 = 360;            // Decoded frame height
pub const VIDEO_FPS: u32 = 30;                // Native playback frame rate
