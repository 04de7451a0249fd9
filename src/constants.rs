/// Fixed drawing and export constants for the PhaseLimiter icon

pub mod canvas {
    /// Default edge length of the square base canvas (standard macOS app icon size)
    pub const DEFAULT_EDGE: u32 = 512;

    /// Largest base canvas a config may ask for
    pub const MAX_EDGE: u32 = 4096;
}

pub mod circle {
    /// Background disc fill
    pub const FILL: [u8; 4] = [45, 85, 255, 255];

    /// Outline, a darker shade of the fill
    pub const OUTLINE: [u8; 4] = [30, 60, 200, 255];

    /// Outline width in canvas pixels, drawn inside the disc
    pub const OUTLINE_WIDTH: f32 = 8.0;
}

pub mod waveform {
    /// Sweep step in degrees; the sweep covers 0..360
    pub const SWEEP_STEP: usize = 20;

    /// Period of the vertical sawtooth in degrees
    pub const SAWTOOTH_PERIOD: i32 = 60;

    /// Horizontal extent as a fraction of the disc radius
    pub const HORIZONTAL_SCALE: f64 = 0.7;

    /// Vertical extent as a fraction of the disc radius
    pub const VERTICAL_SCALE: f64 = 0.3;

    pub const COLOR: [u8; 4] = [255, 255, 255, 255];

    pub const STROKE_WIDTH: f32 = 6.0;
}

pub mod text {
    pub const DEFAULT_CONTENT: &str = "PL";

    /// Preferred scalable font; a built-in bitmap font is used when it can't be loaded
    pub const DEFAULT_FONT_PATH: &str = "/System/Library/Fonts/Arial.ttf";

    pub const DEFAULT_FONT_SIZE: f32 = 120.0;

    /// Downward shift applied after centering, in pixels
    pub const VERTICAL_BIAS: i32 = 20;

    /// Drop shadow offset (right and down), in pixels
    pub const SHADOW_OFFSET: f32 = 3.0;

    pub const SHADOW_COLOR: [u8; 4] = [0, 0, 0, 100];

    pub const COLOR: [u8; 4] = [255, 255, 255, 255];
}

pub mod export {
    /// Standard macOS icon sizes
    pub const DEFAULT_SIZES: [u32; 6] = [16, 32, 64, 128, 256, 512];

    /// Sizes up to and including this one also get an @2x (retina) variant
    pub const DEFAULT_RETINA_MAX: u32 = 256;

    /// Largest single export size a config may ask for
    pub const MAX_SIZE: u32 = 1024;

    pub const DEFAULT_ICONS_DIR: &str = "icons";

    pub const DEFAULT_ICONSET_DIR: &str = "PhaseLimiter.iconset";
}
