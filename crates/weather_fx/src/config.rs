/// Surface area (logical px²) at which population curves yield their nominal counts.
pub const REFERENCE_AREA: f32 = 1280.0 * 720.0;

/// Largest frame delta fed into physics, in seconds. A host that stalls for
/// longer (hidden tab, debugger) resumes with this step instead of a jump.
pub const MAX_FRAME_DT: f32 = 0.1;

/// Smallest logical surface dimension accepted by `resize`.
pub const MIN_SURFACE_DIM: f32 = 1.0;

/// Upper bound on the device-pixel ratio applied to the backing store.
pub const MAX_DEVICE_PIXEL_RATIO: f32 = 4.0;

/// Device pixels a hi-DPI backing store may use. Past this the effective
/// pixel ratio is lowered, never below one device pixel per logical pixel,
/// and the host upscales the texture.
pub const RENDER_PIXEL_BUDGET: f32 = 2560.0 * 1440.0;

/// Backing stores above this many device pixels are not allocated; the
/// surface then degrades to a no-op canvas.
pub const MAX_BACKING_PIXELS: u64 = 8192 * 8192;

/// Logical size used by the headless driver until the first `resize` command.
pub const HEADLESS_DEFAULT_WIDTH: f32 = 800.0;
pub const HEADLESS_DEFAULT_HEIGHT: f32 = 600.0;
