//! Deterministic rain, snow and fog overlay engine.
//!
//! Each effect is a particle field advanced by an injected frame clock and
//! drawn through the [`canvas::Canvas`] trait into a software-rasterized
//! [`raster::PixelSurface`]. Hosts drive everything through
//! [`overlay::WeatherOverlay`].

pub mod canvas;
pub mod config;
pub mod fog;
pub mod frame_clock;
pub mod fx_rng;
pub mod headless_protocol;
pub mod options;
pub mod overlay;
pub mod population;
pub mod rain;
pub mod raster;
pub mod renderer;
pub mod settings;
pub mod snow;
pub mod surface;

pub use canvas::{BlendMode, Canvas};
pub use fog::create_fog_renderer;
pub use frame_clock::{FrameClock, ManualClock};
pub use options::{OptionsPatch, RenderOptions, Rgb};
pub use overlay::{MotionPreference, OverlayChange, OverlayProps, OverlayStats, WeatherOverlay};
pub use rain::create_rain_renderer;
pub use renderer::{create_renderer, EffectKind, RendererState, WeatherRenderer};
pub use snow::create_snow_renderer;
pub use surface::SurfaceAdapter;
