//! JSON-lines protocol for the `--headless` mode.
//!
//! One command per stdin line, one response per stdout line. The loop itself
//! lives in the app binary; [`process_command`] is pure so the protocol can
//! be tested without I/O.

use serde::{Deserialize, Serialize};

use crate::overlay::{OverlayChange, OverlayProps, OverlayStats, WeatherOverlay};

// ---------------------------------------------------------------------------
// Commands (stdin -> overlay)
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
#[serde(tag = "cmd", rename_all = "snake_case")]
pub enum HeadlessCommand {
    /// Replace the host props.
    Props {
        props: OverlayProps,
    },
    /// New container geometry.
    Resize {
        width: f32,
        height: f32,
        #[serde(default = "default_dpr")]
        dpr: f32,
    },
    /// Run `frames` ticks of `dt` seconds each.
    Advance {
        #[serde(default = "default_frames")]
        frames: u32,
        #[serde(default = "default_dt")]
        dt: f32,
    },
    Stats,
    Quit,
}

fn default_dpr() -> f32 {
    1.0
}

fn default_frames() -> u32 {
    1
}

fn default_dt() -> f32 {
    1.0 / 60.0
}

/// Upper bound on frames per `advance` command.
pub const MAX_ADVANCE_FRAMES: u32 = 100_000;

// ---------------------------------------------------------------------------
// Responses (overlay -> stdout)
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum HeadlessResponse {
    Ready,
    Ok {
        #[serde(skip_serializing_if = "Option::is_none")]
        change: Option<OverlayChange>,
    },
    Stats {
        stats: OverlayStats,
    },
    Error {
        message: String,
    },
    Goodbye,
}

/// Parse one input line. Malformed input becomes an `error` response.
pub fn parse_command(line: &str) -> Result<HeadlessCommand, HeadlessResponse> {
    serde_json::from_str(line).map_err(|e| HeadlessResponse::Error {
        message: format!("invalid command: {e}"),
    })
}

pub fn process_command(overlay: &mut WeatherOverlay, cmd: HeadlessCommand) -> HeadlessResponse {
    match cmd {
        HeadlessCommand::Props { props } => HeadlessResponse::Ok {
            change: Some(overlay.apply_props(&props)),
        },
        HeadlessCommand::Resize { width, height, dpr } => {
            overlay.resize_surface(width, height, dpr);
            HeadlessResponse::Ok { change: None }
        }
        HeadlessCommand::Advance { frames, dt } => {
            if frames > MAX_ADVANCE_FRAMES {
                return HeadlessResponse::Error {
                    message: format!("frames must be at most {MAX_ADVANCE_FRAMES}"),
                };
            }
            for _ in 0..frames {
                overlay.tick(dt);
            }
            HeadlessResponse::Stats {
                stats: overlay.stats(),
            }
        }
        HeadlessCommand::Stats => HeadlessResponse::Stats {
            stats: overlay.stats(),
        },
        HeadlessCommand::Quit => HeadlessResponse::Goodbye,
    }
}
