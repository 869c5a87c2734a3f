//! Headless `--headless` mode: a blocking loop that drives the overlay from
//! JSON commands on stdin and answers with JSON lines on stdout.
//!
//! No window or GPU is created. The overlay lives in a minimal Bevy app that
//! is updated once per command, so engine logging still reaches stderr.
//! Frames are advanced with the explicit `dt` each command carries. See
//! [`weather_fx::headless_protocol`] for the schema.

use std::io::{BufRead, Write};

use bevy::log::LogPlugin;
use bevy::prelude::*;

use weather_fx::config::{HEADLESS_DEFAULT_HEIGHT, HEADLESS_DEFAULT_WIDTH};
use weather_fx::headless_protocol::{parse_command, process_command, HeadlessResponse};
use weather_fx::{settings, WeatherOverlay};

pub fn run_headless_mode() {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins)
        .add_plugins(LogPlugin::default());
    init_headless_app(&mut app, initial_overlay());

    // -- I/O setup -----------------------------------------------------------
    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    let mut stdout = stdout.lock();

    emit(&mut stdout, &HeadlessResponse::Ready);
    eprintln!(
        "weatherfx headless mode ready at {HEADLESS_DEFAULT_WIDTH}x{HEADLESS_DEFAULT_HEIGHT}, \
         waiting for commands on stdin"
    );

    // -- Main command loop ---------------------------------------------------
    for line in stdin.lock().lines() {
        let line = match line {
            Ok(l) => l,
            Err(e) => {
                eprintln!("stdin read error: {e}");
                break;
            }
        };

        let Some(response) = handle_line(&mut app, &line) else {
            continue;
        };
        let is_goodbye = matches!(response, HeadlessResponse::Goodbye);

        emit(&mut stdout, &response);

        if is_goodbye {
            break;
        }
    }

    app.world_mut().resource_mut::<WeatherOverlay>().unmount();
    eprintln!("weatherfx headless mode shutting down");
}

/// Overlay at the default size with the env-provided motion preference and
/// props already applied.
fn initial_overlay() -> WeatherOverlay {
    let mut overlay = WeatherOverlay::new(HEADLESS_DEFAULT_WIDTH, HEADLESS_DEFAULT_HEIGHT, 1.0);
    let motion = settings::motion_preference_from_env();
    overlay.set_prefers_reduced_motion(motion.prefers_reduced_motion);
    let initial = settings::props_from_env();
    if initial.wants_renderer() {
        overlay.apply_props(&initial);
    }
    overlay
}

fn init_headless_app(app: &mut App, overlay: WeatherOverlay) {
    app.insert_resource(overlay);
    // Initial update so Startup systems run and the clock starts.
    app.update();
}

/// Run one input line against the overlay, then one app update. Blank lines
/// yield no response.
fn handle_line(app: &mut App, line: &str) -> Option<HeadlessResponse> {
    if line.trim().is_empty() {
        return None;
    }
    let response = match parse_command(line) {
        Ok(cmd) => {
            let mut overlay = app.world_mut().resource_mut::<WeatherOverlay>();
            process_command(&mut overlay, cmd)
        }
        Err(resp) => resp,
    };
    app.update();
    Some(response)
}

fn emit(out: &mut impl Write, response: &HeadlessResponse) {
    match serde_json::to_string(response) {
        Ok(json) => {
            let _ = writeln!(out, "{json}");
            let _ = out.flush();
        }
        Err(e) => eprintln!("failed to encode response: {e}"),
    }
}
