//=========================================================================
// tandem - demo binary
//
// Opens an 800x600 window with the paddle court as the active scene and a
// loading bar on standby.
//
// Usage:
//   RUST_LOG=info tandem [settings.toml]
//
// The settings file is read only when built with `--features config`.
// The process exit status is the engine's error code (0 on success).
//
//=========================================================================

use std::process::ExitCode;

use log::error;
use tandem_engine::core::host::HostSettings;
#[cfg(feature = "config")]
use tandem_engine::core::host::ConfigError;
#[cfg(not(feature = "config"))]
use tandem_engine::core::host::SettingsError;
use tandem_engine::scenes::DemoScenes;
use tandem_engine::EngineBuilder;

fn main() -> ExitCode {
    env_logger::init();

    let settings = match load_settings() {
        Ok(settings) => settings,
        Err(e) => {
            error!("Failed to load settings: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match EngineBuilder::new().with_settings(settings).build(DemoScenes).run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Engine stopped with error: {}", e);
            ExitCode::from(exit_status(e.code()))
        }
    }
}

fn default_settings() -> HostSettings {
    HostSettings::builder()
        .with_title("Tandem Court")
        .with_size(800, 600)
        .with_frame_rate(60)
        .with_clear_color(HostSettings::DEFAULT_CLEAR)
        .build()
}

#[cfg(feature = "config")]
fn load_settings() -> Result<HostSettings, ConfigError> {
    match std::env::args().nth(1) {
        Some(path) => HostSettings::from_toml_file(path),
        None => Ok(default_settings()),
    }
}

#[cfg(not(feature = "config"))]
fn load_settings() -> Result<HostSettings, SettingsError> {
    if std::env::args().nth(1).is_some() {
        log::warn!("Settings file ignored: built without the `config` feature");
    }
    let settings = default_settings();
    settings.validate()?;
    Ok(settings)
}

/// Maps an error code onto a process status byte, never reporting 0.
fn exit_status(code: i32) -> u8 {
    match u8::try_from(code) {
        Ok(0) | Err(_) => 1,
        Ok(status) => status,
    }
}
