use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::Context;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::{
    cli::{Cli, DEFAULT_REFRESH_INTERVAL_SECS, IconMode},
    domain::window::{DEFAULT_HORIZON_HOURS, DEFAULT_MAX_COUNT, DEFAULT_MIN_GAP_HOURS, WindowOptions},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeSettings {
    pub window: WindowOptions,
    pub icon_mode: IconMode,
    pub refresh_interval_secs: u64,
}

impl Default for RuntimeSettings {
    fn default() -> Self {
        Self {
            window: WindowOptions::default(),
            icon_mode: IconMode::default(),
            refresh_interval_secs: DEFAULT_REFRESH_INTERVAL_SECS,
        }
    }
}

impl RuntimeSettings {
    pub fn from_cli_defaults(cli: &Cli) -> Self {
        Self {
            window: WindowOptions {
                horizon_hours: cli.horizon_hours,
                min_gap_hours: cli.min_gap_hours,
                max_count: cli.max_count,
            },
            icon_mode: cli.icon_mode().unwrap_or_default(),
            refresh_interval_secs: cli.refresh_interval,
        }
    }

    /// Applies every CLI value the user actually changed on top of `self`.
    fn apply_cli_overrides(&mut self, cli: &Cli) {
        if cli.horizon_hours != DEFAULT_HORIZON_HOURS {
            self.window.horizon_hours = cli.horizon_hours;
        }
        if cli.min_gap_hours != DEFAULT_MIN_GAP_HOURS {
            self.window.min_gap_hours = cli.min_gap_hours;
        }
        if cli.max_count != DEFAULT_MAX_COUNT {
            self.window.max_count = cli.max_count;
        }
        if let Some(mode) = cli.icon_mode() {
            self.icon_mode = mode;
        }
        if cli.refresh_interval != DEFAULT_REFRESH_INTERVAL_SECS {
            self.refresh_interval_secs = cli.refresh_interval;
        }
    }
}

pub fn load_runtime_settings(cli: &Cli, enable_disk: bool) -> (RuntimeSettings, Option<PathBuf>) {
    if !enable_disk {
        return (RuntimeSettings::from_cli_defaults(cli), None);
    }
    let path = settings_path();
    let settings = load_runtime_settings_from(cli, path.as_deref());
    (settings, path)
}

pub fn load_runtime_settings_from(cli: &Cli, path: Option<&Path>) -> RuntimeSettings {
    let Some(path) = path else {
        return RuntimeSettings::from_cli_defaults(cli);
    };

    let mut settings = match fs::read_to_string(path) {
        Ok(content) => match serde_json::from_str::<RuntimeSettings>(&content) {
            Ok(saved) => saved,
            Err(err) => {
                warn!(path = %path.display(), error = %err, "ignoring malformed settings file");
                RuntimeSettings::from_cli_defaults(cli)
            }
        },
        Err(err) => {
            debug!(path = %path.display(), error = %err, "no saved settings");
            RuntimeSettings::from_cli_defaults(cli)
        }
    };
    settings.apply_cli_overrides(cli);
    settings
}

pub fn save_runtime_settings(path: &Path, settings: &RuntimeSettings) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context("creating settings directory failed")?;
    }
    let payload =
        serde_json::to_string_pretty(settings).context("serializing settings payload failed")?;
    fs::write(path, payload).context("writing settings file failed")
}

fn settings_path() -> Option<PathBuf> {
    if let Some(base) = std::env::var_os("KIOSK_FORECAST_CONFIG_DIR") {
        return Some(PathBuf::from(base).join("settings.json"));
    }

    let home = std::env::var_os("HOME")?;
    Some(
        PathBuf::from(home)
            .join(".config")
            .join("kiosk-forecast")
            .join("settings.json"),
    )
}
