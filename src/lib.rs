pub mod app;
pub mod cli;
pub mod data;
pub mod domain;
pub mod observability;
pub mod resilience;
pub mod ui;

#[cfg(test)]
mod test_support;

use std::{fmt::Display, time::Duration};

use anyhow::{Context, Result};
use app::{
    pipeline::build_view,
    settings::{RuntimeSettings, load_runtime_settings, save_runtime_settings},
    source::ForecastSource,
};
use chrono::{DateTime, Local, TimeZone, Utc};
use cli::{Cli, FormatArg};
use domain::weather::{SunTimes, WeatherRecord};
use resilience::backoff::Backoff;
use tracing::{debug, info, warn};

const RETRY_BASE: Duration = Duration::from_secs(30);

pub async fn run(cli: Cli) -> Result<()> {
    cli.validate()?;

    let (settings, settings_path) = load_runtime_settings(&cli, !cli.no_config);
    if cli.save_config {
        let path = settings_path
            .context("no settings location; set HOME or KIOSK_FORECAST_CONFIG_DIR")?;
        save_runtime_settings(&path, &settings)?;
        info!(path = %path.display(), "saved settings");
    }

    let source = ForecastSource::from_cli(&cli)?;
    if cli.watch {
        watch(&source, &cli, &settings).await
    } else {
        let output = refresh(&source, &cli, &settings).await?;
        println!("{output}");
        Ok(())
    }
}

async fn watch(source: &ForecastSource, cli: &Cli, settings: &RuntimeSettings) -> Result<()> {
    let interval = Duration::from_secs(settings.refresh_interval_secs.max(1));
    let mut backoff = Backoff::new(RETRY_BASE, interval);

    loop {
        let delay = match refresh(source, cli, settings).await {
            Ok(output) => {
                backoff.reset();
                println!("{output}\n");
                interval
            }
            Err(err) => {
                let delay = backoff.next_delay();
                warn!(
                    error = %format!("{err:#}"),
                    retry_in_secs = delay.as_secs(),
                    "refresh failed"
                );
                delay
            }
        };

        tokio::select! {
            () = tokio::time::sleep(delay) => {}
            signal = tokio::signal::ctrl_c() => {
                signal.context("listening for ctrl-c failed")?;
                info!("stopping watch loop");
                return Ok(());
            }
        }
    }
}

async fn refresh(source: &ForecastSource, cli: &Cli, settings: &RuntimeSettings) -> Result<String> {
    let records = source.load().await?;
    let now = cli.now.unwrap_or_else(Utc::now);
    debug!(records = records.len(), %now, "refreshing forecast view");
    let today = match cli.utc_offset {
        Some(offset) => now.with_timezone(&offset).date_naive(),
        None => now.with_timezone(&Local).date_naive(),
    };
    let sun = source.load_sun_times(today).await;
    match cli.utc_offset {
        Some(offset) => render(&records, now, sun, settings, cli.format, offset),
        None => render(&records, now, sun, settings, cli.format, Local),
    }
}

fn render<Tz>(
    records: &[WeatherRecord],
    now: DateTime<Utc>,
    sun: Option<SunTimes>,
    settings: &RuntimeSettings,
    format: FormatArg,
    tz: Tz,
) -> Result<String>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let view = build_view(records, now, settings.window, tz.clone())?.with_sun_times(sun);
    match format {
        FormatArg::Text => Ok(ui::render_text(&view, &tz, settings.icon_mode)),
        FormatArg::Json => {
            serde_json::to_string_pretty(&view).context("serializing forecast view failed")
        }
    }
}
