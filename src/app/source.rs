use std::{io::Read, path::PathBuf};

use anyhow::{Context, Result};
use chrono::NaiveDate;
use tracing::{debug, warn};

use crate::{
    cli::{Cli, SourceArg},
    data::{Coordinates, metno, metno::MetnoClient, openweather, sun::SunClient},
    domain::weather::{SunTimes, WeatherRecord},
};

/// Where a refresh gets its records from.
#[derive(Debug, Clone)]
pub enum ForecastSource {
    File { path: PathBuf, format: SourceArg },
    Stdin { format: SourceArg },
    Metno {
        client: MetnoClient,
        sun_client: SunClient,
        coordinates: Coordinates,
    },
}

impl ForecastSource {
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        if let Some(path) = &cli.input {
            if path.as_os_str() == "-" {
                return Ok(Self::Stdin { format: cli.source });
            }
            return Ok(Self::File {
                path: path.clone(),
                format: cli.source,
            });
        }
        let coordinates = cli
            .coordinates()
            .context("either --input or --lat/--lon is required")?;
        Ok(Self::Metno {
            client: MetnoClient::new()?,
            sun_client: SunClient::new()?,
            coordinates,
        })
    }

    pub async fn load(&self) -> Result<Vec<WeatherRecord>> {
        match self {
            Self::File { path, format } => {
                let payload = std::fs::read_to_string(path)
                    .with_context(|| format!("reading {} failed", path.display()))?;
                debug!(path = %path.display(), bytes = payload.len(), "read forecast payload");
                parse_payload(&payload, *format)
            }
            Self::Stdin { format } => {
                let mut payload = String::new();
                std::io::stdin()
                    .read_to_string(&mut payload)
                    .context("reading forecast payload from stdin failed")?;
                parse_payload(&payload, *format)
            }
            Self::Metno {
                client,
                coordinates,
                ..
            } => client.fetch(*coordinates).await,
        }
    }

    /// Sun times for `date`, only known when fetching by coordinates. A failed
    /// lookup is logged and leaves the tile without them.
    pub async fn load_sun_times(&self, date: NaiveDate) -> Option<SunTimes> {
        let Self::Metno {
            sun_client,
            coordinates,
            ..
        } = self
        else {
            return None;
        };
        match sun_client.fetch(*coordinates, date).await {
            Ok(times) => Some(times),
            Err(err) => {
                warn!(error = %format!("{err:#}"), %date, "sun times unavailable");
                None
            }
        }
    }
}

pub fn parse_payload(payload: &str, format: SourceArg) -> Result<Vec<WeatherRecord>> {
    match format {
        SourceArg::Metno => metno::parse_timeseries(payload),
        SourceArg::Openweather => openweather::parse_forecast(payload),
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;
    use crate::test_support::default_test_cli;

    #[test]
    fn dash_input_reads_stdin() {
        let mut cli = default_test_cli();
        cli.input = Some(PathBuf::from("-"));
        cli.source = SourceArg::Openweather;
        let source = ForecastSource::from_cli(&cli).expect("valid cli");
        assert!(matches!(
            source,
            ForecastSource::Stdin {
                format: SourceArg::Openweather
            }
        ));
    }

    #[test]
    fn coordinates_select_metno_fetch() {
        let mut cli = default_test_cli();
        cli.lat = Some(59.9139);
        cli.lon = Some(10.7522);
        let source = ForecastSource::from_cli(&cli).expect("valid cli");
        assert!(matches!(source, ForecastSource::Metno { .. }));
    }

    #[tokio::test]
    async fn file_source_parses_selected_format() {
        let mut file = NamedTempFile::new().expect("create temp payload");
        write!(
            file,
            r#"{{"properties":{{"timeseries":[{{"time":"2026-02-12T10:00:00Z","data":{{"instant":{{"details":{{"air_temperature":3.0}}}}}}}}]}}}}"#
        )
        .expect("write payload");

        let source = ForecastSource::File {
            path: file.path().to_path_buf(),
            format: SourceArg::Metno,
        };
        let records = source.load().await.expect("valid payload");
        assert_eq!(records.len(), 1);
    }

    #[tokio::test]
    async fn file_sources_have_no_sun_times() {
        let source = ForecastSource::Stdin {
            format: SourceArg::Metno,
        };
        let date = NaiveDate::from_ymd_opt(2026, 2, 12).expect("valid date");
        assert_eq!(source.load_sun_times(date).await, None);
    }

    #[tokio::test]
    async fn missing_file_reports_path() {
        let source = ForecastSource::File {
            path: PathBuf::from("/nonexistent/forecast.json"),
            format: SourceArg::Metno,
        };
        let err = source.load().await.expect_err("missing file");
        assert!(err.to_string().contains("/nonexistent/forecast.json"));
    }
}
