//! Journey content configuration
//!
//! The narrative (stops, dates, blurbs) lives in a JSON file so it can be edited
//! without rebuilding. Resolves the platform config directory:
//! - macOS: ~/Library/Application Support/journey_globe/
//! - Linux: ~/.config/journey_globe/
//! - Windows: %APPDATA%\journey_globe\config\

use anyhow::anyhow;
use bevy::prelude::*;
use chrono::{DateTime, Datelike, NaiveDate, Utc};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::core::coordinates::GeoPoint;

const CONFIG_FILE: &str = "journey.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StayPeriod {
    pub from: NaiveDate,
    #[serde(default)]
    pub to: Option<NaiveDate>,
}

impl StayPeriod {
    /// `2015 – 2018`, `2019` for a single year, `2021 – present` when open-ended.
    pub fn label(&self) -> String {
        match self.to {
            None => format!("{} – present", self.from.year()),
            Some(to) if to.year() == self.from.year() => format!("{}", self.from.year()),
            Some(to) => format!("{} – {}", self.from.year(), to.year()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JourneyStop {
    pub name: String,
    #[serde(flatten)]
    pub location: GeoPoint,
    #[serde(default)]
    pub period: Option<StayPeriod>,
    #[serde(default)]
    pub blurb: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TodaySection {
    pub heading: String,
    pub text: String,
    #[serde(default)]
    pub interests: Vec<String>,
}

#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JourneyConfig {
    pub title: String,
    pub subtitle: String,
    pub stops: Vec<JourneyStop>,
    pub today: TodaySection,
    #[serde(default)]
    pub saved_at: Option<DateTime<Utc>>,
}

impl JourneyConfig {
    /// Names and locations in stop order, as pins expect them.
    pub fn pin_locations(&self) -> Vec<(String, GeoPoint)> {
        self.stops
            .iter()
            .map(|s| (s.name.clone(), s.location))
            .collect()
    }
}

fn stop(
    name: &str,
    lat: f64,
    lng: f64,
    from: (i32, u32),
    to: Option<(i32, u32)>,
    blurb: &str,
) -> JourneyStop {
    let date = |(y, m): (i32, u32)| NaiveDate::from_ymd_opt(y, m, 1);
    JourneyStop {
        name: name.to_string(),
        location: GeoPoint::new(lat, lng),
        period: date(from).map(|from| StayPeriod {
            from,
            to: to.and_then(date),
        }),
        blurb: blurb.to_string(),
    }
}

impl Default for JourneyConfig {
    fn default() -> Self {
        Self {
            title: "A journey across the globe".to_string(),
            subtitle: "Scroll to travel".to_string(),
            stops: vec![
                stop(
                    "New York",
                    40.7128,
                    -74.0060,
                    (2001, 1),
                    Some((2006, 6)),
                    "Where it all started.",
                ),
                stop(
                    "Tashkent",
                    41.2995,
                    69.2401,
                    (2006, 7),
                    Some((2009, 6)),
                    "Silk Road city, first taste of a new alphabet.",
                ),
                stop(
                    "Rabat",
                    34.0209,
                    -6.8416,
                    (2009, 7),
                    Some((2011, 6)),
                    "Atlantic coast and mint tea.",
                ),
                stop(
                    "Bangkok",
                    13.7563,
                    100.5018,
                    (2011, 7),
                    Some((2014, 6)),
                    "Street food and monsoon seasons.",
                ),
                stop(
                    "Berlin",
                    52.5200,
                    13.4050,
                    (2014, 7),
                    Some((2016, 6)),
                    "Bikes, bakeries and long winters.",
                ),
                stop(
                    "Beirut",
                    33.8938,
                    35.5018,
                    (2016, 7),
                    Some((2018, 6)),
                    "Mountains to the sea in an hour.",
                ),
                stop(
                    "San Francisco",
                    37.7749,
                    -122.4194,
                    (2018, 7),
                    Some((2019, 6)),
                    "Fog, hills and first lines of code.",
                ),
                stop(
                    "Hannover",
                    52.3759,
                    9.7320,
                    (2019, 7),
                    Some((2021, 6)),
                    "Trade fairs and quiet parks.",
                ),
                stop(
                    "Granville",
                    40.0681,
                    -82.5193,
                    (2021, 8),
                    None,
                    "College town, building things.",
                ),
            ],
            today: TodaySection {
                heading: "Today".to_string(),
                text: "Studying, building and still exploring.".to_string(),
                interests: vec![
                    "Space".to_string(),
                    "Maps".to_string(),
                    "Photography".to_string(),
                    "Languages".to_string(),
                ],
            },
            saved_at: None,
        }
    }
}

/// Reads and writes `journey.json`.
pub struct JourneyStore {
    config_dir: PathBuf,
}

impl JourneyStore {
    /// Store in the platform config directory; fails if it cannot be resolved or created.
    pub fn new() -> Result<Self, anyhow::Error> {
        let proj_dirs = ProjectDirs::from("", "", "journey_globe")
            .ok_or_else(|| anyhow!("Failed to resolve config directory"))?;
        Self::new_in_dir(proj_dirs.config_dir().to_path_buf())
    }

    /// Store rooted at a specific directory (tests, portable setups).
    pub fn new_in_dir(config_dir: PathBuf) -> Result<Self, anyhow::Error> {
        fs::create_dir_all(&config_dir)?;
        Ok(Self { config_dir })
    }

    pub fn path(&self) -> PathBuf {
        self.config_dir.join(CONFIG_FILE)
    }

    /// Returns Ok(None) when no file exists yet.
    pub fn read(&self) -> Result<Option<JourneyConfig>, anyhow::Error> {
        let path = self.path();
        if !path.exists() {
            return Ok(None);
        }
        let contents = fs::read_to_string(&path)?;
        let config: JourneyConfig = serde_json::from_str(&contents)?;
        Ok(Some(config))
    }

    pub fn write(&self, config: &JourneyConfig) -> Result<(), anyhow::Error> {
        let mut stamped = config.clone();
        stamped.saved_at = Some(Utc::now());
        let contents = serde_json::to_string_pretty(&stamped)?;
        fs::write(self.path(), contents)?;
        Ok(())
    }

    /// Existing file, or the built-in journey written out for next time.
    pub fn load_or_init(&self) -> Result<JourneyConfig, anyhow::Error> {
        if let Some(config) = self.read()? {
            return Ok(config);
        }
        let config = JourneyConfig::default();
        self.write(&config)?;
        Ok(config)
    }
}

/// Loads the journey, falling back to the built-in one on any error.
pub fn load_journey_config() -> JourneyConfig {
    let loaded = JourneyStore::new().and_then(|store| {
        let path = store.path();
        store.load_or_init().map(|config| (config, path))
    });

    match loaded {
        Ok((config, path)) => {
            info!(
                "Loaded journey with {} stops from {}",
                config.stops.len(),
                path.display()
            );
            config
        }
        Err(err) => {
            warn!("Failed to load journey config, using built-in journey: {}", err);
            JourneyConfig::default()
        }
    }
}
