use crate::enums::{AtcRating, PilotRating, SimType, TransponderMode};
use crate::serializer::from_wire;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub login: LoginConfig,
    pub client: ClientConfig,
    pub aircraft: AircraftConfig,
    pub position: PositionConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ServerConfig {
    pub address: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            address: "127.0.0.1".to_string(),
            port: 6809,
        }
    }
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LoginMode {
    #[default]
    Pilot,
    Observer,
}

/// Network credentials and the ratings sent with the login packet
///
/// Ratings and sim type are the numeric wire codes.
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct LoginConfig {
    pub callsign: String,
    pub cid: String,
    pub password: String,
    pub real_name: String,
    pub mode: LoginMode,
    pub pilot_rating: u32,
    pub atc_rating: u32,
    pub sim_type: u32,
    pub protocol_revision: i32,
}

impl Default for LoginConfig {
    fn default() -> Self {
        Self {
            callsign: "TEST01".to_string(),
            cid: "1234567".to_string(),
            password: String::new(),
            real_name: "Test Pilot".to_string(),
            mode: LoginMode::Pilot,
            pilot_rating: 1,
            atc_rating: 1,
            sim_type: 0,
            protocol_revision: 100,
        }
    }
}

impl LoginConfig {
    pub fn pilot_rating(&self) -> PilotRating {
        from_wire(&self.pilot_rating.to_string())
    }

    pub fn atc_rating(&self) -> AtcRating {
        from_wire(&self.atc_rating.to_string())
    }

    pub fn sim_type(&self) -> SimType {
        from_wire(&self.sim_type.to_string())
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ClientConfig {
    pub id: u16,
    pub name: String,
    pub version_major: i32,
    pub version_minor: i32,
    /// Seconds between keep-alive pings to the server, 0 disables them
    pub ping_interval_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            id: 0,
            name: "fsdwire".to_string(),
            version_major: 0,
            version_minor: 1,
            ping_interval_secs: 60,
        }
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct AircraftConfig {
    pub icao: String,
    pub airline: String,
    pub livery: String,
}

/// Static aircraft state reported with `@` updates while logged in as a pilot
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct PositionConfig {
    /// Seconds between position updates, 0 disables them
    pub interval_secs: u64,
    pub latitude: f64,
    pub longitude: f64,
    pub altitude: i32,
    pub pressure_altitude: i32,
    pub ground_speed: i32,
    pub pitch: f64,
    pub bank: f64,
    pub heading: f64,
    pub on_ground: bool,
    pub transponder_code: i32,
    /// `S` standby, `N` mode C, `Y` ident
    pub transponder_mode: String,
}

impl Default for PositionConfig {
    fn default() -> Self {
        Self {
            interval_secs: 5,
            latitude: 0.0,
            longitude: 0.0,
            altitude: 0,
            pressure_altitude: 0,
            ground_speed: 0,
            pitch: 0.0,
            bank: 0.0,
            heading: 0.0,
            on_ground: true,
            transponder_code: 2000,
            transponder_mode: "S".to_string(),
        }
    }
}

impl PositionConfig {
    pub fn transponder_mode(&self) -> TransponderMode {
        from_wire(&self.transponder_mode)
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }
}
