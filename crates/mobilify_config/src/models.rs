// --- File: crates/mobilify_config/src/models.rs ---

use serde::{Deserialize, Serialize};

// --- General Server Config ---
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

// --- Adapter Config ---
// Describes the adapter under test: where to reach it when driving a live
// instance, which credentials it enforces, and which transport modes the
// reference adapter should offer. Modes are plain strings here so the config
// crate stays free of domain types; the adapter parses them.
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct AdapterConfig {
    #[serde(default)]
    pub base_url: Option<String>, // e.g. http://localhost:8080, for live runs
    #[serde(default)]
    pub credentials: Option<String>, // value the adapter expects in x-credentials
    #[serde(default)]
    pub modes: Option<Vec<String>>, // e.g. ["BICYCLE", "CAR"]
}

// --- Trip Query Config ---
// The default trip the test kit asks options for.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct TripConfig {
    pub from: String, // "lat,lon"
    #[serde(default)]
    pub to: Option<String>, // "lat,lon"
    #[serde(default)]
    pub start_offset_minutes: Option<i64>, // options window start, relative to now
    #[serde(default)]
    pub window_minutes: Option<i64>, // options window length
    #[serde(default)]
    pub radius: Option<u32>, // meters around `from`
    #[serde(default)]
    pub sharing: Option<bool>,
}

// --- Credentials Config ---
// The options and booking endpoints can require different tokens.
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct AuthConfig {
    #[serde(default)]
    pub options_credentials: Option<String>,
    #[serde(default)]
    pub booking_credentials: Option<String>,
}

// --- Unified App Configuration ---
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AppConfig {
    // Server config is mandatory
    pub server: ServerConfig,

    // --- Optional Sections ---
    #[serde(default)]
    pub adapter: Option<AdapterConfig>,
    #[serde(default)]
    pub trip: Option<TripConfig>,
    #[serde(default)]
    pub auth: Option<AuthConfig>,
}
