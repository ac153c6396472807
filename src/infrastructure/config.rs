use crate::domain::issue::Location;
use crate::domain::viewport::ViewportPolicy;
use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub server: ServerSettings,
    pub issues: IssueSourceSettings,
    pub map: MapSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    pub bind_addr: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct IssueSourceSettings {
    pub endpoint: String,
    pub timeout_secs: u64,
}

impl IssueSourceSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct MapSettings {
    pub default_lat: f64,
    pub default_lng: f64,
    pub overview_zoom: u8,
    pub focused_zoom: u8,
}

impl MapSettings {
    pub fn viewport_policy(&self) -> ViewportPolicy {
        ViewportPolicy {
            default_center: Location::new(self.default_lat, self.default_lng),
            overview_zoom: self.overview_zoom,
            focused_zoom: self.focused_zoom,
        }
    }
}

/// Defaults, then `config/dashboard.*` if present, then `DASHBOARD__*` environment variables.
pub fn load_app_config() -> anyhow::Result<AppConfig> {
    build_app_config(
        config::Config::builder()
            .add_source(config::File::with_name("config/dashboard").required(false)),
        environment(),
    )
}

fn environment() -> config::Environment {
    config::Environment::with_prefix("DASHBOARD")
        .separator("__")
        .try_parsing(true)
}

fn build_app_config(
    builder: config::ConfigBuilder<config::builder::DefaultState>,
    environment: config::Environment,
) -> anyhow::Result<AppConfig> {
    let settings = with_defaults(builder)?.add_source(environment).build()?;

    Ok(settings.try_deserialize()?)
}

fn with_defaults(
    builder: config::ConfigBuilder<config::builder::DefaultState>,
) -> anyhow::Result<config::ConfigBuilder<config::builder::DefaultState>> {
    let defaults = ViewportPolicy::default();
    Ok(builder
        .set_default("server.bind_addr", "0.0.0.0:8080")?
        .set_default("issues.endpoint", "http://localhost:5000/api/issues")?
        .set_default("issues.timeout_secs", 10)?
        .set_default("map.default_lat", defaults.default_center.lat)?
        .set_default("map.default_lng", defaults.default_center.lng)?
        .set_default("map.overview_zoom", defaults.overview_zoom as u64)?
        .set_default("map.focused_zoom", defaults.focused_zoom as u64)?)
}
