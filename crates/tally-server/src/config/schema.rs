use serde::Deserialize;

use tally_core::calendar::{Calendar, RetentionWindow, DEFAULT_UTC_OFFSET_HOURS};
use tally_core::error::{Result, TallyError};

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TallyConfig {
    pub version: u32,

    #[serde(default)]
    pub server: ServerSection,

    #[serde(default)]
    pub calendar: CalendarSection,

    #[serde(default)]
    pub retention: RetentionSection,

    #[serde(default)]
    pub admin: AdminSection,

    /// Absent means no store binding: every request answers NotConfigured.
    #[serde(default)]
    pub store: Option<StoreSection>,
}

impl TallyConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(TallyError::UnsupportedVersion);
        }

        self.server.validate()?;
        self.calendar.build()?;
        self.retention.build()?;
        self.admin.validate()?;
        if let Some(store) = &self.store {
            store.validate()?;
        }

        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerSection {
    #[serde(default = "default_listen")]
    pub listen: String,

    #[serde(default = "default_service_name")]
    pub service_name: String,

    #[serde(default = "default_api_prefix")]
    pub api_prefix: String,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            listen: default_listen(),
            service_name: default_service_name(),
            api_prefix: default_api_prefix(),
        }
    }
}

impl ServerSection {
    pub fn validate(&self) -> Result<()> {
        if self.service_name.trim().is_empty() {
            return Err(TallyError::BadRequest(
                "server.service_name must not be empty".into(),
            ));
        }
        if !self.api_prefix.starts_with('/') || self.api_prefix.ends_with('/') {
            return Err(TallyError::BadRequest(
                "server.api_prefix must start with '/' and must not end with '/'".into(),
            ));
        }
        Ok(())
    }
}

fn default_listen() -> String {
    "0.0.0.0:8787".into()
}
fn default_service_name() -> String {
    "visitor-counter".into()
}
fn default_api_prefix() -> String {
    "/api".into()
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CalendarSection {
    #[serde(default = "default_utc_offset_hours")]
    pub utc_offset_hours: i32,
}

impl Default for CalendarSection {
    fn default() -> Self {
        Self {
            utc_offset_hours: default_utc_offset_hours(),
        }
    }
}

impl CalendarSection {
    pub fn build(&self) -> Result<Calendar> {
        Calendar::new(self.utc_offset_hours)
    }
}

fn default_utc_offset_hours() -> i32 {
    DEFAULT_UTC_OFFSET_HOURS
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RetentionSection {
    #[serde(default = "default_min_age_days")]
    pub min_age_days: u32,

    #[serde(default = "default_max_age_days")]
    pub max_age_days: u32,
}

impl Default for RetentionSection {
    fn default() -> Self {
        Self {
            min_age_days: default_min_age_days(),
            max_age_days: default_max_age_days(),
        }
    }
}

impl RetentionSection {
    pub fn build(&self) -> Result<RetentionWindow> {
        RetentionWindow::new(self.min_age_days, self.max_age_days)
    }
}

fn default_min_age_days() -> u32 {
    7
}
fn default_max_age_days() -> u32 {
    30
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AdminSection {
    /// Shared secret for the reset endpoint. `None` leaves it open.
    #[serde(default)]
    pub token: Option<String>,
}

impl AdminSection {
    pub fn validate(&self) -> Result<()> {
        if matches!(self.token.as_deref(), Some(t) if t.is_empty()) {
            return Err(TallyError::BadRequest(
                "admin.token must not be empty (omit it to disable the check)".into(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StoreBackend {
    Memory,
    Snapshot,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StoreSection {
    pub backend: StoreBackend,

    #[serde(default)]
    pub snapshot_path: Option<String>,

    #[serde(default = "default_snapshot_interval_secs")]
    pub snapshot_interval_secs: u64,
}

impl StoreSection {
    pub fn validate(&self) -> Result<()> {
        if self.backend == StoreBackend::Snapshot
            && self.snapshot_path.as_deref().map_or(true, |p| p.trim().is_empty())
        {
            return Err(TallyError::BadRequest(
                "store.snapshot_path is required for the snapshot backend".into(),
            ));
        }
        if !(1..=86400).contains(&self.snapshot_interval_secs) {
            return Err(TallyError::BadRequest(
                "store.snapshot_interval_secs must be between 1 and 86400".into(),
            ));
        }
        Ok(())
    }
}

fn default_snapshot_interval_secs() -> u64 {
    30
}
