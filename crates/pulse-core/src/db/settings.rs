//! Key-value settings operations

use rusqlite::params;

use crate::error::Result;
use crate::models::DashboardSettings;

use super::Database;

const KEY_BUSINESS_UNIT: &str = "business_unit";
const KEY_TIME_PERIOD: &str = "time_period";
const KEY_COMPARISON_MODE: &str = "comparison_mode";

impl Database {
    /// Read a raw setting value
    pub fn get_setting(&self, key: &str) -> Result<Option<String>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare("SELECT value FROM settings WHERE key = ?1")?;
        let mut rows = stmt.query(params![key])?;
        match rows.next()? {
            Some(row) => Ok(Some(row.get(0)?)),
            None => Ok(None),
        }
    }

    /// Write a raw setting value, replacing any existing one
    pub fn set_setting(&self, key: &str, value: &str) -> Result<()> {
        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO settings (key, value, updated_at) VALUES (?1, ?2, CURRENT_TIMESTAMP)
             ON CONFLICT(key) DO UPDATE SET value = ?2, updated_at = CURRENT_TIMESTAMP",
            params![key, value],
        )?;
        Ok(())
    }

    /// Remove a setting
    pub fn delete_setting(&self, key: &str) -> Result<()> {
        let conn = self.conn()?;
        conn.execute("DELETE FROM settings WHERE key = ?1", params![key])?;
        Ok(())
    }

    /// Load the persisted dashboard settings.
    ///
    /// Missing or unparseable values fall back to the defaults, so a stale
    /// database never blocks startup.
    pub fn load_settings(&self) -> Result<DashboardSettings> {
        let defaults = DashboardSettings::default();

        let business_unit = self
            .get_setting(KEY_BUSINESS_UNIT)?
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.business_unit);

        let time_period = self
            .get_setting(KEY_TIME_PERIOD)?
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.time_period);

        let comparison_mode = self
            .get_setting(KEY_COMPARISON_MODE)?
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.comparison_mode);

        Ok(DashboardSettings {
            business_unit,
            time_period,
            comparison_mode,
        })
    }

    /// Persist the dashboard settings
    pub fn save_settings(&self, settings: &DashboardSettings) -> Result<()> {
        self.set_setting(KEY_BUSINESS_UNIT, settings.business_unit.as_str())?;
        self.set_setting(KEY_TIME_PERIOD, settings.time_period.as_str())?;
        self.set_setting(
            KEY_COMPARISON_MODE,
            if settings.comparison_mode { "true" } else { "false" },
        )?;
        Ok(())
    }
}
