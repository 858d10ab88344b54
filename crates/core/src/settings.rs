//! Console-wide preferences edited on the settings page.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

pub const SESSION_TIMEOUT_MINUTES: &[u32] = &[15, 30, 60, 120];
pub const PASSWORD_EXPIRY_DAYS: &[u32] = &[30, 60, 90, 180, 365];
pub const THEMES: &[&str] = &["light", "dark", "system"];
pub const DATE_FORMATS: &[&str] = &["MM/DD/YYYY", "DD/MM/YYYY", "YYYY-MM-DD"];
pub const TIME_FORMATS: &[&str] = &["12", "24"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NotificationSettings {
    pub email: bool,
    pub push: bool,
    pub sms: bool,
    pub ticket_updates: bool,
    pub system_alerts: bool,
    pub weekly_reports: bool,
    /// Where email notifications go.
    pub email_address: Option<String>,
}

impl Default for NotificationSettings {
    fn default() -> Self {
        Self {
            email: true,
            push: false,
            sms: false,
            ticket_updates: true,
            system_alerts: true,
            weekly_reports: false,
            email_address: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SecuritySettings {
    pub two_factor: bool,
    pub session_timeout_minutes: u32,
    pub password_expiry_days: u32,
}

impl Default for SecuritySettings {
    fn default() -> Self {
        Self {
            two_factor: false,
            session_timeout_minutes: 30,
            password_expiry_days: 90,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppearanceSettings {
    pub theme: String,
    pub language: String,
    pub date_format: String,
    pub time_format: String,
}

impl Default for AppearanceSettings {
    fn default() -> Self {
        Self {
            theme: "system".into(),
            language: "en".into(),
            date_format: "MM/DD/YYYY".into(),
            time_format: "12".into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IntegrationSettings {
    pub slack: bool,
    pub teams: bool,
    pub jira: bool,
    pub github: bool,
    pub slack_webhook_url: Option<String>,
    pub teams_webhook_url: Option<String>,
}

impl IntegrationSettings {
    /// Webhook URLs of the chat integrations that are switched on.
    pub fn active_webhooks(&self) -> Vec<&str> {
        [
            (self.slack, self.slack_webhook_url.as_deref()),
            (self.teams, self.teams_webhook_url.as_deref()),
        ]
        .into_iter()
        .filter_map(|(enabled, url)| url.filter(|_| enabled))
        .collect()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsoleSettings {
    pub notifications: NotificationSettings,
    pub security: SecuritySettings,
    pub appearance: AppearanceSettings,
    pub integrations: IntegrationSettings,
}

impl ConsoleSettings {
    pub fn validate(&self) -> Result<(), CoreError> {
        one_of(
            "security.session_timeout_minutes",
            &self.security.session_timeout_minutes,
            SESSION_TIMEOUT_MINUTES,
        )?;
        one_of(
            "security.password_expiry_days",
            &self.security.password_expiry_days,
            PASSWORD_EXPIRY_DAYS,
        )?;
        one_of("appearance.theme", &self.appearance.theme.as_str(), THEMES)?;
        one_of(
            "appearance.date_format",
            &self.appearance.date_format.as_str(),
            DATE_FORMATS,
        )?;
        one_of(
            "appearance.time_format",
            &self.appearance.time_format.as_str(),
            TIME_FORMATS,
        )?;

        if self.appearance.language.trim().is_empty() {
            return Err(CoreError::Validation(
                "appearance.language must not be empty".into(),
            ));
        }

        if let Some(addr) = &self.notifications.email_address {
            crate::user::validate_email(addr)?;
        }

        for (field, url) in [
            ("integrations.slack_webhook_url", &self.integrations.slack_webhook_url),
            ("integrations.teams_webhook_url", &self.integrations.teams_webhook_url),
        ] {
            if let Some(url) = url {
                if !(url.starts_with("https://") || url.starts_with("http://")) {
                    return Err(CoreError::Validation(format!(
                        "{field} must be an http(s) URL"
                    )));
                }
            }
        }

        Ok(())
    }
}

fn one_of<T: PartialEq + std::fmt::Display>(
    field: &str,
    value: &T,
    allowed: &[T],
) -> Result<(), CoreError> {
    if allowed.contains(value) {
        return Ok(());
    }
    let options: Vec<String> = allowed.iter().map(ToString::to_string).collect();
    Err(CoreError::Validation(format!(
        "{field} must be one of: {}, got {value}",
        options.join(", ")
    )))
}
