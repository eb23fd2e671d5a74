//! Connectivity credential files
//!
//! Plain text, one value per line, surrounding whitespace trimmed. Missing
//! trailing lines read as empty values.

use crate::error::{ControllerError, Result};
use std::fmt;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

pub const WIFI_SETTINGS_FILE: &str = "wifi_setting.txt";
pub const MQTT_SETTINGS_FILE: &str = "mqtt_setting.txt";

/// Wireless network credentials
#[derive(Clone, PartialEq, Eq, Default)]
pub struct WifiSettings {
    pub ssid: String,
    pub password: String,
}

/// Message broker connection
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MqttSettings {
    pub hostname: String,
    pub port: u16,
    pub client_id: String,
    pub username: String,
    pub receive_topic: String,
    pub sent_topic: String,
}

impl fmt::Debug for WifiSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WifiSettings")
            .field("ssid", &self.ssid)
            .field("password", &"<redacted>")
            .finish()
    }
}

impl WifiSettings {
    /// Read `wifi_setting.txt` from `dir`; `None` if it does not exist
    pub fn load(dir: &Path) -> Result<Option<Self>> {
        let path = dir.join(WIFI_SETTINGS_FILE);
        let Some(mut lines) = read_lines(&path)? else {
            return Ok(None);
        };
        Ok(Some(Self {
            ssid: lines.next_value(),
            password: lines.next_value(),
        }))
    }

    /// Write `wifi_setting.txt` into `dir`
    pub fn save(&self, dir: &Path) -> Result<()> {
        write_lines(&dir.join(WIFI_SETTINGS_FILE), &[self.ssid.as_str(), self.password.as_str()])
    }
}

impl MqttSettings {
    /// Read `mqtt_setting.txt` from `dir`; `None` if it does not exist
    pub fn load(dir: &Path) -> Result<Option<Self>> {
        let path = dir.join(MQTT_SETTINGS_FILE);
        let Some(mut lines) = read_lines(&path)? else {
            return Ok(None);
        };

        let hostname = lines.next_value();
        let port_text = lines.next_value();
        let port = port_text
            .parse()
            .map_err(|_| ControllerError::InvalidSetting {
                path: path.clone(),
                field: "port",
                value: port_text.clone(),
            })?;

        Ok(Some(Self {
            hostname,
            port,
            client_id: lines.next_value(),
            username: lines.next_value(),
            receive_topic: lines.next_value(),
            sent_topic: lines.next_value(),
        }))
    }

    /// Write `mqtt_setting.txt` into `dir`
    pub fn save(&self, dir: &Path) -> Result<()> {
        write_lines(
            &dir.join(MQTT_SETTINGS_FILE),
            &[
                self.hostname.as_str(),
                self.port.to_string().as_str(),
                self.client_id.as_str(),
                self.username.as_str(),
                self.receive_topic.as_str(),
                self.sent_topic.as_str(),
            ],
        )
    }
}

struct Lines {
    values: std::vec::IntoIter<String>,
}

impl Lines {
    fn next_value(&mut self) -> String {
        self.values.next().unwrap_or_default()
    }
}

fn read_lines(path: &Path) -> Result<Option<Lines>> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(source) => {
            return Err(ControllerError::Settings {
                path: path.to_path_buf(),
                source,
            })
        }
    };
    let values: Vec<String> = text.lines().map(|line| line.trim().to_string()).collect();
    Ok(Some(Lines {
        values: values.into_iter(),
    }))
}

fn write_lines(path: &Path, values: &[&str]) -> Result<()> {
    let mut text = String::new();
    for value in values {
        text.push_str(value);
        text.push('\n');
    }
    fs::write(path, text).map_err(|source| ControllerError::Settings {
        path: PathBuf::from(path),
        source,
    })
}
