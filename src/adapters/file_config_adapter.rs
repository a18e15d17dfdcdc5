//! INI file configuration adapter.

use crate::domain::error::LedgerError;
use crate::ports::config_port::ConfigPort;
use configparser::ini::Ini;
use std::path::Path;

/// Ledger settings read from an INI file such as:
///
/// ```ini
/// [storage]
/// csv_file = finance_data.csv
///
/// [input]
/// max_attempts = 5
/// ```
pub struct FileConfigAdapter {
    ini: Ini,
}

impl FileConfigAdapter {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, LedgerError> {
        let path = path.as_ref();
        let mut ini = Ini::new();
        ini.load(path).map_err(|reason| LedgerError::ConfigParse {
            file: path.display().to_string(),
            reason,
        })?;
        Ok(Self { ini })
    }

    pub fn from_string(content: &str) -> Result<Self, LedgerError> {
        let mut ini = Ini::new();
        ini.read(content.to_string())
            .map_err(|reason| LedgerError::ConfigParse {
                file: "<inline>".into(),
                reason,
            })?;
        Ok(Self { ini })
    }

    /// Non-empty trimmed value, if the key is set.
    fn raw(&self, section: &str, key: &str) -> Option<String> {
        self.ini
            .get(section, key)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }
}

fn invalid(section: &str, key: &str, reason: String) -> LedgerError {
    LedgerError::ConfigInvalid {
        section: section.into(),
        key: key.into(),
        reason,
    }
}

impl ConfigPort for FileConfigAdapter {
    fn get_string(&self, section: &str, key: &str) -> Option<String> {
        self.raw(section, key)
    }

    fn get_int(&self, section: &str, key: &str) -> Result<Option<i64>, LedgerError> {
        self.raw(section, key)
            .map(|v| {
                v.parse::<i64>()
                    .map_err(|_| invalid(section, key, format!("'{v}' is not an integer")))
            })
            .transpose()
    }

    fn get_bool(&self, section: &str, key: &str) -> Result<Option<bool>, LedgerError> {
        self.raw(section, key)
            .map(|v| match v.to_lowercase().as_str() {
                "true" | "yes" | "1" => Ok(true),
                "false" | "no" | "0" => Ok(false),
                _ => Err(invalid(
                    section,
                    key,
                    format!("'{v}' is not a boolean (expected true/false, yes/no or 1/0)"),
                )),
            })
            .transpose()
    }
}
