//! INI file configuration adapter.
//!
//! Keys and section names are case-sensitive so that `[sectors]` labels
//! keep their spelling.

use crate::ports::config_port::ConfigPort;
use configparser::ini::Ini;
use std::path::Path;

pub struct FileConfigAdapter {
    config: Ini,
}

impl FileConfigAdapter {
    pub fn from_file<P: AsRef<Path>>(path: P) -> std::io::Result<Self> {
        let mut config = Ini::new_cs();
        config.load(path).map_err(std::io::Error::other)?;
        Ok(Self { config })
    }

    pub fn from_string(content: &str) -> Result<Self, String> {
        let mut config = Ini::new_cs();
        config.read(content.to_string())?;
        Ok(Self { config })
    }

    fn parse_bool(value: &str) -> Option<bool> {
        match value.to_lowercase().as_str() {
            "true" | "yes" | "1" => Some(true),
            "false" | "no" | "0" => Some(false),
            _ => None,
        }
    }
}

impl ConfigPort for FileConfigAdapter {
    fn get_string(&self, section: &str, key: &str) -> Option<String> {
        self.config.get(section, key)
    }

    fn get_bool(&self, section: &str, key: &str, default: bool) -> bool {
        self.config
            .get(section, key)
            .as_ref()
            .and_then(|v| Self::parse_bool(v))
            .unwrap_or(default)
    }

    fn get_keys(&self, section: &str) -> Vec<String> {
        self.config
            .get_map_ref()
            .get(section)
            .map(|entries| entries.keys().cloned().collect())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", content).unwrap();
        file
    }

    const SAMPLE: &str = r#"
[portfolio]
total_capital = 1000000000
target_profit = 150000000
symbols = FPT,HPG,BID
timeframe = 1D

[market]
source = mock
clock = closed

[sectors]
Technology & Telecom = FPT,CMG
Banking = BID,VCB
"#;

    #[test]
    fn from_string_parses_config() {
        let adapter = FileConfigAdapter::from_string(SAMPLE).unwrap();
        assert_eq!(
            adapter.get_string("portfolio", "symbols"),
            Some("FPT,HPG,BID".to_string())
        );
        assert_eq!(adapter.get_string("market", "source"), Some("mock".to_string()));
    }

    #[test]
    fn get_string_returns_none_for_missing_key() {
        let adapter = FileConfigAdapter::from_string(SAMPLE).unwrap();
        assert_eq!(adapter.get_string("portfolio", "missing"), None);
        assert_eq!(adapter.get_string("missing_section", "key"), None);
    }

    #[test]
    fn get_nonempty_skips_blank_values() {
        let adapter = FileConfigAdapter::from_string("[report]\noutput =   \n").unwrap();
        assert_eq!(adapter.get_nonempty("report", "output"), None);
    }

    #[test]
    fn get_string_keeps_raw_number_text() {
        let adapter = FileConfigAdapter::from_string(SAMPLE).unwrap();
        assert_eq!(
            adapter.get_string("portfolio", "total_capital").as_deref(),
            Some("1000000000")
        );
    }

    #[test]
    fn get_bool_values() {
        let adapter =
            FileConfigAdapter::from_string("[x]\na = true\nb = yes\nc = 0\nd = maybe\n").unwrap();
        assert!(adapter.get_bool("x", "a", false));
        assert!(adapter.get_bool("x", "b", false));
        assert!(!adapter.get_bool("x", "c", true));
        assert!(adapter.get_bool("x", "d", true));
        assert!(!adapter.get_bool("x", "missing", false));
    }

    #[test]
    fn get_keys_keeps_file_order_and_case() {
        let adapter = FileConfigAdapter::from_string(SAMPLE).unwrap();
        assert_eq!(
            adapter.get_keys("sectors"),
            vec!["Technology & Telecom".to_string(), "Banking".to_string()]
        );
        assert!(adapter.get_keys("nope").is_empty());
    }

    #[test]
    fn from_file_reads_config() {
        let file = create_temp_config("[report]\nformat = json\n");
        let adapter = FileConfigAdapter::from_file(file.path()).unwrap();
        assert_eq!(adapter.get_string("report", "format"), Some("json".to_string()));
    }

    #[test]
    fn from_file_returns_error_for_missing_file() {
        let result = FileConfigAdapter::from_file("/nonexistent/path/smartcap.ini");
        assert!(result.is_err());
    }
}
