use std::path::PathBuf;

pub struct Config {
    pub data_file: PathBuf,
    pub log_format: String,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let data_file = lookup("VITALS_DATA_FILE")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| "patients.txt".into());
        let log_format = lookup("VITALS_LOG_FORMAT").unwrap_or_else(|| "text".into());
        Self {
            data_file: PathBuf::from(data_file),
            log_format,
        }
    }

    pub fn json_logs(&self) -> bool {
        self.log_format.eq_ignore_ascii_case("json")
    }
}
