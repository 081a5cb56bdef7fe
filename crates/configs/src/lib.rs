use anyhow::Result;
use serde::Deserialize;
use anyhow::anyhow;

pub const DEFAULT_CONFIG_PATH: &str = "georeport.toml";

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub codec: CodecConfig,
    #[serde(default)]
    pub jurisdiction: JurisdictionConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Copy, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Json,
    Xml,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CodecConfig {
    #[serde(default = "default_pretty")]
    pub pretty: bool,
    #[serde(default)]
    pub format: OutputFormat,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self { pretty: default_pretty(), format: OutputFormat::Json }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct JurisdictionConfig {
    #[serde(default = "default_reserved_prefixes")]
    pub reserved_prefixes: Vec<String>,
    #[serde(default)]
    pub default_id: Option<String>,
}

impl Default for JurisdictionConfig {
    fn default() -> Self {
        Self { reserved_prefixes: default_reserved_prefixes(), default_id: None }
    }
}

#[derive(Debug, Clone, Copy, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Compact,
    Json,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct LoggingConfig {
    #[serde(default)]
    pub format: LogFormat,
    #[serde(default)]
    pub filter: Option<String>,
}

fn default_pretty() -> bool { true }
fn default_reserved_prefixes() -> Vec<String> { vec!["invalid".to_string()] }

/// Load from `CONFIG_PATH`, falling back to built-in defaults when the
/// default file is absent.
pub fn load_default() -> Result<AppConfig> {
    match std::env::var("CONFIG_PATH") {
        Ok(path) => load_from_file(&path),
        Err(_) if std::path::Path::new(DEFAULT_CONFIG_PATH).exists() => load_from_file(DEFAULT_CONFIG_PATH),
        Err(_) => Ok(AppConfig::default()),
    }
}

pub fn load_from_file(path: &str) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| anyhow!("cannot read {path}: {e}"))?;
    load_from_str(&content)
}

pub fn load_from_str(content: &str) -> Result<AppConfig> {
    let cfg: AppConfig = toml::from_str(content)?;
    Ok(cfg)
}

impl AppConfig {
    pub fn load_and_validate() -> Result<Self> {
        let mut cfg = load_default()?;
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        self.jurisdiction.normalize()?;
        self.logging.normalize();
        Ok(())
    }
}

impl JurisdictionConfig {
    fn normalize(&mut self) -> Result<()> {
        for prefix in self.reserved_prefixes.iter_mut() {
            *prefix = prefix.trim().to_lowercase();
        }
        if self.reserved_prefixes.iter().any(String::is_empty) {
            return Err(anyhow!("jurisdiction.reserved_prefixes must not contain empty entries"));
        }
        self.reserved_prefixes.dedup();
        if let Some(id) = &self.default_id {
            let id = id.trim();
            if id.is_empty() {
                self.default_id = None;
            } else {
                self.default_id = Some(id.to_string());
            }
        }
        Ok(())
    }
}

impl LoggingConfig {
    fn normalize(&mut self) {
        if self.filter.as_deref().is_some_and(|f| f.trim().is_empty()) {
            self.filter = None;
        }
    }
}
