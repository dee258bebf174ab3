use crate::adapters::geocoder::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECONDS};
use crate::adapters::identity::{Identity, SESSION_KEY};
use crate::adapters::storage::DEFAULT_PROFILE_KEY;
use crate::core::geo::{DEFAULT_RADIUS_KM, PARIS, PARIS_NAME};
use crate::domain::model::{Coordinate, Zone};
use crate::domain::ports::ConfigProvider;
use crate::utils::error::{ProfileError, Result};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::OnceLock;

fn env_var_pattern() -> &'static Regex {
    static ENV_VAR: OnceLock<Regex> = OnceLock::new();
    ENV_VAR.get_or_init(|| {
        Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)\}").expect("static regex is valid")
    })
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TomlConfig {
    pub geocoder: GeocoderConfig,
    pub zone: ZoneConfig,
    pub storage: StorageConfig,
    pub identity: Option<IdentityConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeocoderConfig {
    pub base_url: String,
    pub timeout_seconds: u64,
}

impl Default for GeocoderConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ZoneConfig {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub radius_km: f64,
}

impl Default for ZoneConfig {
    fn default() -> Self {
        Self {
            name: PARIS_NAME.to_string(),
            latitude: PARIS.lat(),
            longitude: PARIS.lng(),
            radius_km: DEFAULT_RADIUS_KM,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub data_dir: String,
    pub profile_key: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: "./profile-data".to_string(),
            profile_key: DEFAULT_PROFILE_KEY.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IdentityConfig {
    pub display_name: Option<String>,
    pub email: Option<String>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(ProfileError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| ProfileError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${PROFILE_EMAIL})，未設定的變數保留原樣
    fn substitute_env_vars(content: &str) -> String {
        env_var_pattern()
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }

    /// Identity to sign in as, if any field is set. Blank values and
    /// `${VAR}` placeholders whose variable was unset count as unset.
    pub fn identity(&self) -> Option<Identity> {
        self.identity.as_ref().map(|i| Identity {
            display_name: identity_value("identity.display_name", i.display_name.as_deref()),
            email: identity_value("identity.email", i.email.as_deref()),
        })
    }

    pub fn validate_config(&self) -> Result<()> {
        validation::validate_url("geocoder.base_url", &self.geocoder.base_url)?;
        validation::validate_range("geocoder.timeout_seconds", self.geocoder.timeout_seconds, 1, 300)?;

        validation::validate_non_empty_string("zone.name", &self.zone.name)?;
        validation::validate_range("zone.latitude", self.zone.latitude, -90.0, 90.0)?;
        validation::validate_range("zone.longitude", self.zone.longitude, -180.0, 180.0)?;
        validation::validate_positive("zone.radius_km", self.zone.radius_km)?;

        validation::validate_path("storage.data_dir", &self.storage.data_dir)?;
        validation::validate_storage_key("storage.profile_key", &self.storage.profile_key)?;
        if self.storage.profile_key == SESSION_KEY {
            return Err(ProfileError::InvalidConfigValueError {
                field: "storage.profile_key".to_string(),
                value: self.storage.profile_key.clone(),
                reason: "reserved for the sign-in session".to_string(),
            });
        }

        Ok(())
    }
}

fn identity_value(field: &str, value: Option<&str>) -> Option<String> {
    let value = value?.trim();
    if value.is_empty() {
        return None;
    }
    if env_var_pattern().is_match(value) {
        tracing::warn!("{} has an unresolved placeholder {:?}, ignoring it", field, value);
        return None;
    }
    Some(value.to_string())
}

impl ConfigProvider for TomlConfig {
    fn geocoder_base_url(&self) -> &str {
        &self.geocoder.base_url
    }

    fn geocoder_timeout_seconds(&self) -> u64 {
        self.geocoder.timeout_seconds
    }

    fn data_dir(&self) -> &str {
        &self.storage.data_dir
    }

    fn profile_key(&self) -> &str {
        &self.storage.profile_key
    }

    fn zone(&self) -> Result<Zone> {
        Ok(Zone {
            name: self.zone.name.clone(),
            center: Coordinate::new(self.zone.latitude, self.zone.longitude)?,
            radius_km: self.zone.radius_km,
        })
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
