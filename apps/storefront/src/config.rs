//! # Storefront Configuration
//!
//! Configuration management for the storefront server.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     MATERA_STORE_NAME="Matera"                                         │
//! │     MATERA_WHATSAPP_NUMBER=5491123456789                               │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/matera-storefront/storefront.toml (Linux)                │
//! │     ~/Library/Application Support/ar.matera.storefront/ (macOS)        │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     Dev store identity, default prize table                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # storefront.toml
//! [store]
//! name = "Matera"
//! whatsapp_number = "5491123456789"
//!
//! [server]
//! bind_addr = "0.0.0.0"
//! port = 8080
//!
//! [policies]
//! clear_cart_after_handoff = false
//! enforce_stock_on_add = false
//!
//! [[wheel.prizes]]
//! label = "$ 4.500 de descuento"
//! kind = "discount"
//! weight = 2
//! code = "RULETA4500"
//! amount_pesos = 4500
//!
//! [[wheel.prizes]]
//! label = "Seguí participando"
//! kind = "no_prize"
//! weight = 5
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;
use tracing::{debug, info, warn};

use matera_core::{validate_prizes, Money, PrizeKind, WheelPrize};

// =============================================================================
// Config Errors
// =============================================================================

/// Errors raised while loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file could not be read.
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    /// Config file is not valid TOML for this schema.
    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    /// Config parsed but a value is unusable.
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Result type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

// =============================================================================
// Store Identity
// =============================================================================

/// Identity of the shop the storefront sells for.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreSettings {
    /// Shop name used in the UI and the WhatsApp greeting.
    #[serde(default = "default_store_name")]
    pub name: String,

    /// WhatsApp number orders are handed off to.
    /// International format, digits only (no `+`, spaces, or dashes).
    #[serde(default = "default_whatsapp_number")]
    pub whatsapp_number: String,
}

fn default_store_name() -> String {
    "Matera".to_string()
}

fn default_whatsapp_number() -> String {
    "5491123456789".to_string()
}

impl Default for StoreSettings {
    fn default() -> Self {
        StoreSettings {
            name: default_store_name(),
            whatsapp_number: default_whatsapp_number(),
        }
    }
}

// =============================================================================
// Server Settings
// =============================================================================

/// HTTP server and storage settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSettings {
    /// Bind address (default: 0.0.0.0 for all interfaces).
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    /// Port for the HTTP server.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Data directory override for session snapshots and the lead log.
    /// Defaults to the platform data directory.
    #[serde(default)]
    pub data_dir: Option<PathBuf>,
}

fn default_bind_addr() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

impl Default for ServerSettings {
    fn default() -> Self {
        ServerSettings {
            bind_addr: default_bind_addr(),
            port: default_port(),
            data_dir: None,
        }
    }
}

impl ServerSettings {
    /// Returns the full bind address.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.bind_addr, self.port)
    }
}

// =============================================================================
// Wheel Settings
// =============================================================================

/// Promotional wheel configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WheelSettings {
    /// The wedges, in wheel order.
    #[serde(default = "default_prizes")]
    pub prizes: Vec<PrizeConfig>,
}

impl Default for WheelSettings {
    fn default() -> Self {
        WheelSettings {
            prizes: default_prizes(),
        }
    }
}

/// One configured wedge. Flat so it reads naturally as a TOML table;
/// `code` and `amount_pesos` only apply to discount wedges.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrizeConfig {
    /// Label painted on the wedge.
    pub label: String,

    /// Relative odds (higher = more likely).
    #[serde(default = "default_weight")]
    pub weight: u32,

    /// What the wedge awards.
    #[serde(default)]
    pub kind: PrizeKindConfig,

    /// Promotion code, required for discount wedges.
    #[serde(default)]
    pub code: Option<String>,

    /// Discount amount in whole pesos, required for discount wedges.
    #[serde(default)]
    pub amount_pesos: Option<i64>,
}

fn default_weight() -> u32 {
    1
}

/// Wedge award kinds as they appear in the config file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrizeKindConfig {
    /// Absolute discount redeemed through a promotion code.
    Discount,

    /// Free shipping, settled in the WhatsApp conversation.
    FreeShipping,

    /// The consolation wedge.
    #[default]
    NoPrize,
}

impl PrizeConfig {
    /// Converts this wedge into the core prize type.
    fn to_prize(&self) -> ConfigResult<WheelPrize> {
        let kind = match self.kind {
            PrizeKindConfig::Discount => {
                let code = self.code.clone().ok_or_else(|| {
                    ConfigError::Invalid(format!(
                        "prize '{}' is a discount but has no code",
                        self.label
                    ))
                })?;
                let pesos = self.amount_pesos.ok_or_else(|| {
                    ConfigError::Invalid(format!(
                        "prize '{}' is a discount but has no amount_pesos",
                        self.label
                    ))
                })?;
                PrizeKind::Discount {
                    code,
                    amount: Money::from_pesos(pesos),
                }
            }
            PrizeKindConfig::FreeShipping => PrizeKind::FreeShipping,
            PrizeKindConfig::NoPrize => PrizeKind::NoPrize,
        };

        Ok(WheelPrize {
            label: self.label.clone(),
            weight: self.weight,
            kind,
        })
    }
}

/// The default wheel: mostly consolation, a few real discounts.
fn default_prizes() -> Vec<PrizeConfig> {
    vec![
        PrizeConfig {
            label: "$ 2.000 de descuento".to_string(),
            weight: 4,
            kind: PrizeKindConfig::Discount,
            code: Some("RULETA2000".to_string()),
            amount_pesos: Some(2_000),
        },
        PrizeConfig {
            label: "$ 4.500 de descuento".to_string(),
            weight: 2,
            kind: PrizeKindConfig::Discount,
            code: Some("RULETA4500".to_string()),
            amount_pesos: Some(4_500),
        },
        PrizeConfig {
            label: "$ 10.000 de descuento".to_string(),
            weight: 1,
            kind: PrizeKindConfig::Discount,
            code: Some("RULETA10000".to_string()),
            amount_pesos: Some(10_000),
        },
        PrizeConfig {
            label: "Envío gratis".to_string(),
            weight: 3,
            kind: PrizeKindConfig::FreeShipping,
            code: None,
            amount_pesos: None,
        },
        PrizeConfig {
            label: "Seguí participando".to_string(),
            weight: 5,
            kind: PrizeKindConfig::NoPrize,
            code: None,
            amount_pesos: None,
        },
    ]
}

// =============================================================================
// Policies
// =============================================================================

/// Behavior knobs that were open questions in the original storefront,
/// made explicit so operations can flip them without a deploy.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct PolicySettings {
    /// Empty the cart once the WhatsApp hand-off link is produced.
    ///
    /// Off by default: the source behavior keeps the cart so the customer
    /// can re-send or amend the order.
    #[serde(default)]
    pub clear_cart_after_handoff: bool,

    /// Reject add-to-cart requests whose quantity exceeds catalog stock.
    ///
    /// Off by default: stock is advisory on the storefront and settled in
    /// the hand-off conversation.
    #[serde(default)]
    pub enforce_stock_on_add: bool,
}

// =============================================================================
// Main Storefront Configuration
// =============================================================================

/// Complete storefront configuration.
///
/// ## Example Config File
/// ```toml
/// [store]
/// name = "Matera"
/// whatsapp_number = "5491123456789"
///
/// [server]
/// bind_addr = "127.0.0.1"
/// port = 8080
///
/// [policies]
/// clear_cart_after_handoff = false
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorefrontConfig {
    /// Shop identity.
    #[serde(default)]
    pub store: StoreSettings,

    /// HTTP server and storage settings.
    #[serde(default)]
    pub server: ServerSettings,

    /// Promotional wheel settings.
    #[serde(default)]
    pub wheel: WheelSettings,

    /// Behavior policies.
    #[serde(default)]
    pub policies: PolicySettings,
}

impl StorefrontConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (storefront.toml)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> ConfigResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading storefront config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns default if load fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load storefront config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Validates the configuration.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.store.name.trim().is_empty() {
            return Err(ConfigError::Invalid("store name must not be empty".into()));
        }

        let number = &self.store.whatsapp_number;
        if number.is_empty() || !number.chars().all(|c| c.is_ascii_digit()) {
            return Err(ConfigError::Invalid(format!(
                "whatsapp_number must be international digits only, got: '{}'",
                number
            )));
        }

        // Prove the prize table converts and passes the core rules
        self.prize_table()?;

        Ok(())
    }

    /// Converts the configured wheel into the validated core prize table.
    pub fn prize_table(&self) -> ConfigResult<Vec<WheelPrize>> {
        let prizes = self
            .wheel
            .prizes
            .iter()
            .map(|p| p.to_prize())
            .collect::<ConfigResult<Vec<_>>>()?;

        validate_prizes(&prizes).map_err(|e| ConfigError::Invalid(e.to_string()))?;

        Ok(prizes)
    }

    /// Applies environment variable overrides.
    fn apply_env_overrides(&mut self) {
        if let Ok(name) = std::env::var("MATERA_STORE_NAME") {
            self.store.name = name;
        }

        if let Ok(number) = std::env::var("MATERA_WHATSAPP_NUMBER") {
            debug!(number = %number, "Overriding WhatsApp number from environment");
            self.store.whatsapp_number = number;
        }

        if let Ok(addr) = std::env::var("MATERA_BIND_ADDR") {
            self.server.bind_addr = addr;
        }

        if let Ok(port) = std::env::var("MATERA_PORT") {
            match port.parse::<u16>() {
                Ok(p) => {
                    debug!(port = p, "Overriding port from environment");
                    self.server.port = p;
                }
                Err(_) => {
                    warn!(value = %port, "Ignoring MATERA_PORT, not a valid port");
                }
            }
        }

        if let Ok(dir) = std::env::var("MATERA_DATA_DIR") {
            self.server.data_dir = Some(PathBuf::from(dir));
        }
    }

    /// Returns the default config file path.
    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("ar", "matera", "storefront")
            .map(|dirs| dirs.config_dir().join("storefront.toml"))
    }

    /// Resolves the data directory for session snapshots and the lead log.
    pub fn data_dir(&self) -> Option<PathBuf> {
        if let Some(ref dir) = self.server.data_dir {
            return Some(dir.clone());
        }

        directories::ProjectDirs::from("ar", "matera", "storefront")
            .map(|dirs| dirs.data_dir().to_path_buf())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = StorefrontConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.server.bind_address(), "0.0.0.0:8080");
        assert!(!config.policies.clear_cart_after_handoff);
        assert!(!config.policies.enforce_stock_on_add);
    }

    #[test]
    fn test_default_prize_table_converts() {
        let config = StorefrontConfig::default();
        let prizes = config.prize_table().unwrap();

        assert_eq!(prizes.len(), 5);
        assert!(prizes
            .iter()
            .any(|p| matches!(p.kind, PrizeKind::Discount { .. })));
        assert!(prizes.iter().any(|p| p.kind == PrizeKind::NoPrize));
    }

    #[test]
    fn test_discount_wedge_requires_code_and_amount() {
        let mut config = StorefrontConfig::default();
        config.wheel.prizes = vec![PrizeConfig {
            label: "Misterio".to_string(),
            weight: 1,
            kind: PrizeKindConfig::Discount,
            code: None,
            amount_pesos: Some(1_000),
        }];

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_whatsapp_number_must_be_digits() {
        let mut config = StorefrontConfig::default();
        assert!(config.validate().is_ok());

        config.store.whatsapp_number = "+54 9 11 2345-6789".to_string();
        assert!(config.validate().is_err());

        config.store.whatsapp_number = String::new();
        assert!(config.validate().is_err());

        config.store.whatsapp_number = "5491123456789".to_string();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_partial_toml() {
        let contents = r#"
            [store]
            name = "Matera Palermo"

            [server]
            port = 9090

            [[wheel.prizes]]
            label = "$ 1.000 de descuento"
            kind = "discount"
            weight = 1
            code = "PROMO1000"
            amount_pesos = 1000
        "#;

        let config: StorefrontConfig = toml::from_str(contents).unwrap();

        assert_eq!(config.store.name, "Matera Palermo");
        // Unset fields fall back to defaults
        assert_eq!(config.store.whatsapp_number, "5491123456789");
        assert_eq!(config.server.port, 9090);
        assert_eq!(config.server.bind_addr, "0.0.0.0");

        let prizes = config.prize_table().unwrap();
        assert_eq!(prizes.len(), 1);
        assert_eq!(
            prizes[0].kind,
            PrizeKind::Discount {
                code: "PROMO1000".to_string(),
                amount: Money::from_pesos(1_000),
            }
        );
    }

    #[test]
    fn test_toml_serialization() {
        let config = StorefrontConfig::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        assert!(toml_str.contains("[store]"));
        assert!(toml_str.contains("[[wheel.prizes]]"));
    }

    #[test]
    fn test_env_port_override_ignores_garbage() {
        // No other test reads MATERA_* variables, so setting them here
        // cannot leak into parallel tests
        let mut config = StorefrontConfig::default();
        std::env::set_var("MATERA_PORT", "ochenta");
        config.apply_env_overrides();
        std::env::remove_var("MATERA_PORT");

        // The typo is discarded, the default stays
        assert_eq!(config.server.port, 8080);

        let mut config = StorefrontConfig::default();
        std::env::set_var("MATERA_PORT", "9090");
        config.apply_env_overrides();
        std::env::remove_var("MATERA_PORT");

        assert_eq!(config.server.port, 9090);
    }
}
