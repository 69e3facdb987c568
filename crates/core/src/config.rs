use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use rust_decimal::Decimal;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::pricing::{
    CouponPolicy, PricingPolicy, DEFAULT_COUPON_CODE, DEFAULT_COUPON_MAX_DISCOUNT,
    DEFAULT_COUPON_RATE_PCT, DEFAULT_FLAT_SHIPPING_FEE, DEFAULT_FREE_SHIPPING_THRESHOLD,
};
use crate::recommend::{RecommendationLimits, DEFAULT_LIMIT, PER_CART_GENRE, PER_GENRE, SIMILAR_LIMIT};

pub const DEFAULT_CONFIG_FILE: &str = "folio.toml";

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub pricing: PricingConfig,
    pub coupon: CouponConfig,
    pub recommendations: RecommendationsConfig,
    pub catalog: CatalogConfig,
    pub logging: LoggingConfig,
}

#[derive(Clone, Debug)]
pub struct PricingConfig {
    pub flat_shipping_fee: Decimal,
    pub free_shipping_threshold: Decimal,
}

#[derive(Clone, Debug)]
pub struct CouponConfig {
    pub code: SecretString,
    pub rate_pct: Decimal,
    pub max_discount: Decimal,
}

#[derive(Clone, Debug)]
pub struct RecommendationsConfig {
    pub limit: usize,
    pub per_genre: usize,
    pub per_cart_genre: usize,
    pub similar_limit: usize,
}

#[derive(Clone, Debug, Default)]
pub struct CatalogConfig {
    /// JSON catalog file; the built-in seed catalog is used when unset.
    pub path: Option<PathBuf>,
}

#[derive(Clone, Debug)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    Compact,
    Pretty,
    Json,
}

impl LogFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Compact => "compact",
            Self::Pretty => "pretty",
            Self::Json => "json",
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct ConfigOverrides {
    pub catalog_path: Option<PathBuf>,
    pub log_level: Option<String>,
    pub log_format: Option<LogFormat>,
    pub coupon_code: Option<String>,
    pub recommendations_limit: Option<usize>,
}

#[derive(Clone, Debug, Default)]
pub struct LoadOptions {
    pub config_path: Option<PathBuf>,
    pub require_file: bool,
    pub overrides: ConfigOverrides,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config file `{path}`: {source}")]
    ReadFile { path: PathBuf, source: std::io::Error },
    #[error("could not parse config file `{path}`: {source}")]
    ParseFile { path: PathBuf, source: toml::de::Error },
    #[error("required config file was not found: `{0}`")]
    MissingConfigFile(PathBuf),
    #[error("environment variable interpolation failed for `{var}`")]
    MissingEnvInterpolation { var: String },
    #[error("unterminated environment interpolation expression")]
    UnterminatedInterpolation,
    #[error("invalid environment override for `{key}`: `{value}`")]
    InvalidEnvOverride { key: String, value: String },
    #[error("configuration validation failed: {0}")]
    Validation(String),
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            pricing: PricingConfig {
                flat_shipping_fee: Decimal::from(DEFAULT_FLAT_SHIPPING_FEE),
                free_shipping_threshold: Decimal::from(DEFAULT_FREE_SHIPPING_THRESHOLD),
            },
            coupon: CouponConfig {
                code: secret_value(DEFAULT_COUPON_CODE.to_string()),
                rate_pct: Decimal::from(DEFAULT_COUPON_RATE_PCT),
                max_discount: Decimal::from(DEFAULT_COUPON_MAX_DISCOUNT),
            },
            recommendations: RecommendationsConfig {
                limit: DEFAULT_LIMIT,
                per_genre: PER_GENRE,
                per_cart_genre: PER_CART_GENRE,
                similar_limit: SIMILAR_LIMIT,
            },
            catalog: CatalogConfig::default(),
            logging: LoggingConfig { level: "info".to_string(), format: LogFormat::Compact },
        }
    }
}

fn secret_value(value: String) -> SecretString {
    value.into()
}

impl std::str::FromStr for LogFormat {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "compact" => Ok(Self::Compact),
            "pretty" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            other => Err(ConfigError::Validation(format!(
                "unsupported log format `{other}` (expected compact|pretty|json)"
            ))),
        }
    }
}

impl AppConfig {
    pub fn load(options: LoadOptions) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        let maybe_path = resolve_config_path(options.config_path.as_deref());

        if let Some(path) = maybe_path {
            let patch = read_patch(&path)?;
            config.apply_patch(patch);
        } else if options.require_file {
            let expected =
                options.config_path.unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));
            return Err(ConfigError::MissingConfigFile(expected));
        }

        config.apply_env_overrides()?;
        config.apply_overrides(options.overrides);
        config.validate()?;

        Ok(config)
    }

    pub fn pricing_policy(&self) -> PricingPolicy {
        PricingPolicy {
            flat_shipping_fee: self.pricing.flat_shipping_fee,
            free_shipping_threshold: self.pricing.free_shipping_threshold,
            coupon: CouponPolicy {
                code: self.coupon.code.clone(),
                rate_pct: self.coupon.rate_pct,
                max_discount: self.coupon.max_discount,
            },
        }
    }

    pub fn recommendation_limits(&self) -> RecommendationLimits {
        RecommendationLimits {
            limit: self.recommendations.limit,
            per_genre: self.recommendations.per_genre,
            per_cart_genre: self.recommendations.per_cart_genre,
            similar_limit: self.recommendations.similar_limit,
        }
    }

    fn apply_patch(&mut self, patch: ConfigPatch) {
        if let Some(pricing) = patch.pricing {
            if let Some(flat_shipping_fee) = pricing.flat_shipping_fee {
                self.pricing.flat_shipping_fee = flat_shipping_fee;
            }
            if let Some(free_shipping_threshold) = pricing.free_shipping_threshold {
                self.pricing.free_shipping_threshold = free_shipping_threshold;
            }
        }

        if let Some(coupon) = patch.coupon {
            if let Some(code) = coupon.code {
                self.coupon.code = secret_value(code);
            }
            if let Some(rate_pct) = coupon.rate_pct {
                self.coupon.rate_pct = rate_pct;
            }
            if let Some(max_discount) = coupon.max_discount {
                self.coupon.max_discount = max_discount;
            }
        }

        if let Some(recommendations) = patch.recommendations {
            if let Some(limit) = recommendations.limit {
                self.recommendations.limit = limit;
            }
            if let Some(per_genre) = recommendations.per_genre {
                self.recommendations.per_genre = per_genre;
            }
            if let Some(per_cart_genre) = recommendations.per_cart_genre {
                self.recommendations.per_cart_genre = per_cart_genre;
            }
            if let Some(similar_limit) = recommendations.similar_limit {
                self.recommendations.similar_limit = similar_limit;
            }
        }

        if let Some(catalog) = patch.catalog {
            if let Some(path) = catalog.path {
                self.catalog.path = Some(path);
            }
        }

        if let Some(logging) = patch.logging {
            if let Some(level) = logging.level {
                self.logging.level = level;
            }
            if let Some(format) = logging.format {
                self.logging.format = format;
            }
        }
    }

    fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        if let Some(value) = read_env("FOLIO_PRICING_FLAT_SHIPPING_FEE") {
            self.pricing.flat_shipping_fee =
                parse_decimal("FOLIO_PRICING_FLAT_SHIPPING_FEE", &value)?;
        }
        if let Some(value) = read_env("FOLIO_PRICING_FREE_SHIPPING_THRESHOLD") {
            self.pricing.free_shipping_threshold =
                parse_decimal("FOLIO_PRICING_FREE_SHIPPING_THRESHOLD", &value)?;
        }

        if let Some(value) = read_env("FOLIO_COUPON_CODE") {
            self.coupon.code = secret_value(value);
        }
        if let Some(value) = read_env("FOLIO_COUPON_RATE_PCT") {
            self.coupon.rate_pct = parse_decimal("FOLIO_COUPON_RATE_PCT", &value)?;
        }
        if let Some(value) = read_env("FOLIO_COUPON_MAX_DISCOUNT") {
            self.coupon.max_discount = parse_decimal("FOLIO_COUPON_MAX_DISCOUNT", &value)?;
        }

        if let Some(value) = read_env("FOLIO_RECOMMENDATIONS_LIMIT") {
            self.recommendations.limit = parse_usize("FOLIO_RECOMMENDATIONS_LIMIT", &value)?;
        }
        if let Some(value) = read_env("FOLIO_RECOMMENDATIONS_PER_GENRE") {
            self.recommendations.per_genre =
                parse_usize("FOLIO_RECOMMENDATIONS_PER_GENRE", &value)?;
        }
        if let Some(value) = read_env("FOLIO_RECOMMENDATIONS_PER_CART_GENRE") {
            self.recommendations.per_cart_genre =
                parse_usize("FOLIO_RECOMMENDATIONS_PER_CART_GENRE", &value)?;
        }

        if let Some(value) = read_env("FOLIO_CATALOG_PATH") {
            self.catalog.path = Some(PathBuf::from(value));
        }

        let log_level = read_env("FOLIO_LOGGING_LEVEL").or_else(|| read_env("FOLIO_LOG_LEVEL"));
        if let Some(value) = log_level {
            self.logging.level = value;
        }
        let log_format = read_env("FOLIO_LOGGING_FORMAT").or_else(|| read_env("FOLIO_LOG_FORMAT"));
        if let Some(value) = log_format {
            self.logging.format = value.parse()?;
        }

        Ok(())
    }

    fn apply_overrides(&mut self, overrides: ConfigOverrides) {
        if let Some(catalog_path) = overrides.catalog_path {
            self.catalog.path = Some(catalog_path);
        }
        if let Some(log_level) = overrides.log_level {
            self.logging.level = log_level;
        }
        if let Some(log_format) = overrides.log_format {
            self.logging.format = log_format;
        }
        if let Some(coupon_code) = overrides.coupon_code {
            self.coupon.code = secret_value(coupon_code);
        }
        if let Some(limit) = overrides.recommendations_limit {
            self.recommendations.limit = limit;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_pricing(&self.pricing)?;
        validate_coupon(&self.coupon)?;
        validate_recommendations(&self.recommendations)?;
        validate_logging(&self.logging)?;
        Ok(())
    }
}

fn resolve_config_path(explicit_path: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit_path {
        return path.exists().then_some(path.to_path_buf());
    }

    [PathBuf::from(DEFAULT_CONFIG_FILE), PathBuf::from("config").join(DEFAULT_CONFIG_FILE)]
        .into_iter()
        .find(|path| path.exists())
}

fn read_patch(path: &Path) -> Result<ConfigPatch, ConfigError> {
    let raw = fs::read_to_string(path)
        .map_err(|source| ConfigError::ReadFile { path: path.to_path_buf(), source })?;

    let interpolated = interpolate_env_vars(&raw)?;
    toml::from_str::<ConfigPatch>(&interpolated)
        .map_err(|source| ConfigError::ParseFile { path: path.to_path_buf(), source })
}

fn interpolate_env_vars(input: &str) -> Result<String, ConfigError> {
    let mut output = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == '$' && matches!(chars.peek(), Some('{')) {
            chars.next();
            let mut key = String::new();

            loop {
                match chars.next() {
                    Some('}') => break,
                    Some(next) => key.push(next),
                    None => return Err(ConfigError::UnterminatedInterpolation),
                }
            }

            let value = env::var(&key)
                .map_err(|_| ConfigError::MissingEnvInterpolation { var: key.clone() })?;
            output.push_str(&value);
            continue;
        }

        output.push(ch);
    }

    Ok(output)
}

fn validate_pricing(pricing: &PricingConfig) -> Result<(), ConfigError> {
    if pricing.flat_shipping_fee.is_sign_negative() {
        return Err(ConfigError::Validation(
            "pricing.flat_shipping_fee must not be negative".to_string(),
        ));
    }

    if pricing.free_shipping_threshold.is_sign_negative() {
        return Err(ConfigError::Validation(
            "pricing.free_shipping_threshold must not be negative".to_string(),
        ));
    }

    Ok(())
}

fn validate_coupon(coupon: &CouponConfig) -> Result<(), ConfigError> {
    if coupon.code.expose_secret().trim().is_empty() {
        return Err(ConfigError::Validation("coupon.code must not be empty".to_string()));
    }

    if coupon.rate_pct <= Decimal::ZERO || coupon.rate_pct > Decimal::ONE_HUNDRED {
        return Err(ConfigError::Validation(
            "coupon.rate_pct must be greater than 0 and at most 100".to_string(),
        ));
    }

    if coupon.max_discount <= Decimal::ZERO {
        return Err(ConfigError::Validation(
            "coupon.max_discount must be greater than zero".to_string(),
        ));
    }

    Ok(())
}

fn validate_recommendations(recommendations: &RecommendationsConfig) -> Result<(), ConfigError> {
    if recommendations.per_genre == 0 {
        return Err(ConfigError::Validation(
            "recommendations.per_genre must be at least 1".to_string(),
        ));
    }

    Ok(())
}

fn validate_logging(logging: &LoggingConfig) -> Result<(), ConfigError> {
    let level = logging.level.trim().to_ascii_lowercase();
    match level.as_str() {
        "trace" | "debug" | "info" | "warn" | "error" => Ok(()),
        _ => Err(ConfigError::Validation(
            "logging.level must be one of trace|debug|info|warn|error".to_string(),
        )),
    }
}

fn read_env(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}

fn parse_usize(key: &str, value: &str) -> Result<usize, ConfigError> {
    value.trim().parse::<usize>().map_err(|_| ConfigError::InvalidEnvOverride {
        key: key.to_string(),
        value: value.to_string(),
    })
}

fn parse_decimal(key: &str, value: &str) -> Result<Decimal, ConfigError> {
    value.trim().parse::<Decimal>().map_err(|_| ConfigError::InvalidEnvOverride {
        key: key.to_string(),
        value: value.to_string(),
    })
}

#[derive(Debug, Default, Deserialize)]
struct ConfigPatch {
    pricing: Option<PricingPatch>,
    coupon: Option<CouponPatch>,
    recommendations: Option<RecommendationsPatch>,
    catalog: Option<CatalogPatch>,
    logging: Option<LoggingPatch>,
}

#[derive(Debug, Default, Deserialize)]
struct PricingPatch {
    flat_shipping_fee: Option<Decimal>,
    free_shipping_threshold: Option<Decimal>,
}

#[derive(Debug, Default, Deserialize)]
struct CouponPatch {
    code: Option<String>,
    rate_pct: Option<Decimal>,
    max_discount: Option<Decimal>,
}

#[derive(Debug, Default, Deserialize)]
struct RecommendationsPatch {
    limit: Option<usize>,
    per_genre: Option<usize>,
    per_cart_genre: Option<usize>,
    similar_limit: Option<usize>,
}

#[derive(Debug, Default, Deserialize)]
struct CatalogPatch {
    path: Option<PathBuf>,
}

#[derive(Debug, Default, Deserialize)]
struct LoggingPatch {
    level: Option<String>,
    format: Option<LogFormat>,
}
