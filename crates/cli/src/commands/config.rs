use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use folio_core::config::{AppConfig, DEFAULT_CONFIG_FILE};
use secrecy::ExposeSecret;
use serde::Serialize;
use toml::Value;

use crate::commands::{load_config, CommandResult, GlobalArgs};

const COMMAND: &str = "config";

#[derive(Debug, Serialize)]
struct ConfigEntry {
    key: &'static str,
    value: String,
    source: String,
}

#[derive(Debug, Serialize)]
struct ConfigOutput {
    config_file: Option<String>,
    entries: Vec<ConfigEntry>,
}

struct SourceContext<'a> {
    globals: &'a GlobalArgs,
    file_doc: Option<Value>,
    file_path: Option<PathBuf>,
}

pub fn run(globals: &GlobalArgs) -> CommandResult {
    let config = match load_config(COMMAND, globals) {
        Ok(config) => config,
        Err(result) => return result,
    };

    let file_path = detect_config_path(globals.config.as_deref());
    let sources = SourceContext {
        globals,
        file_doc: load_config_file_doc(file_path.as_deref()),
        file_path,
    };

    let output = ConfigOutput {
        config_file: sources.file_path.as_ref().map(|path| path.display().to_string()),
        entries: entries(&config, &sources),
    };

    CommandResult::success(
        COMMAND,
        "effective config (source precedence: flag > env > file > default)",
        output,
    )
}

fn entries(config: &AppConfig, sources: &SourceContext<'_>) -> Vec<ConfigEntry> {
    let catalog_path = config
        .catalog
        .path
        .as_ref()
        .map(|path| path.display().to_string())
        .unwrap_or_else(|| "<built-in seed>".to_string());

    vec![
        entry(
            "pricing.flat_shipping_fee",
            config.pricing.flat_shipping_fee.to_string(),
            &["FOLIO_PRICING_FLAT_SHIPPING_FEE"],
            sources,
        ),
        entry(
            "pricing.free_shipping_threshold",
            config.pricing.free_shipping_threshold.to_string(),
            &["FOLIO_PRICING_FREE_SHIPPING_THRESHOLD"],
            sources,
        ),
        entry(
            "coupon.code",
            redact_code(config.coupon.code.expose_secret()),
            &["FOLIO_COUPON_CODE"],
            sources,
        ),
        entry(
            "coupon.rate_pct",
            config.coupon.rate_pct.to_string(),
            &["FOLIO_COUPON_RATE_PCT"],
            sources,
        ),
        entry(
            "coupon.max_discount",
            config.coupon.max_discount.to_string(),
            &["FOLIO_COUPON_MAX_DISCOUNT"],
            sources,
        ),
        entry(
            "recommendations.limit",
            config.recommendations.limit.to_string(),
            &["FOLIO_RECOMMENDATIONS_LIMIT"],
            sources,
        ),
        entry(
            "recommendations.per_genre",
            config.recommendations.per_genre.to_string(),
            &["FOLIO_RECOMMENDATIONS_PER_GENRE"],
            sources,
        ),
        entry(
            "recommendations.per_cart_genre",
            config.recommendations.per_cart_genre.to_string(),
            &["FOLIO_RECOMMENDATIONS_PER_CART_GENRE"],
            sources,
        ),
        entry(
            "recommendations.similar_limit",
            config.recommendations.similar_limit.to_string(),
            &[],
            sources,
        ),
        entry("catalog.path", catalog_path, &["FOLIO_CATALOG_PATH"], sources),
        entry(
            "logging.level",
            config.logging.level.clone(),
            &["FOLIO_LOGGING_LEVEL", "FOLIO_LOG_LEVEL"],
            sources,
        ),
        entry(
            "logging.format",
            config.logging.format.as_str().to_string(),
            &["FOLIO_LOGGING_FORMAT", "FOLIO_LOG_FORMAT"],
            sources,
        ),
    ]
}

fn entry(
    key: &'static str,
    value: String,
    env_keys: &[&str],
    sources: &SourceContext<'_>,
) -> ConfigEntry {
    ConfigEntry { key, value, source: field_source(key, env_keys, sources) }
}

fn detect_config_path(explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return path.exists().then(|| path.to_path_buf());
    }

    [PathBuf::from(DEFAULT_CONFIG_FILE), PathBuf::from("config").join(DEFAULT_CONFIG_FILE)]
        .into_iter()
        .find(|path| path.exists())
}

fn load_config_file_doc(path: Option<&Path>) -> Option<Value> {
    let path = path?;
    let raw = fs::read_to_string(path).ok()?;
    raw.parse::<Value>().ok()
}

fn field_source(key_path: &str, env_keys: &[&str], sources: &SourceContext<'_>) -> String {
    if key_path == "catalog.path" && sources.globals.catalog.is_some() {
        return "flag (--catalog)".to_string();
    }

    for env_key in env_keys {
        let set = env::var(env_key).map(|value| !value.trim().is_empty()).unwrap_or(false);
        if set {
            return format!("env ({env_key})");
        }
    }

    if let Some(doc) = &sources.file_doc {
        if contains_path(doc, key_path) {
            let file_path = sources
                .file_path
                .as_ref()
                .map(|path| path.display().to_string())
                .unwrap_or_else(|| "config file".to_string());
            return format!("file ({file_path})");
        }
    }

    "default".to_string()
}

fn contains_path(root: &Value, key_path: &str) -> bool {
    let mut current = root;
    for key in key_path.split('.') {
        let Some(next) = current.get(key) else {
            return false;
        };
        current = next;
    }
    true
}

/// Keeps the first character so operators can tell codes apart.
fn redact_code(code: &str) -> String {
    let trimmed = code.trim();
    match trimmed.chars().next() {
        None => "<empty>".to_string(),
        Some(first) => format!("{first}***"),
    }
}
