pub mod browse;
pub mod config;
pub mod genres;
pub mod price;
pub mod recommend;
pub mod similar;

use std::path::PathBuf;
use std::str::FromStr;

use clap::Args;
use folio_core::config::{AppConfig, ConfigOverrides, LoadOptions};
use folio_core::errors::{ApplicationError, DomainError};
use folio_core::{CartSelection, Storefront};
use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::Value;

/// Flags shared by every subcommand.
#[derive(Debug, Clone, Default, Args)]
pub struct GlobalArgs {
    #[arg(long, global = true, value_name = "PATH", help = "Catalog JSON file (defaults to the built-in catalog)")]
    pub catalog: Option<PathBuf>,
    #[arg(long, global = true, value_name = "PATH", help = "Config file (defaults to folio.toml or config/folio.toml)")]
    pub config: Option<PathBuf>,
}

impl GlobalArgs {
    pub fn load_options(&self) -> LoadOptions {
        LoadOptions {
            config_path: self.config.clone(),
            require_file: self.config.is_some(),
            overrides: ConfigOverrides {
                catalog_path: self.catalog.clone(),
                ..ConfigOverrides::default()
            },
        }
    }
}

#[derive(Debug, Clone)]
pub struct CommandResult {
    pub exit_code: u8,
    pub output: String,
}

#[derive(Debug, Serialize)]
struct CommandOutcome {
    command: String,
    status: String,
    error_class: Option<String>,
    message: String,
    data: Option<Value>,
}

impl CommandResult {
    pub fn success(command: &str, message: impl Into<String>, data: impl Serialize) -> Self {
        let data = match serde_json::to_value(data) {
            Ok(data) => data,
            Err(error) => {
                return Self::failure(command, "serialization", error.to_string(), 1);
            }
        };

        let payload = CommandOutcome {
            command: command.to_string(),
            status: "ok".to_string(),
            error_class: None,
            message: message.into(),
            data: Some(data),
        };
        Self { exit_code: 0, output: serialize_payload(payload) }
    }

    pub fn failure(
        command: &str,
        error_class: &str,
        message: impl Into<String>,
        exit_code: u8,
    ) -> Self {
        let payload = CommandOutcome {
            command: command.to_string(),
            status: "error".to_string(),
            error_class: Some(error_class.to_string()),
            message: message.into(),
            data: None,
        };
        Self { exit_code, output: serialize_payload(payload) }
    }

    pub fn from_error(command: &str, error: &ApplicationError) -> Self {
        Self::failure(
            command,
            error.error_class(),
            format!("{} ({error})", error.user_message()),
            error.exit_code(),
        )
    }
}

fn serialize_payload(payload: CommandOutcome) -> String {
    serde_json::to_string(&payload).unwrap_or_else(|error| {
        format!(
            "{{\"command\":\"unknown\",\"status\":\"error\",\"error_class\":\"serialization\",\"message\":\"{}\",\"data\":null}}",
            error.to_string().replace('\\', "\\\\").replace('"', "\\\"")
        )
    })
}

pub(crate) fn load_config(command: &str, globals: &GlobalArgs) -> Result<AppConfig, CommandResult> {
    AppConfig::load(globals.load_options())
        .map_err(|error| CommandResult::from_error(command, &ApplicationError::from(error)))
}

pub(crate) fn open_storefront(command: &str, globals: &GlobalArgs) -> Result<Storefront, CommandResult> {
    let config = load_config(command, globals)?;
    Storefront::from_config(&config).map_err(|error| CommandResult::from_error(command, &error))
}

pub(crate) fn invalid_input(command: &str, error: DomainError) -> CommandResult {
    CommandResult::from_error(command, &ApplicationError::from(error))
}

pub(crate) fn parse_optional<T>(command: &str, raw: Option<&str>) -> Result<Option<T>, CommandResult>
where
    T: FromStr<Err = DomainError>,
{
    raw.map(str::parse::<T>).transpose().map_err(|error| invalid_input(command, error))
}

pub(crate) fn parse_amount(
    command: &str,
    field: &'static str,
    raw: Option<&str>,
) -> Result<Option<Decimal>, CommandResult> {
    let Some(raw) = raw else {
        return Ok(None);
    };

    match raw.trim().parse::<Decimal>() {
        Ok(amount) if !amount.is_sign_negative() => Ok(Some(amount)),
        _ => Err(invalid_input(
            command,
            DomainError::UnrecognizedValue {
                field,
                value: raw.to_string(),
                expected: "a non-negative amount",
            },
        )),
    }
}

pub(crate) fn parse_cart(command: &str, entries: &[String]) -> Result<Vec<CartSelection>, CommandResult> {
    entries
        .iter()
        .map(|entry| entry.parse::<CartSelection>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|error| invalid_input(command, error))
}
