use std::time::Duration;

use crate::core::{BillError, ValidationPolicy};
use crate::pdf::LayoutOptions;

pub const DEFAULT_BUCKET: &str = "swiss-qr-code";
pub const DEFAULT_KEY: &str = "qr-bill.pdf";
pub const DEFAULT_URL_EXPIRY: Duration = Duration::from_secs(300);
pub const DEFAULT_FILENAME: &str = "qr-bill.pdf";

/// Where the rendered document goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputChannel {
    /// Upload to object storage and answer with a presigned download link.
    StoreLink {
        bucket: String,
        key: String,
        expires_in: Duration,
    },
    /// Answer with the document itself, base64 encoded.
    Inline { filename: String },
}

impl OutputChannel {
    pub fn store_link() -> Self {
        Self::StoreLink {
            bucket: DEFAULT_BUCKET.into(),
            key: DEFAULT_KEY.into(),
            expires_in: DEFAULT_URL_EXPIRY,
        }
    }

    pub fn inline() -> Self {
        Self::Inline {
            filename: DEFAULT_FILENAME.into(),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::StoreLink { .. } => "store-link",
            Self::Inline { .. } => "inline",
        }
    }
}

/// Everything that varies between deployments of the handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandlerConfig {
    pub validation: ValidationPolicy,
    pub output: OutputChannel,
    pub layout: LayoutOptions,
}

impl Default for HandlerConfig {
    fn default() -> Self {
        Self::strict_store_link()
    }
}

impl HandlerConfig {
    /// Caller amounts must match; the document is uploaded and linked.
    pub fn strict_store_link() -> Self {
        Self {
            validation: ValidationPolicy::Strict,
            output: OutputChannel::store_link(),
            layout: LayoutOptions::default(),
        }
    }

    /// Amounts are computed; the document is returned inline with a total
    /// rule and payment note.
    pub fn derive_inline() -> Self {
        Self {
            validation: ValidationPolicy::Derive,
            output: OutputChannel::inline(),
            layout: LayoutOptions {
                total_rule: true,
                payment_note: true,
                ..LayoutOptions::default()
            },
        }
    }

    /// Read `SWISSBILL_*` variables from the process environment.
    pub fn from_env() -> Result<Self, BillError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from a variable lookup. Unset variables keep the
    /// [`strict_store_link`](Self::strict_store_link) defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, BillError> {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();

        if let Some(value) = var("SWISSBILL_VALIDATION") {
            config.validation = value
                .parse()
                .map_err(|e| BillError::Config(format!("SWISSBILL_VALIDATION: {e}")))?;
        }

        let output = var("SWISSBILL_OUTPUT").unwrap_or_else(|| "store-link".into());
        config.output = match output.trim().to_ascii_lowercase().as_str() {
            "store-link" | "store_link" | "s3" => OutputChannel::StoreLink {
                bucket: var("SWISSBILL_BUCKET").unwrap_or_else(|| DEFAULT_BUCKET.into()),
                key: var("SWISSBILL_KEY").unwrap_or_else(|| DEFAULT_KEY.into()),
                expires_in: match var("SWISSBILL_URL_EXPIRY_SECS") {
                    Some(secs) => parse_expiry(&secs)?,
                    None => DEFAULT_URL_EXPIRY,
                },
            },
            "inline" => OutputChannel::Inline {
                filename: var("SWISSBILL_FILENAME").unwrap_or_else(|| DEFAULT_FILENAME.into()),
            },
            other => {
                return Err(BillError::Config(format!(
                    "SWISSBILL_OUTPUT: unknown output channel '{other}' (expected store-link or inline)"
                )));
            }
        };

        if let Some(value) = var("SWISSBILL_LANGUAGE") {
            config.layout.language = value
                .parse()
                .map_err(|e| BillError::Config(format!("SWISSBILL_LANGUAGE: {e}")))?;
        }
        if let Some(value) = var("SWISSBILL_TOTAL_RULE") {
            config.layout.total_rule = parse_flag("SWISSBILL_TOTAL_RULE", &value)?;
        }
        if let Some(value) = var("SWISSBILL_PAYMENT_NOTE") {
            config.layout.payment_note = parse_flag("SWISSBILL_PAYMENT_NOTE", &value)?;
        }
        Ok(config)
    }
}

fn parse_expiry(value: &str) -> Result<Duration, BillError> {
    match value.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
        _ => Err(BillError::Config(format!(
            "SWISSBILL_URL_EXPIRY_SECS: expected a positive number of seconds, got '{value}'"
        ))),
    }
}

fn parse_flag(name: &str, value: &str) -> Result<bool, BillError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(BillError::Config(format!(
            "{name}: expected a boolean, got '{value}'"
        ))),
    }
}
