//! Configuration loading for crcrisk.
//! Reads crcrisk.toml from the current directory or the path in the CRCRISK_CONFIG env var.
//!
//! Every section has serde defaults equal to the published EMC7-normalised
//! six-gene signature, so a missing file or a partial file still yields a
//! complete configuration.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{CrcRiskError, Result};

/// Environment variable holding an explicit config file path.
pub const CONFIG_ENV_VAR: &str = "CRCRISK_CONFIG";

/// Config file looked up in the working directory when the env var is unset.
pub const DEFAULT_CONFIG_FILE: &str = "crcrisk.toml";

/// Environment variable naming a standalone YAML/JSON signature file.
/// Takes precedence over the `[signature]` section.
pub const SIGNATURE_ENV_VAR: &str = "CRCRISK_SIGNATURE";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub signature: SignatureConfig,
    #[serde(default)]
    pub form: FormConfig,
}

// ── Server ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Directory served under /static
    #[serde(default = "default_static_dir")]
    pub static_dir: String,
}

fn default_host()       -> String { "127.0.0.1".to_string() }
fn default_port()       -> u16    { 3001 }
fn default_static_dir() -> String { "crates/crcrisk-web/static".to_string() }

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            static_dir: default_static_dir(),
        }
    }
}

impl ServerConfig {
    /// `host:port` string suitable for `TcpListener::bind`.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

// ── Signature ────────────────────────────────────────────────────────────────

/// One target gene and its Cox regression weight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneWeight {
    pub gene: String,
    pub coefficient: f64,
}

impl GeneWeight {
    pub fn new(gene: impl Into<String>, coefficient: f64) -> Self {
        Self { gene: gene.into(), coefficient }
    }
}

/// Raw (unvalidated) signature table as it appears in the config file.
/// The scorer crate turns this into a validated `GeneSignature`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignatureConfig {
    #[serde(default = "default_signature_name")]
    pub name: String,
    #[serde(default = "default_reference_gene")]
    pub reference_gene: String,
    #[serde(default = "default_cutoff")]
    pub cutoff: f64,
    /// Target genes in display and scoring order.
    #[serde(default = "default_genes")]
    pub genes: Vec<GeneWeight>,
    /// Standalone YAML/JSON signature file replacing this section.
    /// Relative paths resolve against the directory of the TOML file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
}

fn default_signature_name() -> String { "EMC7-normalised 6-gene CRC recurrence signature".to_string() }
fn default_reference_gene() -> String { "EMC7".to_string() }
fn default_cutoff()         -> f64    { 0.5739 }

fn default_genes() -> Vec<GeneWeight> {
    vec![
        GeneWeight::new("TCEAL4",  0.3364594),
        GeneWeight::new("ACTR3B", -0.4104630),
        GeneWeight::new("ORAI3",   0.2523666),
        GeneWeight::new("PRIM1",  -0.2529674),
        GeneWeight::new("LEMD1",   0.2133200),
        GeneWeight::new("INHBB",   0.1491095),
    ]
}

impl Default for SignatureConfig {
    fn default() -> Self {
        Self {
            name: default_signature_name(),
            reference_gene: default_reference_gene(),
            cutoff: default_cutoff(),
            genes: default_genes(),
            file: None,
        }
    }
}

impl SignatureConfig {
    /// Load from YAML file
    pub fn from_yaml(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_yaml::from_str(&content)?)
    }

    /// Load from JSON file
    pub fn from_json(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Load from a `.yaml`, `.yml` or `.json` file, chosen by extension.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let signature = match path.extension().and_then(|e| e.to_str()) {
            Some("yaml" | "yml") => Self::from_yaml(path)?,
            Some("json") => Self::from_json(path)?,
            _ => {
                return Err(CrcRiskError::Config(format!(
                    "unsupported signature file {} (expected .yaml, .yml or .json)",
                    path.display()
                )))
            }
        };
        tracing::info!(
            genes = ?signature.gene_ids(),
            reference = %signature.reference_gene,
            "Loaded signature from {}",
            path.display()
        );
        Ok(signature)
    }

    pub fn gene_ids(&self) -> Vec<&str> {
        self.genes.iter().map(|g| g.gene.as_str()).collect()
    }
}

// ── Form ─────────────────────────────────────────────────────────────────────

/// Numeric entry widget settings for the input form.
/// These bound the HTML widgets only; the scorer accepts any finite value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormConfig {
    #[serde(default = "default_value")]
    pub default_value: f64,
    #[serde(default = "default_step")]
    pub step: f64,
    #[serde(default = "default_min")]
    pub min: f64,
    #[serde(default = "default_max")]
    pub max: f64,
}

fn default_value() -> f64 { 10.0 }
fn default_step()  -> f64 { 0.1 }
fn default_min()   -> f64 { 0.0 }
fn default_max()   -> f64 { 25.0 }

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            default_value: default_value(),
            step: default_step(),
            min: default_min(),
            max: default_max(),
        }
    }
}

impl FormConfig {
    pub fn validate(&self) -> Result<()> {
        if !(self.min.is_finite() && self.max.is_finite() && self.min < self.max) {
            return Err(CrcRiskError::Config(format!(
                "form bounds must be finite with min < max (got [{}, {}])",
                self.min, self.max
            )));
        }
        if !(self.step.is_finite() && self.step > 0.0) {
            return Err(CrcRiskError::Config(format!(
                "form step must be positive (got {})",
                self.step
            )));
        }
        if !(self.min..=self.max).contains(&self.default_value) {
            return Err(CrcRiskError::Config(format!(
                "form default {} lies outside [{}, {}]",
                self.default_value, self.min, self.max
            )));
        }
        Ok(())
    }
}

// ── Loading ──────────────────────────────────────────────────────────────────

impl AppConfig {
    /// Parse and validate a TOML config file. A `[signature] file` key is
    /// resolved relative to the file's directory.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let mut config = Self::parse(&content)?;
        config.resolve_signature_file(path.parent())?;
        Ok(config)
    }

    /// Parse and validate TOML text. A `[signature] file` key is resolved
    /// relative to the working directory.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let mut config = Self::parse(content)?;
        config.resolve_signature_file(None)?;
        Ok(config)
    }

    fn parse(content: &str) -> Result<Self> {
        let config: AppConfig = toml::from_str(content)?;
        config.form.validate()?;
        Ok(config)
    }

    fn resolve_signature_file(&mut self, base: Option<&Path>) -> Result<()> {
        let Some(file) = self.signature.file.clone() else {
            return Ok(());
        };
        let path = match base {
            Some(dir) if file.is_relative() => dir.join(&file),
            _ => file,
        };
        self.with_signature_file(path)
    }

    /// Replace the signature with the contents of a standalone file.
    pub fn with_signature_file(&mut self, path: impl AsRef<Path>) -> Result<()> {
        self.signature = SignatureConfig::from_file(path)?;
        Ok(())
    }

    /// Load configuration from crcrisk.toml.
    /// Checks CRCRISK_CONFIG env var first, then current directory.
    /// Falls back to built-in defaults when no file exists; a file that
    /// exists but does not parse is an error. CRCRISK_SIGNATURE, when set,
    /// replaces the signature last.
    pub fn load() -> Result<Self> {
        let path = std::env::var(CONFIG_ENV_VAR)
            .unwrap_or_else(|_| DEFAULT_CONFIG_FILE.to_string());

        let mut config = if Path::new(&path).exists() {
            tracing::info!("Loading configuration from {path}");
            Self::from_path(&path)?
        } else {
            tracing::warn!(
                "Config file not found: {path}; using built-in signature defaults. \
                 Copy crcrisk.example.toml to crcrisk.toml to override."
            );
            Self::default()
        };

        if let Ok(signature_path) = std::env::var(SIGNATURE_ENV_VAR) {
            config.with_signature_file(signature_path)?;
        }
        Ok(config)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
