//! Shared application state for the web server.

use std::sync::Arc;

use anyhow::Context;
use minijinja::Environment;

use crcrisk_common::{AppConfig, FormConfig};
use crcrisk_scorer::GeneSignature;

/// Shared state injected into every Axum handler. Read-only after startup.
pub struct AppState {
    pub signature: GeneSignature,
    pub form: FormConfig,
    pub static_dir: String,
    pub templates: Environment<'static>,
}

impl AppState {
    pub fn new(config: &AppConfig) -> anyhow::Result<Self> {
        let signature = GeneSignature::from_config(&config.signature)
            .context("invalid [signature] section")?;
        config.form.validate().context("invalid [form] section")?;

        Ok(Self {
            signature,
            form: config.form.clone(),
            static_dir: config.server.static_dir.clone(),
            templates: build_templates()?,
        })
    }
}

/// Templates are compiled into the binary.
fn build_templates() -> anyhow::Result<Environment<'static>> {
    let mut env = Environment::new();
    env.add_template("base.html", include_str!("../templates/base.html"))?;
    env.add_template("index.html", include_str!("../templates/index.html"))?;
    Ok(env)
}

pub type SharedState = Arc<AppState>;
