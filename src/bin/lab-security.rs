// Copyright (c) 2025 - Cowboy AI, Inc.
//! Security Lab CLI
//!
//! Composes the audit stack and prints its rendered template to stdout.
//!
//! Run with: cargo run --bin lab-security

use anyhow::{Context, Result};
use tracing::info;
use wa_handson::app::{App, AppProps};
use wa_handson::labs;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut app = App::new(AppProps::default());
    let name = labs::security::build(&mut app).context("Failed to compose the lab stack")?;
    info!("🚀 Synthesizing {}", name);

    let assembly = app.synth().context("Synthesis failed")?;
    let template = assembly
        .template(&name)
        .with_context(|| format!("Template '{}' missing from assembly", name))?;

    println!("{}", template.to_json_pretty()?);
    info!("✅ Rendered {} resources", template.resources.len());
    Ok(())
}
