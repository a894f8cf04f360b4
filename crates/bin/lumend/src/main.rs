//! # lumend: binary light daemon
//!
//! Composition root that wires the local adapters into the light host and
//! reads commands from stdin.
//!
//! ## Responsibilities
//! - Load configuration (`lumen.toml`, env vars)
//! - Install the `tracing` subscriber with a live verbosity switch
//! - Build the device descriptor and a fresh identity
//! - Construct the adapters and start the render task
//! - Connect the host, then dispatch stdin commands until `quit`, EOF or
//!   Ctrl-C
//! - Disconnect and unregister on the way out
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer; no domain logic belongs here.

mod commands;
mod config;
mod logging;

use std::sync::Arc;

use anyhow::Context;
use tokio::io::{AsyncBufReadExt, BufReader};

use lumen_adapter_local::{ConsoleSurface, FsAssetLoader, InMemoryRegistry, LoopbackTransport};
use lumen_app::render;
use lumen_app::services::light_host::{LightHost, LightSpec};
use lumen_domain::id::Udn;
use lumen_domain::service::ServiceDescriptor;

use crate::commands::Command;
use crate::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load().context("loading configuration")?;
    let log = logging::init(&config.logging).context("installing logger")?;

    let descriptor = config
        .device
        .descriptor()
        .context("building device descriptor")?;
    let spec = LightSpec {
        identity: Udn::new(),
        descriptor,
        service: ServiceDescriptor::switch_power(),
    };
    tracing::info!(
        identity = %spec.identity,
        friendly_name = %spec.descriptor.details.friendly_name,
        "starting, identity is regenerated on every start"
    );

    // Adapters
    let registry = Arc::new(InMemoryRegistry::new());
    let transport = Arc::new(LoopbackTransport::new(config.transport.enabled));
    let (render, render_task) = render::spawn(ConsoleSurface::stdout(
        spec.descriptor.details.friendly_name.clone(),
    ));

    let host = LightHost::new(spec, registry, transport, FsAssetLoader, render);
    if let Err(err) = host.on_connected().await {
        tracing::error!(error = %err, "failed to connect, commands will be ignored");
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut out = std::io::stdout();
    loop {
        let line = tokio::select! {
            line = lines.next_line() => line.context("reading stdin")?,
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("interrupted");
                break;
            }
        };
        let Some(line) = line else {
            tracing::debug!("stdin closed");
            break;
        };
        if line.trim().is_empty() {
            continue;
        }
        match line.parse::<Command>() {
            Ok(command) => {
                let flow = commands::dispatch(&host, Some(&log), command, &mut out).await?;
                if flow.is_break() {
                    break;
                }
            }
            Err(err) => eprintln!("{err}"),
        }
    }

    host.shutdown().await.context("shutting down")?;
    drop(host);
    render_task.await.context("waiting for render task")?;
    tracing::info!("stopped");
    Ok(())
}
