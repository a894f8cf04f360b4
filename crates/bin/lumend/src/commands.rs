//! Line commands read from stdin and their dispatch onto the light host.

use std::io::Write;
use std::ops::ControlFlow;
use std::str::FromStr;

use serde::Serialize;

use lumen_app::ports::{AssetLoader, Registry, Transport};
use lumen_app::services::light_host::LightHost;
use lumen_domain::error::LumenError;
use lumen_domain::notification::TransportState;

use crate::logging::LogControl;

/// A command of the host's command surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    ToggleTransport,
    ToggleVerbosity,
    Set(bool),
    Status,
    Quit,
}

#[derive(Debug, thiserror::Error)]
#[error("unknown command {0:?}, expected one of: toggle, verbose, on, off, status, quit")]
pub struct UnknownCommand(String);

impl FromStr for Command {
    type Err = UnknownCommand;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "toggle" => Ok(Self::ToggleTransport),
            "verbose" => Ok(Self::ToggleVerbosity),
            "on" => Ok(Self::Set(true)),
            "off" => Ok(Self::Set(false)),
            "status" => Ok(Self::Status),
            "quit" | "exit" => Ok(Self::Quit),
            other => Err(UnknownCommand(other.to_string())),
        }
    }
}

/// Snapshot printed by the `status` command.
#[derive(Debug, Serialize)]
pub struct StatusReport {
    pub identity: String,
    pub on: bool,
    pub transport: TransportState,
}

/// Run one command. User-visible feedback goes to `out`.
///
/// Commands issued before the host is bound are ignored.
pub async fn dispatch<R, T, A, W>(
    host: &LightHost<R, T, A>,
    log: Option<&LogControl>,
    command: Command,
    out: &mut W,
) -> std::io::Result<ControlFlow<()>>
where
    R: Registry,
    T: Transport,
    A: AssetLoader,
    W: Write,
{
    tracing::debug!(?command, "dispatching");
    match command {
        Command::Quit => return Ok(ControlFlow::Break(())),
        Command::ToggleVerbosity => match log.map(LogControl::toggle_verbosity) {
            Some(Ok(true)) => writeln!(out, "enabling debug logging")?,
            Some(Ok(false)) => writeln!(out, "disabling debug logging")?,
            Some(Err(err)) => writeln!(out, "error switching log level: {err}")?,
            None => writeln!(out, "log level control is not available")?,
        },
        Command::ToggleTransport => match host.toggle_transport().await {
            Ok(TransportState::Disabled) => writeln!(out, "transport disabled")?,
            Ok(TransportState::Enabled) => writeln!(out, "transport enabled")?,
            Err(err) => report(out, "error switching transport", &err)?,
        },
        Command::Set(on) => match host.set_status(on).await {
            Ok(_) => {}
            Err(err) => report(out, "error setting switch", &err)?,
        },
        Command::Status => match status(host).await {
            Ok(snapshot) => {
                serde_json::to_writer(&mut *out, &snapshot)?;
                writeln!(out)?;
            }
            Err(err) => report(out, "error reading status", &err)?,
        },
    }
    Ok(ControlFlow::Continue(()))
}

async fn status<R, T, A>(host: &LightHost<R, T, A>) -> Result<StatusReport, LumenError>
where
    R: Registry,
    T: Transport,
    A: AssetLoader,
{
    Ok(StatusReport {
        identity: host.identity().to_string(),
        on: host.status().await?,
        transport: host.transport_state().await?,
    })
}

fn report<W: Write>(out: &mut W, what: &str, err: &LumenError) -> std::io::Result<()> {
    if matches!(err, LumenError::BindingUnavailable) {
        tracing::debug!("not bound yet, command ignored");
        return Ok(());
    }
    tracing::error!(error = %err, "{what}");
    write!(out, "{what}: {err}")?;
    let mut source = std::error::Error::source(err);
    while let Some(cause) = source {
        write!(out, ": {cause}")?;
        source = cause.source();
    }
    writeln!(out)
}
