//! Console implementation of [`RenderSurface`].

use std::io::Write;

use lumen_app::ports::RenderSurface;

/// Background colour of a lit bulb.
const ON_COLOR: &str = "#9EC942";
const OFF_COLOR: &str = "#FFFFFF";

/// Writes one line per frame, e.g. `[light on ] Kitchen Light (#9EC942)`.
pub struct ConsoleSurface<W> {
    label: String,
    out: W,
}

impl ConsoleSurface<std::io::Stdout> {
    /// A surface printing to standard output.
    #[must_use]
    pub fn stdout(label: impl Into<String>) -> Self {
        Self::new(label, std::io::stdout())
    }
}

impl<W: Write> ConsoleSurface<W> {
    pub fn new(label: impl Into<String>, out: W) -> Self {
        Self {
            label: label.into(),
            out,
        }
    }

    /// Give back the writer.
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write + Send + 'static> RenderSurface for ConsoleSurface<W> {
    fn render(&mut self, on: bool) {
        let (state, color) = if on { ("on ", ON_COLOR) } else { ("off", OFF_COLOR) };
        if let Err(err) = writeln!(self.out, "[light {state}] {} ({color})", self.label)
            .and_then(|()| self.out.flush())
        {
            tracing::warn!(error = %err, "failed to render frame");
        }
    }
}
