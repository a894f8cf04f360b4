//! Rendering surface port.

/// The visual representation of the light.
///
/// A surface is not safe to drive from arbitrary contexts: it is moved into
/// the single render task (see [`crate::render::spawn`]) and only ever called
/// from there, so calls never overlap.
pub trait RenderSurface: Send + 'static {
    /// Show the light as on or off.
    fn render(&mut self, on: bool);
}
