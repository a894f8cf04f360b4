//! Port definitions: traits that adapters implement.
//!
//! Ports are the boundaries between the lifecycle core and its external
//! collaborators: the device registry, the network transport, the rendering
//! surface, and asset loading. They are defined here (in `app`) so that both
//! the use-case layer and the adapter layer can depend on them without
//! creating circular dependencies.

pub mod assets;
pub mod registry;
pub mod render;
pub mod transport;

pub use assets::AssetLoader;
pub use registry::Registry;
pub use render::RenderSurface;
pub use transport::Transport;
