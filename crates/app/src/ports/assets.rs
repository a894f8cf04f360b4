//! Asset port: loads the bytes of resources referenced by descriptors.

use std::future::Future;

use lumen_domain::device::IconSource;
use lumen_domain::error::ResourceLoadError;

/// Loads icon bytes when a device is registered.
pub trait AssetLoader {
    /// Read the resource behind `source`.
    fn load(
        &self,
        source: &IconSource,
    ) -> impl Future<Output = Result<Vec<u8>, ResourceLoadError>> + Send;
}
