//! Filesystem implementation of [`AssetLoader`].

use std::future::Future;

use lumen_app::ports::AssetLoader;
use lumen_domain::device::IconSource;
use lumen_domain::error::ResourceLoadError;

/// Serves embedded icons as-is and reads file icons with `tokio::fs`.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsAssetLoader;

impl AssetLoader for FsAssetLoader {
    fn load(
        &self,
        source: &IconSource,
    ) -> impl Future<Output = Result<Vec<u8>, ResourceLoadError>> + Send {
        let source = source.clone();
        async move {
            match source {
                IconSource::Embedded(bytes) => Ok(bytes),
                IconSource::File(path) => {
                    tokio::fs::read(&path)
                        .await
                        .map_err(|source| ResourceLoadError {
                            resource: path.display().to_string(),
                            source,
                        })
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn should_return_embedded_bytes() {
        let bytes = FsAssetLoader
            .load(&IconSource::Embedded(vec![1, 2, 3]))
            .await
            .unwrap();
        assert_eq!(bytes, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn should_read_file_icon() {
        let path = std::env::temp_dir().join(format!("lumen-icon-{}.png", std::process::id()));
        std::fs::write(&path, [0x89, b'P', b'N', b'G']).unwrap();

        let bytes = FsAssetLoader.load(&IconSource::File(path.clone())).await.unwrap();

        std::fs::remove_file(&path).unwrap();
        assert_eq!(bytes, vec![0x89, b'P', b'N', b'G']);
    }

    #[tokio::test]
    async fn should_report_missing_file() {
        let result = FsAssetLoader
            .load(&IconSource::File("/nonexistent/lumen/icon.png".into()))
            .await;

        let err = result.unwrap_err();
        assert_eq!(err.resource, "/nonexistent/lumen/icon.png");
        assert_eq!(err.source.kind(), std::io::ErrorKind::NotFound);
    }
}
