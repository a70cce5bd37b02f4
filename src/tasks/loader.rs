use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use futures::future::BoxFuture;
use image::RgbaImage;
use image::imageops::{flip_horizontal, flip_vertical, rotate90, rotate180, rotate270};
use tokio::runtime::Handle;
use tokio::sync::mpsc::UnboundedSender;
use tracing::debug;

use crate::error::LoadError;
use crate::events::{LoadCompleted, LoadRequest, LoadedImage, Ticket};

/// Resolves a load request into decoded pixels.
pub trait Fetcher: Send + Sync + 'static {
    fn fetch(&self, request: LoadRequest) -> BoxFuture<'static, Result<LoadedImage, LoadError>>;
}

/// Decodes local files (`file://` URIs or bare paths) on the blocking pool.
#[derive(Debug, Default, Clone)]
pub struct FileFetcher {
    root: Option<PathBuf>,
}

impl FileFetcher {
    /// Resolve relative sources against `root`.
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self {
            root: Some(root.into()),
        }
    }

    fn resolve(&self, source: &str) -> Result<PathBuf, LoadError> {
        let raw = match source.split_once("://") {
            Some(("file", rest)) => rest,
            Some(_) => return Err(LoadError::UnsupportedSource(source.to_owned())),
            None => source,
        };
        let path = Path::new(raw);
        Ok(match &self.root {
            Some(root) if path.is_relative() => root.join(path),
            _ => path.to_path_buf(),
        })
    }
}

impl Fetcher for FileFetcher {
    fn fetch(&self, request: LoadRequest) -> BoxFuture<'static, Result<LoadedImage, LoadError>> {
        let resolved = self.resolve(&request.source);
        Box::pin(async move {
            let path = resolved?;
            let source = request.source.clone();
            let uri = source.clone();
            let rgba = tokio::task::spawn_blocking(move || decode_rgba8_apply_exif(&path, &uri))
                .await
                .map_err(|_| LoadError::Join(source.clone()))??;
            let (texture_width, texture_height) = rgba.dimensions();
            debug!(source = %source, texture_width, texture_height, "decoded image");
            Ok(LoadedImage {
                request,
                texture_width,
                texture_height,
                pixels: rgba.into_raw(),
            })
        })
    }
}

/// Start fetching `request` on `runtime`; the outcome arrives on `done` tagged with `ticket`.
pub fn spawn_fetch(
    runtime: &Handle,
    fetcher: Arc<dyn Fetcher>,
    ticket: Ticket,
    request: LoadRequest,
    done: UnboundedSender<LoadCompleted>,
) {
    let fut = fetcher.fetch(request);
    runtime.spawn(async move {
        let result = fut.await;
        if done.send(LoadCompleted { ticket, result }).is_err() {
            debug!(?ticket, "gallery dropped before load completed");
        }
    });
}

// Decodes to RGBA8 and applies the EXIF orientation if present.
fn decode_rgba8_apply_exif(path: &Path, source: &str) -> Result<RgbaImage, LoadError> {
    let io_err = |e: std::io::Error| LoadError::Io {
        source_uri: source.to_owned(),
        message: e.to_string(),
    };
    let img = image::ImageReader::open(path)
        .map_err(io_err)?
        .with_guessed_format()
        .map_err(io_err)?
        .decode()
        .map_err(|e| LoadError::Decode {
            source_uri: source.to_owned(),
            message: e.to_string(),
        })?
        .to_rgba8();

    Ok(match read_orientation(path).unwrap_or(1) {
        2 => flip_horizontal(&img),
        3 => rotate180(&img),
        4 => flip_vertical(&img),
        5 => flip_horizontal(&rotate90(&img)),
        6 => rotate90(&img),
        7 => flip_horizontal(&rotate270(&img)),
        8 => rotate270(&img),
        _ => img,
    })
}

fn read_orientation(path: &Path) -> Option<u16> {
    let file = File::open(path).ok()?;
    let mut buf = BufReader::new(file);
    let exif = exif::Reader::new().read_from_container(&mut buf).ok()?;
    let field = exif.get_field(exif::Tag::Orientation, exif::In::PRIMARY)?;
    field.value.get_uint(0).map(|v| v as u16)
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::Engine;

    // JPEG 2x1 with EXIF orientation 6 (rotate 90 CW), base64 encoded
    const ORIENT6_JPEG: &str = concat!(
        "/9j/4AAQSkZJRgABAQAAAQABAAD/4QAiRXhpZgAATU0AKgAAAAgAAQESAAMAAAABAAYAAAAAAAD/2wBDAAgGBgcGBQgHBwcJCQgKDBQNDAsLDBkSEw8UHRofHh0aHBwgJC4nICIsIxwcKDcpLDAxNDQ0Hyc5PTgyPC4zNDL/",
        "2wBDAQkJCQwLDBgNDRgyIRwhMjIyMjIyMjIyMjIyMjIyMjIyMjIyMjIyMjIyMjIyMjIyMjIyMjIyMjIyMjIyMjIyMjL/wAARCAABAAIDASIAAhEBAxEB/8QAHwAAAQUBAQEBAQEAAAAAAAAAAAECAwQFBgcICQoL/8QAtRAAAgEDAwIEAwUFBAQAAAF9AQIDAAQRBRIhMUEGE1FhByJxFDKBkaEII0KxwRVS0fAkM2JyggkKFhcYGRolJicoKSo0NTY3ODk6Q0RFRkdISUpTVFVWV1hZWmNkZWZnaGlqc3R1dnd4eXqDhIWGh4iJipKTlJWWl5iZmqKjpKWmp6ipqrKztLW2t7i5usLDxMXGx8jJytLT1NXW19jZ2uHi4+Tl5ufo6erx8vP09fb3+Pn6/8QAHwEAAwEBAQEBAQEBAQAAAAAAAAECAwQFBgcICQoL/8QAtREAAgECBAQDBAcFBAQAAQJ3AAECAxEEBSExBhJBUQdhcRMiMoEIFEKRobHBCSMzUvAVYnLRChYkNOEl8RcYGRomJygpKjU2Nzg5OkNERUZHSElKU1RVVldYWVpjZGVmZ2hpanN0dXZ3eHl6goOEhYaHiImKkpOUlZaXmJmaoqOkpaanqKmqsrO0tba3uLm6wsPExcbHyMnK0tPU1dbX2Nna4uPk5ebn6Onq8vP09fb3+Pn6/9oADAMBAAIRAxEAPwDi6KKK+ZP3E//Z"
    );

    #[tokio::test]
    async fn file_uri_decodes_with_orientation() {
        let bytes = base64::engine::general_purpose::STANDARD
            .decode(ORIENT6_JPEG)
            .unwrap();
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("orient6.jpg"), &bytes).unwrap();

        let fetcher = FileFetcher::with_root(dir.path());
        let loaded = fetcher
            .fetch(LoadRequest::new("file://orient6.jpg", 100, 200))
            .await
            .unwrap();
        assert_eq!((loaded.texture_width, loaded.texture_height), (1, 2));
        assert_eq!(loaded.pixels.len(), 8);
        assert_eq!((loaded.request.width, loaded.request.height), (100, 200));
    }

    #[tokio::test]
    async fn missing_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = FileFetcher::with_root(dir.path())
            .fetch(LoadRequest::new("nope.png", 1, 1))
            .await
            .unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
    }

    #[tokio::test]
    async fn remote_schemes_are_rejected() {
        let err = FileFetcher::default()
            .fetch(LoadRequest::new("https://example.com/a.png", 1, 1))
            .await
            .unwrap_err();
        assert_eq!(
            err,
            LoadError::UnsupportedSource("https://example.com/a.png".into())
        );
    }
}
