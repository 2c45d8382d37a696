use crate::error::ReportError;
use base64::Engine;
use std::future::Future;
use std::path::{Path, PathBuf};
use std::sync::Arc;

pub const DEFAULT_LOGO_LOCATION: &str = "assets/logo_pdf.png";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogoFormat {
    Png,
    Jpeg,
}

impl LogoFormat {
    /// PNG when the declared content type mentions png, JPEG otherwise.
    pub fn from_content_type(content_type: &str) -> Self {
        if content_type.to_ascii_lowercase().contains("png") {
            LogoFormat::Png
        } else {
            LogoFormat::Jpeg
        }
    }

    pub fn mime(&self) -> &'static str {
        match self {
            LogoFormat::Png => "image/png",
            LogoFormat::Jpeg => "image/jpeg",
        }
    }
}

/// Logo bytes ready to embed. `data_uri` doubles as the image resource id
/// on the canvas.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedLogo {
    pub data_uri: Arc<str>,
    pub format: LogoFormat,
}

impl DecodedLogo {
    pub fn from_bytes(bytes: &[u8], content_type: &str) -> Self {
        let format = LogoFormat::from_content_type(content_type);
        let encoded = base64::engine::general_purpose::STANDARD.encode(bytes);
        Self {
            data_uri: Arc::from(format!("data:{};base64,{}", format.mime(), encoded)),
            format,
        }
    }
}

/// Outcome of the one logo fetch made per generation. Failures are kept as
/// a reason string; the header then simply has no logo.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogoStatus {
    Loaded(DecodedLogo),
    Unavailable(String),
}

impl LogoStatus {
    pub fn logo(&self) -> Option<&DecodedLogo> {
        match self {
            LogoStatus::Loaded(logo) => Some(logo),
            LogoStatus::Unavailable(_) => None,
        }
    }

    /// Fetches and decodes the logo, turning every failure into
    /// `Unavailable` with a warning.
    pub async fn resolve<F: ResourceFetcher>(fetcher: &F, location: &str) -> Self {
        match load_logo(fetcher, location).await {
            Ok(logo) => {
                tracing::debug!(location, format = ?logo.format, "logo loaded");
                LogoStatus::Loaded(logo)
            }
            Err(err) => {
                tracing::warn!(location, error = %err, "logo unavailable, rendering without it");
                LogoStatus::Unavailable(err.to_string())
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedResource {
    pub status: u16,
    pub content_type: String,
    pub body: Vec<u8>,
}

impl FetchedResource {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Retrieves raw bytes for a resource location.
///
/// Transport failures are `ResourceUnavailable`; a response with a
/// non-success status is returned as-is and judged by the caller.
pub trait ResourceFetcher: Send + Sync {
    fn fetch(
        &self,
        location: &str,
    ) -> impl Future<Output = Result<FetchedResource, ReportError>> + Send;
}

/// Fetches and validates the logo at `location`.
pub async fn load_logo<F: ResourceFetcher>(
    fetcher: &F,
    location: &str,
) -> Result<DecodedLogo, ReportError> {
    let resource = fetcher.fetch(location).await?;
    if !resource.is_success() {
        return Err(ReportError::ResourceFetch {
            location: location.to_string(),
            status: resource.status,
        });
    }
    if resource.body.is_empty() {
        return Err(ReportError::ResourceUnavailable {
            location: location.to_string(),
            message: "empty body".to_string(),
        });
    }
    if image::guess_format(&resource.body).is_err() {
        return Err(ReportError::ResourceUnavailable {
            location: location.to_string(),
            message: "body is not a recognizable image".to_string(),
        });
    }
    Ok(DecodedLogo::from_bytes(&resource.body, &resource.content_type))
}

#[derive(Debug, Clone, Default)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

impl ResourceFetcher for HttpFetcher {
    async fn fetch(&self, location: &str) -> Result<FetchedResource, ReportError> {
        let unavailable = |err: reqwest::Error| ReportError::ResourceUnavailable {
            location: location.to_string(),
            message: err.to_string(),
        };
        let response = self.client.get(location).send().await.map_err(unavailable)?;
        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default()
            .to_string();
        let body = response.bytes().await.map_err(unavailable)?.to_vec();
        Ok(FetchedResource {
            status,
            content_type,
            body,
        })
    }
}

/// Reads resources from the local filesystem. A missing file answers 404
/// so it is reported the same way as a failed HTTP fetch.
#[derive(Debug, Clone, Default)]
pub struct FileFetcher {
    base_dir: Option<PathBuf>,
}

impl FileFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_base_dir(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: Some(base_dir.into()),
        }
    }

    fn resolve(&self, location: &str) -> PathBuf {
        let raw = location.strip_prefix("file://").unwrap_or(location);
        let path = Path::new(raw);
        match &self.base_dir {
            Some(base) if path.is_relative() => base.join(path),
            _ => path.to_path_buf(),
        }
    }
}

fn content_type_for_path(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase());
    match ext.as_deref() {
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        _ => "application/octet-stream",
    }
}

impl ResourceFetcher for FileFetcher {
    async fn fetch(&self, location: &str) -> Result<FetchedResource, ReportError> {
        let path = self.resolve(location);
        match tokio::fs::read(&path).await {
            Ok(body) => Ok(FetchedResource {
                status: 200,
                content_type: content_type_for_path(&path).to_string(),
                body,
            }),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(FetchedResource {
                status: 404,
                content_type: String::new(),
                body: Vec::new(),
            }),
            Err(err) => Err(ReportError::ResourceUnavailable {
                location: location.to_string(),
                message: err.to_string(),
            }),
        }
    }
}

/// `http://` and `https://` locations go over the network; everything else
/// is read from disk.
#[derive(Debug, Clone, Default)]
pub struct DefaultFetcher {
    http: HttpFetcher,
    file: FileFetcher,
}

impl DefaultFetcher {
    pub fn new(http: HttpFetcher, file: FileFetcher) -> Self {
        Self { http, file }
    }
}

fn is_remote(location: &str) -> bool {
    let lower = location.trim_start().to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

impl ResourceFetcher for DefaultFetcher {
    async fn fetch(&self, location: &str) -> Result<FetchedResource, ReportError> {
        if is_remote(location) {
            self.http.fetch(location).await
        } else {
            self.file.fetch(location).await
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn png_bytes() -> Vec<u8> {
        let img = image::RgbaImage::from_pixel(2, 2, image::Rgba([10, 20, 30, 255]));
        let mut out = std::io::Cursor::new(Vec::new());
        image::DynamicImage::ImageRgba8(img)
            .write_to(&mut out, image::ImageFormat::Png)
            .expect("encode png");
        out.into_inner()
    }

    pub(crate) struct StaticFetcher(pub Result<FetchedResource, u16>);

    impl ResourceFetcher for StaticFetcher {
        async fn fetch(&self, location: &str) -> Result<FetchedResource, ReportError> {
            match &self.0 {
                Ok(resource) => Ok(resource.clone()),
                Err(_) => Err(ReportError::ResourceUnavailable {
                    location: location.to_string(),
                    message: "connection refused".to_string(),
                }),
            }
        }
    }

    #[test]
    fn content_type_decides_format() {
        assert_eq!(LogoFormat::from_content_type("image/png"), LogoFormat::Png);
        assert_eq!(LogoFormat::from_content_type("IMAGE/PNG; q=1"), LogoFormat::Png);
        assert_eq!(LogoFormat::from_content_type("image/jpeg"), LogoFormat::Jpeg);
        assert_eq!(LogoFormat::from_content_type(""), LogoFormat::Jpeg);
    }

    #[tokio::test]
    async fn successful_fetch_yields_data_uri() {
        let fetcher = StaticFetcher(Ok(FetchedResource {
            status: 200,
            content_type: "image/png".to_string(),
            body: png_bytes(),
        }));
        let logo = load_logo(&fetcher, "https://example.test/logo.png")
            .await
            .expect("logo");
        assert_eq!(logo.format, LogoFormat::Png);
        assert!(logo.data_uri.starts_with("data:image/png;base64,"));
    }

    #[tokio::test]
    async fn non_success_status_is_a_fetch_error() {
        let fetcher = StaticFetcher(Ok(FetchedResource {
            status: 404,
            content_type: "text/html".to_string(),
            body: b"not found".to_vec(),
        }));
        let err = load_logo(&fetcher, "assets/logo_pdf.png")
            .await
            .expect_err("must fail");
        assert!(matches!(err, ReportError::ResourceFetch { status: 404, .. }));
        assert!(err.is_resource_failure());
    }

    #[tokio::test]
    async fn non_image_body_is_unavailable() {
        let fetcher = StaticFetcher(Ok(FetchedResource {
            status: 200,
            content_type: "image/png".to_string(),
            body: b"<html></html>".to_vec(),
        }));
        let status = LogoStatus::resolve(&fetcher, "assets/logo_pdf.png").await;
        assert!(matches!(status, LogoStatus::Unavailable(_)));
    }

    #[tokio::test]
    async fn transport_failure_degrades_to_unavailable() {
        let fetcher = StaticFetcher(Err(0));
        let status = LogoStatus::resolve(&fetcher, "https://example.test/logo.png").await;
        assert!(status.logo().is_none());
    }

    #[tokio::test]
    async fn missing_file_answers_not_found() {
        let fetcher = FileFetcher::new();
        let resource = fetcher
            .fetch("/definitely/not/here/logo_pdf.png")
            .await
            .expect("fetch");
        assert_eq!(resource.status, 404);
        let err = load_logo(&fetcher, "/definitely/not/here/logo_pdf.png")
            .await
            .expect_err("must fail");
        assert!(matches!(err, ReportError::ResourceFetch { status: 404, .. }));
    }

    #[tokio::test]
    async fn file_fetcher_reads_relative_to_base_dir() {
        let dir = std::env::temp_dir().join(format!("retorika-assets-{}", std::process::id()));
        tokio::fs::create_dir_all(&dir).await.expect("mkdir");
        tokio::fs::write(dir.join("logo.png"), png_bytes())
            .await
            .expect("write");

        let fetcher = DefaultFetcher::new(HttpFetcher::default(), FileFetcher::with_base_dir(&dir));
        let logo = load_logo(&fetcher, "logo.png").await.expect("logo");
        assert_eq!(logo.format, LogoFormat::Png);

        let _ = tokio::fs::remove_dir_all(&dir).await;
    }

    #[test]
    fn remote_detection() {
        assert!(is_remote("https://cdn.example.test/a.png"));
        assert!(is_remote("HTTP://cdn.example.test/a.png"));
        assert!(!is_remote("assets/logo_pdf.png"));
        assert!(!is_remote("file:///tmp/logo.png"));
    }
}
