mod assets;
mod canvas;
mod chrome;
mod color;
mod doc_context;
mod doc_template;
mod error;
mod flowable;
mod font;
mod frame;
mod metrics;
mod page_template;
mod pdf;
mod report;
mod style;
mod types;

pub use assets::{
    DEFAULT_LOGO_LOCATION, DecodedLogo, DefaultFetcher, FetchedResource, FileFetcher,
    HttpFetcher, LogoFormat, LogoStatus, ResourceFetcher, load_logo,
};
pub use canvas::{Canvas, Command, Document, Page, TextAlign, TextStyle};
pub use chrome::{PageChrome, substitute_placeholders};
pub use color::{CommunicationStyle, FALLBACK_COLOR, color_for, hex_to_color, hex_to_rgb, label_for};
pub use doc_context::DocContext;
pub use doc_template::DocTemplate;
pub use error::ReportError;
pub use flowable::{
    Flowable, InfoBox, Paragraph, PercentBar, SectionTitle, StyleLine, format_percent,
};
pub use font::{FontFace, measure_text_width, wrap_text};
pub use frame::{Frame, LayoutCursor};
pub use metrics::{DocumentMetrics, PageMetrics};
pub use page_template::{OnPageCallback, PageTemplate};
pub use pdf::{PdfOptions, document_to_pdf, document_to_pdf_with_metrics};
pub use report::{
    RecommendationBlock, ReportConfig, ReportInput, ResultResponse, build_story,
    format_timestamp, render_document,
};
pub use style::{FooterStyle, HeaderStyle, ReportLabels, ReportStyle};
pub use types::{Color, Pt, Size};

use chrono::format::{Item, StrftimeItems};
use std::path::{Path, PathBuf};

pub const DEFAULT_FILE_NAME: &str = "retorika-informe.pdf";

/// Renders questionnaire results into paginated PDF reports.
///
/// The only asynchronous step is the logo fetch; layout, stamping and
/// serialization run synchronously afterwards. `generate` takes `&mut self`
/// so one engine never runs two generations at once.
pub struct ReportEngine<F = DefaultFetcher> {
    config: ReportConfig,
    logo_location: Option<String>,
    file_name: String,
    fetcher: F,
    pdf_options: PdfOptions,
    last_metrics: Option<DocumentMetrics>,
}

impl ReportEngine<DefaultFetcher> {
    pub fn builder() -> ReportEngineBuilder<DefaultFetcher> {
        ReportEngineBuilder::new()
    }
}

impl<F: ResourceFetcher> ReportEngine<F> {
    pub fn config(&self) -> &ReportConfig {
        &self.config
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn logo_location(&self) -> Option<&str> {
        self.logo_location.as_deref()
    }

    /// Metrics of the most recent successful generation.
    pub fn last_metrics(&self) -> Option<&DocumentMetrics> {
        self.last_metrics.as_ref()
    }

    pub async fn resolve_logo(&self) -> LogoStatus {
        match self.logo_location.as_deref() {
            Some(location) => LogoStatus::resolve(&self.fetcher, location).await,
            None => LogoStatus::Unavailable("no logo configured".to_string()),
        }
    }

    /// Lays out, stamps and serializes `input` with an already resolved logo.
    pub fn render_pdf(
        &self,
        input: &ReportInput,
        logo: LogoStatus,
    ) -> Result<(Vec<u8>, DocumentMetrics), ReportError> {
        let document = render_document(input, logo, &self.config)?;
        let mut options = self.pdf_options.clone();
        if options.title.is_none() {
            options.title = Some(self.config.labels.report_title.clone());
        }
        options.creation_date = Some(input.generated_at);
        document.to_pdf_with_metrics(&options)
    }

    pub async fn generate(&mut self, input: &ReportInput) -> Result<Vec<u8>, ReportError> {
        let logo = self.resolve_logo().await;
        let (bytes, metrics) = self.render_pdf(input, logo)?;
        tracing::debug!(
            pages = metrics.pages.len(),
            bytes = bytes.len(),
            submission_id = ?input.submission_id,
            "report generated"
        );
        self.last_metrics = Some(metrics);
        Ok(bytes)
    }

    /// Generates the report and writes it to `path`. Nothing is written
    /// unless export succeeded.
    pub async fn save(
        &mut self,
        input: &ReportInput,
        path: impl AsRef<Path>,
    ) -> Result<PathBuf, ReportError> {
        let path = path.as_ref().to_path_buf();
        let bytes = self.generate(input).await?;
        tokio::fs::write(&path, &bytes).await?;
        tracing::info!(
            path = %path.display(),
            bytes = bytes.len(),
            pages = self.last_metrics.as_ref().map(|m| m.pages.len()).unwrap_or(0),
            "report saved"
        );
        Ok(path)
    }

    /// Saves under the configured file name inside `dir`.
    pub async fn save_in(
        &mut self,
        input: &ReportInput,
        dir: impl AsRef<Path>,
    ) -> Result<PathBuf, ReportError> {
        let path = dir.as_ref().join(&self.file_name);
        self.save(input, path).await
    }
}

#[derive(Clone)]
pub struct ReportEngineBuilder<F = DefaultFetcher> {
    config: ReportConfig,
    logo_location: Option<String>,
    file_name: String,
    fetcher: F,
    pdf_options: PdfOptions,
}

impl ReportEngineBuilder<DefaultFetcher> {
    pub fn new() -> Self {
        Self {
            config: ReportConfig::default(),
            logo_location: Some(DEFAULT_LOGO_LOCATION.to_string()),
            file_name: DEFAULT_FILE_NAME.to_string(),
            fetcher: DefaultFetcher::default(),
            pdf_options: PdfOptions::default(),
        }
    }
}

impl Default for ReportEngineBuilder<DefaultFetcher> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: ResourceFetcher> ReportEngineBuilder<F> {
    pub fn page_size(mut self, size: Size) -> Self {
        self.config.page_size = size;
        self
    }

    pub fn style(mut self, style: ReportStyle) -> Self {
        self.config.style = style;
        self
    }

    pub fn labels(mut self, labels: ReportLabels) -> Self {
        self.config.labels = labels;
        self
    }

    pub fn logo_location(mut self, location: impl Into<String>) -> Self {
        self.logo_location = Some(location.into());
        self
    }

    pub fn without_logo(mut self) -> Self {
        self.logo_location = None;
        self
    }

    pub fn file_name(mut self, name: impl Into<String>) -> Self {
        self.file_name = name.into();
        self
    }

    pub fn pdf_options(mut self, options: PdfOptions) -> Self {
        self.pdf_options = options;
        self
    }

    pub fn fetcher<G: ResourceFetcher>(self, fetcher: G) -> ReportEngineBuilder<G> {
        ReportEngineBuilder {
            config: self.config,
            logo_location: self.logo_location,
            file_name: self.file_name,
            fetcher,
            pdf_options: self.pdf_options,
        }
    }

    pub fn build(self) -> Result<ReportEngine<F>, ReportError> {
        validate_config(&self.config)?;
        if self.file_name.trim().is_empty() {
            return Err(ReportError::InvalidConfiguration(
                "file_name must not be empty".to_string(),
            ));
        }
        Ok(ReportEngine {
            config: self.config,
            logo_location: self.logo_location,
            file_name: self.file_name,
            fetcher: self.fetcher,
            pdf_options: self.pdf_options,
            last_metrics: None,
        })
    }
}

fn validate_config(config: &ReportConfig) -> Result<(), ReportError> {
    let size = config.page_size;
    let style = &config.style;
    if size.width <= Pt::ZERO || size.height <= Pt::ZERO {
        return Err(ReportError::InvalidConfiguration(
            "page size must be positive".to_string(),
        ));
    }
    if style.content_top + style.footer_reserve >= size.height {
        return Err(ReportError::InvalidConfiguration(format!(
            "page height {} is too short for content top {} plus footer reserve {}",
            size.height.to_f32(),
            style.content_top.to_f32(),
            style.footer_reserve.to_f32()
        )));
    }
    if style.content_width(size.width) <= style.box_padding * 2 {
        return Err(ReportError::InvalidConfiguration(format!(
            "page width {} leaves no room for content",
            size.width.to_f32()
        )));
    }
    let format = &config.labels.timestamp_format;
    if StrftimeItems::new(format).any(|item| matches!(item, Item::Error)) {
        return Err(ReportError::InvalidConfiguration(format!(
            "invalid timestamp format {format:?}"
        )));
    }
    Ok(())
}
