use crate::assets::LogoStatus;
use crate::canvas::Document;
use crate::chrome::PageChrome;
use crate::color::{color_for, hex_to_color, label_for};
use crate::doc_template::DocTemplate;
use crate::error::ReportError;
use crate::flowable::{Flowable, InfoBox, Paragraph, PercentBar, SectionTitle, StyleLine};
use crate::page_template::PageTemplate;
use crate::style::{ReportLabels, ReportStyle};
use crate::types::Size;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt::Write as _;

/// Result payload as served by the questionnaire API.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultResponse {
    #[serde(default)]
    pub submission_id: Option<i64>,
    /// Keys keep the order they have in the payload.
    #[serde(default)]
    pub percentages: Map<String, Value>,
    #[serde(default)]
    pub dominant_style: String,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub extra_info: Option<BTreeMap<String, String>>,
    /// Shape varies between API versions; normalized in `ReportInput`.
    #[serde(default)]
    pub info_blocks: Value,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RecommendationBlock {
    pub title: Option<String>,
    pub body: String,
}

impl RecommendationBlock {
    pub fn new(title: Option<String>, body: impl Into<String>) -> Self {
        Self {
            title,
            body: body.into(),
        }
    }

    /// The block title, or `default` when it is missing or blank.
    pub fn title_or<'a>(&'a self, default: &'a str) -> &'a str {
        match self.title.as_deref() {
            Some(title) if !title.trim().is_empty() => title,
            _ => default,
        }
    }

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Null => None,
            Value::String(body) => Some(Self::new(None, body.clone())),
            Value::Object(map) => {
                let title = map.get("title").and_then(scalar_text);
                let body = map
                    .get("text")
                    .or_else(|| map.get("body"))
                    .and_then(scalar_text)
                    .unwrap_or_default();
                Some(Self::new(title, body))
            }
            _ => Some(Self::default()),
        }
    }
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn percentage_value(value: &Value) -> f64 {
    match value {
        Value::Number(n) => n.as_f64().unwrap_or(f64::NAN),
        Value::String(s) => match s.trim() {
            "" => 0.0,
            text => text.parse().unwrap_or(f64::NAN),
        },
        Value::Bool(b) => f64::from(u8::from(*b)),
        Value::Null => 0.0,
        _ => f64::NAN,
    }
}

/// Normalized, read-only data the layout consumes.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportInput {
    pub dominant_style: String,
    /// Style key and value, in payload order. Bars render in this order.
    pub percentages: Vec<(String, f64)>,
    pub blocks: Vec<RecommendationBlock>,
    pub summary: Option<String>,
    pub submission_id: Option<i64>,
    pub generated_at: NaiveDateTime,
}

impl ReportInput {
    pub fn new(
        dominant_style: impl Into<String>,
        percentages: Vec<(String, f64)>,
        blocks: Vec<RecommendationBlock>,
        generated_at: NaiveDateTime,
    ) -> Self {
        Self {
            dominant_style: dominant_style.into(),
            percentages,
            blocks,
            summary: None,
            submission_id: None,
            generated_at,
        }
    }

    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = Some(summary.into());
        self
    }

    pub fn from_response(response: ResultResponse, generated_at: NaiveDateTime) -> Self {
        let percentages = response
            .percentages
            .iter()
            .map(|(key, value)| (key.clone(), percentage_value(value)))
            .collect();
        let blocks = match &response.info_blocks {
            Value::Array(items) => items
                .iter()
                .filter_map(RecommendationBlock::from_value)
                .collect(),
            _ => Vec::new(),
        };
        Self {
            dominant_style: response.dominant_style,
            percentages,
            blocks,
            summary: response.summary.filter(|s| !s.trim().is_empty()),
            submission_id: response.submission_id,
            generated_at,
        }
    }

    pub fn from_json(json: &str, generated_at: NaiveDateTime) -> Result<Self, ReportError> {
        let response: ResultResponse = serde_json::from_str(json)?;
        Ok(Self::from_response(response, generated_at))
    }
}

/// Everything the layout needs besides the input and the logo.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportConfig {
    pub page_size: Size,
    pub style: ReportStyle,
    pub labels: ReportLabels,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            page_size: Size::a4(),
            style: ReportStyle::default(),
            labels: ReportLabels::default(),
        }
    }
}

/// Blocks of the report body, in reading order.
pub fn build_story(input: &ReportInput, labels: &ReportLabels) -> Vec<Box<dyn Flowable>> {
    let mut story: Vec<Box<dyn Flowable>> = Vec::new();
    story.push(Box::new(SectionTitle::new(labels.report_title.clone())));
    story.push(Box::new(StyleLine::new(
        labels.dominant_prefix.clone(),
        label_for(&input.dominant_style),
        hex_to_color(color_for(&input.dominant_style)),
    )));
    if let Some(summary) = input.summary.as_deref().filter(|s| !s.trim().is_empty()) {
        story.push(Box::new(Paragraph::new(summary)));
    }

    story.push(Box::new(SectionTitle::new(labels.percentages_title.clone())));
    for (key, value) in &input.percentages {
        story.push(Box::new(PercentBar::new(
            label_for(key),
            *value,
            hex_to_color(color_for(key)),
        )));
    }

    if !input.blocks.is_empty() {
        story.push(Box::new(SectionTitle::new(
            labels.recommendations_title.clone(),
        )));
        for block in &input.blocks {
            story.push(Box::new(InfoBox::new(
                block.title_or(&labels.default_block_title),
                block.body.clone(),
            )));
        }
    }
    story
}

pub fn format_timestamp(at: &NaiveDateTime, format: &str) -> Result<String, ReportError> {
    let mut out = String::new();
    write!(out, "{}", at.format(format)).map_err(|_| {
        ReportError::InvalidConfiguration(format!("invalid timestamp format {format:?}"))
    })?;
    Ok(out)
}

/// Lays out the story and stamps header and footer on every page.
pub fn render_document(
    input: &ReportInput,
    logo: LogoStatus,
    config: &ReportConfig,
) -> Result<Document, ReportError> {
    let labels = &config.labels;
    let chrome = PageChrome {
        logo,
        title: labels.header_title.clone(),
        subtitle: format_timestamp(&input.generated_at, &labels.timestamp_format)?,
        footer_left: labels.footer_left.clone(),
        page_label: labels.page_label.clone(),
        style: config.style.clone(),
    };
    let template = PageTemplate::new("report", config.page_size, config.style.clone())
        .set_on_page(move |canvas, ctx| chrome.stamp(canvas, ctx));

    let mut doc = DocTemplate::new(template);
    doc.extend(build_story(input, labels));
    doc.build()
}
