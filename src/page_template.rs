use crate::canvas::Canvas;
use crate::doc_context::DocContext;
use crate::frame::Frame;
use crate::style::ReportStyle;
use crate::types::Size;
use std::sync::Arc;

pub type OnPageCallback = Arc<dyn Fn(&mut Canvas, &DocContext) + Send + Sync>;

/// Page geometry plus the decoration stamped onto every finished page.
#[derive(Clone)]
pub struct PageTemplate {
    pub name: String,
    pub page_size: Size,
    pub style: ReportStyle,
    on_page: Option<OnPageCallback>,
}

impl PageTemplate {
    pub fn new(name: impl Into<String>, page_size: Size, style: ReportStyle) -> Self {
        Self {
            name: name.into(),
            page_size,
            style,
            on_page: None,
        }
    }

    /// Runs once per page after the whole story is laid out, so the page
    /// count in the context is final.
    pub fn set_on_page<F>(mut self, callback: F) -> Self
    where
        F: Fn(&mut Canvas, &DocContext) + Send + Sync + 'static,
    {
        self.on_page = Some(Arc::new(callback));
        self
    }

    pub fn on_page(&self) -> Option<&OnPageCallback> {
        self.on_page.as_ref()
    }

    pub fn instantiate_frame(&self, canvas: &Canvas) -> Frame {
        Frame::for_canvas(canvas, &self.style)
    }
}
