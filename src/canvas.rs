use crate::error::ReportError;
use crate::font::{self, FontFace};
use crate::metrics::DocumentMetrics;
use crate::pdf::{self, PdfOptions};
use crate::types::{Color, Pt, Size};
use std::sync::Arc;

/// One atomic mark on a page. Coordinates use a top-left origin; text `y`
/// is the baseline.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Text {
        x: Pt,
        y: Pt,
        text: String,
        face: FontFace,
        size: Pt,
        color: Color,
    },
    Line {
        x1: Pt,
        y1: Pt,
        x2: Pt,
        y2: Pt,
        width: Pt,
        color: Color,
    },
    Rect {
        x: Pt,
        y: Pt,
        width: Pt,
        height: Pt,
        fill: Color,
    },
    RoundedRect {
        x: Pt,
        y: Pt,
        width: Pt,
        height: Pt,
        radius: Pt,
        fill: Color,
        stroke: Option<Color>,
    },
    // resource_id is the image source itself (a data: URI or a file path).
    Image {
        x: Pt,
        y: Pt,
        width: Pt,
        height: Pt,
        resource_id: Arc<str>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub face: FontFace,
    pub size: Pt,
    pub color: Color,
}

impl TextStyle {
    pub fn new(face: FontFace, size: f32) -> Self {
        Self {
            face,
            size: Pt::from_f32(size),
            color: Color::BLACK,
        }
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }
}

impl Default for TextStyle {
    fn default() -> Self {
        Self::new(FontFace::Helvetica, 12.0)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    pub commands: Vec<Command>,
}

impl Page {
    fn new() -> Self {
        Self {
            commands: Vec::new(),
        }
    }

    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().filter_map(|cmd| match cmd {
            Command::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub page_size: Size,
    pub pages: Vec<Page>,
}

impl Document {
    pub fn to_pdf(&self, options: &PdfOptions) -> Result<Vec<u8>, ReportError> {
        pdf::document_to_pdf(self, options)
    }

    pub fn to_pdf_with_metrics(
        &self,
        options: &PdfOptions,
    ) -> Result<(Vec<u8>, DocumentMetrics), ReportError> {
        pdf::document_to_pdf_with_metrics(self, options)
    }
}

/// Page-oriented drawing surface. A fresh canvas already holds one blank,
/// active page.
pub struct Canvas {
    page_size: Size,
    pages: Vec<Page>,
    active: usize,
}

impl Canvas {
    pub fn new(page_size: Size) -> Self {
        Self {
            page_size,
            pages: vec![Page::new()],
            active: 0,
        }
    }

    pub fn page_size(&self) -> Size {
        self.page_size
    }

    pub fn page_width(&self) -> Pt {
        self.page_size.width
    }

    pub fn page_height(&self) -> Pt {
        self.page_size.height
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn active_page(&self) -> usize {
        self.active
    }

    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    /// Appends a blank page, makes it active and returns its index.
    pub fn add_page(&mut self) -> usize {
        self.pages.push(Page::new());
        self.active = self.pages.len() - 1;
        self.active
    }

    /// Makes page `index` (0-based) active. Returns false and leaves the
    /// active page untouched when the index is out of range.
    pub fn select_page(&mut self, index: usize) -> bool {
        if index >= self.pages.len() {
            tracing::warn!(
                index,
                page_count = self.pages.len(),
                "select_page out of range"
            );
            return false;
        }
        self.active = index;
        true
    }

    pub fn measure_text_width(&self, text: &str, font_size: Pt, face: FontFace) -> Pt {
        font::measure_text_width(text, font_size, face)
    }

    pub fn wrap_text(
        &self,
        text: &str,
        max_width: Pt,
        font_size: Pt,
        face: FontFace,
    ) -> Vec<String> {
        font::wrap_text(text, max_width, font_size, face)
    }

    fn push(&mut self, command: Command) {
        self.pages[self.active].commands.push(command);
    }

    pub fn draw_text(&mut self, x: Pt, y: Pt, text: impl Into<String>, style: &TextStyle) {
        self.push(Command::Text {
            x,
            y,
            text: text.into(),
            face: style.face,
            size: style.size,
            color: style.color,
        });
    }

    /// With `TextAlign::Right`, `x` is the right edge of the rendered text.
    pub fn draw_text_aligned(
        &mut self,
        x: Pt,
        y: Pt,
        text: impl Into<String>,
        style: &TextStyle,
        align: TextAlign,
    ) {
        let text = text.into();
        let x = match align {
            TextAlign::Left => x,
            TextAlign::Right => x - font::measure_text_width(&text, style.size, style.face),
        };
        self.draw_text(x, y, text, style);
    }

    /// Draws consecutive lines starting at baseline `y`.
    pub fn draw_lines(
        &mut self,
        x: Pt,
        y: Pt,
        lines: &[String],
        line_height: Pt,
        style: &TextStyle,
    ) {
        let mut baseline = y;
        for line in lines {
            if !line.is_empty() {
                self.draw_text(x, baseline, line.clone(), style);
            }
            baseline += line_height;
        }
    }

    pub fn draw_line(&mut self, x1: Pt, y1: Pt, x2: Pt, y2: Pt, width: Pt, color: Color) {
        let width = if width < Pt::ZERO { Pt::ZERO } else { width };
        self.push(Command::Line {
            x1,
            y1,
            x2,
            y2,
            width,
            color,
        });
    }

    pub fn draw_rect(&mut self, x: Pt, y: Pt, width: Pt, height: Pt, fill: Color) {
        self.push(Command::Rect {
            x,
            y,
            width: width.max(Pt::ZERO),
            height: height.max(Pt::ZERO),
            fill,
        });
    }

    #[allow(clippy::too_many_arguments)]
    pub fn draw_rounded_rect(
        &mut self,
        x: Pt,
        y: Pt,
        width: Pt,
        height: Pt,
        radius: Pt,
        fill: Color,
        stroke: Option<Color>,
    ) {
        self.push(Command::RoundedRect {
            x,
            y,
            width: width.max(Pt::ZERO),
            height: height.max(Pt::ZERO),
            radius: radius.max(Pt::ZERO),
            fill,
            stroke,
        });
    }

    pub fn draw_image(&mut self, x: Pt, y: Pt, width: Pt, height: Pt, resource_id: Arc<str>) {
        self.push(Command::Image {
            x,
            y,
            width,
            height,
            resource_id,
        });
    }

    pub fn finish(self) -> Document {
        Document {
            page_size: self.page_size,
            pages: self.pages,
        }
    }

    pub fn export(&self, options: &PdfOptions) -> Result<Vec<u8>, ReportError> {
        let document = Document {
            page_size: self.page_size,
            pages: self.pages.clone(),
        };
        document.to_pdf(options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pt(v: f32) -> Pt {
        Pt::from_f32(v)
    }

    #[test]
    fn fresh_canvas_has_one_active_page() {
        let canvas = Canvas::new(Size::a4());
        assert_eq!(canvas.page_count(), 1);
        assert_eq!(canvas.active_page(), 0);
    }

    #[test]
    fn draws_land_on_the_selected_page() {
        let mut canvas = Canvas::new(Size::a4());
        assert_eq!(canvas.add_page(), 1);
        canvas.draw_text(pt(40.0), pt(90.0), "segunda", &TextStyle::default());
        assert!(canvas.select_page(0));
        canvas.draw_rect(pt(0.0), pt(0.0), pt(10.0), pt(10.0), Color::BLACK);

        assert!(!canvas.select_page(7));
        assert_eq!(canvas.active_page(), 0);

        let doc = canvas.finish();
        assert_eq!(doc.pages[0].commands.len(), 1);
        assert!(matches!(doc.pages[0].commands[0], Command::Rect { .. }));
        assert_eq!(doc.pages[1].texts().collect::<Vec<_>>(), vec!["segunda"]);
    }

    #[test]
    fn right_aligned_text_ends_at_x() {
        let mut canvas = Canvas::new(Size::a4());
        let style = TextStyle::new(FontFace::Helvetica, 10.0);
        canvas.draw_text_aligned(pt(555.28), pt(58.0), "abc", &style, TextAlign::Right);
        let width = canvas.measure_text_width("abc", style.size, style.face);
        match &canvas.pages()[0].commands[0] {
            Command::Text { x, .. } => assert_eq!(*x + width, pt(555.28)),
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn negative_sizes_are_clamped() {
        let mut canvas = Canvas::new(Size::a4());
        canvas.draw_rounded_rect(
            pt(0.0),
            pt(0.0),
            pt(-5.0),
            pt(10.0),
            pt(5.0),
            Color::BLACK,
            None,
        );
        match &canvas.pages()[0].commands[0] {
            Command::RoundedRect { width, .. } => assert_eq!(*width, Pt::ZERO),
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn export_serializes_every_page_without_consuming_the_canvas() {
        let mut canvas = Canvas::new(Size::a4());
        canvas.draw_text(pt(40.0), pt(90.0), "primera", &TextStyle::default());
        canvas.add_page();
        canvas.draw_text(pt(40.0), pt(90.0), "segunda", &TextStyle::default());

        let bytes = canvas.export(&PdfOptions::default()).expect("export");
        assert!(bytes.starts_with(b"%PDF-"));
        let parsed = lopdf::Document::load_mem(&bytes).expect("lopdf parse");
        assert_eq!(parsed.get_pages().len(), 2);
        assert_eq!(canvas.page_count(), 2);
    }
}
