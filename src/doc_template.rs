use crate::canvas::{Canvas, Document};
use crate::doc_context::DocContext;
use crate::error::ReportError;
use crate::flowable::Flowable;
use crate::page_template::PageTemplate;

/// Lays out a story of flowables across as many pages as needed, then
/// stamps every page through the template's page callback.
pub struct DocTemplate {
    page_template: PageTemplate,
    story: Vec<Box<dyn Flowable>>,
}

impl DocTemplate {
    pub fn new(page_template: PageTemplate) -> Self {
        Self {
            page_template,
            story: Vec::new(),
        }
    }

    pub fn add_flowable(&mut self, flowable: Box<dyn Flowable>) {
        self.story.push(flowable);
    }

    pub fn extend<I>(&mut self, flowables: I)
    where
        I: IntoIterator<Item = Box<dyn Flowable>>,
    {
        self.story.extend(flowables);
    }

    pub fn build(self) -> Result<Document, ReportError> {
        let canvas = self.layout()?;
        Ok(self.stamp(canvas).finish())
    }

    /// First pass: places the story. The page count is final afterwards.
    fn layout(&self) -> Result<Canvas, ReportError> {
        let template = &self.page_template;
        let mut canvas = Canvas::new(template.page_size);
        let mut frame = template.instantiate_frame(&canvas);
        if frame.bottom() <= frame.top() {
            return Err(ReportError::InvalidConfiguration(format!(
                "page height {} leaves no room between content top {} and footer reserve {}",
                template.page_size.height.to_f32(),
                template.style.content_top.to_f32(),
                template.style.footer_reserve.to_f32(),
            )));
        }
        if frame.width() <= crate::types::Pt::ZERO {
            return Err(ReportError::InvalidConfiguration(format!(
                "page width {} leaves no content width",
                template.page_size.width.to_f32()
            )));
        }

        for flowable in &self.story {
            frame.place(flowable.as_ref(), &mut canvas, &template.style);
        }
        tracing::debug!(
            template = %template.name,
            flowables = self.story.len(),
            pages = canvas.page_count(),
            "story laid out"
        );
        Ok(canvas)
    }

    /// Second pass: revisits each page in order with the final total.
    fn stamp(&self, mut canvas: Canvas) -> Canvas {
        let Some(callback) = self.page_template.on_page() else {
            return canvas;
        };
        let page_count = canvas.page_count();
        for index in 0..page_count {
            if !canvas.select_page(index) {
                continue;
            }
            let ctx = DocContext::new(index + 1, page_count, &self.page_template.name);
            callback(&mut canvas, &ctx);
        }
        canvas
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::TextStyle;
    use crate::flowable::{Paragraph, SectionTitle};
    use crate::style::ReportStyle;
    use crate::types::{Pt, Size};
    use std::sync::{Arc, Mutex};

    fn template() -> PageTemplate {
        PageTemplate::new("report", Size::a4(), ReportStyle::default())
    }

    #[test]
    fn empty_story_still_has_one_page() {
        let doc = DocTemplate::new(template()).build().expect("build");
        assert_eq!(doc.pages.len(), 1);
    }

    #[test]
    fn callback_sees_every_page_with_final_total() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let template = template().set_on_page(move |canvas, ctx| {
            sink.lock()
                .expect("lock")
                .push((canvas.active_page(), ctx.page_number, ctx.page_count));
            canvas.draw_text(
                Pt::from_i32(40),
                Pt::from_i32(20),
                format!("{}/{}", ctx.page_number, ctx.page_count),
                &TextStyle::default(),
            );
        });

        let mut doc = DocTemplate::new(template);
        for i in 0..40 {
            doc.add_flowable(Box::new(SectionTitle::new(format!("Sección {i}"))));
        }
        let document = doc.build().expect("build");
        let pages = document.pages.len();
        assert!(pages >= 2);

        let seen = seen.lock().expect("lock").clone();
        let expected: Vec<_> = (0..pages).map(|i| (i, i + 1, pages)).collect();
        assert_eq!(seen, expected);
        for (i, page) in document.pages.iter().enumerate() {
            let stamp = format!("{}/{}", i + 1, pages);
            assert!(page.texts().any(|t| t == stamp));
        }
    }

    #[test]
    fn blocks_never_cross_the_footer_reserve() {
        let style = ReportStyle::default();
        let bottom = Size::a4().height - style.footer_reserve;
        let mut doc = DocTemplate::new(template());
        for _ in 0..12 {
            doc.add_flowable(Box::new(Paragraph::new("texto de relleno ".repeat(30))));
        }
        let document = doc.build().expect("build");
        assert!(document.pages.len() > 1);
        for page in &document.pages {
            for command in &page.commands {
                if let crate::canvas::Command::Text { y, .. } = command {
                    assert!(*y <= bottom);
                }
            }
        }
    }

    #[test]
    fn page_too_short_is_rejected() {
        let template = PageTemplate::new(
            "tiny",
            Size {
                width: Pt::from_i32(300),
                height: Pt::from_i32(150),
            },
            ReportStyle::default(),
        );
        let err = DocTemplate::new(template).build().expect_err("must fail");
        assert!(matches!(err, ReportError::InvalidConfiguration(_)));
    }
}
