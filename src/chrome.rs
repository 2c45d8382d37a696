use crate::assets::LogoStatus;
use crate::canvas::{Canvas, TextAlign};
use crate::doc_context::DocContext;
use crate::style::ReportStyle;

/// Replaces `{page}` and `{pages}` in a label template.
pub fn substitute_placeholders(template: &str, page_number: usize, page_count: usize) -> String {
    template
        .replace("{pages}", &page_count.to_string())
        .replace("{page}", &page_number.to_string())
}

/// Header and footer drawn identically on every page. Only the page label
/// varies with the page context.
#[derive(Debug, Clone)]
pub struct PageChrome {
    pub logo: LogoStatus,
    pub title: Option<String>,
    pub subtitle: String,
    pub footer_left: String,
    pub page_label: String,
    pub style: ReportStyle,
}

impl PageChrome {
    pub fn stamp(&self, canvas: &mut Canvas, ctx: &DocContext) {
        self.draw_header(canvas);
        self.draw_footer(canvas, ctx);
    }

    pub fn draw_header(&self, canvas: &mut Canvas) {
        let header = &self.style.header;
        let margin = self.style.margin_x;
        let right = canvas.page_width() - margin;

        if let Some(logo) = self.logo.logo() {
            canvas.draw_image(
                header.logo_x,
                header.logo_y,
                header.logo_width,
                header.logo_height,
                logo.data_uri.clone(),
            );
        }
        if let Some(title) = self.title.as_deref().filter(|t| !t.is_empty()) {
            canvas.draw_text(margin, header.baseline, title, &header.title);
        }
        if !self.subtitle.is_empty() {
            canvas.draw_text_aligned(
                right,
                header.baseline,
                self.subtitle.clone(),
                &header.subtitle,
                TextAlign::Right,
            );
        }
        canvas.draw_line(
            margin,
            header.rule_y,
            right,
            header.rule_y,
            self.style.rule_width,
            header.rule_color,
        );
    }

    pub fn draw_footer(&self, canvas: &mut Canvas, ctx: &DocContext) {
        let footer = &self.style.footer;
        let margin = self.style.margin_x;
        let right = canvas.page_width() - margin;
        let rule_y = canvas.page_height() - footer.rule_from_bottom;
        let baseline = canvas.page_height() - footer.baseline_from_bottom;

        canvas.draw_line(
            margin,
            rule_y,
            right,
            rule_y,
            self.style.rule_width,
            footer.rule_color,
        );
        if !self.footer_left.is_empty() {
            canvas.draw_text(margin, baseline, self.footer_left.clone(), &footer.text);
        }
        let label = substitute_placeholders(&self.page_label, ctx.page_number, ctx.page_count);
        canvas.draw_text_aligned(right, baseline, label, &footer.text, TextAlign::Right);
    }
}
