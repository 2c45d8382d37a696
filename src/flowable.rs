use crate::canvas::{Canvas, TextStyle};
use crate::font::FontFace;
use crate::style::ReportStyle;
use crate::types::{Color, Pt};

/// A block of report content that knows its height before it is drawn.
///
/// `wrap` is the space the block needs below the cursor; the frame breaks
/// the page when that space is not available. `advance` is how far the
/// cursor moves after drawing and defaults to the wrapped height. `draw`
/// receives the top-left corner chosen by the frame, where `y` is the
/// first baseline.
///
/// `split` lets a block taller than a whole page continue on the next one:
/// it returns a head that fits in `avail_height` and the remaining tail.
pub trait Flowable: Send + Sync {
    fn wrap(&self, canvas: &Canvas, style: &ReportStyle, avail_width: Pt) -> Pt;

    fn advance(&self, canvas: &Canvas, style: &ReportStyle, avail_width: Pt) -> Pt {
        self.wrap(canvas, style, avail_width)
    }

    fn draw(&self, canvas: &mut Canvas, style: &ReportStyle, x: Pt, y: Pt, avail_width: Pt);

    fn split(
        &self,
        _canvas: &Canvas,
        _style: &ReportStyle,
        _avail_width: Pt,
        _avail_height: Pt,
    ) -> Option<(Box<dyn Flowable>, Box<dyn Flowable>)> {
        None
    }

    fn debug_name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

fn lines_height(count: usize, line_height: Pt) -> Pt {
    line_height * count as i32
}

/// Whole lines of `line_height` that fit in `space`.
fn lines_fitting(space: Pt, line_height: Pt) -> usize {
    let step = line_height.to_milli_i64();
    if step <= 0 || space <= Pt::ZERO {
        return 0;
    }
    (space.to_milli_i64() / step) as usize
}

/// Bold heading followed by a full-width divider.
#[derive(Debug, Clone, PartialEq)]
pub struct SectionTitle {
    pub text: String,
}

impl SectionTitle {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

impl Flowable for SectionTitle {
    fn wrap(&self, _canvas: &Canvas, style: &ReportStyle, _avail_width: Pt) -> Pt {
        style.heading_height
    }

    fn draw(&self, canvas: &mut Canvas, style: &ReportStyle, x: Pt, y: Pt, avail_width: Pt) {
        canvas.draw_text(x, y, self.text.clone(), &style.heading);
        let rule_y = y + style.heading_rule_offset;
        canvas.draw_line(
            x,
            rule_y,
            x + avail_width,
            rule_y,
            style.rule_width,
            style.heading_rule_color,
        );
    }

    fn debug_name(&self) -> &'static str {
        "SectionTitle"
    }
}

/// Body text wrapped to the content width.
#[derive(Debug, Clone, PartialEq)]
pub struct Paragraph {
    pub text: String,
}

impl Paragraph {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    fn lines(&self, canvas: &Canvas, style: &ReportStyle, avail_width: Pt) -> Vec<String> {
        canvas.wrap_text(&self.text, avail_width, style.body.size, style.body.face)
    }
}

impl Flowable for Paragraph {
    fn wrap(&self, canvas: &Canvas, style: &ReportStyle, avail_width: Pt) -> Pt {
        let count = self.lines(canvas, style, avail_width).len();
        lines_height(count, style.line_height) + style.paragraph_spacing
    }

    fn draw(&self, canvas: &mut Canvas, style: &ReportStyle, x: Pt, y: Pt, avail_width: Pt) {
        let lines = self.lines(canvas, style, avail_width);
        canvas.draw_lines(x, y, &lines, style.line_height, &style.body);
    }

    fn split(
        &self,
        canvas: &Canvas,
        style: &ReportStyle,
        avail_width: Pt,
        avail_height: Pt,
    ) -> Option<(Box<dyn Flowable>, Box<dyn Flowable>)> {
        let lines = self.lines(canvas, style, avail_width);
        let keep = lines_fitting(avail_height - style.paragraph_spacing, style.line_height);
        if keep == 0 || keep >= lines.len() {
            return None;
        }
        let head = Paragraph::new(lines[..keep].join("\n"));
        let tail = Paragraph::new(lines[keep..].join("\n"));
        Some((Box::new(head), Box::new(tail)))
    }

    fn debug_name(&self) -> &'static str {
        "Paragraph"
    }
}

/// Rounded, filled box holding a bold title and wrapped body text.
#[derive(Debug, Clone, PartialEq)]
pub struct InfoBox {
    pub title: String,
    pub body: String,
}

struct InfoBoxLayout {
    title_lines: Vec<String>,
    body_lines: Vec<String>,
    box_height: Pt,
}

impl InfoBox {
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
        }
    }

    /// Height of the painted box, excluding the gap that follows it.
    pub fn box_height(&self, canvas: &Canvas, style: &ReportStyle, avail_width: Pt) -> Pt {
        self.layout(canvas, style, avail_width).box_height
    }

    fn layout(&self, canvas: &Canvas, style: &ReportStyle, avail_width: Pt) -> InfoBoxLayout {
        let inner_width = (avail_width - style.box_padding * 2).max(Pt::ZERO);
        // continuation boxes carry no title
        let title_lines = if self.title.is_empty() {
            Vec::new()
        } else {
            canvas.wrap_text(
                &self.title,
                inner_width,
                style.box_title.size,
                style.box_title.face,
            )
        };
        let body_lines = canvas.wrap_text(
            &self.body,
            inner_width,
            style.box_body.size,
            style.box_body.face,
        );
        let box_height = lines_height(title_lines.len() + body_lines.len(), style.line_height)
            + style.box_padding * 2
            + style.box_title_gap;
        InfoBoxLayout {
            title_lines,
            body_lines,
            box_height,
        }
    }
}

impl Flowable for InfoBox {
    fn wrap(&self, canvas: &Canvas, style: &ReportStyle, avail_width: Pt) -> Pt {
        self.box_height(canvas, style, avail_width) + style.box_spacing
    }

    fn draw(&self, canvas: &mut Canvas, style: &ReportStyle, x: Pt, y: Pt, avail_width: Pt) {
        let layout = self.layout(canvas, style, avail_width);
        canvas.draw_rounded_rect(
            x,
            y,
            avail_width,
            layout.box_height,
            style.box_radius,
            style.box_fill,
            Some(style.box_stroke),
        );

        let text_x = x + style.box_padding;
        let mut baseline = y + style.box_padding + style.box_title_baseline;
        canvas.draw_lines(
            text_x,
            baseline,
            &layout.title_lines,
            style.line_height,
            &style.box_title,
        );
        baseline += lines_height(layout.title_lines.len(), style.line_height) + style.box_title_gap;
        canvas.draw_lines(
            text_x,
            baseline,
            &layout.body_lines,
            style.line_height,
            &style.box_body,
        );
    }

    fn split(
        &self,
        canvas: &Canvas,
        style: &ReportStyle,
        avail_width: Pt,
        avail_height: Pt,
    ) -> Option<(Box<dyn Flowable>, Box<dyn Flowable>)> {
        let layout = self.layout(canvas, style, avail_width);
        let chrome = style.box_padding * 2
            + style.box_title_gap
            + style.box_spacing
            + lines_height(layout.title_lines.len(), style.line_height);
        let keep = lines_fitting(avail_height - chrome, style.line_height);
        if keep == 0 || keep >= layout.body_lines.len() {
            return None;
        }
        let head = InfoBox::new(self.title.clone(), layout.body_lines[..keep].join("\n"));
        let tail = InfoBox::new("", layout.body_lines[keep..].join("\n"));
        Some((Box::new(head), Box::new(tail)))
    }

    fn debug_name(&self) -> &'static str {
        "InfoBox"
    }
}

/// Formats a percentage the way it is printed in bar labels: integral
/// values lose the fractional part, everything else prints as-is.
pub fn format_percent(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}

/// Labelled horizontal bar. The track spans the content width and the fill
/// covers `value` percent of it, clamped to 0..=100.
#[derive(Debug, Clone, PartialEq)]
pub struct PercentBar {
    pub label: String,
    pub value: f64,
    pub color: Color,
}

impl PercentBar {
    pub fn new(label: impl Into<String>, value: f64, color: Color) -> Self {
        Self {
            label: label.into(),
            value,
            color,
        }
    }

    pub fn caption(&self) -> String {
        format!("{}: {}%", self.label, format_percent(self.value))
    }

    pub fn fill_width(&self, track_width: Pt) -> Pt {
        let ratio = if self.value.is_nan() {
            0.0
        } else {
            self.value.clamp(0.0, 100.0)
        };
        let milli = (track_width.to_milli_i64() as f64 * ratio / 100.0).round() as i64;
        Pt::from_milli_i64(milli)
    }
}

impl Flowable for PercentBar {
    fn wrap(&self, _canvas: &Canvas, style: &ReportStyle, _avail_width: Pt) -> Pt {
        style.bar_block_height
    }

    fn advance(&self, _canvas: &Canvas, style: &ReportStyle, _avail_width: Pt) -> Pt {
        style.bar_advance
    }

    fn draw(&self, canvas: &mut Canvas, style: &ReportStyle, x: Pt, y: Pt, avail_width: Pt) {
        canvas.draw_text(x, y, self.caption(), &style.bar_label);
        let track_y = y + style.bar_track_offset;
        canvas.draw_rounded_rect(
            x,
            track_y,
            avail_width,
            style.bar_track_height,
            style.bar_radius,
            style.bar_track_color,
            None,
        );
        canvas.draw_rounded_rect(
            x,
            track_y,
            self.fill_width(avail_width),
            style.bar_track_height,
            style.bar_radius,
            self.color,
            None,
        );
    }

    fn debug_name(&self) -> &'static str {
        "PercentBar"
    }
}

/// Regular-weight prefix immediately followed by a bold, colored label.
#[derive(Debug, Clone, PartialEq)]
pub struct StyleLine {
    pub prefix: String,
    pub label: String,
    pub color: Color,
}

impl StyleLine {
    pub fn new(prefix: impl Into<String>, label: impl Into<String>, color: Color) -> Self {
        Self {
            prefix: prefix.into(),
            label: label.into(),
            color,
        }
    }
}

impl Flowable for StyleLine {
    fn wrap(&self, _canvas: &Canvas, style: &ReportStyle, _avail_width: Pt) -> Pt {
        style.style_line_height
    }

    fn advance(&self, _canvas: &Canvas, style: &ReportStyle, _avail_width: Pt) -> Pt {
        style.style_line_advance
    }

    fn draw(&self, canvas: &mut Canvas, style: &ReportStyle, x: Pt, y: Pt, _avail_width: Pt) {
        let prefix_style = style.body;
        let label_style = TextStyle {
            face: FontFace::HelveticaBold,
            size: style.body.size,
            color: self.color,
        };
        let prefix_width =
            canvas.measure_text_width(&self.prefix, prefix_style.size, prefix_style.face);
        canvas.draw_text(x, y, self.prefix.clone(), &prefix_style);
        canvas.draw_text(x + prefix_width, y, self.label.clone(), &label_style);
    }

    fn debug_name(&self) -> &'static str {
        "StyleLine"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::Command;
    use crate::types::Size;

    fn pt(v: f32) -> Pt {
        Pt::from_f32(v)
    }

    fn content_width() -> Pt {
        ReportStyle::default().content_width(Size::a4().width)
    }

    #[test]
    fn percent_formatting_drops_integral_fraction() {
        assert_eq!(format_percent(70.0), "70");
        assert_eq!(format_percent(0.0), "0");
        assert_eq!(format_percent(12.5), "12.5");
        assert_eq!(format_percent(-3.0), "-3");
    }

    #[test]
    fn non_finite_percentages_print_like_the_payload() {
        assert_eq!(format_percent(f64::NAN), "NaN");
        assert_eq!(format_percent(f64::INFINITY), "Infinity");
        assert_eq!(format_percent(f64::NEG_INFINITY), "-Infinity");
        let bar = PercentBar::new("Pasivo", f64::INFINITY, Color::BLACK);
        assert_eq!(bar.caption(), "Pasivo: Infinity%");
        assert_eq!(bar.fill_width(content_width()), content_width());
    }

    #[test]
    fn bar_fill_is_proportional_and_clamped() {
        let track = content_width();
        let color = Color::BLACK;
        assert_eq!(PercentBar::new("x", 0.0, color).fill_width(track), Pt::ZERO);
        assert_eq!(PercentBar::new("x", 100.0, color).fill_width(track), track);
        assert_eq!(
            PercentBar::new("x", 50.0, color).fill_width(track),
            Pt::from_milli_i64(track.to_milli_i64() / 2)
        );
        assert_eq!(PercentBar::new("x", 140.0, color).fill_width(track), track);
        assert_eq!(PercentBar::new("x", -20.0, color).fill_width(track), Pt::ZERO);
        assert_eq!(PercentBar::new("x", f64::NAN, color).fill_width(track), Pt::ZERO);
    }

    #[test]
    fn bar_draws_track_and_colored_fill() {
        let style = ReportStyle::default();
        let mut canvas = Canvas::new(Size::a4());
        let green = Color::from_rgb8(67, 160, 71);
        let bar = PercentBar::new("Asertivo", 70.0, green);
        bar.draw(&mut canvas, &style, pt(40.0), pt(120.0), content_width());

        let commands = &canvas.pages()[0].commands;
        assert_eq!(commands.len(), 3);
        assert!(matches!(&commands[0], Command::Text { text, .. } if text == "Asertivo: 70%"));
        match (&commands[1], &commands[2]) {
            (
                Command::RoundedRect {
                    y: track_y,
                    width: track_w,
                    fill: track_fill,
                    ..
                },
                Command::RoundedRect {
                    width: fill_w,
                    fill,
                    ..
                },
            ) => {
                assert_eq!(*track_y, pt(128.0));
                assert_eq!(*track_w, content_width());
                assert_eq!(*track_fill, Color::gray(230));
                assert_eq!(*fill, green);
                assert_eq!(*fill_w, bar.fill_width(content_width()));
            }
            other => panic!("unexpected commands {other:?}"),
        }
    }

    #[test]
    fn zero_percent_bar_still_emits_an_empty_fill() {
        let style = ReportStyle::default();
        let mut canvas = Canvas::new(Size::a4());
        PercentBar::new("Pasivo", 0.0, Color::BLACK).draw(
            &mut canvas,
            &style,
            pt(40.0),
            pt(120.0),
            content_width(),
        );
        let commands = &canvas.pages()[0].commands;
        assert_eq!(commands.len(), 3);
        assert!(matches!(
            &commands[2],
            Command::RoundedRect { width, fill, .. } if *width == Pt::ZERO && *fill == Color::BLACK
        ));
    }

    #[test]
    fn paragraph_splits_at_the_last_whole_line() {
        let style = ReportStyle::default();
        let canvas = Canvas::new(Size::a4());
        let paragraph = Paragraph::new("palabra ".repeat(400));
        let lines = canvas.wrap_text(
            &paragraph.text,
            content_width(),
            style.body.size,
            style.body.face,
        );
        // 10 spacing + 5 lines of 14, plus a little slack
        let (head, tail) = paragraph
            .split(&canvas, &style, content_width(), pt(85.0))
            .expect("splits");
        assert_eq!(head.wrap(&canvas, &style, content_width()), pt(80.0));
        assert_eq!(
            tail.wrap(&canvas, &style, content_width()),
            style.line_height * (lines.len() - 5) as i32 + pt(10.0)
        );
        assert!(paragraph.split(&canvas, &style, content_width(), pt(20.0)).is_none());
        assert!(
            Paragraph::new("breve")
                .split(&canvas, &style, content_width(), pt(500.0))
                .is_none()
        );
    }

    #[test]
    fn info_box_split_keeps_the_title_on_the_head() {
        let style = ReportStyle::default();
        let canvas = Canvas::new(Size::a4());
        let block = InfoBox::new("Recomendación", "palabra ".repeat(400));
        // 24 padding + 6 gap + 12 spacing + 14 title + 3 body lines
        let (head, tail) = block
            .split(&canvas, &style, content_width(), pt(98.0))
            .expect("splits");
        assert_eq!(head.wrap(&canvas, &style, content_width()), pt(98.0));

        let mut drawn = Canvas::new(Size::a4());
        tail.draw(&mut drawn, &style, pt(40.0), pt(90.0), content_width());
        assert!(drawn.pages()[0].commands.iter().all(|c| !matches!(
            c,
            Command::Text { face: FontFace::HelveticaBold, .. }
        )));
    }

    #[test]
    fn info_box_height_counts_lines_padding_and_gap() {
        let style = ReportStyle::default();
        let canvas = Canvas::new(Size::a4());
        let block = InfoBox::new("Recomendación", "Practica la escucha activa.");
        // one title line, one body line: 2 * 14 + 24 + 6
        assert_eq!(block.box_height(&canvas, &style, content_width()), pt(58.0));
        assert_eq!(block.wrap(&canvas, &style, content_width()), pt(70.0));
    }

    #[test]
    fn paragraph_height_tracks_wrapped_lines() {
        let style = ReportStyle::default();
        let canvas = Canvas::new(Size::a4());
        assert_eq!(
            Paragraph::new("breve").wrap(&canvas, &style, content_width()),
            pt(24.0)
        );
        let long = "palabra ".repeat(200);
        let lines = canvas.wrap_text(&long, content_width(), style.body.size, style.body.face);
        assert!(lines.len() > 1);
        assert_eq!(
            Paragraph::new(long).wrap(&canvas, &style, content_width()),
            style.line_height * lines.len() as i32 + pt(10.0)
        );
    }

    #[test]
    fn section_title_draws_heading_and_divider() {
        let style = ReportStyle::default();
        let mut canvas = Canvas::new(Size::a4());
        SectionTitle::new("Porcentajes").draw(
            &mut canvas,
            &style,
            pt(40.0),
            pt(90.0),
            content_width(),
        );
        let commands = &canvas.pages()[0].commands;
        assert!(matches!(
            &commands[0],
            Command::Text { text, face: FontFace::HelveticaBold, .. } if text == "Porcentajes"
        ));
        assert!(matches!(
            &commands[1],
            Command::Line { y1, color, .. } if *y1 == pt(104.0) && *color == Color::gray(235)
        ));
    }

    #[test]
    fn style_line_places_label_after_prefix() {
        let style = ReportStyle::default();
        let mut canvas = Canvas::new(Size::a4());
        let green = Color::from_rgb8(67, 160, 71);
        StyleLine::new("Estilo predominante: ", "Asertivo", green).draw(
            &mut canvas,
            &style,
            pt(40.0),
            pt(134.0),
            content_width(),
        );
        let prefix_width = canvas.measure_text_width(
            "Estilo predominante: ",
            style.body.size,
            FontFace::Helvetica,
        );
        match &canvas.pages()[0].commands[1] {
            Command::Text {
                x,
                text,
                face,
                color,
                ..
            } => {
                assert_eq!(text, "Asertivo");
                assert_eq!(*face, FontFace::HelveticaBold);
                assert_eq!(*color, green);
                assert_eq!(*x, pt(40.0) + prefix_width);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }
}
