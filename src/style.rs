use crate::canvas::TextStyle;
use crate::font::FontFace;
use crate::types::{Color, Pt};

/// Geometry and typography shared by every layout primitive and by the
/// header/footer chrome. All lengths are in points.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportStyle {
    pub margin_x: Pt,
    /// First baseline below the stamped header.
    pub content_top: Pt,
    /// Space kept free above the bottom edge for the footer.
    pub footer_reserve: Pt,
    pub line_height: Pt,
    pub rule_width: Pt,

    pub heading: TextStyle,
    pub heading_height: Pt,
    pub heading_rule_offset: Pt,
    pub heading_rule_color: Color,

    pub body: TextStyle,
    pub paragraph_spacing: Pt,

    pub box_title: TextStyle,
    pub box_body: TextStyle,
    pub box_padding: Pt,
    /// Offset of the first title baseline below the inner top edge.
    pub box_title_baseline: Pt,
    pub box_title_gap: Pt,
    pub box_spacing: Pt,
    pub box_radius: Pt,
    pub box_fill: Color,
    pub box_stroke: Color,

    pub bar_label: TextStyle,
    pub bar_block_height: Pt,
    pub bar_advance: Pt,
    pub bar_track_offset: Pt,
    pub bar_track_height: Pt,
    pub bar_radius: Pt,
    pub bar_track_color: Color,

    pub style_line_height: Pt,
    pub style_line_advance: Pt,

    pub header: HeaderStyle,
    pub footer: FooterStyle,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HeaderStyle {
    pub logo_x: Pt,
    pub logo_y: Pt,
    pub logo_width: Pt,
    pub logo_height: Pt,
    pub baseline: Pt,
    pub title: TextStyle,
    pub subtitle: TextStyle,
    pub rule_y: Pt,
    pub rule_color: Color,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FooterStyle {
    /// Distance of the divider from the bottom edge.
    pub rule_from_bottom: Pt,
    /// Distance of the text baseline from the bottom edge.
    pub baseline_from_bottom: Pt,
    pub text: TextStyle,
    pub rule_color: Color,
}

impl Default for ReportStyle {
    fn default() -> Self {
        let margin_x = Pt::from_i32(40);
        Self {
            margin_x,
            content_top: Pt::from_i32(90),
            footer_reserve: Pt::from_i32(70),
            line_height: Pt::from_i32(14),
            rule_width: Pt::from_f32(0.57),

            heading: TextStyle::new(FontFace::HelveticaBold, 12.0),
            heading_height: Pt::from_i32(30),
            heading_rule_offset: Pt::from_i32(14),
            heading_rule_color: Color::gray(235),

            body: TextStyle::new(FontFace::Helvetica, 11.0),
            paragraph_spacing: Pt::from_i32(10),

            box_title: TextStyle::new(FontFace::HelveticaBold, 11.0),
            box_body: TextStyle::new(FontFace::Helvetica, 10.5),
            box_padding: Pt::from_i32(12),
            box_title_baseline: Pt::from_i32(12),
            box_title_gap: Pt::from_i32(6),
            box_spacing: Pt::from_i32(12),
            box_radius: Pt::from_i32(10),
            box_fill: Color::gray(246),
            box_stroke: Color::gray(235),

            bar_label: TextStyle::new(FontFace::Helvetica, 11.0),
            bar_block_height: Pt::from_i32(34),
            bar_advance: Pt::from_i32(33),
            bar_track_offset: Pt::from_i32(8),
            bar_track_height: Pt::from_i32(10),
            bar_radius: Pt::from_i32(5),
            bar_track_color: Color::gray(230),

            style_line_height: Pt::from_i32(20),
            style_line_advance: Pt::from_i32(18),

            header: HeaderStyle {
                logo_x: margin_x,
                logo_y: Pt::from_i32(22),
                logo_width: Pt::from_i32(90),
                logo_height: Pt::from_i32(36),
                baseline: Pt::from_i32(58),
                title: TextStyle::new(FontFace::HelveticaBold, 14.0),
                subtitle: TextStyle::new(FontFace::Helvetica, 10.0).with_color(Color::gray(120)),
                rule_y: Pt::from_i32(70),
                rule_color: Color::gray(220),
            },
            footer: FooterStyle {
                rule_from_bottom: Pt::from_i32(50),
                baseline_from_bottom: Pt::from_i32(32),
                text: TextStyle::new(FontFace::Helvetica, 9.0).with_color(Color::gray(120)),
                rule_color: Color::gray(220),
            },
        }
    }
}

impl ReportStyle {
    pub fn content_width(&self, page_width: Pt) -> Pt {
        (page_width - self.margin_x * 2).max(Pt::ZERO)
    }
}

/// Fixed user-visible strings of the report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportLabels {
    pub report_title: String,
    pub dominant_prefix: String,
    pub percentages_title: String,
    pub recommendations_title: String,
    pub default_block_title: String,
    pub header_title: Option<String>,
    pub footer_left: String,
    /// `{page}` and `{pages}` are replaced while stamping.
    pub page_label: String,
    /// chrono format string for the header subtitle.
    pub timestamp_format: String,
}

impl Default for ReportLabels {
    fn default() -> Self {
        Self {
            report_title: "Informe de Resultados".to_string(),
            dominant_prefix: "Estilo predominante: ".to_string(),
            percentages_title: "Porcentajes".to_string(),
            recommendations_title: "Recomendaciones".to_string(),
            default_block_title: "Recomendación".to_string(),
            header_title: None,
            footer_left: "Uso personal — Resultados del cuestionario".to_string(),
            page_label: "Página {page} de {pages}".to_string(),
            timestamp_format: "%d/%m/%Y, %H:%M:%S".to_string(),
        }
    }
}
