use crate::canvas::{Command, Document, Page};
use crate::error::ReportError;
use crate::font::FontFace;
use crate::metrics::{DocumentMetrics, PageMetrics};
use crate::types::{Color, Pt};
use base64::Engine;
use chrono::NaiveDateTime;
use fixed::types::I32F32;
use image::GenericImageView;
use std::collections::HashMap;
use std::io::Write;
use std::path::Path;

// Control-point offset that approximates a quarter circle with one cubic.
const KAPPA: f32 = 0.552_284_8;

const FONT_FACES: [FontFace; 2] = [FontFace::Helvetica, FontFace::HelveticaBold];

#[derive(Debug, Clone)]
pub struct PdfOptions {
    pub title: Option<String>,
    pub producer: String,
    pub creation_date: Option<NaiveDateTime>,
    pub compress: bool,
}

impl Default for PdfOptions {
    fn default() -> Self {
        Self {
            title: None,
            producer: "retorika-report".to_string(),
            creation_date: None,
            compress: true,
        }
    }
}

struct ImageData {
    width: u32,
    height: u32,
    color_space: &'static str,
    filter: &'static str,
    data: Vec<u8>,
    alpha: Option<Vec<u8>>,
}

#[derive(Default)]
struct ObjectTable {
    bodies: Vec<Option<Vec<u8>>>,
}

impl ObjectTable {
    fn reserve(&mut self) -> usize {
        self.bodies.push(None);
        self.bodies.len()
    }

    fn set(&mut self, id: usize, body: impl Into<Vec<u8>>) {
        if let Some(slot) = self.bodies.get_mut(id - 1) {
            *slot = Some(body.into());
        }
    }

    fn push(&mut self, body: impl Into<Vec<u8>>) -> usize {
        let id = self.reserve();
        self.set(id, body);
        id
    }
}

pub fn document_to_pdf(document: &Document, options: &PdfOptions) -> Result<Vec<u8>, ReportError> {
    Ok(document_to_pdf_with_metrics(document, options)?.0)
}

pub fn document_to_pdf_with_metrics(
    document: &Document,
    options: &PdfOptions,
) -> Result<(Vec<u8>, DocumentMetrics), ReportError> {
    if document.pages.is_empty() {
        return Err(ReportError::Export("document has no pages".to_string()));
    }

    let mut table = ObjectTable::default();
    let catalog_id = table.reserve();
    let pages_id = table.reserve();

    let mut font_entries = Vec::new();
    for face in FONT_FACES {
        let id = table.push(font_object(face));
        font_entries.push(format!("/{} {} 0 R", face.resource_name(), id));
    }

    let mut image_map: HashMap<String, String> = HashMap::new();
    let mut image_entries = Vec::new();
    for (index, source) in collect_image_sources(document).into_iter().enumerate() {
        let image = load_image(&source)?;
        let smask_id = match &image.alpha {
            Some(alpha) => Some(table.push(image_smask_object(&image, alpha))),
            None => None,
        };
        let obj_id = table.push(image_object(&image, smask_id));
        let name = format!("Im{}", index + 1);
        image_entries.push(format!("/{} {} 0 R", name, obj_id));
        image_map.insert(source, name);
    }

    let mut resources = format!("<< /Font << {} >>", font_entries.join(" "));
    if !image_entries.is_empty() {
        resources.push_str(&format!(" /XObject << {} >>", image_entries.join(" ")));
    }
    resources.push_str(" >>");

    let page_height = document.page_size.height;
    let mut metrics = DocumentMetrics {
        image_count: image_map.len(),
        ..DocumentMetrics::default()
    };
    let mut kids = Vec::with_capacity(document.pages.len());
    for (index, page) in document.pages.iter().enumerate() {
        let content = render_page(page, page_height, &image_map);
        metrics.pages.push(PageMetrics {
            page_number: index + 1,
            command_count: page.commands.len(),
            content_bytes: content.len(),
        });
        let content_id = table.push(stream_object(content.as_bytes(), options.compress));
        let page_id = table.push(format!(
            "<< /Type /Page /Parent {} 0 R /MediaBox [0 0 {} {}] /Resources {} /Contents {} 0 R >>",
            pages_id,
            fmt_pt(document.page_size.width),
            fmt_pt(document.page_size.height),
            resources,
            content_id
        ));
        kids.push(format!("{} 0 R", page_id));
    }

    table.set(
        pages_id,
        format!(
            "<< /Type /Pages /Kids [{}] /Count {} >>",
            kids.join(" "),
            kids.len()
        ),
    );
    table.set(
        catalog_id,
        format!("<< /Type /Catalog /Pages {} 0 R >>", pages_id),
    );
    let info_id = table.push(info_object(options));

    let bytes = build_pdf(table, catalog_id, info_id)?;
    metrics.total_bytes = bytes.len();
    tracing::debug!(
        pages = metrics.pages.len(),
        images = metrics.image_count,
        bytes = metrics.total_bytes,
        "pdf serialized"
    );
    Ok((bytes, metrics))
}

fn collect_image_sources(document: &Document) -> Vec<String> {
    let mut sources: Vec<String> = Vec::new();
    for page in &document.pages {
        for cmd in &page.commands {
            if let Command::Image { resource_id, .. } = cmd {
                if !sources.iter().any(|s| s.as_str() == resource_id.as_ref()) {
                    sources.push(resource_id.to_string());
                }
            }
        }
    }
    sources
}

fn load_image(source: &str) -> Result<ImageData, ReportError> {
    if let Some((mime, data)) = parse_data_uri(source) {
        return decode_image_bytes(&data, Some(&mime));
    }
    let bytes = std::fs::read(Path::new(source))
        .map_err(|err| ReportError::Export(format!("image {source} unreadable: {err}")))?;
    decode_image_bytes(&bytes, None)
}

fn decode_image_bytes(data: &[u8], mime: Option<&str>) -> Result<ImageData, ReportError> {
    // Sniffed format takes precedence over the declared mime type.
    let format = image::guess_format(data).ok().or(match mime {
        Some(mime) if mime.contains("png") => Some(image::ImageFormat::Png),
        Some(mime) if mime.contains("jpeg") || mime.contains("jpg") => {
            Some(image::ImageFormat::Jpeg)
        }
        _ => None,
    });

    let decoded = image::load_from_memory(data)
        .map_err(|err| ReportError::Export(format!("embedded image cannot be decoded: {err}")))?;
    let (width, height) = decoded.dimensions();

    if matches!(format, Some(image::ImageFormat::Jpeg)) {
        let color_space = match decoded.color() {
            image::ColorType::L8 | image::ColorType::La8 => "/DeviceGray",
            _ => "/DeviceRGB",
        };
        return Ok(ImageData {
            width,
            height,
            color_space,
            filter: "/DCTDecode",
            data: data.to_vec(),
            alpha: None,
        });
    }

    let rgba = decoded.to_rgba8();
    let mut rgb = Vec::with_capacity((width * height * 3) as usize);
    let mut alpha = Vec::with_capacity((width * height) as usize);
    let mut has_alpha = false;
    for pixel in rgba.pixels() {
        let [r, g, b, a] = pixel.0;
        if a != 255 {
            has_alpha = true;
        }
        rgb.extend_from_slice(&[r, g, b]);
        alpha.push(a);
    }

    Ok(ImageData {
        width,
        height,
        color_space: "/DeviceRGB",
        filter: "/FlateDecode",
        data: flate_compress(&rgb)?,
        alpha: if has_alpha {
            Some(flate_compress(&alpha)?)
        } else {
            None
        },
    })
}

pub(crate) fn parse_data_uri(uri: &str) -> Option<(String, Vec<u8>)> {
    let rest = uri.strip_prefix("data:")?;
    let (header, data_part) = rest.split_once(',')?;
    let mime = header
        .split(';')
        .next()
        .filter(|m| !m.is_empty())
        .unwrap_or("application/octet-stream")
        .to_string();
    let data = if header.contains("base64") {
        base64::engine::general_purpose::STANDARD
            .decode(data_part)
            .ok()?
    } else {
        data_part.as_bytes().to_vec()
    };
    Some((mime, data))
}

fn flate_compress(data: &[u8]) -> Result<Vec<u8>, ReportError> {
    use flate2::Compression;
    use flate2::write::ZlibEncoder;

    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder
        .write_all(data)
        .map_err(|err| ReportError::Export(format!("flate compression failed: {err}")))?;
    encoder
        .finish()
        .map_err(|err| ReportError::Export(format!("flate compression failed: {err}")))
}

fn binary_stream(dict_entries: &str, data: &[u8]) -> Vec<u8> {
    let mut out = format!("<< {} /Length {} >>\nstream\n", dict_entries, data.len()).into_bytes();
    out.extend_from_slice(data);
    out.extend_from_slice(b"\nendstream");
    out
}

fn stream_object(content: &[u8], compress: bool) -> Vec<u8> {
    if compress {
        if let Ok(packed) = flate_compress(content) {
            return binary_stream("/Filter /FlateDecode", &packed);
        }
    }
    binary_stream("", content)
}

fn image_object(image: &ImageData, smask_id: Option<usize>) -> Vec<u8> {
    let smask = smask_id
        .map(|id| format!(" /SMask {} 0 R", id))
        .unwrap_or_default();
    let dict = format!(
        "/Type /XObject /Subtype /Image /Width {} /Height {} /ColorSpace {} /BitsPerComponent 8 /Filter {}{}",
        image.width, image.height, image.color_space, image.filter, smask
    );
    binary_stream(&dict, &image.data)
}

fn image_smask_object(image: &ImageData, alpha: &[u8]) -> Vec<u8> {
    let dict = format!(
        "/Type /XObject /Subtype /Image /Width {} /Height {} /ColorSpace /DeviceGray /BitsPerComponent 8 /Filter /FlateDecode",
        image.width, image.height
    );
    binary_stream(&dict, alpha)
}

fn font_object(face: FontFace) -> String {
    format!(
        "<< /Type /Font /Subtype /Type1 /BaseFont /{} /Encoding /WinAnsiEncoding >>",
        face.base_font()
    )
}

fn info_object(options: &PdfOptions) -> String {
    let mut entries: Vec<String> = Vec::new();
    if let Some(title) = options.title.as_deref() {
        entries.push(format!("/Title ({})", encode_winansi_pdf_string(title)));
    }
    entries.push(format!(
        "/Producer ({})",
        encode_winansi_pdf_string(&options.producer)
    ));
    if let Some(created) = options.creation_date {
        entries.push(format!("/CreationDate (D:{})", created.format("%Y%m%d%H%M%S")));
    }
    format!("<< {} >>", entries.join(" "))
}

fn build_pdf(
    table: ObjectTable,
    catalog_id: usize,
    info_id: usize,
) -> Result<Vec<u8>, ReportError> {
    let mut out: Vec<u8> = Vec::new();
    out.extend_from_slice(b"%PDF-1.7\n");
    out.extend_from_slice(b"%\xE2\xE3\xCF\xD3\n");

    let object_count = table.bodies.len();
    let mut offsets = Vec::with_capacity(object_count);
    for (index, body) in table.bodies.into_iter().enumerate() {
        let obj_id = index + 1;
        let body = body
            .ok_or_else(|| ReportError::Export(format!("object {obj_id} was never written")))?;
        offsets.push(out.len());
        out.extend_from_slice(format!("{} 0 obj\n", obj_id).as_bytes());
        out.extend_from_slice(&body);
        out.extend_from_slice(b"\nendobj\n");
    }

    let xref_start = out.len();
    out.extend_from_slice(format!("xref\n0 {}\n", object_count + 1).as_bytes());
    out.extend_from_slice(b"0000000000 65535 f \n");
    for offset in offsets {
        out.extend_from_slice(format!("{:010} 00000 n \n", offset).as_bytes());
    }
    out.extend_from_slice(
        format!(
            "trailer\n<< /Size {} /Root {} 0 R /Info {} 0 R >>\nstartxref\n{}\n%%EOF\n",
            object_count + 1,
            catalog_id,
            info_id,
            xref_start
        )
        .as_bytes(),
    );
    Ok(out)
}

fn render_page(page: &Page, page_height: Pt, image_map: &HashMap<String, String>) -> String {
    let mut out = String::new();
    for cmd in &page.commands {
        match cmd {
            Command::Text {
                x,
                y,
                text,
                face,
                size,
                color,
            } => {
                if text.is_empty() {
                    continue;
                }
                out.push_str("BT\n");
                out.push_str(&color_to_pdf_fill(*color));
                out.push_str(&format!("/{} {} Tf\n", face.resource_name(), fmt_pt(*size)));
                out.push_str(&format!("{} {} Td\n", fmt_pt(*x), fmt_pt(page_height - *y)));
                out.push_str(&format!("({}) Tj\n", encode_winansi_pdf_string(text)));
                out.push_str("ET\n");
            }
            Command::Line {
                x1,
                y1,
                x2,
                y2,
                width,
                color,
            } => {
                out.push_str("q\n");
                out.push_str(&color_to_pdf_stroke(*color));
                out.push_str(&format!("{} w\n", fmt_pt(*width)));
                out.push_str(&format!(
                    "{} {} m\n{} {} l\nS\nQ\n",
                    fmt_pt(*x1),
                    fmt_pt(page_height - *y1),
                    fmt_pt(*x2),
                    fmt_pt(page_height - *y2)
                ));
            }
            Command::Rect {
                x,
                y,
                width,
                height,
                fill,
            } => {
                if *width <= Pt::ZERO || *height <= Pt::ZERO {
                    continue;
                }
                out.push_str("q\n");
                out.push_str(&color_to_pdf_fill(*fill));
                out.push_str(&format!(
                    "{} {} {} {} re\nf\nQ\n",
                    fmt_pt(*x),
                    fmt_pt(page_height - *y - *height),
                    fmt_pt(*width),
                    fmt_pt(*height)
                ));
            }
            Command::RoundedRect {
                x,
                y,
                width,
                height,
                radius,
                fill,
                stroke,
            } => {
                if *width <= Pt::ZERO || *height <= Pt::ZERO {
                    continue;
                }
                out.push_str("q\n");
                out.push_str(&color_to_pdf_fill(*fill));
                if let Some(stroke) = stroke {
                    out.push_str(&color_to_pdf_stroke(*stroke));
                }
                out.push_str(&rounded_rect_path(
                    x.to_f32(),
                    (page_height - *y - *height).to_f32(),
                    width.to_f32(),
                    height.to_f32(),
                    radius.to_f32(),
                ));
                out.push_str(if stroke.is_some() { "B\nQ\n" } else { "f\nQ\n" });
            }
            Command::Image {
                x,
                y,
                width,
                height,
                resource_id,
            } => {
                let Some(name) = image_map.get(resource_id.as_ref()) else {
                    continue;
                };
                out.push_str("q\n");
                out.push_str(&format!(
                    "{} 0 0 {} {} {} cm\n",
                    fmt_pt(*width),
                    fmt_pt(*height),
                    fmt_pt(*x),
                    fmt_pt(page_height - *y - *height)
                ));
                out.push_str(&format!("/{} Do\nQ\n", name));
            }
        }
    }
    out
}

// (x, y) is the bottom-left corner in PDF space.
fn rounded_rect_path(x: f32, y: f32, w: f32, h: f32, radius: f32) -> String {
    let r = radius.min(w / 2.0).min(h / 2.0).max(0.0);
    if r <= 0.0 {
        return format!("{} {} {} {} re\n", fmt(x), fmt(y), fmt(w), fmt(h));
    }
    let k = r * KAPPA;
    let (x1, y1) = (x + w, y + h);
    let mut path = String::new();
    path.push_str(&format!("{} {} m\n", fmt(x + r), fmt(y)));
    path.push_str(&format!("{} {} l\n", fmt(x1 - r), fmt(y)));
    path.push_str(&format!(
        "{} {} {} {} {} {} c\n",
        fmt(x1 - r + k),
        fmt(y),
        fmt(x1),
        fmt(y + r - k),
        fmt(x1),
        fmt(y + r)
    ));
    path.push_str(&format!("{} {} l\n", fmt(x1), fmt(y1 - r)));
    path.push_str(&format!(
        "{} {} {} {} {} {} c\n",
        fmt(x1),
        fmt(y1 - r + k),
        fmt(x1 - r + k),
        fmt(y1),
        fmt(x1 - r),
        fmt(y1)
    ));
    path.push_str(&format!("{} {} l\n", fmt(x + r), fmt(y1)));
    path.push_str(&format!(
        "{} {} {} {} {} {} c\n",
        fmt(x + r - k),
        fmt(y1),
        fmt(x),
        fmt(y1 - r + k),
        fmt(x),
        fmt(y1 - r)
    ));
    path.push_str(&format!("{} {} l\n", fmt(x), fmt(y + r)));
    path.push_str(&format!(
        "{} {} {} {} {} {} c\n",
        fmt(x),
        fmt(y + r - k),
        fmt(x + r - k),
        fmt(y),
        fmt(x + r),
        fmt(y)
    ));
    path.push_str("h\n");
    path
}

fn encode_winansi_pdf_string(input: &str) -> String {
    let mut out = String::new();
    for ch in input.chars() {
        let byte = match ch {
            '\u{0000}'..='\u{007F}' => ch as u8,
            '\u{00A0}'..='\u{00FF}' => ch as u8,
            // cp1252 extensions
            '\u{20AC}' => 0x80,
            '\u{201A}' => 0x82,
            '\u{201E}' => 0x84,
            '\u{2026}' => 0x85,
            '\u{2018}' => 0x91,
            '\u{2019}' => 0x92,
            '\u{201C}' => 0x93,
            '\u{201D}' => 0x94,
            '\u{2022}' => 0x95,
            '\u{2013}' => 0x96,
            '\u{2014}' => 0x97,
            '\u{2122}' => 0x99,
            _ => b'?',
        };

        match byte {
            b'\\' => out.push_str("\\\\"),
            b'(' => out.push_str("\\("),
            b')' => out.push_str("\\)"),
            b'\n' | b'\r' => out.push(' '),
            b if !(0x20..0x7f).contains(&b) => out.push_str(&format!("\\{:03o}", b)),
            b => out.push(b as char),
        }
    }
    out
}

fn fmt(value: f32) -> String {
    if !value.is_finite() {
        return "0".to_string();
    }
    let fixed = I32F32::from_num(value);
    let scaled = (fixed * I32F32::from_num(1000)).round();
    let milli: i64 = scaled.to_num();
    format_milli(milli)
}

fn format_milli(milli: i64) -> String {
    if milli == 0 {
        return "0".to_string();
    }
    let sign = if milli < 0 { "-" } else { "" };
    let abs = milli.abs();
    let int_part = abs / 1000;
    let frac_part = abs % 1000;
    if frac_part == 0 {
        return format!("{}{}", sign, int_part);
    }
    let mut s = format!("{}{}.{:03}", sign, int_part, frac_part);
    while s.ends_with('0') {
        s.pop();
    }
    s
}

fn fmt_pt(value: Pt) -> String {
    format_milli(value.to_milli_i64())
}

fn color_to_pdf_fill(color: Color) -> String {
    format!("{} {} {} rg\n", fmt(color.r), fmt(color.g), fmt(color.b))
}

fn color_to_pdf_stroke(color: Color) -> String {
    format!("{} {} {} RG\n", fmt(color.r), fmt(color.g), fmt(color.b))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Size;
    use std::sync::Arc;

    fn one_page_document(commands: Vec<Command>) -> Document {
        Document {
            page_size: Size::a4(),
            pages: vec![Page { commands }],
        }
    }

    fn count_token(bytes: &[u8], token: &[u8]) -> usize {
        if token.is_empty() || bytes.len() < token.len() {
            return 0;
        }
        bytes.windows(token.len()).filter(|w| *w == token).count()
    }

    fn uncompressed() -> PdfOptions {
        PdfOptions {
            compress: false,
            ..PdfOptions::default()
        }
    }

    fn tiny_png_data_uri() -> String {
        let mut img = image::RgbaImage::new(2, 2);
        for pixel in img.pixels_mut() {
            *pixel = image::Rgba([10, 20, 30, 128]);
        }
        let mut bytes = std::io::Cursor::new(Vec::new());
        image::DynamicImage::ImageRgba8(img)
            .write_to(&mut bytes, image::ImageFormat::Png)
            .expect("encode png");
        format!(
            "data:image/png;base64,{}",
            base64::engine::general_purpose::STANDARD.encode(bytes.into_inner())
        )
    }

    #[test]
    fn format_milli_trims_trailing_zeros() {
        assert_eq!(format_milli(0), "0");
        assert_eq!(format_milli(12_500), "12.5");
        assert_eq!(format_milli(-40), "-0.04");
        assert_eq!(fmt_pt(Pt::from_f32(595.28)), "595.28");
    }

    #[test]
    fn winansi_escapes_parens_and_latin1() {
        assert_eq!(encode_winansi_pdf_string("a(b)c\\"), "a\\(b\\)c\\\\");
        assert_eq!(encode_winansi_pdf_string("Página"), "P\\341gina");
        assert_eq!(encode_winansi_pdf_string("—"), "\\227");
        assert_eq!(encode_winansi_pdf_string("中"), "?");
    }

    #[test]
    fn empty_document_is_rejected() {
        let doc = Document {
            page_size: Size::a4(),
            pages: Vec::new(),
        };
        assert!(matches!(
            document_to_pdf(&doc, &PdfOptions::default()),
            Err(ReportError::Export(_))
        ));
    }

    #[test]
    fn text_uses_flipped_baseline() {
        let doc = one_page_document(vec![Command::Text {
            x: Pt::from_i32(40),
            y: Pt::from_f32(41.89),
            text: "Hola".to_string(),
            face: FontFace::HelveticaBold,
            size: Pt::from_i32(12),
            color: Color::BLACK,
        }]);
        let bytes = document_to_pdf(&doc, &uncompressed()).expect("pdf");
        assert_eq!(count_token(&bytes, b"/F2 12 Tf"), 1);
        assert_eq!(count_token(&bytes, b"40 800 Td"), 1);
        assert_eq!(count_token(&bytes, b"(Hola) Tj"), 1);
        assert!(bytes.starts_with(b"%PDF-1.7"));
        assert!(bytes.ends_with(b"%%EOF\n"));
    }

    #[test]
    fn zero_width_rects_emit_no_paint() {
        let doc = one_page_document(vec![Command::RoundedRect {
            x: Pt::from_i32(40),
            y: Pt::from_i32(100),
            width: Pt::ZERO,
            height: Pt::from_i32(10),
            radius: Pt::from_i32(5),
            fill: Color::BLACK,
            stroke: None,
        }]);
        let bytes = document_to_pdf(&doc, &uncompressed()).expect("pdf");
        assert_eq!(count_token(&bytes, b" c\n"), 0);
    }

    #[test]
    fn output_parses_with_lopdf() {
        let mut doc = one_page_document(vec![Command::Rect {
            x: Pt::ZERO,
            y: Pt::ZERO,
            width: Pt::from_i32(10),
            height: Pt::from_i32(10),
            fill: Color::gray(230),
        }]);
        doc.pages.push(Page::default());
        let bytes = document_to_pdf(&doc, &PdfOptions::default()).expect("pdf");
        let parsed = lopdf::Document::load_mem(&bytes).expect("lopdf parse");
        assert_eq!(parsed.get_pages().len(), 2);
    }

    #[test]
    fn png_with_alpha_gets_smask_and_is_shared_across_pages() {
        let source: Arc<str> = Arc::from(tiny_png_data_uri().as_str());
        let image = Command::Image {
            x: Pt::from_i32(40),
            y: Pt::from_i32(22),
            width: Pt::from_i32(90),
            height: Pt::from_i32(36),
            resource_id: source.clone(),
        };
        let doc = Document {
            page_size: Size::a4(),
            pages: vec![
                Page {
                    commands: vec![image.clone()],
                },
                Page {
                    commands: vec![image],
                },
            ],
        };
        let (bytes, metrics) =
            document_to_pdf_with_metrics(&doc, &uncompressed()).expect("pdf");
        assert_eq!(metrics.image_count, 1);
        assert_eq!(count_token(&bytes, b"/SMask"), 1);
        assert_eq!(count_token(&bytes, b"/Im1 Do"), 2);
        assert_eq!(metrics.pages.len(), 2);
        assert_eq!(metrics.total_bytes, bytes.len());
    }

    #[test]
    fn corrupt_image_fails_export() {
        let doc = one_page_document(vec![Command::Image {
            x: Pt::ZERO,
            y: Pt::ZERO,
            width: Pt::from_i32(10),
            height: Pt::from_i32(10),
            resource_id: Arc::from("data:image/png;base64,bm90IGFuIGltYWdl"),
        }]);
        let err = document_to_pdf(&doc, &PdfOptions::default()).expect_err("corrupt image");
        assert!(matches!(err, ReportError::Export(_)));
    }

    #[test]
    fn parse_data_uri_reads_mime_and_payload() {
        let (mime, data) = parse_data_uri("data:image/jpeg;base64,AAEC").expect("uri");
        assert_eq!(mime, "image/jpeg");
        assert_eq!(data, vec![0, 1, 2]);
        assert!(parse_data_uri("assets/logo.png").is_none());
    }
}
