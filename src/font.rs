use crate::types::Pt;

/// Advance widths (1/1000 em) for printable ASCII 0x20..=0x7E, from the
/// Adobe Core 14 AFM files.
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // 0x20
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556, // 0x30
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778, // 0x40
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556, // 0x50
    222, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556, // 0x60
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584, // 0x70
];

const HELVETICA_BOLD_WIDTHS: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278, // 0x20
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611, // 0x30
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778, // 0x40
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556, // 0x50
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611, // 0x60
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584, // 0x70
];

const MISSING_WIDTH: u16 = 556;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FontFace {
    Helvetica,
    HelveticaBold,
}

impl FontFace {
    pub fn base_font(&self) -> &'static str {
        match self {
            FontFace::Helvetica => "Helvetica",
            FontFace::HelveticaBold => "Helvetica-Bold",
        }
    }

    pub(crate) fn resource_name(&self) -> &'static str {
        match self {
            FontFace::Helvetica => "F1",
            FontFace::HelveticaBold => "F2",
        }
    }

    fn ascii_widths(&self) -> &'static [u16; 95] {
        match self {
            FontFace::Helvetica => &HELVETICA_WIDTHS,
            FontFace::HelveticaBold => &HELVETICA_BOLD_WIDTHS,
        }
    }

    pub fn char_width(&self, ch: char) -> u16 {
        let bold = matches!(self, FontFace::HelveticaBold);
        let ch = fold_latin1(ch);
        if (' '..='~').contains(&ch) {
            return self.ascii_widths()[ch as usize - 0x20];
        }
        match ch {
            '\u{00A0}' => 278,
            '¡' => 333,
            '¿' | 'ß' => 611,
            '·' | '‘' | '’' => {
                if bold {
                    278
                } else {
                    222
                }
            }
            '“' | '”' => {
                if bold {
                    500
                } else {
                    333
                }
            }
            '–' | '€' | '•' => 556,
            '—' | '…' => 1000,
            '«' | '»' => 556,
            _ => MISSING_WIDTH,
        }
    }
}

// Accented Latin-1 letters share the advance width of their base letter.
fn fold_latin1(ch: char) -> char {
    match ch {
        'À'..='Å' => 'A',
        'Ç' => 'C',
        'È'..='Ë' => 'E',
        'Ì'..='Ï' => 'I',
        'Ñ' => 'N',
        'Ò'..='Ö' | 'Ø' => 'O',
        'Ù'..='Ü' => 'U',
        'Ý' => 'Y',
        'à'..='å' => 'a',
        'ç' => 'c',
        'è'..='ë' => 'e',
        'ì'..='ï' => 'i',
        'ñ' => 'n',
        'ò'..='ö' | 'ø' => 'o',
        'ù'..='ü' => 'u',
        'ý' | 'ÿ' => 'y',
        _ => ch,
    }
}

pub fn measure_text_width(text: &str, font_size: Pt, face: FontFace) -> Pt {
    let units: i64 = text.chars().map(|ch| face.char_width(ch) as i64).sum();
    let milli = units.saturating_mul(font_size.to_milli_i64());
    Pt::from_milli_i64((milli + 500) / 1000)
}

/// Greedy word wrap. Explicit newlines always break; a word wider than
/// `max_width` is kept whole on its own line. Always yields at least one line.
pub fn wrap_text(text: &str, max_width: Pt, font_size: Pt, face: FontFace) -> Vec<String> {
    let mut lines = Vec::new();
    for paragraph in text.split('\n') {
        let mut current = String::new();
        for word in paragraph.split_whitespace() {
            if current.is_empty() {
                current.push_str(word);
                continue;
            }
            let candidate = format!("{current} {word}");
            if measure_text_width(&candidate, font_size, face) <= max_width {
                current = candidate;
            } else {
                lines.push(std::mem::take(&mut current));
                current.push_str(word);
            }
        }
        lines.push(current);
    }
    lines
}
