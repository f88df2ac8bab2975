//! Standard Type1 fonts and WinAnsi (Windows-1252) text encoding.
//!
//! The document only uses the built-in Helvetica faces, so nothing is
//! embedded: layout needs advance widths, and content streams need WinAnsi
//! bytes.

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StandardFont {
    Helvetica,
    HelveticaBold,
}

impl StandardFont {
    pub const ALL: [StandardFont; 2] = [StandardFont::Helvetica, StandardFont::HelveticaBold];

    pub(crate) fn base_font(self) -> &'static [u8] {
        match self {
            StandardFont::Helvetica => b"Helvetica",
            StandardFont::HelveticaBold => b"Helvetica-Bold",
        }
    }

    /// Resource name used in page content streams.
    pub(crate) fn pdf_name(self) -> &'static str {
        match self {
            StandardFont::Helvetica => "F1",
            StandardFont::HelveticaBold => "F2",
        }
    }

    fn ascii_widths(self) -> &'static [u16; 95] {
        match self {
            StandardFont::Helvetica => &HELVETICA_ASCII,
            StandardFont::HelveticaBold => &HELVETICA_BOLD_ASCII,
        }
    }

    /// Advance width of `ch` in 1000-units per em. Characters without a
    /// WinAnsi code have no width.
    pub fn char_width_1000(self, ch: char) -> f32 {
        let bold = self == StandardFont::HelveticaBold;
        match ch {
            ' '..='~' => self.ascii_widths()[ch as usize - 0x20] as f32,
            '\u{00A0}' => self.char_width_1000(' '),
            '°' => 400.0,
            'ª' => 370.0,
            'º' => 365.0,
            '¡' => 333.0,
            'Æ' | 'Œ' => 1000.0,
            'æ' => 889.0,
            'œ' => 944.0,
            '¿' => 611.0,
            '«' | '»' => 556.0,
            '·' => 278.0,
            '´' | '¨' | '¸' | '¯' => 333.0,
            '‘' | '’' | '‚' => if bold { 278.0 } else { 222.0 },
            '“' | '”' | '„' => if bold { 500.0 } else { 333.0 },
            '•' => 350.0,
            '…' | '—' | '‰' => 1000.0,
            '–' | '€' => 556.0,
            '™' => 1000.0,
            _ => match fold_accent(ch) {
                Some(base) => self.char_width_1000(base),
                None if char_to_winansi(ch) != 0 => 556.0,
                None => 0.0,
            },
        }
    }

    /// Width of `text` in points at `font_size`.
    pub fn text_width(self, text: &str, font_size: f32) -> f32 {
        text.chars()
            .map(|ch| self.char_width_1000(ch) * font_size / 1000.0)
            .sum()
    }
}

/// Helvetica AFM widths for 0x20..=0x7E.
#[rustfmt::skip]
const HELVETICA_ASCII: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556,
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556,
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556,
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584,
];

/// Helvetica-Bold AFM widths for 0x20..=0x7E.
#[rustfmt::skip]
const HELVETICA_BOLD_ASCII: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611,
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556,
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611,
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584,
];

/// Latin-1 letters share the advance of their unaccented base letter.
fn fold_accent(ch: char) -> Option<char> {
    let base = match ch {
        'À'..='Å' => 'A',
        'Ç' => 'C',
        'È'..='Ë' => 'E',
        'Ì'..='Ï' => 'I',
        'Ð' => 'D',
        'Ñ' => 'N',
        'Ò'..='Ö' | 'Ø' => 'O',
        'Ù'..='Ü' => 'U',
        'Ý' | 'Ÿ' => 'Y',
        'Š' => 'S',
        'Ž' => 'Z',
        'à'..='å' => 'a',
        'ç' => 'c',
        'è'..='ë' => 'e',
        'ì'..='ï' => 'i',
        'ñ' => 'n',
        'ò'..='ö' | 'ø' => 'o',
        'ù'..='ü' => 'u',
        'ý' | 'ÿ' => 'y',
        'š' => 's',
        'ž' => 'z',
        _ => return None,
    };
    Some(base)
}

/// Map a single Unicode char to its WinAnsi byte, or 0 if unmappable.
pub(crate) fn char_to_winansi(c: char) -> u8 {
    match c as u32 {
        0x0020..=0x007E => c as u8,
        0x00A0..=0x00FF => c as u8,
        0x20AC => 0x80,
        0x201A => 0x82,
        0x0192 => 0x83,
        0x201E => 0x84,
        0x2026 => 0x85,
        0x2020 => 0x86,
        0x2021 => 0x87,
        0x02C6 => 0x88,
        0x2030 => 0x89,
        0x0160 => 0x8A,
        0x2039 => 0x8B,
        0x0152 => 0x8C,
        0x017D => 0x8E,
        0x2018 => 0x91,
        0x2019 => 0x92,
        0x201C => 0x93,
        0x201D => 0x94,
        0x2022 => 0x95,
        0x2013 => 0x96,
        0x2014 => 0x97,
        0x02DC => 0x98,
        0x2122 => 0x99,
        0x0161 => 0x9A,
        0x203A => 0x9B,
        0x0153 => 0x9C,
        0x017E => 0x9E,
        0x0178 => 0x9F,
        _ => 0,
    }
}

/// True for characters that can appear in a field value: WinAnsi-encodable
/// text plus the whitespace controls the line wrapper consumes.
pub(crate) fn is_encodable(c: char) -> bool {
    matches!(c, '\n' | '\r' | '\t') || char_to_winansi(c) != 0
}

/// Convert a UTF-8 string to WinAnsi (Windows-1252) bytes for PDF Str encoding.
/// Unmappable characters are dropped; callers validate input beforehand.
pub(crate) fn to_winansi_bytes(s: &str) -> Vec<u8> {
    s.chars()
        .map(char_to_winansi)
        .filter(|&b| b != 0)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spanish_text_is_encodable() {
        let text = "N° de piso, recepción, Muñoz, ¿Frágil?";
        assert!(text.chars().all(is_encodable));
        let bytes = to_winansi_bytes("Fotografía");
        assert_eq!(bytes, b"Fotograf\xEDa");
    }

    #[test]
    fn characters_outside_winansi_are_rejected() {
        assert!(!is_encodable('✓'));
        assert!(!is_encodable('ł'));
        assert!(!is_encodable('\u{7}'));
        assert!(is_encodable('€'));
    }

    #[test]
    fn widths_follow_afm_metrics() {
        assert_eq!(StandardFont::Helvetica.char_width_1000('M'), 833.0);
        assert_eq!(StandardFont::Helvetica.char_width_1000('i'), 222.0);
        assert_eq!(StandardFont::HelveticaBold.char_width_1000('i'), 278.0);
        assert_eq!(StandardFont::Helvetica.char_width_1000('á'), 556.0);
        assert_eq!(StandardFont::Helvetica.char_width_1000('Ñ'), 722.0);
        let w = StandardFont::Helvetica.text_width("aaaa", 10.0);
        assert!((w - 22.24).abs() < 1e-4);
    }
}
