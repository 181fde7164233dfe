//! Advance widths of the built-in Helvetica faces (1/1000 em) and the
//! WinAnsi encoding used to place text in content streams.

/// The two faces used by the report. Both are PDF base-14 fonts, so nothing
/// has to be embedded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Font {
    Regular,
    Bold,
}

impl Font {
    pub const fn base_font(self) -> &'static str {
        match self {
            Font::Regular => "Helvetica",
            Font::Bold => "Helvetica-Bold",
        }
    }

    pub const fn resource_name(self) -> &'static str {
        match self {
            Font::Regular => "F1",
            Font::Bold => "F2",
        }
    }

    /// Width of `text` at `size` points.
    pub fn text_width(self, text: &str, size: f32) -> f32 {
        let units: u32 = text
            .chars()
            .map(|ch| u32::from(self.char_width(ch)))
            .sum();
        units as f32 * size / 1000.0
    }

    pub fn char_width(self, ch: char) -> u16 {
        let table = match self {
            Font::Regular => &HELVETICA_ASCII,
            Font::Bold => &HELVETICA_BOLD_ASCII,
        };
        let code = u32::from(ch);
        if (32..=126).contains(&code) {
            return table[(code - 32) as usize];
        }

        match (self, ch) {
            (_, '\u{a0}') => table[0],
            (_, '–') => 556,
            (_, '—') => 1000,
            (_, '•') => 350,
            (_, '…') => 1000,
            (Font::Regular, '‘' | '’') => 222,
            (Font::Bold, '‘' | '’') => 278,
            (Font::Regular, '“' | '”') => 333,
            (Font::Bold, '“' | '”') => 500,
            (_, '¿') => 611,
            (_, '¡') => 333,
            (_, 'Æ') => 1000,
            (_, 'æ') => 889,
            (_, 'º' | 'ª') => 370,
            (_, '°') => 400,
            (_, 'ß') => 611,
            _ => match fold_accent(ch) {
                Some('i') => 278,
                Some(base) => self.char_width(base),
                None => table[(u32::from('?') - 32) as usize],
            },
        }
    }
}

/// Maps accented Latin-1 letters to the unaccented letter sharing their
/// advance width. Accented lowercase `i` is special-cased by the caller
/// because the dotless glyph is wider.
fn fold_accent(ch: char) -> Option<char> {
    let base = match ch {
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
        _ => return None,
    };
    Some(base)
}

/// Encodes text as WinAnsi bytes. Characters outside the code page become `?`.
pub fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|ch| {
            let code = u32::from(ch);
            match ch {
                _ if (32..=126).contains(&code) => code as u8,
                _ if (0xa0..=0xff).contains(&code) => code as u8,
                '€' => 0x80,
                '…' => 0x85,
                '‘' => 0x91,
                '’' => 0x92,
                '“' => 0x93,
                '”' => 0x94,
                '•' => 0x95,
                '–' => 0x96,
                '—' => 0x97,
                _ => b'?',
            }
        })
        .collect()
}

#[rustfmt::skip]
const HELVETICA_ASCII: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556,
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556,
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556,
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584,
];

#[rustfmt::skip]
const HELVETICA_BOLD_ASCII: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611,
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556,
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611,
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584,
];
