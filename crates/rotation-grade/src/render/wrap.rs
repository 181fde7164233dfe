use super::metrics::Font;

/// Greedy word wrap. Explicit newlines start a new line, and a word wider
/// than `max_width` is split between characters so no line ever exceeds the
/// width unless a single glyph does.
pub fn wrap_text(text: &str, font: Font, size: f32, max_width: f32) -> Vec<String> {
    if text.trim().is_empty() {
        return Vec::new();
    }

    let mut lines = Vec::new();
    for paragraph in text.split('\n') {
        wrap_paragraph(paragraph, font, size, max_width, &mut lines);
    }
    lines
}

fn wrap_paragraph(
    paragraph: &str,
    font: Font,
    size: f32,
    max_width: f32,
    lines: &mut Vec<String>,
) {
    let fits = |candidate: &str| font.text_width(candidate, size) <= max_width;
    let mut current = String::new();

    for word in paragraph.split_whitespace() {
        if !current.is_empty() {
            let candidate = format!("{current} {word}");
            if fits(&candidate) {
                current = candidate;
                continue;
            }
            lines.push(std::mem::take(&mut current));
        }

        if fits(word) {
            current.push_str(word);
            continue;
        }

        for ch in word.chars() {
            current.push(ch);
            if !fits(&current) && current.chars().count() > 1 {
                current.pop();
                lines.push(std::mem::replace(&mut current, ch.to_string()));
            }
        }
    }

    if !current.is_empty() || paragraph.trim().is_empty() {
        lines.push(current);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SIZE: f32 = 9.0;

    #[test]
    fn short_text_stays_on_one_line() {
        let lines = wrap_text("3.7 Cumplimiento", Font::Regular, SIZE, 420.0);
        assert_eq!(lines, vec!["3.7 Cumplimiento".to_string()]);
    }

    #[test]
    fn wraps_at_spaces_within_width() {
        let text = "Habilidad de la práctica de procedimientos diagnósticos especiales";
        let lines = wrap_text(text, Font::Regular, SIZE, 120.0);
        assert!(lines.len() > 1);
        for line in &lines {
            assert!(Font::Regular.text_width(line, SIZE) <= 120.0, "{line:?}");
            assert_eq!(line.trim(), line);
        }
        assert_eq!(lines.join(" "), text);
    }

    #[test]
    fn breaks_words_longer_than_the_column() {
        let word = "electroencefalográficamente".repeat(4);
        let lines = wrap_text(&word, Font::Bold, SIZE, 60.0);
        assert!(lines.len() > 2);
        for line in &lines {
            assert!(Font::Bold.text_width(line, SIZE) <= 60.0, "{line:?}");
        }
        assert_eq!(lines.concat(), word);
    }

    #[test]
    fn honours_explicit_newlines() {
        let lines = wrap_text(
            "Universidad del Rosario\nEscuela de Medicina",
            Font::Regular,
            12.0,
            500.0,
        );
        assert_eq!(
            lines,
            vec![
                "Universidad del Rosario".to_string(),
                "Escuela de Medicina".to_string()
            ]
        );
    }

    #[test]
    fn blank_text_has_no_lines() {
        assert!(wrap_text("   ", Font::Regular, SIZE, 100.0).is_empty());
    }
}
