use ratatui::layout::Alignment;
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Paragraph, Wrap};

use crate::theme;

pub(crate) fn wrapped_paragraph<'a, T>(text: T) -> Paragraph<'a>
where
    T: Into<Text<'a>>,
{
    Paragraph::new(text).wrap(Wrap { trim: false })
}

pub(crate) fn key_hint_paragraph<'a, T>(text: T) -> Paragraph<'a>
where
    T: Into<Text<'a>>,
{
    wrapped_paragraph(text).alignment(Alignment::Center)
}

/// Footer height including the bordered block, never below three rows.
pub(crate) fn key_hint_height(total_width: u16, text: &str) -> u16 {
    let content_width = total_width.saturating_sub(2).max(1) as usize;
    wrapped_line_count(text, content_width)
        .saturating_add(2)
        .max(3)
}

pub(crate) fn compact_hint<'a>(width: u16, full: &'a str, compact: &'a str) -> &'a str {
    if width >= 90 { full } else { compact }
}

pub(crate) fn focus_line(message: impl Into<String>) -> Line<'static> {
    Line::from(Span::styled(message.into(), theme::focus_prompt()))
}

pub(crate) fn label_value_line(
    label: impl Into<String>,
    value: impl Into<String>,
) -> Line<'static> {
    let label = label.into();
    let value = value.into();
    Line::from(vec![
        Span::styled(format!("{label}: "), theme::secondary_text()),
        Span::raw(value),
    ])
}

fn wrapped_line_count(text: &str, width: usize) -> u16 {
    let mut total = 0u16;
    for line in text.split('\n') {
        let chars = line.chars().count();
        let rows = chars.div_ceil(width).max(1);
        total = total.saturating_add(rows as u16);
    }
    total.max(1)
}

#[cfg(test)]
mod tests {
    use ratatui::style::{Color, Modifier};

    use super::{compact_hint, focus_line, key_hint_height, label_value_line, wrapped_line_count};

    #[test]
    fn compact_hint_selects_variant_by_width() {
        assert_eq!(compact_hint(120, "full", "compact"), "full");
        assert_eq!(compact_hint(60, "full", "compact"), "compact");
    }

    #[test]
    fn key_hint_height_is_single_line_when_hint_fits() {
        assert_eq!(key_hint_height(80, "Enter: continuar    Esc: salir"), 3);
    }

    #[test]
    fn key_hint_height_grows_when_hint_wraps() {
        let height = key_hint_height(20, "Enter: continuar    j/k: mover    Esc: salir");
        assert!(height > 3);
    }

    #[test]
    fn wrapped_line_count_covers_empty_and_multiline_text() {
        assert_eq!(wrapped_line_count("", 10), 1);
        assert_eq!(wrapped_line_count("abcde", 5), 1);
        assert_eq!(wrapped_line_count("abcdef", 5), 2);
        assert_eq!(wrapped_line_count("a\nb", 5), 2);
    }

    #[test]
    fn focus_line_uses_blue_bold_style() {
        let line = focus_line("elige una opción");
        assert_eq!(line.spans.len(), 1);
        assert_eq!(line.spans[0].style.fg, Some(Color::Blue));
        assert!(line.spans[0].style.add_modifier.contains(Modifier::BOLD));
    }

    #[test]
    fn label_value_line_formats_with_colon() {
        let line = label_value_line("Equipo", "Samsung Galaxy S23");
        assert_eq!(line.spans.len(), 2);
        assert_eq!(line.spans[0].content.as_ref(), "Equipo: ");
        assert_eq!(line.spans[1].content.as_ref(), "Samsung Galaxy S23");
    }
}
