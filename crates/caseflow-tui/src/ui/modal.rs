use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::Style;
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::Clear;

use crate::centered_rect;
use crate::theme;
use crate::ui::text::{key_hint_height, key_hint_paragraph, wrapped_paragraph};

pub(crate) struct DialogSpec<'a> {
    pub(crate) title: &'a str,
    pub(crate) title_style: Style,
    pub(crate) body: Text<'a>,
    pub(crate) key_hint: &'a str,
    pub(crate) width_pct: u16,
    pub(crate) height_pct: u16,
}

/// Centered dialog with its key hints stacked directly below the body.
pub(crate) fn render_dialog(frame: &mut Frame<'_>, spec: DialogSpec<'_>) {
    let area = centered_rect(spec.width_pct, spec.height_pct, frame.area());
    let footer_height = key_hint_height(area.width, spec.key_hint);
    let [body_area, key_area] = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(footer_height)])
        .areas(area);

    let title = Line::from(Span::styled(spec.title.to_string(), spec.title_style));
    frame.render_widget(Clear, body_area);
    frame.render_widget(
        wrapped_paragraph(spec.body).block(theme::chrome(title)),
        body_area,
    );

    frame.render_widget(Clear, key_area);
    frame.render_widget(
        key_hint_paragraph(spec.key_hint).block(theme::key_block()),
        key_area,
    );
}

pub(crate) fn render_error_dialog(frame: &mut Frame<'_>, message: &str, footer: &str) {
    render_dialog(
        frame,
        DialogSpec {
            title: "Error",
            title_style: theme::error_prompt(),
            body: multiline_text(message),
            key_hint: footer,
            width_pct: 80,
            height_pct: 50,
        },
    );
}

pub(crate) fn multiline_text(message: &str) -> Text<'static> {
    let base = message.trim_end();
    if base.is_empty() {
        return Text::from(Line::from(""));
    }
    Text::from(
        base.lines()
            .map(|line| Line::from(line.to_string()))
            .collect::<Vec<_>>(),
    )
}
