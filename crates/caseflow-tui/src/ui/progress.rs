use ratatui::style::Style;
use ratatui::text::{Line, Span, Text};

use caseflow_core::steps::Progress;

use crate::theme;

/// Two-line wizard header: step title plus the 0..=4 visual buckets.
pub(crate) fn header_text(progress: &Progress, step_title: &str) -> Text<'static> {
    Text::from(vec![
        Line::from(Span::styled(
            step_title.to_string(),
            theme::focus_prompt(),
        )),
        bucket_line(progress),
    ])
}

fn bucket_line(progress: &Progress) -> Line<'static> {
    let mut spans = vec![Span::styled(
        format!("Paso {} de {}  ", progress.visual, progress.total),
        theme::secondary_text(),
    )];
    for bucket in 1..=progress.total {
        let (mark, style) = if bucket <= progress.visual {
            ("■", theme::success_prompt())
        } else {
            ("□", Style::default())
        };
        spans.push(Span::styled(mark, style));
        spans.push(Span::raw(" "));
    }
    Line::from(spans)
}

#[cfg(test)]
mod tests {
    use caseflow_core::steps::{StepId, compute_progress, steps_for_combo};

    use super::bucket_line;
    use caseflow_core::steps::ComboId;

    #[test]
    fn bucket_line_fills_completed_buckets() {
        let path = steps_for_combo(ComboId::Combo1);
        let progress = compute_progress(path, StepId::MicaSelector);
        let line = bucket_line(&progress);

        let marks: Vec<&str> = line
            .spans
            .iter()
            .map(|span| span.content.as_ref())
            .filter(|content| *content == "■" || *content == "□")
            .collect();
        assert_eq!(marks, vec!["■", "■", "■", "□"]);
    }

    #[test]
    fn onboarding_shows_no_filled_buckets() {
        let path = steps_for_combo(ComboId::Combo1);
        let progress = compute_progress(path, StepId::Onboarding);
        let line = bucket_line(&progress);

        let filled = line
            .spans
            .iter()
            .filter(|span| span.content.as_ref() == "■")
            .count();
        assert_eq!(filled, 0);
    }
}
