use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{List, ListItem, ListState, Paragraph};

use caseflow_app::App;
use caseflow_core::catalog;
use caseflow_core::steps::StepId;

use super::{ImageChoice, Overlay, PhonePane, WizardFlow};
use crate::theme;
use crate::ui::modal::{DialogSpec, multiline_text, render_dialog, render_error_dialog};
use crate::ui::progress::header_text;
use crate::ui::text::{
    compact_hint, focus_line, key_hint_height, key_hint_paragraph, label_value_line,
    wrapped_paragraph,
};

impl WizardFlow {
    pub(crate) fn render(&self, frame: &mut Frame<'_>, app: &App) {
        let step = app.current_step();
        let key_text = self.key_hint_for(step, frame.area().width, app);
        let footer_height = key_hint_height(frame.area().width, key_text);
        let [header, body, footer] = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4),
                Constraint::Min(6),
                Constraint::Length(footer_height),
            ])
            .areas(frame.area());

        let progress = app.progress();
        let title = wrapped_paragraph(header_text(&progress, step.title()))
            .block(theme::chrome("caseflow"));
        frame.render_widget(title, header);

        match step {
            StepId::Onboarding => self.render_onboarding(frame, body),
            StepId::PhoneSelector => self.render_phone(frame, body, app),
            StepId::ComboSelector => self.render_combos(frame, body),
            StepId::MicaSelector => self.render_micas(frame, body),
            StepId::CaseSelector => self.render_case(frame, body),
            StepId::ImageSelector => self.render_image(frame, body),
            StepId::ContactForm => self.render_contact(frame, body),
            StepId::FinalSummary => self.render_summary(frame, body, app),
        }

        let hints = key_hint_paragraph(key_text).block(theme::key_block());
        frame.render_widget(hints, footer);

        match &self.overlay {
            Some(Overlay::ConfirmExit { yes }) => render_exit_confirm(frame, *yes),
            Some(Overlay::Error(message)) => {
                render_error_dialog(frame, message, "Enter/Esc: continuar");
            }
            Some(Overlay::Receipt(receipt)) => {
                render_dialog(
                    frame,
                    DialogSpec {
                        title: "Pedido confirmado",
                        title_style: theme::success_prompt(),
                        body: Text::from(vec![
                            Line::from(""),
                            label_value_line("Confirmación", receipt.confirmation.clone()),
                            label_value_line("Cliente", receipt.contact_name.clone()),
                            label_value_line(
                                "Total",
                                format!("${} {}", receipt.total_price, app.currency()),
                            ),
                            label_value_line("Fecha", receipt.submitted_at.clone()),
                        ]),
                        key_hint: "Enter: terminar",
                        width_pct: 70,
                        height_pct: 50,
                    },
                );
            }
            None => {}
        }
    }

    fn key_hint_for(&self, step: StepId, width: u16, app: &App) -> &'static str {
        match step {
            StepId::Onboarding => compact_hint(
                width,
                "Enter: comenzar    Esc: salir",
                "Enter comenzar | Esc salir",
            ),
            StepId::PhoneSelector => compact_hint(
                width,
                "Tab: buscar    Enter: elegir    Up/Down o j/k: mover    Left: atrás    Esc: salir",
                "Tab buscar | Enter elegir | j/k mover | Left atrás | Esc salir",
            ),
            StepId::ComboSelector | StepId::MicaSelector => compact_hint(
                width,
                "Enter: elegir    Up/Down o j/k: mover    Left: atrás    Esc: salir",
                "Enter elegir | j/k mover | Left atrás | Esc salir",
            ),
            StepId::CaseSelector => compact_hint(
                width,
                "Enter: elegir    Espacio: tipo    c: color    Left: atrás    Esc: salir",
                "Enter elegir | Espacio tipo | c color | Left atrás | Esc salir",
            ),
            // The reset key only appears once there is an image to drop.
            StepId::ImageSelector if app.selection().image.is_set() => compact_hint(
                width,
                "Enter: elegir    x: quitar imagen    Left: atrás    Esc: salir",
                "Enter elegir | x quitar | Left atrás | Esc salir",
            ),
            StepId::ImageSelector => compact_hint(
                width,
                "Enter: elegir    Left: atrás    Esc: salir",
                "Enter elegir | Left atrás | Esc salir",
            ),
            StepId::ContactForm => compact_hint(
                width,
                "Tab/Shift+Tab: campo    Enter: continuar    Esc: salir",
                "Tab campo | Enter continuar | Esc salir",
            ),
            StepId::FinalSummary => compact_hint(
                width,
                "Enter: confirmar pedido    Left: atrás    Esc: salir",
                "Enter confirmar | Left atrás | Esc salir",
            ),
        }
    }

    fn render_onboarding(&self, frame: &mut Frame<'_>, area: Rect) {
        let mut lines = vec![
            Line::from("Arma la protección de tu equipo en unos pasos."),
            Line::from(""),
            focus_line("Combos disponibles"),
        ];
        for combo in &catalog::COMBOS {
            lines.push(label_value_line(
                combo.name,
                format!("${} — {}", combo.price, combo.description),
            ));
        }
        let body = wrapped_paragraph(Text::from(lines)).block(theme::chrome("Bienvenido"));
        frame.render_widget(body, area);
    }

    fn render_phone(&self, frame: &mut Frame<'_>, area: Rect, app: &App) {
        let [filter_area, list_area] = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(3)])
            .areas(area);

        let filter_title = if self.phone.filter_focused {
            focus_line("Buscar (escribiendo)")
        } else {
            Line::from("Buscar (Tab)")
        };
        let filter = Paragraph::new(self.phone.filter.value().to_string())
            .block(theme::chrome(filter_title));
        frame.render_widget(filter, filter_area);

        match self.phone.pane {
            PhonePane::Brands => {
                let items: Vec<String> = self
                    .phone
                    .brand_picker
                    .items()
                    .iter()
                    .map(|brand| brand.name.to_string())
                    .collect();
                render_pick_list(
                    frame,
                    list_area,
                    "Marcas",
                    items,
                    self.phone.brand_picker.selected(),
                    "Sin resultados; tu búsqueda queda registrada.",
                );
            }
            PhonePane::Models => {
                let brand = app.selection().brand.clone().unwrap_or_default();
                let items: Vec<String> = self
                    .phone
                    .model_picker
                    .items()
                    .iter()
                    .map(|model| model.to_string())
                    .collect();
                render_pick_list(
                    frame,
                    list_area,
                    &format!("Modelos de {brand}"),
                    items,
                    self.phone.model_picker.selected(),
                    "Sin resultados; tu búsqueda queda registrada.",
                );
            }
        }
    }

    fn render_combos(&self, frame: &mut Frame<'_>, area: Rect) {
        let items: Vec<String> = self
            .combo_picker
            .items()
            .iter()
            .map(|combo| format!("{} — ${}  ({})", combo.name, combo.price, combo.description))
            .collect();
        render_pick_list(
            frame,
            area,
            "Combos",
            items,
            self.combo_picker.selected(),
            "",
        );
    }

    fn render_micas(&self, frame: &mut Frame<'_>, area: Rect) {
        let items: Vec<String> = self
            .mica_picker
            .items()
            .iter()
            .map(|mica| {
                if mica.surcharge > 0 {
                    format!("{} (+${})", mica.name, mica.surcharge)
                } else {
                    mica.name.to_string()
                }
            })
            .collect();
        render_pick_list(frame, area, "Micas", items, self.mica_picker.selected(), "");
    }

    fn render_case(&self, frame: &mut Frame<'_>, area: Rect) {
        let [list_area, info_area] = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(3), Constraint::Length(4)])
            .areas(area);

        let items: Vec<String> = self
            .case
            .style_picker
            .items()
            .iter()
            .map(|style| style.name.to_string())
            .collect();
        render_pick_list(
            frame,
            list_area,
            "Estilos",
            items,
            self.case.style_picker.selected(),
            "",
        );

        let color = self
            .case
            .style_picker
            .selected_item()
            .and_then(|style| style.colors.get(self.case.color_index))
            .copied()
            .unwrap_or(catalog::DEFAULT_CASE_COLOR);
        let info = wrapped_paragraph(Text::from(vec![
            label_value_line("Tipo", catalog::CASE_TYPES[self.case.type_index]),
            label_value_line("Color", color),
        ]))
        .block(theme::chrome("Tu funda"));
        frame.render_widget(info, info_area);
    }

    fn render_image(&self, frame: &mut Frame<'_>, area: Rect) {
        let [list_area, url_area] = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(3), Constraint::Length(3)])
            .areas(area);

        let items: Vec<String> = self
            .image
            .picker
            .items()
            .iter()
            .map(|choice| match choice {
                ImageChoice::Licensed(asset) => {
                    format!("{} ({})", asset.name, asset.license_tag)
                }
                ImageChoice::CustomUrl => "Imagen personal (URL)".to_string(),
            })
            .collect();
        render_pick_list(
            frame,
            list_area,
            "Imágenes con licencia",
            items,
            self.image.picker.selected(),
            "",
        );

        let url_title = if self.image.url_focused {
            focus_line("URL de tu imagen (escribiendo)")
        } else {
            Line::from("URL de tu imagen")
        };
        let url = Paragraph::new(self.image.url_input.value().to_string())
            .block(theme::chrome(url_title));
        frame.render_widget(url, url_area);
    }

    fn render_contact(&self, frame: &mut Frame<'_>, area: Rect) {
        let [name_area, email_area, phone_area, _rest] = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Min(0),
            ])
            .areas(area);

        render_form_field(frame, name_area, "Nombre", &self.contact.name, self.contact.focus == 0);
        render_form_field(frame, email_area, "Correo", &self.contact.email, self.contact.focus == 1);
        render_form_field(frame, phone_area, "Teléfono", &self.contact.phone, self.contact.focus == 2);
    }

    fn render_summary(&self, frame: &mut Frame<'_>, area: Rect, app: &App) {
        let lines: Vec<Line<'static>> = app
            .order_summary()
            .into_iter()
            .map(|row| label_value_line(row.label, row.value))
            .collect();
        let body = wrapped_paragraph(Text::from(lines)).block(theme::chrome("Tu pedido"));
        frame.render_widget(body, area);
    }
}

fn render_pick_list(
    frame: &mut Frame<'_>,
    area: Rect,
    title: &str,
    items: Vec<String>,
    selected: usize,
    empty_label: &str,
) {
    if items.is_empty() {
        let empty = wrapped_paragraph(Text::from(Line::from(Span::styled(
            empty_label.to_string(),
            theme::secondary_text(),
        ))))
        .block(theme::chrome(title.to_string()));
        frame.render_widget(empty, area);
        return;
    }

    let rows: Vec<ListItem<'_>> = items.into_iter().map(ListItem::new).collect();
    let list = List::new(rows)
        .block(theme::chrome(title.to_string()))
        .highlight_style(theme::list_highlight());

    let mut state = ListState::default();
    state.select(Some(selected));
    frame.render_stateful_widget(list, area, &mut state);
}

fn render_form_field(
    frame: &mut Frame<'_>,
    area: Rect,
    label: &str,
    input: &tui_input::Input,
    focused: bool,
) {
    let title = if focused {
        focus_line(label)
    } else {
        Line::from(label.to_string())
    };
    let field = Paragraph::new(input.value().to_string())
        .style(Style::default())
        .block(theme::chrome(title));
    frame.render_widget(field, area);
}

fn render_exit_confirm(frame: &mut Frame<'_>, yes: bool) {
    let choice = if yes { "Sí" } else { "No" };
    let mut body = multiline_text("Se borrará tu pedido y volverás al inicio.");
    body.push_line(Line::from(""));
    body.push_line(Line::from(vec![
        Span::styled("¿Cancelar pedido?: ", theme::focus_prompt()),
        Span::raw(choice.to_string()),
    ]));
    render_dialog(
        frame,
        DialogSpec {
            title: "Salir del asistente",
            title_style: theme::error_prompt(),
            body,
            key_hint: "Espacio: cambiar    Enter: confirmar    Esc: volver",
            width_pct: 70,
            height_pct: 45,
        },
    );
}
