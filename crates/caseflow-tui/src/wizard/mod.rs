mod render;

use crossterm::event::{Event, KeyCode, KeyEvent};
use tui_input::Input;
use tui_input::backend::crossterm::EventHandler;

use caseflow_app::{App, OrderReceipt};
use caseflow_core::catalog::{self, CaseStyle, Combo, LicensedAsset, Mica, PhoneBrand};
use caseflow_core::demand::{DemandKind, model_entry};
use caseflow_core::selection::{Contact, ImageConfig, ImageSource, SelectionPatch};
use caseflow_core::steps::StepId;

use crate::WizardExit;
use crate::keymap;
use crate::ui::picker::PickerState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FlowSignal {
    Continue,
    Exit(WizardExit),
}

/// Modal layered over the active step.
enum Overlay {
    ConfirmExit { yes: bool },
    Error(String),
    Receipt(OrderReceipt),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PhonePane {
    Brands,
    Models,
}

struct PhoneState {
    pane: PhonePane,
    filter: Input,
    filter_focused: bool,
    brand_picker: PickerState<&'static PhoneBrand>,
    model_picker: PickerState<&'static str>,
}

impl PhoneState {
    fn new() -> Self {
        Self {
            pane: PhonePane::Brands,
            filter: Input::default(),
            filter_focused: false,
            brand_picker: PickerState::from_items(catalog::PHONE_BRANDS.iter().collect()),
            model_picker: PickerState::from_items(Vec::new()),
        }
    }
}

struct CaseState {
    style_picker: PickerState<&'static CaseStyle>,
    type_index: usize,
    color_index: usize,
}

/// One row of the image selector: a licensed asset or the
/// bring-your-own-URL entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ImageChoice {
    Licensed(&'static LicensedAsset),
    CustomUrl,
}

struct ImageState {
    picker: PickerState<ImageChoice>,
    url_input: Input,
    url_focused: bool,
}

struct ContactState {
    name: Input,
    email: Input,
    phone: Input,
    focus: usize,
}

impl ContactState {
    const FIELDS: usize = 3;

    fn input_mut(&mut self, index: usize) -> &mut Input {
        match index {
            0 => &mut self.name,
            1 => &mut self.email,
            _ => &mut self.phone,
        }
    }
}

pub(crate) struct WizardFlow {
    phone: PhoneState,
    combo_picker: PickerState<&'static Combo>,
    mica_picker: PickerState<&'static Mica>,
    case: CaseState,
    image: ImageState,
    contact: ContactState,
    overlay: Option<Overlay>,
}

impl WizardFlow {
    pub(crate) fn new(app: &App) -> Self {
        let selection = app.selection();

        let mut combo_picker: PickerState<&'static Combo> =
            PickerState::from_items(catalog::COMBOS.iter().collect());
        combo_picker.select_where(|combo| combo.id == selection.combo_id);

        let mut mica_picker: PickerState<&'static Mica> =
            PickerState::from_items(catalog::MICAS.iter().collect());
        if let Some(mica_id) = selection.mica_id.as_deref() {
            mica_picker.select_where(|mica| mica.id == mica_id);
        }

        let mut style_picker: PickerState<&'static CaseStyle> =
            PickerState::from_items(catalog::CASE_STYLES.iter().collect());
        if let Some(case_id) = selection.case_id.as_deref() {
            style_picker.select_where(|style| style.id == case_id);
        }
        let type_index = catalog::CASE_TYPES
            .iter()
            .position(|case_type| *case_type == selection.case_type)
            .unwrap_or(0);

        let mut image_items: Vec<ImageChoice> = catalog::LICENSED_ASSETS
            .iter()
            .map(ImageChoice::Licensed)
            .collect();
        image_items.push(ImageChoice::CustomUrl);

        let contact = &selection.contact;

        Self {
            phone: PhoneState::new(),
            combo_picker,
            mica_picker,
            case: CaseState {
                style_picker,
                type_index,
                color_index: 0,
            },
            image: ImageState {
                picker: PickerState::from_items(image_items),
                url_input: Input::default(),
                url_focused: false,
            },
            contact: ContactState {
                name: Input::from(contact.name.clone()),
                email: Input::from(contact.email.clone()),
                phone: Input::from(contact.phone.clone()),
                focus: 0,
            },
            overlay: None,
        }
    }

    pub(crate) fn on_key(&mut self, key: KeyEvent, app: &mut App) -> FlowSignal {
        if self.overlay.is_some() {
            return self.on_overlay_key(key, app);
        }

        match app.current_step() {
            StepId::Onboarding => self.on_onboarding_key(key, app),
            StepId::PhoneSelector => self.on_phone_key(key, app),
            StepId::ComboSelector => self.on_combo_key(key, app),
            StepId::MicaSelector => self.on_mica_key(key, app),
            StepId::CaseSelector => self.on_case_key(key, app),
            StepId::ImageSelector => self.on_image_key(key, app),
            StepId::ContactForm => self.on_contact_key(key, app),
            StepId::FinalSummary => self.on_summary_key(key, app),
        }
    }

    fn open_exit_confirm(&mut self, app: &mut App) -> FlowSignal {
        app.cancel_pending_search();
        self.overlay = Some(Overlay::ConfirmExit { yes: false });
        FlowSignal::Continue
    }

    fn on_overlay_key(&mut self, key: KeyEvent, app: &mut App) -> FlowSignal {
        match self.overlay.as_mut() {
            Some(Overlay::ConfirmExit { yes }) => {
                if keymap::is_toggle(key) {
                    *yes = !*yes;
                    return FlowSignal::Continue;
                }
                if keymap::is_confirm(key) {
                    if *yes {
                        app.reset_app();
                        return FlowSignal::Exit(WizardExit::Canceled);
                    }
                    self.overlay = None;
                    return FlowSignal::Continue;
                }
                if keymap::is_back(key) {
                    self.overlay = None;
                }
                FlowSignal::Continue
            }
            Some(Overlay::Error(_)) => {
                if keymap::is_confirm(key) || keymap::is_back(key) {
                    self.overlay = None;
                }
                FlowSignal::Continue
            }
            Some(Overlay::Receipt(_)) => {
                if keymap::is_confirm(key) || keymap::is_back(key) {
                    return FlowSignal::Exit(WizardExit::Completed);
                }
                FlowSignal::Continue
            }
            None => FlowSignal::Continue,
        }
    }

    fn on_onboarding_key(&mut self, key: KeyEvent, app: &mut App) -> FlowSignal {
        if keymap::is_back(key) {
            return self.open_exit_confirm(app);
        }
        if keymap::is_confirm(key) {
            app.go_forward();
        }
        FlowSignal::Continue
    }

    fn on_phone_key(&mut self, key: KeyEvent, app: &mut App) -> FlowSignal {
        if keymap::is_back(key) {
            return self.open_exit_confirm(app);
        }

        if matches!(key.code, KeyCode::Tab) {
            self.phone.filter_focused = !self.phone.filter_focused;
            return FlowSignal::Continue;
        }

        if self.phone.filter_focused {
            if self.phone.filter.handle_event(&Event::Key(key)).is_some() {
                self.refresh_phone_matches(app);
            }
            return FlowSignal::Continue;
        }

        if keymap::is_prev(key) {
            app.cancel_pending_search();
            match self.phone.pane {
                PhonePane::Models => self.enter_brand_pane(),
                PhonePane::Brands => app.go_back(),
            }
            return FlowSignal::Continue;
        }

        if keymap::is_up(key) {
            match self.phone.pane {
                PhonePane::Brands => self.phone.brand_picker.move_up(),
                PhonePane::Models => self.phone.model_picker.move_up(),
            }
            return FlowSignal::Continue;
        }

        if keymap::is_down(key) {
            match self.phone.pane {
                PhonePane::Brands => self.phone.brand_picker.move_down(),
                PhonePane::Models => self.phone.model_picker.move_down(),
            }
            return FlowSignal::Continue;
        }

        if keymap::is_confirm(key) {
            match self.phone.pane {
                PhonePane::Brands => {
                    let Some(brand) = self.phone.brand_picker.selected_item().copied() else {
                        return FlowSignal::Continue;
                    };
                    app.update_selection(&SelectionPatch::phone(Some(brand.name), None));
                    app.cancel_pending_search();
                    self.enter_model_pane(brand);
                }
                PhonePane::Models => {
                    let Some(model) = self.phone.model_picker.selected_item().copied() else {
                        return FlowSignal::Continue;
                    };
                    app.update_selection(&SelectionPatch {
                        model: Some(Some(model.to_string())),
                        ..SelectionPatch::default()
                    });
                    app.cancel_pending_search();
                    self.phone = PhoneState::new();
                    app.go_forward();
                }
            }
        }

        FlowSignal::Continue
    }

    fn enter_brand_pane(&mut self) {
        self.phone.pane = PhonePane::Brands;
        self.phone.filter = Input::default();
        self.phone.filter_focused = false;
        self.phone
            .brand_picker
            .set_items(catalog::PHONE_BRANDS.iter().collect());
    }

    fn enter_model_pane(&mut self, brand: &'static PhoneBrand) {
        self.phone.pane = PhonePane::Models;
        self.phone.filter = Input::default();
        self.phone.filter_focused = true;
        self.phone
            .model_picker
            .set_items(brand.models.to_vec());
    }

    /// Re-filters the active pane. A query with no matches schedules a
    /// debounced demand-log entry; any match, or an empty query,
    /// cancels whatever is pending.
    fn refresh_phone_matches(&mut self, app: &mut App) {
        let query = self.phone.filter.value().trim().to_string();

        match self.phone.pane {
            PhonePane::Brands => {
                let matches: Vec<&'static PhoneBrand> = catalog::PHONE_BRANDS
                    .iter()
                    .filter(|brand| contains_ci(brand.name, &query))
                    .collect();
                let missing = matches.is_empty() && !query.is_empty();
                self.phone.brand_picker.set_items(matches);
                if missing {
                    app.record_missing_search(DemandKind::Brand, query);
                } else {
                    app.cancel_pending_search();
                }
            }
            PhonePane::Models => {
                let brand = app.selection().brand.clone().unwrap_or_default();
                let matches: Vec<&'static str> = catalog::models_for_brand(&brand)
                    .iter()
                    .copied()
                    .filter(|model| contains_ci(model, &query))
                    .collect();
                let missing = matches.is_empty() && !query.is_empty();
                self.phone.model_picker.set_items(matches);
                if missing {
                    app.record_missing_search(DemandKind::Model, model_entry(&brand, &query));
                } else {
                    app.cancel_pending_search();
                }
            }
        }
    }

    fn on_combo_key(&mut self, key: KeyEvent, app: &mut App) -> FlowSignal {
        if keymap::is_back(key) {
            return self.open_exit_confirm(app);
        }
        if keymap::is_prev(key) {
            app.go_back();
            return FlowSignal::Continue;
        }
        if keymap::is_up(key) {
            self.combo_picker.move_up();
            return FlowSignal::Continue;
        }
        if keymap::is_down(key) {
            self.combo_picker.move_down();
            return FlowSignal::Continue;
        }
        if keymap::is_confirm(key)
            && let Some(combo) = self.combo_picker.selected_item()
        {
            app.update_selection(&SelectionPatch::combo(combo.id));
            app.go_forward();
        }
        FlowSignal::Continue
    }

    fn on_mica_key(&mut self, key: KeyEvent, app: &mut App) -> FlowSignal {
        if keymap::is_back(key) {
            return self.open_exit_confirm(app);
        }
        if keymap::is_prev(key) {
            app.go_back();
            return FlowSignal::Continue;
        }
        if keymap::is_up(key) {
            self.mica_picker.move_up();
            return FlowSignal::Continue;
        }
        if keymap::is_down(key) {
            self.mica_picker.move_down();
            return FlowSignal::Continue;
        }
        if keymap::is_confirm(key)
            && let Some(mica) = self.mica_picker.selected_item()
        {
            app.update_selection(&SelectionPatch {
                mica_id: Some(Some(mica.id.to_string())),
                ..SelectionPatch::default()
            });
            app.go_forward();
        }
        FlowSignal::Continue
    }

    fn on_case_key(&mut self, key: KeyEvent, app: &mut App) -> FlowSignal {
        if keymap::is_back(key) {
            return self.open_exit_confirm(app);
        }
        if keymap::is_prev(key) {
            app.go_back();
            return FlowSignal::Continue;
        }
        if keymap::is_up(key) {
            self.case.style_picker.move_up();
            self.case.color_index = 0;
            return FlowSignal::Continue;
        }
        if keymap::is_down(key) {
            self.case.style_picker.move_down();
            self.case.color_index = 0;
            return FlowSignal::Continue;
        }
        if keymap::is_toggle(key) {
            self.case.type_index = (self.case.type_index + 1) % catalog::CASE_TYPES.len();
            return FlowSignal::Continue;
        }
        if matches!(key.code, KeyCode::Char('c'))
            && let Some(style) = self.case.style_picker.selected_item()
        {
            self.case.color_index = (self.case.color_index + 1) % style.colors.len();
            return FlowSignal::Continue;
        }
        if keymap::is_confirm(key)
            && let Some(style) = self.case.style_picker.selected_item()
        {
            let color = style
                .colors
                .get(self.case.color_index)
                .copied()
                .unwrap_or(catalog::DEFAULT_CASE_COLOR);
            app.update_selection(&SelectionPatch {
                case_id: Some(Some(style.id.to_string())),
                case_type: Some(catalog::CASE_TYPES[self.case.type_index].to_string()),
                case_color: Some(color.to_string()),
                ..SelectionPatch::default()
            });
            app.go_forward();
        }
        FlowSignal::Continue
    }

    fn on_image_key(&mut self, key: KeyEvent, app: &mut App) -> FlowSignal {
        if self.image.url_focused {
            if keymap::is_back(key) {
                self.image.url_focused = false;
                return FlowSignal::Continue;
            }
            if keymap::is_confirm(key) {
                let url = self.image.url_input.value().trim().to_string();
                if url.is_empty() {
                    return FlowSignal::Continue;
                }
                app.update_selection(&SelectionPatch {
                    image: Some(ImageSource::Custom {
                        url,
                        config: ImageConfig::default(),
                    }),
                    ..SelectionPatch::default()
                });
                self.image.url_focused = false;
                app.go_forward();
                return FlowSignal::Continue;
            }
            let _ = self.image.url_input.handle_event(&Event::Key(key));
            return FlowSignal::Continue;
        }

        if keymap::is_back(key) {
            return self.open_exit_confirm(app);
        }
        if keymap::is_prev(key) {
            app.go_back();
            return FlowSignal::Continue;
        }
        if keymap::is_up(key) {
            self.image.picker.move_up();
            return FlowSignal::Continue;
        }
        if keymap::is_down(key) {
            self.image.picker.move_down();
            return FlowSignal::Continue;
        }
        if matches!(key.code, KeyCode::Char('x')) && app.selection().image.is_set() {
            app.reset_image();
            return FlowSignal::Continue;
        }
        if keymap::is_confirm(key) {
            match self.image.picker.selected_item() {
                Some(ImageChoice::Licensed(asset)) => {
                    app.update_selection(&SelectionPatch {
                        image: Some(ImageSource::Brand {
                            asset_id: asset.id.to_string(),
                            license_tag: asset.license_tag.to_string(),
                            config: ImageConfig::default(),
                        }),
                        ..SelectionPatch::default()
                    });
                    app.go_forward();
                }
                Some(ImageChoice::CustomUrl) => {
                    self.image.url_focused = true;
                }
                None => {}
            }
        }
        FlowSignal::Continue
    }

    fn on_contact_key(&mut self, key: KeyEvent, app: &mut App) -> FlowSignal {
        if keymap::is_back(key) {
            return self.open_exit_confirm(app);
        }
        if matches!(key.code, KeyCode::Tab) {
            self.contact.focus = (self.contact.focus + 1) % ContactState::FIELDS;
            return FlowSignal::Continue;
        }
        if matches!(key.code, KeyCode::BackTab) {
            if self.contact.focus == 0 {
                app.go_back();
            } else {
                self.contact.focus -= 1;
            }
            return FlowSignal::Continue;
        }
        if keymap::is_confirm(key) {
            app.update_selection(&SelectionPatch {
                contact: Some(Contact {
                    name: self.contact.name.value().trim().to_string(),
                    email: self.contact.email.value().trim().to_string(),
                    phone: self.contact.phone.value().trim().to_string(),
                }),
                ..SelectionPatch::default()
            });
            app.go_forward();
            return FlowSignal::Continue;
        }

        let focus = self.contact.focus;
        let _ = self.contact.input_mut(focus).handle_event(&Event::Key(key));
        FlowSignal::Continue
    }

    fn on_summary_key(&mut self, key: KeyEvent, app: &mut App) -> FlowSignal {
        if keymap::is_back(key) {
            return self.open_exit_confirm(app);
        }
        if keymap::is_prev(key) {
            app.go_back();
            return FlowSignal::Continue;
        }
        if keymap::is_confirm(key) {
            match app.submit_order() {
                Ok(receipt) => self.overlay = Some(Overlay::Receipt(receipt)),
                Err(error) => self.overlay = Some(Overlay::Error(format!("{error:#}"))),
            }
        }
        FlowSignal::Continue
    }
}

fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}
