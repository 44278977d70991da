use crossbeam_channel::{bounded, Receiver, Sender};
use eframe::egui;
use form_core::{
    log_rows, reduce, render_state, FieldControl, FormAction, FormState, Outcome, RenderedField,
    Transition,
};
use shared::{FieldKind, FormError, FormType, SchemaRegistry};

use crate::config::StartupConfig;
use crate::controller::events::{PendingNotice, UiEvent};
use crate::controller::orchestration::dispatch_ui_event;
use crate::ui::theme::{
    error_text_color, style_for_settings, DisplaySettings, PersistedDisplaySettings, ThemePreset,
    MAX_TEXT_SCALE, MIN_TEXT_SCALE, SETTINGS_STORAGE_KEY,
};

const UI_EVENT_QUEUE_CAPACITY: usize = 256;
const NO_SELECTION_LABEL: &str = "Select Form";

pub struct DynamicFormApp {
    event_tx: Sender<UiEvent>,
    event_rx: Receiver<UiEvent>,
    registry: &'static SchemaRegistry,

    form: FormState,
    pending_notice: Option<PendingNotice>,
    status: String,

    settings_open: bool,
    display: DisplaySettings,
    applied_display: Option<DisplaySettings>,
}

impl DynamicFormApp {
    pub fn new(startup: &StartupConfig, persisted: Option<PersistedDisplaySettings>) -> Self {
        let (event_tx, event_rx) = bounded::<UiEvent>(UI_EVENT_QUEUE_CAPACITY);
        let mut app = Self {
            event_tx,
            event_rx,
            registry: SchemaRegistry::global(),
            form: FormState::new(),
            pending_notice: None,
            status: "Ready".to_string(),
            settings_open: false,
            display: persisted.unwrap_or_default().into_runtime(),
            applied_display: None,
        };
        if let Some(form_type) = startup.initial_form {
            app.handle_event(UiEvent::Form(FormAction::SelectForm {
                key: form_type.key().to_string(),
            }));
        }
        app
    }

    /// Runs every queued event through the reducer, in arrival order.
    fn process_ui_events(&mut self) {
        while let Ok(event) = self.event_rx.try_recv() {
            self.handle_event(event);
        }
    }

    fn handle_event(&mut self, event: UiEvent) {
        match event {
            UiEvent::Form(action) => {
                let state = std::mem::take(&mut self.form);
                let Transition { state, outcome } = reduce(self.registry, state, action);
                self.form = state;
                self.apply_outcome(outcome);
            }
            UiEvent::DismissAcknowledgement => self.pending_notice = None,
            UiEvent::ToggleSettings => self.settings_open = !self.settings_open,
        }
    }

    fn apply_outcome(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Acknowledged(acknowledgement) => {
                self.status = acknowledgement.message().to_string();
                self.pending_notice = Some(PendingNotice { acknowledgement });
            }
            Outcome::Rejected(err @ FormError::MissingRequiredFields { .. }) => {
                self.status = err.to_string();
            }
            Outcome::Rejected(err) => {
                tracing::warn!("form action rejected: {err}");
            }
            Outcome::Applied | Outcome::Ignored => {}
        }
    }

    fn apply_display_if_needed(&mut self, ctx: &egui::Context) {
        if self.applied_display == Some(self.display) {
            return;
        }
        ctx.set_style(style_for_settings(&ctx.style(), self.display));
        self.applied_display = Some(self.display);
    }

    fn selection_label(&self) -> String {
        match self.form.selection() {
            None => NO_SELECTION_LABEL.to_string(),
            Some(key) => key
                .parse::<FormType>()
                .map(|form_type| form_type.label().to_string())
                .unwrap_or_else(|_| key.to_string()),
        }
    }

    fn show_top_bar(&self, ctx: &egui::Context, events: &mut Vec<UiEvent>) {
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading("Dynamic Form");
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button("Settings").clicked() {
                        events.push(UiEvent::ToggleSettings);
                    }
                });
            });
        });
    }

    fn show_status_bar(&self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal_wrapped(|ui| {
                ui.small("Status:");
                ui.small(egui::RichText::new(&self.status).weak());
            });
        });
    }

    fn show_form_selector(&self, ui: &mut egui::Ui, events: &mut Vec<UiEvent>) {
        ui.horizontal(|ui| {
            ui.label("Choose Form Type:");
            egui::ComboBox::from_id_salt("form_type")
                .selected_text(self.selection_label())
                .show_ui(ui, |ui| {
                    let current = self.form.selection().unwrap_or("");
                    let choices = std::iter::once(("", NO_SELECTION_LABEL)).chain(
                        self.registry
                            .form_types()
                            .map(|form_type| (form_type.key(), form_type.label())),
                    );
                    for (key, label) in choices {
                        let selected = current == key;
                        if ui.selectable_label(selected, label).clicked() && !selected {
                            events.push(UiEvent::Form(FormAction::SelectForm {
                                key: key.to_string(),
                            }));
                        }
                    }
                });
        });
    }

    fn show_form(&self, ui: &mut egui::Ui, events: &mut Vec<UiEvent>) {
        if self.form.selection().is_none() {
            return;
        }

        egui::Frame::group(ui.style()).show(ui, |ui| {
            ui.set_width(ui.available_width());
            let mut submit_requested = false;
            for field in render_state(self.registry, &self.form) {
                submit_requested |= self.show_field(ui, &field, events);
                ui.add_space(4.0);
            }
            if ui.button("Submit").clicked() || submit_requested {
                events.push(UiEvent::Form(FormAction::Submit));
            }
        });
    }

    /// Returns true when Enter was pressed inside a text input.
    fn show_field(
        &self,
        ui: &mut egui::Ui,
        field: &RenderedField,
        events: &mut Vec<UiEvent>,
    ) -> bool {
        let mut enter_pressed = false;
        ui.label(egui::RichText::new(&field.label).strong());

        match &field.control {
            FieldControl::Choice {
                placeholder,
                options,
                selected,
            } => {
                let shown = if selected.is_empty() {
                    placeholder.as_str()
                } else {
                    selected.as_str()
                };
                egui::ComboBox::from_id_salt(("field", field.name.as_str()))
                    .selected_text(shown)
                    .width(ui.available_width().min(320.0))
                    .show_ui(ui, |ui| {
                        let choices = std::iter::once(("", placeholder.as_str()))
                            .chain(options.iter().map(|option| (option.as_str(), option.as_str())));
                        for (value, label) in choices {
                            let is_current = selected == value;
                            if ui.selectable_label(is_current, label).clicked() && !is_current {
                                events.push(set_field(&field.name, value));
                            }
                        }
                    });
            }
            FieldControl::Input { kind, value } => {
                let mut buffer = value.clone();
                let response = ui.add(
                    egui::TextEdit::singleline(&mut buffer)
                        .id_salt(("field", field.name.as_str()))
                        .password(*kind == FieldKind::Password)
                        .hint_text(input_hint(kind))
                        .desired_width(ui.available_width().min(320.0)),
                );
                if response.changed() {
                    events.push(set_field(&field.name, &buffer));
                }
                enter_pressed =
                    response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
            }
        }

        // Repeated under every field while set.
        if let Some(error) = &field.error {
            ui.label(egui::RichText::new(error).color(error_text_color(self.display.preset)));
        }
        enter_pressed
    }

    fn show_submitted_data(&self, ui: &mut egui::Ui, events: &mut Vec<UiEvent>) {
        ui.heading("Submitted Data");
        egui::ScrollArea::vertical()
            .id_salt("submitted_data_scroll")
            .show(ui, |ui| {
                egui::Grid::new("submitted_data")
                    .num_columns(2)
                    .striped(true)
                    .spacing([16.0, 6.0])
                    .show(ui, |ui| {
                        ui.label(egui::RichText::new("Data").strong());
                        ui.label(egui::RichText::new("Actions").strong());
                        ui.end_row();

                        for row in log_rows(self.form.log()) {
                            ui.label(egui::RichText::new(&row.data).monospace());
                            ui.horizontal(|ui| {
                                if ui.button("Edit").clicked() {
                                    events.push(UiEvent::Form(FormAction::Edit { index: row.index }));
                                }
                                if ui.button("Delete").clicked() {
                                    events.push(UiEvent::Form(FormAction::Delete {
                                        index: row.index,
                                    }));
                                }
                            });
                            ui.end_row();
                        }
                    });
            });
    }

    fn show_notice(&self, ctx: &egui::Context, events: &mut Vec<UiEvent>) {
        let Some(notice) = self.pending_notice else {
            return;
        };
        egui::Window::new("notice")
            .title_bar(false)
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.label(notice.message());
                ui.add_space(6.0);
                ui.vertical_centered(|ui| {
                    if ui.button("OK").clicked() {
                        events.push(UiEvent::DismissAcknowledgement);
                    }
                });
            });
    }

    fn show_settings_window(&mut self, ctx: &egui::Context) {
        if !self.settings_open {
            return;
        }

        let mut settings_open = self.settings_open;
        egui::Window::new("Settings")
            .open(&mut settings_open)
            .resizable(false)
            .show(ctx, |ui| {
                ui.label("Theme preset");
                egui::ComboBox::from_id_salt("theme_preset")
                    .selected_text(self.display.preset.label())
                    .show_ui(ui, |ui| {
                        for preset in ThemePreset::ALL {
                            ui.selectable_value(&mut self.display.preset, preset, preset.label());
                        }
                    });
                ui.add(
                    egui::Slider::new(
                        &mut self.display.text_scale,
                        MIN_TEXT_SCALE..=MAX_TEXT_SCALE,
                    )
                    .text("Text scale")
                    .step_by(0.05),
                );
                if ui.button("Reset to defaults").clicked() {
                    self.display = DisplaySettings::default();
                }
            });
        self.settings_open = settings_open;
    }
}

fn set_field(name: &str, value: &str) -> UiEvent {
    UiEvent::Form(FormAction::SetField {
        name: name.to_string(),
        value: value.to_string(),
    })
}

fn input_hint(kind: &FieldKind) -> &'static str {
    match kind {
        FieldKind::Number => "0",
        FieldKind::Date => "YYYY-MM-DD",
        _ => "",
    }
}

impl eframe::App for DynamicFormApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();
        self.apply_display_if_needed(ctx);

        let mut events = Vec::new();
        self.show_top_bar(ctx, &mut events);
        self.show_status_bar(ctx);
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.add_enabled_ui(self.pending_notice.is_none(), |ui| {
                self.show_form_selector(ui, &mut events);
                ui.add_space(8.0);
                self.show_form(ui, &mut events);
                ui.add_space(12.0);
                ui.separator();
                self.show_submitted_data(ui, &mut events);
            });
        });
        self.show_notice(ctx, &mut events);
        self.show_settings_window(ctx);

        if !events.is_empty() {
            for event in events {
                dispatch_ui_event(&self.event_tx, event, &mut self.status);
            }
            ctx.request_repaint();
        }
    }

    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        let settings = PersistedDisplaySettings::from_runtime(self.display);
        if let Ok(serialized) = serde_json::to_string(&settings) {
            storage.set_string(SETTINGS_STORAGE_KEY, serialized);
        }
    }
}

#[cfg(test)]
mod tests {
    use form_core::Acknowledgement;
    use shared::REQUIRED_FIELDS_MESSAGE;

    use super::*;

    fn app() -> DynamicFormApp {
        DynamicFormApp::new(&StartupConfig::default(), None)
    }

    fn queue(app: &mut DynamicFormApp, events: impl IntoIterator<Item = UiEvent>) {
        for event in events {
            dispatch_ui_event(&app.event_tx, event, &mut app.status);
        }
        app.process_ui_events();
    }

    #[test]
    fn starts_with_configured_form_selected() {
        let startup = StartupConfig {
            initial_form: Some(FormType::PaymentInformation),
            ..StartupConfig::default()
        };
        let app = DynamicFormApp::new(&startup, None);
        assert_eq!(app.form.selection(), Some("paymentInformation"));
        assert_eq!(app.selection_label(), "Payment Information");
    }

    #[test]
    fn successful_submit_raises_notice_until_dismissed() {
        let mut app = app();
        queue(
            &mut app,
            [
                UiEvent::Form(FormAction::SelectForm {
                    key: "userInformation".to_string(),
                }),
                set_field("firstName", "Ada"),
                set_field("lastName", "Lovelace"),
                UiEvent::Form(FormAction::Submit),
            ],
        );
        assert_eq!(
            app.pending_notice,
            Some(PendingNotice {
                acknowledgement: Acknowledgement::Submitted
            })
        );
        assert_eq!(app.form.log().len(), 1);

        queue(&mut app, [UiEvent::DismissAcknowledgement]);
        assert_eq!(app.pending_notice, None);
    }

    #[test]
    fn failed_submit_shows_message_without_notice() {
        let mut app = app();
        queue(
            &mut app,
            [
                UiEvent::Form(FormAction::SelectForm {
                    key: "addressInformation".to_string(),
                }),
                UiEvent::Form(FormAction::Submit),
            ],
        );
        assert_eq!(app.pending_notice, None);
        assert_eq!(app.form.error(), Some(REQUIRED_FIELDS_MESSAGE));
        assert_eq!(app.status, REQUIRED_FIELDS_MESSAGE);
    }

    #[test]
    fn stale_delete_is_absorbed() {
        let mut app = app();
        queue(&mut app, [UiEvent::Form(FormAction::Delete { index: 3 })]);
        assert_eq!(app.pending_notice, None);
        assert_eq!(app.status, "Ready");
    }

    #[test]
    fn unknown_selection_is_labeled_by_key() {
        let mut app = app();
        queue(
            &mut app,
            [UiEvent::Form(FormAction::SelectForm {
                key: "legacyForm".to_string(),
            })],
        );
        assert_eq!(app.selection_label(), "legacyForm");
        assert!(render_state(app.registry, &app.form).is_empty());
    }
}
