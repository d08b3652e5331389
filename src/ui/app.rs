//! Main application window
//!
//! Renders the navigation sidebar and the four pages (student list, add
//! form, marksheet, about) plus the edit window. Every change goes through
//! [`StudentStore`]; the window only keeps record ids and form input
//! between frames and re-checks them whenever the store revision moves.

use crate::config::AppConfig;
use crate::ui::forms::{MarksheetForm, StudentForm};
use crate::ui::theme;
use egui::{Align, Layout, RichText};
use std::path::PathBuf;
use studentdesk_core::records::student::{
    AGE_RANGE, BRANCHES, GENDERS, GPA_RANGE, MARKS_RANGE, PROGRAMS,
};
use studentdesk_core::records::text::{NAME_LEN, PHONE_LEN, REG_NUM_LEN, SUBJECT_NAME_LEN};
use studentdesk_core::records::{RecordId, Student, StudentFields};
use studentdesk_core::{StoreError, StudentStore};

/// Column titles of the student table
const COLUMNS: &[&str] = &[
    "Name", "Reg No", "Branch", "Program", "Gender", "Phone", "Age", "GPA",
];

/// Page shown in the central panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    List,
    Add,
    Marksheet,
    About,
}

/// Message shown in the status bar
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    Info(String),
    Error(String),
}

/// Student records application state
pub struct StudentApp {
    store: StudentStore,
    config: AppConfig,
    config_path: PathBuf,
    page: Page,
    query: String,
    /// Selected row, by id so it survives deletes of other rows
    selected: Option<RecordId>,
    add_form: StudentForm,
    /// Open edit window: record being edited and its form
    edit: Option<(RecordId, StudentForm)>,
    marksheet: Option<MarksheetForm>,
    status: Option<Status>,
    /// Why the data file could not be loaded; changes are refused while set
    load_error: Option<String>,
    /// Store revision the view state was last checked against
    seen_revision: u64,
    /// Theme currently installed in the egui context
    applied_dark_mode: Option<bool>,
}

impl StudentApp {
    /// Create the application from the eframe creation context
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        store: StudentStore,
        config: AppConfig,
        config_path: PathBuf,
    ) -> Self {
        theme::apply(&cc.egui_ctx, config.dark_mode);
        let mut app = Self::with_store(store, config, config_path);
        app.applied_dark_mode = Some(app.config.dark_mode);
        app
    }

    /// Create the application state without a window
    pub fn with_store(store: StudentStore, config: AppConfig, config_path: PathBuf) -> Self {
        let seen_revision = store.revision();
        Self {
            store,
            config,
            config_path,
            page: Page::List,
            query: String::new(),
            selected: None,
            add_form: StudentForm::default(),
            edit: None,
            marksheet: None,
            status: None,
            load_error: None,
            seen_revision,
            applied_dark_mode: None,
        }
    }

    /// Start with the error from a failed load of the data file
    ///
    /// The store is expected to be empty. Changes are refused until the file
    /// reloads cleanly or the user chooses to start a new table over it.
    pub fn with_load_error(mut self, error: StoreError) -> Self {
        let message = error.to_string();
        self.status = Some(Status::Error(message.clone()));
        self.load_error = Some(message);
        self
    }

    pub fn load_error(&self) -> Option<&str> {
        self.load_error.as_deref()
    }

    /// Read the data file again
    pub fn reload(&mut self) {
        match self.store.load() {
            Ok(()) => {
                self.load_error = None;
                let count = self.store.len();
                self.report(Ok(format!("Loaded {} student(s)", count)));
            }
            Err(e) => {
                tracing::warn!(error = %e, "Reload failed");
                let message = e.to_string();
                self.status = Some(Status::Error(message.clone()));
                self.load_error = Some(message);
            }
        }
    }

    /// Drop the unreadable data file; the next change overwrites it
    pub fn start_new_table(&mut self) {
        if self.load_error.take().is_some() {
            tracing::warn!(
                path = %self.store.path().display(),
                "Starting a new table over an unreadable data file"
            );
            self.status = Some(Status::Info(
                "Started a new table, the next change replaces the data file".to_string(),
            ));
        }
    }

    /// Refuse changes while the data file is unreadable
    fn ensure_writable(&mut self) -> bool {
        match &self.load_error {
            None => true,
            Some(message) => {
                self.status = Some(Status::Error(format!(
                    "{}. Reload the file or start a new table first",
                    message
                )));
                false
            }
        }
    }

    pub fn store(&self) -> &StudentStore {
        &self.store
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn page(&self) -> Page {
        self.page
    }

    pub fn navigate(&mut self, page: Page) {
        self.page = page;
    }

    pub fn status(&self) -> Option<&Status> {
        self.status.as_ref()
    }

    pub fn selected(&self) -> Option<RecordId> {
        self.selected
    }

    pub fn select(&mut self, id: Option<RecordId>) {
        self.selected = id;
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    /// Ids of the rows matching the current search, in table order
    pub fn visible_ids(&self) -> Vec<RecordId> {
        self.store.search(&self.query).map(|(_, s)| s.id).collect()
    }

    /// Selected record, if the current search shows it
    fn visible_selection(&self) -> Option<(usize, &Student)> {
        let id = self.selected?;
        self.store.search(&self.query).find(|(_, s)| s.id == id)
    }

    /// Table position of the selected record, if the current search shows it
    pub fn selected_position(&self) -> Option<usize> {
        self.visible_selection().map(|(position, _)| position)
    }

    pub fn add_form_mut(&mut self) -> &mut StudentForm {
        &mut self.add_form
    }

    pub fn edit_form_mut(&mut self) -> Option<&mut StudentForm> {
        self.edit.as_mut().map(|(_, form)| form)
    }

    pub fn marksheet_mut(&mut self) -> Option<&mut MarksheetForm> {
        self.marksheet.as_mut()
    }

    /// Drop view state that points at records which no longer exist
    fn sync_with_store(&mut self) {
        if self.store.revision() == self.seen_revision {
            return;
        }
        self.seen_revision = self.store.revision();

        let store = &self.store;
        if self.selected.is_some_and(|id| store.position_of(id).is_none()) {
            self.selected = None;
        }
        if self
            .edit
            .as_ref()
            .is_some_and(|(id, _)| store.position_of(*id).is_none())
        {
            self.edit = None;
        }
        if self
            .marksheet
            .as_ref()
            .is_some_and(|sheet| store.position_of(sheet.id).is_none())
        {
            self.marksheet = None;
            if self.page == Page::Marksheet {
                self.page = Page::List;
            }
        }
    }

    fn report(&mut self, result: anyhow::Result<String>) -> bool {
        match result {
            Ok(message) => {
                tracing::info!("{}", message);
                self.status = Some(Status::Info(message));
                self.sync_with_store();
                true
            }
            Err(e) => {
                tracing::warn!(error = %e, "Operation rejected");
                self.status = Some(Status::Error(e.to_string()));
                false
            }
        }
    }

    /// Append the add form as a new student and return to the list
    pub fn save_new(&mut self) {
        if !self.ensure_writable() {
            return;
        }
        let name = self.add_form.fields.name.clone();
        match self.add_form.submit_new(&mut self.store) {
            Ok(id) => {
                self.selected = Some(id);
                self.page = Page::List;
                self.report(Ok(format!("Added {}", name)));
            }
            Err(e) => {
                self.report(Err(e));
            }
        }
    }

    /// Open the edit window for the selected student
    pub fn begin_edit(&mut self) {
        let Some((_, student)) = self.visible_selection() else {
            self.status = Some(Status::Error("Select a student to edit".to_string()));
            return;
        };
        let edit = (student.id, StudentForm::for_student(student));
        self.edit = Some(edit);
    }

    /// Store the edit window and close it
    pub fn save_edit(&mut self) {
        if !self.ensure_writable() {
            return;
        }
        let Some((id, form)) = self.edit.take() else {
            return;
        };
        let result = form
            .submit_edit(&mut self.store, id)
            .map(|()| format!("Updated {}", form.fields.name));
        if !self.report(result) {
            // Keep the window open with what was typed
            self.edit = Some((id, form));
        }
    }

    pub fn cancel_edit(&mut self) {
        self.edit = None;
    }

    /// Delete the selected student
    pub fn delete_selected(&mut self) {
        if !self.ensure_writable() {
            return;
        }
        let Some(position) = self.selected_position() else {
            self.status = Some(Status::Error("Select a student to delete".to_string()));
            return;
        };
        let result = self
            .store
            .delete_at(position)
            .map(|removed| format!("Deleted {}", removed.profile.name))
            .map_err(anyhow::Error::from);
        if self.report(result) {
            self.selected = None;
        }
    }

    /// Show the marksheet of the selected student
    pub fn open_marksheet(&mut self) {
        let Some((_, student)) = self.visible_selection() else {
            self.status = Some(Status::Error("Select a student first".to_string()));
            return;
        };
        let sheet = MarksheetForm::for_student(student);
        self.marksheet = Some(sheet);
        self.page = Page::Marksheet;
    }

    /// Store the marksheet and return to the list
    pub fn save_marks(&mut self) {
        if !self.ensure_writable() {
            return;
        }
        let Some(sheet) = self.marksheet.as_ref() else {
            return;
        };
        let result = sheet
            .submit(&mut self.store)
            .map(|()| format!("Saved marksheet of {}", sheet.name));
        if self.report(result) {
            self.marksheet = None;
            self.page = Page::List;
        }
    }

    pub fn close_marksheet(&mut self) {
        self.marksheet = None;
        self.page = Page::List;
    }

    /// Switch theme and remember the choice
    pub fn set_dark_mode(&mut self, dark: bool) {
        self.config.dark_mode = dark;
        self.persist_config();
    }

    /// Show or hide the navigation sidebar and remember the choice
    pub fn toggle_sidebar(&mut self) {
        self.config.sidebar_open = !self.config.sidebar_open;
        self.persist_config();
    }

    fn persist_config(&self) {
        if let Err(e) = self.config.save(&self.config_path) {
            tracing::error!(path = %self.config_path.display(), error = %e, "Failed to save config");
        }
    }

    fn header(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if ui.button("Menu").clicked() {
                    self.toggle_sidebar();
                }
                ui.heading("Student Data Management System");
            });
        });
    }

    fn sidebar(&mut self, ctx: &egui::Context) {
        egui::SidePanel::left("navigation")
            .resizable(false)
            .show_animated(ctx, self.config.sidebar_open, |ui| {
                ui.add_space(8.0);
                ui.label(RichText::new("STUDENT DESK").strong().size(18.0));
                ui.separator();

                for (page, label) in [
                    (Page::List, "Students"),
                    (Page::Add, "Add Student"),
                    (Page::About, "About"),
                ] {
                    if ui.selectable_label(self.page == page, label).clicked() {
                        self.page = page;
                    }
                }

                ui.separator();
                let mut dark = self.config.dark_mode;
                if ui.checkbox(&mut dark, "Dark mode").changed() {
                    self.set_dark_mode(dark);
                }
            });
    }

    fn status_bar(&mut self, ctx: &egui::Context) {
        let dark = self.config.dark_mode;
        egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
            ui.horizontal(|ui| {
                match &self.status {
                    Some(Status::Info(message)) => {
                        ui.label(message.as_str());
                    }
                    Some(Status::Error(message)) => {
                        ui.colored_label(theme::error_color(dark), message.as_str());
                    }
                    None => {}
                }
                ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                    ui.label(format!(
                        "{}/{} records | {}",
                        self.store.len(),
                        self.store.capacity(),
                        self.store.path().display()
                    ));
                });
            });
        });
    }

    fn load_error_banner(&mut self, ui: &mut egui::Ui) {
        let Some(message) = self.load_error.clone() else {
            return;
        };
        let color = theme::error_color(self.config.dark_mode);
        let mut reload = false;
        let mut start_new = false;
        ui.group(|ui| {
            ui.colored_label(color, message);
            ui.horizontal(|ui| {
                reload = ui.button("Reload File").clicked();
                start_new = ui.button("Start New Table").clicked();
            });
        });
        ui.add_space(8.0);

        if reload {
            self.reload();
        } else if start_new {
            self.start_new_table();
        }
    }

    fn list_page(&mut self, ui: &mut egui::Ui) {
        self.load_error_banner(ui);
        let stats = self.store.statistics();
        ui.horizontal(|ui| {
            stat_card(ui, &stats.count.to_string(), "Total Students");
            stat_card(ui, &format!("{:.2}", stats.average_gpa), "Average GPA");
        });
        ui.add_space(8.0);

        let has_selection = self.selected_position().is_some();
        let mut delete = false;
        let mut edit = false;
        let mut marks = false;
        ui.horizontal(|ui| {
            ui.add(
                egui::TextEdit::singleline(&mut self.query)
                    .hint_text("Search student by Name or Reg No.")
                    .desired_width(320.0),
            );
            delete = ui
                .add_enabled(has_selection, egui::Button::new("Delete Selected"))
                .clicked();
            edit = ui
                .add_enabled(has_selection, egui::Button::new("Edit Selected"))
                .clicked();
            marks = ui
                .add_enabled(has_selection, egui::Button::new("Marksheet"))
                .clicked();
        });
        ui.separator();

        let mut clicked = None;
        let mut activated = None;
        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                egui::Grid::new("students")
                    .num_columns(COLUMNS.len())
                    .striped(true)
                    .spacing([16.0, 6.0])
                    .show(ui, |ui| {
                        for title in COLUMNS {
                            ui.strong(*title);
                        }
                        ui.end_row();

                        for (_, student) in self.store.search(&self.query) {
                            let profile = &student.profile;
                            let response = ui.selectable_label(
                                self.selected == Some(student.id),
                                profile.name.as_str(),
                            );
                            if response.clicked() {
                                clicked = Some(student.id);
                            }
                            if response.double_clicked() {
                                activated = Some(student.id);
                            }
                            ui.label(profile.reg_num.as_str());
                            ui.label(profile.branch.as_str());
                            ui.label(profile.program.as_str());
                            ui.label(profile.gender.as_str());
                            ui.label(profile.phone.as_str());
                            ui.label(profile.age.to_string());
                            ui.label(format!("{:.2}", profile.gpa));
                            ui.end_row();
                        }
                    });
            });

        if let Some(id) = clicked {
            self.selected = Some(id);
        }
        if delete {
            self.delete_selected();
        } else if edit {
            self.begin_edit();
        } else if marks {
            self.open_marksheet();
        } else if let Some(id) = activated {
            self.selected = Some(id);
            self.open_marksheet();
        }
    }

    fn add_page(&mut self, ui: &mut egui::Ui) {
        ui.heading("Add New Student");
        ui.add_space(8.0);
        profile_form(ui, "add", &mut self.add_form.fields);
        ui.add_space(8.0);

        let mut save = false;
        let mut cancel = false;
        ui.horizontal(|ui| {
            save = ui.button("Save Student").clicked();
            cancel = ui.button("Cancel").clicked();
        });

        if save {
            self.save_new();
        } else if cancel {
            self.page = Page::List;
        }
    }

    fn marksheet_page(&mut self, ui: &mut egui::Ui) {
        if self.marksheet.is_none() {
            self.page = Page::List;
            return;
        }

        let mut save = false;
        let mut back = false;
        if let Some(sheet) = self.marksheet.as_mut() {
            ui.heading("Student Record / Marksheet");
            ui.add_space(8.0);
            ui.label(RichText::new(sheet.name.as_str()).size(24.0).strong());
            ui.label(sheet.reg_num.as_str());
            ui.add_space(8.0);

            egui::Grid::new("marksheet")
                .num_columns(2)
                .spacing([20.0, 10.0])
                .show(ui, |ui| {
                    ui.strong("Subject Name");
                    ui.strong("Marks Obtained");
                    ui.end_row();
                    for subject in sheet.subjects.iter_mut() {
                        ui.add(
                            egui::TextEdit::singleline(&mut subject.name)
                                .char_limit(SUBJECT_NAME_LEN - 1)
                                .desired_width(200.0),
                        );
                        ui.add(
                            egui::DragValue::new(&mut subject.marks)
                                .range(MARKS_RANGE)
                                .speed(1.0),
                        );
                        ui.end_row();
                    }
                    ui.label("Total");
                    ui.label(format!("{:.1}", sheet.total()));
                    ui.end_row();
                });

            ui.add_space(8.0);
            ui.horizontal(|ui| {
                save = ui.button("Save Record").clicked();
                back = ui.button("Back").clicked();
            });
        }

        if save {
            self.save_marks();
        } else if back {
            self.close_marksheet();
        }
    }

    fn about_page(&mut self, ui: &mut egui::Ui) {
        ui.heading("About");
        ui.add_space(8.0);
        ui.label(RichText::new("Student Data Management System").strong());
        ui.label(format!("Version {}", crate::VERSION));
        ui.add_space(8.0);
        ui.label("Add, edit, search and delete student records and keep a six-subject marksheet for each student.");
        ui.label(format!(
            "Records are kept in a single data file and the table holds up to {} students.",
            self.store.capacity()
        ));
        ui.label(format!("Data file: {}", self.store.path().display()));
    }

    fn edit_window(&mut self, ctx: &egui::Context) {
        let Some((_, form)) = self.edit.as_mut() else {
            return;
        };

        let mut open = true;
        let mut save = false;
        let mut cancel = false;
        egui::Window::new("Edit Student")
            .open(&mut open)
            .collapsible(false)
            .resizable(false)
            .show(ctx, |ui| {
                profile_form(ui, "edit", &mut form.fields);
                ui.add_space(8.0);
                ui.horizontal(|ui| {
                    save = ui.button("Save Changes").clicked();
                    cancel = ui.button("Cancel").clicked();
                });
            });

        if save {
            self.save_edit();
        } else if cancel || !open {
            self.cancel_edit();
        }
    }
}

impl eframe::App for StudentApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.sync_with_store();
        if self.applied_dark_mode != Some(self.config.dark_mode) {
            theme::apply(ctx, self.config.dark_mode);
            self.applied_dark_mode = Some(self.config.dark_mode);
        }

        self.header(ctx);
        self.sidebar(ctx);
        self.status_bar(ctx);
        egui::CentralPanel::default().show(ctx, |ui| match self.page {
            Page::List => self.list_page(ui),
            Page::Add => self.add_page(ui),
            Page::Marksheet => self.marksheet_page(ui),
            Page::About => self.about_page(ui),
        });
        self.edit_window(ctx);
    }
}

/// Large value with a caption underneath
fn stat_card(ui: &mut egui::Ui, value: &str, label: &str) {
    egui::Frame::group(ui.style()).show(ui, |ui| {
        ui.set_min_width(160.0);
        ui.vertical(|ui| {
            ui.label(RichText::new(value).size(32.0).strong());
            ui.label(RichText::new(label.to_uppercase()).small());
        });
    });
}

/// Profile inputs shared by the add page and the edit window
fn profile_form(ui: &mut egui::Ui, id_salt: &str, fields: &mut StudentFields) {
    egui::Grid::new((id_salt, "profile"))
        .num_columns(2)
        .spacing([20.0, 8.0])
        .show(ui, |ui| {
            ui.label("Name");
            ui.add(egui::TextEdit::singleline(&mut fields.name).char_limit(NAME_LEN - 1));
            ui.end_row();

            ui.label("Reg Number");
            ui.add(egui::TextEdit::singleline(&mut fields.reg_num).char_limit(REG_NUM_LEN - 1));
            ui.end_row();

            ui.label("Branch");
            choice(ui, (id_salt, "branch"), &mut fields.branch, BRANCHES);
            ui.end_row();

            ui.label("Program");
            choice(ui, (id_salt, "program"), &mut fields.program, PROGRAMS);
            ui.end_row();

            ui.label("Gender");
            choice(ui, (id_salt, "gender"), &mut fields.gender, GENDERS);
            ui.end_row();

            ui.label("Phone");
            ui.add(egui::TextEdit::singleline(&mut fields.phone).char_limit(PHONE_LEN - 1));
            ui.end_row();

            ui.label("Age");
            ui.add(egui::DragValue::new(&mut fields.age).range(AGE_RANGE));
            ui.end_row();

            ui.label("GPA");
            ui.add(
                egui::DragValue::new(&mut fields.gpa)
                    .range(GPA_RANGE)
                    .speed(0.01)
                    .fixed_decimals(2),
            );
            ui.end_row();
        });
}

/// Drop-down over a fixed list of options
fn choice(ui: &mut egui::Ui, id_salt: impl std::hash::Hash, value: &mut String, options: &[&str]) {
    egui::ComboBox::from_id_salt(id_salt)
        .selected_text(value.clone())
        .show_ui(ui, |ui| {
            for option in options {
                ui.selectable_value(value, option.to_string(), *option);
            }
        });
}
