//! Form state for creating and editing tasks, plus the selector pickers.
//!
//! The form is the input surface: four fields (title, description, deadline,
//! status) and a submit action. It never touches the store; the app layer
//! builds a [`Draft`] from it and routes the draft to add or update.

use chrono::NaiveDate;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::task::{Draft, Status, Task};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldId {
    Title,
    Description,
    Deadline,
    Status,
}

#[derive(Debug, Clone)]
pub struct Field {
    pub id: FieldId,
    pub label: &'static str,
    pub value: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorAction {
    None,
    Cancel,
    Submit,
}

/// State of the task form. Text fields hold raw input; the status field is a
/// three-way selector cycled in place.
#[derive(Debug, Clone)]
pub struct EditorState {
    fields: Vec<Field>,
    status: Status,
    active: usize,
    error: Option<String>,
}

const STATUS_ROW: usize = 3;

impl EditorState {
    /// Empty form for a new task. Focus starts on the title field.
    pub fn create(default_status: Status) -> Self {
        Self {
            fields: vec![
                Field {
                    id: FieldId::Title,
                    label: "Title",
                    value: String::new(),
                },
                Field {
                    id: FieldId::Description,
                    label: "Description",
                    value: String::new(),
                },
                Field {
                    id: FieldId::Deadline,
                    label: "Deadline",
                    value: String::new(),
                },
            ],
            status: default_status,
            active: 0,
            error: None,
        }
    }

    /// Form populated from an existing task; absent deadline and empty
    /// description populate as empty text. Focus starts on the title field.
    pub fn edit(task: &Task) -> Self {
        let mut editor = Self::create(task.status);
        editor.set_field_value(FieldId::Title, task.title.clone());
        editor.set_field_value(FieldId::Description, task.description.clone());
        editor.set_field_value(
            FieldId::Deadline,
            task.deadline
                .map(|date| date.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
        );
        editor
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn active_index(&self) -> usize {
        self.active
    }

    pub fn status_row_active(&self) -> bool {
        self.active == STATUS_ROW
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn set_error(&mut self, message: String) {
        self.error = Some(message);
    }

    pub fn set_field_value(&mut self, id: FieldId, value: String) {
        if let Some(field) = self.fields.iter_mut().find(|field| field.id == id) {
            field.value = value;
        }
    }

    pub fn field_value(&self, id: FieldId) -> &str {
        self.fields
            .iter()
            .find(|field| field.id == id)
            .map(|field| field.value.as_str())
            .unwrap_or("")
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> EditorAction {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('u') {
            if let Some(field) = self.current_field_mut() {
                field.value.clear();
            }
            self.error = None;
            return EditorAction::None;
        }

        match key.code {
            KeyCode::Esc => return EditorAction::Cancel,
            KeyCode::Tab | KeyCode::Down => self.move_active(1),
            KeyCode::BackTab | KeyCode::Up => self.move_active(-1),
            KeyCode::Enter => {
                if self.active == STATUS_ROW {
                    return EditorAction::Submit;
                }
                self.move_active(1);
            }
            KeyCode::Left if self.active == STATUS_ROW => {
                self.status = self.status.prev();
            }
            KeyCode::Right | KeyCode::Char(' ') if self.active == STATUS_ROW => {
                self.status = self.status.next();
            }
            KeyCode::Backspace => {
                if let Some(field) = self.current_field_mut() {
                    field.value.pop();
                }
            }
            KeyCode::Char(ch) => {
                if key.modifiers.contains(KeyModifiers::CONTROL) || ch.is_control() {
                    return EditorAction::None;
                }
                if let Some(field) = self.current_field_mut() {
                    field.value.push(ch);
                }
            }
            _ => {}
        }

        self.error = None;
        EditorAction::None
    }

    /// Build the draft for submission. Fails only on unparseable deadline
    /// text; a blank title passes through so the store can apply its own
    /// silent no-op rule.
    pub fn build_draft(&self) -> Result<Draft, String> {
        let deadline_text = self.field_value(FieldId::Deadline).trim();
        let deadline = if deadline_text.is_empty() {
            None
        } else {
            Some(
                NaiveDate::parse_from_str(deadline_text, "%Y-%m-%d")
                    .map_err(|_| "deadline must be YYYY-MM-DD".to_string())?,
            )
        };

        Ok(Draft {
            title: self.field_value(FieldId::Title).to_string(),
            description: self.field_value(FieldId::Description).to_string(),
            deadline,
            status: self.status,
        })
    }

    fn move_active(&mut self, delta: isize) {
        let rows = (self.fields.len() + 1) as isize;
        self.active = (self.active as isize + delta).rem_euclid(rows) as usize;
    }

    fn current_field_mut(&mut self) -> Option<&mut Field> {
        if self.active == STATUS_ROW {
            return None;
        }
        self.fields.get_mut(self.active)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickerAction {
    None,
    Cancel,
    Confirm,
}

/// Single-choice list picker used for the filter and sort selectors.
#[derive(Debug, Clone)]
pub struct Picker {
    options: Vec<String>,
    selected: usize,
}

impl Picker {
    pub fn new(options: Vec<String>, current: usize) -> Self {
        let selected = current.min(options.len().saturating_sub(1));
        Self { options, selected }
    }

    pub fn options(&self) -> &[String] {
        &self.options
    }

    pub fn selected_index(&self) -> usize {
        self.selected
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> PickerAction {
        match key.code {
            KeyCode::Esc => return PickerAction::Cancel,
            KeyCode::Enter => return PickerAction::Confirm,
            KeyCode::Down | KeyCode::Char('j') => self.move_selection(1),
            KeyCode::Up | KeyCode::Char('k') => self.move_selection(-1),
            _ => {}
        }
        PickerAction::None
    }

    fn move_selection(&mut self, delta: isize) {
        let len = self.options.len() as isize;
        if len == 0 {
            self.selected = 0;
            return;
        }
        self.selected = (self.selected as isize + delta).rem_euclid(len) as usize;
    }
}
