//! Interactive UI event loop and application state.
//!
//! The app owns the task store and the single "currently editing" pointer.
//! Every mutation goes store -> persist -> re-project -> full redraw; the
//! renderer never sees anything but the projected sequence and the progress
//! summary.

use std::io;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

use crate::config::Config;
use crate::error::Result;
use crate::model::{self, FilterKey, Progress, SortKey};
use crate::task::{Status, Task, TaskStore};

use super::editor::{EditorAction, EditorState, Picker, PickerAction};
use super::view;

pub struct AppState {
    pub(crate) store: TaskStore,
    pub(crate) filter: FilterKey,
    pub(crate) sort: SortKey,
    /// Projected sequence currently on screen.
    pub(crate) view: Vec<Task>,
    pub(crate) progress: Progress,
    pub(crate) selected: Option<usize>,
    /// Id of the task being edited; `None` means the form creates.
    pub(crate) editing_id: Option<String>,
    pub(crate) editor: Option<EditorState>,
    pub(crate) filter_picker: Option<Picker>,
    pub(crate) sort_picker: Option<Picker>,
    pub(crate) clear_confirm: bool,
    pub(crate) info: Option<String>,
}

impl AppState {
    pub fn new(store: TaskStore, filter: FilterKey, sort: SortKey) -> Self {
        let mut app = Self {
            store,
            filter,
            sort,
            view: Vec::new(),
            progress: model::progress(&[]),
            selected: None,
            editing_id: None,
            editor: None,
            filter_picker: None,
            sort_picker: None,
            clear_confirm: false,
            info: None,
        };
        app.refresh();
        app
    }

    /// Re-derive the projection and progress after any state change. The
    /// selection sticks to its task id when that task is still visible.
    pub(crate) fn refresh(&mut self) {
        let previous = self.selected_task().map(|task| task.id.clone());
        self.view = model::project(self.store.tasks(), self.filter, self.sort);
        self.progress = model::progress(self.store.tasks());
        self.selected = previous
            .and_then(|id| self.view.iter().position(|task| task.id == id))
            .or(if self.view.is_empty() { None } else { Some(0) });
    }

    pub(crate) fn selected_task(&self) -> Option<&Task> {
        self.selected.and_then(|index| self.view.get(index))
    }

    pub(crate) fn editing(&self) -> bool {
        self.editing_id.is_some()
    }

    fn move_selection(&mut self, delta: isize) {
        if self.view.is_empty() {
            self.selected = None;
            return;
        }
        let current = self.selected.unwrap_or(0) as isize;
        let max = self.view.len() as isize - 1;
        self.selected = Some(current.saturating_add(delta).clamp(0, max) as usize);
    }

    fn open_create(&mut self) {
        self.editing_id = None;
        self.editor = Some(EditorState::create(Status::Pending));
    }

    fn open_edit(&mut self) {
        let Some(task) = self.selected_task() else {
            self.info = Some("no task selected".to_string());
            return;
        };
        let id = task.id.clone();
        let editor = EditorState::edit(task);
        self.editing_id = Some(id);
        self.editor = Some(editor);
    }

    fn submit_editor(&mut self) -> Result<()> {
        let Some(editor) = self.editor.as_mut() else {
            return Ok(());
        };
        let draft = match editor.build_draft() {
            Ok(draft) => draft,
            Err(message) => {
                editor.set_error(message);
                return Ok(());
            }
        };

        let applied = match self.editing_id.clone() {
            Some(id) => self.store.update(&id, draft)?.is_some(),
            None => self.store.add(draft)?.is_some(),
        };

        // A blank title is a silent no-op: the form keeps its values and the
        // editing pointer stays where it was.
        if applied {
            self.editing_id = None;
            self.editor = None;
            self.refresh();
        }
        Ok(())
    }

    fn set_selected_status(&mut self, status: Status) -> Result<()> {
        let Some(id) = self.selected_task().map(|task| task.id.clone()) else {
            return Ok(());
        };
        self.store.set_status(&id, status)?;
        self.refresh();
        Ok(())
    }

    fn cycle_selected_status(&mut self) -> Result<()> {
        let Some(next) = self.selected_task().map(|task| task.status.next()) else {
            return Ok(());
        };
        self.set_selected_status(next)
    }

    fn delete_selected(&mut self) -> Result<()> {
        let Some(id) = self.selected_task().map(|task| task.id.clone()) else {
            return Ok(());
        };
        self.store.remove(&id)?;
        self.refresh();
        Ok(())
    }

    fn request_clear(&mut self) {
        if self.store.is_empty() {
            self.info = Some("nothing to clear".to_string());
            return;
        }
        self.clear_confirm = true;
    }

    fn open_filter_picker(&mut self) {
        let current = FilterKey::ALL
            .iter()
            .position(|key| *key == self.filter)
            .unwrap_or(0);
        let options = FilterKey::ALL
            .iter()
            .map(|key| key.as_str().to_string())
            .collect();
        self.filter_picker = Some(Picker::new(options, current));
    }

    fn open_sort_picker(&mut self) {
        let current = SortKey::ALL
            .iter()
            .position(|key| *key == self.sort)
            .unwrap_or(0);
        let options = SortKey::ALL
            .iter()
            .map(|key| key.label().to_string())
            .collect();
        self.sort_picker = Some(Picker::new(options, current));
    }

    pub(crate) fn footer_hint(&self) -> String {
        if self.clear_confirm {
            return "y confirm clear  esc cancel".to_string();
        }
        if self.editor.is_some() {
            return "tab next field  enter submit from status row  esc cancel".to_string();
        }
        if self.filter_picker.is_some() || self.sort_picker.is_some() {
            return "j/k move  enter apply  esc cancel".to_string();
        }
        "j/k move  a add  e edit  d delete  space status  1-3 set status  f filter  s sort  C clear  q quit"
            .to_string()
    }
}

/// Open the interactive UI over the given store.
pub fn run(store: TaskStore, config: &Config) -> Result<()> {
    let mut app = AppState::new(store, config.default_filter(), config.default_sort());
    run_terminal(&mut app)
}

fn run_terminal(app: &mut AppState) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_loop(&mut terminal, app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_loop(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut AppState) -> Result<()> {
    loop {
        terminal.draw(|frame| view::render(frame, app))?;
        if let Event::Key(key) = event::read()? {
            if handle_key(app, key)? {
                return Ok(());
            }
        }
    }
}

/// Dispatch one key event. Returns `true` to quit. Modal surfaces (confirm,
/// pickers, editor) take the key before the list bindings do.
pub(crate) fn handle_key(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Ok(true);
    }
    app.info = None;

    if app.clear_confirm {
        match key.code {
            KeyCode::Char('y') | KeyCode::Enter => {
                app.clear_confirm = false;
                app.store.clear()?;
                app.refresh();
            }
            KeyCode::Char('n') | KeyCode::Char('q') | KeyCode::Esc => {
                app.clear_confirm = false;
            }
            _ => {}
        }
        return Ok(false);
    }

    if let Some(mut picker) = app.filter_picker.take() {
        match picker.handle_key(key) {
            PickerAction::None => app.filter_picker = Some(picker),
            PickerAction::Cancel => {}
            PickerAction::Confirm => {
                app.filter = FilterKey::ALL[picker.selected_index()];
                app.refresh();
            }
        }
        return Ok(false);
    }

    if let Some(mut picker) = app.sort_picker.take() {
        match picker.handle_key(key) {
            PickerAction::None => app.sort_picker = Some(picker),
            PickerAction::Cancel => {}
            PickerAction::Confirm => {
                app.sort = SortKey::ALL[picker.selected_index()];
                app.refresh();
            }
        }
        return Ok(false);
    }

    if let Some(editor) = app.editor.as_mut() {
        match editor.handle_key(key) {
            EditorAction::None => {}
            EditorAction::Cancel => {
                app.editor = None;
                app.editing_id = None;
            }
            EditorAction::Submit => app.submit_editor()?,
        }
        return Ok(false);
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => return Ok(true),
        KeyCode::Char('j') | KeyCode::Down => app.move_selection(1),
        KeyCode::Char('k') | KeyCode::Up => app.move_selection(-1),
        KeyCode::Char('a') | KeyCode::Char('n') => app.open_create(),
        KeyCode::Char('e') => app.open_edit(),
        KeyCode::Char('d') => app.delete_selected()?,
        KeyCode::Char(' ') => app.cycle_selected_status()?,
        KeyCode::Char('1') => app.set_selected_status(Status::Pending)?,
        KeyCode::Char('2') => app.set_selected_status(Status::InProgress)?,
        KeyCode::Char('3') => app.set_selected_status(Status::Completed)?,
        KeyCode::Char('f') => app.open_filter_picker(),
        KeyCode::Char('s') => app.open_sort_picker(),
        KeyCode::Char('C') => app.request_clear(),
        _ => {}
    }
    Ok(false)
}
