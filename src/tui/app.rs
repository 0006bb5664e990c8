//! TUI application state and main loop.

use std::io::{self, Stdout};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    Terminal,
};
use tracing::warn;

use crate::commands::add::{run_pipeline, AddRequest};
use crate::deps::Deps;
use crate::git::{branch, worktree, RemoveError, WorktreeRecord};
use crate::reconcile::ReconciliationService;
use crate::sesh;
use crate::zoxide::{compile_paths, FsLister};

use super::event::{action_for_key, Action};
use super::render;
use super::state::{AddCompletion, CompletedAdd, DeleteCompletion, Mode};
use super::task::{self, MIN_VISIBLE};

/// Poll timeout for the event loop (100ms for responsive UI).
const POLL_TIMEOUT: Duration = Duration::from_millis(100);

pub struct TuiApp {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    running: Arc<AtomicBool>,
    deps: Deps,
    root: PathBuf,
    worktrees: Vec<WorktreeRecord>,
    selected: usize,
    mode: Mode,
    last_error: Option<String>,
    spinner_frame: usize,
    /// Set when quitting to hand off to sesh after terminal restore.
    connect_target: Option<String>,
    /// Flag to prevent double cleanup in Drop.
    cleaned_up: bool,
}

impl TuiApp {
    pub fn new(deps: Deps, root: &Path) -> Result<Self> {
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen).context("Failed to enter alternate screen")?;

        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend).context("Failed to create terminal")?;

        let mut app = Self {
            terminal,
            running: Arc::new(AtomicBool::new(true)),
            deps,
            root: root.to_path_buf(),
            worktrees: Vec::new(),
            selected: 0,
            mode: Mode::Browsing,
            last_error: None,
            spinner_frame: 0,
            connect_target: None,
            cleaned_up: false,
        };
        app.refresh();
        Ok(app)
    }

    pub fn run(&mut self) -> Result<()> {
        // Cleanup terminal state on signal; Drop may not run on process exit.
        let running = self.running.clone();
        ctrlc::set_handler(move || {
            running.store(false, Ordering::SeqCst);
            emergency_cleanup();
            std::process::exit(0);
        })
        .context("Failed to set Ctrl+C handler")?;

        let result = self.run_event_loop();

        // ALWAYS restore the terminal before returning or connecting.
        self.cleanup_terminal();

        if let Some(target) = self.connect_target.take() {
            sesh::connect(self.deps.runner.as_ref(), &target, &self.root)?;
        }

        result
    }

    fn run_event_loop(&mut self) -> Result<()> {
        while self.running.load(Ordering::SeqCst) {
            self.poll_task_completion();

            if event::poll(POLL_TIMEOUT)? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        let action = action_for_key(&self.mode, key.code, key.modifiers);
                        self.apply(action);
                    }
                }
            }

            self.spinner_frame = (self.spinner_frame + 1) % 10;
            self.render()?;
        }

        Ok(())
    }

    /// Consume the completion message of an in-flight task, if any.
    fn poll_task_completion(&mut self) {
        let finished = match &self.mode {
            Mode::AddInFlight { task, buffer } => task
                .try_take()
                .map(|completion| TaskCompletion::Add(completion, buffer.clone())),
            Mode::DeleteInFlight {
                task,
                record,
                delete_branch,
            } => task.try_take().map(|completion| {
                TaskCompletion::Delete(completion, record.clone(), *delete_branch)
            }),
            _ => None,
        };
        let Some(finished) = finished else { return };

        match completion_transition(finished) {
            Transition::Refresh { select } => {
                self.refresh();
                if let Some(folder) = select {
                    self.select_folder(&folder);
                }
                self.mode = Mode::Browsing;
            }
            Transition::QuitAndConnect(target) => {
                self.connect_target = Some(target);
                self.running.store(false, Ordering::SeqCst);
            }
            Transition::Enter(mode) => self.mode = mode,
        }
    }

    fn apply(&mut self, action: Action) {
        match action {
            Action::None => {}
            Action::Quit => self.running.store(false, Ordering::SeqCst),

            Action::MoveUp => self.selected = self.selected.saturating_sub(1),
            Action::MoveDown => {
                if self.selected + 1 < self.worktrees.len() {
                    self.selected += 1;
                }
            }

            Action::OpenAddInput => {
                self.last_error = None;
                self.mode = Mode::AddInput {
                    buffer: String::new(),
                    error: None,
                };
            }
            Action::InputChar(c) => {
                if let Mode::AddInput { buffer, error } = &mut self.mode {
                    buffer.push(c);
                    *error = None;
                }
            }
            Action::InputBackspace => {
                if let Mode::AddInput { buffer, .. } = &mut self.mode {
                    buffer.pop();
                }
            }
            Action::SubmitAdd => self.submit_add(),
            Action::CancelAdd => self.mode = Mode::Browsing,

            Action::BeginDelete { delete_branch } => self.begin_delete(delete_branch, false),
            Action::ConfirmForceDelete => {
                if let Some((record, delete_branch)) = pending_forced_delete(&self.mode) {
                    self.spawn_delete(record, delete_branch, true);
                }
            }
            Action::CancelDelete => self.mode = Mode::Browsing,

            Action::OpenDirectoryPopup => self.open_popup(),
            Action::PopupUp => {
                if let Mode::DirectoryPopup { selected, .. } = &mut self.mode {
                    *selected = selected.saturating_sub(1);
                }
            }
            Action::PopupDown => {
                if let Mode::DirectoryPopup { entries, selected } = &mut self.mode {
                    if *selected + 1 < entries.len() {
                        *selected += 1;
                    }
                }
            }
            Action::PopupConnect => {
                if let Mode::DirectoryPopup { entries, selected } = &self.mode {
                    if let Some(entry) = entries.get(*selected) {
                        self.connect_target = Some(entry.path.clone());
                        self.running.store(false, Ordering::SeqCst);
                    }
                }
            }
            Action::PopupClose => self.mode = Mode::Browsing,
        }
    }

    fn submit_add(&mut self) {
        let buffer = match &self.mode {
            Mode::AddInput { buffer, .. } => buffer.clone(),
            _ => return,
        };

        let request = match super::state::parse_add_line(&buffer) {
            Ok(request) => request,
            Err(e) => {
                self.mode = Mode::AddInput {
                    buffer,
                    error: Some(e),
                };
                return;
            }
        };

        let deps = self.deps.clone();
        let root = self.root.clone();
        let task = task::spawn(MIN_VISIBLE, move || add_task(&deps, &root, request));
        self.mode = Mode::AddInFlight { task, buffer };
    }

    fn begin_delete(&mut self, delete_branch: bool, force: bool) {
        let record = match self.worktrees.get(self.selected) {
            Some(record) => record.clone(),
            None => return,
        };
        self.spawn_delete(record, delete_branch, force);
    }

    fn spawn_delete(&mut self, record: WorktreeRecord, delete_branch: bool, force: bool) {
        let deps = self.deps.clone();
        let root = self.root.clone();
        let task_record = record.clone();
        let task = task::spawn(MIN_VISIBLE, move || {
            delete_task(&deps, &root, &task_record, delete_branch, force)
        });
        self.mode = Mode::DeleteInFlight {
            task,
            record,
            delete_branch,
        };
    }

    fn open_popup(&mut self) {
        let record = match self.worktrees.get(self.selected) {
            Some(record) => record,
            None => return,
        };

        match self.deps.index.list_under(&record.full_path) {
            Ok(entries) => {
                self.last_error = None;
                self.mode = Mode::DirectoryPopup {
                    entries,
                    selected: 0,
                };
            }
            Err(e) => {
                // Recoverable: stay in browsing with an inline error.
                self.last_error = Some(e.to_string());
            }
        }
    }

    /// Re-query the listing; the table always reflects fresh state.
    fn refresh(&mut self) {
        let service = ReconciliationService::new(&self.deps, &self.root);
        match service.all_worktrees() {
            Ok(records) => {
                self.worktrees = records;
                if self.selected >= self.worktrees.len() {
                    self.selected = self.worktrees.len().saturating_sub(1);
                }
                self.last_error = None;
            }
            Err(e) => self.last_error = Some(e.to_string()),
        }
    }

    fn select_folder(&mut self, folder: &str) {
        if let Some(index) = self.worktrees.iter().position(|w| w.folder == folder) {
            self.selected = index;
        }
    }

    fn render(&mut self) -> Result<()> {
        let spinner = self.spinner_char();
        let records = self.worktrees.clone();
        let selected = self.selected;
        let mode = &self.mode;
        let last_error = self.last_error.clone();

        self.terminal.draw(|frame| {
            let area = frame.area();
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([
                    Constraint::Min(6),
                    Constraint::Length(1),
                    Constraint::Length(1),
                ])
                .split(area);

            render::render_table(frame, chunks[0], &records, selected);

            match mode {
                Mode::AddInput { buffer, .. } => {
                    render::render_add_input(frame, chunks[1], buffer);
                }
                Mode::AddInFlight { buffer, .. } => {
                    render::render_add_input(frame, chunks[1], buffer);
                }
                Mode::DeleteConfirm { record, error, .. } => {
                    render::render_delete_confirm(frame, chunks[1], &record.folder, error);
                }
                _ => {}
            }

            render::render_footer(frame, chunks[2], mode, spinner, &last_error);

            if let Mode::DirectoryPopup { entries, selected } = mode {
                render::render_directory_popup(frame, chunks[0], entries, *selected);
            }
        })?;

        Ok(())
    }

    fn spinner_char(&self) -> char {
        const SPINNER: [char; 10] = [
            '\u{280B}', '\u{2819}', '\u{2839}', '\u{2838}', '\u{283C}', '\u{2834}', '\u{2826}',
            '\u{2827}', '\u{2807}', '\u{280F}',
        ];
        SPINNER[self.spinner_frame % SPINNER.len()]
    }

    /// Cleanup terminal state (leave alternate screen, disable raw mode).
    fn cleanup_terminal(&mut self) {
        if self.cleaned_up {
            return;
        }
        self.cleaned_up = true;

        let _ = disable_raw_mode();
        let _ = execute!(self.terminal.backend_mut(), LeaveAlternateScreen);
        let _ = self.terminal.show_cursor();
    }
}

impl Drop for TuiApp {
    fn drop(&mut self) {
        self.cleanup_terminal();
    }
}

fn emergency_cleanup() {
    let _ = disable_raw_mode();
    let _ = execute!(io::stdout(), LeaveAlternateScreen);
}

/// Completion message of a finished background task, paired with the context
/// the next mode needs.
enum TaskCompletion {
    Add(AddCompletion, String),
    Delete(DeleteCompletion, WorktreeRecord, bool),
}

/// What the session does in response to a completion message.
enum Transition {
    /// Refresh the listing and return to browsing, optionally moving the
    /// selection to a folder.
    Refresh { select: Option<String> },
    /// End the session and connect once the terminal is restored.
    QuitAndConnect(String),
    /// Enter the given mode directly.
    Enter(Mode),
}

/// Mode transition for a finished background task.
///
/// A failed add goes back to the input with the line intact so it can be
/// edited and resubmitted; a failed delete becomes a forced-retry
/// confirmation. A successful add that asked for a sesh connect ends the
/// session instead of returning to browsing: the connect can only run on a
/// restored terminal, so the handoff replaces the session.
fn completion_transition(finished: TaskCompletion) -> Transition {
    match finished {
        TaskCompletion::Add(Ok(done), _) => match done.sesh_target {
            Some(target) => Transition::QuitAndConnect(target),
            None => Transition::Refresh {
                select: Some(done.folder),
            },
        },
        TaskCompletion::Add(Err(e), buffer) => Transition::Enter(Mode::AddInput {
            buffer,
            error: Some(e),
        }),
        TaskCompletion::Delete(Ok(()), _, _) => Transition::Refresh { select: None },
        TaskCompletion::Delete(Err(error), record, delete_branch) => {
            Transition::Enter(Mode::DeleteConfirm {
                record,
                delete_branch,
                error,
            })
        }
    }
}

/// The delete to re-attempt with force when a failed removal is confirmed.
fn pending_forced_delete(mode: &Mode) -> Option<(WorktreeRecord, bool)> {
    match mode {
        Mode::DeleteConfirm {
            record,
            delete_branch,
            ..
        } => Some((record.clone(), *delete_branch)),
        _ => None,
    }
}

/// The background add unit of work: pipeline plus the sesh handoff target.
/// A directory override in the request replaces the session root, matching
/// the CLI add.
fn add_task(deps: &Deps, session_root: &Path, request: AddRequest) -> Result<CompletedAdd, String> {
    let root = request
        .directory
        .clone()
        .unwrap_or_else(|| session_root.to_path_buf());
    let outcome = run_pipeline(deps, &root, &request).map_err(|e| format!("{e:#}"))?;

    let sesh_target = if request.wants_sesh() {
        Some(
            request
                .sesh_target
                .clone()
                .unwrap_or_else(|| outcome.worktree_path.to_string_lossy().to_string()),
        )
    } else {
        None
    };

    Ok(CompletedAdd {
        folder: outcome.folder,
        worktree_path: outcome.worktree_path.to_string_lossy().to_string(),
        sesh_target,
    })
}

/// The background delete unit of work: remove the worktree, deregister its
/// index paths, and optionally drop the branch ref.
fn delete_task(
    deps: &Deps,
    root: &Path,
    record: &WorktreeRecord,
    delete_branch: bool,
    force: bool,
) -> Result<(), String> {
    // Expand before removal; afterwards there is nothing left to list.
    let index_paths = compile_paths(&record.full_path, &deps.config.zoxide_folders, &FsLister)
        .unwrap_or_else(|_| vec![record.full_path.clone()]);

    match worktree::remove_worktree(deps.runner.as_ref(), root, record, force) {
        Ok(()) => {}
        Err(RemoveError::DirtyTree { details, .. }) => return Err(details),
        Err(RemoveError::Other(e)) => return Err(format!("{e:#}")),
    }

    for path in &index_paths {
        if let Err(e) = deps.index.remove(path) {
            warn!("failed to deregister {path}: {e}");
        }
    }

    if delete_branch {
        if let Err(e) = branch::delete_branch(
            deps.runner.as_ref(),
            &worktree::bare_path(root),
            &record.branch_name,
        ) {
            warn!("failed to delete branch {}: {e}", record.branch_name);
        }
    }

    Ok(())
}
