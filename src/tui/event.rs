//! Key handling for the interactive view
//!
//! Pure mapping from (mode, key) to an [`Action`]; the app applies actions
//! and owns every side effect. Keys arriving while a background task is in
//! flight are dropped: there is no queueing and no cancellation.

use crossterm::event::{KeyCode, KeyModifiers};

use super::state::Mode;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    None,
    Quit,
    MoveUp,
    MoveDown,
    OpenAddInput,
    BeginDelete { delete_branch: bool },
    OpenDirectoryPopup,
    InputChar(char),
    InputBackspace,
    SubmitAdd,
    CancelAdd,
    ConfirmForceDelete,
    CancelDelete,
    PopupUp,
    PopupDown,
    PopupConnect,
    PopupClose,
}

pub fn action_for_key(mode: &Mode, code: KeyCode, modifiers: KeyModifiers) -> Action {
    let ctrl_c = matches!(code, KeyCode::Char('c')) && modifiers.contains(KeyModifiers::CONTROL);

    match mode {
        Mode::Browsing => {
            if ctrl_c {
                return Action::Quit;
            }
            match code {
                KeyCode::Char('q') => Action::Quit,
                KeyCode::Up | KeyCode::Char('k') => Action::MoveUp,
                KeyCode::Down | KeyCode::Char('j') => Action::MoveDown,
                KeyCode::Char('a') => Action::OpenAddInput,
                KeyCode::Char('d') => Action::BeginDelete {
                    delete_branch: false,
                },
                KeyCode::Char('D') => Action::BeginDelete {
                    delete_branch: true,
                },
                KeyCode::Char('o') => Action::OpenDirectoryPopup,
                _ => Action::None,
            }
        }

        Mode::AddInput { .. } => {
            if ctrl_c {
                return Action::CancelAdd;
            }
            match code {
                KeyCode::Esc => Action::CancelAdd,
                KeyCode::Enter => Action::SubmitAdd,
                KeyCode::Backspace => Action::InputBackspace,
                KeyCode::Char(c) => Action::InputChar(c),
                _ => Action::None,
            }
        }

        // No interaction while a task is in flight.
        Mode::AddInFlight { .. } | Mode::DeleteInFlight { .. } => Action::None,

        Mode::DeleteConfirm { .. } => match code {
            KeyCode::Char('y') | KeyCode::Char('Y') => Action::ConfirmForceDelete,
            KeyCode::Char('n') | KeyCode::Esc | KeyCode::Char('q') => Action::CancelDelete,
            _ => Action::None,
        },

        Mode::DirectoryPopup { .. } => match code {
            KeyCode::Up | KeyCode::Char('k') => Action::PopupUp,
            KeyCode::Down | KeyCode::Char('j') => Action::PopupDown,
            KeyCode::Enter | KeyCode::Char('o') => Action::PopupConnect,
            KeyCode::Esc | KeyCode::Char('q') => Action::PopupClose,
            _ => Action::None,
        },
    }
}
