//! Rendering functions for the interactive view.

use ratatui::{
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Row, Table, TableState},
    Frame,
};

use crate::git::WorktreeRecord;
use crate::zoxide::ScoredPath;

use super::state::Mode;

fn header_style() -> Style {
    Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
}

fn dimmed() -> Style {
    Style::default().fg(Color::DarkGray)
}

fn error_style() -> Style {
    Style::default().fg(Color::Red)
}

/// Render the worktree table with the current selection highlighted.
pub fn render_table(frame: &mut Frame, area: Rect, records: &[WorktreeRecord], selected: usize) {
    let block = Block::default()
        .title(format!(" Worktrees ({}) ", records.len()))
        .title_style(header_style())
        .borders(Borders::ALL)
        .border_style(dimmed());

    if records.is_empty() {
        let empty = Paragraph::new("No worktrees").style(dimmed()).block(block);
        frame.render_widget(empty, area);
        return;
    }

    let header = Row::new(vec!["Folder", "Branch", "Commit"])
        .style(header_style())
        .bottom_margin(1);

    let rows: Vec<Row> = records
        .iter()
        .map(|record| {
            Row::new(vec![
                record.folder.clone(),
                record.branch_name.clone(),
                record.commit_hash.clone(),
            ])
        })
        .collect();

    let widths = [
        Constraint::Min(20),
        Constraint::Min(20),
        Constraint::Length(10),
    ];

    let table = Table::new(rows, widths)
        .block(block)
        .header(header)
        .row_highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");

    let mut state = TableState::default();
    state.select(Some(selected.min(records.len().saturating_sub(1))));
    frame.render_stateful_widget(table, area, &mut state);
}

/// Render the footer: keybinds while browsing, progress or errors otherwise.
pub fn render_footer(
    frame: &mut Frame,
    area: Rect,
    mode: &Mode,
    spinner: char,
    last_error: &Option<String>,
) {
    let line = match mode {
        Mode::Browsing if last_error.is_some() => Line::from(vec![
            Span::styled("error: ", error_style()),
            Span::styled(last_error.as_deref().unwrap_or(""), error_style()),
        ]),
        Mode::Browsing => Line::from(vec![
            bold("a"),
            Span::raw(" add \u{2502} "),
            bold("d"),
            Span::raw(" delete \u{2502} "),
            bold("D"),
            Span::raw(" delete+branch \u{2502} "),
            bold("o"),
            Span::raw(" dirs \u{2502} "),
            bold("q"),
            Span::raw(" quit"),
        ]),
        Mode::AddInput { error: Some(e), .. } => Line::from(vec![
            Span::styled("add failed: ", error_style()),
            Span::styled(e.as_str(), error_style()),
        ]),
        Mode::AddInput { .. } => Line::from(vec![
            bold("enter"),
            Span::raw(" create \u{2502} "),
            bold("esc"),
            Span::raw(" cancel \u{2502} flags: -p pull, -b <base>, -n <name>, -s sesh, -c cursor"),
        ]),
        Mode::AddInFlight { buffer, .. } => Line::from(vec![
            Span::styled(format!("{spinner} "), header_style()),
            Span::raw(format!("creating {buffer}...")),
        ]),
        Mode::DeleteInFlight { record, .. } => Line::from(vec![
            Span::styled(format!("{spinner} "), header_style()),
            Span::raw(format!("removing {}...", record.folder)),
        ]),
        Mode::DeleteConfirm { .. } => Line::from(vec![
            bold("y"),
            Span::raw(" force remove \u{2502} "),
            bold("n"),
            Span::raw(" cancel"),
        ]),
        Mode::DirectoryPopup { .. } => Line::from(vec![
            bold("enter/o"),
            Span::raw(" connect \u{2502} "),
            bold("esc"),
            Span::raw(" close"),
        ]),
    };

    frame.render_widget(Paragraph::new(line), area);
}

/// Render the add-input line.
pub fn render_add_input(frame: &mut Frame, area: Rect, buffer: &str) {
    let line = Line::from(vec![
        Span::styled("add> ", header_style()),
        Span::raw(buffer),
        Span::styled("\u{2588}", dimmed()),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

/// Render the forced-retry confirmation bar for a failed delete.
pub fn render_delete_confirm(frame: &mut Frame, area: Rect, folder: &str, error: &str) {
    let line = Line::from(vec![
        Span::styled(format!("remove {folder} failed: "), error_style()),
        Span::raw(error.to_string()),
        Span::styled("  force? [y/n]", Style::default().fg(Color::Yellow)),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

/// Render the directory-index popup over the table.
pub fn render_directory_popup(
    frame: &mut Frame,
    area: Rect,
    entries: &[ScoredPath],
    selected: usize,
) {
    let popup = centered_rect(70, 60, area);
    frame.render_widget(Clear, popup);

    let block = Block::default()
        .title(" Directories ")
        .title_style(header_style())
        .borders(Borders::ALL);

    if entries.is_empty() {
        let empty = Paragraph::new("(no indexed directories)")
            .style(dimmed())
            .block(block);
        frame.render_widget(empty, popup);
        return;
    }

    let items: Vec<ListItem> = entries
        .iter()
        .map(|entry| {
            ListItem::new(Line::from(vec![
                Span::styled(format!("{:>7.1}  ", entry.score), dimmed()),
                Span::raw(entry.path.clone()),
            ]))
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");

    let mut state = ListState::default();
    state.select(Some(selected.min(entries.len().saturating_sub(1))));
    frame.render_stateful_widget(list, popup, &mut state);
}

fn bold(text: &str) -> Span<'_> {
    Span::styled(text, Style::default().add_modifier(Modifier::BOLD))
}

/// Centered sub-rectangle, percent-sized.
///
/// The intermediate products are widened to u32: u16 math overflows on
/// terminals wider than 936 cells.
fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let width = (u32::from(area.width) * u32::from(percent_x) / 100) as u16;
    let height = (u32::from(area.height) * u32::from(percent_y) / 100) as u16;
    Rect {
        x: area.x + (area.width.saturating_sub(width)) / 2,
        y: area.y + (area.height.saturating_sub(height)) / 2,
        width,
        height,
    }
}
