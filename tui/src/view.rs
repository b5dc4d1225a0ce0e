//! Draws one frame from the Model. Deliberately does not mutate the Model
//! beyond recording the `LayoutSnapshot` the mouse router needs — all state
//! changes flow through the reducer.

use ratatui::Frame;
use ratatui::layout::Constraint;
use ratatui::layout::Direction;
use ratatui::layout::Layout;
use ratatui::layout::Rect;
use ratatui::style::Color;
use ratatui::style::Modifier;
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::text::Span;
use ratatui::widgets::Block;
use ratatui::widgets::Borders;
use ratatui::widgets::List;
use ratatui::widgets::ListItem;
use ratatui::widgets::Paragraph;

use itertools::Itertools;
use unicode_width::UnicodeWidthStr as _;

use crate::mode::Mode;
use crate::model::Model;
use crate::mouse::Hitbox;
use crate::render::CacheKey;
use crate::sidebar::SidebarRow;

pub fn draw(frame: &mut Frame, model: &mut Model) {
    let area = frame.area();
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(if model.app_state.sidebar_collapsed {
            [Constraint::Length(0), Constraint::Min(0)]
        } else {
            [Constraint::Length(32), Constraint::Min(0)]
        })
        .split(area);

    model.layout.sidebar_area = columns[0];
    if !model.app_state.sidebar_collapsed {
        draw_sidebar(frame, model, columns[0]);
    }

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(3), Constraint::Length(1)])
        .split(columns[1]);
    model.layout.transcript_area = rows[0];
    model.layout.compose_area = rows[1];

    draw_transcript(frame, model, rows[0]);
    draw_compose(frame, model, rows[1]);
    draw_key_hints(frame, model, rows[2]);

    if let Some(items) = picker_items(model) {
        draw_picker_overlay(frame, &items, model.picker_index, area);
    }

    if let Some(confirm) = &model.pending_confirm {
        draw_confirm_overlay(frame, confirm.prompt_text(), area);
    }
}

fn draw_sidebar(frame: &mut Frame, model: &mut Model, area: Rect) {
    let rows = model.sidebar.rows().to_vec();
    let cursor_key = model.selection.cursor.clone();
    let mut hitboxes = Vec::with_capacity(rows.len());
    let items: Vec<ListItem> = rows
        .iter()
        .enumerate()
        .map(|(index, row)| {
            hitboxes.push(Hitbox { area: Rect { x: area.x, y: area.y.saturating_add(index as u16).min(area.y + area.height), width: area.width, height: 1 }, row_index: index });
            let selected = cursor_key.as_ref() == Some(&row.key());
            let style = if selected { Style::default().add_modifier(Modifier::REVERSED) } else { Style::default() };
            let label = truncate_to_width(&row_label(row), area.width.saturating_sub(1) as usize);
            ListItem::new(Line::from(Span::styled(label, style)))
        })
        .collect();
    model.layout.sidebar_rows = hitboxes;
    let list = List::new(items).block(Block::default().borders(Borders::ALL).title("Sessions"));
    frame.render_widget(list, area);
}

/// Truncates to a display-column budget rather than a byte/char count, so
/// wide sidebar labels (titles containing CJK text, etc.) don't overrun the
/// column and get clipped mid-glyph by the terminal.
fn truncate_to_width(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }
    let mut out = String::new();
    let mut width = 0;
    for ch in text.chars() {
        let ch_width = ch.to_string().width();
        if width + ch_width > max_width.saturating_sub(1) {
            break;
        }
        width += ch_width;
        out.push(ch);
    }
    out.push('…');
    out
}

fn row_label(row: &SidebarRow) -> String {
    match row {
        SidebarRow::RecentsAll => "Recents".to_string(),
        SidebarRow::RecentsReady => "  Ready".to_string(),
        SidebarRow::RecentsRunning => "  Running".to_string(),
        SidebarRow::Workspace { name, expanded, .. } => format!("{} {name}", if *expanded { "v" } else { ">" }),
        SidebarRow::Worktree { name, expanded, .. } => format!("  {} {name}", if *expanded { "v" } else { ">" }),
        SidebarRow::Session { title, status, .. } => format!("    [{status}] {title}"),
    }
}

fn draw_transcript(frame: &mut Frame, model: &mut Model, area: Rect) {
    let Some(session_id) = model.selection.active_session_id.clone() else {
        frame.render_widget(Paragraph::new("No session selected").block(Block::default().borders(Borders::ALL)), area);
        return;
    };
    let Some(transcript) = model.transcripts.get(&session_id) else {
        frame.render_widget(Paragraph::new("Loading...").block(Block::default().borders(Borders::ALL)), area);
        return;
    };
    let key = CacheKey {
        render_width: area.width.saturating_sub(2),
        content_version: transcript.content_version,
        selected_block: None,
        timestamp_mode: model.app_state.ui_timestamp_mode,
        relative_bucket_id: 0,
    };
    let rendered = model.render_pipeline.render(key, transcript);
    let lines: Vec<Line> = rendered.plain_lines.iter().map(|l| Line::from(l.as_str())).collect();
    frame.render_widget(Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(session_id.to_string())), area);
}

fn draw_compose(frame: &mut Frame, model: &Model, area: Rect) {
    let (text, title): (&str, &str) = match model.mode {
        Mode::Compose => (model.compose_input.as_str(), "Compose (Enter to send)"),
        Mode::AddWorkspace => (model.rename_input.as_str(), "New workspace name"),
        Mode::AddWorkspaceGroup => (model.rename_input.as_str(), "New group name"),
        Mode::AddWorktree => (model.rename_input.as_str(), "New worktree name"),
        Mode::RenameWorkspace => (model.rename_input.as_str(), "Rename workspace"),
        Mode::RenameWorktree => (model.rename_input.as_str(), "Rename worktree"),
        Mode::RenameSession => (model.rename_input.as_str(), "Rename session"),
        Mode::RenameWorkspaceGroup => (model.rename_input.as_str(), "Rename group"),
        Mode::AddNote => (model.note_input.as_str(), "New note"),
        Mode::Search => (model.search_query.as_str(), "Search"),
        Mode::ApprovalResponse => (model.approval_response_input.as_str(), "Approval response"),
        _ => ("", "Compose"),
    };
    frame.render_widget(Paragraph::new(text).block(Block::default().borders(Borders::ALL).title(title)), area);
}

/// Labels for whatever list the current picker mode is showing, or `None`
/// outside any picker mode. Drawn as an overlay rather than inline since
/// several of these modes (provider pick, group pick) have no natural home
/// in the sidebar/transcript/compose layout.
fn picker_items(model: &Model) -> Option<Vec<String>> {
    match model.mode {
        Mode::PickProvider => Some(model.provider_catalog.iter().map(|p| p.to_string()).collect()),
        Mode::Notes => Some(model.notes_for_active_scope().iter().map(|n| n.text.clone()).collect()),
        Mode::PickWorkspaceRename => Some(model.workspaces.iter().map(|w| &w.name).sorted().cloned().collect()),
        Mode::EditWorkspaceGroups | Mode::PickWorkspaceGroupEdit | Mode::PickWorkspaceGroupRename | Mode::PickWorkspaceGroupDelete => {
            Some(model.workspace_groups.iter().map(|g| &g.name).sorted().cloned().collect())
        }
        Mode::PickWorkspaceGroupAssign => Some(model.workspace_groups.iter().map(|g| &g.name).sorted().cloned().collect()),
        Mode::AssignGroupWorkspaces => Some(
            model
                .workspaces
                .iter()
                .sorted_by_key(|w| &w.name)
                .map(|w| {
                    let marker = if model.assign_group_selected.contains(&w.id) { "[x]" } else { "[ ]" };
                    format!("{marker} {}", w.name)
                })
                .collect(),
        ),
        Mode::PickNoteMoveTarget => {
            let mut items = vec!["Global".to_string()];
            items.extend(model.workspaces.iter().map(|w| &w.name).sorted().cloned());
            Some(items)
        }
        Mode::PickNoteMoveWorktree => {
            let workspace_id = model.note_move_workspace.as_ref()?;
            let mut items = vec!["(workspace-level)".to_string()];
            items.extend(
                model
                    .worktrees
                    .iter()
                    .filter(|w| &w.workspace_id == workspace_id)
                    .map(|w| &w.name)
                    .sorted()
                    .cloned(),
            );
            Some(items)
        }
        Mode::PickNoteMoveSession => {
            let worktree_id = model.note_move_worktree.as_ref()?;
            let mut items = vec!["(worktree-level)".to_string()];
            items.extend(
                model
                    .sessions
                    .iter()
                    .filter(|s| s.worktree_id.as_ref() == Some(worktree_id))
                    .map(|s| &s.title)
                    .sorted()
                    .cloned(),
            );
            Some(items)
        }
        _ => None,
    }
}

fn draw_picker_overlay(frame: &mut Frame, items: &[String], selected: usize, area: Rect) {
    let height = (items.len() as u16 + 2).min(area.height.saturating_sub(2)).max(3);
    let width = (area.width / 2).max(20);
    let popup = Rect { x: area.x + area.width.saturating_sub(width), y: area.y, width, height };
    let list_items: Vec<ListItem> = items
        .iter()
        .enumerate()
        .map(|(index, label)| {
            let style = if index == selected { Style::default().add_modifier(Modifier::REVERSED) } else { Style::default() };
            ListItem::new(Line::from(Span::styled(label.clone(), style)))
        })
        .collect();
    frame.render_widget(List::new(list_items).block(Block::default().borders(Borders::ALL).title("Select")), popup);
}

fn draw_key_hints(frame: &mut Frame, model: &Model, area: Rect) {
    let hints = if model.mode == Mode::Normal { crate::keybindings::NORMAL_MODE_HINTS } else { crate::keybindings::MODAL_HINTS };
    let text = hints.iter().map(|h| format!("{}:{}", h.keys, h.description)).collect::<Vec<_>>().join("  ");
    frame.render_widget(Paragraph::new(text).style(Style::default().fg(Color::DarkGray)), area);
}

fn draw_confirm_overlay(frame: &mut Frame, text: String, area: Rect) {
    let width = (text.len() as u16 + 4).min(area.width);
    let height = 3;
    let popup = Rect {
        x: area.x + (area.width.saturating_sub(width)) / 2,
        y: area.y + (area.height.saturating_sub(height)) / 2,
        width,
        height,
    };
    frame.render_widget(
        Paragraph::new(text).style(Style::default().fg(Color::Yellow)).block(Block::default().borders(Borders::ALL)),
        popup,
    );
}
