//! Mouse event routing (§4.3): maps a raw terminal mouse event plus the last
//! known layout rectangles to a logical target, so the reducer never deals
//! with terminal coordinates directly.

use crossterm::event::MouseButton;
use crossterm::event::MouseEvent;
use crossterm::event::MouseEventKind;
use ratatui::layout::Rect;

use crate::sidebar::RowKey;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hitbox {
    pub area: Rect,
    pub row_index: usize,
}

/// Snapshot of the areas drawn this frame, captured by `view.rs` and handed
/// to the mouse router so clicks can be resolved against rows that existed
/// at the time they were drawn, not whatever is current when the event
/// arrives a frame later.
#[derive(Debug, Clone, Default)]
pub struct LayoutSnapshot {
    pub sidebar_rows: Vec<Hitbox>,
    pub sidebar_area: Rect,
    pub transcript_area: Rect,
    pub compose_area: Rect,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MouseTarget {
    SidebarRow(usize),
    Transcript { relative_line: u16 },
    Compose,
    ScrollUp,
    ScrollDown,
    Outside,
}

fn contains(area: Rect, x: u16, y: u16) -> bool {
    x >= area.x && x < area.x + area.width && y >= area.y && y < area.y + area.height
}

pub fn route(event: MouseEvent, layout: &LayoutSnapshot) -> MouseTarget {
    match event.kind {
        MouseEventKind::ScrollUp => return MouseTarget::ScrollUp,
        MouseEventKind::ScrollDown => return MouseTarget::ScrollDown,
        MouseEventKind::Down(MouseButton::Left) | MouseEventKind::Down(MouseButton::Right) => {}
        _ => return MouseTarget::Outside,
    }

    if contains(layout.sidebar_area, event.column, event.row) {
        for hitbox in &layout.sidebar_rows {
            if contains(hitbox.area, event.column, event.row) {
                return MouseTarget::SidebarRow(hitbox.row_index);
            }
        }
        return MouseTarget::Outside;
    }
    if contains(layout.compose_area, event.column, event.row) {
        return MouseTarget::Compose;
    }
    if contains(layout.transcript_area, event.column, event.row) {
        let relative_line = event.row.saturating_sub(layout.transcript_area.y);
        return MouseTarget::Transcript { relative_line };
    }
    MouseTarget::Outside
}

pub fn row_key_at(layout: &LayoutSnapshot, rows: &[crate::sidebar::SidebarRow], index: usize) -> Option<RowKey> {
    let _ = layout;
    rows.get(index).map(|r| r.key())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn click(x: u16, y: u16) -> MouseEvent {
        MouseEvent { kind: MouseEventKind::Down(MouseButton::Left), column: x, row: y, modifiers: KeyModifiers::NONE }
    }

    #[test]
    fn click_inside_a_sidebar_row_resolves_to_that_row() {
        let layout = LayoutSnapshot {
            sidebar_area: Rect { x: 0, y: 0, width: 20, height: 10 },
            sidebar_rows: vec![Hitbox { area: Rect { x: 0, y: 3, width: 20, height: 1 }, row_index: 2 }],
            ..Default::default()
        };
        assert_eq!(route(click(5, 3), &layout), MouseTarget::SidebarRow(2));
    }

    #[test]
    fn click_outside_all_areas_is_outside() {
        let layout = LayoutSnapshot::default();
        assert_eq!(route(click(100, 100), &layout), MouseTarget::Outside);
    }

    #[test]
    fn scroll_events_ignore_position() {
        let layout = LayoutSnapshot::default();
        let event = MouseEvent { kind: MouseEventKind::ScrollUp, column: 0, row: 0, modifiers: KeyModifiers::NONE };
        assert_eq!(route(event, &layout), MouseTarget::ScrollUp);
    }
}
