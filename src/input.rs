use crate::term::{Layout, CELL_PX};
use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
use solarium::{hit_test, Control, FrameCache, PointerEvent};
use std::time::Duration;

#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) enum Action {
    Quit,
    HelpToggle,
    ToggleView,
    ToggleOrbits,
    FocusNext,
    FocusPrev,
    /// Move the focused slider by whole steps.
    AdjustFocused(i32),
    Nudge(Control, i32),
    ResetParams,
    Dismiss,
    Pointer(PointerEvent),
}

pub(crate) fn collect_input_nonblocking(
    max_frame_time: Duration,
    layout: &Layout,
) -> anyhow::Result<Vec<Action>> {
    let mut out = Vec::new();

    // poll with a tiny timeout so we stay responsive
    let timeout = std::cmp::min(Duration::from_millis(1), max_frame_time);
    while event::poll(timeout)? {
        if let Some(action) = map_event(event::read()?, layout) {
            out.push(action);
            if out.len() >= 64 {
                break;
            }
        }
    }
    Ok(out)
}

/// Terminals report no "pointer left the window" event, so hover is only
/// cleared by moving onto the panel or by the window losing focus.
pub(crate) fn map_event(ev: Event, layout: &Layout) -> Option<Action> {
    match ev {
        Event::Key(k) if k.kind == KeyEventKind::Press || k.kind == KeyEventKind::Repeat => {
            map_key(k)
        }
        Event::Mouse(m) => map_mouse(m, layout).map(Action::Pointer),
        Event::FocusLost => Some(Action::Pointer(PointerEvent::Leave)),
        _ => None,
    }
}

fn map_key(k: KeyEvent) -> Option<Action> {
    if k.modifiers.contains(KeyModifiers::CONTROL) && matches!(k.code, KeyCode::Char('c')) {
        return Some(Action::Quit);
    }
    let action = match k.code {
        KeyCode::Char('q') | KeyCode::Char('Q') => Action::Quit,
        KeyCode::Char('h') | KeyCode::Char('H') | KeyCode::Char('?') => Action::HelpToggle,
        KeyCode::Char('v') | KeyCode::Char('V') => Action::ToggleView,
        KeyCode::Char('o') | KeyCode::Char('O') => Action::ToggleOrbits,
        KeyCode::Char('r') | KeyCode::Char('R') => Action::ResetParams,
        KeyCode::Tab | KeyCode::Down => Action::FocusNext,
        KeyCode::BackTab | KeyCode::Up => Action::FocusPrev,
        KeyCode::Right => Action::AdjustFocused(1),
        KeyCode::Left => Action::AdjustFocused(-1),
        KeyCode::Char(']') => Action::Nudge(Control::Speed, 1),
        KeyCode::Char('[') => Action::Nudge(Control::Speed, -1),
        KeyCode::Char('=') | KeyCode::Char('+') => Action::Nudge(Control::Distance, 1),
        KeyCode::Char('-') => Action::Nudge(Control::Distance, -1),
        KeyCode::Char('.') => Action::Nudge(Control::CentralSize, 1),
        KeyCode::Char(',') => Action::Nudge(Control::CentralSize, -1),
        KeyCode::Char('\'') => Action::Nudge(Control::BodySize, 1),
        KeyCode::Char(';') => Action::Nudge(Control::BodySize, -1),
        KeyCode::Esc => Action::Dismiss,
        _ => return None,
    };
    Some(action)
}

/// Mouse cells become canvas pixels; anything over the panel counts as leaving.
fn map_mouse(m: MouseEvent, layout: &Layout) -> Option<PointerEvent> {
    let pos = layout.cell_to_canvas(m.column, m.row);
    match (m.kind, pos) {
        (MouseEventKind::Down(MouseButton::Left), Some((x, y))) => Some(PointerEvent::Click { x, y }),
        (MouseEventKind::Moved | MouseEventKind::Drag(_), Some((x, y))) => {
            Some(PointerEvent::Move { x, y })
        }
        (MouseEventKind::Moved | MouseEventKind::Drag(_), None) => Some(PointerEvent::Leave),
        _ => None,
    }
}

/// Widen a pointer at a cell centre to the cell's whole pixel block.
///
/// If the centre misses, the event is moved to the point of the block nearest
/// the first body (catalog order) whose disk reaches into the block.
pub(crate) fn resolve_in_cell(ev: PointerEvent, cache: &FrameCache) -> PointerEvent {
    let (x, y) = match ev {
        PointerEvent::Click { x, y } | PointerEvent::Move { x, y } => (x, y),
        PointerEvent::Leave => return ev,
    };
    if hit_test(cache, x, y).is_some() {
        return ev;
    }

    let (cw, ch) = CELL_PX;
    let (x0, y0) = ((x / cw).floor() * cw, (y / ch).floor() * ch);
    let target = cache.iter().find_map(|(_, pl)| {
        let p = pl?;
        let (nx, ny) = (p.x.clamp(x0, x0 + cw), p.y.clamp(y0, y0 + ch));
        p.contains(nx, ny).then_some((nx, ny))
    });

    match (ev, target) {
        (PointerEvent::Click { .. }, Some((x, y))) => PointerEvent::Click { x, y },
        (PointerEvent::Move { .. }, Some((x, y))) => PointerEvent::Move { x, y },
        _ => ev,
    }
}
