use crate::chat_widget::ChatWidget;
use crate::ui::Hitboxes;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Position;

const PAGE_LINES: u16 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    Continue,
    Quit,
}

pub fn handle_key(widget: &mut ChatWidget, key: KeyEvent) -> KeyOutcome {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        match key.code {
            KeyCode::Char('c') | KeyCode::Char('q') => return KeyOutcome::Quit,
            KeyCode::Char('t') => widget.toggle(),
            _ => {}
        }
        return KeyOutcome::Continue;
    }

    if !widget.state().is_open() {
        match key.code {
            KeyCode::Enter | KeyCode::Char('o') => widget.open(),
            KeyCode::Char('q') => return KeyOutcome::Quit,
            _ => {}
        }
        return KeyOutcome::Continue;
    }

    match key.code {
        KeyCode::Esc => widget.close(),
        KeyCode::Enter => {
            widget.submit_input();
        }
        KeyCode::Backspace => widget.backspace(),
        KeyCode::Char(c) => widget.push_char(c),
        KeyCode::F(n) if n >= 1 => {
            widget.quick_reply(usize::from(n - 1));
        }
        KeyCode::Left => widget.scroll_quick_replies(-1),
        KeyCode::Right => widget.scroll_quick_replies(1),
        KeyCode::Up => widget.scroll_up(1),
        KeyCode::Down => widget.scroll_down(1),
        KeyCode::PageUp => widget.scroll_up(PAGE_LINES),
        KeyCode::PageDown => widget.scroll_down(PAGE_LINES),
        _ => {}
    }
    KeyOutcome::Continue
}

pub fn handle_mouse(widget: &mut ChatWidget, mouse: MouseEvent, hitboxes: &Hitboxes) {
    let at = Position::new(mouse.column, mouse.row);
    let inside = |rect: Option<ratatui::layout::Rect>| rect.map(|r| r.contains(at)).unwrap_or(false);

    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            if hitboxes.launcher.contains(at) {
                widget.toggle();
            } else if inside(hitboxes.close) {
                widget.close();
            } else if inside(hitboxes.send) {
                widget.submit_input();
            } else if let Some(idx) = hitboxes.quick_reply_at(mouse.column, mouse.row) {
                widget.quick_reply(idx);
            }
        }
        MouseEventKind::ScrollLeft => widget.scroll_quick_replies(-1),
        MouseEventKind::ScrollRight => widget.scroll_quick_replies(1),
        MouseEventKind::ScrollUp if inside(hitboxes.quick_reply_row) => {
            widget.scroll_quick_replies(-1)
        }
        MouseEventKind::ScrollDown if inside(hitboxes.quick_reply_row) => {
            widget.scroll_quick_replies(1)
        }
        MouseEventKind::ScrollUp if inside(hitboxes.body) => widget.scroll_up(1),
        MouseEventKind::ScrollDown if inside(hitboxes.body) => widget.scroll_down(1),
        _ => {}
    }
}
