use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind};

use super::app::{AppMode, EditorApp};

pub fn handle_event(app: &mut EditorApp, event: Event) {
    if let Event::Key(key) = event {
        if key.kind == KeyEventKind::Press {
            handle_key(app, key);
        }
    }
}

fn handle_key(app: &mut EditorApp, key: KeyEvent) {
    match app.mode {
        AppMode::Edit => handle_edit_key(app, key),
        AppMode::PickKind => handle_popup_key(app, key),
    }
}

fn handle_edit_key(app: &mut EditorApp, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') => app.should_quit = true,
        KeyCode::Left | KeyCode::Char('h') => app.move_cursor(-1, 0),
        KeyCode::Right | KeyCode::Char('l') => app.move_cursor(1, 0),
        KeyCode::Up | KeyCode::Char('k') => app.move_cursor(0, -1),
        KeyCode::Down | KeyCode::Char('j') => app.move_cursor(0, 1),
        KeyCode::Tab | KeyCode::F(2) => app.open_kind_picker(),
        KeyCode::Char('r') => app.rotate(),
        KeyCode::Enter => app.place(),
        KeyCode::Char(' ') => app.select_at_cursor(),
        KeyCode::Char('d') | KeyCode::Delete => app.delete_selected(),
        KeyCode::Char('e') => app.export(),
        _ => {}
    }
}

fn handle_popup_key(app: &mut EditorApp, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.close_popup(),
        KeyCode::Enter => app.popup_select(),
        KeyCode::Up | KeyCode::Char('k') => app.popup_up(),
        KeyCode::Down | KeyCode::Char('j') => app.popup_down(),
        _ => {}
    }
}
