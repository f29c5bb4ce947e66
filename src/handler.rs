use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;

use crate::app::App;
use crate::location::ViewState;
use crate::tui::AppEvent;

pub fn handle_event(app: &mut App, event: AppEvent) {
    match event {
        AppEvent::Key(key) => handle_key(app, key),
        AppEvent::Mouse(mouse) => handle_mouse(app, mouse),
        AppEvent::Resize(_, _) => {}
        AppEvent::Tick => app.on_tick(),
    }
}

fn handle_key(app: &mut App, key: KeyEvent) {
    // Ctrl-C quits from anywhere
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.should_quit = true;
        return;
    }

    if app.location_input.is_some() {
        handle_location_editing(app, key);
        return;
    }

    match app.view() {
        ViewState::SurahList => {
            if app.searching {
                handle_search_editing(app, key);
            } else {
                handle_list_normal(app, key);
            }
        }
        ViewState::SurahDetail(_) => handle_detail_normal(app, key),
    }
}

fn handle_location_editing(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.location_input = None,
        KeyCode::Enter => {
            if let Some(input) = app.location_input.take() {
                app.navigate_to(&input);
            }
        }
        KeyCode::Backspace => {
            if let Some(input) = app.location_input.as_mut() {
                input.pop();
            }
        }
        KeyCode::Char(c) => {
            if let Some(input) = app.location_input.as_mut() {
                input.push(c);
            }
        }
        _ => {}
    }
}

fn handle_list_normal(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') => app.should_quit = true,

        KeyCode::Char('/') => app.searching = true,
        KeyCode::Char('o') => app.location_input = Some(String::new()),

        KeyCode::Char('j') | KeyCode::Down => app.list_nav_down(),
        KeyCode::Char('k') | KeyCode::Up => app.list_nav_up(),
        KeyCode::Char('g') => app.list_nav_first(),
        KeyCode::Char('G') => app.list_nav_last(),

        KeyCode::Enter | KeyCode::Char('l') | KeyCode::Right => app.open_selected_surah(),

        // Esc clears an applied filter
        KeyCode::Esc => {
            if !app.search_input.is_empty() {
                app.search_input.clear();
                app.clamp_list_selection();
            }
        }

        _ => {}
    }
}

fn handle_search_editing(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Enter => app.searching = false,
        KeyCode::Backspace => {
            app.search_input.pop();
            app.clamp_list_selection();
        }
        KeyCode::Char(c) => {
            app.search_input.push(c);
            app.clamp_list_selection();
        }
        _ => {}
    }
}

fn handle_detail_normal(app: &mut App, key: KeyEvent) {
    if app.jump.dropdown_open() {
        match key.code {
            KeyCode::Esc | KeyCode::Char('a') => app.close_dropdown(),
            KeyCode::Char('j') | KeyCode::Down => app.dropdown_nav_down(),
            KeyCode::Char('k') | KeyCode::Up => app.dropdown_nav_up(),
            KeyCode::Char('g') => app.dropdown_state.select(Some(0)),
            KeyCode::Enter => app.jump_to_selected_dropdown(),
            _ => {}
        }
        return;
    }

    match key.code {
        KeyCode::Char('q') => app.should_quit = true,

        KeyCode::Esc | KeyCode::Char('h') | KeyCode::Left | KeyCode::Backspace => app.go_back(),

        KeyCode::Char('a') => app.toggle_dropdown(),
        KeyCode::Char('o') => app.location_input = Some(String::new()),

        KeyCode::Char('j') | KeyCode::Down => app.scroll_down(),
        KeyCode::Char('k') | KeyCode::Up => app.scroll_up(),
        KeyCode::Char('d') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.scroll_half_page_down();
        }
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.scroll_half_page_up();
        }
        KeyCode::Char('g') => app.scroll_to_top(),
        KeyCode::Char('G') => app.scroll_to_bottom(),

        _ => {}
    }
}

/// Check if a point is within a rectangle
fn point_in_rect(x: u16, y: u16, rect: Rect) -> bool {
    x >= rect.x && x < rect.x + rect.width && y >= rect.y && y < rect.y + rect.height
}

fn handle_mouse(app: &mut App, mouse: MouseEvent) {
    // The open dropdown owns pointer presses: anything outside its bounds
    // closes it. The hit area only exists while the dropdown is open.
    if matches!(mouse.kind, MouseEventKind::Down(_)) {
        if let Some(area) = app.dropdown_area {
            if !point_in_rect(mouse.column, mouse.row, area) {
                app.close_dropdown();
            }
            return;
        }
    }

    match mouse.kind {
        MouseEventKind::ScrollDown => match app.view() {
            ViewState::SurahList => app.list_nav_down(),
            ViewState::SurahDetail(_) => {
                app.scroll_down();
                app.scroll_down();
                app.scroll_down();
            }
        },
        MouseEventKind::ScrollUp => match app.view() {
            ViewState::SurahList => app.list_nav_up(),
            ViewState::SurahDetail(_) => {
                app.scroll_up();
                app.scroll_up();
                app.scroll_up();
            }
        },
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::SurahClient;
    use crossterm::event::{KeyEventState, MouseButton};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: crossterm::event::KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    fn press_at(column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    fn test_app() -> App {
        App::new(SurahClient::new("http://127.0.0.1:9"), "")
    }

    #[tokio::test]
    async fn test_press_outside_dropdown_closes_it() {
        let mut app = test_app();
        app.jump.toggle_dropdown();
        app.dropdown_area = Some(Rect::new(10, 10, 20, 10));

        handle_mouse(&mut app, press_at(0, 0));
        assert!(!app.jump.dropdown_open());
        assert!(app.dropdown_area.is_none());
    }

    #[tokio::test]
    async fn test_press_inside_dropdown_keeps_it_open() {
        let mut app = test_app();
        app.jump.toggle_dropdown();
        app.dropdown_area = Some(Rect::new(10, 10, 20, 10));

        handle_mouse(&mut app, press_at(15, 12));
        assert!(app.jump.dropdown_open());
    }

    #[tokio::test]
    async fn test_press_with_dropdown_closed_scrolls_nothing_strange() {
        let mut app = test_app();
        handle_mouse(&mut app, press_at(0, 0));
        assert!(!app.jump.dropdown_open());
    }

    #[tokio::test]
    async fn test_location_prompt_enter_navigates() {
        let mut app = test_app();
        handle_key(&mut app, key(KeyCode::Char('o')));
        assert!(app.location_input.is_some());

        for c in "#/chapter/3".chars() {
            handle_key(&mut app, key(KeyCode::Char(c)));
        }
        handle_key(&mut app, key(KeyCode::Enter));

        assert!(app.location_input.is_none());
        assert_eq!(app.view(), ViewState::SurahDetail(3));
        assert_eq!(app.location(), "#/chapter/3");
    }

    #[tokio::test]
    async fn test_typing_in_search_updates_filter() {
        let mut app = test_app();
        handle_key(&mut app, key(KeyCode::Char('/')));
        assert!(app.searching);

        handle_key(&mut app, key(KeyCode::Char('y')));
        assert_eq!(app.search_input, "y");

        handle_key(&mut app, key(KeyCode::Esc));
        assert!(!app.searching);
        assert_eq!(app.search_input, "y");
    }
}
