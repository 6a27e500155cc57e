//! Keyboard input dispatch.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};

use atr_risk_core::Direction;

use crate::app::AppState;

pub fn handle_key(app: &mut AppState, key: KeyEvent) {
    // Windows sends both Press and Release.
    if key.kind != KeyEventKind::Press {
        return;
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => app.quit(),
        KeyCode::Char('b') => app.click(Direction::Buy),
        KeyCode::Char('s') => app.click(Direction::Sell),
        KeyCode::Left | KeyCode::Char('h') => app.select(Direction::Buy),
        KeyCode::Right | KeyCode::Char('l') => app.select(Direction::Sell),
        KeyCode::Tab | KeyCode::BackTab => app.toggle_selection(),
        KeyCode::Enter | KeyCode::Char(' ') => app.click_selected(),
        KeyCode::Char('n') => {
            app.autoplay = false;
            app.step();
        }
        KeyCode::Char('p') => app.toggle_autoplay(),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::tests::app;
    use crossterm::event::{KeyEventState, KeyModifiers};

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn arrows_and_tab_move_selection() {
        let mut app = app(50, 50);
        handle_key(&mut app, press(KeyCode::Right));
        assert_eq!(app.selected, Direction::Sell);
        handle_key(&mut app, press(KeyCode::Left));
        assert_eq!(app.selected, Direction::Buy);
        handle_key(&mut app, press(KeyCode::Tab));
        assert_eq!(app.selected, Direction::Sell);
    }

    #[test]
    fn enter_clicks_selected_button() {
        let mut app = app(400, 400);
        handle_key(&mut app, press(KeyCode::Tab));
        handle_key(&mut app, press(KeyCode::Enter));
        let orders = app.host().orders();
        assert_eq!(orders.len(), 1);
        assert_eq!(orders[0].request.direction, Direction::Sell);
    }

    #[test]
    fn b_and_s_click_directly() {
        let mut app = app(400, 400);
        handle_key(&mut app, press(KeyCode::Char('b')));
        handle_key(&mut app, press(KeyCode::Char('s')));
        let directions: Vec<_> = app
            .host()
            .orders()
            .iter()
            .map(|o| o.request.direction)
            .collect();
        assert_eq!(directions, vec![Direction::Buy, Direction::Sell]);
    }

    #[test]
    fn n_steps_and_pauses_autoplay() {
        let mut app = app(50, 10);
        app.autoplay = true;
        handle_key(&mut app, press(KeyCode::Char('n')));
        assert!(!app.autoplay);
        assert_eq!(app.host().visible_bars().len(), 11);
    }

    #[test]
    fn p_toggles_autoplay() {
        let mut app = app(50, 10);
        handle_key(&mut app, press(KeyCode::Char('p')));
        assert!(app.autoplay);
        handle_key(&mut app, press(KeyCode::Char('p')));
        assert!(!app.autoplay);
    }

    #[test]
    fn release_events_are_ignored() {
        let mut app = app(50, 50);
        let release = KeyEvent {
            code: KeyCode::Char('q'),
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        };
        handle_key(&mut app, release);
        assert!(app.running);
        handle_key(&mut app, press(KeyCode::Char('q')));
        assert!(!app.running);
    }
}
