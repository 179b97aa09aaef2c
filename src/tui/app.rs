//! Presentation state and input handling for the terminal front end.
//!
//! `TuiApp` owns the `FlipMachine` and translates `TuiEvent`s into calls
//! on it. It never touches card visibility itself.

use log::{debug, info, warn};
use ratatui::layout::Rect;
use std::time::Duration;

use super::event::TuiEvent;
use crate::cards::{CardId, PaletteRegistry};
use crate::core::GameRng;
use crate::nav::GridNavigator;
use crate::session::{FlipMachine, Notification, NotificationSink};
use crate::settings::ResolvedConfig;

pub const HELP_IDLE: &str = "l: load cards  p/P: palette  q: quit";
pub const HELP_PLAYING: &str = "arrows: move  space/enter: flip  click: flip  n: new game  q: quit";

/// Status line and alert box; receives the machine's notifications.
#[derive(Debug, Default)]
pub struct StatusPanel {
    /// Latest announcement.
    pub line: String,
    /// Round-ending message waiting to be dismissed.
    pub alert: Option<Notification>,
}

impl NotificationSink for StatusPanel {
    fn notify(&mut self, notification: &Notification) {
        info!("{}", notification);
        if notification.is_final() {
            self.alert = Some(notification.clone());
        }
        self.line = notification.message();
    }
}

pub struct TuiApp {
    pub machine: FlipMachine,
    pub palettes: PaletteRegistry,
    /// Palette used by the next load.
    pub palette: String,
    pub rng: GameRng,
    pub focus: CardId,
    pub panel: StatusPanel,
    /// Card hit boxes from the last frame, indexed by card.
    pub card_rects: Vec<Rect>,
}

impl TuiApp {
    pub fn new(config: ResolvedConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => GameRng::new(seed),
            None => GameRng::from_entropy(),
        };
        info!("Deal seed {}", rng.seed());
        Self {
            machine: FlipMachine::new(config.game),
            palettes: config.palettes,
            palette: config.palette,
            rng,
            focus: CardId::new(0),
            panel: StatusPanel::default(),
            card_rects: Vec::new(),
        }
    }

    pub fn navigator(&self) -> GridNavigator {
        let len = self
            .machine
            .deck()
            .map_or(self.machine.config().card_count(), |d| d.len());
        GridNavigator::new(self.machine.config().grid_width, len)
    }

    pub fn help(&self) -> &'static str {
        if self.machine.has_round() {
            HELP_PLAYING
        } else {
            HELP_IDLE
        }
    }

    /// Advance game time by real elapsed time.
    pub fn update(&mut self, elapsed: Duration) -> bool {
        let fired = self.machine.advance(elapsed);
        self.pump();
        !fired.is_empty()
    }

    fn pump(&mut self) {
        self.machine.flush_to(&mut self.panel);
    }

    /// Handle one input event. Returns true when the app should quit.
    pub fn handle(&mut self, event: TuiEvent) -> bool {
        if event == TuiEvent::Quit {
            return true;
        }

        // A pending alert swallows the next key press or click, then the
        // board is cleared.
        if self.panel.alert.is_some() {
            if !matches!(event, TuiEvent::Resize) {
                self.new_game();
            }
            return false;
        }

        match event {
            TuiEvent::Move(direction) => {
                self.focus = self.navigator().step(self.focus, direction);
            }
            TuiEvent::Activate => self.activate(self.focus),
            TuiEvent::Click(col, row) => {
                if let Some(card) = self.hit_test(col, row) {
                    self.focus = card;
                    self.activate(card);
                }
            }
            TuiEvent::LoadCards => self.load_cards(),
            TuiEvent::NewGame => self.new_game(),
            TuiEvent::NextPalette => self.cycle_palette(1),
            TuiEvent::PrevPalette => self.cycle_palette(-1),
            TuiEvent::Quit | TuiEvent::Resize | TuiEvent::OtherKey => {}
        }
        false
    }

    fn activate(&mut self, card: CardId) {
        let outcome = self.machine.activate(card);
        if outcome.is_ignored() {
            log::trace!("{card}: {outcome:?}");
        }
        self.pump();
    }

    /// Deal a round from the selected palette. Ignored while a round is on.
    pub fn load_cards(&mut self) {
        if self.machine.has_round() {
            return;
        }
        debug!("Dealing {} from {:?}", self.palette, self.rng.state());
        let result = self
            .palettes
            .require(&self.palette)
            .cloned()
            .and_then(|palette| self.machine.deal(&palette, &mut self.rng));
        match result {
            Ok(()) => {
                self.focus = CardId::new(0);
                self.panel.line.clear();
            }
            Err(e) => {
                warn!("Could not deal: {}", e);
                self.panel.line = e.to_string();
            }
        }
    }

    /// Clear the board.
    pub fn new_game(&mut self) {
        self.machine.reset();
        self.panel = StatusPanel::default();
        self.focus = CardId::new(0);
        self.card_rects.clear();
    }

    fn cycle_palette(&mut self, step: isize) {
        if self.machine.has_round() {
            return;
        }
        let pair_count = self.machine.config().pair_count;
        if let Some(next) = self.palettes.cycle(&self.palette, pair_count, step) {
            self.palette = next.to_string();
        }
    }

    fn hit_test(&self, col: u16, row: u16) -> Option<CardId> {
        self.card_rects
            .iter()
            .position(|r| {
                col >= r.x && col < r.x + r.width && row >= r.y && row < r.y + r.height
            })
            .map(CardId::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::Visibility;
    use crate::nav::Direction;
    use crate::session::FlipPhase;
    use crate::settings::{resolve, MatchConfig};

    fn app() -> TuiApp {
        let config = resolve(&MatchConfig::default(), None, Some(42)).unwrap();
        TuiApp::new(config)
    }

    fn pair_for(app: &TuiApp, card: CardId) -> CardId {
        let deck = app.machine.deck().unwrap();
        let face = &deck.get(card).unwrap().face;
        deck.iter()
            .find(|c| c.id != card && &c.face == face)
            .map(|c| c.id)
            .unwrap()
    }

    #[test]
    fn test_load_cards_deals_once() {
        let mut app = app();
        assert_eq!(app.help(), HELP_IDLE);
        app.handle(TuiEvent::LoadCards);
        let first = app.machine.deck().cloned().unwrap();
        assert_eq!(first.len(), 16);

        app.handle(TuiEvent::LoadCards);
        assert_eq!(app.machine.deck(), Some(&first));
        assert_eq!(app.help(), HELP_PLAYING);
    }

    #[test]
    fn test_keyboard_flip_and_match() {
        let mut app = app();
        app.handle(TuiEvent::LoadCards);
        let partner = pair_for(&app, CardId::new(0));

        app.handle(TuiEvent::Activate);
        app.focus = partner;
        app.handle(TuiEvent::Activate);

        let session = app.machine.session().unwrap();
        assert_eq!(session.pairs_found, 1);
        assert_eq!(app.panel.line, "1 out of 8 pairs found");
    }

    #[test]
    fn test_move_focus() {
        let mut app = app();
        app.handle(TuiEvent::LoadCards);
        app.handle(TuiEvent::Move(Direction::Down));
        app.handle(TuiEvent::Move(Direction::Right));
        assert_eq!(app.focus, CardId::new(5));
    }

    #[test]
    fn test_click_activates_card_under_cursor() {
        let mut app = app();
        app.handle(TuiEvent::LoadCards);
        app.card_rects = (0..16u16)
            .map(|i| Rect::new((i % 4) * 10, (i / 4) * 5, 10, 5))
            .collect();

        app.handle(TuiEvent::Click(12, 6));
        assert_eq!(app.focus, CardId::new(5));
        let deck = app.machine.deck().unwrap();
        assert_eq!(deck.get(CardId::new(5)).unwrap().visibility, Visibility::Revealed);

        app.handle(TuiEvent::Click(200, 200));
        assert_eq!(app.machine.phase(), Some(FlipPhase::OneSelected));
    }

    #[test]
    fn test_timeout_alert_then_dismiss_resets() {
        let mut app = app();
        app.handle(TuiEvent::LoadCards);
        app.update(Duration::from_secs(101));

        let alert = app.panel.alert.clone().unwrap();
        assert_eq!(alert, Notification::TimeExpired { pairs_found: 0 });

        app.handle(TuiEvent::OtherKey);
        assert!(!app.machine.has_round());
        assert!(app.panel.alert.is_none());
    }

    #[test]
    fn test_low_time_announced() {
        let mut app = app();
        app.handle(TuiEvent::LoadCards);
        app.update(Duration::from_secs(70));
        assert_eq!(app.panel.line, "You have 30 seconds left");
        assert!(app.panel.alert.is_none());
    }

    #[test]
    fn test_palette_cycles_only_between_rounds() {
        let mut app = app();
        app.handle(TuiEvent::NextPalette);
        assert_eq!(app.palette, "COLORBLIND2");
        app.handle(TuiEvent::PrevPalette);
        assert_eq!(app.palette, "COLORBLIND1");

        app.handle(TuiEvent::LoadCards);
        app.handle(TuiEvent::NextPalette);
        assert_eq!(app.palette, "COLORBLIND1");
    }

    #[test]
    fn test_quit() {
        let mut app = app();
        assert!(app.handle(TuiEvent::Quit));
        assert!(!app.handle(TuiEvent::OtherKey));
    }
}
