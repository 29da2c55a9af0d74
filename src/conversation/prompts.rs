//! User-facing texts, Markdown formatted.

use crate::conversation::commands::{buy_sell, main_menu};
use crate::conversation::{Session, Step};
use crate::messaging::Keyboard;
use crate::models::{Direction, Instrument};

pub const WELCOME: &str = "*Welcome to Trading Setup Generator*\n\n\
    Generates take-profit ladders for major FX pairs and metals.\n\n\
    *Start now*: tap a symbol button.";
pub const NEW_SETUP: &str = "*New setup ready!*\nChoose a symbol:";
pub const CHOOSE_SYMBOL: &str = "Choose a symbol:";
pub const DELETED: &str = "*Data deleted. Start fresh!*";
pub const CLEARED: &str = "*Chat cleared!*\nWelcome back!";
pub const ENTER_ENTRY: &str = "Enter the entry price:";
pub const ENTER_STOP_LOSS: &str = "Enter the stop loss price:";
pub const INVALID_DIRECTION: &str = "*Please choose BUY or SELL only.*";
pub const INVALID_ENTRY: &str = "*Invalid entry price. Enter it again:*";
pub const INVALID_STOP_LOSS: &str = "*Invalid stop loss price. Enter it again:*";
pub const POINTS_MISSING: &str = "*Enter an entry price and a stop loss first.*";

pub fn symbol_selected(instrument: Instrument) -> String {
    format!("*{} selected*\n\nChoose trade type:", instrument)
}

pub fn direction_selected(direction: Direction) -> String {
    format!("*{} selected*\n\n{}", direction, ENTER_ENTRY)
}

pub fn stop_distance(instrument: Instrument, pips: f64) -> String {
    format!("*{} stop distance*: `{:.1}` pips", instrument, pips)
}

/// What to ask for in the session's current step.
pub fn prompt_for(session: &Session) -> (String, Keyboard) {
    match (session.step, session.instrument) {
        (Step::AwaitingDirection, Some(instrument)) => (symbol_selected(instrument), buy_sell()),
        (Step::AwaitingEntry, _) => (ENTER_ENTRY.to_string(), Keyboard::Remove),
        (Step::AwaitingStopLoss, _) => (ENTER_STOP_LOSS.to_string(), Keyboard::Remove),
        _ => (CHOOSE_SYMBOL.to_string(), main_menu()),
    }
}

/// Re-prompt after invalid input in `step`.
pub fn rejection(step: Step) -> (&'static str, Keyboard) {
    match step {
        Step::AwaitingDirection => (INVALID_DIRECTION, buy_sell()),
        Step::AwaitingEntry => (INVALID_ENTRY, Keyboard::Remove),
        Step::AwaitingStopLoss => (INVALID_STOP_LOSS, Keyboard::Remove),
        Step::AwaitingSymbol | Step::Complete => (CHOOSE_SYMBOL, main_menu()),
    }
}
