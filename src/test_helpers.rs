use crate::config::Config;
use crate::conversation::{Session, Step};
use crate::models::{Direction, Instrument};

/// EURUSD BUY, entry 1.10000, stop 1.09500, filled up to `step`.
pub fn session_at(step: Step) -> Session {
    let mut s = Session::new();
    s.step = step;
    if step == Step::AwaitingSymbol {
        return s;
    }
    s.instrument = Some(Instrument::EurUsd);
    if step == Step::AwaitingDirection {
        return s;
    }
    s.direction = Some(Direction::Buy);
    if step == Step::AwaitingEntry {
        return s;
    }
    s.entry_price = Some(1.1);
    if step == Step::AwaitingStopLoss {
        return s;
    }
    s.stop_loss = Some(1.095);
    s
}

/// A Config with placeholder secrets and no reachable credentials.
pub fn test_config() -> Config {
    let missing_key = std::env::temp_dir()
        .join(format!("setup_bot_missing_key_{}.json", std::process::id()))
        .to_string_lossy()
        .to_string();

    Config::from_lookup(|key| match key {
        "BOT_TOKEN" => Some("123:test".to_string()),
        "SPREADSHEET_ID" => Some("sheet-123".to_string()),
        "SERVICE_ACCOUNT_FILE" => Some(missing_key.clone()),
        _ => None,
    })
    .expect("test config is complete")
}
