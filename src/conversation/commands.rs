use crate::messaging::Keyboard;
use crate::models::Instrument;

pub const NEW_SETUP: &str = "New Setup";
pub const EDIT: &str = "Edit";
pub const BACK: &str = "Back";
pub const DELETE: &str = "Delete";
pub const RESTART: &str = "Restart";
pub const CLEAR_CHAT: &str = "Clear Chat";
pub const COMPUTE_POINTS: &str = "Compute Points";

/// A routed inbound text. Anything that is not a control command is
/// `Input` and goes to the current step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Start,
    NewSetup,
    Edit,
    Back,
    Delete,
    Restart,
    ClearChat,
    ComputePoints,
    Input(String),
}

impl Command {
    pub fn parse(text: &str) -> Command {
        let trimmed = text.trim();
        // "/start@SomeBot" in group chats, "/start <payload>" from deep links
        let first = trimmed.split_whitespace().next().unwrap_or("");
        let head = first.split('@').next().unwrap_or(first);
        if head.eq_ignore_ascii_case("/start") {
            return Command::Start;
        }

        match trimmed {
            NEW_SETUP | "بدء جديد" => Command::NewSetup,
            EDIT | "تعديل" => Command::Edit,
            BACK | "رجوع" => Command::Back,
            DELETE | "حذف" => Command::Delete,
            RESTART | "إعادة تشغيل" => Command::Restart,
            CLEAR_CHAT | "تنظيف الدردشة" => Command::ClearChat,
            COMPUTE_POINTS | "حساب النقاط" => Command::ComputePoints,
            _ => Command::Input(trimmed.to_string()),
        }
    }
}

/// Symbols followed by the control commands, two per row.
pub fn main_menu() -> Keyboard {
    let labels: Vec<&str> = Instrument::ALL
        .iter()
        .map(|i| i.as_str())
        .chain([
            NEW_SETUP,
            EDIT,
            BACK,
            DELETE,
            RESTART,
            CLEAR_CHAT,
            COMPUTE_POINTS,
        ])
        .collect();
    Keyboard::grid(&labels, 2, false)
}

pub fn buy_sell() -> Keyboard {
    Keyboard::grid(&["BUY", "SELL"], 2, true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_controls_and_aliases() {
        assert_eq!(Command::parse("/start"), Command::Start);
        assert_eq!(Command::parse("/start@TradeSetupBot"), Command::Start);
        assert_eq!(Command::parse("/start ref123"), Command::Start);
        assert_eq!(Command::parse("/start@TradeSetupBot ref123"), Command::Start);
        assert_eq!(Command::parse("/started"), Command::Input("/started".to_string()));
        assert_eq!(Command::parse("New Setup"), Command::NewSetup);
        assert_eq!(Command::parse("حذف"), Command::Delete);
        assert_eq!(Command::parse(" Clear Chat "), Command::ClearChat);
        assert_eq!(Command::parse("حساب النقاط"), Command::ComputePoints);
    }

    #[test]
    fn everything_else_is_input() {
        assert_eq!(Command::parse("EURUSD"), Command::Input("EURUSD".to_string()));
        assert_eq!(Command::parse(" 1.1 "), Command::Input("1.1".to_string()));
        assert_eq!(Command::parse("/help"), Command::Input("/help".to_string()));
    }

    #[test]
    fn main_menu_has_thirteen_buttons_in_pairs() {
        let Keyboard::Reply { rows, one_time } = main_menu() else {
            panic!("main menu must be a reply keyboard");
        };
        assert!(!one_time);
        assert_eq!(rows.len(), 7);
        assert_eq!(rows.iter().map(|r| r.len()).sum::<usize>(), 13);
        assert_eq!(rows[0], vec!["EURUSD".to_string(), "GBPUSD".to_string()]);
        assert_eq!(rows[6], vec![COMPUTE_POINTS.to_string()]);
    }
}
