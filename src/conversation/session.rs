use serde::{Deserialize, Serialize};

use crate::core::SetupRequest;
use crate::messaging::MessageId;
use crate::models::{Direction, Instrument};

/// Where a user is in building one setup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    AwaitingSymbol,
    AwaitingDirection,
    AwaitingEntry,
    AwaitingStopLoss,
    Complete,
}

/// Result of feeding one piece of user input to a [`Session`].
#[derive(Debug, Clone, PartialEq)]
pub enum Transition {
    SymbolSelected(Instrument),
    DirectionSelected(Direction),
    EntryAccepted(f64),
    Completed(SetupRequest),
    /// Input was invalid for this step. Nothing changed.
    Rejected(Step),
    /// Input means nothing in this step and is left to other routes.
    Ignored,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub step: Step,
    pub instrument: Option<Instrument>,
    pub direction: Option<Direction>,
    pub entry_price: Option<f64>,
    pub stop_loss: Option<f64>,
    /// Ids of everything sent to the user, for clear-chat.
    pub bot_messages: Vec<MessageId>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

/// Finite, non-NaN float, whitespace trimmed.
pub fn parse_price(input: &str) -> Option<f64> {
    input
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|p| p.is_finite())
}

impl Session {
    pub fn new() -> Self {
        Self {
            step: Step::AwaitingSymbol,
            instrument: None,
            direction: None,
            entry_price: None,
            stop_loss: None,
            bot_messages: Vec::new(),
        }
    }

    /// Drops every trade field and returns to symbol selection.
    /// Recorded message ids survive so clear-chat can still reach them.
    pub fn clear_fields(&mut self) {
        self.step = Step::AwaitingSymbol;
        self.instrument = None;
        self.direction = None;
        self.entry_price = None;
        self.stop_loss = None;
    }

    pub fn apply(&mut self, input: &str) -> Transition {
        match self.step {
            Step::AwaitingSymbol | Step::Complete => match Instrument::from_str_loose(input) {
                Some(instrument) => {
                    self.clear_fields();
                    self.instrument = Some(instrument);
                    self.step = Step::AwaitingDirection;
                    Transition::SymbolSelected(instrument)
                }
                None => Transition::Ignored,
            },
            Step::AwaitingDirection => match Direction::from_str_loose(input) {
                Some(direction) => {
                    self.direction = Some(direction);
                    self.step = Step::AwaitingEntry;
                    Transition::DirectionSelected(direction)
                }
                None => Transition::Rejected(self.step),
            },
            Step::AwaitingEntry => match parse_price(input) {
                Some(price) => {
                    self.entry_price = Some(price);
                    self.step = Step::AwaitingStopLoss;
                    Transition::EntryAccepted(price)
                }
                None => Transition::Rejected(self.step),
            },
            Step::AwaitingStopLoss => match parse_price(input) {
                Some(price) => {
                    self.stop_loss = Some(price);
                    match self.request() {
                        Some(request) => {
                            self.step = Step::Complete;
                            Transition::Completed(request)
                        }
                        None => {
                            self.clear_fields();
                            Transition::Ignored
                        }
                    }
                }
                None => Transition::Rejected(self.step),
            },
        }
    }

    /// One step back, forgetting the field of the step returned to.
    pub fn back(&mut self) -> Step {
        match self.step {
            Step::AwaitingSymbol => {}
            Step::AwaitingDirection => {
                self.instrument = None;
                self.step = Step::AwaitingSymbol;
            }
            Step::AwaitingEntry => {
                self.direction = None;
                self.step = Step::AwaitingDirection;
            }
            Step::AwaitingStopLoss => {
                self.entry_price = None;
                self.step = Step::AwaitingEntry;
            }
            Step::Complete => {
                self.stop_loss = None;
                self.step = Step::AwaitingStopLoss;
            }
        }
        self.step
    }

    /// Re-enter prices for the chosen instrument and direction.
    pub fn edit(&mut self) -> Step {
        match (self.instrument, self.direction) {
            (Some(_), Some(_)) => {
                self.entry_price = None;
                self.stop_loss = None;
                self.step = Step::AwaitingEntry;
            }
            _ => self.clear_fields(),
        }
        self.step
    }

    pub fn request(&self) -> Option<SetupRequest> {
        Some(SetupRequest {
            instrument: self.instrument?,
            direction: self.direction?,
            entry_price: self.entry_price?,
            stop_loss: self.stop_loss?,
        })
    }

    /// Stop distance in pips, once entry and stop are known.
    pub fn stop_distance_pips(&self) -> Option<f64> {
        let profile = self.instrument?.profile();
        Some(profile.pips_between(self.entry_price?, self.stop_loss?))
    }
}
