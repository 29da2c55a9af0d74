use std::sync::Arc;
use tracing::{debug, info};

use crate::conversation::commands::{buy_sell, main_menu, Command};
use crate::conversation::{prompts, Session, SessionStore, Step, Transition};
use crate::core::{SetupGenerator, SetupOutcome};
use crate::messaging::types::IncomingText;
use crate::messaging::{CleanupReport, Keyboard, Messenger, Outbox};

/// What one inbound message did.
#[derive(Debug)]
pub enum Handled {
    Reset,
    Deleted,
    Cleared(CleanupReport),
    Moved(Step),
    Points(Option<f64>),
    Advanced(Transition),
    Generated(SetupOutcome),
}

/// Routes each inbound text to a command or to the sender's current step.
pub struct Dispatcher {
    messenger: Arc<dyn Messenger>,
    sessions: Arc<dyn SessionStore>,
    generator: SetupGenerator,
}

impl Dispatcher {
    pub fn new(
        messenger: Arc<dyn Messenger>,
        sessions: Arc<dyn SessionStore>,
        generator: SetupGenerator,
    ) -> Self {
        Self {
            messenger,
            sessions,
            generator,
        }
    }

    pub async fn handle(&self, msg: &IncomingText) -> Handled {
        let command = Command::parse(&msg.text);
        debug!("User {} in chat {}: {:?}", msg.user, msg.chat, command);

        match command {
            Command::Start => self.reset(msg, prompts::WELCOME).await,
            Command::NewSetup | Command::Restart => self.reset(msg, prompts::NEW_SETUP).await,
            Command::Delete => self.delete(msg).await,
            Command::ClearChat => self.clear_chat(msg).await,
            Command::Back => self.move_to(msg, Session::back).await,
            Command::Edit => self.move_to(msg, Session::edit).await,
            Command::ComputePoints => self.compute_points(msg).await,
            Command::Input(text) => self.advance(msg, &text).await,
        }
    }

    async fn reset(&self, msg: &IncomingText, text: &str) -> Handled {
        let mut session = Session::new();
        Outbox::new(&*self.messenger, msg.chat, &mut session.bot_messages)
            .send(text, main_menu())
            .await;
        self.sessions.set(msg.user, session).await;
        Handled::Reset
    }

    async fn delete(&self, msg: &IncomingText) -> Handled {
        if self.sessions.delete(msg.user).await.is_some() {
            info!("Deleted session for user {}", msg.user);
        }
        let mut unrecorded = Vec::new();
        Outbox::new(&*self.messenger, msg.chat, &mut unrecorded)
            .send(prompts::DELETED, main_menu())
            .await;
        Handled::Deleted
    }

    async fn clear_chat(&self, msg: &IncomingText) -> Handled {
        let mut session = self.sessions.get(msg.user).await;
        let mut unrecorded = Vec::new();
        let sent = match session.as_mut() {
            Some(s) => &mut s.bot_messages,
            None => &mut unrecorded,
        };

        let mut outbox = Outbox::new(&*self.messenger, msg.chat, sent);
        let mut report = outbox.delete_sent().await;
        outbox.delete_one(msg.message_id, &mut report).await;
        outbox.send(prompts::CLEARED, main_menu()).await;

        info!(
            "Cleared chat {}: {} deleted, {} failed",
            msg.chat, report.deleted, report.failed
        );
        if let Some(session) = session {
            self.sessions.set(msg.user, session).await;
        }
        Handled::Cleared(report)
    }

    async fn move_to(&self, msg: &IncomingText, step_fn: fn(&mut Session) -> Step) -> Handled {
        let Some(mut session) = self.sessions.get(msg.user).await else {
            let mut unrecorded = Vec::new();
            Outbox::new(&*self.messenger, msg.chat, &mut unrecorded)
                .send(prompts::CHOOSE_SYMBOL, main_menu())
                .await;
            return Handled::Moved(Step::AwaitingSymbol);
        };

        let step = step_fn(&mut session);
        let (text, keyboard) = prompts::prompt_for(&session);
        Outbox::new(&*self.messenger, msg.chat, &mut session.bot_messages)
            .send(&text, keyboard)
            .await;
        self.sessions.set(msg.user, session).await;
        Handled::Moved(step)
    }

    async fn compute_points(&self, msg: &IncomingText) -> Handled {
        let mut session = self.sessions.get(msg.user).await;
        let pips = session.as_ref().and_then(|s| s.stop_distance_pips());
        let text = match (pips, session.as_ref().and_then(|s| s.instrument)) {
            (Some(p), Some(instrument)) => prompts::stop_distance(instrument, p),
            _ => prompts::POINTS_MISSING.to_string(),
        };

        let mut unrecorded = Vec::new();
        let sent = match session.as_mut() {
            Some(s) => &mut s.bot_messages,
            None => &mut unrecorded,
        };
        Outbox::new(&*self.messenger, msg.chat, sent)
            .send(&text, main_menu())
            .await;

        if let Some(session) = session {
            self.sessions.set(msg.user, session).await;
        }
        Handled::Points(pips)
    }

    async fn advance(&self, msg: &IncomingText, text: &str) -> Handled {
        let existing = self.sessions.get(msg.user).await;
        let known = existing.is_some();
        let mut session = existing.unwrap_or_default();

        let transition = session.apply(text);
        if transition == Transition::Ignored {
            debug!("No route for {:?} from user {}", text, msg.user);
            if known {
                self.sessions.set(msg.user, session).await;
            }
            return Handled::Advanced(transition);
        }

        let mut outbox = Outbox::new(&*self.messenger, msg.chat, &mut session.bot_messages);
        let mut outcome = None;
        match &transition {
            Transition::SymbolSelected(instrument) => {
                outbox
                    .send(&prompts::symbol_selected(*instrument), buy_sell())
                    .await;
            }
            Transition::DirectionSelected(direction) => {
                outbox
                    .send(&prompts::direction_selected(*direction), Keyboard::Remove)
                    .await;
            }
            Transition::EntryAccepted(_) => {
                outbox.send(prompts::ENTER_STOP_LOSS, Keyboard::Remove).await;
            }
            Transition::Rejected(step) => {
                let (text, keyboard) = prompts::rejection(*step);
                outbox.send(text, keyboard).await;
            }
            Transition::Completed(request) => {
                outcome = Some(self.generator.run(*request, &mut outbox, main_menu()).await);
            }
            Transition::Ignored => {}
        }

        self.sessions.set(msg.user, session).await;
        match outcome {
            Some(outcome) => Handled::Generated(outcome),
            None => Handled::Advanced(transition),
        }
    }
}
