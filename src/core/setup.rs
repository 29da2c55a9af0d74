use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{error, info};

use crate::core::take_profit::TakeProfitPlan;
use crate::error::StorageError;
use crate::messaging::{Keyboard, Outbox};
use crate::models::{Direction, Instrument, InstrumentProfile};
use crate::storage::{SetupRow, SetupStorage, ROW_TP_SLOTS};

pub const DISCLAIMER: &str = "*Disclaimer*: this is not financial advice.";

/// The four user inputs a setup is built from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SetupRequest {
    pub instrument: Instrument,
    pub direction: Direction,
    pub entry_price: f64,
    pub stop_loss: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedSetup {
    pub request: SetupRequest,
    pub plan: TakeProfitPlan,
}

#[derive(Debug)]
pub struct SetupOutcome {
    pub setup: GeneratedSetup,
    pub report_sent: bool,
    pub saved: Result<(), StorageError>,
}

impl GeneratedSetup {
    pub fn profile(&self) -> InstrumentProfile {
        self.request.instrument.profile()
    }

    pub fn report(&self) -> String {
        let req = &self.request;
        let profile = self.profile();
        let price = |p: f64| profile.format_price(p);

        let mut out = format!("*Setup {} {}*\n", req.instrument, req.direction);
        out += &format!("Entry: `{}`\n", price(req.entry_price));
        out += &format!("Stop Loss: `{}` (High Risk)\n\n", price(req.stop_loss));

        for (i, lvl) in self.plan.levels.iter().enumerate() {
            out += &format!("TP{}: `{}` — pips: `{}`\n", i + 1, price(lvl.price), lvl.pips);
        }
        out += &format!(
            "Swing TP: `{}` — pips: `{}`\n\n",
            price(self.plan.swing.price),
            self.plan.swing.pips
        );
        out += DISCLAIMER;
        out
    }

    pub fn row(&self) -> SetupRow {
        let profile = self.profile();
        SetupRow {
            instrument: self.request.instrument.to_string(),
            direction: self.request.direction.to_string(),
            entry_price: self.request.entry_price,
            stop_loss: self.request.stop_loss,
            tp_prices: self
                .plan
                .levels
                .iter()
                .take(ROW_TP_SLOTS)
                .map(|l| profile.round_price(l.price))
                .collect(),
            swing_price: profile.round_price(self.plan.swing.price),
        }
    }
}

/// Turns a finished [`SetupRequest`] into a TP ladder, a report and a stored row.
pub struct SetupGenerator {
    storage: Arc<dyn SetupStorage>,
    rng: Mutex<StdRng>,
}

impl SetupGenerator {
    pub fn new(storage: Arc<dyn SetupStorage>) -> Self {
        Self {
            storage,
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    pub fn with_seed(storage: Arc<dyn SetupStorage>, seed: u64) -> Self {
        Self {
            storage,
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    pub async fn generate(&self, request: SetupRequest) -> GeneratedSetup {
        let mut rng = self.rng.lock().await;
        let plan = TakeProfitPlan::generate(
            request.instrument,
            request.direction,
            request.entry_price,
            &mut *rng,
        );
        GeneratedSetup { request, plan }
    }

    /// Report first, then one save attempt. A failed save is shown to the
    /// user but the setup is not withdrawn.
    pub async fn run(
        &self,
        request: SetupRequest,
        outbox: &mut Outbox<'_>,
        menu: Keyboard,
    ) -> SetupOutcome {
        let setup = self.generate(request).await;
        info!(
            "Generated {} {} setup: entry {} tps {:?} swing {}",
            request.instrument,
            request.direction,
            request.entry_price,
            setup.plan.offsets(),
            setup.plan.swing.pips
        );

        let report_sent = outbox.send(&setup.report(), menu.clone()).await.is_some();

        let saved = self.storage.append_row(&setup.row()).await;
        match &saved {
            Ok(()) => {
                let text = match self.storage.location_url() {
                    Some(url) => format!("*Setup saved!*\n[Open spreadsheet]({})", url),
                    None => "*Setup saved!*".to_string(),
                };
                outbox.send(&text, Keyboard::Remove).await;
            }
            Err(e) => {
                error!("Failed to save setup: {}", e);
                outbox
                    .send(&format!("*Failed to save setup:* `{}`", e), menu)
                    .await;
            }
        }

        SetupOutcome {
            setup,
            report_sent,
            saved,
        }
    }
}
