pub mod setup;
pub mod take_profit;

pub use setup::{GeneratedSetup, SetupGenerator, SetupOutcome, SetupRequest};
pub use take_profit::{TakeProfitPlan, TpLevel};
