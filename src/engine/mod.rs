pub mod executor;
pub mod quoter;
pub mod solver;

pub use executor::{DepositOutcome, DepositRequest, Executor, PositionManager, SwapVenue};
pub use quoter::{quote_exact_input, quote_exact_input_with_limit, Quote};
pub use solver::{plan, LpSwapParams, LpSwapQuote};
