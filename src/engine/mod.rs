//! Engines that derive the canonical post-state of each action
//!
//! Every function here takes the pre-state by reference and returns fresh
//! values; nothing mutates its input.

pub mod liquidity;
pub mod min_reserve;
pub mod swap;

pub use liquidity::{add_liquidity, create_pool, remove_liquidity, Deposit, Withdrawal};
pub use min_reserve::{calculate_min_reserve, check_min_reserve, min_reserve_for};
pub use swap::{required_input, swap, swap_exact_in, SwapResult};
