// =============================================================================
// Instructions Module
// =============================================================================

pub mod deposit_base;
pub mod deposit_yield;
pub mod initialize;
pub mod withdraw_base;
pub mod withdraw_yield;

pub use deposit_base::*;
pub use deposit_yield::*;
pub use initialize::*;
pub use withdraw_base::*;
pub use withdraw_yield::*;
