// =============================================================================
// Lending Market Adapter
// =============================================================================
// Boundary to the external lending market: unit conversions against its
// liquidity index, a read-only view of its reserve account, and the two
// custody CPIs. Holds no state of its own; the ledger is the sole record
// of per-staker entitlement.
// =============================================================================

pub mod cpi;
pub mod math;
pub mod reserve;

pub use math::*;
pub use reserve::*;
