// ── Bot Panel Atoms Layer ──────────────────────────────────────────────────
// Constants, error types, wire types, and the transport trait.
// Dependency rule: atoms may only depend on std and external crates.
// Nothing here may import from engine/.

pub mod constants;
pub mod error;
pub mod traits;
pub mod types;
