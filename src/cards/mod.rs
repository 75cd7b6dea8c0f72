//! God cards and how they are dealt.
//!
//! - `god`: the `GodCard` variants and their activation predicates
//! - `deal`: the per-session assignment policy

pub mod god;
pub mod deal;

pub use god::GodCard;
pub use deal::CardDeal;
