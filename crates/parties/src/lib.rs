//! Parties domain module (customers and their commercial hierarchy).
//!
//! This crate contains the party entities used by deposit ownership rules,
//! implemented purely as deterministic domain logic (no IO, no HTTP, no
//! storage).

pub mod party;

pub use party::{Party, PartyDirectory, PartyId};
