/// Builtin recipe catalog seeded into every session
pub mod catalog;

/// Freshness classification from expiry dates
pub mod expiry;

/// Inventory search and category filtering
pub mod filter;

/// Tag derivation and storage-location classification
pub mod tags;
