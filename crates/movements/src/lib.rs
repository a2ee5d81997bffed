//! Stock movement records (entries and exits).
//!
//! Movements form an append-mostly ledger: rows are inserted or deleted,
//! never edited. Deleting a movement is a retroactive correction, not an
//! amendment. Stock is always derived from this ledger, never stored.

pub mod entry;
pub mod exit;

pub use entry::Entry;
pub use exit::Exit;
