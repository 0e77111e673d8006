//! # mostrador-session: Item Editor Flow for Mostrador
//!
//! The composition root over [`mostrador_core`]: an explicit state machine
//! that drives the interactive line-item editing flow and the commit
//! hand-off.
//!
//! ## Editing Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Item Editor Session                                 │
//! │                                                                         │
//! │  snapshot arrives ──► filter prices ──► auto-select price + lot        │
//! │                                                                         │
//! │  cashier types qty ──► set_quantity() ──► re-resolve price tier        │
//! │  cashier picks price ─► select_price() ─► freeze unit price            │
//! │  cashier types price ─► set_manual_price() ─► clears selection         │
//! │  cashier picks lot ───► select_lot() ───► re-default stock row         │
//! │                                                                         │
//! │  "Agregar" ──► commit_line() ──► allocate() ──► OrderCommitter         │
//! │                                     │                 │                 │
//! │                                     │                 └── StaleStock?   │
//! │                                     └── FIFO split / oversell           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Unlike the reactive UI it serves, the session recomputes **only** when a
//! message arrives (quantity change, price selection, snapshot refresh) —
//! no hidden global cart state, no ambient re-evaluation. Re-supplying a
//! fresh snapshot via [`editor::ItemEditorSession::replace_snapshot`] is
//! how eventual consistency with other terminals is achieved.

pub mod commit;
pub mod editor;
pub mod error;
pub mod filter;

pub use commit::{CommitReceipt, OrderCommitter};
pub use editor::{ItemEditorConfig, ItemEditorSession};
pub use error::{CommitError, SessionError};
pub use filter::filter_candidate_prices;
