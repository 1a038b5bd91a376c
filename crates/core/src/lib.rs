//! # Ward Core
//!
//! Core business logic for the ward clinical record and billing console:
//! role-gated action dispatch over in-memory account, patient, and billing
//! state.
//!
//! The interactive shell lives in `ward-cli`. This crate consumes validated
//! primitive values and returns result/error outcomes; it never reads from
//! or formats to a terminal.
//!
//! Everything is single-session and synchronous: one interactive actor at a
//! time, no persistence, no suspension. Cross-entity invariants (last-admin
//! protection, unique id assignment, bill status derivation) rely on that;
//! serving concurrent sessions would require putting the stores behind a
//! single writer lock or a serialised command queue.

pub mod access;
pub mod billing;
pub mod config;
pub mod directory;
pub mod error;
pub mod patient;
pub mod registry;
pub mod session;

pub use access::{is_permitted, permitted_actions, Action, Role};
pub use billing::{Bill, BillStatus, BillSummary, Charge, Payment};
pub use config::CoreConfig;
pub use directory::{Account, AccountBrief, AccountDirectory, AccountId};
pub use error::{WardError, WardResult};
pub use patient::{PatientBasic, PatientBrief, PatientId, PatientRecord, PatientSnapshot};
pub use registry::PatientRegistry;
pub use session::SessionService;
