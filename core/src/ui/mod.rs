//! Local UI state holders: table pagination, modal visibility, and form
//! model with validation. None of them perform I/O; callers hand in the
//! fetch or submit step.

pub mod form;
pub mod modal;
pub mod table;

pub use form::{FormState, Rule, Violation};
pub use modal::ModalState;
pub use table::{TableState, DEFAULT_PAGE_SIZES};
