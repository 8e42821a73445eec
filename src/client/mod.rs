//! The client side of the tracker as a library: a typed HTTP client plus the
//! view and form state machines the single-page UI is built from.

pub mod api;
pub mod forms;
pub mod inventory;
pub mod session;
