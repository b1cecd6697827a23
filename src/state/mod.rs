//! State Management
//!
//! Global application state shared by every page.

pub mod global;
pub mod toasts;

pub use global::{provide_global_state, GlobalState};
pub use toasts::{ToastEntry, ToastKind, ToastQueue, ERROR_TOAST_MS, SUCCESS_TOAST_MS};
