//! Event dispatch for frames received from the host

mod dispatcher;

pub use dispatcher::{Action, Dispatch, Dispatcher};
