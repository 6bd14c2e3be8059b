//! Testing utilities and harness for gesture responders

pub mod callback_log;
pub mod robot;

pub use callback_log::{CallbackLog, CallbackRecord, Hook};
pub use robot::*;

pub mod prelude {
    pub use crate::callback_log::{CallbackLog, Hook};
    pub use crate::robot::*;
    pub use responder_core::prelude::*;
}
