//! External collaborators: the configuration validator and the daemon
//! reload mechanism, both invoked as subprocesses with a bounded timeout.

pub mod reload;
pub mod validator;

pub use reload::Reloader;
pub use validator::{Validation, Validator};
