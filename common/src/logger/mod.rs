pub mod init;
pub mod macros;
pub mod trace_id;

pub use init::init_logger;
pub use macros::{auth_span, navigation_span};
pub use trace_id::TraceId;
