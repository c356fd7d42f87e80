pub mod error;
pub mod handle;

pub use error::{DbError, DbResult};
pub use handle::{ConnectionHandle, HandleStatus};
