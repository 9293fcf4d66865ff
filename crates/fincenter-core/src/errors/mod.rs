mod fincenter_error;
mod storage_error;

pub use fincenter_error::{FincenterError, FincenterResult};
pub use storage_error::StorageError;
