/// Failures inside the SQLite layer.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("sqlite: {message}")]
    SqliteError { message: String },

    #[error("migration v{version:03} failed: {reason}")]
    MigrationFailed { version: u32, reason: String },

    /// A stored row could not be decoded back into its model.
    #[error("corrupt row in {table}: {reason}")]
    CorruptRow { table: String, reason: String },

    /// A connection mutex was poisoned by a panicking holder.
    #[error("{role} connection poisoned")]
    PoolPoisoned { role: String },
}
