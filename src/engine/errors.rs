use thiserror::Error;

/// Errors that abort a patch pass.
///
/// The only fatal condition is a missing required table: the engine refuses
/// to run against a partially loaded database. Everything else (absent
/// sub-fields, empty collections) is treated as "this record does not
/// participate in this rule" and skipped silently.
#[derive(Debug, Error)]
pub enum PatchError {
    /// One of the three required top-level tables is absent.
    #[error("required database table missing: {0}")]
    MissingTable(&'static str),
}
