mod diagnostic;
mod error_kind;

pub use self::diagnostic::*;
pub use self::error_kind::*;

/// Error type surfaced to the host, usually wrapping a [`Diagnostic`].
pub type DiagnosticError = anyhow::Error;

/// Builds a [`DiagnosticError`] from a format string or a partially applied
/// [`DiagnosticBuilder`], stamping the calling module as the origin.
#[macro_export]
macro_rules! diagnostic_error {
  ($fmt:literal $(, $arg:expr)* $(,)?) => {
    $crate::diagnostic_error!(
      $crate::types::DiagnosticBuilder::default().message(format!($fmt $(, $arg)*))
    )
  };
  ($builder:expr) => {
    $crate::types::DiagnosticError::from(
      $builder
        .origin(Some(module_path!().to_string()))
        .build()
        .expect("invalid diagnostic"),
    )
  };
}
