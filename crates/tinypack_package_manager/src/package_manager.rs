use std::path::Path;
use std::path::PathBuf;
use std::sync::Arc;

use mockall::automock;
use serde::Deserialize;

/// PackageManager abstraction instance
pub type PackageManagerRef = Arc<dyn PackageManager + Send + Sync>;

#[derive(Debug, Deserialize)]
pub struct Resolution {
  pub resolved: PathBuf,
}

/// Resolves package specifiers to absolute module paths on behalf of plugins
///
/// Config items are compared by resolved path during merging, so every
/// specifier a plugin references goes through this seam first.
#[allow(clippy::disallowed_methods, clippy::disallowed_types)]
#[automock]
pub trait PackageManager {
  fn resolve(&self, specifier: &str, from: &Path) -> anyhow::Result<Resolution>;
}
