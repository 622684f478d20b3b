use error_stack::{Report, ResultExt};
use kernel::KernelError;

pub mod database;
pub(crate) mod error;

pub(crate) fn env(key: &str) -> Result<String, Report<KernelError>> {
    dotenvy::var(key)
        .change_context_lazy(|| KernelError::Internal)
        .attach_printable_lazy(|| format!("Env {} not specified", key))
}
