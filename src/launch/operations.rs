//! Operations module (atomic side effects)

pub mod spawn;

pub use spawn::{ProcessSpawner, ShellSpawner};

#[cfg(test)]
pub(crate) use spawn::testing;
