//! Launch validation functions (no side effects)

use std::io;

use crate::launch::types::LaunchTarget;

/// Check what can be checked before spawning.
///
/// A shell reports a missing program only after it has started, so a direct
/// executable is verified up front.
pub fn validate_target(target: &LaunchTarget) -> io::Result<()> {
    match target {
        LaunchTarget::Direct { executable } => {
            if !executable.is_file() {
                return Err(io::Error::new(
                    io::ErrorKind::NotFound,
                    format!("game executable not found at {}", executable.display()),
                ));
            }
        }
        LaunchTarget::ViaClient { client, .. } => {
            if client.trim().is_empty() {
                return Err(io::Error::new(io::ErrorKind::InvalidInput, "no client program"));
            }
        }
    }
    Ok(())
}
