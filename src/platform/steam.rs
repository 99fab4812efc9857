//! steamlocate fallbacks for the path resolver

mod locate;

pub use locate::{locate_client_root, locate_game_root};
