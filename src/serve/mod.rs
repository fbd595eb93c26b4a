// src/serve/mod.rs

//! Local preview: a static file server rooted at the source directory, plus
//! the reload notification channel connected browser clients long-poll.

pub mod reload;
pub mod server;

pub use reload::ReloadHub;
pub use server::{ServerHandle, spawn_server};
