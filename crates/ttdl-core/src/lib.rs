pub mod config;
pub mod error;
pub mod logging;
pub mod status;

pub mod api;
pub mod filename;
pub mod sink;
pub mod transport;

// Widgets
pub mod audio;
pub mod debounce;
pub mod dispatch;
pub mod mail;
pub mod preview;
pub mod stories;
pub mod watcher;

#[cfg(test)]
mod test_support;
