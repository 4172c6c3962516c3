/// Main configuration module.
/// 
/// Re-exports submodules for server and match configuration.
pub mod server;
pub mod game;
