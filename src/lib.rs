//! photo-predict: 画像予測サービスのCLIクライアント

pub mod cli;
pub mod config;
pub mod error;
pub mod loader;
pub mod runner;
pub mod terminal;
pub mod transport;
