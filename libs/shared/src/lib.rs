//! # Shared — 横断ユーティリティ層
//!
//! 設定の読み込みとプロセス監視。ドメインロジックは持たない。

pub mod config;
pub mod health;
