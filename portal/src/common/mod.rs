//! 共通型定義
//!
//! エラー型など、ポータル全体で共有する定義

pub mod error;
