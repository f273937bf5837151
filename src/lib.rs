//! Taproot：终端里的待办清单，数据存放在远端 REST 后端。

pub mod api;
pub mod config;
pub mod models;
pub mod ui;
