pub mod config;
pub mod consts;
pub mod notify;
pub mod svg;
pub mod weekly_stats;
