pub mod collect_cmd;
pub mod show_cmd;
