pub mod kv;
pub mod manager;
pub mod migration;
