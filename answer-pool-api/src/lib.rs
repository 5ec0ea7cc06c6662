use rusqlite::Connection;
use std::sync::{Arc, Mutex};

pub mod allocation;
pub mod config;
pub mod handlers;
pub mod helpers;
pub mod storage;

pub type DbConnection = Arc<Mutex<Connection>>;
