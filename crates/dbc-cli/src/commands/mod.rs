// Command modules for dbc CLI

pub mod account;
pub mod curve;
pub mod layout;
pub mod utils;
