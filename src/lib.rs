pub mod api;
pub mod cli;
pub mod core;
pub mod google;
pub mod mail;
