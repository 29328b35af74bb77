pub mod calendar;
pub mod catalog;
pub mod server;
