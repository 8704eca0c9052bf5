//! Calendar provider adapters

pub mod google;

pub use google::GoogleCalendarProvider;
