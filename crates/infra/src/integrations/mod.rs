//! External service integrations

pub mod business_messages;
pub mod calendar;
pub mod oauth;

pub use business_messages::{
    AccessTokenSource, BusinessMessagesGateway, ServiceAccountTokenSource, StaticTokenSource,
};
pub use calendar::GoogleCalendarProvider;
pub use oauth::GoogleTokenClient;
