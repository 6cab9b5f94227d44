pub mod notification_service;
pub mod quote_service;
