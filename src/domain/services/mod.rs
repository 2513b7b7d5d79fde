pub mod announcement;
pub mod catalog;
pub mod conference_service;
pub mod dispatch;
pub mod featured_speaker;
pub mod filters;
pub mod profile_service;
pub mod query_builder;
pub mod registration;
pub mod wishlist;
