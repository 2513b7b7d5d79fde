pub mod auth;
pub mod conference;
pub mod filter;
pub mod job;
pub mod profile;
pub mod session;
pub mod speaker;
