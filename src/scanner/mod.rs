pub mod page_utils;
pub mod profile;
pub mod session;
pub mod workflow;
