pub mod common;
pub mod member;
