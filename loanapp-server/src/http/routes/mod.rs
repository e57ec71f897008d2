//! Route handlers organized by resource

pub mod accounts;
pub mod health;
pub mod pages;
pub mod reports;
