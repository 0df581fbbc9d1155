pub mod access_review;
pub mod actions;
pub mod args;
pub mod ctx;
pub mod error;
pub mod modals;
pub mod requests;
pub mod utils;

#[cfg(test)]
pub(crate) mod testing;
