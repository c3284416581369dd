pub mod account;
pub mod quest;
