pub mod account;
pub mod quest;

pub use account::PostgresAccountRepository;
pub use quest::PostgresQuestRepository;
