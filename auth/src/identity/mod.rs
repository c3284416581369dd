pub mod errors;
pub mod resolver;

pub use errors::IdentityError;
pub use resolver::IdentityResolver;
pub use resolver::SubjectLookup;
