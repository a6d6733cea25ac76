//! Retrieval and normalization of mailbox messages

pub mod error;
pub mod normalize;
pub mod pipeline;

pub use error::{ErrorKind, MailError};
pub use normalize::{NormalizedEmail, normalize};
pub use pipeline::EmailRetrieval;
