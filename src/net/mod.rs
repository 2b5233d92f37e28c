pub mod client;
pub mod credentials;
pub mod graphql;
pub mod transport;

pub use client::ContributionClient;
pub use credentials::{CredentialProvider, TokenPrompt, TokenStore};
pub use transport::{HttpResponse, Transport};
