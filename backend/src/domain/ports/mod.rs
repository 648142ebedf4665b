//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod config_repository;
mod credential_source;
mod directory_source;
mod identity_provider;
mod person_cache;
mod person_lookup;
mod person_repository;
mod session_provider;

#[cfg(test)]
pub use config_repository::MockConfigRepository;
pub use config_repository::{ConfigRepository, ConfigRepositoryError};
#[cfg(test)]
pub use credential_source::MockCredentialSource;
pub use credential_source::{CredentialError, CredentialSource};
#[cfg(test)]
pub use directory_source::MockDirectorySource;
pub use directory_source::{DirectorySource, DirectorySourceError};
#[cfg(test)]
pub use identity_provider::MockIdentityProvider;
pub use identity_provider::{IdentityProvider, IdentityProviderError};
#[cfg(test)]
pub use person_cache::MockPersonCache;
pub use person_cache::{PersonCache, PersonCacheError};
#[cfg(test)]
pub use person_lookup::MockPersonLookup;
pub use person_lookup::PersonLookup;
#[cfg(test)]
pub use person_repository::MockPersonRepository;
pub use person_repository::{FixturePersonRepository, PersonRepository, PersonRepositoryError};
#[cfg(test)]
pub use session_provider::MockSessionProvider;
pub use session_provider::{SessionProvider, SessionRefreshError};
