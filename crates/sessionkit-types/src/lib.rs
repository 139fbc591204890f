//! Shared data model for the sessionkit workspace.

pub mod error;
pub mod provider;
pub mod session;

pub use error::{AuthError, AuthErrorKind, AuthResult};
pub use provider::{Provider, ProviderType};
pub use session::{SessionStatus, SignInOptions, SignInResult, SignOutOptions};
