//! Client-side session/authentication coordinator.
//!
//! Signs users in/out against a remote authentication service, tracks the
//! current session's validity in a shared store, and protects mutating
//! requests with freshly fetched CSRF tokens. The remote service itself,
//! token storage, and rendering are out of scope.

pub mod client;
pub mod config;
pub mod context;
pub mod store;
pub mod transport;

pub use client::{
    AuthClient, GetSessionOptions, SignInOutcome, SignOutOutcome, UnauthenticatedHandler,
};
pub use config::AuthConfig;
pub use context::{AmbientContext, MemoryNavigator, Navigator, StaticContext};
pub use sessionkit_types::{
    AuthError, AuthErrorKind, AuthResult, Provider, ProviderType, SessionStatus, SignInOptions,
    SignInResult, SignOutOptions,
};
pub use store::{SessionSnapshot, SessionStore};
pub use transport::{CallOutcome, Transport};
