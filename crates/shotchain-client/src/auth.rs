//! Opaque credential provider boundary.
//!
//! Token acquisition (cloud identity, refresh, caching) lives outside this
//! system; the client only asks for the current bearer token per request so
//! long-running pipelines keep working across token rotations.

/// Supplies the bearer token attached to each service request.
pub trait TokenProvider: Send + Sync {
    /// Current bearer token, fetched fresh for every call.
    fn token(&self) -> String;
}

/// Fixed-token provider for API-key style deployments and tests.
#[derive(Debug, Clone)]
pub struct StaticToken(String);

impl StaticToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Read the token from an environment variable.
    pub fn from_env(var: &str) -> Option<Self> {
        std::env::var(var).ok().map(Self::new)
    }
}

impl TokenProvider for StaticToken {
    fn token(&self) -> String {
        self.0.clone()
    }
}

impl<F> TokenProvider for F
where
    F: Fn() -> String + Send + Sync,
{
    fn token(&self) -> String {
        self()
    }
}
