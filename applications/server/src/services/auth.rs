/// Producer credential checks
///
/// A station is configured with at most one shared secret. With no secret
/// configured the policy is OPEN: every command is authorized. Operators who
/// expose a station publicly must set `auth.credential`.
#[derive(Debug, Clone, Default)]
pub struct AccessPolicy {
    secret: Option<String>,
}

impl AccessPolicy {
    /// Policy requiring `secret`; a blank secret yields an open policy
    pub fn new(secret: Option<&str>) -> Self {
        let secret = secret
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from);
        Self { secret }
    }

    /// Policy that authorizes everything
    pub fn open() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.secret.is_none()
    }

    /// Check a presented credential
    pub fn permits(&self, credential: Option<&str>) -> bool {
        match &self.secret {
            None => true,
            Some(secret) => credential.is_some_and(|c| c == secret),
        }
    }
}
