use crate::domain::session::driven_ports::CredentialStore;
use reqwest_middleware::ClientWithMiddleware;

/// The session context handed to every driven port. Owns the clients used to reach external
/// systems so the domain stays agnostic of how requests are made or where the credential lives.
pub trait ExternalConnectivity {
    /// HTTP client used for every API call
    fn http_client(&self) -> &ClientWithMiddleware;
    /// Joins an endpoint path such as "/tasks/create" onto the configured API base URL
    fn endpoint_url(&self, path: &str) -> String;
    /// Where the bearer credential for this session is kept
    fn credentials(&self) -> &dyn CredentialStore;
}

#[cfg(test)]
pub mod test_util {
    use super::*;
    use crate::domain::session::Credential;
    use anyhow::anyhow;
    use std::sync::RwLock;

    /// Credential store that lives only as long as the test does
    pub struct InMemoryCredentialStore {
        pub credential: RwLock<Option<Credential>>,
        pub broken: bool,
    }

    impl InMemoryCredentialStore {
        pub fn new() -> Self {
            InMemoryCredentialStore {
                credential: RwLock::new(None),
                broken: false,
            }
        }

        pub fn holding(token: &str) -> Self {
            InMemoryCredentialStore {
                credential: RwLock::new(Some(Credential::new(token))),
                broken: false,
            }
        }

        fn blow_up_if_broken(&self) -> Result<(), anyhow::Error> {
            if self.broken {
                Err(anyhow!("credential storage is unavailable"))
            } else {
                Ok(())
            }
        }
    }

    impl CredentialStore for InMemoryCredentialStore {
        fn get(&self) -> Result<Option<Credential>, anyhow::Error> {
            self.blow_up_if_broken()?;
            Ok(self
                .credential
                .read()
                .expect("credential rw lock poisoned")
                .clone())
        }

        fn set(&self, credential: &Credential) -> Result<(), anyhow::Error> {
            self.blow_up_if_broken()?;
            *self.credential.write().expect("credential rw lock poisoned") = Some(credential.clone());
            Ok(())
        }

        fn clear(&self) -> Result<(), anyhow::Error> {
            self.blow_up_if_broken()?;
            *self.credential.write().expect("credential rw lock poisoned") = None;
            Ok(())
        }
    }

    /// Connectivity for tests that exercise the domain against fake ports. The HTTP client is
    /// real but never used by those fakes.
    pub struct FakeExternalConnectivity {
        http_client: ClientWithMiddleware,
        pub credentials: InMemoryCredentialStore,
    }

    impl FakeExternalConnectivity {
        pub fn new() -> Self {
            FakeExternalConnectivity {
                http_client: ClientWithMiddleware::from(reqwest::Client::new()),
                credentials: InMemoryCredentialStore::new(),
            }
        }

        pub fn signed_in(token: &str) -> Self {
            FakeExternalConnectivity {
                http_client: ClientWithMiddleware::from(reqwest::Client::new()),
                credentials: InMemoryCredentialStore::holding(token),
            }
        }
    }

    impl ExternalConnectivity for FakeExternalConnectivity {
        fn http_client(&self) -> &ClientWithMiddleware {
            &self.http_client
        }

        fn endpoint_url(&self, path: &str) -> String {
            format!("http://localhost:8000{path}")
        }

        fn credentials(&self) -> &dyn CredentialStore {
            &self.credentials
        }
    }
}
