use crate::domain::session::Credential;
use crate::domain::session::driven_ports::CredentialStore;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;

/// On-disk shape of the credential file
#[derive(Serialize, Deserialize, Debug, Default)]
struct StoredCredential {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    access_token: Option<String>,
}

/// Keeps the session credential in a small JSON file so it survives between invocations
pub struct FileCredentialStore {
    path: PathBuf,
}

impl FileCredentialStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileCredentialStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CredentialStore for FileCredentialStore {
    fn get(&self) -> Result<Option<Credential>, anyhow::Error> {
        let raw = match fs::read(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(err) => {
                return Err(err)
                    .with_context(|| format!("reading credential file {}", self.path.display()));
            }
        };
        let stored: StoredCredential = serde_json::from_slice(&raw)
            .with_context(|| format!("parsing credential file {}", self.path.display()))?;

        Ok(stored
            .access_token
            .filter(|token| !token.is_empty())
            .map(Credential::new))
    }

    fn set(&self, credential: &Credential) -> Result<(), anyhow::Error> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating credential directory {}", parent.display()))?;
        }
        let stored = StoredCredential {
            access_token: Some(credential.as_str().to_owned()),
        };
        let serialized = serde_json::to_vec(&stored).context("serializing credential")?;
        fs::write(&self.path, serialized)
            .with_context(|| format!("writing credential file {}", self.path.display()))?;
        debug!("Credential written to {}", self.path.display());

        Ok(())
    }

    fn clear(&self) -> Result<(), anyhow::Error> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err)
                .with_context(|| format!("removing credential file {}", self.path.display())),
        }
    }
}
