//! Keypair listing and import.

use std::path::PathBuf;

use aws_sdk_ec2::Client;
use aws_sdk_ec2::operation::import_key_pair::ImportKeyPairOutput;
use aws_sdk_ec2::primitives::Blob;
use aws_sdk_ec2::types::KeyPairInfo;

use crate::error::KeypairError;

/// Logical name the default public key is imported under.
pub const DEFAULT_KEY_NAME: &str = "DefaultKeypair";

/// Explicit importer configuration. The public key location is resolved by
/// the caller (typically from the `DEFAULT_KEYPAIR` environment variable)
/// and passed in here, never read from the environment internally.
#[derive(Debug, Clone)]
pub struct KeypairConfig {
    key_name: String,
    public_key_path: PathBuf,
}

impl KeypairConfig {
    pub fn new(key_name: impl Into<String>, public_key_path: impl Into<PathBuf>) -> Self {
        Self {
            key_name: key_name.into(),
            public_key_path: public_key_path.into(),
        }
    }

    pub fn key_name(&self) -> &str {
        &self.key_name
    }

    pub fn public_key_path(&self) -> &std::path::Path {
        &self.public_key_path
    }

    /// Read the public key bytes. An unset location is an empty path, which
    /// fails here at read time.
    pub fn public_key_material(&self) -> Result<Vec<u8>, KeypairError> {
        std::fs::read(&self.public_key_path).map_err(|source| {
            tracing::error!(
                path = %self.public_key_path.display(),
                error = %source,
                "failed to read public key file"
            );
            KeypairError::Read {
                path: self.public_key_path.clone(),
                source,
            }
        })
    }
}

pub struct KeypairImporter {
    client: Client,
    config: KeypairConfig,
}

impl KeypairImporter {
    pub fn new(client: Client, config: KeypairConfig) -> Self {
        Self { client, config }
    }

    pub fn config(&self) -> &KeypairConfig {
        &self.config
    }

    /// List all keypairs in the region.
    pub async fn list(&self) -> Result<Vec<KeyPairInfo>, KeypairError> {
        let resp = self
            .client
            .describe_key_pairs()
            .send()
            .await
            .map_err(|e| KeypairError::aws(&e))?;

        Ok(resp.key_pairs().to_vec())
    }

    /// Import the configured public key under the configured logical name.
    pub async fn import(&self) -> Result<ImportKeyPairOutput, KeypairError> {
        let material = self.config.public_key_material()?;

        let out = self
            .client
            .import_key_pair()
            .key_name(&self.config.key_name)
            .public_key_material(Blob::new(material))
            .send()
            .await
            .map_err(|e| KeypairError::aws(&e))?;

        tracing::info!(
            key_name = %self.config.key_name,
            fingerprint = out.key_fingerprint().unwrap_or_default(),
            "public key imported"
        );
        Ok(out)
    }

    /// List; import the default public key if no keypairs exist; re-list so
    /// the just-imported entry is included in the returned snapshot.
    pub async fn ensure_present(&self) -> Result<Vec<KeyPairInfo>, KeypairError> {
        let existing = self.list().await?;

        if existing.is_empty() {
            tracing::info!(
                key_name = %self.config.key_name,
                path = %self.config.public_key_path.display(),
                "no keypairs found, importing default public key"
            );
            self.import().await?;
        } else {
            tracing::debug!(count = existing.len(), "keypairs already present, skipping import");
        }

        self.list().await
    }
}

/// One "name: fingerprint" line per keypair, for printing.
pub fn describe_lines(keypairs: &[KeyPairInfo]) -> Vec<String> {
    keypairs
        .iter()
        .map(|pair| {
            format!(
                "{}: {}",
                pair.key_name().unwrap_or("<unnamed>"),
                pair.key_fingerprint().unwrap_or("<no fingerprint>")
            )
        })
        .collect()
}
