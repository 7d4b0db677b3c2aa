//! Import flow against an EC2-compatible emulator. Ignored by default;
//! point `CUMULUS_TEST_ENDPOINT` at a running emulator with no keypairs and
//! run with `cargo test -- --ignored`.

use std::io::Write;

use aws_sdk_ec2::Client;
use cumulus_keypair::{DEFAULT_KEY_NAME, KeypairConfig, KeypairImporter};

async fn emulator_client() -> Client {
    let endpoint = std::env::var("CUMULUS_TEST_ENDPOINT")
        .unwrap_or_else(|_| "http://localhost:5000".to_string());

    let config = aws_config::defaults(aws_config::BehaviorVersion::latest())
        .region(aws_config::Region::new("us-east-1"))
        .endpoint_url(endpoint)
        .credentials_provider(aws_sdk_ec2::config::Credentials::new(
            "testing", "testing", None, None, "emulator",
        ))
        .load()
        .await;

    Client::new(&config)
}

#[tokio::test]
#[ignore = "requires an EC2 emulator with no existing keypairs"]
async fn ensure_present_imports_once() {
    let mut key_file = tempfile::NamedTempFile::new().unwrap();
    key_file
        .write_all(b"ssh-rsa AAAAB3NzaC1yc2EAAAADAQABAAABAQC3 ops@cumulus")
        .unwrap();

    let importer = KeypairImporter::new(
        emulator_client().await,
        KeypairConfig::new(DEFAULT_KEY_NAME, key_file.path()),
    );

    // Empty account: first call imports, snapshot includes the new key.
    let after_first = importer.ensure_present().await.unwrap();
    assert_eq!(after_first.len(), 1);
    assert_eq!(after_first[0].key_name(), Some(DEFAULT_KEY_NAME));

    // Non-empty account: second call must skip the import (importing the
    // same name twice would be a remote error).
    let after_second = importer.ensure_present().await.unwrap();
    assert_eq!(after_second.len(), 1);
}
