//! Shared SDK configuration for all remote clients.

use aws_config::{BehaviorVersion, Region, SdkConfig};

/// Build an `SdkConfig` from a region, optional profile, and optional
/// endpoint override.
///
/// With an endpoint override (moto, localstack) placeholder credentials are
/// installed so the default credential chain is never consulted; emulators
/// accept any static keys.
pub async fn build_sdk_config(
    region: &str,
    profile: Option<&str>,
    endpoint_url: Option<&str>,
) -> SdkConfig {
    let mut builder = aws_config::defaults(BehaviorVersion::latest())
        .region(Region::new(region.to_string()));

    if let Some(profile) = profile {
        builder = builder.profile_name(profile);
    }

    if let Some(endpoint) = endpoint_url {
        builder = builder.endpoint_url(endpoint).credentials_provider(
            aws_sdk_cloudformation::config::Credentials::new(
                "testing",
                "testing",
                None,
                None,
                "endpoint-override",
            ),
        );
    }

    builder.load().await
}
