use std::time::Duration;

use gcp_language_http::{
    LanguageClient, LanguageConfig, LanguageError, RetryOverrides, RetrySettings,
    KEY_AMBIENT_CREDENTIALS, KEY_API_KEY, KEY_CREDENTIALS_FILE, KEY_ENABLED, KEY_ENDPOINT,
    KEY_RETRY_DELAY_MULTIPLIER, KEY_RETRY_INITIAL_DELAY_MS, KEY_RETRY_MAX_ATTEMPTS,
    KEY_SHARED_CREDENTIALS_FILE,
};

const SERVICE_KEY: &str = "tests/fixtures/service-key.json";
const SHARED_KEY: &str = "tests/fixtures/shared-key.json";
const USER_KEY: &str = "tests/fixtures/authorized-user-key.json";

fn client_id(client: &LanguageClient) -> Option<String> {
    client
        .credentials()
        .and_then(|key| key.client_id.clone())
}

#[test]
fn client_is_enabled_by_default() {
    let config = LanguageConfig::from_pairs::<_, &str, &str>([]).expect("must bind");
    assert!(config.enabled);

    let client = LanguageClient::from_config(&config).expect("must build");
    assert!(client.credentials().is_none());
}

#[test]
fn disabled_flag_refuses_construction() {
    let config = LanguageConfig::from_pairs([(KEY_ENABLED, "false")]).expect("must bind");
    let error = LanguageClient::from_config(&config).expect_err("must refuse");
    assert!(matches!(error, LanguageError::Disabled));
}

#[test]
fn explicit_enabled_flag_still_builds() {
    let config = LanguageConfig::from_pairs([(KEY_ENABLED, "true")]).expect("must bind");
    assert!(LanguageClient::from_config(&config).is_ok());
}

#[test]
fn service_credentials_win_over_shared_and_ambient() {
    let config = LanguageConfig::from_pairs([
        (KEY_CREDENTIALS_FILE, SERVICE_KEY),
        (KEY_SHARED_CREDENTIALS_FILE, SHARED_KEY),
        (KEY_AMBIENT_CREDENTIALS, SHARED_KEY),
    ])
    .expect("must bind");

    let client = LanguageClient::from_config(&config).expect("must build");
    assert_eq!(client_id(&client).as_deref(), Some("45678"));
}

#[test]
fn shared_credentials_used_when_no_service_file() {
    let config = LanguageConfig::from_pairs([(KEY_SHARED_CREDENTIALS_FILE, SHARED_KEY)])
        .expect("must bind");

    let client = LanguageClient::from_config(&config).expect("must build");
    assert_eq!(client_id(&client).as_deref(), Some("12345"));
    assert_eq!(
        client.project_id(),
        Some("sample-project"),
        "project id comes from the loaded key"
    );
}

#[test]
fn ambient_credentials_are_the_last_fallback() {
    let config =
        LanguageConfig::from_pairs([(KEY_AMBIENT_CREDENTIALS, SHARED_KEY)]).expect("must bind");

    let client = LanguageClient::from_config(&config).expect("must build");
    assert_eq!(client_id(&client).as_deref(), Some("12345"));
}

#[test]
fn missing_credentials_file_fails_with_io_error() {
    let config = LanguageConfig::from_pairs([(KEY_CREDENTIALS_FILE, "tests/fixtures/absent.json")])
        .expect("must bind");

    let error = LanguageClient::from_config(&config).expect_err("must fail");
    match error {
        LanguageError::CredentialsIo { path, .. } => {
            assert!(path.ends_with("absent.json"));
        }
        other => panic!("expected credentials io error, got {other:?}"),
    }
}

#[test]
fn non_service_account_key_fails_with_format_error() {
    let config =
        LanguageConfig::from_pairs([(KEY_CREDENTIALS_FILE, USER_KEY)]).expect("must bind");

    let error = LanguageClient::from_config(&config).expect_err("must fail");
    match error {
        LanguageError::CredentialsFormat { message, .. } => {
            assert!(message.contains("authorized_user"));
        }
        other => panic!("expected credentials format error, got {other:?}"),
    }
}

#[test]
fn retry_properties_bind_a_partial_record() {
    let config = LanguageConfig::from_pairs([
        (KEY_RETRY_DELAY_MULTIPLIER, "2"),
        (KEY_RETRY_INITIAL_DELAY_MS, "500"),
    ])
    .expect("must bind");

    let client = LanguageClient::from_config(&config).expect("must build");
    let settings = client.retry_settings();

    // Overridden fields take the property values; the rest keep the
    // service policy.
    assert_eq!(settings.retry_delay_multiplier, 2.0);
    assert_eq!(settings.initial_retry_delay, Duration::from_millis(500));
    assert_eq!(settings.max_retry_delay, Duration::from_secs(60));
    assert_eq!(settings.max_attempts, 0);
    assert_eq!(settings.total_timeout, Duration::from_secs(600));
}

#[test]
fn explicit_record_wins_over_properties_field_by_field() {
    let config = LanguageConfig::from_pairs([
        (KEY_RETRY_DELAY_MULTIPLIER, "2"),
        (KEY_RETRY_INITIAL_DELAY_MS, "500"),
    ])
    .expect("must bind");

    let explicit = RetryOverrides {
        initial_retry_delay: Some(Duration::from_millis(100)),
        ..RetryOverrides::default()
    };
    let client = LanguageClient::from_config(&config)
        .expect("must build")
        .with_retry(&explicit);

    let settings = client.retry_settings();
    assert_eq!(settings.initial_retry_delay, Duration::from_millis(100));
    assert_eq!(settings.retry_delay_multiplier, 2.0);
    assert_eq!(settings.max_attempts, 0);
}

#[test]
fn explicit_record_alone_keeps_service_defaults_elsewhere() {
    let explicit = RetryOverrides {
        initial_retry_delay: Some(Duration::from_millis(100)),
        ..RetryOverrides::default()
    };
    let client = LanguageClient::from_config(&LanguageConfig::default())
        .expect("must build")
        .with_retry(&explicit);

    let settings = client.retry_settings();
    assert_eq!(settings.initial_retry_delay, Duration::from_millis(100));
    assert_eq!(settings.retry_delay_multiplier, 1.3);
    assert_eq!(settings.max_retry_delay, Duration::from_secs(60));
    assert_eq!(settings.max_attempts, 0);
}

#[test]
fn no_retry_customization_keeps_the_service_policy() {
    let config = LanguageConfig::from_pairs([(KEY_API_KEY, "some-key")]).expect("must bind");
    assert!(config.retry.is_none());

    let client = LanguageClient::from_config(&config).expect("must build");
    assert_eq!(client.retry_settings(), &RetrySettings::default());
}

#[test]
fn invalid_retry_property_names_the_offending_key() {
    let error = LanguageConfig::from_pairs([(KEY_RETRY_MAX_ATTEMPTS, "many")])
        .expect_err("binding must fail");

    match error {
        LanguageError::Config { key, .. } => assert_eq!(key, KEY_RETRY_MAX_ATTEMPTS),
        other => panic!("expected config error, got {other:?}"),
    }
}

#[test]
fn blank_values_leave_fields_unset() {
    let config = LanguageConfig::from_pairs([
        (KEY_ENABLED, "  "),
        (KEY_API_KEY, ""),
        (KEY_CREDENTIALS_FILE, " "),
    ])
    .expect("must bind");

    assert!(config.enabled);
    assert!(config.api_key.is_none());
    assert!(config.credentials_file.is_none());
}

#[test]
fn endpoint_override_reaches_the_client() {
    let config = LanguageConfig::from_pairs([(KEY_ENDPOINT, "http://localhost:8787/")])
        .expect("must bind");

    let client = LanguageClient::from_config(&config).expect("must build");
    assert_eq!(client.endpoint(), "http://localhost:8787");
}
