#![cfg(feature = "env")]
//! Environment-driven configuration tests

use std::io::Write;
use std::time::Duration;

use mqapi::{ApiClient, ClientConfig, Error};

const VARS: [&str; 3] = ["MQAPI_BASE_URL", "MQAPI_TIMEOUT", "MQAPI_USER_AGENT"];

fn unset_all() -> Vec<(&'static str, Option<&'static str>)> {
    VARS.iter().map(|name| (*name, None)).collect()
}

#[test]
fn test_from_env_defaults() {
    temp_env::with_vars(unset_all(), || {
        let config = ClientConfig::from_env().unwrap();
        assert!(config.base_url.is_none());
        assert_eq!(config.timeout, Duration::from_secs(90));
        assert_eq!(config.user_agent, "MqApi-v1");
    });
}

#[test]
fn test_from_env_reads_values() {
    temp_env::with_vars(
        [
            ("MQAPI_BASE_URL", Some("http://api.test")),
            ("MQAPI_TIMEOUT", Some("15")),
            ("MQAPI_USER_AGENT", Some("orders-service/2")),
        ],
        || {
            let config = ClientConfig::from_env().unwrap();
            assert_eq!(config.base_url.as_deref(), Some("http://api.test"));
            assert_eq!(config.timeout, Duration::from_secs(15));
            assert_eq!(config.user_agent, "orders-service/2");

            let client = ApiClient::from_config(config).unwrap();
            assert_eq!(client.base_url(), "http://api.test/");
            assert_eq!(client.timeout(), Duration::from_secs(15));
        },
    );
}

#[test]
fn test_from_env_invalid_timeout() {
    temp_env::with_vars(
        [
            ("MQAPI_BASE_URL", None),
            ("MQAPI_TIMEOUT", Some("soon")),
            ("MQAPI_USER_AGENT", None),
        ],
        || {
            let err = ClientConfig::from_env().unwrap_err();
            match err {
                Error::InvalidConfig(msg) => assert!(msg.contains("soon")),
                other => panic!("Expected InvalidConfig, got {:?}", other),
            }
        },
    );
}

#[test]
fn test_from_env_blank_user_agent_keeps_default() {
    temp_env::with_vars(
        [
            ("MQAPI_BASE_URL", None),
            ("MQAPI_TIMEOUT", None),
            ("MQAPI_USER_AGENT", Some("   ")),
        ],
        || {
            let config = ClientConfig::from_env().unwrap();
            assert_eq!(config.user_agent, "MqApi-v1");
        },
    );
}

fn env_file(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn test_from_env_file_reads_values() {
    let file = env_file("MQAPI_BASE_URL=http://from-file.test\nMQAPI_TIMEOUT=7\n");

    temp_env::with_vars(unset_all(), || {
        let config = ClientConfig::from_env_file(file.path()).unwrap();
        assert_eq!(config.base_url.as_deref(), Some("http://from-file.test"));
        assert_eq!(config.timeout, Duration::from_secs(7));
    });
}

#[test]
fn test_from_env_file_process_values_win() {
    let file = env_file("MQAPI_TIMEOUT=7\n");

    temp_env::with_vars(
        [
            ("MQAPI_BASE_URL", None),
            ("MQAPI_TIMEOUT", Some("20")),
            ("MQAPI_USER_AGENT", None),
        ],
        || {
            let config = ClientConfig::from_env_file(file.path()).unwrap();
            assert_eq!(config.timeout, Duration::from_secs(20));
        },
    );
}

#[test]
fn test_from_env_file_malformed_is_invalid_config() {
    let file = env_file("this line is not an assignment\nMQAPI_TIMEOUT=7\n");

    temp_env::with_vars(unset_all(), || {
        match ClientConfig::from_env_file(file.path()).unwrap_err() {
            Error::InvalidConfig(msg) => assert!(msg.contains(".env")),
            other => panic!("Expected InvalidConfig, got {:?}", other),
        }
    });
}

#[test]
fn test_from_env_file_missing_is_invalid_config() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join(".env");

    temp_env::with_vars(unset_all(), || {
        let err = ClientConfig::from_env_file(&missing).unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(_)));
    });
}
