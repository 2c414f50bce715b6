use quidax_price_alert::config::{AlertConfig, Config, QuidaxConfig};
use rust_decimal_macros::dec;
use std::fs;
use std::time::Duration;
use tempfile::tempdir;

#[test]
fn test_config_new_with_valid_file() {
    let dir = tempdir().unwrap();
    let config_path = dir.path().join("config.toml");

    let config_content = r#"
[quidax]
api_url = "https://example.test/"
timeout_secs = 5

[alert]
market = "ethngn"
target_price = "3500000.25"
poll_interval_secs = 30
"#;

    fs::write(&config_path, config_content).unwrap();

    let original_dir = std::env::current_dir().unwrap();
    std::env::set_current_dir(dir.path()).unwrap();

    let result = Config::new();

    std::env::set_current_dir(original_dir).unwrap();

    assert!(result.is_ok());
    let config = result.unwrap();
    assert_eq!(config.quidax.api_url, "https://example.test/");
    assert_eq!(config.quidax.timeout_secs, Some(5));
    assert_eq!(config.alert.market, "ethngn");
    assert_eq!(config.alert.target_price, dec!(3500000.25));
    assert_eq!(config.alert.poll_interval_secs, 30);
    assert_eq!(config.poll_interval(), Duration::from_secs(30));
    assert_eq!(config.request_timeout(), Duration::from_secs(5));
}

#[test]
fn test_config_from_path_with_missing_file() {
    let dir = tempdir().unwrap();
    let result = Config::from_path(dir.path().join("config.toml"));
    assert!(result.is_err());
}

#[test]
fn test_config_with_invalid_toml() {
    let dir = tempdir().unwrap();
    let config_path = dir.path().join("config.toml");

    let invalid_content = r#"
[alert
market = "btcngn"
"#;

    fs::write(&config_path, invalid_content).unwrap();

    assert!(Config::from_path(&config_path).is_err());
}

#[test]
fn test_config_missing_fields_use_defaults() {
    let config = Config::from_toml_str(
        r#"
[alert]
market = "usdtngn"
"#,
    )
    .unwrap();

    assert_eq!(config.quidax.api_url, "https://app.quidax.com");
    assert_eq!(config.alert.market, "usdtngn");
    assert_eq!(config.alert.target_price, dec!(200000000));
    assert_eq!(config.alert.poll_interval_secs, 10);
    assert_eq!(config.request_timeout(), Duration::from_secs(10));
}

#[test]
fn test_config_empty_file_is_default() {
    let config = Config::from_toml_str("").unwrap();
    let default = Config::default();

    assert_eq!(config.alert.market, default.alert.market);
    assert_eq!(config.alert.target_price, default.alert.target_price);
    assert_eq!(config.alert.poll_interval_secs, default.alert.poll_interval_secs);
    assert_eq!(config.quidax.api_url, default.quidax.api_url);
}

#[test]
fn test_config_rejects_invalid_values() {
    for content in [
        "[alert]\nmarket = \"  \"\n",
        "[alert]\npoll_interval_secs = 0\n",
        "[alert]\ntarget_price = \"0\"\n",
        "[alert]\ntarget_price = \"-5\"\n",
        "[quidax]\ntimeout_secs = 0\n",
    ] {
        assert!(
            Config::from_toml_str(content).is_err(),
            "expected rejection for {content:?}"
        );
    }
}

#[test]
fn test_config_target_price_is_exact() {
    let config = Config::from_toml_str("[alert]\ntarget_price = 200000000\n").unwrap();
    assert_eq!(config.alert.target_price, dec!(200000000));

    let config = Config::from_toml_str("[alert]\ntarget_price = \"0.000000001\"\n").unwrap();
    assert_eq!(config.alert.target_price, dec!(0.000000001));

    for content in [
        "[alert]\ntarget_price = \"199999999.999999999999999999999\"\n",
        "[alert]\ntarget_price = \" 200000000\"\n",
        "[alert]\ntarget_price = \"abc\"\n",
    ] {
        assert!(
            Config::from_toml_str(content).is_err(),
            "expected rejection for {content:?}"
        );
    }
}

#[test]
fn test_config_clone() {
    let config = Config {
        quidax: QuidaxConfig {
            api_url: "http://localhost:1234".to_string(),
            timeout_secs: None,
        },
        alert: AlertConfig {
            market: "btcngn".to_string(),
            target_price: dec!(1),
            poll_interval_secs: 2,
        },
    };

    let cloned = config.clone();
    assert_eq!(config.quidax.api_url, cloned.quidax.api_url);
    assert_eq!(config.alert.target_price, cloned.alert.target_price);
    assert_eq!(cloned.request_timeout(), Duration::from_secs(2));
    assert!(cloned.validate().is_ok());
}
