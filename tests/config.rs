// ABOUTME: Integration tests for configuration parsing and validation.
// ABOUTME: Tests YAML parsing, credential interpolation, and slot overrides.

use scmpush::config::*;
use scmpush::error::Error;

const MINIMAL: &str = r#"
app: shop
scm_uri: https://shop.scm.example.net/
credentials:
  username: "$shop"
  password: "literal-secret"
"#;

mod parsing {
    use super::*;

    #[test]
    fn parse_minimal_config() {
        let config = Config::from_yaml(MINIMAL).unwrap();
        assert_eq!(config.app.as_str(), "shop");
        assert_eq!(config.scm_uri.as_str(), "https://shop.scm.example.net");
        assert!(config.resource_group.is_none());
        assert!(config.slots.is_empty());
        assert!(config.slot.is_none());
    }

    #[test]
    fn parse_full_config() {
        let yaml = r#"
app: shop
resource_group: retail-prod
scm_uri: https://shop.scm.example.net
credentials:
  username: "$shop"
  password:
    env: SHOP_DEPLOY_PASSWORD

slots:
  staging:
    scm_uri: https://shop-staging.scm.example.net
  canary:
    scm_uri: https://shop-canary.scm.example.net
    credentials:
      username: canary-deployer
      password:
        env: CANARY_PASSWORD
        default: "changeme"
"#;
        let config = Config::from_yaml(yaml).unwrap();
        assert_eq!(config.resource_group.as_deref(), Some("retail-prod"));
        assert_eq!(config.slots.len(), 2);
        assert!(config.slots["staging"].credentials.is_none());
        assert!(config.slots["canary"].credentials.is_some());
        assert_eq!(
            config.credentials.password,
            EnvValue::FromEnv {
                var: "SHOP_DEPLOY_PASSWORD".to_string(),
                default: None,
            }
        );
    }

    #[test]
    fn missing_app_returns_error() {
        let yaml = r#"
scm_uri: https://shop.scm.example.net
credentials:
  username: u
  password: p
"#;
        let err = Config::from_yaml(yaml).unwrap_err();
        assert!(err.to_string().contains("app"));
    }

    #[test]
    fn invalid_app_name_returns_error() {
        let yaml = r#"
app: "shop_front"
scm_uri: https://shop.scm.example.net
credentials:
  username: u
  password: p
"#;
        let err = Config::from_yaml(yaml).unwrap_err();
        assert!(err.to_string().contains("invalid character"), "{err}");
    }

    #[test]
    fn non_http_scm_uri_returns_error() {
        let yaml = r#"
app: shop
scm_uri: ftp://shop.scm.example.net
credentials:
  username: u
  password: p
"#;
        let err = Config::from_yaml(yaml).unwrap_err();
        assert!(err.to_string().contains("http"), "{err}");
    }

    #[test]
    fn malformed_scm_port_fails_at_load() {
        let yaml = r#"
app: shop
scm_uri: https://shop.scm.example.net:notaport
credentials:
  username: u
  password: p
"#;
        let err = Config::from_yaml(yaml).unwrap_err();
        assert!(err.to_string().contains("invalid SCM URI"), "{err}");
    }

    #[test]
    fn malformed_slot_address_fails_at_load() {
        let yaml = r#"
app: shop
scm_uri: https://shop.scm.example.net
credentials:
  username: u
  password: p
slots:
  staging:
    scm_uri: "https://shop staging.scm.example.net"
"#;
        assert!(Config::from_yaml(yaml).is_err());
    }

    #[test]
    fn missing_credentials_returns_error() {
        let yaml = r#"
app: shop
scm_uri: https://shop.scm.example.net
"#;
        let err = Config::from_yaml(yaml).unwrap_err();
        assert!(err.to_string().contains("credentials"));
    }
}

mod credentials {
    use super::*;
    use base64::Engine;
    use base64::engine::general_purpose::STANDARD;

    #[test]
    fn literal_credentials_resolve() {
        let config = Config::from_yaml(MINIMAL).unwrap();
        let creds = config.resolve_credentials().unwrap();

        assert_eq!(creds.username(), "$shop");
        assert_eq!(creds.scm_uri(), &config.scm_uri);
        let token = creds.authorization();
        let decoded = STANDARD
            .decode(token.strip_prefix("Basic ").unwrap())
            .unwrap();
        assert_eq!(decoded, b"$shop:literal-secret");
    }

    #[test]
    fn password_from_environment() {
        let yaml = r#"
app: shop
scm_uri: https://shop.scm.example.net
credentials:
  username: deployer
  password:
    env: SCMPUSH_CONFIG_TEST_PASSWORD
"#;
        let config = Config::from_yaml(yaml).unwrap();

        temp_env::with_var("SCMPUSH_CONFIG_TEST_PASSWORD", Some("from-env"), || {
            let creds = config.resolve_credentials().unwrap();
            assert_eq!(
                creds.authorization(),
                format!("Basic {}", STANDARD.encode("deployer:from-env"))
            );
        });
    }

    #[test]
    fn missing_password_variable_is_reported() {
        let yaml = r#"
app: shop
scm_uri: https://shop.scm.example.net
credentials:
  username: deployer
  password:
    env: SCMPUSH_CONFIG_TEST_UNSET
"#;
        let config = Config::from_yaml(yaml).unwrap();

        temp_env::with_var_unset("SCMPUSH_CONFIG_TEST_UNSET", || {
            let err = config.resolve_credentials().unwrap_err();
            assert!(matches!(err, Error::MissingEnvVar(ref v) if v == "SCMPUSH_CONFIG_TEST_UNSET"));
        });
    }

    #[test]
    fn default_used_when_variable_unset() {
        let yaml = r#"
app: shop
scm_uri: https://shop.scm.example.net
credentials:
  username: deployer
  password:
    env: SCMPUSH_CONFIG_TEST_DEFAULTED
    default: fallback
"#;
        let config = Config::from_yaml(yaml).unwrap();

        temp_env::with_var_unset("SCMPUSH_CONFIG_TEST_DEFAULTED", || {
            let creds = config.resolve_credentials().unwrap();
            assert_eq!(
                creds.authorization(),
                format!("Basic {}", STANDARD.encode("deployer:fallback"))
            );
        });
    }

    #[test]
    fn empty_username_is_rejected() {
        let yaml = r#"
app: shop
scm_uri: https://shop.scm.example.net
credentials:
  username: ""
  password: p
"#;
        let config = Config::from_yaml(yaml).unwrap();
        assert!(matches!(
            config.resolve_credentials(),
            Err(Error::InvalidConfig(_))
        ));
    }
}

mod slots {
    use super::*;

    const WITH_SLOTS: &str = r#"
app: shop
resource_group: retail
scm_uri: https://shop.scm.example.net
credentials:
  username: app-user
  password: app-pass
slots:
  staging:
    scm_uri: https://shop-staging.scm.example.net
  canary:
    scm_uri: https://shop-canary.scm.example.net
    credentials:
      username: canary-user
      password: canary-pass
"#;

    #[test]
    fn slot_overrides_scm_uri() {
        let config = Config::from_yaml(WITH_SLOTS).unwrap();
        let staging = config.for_slot("staging").unwrap();

        assert_eq!(
            staging.scm_uri.as_str(),
            "https://shop-staging.scm.example.net"
        );
        assert_eq!(staging.slot.as_ref().unwrap().as_str(), "staging");
    }

    #[test]
    fn slot_without_credentials_keeps_app_credentials() {
        let config = Config::from_yaml(WITH_SLOTS).unwrap();
        let creds = config.for_slot("staging").unwrap().resolve_credentials().unwrap();

        assert_eq!(creds.username(), "app-user");
        assert_eq!(
            creds.scm_uri().as_str(),
            "https://shop-staging.scm.example.net"
        );
    }

    #[test]
    fn slot_credentials_replace_app_credentials() {
        let config = Config::from_yaml(WITH_SLOTS).unwrap();
        let creds = config.for_slot("canary").unwrap().resolve_credentials().unwrap();
        assert_eq!(creds.username(), "canary-user");
    }

    #[test]
    fn slot_identity_carries_app_and_group() {
        let config = Config::from_yaml(WITH_SLOTS).unwrap();
        let identity = config.for_slot("canary").unwrap().identity();

        assert_eq!(identity.app.as_str(), "shop");
        assert_eq!(identity.resource_group.as_deref(), Some("retail"));
        assert_eq!(identity.display_name(), "shop/canary");
    }

    #[test]
    fn unknown_slot_returns_error() {
        let config = Config::from_yaml(WITH_SLOTS).unwrap();
        let err = config.for_slot("production").unwrap_err();
        assert!(matches!(err, Error::UnknownSlot(ref s) if s == "production"));
    }

    #[test]
    fn invalid_slot_name_returns_error() {
        let yaml = r#"
app: shop
scm_uri: https://shop.scm.example.net
credentials:
  username: u
  password: p
slots:
  "blue_green":
    scm_uri: https://shop-bg.scm.example.net
"#;
        let config = Config::from_yaml(yaml).unwrap();
        assert!(matches!(
            config.for_slot("blue_green"),
            Err(Error::InvalidConfig(_))
        ));
    }
}

mod discovery {
    use super::*;
    use std::fs;

    #[test]
    fn finds_primary_file() {
        let temp = tempfile::tempdir().unwrap();
        fs::write(temp.path().join(CONFIG_FILENAME), MINIMAL).unwrap();

        let config = Config::discover(temp.path()).unwrap();
        assert_eq!(config.app.as_str(), "shop");
    }

    #[test]
    fn finds_config_in_dot_directory() {
        let temp = tempfile::tempdir().unwrap();
        fs::create_dir_all(temp.path().join(".scmpush")).unwrap();
        fs::write(temp.path().join(CONFIG_FILENAME_DIR), MINIMAL).unwrap();

        assert!(Config::discover(temp.path()).is_ok());
    }

    #[test]
    fn missing_config_is_reported() {
        let temp = tempfile::tempdir().unwrap();
        let err = Config::discover(temp.path()).unwrap_err();
        assert!(matches!(err, Error::ConfigNotFound(_)));
    }

    #[test]
    fn init_writes_loadable_template() {
        let temp = tempfile::tempdir().unwrap();
        init_config(temp.path(), Some("shop"), None, false).unwrap();

        let config = Config::discover(temp.path()).unwrap();
        assert_eq!(config.app.as_str(), "shop");
        assert_eq!(
            config.scm_uri.as_str(),
            "https://shop.scm.azurewebsites.net"
        );
        assert_eq!(
            config.credentials.password,
            EnvValue::FromEnv {
                var: PASSWORD_ENV_VAR.to_string(),
                default: None,
            }
        );
    }

    #[test]
    fn init_refuses_to_overwrite_without_force() {
        let temp = tempfile::tempdir().unwrap();
        init_config(temp.path(), None, None, false).unwrap();

        let err = init_config(temp.path(), None, None, false).unwrap_err();
        assert!(matches!(err, Error::AlreadyExists(_)));
        assert!(init_config(temp.path(), None, None, true).is_ok());
    }

    #[test]
    fn init_rejects_invalid_app_name() {
        let temp = tempfile::tempdir().unwrap();
        let err = init_config(temp.path(), Some("-bad"), None, false).unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(_)));
    }
}
