//! End-to-end tests: binding, loading from files, presets and request parts.

#[cfg(test)]
mod binding_tests {
    use crate::{OAuthSettings, ProviderConfig};

    #[test]
    fn test_example_binding_preserves_values() {
        let config: ProviderConfig = serde_json::from_value(serde_json::json!({
            "client-id": "abc123",
            "redirect-uri": "http://localhost:8080/cb",
            "token-path": "https://p.example/token",
            "code-path": "https://p.example/authorize",
            "user-info-path": "https://p.example/me",
            "scopes": ["profile", "email"]
        }))
        .unwrap();

        assert_eq!(config.client_id(), Some("abc123"));
        assert_eq!(config.redirect_uri(), Some("http://localhost:8080/cb"));
        assert_eq!(config.token_path(), Some("https://p.example/token"));
        assert_eq!(config.code_path(), Some("https://p.example/authorize"));
        assert_eq!(config.user_info_path(), Some("https://p.example/me"));
        assert_eq!(config.scopes(), ["profile", "email"]);
        assert_eq!(config.client_secret(), None);
    }

    #[test]
    fn test_binding_without_scopes_yields_empty_list() {
        let config: ProviderConfig = serde_json::from_value(serde_json::json!({
            "client-id": "abc123"
        }))
        .unwrap();

        assert_eq!(config.scopes().len(), 0);
    }

    #[test]
    fn test_empty_mapping_binds() {
        let config: ProviderConfig = serde_json::from_value(serde_json::json!({})).unwrap();
        assert_eq!(config, ProviderConfig::default());
    }

    #[test]
    fn test_snake_case_keys_bind_too() {
        let config: ProviderConfig = serde_json::from_value(serde_json::json!({
            "client_id": "abc123",
            "user_info_path": "https://p.example/me"
        }))
        .unwrap();

        assert_eq!(config.client_id(), Some("abc123"));
        assert_eq!(config.user_info_path(), Some("https://p.example/me"));
    }

    #[test]
    fn test_empty_string_is_kept_as_configured() {
        let config: ProviderConfig = serde_json::from_value(serde_json::json!({
            "client-secret": ""
        }))
        .unwrap();

        assert_eq!(config.client_secret(), Some(""));
        assert!(!config.has_client_secret());
    }

    #[test]
    fn test_settings_bind_provider_map() {
        let settings: OAuthSettings = serde_json::from_value(serde_json::json!({
            "providers": {
                "kakao": { "client-id": "k" },
                "naver": { "client-id": "n", "scopes": ["name"] }
            }
        }))
        .unwrap();

        assert_eq!(settings.provider_names(), vec!["kakao", "naver"]);
        assert_eq!(settings.provider("naver").unwrap().scopes(), ["name"]);
        assert!(settings.provider("google").is_none());
    }
}

#[cfg(test)]
mod loader_tests {
    use crate::{Map, OAuthConfigError, ProviderField, SettingsLoader};
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn init_tracing() {
        let _ = tracing_subscriber::fmt()
            .with_test_writer()
            .with_max_level(tracing::Level::DEBUG)
            .try_init();
    }

    fn write_config(suffix: &str, content: &str) -> NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_load_yaml_file() {
        init_tracing();

        let file = write_config(
            ".yaml",
            r#"
oauth:
  providers:
    kakao:
      client-id: abc123
      client-secret: kakao-secret
      redirect-uri: http://localhost:8080/cb
      scopes:
        - profile
        - email
"#,
        );

        let settings = SettingsLoader::new()
            .with_file(file.path())
            .with_env_source(Map::new())
            .load()
            .unwrap();

        let kakao = settings.provider("kakao").unwrap();
        assert_eq!(kakao.client_id(), Some("abc123"));
        assert_eq!(kakao.client_secret(), Some("kakao-secret"));
        assert_eq!(kakao.scopes(), ["profile", "email"]);
    }

    #[test]
    fn test_mixed_case_extra_params_reach_authorization_url() {
        let file = write_config(
            ".yaml",
            r#"
oauth:
  providers:
    azure:
      client-id: azure-client
      redirect-uri: https://app.example/cb
      code-path: https://login.example/authorize
      extra-params:
        - name: responseMode
          value: form_post
        - domainHint=Example.com
"#,
        );

        let settings = SettingsLoader::new()
            .with_file(file.path())
            .with_env_source(Map::new())
            .load()
            .unwrap();

        let azure = settings.provider("azure").unwrap();
        assert_eq!(azure.extra_params()["responseMode"], "form_post");

        let url = azure.authorization_url("xyz").unwrap();
        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert!(pairs.contains(&("responseMode".to_string(), "form_post".to_string())));
        assert!(pairs.contains(&("domainHint".to_string(), "Example.com".to_string())));
    }

    #[test]
    fn test_load_toml_file_with_presets() {
        init_tracing();

        let file = write_config(
            ".toml",
            r#"
[oauth.providers.google]
client-id = "google-id"
client-secret = "google-secret"
redirect-uri = "https://app.example/login/oauth2/code/google"
scopes = ["profile"]
"#,
        );

        let settings = SettingsLoader::new()
            .with_file(file.path())
            .with_env_source(Map::new())
            .load()
            .unwrap()
            .with_presets();

        settings.validate().unwrap();

        let google = settings.provider("google").unwrap();
        assert_eq!(google.scopes(), ["openid", "email", "profile"]);
        assert_eq!(
            google.code_path(),
            Some("https://accounts.google.com/o/oauth2/v2/auth")
        );
    }

    #[test]
    fn test_later_files_override_earlier_ones() {
        let base = write_config(
            ".toml",
            r#"
[oauth.providers.naver]
client-id = "base-id"
redirect-uri = "https://app.example/cb"
"#,
        );
        let local = write_config(
            ".toml",
            r#"
[oauth.providers.naver]
client-id = "local-id"
"#,
        );

        let settings = SettingsLoader::new()
            .with_file(base.path())
            .with_file(local.path())
            .with_env_source(Map::new())
            .load()
            .unwrap();

        let naver = settings.provider("naver").unwrap();
        assert_eq!(naver.client_id(), Some("local-id"));
        assert_eq!(naver.redirect_uri(), Some("https://app.example/cb"));
    }

    #[test]
    fn test_unconfigured_preset_provider_fails_validation() {
        let file = write_config(
            ".toml",
            r#"
[oauth.providers.kakao]
scopes = ["profile"]
"#,
        );

        let settings = SettingsLoader::new()
            .with_file(file.path())
            .with_env_source(Map::new())
            .load()
            .unwrap()
            .with_presets();

        match settings.validate() {
            Err(OAuthConfigError::Provider { name, source }) => {
                assert_eq!(name, "kakao");
                match *source {
                    OAuthConfigError::MissingFields { fields } => assert_eq!(
                        fields,
                        vec![ProviderField::ClientId, ProviderField::RedirectUri]
                    ),
                    other => panic!("Expected MissingFields, got {:?}", other),
                }
            }
            other => panic!("Expected Provider error, got {:?}", other),
        }
    }
}

#[cfg(test)]
mod flow_tests {
    use crate::{
        FileFormat, Map, ProviderPreset, SettingsLoader, SharedProviderConfig, generate_state,
    };
    use std::collections::HashMap;
    use std::sync::Arc;

    #[test]
    fn test_kakao_request_parts_from_loaded_settings() {
        let settings = SettingsLoader::new()
            .with_str(
                r#"
[oauth.providers.kakao]
client-id = "kakao-client"
redirect-uri = "http://localhost:8080/login/oauth2/code/kakao"
"#,
                FileFormat::Toml,
            )
            .with_env_source(Map::new())
            .load()
            .unwrap()
            .with_presets();

        let kakao = Arc::new(settings.provider("kakao").unwrap().clone());

        let state = generate_state();
        let url = kakao.authorization_url(&state).unwrap();
        assert!(url.as_str().starts_with("https://kauth.kakao.com/oauth/authorize?"));

        let params: HashMap<_, _> = url.query_pairs().into_owned().collect();
        assert_eq!(params["client_id"], "kakao-client");
        assert_eq!(params["state"], state);
        assert!(!params.contains_key("scope"));

        let token = kakao.token_request("auth-code").unwrap();
        assert_eq!(token.endpoint.as_str(), "https://kauth.kakao.com/oauth/token");
        assert!(token.form.iter().all(|(key, _)| *key != "client_secret"));

        let user_info = kakao.user_info_request("access").unwrap();
        assert_eq!(user_info.endpoint.as_str(), "https://kapi.kakao.com/v2/user/me");
    }

    #[test]
    fn test_reload_swaps_whole_record() {
        let original = ProviderPreset::Naver.defaults();
        let shared = SharedProviderConfig::new(original.clone());

        let mut reloaded = original.clone();
        reloaded.set_client_id("new-client");
        reloaded.set_client_secret("new-secret");

        let in_flight = shared.current();
        shared.replace(reloaded);

        assert_eq!(in_flight.client_id(), None);
        assert_eq!(shared.current().client_id(), Some("new-client"));
        assert_eq!(shared.current().client_secret(), Some("new-secret"));
    }
}
