//! Built-in endpoint defaults for well-known providers and the overlay used
//! to combine them with configured values.

use crate::provider::ProviderConfig;
use tracing::debug;

/// Providers whose endpoints ship as defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderPreset {
    Kakao,
    Naver,
    Google,
}

impl ProviderPreset {
    pub const ALL: [ProviderPreset; 3] = [
        ProviderPreset::Kakao,
        ProviderPreset::Naver,
        ProviderPreset::Google,
    ];

    /// Matches a provider name case-insensitively.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|preset| preset.name().eq_ignore_ascii_case(name.trim()))
    }

    pub fn name(&self) -> &'static str {
        match self {
            ProviderPreset::Kakao => "kakao",
            ProviderPreset::Naver => "naver",
            ProviderPreset::Google => "google",
        }
    }

    /// Endpoint (and, for Google, scope) defaults. Credentials and the
    /// redirect URI are always left unset.
    pub fn defaults(&self) -> ProviderConfig {
        match self {
            ProviderPreset::Kakao => ProviderConfig::builder()
                .code_path("https://kauth.kakao.com/oauth/authorize")
                .token_path("https://kauth.kakao.com/oauth/token")
                .user_info_path("https://kapi.kakao.com/v2/user/me")
                .build(),
            ProviderPreset::Naver => ProviderConfig::builder()
                .code_path("https://nid.naver.com/oauth2.0/authorize")
                .token_path("https://nid.naver.com/oauth2.0/token")
                .user_info_path("https://openapi.naver.com/v1/nid/me")
                .build(),
            ProviderPreset::Google => ProviderConfig::builder()
                .code_path("https://accounts.google.com/o/oauth2/v2/auth")
                .token_path("https://oauth2.googleapis.com/token")
                .user_info_path("https://www.googleapis.com/oauth2/v3/userinfo")
                .scopes(vec!["openid".to_string(), "email".to_string()])
                .build(),
        }
    }
}

fn pick(overlay: Option<&str>, base: Option<&str>) -> Option<String> {
    overlay
        .filter(|v| !v.trim().is_empty())
        .or(base)
        .map(str::to_string)
}

impl ProviderConfig {
    /// Lays the values configured in `self` over `base`.
    ///
    /// Non-blank strings replace the base value; blank or unset ones keep it.
    /// Scopes are appended after the base scopes, skipping exact duplicates.
    /// Extra params are merged key by key with `self` winning.
    pub fn overlay(&self, base: &ProviderConfig) -> ProviderConfig {
        let mut scopes = base.scopes().to_vec();
        for scope in self.scopes() {
            if !scopes.contains(scope) {
                scopes.push(scope.clone());
            }
        }

        let mut extra_params = base.extra_params().clone();
        extra_params.extend(
            self.extra_params()
                .iter()
                .map(|(k, v)| (k.clone(), v.clone())),
        );

        ProviderConfig::builder()
            .maybe_client_id(pick(self.client_id(), base.client_id()))
            .maybe_client_secret(pick(self.client_secret(), base.client_secret()))
            .maybe_redirect_uri(pick(self.redirect_uri(), base.redirect_uri()))
            .maybe_token_path(pick(self.token_path(), base.token_path()))
            .maybe_code_path(pick(self.code_path(), base.code_path()))
            .maybe_user_info_path(pick(self.user_info_path(), base.user_info_path()))
            .scopes(scopes)
            .extra_params(extra_params)
            .build()
    }

    /// Overlays `self` on the defaults of `preset`.
    pub fn with_preset(&self, preset: ProviderPreset) -> ProviderConfig {
        debug!("Applying {} endpoint defaults", preset.name());
        self.overlay(&preset.defaults())
    }
}
