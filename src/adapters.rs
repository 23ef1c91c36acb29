//! Adapter wiring for the binary.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, info};

use highlighter_config::Config;
use highlighter_core::{AuthSession, Services};
use highlighter_protocols::{AdapterError, SurfaceLauncher};
use highlighter_provider_gemini::{
    GeminiClient, GeminiEmailWriter, GeminiIntentExtractor, GeminiSummarizer,
};
use highlighter_services_google::{
    GoogleCalendar, GoogleIdentity, GoogleMaps, GoogleTasks, IdentitySettings, MapsSettings,
};

/// Build every adapter from configuration.
pub(crate) fn build_services(config: &Config) -> Services {
    let gemini = Arc::new(
        GeminiClient::with_url(config.gemini.api_key.clone(), config.gemini.base_url.clone())
            .with_model(config.gemini.model.clone())
            .with_timeout(Duration::from_secs(config.gemini.timeout_seconds)),
    );

    let maps = GoogleMaps::new(MapsSettings {
        api_key: config.maps.api_key.clone(),
        base_url: config.maps.base_url.clone(),
        travel_mode: config.maps.travel_mode.clone(),
        directions_url: config.maps.directions_url.clone(),
    });

    let identity = GoogleIdentity::new(IdentitySettings {
        client_id: config.identity.client_id.clone(),
        client_secret: config.identity.client_secret.clone(),
        refresh_token: config.identity.refresh_token.clone(),
        token_url: config.identity.token_url.clone(),
        userinfo_url: config.identity.userinfo_url.clone(),
    });

    Services {
        summarizer: Arc::new(GeminiSummarizer::new(gemini.clone())),
        intent: Arc::new(GeminiIntentExtractor::new(gemini.clone())),
        directions: Arc::new(maps),
        email: Arc::new(GeminiEmailWriter::new(gemini)),
        tasks: Arc::new(GoogleTasks::with_url(config.tasks.base_url.clone())),
        calendar: Arc::new(GoogleCalendar::with_url(config.calendar.base_url.clone())),
        auth: Arc::new(AuthSession::new(Arc::new(identity))),
        launcher: Arc::new(SystemLauncher),
    }
}

/// Launcher backed by the desktop's default URL handler.
///
/// There is no browser side panel outside the extension, so `open_panel`
/// reports the launcher as unavailable.
pub(crate) struct SystemLauncher;

/// Program and arguments that hand `url` to the default handler on `os`.
///
/// Windows goes through `rundll32` because `cmd /C start` splits the URL
/// on `&`.
fn opener_command(os: &str, url: &str) -> (&'static str, Vec<String>) {
    match os {
        "macos" => ("open", vec![url.to_string()]),
        "windows" => (
            "rundll32",
            vec!["url.dll,FileProtocolHandler".to_string(), url.to_string()],
        ),
        _ => ("xdg-open", vec![url.to_string()]),
    }
}

impl SystemLauncher {
    fn opener(url: &str) -> tokio::process::Command {
        let (program, args) = opener_command(std::env::consts::OS, url);
        let mut cmd = tokio::process::Command::new(program);
        cmd.args(args);
        cmd
    }
}

#[async_trait]
impl SurfaceLauncher for SystemLauncher {
    async fn open_url(&self, url: &str) -> Result<(), AdapterError> {
        debug!("Opening {}", url);
        let status = Self::opener(url)
            .stdin(std::process::Stdio::null())
            .stdout(std::process::Stdio::null())
            .stderr(std::process::Stdio::null())
            .status()
            .await
            .map_err(|e| AdapterError::Unavailable(format!("no URL opener: {}", e)))?;

        if status.success() {
            Ok(())
        } else {
            Err(AdapterError::Unavailable(format!("URL opener exited with {}", status)))
        }
    }

    async fn open_panel(&self, tab_id: u64) -> Result<(), AdapterError> {
        info!("Panel requested for tab {} but no side panel is available", tab_id);
        Err(AdapterError::Unavailable(
            "side panels are only available inside the browser extension".to_string(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MAPS_URL: &str = "https://www.google.com/maps/dir/?api=1&destination=Paris&travelmode=driving";

    #[test]
    fn test_windows_opener_keeps_query_intact() {
        let (program, args) = opener_command("windows", MAPS_URL);
        assert_eq!(program, "rundll32");
        assert_eq!(args, vec!["url.dll,FileProtocolHandler", MAPS_URL]);
    }

    #[test]
    fn test_unix_openers() {
        assert_eq!(opener_command("macos", MAPS_URL), ("open", vec![MAPS_URL.to_string()]));
        assert_eq!(opener_command("linux", MAPS_URL), ("xdg-open", vec![MAPS_URL.to_string()]));
    }

    #[tokio::test]
    async fn test_open_panel_is_unavailable() {
        let err = SystemLauncher.open_panel(7).await.unwrap_err();
        assert!(matches!(err, AdapterError::Unavailable(_)));
        assert!(!err.requires_auth());
    }
}
