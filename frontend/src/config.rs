use log::warn;
use shared::DrawPolicy;
use web_sys::window;

pub const POLICY_STORAGE_KEY: &str = "wheel_policy";
pub const SPINNER_SOUND_PATH: &str = "/spinner.wav";

pub fn get_asset_base_url() -> String {
    if let Some(window) = window() {
        if let Ok(host) = window.location().host() {
            let protocol = window.location().protocol().unwrap_or_else(|_| "http:".to_string());
            return format!("{}//{}", protocol, host);
        }
    }

    // Default to 127.0.0.1 for development
    "http://127.0.0.1:8080".to_string()
}

pub fn get_asset_url(path: &str) -> String {
    if path.starts_with("http") {
        path.to_string()
    } else {
        format!("{}{}", get_asset_base_url(), path)
    }
}

/// Draw timing, optionally overridden by a JSON `DrawPolicy` stored under
/// `wheel_policy` in local storage. Bad overrides fall back to the defaults.
pub fn load_policy() -> DrawPolicy {
    let stored = window()
        .and_then(|w| w.local_storage().ok().flatten())
        .and_then(|s| s.get_item(POLICY_STORAGE_KEY).ok().flatten());

    let Some(raw) = stored else {
        return DrawPolicy::default();
    };

    match serde_json::from_str::<DrawPolicy>(&raw) {
        Ok(policy) => match policy.validate() {
            Ok(()) => policy,
            Err(err) => {
                warn!("ignoring stored draw policy: {}", err);
                DrawPolicy::default()
            }
        },
        Err(err) => {
            warn!("could not parse stored draw policy: {}", err);
            DrawPolicy::default()
        }
    }
}
