use log::warn;
use serde::{Deserialize, Serialize};

const STORAGE_KEY: &str = "virtual_lab_titration_panel";

/// Last amounts typed into the titration panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredPanelSettings {
    #[serde(default = "default_fill_ml")]
    pub fill_ml: String,
    #[serde(default = "default_add_ml")]
    pub add_ml: String,
}

fn default_fill_ml() -> String {
    "10".to_string()
}

fn default_add_ml() -> String {
    "1.0".to_string()
}

impl Default for StoredPanelSettings {
    fn default() -> Self {
        Self {
            fill_ml: default_fill_ml(),
            add_ml: default_add_ml(),
        }
    }
}

/// Attempts to get the browser's localStorage.
///
/// Returns `None` outside a browser, in private browsing with storage disabled,
/// or when access raises a SecurityError (sandboxed iframes).
fn get_storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok()?
}

/// Decode stored JSON, falling back to defaults when it is corrupt or from an
/// incompatible version.
fn parse_settings(json: &str) -> StoredPanelSettings {
    serde_json::from_str(json).unwrap_or_else(|e| {
        warn!("failed to parse stored panel settings (using defaults): {}", e);
        StoredPanelSettings::default()
    })
}

/// Load the panel inputs from localStorage.
///
/// # Fallback Behavior
///
/// Returns defaults when localStorage is unavailable, nothing has been saved yet,
/// or the stored value cannot be read. The lab always works without persistence.
pub fn load_panel_settings() -> StoredPanelSettings {
    let Some(storage) = get_storage() else {
        // Expected in private browsing, not worth a warning.
        return StoredPanelSettings::default();
    };
    match storage.get_item(STORAGE_KEY) {
        Ok(Some(json)) => parse_settings(&json),
        Ok(None) => StoredPanelSettings::default(),
        Err(_) => {
            warn!("could not read from localStorage (using defaults)");
            StoredPanelSettings::default()
        }
    }
}

/// Save the panel inputs. Fails with a console warning only.
pub fn save_panel_settings(settings: &StoredPanelSettings) {
    let Some(storage) = get_storage() else {
        return;
    };

    let json = match serde_json::to_string(settings) {
        Ok(j) => j,
        Err(e) => {
            warn!("failed to serialize panel settings: {}", e);
            return;
        }
    };

    if storage.set_item(STORAGE_KEY, &json).is_err() {
        warn!(
            "could not save panel settings to localStorage. \
             You may be in private browsing mode or storage quota exceeded."
        );
    }
}

/// Forget the saved inputs, used by the error page's reset button.
pub fn clear_panel_settings() {
    if let Some(storage) = get_storage() {
        let _ = storage.remove_item(STORAGE_KEY);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = StoredPanelSettings::default();
        assert_eq!(settings.fill_ml, "10");
        assert_eq!(settings.add_ml, "1.0");
    }

    #[test]
    fn test_missing_fields_take_defaults() {
        let settings = parse_settings(r#"{"fill_ml":"25"}"#);
        assert_eq!(settings.fill_ml, "25");
        assert_eq!(settings.add_ml, "1.0");
    }

    #[test]
    fn test_corrupt_json_falls_back() {
        assert_eq!(parse_settings("{not json"), StoredPanelSettings::default());
        assert_eq!(parse_settings("[]"), StoredPanelSettings::default());
    }

    #[test]
    fn test_saved_shape_reloads() {
        let settings = StoredPanelSettings {
            fill_ml: "42.5".to_string(),
            add_ml: "0.25".to_string(),
        };
        let json = serde_json::to_string(&settings).unwrap();
        assert_eq!(json, r#"{"fill_ml":"42.5","add_ml":"0.25"}"#);
        assert_eq!(parse_settings(&json), settings);
    }
}
