//! Derived textual artifacts: web app manifest, head markup, and the
//! Microsoft browser configuration.
//!
//! Everything here references artifacts by the pipeline's conventional
//! `favicon-{s}x{s}.{ext}` filenames, so a generated package is internally
//! consistent without any coordination at call sites.

use serde::{Deserialize, Serialize};

/// One entry of the manifest's `icons` array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestIcon {
    pub src: String,
    pub sizes: String,
    #[serde(rename = "type")]
    pub media_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub purpose: Option<String>,
}

/// A web app manifest, serializable straight to `manifest.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebManifest {
    pub name: String,
    pub short_name: String,
    pub description: String,
    pub start_url: String,
    pub display: String,
    pub background_color: String,
    pub theme_color: String,
    pub icons: Vec<ManifestIcon>,
}

impl WebManifest {
    /// Builds the standard manifest for a generated icon set.
    ///
    /// The short name is capped at 12 characters; the description defaults
    /// to `"{name} - PWA"`. Icons reference the 192 and 512 px outputs with
    /// the `maskable any` purpose.
    pub fn new(
        app_name: &str,
        theme_color: &str,
        background_color: &str,
        description: Option<&str>,
    ) -> Self {
        let icon = |size: u32| ManifestIcon {
            src: format!("/favicon-{size}x{size}.png"),
            sizes: format!("{size}x{size}"),
            media_type: "image/png".to_owned(),
            purpose: Some("maskable any".to_owned()),
        };
        Self {
            name: app_name.to_owned(),
            short_name: app_name.chars().take(12).collect(),
            description: description
                .map(str::to_owned)
                .unwrap_or_else(|| format!("{app_name} - PWA")),
            start_url: "/".to_owned(),
            display: "standalone".to_owned(),
            background_color: background_color.to_owned(),
            theme_color: theme_color.to_owned(),
            icons: vec![icon(192), icon(512)],
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// The head-markup block installing a generated icon set.
pub fn favicon_html(app_name: &str, theme_color: &str) -> String {
    format!(
        r#"<!-- Standard favicons -->
<link rel="icon" type="image/png" sizes="16x16" href="/favicon-16x16.png">
<link rel="icon" type="image/png" sizes="32x32" href="/favicon-32x32.png">
<link rel="icon" type="image/png" sizes="48x48" href="/favicon-48x48.png">

<!-- Apple Touch Icon -->
<link rel="apple-touch-icon" sizes="180x180" href="/favicon-180x180.png">

<!-- Android/Chrome -->
<link rel="icon" type="image/png" sizes="192x192" href="/favicon-192x192.png">
<link rel="icon" type="image/png" sizes="512x512" href="/favicon-512x512.png">

<!-- Microsoft Tiles -->
<meta name="msapplication-TileImage" content="/favicon-144x144.png">
<meta name="msapplication-TileColor" content="{theme_color}">

<!-- Web App Manifest -->
<link rel="manifest" href="/manifest.json">

<!-- Theme colors -->
<meta name="theme-color" content="{theme_color}">
<meta name="msapplication-navbutton-color" content="{theme_color}">
<meta name="apple-mobile-web-app-status-bar-style" content="default">
<meta name="apple-mobile-web-app-capable" content="yes">
<meta name="apple-mobile-web-app-title" content="{app_name}">"#
    )
}

/// Minimal per-browser installation fragments.
pub fn browser_snippets(theme_color: &str) -> Vec<(&'static str, String)> {
    let png_links = r#"<link rel="icon" type="image/png" sizes="32x32" href="/favicon-32x32.png">
<link rel="icon" type="image/png" sizes="16x16" href="/favicon-16x16.png">"#;
    vec![
        (
            "chrome",
            format!("{png_links}\n<meta name=\"theme-color\" content=\"{theme_color}\">"),
        ),
        (
            "safari",
            r#"<link rel="apple-touch-icon" sizes="180x180" href="/favicon-180x180.png">
<meta name="apple-mobile-web-app-capable" content="yes">
<meta name="apple-mobile-web-app-status-bar-style" content="default">"#
                .to_owned(),
        ),
        (
            "firefox",
            format!("{png_links}\n<meta name=\"theme-color\" content=\"{theme_color}\">"),
        ),
        (
            "edge",
            format!(
                "{png_links}\n<meta name=\"msapplication-TileColor\" content=\"{theme_color}\">"
            ),
        ),
    ]
}

/// `browserconfig.xml` for Microsoft tiles.
pub fn browser_config_xml(theme_color: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="utf-8"?>
<browserconfig>
  <msapplication>
    <tile>
      <square150x150logo src="/favicon-144x144.png"/>
      <TileColor>{theme_color}</TileColor>
    </tile>
  </msapplication>
</browserconfig>"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manifest_json_shape() {
        let manifest = WebManifest::new("My App", "#3b82f6", "#ffffff", None);
        let json = manifest.to_json().unwrap();
        assert!(json.contains("\"short_name\":\"My App\""));
        assert!(json.contains("\"start_url\":\"/\""));
        assert!(json.contains("\"display\":\"standalone\""));
        assert!(json.contains("\"type\":\"image/png\""));
        assert!(json.contains("\"purpose\":\"maskable any\""));
        assert!(json.contains("/favicon-192x192.png"));
        assert!(json.contains("/favicon-512x512.png"));

        let restored = WebManifest::from_json(&json).unwrap();
        assert_eq!(restored, manifest);
    }

    #[test]
    fn long_names_truncate_short_name() {
        let manifest = WebManifest::new("A Very Long Application Name", "#fff", "#fff", None);
        assert_eq!(manifest.short_name, "A Very Long ");
        assert_eq!(manifest.name, "A Very Long Application Name");
    }

    #[test]
    fn description_defaults_and_overrides() {
        let manifest = WebManifest::new("App", "#fff", "#fff", None);
        assert_eq!(manifest.description, "App - PWA");
        let manifest = WebManifest::new("App", "#fff", "#fff", Some("Custom"));
        assert_eq!(manifest.description, "Custom");
    }

    #[test]
    fn html_references_conventional_names() {
        let html = favicon_html("My App", "#112233");
        assert!(html.contains(r#"href="/favicon-16x16.png""#));
        assert!(html.contains(r#"href="/favicon-180x180.png""#));
        assert!(html.contains(r#"<link rel="manifest" href="/manifest.json">"#));
        assert!(html.contains(r##"<meta name="theme-color" content="#112233">"##));
        assert!(html.contains("My App"));
    }

    #[test]
    fn browser_snippets_cover_major_browsers() {
        let snippets = browser_snippets("#ffffff");
        let browsers: Vec<_> = snippets.iter().map(|(b, _)| *b).collect();
        assert_eq!(browsers, vec!["chrome", "safari", "firefox", "edge"]);
        for (_, html) in &snippets {
            assert!(html.contains("favicon-") || html.contains("theme-color"));
        }
    }

    #[test]
    fn browser_config_embeds_tile_color() {
        let xml = browser_config_xml("#abcdef");
        assert!(xml.contains("<TileColor>#abcdef</TileColor>"));
        assert!(xml.contains("favicon-144x144.png"));
    }
}
