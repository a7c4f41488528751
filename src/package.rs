//! Archive packaging.
//!
//! Bundles generated artifacts with the derived textual files into one
//! downloadable zip. Two layouts:
//!
//! - [`build_archive`]: flat: artifacts at the top level next to
//!   `manifest.json` and the HTML snippet.
//! - [`build_package`]: foldered: `icons/` and `code/` subdirectories plus
//!   an installation README.
//!
//! Each artifact's payload is consumed exactly once. An artifact whose
//! payload cannot be produced is logged and omitted; only a failure of the
//! archive writer itself fails the build. Already-generated artifacts stay
//! valid either way.

use std::io::{Cursor, Write};

use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::error::PackageError;
use crate::generate::GeneratedArtifact;

/// Filename of the manifest inside both layouts.
pub const MANIFEST_FILE: &str = "manifest.json";
/// Filename of the HTML snippet in the flat layout.
pub const HTML_SNIPPET_FILE: &str = "favicon_instructions.html";

type Writer = ZipWriter<Cursor<Vec<u8>>>;

/// Builds the flat archive: every artifact by its own filename, plus the
/// manifest, the HTML snippet, and an optional README.
pub fn build_archive(
    artifacts: &[GeneratedArtifact],
    manifest_json: Option<&str>,
    html_code: Option<&str>,
    readme: Option<&str>,
) -> Result<Vec<u8>, PackageError> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let options = file_options();

    write_artifacts(&mut writer, artifacts, "", options)?;
    if let Some(manifest) = manifest_json {
        write_text(&mut writer, MANIFEST_FILE, manifest, options)?;
    }
    if let Some(html) = html_code {
        write_text(&mut writer, HTML_SNIPPET_FILE, html, options)?;
    }
    if let Some(readme) = readme {
        write_text(&mut writer, "README.md", readme, options)?;
    }

    Ok(writer.finish()?.into_inner())
}

/// Builds the foldered package: `icons/` for artifacts, `code/` for the
/// textual files, `README.md` at the root (a default one when none given).
pub fn build_package(
    artifacts: &[GeneratedArtifact],
    html_code: &str,
    manifest_json: &str,
    browser_config_xml: Option<&str>,
    readme: Option<&str>,
) -> Result<Vec<u8>, PackageError> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let options = file_options();

    write_artifacts(&mut writer, artifacts, "icons/", options)?;
    write_text(&mut writer, "code/favicon-html.html", html_code, options)?;
    write_text(
        &mut writer,
        &format!("code/{MANIFEST_FILE}"),
        manifest_json,
        options,
    )?;
    if let Some(xml) = browser_config_xml {
        write_text(&mut writer, "code/browserconfig.xml", xml, options)?;
    }
    write_text(
        &mut writer,
        "README.md",
        readme.unwrap_or(DEFAULT_README),
        options,
    )?;

    Ok(writer.finish()?.into_inner())
}

fn file_options() -> SimpleFileOptions {
    SimpleFileOptions::default().compression_method(CompressionMethod::Deflated)
}

fn write_artifacts(
    writer: &mut Writer,
    artifacts: &[GeneratedArtifact],
    prefix: &str,
    options: SimpleFileOptions,
) -> Result<(), PackageError> {
    for artifact in artifacts {
        match artifact.payload() {
            Ok(bytes) => {
                writer.start_file(format!("{prefix}{}", artifact.name), options)?;
                writer.write_all(bytes)?;
            }
            Err(err) => log::warn!("omitting {} from archive: {err}", artifact.name),
        }
    }
    Ok(())
}

fn write_text(
    writer: &mut Writer,
    name: &str,
    content: &str,
    options: SimpleFileOptions,
) -> Result<(), PackageError> {
    writer.start_file(name, options)?;
    writer.write_all(content.as_bytes())?;
    Ok(())
}

/// Installation instructions shipped with the foldered package.
pub const DEFAULT_README: &str = "\
# Favicon Package

## Installation

1. Upload all files from the `icons` folder to your website's root directory.
2. Copy the markup from `code/favicon-html.html` into your `<head>` section.
3. Upload `code/manifest.json` to your root directory.
4. Reload your site and check the browser tab.

## Files

### icons
- `favicon-*.png`: raster icons for browsers, home screens, and tiles.

### code
- `favicon-html.html`: markup to include in your website.
- `manifest.json`: web app manifest for PWA support.
- `browserconfig.xml`: Microsoft tile configuration (when included).
";
