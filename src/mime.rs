//! MIME type guessing from identifier suffixes.

use std::collections::HashMap;

/// Guesses MIME types from the extension at the end of an identifier.
///
/// Custom mappings are checked before the built-in table. Lookups are
/// case-insensitive on the extension.
#[derive(Debug, Clone, Default)]
pub struct MimeTypes {
    custom: HashMap<String, String>,
}

impl MimeTypes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a mapping for `extension` (without leading dot).
    pub fn with_type(mut self, extension: impl Into<String>, mime_type: impl Into<String>) -> Self {
        self.custom
            .insert(extension.into().to_ascii_lowercase(), mime_type.into());
        self
    }

    /// Guess the MIME type of `identifier`, or `None` when the extension
    /// is missing or unknown.
    ///
    /// A trailing content-encoding suffix (`.gz`, `.br`, `.bz2`, `.xz`) is
    /// skipped unless a custom mapping claims it, so `app.js.gz` guesses as
    /// JavaScript.
    pub fn guess_type(&self, identifier: &str) -> Option<String> {
        let name = identifier.rsplit(['/', ':']).next().unwrap_or(identifier);
        self.guess_name(name)
    }

    fn guess_name(&self, name: &str) -> Option<String> {
        let (stem, extension) = split_extension(name)?;
        let extension = extension.to_ascii_lowercase();

        if let Some(mime) = self.custom.get(&extension) {
            return Some(mime.clone());
        }
        if ENCODING_SUFFIXES.contains(&extension.as_str()) {
            return self.guess_name(stem);
        }

        builtin_type(&extension).map(str::to_string)
    }
}

/// Suffixes naming a content encoding rather than a content type.
const ENCODING_SUFFIXES: &[&str] = &["gz", "br", "bz2", "xz"];

/// Split a file name into stem and extension. Dotfiles and trailing dots
/// have no extension.
fn split_extension(name: &str) -> Option<(&str, &str)> {
    let (stem, extension) = name.rsplit_once('.')?;
    if stem.is_empty() || extension.is_empty() {
        return None;
    }
    Some((stem, extension))
}

fn builtin_type(extension: &str) -> Option<&'static str> {
    let mime = match extension {
        // Text
        "html" | "htm" => "text/html",
        "css" => "text/css",
        "js" | "mjs" => "text/javascript",
        "json" | "map" => "application/json",
        "xml" => "application/xml",
        "txt" => "text/plain",
        "csv" => "text/csv",
        "md" => "text/markdown",

        // Images
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "svg" => "image/svg+xml",
        "webp" => "image/webp",
        "ico" => "image/vnd.microsoft.icon",
        "avif" => "image/avif",

        // Fonts
        "woff" => "font/woff",
        "woff2" => "font/woff2",
        "ttf" => "font/ttf",
        "otf" => "font/otf",
        "eot" => "application/vnd.ms-fontobject",

        // Documents and archives
        "pdf" => "application/pdf",
        "zip" => "application/zip",
        "tar" => "application/x-tar",

        // Media
        "mp3" => "audio/mpeg",
        "wav" => "audio/wav",
        "ogg" => "audio/ogg",
        "mp4" => "video/mp4",
        "webm" => "video/webm",

        // Web
        "wasm" => "application/wasm",
        "webmanifest" => "application/manifest+json",

        _ => return None,
    };
    Some(mime)
}
