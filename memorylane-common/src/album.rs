//! Album content model — the read-only Content Store
//!
//! An album is a fixed, ordered sequence of two-sided sheets loaded once
//! at startup from a TOML file. The flipbook engine treats pages as
//! opaque content descriptors; renderers must tolerate empty photo lists
//! and absent optional fields by drawing nothing for that slot.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Page layout kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Layout {
    SinglePhoto,
    MultiPhoto,
    Collage,
    TextFocus,
    Cover,
}

/// Background patterns drawn behind page content
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Pattern {
    Dots,
    Grid,
    Hearts,
    #[default]
    None,
}

/// Decorative sticker kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StickerKind {
    Star,
    Heart,
    Flower,
    Emoji,
    Tape,
    Rose,
    Lips,
    Letter,
    Arrow,
    Sparkle,
    Bow,
    Butterfly,
    Swirl,
    Ticket,
}

/// A decorative sticker placed on a page
///
/// Coordinates are percentages of the page; rotation is degrees.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sticker {
    pub id: String,
    pub kind: StickerKind,
    /// Literal content for emoji stickers
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    pub x: f32,
    pub y: f32,
    #[serde(default)]
    pub rotation: f32,
    #[serde(default = "default_scale")]
    pub scale: f32,
}

fn default_scale() -> f32 {
    1.0
}

/// A photo slot on a page
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Photo {
    pub id: String,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    #[serde(default)]
    pub rotation: f32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<String>,
}

/// Content shown on one face of a sheet
///
/// Opaque to the flipbook engine; consumed only by the page renderer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page {
    pub id: String,
    pub layout: Layout,
    #[serde(default)]
    pub photos: Vec<Photo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_text: Option<String>,
    #[serde(default)]
    pub stickers: Vec<Sticker>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bg_color: Option<String>,
    #[serde(default)]
    pub pattern: Pattern,
}

/// One physical leaf of the book with two visible faces
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sheet {
    pub front: Page,
    pub back: Page,
}

/// The full scrapbook: title plus an ordered, immutable sheet sequence
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Album {
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default)]
    pub sheets: Vec<Sheet>,
}

fn default_title() -> String {
    "MemoryLane".to_string()
}

impl Album {
    /// Parse an album from TOML contents
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let album: Album = toml::from_str(contents)?;
        album.validate()?;
        Ok(album)
    }

    /// Load an album from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            Error::Album(format!("cannot read {}: {}", path.display(), e))
        })?;
        Self::from_toml_str(&contents)
    }

    /// Number of sheets (N in navigation terms)
    ///
    /// An empty album is valid: position is then pinned at 0 and the book
    /// is simultaneously at its cover and its end.
    pub fn sheet_count(&self) -> usize {
        self.sheets.len()
    }

    /// Sheet at index, if in range
    pub fn sheet(&self, index: usize) -> Option<&Sheet> {
        self.sheets.get(index)
    }

    /// Structural validation
    ///
    /// Only duplicate page ids are rejected. Empty photo/sticker lists
    /// and absent text are fine: renderers draw nothing for those slots.
    fn validate(&self) -> Result<()> {
        let mut seen = std::collections::HashSet::new();
        for sheet in &self.sheets {
            for page in [&sheet.front, &sheet.back] {
                if !seen.insert(page.id.as_str()) {
                    return Err(Error::Album(format!("duplicate page id: {}", page.id)));
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minimal_sheet_toml(front_id: &str, back_id: &str) -> String {
        format!(
            r#"
[[sheets]]
[sheets.front]
id = "{front_id}"
layout = "text-focus"
text = "hello"

[sheets.back]
id = "{back_id}"
layout = "cover"
"#
        )
    }

    #[test]
    fn test_minimal_album_parses() {
        let album = Album::from_toml_str(&minimal_sheet_toml("f0", "b0")).unwrap();
        assert_eq!(album.sheet_count(), 1);
        assert_eq!(album.title, "MemoryLane");

        let sheet = album.sheet(0).unwrap();
        assert_eq!(sheet.front.layout, Layout::TextFocus);
        // Absent collections default to empty, not errors
        assert!(sheet.front.photos.is_empty());
        assert!(sheet.front.stickers.is_empty());
        assert_eq!(sheet.back.pattern, Pattern::None);
    }

    #[test]
    fn test_empty_album_is_valid() {
        let album = Album::from_toml_str("title = \"Empty\"").unwrap();
        assert_eq!(album.sheet_count(), 0);
        assert!(album.sheet(0).is_none());
    }

    #[test]
    fn test_duplicate_page_ids_rejected() {
        let toml = format!(
            "{}{}",
            minimal_sheet_toml("p1", "p2"),
            minimal_sheet_toml("p1", "p3")
        );
        let err = Album::from_toml_str(&toml).unwrap_err();
        assert!(matches!(err, Error::Album(_)));
    }

    #[test]
    fn test_photo_defaults() {
        let toml = r#"
[[sheets]]
[sheets.front]
id = "f"
layout = "single-photo"
[[sheets.front.photos]]
id = "ph1"
url = "https://example.com/a.jpg"

[sheets.back]
id = "b"
layout = "text-focus"
"#;
        let album = Album::from_toml_str(toml).unwrap();
        let photo = &album.sheet(0).unwrap().front.photos[0];
        assert_eq!(photo.rotation, 0.0);
        assert!(photo.caption.is_none());
        assert!(photo.width.is_none());
    }

    #[test]
    fn test_sticker_scale_defaults_to_one() {
        let toml = r#"
[[sheets]]
[sheets.front]
id = "f"
layout = "cover"
[[sheets.front.stickers]]
id = "s1"
kind = "heart"
x = 50.0
y = 40.0

[sheets.back]
id = "b"
layout = "text-focus"
"#;
        let album = Album::from_toml_str(toml).unwrap();
        let sticker = &album.sheet(0).unwrap().front.stickers[0];
        assert_eq!(sticker.kind, StickerKind::Heart);
        assert_eq!(sticker.scale, 1.0);
        assert_eq!(sticker.rotation, 0.0);
    }
}
