//! Image URL resolution.
//!
//! A point can reference images through `photoUrls` and `photoIds`; each
//! entry is either an absolute URL or a path relative to the backend file
//! storage. Relative paths are served through the local file proxy, so they
//! are rewritten to `<proxy_base>/<path>`.

use std::collections::HashSet;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::points::{NormalizedChild, NormalizedPoint};

/// Default prefix of the local file proxy route.
pub const DEFAULT_FILE_PROXY_BASE: &str = "/api/files";

/// Which photo list wins when both are present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImagePrecedence {
    /// `photoUrls` first, `photoIds` as fallback.
    #[default]
    PhotoUrls,
    /// `photoIds` first, `photoUrls` as fallback.
    PhotoIds,
}

/// Unknown precedence name in configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown image precedence `{0}`; expected `photo_urls` or `photo_ids`")]
pub struct UnknownPrecedence(pub String);

impl FromStr for ImagePrecedence {
    type Err = UnknownPrecedence;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "photo_urls" | "photourls" => Ok(Self::PhotoUrls),
            "photo_ids" | "photoids" => Ok(Self::PhotoIds),
            _ => Err(UnknownPrecedence(s.to_owned())),
        }
    }
}

/// Borrowed view of a point's two photo lists.
#[derive(Debug, Clone, Copy)]
pub struct PhotoSources<'a> {
    pub photo_urls: &'a [Option<String>],
    pub photo_ids: &'a [Option<String>],
}

impl<'a> PhotoSources<'a> {
    /// Photo lists of a normalized point.
    pub fn of(point: &'a NormalizedPoint) -> Self {
        Self {
            photo_urls: &point.photo_urls,
            photo_ids: &point.photo_ids,
        }
    }
}

/// Resolves photo references into URLs the browser can load.
///
/// # Examples
/// ```
/// use historian::domain::images::{ImagePrecedence, ImageResolver, PhotoSources};
///
/// let resolver = ImageResolver::new("/api/files", ImagePrecedence::PhotoUrls);
/// let urls = vec![Some("a.jpg".to_owned())];
/// let ids = vec![Some("http://x/b.jpg".to_owned())];
/// let sources = PhotoSources { photo_urls: &urls, photo_ids: &ids };
/// assert_eq!(resolver.preview(sources).as_deref(), Some("/api/files/a.jpg"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageResolver {
    proxy_base: String,
    precedence: ImagePrecedence,
}

impl Default for ImageResolver {
    fn default() -> Self {
        Self::new(DEFAULT_FILE_PROXY_BASE, ImagePrecedence::default())
    }
}

impl ImageResolver {
    /// Build a resolver for the given proxy prefix.
    ///
    /// A trailing `/` on the prefix is ignored.
    pub fn new(proxy_base: impl Into<String>, precedence: ImagePrecedence) -> Self {
        let proxy_base = proxy_base.into();
        Self {
            proxy_base: proxy_base.trim_end_matches('/').to_owned(),
            precedence,
        }
    }

    /// Resolve a single entry; `None` for empty entries.
    pub fn resolve(&self, entry: &str) -> Option<String> {
        let entry = entry.trim();
        if entry.is_empty() {
            return None;
        }
        if is_absolute(entry) {
            return Some(entry.to_owned());
        }
        Some(format!(
            "{}/{}",
            self.proxy_base,
            entry.trim_start_matches('/')
        ))
    }

    fn ordered<'a>(&self, sources: PhotoSources<'a>) -> [&'a [Option<String>]; 2] {
        match self.precedence {
            ImagePrecedence::PhotoUrls => [sources.photo_urls, sources.photo_ids],
            ImagePrecedence::PhotoIds => [sources.photo_ids, sources.photo_urls],
        }
    }

    fn resolve_all<'s>(
        &'s self,
        entries: &'s [Option<String>],
    ) -> impl Iterator<Item = String> + 's {
        entries
            .iter()
            .filter_map(|entry| entry.as_deref())
            .filter_map(|entry| self.resolve(entry))
    }

    /// First usable image from the highest-priority non-empty source.
    ///
    /// A non-empty source is chosen even when none of its entries resolve;
    /// the other source is only consulted when the preferred list is empty.
    pub fn preview(&self, sources: PhotoSources<'_>) -> Option<String> {
        let entries = self
            .ordered(sources)
            .into_iter()
            .find(|entries| !entries.is_empty())?;
        self.resolve_all(entries).next()
    }

    /// All usable images from both sources, de-duplicated in first-seen order.
    pub fn gallery(&self, sources: PhotoSources<'_>) -> Vec<String> {
        let mut seen = HashSet::new();
        self.ordered(sources)
            .into_iter()
            .flat_map(|entries| self.resolve_all(entries))
            .filter(|url| seen.insert(url.clone()))
            .collect()
    }

    /// Fill in a point's preview image.
    pub fn attach_preview(&self, mut point: NormalizedPoint) -> NormalizedPoint {
        point.image_url = self.preview(PhotoSources::of(&point));
        point
    }

    /// Fill in a sub-point's preview image from its `photoUrls`.
    pub fn attach_child_preview(
        &self,
        mut child: NormalizedChild,
        photo_urls: &[Option<String>],
    ) -> NormalizedChild {
        child.image_url = self.resolve_all(photo_urls).next();
        child
    }
}

fn is_absolute(entry: &str) -> bool {
    entry.starts_with("http://") || entry.starts_with("https://")
}
