//! Image CDN URLs for uploaded assets.

use crate::model::ImageRef;

const CDN_BASE: &str = "https://cdn.sanity.io/images";

/// An asset reference split into its parts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetId<'a> {
    pub id: &'a str,
    pub width: u32,
    pub height: u32,
    pub format: &'a str,
}

/// Parses `image-<id>-<w>x<h>-<ext>`.
pub fn parse_asset_ref(reference: &str) -> Option<AssetId<'_>> {
    let rest = reference.strip_prefix("image-")?;
    let (rest, format) = rest.rsplit_once('-')?;
    let (id, dims) = rest.rsplit_once('-')?;
    let (w, h) = dims.split_once('x')?;
    if id.is_empty() || format.is_empty() {
        return None;
    }
    Some(AssetId {
        id,
        width: w.parse().ok()?,
        height: h.parse().ok()?,
        format,
    })
}

/// Builds CDN URLs for one project/dataset.
#[derive(Debug, Clone)]
pub struct ImageUrlBuilder {
    project_id: String,
    dataset: String,
}

impl ImageUrlBuilder {
    pub fn new(project_id: impl Into<String>, dataset: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
            dataset: dataset.into(),
        }
    }

    /// URL for `image` resized to `width`×`height`, or `None` if the image
    /// has no usable asset reference.
    pub fn url(&self, image: &ImageRef, width: u32, height: u32) -> Option<String> {
        let asset = parse_asset_ref(image.asset_ref()?)?;
        Some(format!(
            "{CDN_BASE}/{}/{}/{}-{}x{}.{}?w={width}&h={height}",
            self.project_id, self.dataset, asset.id, asset.width, asset.height, asset.format
        ))
    }
}
