//! # Filter Dispatch
//!
//! Maps a photo caption onto the fixed filter vocabulary and runs each
//! requested filter through the image-filter collaborator. Matching is
//! substring based and non-exclusive, and filters always run in the
//! fixed vocabulary order so the reply sequence is deterministic.

use std::path::Path;

use tracing::warn;

use crate::image_filters::ImageFilters;
use crate::reply::Reply;

/// One of the supported image filters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterKind {
    Rotate,
    Blur,
    Contour,
    SaltNPepper,
    Concat,
    Segment,
}

impl FilterKind {
    /// Fixed evaluation order. Replies are emitted in this order no
    /// matter where the tokens appear in the caption.
    pub const ALL: [FilterKind; 6] = [
        FilterKind::Rotate,
        FilterKind::Blur,
        FilterKind::Contour,
        FilterKind::SaltNPepper,
        FilterKind::Concat,
        FilterKind::Segment,
    ];

    /// Caption token that requests this filter
    pub fn token(self) -> &'static str {
        match self {
            FilterKind::Rotate => "rotate",
            FilterKind::Blur => "blur",
            FilterKind::Contour => "contour",
            FilterKind::SaltNPepper => "salt-n-pepper",
            FilterKind::Concat => "concat",
            FilterKind::Segment => "segment",
        }
    }
}

/// Find every filter requested by a caption, in evaluation order
pub fn requested_filters(caption: &str) -> Vec<FilterKind> {
    let caption = caption.to_lowercase();
    FilterKind::ALL
        .iter()
        .copied()
        .filter(|kind| caption.contains(kind.token()))
        .collect()
}

/// Run every requested filter against the downloaded photo.
///
/// Each filter succeeds or fails on its own: a failure becomes an error
/// text reply for that filter and the remaining filters still run. A
/// caption matching no filter produces no replies at all.
pub fn dispatch_filters(
    filters: &dyn ImageFilters,
    photo_path: &Path,
    caption: &str,
) -> Vec<Reply> {
    requested_filters(caption)
        .into_iter()
        .map(|kind| match filters.apply(photo_path, kind) {
            Ok(output_path) => Reply::Photo(output_path),
            Err(e) => {
                warn!(filter = kind.token(), error = %e, "Image filter failed");
                Reply::Text(format!(
                    "Sorry, I couldn't apply the {} filter to your photo.",
                    kind.token()
                ))
            }
        })
        .collect()
}
