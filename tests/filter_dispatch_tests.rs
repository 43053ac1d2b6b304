use std::path::{Path, PathBuf};
use std::sync::Mutex;

use polybot::errors::{BotError, BotResult};
use polybot::filter_dispatch::{dispatch_filters, FilterKind};
use polybot::image_filters::{derived_output_path, ImageFilters};
use polybot::reply::Reply;

/// Filter collaborator double that records invocations and can be told
/// to fail for specific filters.
struct FakeFilters {
    invoked: Mutex<Vec<FilterKind>>,
    fail_on: Vec<FilterKind>,
}

impl FakeFilters {
    fn new() -> Self {
        Self {
            invoked: Mutex::new(Vec::new()),
            fail_on: Vec::new(),
        }
    }

    fn failing_on(fail_on: Vec<FilterKind>) -> Self {
        Self {
            invoked: Mutex::new(Vec::new()),
            fail_on,
        }
    }

    fn invocations(&self) -> Vec<FilterKind> {
        self.invoked.lock().unwrap().clone()
    }
}

impl ImageFilters for FakeFilters {
    fn apply(&self, path: &Path, kind: FilterKind) -> BotResult<PathBuf> {
        self.invoked.lock().unwrap().push(kind);
        if self.fail_on.contains(&kind) {
            return Err(BotError::Filter("malformed image".to_string()));
        }
        Ok(derived_output_path(path, kind))
    }
}

#[test]
fn test_caption_with_two_filters_triggers_exactly_two_invocations() {
    let filters = FakeFilters::new();
    let replies = dispatch_filters(
        &filters,
        Path::new("/tmp/photo.jpg"),
        "please rotate and blur this",
    );

    assert_eq!(
        filters.invocations(),
        vec![FilterKind::Rotate, FilterKind::Blur]
    );
    assert_eq!(
        replies,
        vec![
            Reply::Photo(PathBuf::from("/tmp/photo_rotate.jpg")),
            Reply::Photo(PathBuf::from("/tmp/photo_blur.jpg")),
        ]
    );
}

#[test]
fn test_unrelated_caption_triggers_nothing() {
    let filters = FakeFilters::new();
    let replies = dispatch_filters(&filters, Path::new("/tmp/photo.jpg"), "do nothing special");

    assert!(filters.invocations().is_empty());
    assert!(replies.is_empty());
}

#[test]
fn test_replies_follow_vocabulary_order_not_caption_order() {
    let filters = FakeFilters::new();
    dispatch_filters(
        &filters,
        Path::new("/tmp/photo.jpg"),
        "segment then blur then rotate",
    );

    assert_eq!(
        filters.invocations(),
        vec![FilterKind::Rotate, FilterKind::Blur, FilterKind::Segment]
    );
}

#[test]
fn test_filter_failure_is_isolated_from_siblings() {
    let filters = FakeFilters::failing_on(vec![FilterKind::Rotate]);
    let replies = dispatch_filters(
        &filters,
        Path::new("/tmp/photo.jpg"),
        "rotate and blur please",
    );

    // Both filters ran despite the first one failing
    assert_eq!(
        filters.invocations(),
        vec![FilterKind::Rotate, FilterKind::Blur]
    );

    assert_eq!(replies.len(), 2);
    match &replies[0] {
        Reply::Text(text) => assert!(text.contains("rotate")),
        other => panic!("expected an error text reply, got {:?}", other),
    }
    assert_eq!(replies[1], Reply::Photo(PathBuf::from("/tmp/photo_blur.jpg")));
}

#[test]
fn test_every_filter_failing_still_reports_each_one() {
    let filters = FakeFilters::failing_on(FilterKind::ALL.to_vec());
    let replies = dispatch_filters(
        &filters,
        Path::new("/tmp/photo.jpg"),
        "rotate blur contour salt-n-pepper concat segment",
    );

    assert_eq!(filters.invocations().len(), FilterKind::ALL.len());
    assert!(replies
        .iter()
        .all(|reply| matches!(reply, Reply::Text(_))));
}
