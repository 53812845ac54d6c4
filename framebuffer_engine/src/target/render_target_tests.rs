/// Tests for RenderTarget
///
/// These tests validate creation, identity, and that every observable
/// change (and only an observable change) bumps the revision.

use super::*;
use crate::error::Error;

fn target_with(textures: &[u64]) -> RenderTarget {
    let mut desc = RenderTargetDesc::new(256, 256);
    for &t in textures {
        desc = desc.with_color(TextureId(t));
    }
    RenderTarget::new(desc).unwrap()
}

// ============================================================================
// Tests: Creation
// ============================================================================

#[test]
fn test_new_render_target_starts_at_revision_one() {
    let target = target_with(&[1]);
    assert_eq!(target.revision(), 1);
    assert_eq!(target.width(), 256);
    assert_eq!(target.height(), 256);
    assert_eq!(target.size(), UVec2::new(256, 256));
    assert_eq!(target.color_attachments(), &[TextureId(1)]);
    assert!(!target.depth());
    assert!(!target.stencil());
}

#[test]
fn test_render_target_ids_are_unique() {
    let a = target_with(&[1]);
    let b = target_with(&[1]);
    assert_ne!(a.id(), b.id());
}

#[test]
fn test_zero_size_fails() {
    let result = RenderTarget::new(RenderTargetDesc::new(0, 64));
    assert!(matches!(result, Err(Error::PreconditionFailed(_))));
}

#[test]
fn test_desc_builder() {
    let desc = RenderTargetDesc::new(32, 16)
        .with_color(TextureId(4))
        .with_color(TextureId(5))
        .with_depth()
        .with_stencil();
    let target = RenderTarget::new(desc).unwrap();

    assert_eq!(target.color_attachments(), &[TextureId(4), TextureId(5)]);
    assert!(target.depth());
    assert!(target.stencil());
}

#[test]
fn test_is_empty() {
    let mut target = RenderTarget::new(RenderTargetDesc::new(8, 8)).unwrap();
    assert!(target.is_empty());

    target.set_depth(true);
    assert!(!target.is_empty());
}

// ============================================================================
// Tests: Revision
// ============================================================================

#[test]
fn test_set_color_attachments_bumps_revision() {
    let mut target = target_with(&[1]);
    target.set_color_attachments(vec![TextureId(2)]);
    assert_eq!(target.revision(), 2);
    assert_eq!(target.color_attachments(), &[TextureId(2)]);
}

#[test]
fn test_identical_attachments_do_not_bump_revision() {
    let mut target = target_with(&[1, 2]);
    target.set_color_attachments(vec![TextureId(1), TextureId(2)]);
    target.set_color_attachment(0, TextureId(1)).unwrap();
    target.set_depth(false);
    target.set_stencil(false);
    target.resize(256, 256).unwrap();
    assert_eq!(target.revision(), 1);
}

#[test]
fn test_set_color_attachment_replace_and_append() {
    let mut target = target_with(&[1]);

    target.set_color_attachment(0, TextureId(9)).unwrap();
    assert_eq!(target.revision(), 2);

    target.set_color_attachment(1, TextureId(10)).unwrap();
    assert_eq!(target.revision(), 3);
    assert_eq!(target.color_attachments(), &[TextureId(9), TextureId(10)]);
}

#[test]
fn test_set_color_attachment_gap_fails() {
    let mut target = target_with(&[1]);
    let result = target.set_color_attachment(3, TextureId(2));

    assert!(matches!(result, Err(Error::PreconditionFailed(_))));
    assert_eq!(target.revision(), 1);
}

#[test]
fn test_depth_stencil_changes_bump_revision() {
    let mut target = target_with(&[1]);
    target.set_depth(true);
    target.set_stencil(true);
    assert_eq!(target.revision(), 3);
}

#[test]
fn test_clear_color_attachments() {
    let mut target = target_with(&[1, 2]);
    target.clear_color_attachments();
    assert!(target.color_attachments().is_empty());
    assert_eq!(target.revision(), 2);

    // Already empty: no bump
    target.clear_color_attachments();
    assert_eq!(target.revision(), 2);
}

#[test]
fn test_resize_bumps_revision() {
    let mut target = target_with(&[1]);
    target.resize(512, 128).unwrap();
    assert_eq!(target.size(), UVec2::new(512, 128));
    assert_eq!(target.revision(), 2);
}

#[test]
fn test_resize_to_zero_fails_without_change() {
    let mut target = target_with(&[1]);
    assert!(target.resize(0, 0).is_err());
    assert_eq!(target.size(), UVec2::new(256, 256));
    assert_eq!(target.revision(), 1);
}

#[test]
fn test_revision_strictly_increases() {
    let mut target = target_with(&[]);
    let mut last = target.revision();
    for i in 0..16 {
        target.add_color_attachment(TextureId(i));
        assert!(target.revision() > last);
        last = target.revision();
    }
}
