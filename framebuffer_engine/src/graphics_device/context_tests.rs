/// Tests for RenderTargetCapabilities
///
/// The attachment limit decides how many color slots the target manager
/// binds, so its degrade rules are pinned down here.

use super::*;

#[test]
fn test_single_target_limits_to_one() {
    let caps = RenderTargetCapabilities::single_target();
    assert_eq!(caps.color_attachment_limit(0), 0);
    assert_eq!(caps.color_attachment_limit(1), 1);
    assert_eq!(caps.color_attachment_limit(3), 1);
}

#[test]
fn test_multiple_targets_respects_max() {
    let caps = RenderTargetCapabilities::multiple_targets(4);
    assert_eq!(caps.color_attachment_limit(3), 3);
    assert_eq!(caps.color_attachment_limit(4), 4);
    assert_eq!(caps.color_attachment_limit(8), 4);
}

#[test]
fn test_multiple_targets_zero_max_clamped_to_one() {
    let caps = RenderTargetCapabilities::multiple_targets(0);
    assert_eq!(caps.max_color_attachments, 1);
    assert_eq!(caps.color_attachment_limit(2), 1);
}

#[test]
fn test_default_is_single_target() {
    assert_eq!(RenderTargetCapabilities::default(), RenderTargetCapabilities::single_target());
}

#[test]
fn test_context_id_display() {
    assert_eq!(format!("{}", ContextId(3)), "context#3");
}
