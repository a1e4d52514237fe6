//! Anchored position math.
//!
//! [`compute_position`] resolves where an overlay element should sit relative
//! to an anchor inside a container: primary-axis side selection with optional
//! flip to the opposite side, cross-axis alignment with optional snap back
//! into the container, and the tip (arrow) offsets along the anchored edge.
//!
//! The function is pure. Results are expressed in container-local
//! coordinates as a `left`/`top` position plus `margin_left`/`margin_top`
//! adjustments, matching an absolutely-positioned element whose margins
//! carry the configured offsets.

use crate::geometry::Rect;
use crate::placement::Placement;

/// Sentinel for a tip offset that should be left unset (`auto`).
pub const TIP_AUTO: f32 = -1.0;

/// Half the size of the tip triangle, in pixels.
const TIP_HALF_SIZE: f32 = 6.0;

/// Minimum distance between the tip and the overlay corner, in pixels.
const TIP_PADDING: f32 = 12.0;

/// Options controlling [`compute_position`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PositionOptions {
    /// The preferred placement relative to the anchor.
    pub placement: Placement,
    /// Offset in pixels along the primary placement direction.
    pub offset: f32,
    /// Offset in pixels along the secondary placement direction.
    pub cross_offset: f32,
    /// Allow flipping to the opposite side when the preferred side overflows
    /// and the opposite side has strictly more room.
    pub should_flip: bool,
    /// Snap the cross axis back inside the container when the element
    /// overflows it.
    pub cross_snap: bool,
}

impl Default for PositionOptions {
    fn default() -> Self {
        Self {
            placement: Placement::Bottom,
            offset: 0.0,
            cross_offset: 0.0,
            should_flip: true,
            cross_snap: true,
        }
    }
}

/// The resolved position of an overlay element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PositionResult {
    /// Container-local `left` of the element.
    pub left: f32,
    /// Container-local `top` of the element.
    pub top: f32,
    /// Margin applied on top of `left` (carries the cross or primary offset).
    pub margin_left: f32,
    /// Margin applied on top of `top`.
    pub margin_top: f32,
    /// The placement actually used, after any flip.
    pub final_placement: Placement,
    /// Tip offsets along each edge, [`TIP_AUTO`] when unset.
    pub tip_left: f32,
    pub tip_right: f32,
    pub tip_top: f32,
    pub tip_bottom: f32,
}

impl Default for PositionResult {
    fn default() -> Self {
        Self {
            left: 0.0,
            top: 0.0,
            margin_left: 0.0,
            margin_top: 0.0,
            final_placement: Placement::Bottom,
            tip_left: TIP_AUTO,
            tip_right: TIP_AUTO,
            tip_top: TIP_AUTO,
            tip_bottom: TIP_AUTO,
        }
    }
}

fn cross_snap_horizontally(result: &mut PositionResult, screen: Rect, element: Rect) {
    if element.width < screen.width {
        if result.left + result.margin_left < 0.0 {
            result.left = -result.margin_left;
        } else if result.left + result.margin_left + element.width > screen.width {
            let snapped = screen.width - element.width - result.margin_left;
            // Never snap past the container start.
            if snapped >= 0.0 {
                result.left = snapped;
            }
        }
    }
}

fn cross_snap_vertically(result: &mut PositionResult, screen: Rect, element: Rect) {
    if element.height < screen.height {
        if result.top + result.margin_top < 0.0 {
            result.top = -result.margin_top;
        } else if result.top + result.margin_top + element.height > screen.height {
            let snapped = screen.height - element.height - result.margin_top;
            if snapped >= 0.0 {
                result.top = snapped;
            }
        }
    }
}

fn resolve_bottom(
    screen: Rect,
    element: Rect,
    anchor: Rect,
    options: &PositionOptions,
    result: &mut PositionResult,
) {
    let below_top = anchor.bottom();
    let above_top = anchor.y - element.height;
    let below_space = screen.height - anchor.bottom();
    let above_space = anchor.y;

    if options.should_flip
        && below_top + element.height + options.offset > screen.height
        && below_space < above_space
    {
        result.top = above_top;
        result.margin_top = -options.offset;
        result.final_placement = options.placement.mirrored();
    } else {
        result.top = below_top;
        result.margin_top = options.offset;
    }
}

fn resolve_top(
    screen: Rect,
    element: Rect,
    anchor: Rect,
    options: &PositionOptions,
    result: &mut PositionResult,
) {
    let below_top = anchor.bottom();
    let above_top = anchor.y - element.height;
    let below_space = screen.height - anchor.bottom();
    // Free space above is measured from the element's current y, not the
    // container top.
    let above_space = anchor.y - element.y;

    if options.should_flip && above_top - options.offset < 0.0 && above_space < below_space {
        result.top = below_top;
        result.margin_top = options.offset;
        result.final_placement = options.placement.mirrored();
    } else {
        result.top = above_top;
        result.margin_top = -options.offset;
    }
}

fn resolve_left(
    screen: Rect,
    element: Rect,
    anchor: Rect,
    options: &PositionOptions,
    result: &mut PositionResult,
) {
    let left_side = anchor.x - element.width;
    let right_side = anchor.right();
    let left_space = anchor.x;
    let right_space = screen.width - anchor.right();

    if options.should_flip && left_side - options.offset < 0.0 && left_space < right_space {
        result.left = right_side;
        result.margin_left = options.offset;
        result.final_placement = options.placement.mirrored();
    } else {
        result.left = left_side;
        result.margin_left = -options.offset;
    }
}

fn resolve_right(
    screen: Rect,
    element: Rect,
    anchor: Rect,
    options: &PositionOptions,
    result: &mut PositionResult,
) {
    let left_side = anchor.x - element.width;
    let right_side = anchor.right();
    let left_space = anchor.x;
    let right_space = screen.width - anchor.right();

    if options.should_flip
        && right_side + element.width + options.offset > screen.width
        && right_space < left_space
    {
        result.left = left_side;
        result.margin_left = -options.offset;
        result.final_placement = options.placement.mirrored();
    } else {
        result.left = right_side;
        result.margin_left = options.offset;
    }
}

/// Compute the position of `element` anchored to `anchor` inside `container`.
///
/// `element` and `anchor` are world rects; `container` is the world rect of
/// the parent the element is positioned in. The result is container-local.
///
/// Degenerate geometry (NaN sizes, as seen on elements that have not been
/// laid out yet) yields the default result with the preferred placement.
pub fn compute_position(
    element: Rect,
    anchor: Rect,
    container: Rect,
    options: &PositionOptions,
) -> PositionResult {
    let mut result = PositionResult {
        final_placement: options.placement,
        ..Default::default()
    };

    let anchor = anchor.translate(-container.origin());
    let screen = Rect::from_origin_size(crate::geometry::Point::ORIGIN, container.size());

    let half_delta_width = (element.width - anchor.width) * 0.5;
    let half_delta_height = (element.height - anchor.height) * 0.5;
    if half_delta_width.is_nan() || half_delta_height.is_nan() {
        return result;
    }

    use Placement::*;
    match options.placement {
        Bottom => {
            result.left = anchor.x - half_delta_width;
            result.margin_left = options.cross_offset;
            resolve_bottom(screen, element, anchor, options, &mut result);
            if options.cross_snap {
                cross_snap_horizontally(&mut result, screen, element);
            }
        }
        BottomLeft | BottomStart => {
            result.left = anchor.x;
            result.margin_left = options.cross_offset;
            resolve_bottom(screen, element, anchor, options, &mut result);
            if options.cross_snap {
                cross_snap_horizontally(&mut result, screen, element);
            }
        }
        BottomRight | BottomEnd => {
            result.left = anchor.right() - element.width;
            result.margin_left = -options.cross_offset;
            resolve_bottom(screen, element, anchor, options, &mut result);
            if options.cross_snap {
                cross_snap_horizontally(&mut result, screen, element);
            }
        }
        Top => {
            result.left = anchor.x - half_delta_width;
            result.margin_left = options.cross_offset;
            resolve_top(screen, element, anchor, options, &mut result);
            if options.cross_snap {
                cross_snap_horizontally(&mut result, screen, element);
            }
        }
        TopLeft | TopStart => {
            result.left = anchor.x;
            result.margin_left = options.cross_offset;
            resolve_top(screen, element, anchor, options, &mut result);
            if options.cross_snap {
                cross_snap_horizontally(&mut result, screen, element);
            }
        }
        TopRight | TopEnd => {
            result.left = anchor.right() - element.width;
            result.margin_left = -options.cross_offset;
            resolve_top(screen, element, anchor, options, &mut result);
            if options.cross_snap {
                cross_snap_horizontally(&mut result, screen, element);
            }
        }
        Left | Start => {
            result.top = anchor.y - half_delta_height;
            result.margin_top = options.cross_offset;
            resolve_left(screen, element, anchor, options, &mut result);
            if options.cross_snap {
                cross_snap_vertically(&mut result, screen, element);
            }
        }
        LeftTop | StartTop => {
            result.top = anchor.y;
            result.margin_top = options.cross_offset;
            resolve_left(screen, element, anchor, options, &mut result);
            if options.cross_snap {
                cross_snap_vertically(&mut result, screen, element);
            }
        }
        LeftBottom | StartBottom => {
            result.top = anchor.bottom() - element.height;
            result.margin_top = -options.cross_offset;
            resolve_left(screen, element, anchor, options, &mut result);
            if options.cross_snap {
                cross_snap_vertically(&mut result, screen, element);
            }
        }
        Right | End => {
            result.top = anchor.y - half_delta_height;
            result.margin_top = options.cross_offset;
            resolve_right(screen, element, anchor, options, &mut result);
            if options.cross_snap {
                cross_snap_vertically(&mut result, screen, element);
            }
        }
        RightTop | EndTop => {
            result.top = anchor.y;
            result.margin_top = options.cross_offset;
            resolve_right(screen, element, anchor, options, &mut result);
            if options.cross_snap {
                cross_snap_vertically(&mut result, screen, element);
            }
        }
        RightBottom | EndBottom => {
            result.top = anchor.bottom() - element.height;
            result.margin_top = -options.cross_offset;
            resolve_right(screen, element, anchor, options, &mut result);
            if options.cross_snap {
                cross_snap_vertically(&mut result, screen, element);
            }
        }
        // Inside placements are anchor-relative only: no flip, no snap.
        InsideTopStart => {
            result.top = anchor.y;
            result.margin_top = options.offset;
            result.left = anchor.x;
            result.margin_left = options.cross_offset;
        }
        InsideTop => {
            result.top = anchor.y;
            result.margin_top = options.offset;
            result.left = anchor.center().x - element.width * 0.5;
            result.margin_left = options.cross_offset;
        }
        InsideTopEnd => {
            result.top = anchor.y;
            result.margin_top = options.offset;
            result.left = anchor.right() - element.width;
            result.margin_left = -options.cross_offset;
        }
        InsideBottomStart => {
            result.top = anchor.bottom() - element.height;
            result.margin_top = -options.offset;
            result.left = anchor.x;
            result.margin_left = options.cross_offset;
        }
        InsideBottom => {
            result.top = anchor.bottom() - element.height;
            result.margin_top = -options.offset;
            result.left = anchor.center().x - element.width * 0.5;
            result.margin_left = options.cross_offset;
        }
        InsideBottomEnd => {
            result.top = anchor.bottom() - element.height;
            result.margin_top = -options.offset;
            result.left = anchor.right() - element.width;
            result.margin_left = -options.cross_offset;
        }
        InsideStart => {
            result.top = anchor.center().y - element.height * 0.5;
            result.margin_top = options.cross_offset;
            result.left = anchor.x;
            result.margin_left = options.offset;
        }
        InsideEnd => {
            result.top = anchor.center().y - element.height * 0.5;
            result.margin_top = options.cross_offset;
            result.left = anchor.right() - element.width;
            result.margin_left = -options.offset;
        }
        InsideCenter => {
            result.top = anchor.center().y - element.height * 0.5;
            result.margin_top = options.cross_offset;
            result.left = anchor.center().x - element.width * 0.5;
            result.margin_left = options.offset;
        }
    }

    apply_tip(&mut result, element, anchor);

    result
}

/// Clamp with `Mathf.Clamp` semantics: unlike `f32::clamp`, this does not
/// panic when `min > max` (e.g. an element smaller than `4 * TIP_PADDING`).
fn tip_clamp(value: f32, min: f32, max: f32) -> f32 {
    if value < min {
        min
    } else if value > max {
        max
    } else {
        value
    }
}

/// Place the tip along the edge facing the anchor, clamped away from the
/// overlay corners. Inside placements have no tip.
fn apply_tip(result: &mut PositionResult, element: Rect, anchor: Rect) {
    let placement = result.final_placement;
    if placement.is_bottom() {
        result.tip_top = TIP_HALF_SIZE;
        result.tip_bottom = TIP_AUTO;
        result.tip_left = tip_clamp(
            anchor.center().x - (result.left + result.margin_left),
            TIP_PADDING * 2.0,
            element.width - TIP_PADDING * 2.0,
        );
        result.tip_right = TIP_AUTO;
    } else if placement.is_top() {
        result.tip_top = TIP_AUTO;
        result.tip_bottom = TIP_HALF_SIZE;
        result.tip_left = tip_clamp(
            anchor.center().x - (result.left + result.margin_left),
            TIP_PADDING * 2.0,
            element.width - TIP_PADDING * 2.0,
        );
        result.tip_right = TIP_AUTO;
    } else if placement.is_left() {
        result.tip_top = tip_clamp(
            anchor.center().y - (result.top + result.margin_top),
            TIP_PADDING * 2.0,
            element.height - TIP_PADDING * 2.0,
        );
        result.tip_bottom = TIP_AUTO;
        result.tip_left = TIP_AUTO;
        result.tip_right = TIP_HALF_SIZE;
    } else if placement.is_right() {
        result.tip_top = tip_clamp(
            anchor.center().y - (result.top + result.margin_top),
            TIP_PADDING * 2.0,
            element.height - TIP_PADDING * 2.0,
        );
        result.tip_bottom = TIP_AUTO;
        result.tip_left = TIP_HALF_SIZE;
        result.tip_right = TIP_AUTO;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONTAINER: Rect = Rect::new(0.0, 0.0, 400.0, 400.0);
    const ANCHOR: Rect = Rect::new(100.0, 100.0, 50.0, 50.0);

    fn options(placement: Placement) -> PositionOptions {
        PositionOptions {
            placement,
            ..Default::default()
        }
    }

    #[test]
    fn bottom_placement_centers_below_anchor() {
        let element = Rect::new(0.0, 0.0, 80.0, 30.0);
        let result = compute_position(element, ANCHOR, CONTAINER, &options(Placement::Bottom));
        assert_eq!(result.top, 150.0);
        assert_eq!(result.left, 85.0);
        assert_eq!(result.final_placement, Placement::Bottom);
        assert_eq!(result.margin_top, 0.0);
        assert_eq!(result.margin_left, 0.0);
    }

    #[test]
    fn bottom_tip_points_at_anchor_center() {
        let element = Rect::new(0.0, 0.0, 80.0, 30.0);
        let result = compute_position(element, ANCHOR, CONTAINER, &options(Placement::Bottom));
        assert_eq!(result.tip_top, 6.0);
        assert_eq!(result.tip_bottom, TIP_AUTO);
        assert_eq!(result.tip_left, 40.0); // anchor center 125 - left 85
        assert_eq!(result.tip_right, TIP_AUTO);
    }

    #[test]
    fn no_flip_when_both_sides_overflow_but_preferred_is_not_worse() {
        // Element of height 300 overflows below, but above has even less
        // room (100 vs 250), so the placement must not flip.
        let element = Rect::new(0.0, 0.0, 80.0, 300.0);
        let result = compute_position(element, ANCHOR, CONTAINER, &options(Placement::Bottom));
        assert_eq!(result.final_placement, Placement::Bottom);
        assert_eq!(result.top, 150.0);
    }

    #[test]
    fn bottom_flips_to_top_when_above_has_more_room() {
        let anchor = Rect::new(100.0, 300.0, 50.0, 50.0);
        let element = Rect::new(0.0, 0.0, 80.0, 100.0);
        let result = compute_position(element, anchor, CONTAINER, &options(Placement::Bottom));
        assert_eq!(result.final_placement, Placement::Top);
        assert_eq!(result.top, 200.0); // anchor top 300 - element height 100
        assert_eq!(result.margin_top, -0.0);
    }

    #[test]
    fn flip_disabled_keeps_preferred_side() {
        let anchor = Rect::new(100.0, 300.0, 50.0, 50.0);
        let element = Rect::new(0.0, 0.0, 80.0, 100.0);
        let opts = PositionOptions {
            placement: Placement::Bottom,
            should_flip: false,
            ..Default::default()
        };
        let result = compute_position(element, anchor, CONTAINER, &opts);
        assert_eq!(result.final_placement, Placement::Bottom);
        assert_eq!(result.top, 350.0);
    }

    #[test]
    fn aligned_variants_flip_within_their_family() {
        let anchor = Rect::new(100.0, 300.0, 50.0, 50.0);
        let element = Rect::new(0.0, 0.0, 80.0, 100.0);
        let result =
            compute_position(element, anchor, CONTAINER, &options(Placement::BottomStart));
        assert_eq!(result.final_placement, Placement::TopStart);
        assert_eq!(result.left, 100.0); // start alignment survives the flip
    }

    #[test]
    fn right_flips_to_left_when_overflowing() {
        let anchor = Rect::new(330.0, 100.0, 50.0, 50.0);
        let element = Rect::new(0.0, 0.0, 100.0, 30.0);
        let result = compute_position(element, anchor, CONTAINER, &options(Placement::Right));
        assert_eq!(result.final_placement, Placement::Left);
        assert_eq!(result.left, 230.0); // anchor left 330 - element width 100
    }

    #[test]
    fn top_family_measures_space_from_element_y() {
        // The free space above the anchor is measured from the element's
        // current y. With the element already sitting at y=90 the space above
        // shrinks to 10, which is less than the 250 below, so Top flips.
        let element = Rect::new(0.0, 90.0, 80.0, 120.0);
        let result = compute_position(element, ANCHOR, CONTAINER, &options(Placement::Top));
        assert_eq!(result.final_placement, Placement::Bottom);
        assert_eq!(result.top, 150.0);
    }

    #[test]
    fn cross_snap_keeps_element_inside_container() {
        // Anchor close to the right edge; centered alignment would spill out.
        let anchor = Rect::new(370.0, 100.0, 20.0, 20.0);
        let element = Rect::new(0.0, 0.0, 100.0, 30.0);
        let result = compute_position(element, anchor, CONTAINER, &options(Placement::Bottom));
        let x = result.left + result.margin_left;
        assert!(x >= 0.0, "left edge {x} outside container");
        assert!(
            x + element.width <= CONTAINER.width,
            "right edge {} outside container",
            x + element.width
        );
    }

    #[test]
    fn cross_snap_disabled_leaves_overflow() {
        let anchor = Rect::new(370.0, 100.0, 20.0, 20.0);
        let element = Rect::new(0.0, 0.0, 100.0, 30.0);
        let opts = PositionOptions {
            placement: Placement::Bottom,
            cross_snap: false,
            ..Default::default()
        };
        let result = compute_position(element, anchor, CONTAINER, &opts);
        assert!(result.left + result.margin_left + element.width > CONTAINER.width);
    }

    #[test]
    fn cross_snap_skips_elements_wider_than_container() {
        let element = Rect::new(0.0, 0.0, 500.0, 30.0);
        let result = compute_position(element, ANCHOR, CONTAINER, &options(Placement::Bottom));
        // Wider than the container: snapping is meaningless, keep centered.
        assert_eq!(result.left, 100.0 - (500.0 - 50.0) * 0.5);
    }

    #[test]
    fn container_origin_is_subtracted() {
        let container = Rect::new(50.0, 50.0, 400.0, 400.0);
        let anchor = Rect::new(150.0, 150.0, 50.0, 50.0);
        let element = Rect::new(0.0, 0.0, 80.0, 30.0);
        let result = compute_position(element, anchor, container, &options(Placement::Bottom));
        assert_eq!(result.top, 150.0);
        assert_eq!(result.left, 85.0);
    }

    #[test]
    fn offsets_land_in_margins() {
        let element = Rect::new(0.0, 0.0, 80.0, 30.0);
        let opts = PositionOptions {
            placement: Placement::Bottom,
            offset: 8.0,
            cross_offset: 4.0,
            ..Default::default()
        };
        let result = compute_position(element, ANCHOR, CONTAINER, &opts);
        assert_eq!(result.margin_top, 8.0);
        assert_eq!(result.margin_left, 4.0);
    }

    #[test]
    fn end_aligned_variants_negate_cross_offset() {
        let element = Rect::new(0.0, 0.0, 80.0, 30.0);
        let opts = PositionOptions {
            placement: Placement::BottomEnd,
            cross_offset: 4.0,
            ..Default::default()
        };
        let result = compute_position(element, ANCHOR, CONTAINER, &opts);
        assert_eq!(result.left, 70.0); // anchor right 150 - element width 80
        assert_eq!(result.margin_left, -4.0);
    }

    #[test]
    fn inside_center_overlays_anchor() {
        let element = Rect::new(0.0, 0.0, 80.0, 30.0);
        let result =
            compute_position(element, ANCHOR, CONTAINER, &options(Placement::InsideCenter));
        assert_eq!(result.left, 125.0 - 40.0);
        assert_eq!(result.top, 125.0 - 15.0);
        assert_eq!(result.final_placement, Placement::InsideCenter);
        // No tip on inside placements.
        assert_eq!(result.tip_top, TIP_AUTO);
        assert_eq!(result.tip_left, TIP_AUTO);
    }

    #[test]
    fn inside_placements_never_flip_or_snap() {
        // Anchor at the very edge: an outside placement would flip or snap,
        // an inside one must stay put.
        let anchor = Rect::new(390.0, 390.0, 10.0, 10.0);
        let element = Rect::new(0.0, 0.0, 80.0, 30.0);
        let result =
            compute_position(element, anchor, CONTAINER, &options(Placement::InsideTopStart));
        assert_eq!(result.left, 390.0);
        assert_eq!(result.top, 390.0);
        assert_eq!(result.final_placement, Placement::InsideTopStart);
    }

    #[test]
    fn nan_geometry_returns_default_result() {
        let element = Rect::new(0.0, 0.0, f32::NAN, 30.0);
        let result = compute_position(element, ANCHOR, CONTAINER, &options(Placement::Top));
        assert_eq!(result.left, 0.0);
        assert_eq!(result.top, 0.0);
        assert_eq!(result.final_placement, Placement::Top);
        assert_eq!(result.tip_top, TIP_AUTO);
    }

    #[test]
    fn compute_position_is_pure() {
        let element = Rect::new(0.0, 0.0, 80.0, 30.0);
        let opts = PositionOptions {
            placement: Placement::BottomEnd,
            offset: 3.0,
            cross_offset: 7.0,
            ..Default::default()
        };
        let a = compute_position(element, ANCHOR, CONTAINER, &opts);
        let b = compute_position(element, ANCHOR, CONTAINER, &opts);
        assert_eq!(a, b);
    }

    #[test]
    fn tip_offset_is_clamped_near_corners() {
        // Anchor far to the left of where the element can sit: the tip
        // offset clamps at twice the padding instead of leaving the element.
        let anchor = Rect::new(0.0, 100.0, 10.0, 10.0);
        let element = Rect::new(0.0, 0.0, 200.0, 30.0);
        let result = compute_position(element, anchor, CONTAINER, &options(Placement::Bottom));
        assert_eq!(result.tip_left, 24.0);
    }
}
