//! Placement values for anchored overlays.
//!
//! A placement names the side of the anchor the overlay prefers, plus an
//! optional alignment along that side. `Start`/`End` variants are aliases
//! for the left/right families kept distinct so right-to-left layouts can
//! resolve them differently at the widget level.

/// Where an anchored overlay should appear relative to its anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Placement {
    #[default]
    Bottom,
    BottomLeft,
    BottomRight,
    BottomStart,
    BottomEnd,
    Top,
    TopLeft,
    TopRight,
    TopStart,
    TopEnd,
    Left,
    LeftTop,
    LeftBottom,
    Start,
    StartTop,
    StartBottom,
    Right,
    RightTop,
    RightBottom,
    End,
    EndTop,
    EndBottom,
    InsideTopStart,
    InsideTop,
    InsideTopEnd,
    InsideBottomStart,
    InsideBottom,
    InsideBottomEnd,
    InsideStart,
    InsideEnd,
    InsideCenter,
}

impl Placement {
    /// The placement on the opposite side of the anchor, with the same
    /// alignment. Inside placements never flip and map to themselves.
    pub fn mirrored(self) -> Placement {
        use Placement::*;
        match self {
            Bottom => Top,
            BottomLeft => TopLeft,
            BottomRight => TopRight,
            BottomStart => TopStart,
            BottomEnd => TopEnd,
            Top => Bottom,
            TopLeft => BottomLeft,
            TopRight => BottomRight,
            TopStart => BottomStart,
            TopEnd => BottomEnd,
            Left => Right,
            LeftTop => RightTop,
            LeftBottom => RightBottom,
            Start => End,
            StartTop => EndTop,
            StartBottom => EndBottom,
            Right => Left,
            RightTop => LeftTop,
            RightBottom => LeftBottom,
            End => Start,
            EndTop => StartTop,
            EndBottom => StartBottom,
            other => other,
        }
    }

    /// `true` for placements drawn over the anchor instead of next to it.
    pub fn is_inside(self) -> bool {
        use Placement::*;
        matches!(
            self,
            InsideTopStart
                | InsideTop
                | InsideTopEnd
                | InsideBottomStart
                | InsideBottom
                | InsideBottomEnd
                | InsideStart
                | InsideEnd
                | InsideCenter
        )
    }

    /// `true` for the Bottom family (overlay below the anchor).
    pub fn is_bottom(self) -> bool {
        use Placement::*;
        matches!(self, Bottom | BottomLeft | BottomRight | BottomStart | BottomEnd)
    }

    /// `true` for the Top family (overlay above the anchor).
    pub fn is_top(self) -> bool {
        use Placement::*;
        matches!(self, Top | TopLeft | TopRight | TopStart | TopEnd)
    }

    /// `true` for the Left family, including `Start` aliases.
    pub fn is_left(self) -> bool {
        use Placement::*;
        matches!(self, Left | LeftTop | LeftBottom | Start | StartTop | StartBottom)
    }

    /// `true` for the Right family, including `End` aliases.
    pub fn is_right(self) -> bool {
        use Placement::*;
        matches!(self, Right | RightTop | RightBottom | End | EndTop | EndBottom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mirror_is_involutive_for_outside_placements() {
        use Placement::*;
        let outside = [
            Bottom, BottomLeft, BottomRight, BottomStart, BottomEnd, Top, TopLeft, TopRight,
            TopStart, TopEnd, Left, LeftTop, LeftBottom, Start, StartTop, StartBottom, Right,
            RightTop, RightBottom, End, EndTop, EndBottom,
        ];
        for p in outside {
            assert_ne!(p.mirrored(), p, "{p:?} should flip to the other side");
            assert_eq!(p.mirrored().mirrored(), p, "{p:?} mirror round trip");
        }
    }

    #[test]
    fn inside_placements_do_not_mirror() {
        use Placement::*;
        let inside = [
            InsideTopStart, InsideTop, InsideTopEnd, InsideBottomStart, InsideBottom,
            InsideBottomEnd, InsideStart, InsideEnd, InsideCenter,
        ];
        for p in inside {
            assert!(p.is_inside());
            assert_eq!(p.mirrored(), p);
        }
    }

    #[test]
    fn family_classification_is_exclusive() {
        use Placement::*;
        assert!(Bottom.is_bottom() && !Bottom.is_top());
        assert!(TopEnd.is_top());
        assert!(StartBottom.is_left());
        assert!(EndTop.is_right());
        assert!(!InsideCenter.is_bottom());
        assert!(!InsideCenter.is_top());
        assert!(!InsideCenter.is_left());
        assert!(!InsideCenter.is_right());
    }

    #[test]
    fn default_is_bottom() {
        assert_eq!(Placement::default(), Placement::Bottom);
    }
}
