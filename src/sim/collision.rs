//! Axis-aligned collision detection
//!
//! Overlap tests between the player and falling obstacles. Some variants
//! shrink both hitboxes by a scale factor before testing, which makes
//! collisions more forgiving than the visual bounds suggest.

use glam::Vec2;

/// Axis-aligned rectangle in play-area coordinates (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub min: Vec2,
    pub max: Vec2,
}

impl Rect {
    /// Build from left/top corner plus extents
    pub fn from_ltwh(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            min: Vec2::new(left, top),
            max: Vec2::new(left + width, top + height),
        }
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    /// A rectangle with no area cannot collide (element not yet laid out)
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.width() <= 0.0 || self.height() <= 0.0
    }

    /// Inset each side by `(1 - scale) / 2` of the extent on that axis.
    ///
    /// `scale` in (0, 1]; 1.0 returns the rect unchanged.
    pub fn shrunk(&self, scale: f32) -> Self {
        let inset = Vec2::new(
            self.width() * (1.0 - scale) / 2.0,
            self.height() * (1.0 - scale) / 2.0,
        );
        Self {
            min: self.min + inset,
            max: self.max - inset,
        }
    }
}

/// True iff the two rectangles overlap.
///
/// Degenerate rectangles never collide. Touching edges count as contact,
/// matching the separation test the game has always used.
pub fn rects_overlap(a: &Rect, b: &Rect) -> bool {
    if a.is_degenerate() || b.is_degenerate() {
        return false;
    }
    let apart =
        a.max.x < b.min.x || a.min.x > b.max.x || a.max.y < b.min.y || a.min.y > b.max.y;
    !apart
}

/// Overlap test with an identical hitbox shrink applied to both rectangles
pub fn rects_overlap_scaled(a: &Rect, b: &Rect, scale: f32) -> bool {
    rects_overlap(&a.shrunk(scale), &b.shrunk(scale))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn identical_rects_collide() {
        let r = Rect::from_ltwh(10.0, 20.0, 30.0, 30.0);
        assert!(rects_overlap(&r, &r));
    }

    #[test]
    fn degenerate_rects_never_collide() {
        let r = Rect::from_ltwh(0.0, 0.0, 30.0, 30.0);
        let flat = Rect::from_ltwh(0.0, 0.0, 30.0, 0.0);
        let thin = Rect::from_ltwh(0.0, 0.0, 0.0, 30.0);
        assert!(!rects_overlap(&r, &flat));
        assert!(!rects_overlap(&flat, &r));
        assert!(!rects_overlap(&thin, &thin));
    }

    #[test]
    fn separated_on_x_axis_miss() {
        let a = Rect::from_ltwh(0.0, 0.0, 10.0, 10.0);
        let b = Rect::from_ltwh(10.5, 0.0, 10.0, 10.0);
        assert!(!rects_overlap(&a, &b));
    }

    #[test]
    fn separated_on_y_axis_miss() {
        let a = Rect::from_ltwh(0.0, 0.0, 10.0, 10.0);
        let b = Rect::from_ltwh(0.0, 10.5, 10.0, 10.0);
        assert!(!rects_overlap(&a, &b));
    }

    #[test]
    fn touching_edges_count_as_contact() {
        let a = Rect::from_ltwh(0.0, 0.0, 10.0, 10.0);
        let b = Rect::from_ltwh(10.0, 0.0, 10.0, 10.0);
        assert!(rects_overlap(&a, &b));
    }

    #[test]
    fn shrink_makes_boundary_overlap_forgiving() {
        // Overlapping by 2 units; a 0.55 shrink removes 6.75 per side
        let a = Rect::from_ltwh(0.0, 0.0, 30.0, 30.0);
        let b = Rect::from_ltwh(28.0, 0.0, 30.0, 30.0);
        assert!(rects_overlap(&a, &b));
        assert!(!rects_overlap_scaled(&a, &b, 0.55));
    }

    #[test]
    fn shrink_keeps_deep_overlaps() {
        let a = Rect::from_ltwh(0.0, 0.0, 30.0, 30.0);
        let b = Rect::from_ltwh(5.0, 5.0, 30.0, 30.0);
        assert!(rects_overlap_scaled(&a, &b, 0.55));
    }

    proptest! {
        /// Rects separated along an axis by more than their combined extents
        /// never collide, at any shrink factor.
        #[test]
        fn separated_rects_never_collide(
            w in 1.0f32..100.0,
            h in 1.0f32..100.0,
            gap in 0.1f32..50.0,
            scale in 0.1f32..=1.0,
        ) {
            let a = Rect::from_ltwh(0.0, 0.0, w, h);
            let b = Rect::from_ltwh(w + gap, 0.0, w, h);
            prop_assert!(!rects_overlap(&a, &b));
            prop_assert!(!rects_overlap_scaled(&a, &b, scale));
        }

        /// Shrinking both rects by a smaller scale never creates a collision
        /// that the larger scale missed (monotonic forgiveness).
        #[test]
        fn smaller_scale_is_never_stricter(
            ax in -50.0f32..50.0,
            bx in -50.0f32..50.0,
            s_small in 0.1f32..0.9,
        ) {
            let a = Rect::from_ltwh(ax, 0.0, 30.0, 30.0);
            let b = Rect::from_ltwh(bx, 0.0, 30.0, 30.0);
            let s_large = s_small + 0.1;
            if rects_overlap_scaled(&a, &b, s_small) {
                prop_assert!(rects_overlap_scaled(&a, &b, s_large));
            }
        }
    }
}
