// Copyright 2026 the Cardtable Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Cardtable View 2D: the tabletop's canvas view transform.
//!
//! This crate provides a small, headless model of the canvas camera: a
//! uniform scale + translation affine with forward and inverse point
//! mapping, zoom-about-pivot with a clamped scale band, and incremental
//! panning.
//!
//! It does **not** own the placed objects. The tabletop deliberately keeps a
//! *copy* of the compounded transform on every placed object instead of
//! inheriting one parent transform at render time, so zooming and panning
//! must touch every object. [`CanvasTransform`] therefore returns a
//! [`TransformStep`] describing each accepted zoom or pan, and the scene
//! layer applies that step to all objects' stored positions and render
//! transforms. This trades O(n) work per tick (fine at tens of objects) for
//! never needing a render-space reconciliation pass.
//!
//! ## Minimal example
//!
//! ```rust
//! use cardtable_view2d::{CanvasTransform, TransformStep, ZoomDirection};
//! use kurbo::Point;
//!
//! let mut view = CanvasTransform::new();
//!
//! // Zoom in about a pivot; the returned step is what the scene applies
//! // to every placed object.
//! let step = view.zoom(ZoomDirection::In, Point::new(400.0, 300.0)).unwrap();
//! match step {
//!     TransformStep::Zoom { factor, .. } => assert!((factor - 1.1).abs() < 1e-12),
//!     TransformStep::Pan { .. } => unreachable!(),
//! }
//! assert!(view.scale() > 1.0);
//! ```
//!
//! ## Panning
//!
//! ```rust
//! use cardtable_view2d::CanvasTransform;
//! use kurbo::Point;
//!
//! let mut view = CanvasTransform::new();
//! view.begin_pan(Point::new(100.0, 100.0));
//! let step = view.pan(Point::new(130.0, 90.0)).unwrap();
//! view.end_pan();
//! # let _ = step;
//! ```
//!
//! ## Design notes
//!
//! - The scale band is fixed at `[0.3, 1.7]`; a zoom step that starts from
//!   outside the band in the requested direction is refused (`None`), never
//!   an error.
//! - Panning is expressed against the *inverse* transform so drag speed is
//!   independent of the current zoom, then rescaled into object space.
//! - Rotation of the canvas itself is intentionally unsupported; per-object
//!   rotation (tapping) lives with the objects.
//!
//! This crate is `no_std`.

#![no_std]

use kurbo::{Affine, Point, Vec2};

/// Direction of a zoom request.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ZoomDirection {
    /// Zoom in (scale up by the step factor).
    In,
    /// Zoom out (scale down by the step factor).
    Out,
}

impl ZoomDirection {
    /// Maps a scroll-wheel delta to a zoom direction.
    ///
    /// Positive deltas zoom in, negative zoom out, zero is `None`.
    #[must_use]
    pub fn from_scroll(delta: f64) -> Option<Self> {
        if delta > 0.0 {
            Some(Self::In)
        } else if delta < 0.0 {
            Some(Self::Out)
        } else {
            None
        }
    }
}

/// One accepted view change, to be applied to every placed object.
///
/// Produced by [`CanvasTransform::zoom`] and [`CanvasTransform::pan`];
/// consumed by the scene layer's apply-to-all operation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TransformStep {
    /// Scale stored positions and render transforms about `pivot` by
    /// `factor`.
    Zoom {
        /// Uniform scale factor of this step.
        factor: f64,
        /// Fixed point of the scaling, in canvas coordinates.
        pivot: Point,
    },
    /// Translate stored positions by `delta` (already in object space).
    Pan {
        /// Offset to add to every stored position.
        delta: Vec2,
    },
}

/// The canvas camera: a uniform scale + translation affine.
///
/// Pointer coordinates and stored object positions share the same canvas
/// space; the transform tracks the compounded zoom so that pan deltas can be
/// normalized and new objects can copy the current matrix as their render
/// transform.
#[derive(Clone, Debug)]
pub struct CanvasTransform {
    transform: Affine,
    inverse: Affine,
    pan_start: Option<Point>,
}

impl Default for CanvasTransform {
    fn default() -> Self {
        Self::new()
    }
}

impl CanvasTransform {
    /// Lower bound of the scale band; zoom-out requests below it are refused.
    pub const MIN_SCALE: f64 = 0.3;
    /// Upper bound of the scale band; zoom-in requests above it are refused.
    pub const MAX_SCALE: f64 = 1.7;
    /// Per-step zoom factor.
    pub const STEP_FACTOR: f64 = 1.1;

    /// Creates an identity transform (scale 1, no offset).
    #[must_use]
    pub fn new() -> Self {
        Self {
            transform: Affine::IDENTITY,
            inverse: Affine::IDENTITY,
            pan_start: None,
        }
    }

    /// Returns the current uniform scale factor.
    #[must_use]
    pub fn scale(&self) -> f64 {
        self.transform.as_coeffs()[0]
    }

    /// Returns the current compounded matrix.
    ///
    /// Newly placed objects copy this as their initial render transform.
    #[must_use]
    pub fn matrix(&self) -> Affine {
        self.transform
    }

    /// Maps a world-space point into canvas coordinates.
    #[must_use]
    pub fn world_to_view(&self, pt: Point) -> Point {
        self.transform * pt
    }

    /// Maps a canvas-space point back into world coordinates.
    #[must_use]
    pub fn view_to_world(&self, pt: Point) -> Point {
        self.inverse * pt
    }

    /// Zooms one step about `pivot`.
    ///
    /// Refused (`None`) when the current scale is already beyond the band in
    /// the requested direction: above [`Self::MAX_SCALE`] for zooming in,
    /// below [`Self::MIN_SCALE`] for zooming out. On success the transform
    /// is updated and the returned step must be applied to every placed
    /// object to keep per-object transforms consistent with the camera.
    pub fn zoom(&mut self, direction: ZoomDirection, pivot: Point) -> Option<TransformStep> {
        let scale = self.scale();
        let factor = match direction {
            ZoomDirection::In => {
                if scale > Self::MAX_SCALE {
                    return None;
                }
                Self::STEP_FACTOR
            }
            ZoomDirection::Out => {
                if scale < Self::MIN_SCALE {
                    return None;
                }
                1.0 / Self::STEP_FACTOR
            }
        };

        self.transform = scale_about(factor, pivot) * self.transform;
        self.inverse = self.transform.inverse();
        Some(TransformStep::Zoom { factor, pivot })
    }

    /// Begins a pan gesture at a canvas-space point.
    pub fn begin_pan(&mut self, pt: Point) {
        self.pan_start = Some(self.inverse * pt);
    }

    /// Advances an active pan to a new pointer position.
    ///
    /// Returns the object-space step to add to every stored position, or
    /// `None` when no pan is active. The captured start point advances so
    /// each call yields the incremental delta since the previous one.
    pub fn pan(&mut self, pt: Point) -> Option<TransformStep> {
        let start = self.pan_start?;
        let current = self.inverse * pt;
        let delta = (current - start) * self.scale();
        self.pan_start = Some(current);
        Some(TransformStep::Pan { delta })
    }

    /// Ends the active pan gesture, if any.
    pub fn end_pan(&mut self) {
        self.pan_start = None;
    }

    /// Returns `true` while a pan gesture is active.
    #[must_use]
    pub fn is_panning(&self) -> bool {
        self.pan_start.is_some()
    }

    /// Snapshot of the current state for debugging and inspection.
    #[must_use]
    pub fn debug_info(&self) -> CanvasTransformDebugInfo {
        CanvasTransformDebugInfo {
            transform: self.transform,
            scale: self.scale(),
            panning: self.is_panning(),
        }
    }
}

/// Scale about a fixed point, composed from the primitives.
fn scale_about(factor: f64, pivot: Point) -> Affine {
    Affine::translate(pivot.to_vec2()) * Affine::scale(factor) * Affine::translate(-pivot.to_vec2())
}

/// Debug snapshot of a [`CanvasTransform`] state.
#[derive(Clone, Copy, Debug)]
pub struct CanvasTransformDebugInfo {
    /// Current compounded matrix.
    pub transform: Affine,
    /// Current uniform scale factor.
    pub scale: f64,
    /// Whether a pan gesture is active.
    pub panning: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_round_trip() {
        let view = CanvasTransform::new();
        let pt = Point::new(12.5, -3.0);
        let back = view.view_to_world(view.world_to_view(pt));
        assert!((back.x - pt.x).abs() < 1e-9);
        assert!((back.y - pt.y).abs() < 1e-9);
    }

    #[test]
    fn zoom_in_then_out_restores_scale() {
        let mut view = CanvasTransform::new();
        let pivot = Point::new(200.0, 150.0);

        view.zoom(ZoomDirection::In, pivot).unwrap();
        view.zoom(ZoomDirection::Out, pivot).unwrap();

        assert!((view.scale() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn zoom_keeps_the_pivot_fixed() {
        let mut view = CanvasTransform::new();
        let pivot = Point::new(400.0, 300.0);
        let world_at_pivot = view.view_to_world(pivot);

        view.zoom(ZoomDirection::In, pivot).unwrap();

        let after = view.world_to_view(world_at_pivot);
        assert!((after.x - pivot.x).abs() < 1e-9);
        assert!((after.y - pivot.y).abs() < 1e-9);
    }

    #[test]
    fn zoom_refuses_outside_the_band() {
        let mut view = CanvasTransform::new();
        let pivot = Point::ZERO;

        // 1.1^6 ~= 1.77 > 1.7; the step that crosses the bound is accepted,
        // the next is refused.
        while view.zoom(ZoomDirection::In, pivot).is_some() {}
        assert!(view.scale() > CanvasTransform::MAX_SCALE);
        assert!(view.zoom(ZoomDirection::In, pivot).is_none());
        // Zooming back out is still allowed.
        assert!(view.zoom(ZoomDirection::Out, pivot).is_some());

        let mut view = CanvasTransform::new();
        while view.zoom(ZoomDirection::Out, pivot).is_some() {}
        assert!(view.scale() < CanvasTransform::MIN_SCALE);
        assert!(view.zoom(ZoomDirection::Out, pivot).is_none());
        assert!(view.zoom(ZoomDirection::In, pivot).is_some());
    }

    #[test]
    fn pan_reports_incremental_deltas() {
        let mut view = CanvasTransform::new();
        view.begin_pan(Point::new(100.0, 100.0));

        let Some(TransformStep::Pan { delta }) = view.pan(Point::new(110.0, 95.0)) else {
            panic!("pan should be active");
        };
        assert!((delta.x - 10.0).abs() < 1e-9);
        assert!((delta.y + 5.0).abs() < 1e-9);

        // Second move is relative to the first, not to the start.
        let Some(TransformStep::Pan { delta }) = view.pan(Point::new(112.0, 95.0)) else {
            panic!("pan should be active");
        };
        assert!((delta.x - 2.0).abs() < 1e-9);
        assert!(delta.y.abs() < 1e-9);

        view.end_pan();
        assert!(view.pan(Point::new(0.0, 0.0)).is_none());
    }

    #[test]
    fn pan_then_inverse_pan_sums_to_zero() {
        let mut view = CanvasTransform::new();
        view.zoom(ZoomDirection::In, Point::new(50.0, 50.0)).unwrap();

        view.begin_pan(Point::new(100.0, 100.0));
        let mut total = Vec2::ZERO;
        for pt in [
            Point::new(140.0, 80.0),
            Point::new(90.0, 120.0),
            Point::new(100.0, 100.0),
        ] {
            let Some(TransformStep::Pan { delta }) = view.pan(pt) else {
                panic!("pan should be active");
            };
            total += delta;
        }
        assert!(total.x.abs() < 1e-9);
        assert!(total.y.abs() < 1e-9);
    }

    #[test]
    fn scroll_delta_maps_to_direction() {
        assert_eq!(ZoomDirection::from_scroll(120.0), Some(ZoomDirection::In));
        assert_eq!(ZoomDirection::from_scroll(-120.0), Some(ZoomDirection::Out));
        assert_eq!(ZoomDirection::from_scroll(0.0), None);
    }

    #[test]
    fn debug_info_reflects_state() {
        let mut view = CanvasTransform::new();
        view.zoom(ZoomDirection::In, Point::ZERO).unwrap();
        view.begin_pan(Point::ZERO);

        let info = view.debug_info();
        assert!((info.scale - CanvasTransform::STEP_FACTOR).abs() < 1e-12);
        assert!(info.panning);
    }
}
