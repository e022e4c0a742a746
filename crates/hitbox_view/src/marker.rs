//! # Marker Geometry
//!
//! World-space shapes of the hitbox marker. The host projects the points to
//! the screen and strokes them; nothing here knows about a camera.
//!
//! ```text
//!          \   /        facing wedge (apex at the avatar, opens forward)
//!       .-~~\~/~~-.
//!      /     V     \    footprint circle, scaled by the mount's size
//!      \           /
//!       '-._____.-'
//! ```

use hitbox_shared::{Color, MountType, Vec2, Vec3};
use hitbox_smoother::Pose;

/// Radius of the unscaled footprint circle.
pub const CIRCLE_RADIUS: f32 = 0.5;

/// Vertex count of the footprint circle.
pub const CIRCLE_SEGMENTS: usize = 100;

/// Stroke width of the outline pass.
pub const OUTLINE_WIDTH: f32 = 3.0;

/// Stroke width of the color pass, drawn over the outline.
pub const FILL_WIDTH: f32 = 2.0;

/// A sequence of points, optionally closed back to the first one.
#[derive(Clone, Debug, PartialEq)]
pub struct Polyline {
    /// Vertices in order.
    pub points: Vec<Vec3>,
    /// Whether the last point connects back to the first.
    pub closed: bool,
}

impl Polyline {
    /// Returns a copy with every point transformed.
    #[must_use]
    pub fn transformed(&self, transform: &MarkerTransform) -> Self {
        Self {
            points: self.points.iter().map(|&p| transform.apply(p)).collect(),
            closed: self.closed,
        }
    }

    /// Closed circle in the XY plane centered on the origin.
    #[must_use]
    pub fn horizontal_circle(radius: f32, segments: usize) -> Self {
        #[allow(clippy::cast_precision_loss)]
        let step = std::f32::consts::TAU / segments as f32;
        let points = (0..segments)
            .map(|i| {
                #[allow(clippy::cast_precision_loss)]
                let angle = step * i as f32;
                Vec3::new(radius * angle.cos(), radius * angle.sin(), 0.0)
            })
            .collect();
        Self { points, closed: true }
    }

    /// Open wedge with its apex on the origin, opening along +Y.
    #[must_use]
    pub fn facing_wedge() -> Self {
        let rotate = MarkerTransform {
            scale: Vec2::ONE,
            yaw: (-45.0f32).to_radians(),
            translation: Vec3::ZERO,
        };
        Self {
            points: vec![
                rotate.apply(Vec3::new(-0.5, 0.0, 0.0)),
                rotate.apply(Vec3::ZERO),
                rotate.apply(Vec3::new(0.0, 0.5, 0.0)),
            ],
            closed: false,
        }
    }
}

/// Scale, then yaw about Z, then translate.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MarkerTransform {
    /// Horizontal scale (x, y). Z is never scaled.
    pub scale: Vec2,
    /// Counter-clockwise rotation about Z, in radians.
    pub yaw: f32,
    /// World translation.
    pub translation: Vec3,
}

impl MarkerTransform {
    /// Places a marker at `pose`, sized for `mount`.
    ///
    /// The forward vector only needs a horizontal direction; its length is
    /// irrelevant, so an interpolated (shortened) forward works as is.
    #[must_use]
    pub fn for_pose(pose: &Pose, mount: MountType) -> Self {
        Self {
            scale: mount.footprint(),
            yaw: heading(pose.forward),
            translation: pose.position,
        }
    }

    /// Transforms one point.
    #[must_use]
    pub fn apply(&self, p: Vec3) -> Vec3 {
        let x = p.x * self.scale.x;
        let y = p.y * self.scale.y;
        let (sin, cos) = self.yaw.sin_cos();
        Vec3::new(
            x * cos - y * sin + self.translation.x,
            x * sin + y * cos + self.translation.y,
            p.z + self.translation.z,
        )
    }
}

/// Yaw that turns +Y onto the horizontal part of `forward`.
#[must_use]
pub fn heading(forward: Vec3) -> f32 {
    -forward.x.atan2(forward.y)
}

/// Colors and widths used to stroke the marker.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MarkerStyle {
    /// Color pass.
    pub color: Color,
    /// Outline pass.
    pub outline_color: Color,
}

impl Default for MarkerStyle {
    fn default() -> Self {
        Self {
            color: Color::WHITE,
            outline_color: Color::BLACK,
        }
    }
}

/// One stroke pass over every polyline of a marker.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Stroke {
    /// Stroke color.
    pub color: Color,
    /// Stroke width in pixels.
    pub width: f32,
}

/// A marker ready for the host renderer.
#[derive(Clone, Debug, PartialEq)]
pub struct Marker {
    /// Footprint circle (an ellipse for non-uniform mounts).
    pub footprint: Polyline,
    /// Facing wedge. Omitted for non-uniform footprints, where it would be skewed.
    pub facing: Option<Polyline>,
    /// Stroke passes in draw order: outline first, then color.
    pub strokes: [Stroke; 2],
}

impl Marker {
    /// Every polyline, in draw order.
    pub fn polylines(&self) -> impl Iterator<Item = &Polyline> {
        std::iter::once(&self.footprint).chain(self.facing.as_ref())
    }
}

/// Unit shapes, built once and transformed per frame.
#[derive(Clone, Debug)]
pub struct MarkerGeometry {
    circle: Polyline,
    wedge: Polyline,
}

impl MarkerGeometry {
    /// Builds the unit circle and wedge.
    #[must_use]
    pub fn new() -> Self {
        Self {
            circle: Polyline::horizontal_circle(CIRCLE_RADIUS, CIRCLE_SEGMENTS),
            wedge: Polyline::facing_wedge(),
        }
    }

    /// Builds the marker for `pose` while riding `mount`.
    #[must_use]
    pub fn build(&self, pose: &Pose, mount: MountType, style: MarkerStyle) -> Marker {
        let transform = MarkerTransform::for_pose(pose, mount);
        let uniform = transform.scale.x == transform.scale.y;

        Marker {
            footprint: self.circle.transformed(&transform),
            facing: uniform.then(|| self.wedge.transformed(&transform)),
            strokes: [
                Stroke {
                    color: style.outline_color,
                    width: OUTLINE_WIDTH,
                },
                Stroke {
                    color: style.color,
                    width: FILL_WIDTH,
                },
            ],
        }
    }
}

impl Default for MarkerGeometry {
    fn default() -> Self {
        Self::new()
    }
}
