use rand::Rng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tiny_skia::{
    Color, FillRule, LineCap, Paint, Path, PathBuilder, Pixmap, PixmapPaint, Stroke, Transform,
};

use crate::rendering::mask::PixelMask;
use crate::utils::constants::{
    DEFAULT_ROT_COEF, DEFAULT_TRANS_COEF, GRAY, GREEN, ICY, ICY_FRICTION, ROCKY, ROCKY_FRICTION,
    SCREEN_HEIGHT, SCREEN_WIDTH, YELLOW,
};
use crate::utils::errors::SimError;

// Circuit geometry: a rounded rectangle whose top straight passes through
// the start pose.
const TRACK_LEFT: f32 = 340.0;
const TRACK_RIGHT: f32 = 940.0;
const TRACK_TOP: f32 = 240.0;
const TRACK_BOTTOM: f32 = 480.0;
const CORNER_RADIUS: f32 = 80.0;
const ROAD_WIDTH: f32 = 100.0;
const LANE_WIDTH: f32 = 4.0;

const PATCHES_PER_SURFACE: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SurfaceKind {
    Icy,
    Rocky,
}

impl SurfaceKind {
    pub fn friction_level(self) -> f64 {
        match self {
            SurfaceKind::Icy => ICY_FRICTION,
            SurfaceKind::Rocky => ROCKY_FRICTION,
        }
    }

    fn color(self) -> (u8, u8, u8) {
        match self {
            SurfaceKind::Icy => ICY,
            SurfaceKind::Rocky => ROCKY,
        }
    }
}

/// One surface type's patch layer: where it covers the track and how much
/// friction it applies there.
pub struct Texture {
    pub kind: SurfaceKind,
    pub mask: PixelMask,
    pub friction_level: f64,
}

/// Static track: pre-rendered track image, off-road field mask, and the
/// per-surface texture map. All of it is fixed for the lifetime of a Road
/// instance; the layout is determined by the seed.
pub struct Road {
    track: Pixmap,
    field_mask: PixelMask,
    textures: Vec<Texture>,
}

impl Road {
    pub fn new(rng: &mut ChaCha8Rng) -> Result<Self, SimError> {
        let circuit = Self::circuit_path()?;

        let mut track = Pixmap::new(SCREEN_WIDTH, SCREEN_HEIGHT)
            .ok_or_else(|| SimError::RenderError("failed to allocate track canvas".into()))?;

        // Field, road band, then the center lane line.
        let (r, g, b) = GREEN;
        track.fill(Color::from_rgba8(r, g, b, 255));

        let mut road_stroke = Stroke::default();
        road_stroke.width = ROAD_WIDTH;
        road_stroke.line_cap = LineCap::Round;

        let mut paint = Paint::default();
        paint.anti_alias = true;
        let (r, g, b) = GRAY;
        paint.set_color_rgba8(r, g, b, 255);
        track.stroke_path(&circuit, &paint, &road_stroke, Transform::identity(), None);

        let mut lane_stroke = Stroke::default();
        lane_stroke.width = LANE_WIDTH;
        let (r, g, b) = YELLOW;
        paint.set_color_rgba8(r, g, b, 255);
        track.stroke_path(&circuit, &paint, &lane_stroke, Transform::identity(), None);

        // The off-road field mask is the inverse of the road band coverage,
        // rasterized without anti-aliasing so the edge is crisp.
        let mut road_layer = Pixmap::new(SCREEN_WIDTH, SCREEN_HEIGHT)
            .ok_or_else(|| SimError::RenderError("failed to allocate road layer".into()))?;
        let mut mask_paint = Paint::default();
        mask_paint.anti_alias = false;
        mask_paint.set_color_rgba8(255, 255, 255, 255);
        road_layer.stroke_path(
            &circuit,
            &mask_paint,
            &road_stroke,
            Transform::identity(),
            None,
        );
        let field_mask = PixelMask::from_pixmap(&road_layer).invert();

        let mut textures = Vec::new();
        for kind in [SurfaceKind::Icy, SurfaceKind::Rocky] {
            let layer = Self::patch_layer(kind, rng)?;
            track.draw_pixmap(
                0,
                0,
                layer.as_ref(),
                &PixmapPaint::default(),
                Transform::identity(),
                None,
            );
            textures.push(Texture {
                kind,
                mask: PixelMask::from_pixmap(&layer),
                friction_level: kind.friction_level(),
            });
        }

        Ok(Self {
            track,
            field_mask,
            textures,
        })
    }

    fn circuit_path() -> Result<Path, SimError> {
        let mut pb = PathBuilder::new();
        pb.move_to(TRACK_LEFT + CORNER_RADIUS, TRACK_TOP);
        pb.line_to(TRACK_RIGHT - CORNER_RADIUS, TRACK_TOP);
        pb.quad_to(TRACK_RIGHT, TRACK_TOP, TRACK_RIGHT, TRACK_TOP + CORNER_RADIUS);
        pb.line_to(TRACK_RIGHT, TRACK_BOTTOM - CORNER_RADIUS);
        pb.quad_to(
            TRACK_RIGHT,
            TRACK_BOTTOM,
            TRACK_RIGHT - CORNER_RADIUS,
            TRACK_BOTTOM,
        );
        pb.line_to(TRACK_LEFT + CORNER_RADIUS, TRACK_BOTTOM);
        pb.quad_to(TRACK_LEFT, TRACK_BOTTOM, TRACK_LEFT, TRACK_BOTTOM - CORNER_RADIUS);
        pb.line_to(TRACK_LEFT, TRACK_TOP + CORNER_RADIUS);
        pb.quad_to(TRACK_LEFT, TRACK_TOP, TRACK_LEFT + CORNER_RADIUS, TRACK_TOP);
        pb.close();
        pb.finish()
            .ok_or_else(|| SimError::RenderError("failed to build circuit path".into()))
    }

    /// Patches of one surface kind, placed along the circuit straights.
    fn patch_layer(kind: SurfaceKind, rng: &mut ChaCha8Rng) -> Result<Pixmap, SimError> {
        let mut layer = Pixmap::new(SCREEN_WIDTH, SCREEN_HEIGHT)
            .ok_or_else(|| SimError::RenderError("failed to allocate patch layer".into()))?;

        let mut paint = Paint::default();
        paint.anti_alias = false;
        let (r, g, b) = kind.color();
        paint.set_color_rgba8(r, g, b, 255);

        for _ in 0..PATCHES_PER_SURFACE {
            let (cx, cy) = Self::circuit_point(rng);
            let radius = rng.gen_range(18.0..30.0);
            let circle = PathBuilder::from_circle(cx, cy, radius)
                .ok_or_else(|| SimError::RenderError("failed to build patch circle".into()))?;
            layer.fill_path(&circle, &paint, FillRule::Winding, Transform::identity(), None);
        }

        Ok(layer)
    }

    fn circuit_point(rng: &mut ChaCha8Rng) -> (f32, f32) {
        let lo = TRACK_LEFT + CORNER_RADIUS;
        let hi = TRACK_RIGHT - CORNER_RADIUS;
        match rng.gen_range(0..4u8) {
            0 => (rng.gen_range(lo..hi), TRACK_TOP),
            1 => (TRACK_RIGHT, rng.gen_range(TRACK_TOP + CORNER_RADIUS..TRACK_BOTTOM - CORNER_RADIUS)),
            2 => (rng.gen_range(lo..hi), TRACK_BOTTOM),
            _ => (TRACK_LEFT, rng.gen_range(TRACK_TOP + CORNER_RADIUS..TRACK_BOTTOM - CORNER_RADIUS)),
        }
    }

    /// Blit the static track onto the world canvas.
    pub fn draw(&self, canvas: &mut Pixmap) {
        canvas.draw_pixmap(
            0,
            0,
            self.track.as_ref(),
            &PixmapPaint::default(),
            Transform::identity(),
            None,
        );
    }

    pub fn field_mask(&self) -> &PixelMask {
        &self.field_mask
    }

    pub fn texture_map(&self) -> &[Texture] {
        &self.textures
    }

    /// Friction pair for a car mask at the given offset: the first texture
    /// whose mask overlaps wins, otherwise the default pair applies.
    pub fn friction_at(&self, mask: &PixelMask, offset: (i64, i64)) -> (f64, f64) {
        for texture in &self.textures {
            if texture.mask.overlap(mask, offset) {
                return (texture.friction_level, 1.0);
            }
        }
        (DEFAULT_TRANS_COEF, DEFAULT_ROT_COEF)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::constants::{START_X, START_Y};
    use crate::utils::rng::RngManager;

    fn seeded_road(seed: u64) -> Road {
        let mut rng = RngManager::new(seed).get_rng("road");
        Road::new(&mut rng).unwrap()
    }

    #[test]
    fn start_pose_is_on_the_road() {
        let road = seeded_road(0);
        assert!(!road.field_mask().get(START_X as i64, START_Y as i64));
    }

    #[test]
    fn field_mask_covers_area_away_from_the_circuit() {
        let road = seeded_road(0);
        assert!(road.field_mask().get(10, 10));
        assert!(road.field_mask().get((SCREEN_WIDTH - 10) as i64, (SCREEN_HEIGHT - 10) as i64));
    }

    #[test]
    fn same_seed_reproduces_the_surface_layout() {
        let first = seeded_road(7);
        let second = seeded_road(7);
        for (a, b) in first.texture_map().iter().zip(second.texture_map()) {
            assert_eq!(a.kind, b.kind);
            assert_eq!(a.mask, b.mask);
        }
    }

    #[test]
    fn different_seeds_vary_the_surface_layout() {
        let first = seeded_road(1);
        let second = seeded_road(2);
        let identical = first
            .texture_map()
            .iter()
            .zip(second.texture_map())
            .all(|(a, b)| a.mask == b.mask);
        assert!(!identical);
    }

    #[test]
    fn texture_patches_supply_their_friction_level() {
        let road = seeded_road(0);
        // A probe the size of a patch center pixel.
        let mut probe = PixelMask::new(1, 1);
        probe.set(0, 0, true);

        for texture in road.texture_map() {
            // Find one set pixel of the texture and probe it.
            let mut found = None;
            'outer: for y in 0..texture.mask.height() as i64 {
                for x in 0..texture.mask.width() as i64 {
                    if texture.mask.get(x, y) {
                        found = Some((x, y));
                        break 'outer;
                    }
                }
            }
            let (x, y) = found.expect("texture layer has no pixels");
            let (bv, _bw) = road.friction_at(&probe, (x, y));
            // Patches may overlap; the first matching texture wins, so the
            // probe resolves to some texture's level, never the default.
            assert!(road
                .texture_map()
                .iter()
                .any(|t| (t.friction_level - bv).abs() < f64::EPSILON));
        }
    }
}
