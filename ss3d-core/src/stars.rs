/// Parallax star streaks drawn straight into the frame buffer
use nalgebra::Point3;
use rand::Rng;

use crate::config::StarConfig;
use crate::raster::Rasterizer;

/// Fixed population of stars travelling along z.
///
/// Stars that pass the recycle depth are respawned at the far boundary
/// with fresh x/y, so the population never changes size.
pub struct StarField<R> {
    stars: Vec<Point3<f32>>,
    config: StarConfig,
    rng: R,
}

impl<R: Rng> StarField<R> {
    pub fn new(config: StarConfig, mut rng: R) -> Self {
        let stars = (0..config.count)
            .map(|_| {
                let z = rng.gen_range(config.far_z..=config.spawn_near_z);
                Self::spawn_at(&config, &mut rng, z)
            })
            .collect();

        Self { stars, config, rng }
    }

    /// Start from known star positions instead of random ones
    pub fn from_positions(config: StarConfig, stars: Vec<Point3<f32>>, rng: R) -> Self {
        Self { stars, config, rng }
    }

    fn spawn_at(config: &StarConfig, rng: &mut R, z: f32) -> Point3<f32> {
        Point3::new(
            rng.gen_range(-config.half_width..=config.half_width),
            rng.gen_range(-config.half_height..=config.half_height),
            z,
        )
    }

    pub fn stars(&self) -> &[Point3<f32>] {
        &self.stars
    }

    pub fn len(&self) -> usize {
        self.stars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stars.is_empty()
    }

    /// Move every star one step and recycle the ones that passed the near limit
    pub fn update(&mut self) {
        let config = &self.config;
        for star in &mut self.stars {
            star.z += config.speed;
            if star.z > config.recycle_z {
                *star = Self::spawn_at(config, &mut self.rng, config.far_z);
            }
        }
    }

    /// Draw a streak from each star's previous position to its current one.
    ///
    /// Returns the number of streaks drawn. Stars without a projection are
    /// skipped for this frame only.
    pub fn render(&self, raster: &mut Rasterizer) -> usize {
        let projector = *raster.projector();
        let mut drawn = 0;

        for star in &self.stars {
            let Some(current) = projector.project(star) else {
                continue;
            };

            let mut prev_z = star.z - self.config.speed;
            if projector.k2() + prev_z <= 0.0 {
                prev_z = self.config.far_z;
            }
            let Some(previous) = projector.project(&Point3::new(star.x, star.y, prev_z)) else {
                continue;
            };

            raster.draw_line(
                (previous.x, previous.y),
                (current.x, current.y),
                self.config.glyph,
            );
            drawn += 1;
        }
        drawn
    }
}
