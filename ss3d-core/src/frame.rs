/// Per-frame orchestration: clear, stars, mesh, present, advance, pace
use log::trace;
use nalgebra::Point3;
use rand::Rng;
use std::time::{Duration, Instant};

use crate::buffer::FrameBuffer;
use crate::config::RenderConfig;
use crate::error::RenderResult;
use crate::geometry::{Mesh, Triangle};
use crate::raster::{Rasterizer, TriangleOutcome};
use crate::stars::StarField;
use crate::transform::{RotationState, Transform};

/// Receives the finished frame once per tick
pub trait FrameSink {
    fn present(&mut self, frame: &FrameBuffer, stats: &FrameStats) -> RenderResult<()>;
}

/// Hands the unused part of the frame budget back to the host
pub trait Pacer {
    fn pace(&mut self, remaining: Duration);
}

/// Blocks the current thread for the remaining budget
#[derive(Debug, Default, Clone, Copy)]
pub struct SleepPacer;

impl Pacer for SleepPacer {
    fn pace(&mut self, remaining: Duration) {
        if !remaining.is_zero() {
            std::thread::sleep(remaining);
        }
    }
}

/// Time left in the frame budget, never negative
pub fn remaining_budget(target: Duration, elapsed: Duration) -> Duration {
    target.saturating_sub(elapsed)
}

/// Counters for one rendered frame
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct FrameStats {
    pub render_time: Duration,
    pub drawn: usize,
    pub culled: usize,
    pub skipped: usize,
    pub pixels: usize,
    pub streaks: usize,
}

impl FrameStats {
    pub fn fps(&self) -> f32 {
        let secs = self.render_time.as_secs_f32();
        if secs > 0.0 {
            1.0 / secs
        } else {
            0.0
        }
    }
}

/// Owns all per-frame state: rotation, stars, buffers and the mesh template
pub struct FrameLoop<R> {
    config: RenderConfig,
    template: Mesh,
    scratch: Vec<Triangle>,
    rotation: RotationState,
    stars: StarField<R>,
    raster: Rasterizer,
}

impl<R: Rng> FrameLoop<R> {
    pub fn new(config: RenderConfig, template: Mesh, rng: R) -> RenderResult<Self> {
        config.validate()?;
        let stars = StarField::new(config.stars.clone(), rng);
        Ok(Self::from_parts(config, template, stars))
    }

    /// Like `new`, but the star field starts from the given positions
    pub fn with_star_positions(
        config: RenderConfig,
        template: Mesh,
        positions: Vec<Point3<f32>>,
        rng: R,
    ) -> RenderResult<Self> {
        config.validate()?;
        let stars = StarField::from_positions(config.stars.clone(), positions, rng);
        Ok(Self::from_parts(config, template, stars))
    }

    fn from_parts(config: RenderConfig, template: Mesh, stars: StarField<R>) -> Self {
        let raster = Rasterizer::new(&config);
        let scratch = Vec::with_capacity(template.len());

        Self {
            config,
            template,
            scratch,
            rotation: RotationState::zero(),
            stars,
            raster,
        }
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    pub fn rotation(&self) -> &RotationState {
        &self.rotation
    }

    pub fn template(&self) -> &Mesh {
        &self.template
    }

    pub fn stars(&self) -> &StarField<R> {
        &self.stars
    }

    pub fn frame(&self) -> &FrameBuffer {
        self.raster.frame()
    }

    /// Render the current state into the frame buffer without advancing rotation
    pub fn render_frame(&mut self) -> RenderResult<FrameStats> {
        let start = Instant::now();
        let mut stats = FrameStats::default();

        self.raster.clear();
        stats.streaks = self.stars.render(&mut self.raster);
        self.stars.update();

        let matrix = Transform::rotation_matrix(&self.rotation);
        let orbit = self.rotation.orbit;
        let camera = &self.config.camera;

        // Fresh copies every frame; the template is never transformed in place
        self.scratch.clear();
        self.scratch.extend(
            self.template
                .triangles
                .iter()
                .map(|t| Transform::transform_triangle(t, &matrix, orbit, camera)),
        );

        for triangle in &self.scratch {
            match self.raster.draw_triangle(triangle)? {
                TriangleOutcome::Drawn { pixels } => {
                    stats.drawn += 1;
                    stats.pixels += pixels;
                }
                TriangleOutcome::Culled => stats.culled += 1,
                TriangleOutcome::Degenerate | TriangleOutcome::Clipped => stats.skipped += 1,
            }
        }

        stats.render_time = start.elapsed();
        trace!("frame rendered: {:?}", stats);
        Ok(stats)
    }

    pub fn advance(&mut self) {
        self.rotation.advance(&self.config.rotation_step, &self.config.camera);
    }

    /// One full tick: render, present, advance, then pace to the target duration
    pub fn tick<S, P>(&mut self, sink: &mut S, pacer: &mut P) -> RenderResult<FrameStats>
    where
        S: FrameSink,
        P: Pacer,
    {
        let start = Instant::now();

        let stats = self.render_frame()?;
        sink.present(self.raster.frame(), &stats)?;
        self.advance();

        pacer.pace(remaining_budget(
            self.config.target_frame_duration,
            start.elapsed(),
        ));
        Ok(stats)
    }
}
