//! Headless renderer that reports frames to the log.

use aethelgard_gameplay::{FrameRenderer, FrameView, Locomotion};
use tracing::{debug, trace};

/// Logs a one-line world summary every `interval` frames.
#[derive(Debug)]
pub struct LogRenderer {
    interval: u64,
    frames: u64,
    frozen_frames: u64,
    running_frames: u64,
}

impl LogRenderer {
    /// Creates a renderer that reports every `interval` frames.
    #[must_use]
    pub fn new(interval: u64) -> Self {
        Self {
            interval: interval.max(1),
            frames: 0,
            frozen_frames: 0,
            running_frames: 0,
        }
    }

    /// Frames rendered.
    #[must_use]
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Frames rendered while the world was frozen.
    #[must_use]
    pub fn frozen_frames(&self) -> u64 {
        self.frozen_frames
    }

    /// Frames where the player was running.
    #[must_use]
    pub fn running_frames(&self) -> u64 {
        self.running_frames
    }
}

impl FrameRenderer for LogRenderer {
    fn render(&mut self, view: &FrameView<'_>) {
        self.frames += 1;
        if view.frozen {
            self.frozen_frames += 1;
        }
        let player = &view.world.player;
        if player.locomotion == Locomotion::Run {
            self.running_frames += 1;
        }

        if view.frame % self.interval == 0 {
            debug!(
                frame = view.frame,
                elapsed = format_args!("{:.2}", view.elapsed),
                zone = %view.world.zone,
                x = player.position.x,
                z = player.position.y,
                enemies = view.world.registry.enemy_count(),
                loot = view.world.loot.len(),
                zoom = view.zoom,
                frozen = view.frozen,
                "Frame"
            );
        } else {
            trace!(frame = view.frame, frozen = view.frozen, "Frame");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aethelgard_gameplay::{World, Zone};

    #[test]
    fn test_counts_frames() {
        let mut world = World::empty(Zone::Castle);
        let mut renderer = LogRenderer::new(0);

        for frame in 1..=4 {
            world.player.locomotion = if frame % 2 == 0 {
                Locomotion::Run
            } else {
                Locomotion::Idle
            };
            renderer.render(&FrameView {
                frame,
                elapsed: frame as f64 / 60.0,
                frozen: frame == 3,
                zoom: 1.2,
                world: &world,
            });
        }

        assert_eq!(renderer.frames(), 4);
        assert_eq!(renderer.frozen_frames(), 1);
        assert_eq!(renderer.running_frames(), 2);
    }
}
