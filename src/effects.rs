use crate::config::{EFFECT_FRAME_COUNT, EFFECT_SPARKLE_FRAMES};
use crate::snake::Position;

/// Expanding ring drawn where food was eaten. Lives for a fixed number of frames.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct GrowthEffect {
    pub origin: Position,
    frame: u8,
}

impl GrowthEffect {
    #[must_use]
    pub fn new(origin: Position) -> Self {
        Self { origin, frame: 0 }
    }

    #[must_use]
    pub fn frame(self) -> u8 {
        self.frame
    }

    #[must_use]
    pub fn is_finished(self) -> bool {
        self.frame >= EFFECT_FRAME_COUNT
    }

    /// Ring radius in cells for the current frame.
    #[must_use]
    pub fn radius(self) -> i32 {
        1 + i32::from(self.frame) / 3
    }

    #[must_use]
    pub fn has_sparkles(self) -> bool {
        self.frame < EFFECT_SPARKLE_FRAMES
    }

    /// Cells on the square ring at [`GrowthEffect::radius`] around the origin.
    #[must_use]
    pub fn ring_cells(self) -> Vec<Position> {
        let r = self.radius();
        let mut cells = Vec::with_capacity(usize::try_from(8 * r).unwrap_or_default());
        for dy in -r..=r {
            for dx in -r..=r {
                if dx.abs() == r || dy.abs() == r {
                    cells.push(Position::new(self.origin.x + dx, self.origin.y + dy));
                }
            }
        }
        cells
    }

    /// Eight sparkle cells just inside the ring, rotating a little each frame.
    #[must_use]
    pub fn sparkle_cells(self) -> Vec<Position> {
        if !self.has_sparkles() {
            return Vec::new();
        }

        let reach = self.radius() as f32 * 0.8 + 0.5;
        let spin = f32::from(self.frame) * 15.0;
        (0..8u8)
            .map(|step| {
                let angle = (f32::from(step) * 45.0 + spin).to_radians();
                Position::new(
                    self.origin.x + (reach * angle.cos()).round() as i32,
                    self.origin.y + (reach * angle.sin()).round() as i32,
                )
            })
            .collect()
    }

    fn advance(&mut self) {
        self.frame = self.frame.saturating_add(1);
    }
}

/// All growth effects currently on screen.
#[derive(Debug, Clone, Default)]
pub struct GrowthEffects {
    active: Vec<GrowthEffect>,
}

impl GrowthEffects {
    pub fn spawn(&mut self, origin: Position) {
        self.active.push(GrowthEffect::new(origin));
    }

    /// Moves every effect one frame forward and drops the finished ones.
    pub fn advance(&mut self) {
        for effect in &mut self.active {
            effect.advance();
        }
        self.active.retain(|effect| !effect.is_finished());
    }

    pub fn clear(&mut self) {
        self.active.clear();
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &GrowthEffect> {
        self.active.iter()
    }
}
