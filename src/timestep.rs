//! Fixed-timestep accumulator
//!
//! Decouples the simulation tick rate from the frontend's frame rate.
//! The frontend feeds in real frame durations; the accumulator answers with
//! how many whole ticks to run, capped so a long stall cannot trigger a
//! spiral of death.

/// Accumulates frame time and releases whole simulation ticks
#[derive(Debug, Clone)]
pub struct FixedTimestep {
    accumulator: f32,
    dt: f32,
    max_substeps: u32,
}

impl FixedTimestep {
    /// Longest single frame the accumulator will absorb, in seconds
    const MAX_FRAME: f32 = 0.1;

    pub fn new(dt: f32, max_substeps: u32) -> Self {
        Self {
            accumulator: 0.0,
            dt,
            max_substeps,
        }
    }

    /// Tick duration in seconds
    #[inline]
    pub fn dt(&self) -> f32 {
        self.dt
    }

    /// Feed one frame's wall-clock duration; returns the number of fixed
    /// ticks to simulate now (0..=max_substeps)
    pub fn advance(&mut self, frame_dt: f32) -> u32 {
        self.accumulator += frame_dt.min(Self::MAX_FRAME);
        let mut substeps = 0;
        while self.accumulator >= self.dt && substeps < self.max_substeps {
            self.accumulator -= self.dt;
            substeps += 1;
        }
        // Anything still owed beyond the cap is dropped, not owed forever
        if self.accumulator >= self.dt {
            self.accumulator = 0.0;
        }
        substeps
    }

    /// Discard accumulated time (after a pause or scene change)
    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }
}
