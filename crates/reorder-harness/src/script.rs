#![forbid(unsafe_code)]

//! Seeded random pointer scripts.
//!
//! Sequences are deterministic per seed so a failing run can be replayed.
//! Steps are biased toward realistic drags (press, long waits, sweeps,
//! release) with cancels, stray presses, and ticks mixed in.

/// One scripted input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScriptStep {
    Press { y: f32 },
    Move { y: f32 },
    Release,
    /// Pointer cancel from the platform.
    PointerCancel,
    /// Programmatic cancel.
    Cancel,
    /// Advance time and poll.
    Wait { ms: u64 },
    /// Advance time and tick.
    Tick { ms: u64 },
}

/// Deterministic PRNG (xorshift64).
struct Rng {
    state: u64,
}

impl Rng {
    fn new(seed: u64) -> Self {
        Self {
            state: if seed == 0 { 1 } else { seed },
        }
    }

    fn next(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        x
    }

    fn below(&mut self, n: u64) -> u64 {
        self.next() % n.max(1)
    }

    fn unit(&mut self) -> f32 {
        (self.next() >> 40) as f32 / (1u64 << 24) as f32
    }
}

/// Generator of pointer scripts over a viewport.
#[derive(Debug, Clone, Copy)]
pub struct PointerScript {
    pub seed: u64,
    pub steps: usize,
    /// Pointer positions range a little past both viewport edges.
    pub viewport_height: f32,
}

impl PointerScript {
    pub fn new(seed: u64, steps: usize, viewport_height: f32) -> Self {
        Self {
            seed,
            steps,
            viewport_height,
        }
    }

    pub fn generate(&self) -> Vec<ScriptStep> {
        let mut rng = Rng::new(self.seed);
        let span = self.viewport_height + 80.0;
        (0..self.steps)
            .map(|_| {
                let y = rng.unit() * span - 40.0;
                match rng.below(20) {
                    0..=2 => ScriptStep::Press { y },
                    3..=8 => ScriptStep::Move { y },
                    9..=10 => ScriptStep::Release,
                    11 => ScriptStep::PointerCancel,
                    12 => ScriptStep::Cancel,
                    13..=16 => ScriptStep::Wait {
                        ms: rng.below(700),
                    },
                    _ => ScriptStep::Tick {
                        ms: 1 + rng.below(40),
                    },
                }
            })
            .collect()
    }
}
