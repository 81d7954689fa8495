//! Spawn sequence - which shape comes next
//!
//! The default policy is a deterministic round-robin over the catalog
//! (I, J, L, O, S, T, Z, I, ...). A seeded 7-bag is available as an opt-in:
//! each bag holds one of every shape, shuffled with a small LCG so the same
//! seed always replays the same game.

use crate::types::ShapeKind;

/// How the next shape is chosen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SpawnPolicy {
    /// Catalog order, starting at I
    #[default]
    Cycle,
    /// Shuffled 7-bag
    Bag { seed: u32 },
}

impl SpawnPolicy {
    /// Parse `cycle` or `bag:<seed>`
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("cycle") {
            return Some(SpawnPolicy::Cycle);
        }
        let (name, seed) = s.split_once(':')?;
        if !name.eq_ignore_ascii_case("bag") {
            return None;
        }
        seed.trim().parse().ok().map(|seed| SpawnPolicy::Bag { seed })
    }
}

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Random value in `[0, max)`
    pub fn next_range(&mut self, max: u32) -> u32 {
        self.next_u32() % max
    }

    /// Fisher-Yates
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        for i in (1..slice.len()).rev() {
            let j = self.next_range((i + 1) as u32) as usize;
            slice.swap(i, j);
        }
    }
}

#[derive(Debug, Clone)]
struct Bag {
    seed: u32,
    rng: SimpleRng,
    pieces: [ShapeKind; 7],
    index: usize,
}

impl Bag {
    fn new(seed: u32) -> Self {
        let mut bag = Self {
            seed,
            rng: SimpleRng::new(seed),
            pieces: ShapeKind::ALL,
            index: 0,
        };
        bag.refill();
        bag
    }

    fn refill(&mut self) {
        self.pieces = ShapeKind::ALL;
        self.rng.shuffle(&mut self.pieces);
        self.index = 0;
    }

    fn draw(&mut self) -> ShapeKind {
        if self.index >= self.pieces.len() {
            self.refill();
        }
        let kind = self.pieces[self.index];
        self.index += 1;
        kind
    }

    fn peek(&self) -> ShapeKind {
        if self.index < self.pieces.len() {
            return self.pieces[self.index];
        }
        // Preview the next bag on a cloned RNG so draw() stays consistent.
        let mut rng = self.rng.clone();
        let mut next = ShapeKind::ALL;
        rng.shuffle(&mut next);
        next[0]
    }
}

#[derive(Debug, Clone)]
enum Source {
    Cycle { index: usize },
    Bag(Bag),
}

/// Infinite stream of shape kinds for the spawner
#[derive(Debug, Clone)]
pub struct PieceSequence {
    policy: SpawnPolicy,
    source: Source,
}

impl PieceSequence {
    pub fn new(policy: SpawnPolicy) -> Self {
        let source = match policy {
            SpawnPolicy::Cycle => Source::Cycle { index: 0 },
            SpawnPolicy::Bag { seed } => Source::Bag(Bag::new(seed)),
        };
        Self { policy, source }
    }

    pub fn policy(&self) -> SpawnPolicy {
        self.policy
    }

    /// Take the next kind
    pub fn next(&mut self) -> ShapeKind {
        match &mut self.source {
            Source::Cycle { index } => {
                let kind = ShapeKind::ALL[*index];
                *index = (*index + 1) % ShapeKind::ALL.len();
                kind
            }
            Source::Bag(bag) => bag.draw(),
        }
    }

    /// The kind the next call to [`PieceSequence::next`] returns
    pub fn peek(&self) -> ShapeKind {
        match &self.source {
            Source::Cycle { index } => ShapeKind::ALL[*index],
            Source::Bag(bag) => bag.peek(),
        }
    }

    /// Rewind to the first kind of the policy
    pub fn reset(&mut self) {
        *self = Self::new(self.policy);
    }

    /// Seed of a bag policy, if any
    pub fn seed(&self) -> Option<u32> {
        match &self.source {
            Source::Cycle { .. } => None,
            Source::Bag(bag) => Some(bag.seed),
        }
    }
}

impl Default for PieceSequence {
    fn default() -> Self {
        Self::new(SpawnPolicy::Cycle)
    }
}
