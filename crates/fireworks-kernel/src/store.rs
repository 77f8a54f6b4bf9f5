//! Particle store with swap-compaction.
//!
//! Particles live in two dense, index-aligned arrays (render and simulation
//! halves). Capacity is fixed at construction and both arrays are reserved
//! up front, so no allocation happens while the show runs.
//!
//! ## Admission
//!
//! [`ParticleStore::try_append`] is the only way in. A full store rejects the
//! particle and leaves every record untouched; callers treat that as
//! backpressure, not as an error.
//!
//! ## Removal
//!
//! [`ParticleStore::remove_at`] overwrites the slot with the last particle and
//! shrinks by one. Order is not preserved.
//!
//! ## Traversal
//!
//! [`ParticleStore::for_each_mut`] visits every live particle exactly once
//! while the visitor removes and spawns particles:
//! - spawns requested by the visitor are admitted straight after the visit
//! - a removed slot is revisited, since it now holds the former last particle
//! - a kept slot advances to the next index
//!
//! Spawns appended past the cursor are visited later in the same pass.
//! Each visit's [`SpawnQueue`] only holds as many particles as the store has
//! room for; the rest are counted as dropped without being queued.

use tracing::trace;

use crate::particle::{Particle, RenderRecord, SimRecord};

/// Hard cap on live particles. The GPU vertex buffer is sized for this many.
pub const MAX_PARTICLES: usize = 50_000;

/// Decision returned by a traversal visitor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visit {
    /// Keep the particle and move on.
    Keep,
    /// Remove the particle and revisit its slot.
    Remove,
}

/// Counters gathered during one traversal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PassStats {
    /// Number of visitor calls.
    pub visited: usize,
    /// Particles removed by compaction.
    pub removed: usize,
    /// Spawned particles admitted into the store.
    pub appended: usize,
    /// Spawned particles rejected because the store was full.
    pub dropped: usize,
}

/// Spawn requests collected during one visit, bounded by the room left in
/// the store.
#[derive(Debug, Clone, Default)]
pub struct SpawnQueue {
    particles: Vec<Particle>,
    limit: usize,
    dropped: usize,
}

impl SpawnQueue {
    /// Creates a queue accepting at most `limit` particles.
    #[must_use]
    pub fn with_limit(limit: usize) -> Self {
        Self {
            particles: Vec::new(),
            limit,
            dropped: 0,
        }
    }

    /// Queues a particle if there is room, otherwise counts it as dropped.
    pub fn push(&mut self, particle: Particle) -> bool {
        if self.particles.len() < self.limit {
            self.particles.push(particle);
            true
        } else {
            self.dropped = self.dropped.saturating_add(1);
            false
        }
    }

    /// Number of particles that can still be queued.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.limit.saturating_sub(self.particles.len())
    }

    /// Counts `count` requests dropped without being queued.
    pub fn record_dropped(&mut self, count: usize) {
        self.dropped = self.dropped.saturating_add(count);
    }

    /// Particles queued so far.
    #[must_use]
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Requests dropped so far.
    #[must_use]
    pub const fn dropped(&self) -> usize {
        self.dropped
    }

    fn reset(&mut self, limit: usize) {
        self.particles.clear();
        self.limit = limit;
        self.dropped = 0;
    }
}

/// Dense, capacity-bounded store of particle record pairs.
#[derive(Debug, Clone)]
pub struct ParticleStore {
    /// Render halves, uploaded to the GPU.
    render: Vec<RenderRecord>,
    /// Simulation halves, index-aligned with `render`.
    sim: Vec<SimRecord>,
    /// Fixed capacity.
    capacity: usize,
    /// Spawn requests collected during a visit; reused across passes.
    spawn_queue: SpawnQueue,
}

impl Default for ParticleStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ParticleStore {
    /// Creates a store holding at most [`MAX_PARTICLES`] particles.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(MAX_PARTICLES)
    }

    /// Creates a store with a custom fixed capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            render: Vec::with_capacity(capacity),
            sim: Vec::with_capacity(capacity),
            capacity,
            spawn_queue: SpawnQueue::with_limit(0),
        }
    }

    /// Returns the number of live particles.
    #[must_use]
    pub fn len(&self) -> usize {
        self.render.len()
    }

    /// Returns whether the store is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.render.is_empty()
    }

    /// Returns whether the store is full.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.render.len() >= self.capacity
    }

    /// Returns the fixed capacity.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Render halves of all live particles.
    #[must_use]
    pub fn render_records(&self) -> &[RenderRecord] {
        &self.render
    }

    /// Simulation halves of all live particles.
    #[must_use]
    pub fn sim_records(&self) -> &[SimRecord] {
        &self.sim
    }

    /// Returns the particle at `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<Particle> {
        Some(Particle::new(*self.render.get(index)?, *self.sim.get(index)?))
    }

    /// Returns mutable access to both halves of the particle at `index`.
    pub fn get_mut(&mut self, index: usize) -> Option<(&mut RenderRecord, &mut SimRecord)> {
        Some((self.render.get_mut(index)?, self.sim.get_mut(index)?))
    }

    /// Appends a particle if there is room.
    ///
    /// Returns `true` if the particle was added, `false` if the store is full.
    pub fn try_append(&mut self, render: RenderRecord, sim: SimRecord) -> bool {
        if self.is_full() {
            trace!(
                "Particle store full ({} particles), dropping {}",
                self.capacity,
                sim.kind.name()
            );
            return false;
        }
        self.render.push(render);
        self.sim.push(sim);
        true
    }

    /// Appends particles until the store fills up.
    ///
    /// Returns the number of particles admitted.
    pub fn try_extend<I>(&mut self, particles: I) -> usize
    where
        I: IntoIterator<Item = Particle>,
    {
        let mut admitted = 0;
        for particle in particles {
            if !self.try_append(particle.render, particle.sim) {
                break;
            }
            admitted += 1;
        }
        admitted
    }

    /// Removes the particle at `index` by moving the last particle into its
    /// slot.
    ///
    /// Returns the removed particle, or `None` if `index` is out of range.
    pub fn remove_at(&mut self, index: usize) -> Option<Particle> {
        if index >= self.render.len() {
            return None;
        }
        let render = self.render.swap_remove(index);
        let sim = self.sim.swap_remove(index);
        Some(Particle::new(render, sim))
    }

    /// Removes every particle. Capacity is kept.
    pub fn clear(&mut self) {
        self.render.clear();
        self.sim.clear();
    }

    /// Visits every live particle once, admitting spawns and compacting
    /// removals as it goes.
    ///
    /// The visitor receives both halves of the particle and a queue it may
    /// push spawn requests onto. The queue is limited to the room left in the
    /// store; spawns beyond it are dropped and counted in
    /// [`PassStats::dropped`].
    ///
    /// The pass stops at the first visitor error; particles visited before it
    /// keep their updates.
    pub fn for_each_mut<E, F>(&mut self, mut visit: F) -> Result<PassStats, E>
    where
        F: FnMut(&mut RenderRecord, &mut SimRecord, &mut SpawnQueue) -> Result<Visit, E>,
    {
        let mut queue = std::mem::take(&mut self.spawn_queue);
        let mut stats = PassStats::default();
        let mut index = 0;

        let outcome = loop {
            if index >= self.render.len() {
                break Ok(());
            }

            stats.visited += 1;
            queue.reset(self.capacity.saturating_sub(self.render.len()));
            let decision = match visit(&mut self.render[index], &mut self.sim[index], &mut queue)
            {
                Ok(decision) => decision,
                Err(err) => break Err(err),
            };

            stats.dropped = stats.dropped.saturating_add(queue.dropped);
            for particle in queue.particles.drain(..) {
                if self.try_append(particle.render, particle.sim) {
                    stats.appended += 1;
                } else {
                    stats.dropped += 1;
                }
            }

            match decision {
                Visit::Remove => {
                    self.remove_at(index);
                    stats.removed += 1;
                },
                Visit::Keep => index += 1,
            }
        };

        queue.reset(0);
        self.spawn_queue = queue;
        outcome.map(|()| stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::particle::ParticleType;
    use glam::Vec3;
    use proptest::prelude::*;
    use std::convert::Infallible;

    fn star(life: f32) -> (RenderRecord, SimRecord) {
        (
            RenderRecord::default(),
            SimRecord::new(ParticleType::StarSimple, Vec3::ZERO, life),
        )
    }

    fn tagged(tag: f32) -> (RenderRecord, SimRecord) {
        let (mut render, sim) = star(1.0);
        render.position = Vec3::splat(tag);
        (render, sim.with_timer(tag))
    }

    #[test]
    fn test_default_capacity() {
        let store = ParticleStore::new();
        assert_eq!(store.capacity(), MAX_PARTICLES);
        assert!(store.is_empty());
    }

    #[test]
    fn test_try_append_until_full() {
        let mut store = ParticleStore::with_capacity(3);
        for _ in 0..3 {
            let (render, sim) = star(1.0);
            assert!(store.try_append(render, sim));
        }
        assert!(store.is_full());

        let before = store.clone();
        let (render, sim) = star(5.0);
        assert!(!store.try_append(render, sim));
        assert_eq!(store.len(), 3);
        assert_eq!(store.render_records(), before.render_records());
        assert_eq!(store.sim_records(), before.sim_records());
    }

    #[test]
    fn test_zero_capacity_rejects_everything() {
        let mut store = ParticleStore::with_capacity(0);
        let (render, sim) = star(1.0);
        assert!(!store.try_append(render, sim));
        assert!(store.is_empty());
    }

    #[test]
    fn test_try_extend_stops_at_capacity() {
        let mut store = ParticleStore::with_capacity(4);
        let particles = (0..10).map(|i| {
            let (render, sim) = tagged(i as f32);
            Particle::new(render, sim)
        });
        assert_eq!(store.try_extend(particles), 4);
        assert_eq!(store.len(), 4);
    }

    #[test]
    fn test_remove_at_moves_last_into_slot() {
        let mut store = ParticleStore::with_capacity(8);
        for i in 0..5 {
            let (render, sim) = tagged(i as f32);
            store.try_append(render, sim);
        }

        let removed = store.remove_at(1).expect("index in range");
        assert!((removed.sim.timer - 1.0).abs() < f32::EPSILON);
        assert_eq!(store.len(), 4);

        // Former last particle (tag 4) now sits at index 1
        let moved = store.get(1).expect("slot filled");
        assert!((moved.sim.timer - 4.0).abs() < f32::EPSILON);
        assert_eq!(moved.render.position, Vec3::splat(4.0));

        // Others untouched
        let tags: Vec<f32> = store.sim_records().iter().map(|s| s.timer).collect();
        assert_eq!(tags, vec![0.0, 4.0, 2.0, 3.0]);
    }

    #[test]
    fn test_remove_last_just_shrinks() {
        let mut store = ParticleStore::with_capacity(4);
        for i in 0..3 {
            let (render, sim) = tagged(i as f32);
            store.try_append(render, sim);
        }
        store.remove_at(2);
        let tags: Vec<f32> = store.sim_records().iter().map(|s| s.timer).collect();
        assert_eq!(tags, vec![0.0, 1.0]);
    }

    #[test]
    fn test_remove_out_of_range() {
        let mut store = ParticleStore::with_capacity(4);
        assert!(store.remove_at(0).is_none());
    }

    #[test]
    fn test_for_each_removes_all_expired() {
        let mut store = ParticleStore::with_capacity(16);
        for _ in 0..10 {
            let (render, sim) = star(0.0);
            store.try_append(render, sim);
        }

        let stats = store
            .for_each_mut(|_, sim, _| {
                Ok::<_, Infallible>(if sim.is_expired() {
                    Visit::Remove
                } else {
                    Visit::Keep
                })
            })
            .expect("infallible");

        assert!(store.is_empty());
        assert_eq!(stats.visited, 10);
        assert_eq!(stats.removed, 10);
    }

    #[test]
    fn test_for_each_revisits_swapped_slot() {
        let mut store = ParticleStore::with_capacity(8);
        // Alternate dead and alive so every removal swaps in another particle
        for i in 0..6 {
            let (render, mut sim) = tagged(i as f32);
            sim.life = if i % 2 == 0 { 0.0 } else { 1.0 };
            store.try_append(render, sim);
        }

        let mut seen = Vec::new();
        store
            .for_each_mut(|_, sim, _| {
                seen.push(sim.timer as i32);
                Ok::<_, Infallible>(if sim.is_expired() {
                    Visit::Remove
                } else {
                    Visit::Keep
                })
            })
            .expect("infallible");

        seen.sort_unstable();
        assert_eq!(seen, vec![0, 1, 2, 3, 4, 5]);
        assert_eq!(store.len(), 3);
        assert!(store.sim_records().iter().all(|s| !s.is_expired()));
    }

    #[test]
    fn test_for_each_visits_spawns_appended_ahead() {
        let mut store = ParticleStore::with_capacity(8);
        let (render, sim) = tagged(0.0);
        store.try_append(render, sim);

        let mut visits = 0;
        let stats = store
            .for_each_mut(|_, sim, queue| {
                visits += 1;
                if sim.timer < 0.5 {
                    let (render, child) = tagged(1.0);
                    queue.push(Particle::new(render, child));
                }
                Ok::<_, Infallible>(Visit::Keep)
            })
            .expect("infallible");

        assert_eq!(visits, 2);
        assert_eq!(stats.appended, 1);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_for_each_counts_dropped_spawns() {
        let mut store = ParticleStore::with_capacity(2);
        let (render, sim) = tagged(0.0);
        store.try_append(render, sim);

        let stats = store
            .for_each_mut(|_, sim, queue| {
                if sim.timer < 0.5 {
                    for _ in 0..5 {
                        let (render, child) = tagged(1.0);
                        queue.push(Particle::new(render, child));
                    }
                }
                Ok::<_, Infallible>(Visit::Keep)
            })
            .expect("infallible");

        assert_eq!(stats.appended, 1);
        assert_eq!(stats.dropped, 4);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_spawn_queue_holds_only_remaining_room() {
        let mut queue = SpawnQueue::with_limit(2);
        for i in 0..3 {
            let (render, sim) = tagged(i as f32);
            queue.push(Particle::new(render, sim));
        }
        assert_eq!(queue.particles().len(), 2);
        assert_eq!(queue.remaining(), 0);
        assert_eq!(queue.dropped(), 1);

        queue.record_dropped(usize::MAX);
        assert_eq!(queue.dropped(), usize::MAX);
    }

    #[test]
    fn test_for_each_stops_on_error() {
        let mut store = ParticleStore::with_capacity(4);
        for i in 0..3 {
            let (render, sim) = tagged(i as f32);
            store.try_append(render, sim);
        }

        let result = store.for_each_mut(|_, sim, _| {
            if sim.timer > 0.5 {
                Err("boom")
            } else {
                sim.life = 9.0;
                Ok(Visit::Keep)
            }
        });

        assert_eq!(result, Err("boom"));
        assert_eq!(store.len(), 3);
        assert!((store.sim_records()[0].life - 9.0).abs() < f32::EPSILON);
    }

    proptest! {
        #[test]
        fn prop_halves_stay_aligned(
            lives in proptest::collection::vec(-1.0f32..1.0, 0..64),
            capacity in 0usize..48,
        ) {
            let mut store = ParticleStore::with_capacity(capacity);
            for (i, life) in lives.iter().enumerate() {
                let (render, mut sim) = tagged(i as f32);
                sim.life = *life;
                store.try_append(render, sim);
            }
            prop_assert!(store.len() <= capacity);

            store
                .for_each_mut(|render, sim, _| {
                    // Alignment: the tag written into both halves must agree
                    assert!((render.position.x - sim.timer).abs() < f32::EPSILON);
                    Ok::<_, Infallible>(if sim.is_expired() { Visit::Remove } else { Visit::Keep })
                })
                .expect("infallible");

            prop_assert_eq!(store.render_records().len(), store.sim_records().len());
            prop_assert!(store.sim_records().iter().all(|s| !s.is_expired()));
        }
    }
}
