//! Serves recorded interactions back in order.

use std::collections::{HashMap, VecDeque};

use super::format::{Cassette, Interaction};

/// Replays a cassette, one queue per `(port, method)` pair.
///
/// Calls on different methods do not consume each other's interactions,
/// so only the relative order within a method matters.
pub struct CassetteReplayer {
    queues: HashMap<(String, String), VecDeque<Interaction>>,
    consumed: HashMap<(String, String), usize>,
}

impl CassetteReplayer {
    /// Create a replayer over every interaction in `cassette`.
    #[must_use]
    pub fn new(cassette: &Cassette) -> Self {
        Self::from_interactions(cassette.interactions.iter())
    }

    /// Create a replayer over the interactions of a single port.
    #[must_use]
    pub fn for_port(cassette: &Cassette, port: &str) -> Self {
        Self::from_interactions(cassette.for_port(port))
    }

    fn from_interactions<'a>(interactions: impl Iterator<Item = &'a Interaction>) -> Self {
        let mut queues: HashMap<(String, String), VecDeque<Interaction>> = HashMap::new();
        for interaction in interactions {
            queues
                .entry((interaction.port.clone(), interaction.method.clone()))
                .or_default()
                .push_back(interaction.clone());
        }
        Self { queues, consumed: HashMap::new() }
    }

    /// Return the next interaction for `port::method`.
    ///
    /// # Panics
    ///
    /// Panics when the cassette has no (more) interactions for the pair,
    /// naming what was requested and what the cassette holds.
    pub fn next_interaction(&mut self, port: &str, method: &str) -> Interaction {
        let key = (port.to_string(), method.to_string());
        let Some(queue) = self.queues.get_mut(&key) else {
            let mut available: Vec<String> =
                self.queues.keys().map(|(p, m)| format!("{p}::{m}")).collect();
            available.sort();
            panic!(
                "Cassette exhausted: no interactions recorded for {port}::{method}. \
                 Available: [{}]",
                available.join(", ")
            );
        };

        let consumed = self.consumed.entry(key).or_default();
        let Some(interaction) = queue.pop_front() else {
            panic!(
                "Cassette exhausted: all {consumed} interactions for {port}::{method} \
                 have been consumed"
            );
        };
        *consumed += 1;
        interaction
    }

    /// Interactions not yet served, across all methods.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.queues.values().map(VecDeque::len).sum()
    }
}
