//! Social network simulation on top of the path finder.
//!
//! Users get sequential ids starting at 1. Friendships are undirected and
//! stored as a pair of directed edges in a private [`Graph`].

use std::collections::{HashMap, HashSet};

use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;
use tracing::debug;

use crate::error::{GraphError, Result};
use crate::graph::Graph;
use crate::path::Path;
use crate::search::shortest_paths_from;

pub type UserId = u64;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
    pub name: String,
}

/// Size and reach of one user's extended network.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NetworkSummary {
    pub user: UserId,
    /// Users reachable through friendships, excluding `user`.
    pub reachable: usize,
    pub total_users: usize,
    /// `reachable` as a fraction of all other users.
    pub coverage: f64,
    /// Mean hop count of the shortest friendship paths.
    pub average_separation: f64,
}

#[derive(Debug, Clone, Default)]
pub struct SocialGraph {
    last_id: UserId,
    users: HashMap<UserId, User>,
    friendships: Graph<UserId>,
}

impl SocialGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a user and return its id.
    pub fn add_user(&mut self, name: impl Into<String>) -> UserId {
        self.last_id += 1;
        let id = self.last_id;
        self.users.insert(id, User { name: name.into() });
        self.friendships.add_vertex(id);
        id
    }

    /// Create a bidirectional friendship.
    ///
    /// Returns `Ok(false)` for self-friendship or an existing friendship and
    /// leaves the graph untouched; the caller decides whether that matters.
    pub fn add_friendship(&mut self, user: UserId, friend: UserId) -> Result<bool> {
        self.ensure_user(user)?;
        self.ensure_user(friend)?;

        if user == friend {
            debug!(user, "rejected self-friendship");
            return Ok(false);
        }
        if self.friendships.has_edge(&user, &friend) {
            debug!(user, friend, "rejected duplicate friendship");
            return Ok(false);
        }
        Ok(self.friendships.add_undirected_edge(user, friend))
    }

    pub fn friends(&self, user: UserId) -> Result<&HashSet<UserId>> {
        self.ensure_user(user)?;
        self.friendships.neighbors(&user)
    }

    pub fn user(&self, id: UserId) -> Option<&User> {
        self.users.get(&id)
    }

    pub fn user_count(&self) -> usize {
        self.users.len()
    }

    /// Undirected friendship count.
    pub fn friendship_count(&self) -> usize {
        self.friendships.edge_count() / 2
    }

    /// Reset the graph and fill it with `num_users` users and
    /// `num_users * avg_friendships / 2` random friendships.
    ///
    /// Every unordered pair is a candidate; candidates are shuffled and a
    /// prefix is taken, so no pair is drawn twice.
    pub fn populate<R: Rng + ?Sized>(
        &mut self,
        num_users: usize,
        avg_friendships: usize,
        rng: &mut R,
    ) -> Result<()> {
        let slots = friend_slots(num_users, avg_friendships)?;
        self.reset_with_users(num_users);

        let ids: Vec<UserId> = (1..=self.last_id).collect();
        let mut candidates: Vec<(UserId, UserId)> = ids
            .iter()
            .enumerate()
            .flat_map(|(i, &a)| ids[i + 1..].iter().map(move |&b| (a, b)))
            .collect();
        candidates.shuffle(rng);

        let target = slots / 2;
        for &(user, friend) in candidates.iter().take(target) {
            self.add_friendship(user, friend)?;
        }

        debug!(
            users = num_users,
            friendships = self.friendship_count(),
            candidates = candidates.len(),
            "populated by shuffle"
        );
        Ok(())
    }

    /// Like [`populate`](Self::populate), but draws random pairs and retries
    /// rejected ones until `num_users * avg_friendships` friend slots are
    /// filled. Cheaper than enumerating all pairs on sparse graphs.
    pub fn populate_sampled<R: Rng + ?Sized>(
        &mut self,
        num_users: usize,
        avg_friendships: usize,
        rng: &mut R,
    ) -> Result<()> {
        let target = friend_slots(num_users, avg_friendships)?;
        self.reset_with_users(num_users);

        let mut slots = 0;
        let mut attempts: u64 = 0;
        while slots < target {
            attempts += 1;
            let user = rng.gen_range(1..=self.last_id);
            let friend = rng.gen_range(1..=self.last_id);
            if self.add_friendship(user, friend)? {
                slots += 2;
            }
        }

        debug!(
            users = num_users,
            friendships = self.friendship_count(),
            attempts,
            "populated by sampling"
        );
        Ok(())
    }

    /// Shortest friendship path from `user` to everyone in their extended
    /// network, keyed by the other user's id. Includes `user → [user]`.
    pub fn all_social_paths(&self, user: UserId) -> Result<HashMap<UserId, Path<UserId>>> {
        self.ensure_user(user)?;
        shortest_paths_from(&self.friendships, &user)
    }

    pub fn network_summary(&self, user: UserId) -> Result<NetworkSummary> {
        let paths = self.all_social_paths(user)?;
        let reachable = paths.len() - 1;
        let others = self.user_count() - 1;

        let coverage = if others == 0 {
            0.0
        } else {
            reachable as f64 / others as f64
        };
        let average_separation = if reachable == 0 {
            0.0
        } else {
            let hops: usize = paths.values().map(Path::hops).sum();
            hops as f64 / reachable as f64
        };

        Ok(NetworkSummary {
            user,
            reachable,
            total_users: self.user_count(),
            coverage,
            average_separation,
        })
    }

    fn reset_with_users(&mut self, num_users: usize) {
        *self = Self {
            friendships: Graph::with_capacity(num_users),
            ..Self::default()
        };
        for i in 1..=num_users {
            self.add_user(format!("User {i}"));
        }
    }

    fn ensure_user(&self, user: UserId) -> Result<()> {
        if self.users.contains_key(&user) {
            Ok(())
        } else {
            Err(GraphError::UserNotFound { user })
        }
    }
}

/// Total friend slots (`num_users * avg_friendships`) for a population
/// request, or `InvalidPopulation` when it cannot be satisfied.
fn friend_slots(num_users: usize, avg_friendships: usize) -> Result<usize> {
    let invalid = GraphError::InvalidPopulation {
        users: num_users,
        avg_friendships,
    };
    if avg_friendships > 0 && avg_friendships >= num_users {
        return Err(invalid);
    }
    num_users.checked_mul(avg_friendships).ok_or(invalid)
}
