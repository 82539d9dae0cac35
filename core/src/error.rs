use thiserror::Error;

use crate::social::UserId;

/// Errors raised by graph, ancestry and social operations.
///
/// "No path" and "no ancestor" are ordinary outcomes and are returned as
/// `None`, never as an error.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    #[error("vertex not found: {vertex}")]
    VertexNotFound { vertex: String },

    #[error("user not found: {user}")]
    UserNotFound { user: UserId },

    #[error("ancestor relations contain a cycle through {vertex}")]
    CyclicAncestry { vertex: String },

    #[error(
        "cannot give {users} users an average of {avg_friendships} friendships \
         (average must be lower than the user count)"
    )]
    InvalidPopulation { users: usize, avg_friendships: usize },
}

impl GraphError {
    pub(crate) fn vertex_not_found<V: std::fmt::Debug>(vertex: &V) -> Self {
        GraphError::VertexNotFound {
            vertex: format!("{vertex:?}"),
        }
    }
}

pub type Result<T> = std::result::Result<T, GraphError>;
