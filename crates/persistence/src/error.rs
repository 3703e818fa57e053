// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use thiserror::Error;

/// Errors that can occur during persistence operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PersistenceError {
    /// The referenced document does not exist.
    #[error("{entity} '{id}' not found")]
    NotFound {
        /// The document kind.
        entity: &'static str,
        /// The missing document's id.
        id: String,
    },
    /// A status-guarded replacement found the stored document in a
    /// different status than the caller observed.
    #[error("{entity} '{id}' is no longer in status '{expected}' (found '{found}')")]
    StatusConflict {
        /// The document kind.
        entity: &'static str,
        /// The contested document's id.
        id: String,
        /// The status the caller expected.
        expected: String,
        /// The status actually stored.
        found: String,
    },
    /// A document with the same id already exists.
    #[error("duplicate {entity} id '{id}'")]
    DuplicateId {
        /// The document kind.
        entity: &'static str,
        /// The colliding id.
        id: String,
    },
    /// Serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(String),
    /// The storage backend failed.
    #[error("storage backend error: {0}")]
    Backend(String),
}
