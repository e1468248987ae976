//! Identifier type for user records.

use crate::identifier::numeric_identifier;

numeric_identifier!(
    /// Unique identifier for a user record.
    UserId,
    "user"
);
