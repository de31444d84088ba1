//! Challenge lifecycle state machine:
//!
//! ```text
//!     generate
//! Outstanding ──respond (all cells valid)──▶ Resolved
//!      │
//!      │ deadline exceeded / invalid response
//!      ▼
//!  Slashable
//! ```

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChallengeStatus {
    Outstanding,
    Resolved,
    Slashable,
}
