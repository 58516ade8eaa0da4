//! Job and episode status state machines.
//!
//! This module lives in `core` (zero internal deps) so it can be used by
//! both the repository layer and the pipeline orchestrator. The status IDs
//! are intentionally duplicated from the `db` crate's lookup enums.

// ---------------------------------------------------------------------------
// Job state machine
// ---------------------------------------------------------------------------

/// Job status IDs matching `job_statuses` seed data (1-based SMALLSERIAL).
pub mod job_state_machine {
    /// Returns the set of valid target status IDs reachable from `from_status`.
    ///
    /// `Done` (3) is terminal. `Failed` (4) may only return to `Queued` (1)
    /// via an explicit retry action; no other transition leaves it.
    /// `Queued` (1) may fail directly: a precondition rejection marks the
    /// job `Failed` before it ever starts running.
    pub fn valid_transitions(from_status: i16) -> &'static [i16] {
        match from_status {
            // Queued -> Running, or Failed on precondition rejection
            1 => &[2, 4],
            // Running -> Done, Failed
            2 => &[3, 4],
            // Done: terminal
            3 => &[],
            // Failed -> Queued (explicit retry only)
            4 => &[1],
            // Unknown status: no transitions allowed
            _ => &[],
        }
    }

    /// Check whether a transition from `from` to `to` is valid.
    pub fn can_transition(from: i16, to: i16) -> bool {
        valid_transitions(from).contains(&to)
    }

    /// Validate a state transition, returning an error message for invalid ones.
    pub fn validate_transition(from: i16, to: i16) -> Result<(), String> {
        if can_transition(from, to) {
            Ok(())
        } else {
            let from_name = status_name(from);
            let to_name = status_name(to);
            Err(format!(
                "Invalid job transition: {from_name} ({from}) -> {to_name} ({to})"
            ))
        }
    }

    /// A job in `Done` or `Failed` will not transition again without
    /// external action.
    pub fn is_terminal(status: i16) -> bool {
        matches!(status, 3 | 4)
    }

    /// Human-readable name for a status ID (for error messages).
    fn status_name(id: i16) -> &'static str {
        match id {
            1 => "Queued",
            2 => "Running",
            3 => "Done",
            4 => "Failed",
            _ => "Unknown",
        }
    }
}

// ---------------------------------------------------------------------------
// Episode publish gating
// ---------------------------------------------------------------------------

/// Episode status IDs matching `episode_statuses` seed data.
pub mod episode_state {
    pub const DRAFT: i16 = 1;
    pub const QUEUED: i16 = 2;
    pub const RUNNING: i16 = 3;
    /// Generated but not publicly visible. The resting state after a
    /// successful pipeline run and after deactivation.
    pub const DONE: i16 = 4;
    pub const FAILED: i16 = 5;
    /// Publicly visible. Reached only from `DONE` via explicit activation.
    pub const PUBLISHED: i16 = 6;

    /// An episode may only be activated once generation has fully finished.
    pub fn can_activate(status: i16) -> bool {
        status == DONE
    }

    /// Only a published episode can be taken back down.
    pub fn can_deactivate(status: i16) -> bool {
        status == PUBLISHED
    }

    /// Human-readable name for a status ID (for error messages).
    pub fn status_name(id: i16) -> &'static str {
        match id {
            DRAFT => "Draft",
            QUEUED => "Queued",
            RUNNING => "Running",
            DONE => "Done",
            FAILED => "Failed",
            PUBLISHED => "Published",
            _ => "Unknown",
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
