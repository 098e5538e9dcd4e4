//! Names shared by log events and error context
//!
//! Every boundary log line carries `op` and `event`; poll lines add
//! `projection`, `request_id` and `trace_id`.

/// Lifecycle stage of a logged operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OpEvent {
    Start,
    End,
    EndError,
    /// A poll result arrived after its ticket went stale
    Discarded,
}

impl OpEvent {
    pub const ALL: [OpEvent; 4] = [
        OpEvent::Start,
        OpEvent::End,
        OpEvent::EndError,
        OpEvent::Discarded,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            OpEvent::Start => "start",
            OpEvent::End => "end",
            OpEvent::EndError => "end_error",
            OpEvent::Discarded => "discarded",
        }
    }
}

pub const EVENT_START: &str = OpEvent::Start.as_str();
pub const EVENT_END: &str = OpEvent::End.as_str();
pub const EVENT_END_ERROR: &str = OpEvent::EndError.as_str();
pub const EVENT_DISCARDED: &str = OpEvent::Discarded.as_str();

// Operations
pub const OP_POLL: &str = "poll";
pub const OP_SET_STATE: &str = "set_state";
pub const OP_RUN_UNTIL: &str = "run_until";
pub const OP_RUN_UNTIL_CHANGED: &str = "run_until_changed";
