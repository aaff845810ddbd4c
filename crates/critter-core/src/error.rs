use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GuiError {
    #[error("area nesting deeper than {limit} levels")]
    AreaDepthExceeded { limit: usize },

    #[error("more than {limit} areas opened in one frame")]
    AreaCapacityExceeded { limit: usize },

    #[error("{what} holds at most {limit} entries, {requested} requested")]
    CapacityExceeded {
        what: &'static str,
        limit: usize,
        requested: usize,
    },

    #[error("mismatched scope: closing {expected} but the innermost open scope is {found}")]
    ScopeMismatch {
        expected: &'static str,
        found: &'static str,
    },

    #[error("{0} area/scroll scope(s) left open at end of frame")]
    UnclosedScopes(usize),

    #[error("called outside begin_frame/end_frame")]
    NotInFrame,

    #[error("begin_frame called while a frame is already open")]
    FrameAlreadyStarted,
}

pub type Result<T, E = GuiError> = std::result::Result<T, E>;
