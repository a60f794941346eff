#![forbid(unsafe_code)]

use td_core::chain::ChainError;

#[derive(Debug)]
pub enum StoreError {
    Io(std::io::Error),
    Sql(rusqlite::Error),
    InvalidInput(&'static str),
    /// The operation's target tab does not exist in the caller's partition.
    TabNotFound { id: String },
    /// A caller-supplied predecessor reference does not resolve within the
    /// caller's partition; missing ids and other owners' ids look the same
    /// on purpose.
    InvalidPredecessor { id: String },
    MoveSelfReference { id: String },
    MoveCycle { id: String, predecessor: String },
    /// The stored chain violates a structural invariant. Surfaced, never
    /// silently repaired.
    CorruptChain { owner: String, detail: ChainError },
    /// More than one tab carries the active flag; only an out-of-band write
    /// can get a partition here.
    MultipleActive { owner: String, count: usize },
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "io: {err}"),
            Self::Sql(err) => write!(f, "sqlite: {err}"),
            Self::InvalidInput(message) => write!(f, "invalid input: {message}"),
            Self::TabNotFound { id } => write!(f, "tab not found (id={id})"),
            Self::InvalidPredecessor { id } => {
                write!(f, "invalid predecessor reference (id={id})")
            }
            Self::MoveSelfReference { id } => {
                write!(f, "tab cannot follow itself (id={id})")
            }
            Self::MoveCycle { id, predecessor } => write!(
                f,
                "move would create a cycle (id={id}, predecessor={predecessor})"
            ),
            Self::CorruptChain { owner, detail } => {
                write!(f, "corrupt chain (owner={owner}): {detail}")
            }
            Self::MultipleActive { owner, count } => {
                write!(f, "multiple active tabs (owner={owner}, count={count})")
            }
        }
    }
}

impl std::error::Error for StoreError {}

impl From<std::io::Error> for StoreError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sql(value)
    }
}
