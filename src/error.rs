use thiserror::Error;

#[derive(Debug, Error)]
pub enum ShopError {
    /// La barbería ya hizo su liberación inicial del acceso a los asientos.
    #[error("the waiting room was already opened")]
    AlreadyOpen,
    #[error("seat access released while it was already available")]
    DoubleRelease,
    #[error("returning a seat would exceed the capacity of {capacity}")]
    SeatOverflow { capacity: usize },
    #[error("the other end of the `{0}` handshake is gone")]
    Disconnected(&'static str),
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("could not spawn worker thread")]
    Spawn(#[from] std::io::Error),
    #[error("worker `{0}` panicked")]
    WorkerPanicked(String),
}

pub type Result<T> = std::result::Result<T, ShopError>;
