use thiserror::Error;

#[derive(Error, Debug)]
pub enum TestError {
    #[error(transparent)]
    Controller(#[from] gamjatokki::Error),
    #[error(transparent)]
    Service(#[from] gamjatokki::error::ServiceError),
    #[error(transparent)]
    Join(#[from] tokio::task::JoinError),
}
