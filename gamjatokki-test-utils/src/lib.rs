pub mod builder;
pub mod error;
pub mod fixtures;
pub mod service;

pub use builder::{TestBuilder, TestSetup};
pub use error::TestError;
pub use service::MockRemoteService;

pub mod prelude {
    pub use crate::{fixtures::factory, MockRemoteService, TestBuilder, TestError, TestSetup};
}
