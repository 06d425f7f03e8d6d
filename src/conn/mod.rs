pub mod connector;
pub mod handle;
pub mod registry;

mod factory;

pub use connector::{Connector, RawConnection, RedisConnection, RedisConnector};
pub use handle::Handle;
pub use registry::{ConnectionKey, Hub};
