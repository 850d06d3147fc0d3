//! Ports implemented by the infrastructure layer

mod ports;

pub use ports::{CommentSource, RemoteToggleClient, RepoResult};
