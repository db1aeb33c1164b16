mod append;
mod init;
mod query;

pub use append::append;
pub use init::init;
pub use query::query;
