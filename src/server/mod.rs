pub mod handler;
pub mod protocol;
pub mod resources;
pub mod transport;

pub use handler::{McpServer, SERVER_NAME};
pub use protocol::{JsonRpcError, JsonRpcRequest, JsonRpcResponse};
pub use transport::{run_stdio, serve};
