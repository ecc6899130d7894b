// MCP (Model Context Protocol) server exposing Strands Agents documentation
// as tools to agent clients

pub mod codec;
pub mod config;
pub mod protocol;
pub mod server;
pub mod tools;

pub use config::ServerConfig;
pub use server::McpServer;
