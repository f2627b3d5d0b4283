pub mod connection;

pub use connection::FileConnection;
