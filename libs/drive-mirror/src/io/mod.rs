pub mod network;
pub mod remote;
