mod gateway;

pub use gateway::DetourGateway;
