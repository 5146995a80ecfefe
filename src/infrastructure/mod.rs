// Infrastructure layer - host adapters and supporting utilities
pub mod logging;
pub mod persistence;
pub mod repositories;
