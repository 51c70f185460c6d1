pub mod host_stats_repository;
pub mod liveness_repository;
pub mod metrics_repository;
