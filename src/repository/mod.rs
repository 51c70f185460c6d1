pub mod meminfo_repository_impl;
pub mod netdata_repository_impl;
pub mod ping_repository_impl;
