pub mod render_traits;
pub mod repository_traits;
pub mod service_traits;
