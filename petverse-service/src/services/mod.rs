pub mod adoption;
pub mod catalog;
pub mod chat;
pub mod database;
pub mod lost_found;
pub mod metrics;
pub mod pages;
pub mod providers;

pub use adoption::AdoptionService;
pub use catalog::CatalogService;
pub use chat::{ChatReply, ChatService, Language};
pub use database::Database;
pub use lost_found::LostFoundService;
pub use metrics::{get_metrics, init_metrics};
pub use pages::PageResolver;
