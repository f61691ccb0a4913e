pub mod batch;
pub mod contact;
pub mod extract;
pub mod hashtags;
pub mod http;
pub mod listings;
pub mod price;
pub mod properties;
pub mod sitemap;
pub mod traits;
pub mod types;

pub use listings::ListingScraper;
pub use properties::PropertyScraper;
pub use traits::PageScraper;
pub use types::{BatchSettings, ScrapeSettings};
