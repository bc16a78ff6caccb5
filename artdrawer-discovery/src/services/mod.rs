//! Services for the discovery microservice

pub mod collection_store;
pub mod connectivity;
pub mod discovery;
pub mod enrichment_client;
pub mod feed;
pub mod image_fetcher;
pub mod remote_store;
pub mod search_client;
pub mod session;

pub use collection_store::{CollectionStore, DrawerEntry, DrawerSummary};
pub use connectivity::Connectivity;
pub use discovery::DiscoveryService;
pub use enrichment_client::GeminiClient;
pub use feed::{ComparisonSet, ResultFeed};
pub use image_fetcher::HttpImageFetcher;
pub use remote_store::{HttpDocumentStore, InMemoryDocumentStore};
pub use search_client::GoogleSearchClient;
pub use session::Session;
