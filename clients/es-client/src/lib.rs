//! Elasticsearch Rust Client
//!
//! Small blocking client for the Elasticsearch REST API, covering what a
//! benchmark run needs: index lifecycle, bulk loading and searches.
//! The HTTP library underneath is swappable so the same workload can be
//! timed over different transports.
//!
//! # Example
//!
//! ```no_run
//! use esbench_client::{EsClientBuilder, IndexSettings, Query, TransportKind};
//!
//! fn main() -> Result<(), esbench_client::ClientError> {
//!     let client = EsClientBuilder::new("http://localhost:9200")
//!         .transport(TransportKind::Ureq)
//!         .build()?;
//!
//!     client.delete_index("articles")?;
//!     client.create_index("articles", &IndexSettings::default())?;
//!     client.refresh("articles")?;
//!
//!     let response = client.search("articles", &Query::MatchAll)?;
//!     println!("{} hits in {}ms", response.total(), response.took);
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod protocol;
pub mod transport;

pub use client::{
    BulkBuffer, BulkFlush, EsClient, EsClientBuilder, ImportSummary, IndexSettings, Query,
};
pub use protocol::{
    BulkResponse, ClientError, ClusterHealth, ClusterInfo, Document, SearchResponse,
};
pub use transport::{Method, RawResponse, RequestBody, Transport, TransportKind, TransportOptions};
