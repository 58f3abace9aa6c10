//! Watson service models built on open-schema records.
//!
//! Only payloads that carry caller- or service-defined keys are modeled
//! here. Each model keeps its documented fields typed and everything else as
//! [`Dynamic`](crate::record::Dynamic) extensions.

pub mod conversation;
pub mod discovery;

pub use conversation::{
    Context, LogMessage, MessageInput, MessageRequest, MessageResponse, OutputData,
    RuntimeIntent, SystemResponse,
};
pub use discovery::{QueryResponse, QueryResult, QueryResultMetadata};
