//! Storage Adapters
//!
//! Implementations of the key-value, override and output ports.
//!
//! ## Available Adapters
//!
//! - **FileKeyValueStore** - One JSON file per key on disk
//! - **InMemoryKeyValueStore** - Values in memory (testing/development)
//! - **KeyValueOverrideStore** - Price overrides as a JSON record in any key-value store
//! - **LocalOutputStorage** - Exported documents in an output directory
//!
//! ## Usage
//!
//! ```ignore
//! use adapters::storage::{FileKeyValueStore, KeyValueOverrideStore};
//!
//! let kv = Arc::new(FileKeyValueStore::new("./data"));
//! let overrides = KeyValueOverrideStore::new(kv);
//! ```

mod atomic;
mod file_key_value_store;
mod in_memory_key_value_store;
mod key_value_override_store;
mod local_output_storage;

pub use file_key_value_store::FileKeyValueStore;
pub use in_memory_key_value_store::InMemoryKeyValueStore;
pub use key_value_override_store::{KeyValueOverrideStore, OVERRIDE_KEY};
pub use local_output_storage::LocalOutputStorage;
