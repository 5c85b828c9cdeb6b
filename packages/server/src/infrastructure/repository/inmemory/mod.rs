//! InMemory Repository 実装
//!
//! プロセスの生存期間だけ保持されるストア群。再起動で空に戻ります。

mod activity_log;
mod append_log;
mod history;
mod session_registry;

pub use activity_log::InMemoryActivityLog;
pub use history::InMemoryHistoryStore;
pub use session_registry::InMemorySessionRegistry;
