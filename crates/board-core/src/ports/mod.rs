//! Ports - trait definitions for the data store.
//! These are the "interfaces" that infrastructure must implement.

mod page;
mod repository;
mod transaction;

pub use page::{MAX_PAGE_SIZE, Page, PageRequest};
pub use repository::{BaseRepository, CommentRepository, MemberRepository, PostRepository};
pub use transaction::{TransactionManager, TxMode, UnitOfWork};
