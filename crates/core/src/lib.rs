#![forbid(unsafe_code)]

pub mod codec;
pub mod locator;
pub mod model;
pub mod time;

pub use codec::{BookmarkError, SUSPEND_DATA_LIMIT, decode, encode, try_decode};
pub use locator::{MAX_PARENT_HOPS, Search, Window, locate, search};
pub use time::Clock;
