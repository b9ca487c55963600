mod channels;
mod contents;
mod stats;
mod users;

#[cfg(test)]
pub(crate) mod test;

use std::sync::Arc;

pub use channels::*;
pub use contents::*;
pub use stats::*;
pub use users::*;

use crate::sheets::ValueStore;

#[derive(Clone)]
pub struct Repositories {
    pub users: Users,
    pub contents: Contents,
    pub channels: Channels,
    pub stats: Stats,
}

impl Repositories {
    pub fn new(store: Arc<dyn ValueStore>) -> Self {
        Self {
            users: Users::new(store.clone()),
            contents: Contents::new(store.clone()),
            channels: Channels::new(store.clone()),
            stats: Stats::new(store),
        }
    }
}

/// Data rows live below a single header row, so the n-th row of a data read
/// sits on sheet row n + 2 (1-indexed, offset by the header).
pub(crate) fn data_row_number(index: usize) -> usize {
    index + 2
}

#[macro_export]
macro_rules! repository {
    ($name:ident, $($methods:item),*) => {
        #[derive(Clone)]
        pub struct $name {
            store: std::sync::Arc<dyn $crate::sheets::ValueStore>,
        }

        impl $name {
            pub fn new(store: std::sync::Arc<dyn $crate::sheets::ValueStore>) -> Self {
                Self { store }
            }

            $($methods)*
        }
    };
}
