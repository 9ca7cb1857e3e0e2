//! Synchronous facade over the async loaders.
//!
//! Every call blocks the current thread on a shared Tokio runtime, so none of these functions may
//! be used from inside an async context.

pub mod appconfig;

use once_cell::sync::Lazy;
use tokio::runtime::Runtime;

macro_rules! block_on_methods {
    ($(fn $name:ident($($arg:ident : $ty:ty),*) -> $ret:ty);* $(;)?) => {
        $(pub fn $name(&self, $($arg:$ty),*) -> $ret {
            $crate::blocking::RT.block_on(self.inner.$name($($arg),*))
        })*
    };
}

pub(crate) use block_on_methods;

static RT: Lazy<Runtime> = Lazy::new(|| {
    tokio::runtime::Builder::new_multi_thread()
        .enable_all() // timer, I/O
        .build()
        .expect("Tokio runtime")
});

fn block_on<F: std::future::Future>(fut: F) -> F::Output {
    RT.block_on(fut)
}
