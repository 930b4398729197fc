mod cache_provider;

pub use cache_provider::{CacheProvider, CacheProviderArgs, CacheProviderErrorKind};
