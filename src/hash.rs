#[cfg(all(feature = "rustc-hash", not(feature = "std-hash")))]
pub type FastMap<K, V> = rustc_hash::FxHashMap<K, V>;

#[cfg(any(feature = "std-hash", not(feature = "rustc-hash")))]
pub type FastMap<K, V> = std::collections::HashMap<K, V>;
