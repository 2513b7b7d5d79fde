pub mod memory_cache;
