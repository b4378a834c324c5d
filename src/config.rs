// config.rs: compile-time constants and the stream codec's runtime settings.
//
// The framed stream format fixes its block size and header width; they are
// constants, not settings.  The only runtime knob is how many worker threads
// the parallel stream paths may use.

use std::sync::OnceLock;

/// Uncompressed size of every block except possibly the last (1 MiB).
pub const BLOCK_SIZE: usize = 1024 * 1024;

/// Width of the little-endian length prefix in front of every record.
pub const RECORD_HEADER_SIZE: usize = 4;

// Default compression level.  For LZ4 this is the fast-mode acceleration
// factor, so 1 means "best ratio the fast encoder offers".
pub const CLEVEL_DEFAULT: i32 = 1;

// Whether parallel block processing is compiled in (the `multithread` feature).
pub const MULTITHREAD: bool = cfg!(feature = "multithread");

// Maximum number of worker threads selectable at runtime.
pub const NB_WORKERS_MAX: usize = 200;

/// Returns the default number of worker threads.
///
/// With the `multithread` feature, uses the physical core count and spares a
/// fraction of it (one core plus one per eight) for other work.  Without the
/// feature, always returns 1.  The core count is probed once per process.
pub fn default_nb_workers() -> usize {
    static NB_WORKERS: OnceLock<usize> = OnceLock::new();
    *NB_WORKERS.get_or_init(|| {
        if !MULTITHREAD {
            return 1;
        }
        let nb_cores = num_cpus::get_physical();
        let spared = 1 + (nb_cores >> 3);
        if nb_cores <= spared {
            1
        } else {
            (nb_cores - spared).min(NB_WORKERS_MAX)
        }
    })
}

/// Runtime settings of a [`StreamCodec`](crate::stream::StreamCodec).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodecConfig {
    /// Worker threads for `compress_parallel` / `decompress_parallel`.
    /// Always within `1..=NB_WORKERS_MAX`.
    pub nb_workers: usize,
}

impl CodecConfig {
    /// Set the worker count, clamped to `1..=NB_WORKERS_MAX`.
    pub fn with_nb_workers(mut self, nb_workers: usize) -> Self {
        self.nb_workers = nb_workers.clamp(1, NB_WORKERS_MAX);
        self
    }
}

impl Default for CodecConfig {
    fn default() -> Self {
        CodecConfig {
            nb_workers: default_nb_workers(),
        }
    }
}
