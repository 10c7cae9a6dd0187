//! Configuration axes swept by the benchmark.
//!
//! Each axis is a closed enum with a fixed `ALL` order, so the sweep is
//! reproducible from one run to the next:
//! - `Datastore` - repository backend, selected at `ipfs init`
//! - `Chunker` - block splitting strategy passed to `ipfs add --chunker`
//! - `Layout` - DAG layout, `--trickle` or the balanced default

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;

// ============================================================================
// Axes
// ============================================================================

/// Datastore backend of the repository
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Datastore {
    Flatfs,
    Badger,
}

impl Datastore {
    pub const ALL: [Datastore; 2] = [Datastore::Flatfs, Datastore::Badger];

    pub fn as_str(&self) -> &'static str {
        match self {
            Datastore::Flatfs => "flatfs",
            Datastore::Badger => "badger",
        }
    }

    /// Flag passed to `ipfs init`, `None` for the default backend
    pub fn init_flag(&self) -> Option<&'static str> {
        match self {
            Datastore::Flatfs => None,
            Datastore::Badger => Some("--profile=badgerds"),
        }
    }
}

/// Chunking strategy for `ipfs add`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Chunker {
    Size,
    Rabin1,
    Rabin2,
}

impl Chunker {
    pub const ALL: [Chunker; 3] = [Chunker::Size, Chunker::Rabin1, Chunker::Rabin2];

    pub fn as_str(&self) -> &'static str {
        match self {
            Chunker::Size => "size",
            Chunker::Rabin1 => "rabin1",
            Chunker::Rabin2 => "rabin2",
        }
    }

    /// Value of the `--chunker=` option
    pub fn spec(&self) -> &'static str {
        match self {
            Chunker::Size => "size-262144",
            Chunker::Rabin1 => "rabin-512-1024-2048",
            Chunker::Rabin2 => "rabin-512-1024-65536",
        }
    }
}

/// DAG layout for `ipfs add`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Layout {
    Normal,
    Trickle,
}

impl Layout {
    pub const ALL: [Layout; 2] = [Layout::Normal, Layout::Trickle];

    pub fn as_str(&self) -> &'static str {
        match self {
            Layout::Normal => "normal",
            Layout::Trickle => "trickle",
        }
    }

    /// Flag passed to `ipfs add`, `None` for the balanced layout
    pub fn add_flag(&self) -> Option<&'static str> {
        match self {
            Layout::Normal => None,
            Layout::Trickle => Some("--trickle"),
        }
    }
}

macro_rules! impl_display {
    ($($ty:ty),*) => {
        $(impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        })*
    };
}

impl_display!(Datastore, Chunker, Layout);

// ============================================================================
// Combinations
// ============================================================================

/// One point in the configuration matrix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Combination {
    pub datastore: Datastore,
    pub chunker: Chunker,
    pub layout: Layout,
}

impl Combination {
    /// Directory name of the repository for this combination.
    ///
    /// Labels never contain `.`, so the name is unique per triple.
    pub fn repo_name(&self) -> String {
        format!(
            "ipfs-repo-{}.{}.{}",
            self.datastore, self.chunker, self.layout
        )
    }

    /// Repository path for this combination under `root`.
    ///
    /// The current directory yields the bare name, as in `ipfs-repo-...`.
    pub fn repo_path(&self, root: &Path) -> PathBuf {
        if root.as_os_str().is_empty() || root == Path::new(".") {
            PathBuf::from(self.repo_name())
        } else {
            root.join(self.repo_name())
        }
    }
}

impl fmt::Display for Combination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{}, {}, {}}}", self.datastore, self.chunker, self.layout)
    }
}

/// Full cross product, datastore-major, then chunker, then layout
pub fn sweep() -> Vec<Combination> {
    let mut combos =
        Vec::with_capacity(Datastore::ALL.len() * Chunker::ALL.len() * Layout::ALL.len());
    for datastore in Datastore::ALL {
        for chunker in Chunker::ALL {
            for layout in Layout::ALL {
                combos.push(Combination {
                    datastore,
                    chunker,
                    layout,
                });
            }
        }
    }
    combos
}
