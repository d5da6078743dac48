use clap::ValueEnum;
use fob_manifest::{ManifestFormat, OutsideRootPolicy};

/// Manifest shape
#[derive(Copy, Clone, PartialEq, Eq, Debug, ValueEnum)]
pub enum ManifestFormatArg {
    /// `{"modules":[root]}` with nested `imports`
    #[value(name = "nested")]
    Nested,

    /// Legacy flat list of `{"path","request"}` for tracked files
    #[value(name = "flat")]
    Flat,
}

impl From<ManifestFormatArg> for ManifestFormat {
    fn from(format: ManifestFormatArg) -> Self {
        match format {
            ManifestFormatArg::Nested => ManifestFormat::Nested,
            ManifestFormatArg::Flat => ManifestFormat::Flat,
        }
    }
}

/// What to do with dependencies outside the source root
#[derive(Copy, Clone, PartialEq, Eq, Debug, ValueEnum)]
pub enum OutsideRootArg {
    /// Record them as leaves
    #[value(name = "leaf")]
    Leaf,

    /// Drop the edge
    #[value(name = "omit")]
    Omit,
}

impl From<OutsideRootArg> for OutsideRootPolicy {
    fn from(policy: OutsideRootArg) -> Self {
        match policy {
            OutsideRootArg::Leaf => OutsideRootPolicy::Leaf,
            OutsideRootArg::Omit => OutsideRootPolicy::Omit,
        }
    }
}
