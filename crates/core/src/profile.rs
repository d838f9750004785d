use serde::{Deserialize, Serialize};
use std::fmt;

/// Which kind of standin a source file belongs to.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VariantKind {
    /// Full asset: geometry cache under `abc/`, override looks, UV tracking
    Asset,
    /// Fur cache under `abc_fur/`, no override and no UVs
    Fur,
}

impl fmt::Display for VariantKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VariantKind::Asset => f.write_str("asset"),
            VariantKind::Fur => f.write_str("fur"),
        }
    }
}

/// Capabilities and naming conventions of a standin variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VariantProfile {
    pub kind: VariantKind,
    /// Folder under `publish/` holding one subdirectory per sub-look
    pub sublook_folder: &'static str,
    /// Tail of every look file name before the version segment
    pub operator_suffix: &'static str,
    pub has_override: bool,
    pub resolves_uvs: bool,
}

impl VariantProfile {
    pub const ASSET: VariantProfile = VariantProfile {
        kind: VariantKind::Asset,
        sublook_folder: "look",
        operator_suffix: "_operator",
        has_override: true,
        resolves_uvs: true,
    };

    pub const FUR: VariantProfile = VariantProfile {
        kind: VariantKind::Fur,
        sublook_folder: "look_fur",
        operator_suffix: "_fur",
        has_override: false,
        resolves_uvs: false,
    };

    pub fn for_kind(kind: VariantKind) -> Self {
        match kind {
            VariantKind::Asset => Self::ASSET,
            VariantKind::Fur => Self::FUR,
        }
    }
}
