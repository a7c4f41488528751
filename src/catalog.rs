//! The static size catalog.
//!
//! Pure data: the generation pipeline iterates whatever sizes it is handed,
//! so adding an entry here never requires pipeline changes. Entries carry
//! the platform category and a human description that ends up on generated
//! artifacts.

use serde::{Deserialize, Serialize};

/// Platform grouping for a catalog entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SizeCategory {
    Standard,
    Apple,
    Android,
    Microsoft,
    Pwa,
}

/// One catalog entry: an output dimension with its platform metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SizeSpec {
    /// Square pixel dimension.
    pub size: u32,
    pub label: &'static str,
    pub category: SizeCategory,
    pub recommended: bool,
    pub description: &'static str,
}

/// Every size the tool knows about, browser tabs through Windows tiles.
pub const SIZE_CATALOG: &[SizeSpec] = &[
    SizeSpec {
        size: 16,
        label: "16x16",
        category: SizeCategory::Standard,
        recommended: true,
        description: "Browser tab icon",
    },
    SizeSpec {
        size: 32,
        label: "32x32",
        category: SizeCategory::Standard,
        recommended: true,
        description: "Browser bookmark icon",
    },
    SizeSpec {
        size: 48,
        label: "48x48",
        category: SizeCategory::Standard,
        recommended: false,
        description: "Windows site icon",
    },
    SizeSpec {
        size: 64,
        label: "64x64",
        category: SizeCategory::Standard,
        recommended: false,
        description: "High DPI browser icon",
    },
    SizeSpec {
        size: 96,
        label: "96x96",
        category: SizeCategory::Standard,
        recommended: false,
        description: "Desktop shortcut icon",
    },
    SizeSpec {
        size: 128,
        label: "128x128",
        category: SizeCategory::Standard,
        recommended: false,
        description: "Chrome Web Store icon",
    },
    SizeSpec {
        size: 180,
        label: "Apple Touch Icon",
        category: SizeCategory::Apple,
        recommended: true,
        description: "iOS home screen icon",
    },
    SizeSpec {
        size: 192,
        label: "Android Chrome",
        category: SizeCategory::Android,
        recommended: true,
        description: "Android home screen icon",
    },
    SizeSpec {
        size: 512,
        label: "Android Chrome Large",
        category: SizeCategory::Android,
        recommended: true,
        description: "Android splash screen",
    },
    SizeSpec {
        size: 144,
        label: "Microsoft Tile",
        category: SizeCategory::Microsoft,
        recommended: false,
        description: "Windows tile icon",
    },
    SizeSpec {
        size: 270,
        label: "Microsoft Tile Wide",
        category: SizeCategory::Microsoft,
        recommended: false,
        description: "Windows wide tile",
    },
    SizeSpec {
        size: 558,
        label: "Microsoft Tile Large",
        category: SizeCategory::Microsoft,
        recommended: false,
        description: "Windows large tile",
    },
];

/// Looks up the catalog entry for a pixel dimension.
pub fn find_size(size: u32) -> Option<&'static SizeSpec> {
    SIZE_CATALOG.iter().find(|spec| spec.size == size)
}

/// The dimensions flagged as recommended, in catalog order.
pub fn recommended_sizes() -> Vec<u32> {
    SIZE_CATALOG
        .iter()
        .filter(|spec| spec.recommended)
        .map(|spec| spec.size)
        .collect()
}

/// All catalog entries in a platform category.
pub fn sizes_in_category(category: SizeCategory) -> Vec<&'static SizeSpec> {
    SIZE_CATALOG
        .iter()
        .filter(|spec| spec.category == category)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_finds_known_sizes() {
        let spec = find_size(180).unwrap();
        assert_eq!(spec.category, SizeCategory::Apple);
        assert!(spec.recommended);
        assert!(find_size(7).is_none());
    }

    #[test]
    fn recommended_set() {
        assert_eq!(recommended_sizes(), vec![16, 32, 180, 192, 512]);
    }

    #[test]
    fn categories_partition_the_catalog() {
        let total: usize = [
            SizeCategory::Standard,
            SizeCategory::Apple,
            SizeCategory::Android,
            SizeCategory::Microsoft,
            SizeCategory::Pwa,
        ]
        .into_iter()
        .map(|c| sizes_in_category(c).len())
        .sum();
        assert_eq!(total, SIZE_CATALOG.len());
    }

    #[test]
    fn catalog_sizes_are_unique() {
        let mut sizes: Vec<u32> = SIZE_CATALOG.iter().map(|s| s.size).collect();
        sizes.sort_unstable();
        sizes.dedup();
        assert_eq!(sizes.len(), SIZE_CATALOG.len());
    }
}
