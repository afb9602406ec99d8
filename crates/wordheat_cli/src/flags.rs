use clap::ValueEnum;
use wordheat_core::SourceFilterMode;

#[derive(Copy, Clone, ValueEnum)]
pub(crate) enum SourceFilterModeFlag {
    /// Every word that shares sources with a heatmap word.
    All,
    /// Only words that are already in the heatmap.
    HeatmapOnly,
    /// Only words that are not in the heatmap.
    NonHeatmapOnly,
}

impl SourceFilterModeFlag {
    pub(crate) const fn as_domain(self) -> SourceFilterMode {
        match self {
            SourceFilterModeFlag::All => SourceFilterMode::All,
            SourceFilterModeFlag::HeatmapOnly => SourceFilterMode::HeatmapOnly,
            SourceFilterModeFlag::NonHeatmapOnly => SourceFilterMode::NonHeatmapOnly,
        }
    }
}
