//! Debug metrics overlay showing the id of the local player's current biome.

use bevy_ecs::prelude::*;

const TITLE: &str = "\n- Biome Info -";

/// Overlay state: the id of the biome the local player is in.
#[derive(Resource, Debug, Clone)]
pub struct BiomesMetricsMode {
    biome_id: Option<String>,
    enabled: bool,
}

impl BiomesMetricsMode {
    /// Creates the overlay. A disabled overlay still tracks the biome but
    /// reports itself unavailable.
    pub fn new(enabled: bool) -> Self {
        Self {
            biome_id: None,
            enabled,
        }
    }

    /// Mode name shown in the overlay's mode list; same as the title line.
    pub fn name(&self) -> &str {
        TITLE
    }

    /// Overlay text: the title followed by the biome id, or `unknown`
    /// before the first update.
    pub fn metrics(&self) -> String {
        let id = self.biome_id.as_deref().unwrap_or("unknown");
        format!("{TITLE}\n{id}")
    }

    /// Whether the overlay can be selected (`biomes.metrics_overlay`).
    pub fn is_available(&self) -> bool {
        self.enabled
    }

    /// This overlay does not show performance data.
    pub fn is_performance_manager_mode(&self) -> bool {
        false
    }

    /// Records the id of the biome the player is now in.
    pub fn set_biome(&mut self, biome_id: impl Into<String>) {
        self.biome_id = Some(biome_id.into());
    }

    /// Last recorded biome id.
    pub fn biome_id(&self) -> Option<&str> {
        self.biome_id.as_deref()
    }
}

impl Default for BiomesMetricsMode {
    fn default() -> Self {
        Self::new(true)
    }
}
