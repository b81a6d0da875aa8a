use anyhow::Result;

use crate::api::{parse_presets, PresetFormat, Presets};

pub fn builtin_presets_yaml() -> &'static str {
    include_str!("../content/presets.yaml")
}

/// Presets bundled with the crate, in file order.
pub fn builtin_presets() -> Result<Presets> {
    parse_presets(builtin_presets_yaml(), PresetFormat::Yaml)
}
