//! Species reference measurements for quick testing of a deployment.

use serde::Serialize;

/// Raw measurements for one species, as a user would type them
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SpeciesPreset {
    pub species: &'static str,
    pub culmen_length: &'static str,
    pub culmen_depth: &'static str,
    pub flipper_length: &'static str,
    pub body_mass: &'static str,
}

impl SpeciesPreset {
    /// Raw inputs in codec order
    pub fn raw_inputs(&self) -> [&'static str; 4] {
        [
            self.culmen_length,
            self.culmen_depth,
            self.flipper_length,
            self.body_mass,
        ]
    }
}

pub static PRESETS: [SpeciesPreset; 3] = [
    SpeciesPreset {
        species: "Adelie",
        culmen_length: "38.8",
        culmen_depth: "18.3",
        flipper_length: "190",
        body_mass: "3701",
    },
    SpeciesPreset {
        species: "Chinstrap",
        culmen_length: "47.5",
        culmen_depth: "15.0",
        flipper_length: "217",
        body_mass: "5076",
    },
    SpeciesPreset {
        species: "Gentoo",
        culmen_length: "48.8",
        culmen_depth: "18.4",
        flipper_length: "196",
        body_mass: "3733",
    },
];

/// Case-insensitive preset lookup
pub fn find_preset(species: &str) -> Option<&'static SpeciesPreset> {
    let wanted = species.trim();
    PRESETS.iter().find(|p| p.species.eq_ignore_ascii_case(wanted))
}
