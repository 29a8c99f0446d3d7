//! Regions of Chile and the lookup table that resolves feed region names

use crate::{CatalogueError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Administrative regions of Chile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Region {
    Tarapaca,
    Antofagasta,
    Atacama,
    Coquimbo,
    Valparaiso,
    OHiggins,
    Maule,
    Biobio,
    Araucania,
    LosLagos,
    Aysen,
    Magallanes,
    Metropolitana,
    LosRios,
    AricaYParinacota,
}

impl Region {
    /// All regions in declaration order
    pub const ALL: [Region; 15] = [
        Region::Tarapaca,
        Region::Antofagasta,
        Region::Atacama,
        Region::Coquimbo,
        Region::Valparaiso,
        Region::OHiggins,
        Region::Maule,
        Region::Biobio,
        Region::Araucania,
        Region::LosLagos,
        Region::Aysen,
        Region::Magallanes,
        Region::Metropolitana,
        Region::LosRios,
        Region::AricaYParinacota,
    ];

    /// Short identifier, also used when writing snapshots
    pub fn code(&self) -> &'static str {
        match self {
            Region::Tarapaca => "Tarapaca",
            Region::Antofagasta => "Antofagasta",
            Region::Atacama => "Atacama",
            Region::Coquimbo => "Coquimbo",
            Region::Valparaiso => "Valparaiso",
            Region::OHiggins => "OHiggins",
            Region::Maule => "Maule",
            Region::Biobio => "Biobio",
            Region::Araucania => "Araucania",
            Region::LosLagos => "LosLagos",
            Region::Aysen => "Aysen",
            Region::Magallanes => "Magallanes",
            Region::Metropolitana => "Metropolitana",
            Region::LosRios => "LosRios",
            Region::AricaYParinacota => "Arica_y_Parinacota",
        }
    }

    /// Human readable region name
    pub fn display_name(&self) -> &'static str {
        match self {
            Region::Tarapaca => "Tarapacá",
            Region::Antofagasta => "Antofagasta",
            Region::Atacama => "Atacama",
            Region::Coquimbo => "Coquimbo",
            Region::Valparaiso => "Valparaiso",
            Region::OHiggins => "O'Higgins",
            Region::Maule => "Maule",
            Region::Biobio => "Bio-Bio",
            Region::Araucania => "Araucania",
            Region::LosLagos => "Los Lagos",
            Region::Aysen => "Aisen",
            Region::Magallanes => "Magallanes",
            Region::Metropolitana => "Región Metropolitana",
            Region::LosRios => "Los Rios",
            Region::AricaYParinacota => "Arica y Parinacota",
        }
    }

    /// Official region number
    pub fn number(&self) -> u8 {
        match self {
            Region::Tarapaca => 1,
            Region::Antofagasta => 2,
            Region::Atacama => 3,
            Region::Coquimbo => 4,
            Region::Valparaiso => 5,
            Region::OHiggins => 6,
            Region::Maule => 7,
            Region::Biobio => 8,
            Region::Araucania => 9,
            Region::LosLagos => 10,
            Region::Aysen => 11,
            Region::Magallanes => 12,
            Region::Metropolitana => 13,
            Region::LosRios => 14,
            Region::AricaYParinacota => 15,
        }
    }

    /// Alternative spellings found in feed region names
    pub fn aliases(&self) -> &'static [&'static str] {
        match self {
            Region::OHiggins => &["O'Higgins", "O`Higgins", "Libertador"],
            Region::Biobio => &["Bio-Bio"],
            Region::Araucania => &["La Araucania"],
            Region::LosLagos => &["Los Lagos", "Chiloe"],
            Region::Aysen => &["Aisen"],
            Region::Magallanes => &["Antarctica Chilena"],
            Region::LosRios => &["Los Rios"],
            Region::AricaYParinacota => &["Arica", "Parinacota"],
            _ => &[],
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Lookup table from free-text region names to [`Region`].
///
/// Built once and passed by reference to whatever needs to resolve names.
/// Matching is by upper-cased substring, trying each region's code and then
/// its aliases in declaration order; the first hit wins.
#[derive(Debug, Clone)]
pub struct RegionTable {
    patterns: Vec<(Region, Vec<String>)>,
}

impl RegionTable {
    /// Build the table for all regions
    pub fn new() -> Self {
        let patterns = Region::ALL
            .iter()
            .map(|region| {
                let mut names = vec![region.code().to_uppercase()];
                names.extend(region.aliases().iter().map(|alias| alias.to_uppercase()));
                (*region, names)
            })
            .collect();

        Self { patterns }
    }

    /// Resolve a feed region name such as `"OFF COAST OF MAULE, CHILE"`
    pub fn resolve(&self, name: &str) -> Result<Region> {
        let needle = name.trim().to_uppercase();

        self.patterns
            .iter()
            .find(|(_, names)| names.iter().any(|pattern| needle.contains(pattern.as_str())))
            .map(|(region, _)| *region)
            .ok_or(CatalogueError::UnknownRegion(needle))
    }

    /// Regions known to the table, in declaration order
    pub fn regions(&self) -> impl Iterator<Item = Region> + '_ {
        self.patterns.iter().map(|(region, _)| *region)
    }
}

impl Default for RegionTable {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("OFFSHORE MAULE, CHILE", Region::Maule)]
    #[case("near coast of aisen, chile", Region::Aysen)]
    #[case("BIO-BIO, CHILE", Region::Biobio)]
    #[case("ISLA CHILOE, LOS LAGOS, CHILE", Region::LosLagos)]
    #[case("LIBERTADOR O`HIGGINS, CHILE", Region::OHiggins)]
    #[case("REGION METROPOLITANA, CHILE", Region::Metropolitana)]
    #[case("  Tarapaca  ", Region::Tarapaca)]
    #[case("Arica_y_Parinacota", Region::AricaYParinacota)]
    #[case("LosRios", Region::LosRios)]
    fn test_resolve(#[case] name: &str, #[case] expected: Region) {
        let table = RegionTable::new();
        assert_eq!(table.resolve(name).unwrap(), expected);
    }

    #[test]
    fn test_resolve_unknown() {
        let table = RegionTable::new();
        let err = table.resolve("southern peru").unwrap_err();
        assert!(matches!(err, CatalogueError::UnknownRegion(ref name) if name == "SOUTHERN PERU"));
    }

    #[test]
    fn test_codes_resolve_to_themselves() {
        let table = RegionTable::new();
        for region in Region::ALL {
            assert_eq!(table.resolve(region.code()).unwrap(), region);
        }
    }

    #[test]
    fn test_region_numbers_are_unique() {
        let mut numbers: Vec<u8> = Region::ALL.iter().map(Region::number).collect();
        numbers.sort_unstable();
        numbers.dedup();
        assert_eq!(numbers.len(), Region::ALL.len());
        assert_eq!(Region::Maule.to_string(), "Maule");
    }
}
