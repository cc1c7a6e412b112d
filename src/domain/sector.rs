//! Sector table: ordered sector labels with their member symbols.
//!
//! Lookup returns the first sector listing the symbol, so a symbol placed in
//! two sectors resolves to the earlier one.

use crate::domain::error::SmartcapError;
use crate::domain::market::RrgQuadrant;
use crate::domain::watchlist::normalize_symbol;
use crate::ports::config_port::ConfigPort;

/// Label for symbols that no sector lists.
pub const FALLBACK_SECTOR: &str = "Market";

pub const SECTORS_SECTION: &str = "sectors";

#[derive(Debug, Clone, PartialEq)]
pub struct Sector {
    pub name: String,
    pub members: Vec<String>,
    /// Sector-level rotation, when known.
    pub status: Option<RrgQuadrant>,
    /// Relative strength 0..=100, when known.
    pub strength: Option<f64>,
}

impl Sector {
    pub fn new(name: &str, members: &[&str]) -> Self {
        Sector {
            name: name.to_string(),
            members: members.iter().map(|s| s.to_string()).collect(),
            status: None,
            strength: None,
        }
    }

    pub fn with_rotation(mut self, status: RrgQuadrant, strength: f64) -> Self {
        self.status = Some(status);
        self.strength = Some(strength);
        self
    }

    pub fn contains(&self, symbol: &str) -> bool {
        self.members.iter().any(|m| m == symbol)
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct SectorTable {
    sectors: Vec<Sector>,
}

impl SectorTable {
    pub fn new(sectors: Vec<Sector>) -> Self {
        SectorTable { sectors }
    }

    /// Built-in Vietnamese market sector map.
    pub fn builtin() -> Self {
        use RrgQuadrant::*;
        SectorTable::new(vec![
            Sector::new("Technology & Telecom", &["FPT", "CMG", "CTR", "ELC"])
                .with_rotation(Leading, 95.0),
            Sector::new("Banking", &["VCB", "BID", "CTG", "TCB", "MBB", "ACB"])
                .with_rotation(Leading, 88.0),
            Sector::new("Transport & Logistics", &["VTP", "HAH", "SCS", "GMD"])
                .with_rotation(Leading, 82.0),
            Sector::new("Securities", &["SSI", "VND", "VCI", "HCM", "FTS"])
                .with_rotation(Improving, 72.0),
            Sector::new("Manufacturing & Steel", &["HPG", "HSG", "NKG", "DGC"])
                .with_rotation(Improving, 65.0),
            Sector::new("Retail", &["MWG", "FRT", "PNJ"]).with_rotation(Weakening, 48.0),
            Sector::new("Real Estate", &["VIC", "VHM", "NVL", "DIG", "PDR"])
                .with_rotation(Lagging, 25.0),
            Sector::new("Energy", &["GAS", "PVD", "PVS", "PLX", "POW"])
                .with_rotation(Weakening, 45.0),
        ])
    }

    /// Load `[sectors]` from config, one `label = SYM,SYM` entry per sector.
    /// Returns `Ok(None)` when the section is absent or empty.
    pub fn from_config(config: &dyn ConfigPort) -> Result<Option<Self>, SmartcapError> {
        let labels = config.get_keys(SECTORS_SECTION);
        if labels.is_empty() {
            return Ok(None);
        }

        let mut sectors = Vec::with_capacity(labels.len());
        for label in labels {
            let raw = config.get_string(SECTORS_SECTION, &label).unwrap_or_default();
            let mut members = Vec::new();
            for token in raw.split(',').filter(|t| !t.trim().is_empty()) {
                let symbol = normalize_symbol(token).map_err(|e| SmartcapError::ConfigInvalid {
                    section: SECTORS_SECTION.to_string(),
                    key: label.clone(),
                    reason: e.to_string(),
                })?;
                members.push(symbol);
            }
            sectors.push(Sector {
                name: label,
                members,
                status: None,
                strength: None,
            });
        }
        Ok(Some(SectorTable::new(sectors)))
    }

    pub fn sectors(&self) -> &[Sector] {
        &self.sectors
    }

    pub fn find(&self, symbol: &str) -> Option<&Sector> {
        self.sectors.iter().find(|s| s.contains(symbol))
    }

    pub fn sector_name(&self, symbol: &str) -> &str {
        self.find(symbol)
            .map(|s| s.name.as_str())
            .unwrap_or(FALLBACK_SECTOR)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::file_config_adapter::FileConfigAdapter;

    #[test]
    fn builtin_lookup() {
        let table = SectorTable::builtin();
        assert_eq!(table.sector_name("FPT"), "Technology & Telecom");
        assert_eq!(table.sector_name("BID"), "Banking");
        assert_eq!(table.sector_name("GAS"), "Energy");
    }

    #[test]
    fn unknown_symbol_falls_back() {
        let table = SectorTable::builtin();
        assert_eq!(table.sector_name("VNM"), FALLBACK_SECTOR);
        assert_eq!(SectorTable::default().sector_name("FPT"), FALLBACK_SECTOR);
    }

    #[test]
    fn first_listing_wins() {
        let table = SectorTable::new(vec![
            Sector::new("First", &["AAA"]),
            Sector::new("Second", &["AAA", "BBB"]),
        ]);
        assert_eq!(table.sector_name("AAA"), "First");
        assert_eq!(table.sector_name("BBB"), "Second");
    }

    #[test]
    fn builtin_carries_rotation() {
        let table = SectorTable::builtin();
        let realty = table.find("VHM").unwrap();
        assert_eq!(realty.status, Some(RrgQuadrant::Lagging));
        assert_eq!(realty.strength, Some(25.0));
    }

    #[test]
    fn from_config_reads_sectors_in_order() {
        let adapter = FileConfigAdapter::from_string(
            "[sectors]\nBanks = vcb, bid\nTech = FPT\n",
        )
        .unwrap();
        let table = SectorTable::from_config(&adapter).unwrap().unwrap();
        assert_eq!(table.sectors().len(), 2);
        assert_eq!(table.sectors()[0].name, "Banks");
        assert_eq!(table.sector_name("BID"), "Banks");
        assert_eq!(table.sector_name("FPT"), "Tech");
        assert_eq!(table.sectors()[0].status, None);
    }

    #[test]
    fn from_config_without_section_is_none() {
        let adapter = FileConfigAdapter::from_string("[portfolio]\ntotal_capital = 1\n").unwrap();
        assert!(SectorTable::from_config(&adapter).unwrap().is_none());
    }

    #[test]
    fn from_config_rejects_bad_member() {
        let adapter = FileConfigAdapter::from_string("[sectors]\nBanks = VCB,BANKING\n").unwrap();
        let err = SectorTable::from_config(&adapter).unwrap_err();
        assert!(matches!(err, SmartcapError::ConfigInvalid { key, .. } if key == "Banks"));
    }
}
