use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;

use crate::error::{FusionError, FusionResult};
use crate::food::analysis::nutrition::NutritionProfile;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PoolEntry {
    pub name: String,
    #[serde(default)]
    pub nutrition: NutritionProfile,
}

/// The three lists the generator draws from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pools {
    pub west_african: Vec<PoolEntry>,
    pub japanese: Vec<PoolEntry>,
    pub styles: Vec<PoolEntry>,
}

type Row = (&'static str, NutritionProfile);

const fn n(calories: i32, protein: i32, carbs: i32, fat: i32) -> NutritionProfile {
    NutritionProfile::new(calories, protein, carbs, fat)
}

const WEST_AFRICAN: &[Row] = &[
    ("Jollof Rice", n(310, 6, 58, 7)),
    ("Suya Beef", n(280, 30, 6, 15)),
    ("Ripe Plantain", n(220, 2, 57, 1)),
    ("Egusi Seeds", n(190, 10, 4, 16)),
    ("Pounded Yam", n(330, 4, 78, 1)),
    ("Fufu", n(300, 2, 72, 1)),
    ("Okra", n(40, 2, 8, 0)),
    ("Moin Moin", n(210, 13, 24, 7)),
    ("Kelewele", n(260, 2, 45, 9)),
    ("Pepper Soup Goat", n(240, 28, 4, 12)),
    ("Scotch Bonnet", n(10, 0, 2, 0)),
    ("Groundnut Stew", n(290, 12, 14, 22)),
    ("Attieke", n(250, 2, 58, 1)),
    ("Dawadawa", n(70, 6, 4, 4)),
    ("Baobab Fruit", n(60, 1, 14, 0)),
    ("Red Palm Oil", n(120, 0, 0, 14)),
    ("Kenkey", n(260, 6, 55, 2)),
    ("Tilapia", n(180, 32, 0, 5)),
    ("Chin Chin", n(230, 4, 30, 11)),
    ("Shito", n(90, 2, 3, 8)),
];

const JAPANESE: &[Row] = &[
    ("Miso", n(60, 4, 8, 2)),
    ("Wasabi", n(20, 1, 4, 0)),
    ("Yuzu Kosho", n(15, 0, 3, 0)),
    ("Nori", n(10, 2, 1, 0)),
    ("Dashi", n(15, 2, 1, 0)),
    ("Matcha", n(25, 2, 4, 0)),
    ("Ponzu", n(20, 1, 4, 0)),
    ("Shiso", n(5, 0, 1, 0)),
    ("Mirin", n(50, 0, 12, 0)),
    ("Natto", n(190, 17, 12, 10)),
    ("Katsuobushi", n(35, 8, 0, 0)),
    ("Udon Noodles", n(270, 7, 56, 1)),
    ("Sushi Rice", n(240, 4, 53, 0)),
    ("Teriyaki Glaze", n(80, 1, 16, 0)),
    ("Shichimi Togarashi", n(10, 0, 2, 0)),
    ("Umeboshi", n(15, 0, 3, 0)),
    ("Silken Tofu", n(110, 10, 3, 6)),
    ("Kewpie Mayo", n(140, 0, 1, 15)),
    ("Sake Lees", n(70, 4, 6, 1)),
    ("Pickled Ginger", n(20, 0, 5, 0)),
];

const STYLES: &[Row] = &[
    ("Tempura", n(180, 2, 18, 12)),
    ("Donburi Bowl", n(160, 3, 35, 1)),
    ("Sushi Roll", n(120, 3, 24, 1)),
    ("Yakitori Skewers", n(90, 8, 4, 5)),
    ("Ramen", n(220, 9, 38, 5)),
    ("Onigiri", n(130, 3, 28, 0)),
    ("Gyoza", n(150, 6, 20, 5)),
    ("Okonomiyaki", n(200, 8, 24, 9)),
    ("Katsu", n(190, 4, 14, 13)),
    ("Bento", n(140, 6, 22, 4)),
    ("Robatayaki", n(40, 2, 0, 3)),
    ("Chawanmushi", n(-20, 6, 1, -2)),
];

lazy_static! {
    static ref BUILTIN_POOLS: Arc<Pools> = Arc::new(Pools {
        west_african: from_rows(WEST_AFRICAN),
        japanese: from_rows(JAPANESE),
        styles: from_rows(STYLES),
    });
}

fn from_rows(rows: &[Row]) -> Vec<PoolEntry> {
    rows.iter()
        .map(|(name, nutrition)| PoolEntry {
            name: name.to_string(),
            nutrition: *nutrition,
        })
        .collect()
}

impl Pools {
    pub fn builtin() -> Arc<Pools> {
        BUILTIN_POOLS.clone()
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Reads and validates a pool file. Any problem is reported here, at
    /// startup, instead of at generation time.
    pub fn from_file(path: &Path) -> FusionResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| FusionError::PoolFile {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        let pools = Self::from_json(&content).map_err(|e| FusionError::PoolFile {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        pools.validate()?;
        Ok(pools)
    }

    /// Built-in pools unless a file is given.
    pub fn load(path: Option<&Path>) -> FusionResult<Arc<Pools>> {
        match path {
            Some(path) => Ok(Arc::new(Self::from_file(path)?)),
            None => Ok(Self::builtin()),
        }
    }

    pub fn validate(&self) -> FusionResult<()> {
        for (label, entries) in [
            ("west_african", &self.west_african),
            ("japanese", &self.japanese),
            ("styles", &self.styles),
        ] {
            if entries.is_empty() {
                return Err(FusionError::EmptyPool(label));
            }
            if entries.iter().any(|e| e.name.trim().is_empty()) {
                return Err(FusionError::Config(format!("pool '{}' contains a blank name", label)));
            }
        }

        // Each dish pairs one ingredient per cuisine, so the two pools must not overlap.
        if let Some(shared) = self.west_african.iter().find(|wa| {
            self.japanese
                .iter()
                .any(|jp| jp.name.trim().eq_ignore_ascii_case(wa.name.trim()))
        }) {
            return Err(FusionError::Config(format!(
                "ingredient '{}' is listed in both the west_african and japanese pools",
                shared.name.trim()
            )));
        }
        Ok(())
    }
}
