use serde::{Deserialize, Serialize};

pub const ANCHOR: &str = "Anchor";
pub const ART_OF_WAR: &str = "Art of War";
pub const BAG_OF_MARBLES: &str = "Bag of Marbles";
pub const BIRD_FACED_URN: &str = "Bird Faced Urn";
pub const BLOOD_VIAL: &str = "Blood Vial";
pub const BRONZE_SCALES: &str = "Bronze Scales";
pub const CALIPERS: &str = "Calipers";
pub const CAPTAINS_WHEEL: &str = "CaptainsWheel";
pub const CENTENNIAL_PUZZLE: &str = "Centennial Puzzle";
pub const CHARONS_ASHES: &str = "Charon's Ashes";
pub const CHEMICAL_X: &str = "Chemical X";
pub const GREMLIN_HORN: &str = "Gremlin Horn";
pub const HAPPY_FLOWER: &str = "Happy Flower";
pub const HORN_CLEAT: &str = "HornCleat";
pub const ICE_CREAM: &str = "Ice Cream";
pub const KUNAI: &str = "Kunai";
pub const LANTERN: &str = "Lantern";
pub const LETTER_OPENER: &str = "Letter Opener";
pub const LIZARD_TAIL: &str = "Lizard Tail";
pub const MERCURY_HOURGLASS: &str = "Mercury Hourglass";
pub const NECRONOMICON: &str = "Necronomicon";
pub const NUNCHAKU: &str = "Nunchaku";
pub const ODD_MUSHROOM: &str = "Odd Mushroom";
pub const ODDLY_SMOOTH_STONE: &str = "Oddly Smooth Stone";
pub const ORANGE_PELLETS: &str = "OrangePellets";
pub const ORICHALCUM: &str = "Orichalcum";
pub const ORNAMENTAL_FAN: &str = "Ornamental Fan";
pub const PAPER_KRANE: &str = "Paper Crane";
pub const PAPER_PHROG: &str = "Paper Frog";
pub const PEN_NIB: &str = "Pen Nib";
pub const RED_MASK: &str = "Red Mask";
pub const RUNIC_PYRAMID: &str = "Runic Pyramid";
pub const SHURIKEN: &str = "Shuriken";
pub const SNECKO_EYE: &str = "Snecko Eye";
pub const SUNDIAL: &str = "Sundial";
pub const ABACUS: &str = "TheAbacus";
pub const THREAD_AND_NEEDLE: &str = "Thread and Needle";
pub const TORII: &str = "Torii";
pub const TUNGSTEN_ROD: &str = "TungstenRod";
pub const VAJRA: &str = "Vajra";

/// Boss and shop relics that add one energy per turn.
pub const ENERGY_RELICS: &[&str] = &[
    "Busted Crown",
    "Coffee Dripper",
    "Cursed Key",
    "Ectoplasm",
    "Fusion Hammer",
    "Mark of Pain",
    "Philosopher's Stone",
    "Runic Dome",
    "Sozu",
    "Velvet Choker",
];

/// Counter value of a relic that has been spent for this combat.
pub const SPENT: i32 = -2;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Relic {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub counter: i32,
}

impl Relic {
    pub fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            name: id.clone(),
            id,
            counter: 0,
        }
    }

    pub fn with_counter(mut self, counter: i32) -> Self {
        self.counter = counter;
        self
    }
}
