//! Closed code tables: integer columns whose values name a fixed set of
//! meanings.
//!
//! Raw tables store these as bare integers. [`Coded`] keeps decoding
//! non-fatal: a code outside the known table is carried through as
//! [`Coded::Raw`] and logged once at decode time, so a new upstream code
//! never breaks resolution.

/// Define an integer-backed enum plus the fallible `i64` conversion, with
/// the unmatched code handed back as the error.
macro_rules! closed_enum {
    (
        $(#[$meta:meta])*
        $name:ident { $($variant:ident = $value:literal),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
        #[repr(i64)]
        pub enum $name {
            $($variant = $value),+
        }

        impl TryFrom<i64> for $name {
            type Error = i64;

            fn try_from(raw: i64) -> Result<Self, i64> {
                match raw {
                    $($value => Ok($name::$variant),)+
                    other => Err(other),
                }
            }
        }
    };
}

/// A decoded code-table value, or the raw code when the table has no entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(untagged)]
pub enum Coded<T> {
    Known(T),
    Raw(i64),
}

impl<T: TryFrom<i64, Error = i64>> Coded<T> {
    /// Decode a raw code, logging the field name when the code is unknown.
    pub fn decode(raw: i64, field: &str) -> Coded<T> {
        match T::try_from(raw) {
            Ok(value) => Coded::Known(value),
            Err(raw) => {
                log::warn!("field '{field}': no known meaning for code {raw}");
                Coded::Raw(raw)
            }
        }
    }
}

impl<T> Coded<T> {
    pub fn known(self) -> Option<T> {
        match self {
            Coded::Known(value) => Some(value),
            Coded::Raw(_) => None,
        }
    }

    pub fn is_known(&self) -> bool {
        matches!(self, Coded::Known(_))
    }
}

closed_enum! {
    /// The crafting discipline a recipe belongs to.
    CraftType {
        Carpenter = 0,
        Blacksmith = 1,
        Armorer = 2,
        Goldsmith = 3,
        Leatherworker = 4,
        Weaver = 5,
        Alchemist = 6,
        Culinarian = 7,
    }
}

closed_enum! {
    /// Which equipment slot(s) an item occupies. Codes 15 and 16 are unused
    /// upstream.
    EquipSlotCategory {
        Unknown = 0,
        MainHand = 1,
        OffHand = 2,
        Head = 3,
        Body = 4,
        Gloves = 5,
        Waist = 6,
        Legs = 7,
        Feet = 8,
        Ears = 9,
        Neck = 10,
        Wrists = 11,
        Finger = 12,
        MainHandOnly = 13,
        BothHands = 14,
        SoulCrystal = 17,
        LegsNoFeet = 18,
        BodyNoHeadNoGlovesNoLegsNoFeet = 19,
        BodyNoLegsNoGloves = 20,
        BodyNoLegsNoFeet = 21,
        BodyNoGloves = 22,
    }
}

closed_enum! {
    /// The kind of water a fishing spot sits in.
    FishingSpotCategory {
        Unknown = 0,
        Ocean = 1,
        Freshwater = 2,
        Dunefishing = 3,
        Skyfishing = 4,
        Cloudfishing = 5,
        Hellfishing = 6,
        Aetherfishing = 7,
        Saltfishing = 8,
        Starfishing = 9,
    }
}

closed_enum! {
    /// Where an inventory line's items are stored. `EquippedGear` and
    /// `Armoire` only appear in inventory exports.
    InventoryLocation {
        Null = 0,
        Bag = 1,
        Market = 2,
        PremiumSaddlebagLeft = 3,
        PremiumSaddlebagRight = 4,
        SaddlebagLeft = 5,
        SaddlebagRight = 6,
        FreeCompany = 7,
        GlamourChest = 8,
        Armory = 9,
        EquippedGear = 10,
        Crystals = 11,
        Currency = 12,
        Armoire = 13,
    }
}

closed_enum! {
    /// The interface category an item is listed under.
    ItemUiCategory {
        PugilistsArm = 1,
        GladiatorsArm = 2,
        MaraudersArm = 3,
        ArchersArm = 4,
        LancersArm = 5,
        OneHandedThaumaturgesArm = 6,
        TwoHandedThaumaturgesArm = 7,
        OneHandedConjurersArm = 8,
        TwoHandedConjurersArm = 9,
        ArcanistsGrimoire = 10,
        Shield = 11,
        CarpentersPrimaryTool = 12,
        CarpentersSecondaryTool = 13,
        BlacksmithsPrimaryTool = 14,
        BlacksmithsSecondaryTool = 15,
        ArmorersPrimaryTool = 16,
        ArmorersSecondaryTool = 17,
        GoldsmithsPrimaryTool = 18,
        GoldsmithsSecondaryTool = 19,
        LeatherworkersPrimaryTool = 20,
        LeatherworkersSecondaryTool = 21,
        WeaversPrimaryTool = 22,
        WeaversSecondaryTool = 23,
        AlchemistsPrimaryTool = 24,
        AlchemistsSecondaryTool = 25,
        CulinariansPrimaryTool = 26,
        CulinariansSecondaryTool = 27,
        MinersPrimaryTool = 28,
        MinersSecondaryTool = 29,
        BotanistsPrimaryTool = 30,
        BotanistsSecondaryTool = 31,
        FishersPrimaryTool = 32,
        FishingTackle = 33,
        Head = 34,
        Body = 35,
        Legs = 36,
        Hands = 37,
        Feet = 38,
        Unobtainable = 39,
        Necklace = 40,
        Earrings = 41,
        Bracelets = 42,
        Ring = 43,
        Medicine = 44,
        Ingredient = 45,
        Meal = 46,
        Seafood = 47,
        Stone = 48,
        Metal = 49,
        Lumber = 50,
        Cloth = 51,
        Leather = 52,
        Bone = 53,
        Reagent = 54,
        Dye = 55,
        Part = 56,
        Furnishing = 57,
        Materia = 58,
        Crystal = 59,
        Catalyst = 60,
        Miscellany = 61,
        SoulCrystal = 62,
        Other = 63,
        ConstructionPermit = 64,
        Roof = 65,
        ExteriorWall = 66,
        Window = 67,
        Door = 68,
        RoofDecoration = 69,
        ExteriorWallDecoration = 70,
        Placard = 71,
        Fence = 72,
        InteriorWall = 73,
        Flooring = 74,
        CeilingLight = 75,
        OutdoorFurnishing = 76,
        Table = 77,
        Tabletop = 78,
        WallMounted = 79,
        Rug = 80,
        Minion = 81,
        Gardening = 82,
        Demimateria = 83,
        RoguesArm = 84,
        SeasonalMiscellany = 85,
        TripleTriadCard = 86,
        DarkKnightsArm = 87,
        MachinistsArm = 88,
        AstrologiansArm = 89,
        AirshipHull = 90,
        AirshipRigging = 91,
        AirshipAftcastle = 92,
        AirshipForecastle = 93,
        OrchestrionRoll = 94,
        Painting = 95,
        SamuraisArm = 96,
        RedMagesArm = 97,
        ScholarsArm = 98,
        FishersSecondaryTool = 99,
        Currency = 100,
        SubmersibleHull = 101,
        SubmersibleStern = 102,
        SubmersibleBow = 103,
        SubmersibleBridge = 104,
        BlueMagesArm = 105,
        GunbreakersArm = 106,
        DancersArm = 107,
        ReapersArm = 108,
        SagesArm = 109,
        VipersArm = 110,
        PictomancersArm = 111,
        Outfits = 112,
    }
}

/// Normal or high quality, as flagged in inventory exports.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, serde::Serialize)]
pub enum ItemQuality {
    #[default]
    Nq,
    Hq,
}
