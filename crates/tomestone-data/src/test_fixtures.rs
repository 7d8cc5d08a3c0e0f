//! Shared fixture tables for the unit tests in this crate.

use crate::Catalog;
use tomestone_core::{TableSet, TableStore};

fn table(fields: &str, tags: &str, rows: &[&str]) -> String {
    let width = fields.split(',').count();
    let filler = vec!["0"; width].join(",");
    let mut text = format!("{filler}\n{fields}\n{tags}\n{filler}\n");
    for row in rows {
        text.push_str(row);
        text.push('\n');
    }
    text
}

/// A small but fully cross-referenced dataset: a craftable log, a gatherable
/// log, a plain trinket, a hookable fish, and a spearfishable fish.
pub fn sample_set() -> TableSet {
    let mut set = TableSet::new();
    set.insert(
        "item",
        table(
            "#,Name,Description,Level{Item},LevelEquip,Rarity,StackSize,PriceMid,PriceLow,IsUnique,IsUntradable,IsCollectable,CanBeHq,ItemUICategory,EquipSlotCategory",
            "int32,str,str,uint16,byte,byte,uint32,uint32,uint32,bit&01,bit&02,bit&03,bit&04,byte,byte",
            &[
                "1,Cryptomeria Log,Sturdy timber.,12,1,1,999,14,1,False,False,False,False,50,0",
                "2,Maple Log,Common timber.,13,1,1,999,6,1,False,False,False,False,50,0",
                "3,Plain Trinket,A bauble.,1,1,1,1,100,10,False,False,False,False,61,0",
                "4,Velodyna Carp,A river dweller.,61,1,1,999,30,3,False,False,False,False,47,0",
                "5,Hammerhead Shark,A spearfisher's prize.,63,1,1,999,40,4,False,False,False,False,47,0",
            ],
        ),
    );
    set.insert(
        "recipe",
        table(
            "#,CraftType,RecipeLevelTable,Item{Result},Amount{Result},Item{Ingredient}[0],Amount{Ingredient}[0],Item{Ingredient}[1],Amount{Ingredient}[1],CanQuickSynth,CanHq,IsExpert,RequiredCraftsmanship,RequiredControl,DifficultyFactor,QualityFactor,DurabilityFactor",
            "int32,int32,uint16,int32,byte,int32,byte,int32,byte,bit&01,bit&02,bit&03,uint16,uint16,uint16,uint16,uint16",
            &[
                "10,0,12,1,1,2,3,0,0,True,True,False,0,0,100,100,100",
                "11,0,12,999,1,0,0,0,0,True,True,False,0,0,100,100,100",
            ],
        ),
    );
    set.insert(
        "recipe_level",
        table(
            "#,ClassJobLevel,Stars,SuggestedCraftsmanship,Difficulty,Quality,ProgressDivider,QualityDivider,ProgressModifier,QualityModifier,Durability",
            "int32,byte,byte,uint16,uint16,uint32,byte,byte,byte,byte,uint16",
            &["12,12,0,50,55,270,50,30,100,100,60"],
        ),
    );
    set.insert(
        "recipe_lookup",
        table(
            "#,CRP,BSM,ARM,GSM,LTW,WVR,ALC,CUL",
            "int32,uint16,uint16,uint16,uint16,uint16,uint16,uint16,uint16",
            &["1,10,0,0,0,0,0,0,0"],
        ),
    );
    set.insert(
        "gathering_item",
        table(
            "#,Item,GatheringItemLevel,Quest,IsHidden",
            "int32,int32,uint16,bit&01,bit&02",
            &["20,2,30,False,False"],
        ),
    );
    set.insert(
        "gathering_item_level",
        table(
            "#,GatheringItemLevel,Stars",
            "int32,byte,byte",
            &["30,13,1"],
        ),
    );
    set.insert(
        "fish_parameter",
        table(
            "#,Text,Item,OceanStars,IsHidden,IsInLog,FishingSpot",
            "int32,str,int32,byte,bit&01,bit&02,uint16",
            &["40,Fished from fresh water.,4,0,False,True,50"],
        ),
    );
    set.insert(
        "fishing_spot",
        table(
            "#,GatheringLevel,BigFish{OnReach},BigFish{OnEnd},FishingSpotCategory,Rare,TerritoryType,PlaceName,X,Z,Radius,Item[0],Item[1]",
            "int32,byte,str,str,byte,bit&01,uint16,uint16,int16,int16,uint16,int32,int32",
            &["50,61,,,2,False,152,70,22,15,80,4,0"],
        ),
    );
    set.insert(
        "spearfishing_item",
        table(
            "#,Description,Item,TerritoryType,IsVisible",
            "int32,str,int32,uint16,bit&01",
            &["60,Lurks in the depths.,5,400,True"],
        ),
    );
    set.insert(
        "spearfishing_notebook",
        table(
            "#,GatheringLevel,IsShadowNode,TerritoryType,X,Y,Radius,PlaceName",
            "int32,byte,bit&01,uint16,int16,int16,uint16,uint16",
            &["61,63,False,400,10,12,100,71"],
        ),
    );
    set.insert(
        "place_name",
        table(
            "#,Name,Name{NoArticle}",
            "int32,str,str",
            &[
                "70,The Black Shroud,Black Shroud",
                "71,The Ruby Sea,Ruby Sea",
            ],
        ),
    );
    set
}

pub fn sample_catalog() -> Catalog {
    let store = TableStore::build(&sample_set()).expect("fixture tables build");
    Catalog::new(store)
}
