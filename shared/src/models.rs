use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Header line every raw sales export starts with. Exports sometimes repeat it mid-file.
pub const RAW_HEADER: &str = "product,price,quantity,date,region";

/// Header line of the consolidated output file.
pub const SALES_HEADER: [&str; 3] = ["sales", "date", "region"];

/// One row as it appears in a raw export, before any conversion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawSalesRecord {
    pub product: String,
    pub price: String,
    pub quantity: String,
    pub date: String,
    pub region: String,
}

/// One cleaned row of the consolidated output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesRecord {
    pub sales: f64,
    pub date: NaiveDate,
    pub region: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum Region {
    North,
    East,
    South,
    West,
}

impl Region {
    pub const ALL: [Region; 4] = [Region::North, Region::East, Region::South, Region::West];

    pub fn as_str(&self) -> &'static str {
        match self {
            Region::North => "north",
            Region::East => "east",
            Region::South => "south",
            Region::West => "west",
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownRegion(pub String);

impl fmt::Display for UnknownRegion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown region '{}'", self.0)
    }
}

impl std::error::Error for UnknownRegion {}

impl FromStr for Region {
    type Err = UnknownRegion;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        Region::ALL
            .into_iter()
            .find(|region| region.as_str() == normalized)
            .ok_or_else(|| UnknownRegion(s.to_string()))
    }
}
