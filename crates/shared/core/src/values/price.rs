use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Order price. Always strictly positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Price(Decimal);

impl Price {
    pub fn new(value: Decimal) -> Result<Self, &'static str> {
        if value <= Decimal::ZERO {
            return Err("Price must be greater than zero");
        }
        Ok(Price(value))
    }

    pub fn parse(s: &str) -> Result<Self, &'static str> {
        let decimal = s
            .trim()
            .parse::<Decimal>()
            .map_err(|_| "Price is not a number")?;
        Price::new(decimal)
    }

    pub fn inner(&self) -> Decimal {
        self.0
    }
}

impl FromStr for Price {
    type Err = &'static str;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Price::parse(s)
    }
}

impl TryFrom<Decimal> for Price {
    type Error = &'static str;
    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Price::new(value)
    }
}

impl From<Price> for Decimal {
    fn from(price: Price) -> Decimal {
        price.0
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
