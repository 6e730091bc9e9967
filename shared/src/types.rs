//! Common types used across the platform

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Unit the user's temperature reading is expressed in
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum TemperatureUnit {
    #[default]
    Fahrenheit,
    Celsius,
}

impl TemperatureUnit {
    pub fn symbol(&self) -> &'static str {
        match self {
            TemperatureUnit::Fahrenheit => "°F",
            TemperatureUnit::Celsius => "°C",
        }
    }
}

impl fmt::Display for TemperatureUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for TemperatureUnit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fahrenheit" | "f" | "°f" => Ok(TemperatureUnit::Fahrenheit),
            "celsius" | "c" | "°c" => Ok(TemperatureUnit::Celsius),
            other => Err(format!("Unknown temperature unit: {}", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_symbols() {
        assert_eq!(TemperatureUnit::Fahrenheit.symbol(), "°F");
        assert_eq!(TemperatureUnit::Celsius.to_string(), "°C");
    }

    #[test]
    fn test_unit_parsing() {
        assert_eq!("celsius".parse::<TemperatureUnit>(), Ok(TemperatureUnit::Celsius));
        assert_eq!(" F ".parse::<TemperatureUnit>(), Ok(TemperatureUnit::Fahrenheit));
        assert!("kelvin".parse::<TemperatureUnit>().is_err());
    }
}
