use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A string did not name any variant of the target enum.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid value for {field}: {value}")]
pub struct InvalidEnum {
    pub field: String,
    pub value: String,
}

/// Macro to generate enum with as_str + std::str::FromStr pattern.
/// The serde representation matches `as_str`.
macro_rules! str_enum {
    ($(#[$attr:meta])* $name:ident { $($(#[$vattr:meta])* $variant:ident => $s:literal),+ $(,)? }) => {
        $(#[$attr])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $($(#[$vattr])* #[serde(rename = $s)] $variant),+
        }

        impl $name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $s),+
                }
            }
        }

        impl std::str::FromStr for $name {
            type Err = InvalidEnum;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($s => Ok(Self::$variant)),+,
                    _ => Err(InvalidEnum {
                        field: stringify!($name).into(),
                        value: s.into(),
                    }),
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

// Per-condition scale. Distinct from `OverallSeverity`: "high" here, "severe" there.
str_enum!(ConditionSeverity {
    Mild => "mild",
    Moderate => "moderate",
    High => "high",
});

str_enum!(OverallSeverity {
    Mild => "mild",
    Moderate => "moderate",
    Severe => "severe",
});

str_enum!(TemperatureUnit {
    Celsius => "C",
    Fahrenheit => "F",
});

str_enum!(FoodTiming {
    Before => "before",
    After => "after",
});

str_enum!(Gender {
    Male => "male",
    Female => "female",
    Other => "other",
});

str_enum!(#[derive(Default)] Language {
    #[default]
    English => "English",
    Nepali => "Nepali",
    Hindi => "Hindi",
});

/// Traffic-light urgency shown next to the result.
/// Serialized as the colored glyph clients render directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UrgencyStatus {
    #[serde(rename = "🔴")]
    Red,
    #[serde(rename = "🟡")]
    Yellow,
    #[serde(rename = "🟢")]
    Green,
}

impl UrgencyStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Red => "red",
            Self::Yellow => "yellow",
            Self::Green => "green",
        }
    }
}

impl From<OverallSeverity> for UrgencyStatus {
    fn from(severity: OverallSeverity) -> Self {
        match severity {
            OverallSeverity::Severe => Self::Red,
            OverallSeverity::Moderate => Self::Yellow,
            OverallSeverity::Mild => Self::Green,
        }
    }
}
