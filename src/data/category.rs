use std::fmt;
use std::str::FromStr;

use thiserror::Error;

// ---------------------------------------------------------------------------
// Category – the four filter axes
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    Sectors,
    Technique,
    KindOfProblem,
    ModelName,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CategoryError {
    #[error("unknown filter category `{0}`")]
    UnknownCategory(String),
    #[error("value `{value}` is not part of the {category} enumeration")]
    UnknownValue { category: Category, value: String },
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Sectors,
        Category::Technique,
        Category::KindOfProblem,
        Category::ModelName,
    ];

    /// Identifier used by the filter state and the metadata catalog.
    pub fn key(self) -> &'static str {
        match self {
            Category::Sectors => "sectors",
            Category::Technique => "technique",
            Category::KindOfProblem => "kindOfProblem",
            Category::ModelName => "modelName",
        }
    }

    /// Panel heading.
    pub fn title(self) -> &'static str {
        match self {
            Category::Sectors => "Sectors",
            Category::Technique => "Technique",
            Category::KindOfProblem => "Kind of Problem",
            Category::ModelName => "Model",
        }
    }

    /// Optional column of the results export carrying this tag.
    pub fn column(self) -> &'static str {
        match self {
            Category::Sectors => "Sectors",
            Category::Technique => "Technique",
            Category::KindOfProblem => "Kind of Problem",
            Category::ModelName => "Model",
        }
    }

    /// Legal values and their display labels, in panel order.
    pub fn values(self) -> &'static [(&'static str, &'static str)] {
        match self {
            Category::Sectors => SECTORS,
            Category::Technique => TECHNIQUES,
            Category::KindOfProblem => KINDS_OF_PROBLEM,
            Category::ModelName => MODELS,
        }
    }

    /// Display label for `value`. Values outside the enumeration are an
    /// error rather than a pass-through.
    pub fn label_for(self, value: &str) -> Result<&'static str, CategoryError> {
        self.values()
            .iter()
            .find(|(v, _)| *v == value)
            .map(|(_, label)| *label)
            .ok_or_else(|| CategoryError::UnknownValue {
                category: self,
                value: value.to_string(),
            })
    }
}

impl FromStr for Category {
    type Err = CategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.key() == s)
            .ok_or_else(|| CategoryError::UnknownCategory(s.to_string()))
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

// -- Enumerations (value, label) --

const SECTORS: &[(&str, &str)] = &[("Power", "Power"), ("Sector-coupled", "Sector coupled")];

const TECHNIQUES: &[(&str, &str)] = &[("LP", "LP"), ("MILP", "MILP")];

const KINDS_OF_PROBLEM: &[(&str, &str)] = &[
    (
        "Infrastructure & Capacity Expansion",
        "Infrastructure & Capacity Expansion",
    ),
    ("Operational", "Operational"),
    (
        "Steady-state Optimal Power Flow",
        "Steady-state Optimal Power Flow",
    ),
    ("DC Optimal Power Flow", "DC Optimal Power Flow"),
    ("Unit Commitment", "Unit Commitment"),
    ("Production cost modelling", "Production cost modelling"),
];

const MODELS: &[(&str, &str)] = &[
    ("GenX", "Gen X"),
    ("PowerModel", "Power Model"),
    ("PyPSA", "PyPSA"),
    ("PyPSA-Eur", "PyPSA - Eur"),
    ("Sienna", "Sienna"),
    ("TEMOA", "TEMOA"),
    ("TIMES", "TIMES"),
];
