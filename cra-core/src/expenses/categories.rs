use strum_macros::{AsRefStr, EnumIter, EnumString};

/// Expenses attached to a mission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, AsRefStr, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum MissionExpenseCategory {
    Transport,
    Restaurant,
    Materiel,
    Hebergement,
    Autres,
}

impl MissionExpenseCategory {
    pub fn label(self) -> &'static str {
        match self {
            MissionExpenseCategory::Transport => "Transport",
            MissionExpenseCategory::Restaurant => "Restaurant",
            MissionExpenseCategory::Materiel => "Matériel",
            MissionExpenseCategory::Hebergement => "Hébergement",
            MissionExpenseCategory::Autres => "Autres",
        }
    }
}

/// Running costs of the business, not tied to a mission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, AsRefStr, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum GeneralExpenseCategory {
    Bureau,
    Logiciel,
    Formation,
    Comptabilite,
    Assurance,
    Autres,
}

impl GeneralExpenseCategory {
    pub fn label(self) -> &'static str {
        match self {
            GeneralExpenseCategory::Bureau => "Bureau/Location",
            GeneralExpenseCategory::Logiciel => "Logiciels/Abonnements",
            GeneralExpenseCategory::Formation => "Formation",
            GeneralExpenseCategory::Comptabilite => "Comptabilité",
            GeneralExpenseCategory::Assurance => "Assurance",
            GeneralExpenseCategory::Autres => "Autres",
        }
    }
}
