use serde::Serialize;

/// Inputs whose individual effect on NPV is measured by the tornado sweep.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum SensitivityVariable {
    DevelopmentFtes,
    DevelopmentYears,
    MaintenanceFtes,
    SalesYears,
    UnitCost,
    Margin,
    YearlySales,
}

impl SensitivityVariable {
    pub const ALL: [SensitivityVariable; 7] = [
        SensitivityVariable::DevelopmentFtes,
        SensitivityVariable::DevelopmentYears,
        SensitivityVariable::MaintenanceFtes,
        SensitivityVariable::SalesYears,
        SensitivityVariable::UnitCost,
        SensitivityVariable::Margin,
        SensitivityVariable::YearlySales,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            SensitivityVariable::DevelopmentFtes => "Dev FTEs",
            SensitivityVariable::DevelopmentYears => "Dev Years",
            SensitivityVariable::MaintenanceFtes => "Maint FTEs",
            SensitivityVariable::SalesYears => "Sales Years",
            SensitivityVariable::UnitCost => "Unit Cost",
            SensitivityVariable::Margin => "Margin",
            SensitivityVariable::YearlySales => "Yearly Sales",
        }
    }
}

/// Which inputs a snapshot draws randomly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Isolation {
    /// Every input is sampled.
    Off,
    /// Only the given input is sampled, the rest are pinned to their mode.
    Only(SensitivityVariable),
}

impl Isolation {
    /// Whether an input tied to `variable` (or to no sensitivity variable at
    /// all, when `None`) must be pinned to its mode.
    pub fn pins(&self, variable: Option<SensitivityVariable>) -> bool {
        match self {
            Isolation::Off => false,
            Isolation::Only(target) => variable != Some(*target),
        }
    }
}
