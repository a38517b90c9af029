/// Coarse department-level classification used for filtering and stats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoleCategory {
    Engineering,
    Marketing,
    Finance,
    Operations,
    Sales,
    Hr,
    Product,
    Security,
    Legal,
    Design,
    Data,
    Executive,
}

impl RoleCategory {
    /// Parse a category name, including the aliases used by older page
    /// configs ("Technology" and friends). Unknown input is None, never
    /// an error.
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        let direct = [
            ("engineering", Self::Engineering),
            ("marketing", Self::Marketing),
            ("finance", Self::Finance),
            ("operations", Self::Operations),
            ("sales", Self::Sales),
            ("hr", Self::Hr),
            ("product", Self::Product),
            ("security", Self::Security),
            ("legal", Self::Legal),
            ("design", Self::Design),
            ("data", Self::Data),
            ("executive", Self::Executive),
            // Aliases from page configs that predate the category cleanup
            ("technology", Self::Engineering),
            ("innovation", Self::Engineering),
            ("compliance", Self::Legal),
            ("strategy", Self::Executive),
            ("communications", Self::Marketing),
            ("sustainability", Self::Operations),
        ];
        direct
            .iter()
            .find(|(name, _)| s.eq_ignore_ascii_case(name))
            .map(|(_, cat)| *cat)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Engineering => "Engineering",
            Self::Marketing => "Marketing",
            Self::Finance => "Finance",
            Self::Operations => "Operations",
            Self::Sales => "Sales",
            Self::Hr => "HR",
            Self::Product => "Product",
            Self::Security => "Security",
            Self::Legal => "Legal",
            Self::Design => "Design",
            Self::Data => "Data",
            Self::Executive => "Executive",
        }
    }
}

/// C-suite roles the rate guides cover.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecRole {
    Ceo,
    Cfo,
    Cto,
    Cmo,
    Coo,
    Chro,
    Cpo,
    Ciso,
    Cco,
}

/// UK-market defaults for an executive role. These back the earnings
/// widgets and serve as the fallback rate when no listing in a filtered
/// set has parseable compensation.
#[derive(Debug, Clone, Copy)]
pub struct RoleDefaults {
    pub label: &'static str,
    pub avg_day_rate: i64,
    pub min_day_rate: i64,
    pub max_day_rate: i64,
    pub avg_salary: i64,
    pub accent: &'static str,
}

impl ExecRole {
    pub const ALL: [ExecRole; 9] = [
        Self::Ceo,
        Self::Cfo,
        Self::Cto,
        Self::Cmo,
        Self::Coo,
        Self::Chro,
        Self::Cpo,
        Self::Ciso,
        Self::Cco,
    ];

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "ceo" => Some(Self::Ceo),
            "cfo" => Some(Self::Cfo),
            "cto" => Some(Self::Cto),
            "cmo" => Some(Self::Cmo),
            "coo" => Some(Self::Coo),
            "chro" => Some(Self::Chro),
            "cpo" => Some(Self::Cpo),
            "ciso" => Some(Self::Ciso),
            "cco" => Some(Self::Cco),
            _ => None,
        }
    }

    /// The exec role whose rate guide best represents a department, used
    /// when a category-filtered stats view has nothing parseable to average.
    pub fn for_category(category: RoleCategory) -> Option<Self> {
        match category {
            RoleCategory::Engineering => Some(Self::Cto),
            RoleCategory::Finance => Some(Self::Cfo),
            RoleCategory::Marketing => Some(Self::Cmo),
            RoleCategory::Operations => Some(Self::Coo),
            RoleCategory::Hr => Some(Self::Chro),
            RoleCategory::Product => Some(Self::Cpo),
            RoleCategory::Security => Some(Self::Ciso),
            RoleCategory::Executive => Some(Self::Ceo),
            RoleCategory::Sales => Some(Self::Cco),
            _ => None,
        }
    }

    pub fn defaults(self) -> &'static RoleDefaults {
        match self {
            Self::Ceo => &RoleDefaults {
                label: "CEO",
                avg_day_rate: 1200,
                min_day_rate: 900,
                max_day_rate: 1800,
                avg_salary: 180_000,
                accent: "indigo",
            },
            Self::Cfo => &RoleDefaults {
                label: "CFO",
                avg_day_rate: 1050,
                min_day_rate: 800,
                max_day_rate: 1500,
                avg_salary: 145_000,
                accent: "blue",
            },
            Self::Cto => &RoleDefaults {
                label: "CTO",
                avg_day_rate: 1100,
                min_day_rate: 850,
                max_day_rate: 1600,
                avg_salary: 155_000,
                accent: "blue",
            },
            Self::Cmo => &RoleDefaults {
                label: "CMO",
                avg_day_rate: 950,
                min_day_rate: 700,
                max_day_rate: 1400,
                avg_salary: 130_000,
                accent: "amber",
            },
            Self::Coo => &RoleDefaults {
                label: "COO",
                avg_day_rate: 950,
                min_day_rate: 750,
                max_day_rate: 1400,
                avg_salary: 140_000,
                accent: "orange",
            },
            Self::Chro => &RoleDefaults {
                label: "CHRO",
                avg_day_rate: 850,
                min_day_rate: 650,
                max_day_rate: 1200,
                avg_salary: 125_000,
                accent: "pink",
            },
            Self::Cpo => &RoleDefaults {
                label: "CPO",
                avg_day_rate: 1000,
                min_day_rate: 800,
                max_day_rate: 1400,
                avg_salary: 145_000,
                accent: "purple",
            },
            Self::Ciso => &RoleDefaults {
                label: "CISO",
                avg_day_rate: 1150,
                min_day_rate: 900,
                max_day_rate: 1600,
                avg_salary: 150_000,
                accent: "red",
            },
            Self::Cco => &RoleDefaults {
                label: "CCO",
                avg_day_rate: 1000,
                min_day_rate: 800,
                max_day_rate: 1200,
                avg_salary: 140_000,
                accent: "orange",
            },
        }
    }
}
