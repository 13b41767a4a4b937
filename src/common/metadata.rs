// Error correction level
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Copy, Clone, PartialOrd, Ord, Default)]
pub enum ECLevel {
    L = 0,
    M = 1,
    Q = 2,
    #[default]
    H = 3,
}

impl ECLevel {
    /// Nominal share of modules, in percent, that may be damaged while the symbol
    /// still decodes.
    pub const fn recovery_pct(self) -> f64 {
        match self {
            Self::L => 7.0,
            Self::M => 15.0,
            Self::Q => 25.0,
            Self::H => 30.0,
        }
    }
}

// Budget the autotuner works against. Logos are always placed on level H symbols.
pub const ECC_BUDGET: f64 = ECLevel::H.recovery_pct();

// Below this much residual ECC, decoding becomes unreliable in practice
pub const LOW_ECC_WARNING_PCT: f64 = 15.0;
