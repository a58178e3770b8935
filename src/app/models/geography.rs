//! Italian administrative geography enumerations
//!
//! Closed sets of regions and provinces with `Unset` sentinels. The 1-based
//! ordinals are the integer codes written by the codec and must stay stable.

use crate::{Error, Result};
use std::str::FromStr;

/// Italian region in which a station is located
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum Region {
    Abruzzo = 1,
    Basilicata,
    Calabria,
    Campania,
    EmiliaRomagna,
    FriuliVeneziaGiulia,
    Lazio,
    Liguria,
    Lombardia,
    Marche,
    Molise,
    Piemonte,
    Puglia,
    Sardegna,
    Sicilia,
    Toscana,
    TrentinoAltoAdige,
    Umbria,
    ValleDAosta,
    Veneto,
    Unset = 21,
}

impl Region {
    /// All variants, in ordinal order
    pub const ALL: [Region; 21] = [
        Region::Abruzzo,
        Region::Basilicata,
        Region::Calabria,
        Region::Campania,
        Region::EmiliaRomagna,
        Region::FriuliVeneziaGiulia,
        Region::Lazio,
        Region::Liguria,
        Region::Lombardia,
        Region::Marche,
        Region::Molise,
        Region::Piemonte,
        Region::Puglia,
        Region::Sardegna,
        Region::Sicilia,
        Region::Toscana,
        Region::TrentinoAltoAdige,
        Region::Umbria,
        Region::ValleDAosta,
        Region::Veneto,
        Region::Unset,
    ];

    /// Canonical code strings, aligned with [`Region::ALL`]
    const CODES: [&'static str; 21] = [
        "ABRUZZO",
        "BASILICATA",
        "CALABRIA",
        "CAMPANIA",
        "EMILIAROMAGNA",
        "FRIULIVENEZIAGIULIA",
        "LAZIO",
        "LIGURIA",
        "LOMBARDIA",
        "MARCHE",
        "MOLISE",
        "PIEMONTE",
        "PUGLIA",
        "SARDEGNA",
        "SICILIA",
        "TOSCANA",
        "TRENTINOALTOADIGE",
        "UMBRIA",
        "VALLEDAOSTA",
        "VENETO",
        "UNSET",
    ];

    /// Get the 1-based wire ordinal of this region
    pub fn ordinal(self) -> u8 {
        self as u8
    }

    /// Look up a region by its 1-based wire ordinal
    pub fn try_from_ordinal(value: u8) -> Result<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|region| *region as u8 == value)
            .ok_or_else(|| {
                Error::schema(format!(
                    "Unknown region ordinal {}: must be between 1 and {}",
                    value,
                    Self::ALL.len()
                ))
            })
    }

    /// Get the canonical code string (e.g. "LOMBARDIA")
    pub fn code(self) -> &'static str {
        Self::CODES[(self as u8 - 1) as usize]
    }
}

impl FromStr for Region {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::CODES
            .iter()
            .position(|code| *code == s.trim().to_uppercase())
            .map(|index| Self::ALL[index])
            .ok_or_else(|| Error::schema(format!("Unknown region code '{}'", s)))
    }
}

impl std::fmt::Display for Region {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Italian province in which a station is located
///
/// Two-letter vehicle codes; `Sd` is South Sardinia, `Sp` La Spezia.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum Province {
    Al = 1,
    An,
    Ar,
    Ap,
    At,
    Av,
    Bt,
    Bl,
    Bn,
    Bg,
    Bi,
    Bs,
    Br,
    Cb,
    Ce,
    Cz,
    Ch,
    Co,
    Cs,
    Cr,
    Kr,
    Cn,
    Fm,
    Fe,
    Fg,
    Fc,
    Fr,
    Gr,
    Im,
    Is,
    Sp,
    Aq,
    Lt,
    Le,
    Lc,
    Li,
    Lo,
    Lu,
    Mc,
    Mn,
    Ms,
    Mt,
    Mo,
    Mb,
    No,
    Nu,
    Or,
    Pd,
    Pr,
    Pv,
    Pg,
    Pu,
    Pe,
    Pc,
    Pi,
    Pt,
    Pz,
    Po,
    Ra,
    Re,
    Ri,
    Rn,
    Ro,
    Sa,
    Ss,
    Sv,
    Si,
    So,
    Sd,
    Ta,
    Te,
    Tr,
    Tv,
    Va,
    Vb,
    Vc,
    Vr,
    Vv,
    Vi,
    Vt,
    Bz,
    Tn,
    Ag,
    Cl,
    En,
    Rg,
    Sr,
    Tp,
    Ba,
    Bo,
    Ca,
    Ct,
    Fi,
    Ge,
    Me,
    Mi,
    Na,
    Pa,
    Rc,
    Rm,
    To,
    Ve,
    Unset = 103,
}

impl Province {
    /// All variants, in ordinal order
    pub const ALL: [Province; 103] = [
        Province::Al,
        Province::An,
        Province::Ar,
        Province::Ap,
        Province::At,
        Province::Av,
        Province::Bt,
        Province::Bl,
        Province::Bn,
        Province::Bg,
        Province::Bi,
        Province::Bs,
        Province::Br,
        Province::Cb,
        Province::Ce,
        Province::Cz,
        Province::Ch,
        Province::Co,
        Province::Cs,
        Province::Cr,
        Province::Kr,
        Province::Cn,
        Province::Fm,
        Province::Fe,
        Province::Fg,
        Province::Fc,
        Province::Fr,
        Province::Gr,
        Province::Im,
        Province::Is,
        Province::Sp,
        Province::Aq,
        Province::Lt,
        Province::Le,
        Province::Lc,
        Province::Li,
        Province::Lo,
        Province::Lu,
        Province::Mc,
        Province::Mn,
        Province::Ms,
        Province::Mt,
        Province::Mo,
        Province::Mb,
        Province::No,
        Province::Nu,
        Province::Or,
        Province::Pd,
        Province::Pr,
        Province::Pv,
        Province::Pg,
        Province::Pu,
        Province::Pe,
        Province::Pc,
        Province::Pi,
        Province::Pt,
        Province::Pz,
        Province::Po,
        Province::Ra,
        Province::Re,
        Province::Ri,
        Province::Rn,
        Province::Ro,
        Province::Sa,
        Province::Ss,
        Province::Sv,
        Province::Si,
        Province::So,
        Province::Sd,
        Province::Ta,
        Province::Te,
        Province::Tr,
        Province::Tv,
        Province::Va,
        Province::Vb,
        Province::Vc,
        Province::Vr,
        Province::Vv,
        Province::Vi,
        Province::Vt,
        Province::Bz,
        Province::Tn,
        Province::Ag,
        Province::Cl,
        Province::En,
        Province::Rg,
        Province::Sr,
        Province::Tp,
        Province::Ba,
        Province::Bo,
        Province::Ca,
        Province::Ct,
        Province::Fi,
        Province::Ge,
        Province::Me,
        Province::Mi,
        Province::Na,
        Province::Pa,
        Province::Rc,
        Province::Rm,
        Province::To,
        Province::Ve,
        Province::Unset,
    ];

    /// Canonical code strings, aligned with [`Province::ALL`]
    const CODES: [&'static str; 103] = [
        "AL", "AN", "AR", "AP", "AT", "AV", "BT", "BL", "BN", "BG", "BI", "BS", "BR", "CB", "CE",
        "CZ", "CH", "CO", "CS", "CR", "KR", "CN", "FM", "FE", "FG", "FC", "FR", "GR", "IM", "IS",
        "SP", "AQ", "LT", "LE", "LC", "LI", "LO", "LU", "MC", "MN", "MS", "MT", "MO", "MB", "NO",
        "NU", "OR", "PD", "PR", "PV", "PG", "PU", "PE", "PC", "PI", "PT", "PZ", "PO", "RA", "RE",
        "RI", "RN", "RO", "SA", "SS", "SV", "SI", "SO", "SD", "TA", "TE", "TR", "TV", "VA", "VB",
        "VC", "VR", "VV", "VI", "VT", "BZ", "TN", "AG", "CL", "EN", "RG", "SR", "TP", "BA", "BO",
        "CA", "CT", "FI", "GE", "ME", "MI", "NA", "PA", "RC", "RM", "TO", "VE", "UNSET",
    ];

    /// Get the 1-based wire ordinal of this province
    pub fn ordinal(self) -> u8 {
        self as u8
    }

    /// Look up a province by its 1-based wire ordinal
    pub fn try_from_ordinal(value: u8) -> Result<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|province| *province as u8 == value)
            .ok_or_else(|| {
                Error::schema(format!(
                    "Unknown province ordinal {}: must be between 1 and {}",
                    value,
                    Self::ALL.len()
                ))
            })
    }

    /// Get the canonical two-letter code (e.g. "TO")
    pub fn code(self) -> &'static str {
        Self::CODES[(self as u8 - 1) as usize]
    }
}

impl FromStr for Province {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::CODES
            .iter()
            .position(|code| *code == s.trim().to_uppercase())
            .map(|index| Self::ALL[index])
            .ok_or_else(|| Error::schema(format!("Unknown province code '{}'", s)))
    }
}

impl std::fmt::Display for Province {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}
