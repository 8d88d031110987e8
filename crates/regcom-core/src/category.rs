//! # Organization Categories
//!
//! The statute distinguishes territorial organizations (juntas de
//! vecinos) from functional ones (clubs, committees, centers). The
//! category drives the recommended attendee minimum for the constitutive
//! assembly — a recommendation, never a blocking validation.

use serde::{Deserialize, Serialize};

/// Category of a community organization under the civic statute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrganizationCategory {
    /// Territorial neighborhood council.
    JuntaVecinos,
    /// Sports club (functional).
    ClubDeportivo,
    /// Mothers' center (functional).
    CentroMadres,
    /// Housing committee (functional).
    ComiteVivienda,
    /// Any other functional organization.
    OrganizacionFuncional,
}

impl OrganizationCategory {
    /// All categories as a slice.
    pub fn all() -> &'static [OrganizationCategory] {
        &[
            Self::JuntaVecinos,
            Self::ClubDeportivo,
            Self::CentroMadres,
            Self::ComiteVivienda,
            Self::OrganizacionFuncional,
        ]
    }

    /// The canonical string name of this category.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::JuntaVecinos => "JUNTA_VECINOS",
            Self::ClubDeportivo => "CLUB_DEPORTIVO",
            Self::CentroMadres => "CENTRO_MADRES",
            Self::ComiteVivienda => "COMITE_VIVIENDA",
            Self::OrganizacionFuncional => "ORGANIZACION_FUNCIONAL",
        }
    }

    /// Recommended minimum attendee count for the constitutive assembly.
    ///
    /// Territorial organizations carry the statute's higher constitution
    /// quorum; functional organizations the lower one. Advisory only —
    /// the validation protocol warns below this count but never blocks.
    pub fn recommended_min_attendees(&self) -> usize {
        match self {
            Self::JuntaVecinos => 50,
            Self::ClubDeportivo
            | Self::CentroMadres
            | Self::ComiteVivienda
            | Self::OrganizacionFuncional => 15,
        }
    }
}

impl std::fmt::Display for OrganizationCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
