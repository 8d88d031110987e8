//! # Document Generation Seam
//!
//! The document generator consumes a finalized certification record
//! plus its application and produces a printable artifact. Generation
//! itself is an external collaborator — the core only stores the
//! content-addressed reference and never inspects the generated bytes.

use regcom_assembly::CertificationRecord;
use regcom_core::{ArtifactRef, ContentDigest};
use regcom_workflow::OrganizationApplication;

use crate::error::ServiceError;

/// Contract for the document generator.
pub trait DocumentGenerator {
    /// Produce the certificate artifact for a finalized certification.
    fn generate(
        &self,
        application: &OrganizationApplication,
        record: &CertificationRecord,
    ) -> Result<ArtifactRef, ServiceError>;
}

/// Generator that produces a content-addressed reference over the
/// serialized certification data.
///
/// Stands in for the external template/PDF pipeline: downstream
/// consumers resolve the digest against whatever artifact store the
/// deployment uses.
#[derive(Debug, Clone, Copy, Default)]
pub struct DigestArtifactGenerator;

impl DocumentGenerator for DigestArtifactGenerator {
    fn generate(
        &self,
        application: &OrganizationApplication,
        record: &CertificationRecord,
    ) -> Result<ArtifactRef, ServiceError> {
        let payload = serde_json::json!({
            "application": application.id,
            "organization": application.name,
            "record": record,
        });
        let bytes = serde_json::to_vec(&payload)
            .map_err(|e| ServiceError::DocumentGeneration(e.to_string()))?;
        Ok(ArtifactRef {
            digest: ContentDigest::of_bytes(&bytes),
            media_type: "application/json".to_string(),
            label: "acta constitutiva".to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use regcom_assembly::{CertifiedPerson, Directorio};
    use regcom_core::{
        ApplicationId, CivilDate, NamedPerson, OrganizationCategory, Rut, SignatureRef, TimeOfDay,
        Timestamp,
    };
    use regcom_workflow::RequestedSlot;

    fn certified(name: &str, rut: &str) -> CertifiedPerson {
        CertifiedPerson {
            person: NamedPerson {
                member_id: None,
                name: name.to_string(),
                rut: Rut::parse(rut).unwrap(),
                birth_date: None,
            },
            signature: SignatureRef {
                digest: ContentDigest::of_bytes(name.as_bytes()),
                media_type: "image/png".to_string(),
                byte_len: name.len() as u64,
            },
        }
    }

    #[test]
    fn generation_is_deterministic_per_record() {
        let app = OrganizationApplication::new(
            ApplicationId::new(),
            "Centro de Madres Amanecer".to_string(),
            OrganizationCategory::CentroMadres,
            "citizen-1".to_string(),
            vec![],
            RequestedSlot {
                election_date: CivilDate::parse("2025-03-10").unwrap(),
                election_time: TimeOfDay::parse("10:00").unwrap(),
                assembly_address: "Sede social".to_string(),
            },
            Timestamp::parse("2025-03-01T09:00:00Z").unwrap(),
        );
        let record = CertificationRecord {
            directorio: Directorio {
                president: certified("P Uno", "11111111-1"),
                secretary: certified("S Dos", "22222222-2"),
                treasurer: certified("T Tres", "33333333-3"),
            },
            additional_seats: vec![],
            electoral_commission: vec![
                certified("C Uno", "44444444-4"),
                certified("C Dos", "55555555-5"),
                certified("C Tres", "66666666-6"),
            ],
            attendees: vec![],
            official_signature: SignatureRef {
                digest: ContentDigest::of_bytes(b"ministro"),
                media_type: "image/png".to_string(),
                byte_len: 8,
            },
            notes: String::new(),
        };

        let generator = DigestArtifactGenerator;
        let a = generator.generate(&app, &record).unwrap();
        let b = generator.generate(&app, &record).unwrap();
        assert_eq!(a.digest, b.digest);
        assert_eq!(a.label, "acta constitutiva");
    }
}
