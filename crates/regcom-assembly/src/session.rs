//! # Certification Session
//!
//! The five-step, step-ordered data-collection process the Ministro de
//! Fe runs at the constitutive assembly:
//!
//! ```text
//! Directorio ──▶ AdditionalSeats ──▶ Commission ──▶ Attendees ──▶ Confirmation
//! ```
//!
//! Each step is validated before the session advances; the collected
//! data becomes a [`CertificationRecord`] only at [`confirm`]
//! (`CertificationSession::confirm`), which re-runs the full record
//! validation before emitting it.
//!
//! ## Design Choice: Validated Enum over Typestate
//!
//! The step is a runtime-checked enum rather than five typestate types.
//! The session is driven from deserialized input (CLI session files,
//! form submissions) where the step is not known at compile time, and
//! the same `add_*` operation repeats within a step — a validated enum
//! with a `require_step` guard keeps one `impl` block and one error
//! path. The compile-time guarantee the typestate would give is
//! recovered at the output boundary: the record re-validates everything
//! on finalization.
//!
//! ## Abandonment
//!
//! There is no partial persistence. A session either reaches `confirm`
//! or is dropped; nothing of an abandoned session survives.

use std::collections::HashMap;

use regcom_core::{
    CivilDate, FoundingMember, NamedPerson, OrganizationCategory, PersonKey, PersonRef,
    SignatureRef,
};

use crate::error::AssemblyError;
use crate::record::{
    AdditionalSeat, Attendee, BoardRole, CertificationRecord, CertifiedPerson, Directorio,
};

// ── Steps ──────────────────────────────────────────────────────────────

/// The ordered steps of the certification protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionStep {
    /// Step 1: president, secretary, treasurer.
    Directorio,
    /// Step 2: optional additional board seats.
    AdditionalSeats,
    /// Step 3: the 3-person electoral commission.
    Commission,
    /// Step 4: the attendance roster.
    Attendees,
    /// Step 5: notes and the official's own signature.
    Confirmation,
}

impl SessionStep {
    /// The canonical step name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Directorio => "DIRECTORIO",
            Self::AdditionalSeats => "ADDITIONAL_SEATS",
            Self::Commission => "COMMISSION",
            Self::Attendees => "ATTENDEES",
            Self::Confirmation => "CONFIRMATION",
        }
    }
}

impl std::fmt::Display for SessionStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Roster Advisory ────────────────────────────────────────────────────

/// Advisory emitted when the attendee count falls below the category's
/// recommended minimum. Never blocks completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterAdvisory {
    /// The organization category.
    pub category: OrganizationCategory,
    /// Attendees actually on the roster.
    pub attendee_count: usize,
    /// The category's recommended minimum.
    pub recommended_min: usize,
}

impl std::fmt::Display for RosterAdvisory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "attendee count {} is below the recommended minimum of {} for {}",
            self.attendee_count, self.recommended_min, self.category
        )
    }
}

// ── The Session ────────────────────────────────────────────────────────

/// A stateful certification session for one assembly.
///
/// Selection-time checks (role uniqueness, commission disjointness,
/// minor eligibility) run as data is entered; the same invariants run
/// again inside [`CertificationRecord::validate`] at confirmation.
#[derive(Debug)]
pub struct CertificationSession {
    step: SessionStep,
    category: OrganizationCategory,
    assembly_date: CivilDate,
    roster: Vec<FoundingMember>,
    president: Option<CertifiedPerson>,
    secretary: Option<CertifiedPerson>,
    treasurer: Option<CertifiedPerson>,
    seats: Vec<AdditionalSeat>,
    commission: Vec<CertifiedPerson>,
    attendees: Vec<Attendee>,
}

impl CertificationSession {
    /// Open a session for the given organization.
    pub fn new(
        category: OrganizationCategory,
        assembly_date: CivilDate,
        roster: Vec<FoundingMember>,
    ) -> Self {
        Self {
            step: SessionStep::Directorio,
            category,
            assembly_date,
            roster,
            president: None,
            secretary: None,
            treasurer: None,
            seats: Vec::new(),
            commission: Vec::new(),
            attendees: Vec::new(),
        }
    }

    /// The step the session is currently in.
    pub fn step(&self) -> SessionStep {
        self.step
    }

    // ── Step 1: Directorio ─────────────────────────────────────────────

    /// Assign a directorio role with its captured signature.
    ///
    /// Re-assigning the same role replaces the earlier selection. A
    /// person already holding a different role is rejected with the
    /// conflicting role named; minors are rejected outright.
    pub fn assign_role(
        &mut self,
        role: BoardRole,
        person: PersonRef,
        signature: SignatureRef,
    ) -> Result<(), AssemblyError> {
        self.require_step(SessionStep::Directorio)?;
        let resolved = self.resolve_adult(&person)?;

        for (other_role, holder) in self.role_slots() {
            if other_role != role {
                if let Some(holder) = holder {
                    if holder.person.key() == resolved.key() {
                        return Err(AssemblyError::RoleAlreadyHeld {
                            person: resolved.to_string(),
                            existing_role: other_role.as_str().to_string(),
                            attempted_role: role.as_str().to_string(),
                        });
                    }
                }
            }
        }

        let certified = CertifiedPerson {
            person: resolved,
            signature,
        };
        match role {
            BoardRole::President => self.president = Some(certified),
            BoardRole::Secretary => self.secretary = Some(certified),
            BoardRole::Treasurer => self.treasurer = Some(certified),
        }
        Ok(())
    }

    /// Complete step 1 and advance to additional seats.
    ///
    /// # Errors
    ///
    /// Returns [`AssemblyError::MissingRole`] for any unassigned role.
    pub fn complete_directorio(&mut self) -> Result<(), AssemblyError> {
        self.require_step(SessionStep::Directorio)?;
        for (role, holder) in self.role_slots() {
            if holder.is_none() {
                return Err(AssemblyError::MissingRole {
                    role: role.as_str().to_string(),
                });
            }
        }
        self.step = SessionStep::AdditionalSeats;
        Ok(())
    }

    // ── Step 2: Additional Seats ───────────────────────────────────────

    /// Add an additional board seat with a cargo label and signature.
    pub fn add_seat(
        &mut self,
        cargo: &str,
        person: PersonRef,
        signature: SignatureRef,
    ) -> Result<(), AssemblyError> {
        self.require_step(SessionStep::AdditionalSeats)?;
        let cargo = cargo.trim();
        if cargo.is_empty() {
            return Err(AssemblyError::MissingCargo);
        }
        let resolved = self.resolve_adult(&person)?;
        if let Some(existing_role) = self.board_roles().get(&resolved.key()) {
            return Err(AssemblyError::RoleAlreadyHeld {
                person: resolved.to_string(),
                existing_role: existing_role.clone(),
                attempted_role: cargo.to_string(),
            });
        }
        self.seats.push(AdditionalSeat {
            cargo: cargo.to_string(),
            member: CertifiedPerson {
                person: resolved,
                signature,
            },
        });
        Ok(())
    }

    /// Complete step 2 (always permitted — seats are optional).
    pub fn complete_seats(&mut self) -> Result<(), AssemblyError> {
        self.require_step(SessionStep::AdditionalSeats)?;
        self.step = SessionStep::Commission;
        Ok(())
    }

    // ── Step 3: Electoral Commission ───────────────────────────────────

    /// Add a commission member with their signature.
    ///
    /// Commission members must be disjoint from every board role and
    /// seat — a violation names the person and the conflicting role.
    pub fn add_commission_member(
        &mut self,
        person: PersonRef,
        signature: SignatureRef,
    ) -> Result<(), AssemblyError> {
        self.require_step(SessionStep::Commission)?;
        if self.commission.len() >= 3 {
            return Err(AssemblyError::CommissionFull);
        }
        let resolved = self.resolve_adult(&person)?;
        if let Some(conflicting_role) = self.board_roles().get(&resolved.key()) {
            return Err(AssemblyError::CommissionOverlap {
                person: resolved.to_string(),
                conflicting_role: conflicting_role.clone(),
            });
        }
        if self
            .commission
            .iter()
            .any(|m| m.person.key() == resolved.key())
        {
            return Err(AssemblyError::DuplicateCommissionMember {
                person: resolved.to_string(),
            });
        }
        self.commission.push(CertifiedPerson {
            person: resolved,
            signature,
        });
        Ok(())
    }

    /// Complete step 3; requires exactly 3 members. Advancing seeds the
    /// attendee roster from steps 1-3 with their signatures carried over.
    pub fn complete_commission(&mut self) -> Result<(), AssemblyError> {
        self.require_step(SessionStep::Commission)?;
        if self.commission.len() != 3 {
            return Err(AssemblyError::CommissionIncomplete {
                found: self.commission.len(),
            });
        }
        self.step = SessionStep::Attendees;
        self.seed_attendees();
        Ok(())
    }

    // ── Step 4: Attendees ──────────────────────────────────────────────

    /// Add an attendee beyond those carried over from steps 1-3.
    ///
    /// Attendees may be founding members or ad hoc external persons;
    /// each needs their own signature. Minors may attend — only roles
    /// are age-restricted.
    pub fn add_attendee(
        &mut self,
        person: PersonRef,
        signature: SignatureRef,
    ) -> Result<(), AssemblyError> {
        self.require_step(SessionStep::Attendees)?;
        let resolved = person.resolve(&self.roster)?;
        if self
            .attendees
            .iter()
            .any(|a| a.person.key() == resolved.key())
        {
            return Err(AssemblyError::DuplicateAttendee {
                person: resolved.to_string(),
            });
        }
        self.attendees.push(Attendee {
            person: resolved,
            signature,
            carried_over: false,
        });
        Ok(())
    }

    /// Complete step 4.
    ///
    /// Returns a [`RosterAdvisory`] when the attendee count is below the
    /// category's recommended minimum — a warning only; the step always
    /// completes.
    pub fn complete_attendees(&mut self) -> Result<Option<RosterAdvisory>, AssemblyError> {
        self.require_step(SessionStep::Attendees)?;
        self.step = SessionStep::Confirmation;
        let recommended_min = self.category.recommended_min_attendees();
        if self.attendees.len() < recommended_min {
            return Ok(Some(RosterAdvisory {
                category: self.category,
                attendee_count: self.attendees.len(),
                recommended_min,
            }));
        }
        Ok(None)
    }

    // ── Step 5: Confirmation ───────────────────────────────────────────

    /// Finalize the session, emitting the immutable record.
    ///
    /// The official's own signature is mandatory. The full record
    /// validation runs here again — selection-time checks alone are not
    /// trusted.
    pub fn confirm(
        mut self,
        notes: String,
        official_signature: SignatureRef,
    ) -> Result<CertificationRecord, AssemblyError> {
        self.require_step(SessionStep::Confirmation)?;
        let directorio = Directorio {
            president: self.take_role(BoardRole::President)?,
            secretary: self.take_role(BoardRole::Secretary)?,
            treasurer: self.take_role(BoardRole::Treasurer)?,
        };
        let record = CertificationRecord {
            directorio,
            additional_seats: self.seats,
            electoral_commission: self.commission,
            attendees: self.attendees,
            official_signature,
            notes,
        };
        record.validate(self.assembly_date)?;
        Ok(record)
    }

    // ── Internals ──────────────────────────────────────────────────────

    /// Guard an operation against the current step.
    fn require_step(&self, required: SessionStep) -> Result<(), AssemblyError> {
        if self.step != required {
            return Err(AssemblyError::StepOrder {
                current: self.step.to_string(),
                required: required.to_string(),
            });
        }
        Ok(())
    }

    /// Resolve a person reference and reject minors.
    fn resolve_adult(&self, person: &PersonRef) -> Result<NamedPerson, AssemblyError> {
        let resolved = person.resolve(&self.roster)?;
        if resolved.is_minor(self.assembly_date) {
            return Err(AssemblyError::MinorNotEligible {
                person: resolved.to_string(),
            });
        }
        Ok(resolved)
    }

    /// The three statutory role slots with their current holders.
    fn role_slots(&self) -> [(BoardRole, Option<&CertifiedPerson>); 3] {
        [
            (BoardRole::President, self.president.as_ref()),
            (BoardRole::Secretary, self.secretary.as_ref()),
            (BoardRole::Treasurer, self.treasurer.as_ref()),
        ]
    }

    /// Every claimed board role and seat, keyed by person.
    fn board_roles(&self) -> HashMap<PersonKey, String> {
        let mut map = HashMap::new();
        for (role, holder) in self.role_slots() {
            if let Some(holder) = holder {
                map.insert(holder.person.key(), role.as_str().to_string());
            }
        }
        for seat in &self.seats {
            map.insert(seat.member.person.key(), seat.cargo.clone());
        }
        map
    }

    /// Pre-seed the attendee roster from steps 1-3.
    fn seed_attendees(&mut self) {
        let mut seeded: Vec<Attendee> = Vec::new();
        for (_, holder) in self.role_slots() {
            if let Some(holder) = holder {
                seeded.push(Attendee {
                    person: holder.person.clone(),
                    signature: holder.signature.clone(),
                    carried_over: true,
                });
            }
        }
        for seat in &self.seats {
            seeded.push(Attendee {
                person: seat.member.person.clone(),
                signature: seat.member.signature.clone(),
                carried_over: true,
            });
        }
        for member in &self.commission {
            seeded.push(Attendee {
                person: member.person.clone(),
                signature: member.signature.clone(),
                carried_over: true,
            });
        }
        self.attendees = seeded;
    }

    /// Take a completed role holder out of the session.
    fn take_role(&mut self, role: BoardRole) -> Result<CertifiedPerson, AssemblyError> {
        let slot = match role {
            BoardRole::President => self.president.take(),
            BoardRole::Secretary => self.secretary.take(),
            BoardRole::Treasurer => self.treasurer.take(),
        };
        slot.ok_or_else(|| AssemblyError::MissingRole {
            role: role.as_str().to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use regcom_core::{ContentDigest, MemberId, Rut};

    fn sig(seed: &str) -> SignatureRef {
        SignatureRef {
            digest: ContentDigest::of_bytes(seed.as_bytes()),
            media_type: "image/png".to_string(),
            byte_len: seed.len() as u64,
        }
    }

    fn manual(name: &str, rut: &str) -> PersonRef {
        PersonRef::Manual {
            name: name.to_string(),
            rut: Rut::parse(rut).unwrap(),
        }
    }

    fn roster() -> Vec<FoundingMember> {
        vec![
            FoundingMember {
                id: MemberId::new(),
                name: "María Soto".to_string(),
                rut: Rut::parse("11111111-1").unwrap(),
                birth_date: Some(CivilDate::parse("1980-05-01").unwrap()),
            },
            FoundingMember {
                id: MemberId::new(),
                name: "Pedro Rojas".to_string(),
                rut: Rut::parse("22222222-2").unwrap(),
                birth_date: Some(CivilDate::parse("2010-01-15").unwrap()),
            },
        ]
    }

    fn session(category: OrganizationCategory) -> CertificationSession {
        CertificationSession::new(
            category,
            CivilDate::parse("2025-03-10").unwrap(),
            roster(),
        )
    }

    /// Drive a session through steps 1-3 with distinct adults.
    fn session_through_commission() -> CertificationSession {
        let mut s = session(OrganizationCategory::ClubDeportivo);
        s.assign_role(BoardRole::President, manual("P Uno", "11111112-K"), sig("p"))
            .unwrap();
        s.assign_role(BoardRole::Secretary, manual("S Dos", "33333333-3"), sig("s"))
            .unwrap();
        s.assign_role(BoardRole::Treasurer, manual("T Tres", "44444444-4"), sig("t"))
            .unwrap();
        s.complete_directorio().unwrap();
        s.complete_seats().unwrap();
        s.add_commission_member(manual("C Uno", "55555555-5"), sig("c1")).unwrap();
        s.add_commission_member(manual("C Dos", "66666666-6"), sig("c2")).unwrap();
        s.add_commission_member(manual("C Tres", "77777777-7"), sig("c3")).unwrap();
        s.complete_commission().unwrap();
        s
    }

    // ── Step ordering ──────────────────────────────────────────────────

    #[test]
    fn operations_outside_their_step_are_rejected() {
        let mut s = session(OrganizationCategory::ClubDeportivo);
        let err = s
            .add_commission_member(manual("C Uno", "55555555-5"), sig("c"))
            .unwrap_err();
        assert!(matches!(err, AssemblyError::StepOrder { .. }));

        let err = s.complete_seats().unwrap_err();
        assert!(matches!(err, AssemblyError::StepOrder { .. }));
    }

    #[test]
    fn confirm_before_attendees_complete_is_rejected() {
        let s = session_through_commission();
        // Session is in Attendees; confirm belongs to Confirmation.
        let err = s.confirm("notas".to_string(), sig("ministro")).unwrap_err();
        assert!(matches!(err, AssemblyError::StepOrder { .. }));
    }

    // ── Step 1 ─────────────────────────────────────────────────────────

    #[test]
    fn same_person_cannot_hold_two_roles() {
        let mut s = session(OrganizationCategory::ClubDeportivo);
        s.assign_role(BoardRole::President, manual("P Uno", "11111112-K"), sig("p"))
            .unwrap();
        let err = s
            .assign_role(BoardRole::Secretary, manual("P Uno", "11111112-K"), sig("s"))
            .unwrap_err();
        match err {
            AssemblyError::RoleAlreadyHeld {
                existing_role,
                attempted_role,
                ..
            } => {
                assert_eq!(existing_role, "presidente");
                assert_eq!(attempted_role, "secretario");
            }
            other => panic!("expected RoleAlreadyHeld, got {other}"),
        }
    }

    #[test]
    fn reassigning_the_same_role_replaces_the_holder() {
        let mut s = session(OrganizationCategory::ClubDeportivo);
        s.assign_role(BoardRole::President, manual("P Uno", "11111112-K"), sig("p"))
            .unwrap();
        s.assign_role(BoardRole::President, manual("P Otro", "33333333-3"), sig("p2"))
            .unwrap();
        s.assign_role(BoardRole::Secretary, manual("P Uno", "11111112-K"), sig("s"))
            .unwrap();
    }

    #[test]
    fn minor_roster_member_cannot_take_a_role() {
        let r = roster();
        let minor_id = r[1].id.clone();
        let mut s = CertificationSession::new(
            OrganizationCategory::ClubDeportivo,
            CivilDate::parse("2025-03-10").unwrap(),
            r,
        );
        let err = s
            .assign_role(BoardRole::Treasurer, PersonRef::Member { id: minor_id }, sig("t"))
            .unwrap_err();
        assert!(matches!(err, AssemblyError::MinorNotEligible { .. }));
    }

    #[test]
    fn directorio_cannot_complete_with_missing_role() {
        let mut s = session(OrganizationCategory::ClubDeportivo);
        s.assign_role(BoardRole::President, manual("P Uno", "11111112-K"), sig("p"))
            .unwrap();
        let err = s.complete_directorio().unwrap_err();
        assert!(matches!(err, AssemblyError::MissingRole { .. }));
    }

    // ── Step 3 ─────────────────────────────────────────────────────────

    #[test]
    fn commission_member_overlapping_board_names_the_role() {
        let mut s = session(OrganizationCategory::ClubDeportivo);
        s.assign_role(BoardRole::President, manual("P Uno", "11111112-K"), sig("p"))
            .unwrap();
        s.assign_role(BoardRole::Secretary, manual("S Dos", "33333333-3"), sig("s"))
            .unwrap();
        s.assign_role(BoardRole::Treasurer, manual("T Tres", "44444444-4"), sig("t"))
            .unwrap();
        s.complete_directorio().unwrap();
        s.complete_seats().unwrap();

        let err = s
            .add_commission_member(manual("P Uno", "11111112-K"), sig("c"))
            .unwrap_err();
        match err {
            AssemblyError::CommissionOverlap {
                person,
                conflicting_role,
            } => {
                assert!(person.contains("P Uno"));
                assert_eq!(conflicting_role, "presidente");
            }
            other => panic!("expected CommissionOverlap, got {other}"),
        }
    }

    #[test]
    fn commission_requires_exactly_three() {
        let mut s = session(OrganizationCategory::ClubDeportivo);
        s.assign_role(BoardRole::President, manual("P Uno", "11111112-K"), sig("p"))
            .unwrap();
        s.assign_role(BoardRole::Secretary, manual("S Dos", "33333333-3"), sig("s"))
            .unwrap();
        s.assign_role(BoardRole::Treasurer, manual("T Tres", "44444444-4"), sig("t"))
            .unwrap();
        s.complete_directorio().unwrap();
        s.complete_seats().unwrap();
        s.add_commission_member(manual("C Uno", "55555555-5"), sig("c1")).unwrap();

        let err = s.complete_commission().unwrap_err();
        assert!(matches!(err, AssemblyError::CommissionIncomplete { found: 1 }));
    }

    #[test]
    fn fourth_commission_member_is_rejected() {
        let mut s = session(OrganizationCategory::ClubDeportivo);
        s.assign_role(BoardRole::President, manual("P Uno", "11111112-K"), sig("p"))
            .unwrap();
        s.assign_role(BoardRole::Secretary, manual("S Dos", "33333333-3"), sig("s"))
            .unwrap();
        s.assign_role(BoardRole::Treasurer, manual("T Tres", "44444444-4"), sig("t"))
            .unwrap();
        s.complete_directorio().unwrap();
        s.complete_seats().unwrap();
        s.add_commission_member(manual("C Uno", "55555555-5"), sig("c1")).unwrap();
        s.add_commission_member(manual("C Dos", "66666666-6"), sig("c2")).unwrap();
        s.add_commission_member(manual("C Tres", "77777777-7"), sig("c3")).unwrap();

        let err = s
            .add_commission_member(manual("C Cuatro", "88888888-8"), sig("c4"))
            .unwrap_err();
        assert!(matches!(err, AssemblyError::CommissionFull));
    }

    // ── Step 4 ─────────────────────────────────────────────────────────

    #[test]
    fn attendees_are_seeded_from_earlier_steps() {
        let s = session_through_commission();
        // 3 directorio + 3 commission, all carried over.
        assert_eq!(s.attendees.len(), 6);
        assert!(s.attendees.iter().all(|a| a.carried_over));
    }

    #[test]
    fn ad_hoc_attendee_needs_own_signature_entry() {
        let mut s = session_through_commission();
        s.add_attendee(manual("Vecina Externa", "88888888-8"), sig("v")).unwrap();
        let added = s.attendees.last().unwrap();
        assert!(!added.carried_over);
    }

    #[test]
    fn duplicate_attendee_is_rejected() {
        let mut s = session_through_commission();
        let err = s
            .add_attendee(manual("P Uno", "11111112-K"), sig("x"))
            .unwrap_err();
        assert!(matches!(err, AssemblyError::DuplicateAttendee { .. }));
    }

    #[test]
    fn low_attendance_warns_but_never_blocks() {
        // JuntaVecinos recommends 50; 6 seeded + 4 added = 10 attendees.
        let mut s = CertificationSession::new(
            OrganizationCategory::JuntaVecinos,
            CivilDate::parse("2025-03-10").unwrap(),
            roster(),
        );
        s.assign_role(BoardRole::President, manual("P Uno", "11111112-K"), sig("p"))
            .unwrap();
        s.assign_role(BoardRole::Secretary, manual("S Dos", "33333333-3"), sig("s"))
            .unwrap();
        s.assign_role(BoardRole::Treasurer, manual("T Tres", "44444444-4"), sig("t"))
            .unwrap();
        s.complete_directorio().unwrap();
        s.complete_seats().unwrap();
        s.add_commission_member(manual("C Uno", "55555555-5"), sig("c1")).unwrap();
        s.add_commission_member(manual("C Dos", "66666666-6"), sig("c2")).unwrap();
        s.add_commission_member(manual("C Tres", "77777777-7"), sig("c3")).unwrap();
        s.complete_commission().unwrap();
        for (i, rut) in ["88888888-8", "99999999-9", "12345678-5", "87654321-4"]
            .iter()
            .enumerate()
        {
            s.add_attendee(manual(&format!("Vecino {i}"), rut), sig(rut)).unwrap();
        }

        let advisory = s.complete_attendees().unwrap().expect("advisory expected");
        assert_eq!(advisory.attendee_count, 10);
        assert_eq!(advisory.recommended_min, 50);
        // The session advanced despite the advisory.
        assert_eq!(s.step(), SessionStep::Confirmation);
    }

    #[test]
    fn sufficient_attendance_has_no_advisory() {
        let mut s = session_through_commission();
        // ClubDeportivo recommends 15; 6 carried over + 9 externals.
        let ruts = [
            "88888888-8", "99999999-9", "12345678-5", "87654321-4", "11111111-1",
            "22222222-2", "12345679-3", "23456789-6", "13579246-2",
        ];
        for (i, rut) in ruts.iter().enumerate() {
            s.add_attendee(manual(&format!("Vecino {i}"), rut), sig(rut)).unwrap();
        }
        assert_eq!(s.attendees.len(), 15);
        assert!(s.complete_attendees().unwrap().is_none());
    }

    // ── Step 5 ─────────────────────────────────────────────────────────

    #[test]
    fn full_protocol_emits_validated_record() {
        let mut s = session_through_commission();
        s.add_attendee(manual("Vecina Externa", "88888888-8"), sig("v")).unwrap();
        let advisory = s.complete_attendees().unwrap();
        assert!(advisory.is_some());

        let record = s
            .confirm("Asamblea realizada sin observaciones".to_string(), sig("ministro"))
            .unwrap();
        assert_eq!(record.electoral_commission.len(), 3);
        assert_eq!(record.attendees.len(), 7);
        assert_eq!(record.directorio.president.person.name, "P Uno");
        assert_eq!(record.notes, "Asamblea realizada sin observaciones");
    }
}
