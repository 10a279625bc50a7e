//! Moderator instructions
//!
//! An instruction is everything the engine asks of the moderator: read an
//! announcement and confirm, pick players, deal roles, or pick options.
//! Each instruction owns the contract for its answer. Raw input only becomes
//! a [`ModeratorResponse`] through [`ModeratorInstruction::validate_response`].
//!
//! Serialized with a `"type"` discriminator:
//!
//! ```json
//! {"type": "selectPlayers", "publicAnnouncement": "Seer, wake up.",
//!  "selectable": ["..."], "constraint": {"min": 1, "max": 1}}
//! ```

use std::collections::{BTreeMap, HashSet};
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use hollow_domain::{MainRole, PlayerId};

use crate::error::ContractError;
use crate::responses::{ModeratorResponse, ResponseInput};

// =============================================================================
// Instruction Kind
// =============================================================================

/// Shape of an instruction, shared with the raw response it expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum InstructionKind {
    Confirmation,
    SelectPlayers,
    AssignRoles,
    SelectOptions,
}

impl fmt::Display for InstructionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            InstructionKind::Confirmation => "confirmation",
            InstructionKind::SelectPlayers => "player selection",
            InstructionKind::AssignRoles => "role assignment",
            InstructionKind::SelectOptions => "option selection",
        };
        write!(f, "{}", name)
    }
}

// =============================================================================
// Count Constraint
// =============================================================================

/// Inclusive bounds on how many items a selection may contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawCountConstraint")]
pub struct CountConstraint {
    min: usize,
    max: usize,
}

#[derive(Deserialize)]
struct RawCountConstraint {
    min: usize,
    max: usize,
}

impl TryFrom<RawCountConstraint> for CountConstraint {
    type Error = ContractError;

    fn try_from(raw: RawCountConstraint) -> Result<Self, Self::Error> {
        Self::new(raw.min, raw.max)
    }
}

impl CountConstraint {
    pub fn new(min: usize, max: usize) -> Result<Self, ContractError> {
        if min > max {
            return Err(ContractError::InvalidConstraint { min, max });
        }
        Ok(Self { min, max })
    }

    /// Exactly `n` items.
    pub const fn exactly(n: usize) -> Self {
        Self { min: n, max: n }
    }

    /// Between zero and `n` items.
    pub const fn up_to(n: usize) -> Self {
        Self { min: 0, max: n }
    }

    #[inline]
    pub fn min(&self) -> usize {
        self.min
    }

    #[inline]
    pub fn max(&self) -> usize {
        self.max
    }

    pub fn allows(&self, count: usize) -> bool {
        (self.min..=self.max).contains(&count)
    }

    /// Fit the constraint to the number of choices actually offered.
    fn fit_to(self, available: usize) -> Result<Self, ContractError> {
        if self.min > available {
            return Err(ContractError::NotEnoughChoices {
                min: self.min,
                available,
            });
        }
        Ok(Self {
            min: self.min,
            max: self.max.min(available),
        })
    }

    fn check(&self, count: usize) -> Result<(), ContractError> {
        if self.allows(count) {
            Ok(())
        } else {
            Err(ContractError::CountOutOfRange {
                count,
                min: self.min,
                max: self.max,
            })
        }
    }
}

// =============================================================================
// Instruction Text
// =============================================================================

/// What the moderator reads: a public announcement for the table and/or a
/// private note for the moderator's eyes only. At least one is present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawInstructionText")]
pub struct InstructionText {
    #[serde(skip_serializing_if = "Option::is_none")]
    public_announcement: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    private_note: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawInstructionText {
    #[serde(default)]
    public_announcement: Option<String>,
    #[serde(default)]
    private_note: Option<String>,
}

impl TryFrom<RawInstructionText> for InstructionText {
    type Error = ContractError;

    fn try_from(raw: RawInstructionText) -> Result<Self, Self::Error> {
        Self::new(raw.public_announcement, raw.private_note)
    }
}

impl InstructionText {
    pub fn new(
        public_announcement: Option<String>,
        private_note: Option<String>,
    ) -> Result<Self, ContractError> {
        let present = |text: &Option<String>| text.as_deref().is_some_and(|t| !t.trim().is_empty());
        if !present(&public_announcement) && !present(&private_note) {
            return Err(ContractError::EmptyInstructionText);
        }
        Ok(Self {
            public_announcement,
            private_note,
        })
    }

    /// Text read aloud to the whole table.
    ///
    /// # Errors
    ///
    /// `ContractError::EmptyInstructionText` if `announcement` is blank.
    pub fn public(announcement: impl Into<String>) -> Result<Self, ContractError> {
        Self::new(Some(announcement.into()), None)
    }

    /// Text only the moderator sees.
    ///
    /// # Errors
    ///
    /// `ContractError::EmptyInstructionText` if `note` is blank.
    pub fn private(note: impl Into<String>) -> Result<Self, ContractError> {
        Self::new(None, Some(note.into()))
    }

    pub fn with_private_note(mut self, note: impl Into<String>) -> Self {
        self.private_note = Some(note.into());
        self
    }

    pub fn public_announcement(&self) -> Option<&str> {
        self.public_announcement.as_deref()
    }

    pub fn private_note(&self) -> Option<&str> {
        self.private_note.as_deref()
    }
}

/// Text plus the players the instruction is about, for UI context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstructionHeader {
    #[serde(flatten)]
    text: InstructionText,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    affected_players: Vec<PlayerId>,
}

impl InstructionHeader {
    fn new(text: InstructionText) -> Self {
        Self {
            text,
            affected_players: Vec::new(),
        }
    }
}

// =============================================================================
// Instruction Payloads
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmationRequest {
    #[serde(flatten)]
    header: InstructionHeader,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawPlayerSelection")]
pub struct PlayerSelection {
    #[serde(flatten)]
    header: InstructionHeader,
    selectable: Vec<PlayerId>,
    constraint: CountConstraint,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawPlayerSelection {
    #[serde(flatten)]
    header: InstructionHeader,
    selectable: Vec<PlayerId>,
    constraint: CountConstraint,
}

impl TryFrom<RawPlayerSelection> for PlayerSelection {
    type Error = ContractError;

    fn try_from(raw: RawPlayerSelection) -> Result<Self, Self::Error> {
        PlayerSelection::new(raw.header, raw.selectable, raw.constraint)
    }
}

impl PlayerSelection {
    fn new(
        header: InstructionHeader,
        selectable: Vec<PlayerId>,
        constraint: CountConstraint,
    ) -> Result<Self, ContractError> {
        let mut seen = HashSet::new();
        let selectable: Vec<PlayerId> = selectable.into_iter().filter(|p| seen.insert(*p)).collect();
        let constraint = constraint.fit_to(selectable.len())?;
        Ok(Self {
            header,
            selectable,
            constraint,
        })
    }

    fn validate(&self, selected: Vec<PlayerId>) -> Result<ModeratorResponse, ContractError> {
        let mut seen = HashSet::new();
        for player in &selected {
            if !seen.insert(*player) {
                return Err(ContractError::DuplicateSelection(*player));
            }
            if !self.selectable.contains(player) {
                return Err(ContractError::NotSelectable(*player));
            }
        }
        self.constraint.check(selected.len())?;
        Ok(ModeratorResponse::players(selected))
    }
}

/// The roles one player may be dealt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleCandidates {
    pub player: PlayerId,
    pub roles: Vec<MainRole>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawRoleAssignment")]
pub struct RoleAssignment {
    #[serde(flatten)]
    header: InstructionHeader,
    candidates: Vec<RoleCandidates>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawRoleAssignment {
    #[serde(flatten)]
    header: InstructionHeader,
    candidates: Vec<RoleCandidates>,
}

impl TryFrom<RawRoleAssignment> for RoleAssignment {
    type Error = ContractError;

    fn try_from(raw: RawRoleAssignment) -> Result<Self, Self::Error> {
        RoleAssignment::new(raw.header, raw.candidates)
    }
}

impl RoleAssignment {
    fn new(
        header: InstructionHeader,
        candidates: Vec<RoleCandidates>,
    ) -> Result<Self, ContractError> {
        let mut seen = HashSet::new();
        for entry in &candidates {
            if !seen.insert(entry.player) {
                return Err(ContractError::DuplicateCandidate(entry.player));
            }
            if entry.roles.is_empty() {
                return Err(ContractError::NoCandidateRoles(entry.player));
            }
        }
        Ok(Self { header, candidates })
    }

    fn validate(
        &self,
        assignments: BTreeMap<PlayerId, MainRole>,
    ) -> Result<ModeratorResponse, ContractError> {
        for (player, role) in &assignments {
            let entry = self
                .candidates
                .iter()
                .find(|c| c.player == *player)
                .ok_or(ContractError::UnknownPlayer(*player))?;
            if !entry.roles.contains(role) {
                return Err(ContractError::RoleNotCandidate {
                    player: *player,
                    role: *role,
                });
            }
        }
        if let Some(missing) = self
            .candidates
            .iter()
            .find(|c| !assignments.contains_key(&c.player))
        {
            return Err(ContractError::MissingAssignment(missing.player));
        }
        Ok(ModeratorResponse::roles(assignments))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawOptionSelection")]
pub struct OptionSelection {
    #[serde(flatten)]
    header: InstructionHeader,
    options: Vec<String>,
    constraint: CountConstraint,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawOptionSelection {
    #[serde(flatten)]
    header: InstructionHeader,
    options: Vec<String>,
    constraint: CountConstraint,
}

impl TryFrom<RawOptionSelection> for OptionSelection {
    type Error = ContractError;

    fn try_from(raw: RawOptionSelection) -> Result<Self, Self::Error> {
        OptionSelection::new(raw.header, raw.options, raw.constraint)
    }
}

impl OptionSelection {
    fn new(
        header: InstructionHeader,
        options: Vec<String>,
        constraint: CountConstraint,
    ) -> Result<Self, ContractError> {
        let mut seen = HashSet::new();
        let options: Vec<String> = options
            .into_iter()
            .filter(|o| seen.insert(o.clone()))
            .collect();
        let constraint = constraint.fit_to(options.len())?;
        Ok(Self {
            header,
            options,
            constraint,
        })
    }

    fn validate(&self, selected: Vec<String>) -> Result<ModeratorResponse, ContractError> {
        let mut seen = HashSet::new();
        for option in &selected {
            if !seen.insert(option.as_str()) {
                return Err(ContractError::DuplicateOption(option.clone()));
            }
            if !self.options.contains(option) {
                return Err(ContractError::UnknownOption(option.clone()));
            }
        }
        self.constraint.check(selected.len())?;
        Ok(ModeratorResponse::options(selected))
    }
}

// =============================================================================
// Moderator Instruction
// =============================================================================

/// A request for moderator input. At most one is pending per session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ModeratorInstruction {
    Confirmation(ConfirmationRequest),
    SelectPlayers(PlayerSelection),
    AssignRoles(RoleAssignment),
    SelectOptions(OptionSelection),
}

impl ModeratorInstruction {
    // =========================================================================
    // Constructors
    // =========================================================================

    pub fn confirm(text: InstructionText) -> Self {
        Self::Confirmation(ConfirmationRequest {
            header: InstructionHeader::new(text),
        })
    }

    /// Ask the moderator to pick players.
    ///
    /// `max` is clamped to the number of selectable players.
    ///
    /// # Errors
    ///
    /// `ContractError::NotEnoughChoices` if `constraint.min()` exceeds the
    /// number of selectable players.
    pub fn select_players(
        text: InstructionText,
        selectable: Vec<PlayerId>,
        constraint: CountConstraint,
    ) -> Result<Self, ContractError> {
        PlayerSelection::new(InstructionHeader::new(text), selectable, constraint)
            .map(Self::SelectPlayers)
    }

    pub fn assign_roles(
        text: InstructionText,
        candidates: Vec<RoleCandidates>,
    ) -> Result<Self, ContractError> {
        RoleAssignment::new(InstructionHeader::new(text), candidates).map(Self::AssignRoles)
    }

    pub fn select_options(
        text: InstructionText,
        options: Vec<String>,
        constraint: CountConstraint,
    ) -> Result<Self, ContractError> {
        OptionSelection::new(InstructionHeader::new(text), options, constraint)
            .map(Self::SelectOptions)
    }

    /// Attach the players this instruction is about.
    pub fn with_affected_players(mut self, players: Vec<PlayerId>) -> Self {
        self.header_mut().affected_players = players;
        self
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn kind(&self) -> InstructionKind {
        match self {
            Self::Confirmation(_) => InstructionKind::Confirmation,
            Self::SelectPlayers(_) => InstructionKind::SelectPlayers,
            Self::AssignRoles(_) => InstructionKind::AssignRoles,
            Self::SelectOptions(_) => InstructionKind::SelectOptions,
        }
    }

    pub fn text(&self) -> &InstructionText {
        &self.header().text
    }

    pub fn affected_players(&self) -> &[PlayerId] {
        &self.header().affected_players
    }

    /// Players offered by a `SelectPlayers` instruction.
    pub fn selectable(&self) -> Option<&[PlayerId]> {
        match self {
            Self::SelectPlayers(selection) => Some(&selection.selectable),
            _ => None,
        }
    }

    pub fn options(&self) -> Option<&[String]> {
        match self {
            Self::SelectOptions(selection) => Some(&selection.options),
            _ => None,
        }
    }

    pub fn constraint(&self) -> Option<CountConstraint> {
        match self {
            Self::SelectPlayers(selection) => Some(selection.constraint),
            Self::SelectOptions(selection) => Some(selection.constraint),
            _ => None,
        }
    }

    pub fn candidates(&self) -> Option<&[RoleCandidates]> {
        match self {
            Self::AssignRoles(assignment) => Some(&assignment.candidates),
            _ => None,
        }
    }

    // =========================================================================
    // Contract
    // =========================================================================

    /// Turn raw moderator input into a response to this instruction.
    ///
    /// # Errors
    ///
    /// Any [`ContractError`]; the instruction and session are untouched.
    pub fn validate_response(
        &self,
        input: ResponseInput,
    ) -> Result<ModeratorResponse, ContractError> {
        let result = self.check(input);
        if let Err(e) = &result {
            debug!(expected = %self.kind(), code = e.code(), error = %e, "Response rejected");
        }
        result
    }

    fn check(&self, input: ResponseInput) -> Result<ModeratorResponse, ContractError> {
        match (self, input) {
            (Self::Confirmation(_), ResponseInput::Confirmation { confirmed }) => {
                if confirmed {
                    Ok(ModeratorResponse::confirmation())
                } else {
                    Err(ContractError::NotConfirmed)
                }
            }
            (Self::SelectPlayers(selection), ResponseInput::SelectPlayers { selected }) => {
                selection.validate(selected)
            }
            (Self::AssignRoles(assignment), ResponseInput::AssignRoles { assignments }) => {
                assignment.validate(assignments)
            }
            (Self::SelectOptions(selection), ResponseInput::SelectOptions { selected }) => {
                selection.validate(selected)
            }
            (_, other) => Err(ContractError::WrongResponseKind {
                expected: self.kind(),
                received: other.kind(),
            }),
        }
    }

    fn header(&self) -> &InstructionHeader {
        match self {
            Self::Confirmation(c) => &c.header,
            Self::SelectPlayers(s) => &s.header,
            Self::AssignRoles(a) => &a.header,
            Self::SelectOptions(o) => &o.header,
        }
    }

    fn header_mut(&mut self) -> &mut InstructionHeader {
        match self {
            Self::Confirmation(c) => &mut c.header,
            Self::SelectPlayers(s) => &mut s.header,
            Self::AssignRoles(a) => &mut a.header,
            Self::SelectOptions(o) => &mut o.header,
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn players(n: usize) -> Vec<PlayerId> {
        (0..n).map(|_| PlayerId::new()).collect()
    }

    fn pick_one(selectable: Vec<PlayerId>) -> ModeratorInstruction {
        ModeratorInstruction::select_players(
            InstructionText::public("Seer, choose a player.").unwrap(),
            selectable,
            CountConstraint::exactly(1),
        )
        .unwrap()
    }

    mod construction {
        use super::*;

        #[test]
        fn constraint_rejects_min_above_max() {
            assert_eq!(
                CountConstraint::new(2, 1),
                Err(ContractError::InvalidConstraint { min: 2, max: 1 })
            );
        }

        #[test]
        fn select_players_clamps_max_to_selectable() {
            let instruction = ModeratorInstruction::select_players(
                InstructionText::private("Charm up to two players").unwrap(),
                players(1),
                CountConstraint::up_to(2),
            )
            .unwrap();
            assert_eq!(instruction.constraint().unwrap().max(), 1);
        }

        #[test]
        fn select_players_rejects_unreachable_min() {
            let err = ModeratorInstruction::select_players(
                InstructionText::private("Link two lovers").unwrap(),
                players(1),
                CountConstraint::exactly(2),
            )
            .unwrap_err();
            assert_eq!(err, ContractError::NotEnoughChoices { min: 2, available: 1 });
        }

        #[test]
        fn text_needs_public_or_private_part() {
            assert_eq!(
                InstructionText::new(None, Some("   ".to_string())),
                Err(ContractError::EmptyInstructionText)
            );
            assert!(InstructionText::new(None, Some("note".to_string())).is_ok());
        }

        #[test]
        fn shorthand_constructors_reject_blank_text() {
            assert_eq!(
                InstructionText::public(""),
                Err(ContractError::EmptyInstructionText)
            );
            assert_eq!(
                InstructionText::private(" \n"),
                Err(ContractError::EmptyInstructionText)
            );
            let text = InstructionText::public("Night falls.").unwrap();
            assert_eq!(text.public_announcement(), Some("Night falls."));
            assert_eq!(text.private_note(), None);
        }

        #[test]
        fn role_assignment_rejects_duplicate_players() {
            let player = PlayerId::new();
            let candidates = vec![
                RoleCandidates {
                    player,
                    roles: vec![MainRole::Seer],
                },
                RoleCandidates {
                    player,
                    roles: vec![MainRole::Witch],
                },
            ];
            let err =
                ModeratorInstruction::assign_roles(InstructionText::private("Deal").unwrap(), candidates)
                    .unwrap_err();
            assert_eq!(err, ContractError::DuplicateCandidate(player));
        }
    }

    mod select_players {
        use super::*;

        #[test]
        fn accepts_selection_within_bounds() {
            let ids = players(3);
            let instruction = pick_one(ids.clone());
            let response = instruction
                .validate_response(ResponseInput::SelectPlayers {
                    selected: vec![ids[2]],
                })
                .unwrap();
            assert_eq!(response.selected_players(), Some(&[ids[2]][..]));
        }

        #[test]
        fn rejects_count_outside_bounds() {
            let ids = players(3);
            let instruction = pick_one(ids.clone());
            assert_eq!(
                instruction.validate_response(ResponseInput::SelectPlayers { selected: vec![] }),
                Err(ContractError::CountOutOfRange {
                    count: 0,
                    min: 1,
                    max: 1
                })
            );
            assert!(instruction
                .validate_response(ResponseInput::SelectPlayers {
                    selected: vec![ids[0], ids[1]],
                })
                .is_err());
        }

        #[test]
        fn rejects_players_outside_selectable_set() {
            let instruction = pick_one(players(2));
            let stranger = PlayerId::new();
            assert_eq!(
                instruction.validate_response(ResponseInput::SelectPlayers {
                    selected: vec![stranger],
                }),
                Err(ContractError::NotSelectable(stranger))
            );
        }

        #[test]
        fn rejects_duplicates() {
            let ids = players(3);
            let instruction = ModeratorInstruction::select_players(
                InstructionText::private("Pick two").unwrap(),
                ids.clone(),
                CountConstraint::exactly(2),
            )
            .unwrap();
            assert_eq!(
                instruction.validate_response(ResponseInput::SelectPlayers {
                    selected: vec![ids[0], ids[0]],
                }),
                Err(ContractError::DuplicateSelection(ids[0]))
            );
        }

        #[test]
        fn rejects_wrong_response_shape() {
            let instruction = pick_one(players(2));
            assert_eq!(
                instruction.validate_response(ResponseInput::Confirmation { confirmed: true }),
                Err(ContractError::WrongResponseKind {
                    expected: InstructionKind::SelectPlayers,
                    received: InstructionKind::Confirmation,
                })
            );
        }
    }

    mod assign_roles {
        use super::*;

        fn deal(ids: &[PlayerId]) -> ModeratorInstruction {
            let candidates = ids
                .iter()
                .map(|player| RoleCandidates {
                    player: *player,
                    roles: vec![MainRole::Villager, MainRole::SimpleWerewolf],
                })
                .collect();
            ModeratorInstruction::assign_roles(InstructionText::private("Deal the cards").unwrap(), candidates)
                .unwrap()
        }

        #[test]
        fn accepts_complete_assignment() {
            let ids = players(2);
            let instruction = deal(&ids);
            let assignments = BTreeMap::from([
                (ids[0], MainRole::Villager),
                (ids[1], MainRole::SimpleWerewolf),
            ]);
            let response = instruction
                .validate_response(ResponseInput::AssignRoles {
                    assignments: assignments.clone(),
                })
                .unwrap();
            assert_eq!(response.assignments(), Some(&assignments));
        }

        #[test]
        fn rejects_unlisted_player() {
            let ids = players(1);
            let instruction = deal(&ids);
            let stranger = PlayerId::new();
            let assignments = BTreeMap::from([
                (ids[0], MainRole::Villager),
                (stranger, MainRole::Villager),
            ]);
            assert_eq!(
                instruction.validate_response(ResponseInput::AssignRoles { assignments }),
                Err(ContractError::UnknownPlayer(stranger))
            );
        }

        #[test]
        fn rejects_role_outside_candidates() {
            let ids = players(1);
            let instruction = deal(&ids);
            let assignments = BTreeMap::from([(ids[0], MainRole::Seer)]);
            assert_eq!(
                instruction.validate_response(ResponseInput::AssignRoles { assignments }),
                Err(ContractError::RoleNotCandidate {
                    player: ids[0],
                    role: MainRole::Seer
                })
            );
        }

        #[test]
        fn rejects_missing_player() {
            let ids = players(2);
            let instruction = deal(&ids);
            let assignments = BTreeMap::from([(ids[0], MainRole::Villager)]);
            assert_eq!(
                instruction.validate_response(ResponseInput::AssignRoles { assignments }),
                Err(ContractError::MissingAssignment(ids[1]))
            );
        }
    }

    mod select_options {
        use super::*;

        fn witch_choice() -> ModeratorInstruction {
            ModeratorInstruction::select_options(
                InstructionText::private("Use a potion?").unwrap(),
                vec!["heal".to_string(), "poison".to_string()],
                CountConstraint::up_to(2),
            )
            .unwrap()
        }

        #[test]
        fn accepts_empty_when_min_is_zero() {
            let response = witch_choice()
                .validate_response(ResponseInput::SelectOptions { selected: vec![] })
                .unwrap();
            assert_eq!(response.selected_options(), Some(&[][..]));
        }

        #[test]
        fn rejects_unknown_and_duplicate_options() {
            let instruction = witch_choice();
            assert_eq!(
                instruction.validate_response(ResponseInput::SelectOptions {
                    selected: vec!["resurrect".to_string()],
                }),
                Err(ContractError::UnknownOption("resurrect".to_string()))
            );
            assert_eq!(
                instruction.validate_response(ResponseInput::SelectOptions {
                    selected: vec!["heal".to_string(), "heal".to_string()],
                }),
                Err(ContractError::DuplicateOption("heal".to_string()))
            );
        }
    }

    mod serde {
        use super::*;

        #[test]
        fn instruction_serializes_with_type_tag() {
            let ids = players(2);
            let instruction = pick_one(ids.clone()).with_affected_players(vec![ids[0]]);
            let json = serde_json::to_value(&instruction).unwrap();

            assert_eq!(json["type"], "selectPlayers");
            assert_eq!(json["publicAnnouncement"], "Seer, choose a player.");
            assert!(json.get("privateNote").is_none());
            assert_eq!(json["constraint"]["min"], 1);
            assert_eq!(json["affectedPlayers"][0], ids[0].to_string());

            let back: ModeratorInstruction = serde_json::from_value(json).unwrap();
            assert_eq!(back, instruction);
        }

        #[test]
        fn deserialization_enforces_text_invariant() {
            let result: Result<ModeratorInstruction, _> =
                serde_json::from_str(r#"{"type":"confirmation"}"#);
            assert!(result.is_err());
        }

        #[test]
        fn deserialization_enforces_count_constraint() {
            let json = format!(
                r#"{{"type":"selectPlayers","privateNote":"x","selectable":["{}"],"constraint":{{"min":3,"max":1}}}}"#,
                PlayerId::new()
            );
            let result: Result<ModeratorInstruction, _> = serde_json::from_str(&json);
            assert!(result.is_err());
        }
    }
}
