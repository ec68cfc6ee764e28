use serde::{Deserialize, Serialize};

use stockdepot_core::{DomainError, Entity, RecordId};

/// Party identifier.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PartyId(pub RecordId);

impl PartyId {
    pub fn new(id: RecordId) -> Self {
        Self(id)
    }
}

impl core::fmt::Display for PartyId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// Party entity: a company or an individual contact.
///
/// Individuals may be linked to a parent company (or to another contact);
/// deposit ownership is aggregated across that commercial hierarchy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Party {
    id: PartyId,
    name: String,
    is_company: bool,
    parent_id: Option<PartyId>,
}

impl Party {
    pub fn new(
        id: PartyId,
        name: impl Into<String>,
        is_company: bool,
        parent_id: Option<PartyId>,
    ) -> Result<Self, DomainError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DomainError::validation("party name cannot be empty"));
        }
        if parent_id == Some(id) {
            return Err(DomainError::validation("party cannot be its own parent"));
        }
        Ok(Self {
            id,
            name,
            is_company,
            parent_id,
        })
    }

    /// Standalone company with no parent.
    pub fn company(id: PartyId, name: impl Into<String>) -> Result<Self, DomainError> {
        Self::new(id, name, true, None)
    }

    /// Individual contact, optionally attached to a parent party.
    pub fn contact(
        id: PartyId,
        name: impl Into<String>,
        parent_id: Option<PartyId>,
    ) -> Result<Self, DomainError> {
        Self::new(id, name, false, parent_id)
    }

    pub fn id_typed(&self) -> PartyId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_company(&self) -> bool {
        self.is_company
    }

    pub fn parent_id(&self) -> Option<PartyId> {
        self.parent_id
    }
}

impl Entity for Party {
    type Id = PartyId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// Walk limit for parent chains. Anything deeper is treated as a data error
/// (cycle) and the walk stops.
const MAX_HIERARCHY_DEPTH: usize = 64;

/// Directory of parties with commercial-hierarchy resolution.
///
/// Only the record lookup is required; hierarchy queries are derived from the
/// parent links.
pub trait PartyDirectory {
    fn party(&self, id: PartyId) -> Option<&Party>;

    /// The commercial entity a party transacts under: the party itself when
    /// it is a company or has no parent, otherwise the commercial partner of
    /// its parent.
    fn commercial_partner_of(&self, id: PartyId) -> PartyId {
        let mut current = id;
        for _ in 0..MAX_HIERARCHY_DEPTH {
            let Some(party) = self.party(current) else {
                return current;
            };
            if party.is_company() {
                return current;
            }
            match party.parent_id() {
                Some(parent) => current = parent,
                None => return current,
            }
        }
        current
    }

    /// Whether `ancestor` appears strictly above `id` in the parent chain.
    fn is_ancestor_of(&self, ancestor: PartyId, id: PartyId) -> bool {
        if ancestor == id {
            return false;
        }
        let mut current = id;
        for _ in 0..MAX_HIERARCHY_DEPTH {
            let Some(parent) = self.party(current).and_then(Party::parent_id) else {
                return false;
            };
            if parent == ancestor {
                return true;
            }
            current = parent;
        }
        false
    }

    /// Whether two parties belong to the same commercial hierarchy: equal,
    /// one an ancestor of the other, or one a descendant of the other.
    fn in_same_hierarchy(&self, a: PartyId, b: PartyId) -> bool {
        a == b || self.is_ancestor_of(a, b) || self.is_ancestor_of(b, a)
    }
}

impl PartyDirectory for std::collections::HashMap<PartyId, Party> {
    fn party(&self, id: PartyId) -> Option<&Party> {
        self.get(&id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn test_party_id() -> PartyId {
        PartyId::new(RecordId::new())
    }

    fn directory(parties: Vec<Party>) -> HashMap<PartyId, Party> {
        parties.into_iter().map(|p| (p.id_typed(), p)).collect()
    }

    #[test]
    fn contact_resolves_to_parent_company() {
        let company_id = test_party_id();
        let contact_id = test_party_id();
        let dir = directory(vec![
            Party::company(company_id, "Acme Industrial").unwrap(),
            Party::contact(contact_id, "Jamie Doe", Some(company_id)).unwrap(),
        ]);

        assert_eq!(dir.commercial_partner_of(contact_id), company_id);
        assert_eq!(dir.commercial_partner_of(company_id), company_id);
    }

    #[test]
    fn standalone_contact_is_its_own_commercial_partner() {
        let contact_id = test_party_id();
        let dir = directory(vec![
            Party::contact(contact_id, "Walk-in customer", None).unwrap(),
        ]);
        assert_eq!(dir.commercial_partner_of(contact_id), contact_id);
    }

    #[test]
    fn hierarchy_relations() {
        let company_id = test_party_id();
        let dept_id = test_party_id();
        let contact_id = test_party_id();
        let stranger_id = test_party_id();
        let dir = directory(vec![
            Party::company(company_id, "Acme Industrial").unwrap(),
            Party::contact(dept_id, "Acme Purchasing", Some(company_id)).unwrap(),
            Party::contact(contact_id, "Jamie Doe", Some(dept_id)).unwrap(),
            Party::company(stranger_id, "Globex").unwrap(),
        ]);

        assert!(dir.is_ancestor_of(company_id, contact_id));
        assert!(!dir.is_ancestor_of(contact_id, company_id));
        assert!(dir.in_same_hierarchy(company_id, contact_id));
        assert!(dir.in_same_hierarchy(contact_id, company_id));
        assert!(dir.in_same_hierarchy(contact_id, contact_id));
        assert!(!dir.in_same_hierarchy(contact_id, stranger_id));
    }

    #[test]
    fn cyclic_parent_links_terminate() {
        // Two contacts pointing at each other; bad data, but walks must stop.
        let a = test_party_id();
        let b = test_party_id();
        let dir = directory(vec![
            Party::contact(a, "A", Some(b)).unwrap(),
            Party::contact(b, "B", Some(a)).unwrap(),
        ]);
        // Neither walk hangs; ancestor checks find the direct link only.
        let _ = dir.commercial_partner_of(a);
        assert!(dir.is_ancestor_of(b, a));
    }

    #[test]
    fn rejects_self_parent() {
        let id = test_party_id();
        assert!(Party::contact(id, "Loop", Some(id)).is_err());
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 256,
                ..ProptestConfig::default()
            })]

            /// Property: in a chain company -> contact -> ... -> contact,
            /// every member resolves to the company as commercial partner
            /// and is in the same hierarchy as every other member.
            #[test]
            fn chains_resolve_to_the_root_company(depth in 1usize..10) {
                let company_id = test_party_id();
                let mut parties = vec![Party::company(company_id, "Root Co").unwrap()];
                let mut parent = company_id;
                let mut ids = vec![company_id];
                for i in 0..depth {
                    let id = test_party_id();
                    parties.push(
                        Party::contact(id, format!("Contact {i}"), Some(parent)).unwrap(),
                    );
                    ids.push(id);
                    parent = id;
                }
                let dir = directory(parties);

                for &id in &ids {
                    prop_assert_eq!(dir.commercial_partner_of(id), company_id);
                }
                for &a in &ids {
                    for &b in &ids {
                        prop_assert!(dir.in_same_hierarchy(a, b));
                    }
                }
            }
        }
    }
}
