// Copyright 2026 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The family graph arena: people, unions, and the links between them.

use alloc::string::String;
use alloc::vec::Vec;

use smallvec::SmallVec;

/// Identifier for a person in a [`FamilyGraph`].
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct PersonId(u32);

impl PersonId {
    /// Position of this person in the graph's person arena.
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// Identifier for a union (marriage) in a [`FamilyGraph`].
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct UnionId(u32);

impl UnionId {
    /// Position of this union in the graph's union arena.
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// Recorded sex of a person, used only to pick a fill color downstream.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Default)]
pub enum Sex {
    /// Recorded as male.
    Male,
    /// Recorded as female.
    Female,
    /// Not recorded, or recorded as something else.
    #[default]
    Unknown,
}

/// A person record.
///
/// Dates are kept as plain years: the chart only ever renders the year (or a
/// `?` when absent), so nothing finer is carried here.
#[derive(Clone, Debug)]
pub struct Person {
    /// Given name(s). May be empty.
    pub given: String,
    /// Surname. May be empty.
    pub surname: String,
    /// Recorded sex.
    pub sex: Sex,
    /// Birth year, if known.
    pub birth_year: Option<i32>,
    /// Death year, if known.
    pub death_year: Option<i32>,
    /// Unions this person is a spouse in, in insertion order.
    ///
    /// The first entry is the primary marriage for single-marriage display;
    /// two or more entries trigger multi-marriage fan-out in the flattener.
    pub spouse_in: SmallVec<[UnionId; 2]>,
}

/// A union (marriage) record.
///
/// Either spouse slot may be empty: an unknown spouse is represented, not
/// skipped. A union is shared data — it is reachable from either spouse and
/// from every child, which is exactly why the flattener dedups on union
/// identity rather than marking visited people.
#[derive(Clone, Debug)]
pub struct Union {
    /// Husband, if known.
    pub husband: Option<PersonId>,
    /// Wife, if known.
    pub wife: Option<PersonId>,
    /// Children of this union, in insertion order.
    pub children: Vec<PersonId>,
}

impl Union {
    /// Return the spouse in this union who is not `who`.
    ///
    /// Returns `None` when the other slot is empty (unknown spouse) or when
    /// `who` is not a spouse in this union at all.
    pub fn spouse_of(&self, who: PersonId) -> Option<PersonId> {
        if self.husband == Some(who) {
            self.wife
        } else if self.wife == Some(who) {
            self.husband
        } else {
            None
        }
    }
}

/// Arena of [`Person`] and [`Union`] records.
///
/// The graph is append-only: records are added while loading and then read
/// for the lifetime of a chart. Ids are plain indices; there is no removal
/// and therefore no generation tracking.
#[derive(Clone, Debug, Default)]
pub struct FamilyGraph {
    people: Vec<Person>,
    unions: Vec<Union>,
}

impl FamilyGraph {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a person with no marriages yet.
    pub fn add_person(
        &mut self,
        given: &str,
        surname: &str,
        sex: Sex,
        birth_year: Option<i32>,
        death_year: Option<i32>,
    ) -> PersonId {
        #[allow(
            clippy::cast_possible_truncation,
            reason = "ids use 32-bit indices by design"
        )]
        let id = PersonId(self.people.len() as u32);
        self.people.push(Person {
            given: String::from(given),
            surname: String::from(surname),
            sex,
            birth_year,
            death_year,
            spouse_in: SmallVec::new(),
        });
        id
    }

    /// Add a union and wire it into both spouses' `spouse_in` lists.
    ///
    /// Children must already exist in the graph; they are recorded in the
    /// given order.
    pub fn add_union(
        &mut self,
        husband: Option<PersonId>,
        wife: Option<PersonId>,
        children: &[PersonId],
    ) -> UnionId {
        #[allow(
            clippy::cast_possible_truncation,
            reason = "ids use 32-bit indices by design"
        )]
        let id = UnionId(self.unions.len() as u32);
        self.unions.push(Union {
            husband,
            wife,
            children: children.to_vec(),
        });
        if let Some(h) = husband {
            self.person_mut(h).spouse_in.push(id);
        }
        if let Some(w) = wife {
            self.person_mut(w).spouse_in.push(id);
        }
        id
    }

    /// Append a child to an existing union.
    pub fn add_child(&mut self, union: UnionId, child: PersonId) {
        debug_assert!(
            child.index() < self.people.len(),
            "child id must be from this graph"
        );
        self.union_mut(union).children.push(child);
    }

    /// Access a person; panics on an id from another graph.
    pub fn person(&self, id: PersonId) -> &Person {
        self.people.get(id.index()).expect("dangling PersonId")
    }

    /// Access a union; panics on an id from another graph.
    pub fn union(&self, id: UnionId) -> &Union {
        self.unions.get(id.index()).expect("dangling UnionId")
    }

    /// Number of people in the graph.
    pub fn person_count(&self) -> usize {
        self.people.len()
    }

    /// Number of unions in the graph.
    pub fn union_count(&self) -> usize {
        self.unions.len()
    }

    fn person_mut(&mut self, id: PersonId) -> &mut Person {
        self.people.get_mut(id.index()).expect("dangling PersonId")
    }

    fn union_mut(&mut self, id: UnionId) -> &mut Union {
        self.unions.get_mut(id.index()).expect("dangling UnionId")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_union_wires_spouse_in_for_both_spouses() {
        let mut g = FamilyGraph::new();
        let h = g.add_person("John", "Doe", Sex::Male, Some(1900), Some(1960));
        let w = g.add_person("Jane", "Roe", Sex::Female, Some(1902), None);
        let c = g.add_person("Jim", "Doe", Sex::Male, Some(1925), None);
        let u = g.add_union(Some(h), Some(w), &[c]);

        assert_eq!(g.person(h).spouse_in.as_slice(), &[u]);
        assert_eq!(g.person(w).spouse_in.as_slice(), &[u]);
        assert!(g.person(c).spouse_in.is_empty());
        assert_eq!(g.union(u).children, &[c]);
    }

    #[test]
    fn spouse_in_preserves_insertion_order() {
        let mut g = FamilyGraph::new();
        let p = g.add_person("Al", "Smith", Sex::Male, None, None);
        let w1 = g.add_person("Bea", "Smith", Sex::Female, None, None);
        let w2 = g.add_person("Cay", "Smith", Sex::Female, None, None);
        let u1 = g.add_union(Some(p), Some(w1), &[]);
        let u2 = g.add_union(Some(p), Some(w2), &[]);

        assert_eq!(g.person(p).spouse_in.as_slice(), &[u1, u2]);
    }

    #[test]
    fn spouse_of_resolves_other_slot() {
        let mut g = FamilyGraph::new();
        let h = g.add_person("H", "X", Sex::Male, None, None);
        let w = g.add_person("W", "X", Sex::Female, None, None);
        let other = g.add_person("O", "Y", Sex::Male, None, None);
        let u = g.add_union(Some(h), Some(w), &[]);

        assert_eq!(g.union(u).spouse_of(h), Some(w));
        assert_eq!(g.union(u).spouse_of(w), Some(h));
        assert_eq!(g.union(u).spouse_of(other), None, "not a spouse here");
    }

    #[test]
    fn spouse_of_with_unknown_slot_is_none() {
        let mut g = FamilyGraph::new();
        let w = g.add_person("W", "X", Sex::Female, None, None);
        let u = g.add_union(None, Some(w), &[]);
        assert_eq!(g.union(u).spouse_of(w), None);
    }

    #[test]
    fn add_child_appends_in_order() {
        let mut g = FamilyGraph::new();
        let h = g.add_person("H", "X", Sex::Male, None, None);
        let u = g.add_union(Some(h), None, &[]);
        let c1 = g.add_person("A", "X", Sex::Female, None, None);
        let c2 = g.add_person("B", "X", Sex::Male, None, None);
        g.add_child(u, c1);
        g.add_child(u, c2);
        assert_eq!(g.union(u).children, &[c1, c2]);
    }
}
