//! Voting center model and the edit draft used by the admin screens.

use serde::{Deserialize, Serialize};

use super::{DigitLocale, Person, PersonField};

/// A voting center.
///
/// `center_number` is derived from the center's position in the document and is
/// rewritten by [`renumber`] after every structural change.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Center {
    pub id: String,
    #[serde(default)]
    pub center_number: String,
    pub name: String,
    #[serde(default)]
    pub booth_count: String,
    #[serde(default)]
    pub voter_count: String,
    #[serde(default)]
    pub room_location: String,
    #[serde(default)]
    pub location_link: String,
    #[serde(default)]
    pub important_persons: Vec<Person>,
}

/// Recompute every `center_number` from list position.
pub fn renumber(centers: &mut [Center], digits: DigitLocale) {
    for (index, center) in centers.iter_mut().enumerate() {
        center.center_number = digits.center_number(index);
    }
}

/// An editable copy of a center.
///
/// Drafts carry no center number; the number is assigned when the draft is saved
/// into the list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CenterDraft {
    pub id: String,
    pub name: String,
    pub booth_count: String,
    pub voter_count: String,
    pub room_location: String,
    pub location_link: String,
    pub important_persons: Vec<Person>,
}

impl CenterDraft {
    /// Start a draft for a center that does not exist yet.
    pub fn new() -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name: String::new(),
            booth_count: String::new(),
            voter_count: String::new(),
            room_location: String::new(),
            location_link: String::new(),
            important_persons: Vec::new(),
        }
    }

    /// Append an empty person and return its id.
    pub fn add_person(&mut self) -> String {
        let person = Person::blank();
        let id = person.id.clone();
        self.important_persons.push(person);
        id
    }

    /// Set one field of the person with the given id. Returns false when no person
    /// has that id.
    pub fn update_person(&mut self, id: &str, field: PersonField, value: impl Into<String>) -> bool {
        let Some(person) = self.important_persons.iter_mut().find(|p| p.id == id) else {
            return false;
        };
        let value = value.into();
        match field {
            PersonField::Name => person.name = value,
            PersonField::Designation => person.designation = value,
            PersonField::Mobile => person.mobile = value,
        }
        true
    }

    /// Remove the person with the given id. Returns false when no person has that id.
    pub fn remove_person(&mut self, id: &str) -> bool {
        let before = self.important_persons.len();
        self.important_persons.retain(|p| p.id != id);
        self.important_persons.len() != before
    }

    /// Convert into a center with a placeholder number. Callers renumber the list
    /// the center lands in.
    pub fn into_center(self) -> Center {
        Center {
            id: self.id,
            center_number: String::new(),
            name: self.name,
            booth_count: self.booth_count,
            voter_count: self.voter_count,
            room_location: self.room_location,
            location_link: self.location_link,
            important_persons: self.important_persons,
        }
    }
}

impl Default for CenterDraft {
    fn default() -> Self {
        Self::new()
    }
}

impl From<&Center> for CenterDraft {
    fn from(center: &Center) -> Self {
        Self {
            id: center.id.clone(),
            name: center.name.clone(),
            booth_count: center.booth_count.clone(),
            voter_count: center.voter_count.clone(),
            room_location: center.room_location.clone(),
            location_link: center.location_link.clone(),
            important_persons: center.important_persons.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn center(id: &str, number: &str) -> Center {
        Center {
            id: id.to_string(),
            center_number: number.to_string(),
            name: format!("Center {}", id),
            booth_count: String::new(),
            voter_count: String::new(),
            room_location: String::new(),
            location_link: String::new(),
            important_persons: Vec::new(),
        }
    }

    #[test]
    fn test_renumber_ignores_stored_numbers() {
        let mut centers = vec![center("a", "07"), center("b", "x"), center("c", "")];
        renumber(&mut centers, DigitLocale::Latin);
        let numbers: Vec<_> = centers.iter().map(|c| c.center_number.as_str()).collect();
        assert_eq!(numbers, vec!["01", "02", "03"]);
    }

    #[test]
    fn test_draft_person_edits() {
        let mut draft = CenterDraft::new();
        let first = draft.add_person();
        let second = draft.add_person();
        assert_ne!(first, second);

        assert!(draft.update_person(&first, PersonField::Name, "Rahim"));
        assert!(draft.update_person(&first, PersonField::Mobile, "01800000000"));
        assert!(!draft.update_person("missing", PersonField::Name, "x"));
        assert_eq!(draft.important_persons[0].name, "Rahim");
        assert_eq!(draft.important_persons[0].mobile, "01800000000");

        assert!(draft.remove_person(&second));
        assert!(!draft.remove_person(&second));
        assert_eq!(draft.important_persons.len(), 1);
    }

    #[test]
    fn test_center_wire_format_is_camel_case() {
        let value = serde_json::to_value(center("a", "01")).unwrap();
        assert_eq!(value["centerNumber"], "01");
        assert!(value["importantPersons"].is_array());
        assert!(value.get("center_number").is_none());
    }
}
