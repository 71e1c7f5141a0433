use std::fmt;

use serde::{Deserialize, Serialize};

use super::casing::to_snake_case;
use super::choices::{self, Choice};

/// Every field captured by the application form, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ApplicationField {
    Name,
    Email,
    Age,
    Country,
    State,
    Height,
    Education,
    Occupation,
    GrammarTest,
    CanCook,
    AnatomyKnowledge,
    Reliability,
    FootballTeam,
    AdditionalInfo,
}

impl ApplicationField {
    pub const ALL: [ApplicationField; 14] = [
        ApplicationField::Name,
        ApplicationField::Email,
        ApplicationField::Age,
        ApplicationField::Country,
        ApplicationField::State,
        ApplicationField::Height,
        ApplicationField::Education,
        ApplicationField::Occupation,
        ApplicationField::GrammarTest,
        ApplicationField::CanCook,
        ApplicationField::AnatomyKnowledge,
        ApplicationField::Reliability,
        ApplicationField::FootballTeam,
        ApplicationField::AdditionalInfo,
    ];

    /// In-memory field name (lowerCamelCase).
    pub const fn key(self) -> &'static str {
        match self {
            ApplicationField::Name => "name",
            ApplicationField::Email => "email",
            ApplicationField::Age => "age",
            ApplicationField::Country => "country",
            ApplicationField::State => "state",
            ApplicationField::Height => "height",
            ApplicationField::Education => "education",
            ApplicationField::Occupation => "occupation",
            ApplicationField::GrammarTest => "grammarTest",
            ApplicationField::CanCook => "canCook",
            ApplicationField::AnatomyKnowledge => "anatomyKnowledge",
            ApplicationField::Reliability => "reliability",
            ApplicationField::FootballTeam => "footballTeam",
            ApplicationField::AdditionalInfo => "additionalInfo",
        }
    }

    /// Store column name for this field.
    pub fn column(self) -> String {
        to_snake_case(self.key())
    }

    pub const fn label(self) -> &'static str {
        match self {
            ApplicationField::Name => "Full Name",
            ApplicationField::Email => "Email Address",
            ApplicationField::Age => "Age",
            ApplicationField::Country => "Country",
            ApplicationField::State => "State/Region",
            ApplicationField::Height => "Height",
            ApplicationField::Education => "Highest Degree",
            ApplicationField::Occupation => "Occupation Type",
            ApplicationField::GrammarTest => {
                "Grammar Test: \"_____ going to be late if you don't hurry!\""
            }
            ApplicationField::CanCook => "Can you cook proper jollof rice that slaps?",
            ApplicationField::AnatomyKnowledge => "Bonus: Anatomy knowledge",
            ApplicationField::Reliability => "Are you the type to promise and fail?",
            ApplicationField::FootballTeam => "Which football team do you support?",
            ApplicationField::AdditionalInfo => "Additional Information",
        }
    }

    pub const fn is_required(self) -> bool {
        !matches!(self, ApplicationField::AdditionalInfo)
    }

    /// Message recorded when a required field is left blank.
    pub const fn required_message(self) -> Option<&'static str> {
        match self {
            ApplicationField::Name => Some("Full name is required"),
            ApplicationField::Email => Some("Email is required"),
            ApplicationField::Age => Some("Age is required"),
            ApplicationField::Country => Some("Country is required"),
            ApplicationField::State => Some("State/Region is required"),
            ApplicationField::Height => Some("Height selection is required"),
            ApplicationField::Education => Some("Education level is required"),
            ApplicationField::Occupation => Some("Occupation type is required"),
            ApplicationField::GrammarTest => Some("Grammar test answer is required"),
            ApplicationField::CanCook => Some("Cooking ability is required"),
            ApplicationField::AnatomyKnowledge => Some("Anatomy knowledge is required"),
            ApplicationField::Reliability => Some("Reliability answer is required"),
            ApplicationField::FootballTeam => Some("Football team selection is required"),
            ApplicationField::AdditionalInfo => None,
        }
    }

    /// Closed choice set offered for enum-valued fields.
    pub fn choices(self) -> Option<&'static [Choice]> {
        choices::choices(self)
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.key() == key)
    }
}

impl fmt::Display for ApplicationField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// The applicant record accumulated across the form steps.
///
/// Every value is text, `age` included. Missing keys deserialize as empty so
/// partially filled payloads reach validation instead of failing to parse.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Application {
    pub name: String,
    pub email: String,
    pub age: String,
    pub country: String,
    pub state: String,
    pub height: String,
    pub education: String,
    pub occupation: String,
    pub grammar_test: String,
    pub can_cook: String,
    pub anatomy_knowledge: String,
    pub reliability: String,
    pub football_team: String,
    pub additional_info: String,
}

impl Application {
    pub fn value(&self, field: ApplicationField) -> &str {
        match field {
            ApplicationField::Name => &self.name,
            ApplicationField::Email => &self.email,
            ApplicationField::Age => &self.age,
            ApplicationField::Country => &self.country,
            ApplicationField::State => &self.state,
            ApplicationField::Height => &self.height,
            ApplicationField::Education => &self.education,
            ApplicationField::Occupation => &self.occupation,
            ApplicationField::GrammarTest => &self.grammar_test,
            ApplicationField::CanCook => &self.can_cook,
            ApplicationField::AnatomyKnowledge => &self.anatomy_knowledge,
            ApplicationField::Reliability => &self.reliability,
            ApplicationField::FootballTeam => &self.football_team,
            ApplicationField::AdditionalInfo => &self.additional_info,
        }
    }

    fn slot(&mut self, field: ApplicationField) -> &mut String {
        match field {
            ApplicationField::Name => &mut self.name,
            ApplicationField::Email => &mut self.email,
            ApplicationField::Age => &mut self.age,
            ApplicationField::Country => &mut self.country,
            ApplicationField::State => &mut self.state,
            ApplicationField::Height => &mut self.height,
            ApplicationField::Education => &mut self.education,
            ApplicationField::Occupation => &mut self.occupation,
            ApplicationField::GrammarTest => &mut self.grammar_test,
            ApplicationField::CanCook => &mut self.can_cook,
            ApplicationField::AnatomyKnowledge => &mut self.anatomy_knowledge,
            ApplicationField::Reliability => &mut self.reliability,
            ApplicationField::FootballTeam => &mut self.football_team,
            ApplicationField::AdditionalInfo => &mut self.additional_info,
        }
    }

    pub fn set(&mut self, field: ApplicationField, value: impl Into<String>) {
        *self.slot(field) = value.into();
    }

    /// Empty or whitespace-only.
    pub fn is_blank(&self, field: ApplicationField) -> bool {
        self.value(field).trim().is_empty()
    }

    pub fn entries(&self) -> impl Iterator<Item = (ApplicationField, &str)> + '_ {
        ApplicationField::ALL
            .into_iter()
            .map(move |field| (field, self.value(field)))
    }
}
