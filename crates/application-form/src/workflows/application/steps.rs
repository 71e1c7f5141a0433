use serde::Serialize;

use super::domain::ApplicationField;

/// One screen of the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FormStep {
    pub title: &'static str,
    pub description: &'static str,
    /// Fields shown on this screen, optional ones included.
    pub fields: &'static [ApplicationField],
}

impl FormStep {
    pub fn required_fields(&self) -> impl Iterator<Item = ApplicationField> + '_ {
        self.fields.iter().copied().filter(|field| field.is_required())
    }
}

pub const FORM_STEPS: [FormStep; 5] = [
    FormStep {
        title: "Basic Information",
        description: "Let's start with the basics",
        fields: &[
            ApplicationField::Name,
            ApplicationField::Email,
            ApplicationField::Age,
        ],
    },
    FormStep {
        title: "Location & Height",
        description: "Where are you and how tall are you?",
        fields: &[
            ApplicationField::Country,
            ApplicationField::State,
            ApplicationField::Height,
        ],
    },
    FormStep {
        title: "Education & Work",
        description: "Tell us about your credentials",
        fields: &[ApplicationField::Education, ApplicationField::Occupation],
    },
    FormStep {
        title: "The Real Tests",
        description: "This is where it gets serious",
        fields: &[
            ApplicationField::GrammarTest,
            ApplicationField::CanCook,
            ApplicationField::AnatomyKnowledge,
        ],
    },
    FormStep {
        title: "Final Questions",
        description: "Almost there!",
        fields: &[
            ApplicationField::Reliability,
            ApplicationField::FootballTeam,
            ApplicationField::AdditionalInfo,
        ],
    },
];

pub const LAST_STEP: usize = FORM_STEPS.len() - 1;

pub fn step(index: usize) -> Option<&'static FormStep> {
    FORM_STEPS.get(index)
}

/// Required fields gating `index`; empty for an index outside the table.
pub fn required_fields(index: usize) -> Vec<ApplicationField> {
    step(index)
        .map(|step| step.required_fields().collect())
        .unwrap_or_default()
}

pub fn step_of(field: ApplicationField) -> Option<usize> {
    FORM_STEPS
        .iter()
        .position(|step| step.fields.contains(&field))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ApplicationField::*;

    #[test]
    fn required_fields_follow_the_step_table() {
        assert_eq!(required_fields(0), vec![Name, Email, Age]);
        assert_eq!(required_fields(1), vec![Country, State, Height]);
        assert_eq!(required_fields(2), vec![Education, Occupation]);
        assert_eq!(
            required_fields(3),
            vec![GrammarTest, CanCook, AnatomyKnowledge]
        );
        assert_eq!(required_fields(4), vec![Reliability, FootballTeam]);
        assert!(required_fields(5).is_empty());
    }

    #[test]
    fn every_field_appears_on_exactly_one_step() {
        for field in ApplicationField::ALL {
            let count = FORM_STEPS
                .iter()
                .filter(|step| step.fields.contains(&field))
                .count();
            assert_eq!(count, 1, "{field} should be on one step");
        }
        assert_eq!(step_of(AdditionalInfo), Some(LAST_STEP));
        assert_eq!(step_of(Country), Some(1));
    }
}
