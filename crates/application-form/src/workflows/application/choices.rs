use serde::Serialize;

use super::domain::ApplicationField;

/// One option in a closed choice set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Choice {
    pub token: &'static str,
    pub label: &'static str,
}

const fn choice(token: &'static str, label: &'static str) -> Choice {
    Choice { token, label }
}

const HEIGHT: &[Choice] = &[
    choice("below-5-11", "Below 5'11\" (Sorry, not qualified)"),
    choice("5-11", "5'11\""),
    choice("6-0", "6'0\""),
    choice("6-1", "6'1\""),
    choice("6-2", "6'2\""),
    choice("6-3-plus", "6'3\" and above"),
];

const EDUCATION: &[Choice] = &[
    choice("high-school", "High School"),
    choice("bachelors", "Bachelor's Degree"),
    choice("masters", "Master's Degree"),
    choice("phd", "PhD"),
    choice("other", "Other"),
];

const OCCUPATION: &[Choice] = &[
    choice("creative", "Creative"),
    choice("corporate", "Corporate 9-5"),
    choice("other", "Other (Sorry, doesn't qualify)"),
];

const GRAMMAR_TEST: &[Choice] = &[choice("your", "Your"), choice("youre", "You're")];

const CAN_COOK: &[Choice] = &[
    choice("yes-masterchef", "Yes, I'm basically a chef"),
    choice("yes-learning", "Yes, still learning but it's good"),
    choice("no", "No (Disqualified)"),
];

const ANATOMY_KNOWLEDGE: &[Choice] = &[
    choice("yes-expert", "Yes, I'm a navigator"),
    choice("yes-confident", "Yes, pretty confident"),
    choice("need-help", "I might need directions"),
];

const RELIABILITY: &[Choice] = &[
    choice("never", "Never, my word is my bond"),
    choice("rarely", "Rarely, I try my best"),
    choice("sometimes", "Sometimes (Red flag)"),
];

const FOOTBALL_TEAM: &[Choice] = &[
    choice("arsenal", "Arsenal (DISQUALIFIED)"),
    choice("chelsea", "Chelsea (DISQUALIFIED)"),
    choice("liverpool", "Liverpool (DISQUALIFIED)"),
    choice("man-united", "Manchester United"),
    choice("man-city", "Manchester City"),
    choice("tottenham", "Tottenham"),
    choice("other", "Other Team"),
    choice("none", "I don't watch football"),
];

/// Choice set for enum-valued fields; `None` for free-text fields.
pub fn choices(field: ApplicationField) -> Option<&'static [Choice]> {
    match field {
        ApplicationField::Height => Some(HEIGHT),
        ApplicationField::Education => Some(EDUCATION),
        ApplicationField::Occupation => Some(OCCUPATION),
        ApplicationField::GrammarTest => Some(GRAMMAR_TEST),
        ApplicationField::CanCook => Some(CAN_COOK),
        ApplicationField::AnatomyKnowledge => Some(ANATOMY_KNOWLEDGE),
        ApplicationField::Reliability => Some(RELIABILITY),
        ApplicationField::FootballTeam => Some(FOOTBALL_TEAM),
        ApplicationField::Name
        | ApplicationField::Email
        | ApplicationField::Age
        | ApplicationField::Country
        | ApplicationField::State
        | ApplicationField::AdditionalInfo => None,
    }
}

/// Whether `value` is acceptable for `field` as far as the choice set goes.
///
/// Blank values pass here; whether they are allowed is a required-field question.
/// Anything else must equal a token exactly, padding included.
pub fn is_offered(field: ApplicationField, value: &str) -> bool {
    if value.trim().is_empty() {
        return true;
    }
    match choices(field) {
        Some(options) => options.iter().any(|option| option.token == value),
        None => true,
    }
}

/// Resolve terminal input to a token: a 1-based option number or the token itself.
pub fn resolve(options: &[Choice], input: &str) -> Option<&'static str> {
    let input = input.trim();
    if let Ok(position) = input.parse::<usize>() {
        return position
            .checked_sub(1)
            .and_then(|index| options.get(index))
            .map(|option| option.token);
    }
    options
        .iter()
        .find(|option| option.token.eq_ignore_ascii_case(input))
        .map(|option| option.token)
}
