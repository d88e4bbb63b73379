//! Lead submission model.
//!
//! A lead is the set of fields a prospect fills in on the contact modal.
//! [`FIELDS`] is the form catalog the landing page renders from, so the
//! page and the relay agree on field names and option values.
//!
//! Two ways to turn a submitted JSON object into query pairs exist:
//!
//! - [`form_pairs`] forwards any object as-is, stringifying values the way a
//!   browser `URLSearchParams` does. This is the default.
//! - [`LeadSubmission::validate`] parses the object into a typed record and
//!   rejects anything the form could not have produced.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::LeadError;

/// One `<option>` of a bucket field: wire value and visible label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BucketOption {
    pub value: &'static str,
    pub label: &'static str,
}

macro_rules! bucket {
    (
        $(#[$meta:meta])*
        $name:ident {
            $($(#[$vmeta:meta])* $variant:ident => $value:literal, $label:literal;)+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $($(#[$vmeta])* #[serde(rename = $value)] $variant,)+
        }

        impl $name {
            /// Every option, in form order.
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            /// Every option as a value/label pair, in form order.
            pub const OPTIONS: &'static [BucketOption] = &[
                $(BucketOption { value: $value, label: $label }),+
            ];

            /// The wire value submitted by the form.
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $value),+
                }
            }

            /// The label shown in the form.
            pub const fn label(self) -> &'static str {
                match self {
                    $(Self::$variant => $label),+
                }
            }

            /// Look up an option by its wire value.
            pub fn parse(value: &str) -> Option<Self> {
                Self::ALL.iter().copied().find(|opt| opt.as_str() == value)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

bucket! {
    /// Estimated weekly time spent on the process.
    TimeSpent {
        UnderOneHour => "<1", "Less than 1 hour";
        OneToFive => "1–5", "1–5 hours";
        SixToTwenty => "6–20", "6–20 hours";
        OverTwenty => "20+", "More than 20 hours";
        Unsure => "unsure", "Not sure yet";
    }
}

bucket! {
    /// When the prospect wants automation in place.
    Timeline {
        Asap => "asap", "ASAP";
        ThirtyDays => "30d", "Within 30 days";
        NinetyDays => "90d", "Within 90 days";
        Exploring => "exploring", "Just exploring for now";
    }
}

bucket! {
    /// Whether a budget exists.
    Budget {
        Yes => "yes", "Yes";
        Planning => "planning", "Not yet, but planning to";
        No => "no", "No budget yet";
    }
}

bucket! {
    /// Team or company headcount.
    TeamSize {
        OneToFive => "1-5", "1–5 people";
        SixToTwenty => "6-20", "6–20 people";
        TwentyOneToHundred => "21-100", "21–100 people";
        OverHundred => "101+", "100+ people";
    }
}

/// How a field is rendered in the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Email,
    Tel,
    Url,
    /// Multi-line text with the given row count.
    TextArea { rows: u8 },
    /// Drop-down with a disabled prompt option first.
    Select {
        prompt: &'static str,
        options: &'static [BucketOption],
    },
}

/// A single form field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    /// Wire name, also the `name` attribute of the input.
    pub name: &'static str,
    pub label: &'static str,
    pub placeholder: &'static str,
    pub required: bool,
    pub kind: FieldKind,
}

/// The contact form, in display order.
pub const FIELDS: &[FieldSpec] = &[
    FieldSpec {
        name: "name",
        label: "Name",
        placeholder: "Your Name",
        required: true,
        kind: FieldKind::Text,
    },
    FieldSpec {
        name: "email",
        label: "Email",
        placeholder: "your@email.com",
        required: true,
        kind: FieldKind::Email,
    },
    FieldSpec {
        name: "number",
        label: "Phone Number",
        placeholder: "(123) 456-7890",
        required: true,
        kind: FieldKind::Tel,
    },
    FieldSpec {
        name: "role",
        label: "Your Role",
        placeholder: "e.g., Founder, Ops Lead",
        required: true,
        kind: FieldKind::Text,
    },
    FieldSpec {
        name: "priorityProcess",
        label: "What’s the #1 process you’d love to automate first?",
        placeholder: "e.g., lead gen, reporting, onboarding",
        required: true,
        kind: FieldKind::TextArea { rows: 2 },
    },
    FieldSpec {
        name: "timeSpent",
        label: "How much time does your team spend on this per week?",
        placeholder: "",
        required: true,
        kind: FieldKind::Select {
            prompt: "Select an option",
            options: TimeSpent::OPTIONS,
        },
    },
    FieldSpec {
        name: "tools",
        label: "What tools or platforms do you use now?",
        placeholder: "e.g., HubSpot, Airtable, Zapier",
        required: false,
        kind: FieldKind::Text,
    },
    FieldSpec {
        name: "timeline",
        label: "When are you looking to implement automation?",
        placeholder: "",
        required: true,
        kind: FieldKind::Select {
            prompt: "Select a timeline",
            options: Timeline::OPTIONS,
        },
    },
    FieldSpec {
        name: "budget",
        label: "Do you have a budget in place for this?",
        placeholder: "",
        required: true,
        kind: FieldKind::Select {
            prompt: "Select an option",
            options: Budget::OPTIONS,
        },
    },
    FieldSpec {
        name: "teamSize",
        label: "How big is your team or company?",
        placeholder: "",
        required: true,
        kind: FieldKind::Select {
            prompt: "Select a size",
            options: TeamSize::OPTIONS,
        },
    },
    FieldSpec {
        name: "website",
        label: "What’s your website?",
        placeholder: "https://yourcompany.com",
        required: false,
        kind: FieldKind::Url,
    },
];

/// Look up a field by wire name.
pub fn field(name: &str) -> Option<&'static FieldSpec> {
    FIELDS.iter().find(|f| f.name == name)
}

/// A fully validated lead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadSubmission {
    pub name: String,
    pub email: String,
    /// Phone number.
    pub number: String,
    pub role: String,
    pub priority_process: String,
    pub time_spent: TimeSpent,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tools: Option<String>,
    pub timeline: Timeline,
    pub budget: Budget,
    pub team_size: TeamSize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
}

impl LeadSubmission {
    /// Parse a submitted JSON object into a typed lead.
    ///
    /// Fields are checked in form order, so the error names the first
    /// offending field a user would see. Blank optional fields are treated
    /// as absent.
    ///
    /// # Errors
    ///
    /// Returns [`LeadError`] for missing or blank required fields, non-string
    /// values, bucket values outside the option list, and unknown fields.
    pub fn validate(object: &Map<String, Value>) -> Result<Self, LeadError> {
        let lookup = Lookup { object };

        let name = lookup.required("name")?;
        let email = lookup.required("email")?;
        let number = lookup.required("number")?;
        let role = lookup.required("role")?;
        let priority_process = lookup.required("priorityProcess")?;
        let time_spent = lookup.bucket("timeSpent", TimeSpent::parse)?;
        let tools = lookup.optional("tools")?;
        let timeline = lookup.bucket("timeline", Timeline::parse)?;
        let budget = lookup.bucket("budget", Budget::parse)?;
        let team_size = lookup.bucket("teamSize", TeamSize::parse)?;
        let website = lookup.optional("website")?;

        if let Some(unknown) = object.keys().find(|key| field(key).is_none()) {
            return Err(LeadError::UnknownField {
                field: unknown.clone(),
            });
        }

        Ok(Self {
            name,
            email,
            number,
            role,
            priority_process,
            time_spent,
            tools,
            timeline,
            budget,
            team_size,
            website,
        })
    }

    /// The lead as query pairs in form order, omitting absent optional fields.
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = vec![
            ("name", self.name.clone()),
            ("email", self.email.clone()),
            ("number", self.number.clone()),
            ("role", self.role.clone()),
            ("priorityProcess", self.priority_process.clone()),
            ("timeSpent", self.time_spent.as_str().to_owned()),
        ];
        if let Some(tools) = &self.tools {
            pairs.push(("tools", tools.clone()));
        }
        pairs.push(("timeline", self.timeline.as_str().to_owned()));
        pairs.push(("budget", self.budget.as_str().to_owned()));
        pairs.push(("teamSize", self.team_size.as_str().to_owned()));
        if let Some(website) = &self.website {
            pairs.push(("website", website.clone()));
        }

        pairs
            .into_iter()
            .map(|(key, value)| (key.to_owned(), value))
            .collect()
    }
}

struct Lookup<'a> {
    object: &'a Map<String, Value>,
}

impl Lookup<'_> {
    fn text(&self, field: &'static str) -> Result<Option<&str>, LeadError> {
        match self.object.get(field) {
            None => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.as_str())),
            Some(_) => Err(LeadError::NotAString {
                field: field.to_owned(),
            }),
        }
    }

    fn required(&self, field: &'static str) -> Result<String, LeadError> {
        match self.text(field)? {
            None => Err(LeadError::MissingField { field }),
            Some(s) if s.trim().is_empty() => Err(LeadError::EmptyField { field }),
            Some(s) => Ok(s.to_owned()),
        }
    }

    fn optional(&self, field: &'static str) -> Result<Option<String>, LeadError> {
        Ok(self
            .text(field)?
            .filter(|s| !s.trim().is_empty())
            .map(str::to_owned))
    }

    fn bucket<T>(&self, field: &'static str, parse: fn(&str) -> Option<T>) -> Result<T, LeadError> {
        let raw = self.required(field)?;
        parse(&raw).ok_or(LeadError::InvalidOption { field, value: raw })
    }
}

/// Convert an arbitrary JSON object into query pairs without validation.
///
/// Values are stringified like `URLSearchParams` does for a plain object:
/// strings verbatim, numbers and booleans as their JSON text, `null` as
/// `"null"`, arrays joined with `,` (with `null` elements empty) and nested
/// objects as `[object Object]`.
pub fn form_pairs(object: &Map<String, Value>) -> Vec<(String, String)> {
    object
        .iter()
        .map(|(key, value)| (key.clone(), stringify(value, false)))
        .collect()
}

fn stringify(value: &Value, in_array: bool) -> String {
    match value {
        Value::Null if in_array => String::new(),
        Value::Null => "null".to_owned(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => number_text(n),
        Value::String(s) => s.clone(),
        Value::Array(items) => items
            .iter()
            .map(|item| stringify(item, true))
            .collect::<Vec<_>>()
            .join(","),
        Value::Object(_) => "[object Object]".to_owned(),
    }
}

/// Render a number the way JavaScript's `String(number)` does for the
/// common cases: integral floats lose their `.0`, `-0` prints as `0`.
fn number_text(n: &serde_json::Number) -> String {
    match n.as_f64() {
        Some(f) if n.is_f64() && f.fract() == 0.0 && f.abs() < 1e21 => {
            if f == 0.0 {
                "0".to_owned()
            } else {
                format!("{f:.0}")
            }
        }
        _ => n.to_string(),
    }
}
