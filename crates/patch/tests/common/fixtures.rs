#![allow(dead_code)]

use regex::Regex;
use serde::{Deserialize, Serialize};
use vacancy_patch::validation::{Constraints, Validate, Violations};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Draft,
    Open,
    Closed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Salary {
    pub min: u32,
    pub max: u32,
    pub currency: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub city: String,
    pub remote: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vacancy {
    pub id: String,
    pub title: String,
    pub description: String,
    pub status: Status,
    pub salary: Option<Salary>,
    pub requirements: Vec<String>,
    pub location: Location,
}

impl Validate for Vacancy {
    fn validate(&self) -> Violations {
        let mut violations = Violations::new();
        if self.title.trim().is_empty() {
            violations.add("/title", "must not be blank");
        }
        if let Some(salary) = &self.salary {
            if salary.min > salary.max {
                violations.add("/salary/min", "must not exceed /salary/max");
            }
        }
        violations
    }
}

pub fn vacancy() -> Vacancy {
    Vacancy {
        id: "vac-17".into(),
        title: "Backend Engineer".into(),
        description: "Build and run the hiring platform APIs.".into(),
        status: Status::Open,
        salary: Some(Salary {
            min: 60_000,
            max: 90_000,
            currency: "EUR".into(),
        }),
        requirements: vec!["rust".into(), "sql".into()],
        location: Location {
            city: "Berlin".into(),
            remote: true,
        },
    }
}

/// The rule set a hiring service would attach to vacancy updates.
pub fn vacancy_constraints() -> Constraints<Vacancy> {
    Constraints::new()
        .pattern("/id", |v: &Vacancy| v.id.as_str(), Regex::new(r"^vac-\d+$").unwrap())
        .not_blank("/title", |v: &Vacancy| v.title.as_str())
        .length("/description", |v: &Vacancy| v.description.as_str(), 0, 2000)
        .check("/salary/min", "must not exceed /salary/max", |v: &Vacancy| {
            v.salary.as_ref().map_or(true, |s| s.min <= s.max)
        })
        .check("/requirements", "at most 10 entries", |v: &Vacancy| v.requirements.len() <= 10)
        .not_blank("/location/city", |v: &Vacancy| v.location.city.as_str())
}
