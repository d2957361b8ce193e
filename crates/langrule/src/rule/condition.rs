//! The one- or two-part condition encoded by a rule definition.
//!
//! Simple definitions hold `part1`/`value1` (or `part`/`value`). Multipart
//! definitions set `multipart` and add `operator`, `part2` and `value2`.

use std::fmt::{Display, Formatter, Result as FmtResult};
use std::iter;

use crate::error::RuleError;
use crate::rule::{Definition, sanitize_values};

/// How the two clauses of a multipart condition combine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    And,
    Or,
}

impl Operator {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operator::And => "and",
            Operator::Or => "or",
        }
    }
}

impl Display for Operator {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

/// One test: a part name such as `ends_in` applied to a list of values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Clause {
    pub part: String,
    pub values: Vec<String>,
}

impl Clause {
    /// `"does_not_end_in"` + `["12", "13"]` reads as `"does not end in 12, 13"`.
    pub fn describe(&self) -> String {
        format!("{} {}", self.part.replace('_', " "), self.values.join(", "))
    }
}

/// A parsed rule condition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Condition {
    pub first: Clause,
    pub second: Option<(Operator, Clause)>,
}

impl Condition {
    /// Parse the condition out of a definition on behalf of rule kind `kind`.
    pub fn parse(kind: &str, definition: &Definition) -> Result<Self, RuleError> {
        let multipart = match definition.get("multipart") {
            None => false,
            Some(value) => value.as_bool().ok_or_else(|| {
                RuleError::malformed(kind, "'multipart' must be a boolean")
            })?,
        };

        if !multipart {
            let part = definition.text("part1").or_else(|| definition.text("part"));
            let values = definition
                .text("value1")
                .or_else(|| definition.text("value"));
            return Ok(Condition {
                first: clause(kind, part, values, "1")?,
                second: None,
            });
        }

        let first = clause(
            kind,
            definition.text("part1"),
            definition.text("value1"),
            "1",
        )?;
        let operator = match definition.text("operator").map(str::trim) {
            Some("and") => Operator::And,
            Some("or") => Operator::Or,
            Some(other) => {
                return Err(RuleError::malformed(
                    kind,
                    format!("unknown operator '{other}', expected 'and' or 'or'"),
                ));
            }
            None => return Err(RuleError::malformed(kind, "multipart rule without 'operator'")),
        };
        let second = clause(
            kind,
            definition.text("part2"),
            definition.text("value2"),
            "2",
        )?;
        Ok(Condition {
            first,
            second: Some((operator, second)),
        })
    }

    /// Evaluate every clause with `test` and combine the results.
    ///
    /// Both clauses are always tested so that a malformed second clause is
    /// reported even when the first one decides the outcome.
    pub fn evaluate(
        &self,
        mut test: impl FnMut(&Clause) -> Result<bool, RuleError>,
    ) -> Result<bool, RuleError> {
        let first = test(&self.first)?;
        let Some((operator, clause)) = &self.second else {
            return Ok(first);
        };
        let second = test(clause)?;
        Ok(match operator {
            Operator::And => first && second,
            Operator::Or => first || second,
        })
    }

    /// The clauses in declaration order.
    pub fn clauses(&self) -> impl Iterator<Item = &Clause> {
        iter::once(&self.first).chain(self.second.as_ref().map(|(_, clause)| clause))
    }

    pub fn describe(&self) -> String {
        match &self.second {
            None => self.first.describe(),
            Some((operator, clause)) => format!(
                "{} {operator} {}",
                self.first.describe(),
                clause.describe()
            ),
        }
    }
}

fn clause(
    kind: &str,
    part: Option<&str>,
    values: Option<&str>,
    position: &str,
) -> Result<Clause, RuleError> {
    let part = part
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .ok_or_else(|| RuleError::malformed(kind, format!("missing 'part{position}'")))?;
    let values = values
        .map(sanitize_values)
        .filter(|values| !values.is_empty())
        .ok_or_else(|| RuleError::malformed(kind, format!("missing 'value{position}'")))?;
    Ok(Clause {
        part: part.to_string(),
        values,
    })
}
